//! Non-visual carousel controller.
//!
//! [`Carousel`] owns the items source and, for a cyclic source, the
//! selection-wrap coordinator. Host events go through it so a plain source
//! never arms a correction.

use std::sync::Arc;

use orbit_core::logging::targets;
use orbit_core::ConnectionGuard;

use super::coordinator::{SelectionWrapCoordinator, WrapState};
use super::host::{CarouselHost, SelectionSlot};
use super::source::CarouselSource;
use crate::model::{CycleConfig, CycleResult, CyclicList, ObservableList};

/// Routes host events for a plain or cyclic items source.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use orbit::carousel::{Carousel, CarouselHost, SelectionSlot};
/// use orbit::model::{CycleConfig, ObservableList};
///
/// let items = Arc::new(ObservableList::new(vec!["A", "B", "C", "D", "E"]));
/// let carousel = Carousel::cyclic(items, CycleConfig::default()).unwrap();
/// let host = SelectionSlot::new();
///
/// carousel.attach(&host);
/// assert_eq!(host.selected_index(), Some(2));
///
/// // The user flicks back onto the header duplicate of "D" and lets go.
/// host.select(0);
/// carousel.on_selection_changed(0).unwrap();
/// carousel.on_view_changed(&host, false).unwrap();
/// assert_eq!(host.selected_index(), Some(5));
/// ```
pub struct Carousel<T> {
    source: CarouselSource<T>,
    coordinator: Option<SelectionWrapCoordinator<T>>,
}

impl<T> Carousel<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a carousel over `source`. A cyclic source gets a coordinator.
    pub fn new(source: impl Into<CarouselSource<T>>) -> Self {
        let source = source.into();
        let coordinator = source
            .as_cyclic()
            .map(|list| SelectionWrapCoordinator::new(Arc::clone(list)));
        Self { source, coordinator }
    }

    /// Create a cyclic carousel over `items`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::InvalidArgument`](crate::model::CycleError::InvalidArgument)
    /// if `config` is invalid.
    pub fn cyclic(items: Arc<ObservableList<T>>, config: CycleConfig) -> CycleResult<Self> {
        Ok(Self::new(CyclicList::new(items, config)?))
    }

    /// The items source.
    pub fn source(&self) -> &CarouselSource<T> {
        &self.source
    }

    /// The coordinator, present only for a cyclic source.
    pub fn coordinator(&self) -> Option<&SelectionWrapCoordinator<T>> {
        self.coordinator.as_ref()
    }

    /// Returns `true` if the carousel wraps around.
    pub fn is_cycle_enabled(&self) -> bool {
        self.source.is_cycle_enabled()
    }

    /// Current correction state; always idle for a plain source.
    pub fn wrap_state(&self) -> WrapState {
        self.coordinator
            .as_ref()
            .map_or(WrapState::Idle, SelectionWrapCoordinator::state)
    }

    /// Number of positions the host lays out.
    pub fn count(&self) -> usize {
        self.source.count()
    }

    /// The item at host position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`](crate::model::CycleError::IndexOutOfRange)
    /// if `index >= count()`.
    pub fn get(&self, index: usize) -> CycleResult<T> {
        self.source.get(index)
    }

    /// Called once the host has loaded. Returns the centred index, if any.
    pub fn attach(&self, host: &impl CarouselHost) -> Option<usize> {
        self.coordinator.as_ref().and_then(|c| c.attach(host))
    }

    /// Forward a host selection change.
    ///
    /// # Errors
    ///
    /// Propagates [`SelectionWrapCoordinator::on_selection_changed`] errors.
    pub fn on_selection_changed(&self, index: usize) -> CycleResult<WrapState> {
        match &self.coordinator {
            Some(coordinator) => coordinator.on_selection_changed(index),
            None => Ok(WrapState::Idle),
        }
    }

    /// Forward a host view change.
    ///
    /// # Errors
    ///
    /// Propagates [`SelectionWrapCoordinator::on_view_changed`] errors.
    pub fn on_view_changed(
        &self,
        host: &impl CarouselHost,
        is_intermediate: bool,
    ) -> CycleResult<Option<usize>> {
        match &self.coordinator {
            Some(coordinator) => coordinator.on_view_changed(host, is_intermediate),
            None => Ok(None),
        }
    }

    /// Routes `slot`'s selection changes into this carousel until the
    /// returned guard is dropped. Stale indices are logged and ignored.
    pub fn bind(self: &Arc<Self>, slot: &Arc<SelectionSlot>) -> ConnectionGuard {
        let weak = Arc::downgrade(self);
        slot.subscribe(move |index| {
            let Some(carousel) = weak.upgrade() else {
                return;
            };
            if let Err(err) = carousel.on_selection_changed(*index) {
                tracing::warn!(target: targets::CAROUSEL, %err, "selection change rejected");
            }
        })
    }

    /// Whether a container about to show `item` is a wrap-item container.
    ///
    /// Hosts use this while preparing containers, before the item has an
    /// outer position.
    pub fn is_cycle_item_container(&self, item: &T) -> bool {
        self.source.is_cycle_item_value(item)
    }

    /// Whether virtualization must keep the container at `index` alive.
    ///
    /// Wrap-item containers are scrolled through on every wrap, so their
    /// clean-up is cancelled.
    pub fn keep_container_alive(&self, index: usize) -> bool {
        self.source.is_cycle_item(index)
    }
}

impl<T> std::fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("source", &self.source)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}

static_assertions::assert_impl_all!(Carousel<String>: Send, Sync);
