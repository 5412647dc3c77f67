//! Selection-wrap coordination.
//!
//! When the host's selection lands on a wrap duplicate, the coordinator arms
//! a correction. Once the gesture settles it rewrites the host's selected
//! index to the real item that duplicate stands for. Correcting mid-gesture
//! would make the carousel jump under the user's finger, so detection and
//! correction are split across the two host events.
//!
//! ```text
//!            header hit                     settle
//!   Idle ─────────────────▶ PendingFooter ───────────▶ Idle
//!     │      footer hit                     settle
//!     └───────────────────▶ PendingHeader ───────────▶ Idle
//! ```
//!
//! A header hit arms the footer watch (and vice versa): after wrapping
//! backwards off the header, the next natural wrap is off the footer.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use orbit_core::logging::{span_names, targets};
use orbit_core::{PerfSpan, Signal};
use parking_lot::Mutex;

use super::host::CarouselHost;
use crate::model::{CycleError, CycleResult, CyclicList};

/// Correction state of a [`SelectionWrapCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapState {
    /// No correction pending.
    #[default]
    Idle,
    /// The selection wrapped off the footer; the header is watched next.
    PendingHeaderCorrection,
    /// The selection wrapped off the header; the footer is watched next.
    PendingFooterCorrection,
}

impl WrapState {
    /// Returns `true` if a settle will correct the selection.
    pub fn is_pending(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Moves a selection off wrap duplicates once the host's gesture settles.
pub struct SelectionWrapCoordinator<T> {
    list: Arc<CyclicList<T>>,
    state: Mutex<WrapState>,
    attached: AtomicBool,
    cycle_selection_changed: Signal<usize>,
}

impl<T> SelectionWrapCoordinator<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create an idle, unattached coordinator for `list`.
    pub fn new(list: Arc<CyclicList<T>>) -> Self {
        Self {
            list,
            state: Mutex::new(WrapState::Idle),
            attached: AtomicBool::new(false),
            cycle_selection_changed: Signal::new(),
        }
    }

    /// The cyclic view this coordinator corrects selections for.
    pub fn list(&self) -> &Arc<CyclicList<T>> {
        &self.list
    }

    /// Current correction state.
    pub fn state(&self) -> WrapState {
        *self.state.lock()
    }

    /// Emitted with the settled outer index after the initial centring and
    /// after every correction.
    pub fn cycle_selection_changed(&self) -> &Signal<usize> {
        &self.cycle_selection_changed
    }

    /// Returns `true` once [`attach`](Self::attach) has run.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Marks the host as loaded and, if configured and the view is large
    /// enough, selects the first real item.
    ///
    /// Centring happens when `center_on_attach` is set and the view holds
    /// more than twice `cross_length` outer items. Returns the selected outer
    /// index if the coordinator moved the selection.
    pub fn attach(&self, host: &impl CarouselHost) -> Option<usize> {
        self.attached.store(true, Ordering::Release);

        let config = self.list.config();
        let count = self.list.count();
        if !config.center_on_attach || count <= 2 * config.cross_length {
            tracing::debug!(
                target: targets::CAROUSEL,
                count,
                cross_length = config.cross_length,
                "coordinator attached without centring"
            );
            return None;
        }

        let first = self.list.convert_from_item_index(0);
        host.set_selected_index(first);
        host.update_layout();
        tracing::debug!(target: targets::CAROUSEL, index = first, "coordinator centred on first item");
        self.cycle_selection_changed.emit(first);
        Some(first)
    }

    /// Stops reacting to settle events and drops any pending correction.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::Release);
        self.reset();
    }

    /// Drops any pending correction.
    pub fn reset(&self) {
        *self.state.lock() = WrapState::Idle;
    }

    /// Handles a selection change reported by the host, possibly mid-gesture.
    ///
    /// Landing on a wrap duplicate arms the opposite watch. Landing on a real
    /// item leaves the state as it is. Returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] if `outer` is not a valid
    /// outer index; the state is left untouched.
    pub fn on_selection_changed(&self, outer: usize) -> CycleResult<WrapState> {
        let count = self.list.count();
        if outer >= count {
            tracing::warn!(target: targets::CAROUSEL, index = outer, count, "stale selection index");
            return Err(CycleError::IndexOutOfRange { index: outer, count });
        }

        let armed = if self.list.is_header(outer) {
            WrapState::PendingFooterCorrection
        } else if self.list.is_footer(outer) {
            WrapState::PendingHeaderCorrection
        } else {
            return Ok(self.state());
        };

        *self.state.lock() = armed;
        tracing::debug!(target: targets::CAROUSEL, index = outer, state = ?armed, "wrap item selected");
        Ok(armed)
    }

    /// Handles a view change from the host. `is_intermediate` is `true` while
    /// the gesture is still in progress; the first `false` is the settle.
    ///
    /// On settle with a pending correction the host's selection is rewritten
    /// to the real item, a layout pass is requested and the state returns to
    /// idle. Returns the corrected outer index if a correction was made.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] if the host's selected index is
    /// stale; the pending state is kept.
    pub fn on_view_changed(
        &self,
        host: &impl CarouselHost,
        is_intermediate: bool,
    ) -> CycleResult<Option<usize>> {
        if is_intermediate || !self.is_attached() {
            return Ok(None);
        }
        let state = self.state();
        if !state.is_pending() {
            return Ok(None);
        }

        let _span = PerfSpan::new(span_names::SETTLE);
        let Some(current) = host.selected_index() else {
            self.reset();
            return Ok(None);
        };

        let inner = self.list.convert_to_item_index(current)?;
        let corrected = self.list.convert_from_item_index(inner);

        host.set_selected_index(corrected);
        host.update_layout();
        self.reset();

        tracing::debug!(
            target: targets::CAROUSEL,
            from = current,
            to = corrected,
            state = ?state,
            "selection wrapped to real item"
        );
        self.cycle_selection_changed.emit(corrected);
        Ok(Some(corrected))
    }
}

impl<T> fmt::Debug for SelectionWrapCoordinator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionWrapCoordinator")
            .field("state", &*self.state.lock())
            .field("attached", &self.attached.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(SelectionWrapCoordinator<String>: Send, Sync);
