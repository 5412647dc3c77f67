//! Items source of a carousel.

use std::sync::Arc;

use crate::model::{CycleError, CycleResult, CyclicList, ObservableList};

/// The list a [`Carousel`](super::Carousel) displays.
///
/// Cyclic mode is a property of the variant: only a `Cyclic` source wraps,
/// and only a `Cyclic` source drives a selection-wrap coordinator.
pub enum CarouselSource<T> {
    /// A finite list shown as-is.
    Plain(Arc<ObservableList<T>>),
    /// A cyclic view with wrap duplicates at both ends.
    Cyclic(Arc<CyclicList<T>>),
}

impl<T> CarouselSource<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Returns `true` for a cyclic source.
    pub fn is_cycle_enabled(&self) -> bool {
        matches!(self, Self::Cyclic(_))
    }

    /// The cyclic view, if this source is one.
    pub fn as_cyclic(&self) -> Option<&Arc<CyclicList<T>>> {
        match self {
            Self::Cyclic(list) => Some(list),
            Self::Plain(_) => None,
        }
    }

    /// Number of positions the host lays out.
    pub fn count(&self) -> usize {
        match self {
            Self::Plain(list) => list.len(),
            Self::Cyclic(list) => list.count(),
        }
    }

    /// The item at host position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] if `index >= count()`.
    pub fn get(&self, index: usize) -> CycleResult<T> {
        match self {
            Self::Plain(list) => list.get(index).ok_or(CycleError::IndexOutOfRange {
                index,
                count: list.len(),
            }),
            Self::Cyclic(list) => list.get(index),
        }
    }

    /// Returns `true` if host position `index` holds a wrap duplicate.
    pub fn is_cycle_item(&self, index: usize) -> bool {
        self.as_cyclic().is_some_and(|list| list.is_cycle_item(index))
    }

    /// Returns `true` if `item` is duplicated into a wrap region.
    pub fn is_cycle_item_value(&self, item: &T) -> bool {
        self.as_cyclic().is_some_and(|list| list.is_cycle_item_value(item))
    }
}

impl<T> Clone for CarouselSource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(list) => Self::Plain(Arc::clone(list)),
            Self::Cyclic(list) => Self::Cyclic(Arc::clone(list)),
        }
    }
}

impl<T> From<Arc<ObservableList<T>>> for CarouselSource<T> {
    fn from(list: Arc<ObservableList<T>>) -> Self {
        Self::Plain(list)
    }
}

impl<T> From<Arc<CyclicList<T>>> for CarouselSource<T> {
    fn from(list: Arc<CyclicList<T>>) -> Self {
        Self::Cyclic(list)
    }
}

impl<T> std::fmt::Debug for CarouselSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("CarouselSource::Plain"),
            Self::Cyclic(_) => f.write_str("CarouselSource::Cyclic"),
        }
    }
}
