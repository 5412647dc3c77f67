//! The rendering host seam.
//!
//! The coordinator never renders anything. It reads and overwrites the
//! host's selected outer index and asks the host for a layout pass after a
//! correction. [`SelectionSlot`] is a ready-made host slot for hosts that
//! keep no selection state of their own, and for tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use orbit_core::{ConnectionGuard, Property, Signal};

/// What the selection-wrap coordinator needs from a rendering host.
pub trait CarouselHost {
    /// The currently selected outer index, if anything is selected.
    fn selected_index(&self) -> Option<usize>;

    /// Overwrite the selected outer index.
    fn set_selected_index(&self, index: usize);

    /// Request a layout pass so the new selection is rendered in place.
    fn update_layout(&self);
}

/// A selected-index slot with change notification.
///
/// # Example
///
/// ```
/// use orbit::carousel::{CarouselHost, SelectionSlot};
///
/// let slot = SelectionSlot::new();
/// slot.selection_changed.connect(|index| println!("selected {index}"));
///
/// assert!(slot.select(3));
/// assert!(!slot.select(3));
/// assert_eq!(slot.selected_index(), Some(3));
/// ```
pub struct SelectionSlot {
    selected: Property<Option<usize>>,
    layout_passes: AtomicUsize,
    /// Emitted with the new index whenever the selection changes.
    pub selection_changed: Signal<usize>,
    /// Emitted for every requested layout pass.
    pub layout_requested: Signal<()>,
}

impl SelectionSlot {
    /// Create a slot with nothing selected.
    pub fn new() -> Self {
        Self {
            selected: Property::new(None),
            layout_passes: AtomicUsize::new(0),
            selection_changed: Signal::new(),
            layout_requested: Signal::new(),
        }
    }

    /// Create a slot with `index` already selected. Nothing is emitted.
    pub fn with_selection(index: usize) -> Self {
        let slot = Self::new();
        slot.selected.set_silent(Some(index));
        slot
    }

    /// Select `index`, returning `true` if the selection changed.
    pub fn select(&self, index: usize) -> bool {
        if self.selected.set(Some(index)) {
            self.selection_changed.emit(index);
            true
        } else {
            false
        }
    }

    /// Clear the selection without notification.
    pub fn clear(&self) {
        self.selected.set_silent(None);
    }

    /// Number of layout passes requested so far.
    pub fn layout_passes(&self) -> usize {
        self.layout_passes.load(Ordering::Relaxed)
    }

    /// Connects `slot` to [`selection_changed`](Self::selection_changed) for
    /// as long as the returned guard lives.
    pub fn subscribe<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard
    where
        F: Fn(&usize) + Send + Sync + 'static,
    {
        let id = self.selection_changed.connect(slot);
        let weak = Arc::downgrade(self);
        ConnectionGuard::new(move || {
            if let Some(host) = weak.upgrade() {
                host.selection_changed.disconnect(id);
            }
        })
    }
}

impl CarouselHost for SelectionSlot {
    fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }

    fn set_selected_index(&self, index: usize) {
        self.select(index);
    }

    fn update_layout(&self) {
        self.layout_passes.fetch_add(1, Ordering::Relaxed);
        self.layout_requested.emit(());
    }
}

impl Default for SelectionSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SelectionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSlot")
            .field("selected", &self.selected.get())
            .field("layout_passes", &self.layout_passes())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(SelectionSlot: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_select_emits_only_on_change() {
        let slot = SelectionSlot::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recv = seen.clone();
        slot.selection_changed.connect(move |index| recv.lock().push(*index));

        assert!(slot.select(2));
        assert!(!slot.select(2));
        assert!(slot.select(5));

        assert_eq!(*seen.lock(), vec![2, 5]);
        assert_eq!(slot.selected_index(), Some(5));
    }

    #[test]
    fn test_with_selection_and_clear() {
        let slot = SelectionSlot::with_selection(4);
        assert_eq!(slot.selected_index(), Some(4));
        slot.clear();
        assert_eq!(slot.selected_index(), None);
    }

    #[test]
    fn test_update_layout_counts_passes() {
        let slot = SelectionSlot::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let recv = fired.clone();
        slot.layout_requested.connect(move |_| {
            recv.fetch_add(1, Ordering::Relaxed);
        });

        slot.update_layout();
        slot.update_layout();

        assert_eq!(slot.layout_passes(), 2);
        assert_eq!(fired.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_subscription_guard() {
        let slot = Arc::new(SelectionSlot::new());
        let guard = slot.subscribe(|_| {});
        assert_eq!(slot.selection_changed.connection_count(), 1);
        drop(guard);
        assert_eq!(slot.selection_changed.connection_count(), 0);
    }
}
