//! Observable source list.
//!
//! `ObservableList<T>` is the caller-owned sequence a carousel displays. It
//! emits one [`ListChange`] per structural edit, after the edit is complete
//! and the internal lock has been released, so slots may read the list.

use std::sync::Arc;

use orbit_core::logging::targets;
use orbit_core::{ConnectionGuard, Signal};
use parking_lot::RwLock;

use super::change::ListChange;
use super::error::{ListError, ListResult};

/// A mutable, ordered list that announces every structural change.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use orbit::model::{ListChange, ObservableList};
///
/// let list = Arc::new(ObservableList::new(vec!["a", "b"]));
/// let _guard = list.subscribe(|change| {
///     if let ListChange::Added { index, item } = change {
///         println!("{item} added at {index}");
///     }
/// });
/// list.push("c").unwrap();
/// assert_eq!(list.len(), 3);
/// ```
pub struct ObservableList<T> {
    items: RwLock<Vec<T>>,
    capacity: Option<usize>,
    changed: Signal<ListChange<T>>,
}

impl<T: Clone + Send + Sync + 'static> ObservableList<T> {
    /// Creates a list holding `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            capacity: None,
            changed: Signal::new(),
        }
    }

    /// Creates an empty list.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a list that refuses to grow beyond `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CapacityExceeded`] if `items` is already too long.
    pub fn with_capacity_limit(items: Vec<T>, capacity: usize) -> ListResult<Self> {
        if items.len() > capacity {
            return Err(ListError::CapacityExceeded { capacity });
        }
        Ok(Self {
            items: RwLock::new(items),
            capacity: Some(capacity),
            changed: Signal::new(),
        })
    }

    /// Returns the signal emitted after every structural change.
    pub fn changed(&self) -> &Signal<ListChange<T>> {
        &self.changed
    }

    /// Connects `slot` to [`changed`](Self::changed) for as long as the
    /// returned guard lives.
    pub fn subscribe<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard
    where
        F: Fn(&ListChange<T>) + Send + Sync + 'static,
    {
        let id = self.changed.connect(slot);
        let weak = Arc::downgrade(self);
        ConnectionGuard::new(move || {
            if let Some(list) = weak.upgrade() {
                list.changed.disconnect(id);
            }
        })
    }

    /// Returns the number of items in the list.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the capacity limit, if any.
    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    /// Returns a clone of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a reference to the items (read-only access).
    ///
    /// Do not mutate the list while holding the returned guard.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Returns a copy of the current items.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Appends an item to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CapacityExceeded`] if the list is full.
    pub fn push(&self, item: T) -> ListResult<()> {
        let index = {
            let mut items = self.items.write();
            self.check_capacity(items.len())?;
            items.push(item.clone());
            items.len() - 1
        };
        self.notify(ListChange::Added { index, item });
        Ok(())
    }

    /// Inserts an item at `index`, shifting later items back.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index > len()`, or
    /// [`ListError::CapacityExceeded`] if the list is full.
    pub fn insert(&self, index: usize, item: T) -> ListResult<()> {
        {
            let mut items = self.items.write();
            if index > items.len() {
                return Err(ListError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            self.check_capacity(items.len())?;
            items.insert(index, item.clone());
        }
        self.notify(ListChange::Added { index, item });
        Ok(())
    }

    /// Removes and returns the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&self, index: usize) -> ListResult<T> {
        let removed = {
            let mut items = self.items.write();
            if index >= items.len() {
                return Err(ListError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            items.remove(index)
        };
        self.notify(ListChange::Removed { index });
        Ok(removed)
    }

    /// Removes the first item equal to `item`. Returns `true` if one was found.
    pub fn remove(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let position = self.items.read().iter().position(|candidate| candidate == item);
        match position {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Overwrites the item at `index`, returning the previous item.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&self, index: usize, item: T) -> ListResult<T> {
        let old = {
            let mut items = self.items.write();
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or(ListError::IndexOutOfRange { index, len })?;
            std::mem::replace(slot, item.clone())
        };
        self.notify(ListChange::Replaced { index, item });
        Ok(old)
    }

    /// Moves the item at `old_index` so that it ends up at `new_index`.
    ///
    /// Moving an item onto its own position changes nothing and emits nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if either index is `>= len()`.
    pub fn move_item(&self, old_index: usize, new_index: usize) -> ListResult<()> {
        {
            let mut items = self.items.write();
            let len = items.len();
            for index in [old_index, new_index] {
                if index >= len {
                    return Err(ListError::IndexOutOfRange { index, len });
                }
            }
            if old_index == new_index {
                return Ok(());
            }
            let item = items.remove(old_index);
            items.insert(new_index, item);
        }
        self.notify(ListChange::Moved {
            old_index,
            new_index,
        });
        Ok(())
    }

    /// Removes all items from the list.
    pub fn clear(&self) {
        self.items.write().clear();
        self.notify(ListChange::Reset);
    }

    /// Replaces all items in the list.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CapacityExceeded`] if `items` exceeds the limit.
    pub fn set_items(&self, items: Vec<T>) -> ListResult<()> {
        if let Some(capacity) = self.capacity
            && items.len() > capacity
        {
            return Err(ListError::CapacityExceeded { capacity });
        }
        *self.items.write() = items;
        self.notify(ListChange::Reset);
        Ok(())
    }

    /// Announces a reset without changing the contents.
    pub fn reset(&self) {
        self.notify(ListChange::Reset);
    }

    fn check_capacity(&self, len: usize) -> ListResult<()> {
        match self.capacity {
            Some(capacity) if len >= capacity => Err(ListError::CapacityExceeded { capacity }),
            _ => Ok(()),
        }
    }

    fn notify(&self, change: ListChange<T>) {
        tracing::trace!(
            target: targets::MODEL,
            kind = change.kind(),
            len = self.len(),
            "source list changed"
        );
        self.changed.emit(change);
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone + Send + Sync + 'static> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &*self.items.read())
            .field("capacity", &self.capacity)
            .finish()
    }
}

static_assertions::assert_impl_all!(ObservableList<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(list: &Arc<ObservableList<char>>) -> (Arc<Mutex<Vec<ListChange<char>>>>, ConnectionGuard) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recv = events.clone();
        let guard = list.subscribe(move |change| recv.lock().push(change.clone()));
        (events, guard)
    }

    #[test]
    fn test_push_and_insert_emit_added() {
        let list = Arc::new(ObservableList::new(vec!['a', 'b']));
        let (events, _guard) = recorder(&list);

        list.push('c').unwrap();
        list.insert(0, 'z').unwrap();

        assert_eq!(list.snapshot(), vec!['z', 'a', 'b', 'c']);
        assert_eq!(
            *events.lock(),
            vec![
                ListChange::Added { index: 2, item: 'c' },
                ListChange::Added { index: 0, item: 'z' },
            ]
        );
    }

    #[test]
    fn test_remove_and_set() {
        let list = Arc::new(ObservableList::new(vec!['a', 'b', 'c']));
        let (events, _guard) = recorder(&list);

        assert_eq!(list.remove_at(1).unwrap(), 'b');
        assert_eq!(list.set(0, 'x').unwrap(), 'a');
        assert!(list.remove(&'c'));
        assert!(!list.remove(&'q'));

        assert_eq!(list.snapshot(), vec!['x']);
        assert_eq!(
            *events.lock(),
            vec![
                ListChange::Removed { index: 1 },
                ListChange::Replaced { index: 0, item: 'x' },
                ListChange::Removed { index: 1 },
            ]
        );
    }

    #[test]
    fn test_move_item() {
        let list = Arc::new(ObservableList::new(vec!['a', 'b', 'c']));
        let (events, _guard) = recorder(&list);

        list.move_item(0, 2).unwrap();
        list.move_item(1, 1).unwrap();

        assert_eq!(list.snapshot(), vec!['b', 'c', 'a']);
        assert_eq!(
            *events.lock(),
            vec![ListChange::Moved { old_index: 0, new_index: 2 }]
        );
    }

    #[test]
    fn test_out_of_range() {
        let list = ObservableList::new(vec!['a']);
        assert_eq!(
            list.insert(2, 'b'),
            Err(ListError::IndexOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(
            list.remove_at(1),
            Err(ListError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            list.move_item(0, 3),
            Err(ListError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert!(list.set(5, 'x').is_err());
    }

    #[test]
    fn test_capacity_limit() {
        let list = ObservableList::with_capacity_limit(vec!['a'], 2).unwrap();
        list.push('b').unwrap();
        assert_eq!(
            list.push('c'),
            Err(ListError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(
            list.set_items(vec!['a', 'b', 'c']),
            Err(ListError::CapacityExceeded { capacity: 2 })
        );
        assert!(ObservableList::with_capacity_limit(vec!['a', 'b'], 1).is_err());
    }

    #[test]
    fn test_reset_variants() {
        let list = Arc::new(ObservableList::new(vec!['a', 'b']));
        let (events, _guard) = recorder(&list);

        list.reset();
        list.set_items(vec!['c']).unwrap();
        list.clear();

        assert!(list.is_empty());
        assert_eq!(events.lock().len(), 3);
        assert!(events.lock().iter().all(|e| *e == ListChange::Reset));
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let list = Arc::new(ObservableList::new(vec!['a']));
        let guard = list.subscribe(|_| {});
        assert_eq!(list.changed().connection_count(), 1);
        drop(guard);
        assert_eq!(list.changed().connection_count(), 0);
    }
}
