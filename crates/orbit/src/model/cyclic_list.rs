//! Cyclic view over an observable list.
//!
//! `CyclicList<T>` presents `header ++ source ++ footer`, where the header
//! repeats the tail of the source and the footer repeats its head. A carousel
//! scrolled past either end of the real items lands on these wrap duplicates,
//! and a [`SelectionWrapCoordinator`](crate::carousel::SelectionWrapCoordinator)
//! then snaps the selection back onto the equivalent real item.
//!
//! # Population rule
//!
//! | source length          | header                  | footer                   |
//! |------------------------|-------------------------|--------------------------|
//! | 0                      | empty                   | empty                    |
//! | 1                      | the item, twice         | the item, twice          |
//! | below `cross_length`   | every item              | every item               |
//! | `cross_length` or more | last `cross_length`     | first `cross_length`     |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use orbit::model::{CycleConfig, CyclicList, ObservableList};
//!
//! let source = Arc::new(ObservableList::new(vec!['A', 'B', 'C', 'D', 'E']));
//! let cycle = CyclicList::new(source, CycleConfig::default()).unwrap();
//!
//! assert_eq!(cycle.count(), 9);
//! assert_eq!(cycle.get(0).unwrap(), 'D');
//! assert_eq!(cycle.convert_to_item_index(0).unwrap(), 3);
//! assert!(cycle.is_header(0));
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use orbit_core::logging::{span_names, targets};
use orbit_core::{ConnectionGuard, PerfSpan, Signal};
use parking_lot::{Mutex, RwLock};

use super::change::{translate, ListChange, WrapChange, WrapLayout};
use super::classify::{IndexMapping, PositionClassifier, ValueClassifier};
use super::config::CycleConfig;
use super::error::{CycleError, CycleResult};
use super::observable_list::ObservableList;

/// Wrap duplicates plus the layout they were built for.
struct WrapRegions<T> {
    header: Vec<T>,
    footer: Vec<T>,
    layout: WrapLayout,
    /// Bumped on every rebuild; iterators compare against it.
    generation: u64,
}

impl<T: Clone> WrapRegions<T> {
    fn build(items: &[T], cross_length: usize, generation: u64) -> Self {
        let (header, footer) = match items.len() {
            0 => (Vec::new(), Vec::new()),
            1 => (vec![items[0].clone(); 2], vec![items[0].clone(); 2]),
            n if n < cross_length => (items.to_vec(), items.to_vec()),
            n => (
                items[n - cross_length..].to_vec(),
                items[..cross_length].to_vec(),
            ),
        };
        Self {
            header,
            footer,
            layout: WrapLayout::for_source_len(items.len(), cross_length),
            generation,
        }
    }
}

/// Where an outer index points, resolved under the regions lock.
enum Slot<T> {
    Wrap(T),
    Source(usize),
}

/// An infinite-scrolling view over an [`ObservableList`].
///
/// The adapter shares the source through an `Arc` and keeps a subscription
/// to its [`changed`](ObservableList::changed) signal until it is dropped or
/// [`detach`](Self::detach)ed. Every source change rebuilds the wrap regions
/// before the translated change is emitted on [`changed`](Self::changed).
pub struct CyclicList<T> {
    source: Arc<ObservableList<T>>,
    config: CycleConfig,
    regions: RwLock<WrapRegions<T>>,
    subscription: Mutex<Option<ConnectionGuard>>,
    changed: Signal<ListChange<T>>,
    wrap_changed: Signal<WrapChange>,
}

impl<T> CyclicList<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates a cyclic view over `source` and subscribes to its changes.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::InvalidArgument`] if `config` is invalid.
    pub fn new(source: Arc<ObservableList<T>>, config: CycleConfig) -> CycleResult<Arc<Self>> {
        config.validate()?;

        let list = Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let guard = source.subscribe(move |change| {
                if let Some(list) = weak.upgrade() {
                    list.on_source_changed(change);
                }
            });
            let regions = WrapRegions::build(&source.items(), config.cross_length, 0);

            Self {
                source,
                config,
                regions: RwLock::new(regions),
                subscription: Mutex::new(Some(guard)),
                changed: Signal::new(),
                wrap_changed: Signal::new(),
            }
        });

        tracing::debug!(
            target: targets::MODEL,
            cross_length = list.config.cross_length,
            count = list.count(),
            "cyclic list attached to source"
        );
        Ok(list)
    }

    /// Creates a cyclic view over a source that may already be gone.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::InvalidArgument`] if the source has been dropped
    /// or `config` is invalid.
    pub fn from_weak(source: &Weak<ObservableList<T>>, config: CycleConfig) -> CycleResult<Arc<Self>> {
        let source = source
            .upgrade()
            .ok_or_else(|| CycleError::InvalidArgument("source list has been dropped".into()))?;
        Self::new(source, config)
    }

    /// Starts building a cyclic view.
    pub fn builder() -> CyclicListBuilder<T> {
        CyclicListBuilder::new()
    }

    // -------------------------------------------------------------------------
    // Signals and lifetime
    // -------------------------------------------------------------------------

    /// Signal carrying every source change, translated to outer indices.
    pub fn changed(&self) -> &Signal<ListChange<T>> {
        &self.changed
    }

    /// Signal emitted after a rebuild that altered the header or footer.
    pub fn wrap_changed(&self) -> &Signal<WrapChange> {
        &self.wrap_changed
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

    /// Releases the source subscription. The view keeps its last layout
    /// until [`invalidate`](Self::invalidate) is called.
    pub fn detach(&self) {
        if let Some(mut guard) = self.subscription.lock().take() {
            guard.disconnect();
            tracing::debug!(target: targets::MODEL, "cyclic list detached from source");
        }
    }

    /// Returns `true` while the view tracks its source.
    pub fn is_attached(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Rebuilds the wrap regions from the source and emits a reset.
    pub fn invalidate(&self) {
        self.apply(ListChange::Reset);
    }

    /// The shared source list.
    pub fn source(&self) -> &Arc<ObservableList<T>> {
        &self.source
    }

    /// The configuration this view was built with.
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Random access
    // -------------------------------------------------------------------------

    /// Region lengths as of the last rebuild.
    pub fn layout(&self) -> WrapLayout {
        self.regions.read().layout
    }

    /// Number of outer indices: header, source and footer combined.
    pub fn count(&self) -> usize {
        self.layout().count()
    }

    /// Number of source items.
    pub fn items_count(&self) -> usize {
        self.layout().source
    }

    /// Returns `true` if the view has no items at all.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the item at `outer`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] if `outer >= count()`.
    pub fn get(&self, outer: usize) -> CycleResult<T> {
        let (slot, count) = {
            let regions = self.regions.read();
            let layout = regions.layout;
            if outer >= layout.count() {
                return Err(CycleError::IndexOutOfRange {
                    index: outer,
                    count: layout.count(),
                });
            }
            let slot = if outer < layout.header {
                Slot::Wrap(regions.header[outer].clone())
            } else if outer >= layout.footer_start() {
                Slot::Wrap(regions.footer[outer - layout.footer_start()].clone())
            } else {
                Slot::Source(outer - layout.header)
            };
            (slot, layout.count())
        };

        match slot {
            Slot::Wrap(item) => Ok(item),
            Slot::Source(inner) => self
                .source
                .get(inner)
                .ok_or(CycleError::IndexOutOfRange { index: outer, count }),
        }
    }

    /// A copy of the header wrap items.
    pub fn header(&self) -> Vec<T> {
        self.regions.read().header.clone()
    }

    /// A copy of the footer wrap items.
    pub fn footer(&self) -> Vec<T> {
        self.regions.read().footer.clone()
    }

    /// Iterates header, source, then footer.
    ///
    /// The iterator is fail-fast: once the view is rebuilt it stops yielding
    /// and [`Iter::is_stale`] reports `true`.
    pub fn iter(&self) -> Iter<'_, T> {
        let regions = self.regions.read();
        Iter {
            list: self,
            next: 0,
            end: regions.layout.count(),
            generation: regions.generation,
            stale: false,
        }
    }

    fn generation(&self) -> u64 {
        self.regions.read().generation
    }

    // -------------------------------------------------------------------------
    // Index conversion and classification
    // -------------------------------------------------------------------------

    /// Maps an outer index onto the source index it displays.
    ///
    /// Header positions wrap onto the tail of the source and footer positions
    /// onto its head. The footer starts exactly at `header + source`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] if `outer >= count()`.
    pub fn convert_to_item_index(&self, outer: usize) -> CycleResult<usize> {
        let layout = self.layout();
        if outer >= layout.count() {
            return Err(CycleError::IndexOutOfRange {
                index: outer,
                count: layout.count(),
            });
        }
        let n = layout.source;
        let inner = if outer < layout.header {
            // The singleton rule makes the header longer than the source.
            (outer + n - layout.header % n) % n
        } else if outer >= layout.footer_start() {
            (outer - layout.footer_start()) % n
        } else {
            outer - layout.header
        };
        Ok(inner)
    }

    /// Maps a source index onto the outer index of its real item.
    pub fn convert_from_item_index(&self, inner: usize) -> usize {
        inner + self.layout().header
    }

    /// Returns `true` if `outer` lies in the header.
    pub fn is_header(&self, outer: usize) -> bool {
        outer < self.layout().header
    }

    /// Returns `true` if `outer` lies in the footer.
    pub fn is_footer(&self, outer: usize) -> bool {
        let layout = self.layout();
        outer >= layout.footer_start() && outer < layout.count()
    }

    /// Returns `true` if `outer` holds a wrap duplicate.
    pub fn is_cycle_item(&self, outer: usize) -> bool {
        self.is_header(outer) || self.is_footer(outer)
    }

    /// Returns `true` if an item equal to `item` is duplicated into the header.
    pub fn is_header_item(&self, item: &T) -> bool {
        self.regions.read().header.contains(item)
    }

    /// Returns `true` if an item equal to `item` is duplicated into the footer.
    pub fn is_footer_item(&self, item: &T) -> bool {
        self.regions.read().footer.contains(item)
    }

    /// Returns `true` if an item equal to `item` is duplicated into either region.
    pub fn is_cycle_item_value(&self, item: &T) -> bool {
        self.is_header_item(item) || self.is_footer_item(item)
    }

    // -------------------------------------------------------------------------
    // Mutation passthroughs (outer indices, applied to the source)
    // -------------------------------------------------------------------------

    /// Inserts `item` into the source at the position shown at `outer`.
    ///
    /// Any outer index from the first real item up to and including the first
    /// footer position inserts before the real item it names (or appends);
    /// header and later footer positions insert before the item they duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] if `outer > count()` for a
    /// non-empty view, or propagates the source error.
    pub fn insert(&self, outer: usize, item: T) -> CycleResult<()> {
        let layout = self.layout();
        let inner = if (layout.header..=layout.footer_start()).contains(&outer) {
            outer - layout.header
        } else {
            self.convert_to_item_index(outer)?
        };
        self.source.insert(inner, item)?;
        Ok(())
    }

    /// Removes the source item shown at `outer` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] for a bad outer index, or
    /// propagates the source error.
    pub fn remove_at(&self, outer: usize) -> CycleResult<T> {
        let inner = self.convert_to_item_index(outer)?;
        Ok(self.source.remove_at(inner)?)
    }

    /// Overwrites the source item shown at `outer`, returning the previous item.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] for a bad outer index, or
    /// propagates the source error.
    pub fn set(&self, outer: usize, item: T) -> CycleResult<T> {
        let inner = self.convert_to_item_index(outer)?;
        Ok(self.source.set(inner, item)?)
    }

    /// Appends `item` to the source.
    ///
    /// # Errors
    ///
    /// Propagates the source error.
    pub fn add(&self, item: T) -> CycleResult<()> {
        Ok(self.source.push(item)?)
    }

    /// Removes the first source item equal to `item`.
    pub fn remove(&self, item: &T) -> bool {
        self.source.remove(item)
    }

    /// Moves the source item shown at `old_outer` to the source position
    /// shown at `new_outer`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`] for a bad outer index, or
    /// propagates the source error.
    pub fn move_item(&self, old_outer: usize, new_outer: usize) -> CycleResult<()> {
        let old_inner = self.convert_to_item_index(old_outer)?;
        let new_inner = self.convert_to_item_index(new_outer)?;
        Ok(self.source.move_item(old_inner, new_inner)?)
    }

    // -------------------------------------------------------------------------
    // Change translation
    // -------------------------------------------------------------------------

    fn on_source_changed(&self, change: &ListChange<T>) {
        self.apply(change.clone());
    }

    /// Rebuilds the wrap regions, then publishes the translated change.
    fn apply(&self, change: ListChange<T>) {
        let (before, after, header_changed, footer_changed) = {
            let _span = PerfSpan::new(span_names::REBUILD);
            let items = self.source.items();
            let mut regions = self.regions.write();
            let rebuilt =
                WrapRegions::build(&items, self.config.cross_length, regions.generation + 1);
            let header_changed = rebuilt.header != regions.header;
            let footer_changed = rebuilt.footer != regions.footer;
            let before = regions.layout;
            *regions = rebuilt;
            (before, regions.layout, header_changed, footer_changed)
        };

        tracing::debug!(
            target: targets::MODEL,
            kind = change.kind(),
            header = after.header,
            source = after.source,
            footer = after.footer,
            "wrap regions rebuilt"
        );

        self.changed.emit(translate(change, before, after));

        if header_changed || footer_changed {
            self.wrap_changed.emit(WrapChange {
                before,
                after,
                header_changed,
                footer_changed,
            });
        }
    }
}

impl<T> PositionClassifier for CyclicList<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn is_header(&self, outer: usize) -> bool {
        CyclicList::is_header(self, outer)
    }

    fn is_footer(&self, outer: usize) -> bool {
        CyclicList::is_footer(self, outer)
    }
}

impl<T> ValueClassifier<T> for CyclicList<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn is_header_item(&self, item: &T) -> bool {
        CyclicList::is_header_item(self, item)
    }

    fn is_footer_item(&self, item: &T) -> bool {
        CyclicList::is_footer_item(self, item)
    }
}

impl<T> IndexMapping for CyclicList<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn count(&self) -> usize {
        CyclicList::count(self)
    }

    fn items_count(&self) -> usize {
        CyclicList::items_count(self)
    }

    fn convert_to_item_index(&self, outer: usize) -> CycleResult<usize> {
        CyclicList::convert_to_item_index(self, outer)
    }

    fn convert_from_item_index(&self, inner: usize) -> usize {
        CyclicList::convert_from_item_index(self, inner)
    }
}

impl<T: fmt::Debug> fmt::Debug for CyclicList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regions = self.regions.read();
        f.debug_struct("CyclicList")
            .field("header", &regions.header)
            .field("footer", &regions.footer)
            .field("layout", &regions.layout)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Fail-fast iterator over a [`CyclicList`], see [`CyclicList::iter`].
pub struct Iter<'a, T> {
    list: &'a CyclicList<T>,
    next: usize,
    end: usize,
    generation: u64,
    stale: bool,
}

impl<T> Iter<'_, T> {
    /// Returns `true` if the view was rebuilt while iterating.
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

impl<T> Iterator for Iter<'_, T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.stale || self.next >= self.end {
            return None;
        }
        if self.list.generation() != self.generation {
            self.stale = true;
            tracing::warn!(
                target: targets::MODEL,
                position = self.next,
                "cyclic list rebuilt during iteration; iterator stopped"
            );
            return None;
        }
        let item = self.list.get(self.next).ok()?;
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end.saturating_sub(self.next)))
    }
}

impl<'a, T> IntoIterator for &'a CyclicList<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`CyclicList`].
///
/// ```
/// use std::sync::Arc;
/// use orbit::model::{CyclicList, ObservableList};
///
/// let source = Arc::new(ObservableList::new(vec![1, 2, 3, 4]));
/// let cycle = CyclicList::builder().source(source).cross_length(1).build().unwrap();
/// assert_eq!(cycle.count(), 6);
///
/// assert!(CyclicList::<i32>::builder().build().is_err());
/// ```
pub struct CyclicListBuilder<T> {
    source: Option<Arc<ObservableList<T>>>,
    config: CycleConfig,
}

impl<T> CyclicListBuilder<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a builder with the default configuration and no source.
    pub fn new() -> Self {
        Self {
            source: None,
            config: CycleConfig::default(),
        }
    }

    /// Set the source list.
    pub fn source(mut self, source: Arc<ObservableList<T>>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: CycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the cross length.
    pub fn cross_length(mut self, cross_length: usize) -> Self {
        self.config.cross_length = cross_length;
        self
    }

    /// Build the view.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::InvalidArgument`] if no source was given or the
    /// configuration is invalid.
    pub fn build(self) -> CycleResult<Arc<CyclicList<T>>> {
        let source = self
            .source
            .ok_or_else(|| CycleError::InvalidArgument("a source list is required".into()))?;
        CyclicList::new(source, self.config)
    }
}

impl<T> Default for CyclicListBuilder<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(CyclicList<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListError;

    type Recorded<E> = Arc<Mutex<Vec<E>>>;

    fn letters(items: &[&'static str]) -> Arc<ObservableList<&'static str>> {
        Arc::new(ObservableList::new(items.to_vec()))
    }

    fn cycle(items: &[&'static str], cross_length: usize) -> Arc<CyclicList<&'static str>> {
        CyclicList::new(letters(items), CycleConfig::new().cross_length(cross_length)).unwrap()
    }

    fn record_changes(
        list: &Arc<CyclicList<&'static str>>,
    ) -> (Recorded<ListChange<&'static str>>, ConnectionGuard) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recv = events.clone();
        let guard = list.subscribe(move |change| recv.lock().push(change.clone()));
        (events, guard)
    }

    const ABCDE: [&str; 5] = ["A", "B", "C", "D", "E"];

    #[test]
    fn test_wrap_regions_for_five_items() {
        let list = cycle(&ABCDE, 2);

        assert_eq!(list.header(), vec!["D", "E"]);
        assert_eq!(list.footer(), vec!["A", "B"]);
        assert_eq!(list.count(), 9);
        assert_eq!(list.items_count(), 5);
        assert_eq!(list.get(0).unwrap(), "D");
        assert_eq!(list.get(8).unwrap(), "B");
        assert_eq!(list.convert_to_item_index(0).unwrap(), 3);
        assert_eq!(list.convert_to_item_index(8).unwrap(), 1);
    }

    #[test]
    fn test_population_rule_branches() {
        let empty = cycle(&[], 2);
        assert!(empty.header().is_empty() && empty.footer().is_empty());
        assert_eq!(empty.count(), 0);
        assert!(empty.is_empty());

        let single = cycle(&["A"], 2);
        assert_eq!(single.header(), vec!["A", "A"]);
        assert_eq!(single.footer(), vec!["A", "A"]);
        assert_eq!(single.count(), 5);

        let short = cycle(&["A", "B"], 3);
        assert_eq!(short.header(), vec!["A", "B"]);
        assert_eq!(short.footer(), vec!["A", "B"]);
        assert_eq!(short.count(), 6);

        let exact = cycle(&["A", "B", "C"], 3);
        assert_eq!(exact.header(), vec!["A", "B", "C"]);
        assert_eq!(exact.footer(), vec!["A", "B", "C"]);
        assert_eq!(exact.count(), 9);
    }

    #[test]
    fn test_count_matches_regions_for_all_lengths() {
        for cross_length in 1..=4 {
            for len in 0..=7 {
                let items: Vec<&'static str> = ABCDE.iter().cycle().take(len).copied().collect();
                let list = cycle(&items, cross_length);
                assert_eq!(
                    list.count(),
                    list.header().len() + len + list.footer().len(),
                    "len {len}, cross_length {cross_length}"
                );
            }
        }
    }

    #[test]
    fn test_round_trip_inner_indices() {
        for len in 1..=6 {
            let items: Vec<&'static str> = ABCDE.iter().cycle().take(len).copied().collect();
            let list = cycle(&items, 2);
            for inner in 0..len {
                let outer = list.convert_from_item_index(inner);
                assert_eq!(list.convert_to_item_index(outer).unwrap(), inner);
                assert!(!list.is_cycle_item(outer));
            }
        }
    }

    #[test]
    fn test_every_outer_index_shows_its_inner_item() {
        for len in 1..=6 {
            let items: Vec<&'static str> = ABCDE.iter().cycle().take(len).copied().collect();
            let list = cycle(&items, 2);
            for outer in 0..list.count() {
                let inner = list.convert_to_item_index(outer).unwrap();
                assert_eq!(list.get(outer).unwrap(), items[inner], "len {len}, outer {outer}");
            }
        }
    }

    #[test]
    fn test_footer_starts_right_after_source() {
        let list = cycle(&ABCDE, 2);

        // The first footer slot duplicates the first source item.
        assert!(list.is_footer(7));
        assert!(!list.is_footer(6));
        assert!(!list.is_footer(9));
        assert_eq!(list.convert_to_item_index(7).unwrap(), 0);
        assert_eq!(list.get(7).unwrap(), "A");
    }

    #[test]
    fn test_singleton_conversion_does_not_underflow() {
        let list = cycle(&["A"], 2);
        for outer in 0..5 {
            assert_eq!(list.convert_to_item_index(outer).unwrap(), 0);
        }
        assert!(list.is_header(1));
        assert!(list.is_footer(3));
        assert!(!list.is_cycle_item(2));
    }

    #[test]
    fn test_out_of_range() {
        let list = cycle(&ABCDE, 2);
        assert_eq!(
            list.get(9),
            Err(CycleError::IndexOutOfRange { index: 9, count: 9 })
        );
        assert!(list.convert_to_item_index(9).is_err());
        assert!(cycle(&[], 2).get(0).is_err());
    }

    #[test]
    fn test_classification_by_value() {
        let list = cycle(&ABCDE, 2);
        assert!(list.is_header_item(&"D"));
        assert!(list.is_footer_item(&"B"));
        assert!(!list.is_cycle_item_value(&"C"));
        assert!(list.is_cycle_item_value(&"E"));
    }

    #[test]
    fn test_trait_objects_agree_with_inherent_methods() {
        fn wrap_positions(view: &(impl PositionClassifier + IndexMapping)) -> Vec<usize> {
            (0..view.count()).filter(|&outer| view.is_cycle_item(outer)).collect()
        }
        fn duplicated(view: &dyn ValueClassifier<&'static str>, items: &[&'static str]) -> usize {
            items.iter().filter(|item| view.is_cycle_item_value(item)).count()
        }

        let list = cycle(&ABCDE, 2);
        assert_eq!(wrap_positions(&*list), vec![0, 1, 7, 8]);
        assert_eq!(duplicated(&*list, &ABCDE), 4);
        assert_eq!(IndexMapping::items_count(&*list), 5);
        assert_eq!(IndexMapping::convert_from_item_index(&*list, 0), 2);
    }

    #[test]
    fn test_insert_at_front_emits_added_with_new_header() {
        let list = cycle(&ABCDE, 2);
        let (events, _guard) = record_changes(&list);

        list.source().insert(0, "X").unwrap();

        let expected = list.convert_from_item_index(0);
        assert_eq!(
            *events.lock(),
            vec![ListChange::Added { index: expected, item: "X" }]
        );
        assert_eq!(list.get(expected).unwrap(), "X");
        assert_eq!(list.footer(), vec!["X", "A"]);
    }

    #[test]
    fn test_first_item_grows_header() {
        let list = cycle(&[], 2);
        let (events, _guard) = record_changes(&list);

        list.add("A").unwrap();

        assert_eq!(list.count(), 5);
        assert_eq!(*events.lock(), vec![ListChange::Added { index: 2, item: "A" }]);
        assert_eq!(list.get(2).unwrap(), "A");
    }

    #[test]
    fn test_removal_uses_pre_change_header() {
        let list = cycle(&["A", "B", "C"], 4);
        let (events, _guard) = record_changes(&list);
        assert_eq!(list.layout().header, 3);

        list.source().remove_at(1).unwrap();

        assert_eq!(list.layout().header, 2);
        assert_eq!(*events.lock(), vec![ListChange::Removed { index: 4 }]);
    }

    #[test]
    fn test_move_and_replace_translation() {
        let list = cycle(&ABCDE, 2);
        let (events, _guard) = record_changes(&list);

        list.source().move_item(4, 0).unwrap();
        list.source().set(1, "Z").unwrap();

        assert_eq!(
            *events.lock(),
            vec![
                ListChange::Moved { old_index: 6, new_index: 2 },
                ListChange::Replaced { index: 3, item: "Z" },
            ]
        );
        assert_eq!(list.header(), vec!["C", "D"]);
        assert_eq!(list.footer(), vec!["E", "Z"]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let list = cycle(&ABCDE, 2);
        let (events, _guard) = record_changes(&list);
        let wraps = Arc::new(Mutex::new(0));
        let wraps_recv = wraps.clone();
        list.wrap_changed().connect(move |_| *wraps_recv.lock() += 1);

        let before = (list.count(), list.header(), list.footer());
        list.source().reset();

        assert_eq!((list.count(), list.header(), list.footer()), before);
        assert_eq!(*events.lock(), vec![ListChange::Reset]);
        assert_eq!(*wraps.lock(), 0);
    }

    #[test]
    fn test_wrap_changed_reports_regions() {
        let list = cycle(&ABCDE, 2);
        let changes = Arc::new(Mutex::new(Vec::new()));
        let recv = changes.clone();
        list.wrap_changed().connect(move |change| recv.lock().push(*change));

        list.source().push("F").unwrap();

        let changes = changes.lock();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].header_changed);
        assert!(!changes[0].footer_changed);
        assert_eq!(changes[0].after.source, 6);
    }

    #[test]
    fn test_rebuild_happens_before_notification() {
        let list = cycle(&ABCDE, 2);
        let seen = Arc::new(Mutex::new(None));
        let recv = seen.clone();
        let weak = Arc::downgrade(&list);
        list.changed().connect(move |_| {
            if let Some(list) = weak.upgrade() {
                *recv.lock() = Some((list.count(), list.header()));
            }
        });

        list.source().remove_at(4).unwrap();

        assert_eq!(*seen.lock(), Some((8, vec!["C", "D"])));
    }

    #[test]
    fn test_passthroughs_use_outer_indices() {
        let list = cycle(&ABCDE, 2);

        // Outer 0 shows the header duplicate of D; removing it removes the real D.
        assert_eq!(list.remove_at(0).unwrap(), "D");
        assert_eq!(list.source().snapshot(), vec!["A", "B", "C", "E"]);

        // Outer 7 (count 8) is footer "B": set replaces the real B.
        assert_eq!(list.set(7, "b").unwrap(), "B");
        assert_eq!(list.source().snapshot(), vec!["A", "b", "C", "E"]);

        // The first footer slot appends.
        let footer_start = list.layout().footer_start();
        list.insert(footer_start, "F").unwrap();
        assert_eq!(list.source().snapshot(), vec!["A", "b", "C", "E", "F"]);

        list.move_item(2, 6).unwrap();
        assert_eq!(list.source().snapshot(), vec!["b", "C", "E", "F", "A"]);

        assert!(list.remove(&"C"));
        assert!(!list.remove(&"C"));
    }

    #[test]
    fn test_source_errors_propagate_unchanged() {
        let source = Arc::new(ObservableList::with_capacity_limit(vec!["A", "B"], 2).unwrap());
        let list = CyclicList::new(source, CycleConfig::default()).unwrap();

        assert_eq!(
            list.add("C"),
            Err(CycleError::Source(ListError::CapacityExceeded { capacity: 2 }))
        );
        assert_eq!(
            list.insert(2, "C"),
            Err(CycleError::Source(ListError::CapacityExceeded { capacity: 2 }))
        );
        assert!(matches!(
            list.insert(99, "C"),
            Err(CycleError::IndexOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn test_iteration_order_and_fail_fast() {
        let list = cycle(&ABCDE, 2);
        let all: Vec<_> = list.iter().collect();
        assert_eq!(all, vec!["D", "E", "A", "B", "C", "D", "E", "A", "B"]);

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some("D"));
        list.source().push("F").unwrap();
        assert_eq!(iter.next(), None);
        assert!(iter.is_stale());

        let count = (&*list).into_iter().count();
        assert_eq!(count, list.count());
    }

    #[test]
    fn test_detach_stops_tracking() {
        let source = letters(&ABCDE);
        let list = CyclicList::new(source.clone(), CycleConfig::default()).unwrap();
        assert!(list.is_attached());
        assert_eq!(source.changed().connection_count(), 1);

        list.detach();
        assert!(!list.is_attached());
        assert_eq!(source.changed().connection_count(), 0);

        source.push("F").unwrap();
        assert_eq!(list.count(), 9);

        list.invalidate();
        assert_eq!(list.count(), 10);
        assert_eq!(list.header(), vec!["E", "F"]);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let source = letters(&ABCDE);
        let list = CyclicList::new(source.clone(), CycleConfig::default()).unwrap();
        drop(list);
        assert_eq!(source.changed().connection_count(), 0);
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            CyclicList::<&str>::builder().build(),
            Err(CycleError::InvalidArgument(_))
        ));
        assert!(matches!(
            CyclicList::new(letters(&ABCDE), CycleConfig::new().cross_length(0)),
            Err(CycleError::InvalidArgument(_))
        ));

        let source = letters(&ABCDE);
        let weak = Arc::downgrade(&source);
        assert!(CyclicList::from_weak(&weak, CycleConfig::default()).is_ok());
        drop(source);
        assert!(matches!(
            CyclicList::from_weak(&weak, CycleConfig::default()),
            Err(CycleError::InvalidArgument(_))
        ));
    }
}
