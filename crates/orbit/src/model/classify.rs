//! Capability traits for cyclic views.
//!
//! Consumers that know an item's outer position use [`PositionClassifier`];
//! consumers that only hold the item itself (for example while preparing a
//! container for it) use [`ValueClassifier`]. [`IndexMapping`] converts
//! between outer and inner index spaces.

/// Classify outer positions as wrap items.
pub trait PositionClassifier {
    /// Returns `true` if `outer` lies in the header wrap region.
    fn is_header(&self, outer: usize) -> bool;

    /// Returns `true` if `outer` lies in the footer wrap region.
    fn is_footer(&self, outer: usize) -> bool;

    /// Returns `true` if `outer` holds a wrap duplicate.
    fn is_cycle_item(&self, outer: usize) -> bool {
        self.is_header(outer) || self.is_footer(outer)
    }
}

/// Classify items by equality against the wrap regions.
pub trait ValueClassifier<T> {
    /// Returns `true` if an item equal to `item` is duplicated into the header.
    fn is_header_item(&self, item: &T) -> bool;

    /// Returns `true` if an item equal to `item` is duplicated into the footer.
    fn is_footer_item(&self, item: &T) -> bool;

    /// Returns `true` if an item equal to `item` is duplicated into either region.
    fn is_cycle_item_value(&self, item: &T) -> bool {
        self.is_header_item(item) || self.is_footer_item(item)
    }
}

/// Conversion between outer (view) and inner (source) indices.
pub trait IndexMapping {
    /// Number of outer indices.
    fn count(&self) -> usize;

    /// Number of inner (source) indices.
    fn items_count(&self) -> usize;

    /// Maps an outer index onto the source index it displays.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::IndexOutOfRange`](super::CycleError::IndexOutOfRange)
    /// if `outer >= count()`.
    fn convert_to_item_index(&self, outer: usize) -> super::CycleResult<usize>;

    /// Maps a source index onto the outer index of its real (non-wrap) item.
    fn convert_from_item_index(&self, inner: usize) -> usize;
}
