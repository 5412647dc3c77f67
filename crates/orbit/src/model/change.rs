//! Change notifications shared by source lists and cyclic views.

/// A structural change to an ordered list.
///
/// Source lists emit these with inner (source) indices; a
/// [`CyclicList`](super::CyclicList) re-emits them with outer indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange<T> {
    /// `item` now lives at `index`.
    Added { index: usize, item: T },
    /// The item that lived at `index` is gone.
    Removed { index: usize },
    /// The item at `index` was overwritten with `item`.
    Replaced { index: usize, item: T },
    /// The item at `old_index` now lives at `new_index`.
    Moved { old_index: usize, new_index: usize },
    /// Anything may have changed; re-read the whole list.
    Reset,
}

impl<T> ListChange<T> {
    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Removed { .. } => "removed",
            Self::Replaced { .. } => "replaced",
            Self::Moved { .. } => "moved",
            Self::Reset => "reset",
        }
    }
}

/// The lengths of the three regions of a cyclic view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapLayout {
    /// Number of wrap items before the source.
    pub header: usize,
    /// Number of source items.
    pub source: usize,
    /// Number of wrap items after the source.
    pub footer: usize,
}

impl WrapLayout {
    /// Lengths produced by the population rule for a source of `len` items.
    pub fn for_source_len(len: usize, cross_length: usize) -> Self {
        let wrap = match len {
            0 => 0,
            1 => 2,
            n if n < cross_length => n,
            _ => cross_length,
        };
        Self {
            header: wrap,
            source: len,
            footer: wrap,
        }
    }

    /// Total number of outer indices.
    pub fn count(&self) -> usize {
        self.header + self.source + self.footer
    }

    /// First outer index of the footer region.
    pub fn footer_start(&self) -> usize {
        self.header + self.source
    }
}

/// Emitted by a cyclic view after a rebuild altered a wrap region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapChange {
    /// Layout before the rebuild.
    pub before: WrapLayout,
    /// Layout after the rebuild.
    pub after: WrapLayout,
    /// Whether the header length or contents changed.
    pub header_changed: bool,
    /// Whether the footer length or contents changed.
    pub footer_changed: bool,
}

/// Translate a source change into the outer index space of a cyclic view.
///
/// Indices that describe the old state (`Removed`, the old side of `Moved`)
/// are offset by the header length before the change; indices that describe
/// the new state (`Added`, `Replaced`, the new side of `Moved`) are offset by
/// the header length after it.
pub fn translate<T>(change: ListChange<T>, before: WrapLayout, after: WrapLayout) -> ListChange<T> {
    match change {
        ListChange::Added { index, item } => ListChange::Added {
            index: index + after.header,
            item,
        },
        ListChange::Removed { index } => ListChange::Removed {
            index: index + before.header,
        },
        ListChange::Replaced { index, item } => ListChange::Replaced {
            index: index + after.header,
            item,
        },
        ListChange::Moved {
            old_index,
            new_index,
        } => ListChange::Moved {
            old_index: old_index + before.header,
            new_index: new_index + after.header,
        },
        ListChange::Reset => ListChange::Reset,
    }
}
