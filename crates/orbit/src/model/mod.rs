//! List models for infinite-scrolling carousels.
//!
//! The model layer has two pieces:
//!
//! - [`ObservableList`]: a caller-owned, mutable, ordered list that emits a
//!   [`ListChange`] after every structural edit.
//! - [`CyclicList`]: a view over an `ObservableList` that adds wrap
//!   duplicates at both ends and re-emits every source change with the
//!   indices translated into its own (outer) index space.
//!
//! # Index spaces
//!
//! *Inner* indices address the source list. *Outer* indices address the
//! cyclic view, `header ++ source ++ footer`. [`IndexMapping`] converts
//! between the two; [`PositionClassifier`] and [`ValueClassifier`] tell wrap
//! duplicates apart from real items.

mod change;
mod classify;
mod config;
mod cyclic_list;
mod error;
mod observable_list;

pub use change::{translate, ListChange, WrapChange, WrapLayout};
pub use classify::{IndexMapping, PositionClassifier, ValueClassifier};
pub use config::{CycleConfig, DEFAULT_CROSS_LENGTH};
pub use cyclic_list::{CyclicList, CyclicListBuilder, Iter};
pub use error::{CycleError, CycleResult, ListError, ListResult};
pub use observable_list::ObservableList;
