//! Orbit - infinite-scrolling carousel models.
//!
//! A carousel over a finite list can appear to scroll forever by showing a
//! few duplicated "wrap" items past each end and quietly moving the
//! selection back onto the real item once the user stops scrolling.
//!
//! - [`model::CyclicList`] builds the wrapped view over a caller-owned
//!   [`model::ObservableList`] and keeps it in sync with every edit.
//! - [`carousel::SelectionWrapCoordinator`] corrects a selection that
//!   settled on a wrap duplicate.
//! - [`carousel::Carousel`] routes host events for plain or cyclic sources.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use orbit::prelude::*;
//!
//! let items = Arc::new(ObservableList::new(vec!["A", "B", "C", "D", "E"]));
//! let carousel = Carousel::cyclic(items.clone(), CycleConfig::default()).unwrap();
//!
//! // header [D, E] ++ [A, B, C, D, E] ++ footer [A, B]
//! assert_eq!(carousel.count(), 9);
//!
//! // Edits to the source show up in the cyclic view immediately.
//! items.push("F").unwrap();
//! assert_eq!(carousel.count(), 10);
//! assert_eq!(carousel.get(0).unwrap(), "E");
//! ```

pub use orbit_core::{logging, ConnectionGuard, ConnectionId, PerfSpan, Property, Signal};

pub mod carousel;
pub mod model;
pub mod prelude;
