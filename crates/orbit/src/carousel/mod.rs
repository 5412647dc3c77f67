//! Carousel coordination.
//!
//! A rendering host reports two kinds of events: the selected outer index
//! changed, and the view changed (with a flag telling whether the gesture is
//! still in progress). [`SelectionWrapCoordinator`] uses them to move a
//! selection off wrap duplicates once the gesture settles, and [`Carousel`]
//! routes them so that only a cyclic source is ever corrected.

mod controller;
mod coordinator;
mod host;
mod source;

pub use controller::Carousel;
pub use coordinator::{SelectionWrapCoordinator, WrapState};
pub use host::{CarouselHost, SelectionSlot};
pub use source::CarouselSource;
