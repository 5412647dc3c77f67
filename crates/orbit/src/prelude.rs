//! Prelude module for Orbit.
//!
//! ```ignore
//! use orbit::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use orbit_core::{ConnectionGuard, Property, Signal};

// ============================================================================
// Models
// ============================================================================

pub use crate::model::{
    CycleConfig, CycleError, CycleResult, CyclicList, IndexMapping, ListChange, ObservableList,
    PositionClassifier, ValueClassifier, WrapChange, WrapLayout,
};

// ============================================================================
// Carousel
// ============================================================================

pub use crate::carousel::{Carousel, CarouselHost, SelectionSlot, SelectionWrapCoordinator, WrapState};
