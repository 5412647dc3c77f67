//! Core systems for Orbit.
//!
//! This crate provides the foundational components the carousel models are
//! built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Value cells that report whether a write changed them
//! - **Logging**: Stable `tracing` targets and span helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use orbit_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
