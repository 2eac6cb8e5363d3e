#![forbid(unsafe_code)]

//! Core: animation tracks, presence lifecycle, and the black-hole transition
//! state machine.

pub mod animation;
pub mod logging;
pub mod presence;
pub mod scene;
pub mod transition;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
