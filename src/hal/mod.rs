//! Hardware Abstraction Layer
//!
//! # Modules
//!
//! - [`clock`]: RGMII TX clock graph and the external clock trait

pub mod clock;

// Re-export commonly used types
pub use clock::{
    ClockGraph, ClockId, ClockName, ClockNode, ClockSource, ClockState, Divider, FixedFactor,
    Gate, Mux, NoClock, RateSelection,
};
