//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`register`]: Register access and the PRG_ETH bit layout
//! - [`constants`]: Clock rates, delay steps and defaults
//! - [`bitfield`]: Pure field packing helpers
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Do not depend on any types
//! or functions in this module from external code. They are subject to change
//! without notice. The pieces meant for users are re-exported from the crate
//! root.

pub(crate) mod bitfield;
pub(crate) mod constants;
pub(crate) mod register;
