//! PHY interface handling
//!
//! Everything in the glue block that depends on how the MAC is wired to the
//! PHY:
//!
//! - [`policy`]: per-family encoding of the interface mode
//! - [`timing`]: TX delay, RX adjustment and interface clocking
//!
//! Both only compute register updates; the device session applies them.

pub mod policy;
pub mod timing;

pub use policy::{ExtendedPolicy, InterfacePolicy, LegacyPolicy, PhyModePolicy};
pub use timing::{PLAN_CAPACITY, PlanEntry, RegisterPlan, compute};
