//! Core driver components for the Meson DWMAC glue block.
//!
//! - [`config`] - Board configuration and builder methods
//! - [`error`] - Error types and result aliases
//! - [`session`] - One-pass initialization and teardown of a device
//!
//! # Example
//!
//! ```ignore
//! use ph_meson_dwmac::driver::{ChipFamily, DwmacConfig, DwmacSession, ParentClock, PhyMode};
//!
//! let config = DwmacConfig::new(ChipFamily::MesonAxg, PhyMode::Rgmii)
//!     .with_clkin(
//!         ParentClock::new("fclk_div2", 1_000_000_000),
//!         ParentClock::new("mpll2", 500_000_000),
//!     )
//!     .with_tx_delay_ns(2);
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod session;

// Re-exports for convenience
pub use config::{ChipFamily, DelayConfig, DwmacConfig, MuxInput, ParentClock, PhyMode};
pub use error::{
    ClockError, ClockResult, ConfigError, ConfigResult, Error, InitError, InitStep, Result,
};
pub use session::DwmacSession;
