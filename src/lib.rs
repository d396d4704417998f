//! Amlogic Meson DWMAC Glue Driver
//!
//! A `no_std`, `no_alloc` Rust implementation of the glue layer that sits in
//! front of the Synopsys DesignWare MAC (DWMAC) on Amlogic Meson SoCs
//! (Meson8b, Meson8m2, GXBB, AXG, G12A).
//!
//! The glue block is two 32-bit registers (`PRG_ETH0`, `PRG_ETH1`) that
//! select the MAC-to-PHY interface, generate the RGMII TX clock and apply
//! the TX/RX signal delays. The MAC core itself is driven elsewhere.
//!
//! # Architecture
//!
//! 1. **Driver Layer** ([`driver`]): configuration, errors and the
//!    [`DwmacSession`] that programs the block once and cleans up on drop
//! 2. **PHY Layer** ([`phy`]): per-family interface mode encoding and the
//!    timing configurator
//! 3. **HAL Layer** ([`hal`]): the RGMII TX clock graph
//!    (mux, divider, fixed /2, gate) and the external clock trait
//!
//! # Supported Interface Modes
//!
//! - RGMII, RGMII-ID, RGMII-RXID, RGMII-TXID
//! - RMII
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for public types
//!
//! # Example
//!
//! ```ignore
//! use ph_meson_dwmac::{ChipFamily, DwmacConfig, DwmacSession, ParentClock, PhyMode};
//! use ph_meson_dwmac::registers::MmioRegion;
//!
//! let chip = ChipFamily::from_compatible("amlogic,meson-axg-dwmac")?;
//! let config = DwmacConfig::new(chip, PhyMode::from_name("rgmii")?)
//!     .with_clkin(
//!         ParentClock::new("fclk_div2", 1_000_000_000),
//!         ParentClock::new("mpll2", 500_000_000),
//!     )
//!     .with_tx_delay_ns(2)
//!     .with_rx_delay_ns(2);
//!
//! // SAFETY: PRG_ETH block of this controller, mapped for the program's lifetime
//! let regs = unsafe { MmioRegion::new(0xFF63_4540) };
//!
//! // Your platform's handle to the timing-adjustment clock
//! let session = DwmacSession::initialize(regs, &config, Some(timing_adj_clk))?;
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here and in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{
    ChipFamily, DelayConfig, DwmacConfig, MuxInput, ParentClock, PhyMode,
};
pub use driver::error::{
    ClockError, ClockResult, ConfigError, ConfigResult, Error, InitError, InitStep, Result,
};
pub use driver::session::DwmacSession;
pub use hal::clock::{ClockGraph, ClockSource, ClockState, NoClock};
pub use phy::policy::{InterfacePolicy, PhyModePolicy};
pub use phy::timing::{PlanEntry, RegisterPlan};

/// Register access for the `PRG_ETH` block.
///
/// # Safety
///
/// Writing these registers behind a live [`DwmacSession`] bypasses its
/// bookkeeping (clock state, teardown). Read-back is always fine.
pub mod registers {
    pub use crate::internal::register::prg_eth::*;
    pub use crate::internal::register::{MmioRegion, RegisterBlock, RegisterWrite};
}

/// Bitfield helpers for `PRG_ETH` fields.
pub mod codec {
    pub use crate::internal::bitfield::{
        decode_tx_delay, encode_tx_delay, field_get, field_prep, genmask,
    };
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Defaults
        DEFAULT_DEVICE_NAME,
        DEFAULT_RX_DELAY_NS,
        DEFAULT_TX_DELAY_NS,
        // Clock tree
        FIXED_DIV2_DIV,
        FIXED_DIV2_MULT,
        M250_DIV_TABLE,
        MUX_CLK_NUM_PARENTS,
        // Clocks
        RGMII_TX_CLK_10M_HZ,
        RGMII_TX_CLK_100M_HZ,
        RGMII_TX_CLK_HZ,
        // Delays
        RX_DELAY_ADJUST_NS,
        TX_DELAY_MAX_NS,
        TX_DELAY_STEP_NS,
    };
}
