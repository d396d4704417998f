//! Centralized Constants
//!
//! Single source of truth for the clock rates, delay steps and defaults used
//! by the glue layer.
//!
//! # Note
//!
//! Hardware register bit definitions live in `register/prg_eth.rs` as they are
//! specific to that register block.

// =============================================================================
// Clock Frequencies
// =============================================================================

/// RGMII TX clock rate requested from the clock tree (Gbit line rate).
///
/// The IP block derives [`RGMII_TX_CLK_100M_HZ`] and [`RGMII_TX_CLK_10M_HZ`]
/// from this by itself, so only the 125 MHz rate is ever programmed.
pub const RGMII_TX_CLK_HZ: u32 = 125_000_000;

/// 100 Mbit/s RGMII TX clock rate (derived by the IP block)
pub const RGMII_TX_CLK_100M_HZ: u32 = 25_000_000;

/// 10 Mbit/s RGMII TX clock rate (derived by the IP block)
pub const RGMII_TX_CLK_10M_HZ: u32 = 2_500_000;

/// Number of selectable inputs on the `m250_sel` mux
pub const MUX_CLK_NUM_PARENTS: usize = 2;

/// Allowed divisors of the `m250_div` divider (register value == divisor)
pub const M250_DIV_TABLE: [u32; 6] = [2, 3, 4, 5, 6, 7];

/// Multiplier of the fixed post-divider
pub const FIXED_DIV2_MULT: u32 = 1;

/// Divisor of the fixed post-divider
pub const FIXED_DIV2_DIV: u32 = 2;

// =============================================================================
// Delay Settings
// =============================================================================

/// TX delay resolution: one step is a quarter of the 8 ns 125 MHz cycle
pub const TX_DELAY_STEP_NS: u32 = 2;

/// Largest TX delay the 2-bit field can express
pub const TX_DELAY_MAX_NS: u32 = 6;

/// RX delay that turns on the timing-adjustment logic
pub const RX_DELAY_ADJUST_NS: u32 = 2;

// =============================================================================
// Default Configuration
// =============================================================================

/// Default TX delay when the board does not provide one (previously hardcoded)
pub const DEFAULT_TX_DELAY_NS: u32 = 2;

/// Default RX delay when the board does not provide one
pub const DEFAULT_RX_DELAY_NS: u32 = 0;

/// Default device name used to prefix clock node names
pub const DEFAULT_DEVICE_NAME: &str = "ethmac";
