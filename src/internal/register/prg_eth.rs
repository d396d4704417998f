//! PRG_ETH Register Definitions
//!
//! Glue-layer control registers in front of the DWMAC on Amlogic Meson SoCs,
//! located in the device's second memory resource.
//!
//! - PRG_ETH0 (0x00): interface mode, TX clock tree, TX delay, RX adjustment
//! - PRG_ETH1 (0x04): RX calibration results (read-only for this driver)

use crate::internal::bitfield::genmask;

// =============================================================================
// Register Offsets
// =============================================================================

/// PRG_ETH0 register offset
pub const PRG_ETH0: usize = 0x0;
/// PRG_ETH1 register offset
pub const PRG_ETH1: usize = 0x4;

// =============================================================================
// PRG_ETH0 @ 0x00
// =============================================================================

/// Legacy families: RGMII mode enable (bit 0), clear selects RMII
pub const PRG_ETH0_RGMII_MODE: u32 = 1 << 0;

/// Extended families: PHY interface mode field (bits 2:0)
pub const PRG_ETH0_EXT_PHY_MODE_MASK: u32 = genmask(2, 0);
/// Extended PHY interface mode value for RGMII
pub const PRG_ETH0_EXT_RGMII_MODE: u32 = 1;
/// Extended PHY interface mode value for RMII
pub const PRG_ETH0_EXT_RMII_MODE: u32 = 4;

/// `m250_sel` mux (bit 4): 0 = clkin0 (fclk_div2), 1 = clkin1 (mpll2)
pub const PRG_ETH0_CLK_M250_SEL_MASK: u32 = genmask(4, 4);

/// TX clock delay (bits 6:5), "8ns / 4 * value":
/// 0ns = 0x0, 2ns = 0x1, 4ns = 0x2, 6ns = 0x3
pub const PRG_ETH0_TXDLY_MASK: u32 = genmask(6, 5);

/// `m250_div` divider for the mux output (bits 9:7)
pub const PRG_ETH0_CLK_M250_DIV_MASK: u32 = genmask(9, 7);

/// `rgmii_tx_en` gate bit index
pub const PRG_ETH0_RGMII_TX_CLK_EN_BIT: u32 = 10;
/// `rgmii_tx_en` gate (bit 10)
pub const PRG_ETH0_RGMII_TX_CLK_EN: u32 = 1 << PRG_ETH0_RGMII_TX_CLK_EN_BIT;

/// Invert the internal clk_rmii_i to generate the 25/2.5 MHz tx_rx_clk (bit 11)
pub const PRG_ETH0_INVERTED_RMII_CLK: u32 = 1 << 11;

/// Enable the TX_CLK and PHY_REF_CLK generator (bit 12)
pub const PRG_ETH0_TX_AND_PHY_REF_CLK: u32 = 1 << 12;

/// RX timing adjustment enable (bit 13).
///
/// 0 bypasses the logic: RXEN and RXD[3:0] go straight from the pad to the
/// internal sampling.
pub const PRG_ETH0_ADJ_ENABLE: u32 = 1 << 13;

/// Align RXEN and RXD[3:0] with the RX clock edge and pick delay and skew
/// automatically (bit 14)
pub const PRG_ETH0_ADJ_SETUP: u32 = 1 << 14;

/// Sampling delay counter, clocked by the timing-adjustment clock and cleared
/// on both RX_CLK edges (bits 19:15)
pub const PRG_ETH0_ADJ_DELAY: u32 = genmask(19, 15);

/// Per-signal ~1 ns skew compensation, RXEN = bit 0, RXD[3] = bit 1, ...
/// (bits 24:20)
pub const PRG_ETH0_ADJ_SKEW: u32 = genmask(24, 20);

/// Every bit written by the timing configuration
pub const PRG_ETH0_DELAY_MASK: u32 = PRG_ETH0_TXDLY_MASK
    | PRG_ETH0_ADJ_ENABLE
    | PRG_ETH0_ADJ_SETUP
    | PRG_ETH0_ADJ_DELAY
    | PRG_ETH0_ADJ_SKEW;

// =============================================================================
// Unit Tests
// =============================================================================
