//! Configuration types for the Meson DWMAC glue driver
//!
//! Everything here is plain data resolved from the board description before
//! the driver runs: chip family, `phy-mode`, the Amlogic delay properties and
//! the two TX clock mux parents.

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    DEFAULT_DEVICE_NAME, DEFAULT_RX_DELAY_NS, DEFAULT_TX_DELAY_NS, MUX_CLK_NUM_PARENTS,
    RX_DELAY_ADJUST_NS, TX_DELAY_MAX_NS, TX_DELAY_STEP_NS,
};

// =============================================================================
// PHY Interface Mode
// =============================================================================

/// MAC-to-PHY interface mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyMode {
    /// RGMII, delays added by the MAC side
    #[default]
    Rgmii,
    /// RGMII with internal delay on both RX and TX in the PHY
    RgmiiId,
    /// RGMII with internal RX delay in the PHY
    RgmiiRxid,
    /// RGMII with internal TX delay in the PHY
    RgmiiTxid,
    /// Reduced Media Independent Interface
    Rmii,
}

impl PhyMode {
    /// Resolve a device-tree `phy-mode` string
    ///
    /// # Errors
    /// `UnsupportedPhyMode` for any mode this glue block cannot drive
    /// (e.g. `"mii"`, `"gmii"`, `"sgmii"`).
    pub fn from_name(name: &str) -> ConfigResult<Self> {
        match name {
            "rgmii" => Ok(PhyMode::Rgmii),
            "rgmii-id" => Ok(PhyMode::RgmiiId),
            "rgmii-rxid" => Ok(PhyMode::RgmiiRxid),
            "rgmii-txid" => Ok(PhyMode::RgmiiTxid),
            "rmii" => Ok(PhyMode::Rmii),
            _ => {
                #[cfg(feature = "defmt")]
                defmt::error!("fail to set phy-mode {}", name);

                Err(ConfigError::UnsupportedPhyMode)
            }
        }
    }

    /// Device-tree name of the mode
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PhyMode::Rgmii => "rgmii",
            PhyMode::RgmiiId => "rgmii-id",
            PhyMode::RgmiiRxid => "rgmii-rxid",
            PhyMode::RgmiiTxid => "rgmii-txid",
            PhyMode::Rmii => "rmii",
        }
    }

    /// Whether the mode is one of the RGMII variants
    #[must_use]
    pub const fn is_rgmii(self) -> bool {
        matches!(
            self,
            PhyMode::Rgmii | PhyMode::RgmiiId | PhyMode::RgmiiRxid | PhyMode::RgmiiTxid
        )
    }
}

// =============================================================================
// Chip Family
// =============================================================================

/// SoC family of the glue block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipFamily {
    /// Meson8b
    Meson8b,
    /// Meson8m2
    Meson8m2,
    /// Meson GXBB (and GXL/GXM)
    MesonGxbb,
    /// Meson AXG
    MesonAxg,
    /// Meson G12A (and G12B/SM1)
    MesonG12a,
}

impl ChipFamily {
    /// All supported families
    pub const ALL: [ChipFamily; 5] = [
        ChipFamily::Meson8b,
        ChipFamily::Meson8m2,
        ChipFamily::MesonGxbb,
        ChipFamily::MesonAxg,
        ChipFamily::MesonG12a,
    ];

    /// Device-tree compatible string of the family
    #[must_use]
    pub const fn compatible(self) -> &'static str {
        match self {
            ChipFamily::Meson8b => "amlogic,meson8b-dwmac",
            ChipFamily::Meson8m2 => "amlogic,meson8m2-dwmac",
            ChipFamily::MesonGxbb => "amlogic,meson-gxbb-dwmac",
            ChipFamily::MesonAxg => "amlogic,meson-axg-dwmac",
            ChipFamily::MesonG12a => "amlogic,meson-g12a-dwmac",
        }
    }

    /// Resolve a device-tree compatible string
    ///
    /// # Errors
    /// `UnknownChipFamily` if no supported family matches.
    pub fn from_compatible(compatible: &str) -> ConfigResult<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.compatible() == compatible)
            .ok_or(ConfigError::UnknownChipFamily)
    }
}

// =============================================================================
// Clock Inputs
// =============================================================================

/// One input oscillator of the TX clock mux, as resolved by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParentClock {
    /// Clock name (e.g. `"fclk_div2"`, `"mpll2"`)
    pub name: &'static str,
    /// Current rate in Hz
    pub rate_hz: u32,
}

/// Input slot of the TX clock mux
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxInput {
    /// `clkin0`, selector value 0
    Clkin0,
    /// `clkin1`, selector value 1
    Clkin1,
}

impl MuxInput {
    /// Selector value written to the mux field
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Clkin0 => 0,
            Self::Clkin1 => 1,
        }
    }
}

impl ParentClock {
    /// Create a parent clock reference
    #[must_use]
    pub const fn new(name: &'static str, rate_hz: u32) -> Self {
        Self { name, rate_hz }
    }
}

// =============================================================================
// Delay Configuration
// =============================================================================

/// RGMII signal delays and the resources they need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayConfig {
    /// TX clock delay in ns: 0, 2, 4 or 6
    pub tx_delay_ns: u32,
    /// RX delay in ns: 0 or 2 (2 enables the timing-adjustment logic)
    pub rx_delay_ns: u32,
    /// Whether a timing-adjustment clock is available
    pub timing_adjustment_clock: bool,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TX_DELAY_NS, DEFAULT_RX_DELAY_NS, false)
    }
}

impl DelayConfig {
    /// Create a delay configuration
    #[must_use]
    pub const fn new(tx_delay_ns: u32, rx_delay_ns: u32, timing_adjustment_clock: bool) -> Self {
        Self {
            tx_delay_ns,
            rx_delay_ns,
            timing_adjustment_clock,
        }
    }

    /// Check both delays against the values the hardware can express
    ///
    /// # Errors
    /// `InvalidDelayValue` if the TX delay is not in {0, 2, 4, 6} ns or the RX
    /// delay is not in {0, 2} ns.
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.tx_delay_ns > TX_DELAY_MAX_NS || self.tx_delay_ns % TX_DELAY_STEP_NS != 0 {
            return Err(ConfigError::InvalidDelayValue);
        }
        if self.rx_delay_ns != 0 && self.rx_delay_ns != RX_DELAY_ADJUST_NS {
            return Err(ConfigError::InvalidDelayValue);
        }
        Ok(())
    }
}

// =============================================================================
// Driver Configuration
// =============================================================================

/// Complete glue configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DwmacConfig {
    /// Device name, used as the prefix of the clock node names
    pub device_name: &'static str,
    /// Chip family (selects the interface mode encoding)
    pub chip: ChipFamily,
    /// MAC-to-PHY interface mode
    pub phy_mode: PhyMode,
    /// `amlogic,tx-delay-ns`
    pub tx_delay_ns: u32,
    /// `amlogic,rx-delay-ns`
    pub rx_delay_ns: u32,
    /// `clkin0` / `clkin1` mux parents
    pub clkin: [Option<ParentClock>; MUX_CLK_NUM_PARENTS],
}

impl DwmacConfig {
    /// Create a configuration with the board defaults
    /// (2 ns TX delay, 0 ns RX delay, no mux parents yet)
    #[must_use]
    pub const fn new(chip: ChipFamily, phy_mode: PhyMode) -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME,
            chip,
            phy_mode,
            tx_delay_ns: DEFAULT_TX_DELAY_NS,
            rx_delay_ns: DEFAULT_RX_DELAY_NS,
            clkin: [None; MUX_CLK_NUM_PARENTS],
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the device name
    #[must_use]
    pub const fn with_device_name(mut self, name: &'static str) -> Self {
        self.device_name = name;
        self
    }

    /// Set the PHY interface mode
    #[must_use]
    pub const fn with_phy_mode(mut self, mode: PhyMode) -> Self {
        self.phy_mode = mode;
        self
    }

    /// Set the TX delay in ns
    #[must_use]
    pub const fn with_tx_delay_ns(mut self, ns: u32) -> Self {
        self.tx_delay_ns = ns;
        self
    }

    /// Set the RX delay in ns
    #[must_use]
    pub const fn with_rx_delay_ns(mut self, ns: u32) -> Self {
        self.rx_delay_ns = ns;
        self
    }

    /// Set both TX clock mux parents
    #[must_use]
    pub const fn with_clkin(mut self, clkin0: ParentClock, clkin1: ParentClock) -> Self {
        self.clkin = [Some(clkin0), Some(clkin1)];
        self
    }

    /// Set one TX clock mux parent
    #[must_use]
    pub const fn with_clkin_at(mut self, input: MuxInput, parent: ParentClock) -> Self {
        self.clkin[input.index()] = Some(parent);
        self
    }

    /// Delay settings, given whether a timing-adjustment clock is present
    #[must_use]
    pub const fn delay_config(&self, timing_adjustment_clock: bool) -> DelayConfig {
        DelayConfig::new(self.tx_delay_ns, self.rx_delay_ns, timing_adjustment_clock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
