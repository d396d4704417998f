//! Interface Mode Policy
//!
//! How `PRG_ETH0` encodes RGMII vs RMII depends on the chip family:
//!
//! | Family                     | Field     | RGMII | RMII |
//! |----------------------------|-----------|-------|------|
//! | Meson8b, Meson8m2, GXBB    | bit 0     | 1     | 0    |
//! | AXG, G12A                  | bits 2:0  | 1     | 4    |
//!
//! The RGMII internal-delay variants share the plain RGMII encoding; they
//! only differ in the timing configuration.

use crate::driver::config::{ChipFamily, PhyMode};
use crate::driver::error::ConfigResult;
use crate::internal::register::RegisterWrite;
use crate::internal::register::prg_eth::{
    PRG_ETH0, PRG_ETH0_EXT_PHY_MODE_MASK, PRG_ETH0_EXT_RGMII_MODE, PRG_ETH0_EXT_RMII_MODE,
    PRG_ETH0_RGMII_MODE,
};

// =============================================================================
// Policy Trait
// =============================================================================

/// Encoding of the interface mode in `PRG_ETH0`
pub trait PhyModePolicy {
    /// Masked write selecting `mode`
    ///
    /// # Errors
    /// `UnsupportedPhyMode` if the policy has no encoding for `mode`.
    fn mode_bits(&self, mode: PhyMode) -> ConfigResult<RegisterWrite>;
}

/// Single RGMII enable bit (Meson8b, Meson8m2, GXBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LegacyPolicy;

impl PhyModePolicy for LegacyPolicy {
    fn mode_bits(&self, mode: PhyMode) -> ConfigResult<RegisterWrite> {
        // Clearing the RGMII bit selects RMII
        let value = if mode.is_rgmii() { PRG_ETH0_RGMII_MODE } else { 0 };
        Ok(RegisterWrite::new(PRG_ETH0, PRG_ETH0_RGMII_MODE, value))
    }
}

/// 3-bit interface mode field (AXG, G12A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtendedPolicy;

impl PhyModePolicy for ExtendedPolicy {
    fn mode_bits(&self, mode: PhyMode) -> ConfigResult<RegisterWrite> {
        let value = match mode {
            PhyMode::Rgmii | PhyMode::RgmiiId | PhyMode::RgmiiRxid | PhyMode::RgmiiTxid => {
                PRG_ETH0_EXT_RGMII_MODE
            }
            PhyMode::Rmii => PRG_ETH0_EXT_RMII_MODE,
        };
        Ok(RegisterWrite::new(PRG_ETH0, PRG_ETH0_EXT_PHY_MODE_MASK, value))
    }
}

// =============================================================================
// Policy Selection
// =============================================================================

/// Interface mode policy of a chip family, chosen once at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfacePolicy {
    /// Single RGMII enable bit
    Legacy(LegacyPolicy),
    /// 3-bit interface mode field
    Extended(ExtendedPolicy),
}

impl InterfacePolicy {
    /// Policy used by `family`
    #[must_use]
    pub const fn for_family(family: ChipFamily) -> Self {
        match family {
            ChipFamily::Meson8b | ChipFamily::Meson8m2 | ChipFamily::MesonGxbb => {
                InterfacePolicy::Legacy(LegacyPolicy)
            }
            ChipFamily::MesonAxg | ChipFamily::MesonG12a => {
                InterfacePolicy::Extended(ExtendedPolicy)
            }
        }
    }
}

impl From<ChipFamily> for InterfacePolicy {
    fn from(family: ChipFamily) -> Self {
        Self::for_family(family)
    }
}

impl PhyModePolicy for InterfacePolicy {
    fn mode_bits(&self, mode: PhyMode) -> ConfigResult<RegisterWrite> {
        match self {
            InterfacePolicy::Legacy(policy) => policy.mode_bits(mode),
            InterfacePolicy::Extended(policy) => policy.mode_bits(mode),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
