//! Timing Configurator
//!
//! Turns the interface mode, the board's delay settings and the chip's
//! interface mode policy into the ordered list of `PRG_ETH0` updates:
//!
//! 1. Interface mode bits
//! 2. TX delay and RX adjustment field
//! 3. RMII clock inversion (set for RMII, cleared for RGMII)
//! 4. 125 MHz TX clock selection and enable (RGMII only)
//! 5. TX and PHY reference clock enable
//!
//! The adjustment delay counter and skew sub-fields are always written as
//! zero; there is no board property to derive them from.

use crate::driver::config::{DelayConfig, PhyMode};
use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::bitfield::{encode_tx_delay, field_prep};
use crate::internal::constants::{RGMII_TX_CLK_HZ, RX_DELAY_ADJUST_NS};
use crate::internal::register::prg_eth::{
    PRG_ETH0, PRG_ETH0_ADJ_ENABLE, PRG_ETH0_ADJ_SETUP, PRG_ETH0_DELAY_MASK,
    PRG_ETH0_INVERTED_RMII_CLK, PRG_ETH0_TX_AND_PHY_REF_CLK, PRG_ETH0_TXDLY_MASK,
};
use crate::internal::register::{RegisterBlock, RegisterWrite};
use crate::phy::policy::PhyModePolicy;

/// Largest number of entries a plan can hold
pub const PLAN_CAPACITY: usize = 5;

// =============================================================================
// Plan Entries
// =============================================================================

/// One step of a register plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlanEntry {
    /// Masked register update
    Write(RegisterWrite),
    /// Select `rate_hz` on the TX clock graph, then open its gate
    ConfigureTxClock {
        /// Rate at the gate output
        rate_hz: u32,
    },
}

/// Ordered register updates produced by [`compute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterPlan {
    entries: [Option<PlanEntry>; PLAN_CAPACITY],
    len: usize,
    requires_timing_adjustment_clock: bool,
}

impl RegisterPlan {
    const fn empty() -> Self {
        Self {
            entries: [None; PLAN_CAPACITY],
            len: 0,
            requires_timing_adjustment_clock: false,
        }
    }

    fn push(&mut self, entry: PlanEntry) {
        // Every path through compute() stays within capacity
        debug_assert!(self.len < PLAN_CAPACITY);
        if let Some(slot) = self.entries.get_mut(self.len) {
            *slot = Some(entry);
            self.len += 1;
        }
    }

    /// Entries in application order
    pub fn iter(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries[..self.len].iter().flatten()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the plan has no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the timing-adjustment clock must run before the plan is applied
    pub fn requires_timing_adjustment_clock(&self) -> bool {
        self.requires_timing_adjustment_clock
    }

    /// The interface mode write (always the first entry)
    pub fn mode_write(&self) -> Option<RegisterWrite> {
        match self.iter().next() {
            Some(PlanEntry::Write(write)) => Some(*write),
            _ => None,
        }
    }

    /// The masked write to the delay field
    pub fn delay_write(&self) -> Option<RegisterWrite> {
        self.iter().find_map(|entry| match entry {
            PlanEntry::Write(write) if write.mask == PRG_ETH0_DELAY_MASK => Some(*write),
            _ => None,
        })
    }

    /// Requested TX clock rate, if the plan configures the TX clock
    pub fn tx_clock_rate_hz(&self) -> Option<u32> {
        self.iter().find_map(|entry| match entry {
            PlanEntry::ConfigureTxClock { rate_hz } => Some(*rate_hz),
            PlanEntry::Write(_) => None,
        })
    }

    /// Apply the register writes of the plan, skipping clock requests
    pub fn apply_registers<R: RegisterBlock>(&self, regs: &mut R) {
        for entry in self.iter() {
            if let PlanEntry::Write(write) = entry {
                regs.apply(*write);
            }
        }
    }
}

// =============================================================================
// Plan Computation
// =============================================================================

/// Compute the register plan for `mode`.
///
/// # Errors
/// - `UnsupportedPhyMode` if `policy` has no encoding for `mode`
/// - `InvalidDelayValue` if either delay is outside its permitted set
/// - `MissingTimingAdjustmentClock` if an RX delay is configured but no
///   timing-adjustment clock is available, whatever the mode
pub fn compute<P: PhyModePolicy>(
    mode: PhyMode,
    delay: &DelayConfig,
    policy: &P,
) -> ConfigResult<RegisterPlan> {
    let mode_bits = policy.mode_bits(mode)?;

    if let Err(e) = delay.validate() {
        #[cfg(feature = "defmt")]
        defmt::error!(
            "invalid delays: tx {} ns, rx {} ns",
            delay.tx_delay_ns,
            delay.rx_delay_ns
        );
        return Err(e);
    }

    let tx_bits = field_prep(PRG_ETH0_TXDLY_MASK, encode_tx_delay(delay.tx_delay_ns));
    let rx_adjust_bits = if delay.rx_delay_ns == RX_DELAY_ADJUST_NS {
        PRG_ETH0_ADJ_ENABLE | PRG_ETH0_ADJ_SETUP
    } else {
        0
    };

    let delay_bits = match mode {
        PhyMode::Rgmii => tx_bits | rx_adjust_bits,
        // The PHY delays RX, so the MAC must not
        PhyMode::RgmiiRxid => tx_bits,
        // The PHY delays TX
        PhyMode::RgmiiTxid => rx_adjust_bits,
        PhyMode::RgmiiId | PhyMode::Rmii => 0,
    };

    // The adjustment logic is clocked even when the mode masks it out
    let requires_clock = rx_adjust_bits & PRG_ETH0_ADJ_ENABLE != 0;
    if requires_clock && !delay.timing_adjustment_clock {
        #[cfg(feature = "defmt")]
        defmt::error!("timing-adjustment clock is mandatory for RX delay re-timing");
        return Err(ConfigError::MissingTimingAdjustmentClock);
    }

    let mut plan = RegisterPlan::empty();
    plan.requires_timing_adjustment_clock = requires_clock;
    plan.push(PlanEntry::Write(mode_bits));
    plan.push(PlanEntry::Write(RegisterWrite::new(
        PRG_ETH0,
        PRG_ETH0_DELAY_MASK,
        delay_bits,
    )));

    if mode.is_rgmii() {
        plan.push(PlanEntry::Write(RegisterWrite::clear(
            PRG_ETH0,
            PRG_ETH0_INVERTED_RMII_CLK,
        )));
        plan.push(PlanEntry::ConfigureTxClock {
            rate_hz: RGMII_TX_CLK_HZ,
        });
    } else {
        // Generate the 25/2.5 MHz tx_rx_clk from the inverted RMII clock
        plan.push(PlanEntry::Write(RegisterWrite::set(
            PRG_ETH0,
            PRG_ETH0_INVERTED_RMII_CLK,
        )));
    }

    plan.push(PlanEntry::Write(RegisterWrite::set(
        PRG_ETH0,
        PRG_ETH0_TX_AND_PHY_REF_CLK,
    )));

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "{}: delay bits {:#010x}, {} plan entries",
        mode.name(),
        delay_bits,
        plan.len()
    );

    Ok(plan)
}

// =============================================================================
// Unit Tests
// =============================================================================
