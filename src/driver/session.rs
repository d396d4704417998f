//! Device session for the Meson DWMAC glue block.
//!
//! A [`DwmacSession`] owns the mapped `PRG_ETH` registers, the TX clock graph
//! and the optional timing-adjustment clock of one Ethernet controller.
//! [`DwmacSession::initialize`] programs the glue block in a single pass:
//!
//! - Interface mode bits
//! - TX delay and RX adjustment
//! - RMII clock inversion or the 125 MHz RGMII TX clock
//! - TX and PHY reference clock enable
//!
//! Dropping the session closes the TX clock gate and stops the
//! timing-adjustment clock before the register region is released.

use super::config::{ChipFamily, DwmacConfig, PhyMode};
use super::error::{ConfigError, InitError, InitStep};
use crate::hal::clock::{ClockGraph, ClockSource, ClockState, NoClock};
use crate::internal::register::RegisterBlock;
use crate::phy::policy::InterfacePolicy;
use crate::phy::timing::{self, PlanEntry};

/// Configured glue block of one Ethernet controller
///
/// # Type Parameters
///
/// * `R` - Register access to the `PRG_ETH` block
/// * `C` - Timing-adjustment clock
pub struct DwmacSession<R: RegisterBlock, C: ClockSource = NoClock> {
    regs: R,
    chip: ChipFamily,
    phy_mode: PhyMode,
    policy: InterfacePolicy,
    clock: ClockGraph,
    timing_adj_clk: Option<C>,
    /// Set once this session has started `timing_adj_clk`
    timing_adj_clk_enabled: bool,
}

impl<R: RegisterBlock> DwmacSession<R, NoClock> {
    /// [`initialize`](Self::initialize) for boards without a
    /// timing-adjustment clock
    ///
    /// # Errors
    /// See [`initialize`](Self::initialize).
    pub fn initialize_without_timing_clock(
        regs: R,
        config: &DwmacConfig,
    ) -> Result<Self, InitError> {
        Self::initialize(regs, config, None)
    }
}

impl<R: RegisterBlock, C: ClockSource> DwmacSession<R, C> {
    /// Program the glue block.
    ///
    /// Steps run in order and the first failure aborts initialization.
    /// Registers already written are left as they are; resources the
    /// session started are released.
    ///
    /// # Errors
    /// Returns the first error together with the [`InitStep`] that
    /// produced it.
    pub fn initialize(
        regs: R,
        config: &DwmacConfig,
        timing_adj_clk: Option<C>,
    ) -> Result<Self, InitError> {
        let clock = ClockGraph::build(config.device_name, &config.clkin)
            .map_err(|e| InitError::new(InitStep::ClockGraph, e))
            .inspect_err(|_err| {
                #[cfg(feature = "defmt")]
                defmt::error!("{}: init failed: {}", config.device_name, _err);
            })?;

        let mut session = Self {
            regs,
            chip: config.chip,
            phy_mode: config.phy_mode,
            policy: InterfacePolicy::for_family(config.chip),
            clock,
            timing_adj_clk,
            timing_adj_clk_enabled: false,
        };

        // On error the session is dropped here, which undoes the clock enables
        session.configure(config).inspect_err(|_err| {
            #[cfg(feature = "defmt")]
            defmt::error!("{}: init failed: {}", config.device_name, _err);
        })?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "{}: {} configured ({})",
            config.device_name,
            config.phy_mode.name(),
            config.chip.compatible()
        );

        Ok(session)
    }

    fn configure(&mut self, config: &DwmacConfig) -> Result<(), InitError> {
        // === STEP 1: Register plan (interface mode first) ===
        let delay = config.delay_config(self.timing_adj_clk.is_some());
        let plan = timing::compute(self.phy_mode, &delay, &self.policy).map_err(|e| {
            let step = match e {
                ConfigError::UnsupportedPhyMode => InitStep::PhyMode,
                _ => InitStep::TimingPlan,
            };
            InitError::new(step, e)
        })?;

        // === STEP 2: Timing-adjustment clock must run before RX adjust is on ===
        if plan.requires_timing_adjustment_clock()
            && let Some(clk) = self.timing_adj_clk.as_mut()
        {
            clk.prepare_enable()
                .map_err(|e| InitError::new(InitStep::TimingAdjustmentClock, e))?;
            self.timing_adj_clk_enabled = true;

            #[cfg(feature = "defmt")]
            defmt::debug!("timing-adjustment clock at {} Hz", clk.rate_hz());
        }

        // === STEP 3: Apply the plan ===
        for entry in plan.iter() {
            match *entry {
                PlanEntry::Write(write) => self.regs.apply(write),
                PlanEntry::ConfigureTxClock { rate_hz } => {
                    // Rate before gate
                    self.clock
                        .set_rate(&mut self.regs, rate_hz)
                        .map_err(|e| InitError::new(InitStep::TxClockRate, e))?;
                    self.clock
                        .enable(&mut self.regs)
                        .map_err(|e| InitError::new(InitStep::TxClockEnable, e))?;
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Register block
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// TX clock graph
    pub fn clock_graph(&self) -> &ClockGraph {
        &self.clock
    }

    /// Chip family
    pub fn chip(&self) -> ChipFamily {
        self.chip
    }

    /// PHY interface mode
    pub fn phy_mode(&self) -> PhyMode {
        self.phy_mode
    }

    /// Interface mode policy in use
    pub fn policy(&self) -> InterfacePolicy {
        self.policy
    }

    /// RGMII TX clock rate read back from the register, `None` while the
    /// gate is closed
    pub fn tx_clock_rate_hz(&self) -> Option<u32> {
        if self.clock.state() == ClockState::Enabled && self.clock.is_enabled(&self.regs) {
            Some(self.clock.recalc_rate(&self.regs))
        } else {
            None
        }
    }

    /// Timing-adjustment clock, if one was supplied
    pub fn timing_adjustment_clock(&self) -> Option<&C> {
        self.timing_adj_clk.as_ref()
    }

    /// Whether this session started the timing-adjustment clock
    pub fn timing_adjustment_clock_enabled(&self) -> bool {
        self.timing_adj_clk_enabled
    }
}

impl<R: RegisterBlock, C: ClockSource> Drop for DwmacSession<R, C> {
    fn drop(&mut self) {
        self.clock.disable(&mut self.regs);

        if self.timing_adj_clk_enabled
            && let Some(clk) = self.timing_adj_clk.as_mut()
        {
            clk.disable_unprepare();
            self.timing_adj_clk_enabled = false;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
