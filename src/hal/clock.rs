//! RGMII TX Clock Tree
//!
//! The glue block derives the RGMII TX clock from one of two SoC clocks
//! through four nodes, each backed by a field of `PRG_ETH0`:
//!
//! ```text
//! clkin0 ─┐
//!         ├─ m250_sel (mux) ─ m250_div (2..7) ─ fixed_div2 (/2) ─ rgmii_tx_en (gate)
//! clkin1 ─┘
//! ```
//!
//! The graph is a plain value owned by the device session. Nodes only
//! describe where their field lives; the selected inputs and the gate state
//! are always read back from the register.

use core::fmt;

use crate::driver::config::ParentClock;
use crate::driver::error::{ClockError, ClockResult, ConfigError, ConfigResult};
use crate::internal::bitfield::{field_get, field_prep};
use crate::internal::constants::{
    FIXED_DIV2_DIV, FIXED_DIV2_MULT, M250_DIV_TABLE, MUX_CLK_NUM_PARENTS,
};
use crate::internal::register::RegisterBlock;
use crate::internal::register::prg_eth::{
    PRG_ETH0, PRG_ETH0_CLK_M250_DIV_MASK, PRG_ETH0_CLK_M250_SEL_MASK, PRG_ETH0_RGMII_TX_CLK_EN,
};

// =============================================================================
// External Clocks
// =============================================================================

/// A clock owned by the SoC clock controller, outside the glue block.
///
/// Implemented by the platform for the timing-adjustment clock.
pub trait ClockSource {
    /// Current rate in Hz
    fn rate_hz(&self) -> u32;

    /// Prepare and enable the clock
    fn prepare_enable(&mut self) -> ClockResult<()>;

    /// Disable and unprepare the clock
    fn disable_unprepare(&mut self);
}

/// Placeholder for boards without a timing-adjustment clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoClock;

impl ClockSource for NoClock {
    fn rate_hz(&self) -> u32 {
        0
    }

    fn prepare_enable(&mut self) -> ClockResult<()> {
        Err(ClockError::EnableFailed)
    }

    fn disable_unprepare(&mut self) {}
}

// =============================================================================
// Clock State
// =============================================================================

/// Configuration state of the TX clock tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockState {
    /// No rate selected yet
    #[default]
    Unconfigured,
    /// Mux and divider programmed, gate not yet enabled
    RateSelected,
    /// Gate enabled
    Enabled,
}

// =============================================================================
// Node Identity
// =============================================================================

/// Node of the TX clock tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockId {
    /// `m250_sel` input mux
    M250Sel,
    /// `m250_div` table divider
    M250Div,
    /// `fixed_div2` post-divider
    FixedDiv2,
    /// `rgmii_tx_en` output gate
    RgmiiTxEn,
}

impl ClockId {
    /// Nodes in chain order, mux first
    pub const CHAIN: [ClockId; 4] = [
        ClockId::M250Sel,
        ClockId::M250Div,
        ClockId::FixedDiv2,
        ClockId::RgmiiTxEn,
    ];

    /// Name suffix of the node
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            ClockId::M250Sel => "m250_sel",
            ClockId::M250Div => "m250_div",
            ClockId::FixedDiv2 => "fixed_div2",
            ClockId::RgmiiTxEn => "rgmii_tx_en",
        }
    }

    /// Upstream node inside the glue block (`None` for the mux, whose
    /// parents are the external oscillators)
    #[must_use]
    pub const fn parent(self) -> Option<ClockId> {
        match self {
            ClockId::M250Sel => None,
            ClockId::M250Div => Some(ClockId::M250Sel),
            ClockId::FixedDiv2 => Some(ClockId::M250Div),
            ClockId::RgmiiTxEn => Some(ClockId::FixedDiv2),
        }
    }
}

/// Full node name, `<device>#<suffix>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockName {
    device: &'static str,
    id: ClockId,
}

impl fmt::Display for ClockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.device, self.id.suffix())
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// Input mux: selects one of the two oscillators
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mux {
    /// Selector field in `PRG_ETH0`
    pub mask: u32,
    /// Selectable parents, by selector value
    pub parents: [ParentClock; MUX_CLK_NUM_PARENTS],
}

impl Mux {
    /// Rate of the parent selected by `reg`
    pub fn recalc_rate(&self, reg: u32) -> u32 {
        let index = field_get(self.mask, reg) as usize;
        self.parents.get(index).map_or(0, |p| p.rate_hz)
    }
}

/// Integer divider restricted to a table of divisors, rounding to closest.
///
/// The register value of an entry equals its divisor. Values outside the
/// table (0 and 1 after reset) let the parent rate through.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Divider {
    /// Divisor field in `PRG_ETH0`
    pub mask: u32,
    /// Allowed divisors
    pub table: &'static [u32],
}

impl Divider {
    /// Output rate for a parent rate and divisor (rounded up)
    pub const fn divide(parent_hz: u32, div: u32) -> u32 {
        parent_hz.div_ceil(div)
    }

    /// Divisor currently programmed in `reg`, if it is a table entry
    pub fn divisor(&self, reg: u32) -> Option<u32> {
        let value = field_get(self.mask, reg);
        self.table.iter().copied().find(|&div| div == value)
    }

    /// Output rate for the divisor programmed in `reg`
    pub fn recalc_rate(&self, parent_hz: u32, reg: u32) -> u32 {
        match self.divisor(reg) {
            Some(div) => Self::divide(parent_hz, div),
            None => parent_hz,
        }
    }

    /// Table entry whose output is closest to `target_hz`, first entry wins
    /// ties. Returns `(divisor, rate)`.
    pub fn best_divisor(&self, parent_hz: u32, target_hz: u64) -> Option<(u32, u32)> {
        let mut best: Option<(u32, u32)> = None;

        for &div in self.table {
            let rate = Self::divide(parent_hz, div);
            let closer = match best {
                Some((_, best_rate)) => {
                    (rate as u64).abs_diff(target_hz) < (best_rate as u64).abs_diff(target_hz)
                }
                None => true,
            };
            if closer {
                best = Some((div, rate));
            }
        }

        best
    }
}

/// Fixed `mult / div` factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedFactor {
    /// Multiplier
    pub mult: u32,
    /// Divisor
    pub div: u32,
}

impl FixedFactor {
    /// Output rate for a parent rate
    pub const fn recalc_rate(&self, parent_hz: u32) -> u32 {
        ((parent_hz as u64 * self.mult as u64) / self.div as u64) as u32
    }

    /// Parent rate needed for `rate_hz` at the output
    pub const fn parent_rate_for(&self, rate_hz: u32) -> u64 {
        rate_hz as u64 * self.div as u64 / self.mult as u64
    }
}

/// Single-bit clock gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gate {
    /// Enable bit in `PRG_ETH0`
    pub bit: u32,
}

impl Gate {
    /// Whether the gate is open in `reg`
    pub const fn is_enabled(&self, reg: u32) -> bool {
        reg & self.bit != 0
    }
}

/// Borrowed view of one node of the graph
#[derive(Debug, Clone, Copy)]
pub enum ClockNode<'g> {
    /// Input mux
    Mux(&'g Mux),
    /// Table divider
    Divider(&'g Divider),
    /// Fixed factor
    FixedFactor(&'g FixedFactor),
    /// Gate
    Gate(&'g Gate),
}

// =============================================================================
// Rate Selection
// =============================================================================

/// Mux input and divisor chosen for a target rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateSelection {
    /// Selected mux input (0 = clkin0, 1 = clkin1)
    pub parent: usize,
    /// Selected `m250_div` divisor
    pub divisor: u32,
    /// Resulting rate at the gate output
    pub rate_hz: u32,
}

// =============================================================================
// Clock Graph
// =============================================================================

/// The RGMII TX clock tree of one device
#[derive(Debug)]
pub struct ClockGraph {
    device: &'static str,
    mux: Mux,
    div: Divider,
    fixed: FixedFactor,
    gate: Gate,
    state: ClockState,
    selection: Option<RateSelection>,
}

impl ClockGraph {
    /// Wire up mux, divider, fixed divider and gate.
    ///
    /// # Errors
    /// `MissingParentClock` if either mux input is absent.
    pub fn build(
        device: &'static str,
        clkin: &[Option<ParentClock>; MUX_CLK_NUM_PARENTS],
    ) -> ConfigResult<Self> {
        let mut parents = [ParentClock::new("", 0); MUX_CLK_NUM_PARENTS];

        for (slot, input) in parents.iter_mut().zip(clkin) {
            let Some(parent) = input else {
                #[cfg(feature = "defmt")]
                defmt::error!("{}: missing TX clock mux parent", device);

                return Err(ConfigError::MissingParentClock);
            };
            *slot = *parent;
        }

        Ok(Self {
            device,
            mux: Mux {
                mask: PRG_ETH0_CLK_M250_SEL_MASK,
                parents,
            },
            div: Divider {
                mask: PRG_ETH0_CLK_M250_DIV_MASK,
                table: &M250_DIV_TABLE,
            },
            fixed: FixedFactor {
                mult: FIXED_DIV2_MULT,
                div: FIXED_DIV2_DIV,
            },
            gate: Gate {
                bit: PRG_ETH0_RGMII_TX_CLK_EN,
            },
            state: ClockState::Unconfigured,
            selection: None,
        })
    }

    /// Current configuration state
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Last rate selection applied by [`set_rate`](Self::set_rate)
    pub fn selection(&self) -> Option<RateSelection> {
        self.selection
    }

    /// Full name of a node
    pub fn name(&self, id: ClockId) -> ClockName {
        ClockName {
            device: self.device,
            id,
        }
    }

    /// Access a node by id
    pub fn node(&self, id: ClockId) -> ClockNode<'_> {
        match id {
            ClockId::M250Sel => ClockNode::Mux(&self.mux),
            ClockId::M250Div => ClockNode::Divider(&self.div),
            ClockId::FixedDiv2 => ClockNode::FixedFactor(&self.fixed),
            ClockId::RgmiiTxEn => ClockNode::Gate(&self.gate),
        }
    }

    /// Pick the mux input and divisor for `target_hz` at the gate output.
    ///
    /// For each parent the divisor closest to the rate needed in front of
    /// the fixed divider is chosen. A parent only qualifies when it equals
    /// that rate times the divisor, and clkin0 wins when both qualify.
    ///
    /// # Errors
    /// `UnachievableRate` if no combination produces `target_hz` exactly.
    pub fn round_rate(&self, target_hz: u32) -> ClockResult<RateSelection> {
        let div_target = self.fixed.parent_rate_for(target_hz);

        for (index, parent) in self.mux.parents.iter().enumerate() {
            let Some((divisor, div_rate)) = self.div.best_divisor(parent.rate_hz, div_target)
            else {
                continue;
            };
            // Rounded division can land on the target from an inexact parent
            if parent.rate_hz as u64 != div_target * divisor as u64 {
                continue;
            }
            // Lower mux index wins when both inputs are exact
            return Ok(RateSelection {
                parent: index,
                divisor,
                rate_hz: self.fixed.recalc_rate(div_rate),
            });
        }

        Err(ClockError::UnachievableRate)
    }

    /// Program mux and divider for `target_hz`.
    ///
    /// Repeating the call with the same target produces the same selection.
    ///
    /// # Errors
    /// `UnachievableRate` if the rate cannot be produced exactly; nothing is
    /// written in that case.
    pub fn set_rate<R: RegisterBlock>(
        &mut self,
        regs: &mut R,
        target_hz: u32,
    ) -> ClockResult<RateSelection> {
        let selection = self.round_rate(target_hz)?;

        regs.mask_bits(
            PRG_ETH0,
            self.mux.mask,
            field_prep(self.mux.mask, selection.parent as u32),
        );
        regs.mask_bits(
            PRG_ETH0,
            self.div.mask,
            field_prep(self.div.mask, selection.divisor),
        );

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}#rgmii_tx_en: {} Hz from {} / {} / 2",
            self.device,
            selection.rate_hz,
            self.mux.parents[selection.parent].name,
            selection.divisor
        );

        self.selection = Some(selection);
        if self.state == ClockState::Unconfigured {
            self.state = ClockState::RateSelected;
        }
        Ok(selection)
    }

    /// Open the output gate.
    ///
    /// # Errors
    /// `ClockNotConfigured` if no rate was selected yet.
    pub fn enable<R: RegisterBlock>(&mut self, regs: &mut R) -> ClockResult<()> {
        if self.state == ClockState::Unconfigured {
            return Err(ClockError::ClockNotConfigured);
        }

        regs.mask_bits(PRG_ETH0, self.gate.bit, self.gate.bit);
        self.state = ClockState::Enabled;
        Ok(())
    }

    /// Close the output gate (no-op unless enabled)
    pub fn disable<R: RegisterBlock>(&mut self, regs: &mut R) {
        if self.state != ClockState::Enabled {
            return;
        }

        regs.mask_bits(PRG_ETH0, self.gate.bit, 0);
        self.state = ClockState::RateSelected;
    }

    /// Rate at the gate output as programmed in the register
    /// (regardless of whether the gate is open)
    pub fn recalc_rate<R: RegisterBlock>(&self, regs: &R) -> u32 {
        let reg = regs.read(PRG_ETH0);
        let mux_rate = self.mux.recalc_rate(reg);
        let div_rate = self.div.recalc_rate(mux_rate, reg);
        self.fixed.recalc_rate(div_rate)
    }

    /// Whether the gate is open in the register
    pub fn is_enabled<R: RegisterBlock>(&self, regs: &R) -> bool {
        self.gate.is_enabled(regs.read(PRG_ETH0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;
    use crate::internal::constants::{RGMII_TX_CLK_10M_HZ, RGMII_TX_CLK_100M_HZ, RGMII_TX_CLK_HZ};
    use crate::internal::register::prg_eth::PRG_ETH1;
    use crate::testing::MockRegisters;

    const FCLK_DIV2: ParentClock = ParentClock::new("fclk_div2", 1_000_000_000);
    const MPLL2: ParentClock = ParentClock::new("mpll2", 500_000_000);

    fn graph() -> ClockGraph {
        ClockGraph::build("ethmac", &[Some(FCLK_DIV2), Some(MPLL2)]).unwrap()
    }

    // =========================================================================
    // Construction Tests
    // =========================================================================

    #[test]
    fn build_requires_both_parents() {
        assert_eq!(
            ClockGraph::build("ethmac", &[None, Some(MPLL2)]).unwrap_err(),
            ConfigError::MissingParentClock
        );
        assert_eq!(
            ClockGraph::build("ethmac", &[Some(FCLK_DIV2), None]).unwrap_err(),
            ConfigError::MissingParentClock
        );
        assert_eq!(
            ClockGraph::build("ethmac", &[None, None]).unwrap_err(),
            ConfigError::MissingParentClock
        );
    }

    #[test]
    fn build_starts_unconfigured() {
        let graph = graph();
        assert_eq!(graph.state(), ClockState::Unconfigured);
        assert_eq!(graph.selection(), None);
    }

    #[test]
    fn topology_is_a_chain() {
        let graph = graph();

        assert_eq!(ClockId::M250Sel.parent(), None);
        for pair in ClockId::CHAIN.windows(2) {
            assert_eq!(pair[1].parent(), Some(pair[0]));
        }

        assert!(matches!(graph.node(ClockId::M250Sel), ClockNode::Mux(_)));
        assert!(matches!(graph.node(ClockId::M250Div), ClockNode::Divider(_)));
        assert!(matches!(
            graph.node(ClockId::FixedDiv2),
            ClockNode::FixedFactor(FixedFactor { mult: 1, div: 2 })
        ));
        assert!(matches!(graph.node(ClockId::RgmiiTxEn), ClockNode::Gate(_)));
    }

    #[test]
    fn mux_keeps_parent_order() {
        let graph = graph();
        let ClockNode::Mux(mux) = graph.node(ClockId::M250Sel) else {
            panic!("expected mux");
        };
        assert_eq!(mux.parents, [FCLK_DIV2, MPLL2]);
    }

    #[test]
    fn node_names_are_device_prefixed() {
        let graph = ClockGraph::build("c9410000.ethernet", &[Some(FCLK_DIV2), Some(MPLL2)])
            .unwrap();

        assert_eq!(
            format!("{}", graph.name(ClockId::M250Sel)),
            "c9410000.ethernet#m250_sel"
        );
        assert_eq!(
            format!("{}", graph.name(ClockId::RgmiiTxEn)),
            "c9410000.ethernet#rgmii_tx_en"
        );
    }

    // =========================================================================
    // Rate Selection Tests
    // =========================================================================

    #[test]
    fn round_rate_prefers_first_parent_on_tie() {
        // 1 GHz / 4 / 2 and 500 MHz / 2 / 2 are both exact
        let selection = graph().round_rate(RGMII_TX_CLK_HZ).unwrap();
        assert_eq!(
            selection,
            RateSelection {
                parent: 0,
                divisor: 4,
                rate_hz: RGMII_TX_CLK_HZ
            }
        );
    }

    #[test]
    fn round_rate_picks_the_exact_parent() {
        let odd = ParentClock::new("fclk_div2", 999_000_000);
        let mpll = ParentClock::new("mpll2", 750_000_000);
        let graph = ClockGraph::build("ethmac", &[Some(odd), Some(mpll)]).unwrap();

        let selection = graph.round_rate(RGMII_TX_CLK_HZ).unwrap();
        assert_eq!(selection.parent, 1);
        assert_eq!(selection.divisor, 3);
        assert_eq!(selection.rate_hz, RGMII_TX_CLK_HZ);
    }

    #[test]
    fn round_rate_rejects_inexact_results() {
        let a = ParentClock::new("fclk_div2", 999_000_000);
        let b = ParentClock::new("mpll2", 510_000_000);
        let graph = ClockGraph::build("ethmac", &[Some(a), Some(b)]).unwrap();

        assert_eq!(
            graph.round_rate(RGMII_TX_CLK_HZ),
            Err(ClockError::UnachievableRate)
        );
    }

    #[test]
    fn slower_link_rates_divide_the_programmed_rate() {
        let mut regs = MockRegisters::new();
        let mut graph = graph();

        graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();
        let rate = graph.recalc_rate(&regs);

        assert_eq!(rate % RGMII_TX_CLK_100M_HZ, 0);
        assert_eq!(rate / RGMII_TX_CLK_100M_HZ, 5);
        assert_eq!(rate / RGMII_TX_CLK_10M_HZ, 50);
    }

    #[test]
    fn round_rate_rejects_rounded_division() {
        // 1_000_000_003 / 4 rounds up to exactly 250 MHz
        let skewed = ParentClock::new("fclk_div2", 1_000_000_003);
        let near = ParentClock::new("mpll2", 500_000_001);
        let graph = ClockGraph::build("ethmac", &[Some(skewed), Some(near)]).unwrap();

        assert_eq!(
            graph.round_rate(RGMII_TX_CLK_HZ),
            Err(ClockError::UnachievableRate)
        );
    }

    #[test]
    fn set_rate_skips_rounded_parent() {
        let mut regs = MockRegisters::new();
        let skewed = ParentClock::new("fclk_div2", 1_000_000_003);
        let mut graph = ClockGraph::build("ethmac", &[Some(skewed), Some(MPLL2)]).unwrap();

        let selection = graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();
        assert_eq!(selection.parent, 1);
        assert_eq!(selection.divisor, 2);
        assert_eq!(field_get(PRG_ETH0_CLK_M250_SEL_MASK, regs.value(PRG_ETH0)), 1);
    }

    #[test]
    fn set_rate_with_rounded_parents_writes_nothing() {
        let mut regs = MockRegisters::new();
        let skewed = ParentClock::new("fclk_div2", 1_000_000_003);
        let mut graph = ClockGraph::build("ethmac", &[Some(skewed), Some(skewed)]).unwrap();

        assert_eq!(
            graph.set_rate(&mut regs, RGMII_TX_CLK_HZ),
            Err(ClockError::UnachievableRate)
        );
        assert_eq!(regs.write_count(), 0);
        assert_eq!(graph.state(), ClockState::Unconfigured);
    }

    #[test]
    fn round_rate_out_of_table_range() {
        // Would need a divisor of 8
        let a = ParentClock::new("fclk_div2", 2_000_000_000);
        let graph = ClockGraph::build("ethmac", &[Some(a), Some(a)]).unwrap();

        assert_eq!(
            graph.round_rate(RGMII_TX_CLK_HZ),
            Err(ClockError::UnachievableRate)
        );
    }

    #[test]
    fn best_divisor_rounds_to_closest() {
        let div = Divider {
            mask: PRG_ETH0_CLK_M250_DIV_MASK,
            table: &M250_DIV_TABLE,
        };
        // 1000/3 = 334 (diff 84), 1000/4 = 250 (diff 0 vs 250)
        assert_eq!(div.best_divisor(1000, 250), Some((4, 250)));
        // 1000/5 = 200 is closer to 210 than 1000/4 = 250
        assert_eq!(div.best_divisor(1000, 210), Some((5, 200)));
        // Clamp to the smallest and largest entries
        assert_eq!(div.best_divisor(1000, 10_000), Some((2, 500)));
        assert_eq!(div.best_divisor(1000, 1), Some((7, 143)));
    }

    // =========================================================================
    // Register Programming Tests
    // =========================================================================

    #[test]
    fn set_rate_programs_mux_and_divider() {
        let mut regs = MockRegisters::new();
        let mut graph = graph();

        graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();

        let reg = regs.value(PRG_ETH0);
        assert_eq!(field_get(PRG_ETH0_CLK_M250_SEL_MASK, reg), 0);
        assert_eq!(field_get(PRG_ETH0_CLK_M250_DIV_MASK, reg), 4);
        assert_eq!(reg & PRG_ETH0_RGMII_TX_CLK_EN, 0);
        assert_eq!(graph.state(), ClockState::RateSelected);
        assert_eq!(graph.recalc_rate(&regs), RGMII_TX_CLK_HZ);
    }

    #[test]
    fn set_rate_selects_second_input() {
        let mut regs = MockRegisters::new();
        let odd = ParentClock::new("fclk_div2", 999_000_000);
        let mut graph = ClockGraph::build("ethmac", &[Some(odd), Some(MPLL2)]).unwrap();

        graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();

        let reg = regs.value(PRG_ETH0);
        assert_eq!(field_get(PRG_ETH0_CLK_M250_SEL_MASK, reg), 1);
        assert_eq!(field_get(PRG_ETH0_CLK_M250_DIV_MASK, reg), 2);
        assert_eq!(graph.recalc_rate(&regs), RGMII_TX_CLK_HZ);
    }

    #[test]
    fn set_rate_is_idempotent() {
        let mut regs = MockRegisters::new();
        let mut graph = graph();

        let first = graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();
        let after_first = regs.value(PRG_ETH0);
        let second = graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();

        assert_eq!(first, second);
        assert_eq!(regs.value(PRG_ETH0), after_first);
        assert_eq!(graph.state(), ClockState::RateSelected);
    }

    #[test]
    fn set_rate_failure_writes_nothing() {
        let mut regs = MockRegisters::with_values(0x0000_0380, 0);
        let a = ParentClock::new("fclk_div2", 999_000_000);
        let mut graph = ClockGraph::build("ethmac", &[Some(a), Some(a)]).unwrap();

        assert_eq!(
            graph.set_rate(&mut regs, RGMII_TX_CLK_HZ),
            Err(ClockError::UnachievableRate)
        );
        assert!(regs.writes().is_empty());
        assert_eq!(graph.state(), ClockState::Unconfigured);
    }

    #[test]
    fn set_rate_keeps_unrelated_bits() {
        let mut regs = MockRegisters::with_values(0xFE00_0001, 0x1234_5678);
        let mut graph = graph();

        graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();

        assert_eq!(regs.value(PRG_ETH0) & 0xFE00_0001, 0xFE00_0001);
        assert_eq!(regs.value(PRG_ETH1), 0x1234_5678);
    }

    // =========================================================================
    // State Machine Tests
    // =========================================================================

    #[test]
    fn enable_before_set_rate_fails() {
        let mut regs = MockRegisters::new();
        let mut graph = graph();

        assert_eq!(graph.enable(&mut regs), Err(ClockError::ClockNotConfigured));
        assert!(!graph.is_enabled(&regs));
        assert!(regs.writes().is_empty());
    }

    #[test]
    fn set_rate_then_enable() {
        let mut regs = MockRegisters::new();
        let mut graph = graph();

        graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();
        graph.enable(&mut regs).unwrap();

        assert_eq!(graph.state(), ClockState::Enabled);
        assert!(graph.is_enabled(&regs));

        // Re-applying the same plan changes nothing
        let reg = regs.value(PRG_ETH0);
        graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();
        graph.enable(&mut regs).unwrap();
        assert_eq!(regs.value(PRG_ETH0), reg);
        assert_eq!(graph.state(), ClockState::Enabled);
    }

    #[test]
    fn disable_closes_gate() {
        let mut regs = MockRegisters::new();
        let mut graph = graph();

        graph.set_rate(&mut regs, RGMII_TX_CLK_HZ).unwrap();
        graph.enable(&mut regs).unwrap();
        graph.disable(&mut regs);

        assert!(!graph.is_enabled(&regs));
        assert_eq!(graph.state(), ClockState::RateSelected);
        assert_eq!(graph.recalc_rate(&regs), RGMII_TX_CLK_HZ);
    }

    #[test]
    fn disable_when_not_enabled_is_noop() {
        let mut regs = MockRegisters::with_values(PRG_ETH0_RGMII_TX_CLK_EN, 0);
        let mut graph = graph();

        graph.disable(&mut regs);
        assert!(regs.writes().is_empty());
        assert!(graph.is_enabled(&regs));
    }

    // =========================================================================
    // Read-back Tests
    // =========================================================================

    #[test]
    fn recalc_treats_out_of_table_divider_as_bypass() {
        // Reset value: mux 0, divider field 0
        let regs = MockRegisters::new();
        assert_eq!(graph().recalc_rate(&regs), 500_000_000);
    }

    #[test]
    fn recalc_follows_register_contents() {
        let reg =
            field_prep(PRG_ETH0_CLK_M250_SEL_MASK, 1) | field_prep(PRG_ETH0_CLK_M250_DIV_MASK, 5);
        let regs = MockRegisters::with_values(reg, 0);

        assert_eq!(graph().recalc_rate(&regs), 50_000_000);
    }
}
