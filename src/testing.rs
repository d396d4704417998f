//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the glue driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use crate::driver::error::{ClockError, ClockResult};
use crate::hal::clock::ClockSource;
use crate::internal::register::RegisterBlock;
use crate::internal::register::prg_eth::{PRG_ETH0, PRG_ETH1};

// =============================================================================
// Mock Registers
// =============================================================================

#[derive(Debug, Default)]
struct RegisterFile {
    /// PRG_ETH0, PRG_ETH1
    values: [u32; 2],
    /// Record of writes: (offset, value)
    write_log: Vec<(usize, u32)>,
}

/// Mock PRG_ETH register block
///
/// Clones share the same register file, so a test can keep a handle while
/// the driver owns another one.
///
/// # Example
///
/// ```ignore
/// let regs = MockRegisters::with_values(0xFE00_0000, 0);
/// let session = DwmacSession::initialize(regs.clone(), config, None)?;
/// assert_eq!(regs.value(PRG_ETH0) & 0xFE00_0000, 0xFE00_0000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRegisters {
    file: Rc<RefCell<RegisterFile>>,
}

impl MockRegisters {
    /// Create a zeroed register block
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a register block with preset values (not logged as writes)
    pub fn with_values(eth0: u32, eth1: u32) -> Self {
        let regs = Self::new();
        regs.file.borrow_mut().values = [eth0, eth1];
        regs
    }

    /// Current value of a register
    pub fn value(&self, offset: usize) -> u32 {
        self.file.borrow().values[Self::index(offset)]
    }

    /// Get all writes that have been made
    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.file.borrow().write_log.clone()
    }

    /// Number of writes made so far
    pub fn write_count(&self) -> usize {
        self.file.borrow().write_log.len()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.file.borrow_mut().write_log.clear();
    }

    fn index(offset: usize) -> usize {
        match offset {
            PRG_ETH0 => 0,
            PRG_ETH1 => 1,
            _ => panic!("offset {offset:#x} outside the PRG_ETH block"),
        }
    }
}

impl RegisterBlock for MockRegisters {
    fn read(&self, offset: usize) -> u32 {
        self.value(offset)
    }

    fn write(&mut self, offset: usize, value: u32) {
        let mut file = self.file.borrow_mut();
        file.values[Self::index(offset)] = value;
        file.write_log.push((offset, value));
    }
}

// =============================================================================
// Mock Clock
// =============================================================================

#[derive(Debug, Default)]
struct ClockRecord {
    enabled: bool,
    enable_calls: usize,
    disable_calls: usize,
    fail_enable: bool,
    /// Register writes already made when the clock was enabled
    writes_at_enable: Option<usize>,
}

/// Mock external clock (e.g. the timing-adjustment clock)
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct MockClock {
    rate_hz: u32,
    record: Rc<RefCell<ClockRecord>>,
    observed: Option<MockRegisters>,
}

impl MockClock {
    /// Create a clock running at `rate_hz` once enabled
    pub fn new(rate_hz: u32) -> Self {
        Self {
            rate_hz,
            record: Rc::default(),
            observed: None,
        }
    }

    /// Create a clock that notes how many register writes happened before
    /// it was enabled
    pub fn observing(rate_hz: u32, regs: &MockRegisters) -> Self {
        Self {
            observed: Some(regs.clone()),
            ..Self::new(rate_hz)
        }
    }

    /// Make `prepare_enable` fail
    pub fn set_fail_enable(&self, fail: bool) {
        self.record.borrow_mut().fail_enable = fail;
    }

    /// Whether the clock is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.record.borrow().enabled
    }

    /// Number of successful enables
    pub fn enable_calls(&self) -> usize {
        self.record.borrow().enable_calls
    }

    /// Number of disables
    pub fn disable_calls(&self) -> usize {
        self.record.borrow().disable_calls
    }

    /// Register write count at the moment of the last enable
    pub fn writes_at_enable(&self) -> Option<usize> {
        self.record.borrow().writes_at_enable
    }
}

impl ClockSource for MockClock {
    fn rate_hz(&self) -> u32 {
        if self.is_enabled() { self.rate_hz } else { 0 }
    }

    fn prepare_enable(&mut self) -> ClockResult<()> {
        let mut record = self.record.borrow_mut();
        if record.fail_enable {
            return Err(ClockError::EnableFailed);
        }
        record.enabled = true;
        record.enable_calls += 1;
        record.writes_at_enable = self.observed.as_ref().map(MockRegisters::write_count);
        Ok(())
    }

    fn disable_unprepare(&mut self) {
        let mut record = self.record.borrow_mut();
        record.enabled = false;
        record.disable_calls += 1;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_registers_share_state_between_clones() {
        let regs = MockRegisters::new();
        let mut handle = regs.clone();

        handle.write(PRG_ETH1, 0xABCD);

        assert_eq!(regs.value(PRG_ETH1), 0xABCD);
        assert_eq!(regs.writes(), [(PRG_ETH1, 0xABCD)]);
    }

    #[test]
    fn mock_registers_presets_are_not_writes() {
        let regs = MockRegisters::with_values(1, 2);

        assert_eq!(regs.value(PRG_ETH0), 1);
        assert_eq!(regs.value(PRG_ETH1), 2);
        assert_eq!(regs.write_count(), 0);
    }

    #[test]
    fn mock_registers_clear_writes() {
        let mut regs = MockRegisters::new();
        regs.write(PRG_ETH0, 1);
        regs.clear_writes();

        assert!(regs.writes().is_empty());
        assert_eq!(regs.value(PRG_ETH0), 1);
    }

    #[test]
    fn mock_clock_records_enable_and_disable() {
        let clock = MockClock::new(24_000_000);
        let mut handle = clock.clone();

        assert_eq!(handle.rate_hz(), 0);
        handle.prepare_enable().unwrap();
        assert!(clock.is_enabled());
        assert_eq!(handle.rate_hz(), 24_000_000);

        handle.disable_unprepare();
        assert!(!clock.is_enabled());
        assert_eq!(clock.enable_calls(), 1);
        assert_eq!(clock.disable_calls(), 1);
    }

    #[test]
    fn mock_clock_can_fail() {
        let mut clock = MockClock::new(24_000_000);
        clock.set_fail_enable(true);

        assert_eq!(clock.prepare_enable(), Err(ClockError::EnableFailed));
        assert!(!clock.is_enabled());
        assert_eq!(clock.enable_calls(), 0);
    }

    #[test]
    fn mock_clock_observes_register_writes() {
        let mut regs = MockRegisters::new();
        let mut clock = MockClock::observing(24_000_000, &regs);

        regs.write(PRG_ETH0, 1);
        clock.prepare_enable().unwrap();

        assert_eq!(clock.writes_at_enable(), Some(1));
    }
}
