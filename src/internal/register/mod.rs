//! Memory-mapped register access for the PRG_ETH glue block
//!
//! All hardware access is volatile. The glue block is reached through a
//! [`RegisterBlock`], so the configuration logic runs the same against the
//! real mapping ([`MmioRegion`]) and against host-side mocks.

pub mod prg_eth;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

// =============================================================================
// Register Block
// =============================================================================

/// A block of 32-bit registers addressed by byte offset.
pub trait RegisterBlock {
    /// Read the register at `offset`
    fn read(&self, offset: usize) -> u32;

    /// Write the register at `offset`
    fn write(&mut self, offset: usize, value: u32);

    /// Read-modify-write: replace the bits under `mask` with `value & mask`.
    ///
    /// Bits outside `mask` keep their current value.
    fn mask_bits(&mut self, offset: usize, mask: u32, value: u32) {
        let mut data = self.read(offset);
        data &= !mask;
        data |= value & mask;
        self.write(offset, data);
    }

    /// Apply a single [`RegisterWrite`]
    fn apply(&mut self, write: RegisterWrite) {
        self.mask_bits(write.offset, write.mask, write.value);
    }
}

impl<R: RegisterBlock + ?Sized> RegisterBlock for &mut R {
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    fn write(&mut self, offset: usize, value: u32) {
        (**self).write(offset, value);
    }
}

/// One masked register update: `(offset, mask, value)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    /// Register byte offset
    pub offset: usize,
    /// Bits owned by this write
    pub mask: u32,
    /// New value of the masked bits (already shifted into position)
    pub value: u32,
}

impl RegisterWrite {
    /// Create a masked write
    #[must_use]
    pub const fn new(offset: usize, mask: u32, value: u32) -> Self {
        Self {
            offset,
            mask,
            value: value & mask,
        }
    }

    /// Set every bit in `bits`
    #[must_use]
    pub const fn set(offset: usize, bits: u32) -> Self {
        Self::new(offset, bits, bits)
    }

    /// Clear every bit in `bits`
    #[must_use]
    pub const fn clear(offset: usize, bits: u32) -> Self {
        Self::new(offset, bits, 0)
    }
}

// =============================================================================
// MMIO Region
// =============================================================================

/// The mapped PRG_ETH region of one device.
#[derive(Debug)]
pub struct MmioRegion {
    base: usize,
}

impl MmioRegion {
    /// Wrap an already mapped register region.
    ///
    /// # Safety
    /// `base` must be the 4-byte aligned virtual address of the mapped
    /// PRG_ETH block, valid for as long as the region is used, and nothing
    /// else may write the block concurrently.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Get the base address
    #[inline(always)]
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl RegisterBlock for MmioRegion {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        // SAFETY: validity of base + offset guaranteed by `MmioRegion::new`
        unsafe { read_reg(self.base + offset) }
    }

    #[inline(always)]
    fn write(&mut self, offset: usize, value: u32) {
        #[cfg(feature = "defmt")]
        defmt::trace!("PRG_ETH[{:#x}] <= {:#010x}", offset, value);

        // SAFETY: validity of base + offset guaranteed by `MmioRegion::new`
        unsafe { write_reg(self.base + offset, value) }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
