// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Word-granular access to memory-mapped register blocks.
//!
//! The platform hands the driver raw pointers to its APB windows; everything
//! above this module goes through [`RegisterBlock`] so it can run against a
//! RAM-backed fake in tests.

use std::ptr;

/// A block of 32-bit hardware registers addressed by byte offset.
///
/// Offsets are relative to the block base and must be 4-byte aligned and in
/// bounds; implementations may panic otherwise, since callers validate
/// alignment before dispatching.
pub trait RegisterBlock {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&self, offset: usize, value: u32);
}

/// A live MMIO register window. All accesses are volatile 32-bit reads and
/// writes; the memory is owned by the platform and only borrowed here.
pub struct MappedRegs {
    base: *mut u8,
    len: usize,
}

impl MappedRegs {
    /// Wraps `len` bytes of device registers starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point to a mapped, device-memory region of at least `len`
    /// bytes, 4-byte aligned, which no other context accesses for as long as
    /// this value is in use.
    pub const unsafe fn new(base: *mut u8, len: usize) -> Self {
        Self { base, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn word_ptr(&self, offset: usize) -> *mut u32 {
        assert!(offset % 4 == 0, "unaligned register offset {:#x}", offset);
        assert!(
            offset + 4 <= self.len,
            "register offset {:#x} outside {:#x}-byte window",
            offset,
            self.len
        );
        // Safety: checked against the window bounds above; alignment is
        // guaranteed by the constructor contract plus the offset check.
        unsafe { self.base.add(offset) as *mut u32 }
    }
}

impl RegisterBlock for MappedRegs {
    fn read32(&self, offset: usize) -> u32 {
        unsafe { ptr::read_volatile(self.word_ptr(offset)) }
    }

    fn write32(&self, offset: usize, value: u32) {
        unsafe { ptr::write_volatile(self.word_ptr(offset), value) }
    }
}

// The window is a borrowed view; exclusivity is the constructor's contract.
unsafe impl Send for MappedRegs {}
unsafe impl Sync for MappedRegs {}
