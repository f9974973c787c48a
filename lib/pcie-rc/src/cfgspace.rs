// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Word access to Root Port / End Point configuration space.
//!
//! Each access stands alone: no state is kept between calls, no retries are
//! made, and ordering relative to bring-up is the caller's concern (the
//! hardware leaves config accesses before link training undefined).

use crate::bits;
use crate::regs::RegisterBlock;
use crate::ParamError;

/// Which end of the link a configuration window maps.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CfgPort {
    RootPort,
    EndPoint,
}

/// Configuration-space accessor over the APB window of one port.
///
/// For a root port the window must span the write-enable alias: writes go
/// through the access address with [`bits::ROOT_PORT_WRITE_ENABLE`] (bit 21)
/// set, which the hardware requires before it will accept them.
pub struct RpEpConfig<'a> {
    regs: &'a dyn RegisterBlock,
    port: CfgPort,
}

impl<'a> RpEpConfig<'a> {
    pub fn new(regs: &'a dyn RegisterBlock, port: CfgPort) -> Self {
        Self { regs, port }
    }

    fn write_offset(&self, offset: usize) -> usize {
        match self.port {
            CfgPort::RootPort => {
                offset | bits::ROOT_PORT_WRITE_ENABLE as usize
            }
            CfgPort::EndPoint => offset,
        }
    }

    /// Writes one config-space word. Fails on a misaligned offset without
    /// touching the hardware.
    pub fn write_word(
        &self,
        offset: usize,
        value: u32,
    ) -> Result<(), ParamError> {
        if offset % 4 != 0 {
            return Err(ParamError::UnalignedOffset(offset));
        }
        self.regs.write32(self.write_offset(offset), value);
        Ok(())
    }

    /// Reads one config-space word. No write-enable bit is applied on reads.
    pub fn read_word(&self, offset: usize) -> Result<u32, ParamError> {
        if offset % 4 != 0 {
            return Err(ParamError::UnalignedOffset(offset));
        }
        Ok(self.regs.read32(offset))
    }

    /// Patches the class-code word. Run against the root port after link-up
    /// with [`bits::CLASS_CODE_PCI_BRIDGE`] so the root complex enumerates
    /// as a PCI-PCI bridge.
    pub fn set_class_code(&self, class_code: u32) -> Result<(), ParamError> {
        self.write_word(bits::CLASS_CODE_OFFSET, class_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::FakeRegs;

    // Big enough to hold the bit-21 write alias.
    const WINDOW: usize = (1 << 21) + 0x1000;

    #[test]
    fn root_port_write_sets_enable_bit() {
        let regs = FakeRegs::new(WINDOW);
        let cfg = RpEpConfig::new(&regs, CfgPort::RootPort);
        cfg.write_word(0x10, 0xabcd_0123).unwrap();
        assert_eq!(regs.writes(), vec![((1 << 21) | 0x10, 0xabcd_0123)]);
    }

    #[test]
    fn end_point_write_uses_plain_offset() {
        let regs = FakeRegs::new(WINDOW);
        let cfg = RpEpConfig::new(&regs, CfgPort::EndPoint);
        cfg.write_word(0x10, 0x5555_aaaa).unwrap();
        assert_eq!(regs.writes(), vec![(0x10, 0x5555_aaaa)]);
    }

    #[test]
    fn read_never_applies_enable_bit() {
        let regs = FakeRegs::new(WINDOW);
        regs.set_word(0x8, 0x0604_0000);
        let cfg = RpEpConfig::new(&regs, CfgPort::RootPort);
        assert_eq!(cfg.read_word(0x8).unwrap(), 0x0604_0000);
    }

    #[test]
    fn misaligned_offset_rejected_without_access() {
        let regs = FakeRegs::new(WINDOW);
        let cfg = RpEpConfig::new(&regs, CfgPort::RootPort);
        for off in [1usize, 2, 3, 0x11, 0x12, 0x1ff] {
            assert_eq!(
                cfg.write_word(off, 0),
                Err(ParamError::UnalignedOffset(off))
            );
            assert_eq!(
                cfg.read_word(off),
                Err(ParamError::UnalignedOffset(off))
            );
        }
        assert_eq!(regs.access_count(), 0);
    }

    #[test]
    fn class_code_patch() {
        let regs = FakeRegs::new(WINDOW);
        let cfg = RpEpConfig::new(&regs, CfgPort::RootPort);
        cfg.set_class_code(crate::bits::CLASS_CODE_PCI_BRIDGE).unwrap();
        assert_eq!(regs.word((1 << 21) | 0x8), 0x0604_0000);
    }
}
