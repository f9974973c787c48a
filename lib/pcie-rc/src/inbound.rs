// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound PCIe→AXI translation regions.
//!
//! Three windows turn PCIe accesses arriving through a root-port BAR into
//! AXI addresses. Each is a base-address register pair (same field layout as
//! the outbound pair) in a block starting at 0x800 from the AXI translation
//! base. The BAR selector is the region index: the set for BAR `n` sits at
//! `0x800 + n * 8`, with BAR 2 acting as the catch-all no-BAR window.

use crate::bits;
use crate::outbound::{encode_addr0, encode_addr1, size_bits};
use crate::regs::RegisterBlock;
use crate::ParamError;

/// Allocator view over the inbound half of the AXI translation block.
///
/// As with outbound regions, overlap between inbound windows is a caller
/// contract; the hardware does not detect it.
pub struct InboundRegions<'a> {
    regs: &'a dyn RegisterBlock,
}

impl<'a> InboundRegions<'a> {
    pub fn new(regs: &'a dyn RegisterBlock) -> Self {
        Self { regs }
    }

    /// Programs the inbound region serving `bar` to map accesses onto the
    /// `axi_size`-byte window at `axi_base`. Nothing is written on failure.
    pub fn setup(
        &self,
        bar: u8,
        axi_base: u64,
        axi_size: u64,
    ) -> Result<(), ParamError> {
        if bar > bits::IB_BAR_MAX {
            return Err(ParamError::UnsupportedBar(bar));
        }
        let num_bits =
            size_bits(axi_size).ok_or(ParamError::RegionSize(axi_size))?;

        let base = bits::IB_REGION_REGS_OFFSET
            + bar as usize * bits::IB_REGISTER_SET_SIZE;
        self.regs.write32(base, encode_addr0(axi_base, num_bits));
        self.regs.write32(base + 4, encode_addr1(axi_base));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::FakeRegs;

    const GIB: u64 = 1 << 30;

    fn regs() -> FakeRegs {
        FakeRegs::new(0x1000)
    }

    #[test]
    fn full_inbound_window() {
        let regs = regs();
        let ib = InboundRegions::new(&regs);
        // The standard platform setup: 4 GiB from AXI address 0 via BAR 0.
        ib.setup(0, 0, 4 * GIB).unwrap();
        // 4 GiB == 2^32, size-minus-one encoding = 31.
        assert_eq!(regs.word(0x800), 31);
        assert_eq!(regs.word(0x804), 0);
        assert_eq!(regs.writes().len(), bits::IB_REGISTER_COUNT);
    }

    #[test]
    fn bar_selects_register_set() {
        let regs = regs();
        let ib = InboundRegions::new(&regs);
        ib.setup(0, 0x1000_0000, GIB).unwrap();
        ib.setup(1, 0x4000_0000, GIB).unwrap();
        ib.setup(bits::IB_BAR_NO_BAR, 0x8_4000_0000, 2 * GIB).unwrap();
        // Each BAR lands in its own register pair.
        assert_eq!(regs.word(0x800), 0x1000_0000 | 29);
        assert_eq!(regs.word(0x808), 0x4000_0000 | 29);
        assert_eq!(regs.word(0x810), 0x4000_0000 | 30);
        assert_eq!(regs.word(0x814), 0x8);
        for (off, _) in regs.writes() {
            assert!((0x800..0x818).contains(&off));
        }
    }

    #[test]
    fn unsupported_bar() {
        let regs = regs();
        let ib = InboundRegions::new(&regs);
        for bar in [3u8, 4, 6, 0xff] {
            assert_eq!(
                ib.setup(bar, 0, GIB),
                Err(ParamError::UnsupportedBar(bar))
            );
        }
        assert_eq!(regs.access_count(), 0);
    }

    #[test]
    fn bad_size_touches_nothing() {
        let regs = regs();
        let ib = InboundRegions::new(&regs);
        assert_eq!(ib.setup(0, 0, 0), Err(ParamError::RegionSize(0)));
        assert_eq!(regs.access_count(), 0);
    }
}
