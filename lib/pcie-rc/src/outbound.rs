// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound AXI→PCIe translation regions.
//!
//! Each of the 32 regions turns inbound AXI transactions within its window
//! into outbound PCIe transactions of a programmed type. A region is 8
//! consecutive 32-bit registers: the PCIe-side translation address pair,
//! four descriptor words (type/attributes, requester bus, transaction
//! processing hint, PASID prefix), then the AXI-side base address pair. The
//! whole register-set image is written word by word, matching how the
//! hardware documentation presents the set.

use crate::bits::{self, AtsMode, RegionAttrs, TransType};
use crate::regs::RegisterBlock;
use crate::RangeError;

/// Requester-ID source for transactions leaving a region.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RequesterId {
    /// Bus/device/function taken from the incoming AXI address bits.
    #[default]
    FromAxiAddress,
    /// Fixed bus/device/function from the descriptor.
    Fixed { bus: u8, dev: u8, func: u8 },
}

/// Optional PASID TLP prefix carried by a region's transactions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Pasid {
    /// 20-bit process address space ID.
    pub value: u32,
    pub privileged: bool,
    pub execute: bool,
}

/// Optional transaction processing hint carried by a region's transactions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tph {
    pub steering_tag: u8,
    pub index_bit: bool,
    /// 2-bit processing-hint value.
    pub ph_value: u8,
    pub tph_length: bool,
}

/// Everything a region's descriptor words carry besides the transaction
/// type.
#[derive(Copy, Clone, Debug, Default)]
pub struct OutboundAttrs {
    pub attrs: RegionAttrs,
    /// Traffic class, 0..=7.
    pub traffic_class: u8,
    pub ats: AtsMode,
    /// Poison outgoing memory-write TLPs (error-injection paths only).
    pub poison_mem_write: bool,
    pub force_ecrc: bool,
    pub requester_id: RequesterId,
    pub tph: Option<Tph>,
    pub pasid: Option<Pasid>,
}

/// Allocator view over the outbound half of the AXI translation block.
///
/// The allocator programs a descriptor at a given index; choosing the window
/// layout is the product layer's job (see [`crate::layout`]). Regions must
/// not overlap in AXI space; the hardware cannot detect overlap, so that
/// contract stays with the caller.
pub struct OutboundRegions<'a> {
    regs: &'a dyn RegisterBlock,
}

impl<'a> OutboundRegions<'a> {
    pub fn new(regs: &'a dyn RegisterBlock) -> Self {
        Self { regs }
    }

    /// Programs outbound region `index` to translate the `axi_size`-byte
    /// window at `axi_base` into `trans_type` transactions addressed from
    /// `pcie_base`. Both fabrics on this platform map windows identically,
    /// so `pcie_base == axi_base` is the common call; config-type regions
    /// derive bus/device/function from the address and usually translate to
    /// PCIe address zero.
    ///
    /// Nothing is written on failure. Bits [7:0] of both bases are not
    /// representable in the hardware and must be zero-aligned by the caller.
    pub fn setup(
        &self,
        index: usize,
        axi_base: u64,
        axi_size: u64,
        pcie_base: u64,
        trans_type: TransType,
        attrs: &OutboundAttrs,
    ) -> Result<(), RangeError> {
        if index >= bits::OB_REGIONS_MAX {
            return Err(RangeError::RegionIndex(index));
        }
        let num_bits =
            size_bits(axi_size).ok_or(RangeError::RegionSize(axi_size))?;
        if attrs.traffic_class > bits::TRAFFIC_CLASS_MAX {
            return Err(RangeError::TrafficClass(attrs.traffic_class));
        }
        if let Some(t) = attrs.tph {
            if t.ph_value > bits::PH_VALUE_MAX {
                return Err(RangeError::ProcessingHint(t.ph_value));
            }
        }
        if let Some(p) = attrs.pasid {
            if p.value > bits::OB_DESC3_PASID_MASK {
                return Err(RangeError::Pasid(p.value));
            }
        }

        let words: [u32; bits::OB_REGISTER_COUNT] = [
            encode_addr0(pcie_base, num_bits),
            encode_addr1(pcie_base),
            encode_desc0(trans_type, attrs),
            encode_desc1(attrs.requester_id),
            encode_desc2(attrs.tph),
            encode_desc3(attrs.pasid),
            encode_addr0(axi_base, num_bits),
            encode_addr1(axi_base),
        ];
        let base = index * bits::OB_REGISTER_SET_SIZE;
        for (i, word) in words.iter().enumerate() {
            self.regs.write32(base + i * 4, *word);
        }
        Ok(())
    }
}

/// Size-minus-one encoding: a region of 2^(n+1) bytes programs n. Sizes that
/// are not powers of two round up. `None` below the 2-byte minimum.
pub(crate) fn size_bits(size: u64) -> Option<u8> {
    if size < 2 {
        return None;
    }
    // ceil(log2(size)) - 1; tops out at NUM_BITS_MAX for a full 2^64 window.
    Some((63 - (size - 1).leading_zeros()) as u8)
}

pub(crate) fn encode_addr0(addr: u64, num_bits: u8) -> u32 {
    (addr as u32 & bits::ADDR0_ADDR_MASK)
        | (num_bits as u32 & bits::ADDR0_NUM_BITS_MASK)
}

pub(crate) fn encode_addr1(addr: u64) -> u32 {
    (addr >> 32) as u32
}

fn encode_desc0(trans_type: TransType, attrs: &OutboundAttrs) -> u32 {
    let mut word = trans_type as u32 & bits::OB_DESC0_TYPE_MASK;
    word |= attrs.attrs.bits() << bits::OB_DESC0_ATTR_SHIFT;
    word |= (attrs.ats as u32) << bits::OB_DESC0_ATS_SHIFT;
    word |= (attrs.traffic_class as u32) << bits::OB_DESC0_TC_SHIFT;
    if attrs.poison_mem_write {
        word |= bits::OB_DESC0_POISON_MEM_WRITE;
    }
    if attrs.force_ecrc {
        word |= bits::OB_DESC0_FORCE_ECRC;
    }
    match attrs.requester_id {
        RequesterId::FromAxiAddress => {
            word |= bits::OB_DESC0_BUS_DEV_FROM_ADDR_DESC
        }
        RequesterId::Fixed { dev, func, .. } => {
            let devfn = ((dev as u32 & 0x1f) << 3) | (func as u32 & 0x7);
            word |= devfn << bits::OB_DESC0_DEVFN_SHIFT;
        }
    }
    word
}

fn encode_desc1(requester_id: RequesterId) -> u32 {
    match requester_id {
        RequesterId::FromAxiAddress => 0,
        RequesterId::Fixed { bus, .. } => bus as u32 & bits::OB_DESC1_BUS_MASK,
    }
}

fn encode_desc2(tph: Option<Tph>) -> u32 {
    match tph {
        None => 0,
        Some(t) => {
            let mut word = bits::OB_DESC2_TPH_REQ;
            word |= t.steering_tag as u32 & bits::OB_DESC2_STEERING_TAG_MASK;
            if t.index_bit {
                word |= bits::OB_DESC2_INDEX_BIT;
            }
            word |= (t.ph_value as u32 & bits::OB_DESC2_PH_MASK)
                << bits::OB_DESC2_PH_SHIFT;
            if t.tph_length {
                word |= bits::OB_DESC2_TPH_LENGTH;
            }
            word
        }
    }
}

fn encode_desc3(pasid: Option<Pasid>) -> u32 {
    match pasid {
        None => 0,
        Some(p) => {
            let mut word = bits::OB_DESC3_PASID_PRESENT;
            word |= (p.value & bits::OB_DESC3_PASID_MASK)
                << bits::OB_DESC3_PASID_SHIFT;
            if p.privileged {
                word |= bits::OB_DESC3_PRIV_MODE;
            }
            if p.execute {
                word |= bits::OB_DESC3_EXEC_MODE;
            }
            word
        }
    }
}
