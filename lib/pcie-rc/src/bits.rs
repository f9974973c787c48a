// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller register layout and field encodings.

#![allow(unused)]

// Offsets of the controller's register groups within the two APB windows.

/// Controller configuration registers, from the per-controller base.
pub const APB_OFFSET_CTRL_REGS: usize = 0x0004_0000;
/// Physical-layer configuration registers, from the per-controller base.
pub const APB_OFFSET_PHY_REGS: usize = 0x0;
/// Root Port / End Point PCIe configuration space, from the global base.
pub const APB_OFFSET_RP_EP_CONFIG_REGS: usize = 0x0;
/// Local management registers, from the global base.
pub const APB_OFFSET_LM_REGS: usize = 0x0010_0000;
/// Root Complex AXI translation registers, from the global base.
pub const APB_OFFSET_RC_AXI_CONFIG_REGS: usize = 0x0040_0000;
/// End Point AXI translation registers, from the global base.
pub const APB_OFFSET_EP_AXI_CONFIG_REGS: usize = 0x0040_0840;

/// The root port's config space cannot be written through its plain base
/// address: bit 21 of the access address must be set for the write to take
/// effect. Reads are not gated.
pub const ROOT_PORT_WRITE_ENABLE: u32 = 1 << 21;

/// Config-space offset of the class-code word.
pub const CLASS_CODE_OFFSET: usize = 0x8;
/// Class code advertising the root complex as a PCI-PCI bridge.
pub const CLASS_CODE_PCI_BRIDGE: u32 = 0x0604_0000;

// Stage timeouts, in microseconds. Link training is an order of magnitude
// slower than the other stages; platforms with tight responsiveness budgets
// should move that wait onto an alarm rather than this blocking poll.
pub const PHY_PLL_LOCK_TIMEOUT_US: u32 = 100;
pub const CTRL_RC_RESET_TIMEOUT_US: u32 = 100;
pub const LINK_TRAINING_TIMEOUT_US: u32 = 20_000;

// Outbound translation: 32 regions of 8 registers each, packed from offset 0
// of the AXI translation block.
pub const OB_REGIONS_MAX: usize = 32;
pub const OB_REGISTER_COUNT: usize = 8;
pub const OB_REGISTER_SET_SIZE: usize = OB_REGISTER_COUNT * 4;

// Inbound translation: 3 regions of 2 registers each, starting at 0x800 from
// the AXI translation block.
pub const IB_REGIONS_MAX: usize = 3;
pub const IB_REGION_REGS_OFFSET: usize = 0x800;
pub const IB_REGISTER_COUNT: usize = 2;
pub const IB_REGISTER_SET_SIZE: usize = IB_REGISTER_COUNT * 4;

/// Highest BAR selector the root port accepts for inbound translation. BARs
/// 0 and 1 are the type-1 header BARs; 2 is the catch-all no-BAR window.
pub const IB_BAR_MAX: u8 = 2;
/// The catch-all window: PCIe accesses matching no BAR.
pub const IB_BAR_NO_BAR: u8 = 2;

// Base-address register pair, shared between outbound and inbound sets.
// addr0[5:0] holds the region size encoded as log2(size) - 1, addr0[31:8]
// holds address bits [31:8] (bits [7:0] of the base are not programmable),
// and addr1 holds address bits [63:32].
pub const ADDR0_NUM_BITS_MASK: u32 = 0x3f;
pub const ADDR0_ADDR_MASK: u32 = 0xffff_ff00;
/// Widest encodable region: 2^64 bytes.
pub const NUM_BITS_MAX: u8 = 63;

/// Transaction type generated by an outbound region, desc0[3:0].
#[derive(Copy, Clone, Debug, Eq, PartialEq, strum::FromRepr)]
#[repr(u8)]
pub enum TransType {
    MemIo = 0x2,
    Io = 0x6,
    ConfigType0 = 0xa,
    ConfigType1 = 0xb,
    Normal = 0xc,
    VendorMessage = 0xd,
}

bitflags! {
    /// PCIe transaction attribute flags carried in desc0[6:4].
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct RegionAttrs: u32 {
        const NO_SNOOP = 0x1;
        const RELAXED_ORDERING = 0x2;
        const ID_BASED_ORDERING = 0x4;
    }
}

/// Address Translation Service mode, desc0[8:7].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, strum::FromRepr)]
#[repr(u8)]
pub enum AtsMode {
    #[default]
    Untranslated = 0,
    TranslationRequest = 1,
    Translated = 2,
}

// Outbound descriptor word 0: type[3:0], attr[6:4], ats[8:7], bits [16:9]
// reserved, traffic class[19:17], poison[20], force-ECRC[21], bit 22
// reserved, requester-ID source[23], device/function[31:24].
pub const OB_DESC0_TYPE_MASK: u32 = 0xf;
pub const OB_DESC0_ATTR_SHIFT: u32 = 4;
pub const OB_DESC0_ATS_SHIFT: u32 = 7;
pub const OB_DESC0_TC_SHIFT: u32 = 17;
/// Poisons memory-write TLPs; reserved for other transaction types.
pub const OB_DESC0_POISON_MEM_WRITE: u32 = 1 << 20;
pub const OB_DESC0_FORCE_ECRC: u32 = 1 << 21;
/// Set: bus/device/function comes from the incoming AXI address (config
/// TLPs) or this descriptor set (memory TLPs). Clear: the device/function
/// field below and the bus field in desc1 are used instead.
pub const OB_DESC0_BUS_DEV_FROM_ADDR_DESC: u32 = 1 << 23;
pub const OB_DESC0_DEVFN_SHIFT: u32 = 24;

// Outbound descriptor word 1: fixed requester bus number.
pub const OB_DESC1_BUS_MASK: u32 = 0xff;

// Outbound descriptor word 2 (transaction processing hint): steering
// tag[7:0], index bit[8], PH value[10:9], TPH length[11], TPH request[12].
pub const OB_DESC2_STEERING_TAG_MASK: u32 = 0xff;
pub const OB_DESC2_INDEX_BIT: u32 = 1 << 8;
pub const OB_DESC2_PH_SHIFT: u32 = 9;
pub const OB_DESC2_PH_MASK: u32 = 0x3;
pub const OB_DESC2_TPH_LENGTH: u32 = 1 << 11;
pub const OB_DESC2_TPH_REQ: u32 = 1 << 12;

// Outbound descriptor word 3 (PASID prefix): present[0], value[20:1],
// privileged[21], execute[22].
pub const OB_DESC3_PASID_PRESENT: u32 = 1 << 0;
pub const OB_DESC3_PASID_SHIFT: u32 = 1;
pub const OB_DESC3_PASID_MASK: u32 = 0xf_ffff;
pub const OB_DESC3_PRIV_MODE: u32 = 1 << 21;
pub const OB_DESC3_EXEC_MODE: u32 = 1 << 22;

pub const TRAFFIC_CLASS_MAX: u8 = 7;
pub const PH_VALUE_MAX: u8 = 3;
