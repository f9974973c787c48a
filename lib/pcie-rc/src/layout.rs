// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed AXI window partitioning for the two external bus fabrics.
//!
//! The SoC exposes two AXI slave apertures, one per fabric: the plain PCIe
//! fabric and the CCIX-capable coherent fabric. Each aperture is carved into
//! ECAM type-0, ECAM type-1, MMIO32 and IO windows at build time; nothing
//! here is computed during bring-up, and the allocators in [`crate::outbound`]
//! take these offsets as plain inputs.

#![allow(unused)]

pub const MIB: u64 = 1 << 20;
pub const GIB: u64 = 1 << 30;

/// ECAM space per bus: 32 devices × 8 functions × 4 KiB of config space.
pub const MAX_ECAM_SPACE_PER_BUS: u64 = MIB;

/// Bus levels reachable with type-0 (local bus) config transactions.
pub const MAX_TYPE0_BUS_LEVELS: u64 = 2;
/// Bus levels reachable with type-1 (forwarded) config transactions.
pub const MAX_TYPE1_BUS_LEVELS: u64 = 8;

pub const AXI_ECAM_TYPE0_SIZE: u64 =
    MAX_TYPE0_BUS_LEVELS * MAX_ECAM_SPACE_PER_BUS;
pub const AXI_ECAM_TYPE1_SIZE: u64 =
    MAX_TYPE1_BUS_LEVELS * MAX_ECAM_SPACE_PER_BUS;

pub const AXI_MMIO64_SIZE: u64 = 128 * GIB;
pub const AXI_MMIO32_SIZE: u64 = 64 * MIB;
pub const AXI_IO_SIZE: u64 = 16 * MIB;

// PCIe fabric aperture: ECAM type-0, type-1, MMIO32, IO packed from offset 0.
pub const PCIE_AXI_ECAM_TYPE0_OFFSET: u64 = 0;
pub const PCIE_AXI_ECAM_TYPE1_OFFSET: u64 =
    PCIE_AXI_ECAM_TYPE0_OFFSET + AXI_ECAM_TYPE0_SIZE;
pub const PCIE_AXI_MMIO32_OFFSET: u64 =
    PCIE_AXI_ECAM_TYPE1_OFFSET + AXI_ECAM_TYPE1_SIZE;
pub const PCIE_AXI_IO_OFFSET: u64 = PCIE_AXI_MMIO32_OFFSET + AXI_MMIO32_SIZE;

// CCIX fabric aperture: the ECAM windows sit 16 MiB in; IO stays at 0.
pub const CCIX_AXI_ECAM_TYPE0_OFFSET: u64 = 16 * MIB;
pub const CCIX_AXI_ECAM_TYPE1_OFFSET: u64 =
    CCIX_AXI_ECAM_TYPE0_OFFSET + AXI_ECAM_TYPE0_SIZE;
pub const CCIX_AXI_MMIO32_OFFSET: u64 =
    CCIX_AXI_ECAM_TYPE1_OFFSET + AXI_ECAM_TYPE1_SIZE;
pub const CCIX_AXI_IO_OFFSET: u64 = 0;

/// Inbound window: the AP's bottom 4 GiB, exposed from AXI address 0.
pub const AXI_IB_REGION_BASE: u64 = 0;
pub const AXI_IB_REGION_SIZE: u64 = 4 * GIB;
