// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bring-up and address-translation driver for a PCIe root complex embedded
//! behind an APB register window, as found on system-control processors that
//! must get the host SoC's root ports ready before application software runs.
//!
//! The driver splits into small, independently testable pieces:
//!
//! - [`regs`]: borrowed, word-granular views onto memory-mapped register
//!   blocks (the platform owns the mappings; nothing here allocates).
//! - [`cfgspace`]: Root Port / End Point configuration-space word access,
//!   including the write-enable address quirk root ports require.
//! - [`wait`]: timeout-bounded polling of hardware conditions through an
//!   injected [`wait::Timer`] capability.
//! - [`bringup`]: the PHY → controller-reset → link-training sequence, each
//!   stage gated by its own fixed timeout.
//! - [`outbound`] / [`inbound`]: programming of the AXI↔PCIe translation
//!   descriptor sets.
//! - [`layout`]: the fixed AXI window partitioning for the two external bus
//!   fabrics.
//!
//! Everything is synchronous and single-threaded: the initialization sequence
//! owns the register blocks for the duration of bring-up, and the only
//! blocking point is the wait engine, which is bounded by per-stage budgets.

#[macro_use]
extern crate bitflags;

use thiserror::Error;

pub mod bits;
pub mod bringup;
pub mod cfgspace;
pub mod inbound;
pub mod layout;
pub mod outbound;
pub mod regs;
pub mod wait;

#[cfg(test)]
mod test;

pub use bits::{AtsMode, RegionAttrs, TransType};
pub use bringup::{
    run_stage, BringUp, BringUpParams, RegField, Stage, StageParams,
    TimeoutError,
};
pub use cfgspace::{CfgPort, RpEpConfig};
pub use inbound::InboundRegions;
pub use outbound::{OutboundAttrs, OutboundRegions, Pasid, RequesterId, Tph};
pub use regs::{MappedRegs, RegisterBlock};
pub use wait::{wait_until, Expired, Timer};

/// Invalid-parameter failures: misaligned config-space offsets, inbound BAR
/// selectors outside the hardware's fixed limits, and bring-up stages
/// requested out of order.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("offset {0:#x} is not word aligned")]
    UnalignedOffset(usize),

    #[error("BAR {0} is not a supported inbound BAR")]
    UnsupportedBar(u8),

    #[error("region size {0:#x} cannot be encoded")]
    RegionSize(u64),

    #[error("bring-up stage {requested} requested out of order")]
    OutOfOrderStage { requested: Stage },
}

/// A value exceeds one of the outbound translation hardware's fixed field
/// widths.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("outbound region index {0} out of range")]
    RegionIndex(usize),

    #[error("region size {0:#x} cannot be encoded")]
    RegionSize(u64),

    #[error("traffic class {0} out of range")]
    TrafficClass(u8),

    #[error("processing-hint value {0} wider than 2 bits")]
    ProcessingHint(u8),

    #[error("PASID {0:#x} wider than 20 bits")]
    Pasid(u32),
}

/// Umbrella error for the full initialization sequence. Nothing is retried
/// internally; the first failure propagates to the caller, which decides
/// between abort and platform-level recovery (e.g. power cycle).
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}
