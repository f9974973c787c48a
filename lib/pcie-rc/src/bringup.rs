// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller bring-up: PHY lock, controller reset, link training.
//!
//! The three stages map to independently documented hardware latency classes
//! and independently diagnosable field failures (a PHY that never locks is a
//! different problem from a link that never trains), so each carries its own
//! fixed timeout and surfaces its own tagged error rather than sharing one
//! monolithic budget.

use slog::{info, o, warn, Logger};
use thiserror::Error;

use crate::bits;
use crate::regs::RegisterBlock;
use crate::wait::{wait_until, Timer};
use crate::ParamError;

/// One bring-up stage. Transitions only run forward; a failed stage does not
/// auto-advance or retry.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    Phy,
    Controller,
    LinkTraining,
}

impl Stage {
    pub const fn timeout_us(self) -> u32 {
        match self {
            Stage::Phy => bits::PHY_PLL_LOCK_TIMEOUT_US,
            Stage::Controller => bits::CTRL_RC_RESET_TIMEOUT_US,
            Stage::LinkTraining => bits::LINK_TRAINING_TIMEOUT_US,
        }
    }

    pub(crate) fn next(self) -> Option<Stage> {
        match self {
            Stage::Phy => Some(Stage::Controller),
            Stage::Controller => Some(Stage::LinkTraining),
            Stage::LinkTraining => None,
        }
    }
}

/// A register field: word offset within the controller block plus bit mask.
#[derive(Copy, Clone, Debug)]
pub struct RegField {
    pub offset: usize,
    pub mask: u32,
}

/// Platform description of one stage. Readiness bit positions differ between
/// controller integrations, so they arrive as configuration rather than
/// constants; the timeouts do not (see [`Stage::timeout_us`]).
#[derive(Copy, Clone, Debug)]
pub struct StageParams {
    /// Bits to set to kick the stage off (the root-complex reset pulse);
    /// `None` for stages the hardware enters on its own.
    pub trigger: Option<RegField>,
    /// Field that reads all-ones once the stage has completed.
    pub ready: RegField,
}

/// Per-stage register fields for one controller instance.
#[derive(Copy, Clone, Debug)]
pub struct BringUpParams {
    pub phy: StageParams,
    pub controller: StageParams,
    pub link_training: StageParams,
}

impl BringUpParams {
    pub fn stage(&self, stage: Stage) -> &StageParams {
        match stage {
            Stage::Phy => &self.phy,
            Stage::Controller => &self.controller,
            Stage::LinkTraining => &self.link_training,
        }
    }
}

/// A stage's readiness predicate was not satisfied within its budget.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("{stage} stage not ready within {timeout_us}us")]
pub struct TimeoutError {
    pub stage: Stage,
    pub timeout_us: u32,
}

/// Runs a single bring-up stage against the controller registers: fires the
/// stage's trigger if it has one, then polls its readiness field under the
/// stage's fixed timeout.
///
/// This is the stateless entry point; stage ordering is the caller's
/// responsibility. Each stage touches only its own registers, so an
/// out-of-order call cannot corrupt another stage's state. [`BringUp`] adds
/// ordering enforcement on top.
pub fn run_stage(
    regs: &dyn RegisterBlock,
    timer: &dyn Timer,
    params: &BringUpParams,
    stage: Stage,
) -> Result<(), TimeoutError> {
    let sp = params.stage(stage);
    if let Some(t) = sp.trigger {
        regs.write32(t.offset, regs.read32(t.offset) | t.mask);
    }
    let ready = sp.ready;
    wait_until(timer, stage.timeout_us(), || {
        regs.read32(ready.offset) & ready.mask == ready.mask
    })
    .map_err(|_| TimeoutError { stage, timeout_us: stage.timeout_us() })
}

/// Forward-only bring-up sequencer. Owns the stage cursor for one controller
/// and rejects out-of-order or repeated stage requests before any register
/// is touched.
pub struct BringUp<'a> {
    regs: &'a dyn RegisterBlock,
    timer: &'a dyn Timer,
    params: BringUpParams,
    done: Option<Stage>,
    log: Logger,
}

impl<'a> BringUp<'a> {
    pub fn new(
        regs: &'a dyn RegisterBlock,
        timer: &'a dyn Timer,
        params: BringUpParams,
        log: &Logger,
    ) -> Self {
        Self {
            regs,
            timer,
            params,
            done: None,
            log: log.new(o!("component" => "pcie-bringup")),
        }
    }

    /// Runs `stage`, which must be the next stage in sequence. The call
    /// blocks until the stage completes or its timeout expires; there is no
    /// cancellation mid-stage.
    pub fn run_stage(&mut self, stage: Stage) -> Result<(), crate::Error> {
        let expected = match self.done {
            None => Some(Stage::Phy),
            Some(s) => s.next(),
        };
        if expected != Some(stage) {
            return Err(ParamError::OutOfOrderStage { requested: stage }.into());
        }
        let start = self.timer.now_us();
        match run_stage(self.regs, self.timer, &self.params, stage) {
            Ok(()) => {
                self.done = Some(stage);
                info!(self.log, "bring-up stage complete";
                    "stage" => %stage,
                    "elapsed_us" => self.timer.now_us() - start
                );
                Ok(())
            }
            Err(e) => {
                warn!(self.log, "bring-up stage timed out";
                    "stage" => %stage,
                    "timeout_us" => e.timeout_us
                );
                Err(e.into())
            }
        }
    }

    /// Drives all remaining stages in order, stopping at the first failure.
    pub fn run_to_link_up(&mut self) -> Result<(), crate::Error> {
        let mut next = match self.done {
            None => Some(Stage::Phy),
            Some(s) => s.next(),
        };
        while let Some(stage) = next {
            self.run_stage(stage)?;
            next = stage.next();
        }
        Ok(())
    }

    pub fn is_link_up(&self) -> bool {
        self.done == Some(Stage::LinkTraining)
    }
}
