// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Timeout-bounded polling of hardware conditions.

use thiserror::Error;

/// Timer capability injected by the platform. The driver never sleeps or
/// reads a clock on its own; both go through this trait so bring-up can be
/// driven with a fake timer in tests and with whatever alarm service the
/// platform provides in production.
pub trait Timer {
    /// Current monotonic time, in microseconds.
    fn now_us(&self) -> u64;

    /// Give up the CPU for roughly `us` microseconds.
    fn wait_us(&self, us: u64);
}

/// Spacing between predicate polls.
const POLL_INTERVAL_US: u64 = 1;

/// The polled condition did not come true within its budget.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("condition not met within timeout")]
pub struct Expired;

/// Polls `ready` until it returns true or `timeout_us` elapses.
///
/// Returns on the first true poll, including immediately if the condition
/// already holds. Between polls the calling context yields to `timer`, so a
/// single call blocks for at most the timeout (one final poll is made once
/// the deadline is reached). There is no partial result and no cancellation:
/// each call is a single pass/fail signal.
pub fn wait_until<F>(
    timer: &dyn Timer,
    timeout_us: u32,
    mut ready: F,
) -> Result<(), Expired>
where
    F: FnMut() -> bool,
{
    let deadline = timer.now_us().saturating_add(timeout_us as u64);
    loop {
        if ready() {
            return Ok(());
        }
        if timer.now_us() >= deadline {
            return Err(Expired);
        }
        timer.wait_us(POLL_INTERVAL_US);
    }
}
