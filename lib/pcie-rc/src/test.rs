// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common test prep: fake register blocks and a fake timer.

use std::cell::{Cell, RefCell};

use slog::{Drain, Logger};

use crate::regs::RegisterBlock;
use crate::wait::Timer;

/// Logger for tests: quiet by default, full terminal output when
/// PCIE_RC_TEST_LOG is set in the environment.
pub(crate) fn test_logger() -> Logger {
    if std::env::var_os("PCIE_RC_TEST_LOG").is_some() {
        let dec = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::FullFormat::new(dec).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        Logger::root(drain, slog::o!())
    } else {
        Logger::root(slog::Discard, slog::o!())
    }
}

/// RAM-backed register block that records every access, so tests can assert
/// both what was programmed and that rejected operations touched nothing.
pub(crate) struct FakeRegs {
    words: RefCell<Vec<u32>>,
    reads: RefCell<Vec<usize>>,
    writes: RefCell<Vec<(usize, u32)>>,
}

impl FakeRegs {
    pub fn new(len_bytes: usize) -> Self {
        assert!(len_bytes % 4 == 0);
        Self {
            words: RefCell::new(vec![0; len_bytes / 4]),
            reads: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Current value at `offset`, without counting as a device access.
    pub fn word(&self, offset: usize) -> u32 {
        self.words.borrow()[offset / 4]
    }

    pub fn set_word(&self, offset: usize, value: u32) {
        self.words.borrow_mut()[offset / 4] = value;
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.writes.borrow().clone()
    }

    pub fn access_count(&self) -> usize {
        self.reads.borrow().len() + self.writes.borrow().len()
    }
}

impl RegisterBlock for FakeRegs {
    fn read32(&self, offset: usize) -> u32 {
        self.reads.borrow_mut().push(offset);
        self.words.borrow()[offset / 4]
    }

    fn write32(&self, offset: usize, value: u32) {
        self.writes.borrow_mut().push((offset, value));
        self.words.borrow_mut()[offset / 4] = value;
    }
}

/// Timer whose clock advances only when the code under test waits.
pub(crate) struct FakeTimer {
    now: Cell<u64>,
}

impl FakeTimer {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }
}

impl Timer for FakeTimer {
    fn now_us(&self) -> u64 {
        self.now.get()
    }

    fn wait_us(&self, us: u64) {
        self.now.set(self.now.get() + us);
    }
}

/// Register block where one status field reads as set only once the paired
/// timer reaches a programmed instant. Models hardware that becomes ready
/// some time into a bring-up stage.
pub(crate) struct TimedRegs<'a> {
    pub inner: FakeRegs,
    pub timer: &'a FakeTimer,
    pub ready_offset: usize,
    pub ready_mask: u32,
    pub ready_at_us: u64,
}

impl RegisterBlock for TimedRegs<'_> {
    fn read32(&self, offset: usize) -> u32 {
        let val = self.inner.read32(offset);
        if offset == self.ready_offset && self.timer.now_us() >= self.ready_at_us
        {
            val | self.ready_mask
        } else {
            val
        }
    }

    fn write32(&self, offset: usize, value: u32) {
        self.inner.write32(offset, value);
    }
}
