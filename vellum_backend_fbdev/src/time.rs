// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic clock reads for driving the event loop.

use rustix::time::{ClockId, Timespec, clock_gettime};
use vellum_core::time::HostTime;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// The current `CLOCK_MONOTONIC` time.
#[must_use]
pub fn now() -> HostTime {
    from_timespec(clock_gettime(ClockId::Monotonic))
}

fn from_timespec(ts: Timespec) -> HostTime {
    let secs = u64::try_from(ts.tv_sec).unwrap_or(0);
    let nanos = u64::try_from(ts.tv_nsec).unwrap_or(0).min(999_999_999);
    let total = u128::from(secs) * NANOS_PER_SECOND + u128::from(nanos);
    HostTime(u64::try_from(total).unwrap_or(u64::MAX))
}
