// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time sources for the sequence engine.
//!
//! The engine measures the time between attempts and sleeps for the scripted
//! delays. Both operations go through the [Clock] trait, so tests can replace
//! them.

use futures::future::BoxFuture;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Supplies the current time and sleeps.
pub trait Clock: std::fmt::Debug + Send + Sync {
    /// The current wall-clock time.
    fn now(&self) -> SystemTime;

    /// Returns a future that completes after `duration`.
    ///
    /// Dropping the future cancels the sleep.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// A [Clock] backed by the system clock and the `tokio` timer.
///
/// The wall-clock time is sampled once, when the clock is created. After that
/// it advances with the `tokio` monotonic clock, so the time never goes
/// backwards, and tests that pause the `tokio` clock observe exact delays.
#[derive(Clone, Debug)]
pub struct SystemClock {
    wall: SystemTime,
    start: tokio::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            wall: SystemTime::now(),
            start: tokio::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        self.wall + self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Converts a [SystemTime] to the well-known timestamp type.
pub(crate) fn to_timestamp(time: SystemTime) -> wkt::Timestamp {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => wkt::Timestamp::clamp(
            i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
            d.subsec_nanos() as i32,
        ),
        Err(e) => {
            let d = e.duration();
            wkt::Timestamp::clamp(
                -i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
                -(d.subsec_nanos() as i32),
            )
        }
    }
}

/// Converts a [Duration] to the well-known duration type.
pub(crate) fn to_duration(duration: Duration) -> wkt::Duration {
    wkt::Duration::clamp(
        i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
        duration.subsec_nanos() as i32,
    )
}
