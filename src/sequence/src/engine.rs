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

//! Runs attempts against a sequence.
//!
//! Each attempt goes through three steps:
//! 1. Under the sequence lock, claim the next attempt number and capture the
//!    arrival time.
//! 2. Without holding any lock, wait for the scripted delay, or until the
//!    caller deadline if that comes first.
//! 3. Under the sequence lock, record the response time and status.
//!
//! The claimed attempt is owned by a guard. If the caller drops the attempt
//! future during the wait, the guard records the attempt as cancelled, so the
//! log never has gaps.

use crate::clock::Clock;
use crate::names::SequenceName;
use crate::registry::{Completion, PlannedResponse, Registry, SequenceEntry};
use crate::{Error, Result};
use gax::error::rpc::{Code, Status};
use std::sync::Arc;
use std::time::SystemTime;

/// Executes attempts against the sequences in a [Registry].
#[derive(Clone, Debug)]
pub struct Engine {
    registry: Arc<Registry>,
    clock: Arc<dyn Clock>,
}

impl Engine {
    pub fn new(registry: Arc<Registry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Runs one attempt against the sequence called `name`.
    ///
    /// Returns `Ok(())` if the attempt got an OK status, and the scripted
    /// status as [Error::Scripted] otherwise. If `deadline` expires before the
    /// scripted delay, returns [Error::DeadlineExceeded].
    pub async fn attempt(&self, name: &SequenceName, deadline: Option<SystemTime>) -> Result<()> {
        let entry = self.registry.lookup(name)?;
        let claim = Claim::new(entry, self.clock.clone(), deadline);
        let planned = select(claim.entry.plan(), claim.attempt_number);
        tracing::debug!(
            "attempt {} for {name} admitted, scripted {} after {:?}",
            claim.attempt_number,
            planned.status.code,
            planned.delay
        );

        let remaining = deadline.map(|d| d.duration_since(self.clock.now()).unwrap_or_default());
        let (status, expired) = match remaining {
            Some(remaining) if remaining < planned.delay => {
                self.clock.sleep(remaining).await;
                (Error::DeadlineExceeded.status(), true)
            }
            _ => {
                self.clock.sleep(planned.delay).await;
                (planned.status, false)
            }
        };

        let attempt_number = claim.complete(status.clone());
        tracing::debug!(
            "attempt {attempt_number} for {name} completed with {}",
            status.code
        );
        match status.code {
            _ if expired => Err(Error::DeadlineExceeded),
            Code::Ok => Ok(()),
            _ => Err(Error::Scripted(status)),
        }
    }
}

/// Selects the response for the given attempt.
///
/// Sequences without responses always succeed immediately. Attempts past the
/// end of the scripted responses repeat the last response.
pub fn select(plan: &[PlannedResponse], attempt_number: usize) -> PlannedResponse {
    match plan.get(attempt_number).or_else(|| plan.last()) {
        Some(p) => p.clone(),
        None => PlannedResponse::immediate_ok(),
    }
}

/// An admitted attempt that has not completed yet.
#[derive(Debug)]
struct Claim {
    entry: Arc<SequenceEntry>,
    clock: Arc<dyn Clock>,
    attempt_number: usize,
    done: bool,
}

impl Claim {
    fn new(entry: Arc<SequenceEntry>, clock: Arc<dyn Clock>, deadline: Option<SystemTime>) -> Self {
        let attempt_number = entry.admit(|| clock.now(), deadline);
        Self {
            entry,
            clock,
            attempt_number,
            done: false,
        }
    }

    fn complete(mut self, status: Status) -> usize {
        self.record(status);
        self.attempt_number
    }

    fn record(&mut self, status: Status) {
        self.done = true;
        self.entry.complete(
            self.attempt_number,
            Completion {
                response_time: self.clock.now(),
                status,
            },
        );
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        tracing::warn!(
            "attempt {} for {} dropped by the caller before its response",
            self.attempt_number,
            self.entry.name()
        );
        self.record(
            Status::default()
                .set_code(Code::Cancelled)
                .set_message("the caller cancelled the attempt before the scripted delay elapsed"),
        );
    }
}
