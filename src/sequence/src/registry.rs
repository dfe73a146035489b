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

//! The in-memory store for sequences and their attempt logs.
//!
//! Each sequence owns its own lock. The registry-wide lock only protects the
//! map from names to sequences, and it is held just long enough to insert or
//! clone an entry.

use crate::model::{Sequence, sequence};
use crate::names::{NameGenerator, SequenceName};
use crate::{Error, Result};
use gax::error::rpc::{Code, Status};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, SystemTime};

/// A validated [sequence::Response].
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedResponse {
    pub status: Status,
    pub delay: Duration,
}

impl PlannedResponse {
    /// The response used when a sequence has no scripted responses.
    pub fn immediate_ok() -> Self {
        Self {
            status: Status::default().set_code(Code::Ok),
            delay: Duration::ZERO,
        }
    }
}

impl TryFrom<&sequence::Response> for PlannedResponse {
    type Error = Error;

    fn try_from(value: &sequence::Response) -> Result<Self> {
        let status = value
            .status
            .as_ref()
            .map(Status::from)
            .unwrap_or_else(|| Status::default().set_code(Code::Ok));
        let delay = match value.delay {
            None => Duration::ZERO,
            Some(d) => Duration::try_from(d).map_err(|_| {
                Error::InvalidArgument(format!(
                    "the response delay must be non-negative, got {}",
                    String::from(d)
                ))
            })?,
        };
        Ok(Self { status, delay })
    }
}

/// One attempt in the log of a sequence.
///
/// The engine pushes a record when an attempt is admitted, and completes it
/// once the attempt responds.
#[derive(Clone, Debug, PartialEq)]
pub struct AttemptRecord {
    pub attempt_number: usize,
    pub attempt_deadline: Option<SystemTime>,
    /// Absent for the first attempt, and when the previous attempt had not
    /// completed when this one arrived.
    pub attempt_delay: Option<Duration>,
    pub completion: Option<Completion>,
}

/// The outcome of a completed attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub response_time: SystemTime,
    pub status: Status,
}

/// The state of a single sequence.
#[derive(Debug)]
pub struct SequenceEntry {
    name: SequenceName,
    sequence: Sequence,
    plan: Vec<PlannedResponse>,
    log: Mutex<Vec<AttemptRecord>>,
}

impl SequenceEntry {
    pub fn name(&self) -> &SequenceName {
        &self.name
    }

    /// The sequence as returned by `CreateSequence`.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The validated responses, in the order they were scripted.
    pub fn plan(&self) -> &[PlannedResponse] {
        &self.plan
    }

    /// Admits a new attempt and returns its attempt number.
    ///
    /// The attempt number, the arrival time, and the delay baseline are all
    /// captured under the sequence lock.
    pub fn admit(
        &self,
        arrival: impl FnOnce() -> SystemTime,
        deadline: Option<SystemTime>,
    ) -> usize {
        let mut log = self.log.lock().expect("sequence attempt log is poisoned");
        let attempt_number = log.len();
        let arrival = arrival();
        let attempt_delay = log
            .last()
            .and_then(|r| r.completion.as_ref())
            .map(|c| arrival.duration_since(c.response_time).unwrap_or_default());
        log.push(AttemptRecord {
            attempt_number,
            attempt_deadline: deadline,
            attempt_delay,
            completion: None,
        });
        attempt_number
    }

    /// Records the outcome of a previously admitted attempt.
    pub fn complete(&self, attempt_number: usize, completion: Completion) {
        let mut log = self.log.lock().expect("sequence attempt log is poisoned");
        match log.get_mut(attempt_number) {
            Some(record) if record.completion.is_none() => record.completion = Some(completion),
            Some(_) => tracing::warn!(
                "attempt {attempt_number} for {} already completed, ignoring {completion:?}",
                self.name
            ),
            None => tracing::warn!(
                "attempt {attempt_number} for {} was never admitted, ignoring {completion:?}",
                self.name
            ),
        }
    }

    /// Returns a copy of the completed attempts, in attempt number order.
    pub fn completed(&self) -> Vec<AttemptRecord> {
        let log = self.log.lock().expect("sequence attempt log is poisoned");
        log.iter()
            .filter(|r| r.completion.is_some())
            .cloned()
            .collect()
    }

    /// The number of admitted attempts, including attempts in progress.
    #[cfg(test)]
    pub(crate) fn admitted(&self) -> usize {
        self.log
            .lock()
            .expect("sequence attempt log is poisoned")
            .len()
    }
}

/// Maps sequence names to their state.
#[derive(Debug, Default)]
pub struct Registry {
    names: NameGenerator,
    sequences: RwLock<HashMap<SequenceName, Arc<SequenceEntry>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new sequence with the given responses.
    ///
    /// Fails with [Error::InvalidArgument] if any delay is negative, in which
    /// case no sequence is created.
    pub fn create(&self, responses: Vec<sequence::Response>) -> Result<Arc<SequenceEntry>> {
        let plan = responses
            .iter()
            .enumerate()
            .map(|(i, r)| {
                PlannedResponse::try_from(r).map_err(|e| match e {
                    Error::InvalidArgument(msg) => {
                        Error::InvalidArgument(format!("invalid response [{i}]: {msg}"))
                    }
                    e => e,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let name = self.names.generate();
        let entry = Arc::new(SequenceEntry {
            sequence: Sequence::new()
                .set_name(name.to_string())
                .set_responses(responses),
            name: name.clone(),
            plan,
            log: Mutex::new(Vec::new()),
        });
        self.sequences
            .write()
            .expect("sequence registry is poisoned")
            .insert(name, entry.clone());
        Ok(entry)
    }

    /// Finds an existing sequence.
    pub fn lookup(&self, name: &SequenceName) -> Result<Arc<SequenceEntry>> {
        self.sequences
            .read()
            .expect("sequence registry is poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("sequence {name} not found")))
    }
}
