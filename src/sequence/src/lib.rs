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

//! The retry-sequence simulation engine behind the Showcase `SequenceService`.
//!
//! Client library tests use this service to verify their retry loops. A test
//! creates a [Sequence][model::Sequence] with a scripted list of responses,
//! each a status and a delay. Every call to `AttemptSequence` consumes the next
//! response: the service waits for the scripted delay and then returns the
//! scripted status. Once the list is exhausted the last response repeats.
//!
//! The service records the timing of each attempt, and the test fetches these
//! records as a [SequenceReport][model::SequenceReport] to verify the backoff
//! between attempts.
//!
//! # Example
//! ```
//! use showcase_sequence::SequenceService;
//! use showcase_sequence::model::*;
//! # async fn sample() -> showcase_sequence::Result<()> {
//! let service = SequenceService::new();
//! let sequence = service
//!     .create_sequence(CreateSequenceRequest::new().set_sequence(
//!         Sequence::new().set_responses([sequence::Response::new()
//!             .set_status(rpc::model::Status::default().set_code(10))]),
//!     ))
//!     .await?;
//! let attempt = service
//!     .attempt_sequence(AttemptSequenceRequest::new().set_name(&sequence.name), None)
//!     .await;
//! assert!(attempt.is_err());
//! let report = service
//!     .get_sequence_report(
//!         GetSequenceReportRequest::new().set_name(format!("{}/sequenceReport", sequence.name)),
//!     )
//!     .await?;
//! assert_eq!(report.attempts.len(), 1);
//! # Ok(()) }
//! ```

/// An alias of [std::result::Result] where the error is always [Error].
pub type Result<T> = std::result::Result<T, Error>;

pub mod clock;
pub mod engine;
mod error;
pub mod model;
pub mod names;
pub mod registry;
mod report;
mod service;

pub use error::Error;
pub use service::SequenceService;
