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

use crate::Result;
use crate::clock::{Clock, SystemClock};
use crate::engine::Engine;
use crate::model::{
    AttemptSequenceRequest, CreateSequenceRequest, GetSequenceReportRequest, Sequence,
    SequenceReport,
};
use crate::names::SequenceName;
use crate::registry::Registry;
use std::sync::Arc;
use std::time::SystemTime;

/// Implements the `google.showcase.v1beta1.SequenceService` operations.
///
/// The service keeps all its state in memory. Cloning the service is cheap,
/// and all the clones share the same sequences.
#[derive(Clone, Debug)]
pub struct SequenceService {
    registry: Arc<Registry>,
    engine: Engine,
    clock: Arc<dyn Clock>,
}

impl SequenceService {
    /// Creates a new service using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Creates a new service using a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let registry = Arc::new(Registry::new());
        let engine = Engine::new(registry.clone(), clock.clone());
        Self {
            registry,
            engine,
            clock,
        }
    }

    /// The current time, as seen by the service.
    ///
    /// Transports use this time to convert relative timeouts into deadlines.
    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }

    /// Creates a sequence and returns it with its assigned name.
    ///
    /// A request without a sequence creates a sequence with no responses.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn create_sequence(&self, req: CreateSequenceRequest) -> Result<Sequence> {
        let responses = req.sequence.map(|s| s.responses).unwrap_or_default();
        let count = responses.len();
        let entry = self.registry.create(responses)?;
        tracing::info!("created {} with {count} responses", entry.name());
        Ok(entry.sequence().clone())
    }

    /// Runs one attempt of the sequence.
    ///
    /// `deadline` is the caller deadline, if any, as computed by the transport.
    #[tracing::instrument(level = "debug", skip(self, req), fields(name = %req.name))]
    pub async fn attempt_sequence(
        &self,
        req: AttemptSequenceRequest,
        deadline: Option<SystemTime>,
    ) -> Result<()> {
        let name = SequenceName::parse(&req.name)?;
        self.engine.attempt(&name, deadline).await
    }

    /// Returns the attempts completed so far for a sequence.
    #[tracing::instrument(level = "debug", skip(self, req), fields(name = %req.name))]
    pub async fn get_sequence_report(
        &self,
        req: GetSequenceReportRequest,
    ) -> Result<SequenceReport> {
        let name = SequenceName::parse_report(&req.name)?;
        let entry = self.registry.lookup(&name)?;
        Ok(crate::report::build(&entry))
    }
}

impl Default for SequenceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::model::sequence;
    use gax::error::rpc::Code;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn response(code: Code, delay: Duration) -> sequence::Response {
        sequence::Response::new()
            .set_status(rpc::model::Status::default().set_code(code as i32))
            .set_delay(wkt::Duration::clamp(
                delay.as_secs() as i64,
                delay.subsec_nanos() as i32,
            ))
    }

    fn report_request(sequence: &Sequence) -> GetSequenceReportRequest {
        GetSequenceReportRequest::new().set_name(format!("{}/sequenceReport", sequence.name))
    }

    #[tokio::test(start_paused = true)]
    async fn create_without_sequence() -> anyhow::Result<()> {
        let service = SequenceService::new();
        let got = service.create_sequence(CreateSequenceRequest::new()).await?;
        assert!(got.name.starts_with("sequences/"), "{got:?}");
        assert!(got.responses.is_empty(), "{got:?}");

        service
            .attempt_sequence(AttemptSequenceRequest::new().set_name(&got.name), None)
            .await?;
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn create_echoes_responses() -> anyhow::Result<()> {
        let service = SequenceService::new();
        let responses = vec![
            response(Code::Unavailable, Duration::from_millis(10)),
            sequence::Response::new(),
        ];
        let got = service
            .create_sequence(
                CreateSequenceRequest::new().set_sequence(
                    Sequence::new()
                        .set_name("ignored")
                        .set_responses(responses.clone()),
                ),
            )
            .await?;
        assert_ne!(got.name, "ignored");
        assert_eq!(got.responses, responses);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn create_rejects_negative_delay() {
        let service = SequenceService::new();
        let got = service
            .create_sequence(CreateSequenceRequest::new().set_sequence(
                Sequence::new().set_responses([
                    sequence::Response::new().set_delay(wkt::Duration::clamp(-2, 0)),
                ]),
            ))
            .await;
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_errors() {
        let service = SequenceService::new();
        let got = service
            .attempt_sequence(AttemptSequenceRequest::new().set_name("bad-name"), None)
            .await;
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");

        let got = service
            .attempt_sequence(
                AttemptSequenceRequest::new().set_name("sequences/0/sequenceReport"),
                None,
            )
            .await;
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");

        let got = service
            .attempt_sequence(AttemptSequenceRequest::new().set_name("sequences/404"), None)
            .await;
        assert!(matches!(got, Err(Error::NotFound(_))), "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn report_errors() {
        let service = SequenceService::new();
        let got = service
            .get_sequence_report(GetSequenceReportRequest::new().set_name("sequences/0"))
            .await;
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");

        let got = service
            .get_sequence_report(
                GetSequenceReportRequest::new().set_name("sequences/404/sequenceReport"),
            )
            .await;
        assert!(matches!(got, Err(Error::NotFound(_))), "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn report_after_attempts() -> anyhow::Result<()> {
        let service = SequenceService::new();
        let sequence = service
            .create_sequence(CreateSequenceRequest::new().set_sequence(
                Sequence::new().set_responses([
                    response(Code::Unavailable, Duration::ZERO),
                    response(Code::Ok, Duration::from_millis(100)),
                ]),
            ))
            .await?;

        let report = service.get_sequence_report(report_request(&sequence)).await?;
        assert_eq!(report.name, format!("{}/sequenceReport", sequence.name));
        assert!(report.attempts.is_empty(), "{report:?}");

        let attempt = AttemptSequenceRequest::new().set_name(&sequence.name);
        let got = service.attempt_sequence(attempt.clone(), None).await;
        assert!(
            matches!(got, Err(Error::Scripted(ref s)) if s.code == Code::Unavailable),
            "{got:?}"
        );
        tokio::time::sleep(Duration::from_millis(400)).await;
        service.attempt_sequence(attempt, None).await?;

        let report = service.get_sequence_report(report_request(&sequence)).await?;
        let numbers = report
            .attempts
            .iter()
            .map(|a| a.attempt_number)
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec![0, 1]);
        assert_eq!(report.attempts[0].attempt_delay, None);
        assert_eq!(
            report.attempts[1].attempt_delay,
            Some(wkt::Duration::clamp(0, 400_000_000))
        );
        assert_eq!(
            report.attempts[0].status.as_ref().map(|s| s.code),
            Some(Code::Unavailable as i32)
        );
        assert_eq!(report.attempts[1].status.as_ref().map(|s| s.code), Some(0));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_uses_service_clock() -> anyhow::Result<()> {
        let service = SequenceService::new();
        let sequence = service
            .create_sequence(CreateSequenceRequest::new().set_sequence(
                Sequence::new().set_responses([response(Code::Ok, Duration::from_secs(2))]),
            ))
            .await?;
        let deadline = service.now() + Duration::from_secs(1);
        let got = service
            .attempt_sequence(
                AttemptSequenceRequest::new().set_name(&sequence.name),
                Some(deadline),
            )
            .await;
        assert!(matches!(got, Err(Error::DeadlineExceeded)), "{got:?}");

        let report = service.get_sequence_report(report_request(&sequence)).await?;
        assert_eq!(report.attempts.len(), 1, "{report:?}");
        let attempt = &report.attempts[0];
        assert_eq!(attempt.attempt_deadline, attempt.response_time);
        assert_eq!(
            attempt.status.as_ref().map(|s| s.code),
            Some(Code::DeadlineExceeded as i32)
        );
        Ok(())
    }
}
