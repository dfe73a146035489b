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

use crate::clock::{to_duration, to_timestamp};
use crate::model::{SequenceReport, sequence_report};
use crate::registry::{AttemptRecord, SequenceEntry};
use gax::error::rpc::Status;

/// Builds the report for a sequence from its completed attempts.
///
/// Attempts still waiting for their scripted delay are not included.
pub(crate) fn build(entry: &SequenceEntry) -> SequenceReport {
    SequenceReport::new()
        .set_name(entry.name().report_name())
        .set_attempts(entry.completed().iter().filter_map(attempt))
}

fn attempt(record: &AttemptRecord) -> Option<sequence_report::Attempt> {
    let completion = record.completion.as_ref()?;
    let attempt = sequence_report::Attempt::new()
        .set_attempt_number(i32::try_from(record.attempt_number).unwrap_or(i32::MAX))
        .set_or_clear_attempt_deadline(record.attempt_deadline.map(to_timestamp))
        .set_response_time(to_timestamp(completion.response_time))
        .set_or_clear_attempt_delay(record.attempt_delay.map(to_duration))
        .set_status(to_rpc_status(&completion.status));
    Some(attempt)
}

fn to_rpc_status(status: &Status) -> rpc::model::Status {
    rpc::model::Status::default()
        .set_code(status.code as i32)
        .set_message(status.message.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Completion, Registry};
    use gax::error::rpc::Code;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn empty() -> anyhow::Result<()> {
        let registry = Registry::new();
        let entry = registry.create(Vec::new())?;
        let got = build(&entry);
        assert_eq!(
            got,
            SequenceReport::new().set_name(format!("{}/sequenceReport", entry.name()))
        );
        Ok(())
    }

    #[test]
    fn completed_attempts() -> anyhow::Result<()> {
        let registry = Registry::new();
        let entry = registry.create(Vec::new())?;
        let t0 = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let deadline = t0 + Duration::from_secs(5);

        entry.admit(|| t0, Some(deadline));
        entry.complete(
            0,
            Completion {
                response_time: t0 + Duration::from_millis(100),
                status: Status::default()
                    .set_code(Code::Unavailable)
                    .set_message("try again"),
            },
        );
        entry.admit(|| t0 + Duration::from_millis(350), None);
        entry.complete(
            1,
            Completion {
                response_time: t0 + Duration::from_millis(350),
                status: Status::default().set_code(Code::Ok),
            },
        );
        // Still in progress, not reported.
        entry.admit(|| t0 + Duration::from_secs(1), None);

        let got = build(&entry);
        let want = SequenceReport::new()
            .set_name(entry.name().report_name())
            .set_attempts([
                sequence_report::Attempt::new()
                    .set_attempt_number(0)
                    .set_or_clear_attempt_deadline(Some(wkt::Timestamp::clamp(
                        1_700_000_005,
                        0,
                    )))
                    .set_response_time(wkt::Timestamp::clamp(1_700_000_000, 100_000_000))
                    .set_status(
                        rpc::model::Status::default()
                            .set_code(Code::Unavailable as i32)
                            .set_message("try again"),
                    ),
                sequence_report::Attempt::new()
                    .set_attempt_number(1)
                    .set_response_time(wkt::Timestamp::clamp(1_700_000_000, 350_000_000))
                    .set_or_clear_attempt_delay(Some(wkt::Duration::clamp(0, 250_000_000)))
                    .set_status(rpc::model::Status::default()),
            ]);
        assert_eq!(got, want);
        Ok(())
    }
}
