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

//! The messages of the `google.showcase.v1beta1.SequenceService`.
//!
//! These types serialize using the proto3 JSON mapping, the same format used
//! by the HTTP+JSON transport of the service.

/// A scripted sequence of responses for a retried RPC.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Sequence {
    /// The resource name, in `sequences/{sequence}` format. Assigned by the
    /// service.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Responses to return in order, one for each attempt. If empty, every
    /// attempt gets an immediate OK.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<sequence::Response>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [name][Sequence::name] field.
    pub fn set_name<T>(mut self, v: T) -> Self
    where
        T: Into<String>,
    {
        self.name = v.into();
        self
    }

    /// Sets the [responses][Sequence::responses] field.
    pub fn set_responses<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<sequence::Response>,
    {
        self.responses = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// Defines messages nested in [Sequence].
pub mod sequence {
    /// The scripted response for a single attempt.
    #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
    #[serde(default, rename_all = "camelCase")]
    #[non_exhaustive]
    pub struct Response {
        /// The status to return. An absent status means OK.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<rpc::model::Status>,

        /// How long to wait before responding. An absent delay means no wait.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub delay: Option<wkt::Duration>,
    }

    impl Response {
        pub fn new() -> Self {
            Self::default()
        }

        /// Sets the [status][Response::status] field.
        pub fn set_status<T>(mut self, v: T) -> Self
        where
            T: Into<rpc::model::Status>,
        {
            self.status = Some(v.into());
            self
        }

        /// Sets the [delay][Response::delay] field.
        pub fn set_delay<T>(mut self, v: T) -> Self
        where
            T: Into<wkt::Duration>,
        {
            self.delay = Some(v.into());
            self
        }
    }
}

/// The attempts received by the service for a [Sequence].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SequenceReport {
    /// The resource name, in `sequences/{sequence}/sequenceReport` format.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The completed attempts, in attempt number order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<sequence_report::Attempt>,
}

impl SequenceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [name][SequenceReport::name] field.
    pub fn set_name<T>(mut self, v: T) -> Self
    where
        T: Into<String>,
    {
        self.name = v.into();
        self
    }

    /// Sets the [attempts][SequenceReport::attempts] field.
    pub fn set_attempts<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<sequence_report::Attempt>,
    {
        self.attempts = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// Defines messages nested in [SequenceReport].
pub mod sequence_report {
    /// Metrics for a single attempt.
    #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
    #[serde(default, rename_all = "camelCase")]
    #[non_exhaustive]
    pub struct Attempt {
        /// The attempt number, starting at 0.
        pub attempt_number: i32,

        /// The deadline the caller set for this attempt, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub attempt_deadline: Option<wkt::Timestamp>,

        /// When the service responded to this attempt.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub response_time: Option<wkt::Timestamp>,

        /// The time between the previous response and the arrival of this
        /// attempt, as perceived by the service. Used to validate the backoff
        /// between attempts.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub attempt_delay: Option<wkt::Duration>,

        /// The status returned to this attempt.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<rpc::model::Status>,
    }

    impl Attempt {
        pub fn new() -> Self {
            Self::default()
        }

        /// Sets the [attempt_number][Attempt::attempt_number] field.
        pub fn set_attempt_number(mut self, v: i32) -> Self {
            self.attempt_number = v;
            self
        }

        /// Sets or clears the [attempt_deadline][Attempt::attempt_deadline] field.
        pub fn set_or_clear_attempt_deadline(mut self, v: Option<wkt::Timestamp>) -> Self {
            self.attempt_deadline = v;
            self
        }

        /// Sets the [response_time][Attempt::response_time] field.
        pub fn set_response_time(mut self, v: wkt::Timestamp) -> Self {
            self.response_time = Some(v);
            self
        }

        /// Sets or clears the [attempt_delay][Attempt::attempt_delay] field.
        pub fn set_or_clear_attempt_delay(mut self, v: Option<wkt::Duration>) -> Self {
            self.attempt_delay = v;
            self
        }

        /// Sets the [status][Attempt::status] field.
        pub fn set_status<T>(mut self, v: T) -> Self
        where
            T: Into<rpc::model::Status>,
        {
            self.status = Some(v.into());
            self
        }
    }
}

/// The request message for `CreateSequence`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateSequenceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
}

impl CreateSequenceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [sequence][CreateSequenceRequest::sequence] field.
    pub fn set_sequence<T>(mut self, v: T) -> Self
    where
        T: Into<Sequence>,
    {
        self.sequence = Some(v.into());
        self
    }
}

/// The request message for `AttemptSequence`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AttemptSequenceRequest {
    /// The sequence name, in `sequences/{sequence}` format.
    pub name: String,
}

impl AttemptSequenceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [name][AttemptSequenceRequest::name] field.
    pub fn set_name<T>(mut self, v: T) -> Self
    where
        T: Into<String>,
    {
        self.name = v.into();
        self
    }
}

/// The request message for `GetSequenceReport`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct GetSequenceReportRequest {
    /// The report name, in `sequences/{sequence}/sequenceReport` format.
    pub name: String,
}

impl GetSequenceReportRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [name][GetSequenceReportRequest::name] field.
    pub fn set_name<T>(mut self, v: T) -> Self
    where
        T: Into<String>,
    {
        self.name = v.into();
        self
    }
}
