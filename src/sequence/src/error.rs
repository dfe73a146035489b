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

use gax::error::rpc::{Code, Status};

/// The errors returned by the sequence service.
///
/// None of these errors are fatal. Client library tests trigger each of them
/// on purpose, to verify how the client library handles them.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The request or a resource name in it is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The resource name is well-formed, but no such sequence exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller deadline expired before the scripted delay elapsed.
    #[error("the attempt deadline expired before the scripted delay elapsed")]
    DeadlineExceeded,

    /// The sequence scripted a non-OK status for this attempt.
    #[error("scripted status {}: {}", .0.code, .0.message)]
    Scripted(Status),
}

impl Error {
    /// The canonical code for this error.
    pub fn code(&self) -> Code {
        match self {
            Self::InvalidArgument(_) => Code::InvalidArgument,
            Self::NotFound(_) => Code::NotFound,
            Self::DeadlineExceeded => Code::DeadlineExceeded,
            Self::Scripted(s) => s.code,
        }
    }

    /// The [Status] returned to the caller for this error.
    pub fn status(&self) -> Status {
        match self {
            Self::Scripted(s) => s.clone(),
            e => Status::default()
                .set_code(e.code())
                .set_message(e.to_string()),
        }
    }
}
