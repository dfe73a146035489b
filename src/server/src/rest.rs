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

//! The HTTP+JSON bindings of `google.showcase.v1beta1.SequenceService`.
//!
//! | RPC               | Binding                                              |
//! |-------------------|------------------------------------------------------|
//! | CreateSequence    | `POST /v1beta1/sequences`, body: sequence            |
//! | AttemptSequence   | `POST /v1beta1/sequences/{sequence}`, body: `*`      |
//! | GetSequenceReport | `GET /v1beta1/sequences/{sequence}/sequenceReport`   |
//!
//! A `name` in the `AttemptSequence` body must match the path. Requests that
//! match no binding are `INVALID_ARGUMENT`. Errors use the same JSON envelope
//! as Google Cloud services.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use gax::error::rpc::{Code, Status};
use http::{HeaderMap, StatusCode};
use serde_json::json;
use showcase_sequence::model::{
    AttemptSequenceRequest, CreateSequenceRequest, GetSequenceReportRequest, Sequence,
};
use showcase_sequence::names::{COLLECTION, REPORT_SUFFIX};
use showcase_sequence::{Error, SequenceService};

/// Returns the routes for `service`.
pub fn router(service: SequenceService) -> axum::Router {
    axum::Router::new()
        .route("/v1beta1/sequences", axum::routing::post(create_sequence))
        .route(
            "/v1beta1/sequences/{sequence}",
            axum::routing::post(attempt_sequence),
        )
        .route(
            "/v1beta1/sequences/{sequence}/sequenceReport",
            axum::routing::get(get_sequence_report),
        )
        .fallback(unbound)
        .with_state(service)
}

async fn create_sequence(State(service): State<SequenceService>, body: Bytes) -> Response {
    let sequence = match parse_body::<Sequence>(&body) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let request = CreateSequenceRequest::new().set_sequence(sequence);
    match service.create_sequence(request).await {
        Ok(sequence) => Json(sequence).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn attempt_sequence(
    State(service): State<SequenceService>,
    Path(sequence): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = async {
        let request = attempt_request(&sequence, &body)?;
        let deadline = crate::deadline::from_headers(&headers, service.now())?;
        service.attempt_sequence(request, deadline).await
    };
    match result.await {
        Ok(()) => Json(json!({})).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn get_sequence_report(
    State(service): State<SequenceService>,
    Path(sequence): Path<String>,
) -> Response {
    let request = GetSequenceReportRequest::new()
        .set_name(format!("{COLLECTION}/{sequence}/{REPORT_SUFFIX}"));
    match service.get_sequence_report(request).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Builds the `AttemptSequence` request from the path and the body.
///
/// The body may omit the name, but if present it must match the path.
fn attempt_request(sequence: &str, body: &[u8]) -> Result<AttemptSequenceRequest, Error> {
    let name = format!("{COLLECTION}/{sequence}");
    let request = parse_body::<AttemptSequenceRequest>(body)?;
    if !request.name.is_empty() && request.name != name {
        return Err(Error::InvalidArgument(format!(
            "the name in the request body ({}) does not match the path ({name})",
            request.name
        )));
    }
    Ok(request.set_name(name))
}

async fn unbound(method: http::Method, uri: http::Uri) -> Response {
    let error = Error::InvalidArgument(format!(
        "{method} {} does not match any SequenceService binding",
        uri.path()
    ));
    error_response(&error)
}

/// Parses a JSON request body. An empty body is the default message.
fn parse_body<T>(body: &[u8]) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| Error::InvalidArgument(format!("cannot parse request body: {e}")))
}

fn error_response(error: &Error) -> Response {
    let status = error.status();
    let http_status = http_status(status.code);
    (http_status, Json(error_envelope(&status, http_status))).into_response()
}

fn error_envelope(status: &Status, http_status: StatusCode) -> serde_json::Value {
    let mut error = json!({
        "code": http_status.as_u16(),
        "message": status.message,
        "status": status.code.name(),
    });
    if !status.details.is_empty() {
        error["details"] = json!(status.details);
    }
    json!({ "error": error })
}

/// The HTTP status code for each canonical code.
fn http_status(code: Code) -> StatusCode {
    let status = match code {
        Code::Ok => 200,
        Code::Cancelled => 499,
        Code::Unknown => 500,
        Code::InvalidArgument => 400,
        Code::DeadlineExceeded => 504,
        Code::NotFound => 404,
        Code::AlreadyExists => 409,
        Code::PermissionDenied => 403,
        Code::ResourceExhausted => 429,
        Code::FailedPrecondition => 400,
        Code::Aborted => 409,
        Code::OutOfRange => 400,
        Code::Unimplemented => 501,
        Code::Internal => 500,
        Code::Unavailable => 503,
        Code::DataLoss => 500,
        Code::Unauthenticated => 401,
        _ => 500,
    };
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
