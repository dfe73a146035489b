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

//! Computes the caller deadline from the request headers.
//!
//! gRPC-aware clients send the `grpc-timeout` header, HTTP+JSON clients may
//! send `x-server-timeout` with the timeout in seconds.

use http::HeaderMap;
use showcase_sequence::Error;
use std::time::{Duration, SystemTime};

pub const GRPC_TIMEOUT: &str = "grpc-timeout";
pub const SERVER_TIMEOUT: &str = "x-server-timeout";

/// Returns the deadline for the request, if the caller set one.
///
/// If both headers are present the earliest deadline wins.
pub fn from_headers(headers: &HeaderMap, now: SystemTime) -> Result<Option<SystemTime>, Error> {
    let grpc = header(headers, GRPC_TIMEOUT)?
        .map(parse_grpc_timeout)
        .transpose()?;
    let server = header(headers, SERVER_TIMEOUT)?
        .map(parse_server_timeout)
        .transpose()?;
    let timeout = match (grpc, server) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    timeout
        .map(|t| {
            now.checked_add(t).ok_or_else(|| {
                Error::InvalidArgument(format!("the request timeout {t:?} is out of range"))
            })
        })
        .transpose()
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, Error> {
    headers
        .get(name)
        .map(|v| {
            v.to_str()
                .map_err(|e| Error::InvalidArgument(format!("invalid {name} header: {e}")))
        })
        .transpose()
}

/// Parses a timeout in the gRPC format: up to 8 digits and a unit.
fn parse_grpc_timeout(value: &str) -> Result<Duration, Error> {
    let invalid = || Error::InvalidArgument(format!("invalid {GRPC_TIMEOUT} header: {value:?}"));
    let split = value.len().checked_sub(1).ok_or_else(invalid)?;
    let (digits, unit) = value.split_at_checked(split).ok_or_else(invalid)?;
    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let count = digits.parse::<u64>().map_err(|_| invalid())?;
    let timeout = match unit {
        "H" => Duration::from_secs(count * 3600),
        "M" => Duration::from_secs(count * 60),
        "S" => Duration::from_secs(count),
        "m" => Duration::from_millis(count),
        "u" => Duration::from_micros(count),
        "n" => Duration::from_nanos(count),
        _ => return Err(invalid()),
    };
    Ok(timeout)
}

/// Parses a timeout in decimal seconds, such as `1.5`.
fn parse_server_timeout(value: &str) -> Result<Duration, Error> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
        .ok_or_else(|| {
            Error::InvalidArgument(format!("invalid {SERVER_TIMEOUT} header: {value:?}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use std::time::UNIX_EPOCH;
    use test_case::test_case;

    #[test_case("1H", Duration::from_secs(3600))]
    #[test_case("2M", Duration::from_secs(120))]
    #[test_case("3S", Duration::from_secs(3))]
    #[test_case("250m", Duration::from_millis(250))]
    #[test_case("7u", Duration::from_micros(7))]
    #[test_case("99999999n", Duration::from_nanos(99_999_999))]
    fn grpc_timeout(input: &str, want: Duration) -> anyhow::Result<()> {
        assert_eq!(parse_grpc_timeout(input)?, want);
        Ok(())
    }

    #[test_case(""; "empty")]
    #[test_case("S"; "no digits")]
    #[test_case("100"; "no unit")]
    #[test_case("100s"; "bad unit")]
    #[test_case("123456789S"; "too many digits")]
    #[test_case("-1S"; "negative")]
    #[test_case("1.5S"; "fractional")]
    #[test_case("1€"; "multibyte unit")]
    fn grpc_timeout_error(input: &str) {
        let got = parse_grpc_timeout(input);
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");
    }

    #[test_case("1", Duration::from_secs(1))]
    #[test_case("0.25", Duration::from_millis(250))]
    #[test_case(" 2 ", Duration::from_secs(2))]
    fn server_timeout(input: &str, want: Duration) -> anyhow::Result<()> {
        assert_eq!(parse_server_timeout(input)?, want);
        Ok(())
    }

    #[test_case("abc")]
    #[test_case("-1")]
    #[test_case("NaN")]
    #[test_case("inf")]
    fn server_timeout_error(input: &str) {
        let got = parse_server_timeout(input);
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");
    }

    #[test]
    fn no_headers() -> anyhow::Result<()> {
        let got = from_headers(&HeaderMap::new(), UNIX_EPOCH)?;
        assert_eq!(got, None);
        Ok(())
    }

    #[test_case(Some("5S"), None, Duration::from_secs(5))]
    #[test_case(None, Some("1.5"), Duration::from_millis(1500))]
    #[test_case(Some("5S"), Some("1.5"), Duration::from_millis(1500); "server earlier")]
    #[test_case(Some("100m"), Some("1.5"), Duration::from_millis(100); "grpc earlier")]
    fn deadline(
        grpc: Option<&'static str>,
        server: Option<&'static str>,
        want: Duration,
    ) -> anyhow::Result<()> {
        let mut headers = HeaderMap::new();
        if let Some(v) = grpc {
            headers.insert(GRPC_TIMEOUT, HeaderValue::from_static(v));
        }
        if let Some(v) = server {
            headers.insert(SERVER_TIMEOUT, HeaderValue::from_static(v));
        }
        let now = UNIX_EPOCH + Duration::from_secs(1_000);
        let got = from_headers(&headers, now)?;
        assert_eq!(got, Some(now + want));
        Ok(())
    }

    #[test_case(SERVER_TIMEOUT, "1e19")]
    #[test_case(SERVER_TIMEOUT, "1e300")]
    fn timeout_out_of_range(name: &'static str, value: &'static str) {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        let got = from_headers(&headers, SystemTime::now());
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");
    }

    #[test]
    fn malformed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(GRPC_TIMEOUT, HeaderValue::from_static("soon"));
        let got = from_headers(&headers, UNIX_EPOCH);
        assert!(matches!(got, Err(Error::InvalidArgument(_))), "{got:?}");
    }
}
