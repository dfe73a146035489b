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

//! Serves the Showcase `SequenceService` over HTTP+JSON.
//!
//! Client library tests start this server, script sequences of responses,
//! and then point their retry loops at it.

pub mod args;
mod deadline;
mod rest;

pub use rest::router;
use showcase_sequence::SequenceService;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Starts the HTTP+JSON server for `service`.
///
/// Returns the endpoint of the server, and a handle for the background task
/// running it.
///
/// # Example
/// ```
/// use showcase_sequence::SequenceService;
/// # async fn test() -> anyhow::Result<()> {
/// // starts a server using a random port.
/// let (endpoint, server) = showcase_server::start("127.0.0.1:0", SequenceService::new()).await?;
/// // ... ... test goes here ... ...
/// # Ok(()) }
/// ```
pub async fn start(
    address: &str,
    service: SequenceService,
) -> anyhow::Result<(String, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    let addr = listener.local_addr()?;
    let app = router(service);
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("server on {addr} terminated: {e}");
        }
    });
    let endpoint = to_uri(addr);
    tracing::info!("SequenceService listening on {endpoint}");
    Ok((endpoint, server))
}

fn to_uri(addr: SocketAddr) -> String {
    if addr.is_ipv6() {
        format!("http://[{}]:{}", addr.ip(), addr.port())
    } else {
        format!("http://{}:{}", addr.ip(), addr.port())
    }
}
