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

use anyhow::bail;
use clap::Parser;
use std::net::IpAddr;

/// Configuration options for the server.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The IP address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    pub address: String,

    /// The port to listen on. Use 0 to pick a random port.
    #[arg(long, default_value_t = 7469)]
    pub port: u16,

    /// The log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validates the arguments after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.address.parse::<IpAddr>().is_err() {
            bail!("invalid address {:?}, must be an IP address", self.address)
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            bail!(
                "invalid log-level {:?}, must be one of trace, debug, info, warn, error",
                self.log_level
            )
        }
        Ok(())
    }

    /// The `address:port` to bind.
    pub fn listen_address(&self) -> String {
        match self.address.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{ip}]:{}", self.port),
            _ => format!("{}:{}", self.address, self.port),
        }
    }
}
