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

//! Runs the Showcase `SequenceService` as a standalone HTTP+JSON server.

use anyhow::Result;
use clap::Parser;
use showcase_sequence::SequenceService;
use showcase_server::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    enable_tracing(&args)?;
    tracing::info!("Configuration: {args:?}");

    let (endpoint, server) =
        showcase_server::start(&args.listen_address(), SequenceService::new()).await?;
    tracing::info!("serving on {endpoint}, press Ctrl-C to stop");
    tokio::select! {
        r = server => r?,
        r = tokio::signal::ctrl_c() => {
            r?;
            tracing::info!("shutting down");
        }
    }
    Ok(())
}

fn enable_tracing(args: &Args) -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::format::FmtSpan;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
