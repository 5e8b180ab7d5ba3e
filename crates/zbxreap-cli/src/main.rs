// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use std::process::ExitCode;
use tikv_jemallocator::Jemalloc;
use zbxreap_core::infra::cli;
use zbxreap_core::ioc;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

async fn interruption() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await
    }
}

fn main() -> anyhow::Result<ExitCode> {
    cli::troubleshooting::setup_troubleshooting();
    let settings = cli::parsing::parse_arguments()?;

    let reaper = ioc::create_reaper(settings)?;
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let outcome = runtime.block_on(reaper.execute(interruption));

    // a pending confirmation read must not hold the process
    runtime.shutdown_background();

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
