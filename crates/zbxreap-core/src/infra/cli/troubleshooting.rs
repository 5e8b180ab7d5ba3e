// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use env_logger::{Env, Target};

pub fn setup_troubleshooting() {
    better_panic::install();
    human_panic::setup_panic!();

    // console output belongs to the reporter, diagnostics go to stderr
    env_logger::Builder::from_env(Env::default().default_filter_or("error"))
        .target(Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_level(false)
        .format_file(false)
        .format_target(false)
        .init();
}
