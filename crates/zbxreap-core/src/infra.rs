// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

pub mod cli;

pub mod networking;
