// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

pub mod backends;
pub mod interfaces;
pub mod models;
pub mod selector;
