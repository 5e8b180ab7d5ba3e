// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::models::{MonitoredHost, Problem, ProblemQuery};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub trait MonitoringApi {
    async fn authenticate(&mut self) -> anyhow::Result<()>;
    async fn find_problems(&self, query: &ProblemQuery) -> anyhow::Result<Vec<Problem>>;
    async fn find_event_hosts(&self, event_id: &str) -> anyhow::Result<Vec<MonitoredHost>>;
    async fn disable_host(&self, host_id: &str) -> anyhow::Result<Value>;
    async fn logout(&mut self);
}

pub trait ClockSource {
    fn now(&self) -> DateTime<Utc>;
}
