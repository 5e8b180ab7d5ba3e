// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt::{Debug, Display, Formatter};
use url::Url;

pub static AGENT_UNAVAILABLE_PROBLEM: &str = "Zabbix agent is not available";

pub static SECONDS_PER_DAY: i64 = 86_400;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Problem {
    pub eventid: String,
    pub name: String,
    #[serde(deserialize_with = "unix_seconds")]
    pub clock: i64,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub objectid: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HostStatus {
    Enabled,
    Disabled,
    Unknown(String),
}

impl From<String> for HostStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "0" => HostStatus::Enabled,
            "1" => HostStatus::Disabled,
            _ => HostStatus::Unknown(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonitoredHost {
    pub hostid: String,
    pub host: String,
    pub name: String,
    pub status: HostStatus,
}

impl MonitoredHost {
    pub fn is_enabled(&self) -> bool {
        self.status == HostStatus::Enabled
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProblemHost {
    pub hostid: String,
    pub host: String,
    pub name: String,
    pub problem_since: DateTime<Utc>,
    pub days_ago: i64,
}

impl ProblemHost {
    pub fn new(host: &MonitoredHost, problem_since: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            hostid: host.hostid.clone(),
            host: host.host.clone(),
            name: host.name.clone(),
            problem_since,
            days_ago: (now - problem_since).num_days(),
        }
    }
}

impl Display for ProblemHost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} ({})", self.host, self.name))
    }
}

/// Window used when asking the monitoring system for open problems.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemQuery {
    pub name: String,
    pub time_from: i64,
    pub time_till: i64,
}

impl ProblemQuery {
    pub fn agent_unavailable_until(now: DateTime<Utc>) -> Self {
        Self {
            name: AGENT_UNAVAILABLE_PROBLEM.to_string(),
            time_from: 0,
            time_till: now.timestamp(),
        }
    }
}

#[derive(Clone)]
pub struct ReaperSettings {
    pub url: Url,
    pub username: String,
    pub password: String,
    pub days_threshold: u32,
    pub dry_run: bool,
    pub pacing_millis: u64,
    pub timeout_secs: Option<u64>,
    pub use_colors: bool,
}

impl Debug for ReaperSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaperSettings")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("days_threshold", &self.days_threshold)
            .field("dry_run", &self.dry_run)
            .field("pacing_millis", &self.pacing_millis)
            .field("timeout_secs", &self.timeout_secs)
            .field("use_colors", &self.use_colors)
            .finish()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisableSummary {
    pub disabled: usize,
    pub failed: usize,
}

impl DisableSummary {
    pub fn total(&self) -> usize {
        self.disabled + self.failed
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    NothingFound,
    DryRun(usize),
    Cancelled,
    Interrupted,
    Disabled(DisableSummary),
}

// Zabbix serializes numeric fields as strings, but older releases and some proxies don't
fn unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Text(String),
        Number(i64),
    }

    match Timestamp::deserialize(deserializer)? {
        Timestamp::Number(seconds) => Ok(seconds),
        Timestamp::Text(raw) => raw.trim().parse::<i64>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::models::{HostStatus, MonitoredHost, Problem, ProblemHost};
    use assertor::{BooleanAssertion, EqualityAssertion};
    use chrono::{DateTime, TimeDelta};

    #[test]
    fn should_parse_problem_with_textual_clock() {
        let raw = r#"
            {
              "eventid": "4021",
              "name": "Zabbix agent is not available (for 3m)",
              "clock": "1700000000",
              "severity": "3",
              "objectid": "23288"
            }
        "#;

        let problem = serde_json::from_str::<Problem>(raw).unwrap();

        assertor::assert_that!(problem.clock).is_equal_to(1_700_000_000_i64);
        assertor::assert_that!(problem.eventid).is_equal_to("4021".to_string());
    }

    #[test]
    fn should_parse_problem_with_numeric_clock() {
        let raw = r#"{ "eventid": "12", "name": "Zabbix agent is not available", "clock": 1650000000 }"#;

        let problem = serde_json::from_str::<Problem>(raw).unwrap();

        assertor::assert_that!(problem.clock).is_equal_to(1_650_000_000_i64);
        assertor::assert_that!(problem.severity.is_empty()).is_true();
    }

    #[test]
    fn should_map_host_status_codes() {
        let raw = r#"
            [
              { "hostid": "10084", "host": "web-01", "name": "Web 01", "status": "0" },
              { "hostid": "10085", "host": "web-02", "name": "Web 02", "status": "1" },
              { "hostid": "10086", "host": "web-03", "name": "Web 03", "status": "3" }
            ]
        "#;

        let hosts = serde_json::from_str::<Vec<MonitoredHost>>(raw).unwrap();
        let statuses = hosts.iter().map(|host| host.status.clone()).collect::<Vec<_>>();

        let expected = vec![
            HostStatus::Enabled,
            HostStatus::Disabled,
            HostStatus::Unknown("3".to_string()),
        ];
        assertor::assert_that!(statuses).is_equal_to(expected);
        assertor::assert_that!(hosts[0].is_enabled()).is_true();
        assertor::assert_that!(hosts[2].is_enabled()).is_false();
    }

    #[test]
    fn should_count_whole_days_since_problem() {
        let host = MonitoredHost {
            hostid: "10084".to_string(),
            host: "web-01".to_string(),
            name: "Web 01".to_string(),
            status: HostStatus::Enabled,
        };

        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let problem_since = now - TimeDelta::days(15) - TimeDelta::hours(23);

        let problem_host = ProblemHost::new(&host, problem_since, now);

        assertor::assert_that!(problem_host.days_ago).is_equal_to(15_i64);
        assertor::assert_that!(problem_host.to_string()).is_equal_to("web-01 (Web 01)".to_string());
    }
}
