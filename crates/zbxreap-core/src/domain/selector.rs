// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::interfaces::MonitoringApi;
use crate::domain::models::{ProblemHost, ProblemQuery, SECONDS_PER_DAY};
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Finds enabled hosts whose agent has been unavailable for at least `days_threshold` days.
///
/// Problems arrive sorted by descending event id and each host keeps the first qualifying
/// problem it shows up in, so the result follows that same order.
pub async fn get_problem_hosts<M: MonitoringApi>(
    monitoring: &M,
    days_threshold: u32,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<ProblemHost>> {
    let threshold_time = now.timestamp() - i64::from(days_threshold) * SECONDS_PER_DAY;

    let query = ProblemQuery::agent_unavailable_until(now);
    let problems = monitoring.find_problems(&query).await?;
    log::info!("[zbxreap.selector] found {} open agent problems", problems.len());

    let old_problems = problems
        .into_iter()
        .filter(|problem| problem.clock <= threshold_time)
        .collect::<Vec<_>>();

    log::info!(
        "[zbxreap.selector] {} problems opened at or before {}",
        old_problems.len(),
        threshold_time
    );

    let mut seen_hosts = HashSet::new();
    let mut problem_hosts = vec![];

    for problem in old_problems {
        let problem_since = DateTime::from_timestamp(problem.clock, 0)
            .with_context(|| format!("event {} has invalid clock {}", problem.eventid, problem.clock))?;

        let hosts = monitoring.find_event_hosts(&problem.eventid).await?;

        for host in hosts {
            if !host.is_enabled() {
                log::info!("[zbxreap.selector] ignoring host {} ({:?})", host.host, host.status);
                continue;
            }

            if seen_hosts.insert(host.hostid.clone()) {
                problem_hosts.push(ProblemHost::new(&host, problem_since, now));
            }
        }
    }

    Ok(problem_hosts)
}
