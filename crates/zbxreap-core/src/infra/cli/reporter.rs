// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::models::{DisableSummary, ProblemHost, ReaperSettings};
use comfy_table::Table;
use console::{StyledObject, style};

#[derive(Default)]
pub struct ConsoleReporter {
    use_colors: bool,
}

impl ConsoleReporter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn report_reaper_started(&self, settings: &ReaperSettings) {
        let mode = match settings.dry_run {
            true => self.yellow("DRY RUN"),
            false => self.red("LIVE"),
        };

        println!();
        println!("Zabbix hosts reaper");
        println!();
        println!("• target : {}", self.cyan(settings.url.as_str()));
        println!("• threshold : {} days", self.cyan(settings.days_threshold));
        println!("• mode : {}", mode);
    }

    pub fn report_authenticated(&self) {
        println!();
        println!("{} Authenticated with Zabbix API", self.green("✓"));
    }

    pub fn report_authentication_failed(&self, reason: &anyhow::Error) {
        println!();
        println!("{} Authentication failed : {:#}", self.red("✗"), reason);
    }

    pub fn report_search_started(&self, days_threshold: u32) {
        println!();
        println!(
            "Searching for hosts with agent problems older than {} days ...",
            days_threshold
        );
    }

    pub fn report_nothing_found(&self) {
        println!();
        println!(
            "{} No hosts found with agent problems older than threshold",
            self.green("✓")
        );
        println!();
    }

    pub fn report_problem_hosts(&self, problem_hosts: &[ProblemHost]) {
        println!();
        println!(
            "Found {} hosts with agent issues : ",
            self.cyan(problem_hosts.len())
        );
        println!();

        let mut table = Table::new();
        table.set_header(vec!["Host ID", "Hostname", "Display Name", "Days Ago"]);
        problem_hosts.iter().for_each(|problem_host| {
            let row = vec![
                problem_host.hostid.clone(),
                problem_host.host.clone(),
                problem_host.name.clone(),
                problem_host.days_ago.to_string(),
            ];

            table.add_row(row);
        });

        println!("{table}");
    }

    pub fn report_dry_run(&self) {
        println!();
        println!("{}", self.yellow("DRY RUN MODE : no hosts will be disabled"));
        println!("Run again with --live to actually disable these hosts");
        println!();
    }

    pub fn report_disable_warning(&self, total_hosts: usize) {
        println!();
        println!("{}", self.yellow(format!("About to disable {} hosts!", total_hosts)));
    }

    pub fn report_cancelled(&self) {
        println!();
        println!("Operation cancelled");
        println!();
    }

    pub fn report_disabling_started(&self) {
        println!();
        println!("Disabling hosts ...");
        println!();
    }

    pub fn report_host_disabled(&self, problem_host: &ProblemHost) {
        println!("{} Disabled : {}", self.green("✓"), problem_host);
    }

    pub fn report_host_not_disabled(&self, problem_host: &ProblemHost, reason: &anyhow::Error) {
        println!(
            "{} Failed to disable {} : {:#}",
            self.red("✗"),
            problem_host.host,
            reason
        );
    }

    pub fn report_disable_summary(&self, summary: &DisableSummary) {
        println!();
        println!("Summary : ");
        println!();
        println!("• successfully disabled : {}", self.cyan(summary.disabled));
        println!("• errors : {}", self.red(summary.failed));
        println!("• total processed : {}", self.cyan(summary.total()));
        println!();
    }

    pub fn report_interrupted(&self) {
        println!();
        println!();
        println!("{}", self.yellow("Operation interrupted by user"));
    }

    pub fn report_failure(&self, reason: &anyhow::Error) {
        println!();
        println!("{} Run failed : {:#}", self.red("✗"), reason);
    }

    fn cyan<T>(&self, what: T) -> StyledObject<T> {
        match self.use_colors {
            true => style(what).cyan(),
            false => style(what),
        }
    }

    fn green<T>(&self, what: T) -> StyledObject<T> {
        match self.use_colors {
            true => style(what).green(),
            false => style(what),
        }
    }

    fn yellow<T>(&self, what: T) -> StyledObject<T> {
        match self.use_colors {
            true => style(what).yellow(),
            false => style(what),
        }
    }

    fn red<T>(&self, what: T) -> StyledObject<T> {
        match self.use_colors {
            true => style(what).red(),
            false => style(what),
        }
    }
}
