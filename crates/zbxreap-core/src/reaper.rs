// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::backends::{Clock, MonitoringBackend};
use crate::domain::interfaces::{ClockSource, MonitoringApi};
use crate::domain::models::{DisableSummary, ProblemHost, ReaperSettings, RunOutcome};
use crate::domain::selector::get_problem_hosts;
use crate::infra::cli::prompt::{CONFIRMATION_QUESTION, ConfirmationPrompt};
use crate::infra::cli::reporter::ConsoleReporter;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

#[derive(Debug, Error)]
pub enum ReaperError {
    #[error("authentication failed: {0:#}")]
    Authentication(anyhow::Error),

    #[error("run aborted: {0:#}")]
    Aborted(anyhow::Error),
}

pub struct Reaper {
    settings: ReaperSettings,
    monitoring: MonitoringBackend,
    clock: Clock,
    prompt: ConfirmationPrompt,
    reporter: ConsoleReporter,
}

impl Reaper {
    pub(crate) fn new(
        settings: ReaperSettings,
        monitoring: MonitoringBackend,
        clock: Clock,
        prompt: ConfirmationPrompt,
        reporter: ConsoleReporter,
    ) -> Self {
        Self {
            settings,
            monitoring,
            clock,
            prompt,
            reporter,
        }
    }

    /// Runs the whole reaping pass, then logs out no matter how the pass ended.
    ///
    /// Each call to `interruptions` yields a future resolving on the next user interrupt.
    /// When it resolves during the pass, the pending remote call is dropped and the run ends
    /// as [`RunOutcome::Interrupted`]. When it resolves during logout, logout is abandoned.
    pub async fn execute<I, F>(mut self, interruptions: I) -> Result<RunOutcome, ReaperError>
    where
        I: Fn() -> F,
        F: Future<Output = ()>,
    {
        self.reporter.report_reaper_started(&self.settings);

        let outcome = tokio::select! {
            outcome = self.run() => outcome,
            _ = interruptions() => {
                log::info!("[zbxreap.reaper] interrupted by user");
                self.reporter.report_interrupted();
                Ok(RunOutcome::Interrupted)
            }
        };

        match &outcome {
            Err(ReaperError::Authentication(reason)) => self.reporter.report_authentication_failed(reason),
            Err(ReaperError::Aborted(reason)) => self.reporter.report_failure(reason),
            Ok(finished) => log::info!("[zbxreap.reaper] finished with {:?}", finished),
        }

        tokio::select! {
            _ = self.monitoring.logout() => {},
            _ = interruptions() => log::info!("[zbxreap.reaper] logout abandoned by user"),
        }

        outcome
    }

    async fn run(&mut self) -> Result<RunOutcome, ReaperError> {
        self.monitoring
            .authenticate()
            .await
            .map_err(ReaperError::Authentication)?;
        self.reporter.report_authenticated();

        let days_threshold = self.settings.days_threshold;
        self.reporter.report_search_started(days_threshold);

        let problem_hosts = get_problem_hosts(&self.monitoring, days_threshold, self.clock.now())
            .await
            .map_err(ReaperError::Aborted)?;

        if problem_hosts.is_empty() {
            self.reporter.report_nothing_found();
            return Ok(RunOutcome::NothingFound);
        }

        self.reporter.report_problem_hosts(&problem_hosts);

        if self.settings.dry_run {
            self.reporter.report_dry_run();
            return Ok(RunOutcome::DryRun(problem_hosts.len()));
        }

        self.reporter.report_disable_warning(problem_hosts.len());

        let confirmed = self
            .prompt
            .confirm(CONFIRMATION_QUESTION)
            .await
            .map_err(ReaperError::Aborted)?;

        if !confirmed {
            self.reporter.report_cancelled();
            return Ok(RunOutcome::Cancelled);
        }

        let summary = self.disable_hosts(&problem_hosts).await;
        self.reporter.report_disable_summary(&summary);
        Ok(RunOutcome::Disabled(summary))
    }

    async fn disable_hosts(&self, problem_hosts: &[ProblemHost]) -> DisableSummary {
        self.reporter.report_disabling_started();

        let pacing = Duration::from_millis(self.settings.pacing_millis);
        let mut summary = DisableSummary::default();

        for problem_host in problem_hosts {
            match self.monitoring.disable_host(&problem_host.hostid).await {
                Ok(_) => {
                    log::info!("[zbxreap.reaper] disabled host {}", problem_host.hostid);
                    self.reporter.report_host_disabled(problem_host);
                    summary.disabled += 1;
                    sleep(pacing).await;
                },
                Err(incoming) => {
                    log::info!("[zbxreap.reaper] cannot disable host {}", problem_host.hostid);
                    self.reporter.report_host_not_disabled(problem_host, &incoming);
                    summary.failed += 1;
                },
            }
        }

        summary
    }
}
