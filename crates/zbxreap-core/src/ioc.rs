// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::backends::{Clock, MonitoringBackend};
use crate::domain::models::ReaperSettings;
use crate::infra::cli::prompt::ConfirmationPrompt;
use crate::infra::cli::reporter::ConsoleReporter;
use crate::infra::networking::http::create_http_client;
use crate::infra::networking::zabbix::ZabbixClient;
use crate::reaper::Reaper;

fn monitoring_backend(settings: &ReaperSettings) -> anyhow::Result<MonitoringBackend> {
    let http_client = create_http_client(settings.timeout_secs)?;
    let delegate = ZabbixClient::new(
        &settings.url,
        settings.username.clone(),
        settings.password.clone(),
        http_client,
    );
    log::info!("[zbxreap.ioc] using Zabbix API at {}", delegate.endpoint());
    Ok(MonitoringBackend::Zabbix(delegate))
}

pub fn create_reaper(settings: ReaperSettings) -> anyhow::Result<Reaper> {
    let monitoring = monitoring_backend(&settings)?;
    let reporter = ConsoleReporter::new(settings.use_colors);
    Ok(Reaper::new(
        settings,
        monitoring,
        Clock::System,
        ConfirmationPrompt::Terminal,
        reporter,
    ))
}
