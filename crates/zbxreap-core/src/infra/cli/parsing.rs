// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::models::ReaperSettings;
use anyhow::{Context, bail};
use clap::Parser;
use url::Url;

pub static DEFAULT_DAYS_THRESHOLD: u32 = 11;
pub static DEFAULT_PACING_MILLIS: u64 = 100;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = false)]
struct CliParser {
    /// Base URL of the Zabbix frontend (e.g. https://zabbix.example.com)
    #[arg(long, env = "ZABBIX_URL")]
    pub url: String,

    /// Zabbix user allowed to update hosts
    #[arg(long, env = "ZABBIX_USERNAME")]
    pub username: String,

    /// Password for the Zabbix user
    #[arg(long, env = "ZABBIX_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Minimum age, in days, of the agent problem
    #[arg(long, env = "ZBXREAP_DAYS", default_value_t = DEFAULT_DAYS_THRESHOLD)]
    pub days: u32,

    /// Actually disable the hosts found (asks for confirmation)
    #[arg(long, default_value_t = false)]
    pub live: bool,

    /// Pause after each disabled host, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PACING_MILLIS)]
    pub pacing_millis: u64,

    /// HTTP timeout for each API call, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Turn off colored output
    #[arg(long, default_value_t = false)]
    pub no_colors: bool,
}

impl CliParser {
    fn into_settings(self) -> anyhow::Result<ReaperSettings> {
        let url = Url::parse(self.url.trim()).with_context(|| format!("zbxreap.cli : invalid url ({})", self.url))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!("zbxreap.cli : url must use http or https ({})", url)
        }

        if self.username.trim().is_empty() {
            bail!("zbxreap.cli : username must not be blank")
        }

        if self.password.is_empty() {
            bail!("zbxreap.cli : password must not be blank")
        }

        if self.timeout_secs == Some(0) {
            bail!("zbxreap.cli : timeout must be at least one second")
        }

        let settings = ReaperSettings {
            url,
            username: self.username,
            password: self.password,
            days_threshold: self.days,
            dry_run: !self.live,
            pacing_millis: self.pacing_millis,
            timeout_secs: self.timeout_secs,
            use_colors: !self.no_colors,
        };

        Ok(settings)
    }
}

pub fn parse_arguments() -> anyhow::Result<ReaperSettings> {
    let cli = CliParser::parse();
    let settings = cli.into_settings()?;
    log::info!("[zbxreap.cli] running with {:?}", settings);
    Ok(settings)
}
