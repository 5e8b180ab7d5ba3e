// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::interfaces::{ClockSource, MonitoringApi};
use crate::domain::models::{MonitoredHost, Problem, ProblemQuery};
use crate::infra::networking::zabbix::ZabbixClient;
use chrono::{DateTime, Utc};
use serde_json::Value;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex};

pub enum MonitoringBackend {
    Zabbix(ZabbixClient),
    #[cfg(test)]
    Fake(FakeMonitoring),
}

impl MonitoringApi for MonitoringBackend {
    async fn authenticate(&mut self) -> anyhow::Result<()> {
        match self {
            MonitoringBackend::Zabbix(delegate) => MonitoringApi::authenticate(delegate).await,
            #[cfg(test)]
            MonitoringBackend::Fake(fake) => fake.authenticate().await,
        }
    }

    async fn find_problems(&self, query: &ProblemQuery) -> anyhow::Result<Vec<Problem>> {
        match self {
            MonitoringBackend::Zabbix(delegate) => delegate.find_problems(query).await,
            #[cfg(test)]
            MonitoringBackend::Fake(fake) => fake.find_problems(query).await,
        }
    }

    async fn find_event_hosts(&self, event_id: &str) -> anyhow::Result<Vec<MonitoredHost>> {
        match self {
            MonitoringBackend::Zabbix(delegate) => delegate.find_event_hosts(event_id).await,
            #[cfg(test)]
            MonitoringBackend::Fake(fake) => fake.find_event_hosts(event_id).await,
        }
    }

    async fn disable_host(&self, host_id: &str) -> anyhow::Result<Value> {
        match self {
            MonitoringBackend::Zabbix(delegate) => delegate.disable_host(host_id).await,
            #[cfg(test)]
            MonitoringBackend::Fake(fake) => fake.disable_host(host_id).await,
        }
    }

    async fn logout(&mut self) {
        match self {
            MonitoringBackend::Zabbix(delegate) => MonitoringApi::logout(delegate).await,
            #[cfg(test)]
            MonitoringBackend::Fake(fake) => fake.logout().await,
        }
    }
}

pub enum Clock {
    System,
    #[cfg(test)]
    Frozen(DateTime<Utc>),
}

impl ClockSource for Clock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            #[cfg(test)]
            Clock::Frozen(instant) => *instant,
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct FakeMonitoring {
    pub rejects_credentials: bool,
    pub problems: Vec<Problem>,
    pub event_hosts: HashMap<String, Vec<MonitoredHost>>,
    pub broken_events: Vec<String>,
    pub undisableable_hosts: Vec<String>,
    pub stalls_on_logout: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl FakeMonitoring {
    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[cfg(test)]
impl MonitoringApi for FakeMonitoring {
    async fn authenticate(&mut self) -> anyhow::Result<()> {
        self.record("user.login".to_string());
        if self.rejects_credentials {
            anyhow::bail!("user.login failed: Incorrect user name or password");
        }
        Ok(())
    }

    async fn find_problems(&self, query: &ProblemQuery) -> anyhow::Result<Vec<Problem>> {
        self.record(format!("problem.get {}", query.time_till));
        Ok(self.problems.clone())
    }

    async fn find_event_hosts(&self, event_id: &str) -> anyhow::Result<Vec<MonitoredHost>> {
        self.record(format!("event.get {}", event_id));
        if self.broken_events.iter().any(|broken| broken == event_id) {
            anyhow::bail!("event.get failed: Session terminated, re-login, please.");
        }
        Ok(self.event_hosts.get(event_id).cloned().unwrap_or_default())
    }

    async fn disable_host(&self, host_id: &str) -> anyhow::Result<Value> {
        self.record(format!("host.update {}", host_id));
        if self.undisableable_hosts.iter().any(|blocked| blocked == host_id) {
            anyhow::bail!("host.update failed: No permissions to referred object or it does not exist!");
        }
        Ok(serde_json::json!({ "hostids": [host_id] }))
    }

    async fn logout(&mut self) {
        self.record("user.logout".to_string());
        if self.stalls_on_logout {
            std::future::pending::<()>().await
        }
    }
}
