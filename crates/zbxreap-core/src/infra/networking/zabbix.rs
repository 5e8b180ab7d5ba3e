// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

pub mod jsonrpc;

use crate::domain::interfaces::MonitoringApi;
use crate::domain::models::{MonitoredHost, Problem, ProblemQuery};
use crate::infra::networking::http::HTTPClient;
use crate::infra::networking::zabbix::jsonrpc::{
    EventGetParams, HostUpdateParams, JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, LoginParams, NoParams,
    ProblemGetParams, ProblemSearch,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use url::Url;

pub static ZABBIX_API_PATH: &str = "api_jsonrpc.php";

static HOST_STATUS_DISABLED: u8 = 1;

#[derive(Debug, Error)]
pub enum ZabbixApiError {
    #[error("{method} requires an authenticated session")]
    NotAuthenticated { method: String },

    #[error("{method} could not reach the server: {source}")]
    Transport { method: String, source: reqwest::Error },

    #[error("{method} failed with HTTP status {status}")]
    HttpStatus { method: String, status: StatusCode },

    #[error("{method} returned an unexpected payload: {source}")]
    Decoding { method: String, source: serde_json::Error },

    #[error("{method} failed: {message}")]
    Remote { method: String, message: String },
}

#[derive(Debug, Deserialize)]
struct EventWithHosts {
    #[serde(default)]
    hosts: Vec<MonitoredHost>,
}

pub struct ZabbixClient {
    endpoint: String,
    username: String,
    password: String,
    http_client: Arc<HTTPClient>,
    auth_token: Option<String>,
    request_ids: AtomicU64,
}

impl ZabbixClient {
    pub fn new(base_url: &Url, username: String, password: String, http_client: Arc<HTTPClient>) -> Self {
        let endpoint = format!("{}/{}", base_url.as_str().trim_end_matches('/'), ZABBIX_API_PATH);

        Self {
            endpoint,
            username,
            password,
            http_client,
            auth_token: None,
            request_ids: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    pub async fn authenticate(&mut self) -> Result<(), ZabbixApiError> {
        let params = LoginParams {
            username: &self.username,
            password: &self.password,
        };

        let token = self.post::<_, String>("user.login", params, None).await?;
        log::info!("[zbxreap.api] authenticated against {}", self.endpoint);
        self.auth_token = Some(token);
        Ok(())
    }

    pub async fn call<P, R>(&self, method: &str, params: P) -> Result<R, ZabbixApiError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let Some(token) = self.auth_token.as_deref() else {
            return Err(ZabbixApiError::NotAuthenticated {
                method: method.to_string(),
            });
        };

        self.post(method, params, Some(token)).await.inspect_err(|incoming| {
            log::warn!("[zbxreap.api] call failed for {} : {}", method, incoming);
        })
    }

    pub async fn logout(&mut self) {
        if !self.is_authenticated() {
            return;
        }

        match self.call::<_, Value>("user.logout", NoParams::default()).await {
            Ok(_) => log::info!("[zbxreap.api] logged out from {}", self.endpoint),
            Err(incoming) => log::debug!("[zbxreap.api] ignoring logout failure : {}", incoming),
        }

        self.auth_token = None;
    }

    pub async fn problem_get(&self, query: &ProblemQuery) -> Result<Vec<Problem>, ZabbixApiError> {
        // problem.get only accepts eventid as sort field
        let params = ProblemGetParams {
            output: ["eventid", "name", "clock", "severity", "objectid"],
            sortfield: "eventid",
            sortorder: "DESC",
            time_from: query.time_from,
            time_till: query.time_till,
            search: ProblemSearch { name: &query.name },
        };

        self.call("problem.get", params).await
    }

    pub async fn event_hosts(&self, event_id: &str) -> Result<Vec<MonitoredHost>, ZabbixApiError> {
        let params = EventGetParams {
            output: ["eventid"],
            select_hosts: ["hostid", "host", "name", "status"],
            eventids: event_id,
        };

        let events = self.call::<_, Vec<EventWithHosts>>("event.get", params).await?;
        let hosts = events.into_iter().flat_map(|event| event.hosts).collect();
        Ok(hosts)
    }

    pub async fn host_disable(&self, host_id: &str) -> Result<Value, ZabbixApiError> {
        let params = HostUpdateParams {
            hostid: host_id,
            status: HOST_STATUS_DISABLED,
        };

        self.call("host.update", params).await
    }

    async fn post<P, R>(&self, method: &str, params: P, auth: Option<&str>) -> Result<R, ZabbixApiError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            auth,
            id: self.request_ids.fetch_add(1, Ordering::Relaxed),
        };

        log::debug!("[zbxreap.api] sending {} (id = {})", method, request.id);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|source| ZabbixApiError::Transport {
                method: method.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZabbixApiError::HttpStatus {
                method: method.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| ZabbixApiError::Transport {
            method: method.to_string(),
            source,
        })?;

        let envelope = serde_json::from_str::<JsonRpcResponse>(&body).map_err(|source| ZabbixApiError::Decoding {
            method: method.to_string(),
            source,
        })?;

        if let Some(error) = envelope.error {
            return Err(ZabbixApiError::Remote {
                method: method.to_string(),
                message: error.describe(),
            });
        }

        let result = envelope.result.unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|source| ZabbixApiError::Decoding {
            method: method.to_string(),
            source,
        })
    }
}

impl MonitoringApi for ZabbixClient {
    async fn authenticate(&mut self) -> anyhow::Result<()> {
        Ok(ZabbixClient::authenticate(self).await?)
    }

    async fn find_problems(&self, query: &ProblemQuery) -> anyhow::Result<Vec<Problem>> {
        Ok(self.problem_get(query).await?)
    }

    async fn find_event_hosts(&self, event_id: &str) -> anyhow::Result<Vec<MonitoredHost>> {
        Ok(self.event_hosts(event_id).await?)
    }

    async fn disable_host(&self, host_id: &str) -> anyhow::Result<Value> {
        Ok(self.host_disable(host_id).await?)
    }

    async fn logout(&mut self) {
        ZabbixClient::logout(self).await
    }
}
