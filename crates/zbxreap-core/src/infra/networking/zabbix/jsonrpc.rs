// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub static JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<&'a str>,
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    pub result: Option<Value>,
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<String>,
}

impl JsonRpcError {
    pub fn describe(&self) -> String {
        match &self.data {
            Some(data) if !data.is_empty() => data.clone(),
            _ => format!("{} (code {})", self.message, self.code),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginParams<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProblemSearch<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProblemGetParams<'a> {
    pub output: [&'static str; 5],
    pub sortfield: &'static str,
    pub sortorder: &'static str,
    pub time_from: i64,
    pub time_till: i64,
    pub search: ProblemSearch<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGetParams<'a> {
    pub output: [&'static str; 1],
    pub select_hosts: [&'static str; 4],
    pub eventids: &'a str,
}

#[derive(Debug, Serialize)]
pub struct HostUpdateParams<'a> {
    pub hostid: &'a str,
    pub status: u8,
}

#[derive(Debug, Default, Serialize)]
pub struct NoParams {}
