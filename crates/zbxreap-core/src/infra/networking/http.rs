// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use anyhow::Context;
use reqwest::header;
use std::sync::Arc;
use std::time::Duration;

pub type HTTPClient = reqwest::Client;

pub fn create_http_client(timeout_secs: Option<u64>) -> anyhow::Result<Arc<HTTPClient>> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, header::HeaderValue::from_str(&user_agent)?);

    let mut builder = HTTPClient::builder().default_headers(headers);

    if let Some(seconds) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(seconds));
    }

    let client = builder.build().context("[zbxreap.http] cannot build HTTP client")?;
    Ok(Arc::new(client))
}
