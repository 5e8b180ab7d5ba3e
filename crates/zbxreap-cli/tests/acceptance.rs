// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use httpmock::{Mock, MockServer};
use predicates::str::contains;
use std::time::{SystemTime, UNIX_EPOCH};

fn sut() -> Command {
    Command::cargo_bin("zbxreap").expect("Should be able to create a command")
}

fn days_ago(days: u64) -> u64 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock before epoch");
    now.as_secs() - days * 86_400
}

fn mock_method<'a>(mock_server: &'a MockServer, method: &str, payload: String) -> Mock<'a> {
    let matcher = format!(r#"{{ "method": "{}" }}"#, method);
    mock_server.mock(|when, then| {
        when.method("POST").path("/api_jsonrpc.php").json_body_includes(matcher);

        then.status(200)
            .header("content-type", "application/json; charset=UTF-8")
            .body(payload);
    })
}

struct ZabbixMocks<'a> {
    problems: Mock<'a>,
    update: Mock<'a>,
    logout: Mock<'a>,
}

fn mock_zabbix(mock_server: &MockServer) -> ZabbixMocks<'_> {
    mock_method(
        mock_server,
        "user.login",
        r#"{ "jsonrpc": "2.0", "result": "0424bd59b807674191e7d77572075f33", "id": 1 }"#.to_string(),
    );

    let problems_payload = serde_json::json!({
        "jsonrpc": "2.0",
        "result": [
            { "eventid": "9120", "name": "Zabbix agent is not available (for 3m)", "clock": days_ago(15).to_string(), "severity": "3", "objectid": "23288" },
            { "eventid": "9001", "name": "Zabbix agent is not available (for 3m)", "clock": days_ago(3).to_string(), "severity": "3", "objectid": "23301" }
        ],
        "id": 2
    });

    let events_payload = serde_json::json!({
        "jsonrpc": "2.0",
        "result": [
            { "eventid": "9120", "hosts": [{ "hostid": "10084", "host": "web-01", "name": "Web Server 01", "status": "0" }] }
        ],
        "id": 3
    });

    let problems = mock_method(mock_server, "problem.get", problems_payload.to_string());
    mock_method(mock_server, "event.get", events_payload.to_string());

    let update = mock_method(
        mock_server,
        "host.update",
        r#"{ "jsonrpc": "2.0", "result": { "hostids": ["10084"] }, "id": 4 }"#.to_string(),
    );

    let logout = mock_method(
        mock_server,
        "user.logout",
        r#"{ "jsonrpc": "2.0", "result": true, "id": 5 }"#.to_string(),
    );

    ZabbixMocks {
        problems,
        update,
        logout,
    }
}

fn with_mocked_zabbix(command: &mut Command, mock_server: &MockServer) {
    command
        .env("ZABBIX_URL", mock_server.base_url())
        .env("ZABBIX_USERNAME", "Admin")
        .env("ZABBIX_PASSWORD", "zabbix")
        .arg("--no-colors");
}

#[test]
fn should_require_zabbix_url() {
    let execution = sut()
        .env_remove("ZABBIX_URL")
        .args(["--username", "Admin", "--password", "zabbix"])
        .assert();

    execution.failure();
}

#[test]
fn should_list_hosts_without_disabling_on_dry_run() {
    let mock_server = MockServer::start();
    let mocks = mock_zabbix(&mock_server);

    let mut command = sut();
    with_mocked_zabbix(&mut command, &mock_server);
    let execution = command.assert();

    execution
        .success()
        .stdout(contains("web-01"))
        .stdout(contains("Web Server 01"))
        .stdout(contains("DRY RUN MODE"));

    mocks.problems.assert();
    mocks.update.assert_calls(0);
    mocks.logout.assert();
}

#[test]
fn should_cancel_live_run_without_confirmation() {
    let mock_server = MockServer::start();
    let mocks = mock_zabbix(&mock_server);

    let mut command = sut();
    with_mocked_zabbix(&mut command, &mock_server);
    let execution = command.arg("--live").write_stdin("no\n").assert();

    execution.success().stdout(contains("Operation cancelled"));

    mocks.update.assert_calls(0);
    mocks.logout.assert();
}

#[test]
fn should_disable_hosts_after_confirmation() {
    let mock_server = MockServer::start();
    let mocks = mock_zabbix(&mock_server);

    let mut command = sut();
    with_mocked_zabbix(&mut command, &mock_server);
    let execution = command
        .args(["--live", "--pacing-millis", "0"])
        .write_stdin("YES\n")
        .assert();

    execution
        .success()
        .stdout(contains("Disabled : web-01 (Web Server 01)"))
        .stdout(contains("successfully disabled : 1"));

    mocks.update.assert_calls(1);
    mocks.logout.assert();
}

#[test]
fn should_exit_with_failure_when_credentials_rejected() {
    let mock_server = MockServer::start();

    mock_method(
        &mock_server,
        "user.login",
        r#"{ "jsonrpc": "2.0", "error": { "code": -32602, "message": "Invalid params.", "data": "Incorrect user name or password or account is temporarily blocked." }, "id": 1 }"#
            .to_string(),
    );

    let mut command = sut();
    with_mocked_zabbix(&mut command, &mock_server);
    let execution = command.assert();

    execution
        .failure()
        .code(1)
        .stdout(contains("Authentication failed"))
        .stdout(contains("Incorrect user name or password"));
}
