use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use aviator_pay::infrastructure::pesapal::{SUBMIT_ORDER_PATH, TOKEN_PATH};
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use std::process::Command;

fn gateway_cmd(server: &MockServer) -> Command {
    let mut cmd = Command::new(cargo_bin!("aviator-pay"));
    cmd.env("PESAPAL_CONSUMER_KEY", "key")
        .env("PESAPAL_CONSUMER_SECRET", "secret")
        .env("PESAPAL_BASE_URL", server.base_url());
    cmd
}

#[test]
fn test_token_failure_reports_generic_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(500).body("stack trace: NullReferenceException");
    });

    // With logging silenced only the caller-facing error remains.
    gateway_cmd(&server)
        .env("RUST_LOG", "off")
        .args(["initiate", "--email", "a@b.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initiate payment."))
        .stderr(predicate::str::contains("NullReferenceException").not());
}

#[test]
fn test_token_failure_detail_goes_to_operator_log() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(500).body("stack trace: NullReferenceException");
    });

    gateway_cmd(&server)
        .env("RUST_LOG", "error")
        .args(["initiate", "--email", "a@b.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("payment initiation failed"))
        .stderr(predicate::str::contains("NullReferenceException"));
}

#[test]
fn test_order_without_tracking_id_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(200).json_body(json!({"token": "T"}));
    });
    server.mock(|when, then| {
        when.method(POST).path(SUBMIT_ORDER_PATH);
        then.status(200).json_body(json!({"error": {"code": "invalid_ipn"}}));
    });

    gateway_cmd(&server)
        .env("RUST_LOG", "off")
        .args(["initiate", "--email", "a@b.com"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to initiate payment."));
}

#[test]
fn test_unreachable_gateway_verification() {
    let mut cmd = Command::new(cargo_bin!("aviator-pay"));
    cmd.env("PESAPAL_CONSUMER_KEY", "key")
        .env("PESAPAL_CONSUMER_SECRET", "secret")
        .env("PESAPAL_BASE_URL", "http://127.0.0.1:1")
        .env("RUST_LOG", "off")
        .args(["verify", "OTID1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Payment verification failed."));
}

#[test]
fn test_malformed_history_file() {
    let mut history = tempfile::NamedTempFile::new().unwrap();
    writeln!(history, "value,created").unwrap();
    writeln!(history, "abc,yesterday").unwrap();

    let mut cmd = Command::new(cargo_bin!("aviator-pay"));
    cmd.arg("history").arg("--history-file").arg(history.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("CSV error"));
}

#[test]
fn test_invalid_amount_is_rejected_by_cli() {
    let mut cmd = Command::new(cargo_bin!("aviator-pay"));
    cmd.args(["initiate", "--email", "a@b.com", "--amount", "lots"]);

    cmd.assert().failure().stderr(predicate::str::contains("--amount"));
}
