#![allow(deprecated)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

fn apiscore_cmd() -> Command {
    let mut cmd = Command::cargo_bin("apiscore-cli").expect("binary should be built");
    cmd.env_remove("APISCORE_SERVICE_URL");
    cmd
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write fixture file");
}

fn canonical_workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("create workspace");
    write_file(
        &dir.path().join("metadata.yml"),
        "apis:\n  - name: OrdersAPI\n    api-spec-type: rest\n    definition-path: orders\n    definition-file: openapi.yaml\n",
    );
    write_file(&dir.path().join("orders/openapi.yaml"), "openapi: 3.0.0\n");
    dir
}

fn legacy_workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("create workspace");
    write_file(
        &dir
            .path()
            .join("wso2_extracted/PizzaShackAPI-1.0.0/api.yaml"),
        "type: api\nversion: v4.3.0\ndata:\n  name: PizzaAPI\n  context: /pizza\n",
    );
    write_file(
        &dir
            .path()
            .join("wso2_extracted/PizzaShackAPI-1.0.0/Definitions/swagger.yaml"),
        "swagger: '2.0'\n",
    );
    dir
}

const RESULTS_BODY: &str = r#"[{"apiName":"OrdersAPI","apiProtocol":"REST","rating":"A","documentationGrade":{"grade":"A","description":"Complete"}}]"#;

#[test]
fn certify_without_service_url_is_a_config_error() {
    let workspace = canonical_workspace();
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error[NO_SERVICE_URL]"));
}

#[test]
fn blank_service_url_env_counts_as_unset() {
    let workspace = canonical_workspace();
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .env("APISCORE_SERVICE_URL", "   ")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error[NO_SERVICE_URL]"));
}

#[test]
fn nonexistent_root_reports_no_root() {
    apiscore_cmd()
        .arg("certify")
        .arg("/tmp/does_not_exist_apiscore_test")
        .arg("--service-url")
        .arg("http://127.0.0.1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[NO_ROOT]"));
}

#[test]
fn empty_workspace_reports_no_valid_project() {
    let workspace = tempfile::tempdir().expect("create workspace");
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg("http://127.0.0.1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[NO_VALID_PROJECT]"));
}

#[test]
fn certify_submits_and_renders_a_text_summary() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/apis/validate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESULTS_BODY)
        .create();

    let workspace = canonical_workspace();
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg(server.url())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("OrdersAPI"))
        .stdout(predicate::str::contains("rating"));

    mock.assert();
}

#[test]
fn certify_json_output_is_the_parsed_results() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/apis/validate")
        .with_status(200)
        .with_body(RESULTS_BODY)
        .create();

    let workspace = canonical_workspace();
    let output = apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg(server.url())
        .arg("--format")
        .arg("json")
        .output()
        .expect("command should run");

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(parsed[0]["apiName"], "OrdersAPI");
    assert_eq!(parsed[0]["rating"], "A");
}

#[test]
fn api_name_filter_restricts_results() {
    let body = r#"[{"apiName":"OrdersAPI","rating":"A"},{"apiName":"BillingAPI","rating":"C"}]"#;
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/apis/validate")
        .with_status(200)
        .with_body(body)
        .create();

    let workspace = canonical_workspace();
    let output = apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg(server.url())
        .arg("--format")
        .arg("json")
        .arg("--api-name")
        .arg("BillingAPI")
        .output()
        .expect("command should run");

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = parsed.as_array().expect("array output");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["apiName"], "BillingAPI");
}

#[test]
fn certify_legacy_directory_uses_the_declared_api_name() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/apis/validate")
        .with_status(200)
        .with_body("[]")
        .create();

    let workspace = legacy_workspace();
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg(server.url())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PizzaAPI"));

    mock.assert();
}

#[test]
fn service_rejection_maps_to_exit_4() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/apis/validate")
        .with_status(422)
        .with_body(r#"{"description":"archive contained no definitions"}"#)
        .create();

    let workspace = canonical_workspace();
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg(server.url())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("error[SERVICE_REJECTED]"))
        .stderr(predicate::str::contains("archive contained no definitions"));
}

#[test]
fn unreachable_service_maps_to_exit_4() {
    let workspace = canonical_workspace();
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg("http://127.0.0.1:1")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("error[SERVICE_UNREACHABLE]"));
}

#[test]
fn out_flag_writes_report_to_file() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/apis/validate")
        .with_status(200)
        .with_body(RESULTS_BODY)
        .create();

    let tmp = NamedTempFile::new().expect("create temp file");
    let out_path = tmp.path().to_path_buf();

    let workspace = canonical_workspace();
    apiscore_cmd()
        .arg("certify")
        .arg(workspace.path())
        .arg("--service-url")
        .arg(server.url())
        .arg("--out")
        .arg(&out_path)
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());

    let contents = fs::read_to_string(&out_path).expect("read output file");
    assert!(contents.contains("OrdersAPI"));
}

#[test]
fn verify_missing_file_fails() {
    apiscore_cmd()
        .arg("verify")
        .arg("/tmp/does_not_exist_apiscore_test.yaml")
        .arg("--service-url")
        .arg("http://127.0.0.1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[NO_FILE]"));
}

#[test]
fn verify_posts_the_document() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/apis/verify")
        .with_status(200)
        .with_body(r#"{"valid":true}"#)
        .create();

    let file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("create definition");
    fs::write(file.path(), "asyncapi: 2.0.0\n").expect("write definition");

    apiscore_cmd()
        .arg("verify")
        .arg(file.path())
        .arg("--protocol")
        .arg("asyncapi")
        .arg("--service-url")
        .arg(server.url())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("valid"));

    mock.assert();
}

#[test]
fn invalid_protocol_value_fails() {
    apiscore_cmd()
        .arg("verify")
        .arg("spec.yaml")
        .arg("--protocol")
        .arg("soap")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn help_lists_both_subcommands() {
    apiscore_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("certify"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn version_flag_prints_version() {
    apiscore_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("apiscore"));
}
