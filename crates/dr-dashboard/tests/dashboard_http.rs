//! Integration tests for the DR dashboard HTTP surface.
//!
//! These tests load a catalog from disk exactly as the binary does, serve the
//! router on a random port and drive it over real HTTP.

use dr_dashboard::{build_router, AppState, Args, Config, Environment, ScenarioStore};
use serde_json::Value;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

// =============================================================================
// Fixtures
// =============================================================================

const CATALOG: &str = r#"{
    "scenarios": [
        {
            "scenario": "Single MySQL pod failure (container crash / OOM)",
            "primary_recovery_method": "Percona operator restarts the pod",
            "alternate_fallback": "Delete the PVC and let SST rebuild",
            "detection_signals": "PMM alert: pxc node down",
            "rto_target": "5 minutes",
            "rpo_target": "0",
            "mttr_expected": "3 minutes",
            "expected_data_loss": "None",
            "likelihood": "High",
            "business_impact": "Low",
            "affected_components": "pxc-0",
            "notes_assumptions": "3-node cluster",
            "test_enabled": true,
            "test_description": "Kill pxc-0 and wait for rejoin",
            "test_file": "tests/test_pod_failure.py"
        },
        {
            "scenario": "Primary datacenter down (power, cooling, or network)",
            "test_enabled": false,
            "test_file": null
        },
        {
            "scenario": "Weird New Failure: disk, full (urgent)",
            "test_enabled": false,
            "test_file": null
        }
    ],
    "discarded_scenarios": [
        { "scenario": "Meteor strike", "reason": "Covered by regional disaster" }
    ]
}"#;

const POD_RUNBOOK: &str = "# Single MySQL pod failure\n\n1. `kubectl get pods -n mysql`\n";

/// Lay out a project tree the way the bootstrap expects it.
fn write_project(root: &Path) {
    let env_dir = root.join("on-prem");
    fs::create_dir_all(env_dir.join("recovery_processes")).unwrap();
    fs::create_dir_all(root.join("static")).unwrap();

    fs::write(env_dir.join("disaster_scenarios.json"), CATALOG).unwrap();
    fs::write(
        env_dir.join("recovery_processes/single-mysql-pod-failure.md"),
        POD_RUNBOOK,
    )
    .unwrap();
    fs::write(
        env_dir.join("recovery_processes/primary-dc-power-cooling-outage.md"),
        "# Primary DC down\n",
    )
    .unwrap();
    fs::write(root.join("static/index.html"), "<!doctype html><title>DR</title>").unwrap();
}

/// Start the dashboard on a random port, booted from the environment directory.
async fn start_dashboard(root: &Path) -> SocketAddr {
    let args = Args {
        port: 0,
        ..Default::default()
    };
    let config = Config::resolve(&args, &root.join("on-prem"));
    assert_eq!(config.environment, Environment::OnPrem);

    let store = ScenarioStore::load(&config.data_file).unwrap();
    let app = build_router(AppState::new(store, config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    addr
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_scenarios_match_source_order() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let addr = start_dashboard(dir.path()).await;

    let response = reqwest::get(format!("http://{addr}/api/scenarios")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["environment"], "on-prem");

    let scenarios = body["scenarios"].as_array().unwrap();
    let files: Vec<&str> = scenarios
        .iter()
        .map(|s| s["recoveryProcessFile"].as_str().unwrap())
        .collect();
    assert_eq!(
        files,
        vec![
            "single-mysql-pod-failure.md",
            "primary-dc-power-cooling-outage.md",
            "weird-new-failure-disk-full-urgent.md",
        ]
    );
    assert_eq!(scenarios[0]["primaryRecoveryMethod"], "Percona operator restarts the pod");
    assert_eq!(scenarios[0]["testFile"], "tests/test_pod_failure.py");
    assert!(scenarios[1]["testFile"].is_null());

    let discarded = body["discardedScenarios"].as_array().unwrap();
    assert_eq!(discarded.len(), 1);
    assert_eq!(discarded[0]["reason"], "Covered by regional disaster");
}

#[tokio::test]
async fn test_every_listed_runbook_is_fetchable_or_named_missing() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let addr = start_dashboard(dir.path()).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("http://{addr}/api/scenarios"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    for scenario in body["scenarios"].as_array().unwrap() {
        let file = scenario["recoveryProcessFile"].as_str().unwrap();
        let response = client
            .get(format!("http://{addr}/api/recovery-process"))
            .query(&[("file", file)])
            .send()
            .await
            .unwrap();

        if file == "weird-new-failure-disk-full-urgent.md" {
            assert_eq!(response.status(), 404);
            assert!(response.text().await.unwrap().contains(file));
        } else {
            assert_eq!(response.status(), 200, "{file}");
        }
    }
}

#[tokio::test]
async fn test_runbook_bytes_and_content_type() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let addr = start_dashboard(dir.path()).await;

    let response = reqwest::get(format!(
        "http://{addr}/api/recovery-process?file=single-mysql-pod-failure.md"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "text/markdown; charset=utf-8"
    );
    assert_eq!(response.text().await.unwrap(), POD_RUNBOOK);
}

#[tokio::test]
async fn test_runbook_reread_on_every_request() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let addr = start_dashboard(dir.path()).await;
    let url = format!("http://{addr}/api/recovery-process?file=single-mysql-pod-failure.md");

    assert_eq!(reqwest::get(&url).await.unwrap().text().await.unwrap(), POD_RUNBOOK);

    fs::write(
        dir.path().join("on-prem/recovery_processes/single-mysql-pod-failure.md"),
        "# Updated\n",
    )
    .unwrap();
    assert_eq!(reqwest::get(&url).await.unwrap().text().await.unwrap(), "# Updated\n");
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let addr = start_dashboard(dir.path()).await;
    let client = reqwest::Client::new();

    for file in ["../../etc/passwd", "a/b.md", "../disaster_scenarios.json"] {
        let response = client
            .get(format!("http://{addr}/api/recovery-process"))
            .query(&[("file", file)])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "{file}");
    }
}

#[tokio::test]
async fn test_ui_root_only() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let addr = start_dashboard(dir.path()).await;

    let root = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(root.status(), 200);
    assert!(root.text().await.unwrap().contains("<title>DR</title>"));

    let other = reqwest::get(format!("http://{addr}/scenarios")).await.unwrap();
    assert_eq!(other.status(), 404);
}

#[test]
fn test_missing_catalog_fails_load() {
    let dir = TempDir::new().unwrap();
    let config = Config::resolve(
        &Args {
            port: 0,
            ..Default::default()
        },
        dir.path(),
    );
    assert!(ScenarioStore::load(&config.data_file).is_err());
}
