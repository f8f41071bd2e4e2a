//! Unit tests for list, status, and config-file resolution.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use openclaw_common::ContainerRuntime;
use openclaw_manager::application::ports::InstanceRegistry;
use openclaw_manager::application::services::instance_query::{
    instance_status, list_instances, live_state, resolve_config_file,
};
use openclaw_manager::domain::{InstanceError, InstanceState, PortPair, RegistryRecord};
use openclaw_manager::infra::fs::LocalFs;

use crate::mocks::{MockContainers, MockServices, TestHome};

fn home_with_lab() -> TestHome {
    let home = TestHome::new();
    home.registry.ensure().unwrap();
    home.registry
        .append(&RegistryRecord::new("lab", PortPair::new(18791, 18792)))
        .unwrap();
    home
}

fn runtime() -> ContainerRuntime {
    ContainerRuntime {
        id: "4f1c2a9b8e7d6c5b4a39281706f5e4d3c2b1a09f8e7d6c5b4a3928170605f4e3".to_string(),
        image: "localhost/openclaw:latest".to_string(),
        status: "running".to_string(),
        started_at: Some(Utc.with_ymd_and_hms(2026, 10, 1, 8, 30, 0).unwrap()),
    }
}

// ── live_state ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn active_wins_over_failed() {
    let services = MockServices::new()
        .with_active("openclaw-lab")
        .with_failed("openclaw-lab");
    assert_eq!(live_state(&services, "openclaw-lab").await, InstanceState::Running);
}

#[tokio::test]
async fn failed_unit_reads_failed() {
    let services = MockServices::new().with_failed("openclaw-lab");
    assert_eq!(live_state(&services, "openclaw-lab").await, InstanceState::Failed);
}

#[tokio::test]
async fn never_started_unit_reads_stopped() {
    assert_eq!(
        live_state(&MockServices::new(), "openclaw-new").await,
        InstanceState::Stopped
    );
}

#[tokio::test]
async fn failed_query_reads_stopped() {
    let services = MockServices::new().with_active("openclaw-lab");
    services.queries_fail.set(true);
    assert_eq!(live_state(&services, "openclaw-lab").await, InstanceState::Stopped);
}

// ── list ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_reports_registry_order_and_live_states() {
    let home = home_with_lab();
    let services = MockServices::new().with_active("openclaw");
    services.failed.borrow_mut().insert("openclaw-lab".to_string());

    let list = list_instances(&home.registry, &services, &home.config.layout())
        .await
        .unwrap();

    let rows: Vec<_> = list
        .instances
        .iter()
        .map(|i| (i.name.as_str(), i.gateway_port, i.bridge_port, i.service.as_str(), i.state))
        .collect();
    assert_eq!(
        rows,
        [
            ("default", 18789, 18790, "openclaw", InstanceState::Running),
            ("lab", 18791, 18792, "openclaw-lab", InstanceState::Failed),
        ]
    );
}

#[tokio::test]
async fn list_survives_failing_service_manager() {
    let home = home_with_lab();
    let services = MockServices::new();
    services.queries_fail.set(true);

    let list = list_instances(&home.registry, &services, &home.config.layout())
        .await
        .unwrap();

    assert_eq!(list.instances.len(), 2);
    assert!(list.instances.iter().all(|i| i.state == InstanceState::Stopped));
}

#[tokio::test]
async fn list_of_missing_registry_is_empty() {
    let home = TestHome::new();
    let list = list_instances(&home.registry, &MockServices::new(), &home.config.layout())
        .await
        .unwrap();
    assert!(list.instances.is_empty());
}

#[tokio::test]
async fn list_does_not_write_registry() {
    let home = home_with_lab();
    let before = home.registry_text();
    list_instances(&home.registry, &MockServices::new(), &home.config.layout())
        .await
        .unwrap();
    assert_eq!(home.registry_text(), before);
}

// ── status ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_includes_paths_and_container() {
    let home = home_with_lab();
    let services = MockServices::new().with_active("openclaw-lab");

    let status = instance_status(
        &home.registry,
        &services,
        &MockContainers::Present(runtime()),
        &home.config.layout(),
        "lab",
    )
    .await
    .unwrap();

    assert_eq!(status.name, "lab");
    assert_eq!(status.service, "openclaw-lab");
    assert_eq!(status.state, InstanceState::Running);
    assert_eq!((status.gateway_port, status.bridge_port), (18791, 18792));
    assert_eq!(status.state_dir, home.path(".openclaw-lab").display().to_string());
    assert_eq!(status.workspace_dir, home.path("workspace-lab").display().to_string());
    assert!(status.unit_file.ends_with("containers/systemd/openclaw-lab.container"));
    assert_eq!(status.container, Some(runtime()));
}

#[tokio::test]
async fn status_without_container_is_still_reported() {
    let home = home_with_lab();
    for containers in [MockContainers::Absent, MockContainers::Broken] {
        let status = instance_status(
            &home.registry,
            &MockServices::new(),
            &containers,
            &home.config.layout(),
            "lab",
        )
        .await
        .unwrap();
        assert_eq!(status.state, InstanceState::Stopped);
        assert!(status.container.is_none());
    }
}

#[tokio::test]
async fn status_of_default_uses_unqualified_paths() {
    let home = home_with_lab();
    let status = instance_status(
        &home.registry,
        &MockServices::new(),
        &MockContainers::Absent,
        &home.config.layout(),
        "default",
    )
    .await
    .unwrap();
    assert_eq!(status.service, "openclaw");
    assert_eq!(status.state_dir, home.path(".openclaw").display().to_string());
    assert_eq!(status.workspace_dir, home.path("workspace").display().to_string());
}

#[tokio::test]
async fn status_of_unknown_is_not_found() {
    let home = home_with_lab();
    let err = instance_status(
        &home.registry,
        &MockServices::new(),
        &MockContainers::Absent,
        &home.config.layout(),
        "ghost",
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InstanceError>(),
        Some(InstanceError::NotFound(_))
    ));
}

// ── config file ──────────────────────────────────────────────────────────────

#[test]
fn config_file_resolves_inside_state_dir() {
    let home = home_with_lab();
    std::fs::create_dir_all(home.path(".openclaw-lab")).unwrap();
    std::fs::write(home.path(".openclaw-lab/openclaw.json"), "{}").unwrap();

    let path = resolve_config_file(&home.registry, &LocalFs, &home.config.layout(), "lab").unwrap();
    assert_eq!(path, home.path(".openclaw-lab/openclaw.json"));
}

#[test]
fn registered_instance_without_config_file_errors() {
    let home = home_with_lab();
    let err =
        resolve_config_file(&home.registry, &LocalFs, &home.config.layout(), "lab").unwrap_err();
    assert!(format!("{err:#}").contains("config file missing"), "{err:#}");
}

#[test]
fn config_of_unknown_is_not_found() {
    let home = home_with_lab();
    let err =
        resolve_config_file(&home.registry, &LocalFs, &home.config.layout(), "ghost").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InstanceError>(),
        Some(InstanceError::NotFound(_))
    ));
}
