//! Integration tests for the openclaw-manager binary.
//!
//! Every test points the manager at a fresh temp home and runs it as the
//! current user, so nothing outside the temp directory is touched. Paths that
//! would reach systemd stop before it: they fail validation or lookup first.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Overrides inherited from the caller's environment that would escape the
/// temp home.
const SCRUBBED_ENV: &[&str] = &[
    "OPENCLAW_REGISTRY",
    "OPENCLAW_QUADLET_DIR",
    "OPENCLAW_TEMPLATE_DIR",
    "OPENCLAW_SHARED_SKILLS",
    "OPENCLAW_GATEWAY_PORT",
    "OPENCLAW_BRIDGE_PORT",
    "OPENCLAW_LOG",
];

fn current_user() -> String {
    nix::unistd::User::from_uid(nix::unistd::Uid::effective())
        .unwrap()
        .expect("current uid has a passwd entry")
        .name
}

fn manager(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("openclaw-manager"));
    for key in SCRUBBED_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1")
        .env("OPENCLAW_HOME", home)
        .env("OPENCLAW_USER", current_user())
        .env("OPENCLAW_MANAGER_CONFIG", home.join("no-such-config.yaml"))
        .env("OPENCLAW_YES", "1");
    cmd
}

fn registry(home: &TempDir) -> String {
    std::fs::read_to_string(home.path().join(".openclaw-ports")).unwrap_or_default()
}

fn seed_registry(home: &TempDir, content: &str) {
    std::fs::write(home.path().join(".openclaw-ports"), content).unwrap();
}

// --- Help and version ---

#[test]
fn test_no_args_prints_help_and_exits_zero() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("create"));
    assert_eq!(registry(&home), "", "help must not touch the registry");
}

#[test]
fn test_help_lists_every_command() {
    let home = TempDir::new().unwrap();
    let assert = manager(home.path()).arg("--help").assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for cmd in [
        "create", "list", "start", "stop", "restart", "destroy", "config", "status", "logs",
    ] {
        assert!(out.contains(cmd), "help is missing `{cmd}`:\n{out}");
    }
}

#[test]
fn test_version_flag_exits_zero() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("openclaw-manager"));
}

#[test]
fn test_unknown_command_exits_one() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_missing_instance_argument_exits_one() {
    let home = TempDir::new().unwrap();
    manager(home.path()).arg("start").assert().code(1);
}

// --- Identity ---

#[test]
fn test_wrong_service_user_is_rejected() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .env("OPENCLAW_USER", "definitely-not-this-user")
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("definitely-not-this-user"));
    assert_eq!(registry(&home), "", "identity check runs before the registry");
}

// --- Registry bootstrap and list ---

#[test]
fn test_list_creates_registry_with_default() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("18789"));
    assert_eq!(registry(&home), "default:18789:18790\n");
}

#[test]
fn test_list_json_is_parseable() {
    let home = TempDir::new().unwrap();
    seed_registry(&home, "default:18789:18790\nlab:18791:18792\n");

    let assert = manager(home.path()).args(["--json", "list"]).assert().success();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    let instances = out["instances"].as_array().unwrap();
    assert_eq!(instances.len(), 2);
    assert_eq!(instances[1]["name"], "lab");
    assert_eq!(instances[1]["gateway_port"], 18791);
    assert_eq!(instances[1]["service"], "openclaw-lab");
    let state = instances[1]["state"].as_str().unwrap();
    assert!(["running", "failed", "stopped"].contains(&state), "{state}");
}

#[test]
fn test_existing_registry_gains_missing_default() {
    let home = TempDir::new().unwrap();
    seed_registry(&home, "lab:18791:18792\n");
    manager(home.path()).arg("list").assert().success();
    assert_eq!(registry(&home), "lab:18791:18792\ndefault:18789:18790\n");
}

#[test]
fn test_corrupt_registry_is_reported() {
    let home = TempDir::new().unwrap();
    seed_registry(&home, "default:18789:18790\nthis is not a record\n");
    manager(home.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
}

// --- Create ---

#[test]
fn test_create_rejects_invalid_name() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .args(["create", "Bad_Name"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid instance name"));
    assert_eq!(registry(&home), "default:18789:18790\n");
}

#[test]
fn test_create_default_is_protected() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .args(["create", "default"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("protected"));
}

#[test]
fn test_create_without_templates_changes_nothing() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .args(["create", "lab"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template not found"));
    assert_eq!(registry(&home), "default:18789:18790\n");
    assert!(!home.path().join(".openclaw-lab").exists());
}

/// Without a user systemd the final `daemon-reload` fails; nothing earlier may.
fn assert_only_reload_failed(output: &std::process::Output) {
    if output.status.success() {
        return;
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR:"), "{stderr}");
    assert!(stderr.contains("systemctl"), "create failed before the reload:\n{stderr}");
}

fn read_unit(home: &TempDir, name: &str) -> String {
    std::fs::read_to_string(
        home.path()
            .join(format!(".config/containers/systemd/openclaw-{name}.container")),
    )
    .unwrap()
}

#[test]
fn test_create_with_bundled_templates_registers_instance() {
    let home = TempDir::new().unwrap();
    let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates");

    let output = manager(home.path())
        .env("OPENCLAW_TEMPLATE_DIR", &templates)
        .args(["create", "lab"])
        .output()
        .unwrap();
    assert_only_reload_failed(&output);

    assert_eq!(registry(&home), "default:18789:18790\nlab:18791:18792\n");
    let unit = read_unit(&home, "lab");
    assert!(unit.contains("18791"));
    assert!(!unit.contains("{{"));
    let skills = home.path().join("shared-skills");
    assert!(skills.is_dir());
    assert!(
        unit.contains(&format!("Volume={}:/home/node/shared-skills", skills.display())),
        "{unit}"
    );
    let env = std::fs::read_to_string(home.path().join(".openclaw-lab/.env")).unwrap();
    let token = env.trim().strip_prefix("OPENCLAW_GATEWAY_TOKEN=").unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

    manager(home.path())
        .env("OPENCLAW_TEMPLATE_DIR", &templates)
        .args(["create", "lab"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_create_mounts_relocated_shared_skills() {
    let home = TempDir::new().unwrap();
    let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates");
    let skills = home.path().join("elsewhere-skills");

    let output = manager(home.path())
        .env("OPENCLAW_TEMPLATE_DIR", &templates)
        .env("OPENCLAW_SHARED_SKILLS", &skills)
        .args(["create", "lab"])
        .output()
        .unwrap();
    assert_only_reload_failed(&output);

    assert!(skills.is_dir());
    assert!(!home.path().join("shared-skills").exists());
    let unit = read_unit(&home, "lab");
    assert!(
        unit.contains(&format!(
            "Volume={}:/home/node/shared-skills:ro,z",
            skills.display()
        )),
        "{unit}"
    );
    assert!(unit.contains(&format!(
        "Volume={}:/home/node/.openclaw:Z",
        home.path().join(".openclaw-lab").display()
    )));
}

// --- Destroy ---

#[test]
fn test_destroy_default_is_protected() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".openclaw")).unwrap();
    manager(home.path())
        .args(["--yes", "destroy", "default"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("protected"));
    assert!(home.path().join(".openclaw").is_dir());
    assert_eq!(registry(&home), "default:18789:18790\n");
}

#[test]
fn test_destroy_unknown_leaves_registry_byte_identical() {
    let home = TempDir::new().unwrap();
    let seeded = "default:18789:18790\n\nlab:18791:18792\n";
    seed_registry(&home, seeded);
    manager(home.path())
        .args(["--yes", "destroy", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
    assert_eq!(registry(&home), seeded);
}

#[test]
fn test_destroy_flags_conflict() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .args(["destroy", "lab", "--keep-data", "--delete-state"])
        .assert()
        .code(1);
}

// --- Per-instance commands on unknown names ---

#[test]
fn test_instance_commands_report_not_found() {
    let home = TempDir::new().unwrap();
    for cmd in ["start", "stop", "restart", "status", "config", "logs"] {
        manager(home.path())
            .args([cmd, "ghost"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Instance 'ghost' not found"));
    }
}

#[test]
fn test_config_prints_when_not_a_terminal() {
    let home = TempDir::new().unwrap();
    seed_registry(&home, "default:18789:18790\nlab:18791:18792\n");
    std::fs::create_dir_all(home.path().join(".openclaw-lab")).unwrap();
    std::fs::write(
        home.path().join(".openclaw-lab/openclaw.json"),
        "{ \"gateway\": { \"port\": 18791 } }\n",
    )
    .unwrap();

    manager(home.path())
        .args(["config", "lab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 18791"));
}

#[test]
fn test_config_missing_file_is_an_error() {
    let home = TempDir::new().unwrap();
    seed_registry(&home, "default:18789:18790\nlab:18791:18792\n");
    manager(home.path())
        .args(["config", "lab"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file missing"));
}

// --- Configuration ---

#[test]
fn test_invalid_port_override_is_rejected() {
    let home = TempDir::new().unwrap();
    manager(home.path())
        .env("OPENCLAW_GATEWAY_PORT", "not-a-port")
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OPENCLAW_GATEWAY_PORT"));
}

#[test]
fn test_config_file_overrides_default_ports() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("manager.yaml");
    std::fs::write(&config, "gateway_port: 20000\nbridge_port: 20001\n").unwrap();
    manager(home.path())
        .env("OPENCLAW_MANAGER_CONFIG", &config)
        .arg("list")
        .assert()
        .success();
    assert_eq!(registry(&home), "default:20000:20001\n");
}
