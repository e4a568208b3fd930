//! Test plan for the `campus-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use campus_config::{load, AppConfig, ProfileServiceConfig, StorageConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "CAMPUS_CONFIG",
    "CAMPUS__STORAGE__PATH",
    "CAMPUS__PROFILE_SERVICE__BASE_URL",
    "CAMPUS__PROFILE_SERVICE__REQUEST_TIMEOUT_SECONDS",
    "CAMPUS__PROFILE_SERVICE__COLLEGE_PATH",
    "CAMPUS__PROFILE_SERVICE__STUDENT_PATH",
    "CAMPUS__PROFILE_SERVICE__JOBSEEKER_PATH",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.storage.path, defaults.storage.path);
    assert_eq!(
        config.profile_service.base_url,
        defaults.profile_service.base_url
    );
    assert_eq!(config.profile_service.request_timeout_seconds, None);
    assert_eq!(
        config.profile_service.jobseeker_path,
        defaults.profile_service.jobseeker_path
    );
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "campus.toml",
        r#"
        [storage]
        path = "first.json"
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/campus.toml",
        r#"
        [storage]
        path = "second.json"
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.storage.path, "first.json");
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "campus.toml",
        r#"
        [profile_service]
        base_url = "https://profiles.campus.test"
        request_timeout_seconds = 12
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(
        config.profile_service.base_url,
        "https://profiles.campus.test"
    );
    assert_eq!(config.profile_service.request_timeout_seconds, Some(12));
    assert_eq!(
        config.profile_service.college_path,
        defaults.profile_service.college_path
    );
    assert_eq!(config.storage.path, defaults.storage.path);
}

#[test]
#[serial]
fn load_honours_explicit_config_path() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "elsewhere/custom.toml",
        r#"
        [profile_service]
        student_path = "/v2/student/me"
        "#,
    );
    let explicit = temp_dir.path().join("elsewhere/custom.toml");
    ctx.set_var("CAMPUS_CONFIG", explicit.display().to_string());

    let config = load().expect("configuration load should use CAMPUS_CONFIG");
    assert_eq!(config.profile_service.student_path, "/v2/student/me");
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "campus.toml",
        r#"
        [storage]
        path = "from-file.json"
        "#,
    );

    ctx.set_var("CAMPUS__STORAGE__PATH", "from-env.json");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.storage.path, "from-env.json");
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "campus.toml",
        r#"
        [storage]
        path = "unterminated
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration") || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn storage_config_defaults_to_session_file() {
    assert_eq!(StorageConfig::default().path, "campus-session.json");
}

#[test]
fn profile_service_defaults_cover_every_enforced_role() {
    let defaults = ProfileServiceConfig::default();
    assert_eq!(defaults.college_path, "/college/profile");
    assert_eq!(defaults.student_path, "/student/profile");
    assert_eq!(defaults.jobseeker_path, "/jobseeker/profile");
}
