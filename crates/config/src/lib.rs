use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "campus.toml",
    "config/campus.toml",
    "crates/config/campus.toml",
    "../campus.toml",
    "../config/campus.toml",
    "../crates/config/campus.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub profile_service: ProfileServiceConfig,
}

/// Where the client-side key/value storage is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "campus-session.json".to_string(),
        }
    }
}

/// Connection settings for the remote profile service.
///
/// No request timeout is applied unless one is configured.
///
/// ```
/// use campus_config::ProfileServiceConfig;
///
/// let service = ProfileServiceConfig::default();
/// assert_eq!(service.base_url, "http://127.0.0.1:5000/api");
/// assert_eq!(service.college_path, "/college/profile");
/// assert!(service.request_timeout_seconds.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileServiceConfig {
    #[serde(default = "ProfileServiceConfig::default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    #[serde(default = "ProfileServiceConfig::default_college_path")]
    pub college_path: String,
    #[serde(default = "ProfileServiceConfig::default_student_path")]
    pub student_path: String,
    #[serde(default = "ProfileServiceConfig::default_jobseeker_path")]
    pub jobseeker_path: String,
}

impl ProfileServiceConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:5000/api".to_string()
    }

    fn default_college_path() -> String {
        "/college/profile".to_string()
    }

    fn default_student_path() -> String {
        "/student/profile".to_string()
    }

    fn default_jobseeker_path() -> String {
        "/jobseeker/profile".to_string()
    }
}

impl Default for ProfileServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: None,
            college_path: Self::default_college_path(),
            student_path: Self::default_student_path(),
            jobseeker_path: Self::default_jobseeker_path(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use campus_config::load;
///
/// std::env::remove_var("CAMPUS_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.storage.path.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();
    let service = &defaults.profile_service;

    let mut builder = config::Config::builder()
        .set_default("storage.path", defaults.storage.path.clone())?
        .set_default("profile_service.base_url", service.base_url.clone())?
        .set_default("profile_service.college_path", service.college_path.clone())?
        .set_default("profile_service.student_path", service.student_path.clone())?
        .set_default(
            "profile_service.jobseeker_path",
            service.jobseeker_path.clone(),
        )?;

    let environment_overrides = config::Environment::with_prefix("CAMPUS").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("CAMPUS_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via CAMPUS_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded campus configuration");
    Ok(config)
}
