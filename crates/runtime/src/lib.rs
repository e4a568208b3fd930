use std::sync::Arc;

use anyhow::{Context, Result};
use campus_auth::{FileStorage, RouteGuard, StoredSession};
use campus_config::AppConfig;
use campus_profile::{HttpProfileService, ProfileGate};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

pub type Sessions = Arc<StoredSession<FileStorage>>;

/// The access layer wired against file-backed client storage and the HTTP
/// profile service. The guard and the gate share one session accessor.
pub struct AccessServices {
    pub sessions: Sessions,
    pub guard: RouteGuard<Sessions>,
    pub gate: Arc<ProfileGate<Sessions, HttpProfileService>>,
}

impl AccessServices {
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.storage.path);
        let sessions = Arc::new(StoredSession::new(storage));

        let profile_service = HttpProfileService::new(&config.profile_service)
            .context("failed to build profile service client")?;

        let guard = RouteGuard::new(sessions.clone());
        let gate = Arc::new(ProfileGate::new(sessions.clone(), profile_service));

        info!(
            storage = %config.storage.path,
            profile_service = %config.profile_service.base_url,
            "access services ready"
        );

        Ok(Self {
            sessions,
            guard,
            gate,
        })
    }
}
