//! Profile completion checker.

use campus_auth::SessionProvider;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::service::{ProfileKind, ProfileService};
use crate::verdict::Verdict;

/// Derives a [`Verdict`] for the signed-in user from the remote profile service.
///
/// Every failure folds into `Incomplete`: a missing session, a missing profile,
/// and a failed request all ask the user to (re)supply their profile.
///
/// Overlapping checks are neither de-duplicated nor cancelled. Whichever call
/// resolves last overwrites the published verdict, even if it was issued first.
pub struct ProfileCompletionChecker<P, S> {
    sessions: P,
    service: S,
    verdict: watch::Sender<Verdict>,
}

impl<P, S> ProfileCompletionChecker<P, S>
where
    P: SessionProvider,
    S: ProfileService,
{
    pub fn new(sessions: P, service: S) -> Self {
        let (verdict, _) = watch::channel(Verdict::Unknown);
        Self {
            sessions,
            service,
            verdict,
        }
    }

    pub fn sessions(&self) -> &P {
        &self.sessions
    }

    /// The most recently published verdict.
    pub fn verdict(&self) -> Verdict {
        *self.verdict.borrow()
    }

    /// Observes verdict transitions, including resets to `Unknown`.
    pub fn subscribe(&self) -> watch::Receiver<Verdict> {
        self.verdict.subscribe()
    }

    pub async fn check_completion(&self) -> Verdict {
        let verdict = self.evaluate().await;
        self.verdict.send_replace(verdict);
        verdict
    }

    /// Resets the verdict to `Unknown` and runs a fresh check.
    pub async fn refetch(&self) -> Verdict {
        self.verdict.send_replace(Verdict::Unknown);
        self.check_completion().await
    }

    async fn evaluate(&self) -> Verdict {
        let session = match self.sessions.read() {
            Ok(session) if session.authenticated => session,
            Ok(_) => {
                debug!("session not authenticated, profile treated as incomplete");
                return Verdict::Incomplete;
            }
            Err(error) => {
                debug!(%error, "no valid session, profile treated as incomplete");
                return Verdict::Incomplete;
            }
        };

        let Some(kind) = session.user.role().and_then(ProfileKind::for_role) else {
            debug!(role = ?session.user.role, "profile completion not enforced for role");
            return Verdict::Complete;
        };

        match self.service.fetch_profile(kind, &session.token).await {
            Ok(Some(profile)) => {
                let missing = kind.missing_fields(&profile);
                let verdict = Verdict::from_complete(missing.is_empty());
                info!(?kind, ?missing, ?verdict, "profile checked");
                verdict
            }
            Ok(None) => {
                info!(?kind, "no profile on record");
                Verdict::Incomplete
            }
            Err(error) => {
                error!(?kind, %error, "profile check failed");
                Verdict::Incomplete
            }
        }
    }
}
