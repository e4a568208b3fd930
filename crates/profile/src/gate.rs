//! Profile gate wrapped around dashboard content.
//!
//! The gate is a three-state machine, `Loading -> {Complete, Incomplete}`,
//! driven by the completion checker. Only colleges are held at the onboarding
//! form; every other role sees its content once the check has resolved.

use async_trait::async_trait;
use campus_auth::{Role, SessionProvider};
use tracing::debug;

use crate::checker::ProfileCompletionChecker;
use crate::service::ProfileService;
use crate::verdict::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Complete,
    Incomplete,
}

impl From<Verdict> for GateState {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Unknown => GateState::Loading,
            Verdict::Complete => GateState::Complete,
            Verdict::Incomplete => GateState::Incomplete,
        }
    }
}

/// What the gate shows in place of its wrapped content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Onboarding,
    Protected,
}

pub fn render(role: Option<Role>, verdict: Verdict) -> View {
    match (GateState::from(verdict), role) {
        (GateState::Loading, _) => View::Loading,
        (GateState::Incomplete, Some(Role::College)) => View::Onboarding,
        _ => View::Protected,
    }
}

/// Borrowed content as seen through the gate.
#[derive(Debug, PartialEq, Eq)]
pub enum Gated<'a, T: ?Sized> {
    Loading,
    Onboarding,
    Content(&'a T),
}

/// Callback handed to the onboarding form, invoked after a successful submission.
#[async_trait]
pub trait ProfileCompleteHandler: Send + Sync {
    async fn on_profile_complete(&self) -> View;
}

pub struct ProfileGate<P, S> {
    checker: ProfileCompletionChecker<P, S>,
}

impl<P, S> ProfileGate<P, S>
where
    P: SessionProvider,
    S: ProfileService,
{
    pub fn new(sessions: P, service: S) -> Self {
        Self::with_checker(ProfileCompletionChecker::new(sessions, service))
    }

    pub fn with_checker(checker: ProfileCompletionChecker<P, S>) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> &ProfileCompletionChecker<P, S> {
        &self.checker
    }

    pub fn state(&self) -> GateState {
        self.checker.verdict().into()
    }

    /// Runs the initial completion check.
    pub async fn mount(&self) -> View {
        self.checker.check_completion().await;
        self.view()
    }

    pub fn view(&self) -> View {
        let role = self
            .checker
            .sessions()
            .read()
            .ok()
            .and_then(|session| session.user.role());
        let view = render(role, self.checker.verdict());
        debug!(?role, ?view, "profile gate rendered");
        view
    }

    pub fn wrap<'a, T: ?Sized>(&self, content: &'a T) -> Gated<'a, T> {
        match self.view() {
            View::Loading => Gated::Loading,
            View::Onboarding => Gated::Onboarding,
            View::Protected => Gated::Content(content),
        }
    }
}

#[async_trait]
impl<P, S> ProfileCompleteHandler for ProfileGate<P, S>
where
    P: SessionProvider,
    S: ProfileService,
{
    async fn on_profile_complete(&self) -> View {
        self.checker.refetch().await;
        self.view()
    }
}
