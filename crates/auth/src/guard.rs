//! Role-based route guard.

use tracing::debug;

use crate::role::{Role, RoleRouteMap, LOGIN_ROUTE};
use crate::session::SessionProvider;

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Decision::Allow => None,
            Decision::Redirect(target) => Some(target),
        }
    }
}

/// Decides whether the current session may enter a protected route.
///
/// Apart from the corruption cleanup done by the session provider, the guard
/// is a pure function of the stored session and the required roles.
pub struct RouteGuard<P> {
    sessions: P,
}

impl<P: SessionProvider> RouteGuard<P> {
    pub fn new(sessions: P) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &P {
        &self.sessions
    }

    pub fn authorize(&self, required: &[Role]) -> Decision {
        let session = match self.sessions.read() {
            Ok(session) if session.authenticated => session,
            Ok(_) => {
                debug!("session not authenticated, redirecting to login");
                return Decision::Redirect(LOGIN_ROUTE);
            }
            Err(error) => {
                debug!(%error, "no valid session, redirecting to login");
                return Decision::Redirect(LOGIN_ROUTE);
            }
        };

        let role = session.user.role();
        if role.is_some_and(|role| required.contains(&role)) {
            return Decision::Allow;
        }

        let target = RoleRouteMap::route_for(role);
        debug!(role = ?session.user.role, ?required, redirect = target, "role not permitted");
        Decision::Redirect(target)
    }
}
