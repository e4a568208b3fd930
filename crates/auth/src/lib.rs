//! # Campus Auth
//!
//! Client-side session access and role-based route guarding.
//!
//! - **storage**: browser-style key/value storage (in-memory and file-backed)
//! - **session**: reads, stores, and clears the persisted session
//! - **role**: the role enumeration and its dashboard route table
//! - **guard**: turns the current session into allow/redirect decisions
//!
//! ```
//! use campus_auth::{Decision, MemoryStorage, Role, RouteGuard, Session, StoredSession, User};
//!
//! let sessions = StoredSession::new(MemoryStorage::new());
//! sessions.store(&Session::new("t1", User::new(Role::Employer))).unwrap();
//!
//! let guard = RouteGuard::new(sessions);
//! assert_eq!(guard.authorize(&[Role::Student]), Decision::Redirect("/employer"));
//! ```

pub mod guard;
pub mod role;
pub mod session;
pub mod storage;

pub use guard::{Decision, RouteGuard};
pub use role::{Role, RoleRouteMap, UnknownRole, LOGIN_ROUTE, ROOT_ROUTE};
pub use session::{Session, SessionError, SessionProvider, StoredSession, User};
pub use storage::{ClientStorage, FileStorage, MemoryStorage, StorageError};
