//! # Campus Profile
//!
//! Profile-completion gating for role dashboards.
//!
//! - **service**: the remote profile seam and the per-role required fields
//! - **http**: the reqwest-backed profile service
//! - **checker**: turns session + profile into a completion verdict
//! - **gate**: decides between loading, onboarding, and the protected content

pub mod checker;
pub mod gate;
pub mod http;
pub mod service;
pub mod verdict;

pub use checker::ProfileCompletionChecker;
pub use gate::{render, GateState, Gated, ProfileCompleteHandler, ProfileGate, View};
pub use http::HttpProfileService;
pub use service::{ProfileError, ProfileKind, ProfileRecord, ProfileService};
pub use verdict::Verdict;
