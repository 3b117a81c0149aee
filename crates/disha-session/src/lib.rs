//! Client-side session handling for the Disha web app.
//!
//! Holds the authenticated identity in memory, mirrored through persisted
//! storage, and drives the route guards. The persisted representation is
//! authoritative: memory is derived from it on initialization and every
//! mutation writes through both layers in one step.

pub mod client;
pub mod context;
pub mod guard;
pub mod principal;
pub mod storage;
pub mod user;

pub use context::{Session, SessionContext, SessionState};
pub use guard::GuardDecision;
pub use principal::Principal;
pub use user::SessionUser;
