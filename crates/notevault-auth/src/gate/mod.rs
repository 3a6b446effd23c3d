//! Per-request authentication.
//!
//! [`AuthenticationGate`] turns an `Authorization` header into a
//! [`GateOutcome`]; [`AccessPolicy`] says whether the target route accepts
//! an anonymous caller. The HTTP layer combines the two.

pub mod authenticator;
pub mod lookup;
pub mod policy;

pub use authenticator::{AuthenticationGate, GateOutcome, RejectReason, bearer_token};
pub use lookup::{IdentityLookup, UserStoreLookup};
pub use policy::{AccessPolicy, AccessRule};
