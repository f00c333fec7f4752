//! File-management backend client.
//!
//! `AuthCache` owns the single bearer credential; `TaskSubmitter` and
//! `RefreshTrigger` borrow it through `get_credential`/`invalidate` only.

mod auth;
mod refresh;
mod submitter;
mod types;

pub use auth::AuthCache;
pub use refresh::RefreshTrigger;
pub use submitter::TaskSubmitter;
pub use types::*;
