//! Page behavior guards.
//!
//! Three guards wired once per page load:
//!
//! - **Editor lock** ([`editor_guard`]): only one edit link may navigate until
//!   a cancel control is clicked
//! - **Field validation** ([`form_guard`]): required and numeric-range checks
//!   on every form submit
//! - **Destructive confirmation** ([`confirmer`]): delete forms ask first
//!
//! [`PageController`] registers them against a [`PageHost`] and dispatches
//! events in registration order.
//!
//! [`PageHost`]: pageguard_model::PageHost

pub mod confirmer;
pub mod controller;
pub mod editor_guard;
pub mod form_guard;
pub mod lock;
pub mod replay;

pub use controller::{Dispatch, Handler, Listener, PageController, WiringSummary};
pub use lock::{EditorLock, LockDecision, PageSession, SessionStats};
pub use replay::{Effect, ReplayLog, ReplayStep, replay};
