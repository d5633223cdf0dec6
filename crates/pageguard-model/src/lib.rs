//! Shared types for pageguard.
//!
//! - [`PageHost`]: the capability every guard talks to instead of a browser
//! - [`GuardSettings`]: markers, hues and wording, loaded from TOML
//! - [`PageDom`] and [`PageFixture`]: an in-memory page for tests and the CLI

pub mod error;
pub mod fixture;
pub mod host;
pub mod memory;
pub mod messages;
pub mod settings;

pub use error::{GuardError, Result};
pub use fixture::{ButtonFixture, FieldFixture, FormFixture, Gesture, LinkFixture, PageFixture};
pub use host::{EventKind, EventOutcome, Hue, PageHost, Selector};
pub use memory::{NodeId, PageDom};
pub use messages::{Locale, Messages, format_number};
pub use settings::{
    AppearanceSettings, GuardSettings, MarkerSettings, MessageSettings, load_settings,
    settings_path,
};
