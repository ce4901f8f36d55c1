//! Administrative back office
//!
//! [`AdminPanel`] drives four independent views over one data-loading cycle:
//!
//! - **Sections**: read-only cards with a per-section channel count
//! - **Channels**: create, delete and list
//! - **Playlists**: create and list; URLs are stored without being fetched
//! - **Settings**: in-place update of the singleton settings row
//!
//! Every successful create or delete is followed by a full reload rather than
//! a local patch of the snapshot. Settings saves do not reload so the form
//! keeps what the operator typed.

pub mod channels;
pub mod loader;
pub mod panel;
pub mod playlists;
pub mod sections;
pub mod settings;

pub use channels::{ChannelCard, ChannelDraft, ChannelStatus};
pub use loader::{load_admin_data, AdminData, LoadFailure, LoadReport};
pub use panel::{AdminPanel, LogoutOutcome, MutationOutcome, PanelOptions, PanelPhase};
pub use playlists::{PlaylistCard, PlaylistDraft};
pub use sections::{section_cards, SectionCard};
pub use settings::SettingsForm;
