//! Status snapshots published over HTTP
//!
//! Each struct is the complete value of one record. `Default` is the zero
//! snapshot readers see before the owning writer has succeeded once.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Game platform profile
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SteamProfile {
    pub persona_state: String,
    pub persona_name: String,
    pub profile_url: String,
    pub avatar: String,
    pub last_logoff: String,
    pub is_gaming: bool,
    pub game_extra_info: String,
    pub game_url: String,
}

/// Aggregated uptime across all monitored checks
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CloudStatus {
    pub is_down: bool,
    pub down_since: String,
    /// URL of the first check reporting down
    pub down_url: String,
}

/// Competitive ranking profile
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ValorantProfile {
    pub name: String,
    pub tag: String,
    pub region: String,
    pub current_rank: String,
    pub highest_rank: String,
    pub elo: i64,
}

/// Chat platform rich presence
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct DiscordStatus {
    pub status_desk: String,
    pub status_web: String,
    pub status_mobile: String,
    pub custom_status: String,
    pub status_emoji: String,
    pub updated_at: String,
}

/// Workstation signal pushed through `POST /workstation`
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Workstation {
    pub status: String,
    #[serde(rename = "lastUpdate")]
    pub last_update: Option<DateTime<Local>>,
}
