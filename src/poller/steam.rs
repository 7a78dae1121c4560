//! Game profile poller (Steam player summaries)

use async_trait::async_trait;
use chrono::TimeZone;
use chrono_tz::Tz;
use serde::Deserialize;
use std::fmt::Display;
use std::time::Duration;

use crate::models::SteamProfile;
use crate::poller::{FetchError, Poller, get_json};
use crate::record::RecordWriter;
use crate::utils::timefmt::{format_last_seen, local_zone};

const STORE_APP_URL: &str = "https://store.steampowered.com/app/";

#[derive(Deserialize, Debug)]
pub struct PlayerSummariesResponse {
    pub response: PlayerSummaries,
}

#[derive(Deserialize, Debug)]
pub struct PlayerSummaries {
    pub players: Vec<Player>,
}

#[derive(Deserialize, Debug)]
pub struct Player {
    #[serde(default)]
    pub personastate: i64,
    #[serde(default)]
    pub personaname: String,
    #[serde(default)]
    pub profileurl: String,
    #[serde(default)]
    pub avatarfull: String,
    #[serde(default)]
    pub lastlogoff: i64,
    #[serde(default)]
    pub gameextrainfo: String,
    #[serde(default)]
    pub gameid: String,
}

/// Label for a Steam persona state code
pub fn persona_state_label(code: i64) -> &'static str {
    match code {
        0 => "Offline",
        1 => "Online",
        2 => "Busy",
        3 => "Away",
        4 => "Snooze",
        5 => "Looking to trade",
        6 => "Looking to play",
        _ => "Unknown",
    }
}

/// Maps the first player of a summaries response into a snapshot
pub fn map_profile<Z>(resp: PlayerSummariesResponse, tz: &Z) -> Result<SteamProfile, FetchError>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let player = resp
        .response
        .players
        .into_iter()
        .next()
        .ok_or(FetchError::Empty("no players"))?;

    let is_gaming = !player.gameid.is_empty();
    let (game_extra_info, game_url) = if is_gaming {
        (
            player.gameextrainfo,
            format!("{}{}", STORE_APP_URL, player.gameid),
        )
    } else {
        (String::new(), String::new())
    };

    Ok(SteamProfile {
        persona_state: persona_state_label(player.personastate).to_string(),
        persona_name: player.personaname,
        profile_url: player.profileurl,
        avatar: player.avatarfull,
        last_logoff: format_last_seen(player.lastlogoff, tz),
        is_gaming,
        game_extra_info,
        game_url,
    })
}

pub struct SteamPoller {
    url: String,
    timeout: Duration,
    zone: Tz,
    record: RecordWriter<SteamProfile>,
}

impl SteamPoller {
    pub fn new(url: String, timeout: Duration, record: RecordWriter<SteamProfile>) -> Self {
        Self {
            url,
            timeout,
            zone: local_zone(),
            record,
        }
    }

    async fn fetch(&self) -> Result<SteamProfile, FetchError> {
        let resp: PlayerSummariesResponse = get_json(self.url.clone(), None, self.timeout).await?;
        map_profile(resp, &self.zone)
    }
}

#[async_trait]
impl Poller for SteamPoller {
    fn name(&self) -> &'static str {
        "steam"
    }

    async fn refresh(&self) {
        match self.fetch().await {
            Ok(profile) => {
                tracing::debug!("steam profile: {:?}", profile);
                self.record.update(profile);
            }
            Err(e) => {
                tracing::error!("Error fetching steam status: {}", e);
            }
        }
    }
}
