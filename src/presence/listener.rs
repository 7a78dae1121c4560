use tokio::sync::mpsc;

use crate::models::DiscordStatus;
use crate::presence::models::{Activity, ActivityEmoji, ActivityKind, PresenceUpdate};
use crate::record::RecordWriter;
use crate::utils::timefmt::now_rfc3339;

const EMOJI_CDN_URL: &str = "https://cdn.discordapp.com/emojis/";
const CUSTOM_STATUS_NAME: &str = "Custom Status";

/// Sole writer of the chat presence record
///
/// Consumes presence events from the gateway channel and applies those that
/// name the tracked user. Fields an event does not touch carry over from the
/// previous snapshot.
pub struct PresenceListener {
    tracked_user: String,
    record: RecordWriter<DiscordStatus>,
}

impl PresenceListener {
    pub fn new(tracked_user: String, record: RecordWriter<DiscordStatus>) -> Self {
        Self {
            tracked_user,
            record,
        }
    }

    /// Applies one event; returns whether the record was updated
    pub fn handle(&self, event: &PresenceUpdate) -> bool {
        if event.user.id != self.tracked_user {
            return false;
        }

        let mut status = self.record.read();
        status.status_desk = event.client_status.desktop.clone().unwrap_or_default();
        status.status_web = event.client_status.web.clone().unwrap_or_default();
        status.status_mobile = event.client_status.mobile.clone().unwrap_or_default();

        resolve_custom_status(&event.activities, &mut status);

        status.updated_at = now_rfc3339();
        self.record.update(status);
        tracing::info!("Discord status updated");
        true
    }

    pub async fn run(self, mut events: mpsc::Receiver<PresenceUpdate>) {
        while let Some(event) = events.recv().await {
            self.handle(&event);
        }
        tracing::info!("Presence listener stopped");
    }
}

/// Scans activities in order and sets the custom status fields.
///
/// A game sets "Playing {name}" and keeps scanning, a named custom status
/// sets text and emoji and stops the scan, anything else clears both. A
/// trailing unmatched activity therefore erases an earlier game.
pub fn resolve_custom_status(activities: &[Activity], status: &mut DiscordStatus) {
    for activity in activities {
        match activity.kind {
            ActivityKind::Playing => {
                status.custom_status = format!("Playing {}", activity.name);
                status.status_emoji.clear();
            }
            ActivityKind::Custom if activity.name == CUSTOM_STATUS_NAME => {
                status.custom_status = activity.state.clone().unwrap_or_default();
                status.status_emoji = emoji_url(activity.emoji.as_ref());
                break;
            }
            _ => {
                status.custom_status.clear();
                status.status_emoji.clear();
            }
        }
    }
}

fn emoji_url(emoji: Option<&ActivityEmoji>) -> String {
    // unicode emoji have no id and no CDN image
    let Some(emoji) = emoji else {
        return String::new();
    };
    let Some(id) = emoji.id.as_deref().filter(|id| !id.is_empty()) else {
        return String::new();
    };
    let ext = if emoji.animated { ".gif" } else { ".png" };
    format!("{}{}{}", EMOJI_CDN_URL, id, ext)
}
