//! Plain text projections served on `/<service>.text`

use crate::models::{CloudStatus, DiscordStatus, SteamProfile, ValorantProfile, Workstation};
use crate::utils::timefmt::{format_clock, local_zone};

pub trait TextView {
    fn render_text(&self) -> String;
}

impl TextView for SteamProfile {
    fn render_text(&self) -> String {
        let mut out = format!("Status: {}\n", self.persona_state);
        if self.is_gaming {
            out += &format!("Game: {}\n", self.game_extra_info);
        }
        out += &format!("Last logoff: {}\n", self.last_logoff);
        out
    }
}

impl TextView for CloudStatus {
    fn render_text(&self) -> String {
        if self.is_down {
            format!("Cloud: Outage since {}\n", self.down_since)
        } else {
            "Cloud: All Systems Operational\n".to_string()
        }
    }
}

impl TextView for Workstation {
    fn render_text(&self) -> String {
        let mut out = String::new();
        if !self.status.is_empty() {
            out += &format!("{}\n", self.status);
        }
        match &self.last_update {
            Some(at) => out += &format!("Last Update: {}", format_clock(at, &local_zone())),
            None => out += "Last Update: never",
        }
        out
    }
}

impl TextView for ValorantProfile {
    fn render_text(&self) -> String {
        format!(
            "Username: {}#{}\nRegion: {}\nElo: {}\nCurrent Rank: {}\nHighest Rank: {}\n",
            self.name,
            self.tag,
            self.region.to_uppercase(),
            self.elo,
            self.current_rank,
            self.highest_rank,
        )
    }
}

impl TextView for DiscordStatus {
    fn render_text(&self) -> String {
        let mut out = String::new();
        if !self.status_desk.is_empty() {
            out += &format!("Desktop: {}\n", self.status_desk);
        }
        if !self.status_web.is_empty() {
            out += &format!("Web: {}\n", self.status_web);
        }
        if !self.status_mobile.is_empty() {
            out += &format!("Mobile: {}\n", self.status_mobile);
        }
        if out.is_empty() {
            out += "Currently offline\n";
        }
        if !self.custom_status.is_empty() {
            out += &format!("Custom Status: {}\n", self.custom_status);
        }
        out += &format!("Last Update: {}", self.updated_at);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steam_text() {
        let mut profile = SteamProfile {
            persona_state: "Online".to_string(),
            last_logoff: "2023-11-14 22:13:20 UTC".to_string(),
            game_extra_info: "Portal".to_string(),
            ..Default::default()
        };
        assert_eq!(
            profile.render_text(),
            "Status: Online\nLast logoff: 2023-11-14 22:13:20 UTC\n"
        );

        profile.is_gaming = true;
        assert_eq!(
            profile.render_text(),
            "Status: Online\nGame: Portal\nLast logoff: 2023-11-14 22:13:20 UTC\n"
        );
    }

    #[test]
    fn test_cloud_text() {
        assert_eq!(
            CloudStatus::default().render_text(),
            "Cloud: All Systems Operational\n"
        );
        let down = CloudStatus {
            is_down: true,
            down_since: "2024-03-01T10:00:00Z".to_string(),
            down_url: "https://a.example".to_string(),
        };
        assert_eq!(down.render_text(), "Cloud: Outage since 2024-03-01T10:00:00Z\n");
    }

    #[test]
    fn test_workstation_text_before_first_push() {
        assert_eq!(Workstation::default().render_text(), "Last Update: never");
    }

    #[test]
    fn test_workstation_text() {
        let workstation = Workstation {
            status: "compiling".to_string(),
            last_update: Some(chrono::Local::now()),
        };
        let text = workstation.render_text();
        assert!(text.starts_with("compiling\nLast Update: "));
    }

    #[test]
    fn test_valorant_text() {
        let profile = ValorantProfile {
            name: "ezri".to_string(),
            tag: "0001".to_string(),
            region: "na".to_string(),
            current_rank: "Diamond 1".to_string(),
            highest_rank: "Ascendant 1".to_string(),
            elo: 1542,
        };
        assert_eq!(
            profile.render_text(),
            "Username: ezri#0001\nRegion: NA\nElo: 1542\nCurrent Rank: Diamond 1\nHighest Rank: Ascendant 1\n"
        );
    }

    #[test]
    fn test_discord_text_offline() {
        let status = DiscordStatus {
            updated_at: "2024-03-01T10:00:00+00:00".to_string(),
            ..Default::default()
        };
        assert_eq!(
            status.render_text(),
            "Currently offline\nLast Update: 2024-03-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_discord_text_online() {
        let status = DiscordStatus {
            status_desk: "online".to_string(),
            status_mobile: "idle".to_string(),
            custom_status: "Playing Portal".to_string(),
            updated_at: "2024-03-01T10:00:00+00:00".to_string(),
            ..Default::default()
        };
        assert_eq!(
            status.render_text(),
            "Desktop: online\nMobile: idle\nCustom Status: Playing Portal\nLast Update: 2024-03-01T10:00:00+00:00"
        );
    }
}
