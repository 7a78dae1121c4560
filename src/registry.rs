//! Process-wide set of status records
//!
//! Built once at startup. The [`Writers`] half is taken apart and each
//! writer moved into its owning task; the [`Readers`] half is cloned into
//! the HTTP state.

use crate::models::{CloudStatus, DiscordStatus, SteamProfile, ValorantProfile, Workstation};
use crate::record::{RecordReader, RecordWriter, StatusRecord};

#[derive(Debug)]
pub struct Writers {
    pub steam: RecordWriter<SteamProfile>,
    pub cloud: RecordWriter<CloudStatus>,
    pub valorant: RecordWriter<ValorantProfile>,
    pub discord: RecordWriter<DiscordStatus>,
    pub workstation: RecordWriter<Workstation>,
}

#[derive(Debug, Clone)]
pub struct Readers {
    pub steam: RecordReader<SteamProfile>,
    pub cloud: RecordReader<CloudStatus>,
    pub valorant: RecordReader<ValorantProfile>,
    pub discord: RecordReader<DiscordStatus>,
    pub workstation: RecordReader<Workstation>,
}

/// Creates every record empty and returns its two halves
pub fn registry() -> (Writers, Readers) {
    let (steam_w, steam_r) = StatusRecord::split(SteamProfile::default());
    let (cloud_w, cloud_r) = StatusRecord::split(CloudStatus::default());
    let (valorant_w, valorant_r) = StatusRecord::split(ValorantProfile::default());
    let (discord_w, discord_r) = StatusRecord::split(DiscordStatus::default());
    let (workstation_w, workstation_r) = StatusRecord::split(Workstation::default());

    (
        Writers {
            steam: steam_w,
            cloud: cloud_w,
            valorant: valorant_w,
            discord: discord_w,
            workstation: workstation_w,
        },
        Readers {
            steam: steam_r,
            cloud: cloud_r,
            valorant: valorant_r,
            discord: discord_r,
            workstation: workstation_r,
        },
    )
}
