//! Ranking poller (Valorant MMR lookup)
//!
//! Every mapped field is required in the response, so a partial body fails
//! to parse and the whole update is skipped.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::models::ValorantProfile;
use crate::poller::{FetchError, Poller, get_json};
use crate::record::RecordWriter;

#[derive(Deserialize, Debug)]
pub struct MmrResponse {
    pub data: MmrData,
}

#[derive(Deserialize, Debug)]
pub struct MmrData {
    pub name: String,
    pub tag: String,
    pub current_data: CurrentData,
    pub highest_rank: HighestRank,
}

#[derive(Deserialize, Debug)]
pub struct CurrentData {
    pub currenttierpatched: String,
    pub elo: i64,
}

#[derive(Deserialize, Debug)]
pub struct HighestRank {
    pub patched_tier: String,
}

pub fn map_profile(resp: MmrResponse, region: &str) -> ValorantProfile {
    ValorantProfile {
        name: resp.data.name,
        tag: resp.data.tag,
        region: region.to_string(),
        current_rank: resp.data.current_data.currenttierpatched,
        highest_rank: resp.data.highest_rank.patched_tier,
        elo: resp.data.current_data.elo,
    }
}

pub struct ValorantPoller {
    url: String,
    key: String,
    region: String,
    timeout: Duration,
    record: RecordWriter<ValorantProfile>,
}

impl ValorantPoller {
    pub fn new(
        url: String,
        key: String,
        region: String,
        timeout: Duration,
        record: RecordWriter<ValorantProfile>,
    ) -> Self {
        Self {
            url,
            key,
            region,
            timeout,
            record,
        }
    }

    async fn fetch(&self) -> Result<ValorantProfile, FetchError> {
        let resp: MmrResponse =
            get_json(self.url.clone(), Some(self.key.clone()), self.timeout).await?;
        Ok(map_profile(resp, &self.region))
    }
}

#[async_trait]
impl Poller for ValorantPoller {
    fn name(&self) -> &'static str {
        "valorant"
    }

    async fn refresh(&self) {
        match self.fetch().await {
            Ok(profile) => {
                tracing::debug!("valorant profile: {:?}", profile);
                self.record.update(profile);
            }
            Err(e) => {
                tracing::error!("Error fetching valorant mmr: {}", e);
            }
        }
    }
}
