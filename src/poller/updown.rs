//! Uptime monitor poller (updown.io checks)

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::models::CloudStatus;
use crate::poller::{FetchError, Poller, get_json};
use crate::record::RecordWriter;

#[derive(Deserialize, Debug, Clone)]
pub struct Check {
    pub url: String,
    pub down: bool,
    #[serde(default)]
    pub down_since: Option<String>,
}

/// Down if any check is down; the first such check in response order wins
pub fn aggregate(checks: &[Check]) -> CloudStatus {
    match checks.iter().find(|check| check.down) {
        Some(check) => CloudStatus {
            is_down: true,
            down_since: check.down_since.clone().unwrap_or_default(),
            down_url: check.url.clone(),
        },
        None => CloudStatus::default(),
    }
}

pub struct UpdownPoller {
    url: String,
    timeout: Duration,
    record: RecordWriter<CloudStatus>,
}

impl UpdownPoller {
    pub fn new(url: String, timeout: Duration, record: RecordWriter<CloudStatus>) -> Self {
        Self {
            url,
            timeout,
            record,
        }
    }

    async fn fetch(&self) -> Result<CloudStatus, FetchError> {
        let checks: Vec<Check> = get_json(self.url.clone(), None, self.timeout).await?;
        Ok(aggregate(&checks))
    }
}

#[async_trait]
impl Poller for UpdownPoller {
    fn name(&self) -> &'static str {
        "updown"
    }

    async fn refresh(&self) {
        match self.fetch().await {
            Ok(status) => {
                if status.is_down {
                    tracing::info!(
                        "updown.io status: {} down since {}",
                        status.down_url,
                        status.down_since
                    );
                }
                self.record.update(status);
            }
            Err(e) => {
                tracing::error!("Error getting updown.io status: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(url: &str, down: bool, since: Option<&str>) -> Check {
        Check {
            url: url.to_string(),
            down,
            down_since: since.map(str::to_string),
        }
    }

    #[test]
    fn test_all_up() {
        let checks = vec![
            check("https://a.example", false, None),
            check("https://b.example", false, None),
        ];
        assert_eq!(aggregate(&checks), CloudStatus::default());
    }

    #[test]
    fn test_empty_is_up() {
        assert!(!aggregate(&[]).is_down);
    }

    #[test]
    fn test_first_down_check_wins() {
        let checks = vec![
            check("https://a.example", false, None),
            check("https://b.example", true, Some("2024-03-01T10:00:00Z")),
            check("https://c.example", true, Some("2024-02-01T10:00:00Z")),
            check("https://d.example", false, None),
        ];

        let status = aggregate(&checks);
        assert!(status.is_down);
        assert_eq!(status.down_url, "https://b.example");
        assert_eq!(status.down_since, "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_parse_checks_with_null_down_since() {
        let checks: Vec<Check> = serde_json::from_str(
            r#"[
                {"token":"ab12","url":"https://a.example","down":false,"down_since":null},
                {"token":"cd34","url":"https://b.example","down":true,"down_since":"2024-03-01T10:00:00Z"}
            ]"#,
        )
        .unwrap();

        let status = aggregate(&checks);
        assert!(status.is_down);
        assert_eq!(status.down_url, "https://b.example");
    }
}
