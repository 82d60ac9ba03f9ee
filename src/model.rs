use serde::{Deserialize, Serialize};

/// Current state of the analyze/download flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DownloadStatus {
    /// Waiting for a URL
    #[default]
    Idle,
    /// Metadata request in flight
    Analyzing,
    /// Metadata received, waiting for a quality pick
    Ready,
    /// Simulated transfer running
    Downloading,
    /// Simulated transfer finished
    Completed,
    /// Metadata request failed
    Error,
}

impl DownloadStatus {
    /// Input and submit controls are disabled while busy
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Analyzing | Self::Downloading)
    }
}

/// One selectable quality variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityOption {
    /// e.g. "1080p"
    pub label: String,
    /// Display size, e.g. "245 MB"
    pub size: String,
    /// Container, e.g. "MP4"
    pub format: String,
}

/// Video metadata as produced by the metadata service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
    pub platform: String,
    /// Display string, e.g. "12:34"
    pub duration: String,
    pub thumbnail_url: String,
    pub available_qualities: Vec<QualityOption>,
}

impl VideoMetadata {
    /// Size of the first quality option, shown as the estimated size
    pub fn estimated_size(&self) -> &str {
        self.available_qualities
            .first()
            .map(|q| q.size.as_str())
            .unwrap_or("---")
    }

    /// Thumbnail to display; falls back to a placeholder seeded by the title
    pub fn thumbnail_source(&self) -> String {
        if self.thumbnail_url.trim().is_empty() {
            format!("https://picsum.photos/seed/{}/400/400", self.title)
        } else {
            self.thumbnail_url.clone()
        }
    }
}

/// Entry in the recent activity list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentDownload {
    /// Opaque token
    pub id: String,
    pub url: String,
    pub title: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub status: DownloadStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VideoMetadata {
        VideoMetadata {
            title: "Rust in 100 Seconds".to_string(),
            author: "Fireship".to_string(),
            platform: "YouTube".to_string(),
            duration: "2:18".to_string(),
            thumbnail_url: String::new(),
            available_qualities: vec![
                QualityOption {
                    label: "1080p".to_string(),
                    size: "48 MB".to_string(),
                    format: "MP4".to_string(),
                },
                QualityOption {
                    label: "720p".to_string(),
                    size: "24 MB".to_string(),
                    format: "MP4".to_string(),
                },
            ],
        }
    }

    #[test]
    fn parses_service_json_shape() {
        let json = r#"{
            "title": "Clip",
            "author": "Someone",
            "platform": "Vimeo",
            "duration": "1:02",
            "thumbnailUrl": "https://i.vimeocdn.com/x.jpg",
            "availableQualities": [{"label": "720p", "size": "10 MB", "format": "MP4"}]
        }"#;
        let meta: VideoMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.thumbnail_url, "https://i.vimeocdn.com/x.jpg");
        assert_eq!(meta.available_qualities[0].label, "720p");
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"title": "Clip", "author": "Someone"}"#;
        assert!(serde_json::from_str::<VideoMetadata>(json).is_err());
    }

    #[test]
    fn status_uses_upper_case_names() {
        assert_eq!(
            serde_json::to_string(&DownloadStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        let s: DownloadStatus = serde_json::from_str("\"ANALYZING\"").unwrap();
        assert_eq!(s, DownloadStatus::Analyzing);
    }

    #[test]
    fn estimated_size_falls_back() {
        let mut meta = sample();
        assert_eq!(meta.estimated_size(), "48 MB");
        meta.available_qualities.clear();
        assert_eq!(meta.estimated_size(), "---");
    }

    #[test]
    fn blank_thumbnail_uses_placeholder() {
        let mut meta = sample();
        assert_eq!(
            meta.thumbnail_source(),
            "https://picsum.photos/seed/Rust in 100 Seconds/400/400"
        );
        meta.thumbnail_url = "https://img.example/t.jpg".to_string();
        assert_eq!(meta.thumbnail_source(), "https://img.example/t.jpg");
    }

    #[test]
    fn busy_states() {
        assert!(DownloadStatus::Analyzing.is_busy());
        assert!(DownloadStatus::Downloading.is_busy());
        assert!(!DownloadStatus::Ready.is_busy());
        assert!(!DownloadStatus::Idle.is_busy());
    }
}
