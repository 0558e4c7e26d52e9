//! Raw per-video records in the shape of a `videos.list` item

use serde::{Deserialize, Deserializer, Serialize};

/// Read-only view of a platform video resource.
///
/// The normalizer only depends on this trait, so records can come from the
/// live API, a fixture file or a hand-built test value.
pub trait VideoResource {
    fn id(&self) -> &str;
    fn snippet(&self) -> Option<&RawSnippet>;
    fn content_details(&self) -> Option<&RawContentDetails>;
    fn statistics(&self) -> Option<&RawStatistics>;
}

/// One item of a `videos.list` response with the `snippet`,
/// `contentDetails` and `statistics` parts requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<RawSnippet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_details: Option<RawContentDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<RawStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnippet {
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContentDetails {
    /// ISO-8601 duration, e.g. `PT5M30S`
    #[serde(default)]
    pub duration: Option<String>,
}

/// Engagement counters. The API encodes them as decimal strings and omits
/// any counter the owner has hidden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatistics {
    #[serde(default, deserialize_with = "count_as_string")]
    pub view_count: Option<String>,
    #[serde(default, deserialize_with = "count_as_string")]
    pub like_count: Option<String>,
    #[serde(default, deserialize_with = "count_as_string")]
    pub comment_count: Option<String>,
}

/// Accept both `"123"` and `123`
fn count_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl RawVideoRecord {
    /// Build a complete record, mostly useful for fixtures
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        channel: impl Into<String>,
        published_at: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            snippet: Some(RawSnippet {
                published_at: Some(published_at.into()),
                title: Some(title.into()),
                channel_title: Some(channel.into()),
            }),
            content_details: Some(RawContentDetails {
                duration: Some(duration.into()),
            }),
            statistics: Some(RawStatistics::default()),
        }
    }

    /// Set the engagement counters
    pub fn with_statistics(mut self, views: u64, likes: u64, comments: u64) -> Self {
        self.statistics = Some(RawStatistics {
            view_count: Some(views.to_string()),
            like_count: Some(likes.to_string()),
            comment_count: Some(comments.to_string()),
        });
        self
    }
}

impl VideoResource for RawVideoRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn snippet(&self) -> Option<&RawSnippet> {
        self.snippet.as_ref()
    }

    fn content_details(&self) -> Option<&RawContentDetails> {
        self.content_details.as_ref()
    }

    fn statistics(&self) -> Option<&RawStatistics> {
        self.statistics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_item() {
        let json = r#"{
            "kind": "youtube#video",
            "id": "abc123",
            "snippet": {
                "publishedAt": "2024-03-01T12:00:00Z",
                "title": "Rust ownership explained",
                "channelTitle": "Rustacean Station",
                "description": "ignored"
            },
            "contentDetails": { "duration": "PT12M4S", "definition": "hd" },
            "statistics": { "viewCount": "1500", "likeCount": 120, "favoriteCount": "0" }
        }"#;

        let record: RawVideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id(), "abc123");
        assert_eq!(
            record.snippet().unwrap().channel_title.as_deref(),
            Some("Rustacean Station")
        );
        assert_eq!(record.content_details().unwrap().duration.as_deref(), Some("PT12M4S"));

        let stats = record.statistics().unwrap();
        assert_eq!(stats.view_count.as_deref(), Some("1500"));
        assert_eq!(stats.like_count.as_deref(), Some("120"));
        assert_eq!(stats.comment_count, None);
    }

    #[test]
    fn test_missing_parts_deserialize_as_none() {
        let record: RawVideoRecord = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(record.snippet().is_none());
        assert!(record.content_details().is_none());
        assert!(record.statistics().is_none());
    }
}
