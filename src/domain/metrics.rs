use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counter {
    pub total: i64,
    pub change: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostCounter {
    pub total: i64,
    pub videos: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub posts: PostCounter,
    pub likes: Counter,
    pub comments: Counter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveUsers {
    pub current: i64,
    pub change: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total: i64,
    pub unverified: i64,
    pub active: ActiveUsers,
    pub connected: Counter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsOverview {
    /// Report count per kind.
    pub distribution: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "_id")]
    pub label: String,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportAnalytics {
    pub trend: Vec<SeriesPoint>,
    pub distribution: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Growth {
    pub user: Vec<SeriesPoint>,
    pub post: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Registrations {
    /// Accounts created in the last 30 days.
    pub new_registrations: i64,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analytics {
    pub engagement: BTreeMap<String, i64>,
    pub registrations: Registrations,
    pub chats: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageAnalytics {
    pub trend: Vec<SeriesPoint>,
    /// Message count per message type.
    #[serde(rename = "type")]
    pub kinds: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallsDistribution {
    pub audio: i64,
    pub video: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentDistribution {
    pub posts: i64,
    pub videos: i64,
    pub comments: i64,
    pub calls: i64,
    pub calls_distribution: CallsDistribution,
}

/// Aggregation window accepted by the analytics endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub const GROWTH: [Period; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];
    pub const REPORTS: [Period; 3] = [Self::Weekly, Self::Monthly, Self::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analytics_payloads_decode_with_missing_parts() {
        let messages: MessageAnalytics = serde_json::from_value(json!({
            "trend": [{ "_id": "2024-03", "count": 40 }],
            "type": [{ "_id": "text", "count": 35 }, { "_id": "image", "count": 5 }]
        }))
        .unwrap();
        assert_eq!(messages.kinds.len(), 2);
        assert_eq!(messages.trend[0].label, "2024-03");

        let content: ContentDistribution = serde_json::from_value(json!({
            "posts": 10,
            "callsDistribution": { "audio": 3 }
        }))
        .unwrap();
        assert_eq!(content.posts, 10);
        assert_eq!(content.calls_distribution, CallsDistribution { audio: 3, video: 0 });

        let analytics: Analytics = serde_json::from_value(json!({})).unwrap();
        assert_eq!(analytics, Analytics::default());
    }
}
