use std::collections::BTreeMap;

use crate::domain::metrics::{
    Analytics, ContentDistribution, DashboardStats, ReportsOverview, SeriesPoint, UserStats,
};

/// One stats card on an overview page.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsCard {
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub value: i64,
    /// Labelled sub-totals shown under the value, in display order.
    pub breakdown: Vec<(String, i64)>,
    /// Percentage change against the previous month.
    pub trend: Option<f64>,
}

impl StatsCard {
    fn new(title: &'static str, value: i64) -> Self {
        Self {
            title,
            description: None,
            value,
            breakdown: Vec::new(),
            trend: None,
        }
    }

    fn breakdown(mut self, label: impl Into<String>, value: i64) -> Self {
        self.breakdown.push((label.into(), value));
        self
    }

    fn trend(mut self, change: Option<f64>) -> Self {
        self.trend = change;
        self
    }

    fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// A card whose value is the sum of its breakdown.
    fn totalled(title: &'static str, parts: &BTreeMap<String, i64>) -> Self {
        parts
            .iter()
            .fold(Self::new(title, parts.values().sum()), |card, (label, count)| {
                card.breakdown(label.as_str(), *count)
            })
    }
}

pub fn dashboard_cards(stats: &DashboardStats) -> Vec<StatsCard> {
    let images = stats.posts.total - stats.posts.videos;
    vec![
        StatsCard::new("Total Posts", images)
            .breakdown("posts", images)
            .breakdown("videos", stats.posts.videos),
        StatsCard::new("Total Likes", stats.likes.total).trend(stats.likes.change),
        StatsCard::new("Total Comments", stats.comments.total).trend(stats.comments.change),
    ]
}

pub fn user_cards(stats: &UserStats) -> Vec<StatsCard> {
    vec![
        StatsCard::new("Total Users", stats.total)
            .breakdown("verified", stats.total - stats.unverified)
            .breakdown("unverified", stats.unverified),
        StatsCard::new("Active Users", stats.active.current)
            .trend(Some(stats.active.change.unwrap_or(0.0))),
        StatsCard::new("Connected Users", stats.connected.total)
            .trend(Some(stats.connected.change.unwrap_or(0.0))),
    ]
}

pub fn report_cards(overview: &ReportsOverview) -> Vec<StatsCard> {
    vec![StatsCard::totalled("Total Reports", &overview.distribution)]
}

pub fn analytics_cards(analytics: &Analytics) -> Vec<StatsCard> {
    vec![
        StatsCard::totalled("Engagement", &analytics.engagement),
        StatsCard::new("New Registrations", analytics.registrations.new_registrations)
            .describe("Last 30 days")
            .trend(analytics.registrations.percentage),
        StatsCard::totalled("Chats", &analytics.chats),
    ]
}

fn point(label: &str, count: i64) -> SeriesPoint {
    SeriesPoint {
        label: label.to_string(),
        count,
    }
}

/// Content counts per format, in display order.
pub fn content_breakdown(content: &ContentDistribution) -> Vec<SeriesPoint> {
    vec![
        point("Posts", content.posts),
        point("Videos", content.videos),
        point("Comments", content.comments),
        point("Calls", content.calls),
    ]
}

/// Audio and video calls followed by their total.
pub fn calls_breakdown(content: &ContentDistribution) -> Vec<SeriesPoint> {
    let calls = content.calls_distribution;
    vec![
        point("Audio Calls", calls.audio),
        point("Video Calls", calls.video),
        point("Total", calls.audio + calls.video),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::{ActiveUsers, Counter, PostCounter};

    #[test]
    fn total_posts_excludes_videos() {
        let cards = dashboard_cards(&DashboardStats {
            posts: PostCounter {
                total: 120,
                videos: 20,
            },
            likes: Counter {
                total: 900,
                change: Some(12.5),
            },
            comments: Counter::default(),
        });

        assert_eq!(cards[0].value, 100);
        assert_eq!(
            cards[0].breakdown,
            vec![("posts".to_string(), 100), ("videos".to_string(), 20)]
        );
        assert_eq!(cards[1].trend, Some(12.5));
        assert_eq!(cards[2].value, 0);
        assert_eq!(cards[2].trend, None);
    }

    #[test]
    fn user_cards_split_verified_accounts() {
        let cards = user_cards(&UserStats {
            total: 50,
            unverified: 8,
            active: ActiveUsers {
                current: 30,
                change: None,
            },
            connected: Counter {
                total: 4,
                change: Some(-2.0),
            },
        });

        assert_eq!(
            cards[0].breakdown,
            vec![("verified".to_string(), 42), ("unverified".to_string(), 8)]
        );
        assert_eq!(cards[1].trend, Some(0.0));
        assert_eq!(cards[2].trend, Some(-2.0));
    }

    #[test]
    fn total_reports_sums_the_distribution() {
        let overview: ReportsOverview = serde_json::from_value(serde_json::json!({
            "distribution": { "post": 4, "chat": 2, "user": 1 }
        }))
        .unwrap();

        let cards = report_cards(&overview);
        assert_eq!(cards[0].value, 7);
        assert_eq!(cards[0].breakdown.len(), 3);
        assert_eq!(report_cards(&ReportsOverview::default())[0].value, 0);
    }

    #[test]
    fn analytics_cards_total_their_breakdowns() {
        let analytics: Analytics = serde_json::from_value(serde_json::json!({
            "engagement": { "likes": 30, "comments": 12 },
            "registrations": { "newRegistrations": 9, "percentage": 12.0 },
            "chats": { "direct": 5, "group": 2 }
        }))
        .unwrap();

        let cards = analytics_cards(&analytics);
        assert_eq!(cards[0].value, 42);
        assert_eq!(cards[1].value, 9);
        assert_eq!(cards[1].trend, Some(12.0));
        assert_eq!(cards[1].description, Some("Last 30 days"));
        assert_eq!(cards[2].value, 7);
        assert_eq!(cards[2].breakdown.len(), 2);

        let empty = analytics_cards(&Analytics::default());
        assert_eq!(empty[0].value, 0);
        assert_eq!(empty[1].trend, None);
    }

    #[test]
    fn calls_breakdown_ends_with_the_total() {
        let content: ContentDistribution = serde_json::from_value(serde_json::json!({
            "posts": 4,
            "callsDistribution": { "audio": 3, "video": 2 }
        }))
        .unwrap();

        assert_eq!(content_breakdown(&content)[0], point("Posts", 4));
        assert_eq!(calls_breakdown(&content)[2], point("Total", 5));
    }
}
