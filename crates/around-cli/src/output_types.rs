use around_core::config::ConfigSource;
use around_core::models::{DiscoveryState, DiscoveryStatus, Post, Topic};
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use tabled::Tabled;

/// Output for commands that run a discovery query
#[derive(Debug, Serialize)]
pub struct DiscoveryOutput {
    pub topic: Topic,
    pub status: DiscoveryStatus,
    pub error_message: Option<String>,
    pub image_count: usize,
    pub video_count: usize,
    pub posts: Vec<Post>,
}

impl From<&DiscoveryState> for DiscoveryOutput {
    fn from(state: &DiscoveryState) -> Self {
        Self {
            topic: state.topic,
            status: state.status,
            error_message: state.error_message.clone(),
            image_count: state.image_posts().count(),
            video_count: state.video_posts().count(),
            posts: state.posts.clone(),
        }
    }
}

/// Table row for a post
#[derive(Debug, Serialize, Tabled)]
pub struct PostRow {
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "User")]
    pub user: String,
    #[tabled(rename = "Message")]
    pub message: String,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            kind: if post.is_video() { "video" } else { "image" }.to_string(),
            user: post.user.clone(),
            message: truncate(&post.message, 40),
            location: post
                .location
                .map(|l| format!("{:.4}, {:.4}", l.lat, l.lon))
                .unwrap_or_else(|| "-".to_string()),
            url: post.url.clone(),
        }
    }
}

/// Output for token command
#[derive(Debug, Serialize)]
pub struct TokenOutput {
    pub stored: bool,
    pub state_file: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config_file: Option<String>,
    pub state_file: String,
    pub values: BTreeMap<String, ConfigEntry>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    #[serde(skip)]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

impl ConfigEntry {
    pub fn new(key: &str, value: String, source: ConfigSource) -> Self {
        Self { key: key.to_string(), value, source: format!("{:?}", source) }
    }
}

/// Posts that carry a location, as GeoJSON points
///
/// Posts without a location are left out.
pub fn posts_to_feature_collection(posts: &[Post]) -> FeatureCollection {
    let features = posts
        .iter()
        .filter_map(|post| {
            let location = post.location?;

            let mut properties = Map::new();
            properties.insert("url".to_string(), JsonValue::from(post.url.clone()));
            properties.insert("user".to_string(), JsonValue::from(post.user.clone()));
            properties.insert("message".to_string(), JsonValue::from(post.message.clone()));
            properties.insert(
                "type".to_string(),
                JsonValue::from(if post.is_video() { "video" } else { "image" }),
            );

            Some(Feature {
                geometry: Some(Geometry::new(Value::Point(vec![location.lon, location.lat]))),
                properties: Some(properties),
                id: None,
                bbox: None,
                foreign_members: None,
            })
        })
        .collect();

    FeatureCollection { features, bbox: None, foreign_members: None }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
