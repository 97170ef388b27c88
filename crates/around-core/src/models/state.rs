use serde::{Deserialize, Serialize};

use super::{Post, Topic};

/// Lifecycle of a discovery session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DiscoveryStatus {
    #[default]
    Idle,
    LoadingLocation,
    LoadingPosts,
    Error,
    Ready,
}

/// Observable state of a discovery session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DiscoveryState {
    pub status: DiscoveryStatus,

    /// Set only while `status` is `Error`
    pub error_message: Option<String>,

    /// Result of the last successful query; kept when a later query fails
    pub posts: Vec<Post>,

    pub topic: Topic,
}

impl DiscoveryState {
    pub fn new(topic: Topic) -> Self {
        Self { topic, ..Self::default() }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, DiscoveryStatus::LoadingLocation | DiscoveryStatus::LoadingPosts)
    }

    /// Image posts in result order
    pub fn image_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|post| post.is_image())
    }

    /// Video posts in result order
    pub fn video_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|post| post.is_video())
    }
}
