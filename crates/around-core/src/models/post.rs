use serde::{Deserialize, Serialize};

/// Media kind of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Image,
    Video,
}

/// Server-assigned location of a post
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostLocation {
    pub lat: f64,
    pub lon: f64,
}

/// A post returned by a nearby query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Media URL, unique per post
    pub url: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub message: String,

    /// Older backends omit the type; those posts are images
    #[serde(rename = "type", default)]
    pub kind: PostKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PostLocation>,
}

impl Post {
    pub fn is_image(&self) -> bool {
        self.kind == PostKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == PostKind::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_backend_json() {
        let post: Post = serde_json::from_str(
            r#"{"url":"https://cdn/a.jpg","user":"ana","message":"hi","type":"video",
                "location":{"lat":-8.5,"lon":115.2}}"#,
        )
        .unwrap();

        assert_eq!(post.url, "https://cdn/a.jpg");
        assert_eq!(post.user, "ana");
        assert!(post.is_video());
        assert_eq!(post.location, Some(PostLocation { lat: -8.5, lon: 115.2 }));
    }

    #[test]
    fn test_post_without_type_is_image() {
        let post: Post = serde_json::from_str(r#"{"url":"a","user":"u","message":"m"}"#).unwrap();
        assert!(post.is_image());
        assert!(post.location.is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = serde_json::from_str::<Post>(r#"{"url":"a","type":"audio"}"#);
        assert!(result.is_err());
    }
}
