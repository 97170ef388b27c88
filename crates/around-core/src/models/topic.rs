use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AroundError;

/// Content category served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Posts around the user
    #[default]
    Around,
    /// Faces around the world
    Face,
}

impl Topic {
    /// Identifier sent as the `term` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Around => "around",
            Topic::Face => "face",
        }
    }

    /// Backend endpoint serving this topic
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Topic::Around => Endpoint::Search,
            Topic::Face => Endpoint::Cluster,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = AroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "around" => Ok(Topic::Around),
            "face" => Ok(Topic::Face),
            _ => Err(AroundError::ConfigInvalid {
                key: "topic".to_string(),
                reason: format!("Invalid topic: {}. Use around or face", s),
            }),
        }
    }
}

/// Nearby-content endpoints; both take the same parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Cluster,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Cluster => "cluster",
        }
    }
}
