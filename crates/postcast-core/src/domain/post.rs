use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::timestamp;
use crate::error::ImageError;

/// Content length past which the form warns. Not enforced by the store.
pub const CONTENT_SOFT_LIMIT: usize = 280;

/// Opaque post identifier, stable for the post's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// Older snapshots stored millisecond timestamps as numeric ids.
impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// Target channel a post is marked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Linkedin,
    ];

    /// Tag used in persisted data and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == tag)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// Embedded image payload, stored as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    pub(crate) fn from_parts(mime: &str, base64_payload: &str) -> Self {
        Self(format!("data:{mime};base64,{base64_payload}"))
    }

    /// Accept an already encoded `data:image/...;base64,` URI.
    pub fn from_data_uri(uri: impl Into<String>) -> Result<Self, ImageError> {
        let uri = uri.into();
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::MalformedDataUri("missing data: scheme".to_string()))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| ImageError::MalformedDataUri("payload is not base64".to_string()))?;

        if !mime.starts_with("image/") {
            return Err(ImageError::NotAnImage(mime.to_string()));
        }
        if payload.is_empty() {
            return Err(ImageError::Empty);
        }
        STANDARD
            .decode(payload)
            .map_err(|e| ImageError::MalformedDataUri(e.to_string()))?;

        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIME type declared in the URI header.
    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }
}

/// Post entity - a scheduled item for one or more platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<ImageData>,
    pub platforms: BTreeSet<Platform>,
    #[serde(with = "timestamp")]
    pub scheduled_for: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
}

impl Post {
    /// Content length in characters, as the form counts it.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn exceeds_soft_limit(&self) -> bool {
        self.content_len() > CONTENT_SOFT_LIMIT
    }

    pub fn targets(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

/// Input for `PostStore::add`. Missing `id` and `created` are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub id: Option<PostId>,
    pub created: Option<DateTime<Utc>>,
    pub title: String,
    pub content: String,
    pub image: Option<ImageData>,
    pub platforms: BTreeSet<Platform>,
    pub scheduled_for: DateTime<Utc>,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
        scheduled_for: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            created: None,
            title: title.into(),
            content: content.into(),
            image: None,
            platforms: platforms.into_iter().collect(),
            scheduled_for,
        }
    }

    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = Some(id);
        self
    }

    /// Materialize the post, generating an id and creation time where absent.
    pub fn into_post(self) -> Post {
        self.into_post_at(Utc::now())
    }

    pub fn into_post_at(self, now: DateTime<Utc>) -> Post {
        Post {
            id: self.id.unwrap_or_else(PostId::generate),
            title: self.title,
            content: self.content,
            image: self.image,
            platforms: self.platforms,
            scheduled_for: self.scheduled_for,
            created: self.created.unwrap_or(now),
        }
    }
}
