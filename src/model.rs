// SPDX-License-Identifier: MPL-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author label stamped on every post. Posting is always anonymous.
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// The fixed set of boards a post can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SocialIssue,
    EnvironmentalProblem,
    WritingIdea,
    Science,
    Event,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::SocialIssue,
        Category::EnvironmentalProblem,
        Category::WritingIdea,
        Category::Science,
        Category::Event,
    ];

    /// Stable identifier used in storage and routes
    pub fn slug(self) -> &'static str {
        match self {
            Category::SocialIssue => "social-issue",
            Category::EnvironmentalProblem => "environmental-problem",
            Category::WritingIdea => "writing-idea",
            Category::Science => "science",
            Category::Event => "event",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::SocialIssue => "Social Issues",
            Category::EnvironmentalProblem => "Environment",
            Category::WritingIdea => "Stories",
            Category::Science => "Science",
            Category::Event => "Events",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub content: String,
    /// Inline `data:` URL, see [`crate::encode_image`]
    #[serde(default)]
    pub image: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    /// Identities that liked this post; treated as a set
    #[serde(default)]
    pub liked_by: Vec<String>,
    /// Only visible to VIP viewers
    #[serde(default, rename = "isVIP")]
    pub is_vip: bool,
    /// Marked for regular members. Not enforced against VIP viewers.
    #[serde(default, rename = "isNonVIP")]
    pub is_non_vip: bool,
}

impl Post {
    pub fn is_liked_by(&self, identity: &str) -> bool {
        self.liked_by.iter().any(|id| id == identity)
    }
}

/// Caller-supplied fields for a new post. Everything else is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub category: Category,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_vip: bool,
    pub is_non_vip: bool,
}

impl NewPost {
    pub fn new(category: Category, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            content: content.into(),
            image: None,
            is_vip: false,
            is_non_vip: false,
        }
    }

    pub fn with_image(mut self, data_url: impl Into<String>) -> Self {
        self.image = Some(data_url.into());
        self
    }

    pub fn vip_only(mut self) -> Self {
        self.is_vip = true;
        self
    }

    pub fn non_vip_only(mut self) -> Self {
        self.is_non_vip = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Like count plus whether the asking identity is among the likers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub likes: u32,
    pub is_liked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipStatus {
    pub is_active: bool,
    pub activated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl VipStatus {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Latest,
    Oldest,
    Likes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub category: CategoryFilter,
    /// Input order is kept when unset
    pub sort_by: Option<SortBy>,
}
