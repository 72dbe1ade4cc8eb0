// SPDX-License-Identifier: MPL-2.0

use crate::config::COMMENTS_KEY;
use crate::model::Comment;
use crate::store::{BoardDb, ChangeEvent, StoreError, now_millis, random_suffix};
use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "Cool", "Clever", "Funny", "Kind", "Lively", "Quiet", "Bright", "Calm", "Eager", "Cheerful",
];

const NOUNS: &[&str] = &[
    "Cat", "Puppy", "Rabbit", "Penguin", "Bear", "Lion", "Tiger", "Fox", "Wolf", "Panda", "Koala",
    "Squirrel", "Hamster", "Parrot", "Dolphin",
];

/// Comment collection operations.
///
/// Comments reference posts by id only; deleting a post leaves its comments in place.
pub struct CommentStore<'a> {
    db: &'a BoardDb,
}

impl<'a> CommentStore<'a> {
    pub fn new(db: &'a BoardDb) -> Self {
        Self { db }
    }

    pub fn all(&self) -> Result<Vec<Comment>, StoreError> {
        self.db.load_list(COMMENTS_KEY)
    }

    /// Comments on one post, oldest first
    pub fn for_post(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        let mut comments = self.all()?;
        comments.retain(|c| c.post_id == post_id);
        Ok(comments)
    }

    /// Append a comment under a freshly generated display name
    pub fn add(&self, post_id: &str, content: &str) -> Result<Comment, StoreError> {
        let mut comments = self.all()?;
        let comment = Comment {
            id: format!("{}_{}", now_millis(), random_suffix()),
            post_id: post_id.to_string(),
            content: content.trim().to_string(),
            author: random_display_name(),
            created_at: Utc::now(),
        };

        comments.push(comment.clone());
        self.db.save(COMMENTS_KEY, &comments, ChangeEvent::Comments)?;
        tracing::info!(id = %comment.id, post_id, "comment added");
        Ok(comment)
    }

    /// Returns whether a comment was removed
    pub fn delete(&self, comment_id: &str) -> Result<bool, StoreError> {
        let mut comments = self.all()?;
        let before = comments.len();
        comments.retain(|c| c.id != comment_id);
        if comments.len() == before {
            return Ok(false);
        }

        self.db.save(COMMENTS_KEY, &comments, ChangeEvent::Comments)?;
        tracing::info!(id = comment_id, "comment deleted");
        Ok(true)
    }
}

/// Adjective + noun + number in 1..=999, e.g. "CalmPanda42"
fn random_display_name() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Quiet");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Cat");
    let number = rng.gen_range(1..=999);
    format!("{adjective}{noun}{number}")
}
