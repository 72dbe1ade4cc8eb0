// SPDX-License-Identifier: MPL-2.0

use crate::config::POSTS_KEY;
use crate::model::{ANONYMOUS_AUTHOR, Category, LikeStatus, NewPost, Post};
use crate::store::banned::first_match;
use crate::store::{BoardDb, ChangeEvent, StoreError, now_millis, visible_posts};
use chrono::Utc;

/// Post collection operations
pub struct PostStore<'a> {
    db: &'a BoardDb,
}

impl<'a> PostStore<'a> {
    pub fn new(db: &'a BoardDb) -> Self {
        Self { db }
    }

    /// All posts, newest insert first
    pub fn all(&self) -> Result<Vec<Post>, StoreError> {
        self.db.load_list(POSTS_KEY)
    }

    pub fn by_category(&self, category: Category) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.all()?;
        posts.retain(|p| p.category == category);
        Ok(posts)
    }

    pub fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.all()?.into_iter().find(|p| p.id == id))
    }

    /// Validate against the banned-word list and insert at the front.
    ///
    /// Title is checked before content. On rejection nothing is written.
    /// A VIP-only flag is dropped unless the local member is currently VIP.
    pub fn add(&self, mut new: NewPost) -> Result<Post, StoreError> {
        if new.is_vip && !self.db.vip().is_active()? {
            tracing::debug!(category = %new.category, "author is not vip, posting as regular");
            new.is_vip = false;
        }
        self.insert(new)
    }

    /// Moderator insert that keeps the VIP-only flag as given.
    ///
    /// The banned-word check still applies.
    pub fn add_as_admin(&self, new: NewPost) -> Result<Post, StoreError> {
        self.insert(new)
    }

    fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        let banned = self.db.banned_words().list()?;
        let hit = first_match(&banned, &new.title).or_else(|| first_match(&banned, &new.content));
        if let Some(word) = hit {
            tracing::warn!(word = %word, category = %new.category, "post rejected");
            return Err(StoreError::BannedWord {
                word: word.to_string(),
            });
        }

        let mut posts = self.all()?;
        let post = Post {
            id: next_post_id(&posts),
            category: new.category,
            title: new.title,
            content: new.content,
            image: new.image,
            author: ANONYMOUS_AUTHOR.to_string(),
            created_at: Utc::now(),
            likes: 0,
            liked_by: Vec::new(),
            is_vip: new.is_vip,
            is_non_vip: new.is_non_vip,
        };

        posts.insert(0, post.clone());
        self.db.save(POSTS_KEY, &posts, ChangeEvent::Posts)?;
        tracing::info!(id = %post.id, category = %post.category, "post added");
        Ok(post)
    }

    /// Remove by id. Unknown ids are ignored.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut posts = self.all()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Ok(());
        }

        self.db.save(POSTS_KEY, &posts, ChangeEvent::Posts)?;
        tracing::info!(id, "post deleted");
        Ok(())
    }

    /// Flip `identity`'s like on a post. None if the post does not exist.
    pub fn toggle_like(&self, id: &str, identity: &str) -> Result<Option<LikeStatus>, StoreError> {
        let mut posts = self.all()?;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        let is_liked = if post.is_liked_by(identity) {
            post.liked_by.retain(|who| who != identity);
            post.likes = post.likes.saturating_sub(1);
            false
        } else {
            post.liked_by.push(identity.to_string());
            post.likes += 1;
            true
        };
        let status = LikeStatus {
            likes: post.likes,
            is_liked,
        };

        self.db.save(POSTS_KEY, &posts, ChangeEvent::Posts)?;
        tracing::debug!(id, likes = status.likes, is_liked, "like toggled");
        Ok(Some(status))
    }

    /// Like count and whether `identity` liked it; zero and false for unknown posts
    pub fn like_status(&self, id: &str, identity: &str) -> Result<LikeStatus, StoreError> {
        Ok(self
            .get(id)?
            .map(|post| LikeStatus {
                likes: post.likes,
                is_liked: post.is_liked_by(identity),
            })
            .unwrap_or_default())
    }

    /// Apply the VIP visibility policy for the current viewer
    pub fn filter_vip(&self, posts: &[Post], show_vip_only: bool) -> Result<Vec<Post>, StoreError> {
        let viewer_is_vip = self.db.vip().is_active()?;
        Ok(visible_posts(posts, viewer_is_vip, show_vip_only))
    }
}

/// Epoch millis, bumped past the largest existing id so one writer never repeats an id
fn next_post_id(posts: &[Post]) -> String {
    let newest = posts
        .iter()
        .filter_map(|p| p.id.parse::<i64>().ok())
        .max()
        .unwrap_or(i64::MIN);
    now_millis().max(newest.saturating_add(1)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKv;

    fn db() -> BoardDb {
        BoardDb::new(MemoryKv::new())
    }

    fn add(db: &BoardDb, category: Category, title: &str) -> Post {
        db.posts()
            .add(NewPost::new(category, title, "body"))
            .unwrap()
    }

    #[test]
    fn test_new_post_defaults() {
        let db = db();
        let post = db
            .posts()
            .add(NewPost::new(Category::Science, "Rockets", "go up").with_image("data:x"))
            .unwrap();

        assert_eq!(post.likes, 0);
        assert!(post.liked_by.is_empty());
        assert_eq!(post.author, ANONYMOUS_AUTHOR);
        assert_eq!(post.image.as_deref(), Some("data:x"));
        assert_eq!(db.posts().get(&post.id).unwrap(), Some(post));
    }

    #[test]
    fn test_posts_are_prepended_with_unique_ids() {
        let db = db();
        let first = add(&db, Category::Event, "first");
        let second = add(&db, Category::Event, "second");
        let third = add(&db, Category::Event, "third");

        let ids: Vec<_> = db.posts().all().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id.clone(), second.id.clone(), first.id.clone()]);
        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
    }

    #[test]
    fn test_by_category() {
        let db = db();
        add(&db, Category::Science, "a");
        add(&db, Category::Event, "b");
        add(&db, Category::Science, "c");

        let science = db.posts().by_category(Category::Science).unwrap();
        assert_eq!(science.len(), 2);
        assert!(science.iter().all(|p| p.category == Category::Science));
        assert!(db.posts().by_category(Category::WritingIdea).unwrap().is_empty());
    }

    #[test]
    fn test_banned_word_rejects_and_persists_nothing() {
        let db = db();
        db.banned_words().add("spam").unwrap();

        let err = db
            .posts()
            .add(NewPost::new(Category::SocialIssue, "hello", "this is SPAM"))
            .unwrap_err();
        assert!(matches!(&err, StoreError::BannedWord { word } if word == "spam"));
        assert!(err.to_string().contains("spam"));

        let err = db
            .posts()
            .add(NewPost::new(Category::SocialIssue, "Spammy title", "fine"))
            .unwrap_err();
        assert!(matches!(err, StoreError::BannedWord { .. }));

        assert!(db.posts().all().unwrap().is_empty());
    }

    #[test]
    fn test_title_checked_before_content() {
        let db = db();
        db.banned_words().add("alpha").unwrap();
        db.banned_words().add("beta").unwrap();

        let err = db
            .posts()
            .add(NewPost::new(Category::Science, "beta", "alpha"))
            .unwrap_err();
        assert!(matches!(err, StoreError::BannedWord { word } if word == "beta"));
    }

    #[test]
    fn test_delete_and_delete_missing() {
        let db = db();
        let keep = add(&db, Category::Event, "keep");
        let gone = add(&db, Category::Event, "gone");

        db.posts().delete(&gone.id).unwrap();
        db.posts().delete("no-such-id").unwrap();

        let posts = db.posts().all().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, keep.id);
    }

    #[test]
    fn test_delete_missing_sends_no_event() {
        let db = db();
        add(&db, Category::Event, "stays");
        let events = db.subscribe();

        db.posts().delete("no-such-id").unwrap();
        assert!(events.try_recv().is_err());
        assert_eq!(db.posts().all().unwrap().len(), 1);
    }

    #[test]
    fn test_vip_only_requires_vip_author() {
        let db = db();
        let post = db
            .posts()
            .add(NewPost::new(Category::Science, "members", "x").vip_only())
            .unwrap();
        assert!(!post.is_vip);
        assert!(!db.posts().get(&post.id).unwrap().unwrap().is_vip);

        db.vip().activate(30).unwrap();
        let post = db
            .posts()
            .add(NewPost::new(Category::Science, "members", "y").vip_only())
            .unwrap();
        assert!(post.is_vip);
        assert!(db.posts().get(&post.id).unwrap().unwrap().is_vip);
    }

    #[test]
    fn test_admin_insert_keeps_vip_flag() {
        let db = db();
        let post = db
            .posts()
            .add_as_admin(NewPost::new(Category::Event, "sample", "for members").vip_only())
            .unwrap();
        assert!(post.is_vip);
        assert!(!db.vip().is_active().unwrap());

        db.banned_words().add("members").unwrap();
        let err = db
            .posts()
            .add_as_admin(NewPost::new(Category::Event, "sample", "for members").vip_only())
            .unwrap_err();
        assert!(matches!(err, StoreError::BannedWord { .. }));
    }

    #[test]
    fn test_toggle_like_is_its_own_inverse() {
        let db = db();
        let post = add(&db, Category::Science, "likeable");

        let liked = db.posts().toggle_like(&post.id, "user_a").unwrap().unwrap();
        assert_eq!(liked, LikeStatus { likes: 1, is_liked: true });
        assert_eq!(db.posts().like_status(&post.id, "user_a").unwrap(), liked);
        assert!(!db.posts().like_status(&post.id, "user_b").unwrap().is_liked);

        let unliked = db.posts().toggle_like(&post.id, "user_a").unwrap().unwrap();
        assert_eq!(unliked, LikeStatus { likes: 0, is_liked: false });

        let stored = db.posts().get(&post.id).unwrap().unwrap();
        assert!(stored.liked_by.is_empty());
    }

    #[test]
    fn test_likes_from_several_identities() {
        let db = db();
        let post = add(&db, Category::Science, "popular");
        for who in ["a", "b", "c"] {
            db.posts().toggle_like(&post.id, who).unwrap();
        }
        db.posts().toggle_like(&post.id, "b").unwrap();

        let stored = db.posts().get(&post.id).unwrap().unwrap();
        assert_eq!(stored.likes, 2);
        assert_eq!(stored.liked_by, vec!["a", "c"]);
    }

    #[test]
    fn test_unlike_floors_at_zero() {
        let db = db();
        let post = add(&db, Category::Science, "skewed");

        // A record whose counter drifted from its liker list
        let mut posts = db.posts().all().unwrap();
        posts[0].liked_by = vec!["a".into()];
        posts[0].likes = 0;
        db.save(POSTS_KEY, &posts, ChangeEvent::Posts).unwrap();

        let status = db.posts().toggle_like(&post.id, "a").unwrap().unwrap();
        assert_eq!(status, LikeStatus { likes: 0, is_liked: false });
    }

    #[test]
    fn test_missing_post_like_operations() {
        let db = db();
        assert_eq!(db.posts().toggle_like("missing", "a").unwrap(), None);
        assert_eq!(
            db.posts().like_status("missing", "a").unwrap(),
            LikeStatus::default()
        );
    }

    #[test]
    fn test_filter_vip_follows_viewer_status() {
        let db = db();
        db.posts()
            .add_as_admin(NewPost::new(Category::Event, "vip", "x").vip_only())
            .unwrap();
        db.posts()
            .add(NewPost::new(Category::Event, "regular", "x").non_vip_only())
            .unwrap();
        let posts = db.posts().all().unwrap();

        assert_eq!(db.posts().filter_vip(&posts, false).unwrap().len(), 1);

        db.vip().activate(30).unwrap();
        assert_eq!(db.posts().filter_vip(&posts, false).unwrap().len(), 2);
        let only = db.posts().filter_vip(&posts, true).unwrap();
        assert_eq!(only.len(), 1);
        assert!(only[0].is_vip);
    }

    #[test]
    fn test_next_post_id_skips_past_future_ids() {
        let future = (now_millis() + 60_000).to_string();
        let posts = vec![Post {
            id: future.clone(),
            category: Category::Event,
            title: String::new(),
            content: String::new(),
            image: None,
            author: ANONYMOUS_AUTHOR.into(),
            created_at: Utc::now(),
            likes: 0,
            liked_by: Vec::new(),
            is_vip: false,
            is_non_vip: false,
        }];
        let next: i64 = next_post_id(&posts).parse().unwrap();
        assert_eq!(next, future.parse::<i64>().unwrap() + 1);
    }
}
