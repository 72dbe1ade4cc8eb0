// SPDX-License-Identifier: MPL-2.0

mod attachment;
mod banned;
mod comments;
mod db;
mod identity;
mod kv;
mod posts;
mod query;
mod schema;
mod sqlite;
mod vip;

pub use attachment::{MAX_IMAGE_BYTES, encode_image, encode_image_with_limit};
pub use banned::BannedWords;
pub use comments::CommentStore;
pub use db::{BoardDb, ChangeEvent};
pub use identity::IdentityStore;
pub use kv::{KeyValueStore, MemoryKv};
pub use posts::PostStore;
pub use query::{search_posts, visible_posts};
pub use sqlite::SqliteKv;
pub use vip::VipStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("post contains banned word \"{word}\"")]
    BannedWord { word: String },
    #[error("banned word must not be empty")]
    EmptyBannedWord,
    #[error("banned word already registered: {0}")]
    DuplicateBannedWord(String),
    #[error("image is {size} bytes, limit is {limit}")]
    ImageTooLarge { size: usize, limit: usize },
    #[error("vip duration of {days} days is out of range")]
    VipDuration { days: u32 },

    #[error("unsupported image: {0}")]
    Image(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("database path error: {0}")]
    Path(String),
}

/// Current time in epoch milliseconds, the basis for post and comment ids.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Nine lowercase base36 characters, appended to ids to separate same-millisecond writes.
pub(crate) fn random_suffix() -> String {
    use rand::Rng;

    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
