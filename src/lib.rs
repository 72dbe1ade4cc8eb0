// SPDX-License-Identifier: MPL-2.0

//! Local-first storage for a small community board.
//!
//! Posts, comments, the banned-word list, VIP membership and the anonymous
//! per-installation identity each live under one key of a [`KeyValueStore`]
//! and are rewritten whole on every change. Open a [`BoardDb`] over a backend
//! and use its collection views:
//!
//! ```no_run
//! use comu_board::{BoardDb, Category, NewPost, SqliteKv};
//!
//! # fn main() -> Result<(), comu_board::StoreError> {
//! let db = BoardDb::new(SqliteKv::open_default()?);
//! let me = db.identity().get_or_create()?;
//! let post = db.posts().add(NewPost::new(Category::Science, "Hello", "First post"))?;
//! db.posts().toggle_like(&post.id, &me)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;

pub use model::{
    ANONYMOUS_AUTHOR, Category, CategoryFilter, Comment, LikeStatus, NewPost, Post,
    SearchOptions, SortBy, VipStatus,
};
pub use state::BoardSettings;
pub use store::{
    BannedWords, BoardDb, ChangeEvent, CommentStore, IdentityStore, KeyValueStore, MemoryKv,
    PostStore, SqliteKv, StoreError, VipStore, encode_image, search_posts, visible_posts,
};
