// SPDX-License-Identifier: MPL-2.0

pub const APP_ID: &str = "io.github.comu.Board";

/// Directory name under the platform data dir
pub const APP_DIR: &str = "comu-board";

// Storage keys, one JSON blob each
pub const POSTS_KEY: &str = "comu_d_posts";
pub const COMMENTS_KEY: &str = "comu_d_comments";
pub const BANNED_WORDS_KEY: &str = "comu_d_banned_words";
pub const VIP_KEY: &str = "comu_d_vip_status";
pub const IDENTITY_KEY: &str = "comu_d_user_id";

pub const DEFAULT_VIP_DAYS: u32 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info";
