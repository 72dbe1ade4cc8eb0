// SPDX-License-Identifier: MPL-2.0

//! Pure filters over already-loaded posts. Nothing here touches storage.

use crate::model::{CategoryFilter, Post, SearchOptions, SortBy};

/// Text search, category filter and ordering over `posts`.
///
/// A query of several whitespace-separated words matches posts containing
/// every word in the title or content; a single word is a plain substring
/// match. Matching ignores case. Sorting is stable, and skipped entirely when
/// `options.sort_by` is unset.
pub fn search_posts(posts: &[Post], query: &str, options: &SearchOptions) -> Vec<Post> {
    let query = query.trim().to_lowercase();
    let words: Vec<&str> = query.split_whitespace().collect();

    let mut results: Vec<Post> = posts
        .iter()
        .filter(|post| matches_query(post, &query, &words))
        .filter(|post| match options.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => post.category == category,
        })
        .cloned()
        .collect();

    match options.sort_by {
        Some(SortBy::Latest) => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortBy::Oldest) => results.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        Some(SortBy::Likes) => results.sort_by(|a, b| b.likes.cmp(&a.likes)),
        None => {}
    }

    results
}

fn matches_query(post: &Post, query: &str, words: &[&str]) -> bool {
    if query.is_empty() {
        return true;
    }

    let title = post.title.to_lowercase();
    let content = post.content.to_lowercase();

    if words.len() > 1 {
        words
            .iter()
            .all(|word| title.contains(word) || content.contains(word))
    } else {
        title.contains(query) || content.contains(query)
    }
}

/// VIP visibility policy.
///
/// `show_vip_only` keeps only VIP posts. Otherwise VIP viewers see everything
/// (including posts marked for regular members) and everyone else loses the
/// VIP posts.
pub fn visible_posts(posts: &[Post], viewer_is_vip: bool, show_vip_only: bool) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| {
            if show_vip_only {
                post.is_vip
            } else {
                viewer_is_vip || !post.is_vip
            }
        })
        .cloned()
        .collect()
}
