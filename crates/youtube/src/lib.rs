//! journal-relay video recommendation
//!
//! Keyword extraction from journal text and YouTube Data API search

pub mod client;
pub mod keywords;
pub mod types;

// Re-export main types
pub use client::{VideoSearch, YouTubeClient};
pub use keywords::{search_query, top_terms, DEFAULT_MAX_TERMS};
pub use types::VideoHit;
