//! URL handling module for Wiki-Trawl
//!
//! This module provides URL normalization, host wildcard matching and the
//! classifier that decides which links are followed and which are saved.

mod classifier;
mod matcher;
mod normalize;

// Re-export main functions
pub use classifier::UrlClassifier;
pub use matcher::{extract_domain, match_target, matches_wildcard};
pub use normalize::normalize_url;

/// Outcome of classifying one discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Different host or section - never enqueued
    OutOfScope,
    /// In scope but not an article - traversed for links only
    Page,
    /// In scope and carries the inclusion marker - saved when fetched
    Article,
    /// Carries the inclusion marker but matches an exclusion rule
    ExcludedArticle,
}

impl LinkClass {
    /// Returns true if the link should be placed on the frontier
    pub fn should_enqueue(&self) -> bool {
        !matches!(self, Self::OutOfScope)
    }

    /// Returns true if the page is saved once fetched
    pub fn is_article(&self) -> bool {
        matches!(self, Self::Article)
    }
}
