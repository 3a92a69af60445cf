use crate::config::{Config, FilterConfig, ScopeConfig};
use crate::url::matcher::{extract_domain, match_target, matches_wildcard};
use crate::url::LinkClass;
use url::Url;

/// Decides which discovered URLs are followed and which are saved
///
/// All checks are pure functions of the URL and the configuration captured
/// at construction time. Exclusion always wins over inclusion.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    domain: String,
    path_prefix: String,
    include_suffix: String,
    exclude_suffix: Option<String>,
    exclude_contains: Vec<String>,
}

impl UrlClassifier {
    /// Builds a classifier from the `[scope]` and `[filter]` sections
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.scope, &config.filter)
    }

    pub fn new(scope: &ScopeConfig, filter: &FilterConfig) -> Self {
        Self {
            domain: scope.domain.to_lowercase(),
            path_prefix: scope.path_prefix.clone(),
            include_suffix: filter.include_suffix.clone(),
            exclude_suffix: filter.exclude_suffix.clone(),
            exclude_contains: filter.exclude_contains.clone(),
        }
    }

    /// True iff the URL is on the crawl domain and under the path prefix
    pub fn in_scope(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        let host_ok = extract_domain(url)
            .map(|host| matches_wildcard(&self.domain, &host))
            .unwrap_or(false);

        host_ok && self.under_prefix(url.path())
    }

    /// Normalized URLs lose their trailing slash, so `/wiki` counts as
    /// being under the prefix `/wiki/`
    fn under_prefix(&self, path: &str) -> bool {
        path.starts_with(&self.path_prefix)
            || (self.path_prefix.len() > 1
                && self.path_prefix.strip_suffix('/') == Some(path))
    }

    /// True iff the URL matches an exclusion rule
    pub fn is_excluded(&self, url: &Url) -> bool {
        let target = match_target(url);

        let suffix_hit = self
            .exclude_suffix
            .as_deref()
            .is_some_and(|suffix| target.ends_with(suffix));

        suffix_hit
            || self
                .exclude_contains
                .iter()
                .any(|needle| target.contains(needle.as_str()))
    }

    /// True iff the URL is in scope, carries the inclusion marker and is
    /// not excluded
    pub fn is_article(&self, url: &Url) -> bool {
        self.classify(url).is_article()
    }

    /// Full decision for one discovered link
    pub fn classify(&self, url: &Url) -> LinkClass {
        if !self.in_scope(url) {
            return LinkClass::OutOfScope;
        }

        let marked = match_target(url).ends_with(&self.include_suffix);
        match (marked, self.is_excluded(url)) {
            (true, false) => LinkClass::Article,
            (true, true) => LinkClass::ExcludedArticle,
            _ => LinkClass::Page,
        }
    }
}
