use serde::Deserialize;

/// Main configuration structure for Wiki-Trawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub scope: ScopeConfig,
    pub filter: FilterConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page the breadth-first traversal starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of articles to save before stopping
    #[serde(rename = "max-articles")]
    pub max_articles: usize,

    /// Pause between consecutive fetches (seconds)
    #[serde(rename = "delay-seconds", default = "default_delay_seconds")]
    pub delay_seconds: f64,

    /// Total timeout for a single request (seconds)
    #[serde(
        rename = "request-timeout-seconds",
        default = "default_request_timeout_seconds"
    )]
    pub request_timeout_seconds: u64,

    /// Log a progress line every N fetched pages
    #[serde(rename = "progress-interval", default = "default_progress_interval")]
    pub progress_interval: usize,
}

/// Which part of the web the crawl is allowed to traverse
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Domain pattern (e.g., "wiki.example" or "*.wiki.example")
    pub domain: String,

    /// Only paths starting with this prefix are followed
    #[serde(rename = "path-prefix", default = "default_path_prefix")]
    pub path_prefix: String,
}

/// Article inclusion and exclusion rules
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Paths ending with this marker are articles
    #[serde(rename = "include-suffix")]
    pub include_suffix: String,

    /// Paths ending with this marker are never articles
    #[serde(rename = "exclude-suffix", default)]
    pub exclude_suffix: Option<String>,

    /// Paths containing any of these substrings are never articles
    #[serde(rename = "exclude-contains", default)]
    pub exclude_contains: Vec<String>,

    /// Suffixes removed from the last path segment when naming saved files
    #[serde(rename = "strip-suffixes", default)]
    pub strip_suffixes: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Free-form contact or purpose note appended in parentheses
    #[serde(default)]
    pub contact: Option<String>,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (contact)`
    pub fn header_value(&self) -> String {
        match &self.contact {
            Some(contact) if !contact.is_empty() => format!(
                "{}/{} ({})",
                self.crawler_name, self.crawler_version, contact
            ),
            _ => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving saved articles, the mapping log and the run log
    pub directory: String,

    /// File name of the tab-separated `key<TAB>url` mapping log
    #[serde(rename = "mapping-file", default = "default_mapping_file")]
    pub mapping_file: String,

    /// File name of the human-readable run log
    #[serde(rename = "log-file", default = "default_log_file")]
    pub log_file: String,
}

fn default_delay_seconds() -> f64 {
    1.0
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_progress_interval() -> usize {
    10
}

fn default_path_prefix() -> String {
    "/".to_string()
}

fn default_mapping_file() -> String {
    "url_mapping.txt".to_string()
}

fn default_log_file() -> String {
    "crawl_log.txt".to_string()
}
