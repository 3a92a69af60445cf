//! Storage key derivation
//!
//! A key is derived from the last path segment of the article URL, so
//! `https://wiki.example/wiki/Rome_(Civ5)` is stored as `Rome.html` once the
//! configured `_(Civ5)` suffix is stripped.

use percent_encoding::percent_decode_str;
use std::collections::HashSet;
use url::Url;

/// Longest key in bytes before the collision counter is appended
const MAX_KEY_LEN: usize = 150;

/// Fallback for URLs whose last segment sanitizes to nothing
const FALLBACK_KEY: &str = "article";

/// Derives a filesystem-safe key from the URL's last path segment
pub fn derive_key(url: &Url, strip_suffixes: &[String]) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("");

    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    let mut name: &str = &decoded;
    for suffix in strip_suffixes {
        if let Some(stripped) = name.strip_suffix(suffix.as_str()) {
            name = stripped;
            break;
        }
    }

    let sanitized = sanitize(name);
    if sanitized.is_empty() {
        FALLBACK_KEY.to_string()
    } else {
        truncate_on_char_boundary(sanitized, MAX_KEY_LEN)
    }
}

/// Returns `key`, or `key-2`, `key-3`, ... until it is not in `used`
pub fn unique_key(key: String, used: &HashSet<String>) -> String {
    if !used.contains(&key) {
        return key;
    }

    let mut n = 2usize;
    loop {
        let candidate = format!("{}-{}", key, n);
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Replaces characters that are unsafe in file names on common platforms
fn sanitize(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|ch| {
            let bad = matches!(
                ch,
                '\0' | '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\t'
            ) || ch.is_control();
            if bad {
                '_'
            } else {
                ch
            }
        })
        .collect();

    // Leading dots would hide the file; trailing dots and spaces break Windows
    replaced.trim_matches([' ', '.']).to_string()
}

fn truncate_on_char_boundary(mut s: String, max_len: usize) -> String {
    if s.len() <= max_len {
        return s;
    }
    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
    s
}
