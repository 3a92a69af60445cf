//! Static `index.html` linking every saved article

use crate::storage::{SavedArticle, StorageResult};
use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};

/// Characters that must be escaped in a relative href
const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Display title for a storage key
pub fn article_title(storage_key: &str) -> String {
    storage_key.replace('_', " ")
}

/// Renders the index page, articles sorted by title
pub fn render_index(records: &[SavedArticle]) -> String {
    let mut entries: Vec<(String, &SavedArticle)> = records
        .iter()
        .map(|r| (article_title(&r.storage_key), r))
        .collect();
    entries.sort_by_key(|(title, _)| title.to_lowercase());

    let mut items = String::new();
    for (title, record) in &entries {
        let href = utf8_percent_encode(&record.file_name(), HREF).to_string();
        items.push_str(&format!(
            "    <li><a href=\"{}\">{}</a> <small>{}</small></li>\n",
            encode_double_quoted_attribute(&href),
            encode_text(title),
            encode_text(&record.url)
        ));
    }

    format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Saved articles</title>
</head>
<body>
  <h1>Saved articles ({count})</h1>
  <input id="filter" type="search" placeholder="Filter articles">
  <ul id="articles">
{items}  </ul>
  <script>
    document.getElementById("filter").addEventListener("input", function (e) {{
      var q = e.target.value.toLowerCase();
      document.querySelectorAll("#articles li").forEach(function (li) {{
        li.style.display = li.textContent.toLowerCase().indexOf(q) === -1 ? "none" : "";
      }});
    }});
  </script>
</body>
</html>
"##,
        count = entries.len(),
        items = items
    )
}

/// Writes `index.html` into `directory` and returns its path
pub fn build_index(directory: &Path, records: &[SavedArticle]) -> StorageResult<PathBuf> {
    let path = directory.join("index.html");
    std::fs::write(&path, render_index(records))?;
    tracing::debug!("Wrote index of {} articles to {}", records.len(), path.display());
    Ok(path)
}
