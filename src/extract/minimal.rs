//! Minimal readable HTML rendering of an extracted article

use crate::extract::{BlockKind, ContentBlock, ExtractedArticle};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// A leading paragraph this long with this many line breaks is a flattened
/// infobox rather than prose
const INFOBOX_MIN_CHARS: usize = 500;
const INFOBOX_MIN_NEWLINES: usize = 10;

/// Renders the article as a small standalone page
pub fn render_minimal_html(article: &ExtractedArticle) -> String {
    let title = encode_text(&article.title);
    let mut body = String::new();

    for (i, block) in article.content.iter().enumerate() {
        if i == 0 && looks_like_infobox(block) {
            continue;
        }
        render_block(block, &mut body);
    }

    format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 20px; color: #333; }}
    h1 {{ border-bottom: 1px solid #ddd; padding-bottom: 10px; }}
    .quote {{ font-style: italic; margin: 20px 0; padding-left: 20px; border-left: 4px solid #ddd; }}
    .footer {{ margin-top: 30px; padding-top: 10px; border-top: 1px solid #ddd; font-size: 0.9em; color: #666; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
{body}  <div class="footer">
    <p>Original article: <a href="{href}">{title}</a></p>
  </div>
</body>
</html>
"##,
        title = title,
        body = body,
        href = encode_double_quoted_attribute(&article.url)
    )
}

fn looks_like_infobox(block: &ContentBlock) -> bool {
    block.kind == BlockKind::P
        && block.text.chars().count() > INFOBOX_MIN_CHARS
        && block.text.matches('\n').count() > INFOBOX_MIN_NEWLINES
}

fn render_block(block: &ContentBlock, out: &mut String) {
    let text = encode_text(&block.text);

    match block.kind {
        kind if kind.is_heading() => {
            out.push_str(&format!("  <{tag}>{}</{tag}>\n", text, tag = kind.tag()));
        }
        BlockKind::P => out.push_str(&format!("  <p>{}</p>\n", text)),
        BlockKind::Dl => out.push_str(&format!("  <div class=\"quote\">{}</div>\n", text)),
        BlockKind::Ul | BlockKind::Ol => {
            let tag = block.kind.tag();
            out.push_str(&format!("  <{}>\n", tag));
            for item in block.text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                out.push_str(&format!("    <li>{}</li>\n", encode_text(item)));
            }
            out.push_str(&format!("  </{}>\n", tag));
        }
        _ => {}
    }
}
