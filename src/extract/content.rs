//! Article text extraction from saved MediaWiki pages
//!
//! Only the direct children of the `mw-parser-output` container are read.
//! Infoboxes, asides and tables are skipped, as are `mw-editsection` links
//! inside the blocks that are kept.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Title used when a page has no `<title>`
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Kind of block kept from the article body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    P,
    H1,
    H2,
    H3,
    H4,
    Ul,
    Ol,
    Dl,
}

impl BlockKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "p" => Some(Self::P),
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "ul" => Some(Self::Ul),
            "ol" => Some(Self::Ol),
            "dl" => Some(Self::Dl),
            _ => None,
        }
    }

    /// HTML tag name of the block
    pub fn tag(&self) -> &'static str {
        match self {
            Self::P => "p",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Dl => "dl",
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Self::H1 | Self::H2 | Self::H3 | Self::H4)
    }
}

/// One block of article text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub text: String,
}

/// Text content of one saved article, as written to `<key>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub url: String,
    pub content: Vec<ContentBlock>,
}

/// Extracts the title and body blocks of a saved article
///
/// A page without a `mw-parser-output` container yields no blocks.
pub fn extract_article(html: &str, url: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);

    ExtractedArticle {
        title: extract_title(&document),
        url: url.to_string(),
        content: extract_blocks(&document),
    }
}

/// `<title>` up to the first `|`, which drops the wiki's site name
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return UNKNOWN_TITLE.to_string();
    };

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|text| text.split('|').next().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn extract_blocks(document: &Html) -> Vec<ContentBlock> {
    let Ok(selector) = Selector::parse("div.mw-parser-output") else {
        return Vec::new();
    };
    let Some(container) = document.select(&selector).next() else {
        return Vec::new();
    };

    container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| !is_boilerplate(el))
        .filter_map(|el| {
            let kind = BlockKind::from_tag(el.value().name())?;
            let mut text = String::new();
            collect_text(el, &mut text);

            let text = text.trim();
            (!text.is_empty()).then(|| ContentBlock {
                kind,
                text: text.to_string(),
            })
        })
        .collect()
}

fn is_boilerplate(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "aside" | "table")
        || el.value().classes().any(|c| c.contains("infobox"))
}

/// Concatenates text nodes, leaving out `mw-editsection` subtrees
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if !el.value().classes().any(|c| c == "mw-editsection") {
                collect_text(el, out);
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}
