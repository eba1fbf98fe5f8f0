use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use super::{dom, Ctx, Resolver, FREE_TEXT};

/// Section labels the CMS prints above the free text, lower-case.
const PLACEHOLDER_LABELS: &[&str] = &["my business", "il mio business"];

static LEADING_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:my business|il mio business)\s*").unwrap());

pub const CHAIN: &[Resolver<String>] = &[from_blocks, from_flat_text];

/// Direct `<p>`/`<div>` children that are neither empty nor a section label.
fn from_blocks(ctx: &Ctx) -> Option<String> {
    let region = dom::first_in(ctx.doc, &FREE_TEXT)?;
    let paragraphs: Vec<String> = region
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "p" | "div"))
        .map(dom::flat_text)
        .filter(|text| !text.is_empty() && !is_placeholder(text))
        .collect();
    (!paragraphs.is_empty()).then(|| paragraphs.join(" "))
}

/// Whole region text, minus a leading section label.
fn from_flat_text(ctx: &Ctx) -> Option<String> {
    let region = dom::first_in(ctx.doc, &FREE_TEXT)?;
    let text = dom::flat_text(region);
    dom::non_empty(&LEADING_LABEL_RE.replace(&text, ""))
}

fn is_placeholder(text: &str) -> bool {
    PLACEHOLDER_LABELS.contains(&text.to_lowercase().as_str())
}
