//! Read-only helpers over `scraper` element trees.
//!
//! Text extraction follows the CMS markup's habit of putting one logical value per
//! text node: "lines" are the trimmed, non-empty pieces of every text node split on
//! newlines, in document order.

use scraper::{ElementRef, Html, Selector};

/// Parse a CMS fragment. Returns `None` when the text holds no markup at all
/// (empty body, plain-text or JSON error page).
pub fn parse_fragment(raw: &str) -> Option<Html> {
    if raw.trim().is_empty() {
        return None;
    }
    let html = Html::parse_fragment(raw);
    let has_elements = html
        .root_element()
        .descendants()
        .skip(1)
        .any(|node| node.value().is_element());
    has_elements.then_some(html)
}

pub fn text_lines(el: ElementRef) -> Vec<String> {
    let mut lines = Vec::new();
    for chunk in el.text() {
        push_lines(chunk, &mut lines);
    }
    lines
}

/// Like [`text_lines`], but sub-trees whose root carries any of `skip_classes` are
/// left out. The tree itself is never touched.
pub fn pruned_text_lines(el: ElementRef, skip_classes: &[&str]) -> Vec<String> {
    let mut lines = Vec::new();
    collect_pruned(el, skip_classes, &mut lines);
    lines
}

fn collect_pruned(el: ElementRef, skip_classes: &[&str], out: &mut Vec<String>) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            push_lines(text, out);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if skip_classes.iter().any(|c| has_class(child_el, c)) {
                continue;
            }
            collect_pruned(child_el, skip_classes, out);
        }
    }
}

fn push_lines(chunk: &str, out: &mut Vec<String>) {
    out.extend(
        chunk
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string),
    );
}

/// All text of an element on one line, whitespace runs collapsed. Text nodes are
/// joined as-is, so `a <b>word</b>.` stays `a word.`.
pub fn flat_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// First element under `scope` matching `selector`.
pub fn first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// First element in the whole document matching `selector`.
pub fn first_in<'a>(doc: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    doc.select(selector).next()
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).map(str::trim).filter(|v| !v.is_empty())
}

pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn rejects_non_markup() {
        assert!(parse_fragment("").is_none());
        assert!(parse_fragment("   \n ").is_none());
        assert!(parse_fragment("{\"error\":\"session expired\"}").is_none());
        assert!(parse_fragment("<div>ok</div>").is_some());
    }

    #[test]
    fn lines_split_nodes_and_newlines() {
        let doc = Html::parse_fragment("<div>  Mario Rossi \n\n Studio <b>Legale</b></div>");
        let div = first_in(&doc, &sel("div")).unwrap();
        assert_eq!(text_lines(div), vec!["Mario Rossi", "Studio", "Legale"]);
        assert_eq!(flat_text(div), "Mario Rossi Studio Legale");
    }

    #[test]
    fn flat_text_keeps_punctuation_after_inline_tags() {
        let doc = Html::parse_fragment("<p>Dal 1998 a <b>Sanremo</b>. <i>Avv</i>ocato</p>");
        let p = first_in(&doc, &sel("p")).unwrap();
        assert_eq!(flat_text(p), "Dal 1998 a Sanremo. Avvocato");
    }

    #[test]
    fn pruned_lines_skip_blocks_without_mutation() {
        let doc = Html::parse_fragment(
            r#"<div class="info"><div class="profilephoto">Photo</div>Mario Rossi
               <div class="memberContactDetails">Telefono 123</div></div>"#,
        );
        let info = first_in(&doc, &sel(".info")).unwrap();
        let pruned = pruned_text_lines(info, &["profilephoto", "memberContactDetails"]);
        assert_eq!(pruned, vec!["Mario Rossi"]);
        // the parsed tree still carries the skipped text
        assert!(text_lines(info).contains(&"Photo".to_string()));
        assert!(doc.select(&sel(".memberContactDetails")).next().is_some());
    }

    #[test]
    fn attr_trims_and_drops_empty() {
        let doc = Html::parse_fragment(r#"<img src="  /a.png "><img src="">"#);
        let imgs: Vec<_> = doc.select(&sel("img")).collect();
        assert_eq!(attr(imgs[0], "src"), Some("/a.png"));
        assert_eq!(attr(imgs[1], "src"), None);
    }
}
