use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use super::{dom, Ctx, Resolver, INFO_NOISE_CLASSES, PROFILE_INFO, PROFILE_TOP};
use crate::parser::names::strip_honorific;

const MAX_NAME_CHARS: usize = 60;

/// Whole words that mark a contact block rather than a name heading.
static PHONE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:telefono|phone)\b").unwrap());

static HEADING_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["h1", "h2", ".memberName", ".name"]
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect()
});

pub const CHAIN: &[Resolver<String>] = &[from_profile_top, from_profile_info, from_candidate];

/// Headings in the profile banner, in selector priority.
fn from_profile_top(ctx: &Ctx) -> Option<String> {
    let top = dom::first_in(ctx.doc, &PROFILE_TOP)?;
    HEADING_SELECTORS
        .iter()
        .filter_map(|sel| dom::first(top, sel))
        .map(dom::flat_text)
        .find(|text| plausible_name(text))
        .and_then(|text| accept(&text))
}

/// First text line of the info block once photo, contact and social blocks are skipped.
fn from_profile_info(ctx: &Ctx) -> Option<String> {
    let info = dom::first_in(ctx.doc, &PROFILE_INFO)?;
    let lines = dom::pruned_text_lines(info, INFO_NOISE_CLASSES);
    let first = lines.first()?;
    if first.chars().count() >= MAX_NAME_CHARS {
        return None;
    }
    accept(first)
}

/// Whatever the listing showed for this member.
fn from_candidate(ctx: &Ctx) -> Option<String> {
    accept(&ctx.candidate.raw_display_name)
}

fn plausible_name(text: &str) -> bool {
    if text.is_empty() || text.chars().count() >= MAX_NAME_CHARS {
        return false;
    }
    !PHONE_WORD_RE.is_match(text)
}

fn accept(raw: &str) -> Option<String> {
    dom::non_empty(&strip_honorific(raw))
}

#[cfg(test)]
mod tests {
    use super::super::{resolve, testutil::with_ctx};
    use super::*;

    fn name_of(html: &str) -> Option<String> {
        with_ctx(html, |ctx| resolve(ctx, CHAIN))
    }

    #[test]
    fn heading_in_profile_top() {
        let html = r#"<section class="widgetMemberProfileTop"><h2>Dott. Marco  Bruni</h2></section>"#;
        assert_eq!(name_of(html).as_deref(), Some("Marco Bruni"));
    }

    #[test]
    fn heading_priority_h1_first() {
        let html = r#"<section class="widgetMemberProfileTop">
            <span class="memberName">Span Name</span><h2>Second</h2><h1>First Name</h1></section>"#;
        assert_eq!(name_of(html).as_deref(), Some("First Name"));
    }

    #[test]
    fn phone_heading_is_rejected() {
        let html = r#"
            <section class="widgetMemberProfileTop">
              <h1>Telefono 0184 123456</h1>
              <h2>Giulia Russo</h2>
            </section>"#;
        assert_eq!(name_of(html).as_deref(), Some("Giulia Russo"));
    }

    #[test]
    fn phone_inside_a_name_is_kept() {
        let html = r#"<section class="widgetMemberProfileTop"><h1>Persephone Galli</h1></section>"#;
        assert_eq!(name_of(html).as_deref(), Some("Persephone Galli"));
        let html = r#"<section class="widgetMemberProfileTop"><h1>Phone: 0184 123456</h1></section>"#;
        assert_eq!(name_of(html).as_deref(), Some("Mario Rossi"));
    }

    #[test]
    fn overlong_heading_is_rejected() {
        let long = "x ".repeat(40);
        let html = format!(
            r#"<section class="widgetMemberProfileTop"><h1>{long}</h1></section>
               <div class="memberProfileInfo">Luca Verdi<br>Verdi Srl</div>"#
        );
        assert_eq!(name_of(&html).as_deref(), Some("Luca Verdi"));
    }

    #[test]
    fn info_first_line_skips_sub_blocks() {
        let html = r#"
            <div class="memberProfileInfo">
              <div class="profilephoto"><img src="/a.png"><span>Foto</span></div>
              <div class="smUrls"><a href="https://facebook.com/x">fb</a></div>
              <p>Sig.ra Paola Neri</p>
              <p>Neri Consulting</p>
              <div class="memberContactDetails">Telefono 3400061836</div>
            </div>"#;
        assert_eq!(name_of(html).as_deref(), Some("Paola Neri"));
    }

    #[test]
    fn falls_back_to_listing_name() {
        assert_eq!(name_of("<div>nothing here</div>").as_deref(), Some("Mario Rossi"));
    }
}
