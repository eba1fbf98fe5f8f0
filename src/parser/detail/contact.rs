use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use super::{dom, selector, Ctx, Resolver, CONTACT_DETAILS};
use crate::model::Phone;

static TEL_LINK: LazyLock<Selector> = LazyLock::new(|| selector(r#"a[href^="tel:"]"#));
static MAIL_LINK: LazyLock<Selector> = LazyLock::new(|| selector(r#"a[href^="mailto:"]"#));

/// At least eight digits, optionally `+`-prefixed. Between two digits at most one
/// blank, or one hyphen/slash with a blank on either side; a wider gap ends the number.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d(?:(?:[ \t]|[ \t]?[\-/][ \t]?)?\d){7,}").unwrap()
});

pub const PHONE_CHAIN: &[Resolver<Phone>] = &[phone_from_tel_link, phone_from_text];

fn phone_from_tel_link(ctx: &Ctx) -> Option<Phone> {
    let contact = dom::first_in(ctx.doc, &CONTACT_DETAILS)?;
    let link = dom::first(contact, &TEL_LINK)?;
    let shown = dom::flat_text(link);
    let shown = if shown.is_empty() {
        dom::attr(link, "href").unwrap_or_default().to_string()
    } else {
        shown
    };
    let display = shown.trim_start_matches("tel:").trim();
    (!display.is_empty()).then(|| Phone::new(display))
}

fn phone_from_text(ctx: &Ctx) -> Option<Phone> {
    let contact = dom::first_in(ctx.doc, &CONTACT_DETAILS)?;
    dom::text_lines(contact)
        .iter()
        .find_map(|line| PHONE_RE.find(line))
        .map(|m| Phone::new(m.as_str()))
}

/// First non-empty `mailto:` address anywhere in the fragment.
pub fn email(ctx: &Ctx) -> Option<String> {
    ctx.doc.select(&MAIL_LINK).find_map(|link| {
        let href = dom::attr(link, "href")?;
        let address = href.strip_prefix("mailto:")?.split('?').next().unwrap_or_default();
        dom::non_empty(address)
    })
}
