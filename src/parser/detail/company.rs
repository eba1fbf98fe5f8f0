use super::{dom, Ctx, COMPANY_TEXT};
use crate::parser::names::comparison_key;

const MAX_ADDRESS_LINES: usize = 3;

/// Country names the CMS appends to addresses; they add nothing on a local roster.
const COUNTRY_TOKENS: &[&str] = &["italia", "italy"];

/// `(company, address)` from the company-detail text block.
///
/// The block often repeats the member's own name above the company; any line that
/// matches `member_name` (titles and case ignored) is dropped first.
pub fn resolve_company(ctx: &Ctx, member_name: &str) -> (Option<String>, Option<String>) {
    let Some(holder) = dom::first_in(ctx.doc, &COMPANY_TEXT) else {
        return (None, None);
    };
    split_company_lines(dom::text_lines(holder), member_name)
}

fn split_company_lines(lines: Vec<String>, member_name: &str) -> (Option<String>, Option<String>) {
    let own = comparison_key(member_name);
    let mut remaining = lines
        .into_iter()
        .filter(|line| own.is_empty() || comparison_key(line) != own);

    let company = remaining.next();
    let address: Vec<String> = remaining
        .take(MAX_ADDRESS_LINES)
        .filter(|line| !COUNTRY_TOKENS.contains(&line.to_lowercase().as_str()))
        .collect();
    let address = (!address.is_empty()).then(|| address.join(", "));
    (company, address)
}
