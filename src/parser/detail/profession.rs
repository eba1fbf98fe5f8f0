use std::sync::LazyLock;

use scraper::Selector;

use super::{dom, selector, Ctx, Resolver, PROFILE_INFO, PROFILE_TOP};

static MARKED: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [".specialty", ".profession", ".memberProfession"]
        .iter()
        .map(|css| selector(css))
        .collect()
});

/// Position of the profession in `.memberProfileInfo` when the block follows the
/// usual name, company, profession, phone order.
const PROFESSION_LINE: usize = 2;

pub const CHAIN: &[Resolver<String>] = &[marked, positional];

fn marked(ctx: &Ctx) -> Option<String> {
    let top = dom::first_in(ctx.doc, &PROFILE_TOP)?;
    MARKED
        .iter()
        .filter_map(|sel| dom::first(top, sel))
        .find_map(|el| dom::non_empty(&dom::flat_text(el)))
}

/// Best effort: the upstream line order is observed, not guaranteed. Kept last.
fn positional(ctx: &Ctx) -> Option<String> {
    let info = dom::first_in(ctx.doc, &PROFILE_INFO)?;
    dom::text_lines(info).into_iter().nth(PROFESSION_LINE)
}
