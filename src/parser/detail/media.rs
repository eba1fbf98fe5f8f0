use std::sync::LazyLock;

use scraper::Selector;

use super::{dom, selector, Ctx, Resolver};

static PHOTO_RESPONSIVE: LazyLock<Selector> =
    LazyLock::new(|| selector(".profilephoto img.img-responsive"));
static PHOTO_ANY: LazyLock<Selector> = LazyLock::new(|| selector(".profilephoto img"));
static LOGO: LazyLock<Selector> = LazyLock::new(|| selector(".companyLogo img"));

pub const PHOTO_CHAIN: &[Resolver<String>] = &[photo_responsive, photo_any];

fn photo_responsive(ctx: &Ctx) -> Option<String> {
    image_src(ctx, &PHOTO_RESPONSIVE)
}

fn photo_any(ctx: &Ctx) -> Option<String> {
    image_src(ctx, &PHOTO_ANY)
}

pub fn company_logo(ctx: &Ctx) -> Option<String> {
    image_src(ctx, &LOGO)
}

/// `src` of the first matching image, resolved against the site origin.
fn image_src(ctx: &Ctx, sel: &Selector) -> Option<String> {
    let img = dom::first_in(ctx.doc, sel)?;
    ctx.site.resolve(dom::attr(img, "src")?)
}
