use std::sync::LazyLock;

use scraper::Selector;
use tracing::debug;

use super::{dom, selector, Ctx, SOCIAL_URLS};
use crate::model::{Platform, SocialLinks};

static LINKS: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));

/// Checked in this order against the link target and its icon's alt text.
const PLATFORM_KEYWORDS: &[(Platform, &str)] = &[
    (Platform::Facebook, "facebook"),
    (Platform::LinkedIn, "linkedin"),
    (Platform::Instagram, "instagram"),
];

/// Links of the `.smUrls` block, one per platform, first seen wins.
pub fn classify(ctx: &Ctx) -> SocialLinks {
    let mut links = SocialLinks::default();
    let Some(region) = dom::first_in(ctx.doc, &SOCIAL_URLS) else {
        return links;
    };

    for a in region.select(&LINKS) {
        let Some(href) = dom::attr(a, "href") else { continue };
        let alt = dom::first(a, &IMG)
            .and_then(|img| dom::attr(img, "alt"))
            .unwrap_or_default();
        let Some(platform) = classify_link(href, alt) else { continue };
        if !links.insert_first(platform, href) {
            debug!("Ignoring extra {:?} link {}", platform, href);
        }
    }
    links
}

fn classify_link(href: &str, alt: &str) -> Option<Platform> {
    let href_lower = href.to_lowercase();
    let alt_lower = alt.to_lowercase();
    PLATFORM_KEYWORDS
        .iter()
        .find(|(_, kw)| href_lower.contains(kw) || alt_lower.contains(kw))
        .map(|(platform, _)| *platform)
        .or_else(|| is_absolute(&href_lower).then_some(Platform::Website))
}

fn is_absolute(href_lower: &str) -> bool {
    href_lower.starts_with("http://") || href_lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::super::testutil::with_ctx;
    use super::*;

    #[test]
    fn classifies_by_href_and_alt() {
        let html = r#"<div class="smUrls">
            <a href="https://www.facebook.com/rossi"><img alt="fb"></a>
            <a href="https://lnkd.in/abc"><img src="/i.png" alt="LinkedIn"></a>
            <a href="https://INSTAGRAM.com/rossi"></a>
            <a href="https://studiorossi.it">sito</a>
        </div>"#;
        let links = with_ctx(html, classify);
        assert_eq!(links.get(Platform::Facebook), Some("https://www.facebook.com/rossi"));
        assert_eq!(links.get(Platform::LinkedIn), Some("https://lnkd.in/abc"));
        assert_eq!(links.get(Platform::Instagram), Some("https://INSTAGRAM.com/rossi"));
        assert_eq!(links.get(Platform::Website), Some("https://studiorossi.it"));
    }

    #[test]
    fn second_facebook_link_is_ignored() {
        let html = r#"<div class="smUrls">
            <a href="https://facebook.com/page-one">1</a>
            <a href="https://facebook.com/page-two">2</a>
        </div>"#;
        let links = with_ctx(html, classify);
        assert_eq!(links.len(), 1);
        assert_eq!(links.get(Platform::Facebook), Some("https://facebook.com/page-one"));
        assert!(!links.contains(Platform::Website));
    }

    #[test]
    fn website_is_first_unclassified_absolute_link() {
        let html = r#"<div class="smUrls">
            <a href="/it/relative">rel</a>
            <a href="https://first.example.com">a</a>
            <a href="http://second.example.com">b</a>
        </div>"#;
        let links = with_ctx(html, classify);
        assert_eq!(links.get(Platform::Website), Some("https://first.example.com"));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn links_outside_region_are_ignored() {
        let html = r#"<a href="https://facebook.com/x">fb</a><div class="smUrls"></div>"#;
        assert!(with_ctx(html, classify).is_empty());
    }
}
