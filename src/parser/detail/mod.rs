//! Member detail fragment → [`MemberRecord`].
//!
//! Every field is resolved by an ordered chain of pure resolvers; the first one that
//! yields a value wins. A resolver finding nothing is the normal case for optional
//! fields. The only hard failure is a fragment that holds no markup at all.

pub mod bio;
pub mod company;
pub mod contact;
pub mod media;
pub mod name;
pub mod profession;
pub mod social;

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use super::dom;
use super::names::split_name;
use crate::config::Site;
use crate::error::CandidateError;
use crate::model::{CandidateMember, MemberRecord};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

// Regions of the detail widget markup.
static PROFILE_TOP: LazyLock<Selector> = LazyLock::new(|| selector(".widgetMemberProfileTop"));
static PROFILE_INFO: LazyLock<Selector> = LazyLock::new(|| selector(".memberProfileInfo"));
static CONTACT_DETAILS: LazyLock<Selector> = LazyLock::new(|| selector(".memberContactDetails"));
static SOCIAL_URLS: LazyLock<Selector> = LazyLock::new(|| selector(".smUrls"));
static COMPANY_TEXT: LazyLock<Selector> =
    LazyLock::new(|| selector(".widgetMemberCompanyDetail .textHolder"));
static FREE_TEXT: LazyLock<Selector> = LazyLock::new(|| selector(".widgetMemberTxtVideo"));

/// Class names of the sub-blocks inside `.memberProfileInfo` that are not the name.
const INFO_NOISE_CLASSES: &[&str] = &["profilephoto", "memberContactDetails", "smUrls"];

/// Everything a resolver may look at.
pub struct Ctx<'a> {
    pub doc: &'a Html,
    pub candidate: &'a CandidateMember,
    pub site: &'a Site,
}

pub type Resolver<T> = fn(&Ctx) -> Option<T>;

/// Run `chain` in order and keep the first value produced.
pub fn resolve<T>(ctx: &Ctx, chain: &[Resolver<T>]) -> Option<T> {
    chain.iter().find_map(|resolver| resolver(ctx))
}

/// Normalize one detail fragment. Fails only when `fragment` is not markup.
pub fn normalize(
    fragment: &str,
    candidate: &CandidateMember,
    site: &Site,
) -> Result<MemberRecord, CandidateError> {
    let doc = dom::parse_fragment(fragment).ok_or_else(|| CandidateError::MalformedFragment {
        external_id: candidate.external_id.clone(),
    })?;
    let ctx = Ctx {
        doc: &doc,
        candidate,
        site,
    };

    let canonical_name = resolve(&ctx, name::CHAIN).unwrap_or_default();
    let (first_name, last_name) = split_name(&canonical_name);
    let (company, address) = company::resolve_company(&ctx, &canonical_name);

    let record = MemberRecord {
        photo_url: resolve(&ctx, media::PHOTO_CHAIN),
        profession: resolve(&ctx, profession::CHAIN),
        company,
        address,
        phone: resolve(&ctx, contact::PHONE_CHAIN),
        email: contact::email(&ctx),
        bio: resolve(&ctx, bio::CHAIN),
        company_logo_url: media::company_logo(&ctx),
        social_links: social::classify(&ctx),
        detail_url: site.detail_url(&candidate.query_pair()),
        canonical_name,
        first_name,
        last_name,
    };

    debug!(
        "Normalized {} ({}): photo={} profession={} company={} phone={} email={} social={}",
        record.canonical_name,
        candidate.external_id,
        record.photo_url.is_some(),
        record.profession.is_some(),
        record.company.is_some(),
        record.phone.is_some(),
        record.email.is_some(),
        record.social_links.len(),
    );
    Ok(record)
}
