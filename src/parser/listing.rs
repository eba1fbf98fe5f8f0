use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::dom::{attr, flat_text};
use crate::model::{CandidateMember, IdKind};

static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static DATA_ID_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[data-encryptedmemberid]").unwrap());
static DESCENDANT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("*").unwrap());

static MEMBER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]encryptedMemberId=([^&#]+)").unwrap());
static USER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]encryptedUserId=([^&#]+)").unwrap());

fn id_pattern(kind: IdKind) -> &'static Regex {
    match kind {
        IdKind::MemberId => &*MEMBER_ID_RE,
        IdKind::UserId => &*USER_ID_RE,
    }
}

/// Index a member-list fragment into candidates, document order, first id wins.
///
/// Anchors linking to `memberdetails?encryptedMemberId=…` / `…encryptedUserId=…` are the
/// primary source. Only when none are found are `data-encryptedmemberid` attributes
/// read. An empty result means "no members found", not an error.
pub fn index_members(listing: &str) -> Vec<CandidateMember> {
    let doc = Html::parse_fragment(listing);
    let mut seen: HashSet<String> = HashSet::new();

    let mut members = from_anchors(&doc, &mut seen);
    if members.is_empty() {
        members = from_data_attributes(&doc, &mut seen);
        if !members.is_empty() {
            debug!("No member links in listing, used data attributes instead");
        }
    }

    info!("Indexed {} members", members.len());
    members
}

fn from_anchors(doc: &Html, seen: &mut HashSet<String>) -> Vec<CandidateMember> {
    let mut members = Vec::new();
    for a in doc.select(&ANCHOR_SEL) {
        let Some(href) = attr(a, "href") else { continue };
        let Some((id_kind, external_id)) = match_id(href) else { continue };
        if !seen.insert(external_id.clone()) {
            continue;
        }
        members.push(CandidateMember {
            external_id,
            id_kind,
            raw_display_name: display_name(a),
            source_link: href.to_string(),
        });
    }
    members
}

fn from_data_attributes(doc: &Html, seen: &mut HashSet<String>) -> Vec<CandidateMember> {
    let mut members = Vec::new();
    for el in doc.select(&DATA_ID_SEL) {
        let Some(id) = attr(el, "data-encryptedmemberid") else { continue };
        if !seen.insert(id.to_string()) {
            continue;
        }
        members.push(CandidateMember {
            external_id: id.to_string(),
            id_kind: IdKind::MemberId,
            raw_display_name: flat_text(el),
            source_link: String::new(),
        });
    }
    members
}

/// Test the recognised parameters in priority order; the first one present wins.
fn match_id(href: &str) -> Option<(IdKind, String)> {
    IdKind::PRIORITY.iter().find_map(|&kind| {
        id_pattern(kind)
            .captures(href)
            .map(|caps| (kind, caps[1].to_string()))
    })
}

/// Text of the first descendant whose class mentions "name" (e.g. `memberName`),
/// else the whole anchor text.
fn display_name(anchor: ElementRef) -> String {
    let named = anchor
        .select(&DESCENDANT_SEL)
        .find(|el| el.value().classes().any(|c| c.to_lowercase().contains("name")))
        .map(flat_text)
        .filter(|t| !t.is_empty());
    named.unwrap_or_else(|| flat_text(anchor))
}
