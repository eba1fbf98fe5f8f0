//! Member record → HTML card.
//!
//! Optional fields only get markup when they hold a value; a missing photo shows the
//! placeholder glyph, and a photo URL that fails to load swaps to it client-side.

use crate::model::{MemberRecord, Phone, SocialLinks};

const PLACEHOLDER_GLYPH: &str = "👤";
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain=";

pub fn render_card(m: &MemberRecord) -> String {
    let mut out = Vec::new();
    out.push(r#"<div class="member-card">"#.to_string());

    out.push(r#"  <div class="card-header">"#.to_string());
    out.extend(avatar(m).into_iter().map(|l| format!("    {l}")));
    out.push(r#"    <div class="card-header-info">"#.to_string());
    out.push(format!("      {}", name_heading(m)));
    if let Some(p) = &m.profession {
        out.push(format!(r#"      <div class="card-role">{}</div>"#, escape(p)));
    }
    out.push("    </div>".to_string());
    out.push("  </div>".to_string());

    out.push(r#"  <div class="card-body">"#.to_string());
    if let Some(row) = company_row(m) {
        out.push(format!("    {row}"));
    }
    if let Some(a) = &m.address {
        out.push(format!(r#"    <div class="card-address">📍 {}</div>"#, escape(a)));
    }
    if let Some(b) = &m.bio {
        out.push(format!(r#"    <div class="card-bio">{}</div>"#, escape(b)));
    }
    out.push("  </div>".to_string());

    out.push(r#"  <div class="card-footer">"#.to_string());
    if let Some(phone) = &m.phone {
        out.push(format!("    {}", phone_link(phone)));
    }
    if let Some(email) = &m.email {
        out.push(format!(
            r#"    <a class="card-email" href="mailto:{}">{}</a>"#,
            escape(email),
            escape(email)
        ));
    }
    if let Some(row) = social_row(&m.social_links) {
        out.push(format!("    {row}"));
    }
    out.push(format!(
        r#"    <a class="card-detail-link" href="{}" target="_blank">Dettagli →</a>"#,
        escape(&m.detail_url)
    ));
    out.push("  </div>".to_string());

    out.push("</div>".to_string());
    out.join("\n")
}

fn avatar(m: &MemberRecord) -> Vec<String> {
    match &m.photo_url {
        Some(url) => vec![
            format!(
                r#"<img class="card-avatar" src="{}" alt="{}" onerror="this.style.display='none';this.nextElementSibling.style.display='flex'">"#,
                escape(url),
                escape(&m.canonical_name)
            ),
            format!(r#"<div class="card-avatar-placeholder" style="display:none">{PLACEHOLDER_GLYPH}</div>"#),
        ],
        None => vec![format!(r#"<div class="card-avatar-placeholder">{PLACEHOLDER_GLYPH}</div>"#)],
    }
}

fn name_heading(m: &MemberRecord) -> String {
    let mut h = format!(
        r#"<h3><span class="card-firstname">{}</span>"#,
        escape(&m.first_name)
    );
    if !m.last_name.is_empty() {
        h.push_str(&format!(
            r#" <span class="card-lastname">{}</span>"#,
            escape(&m.last_name)
        ));
    }
    h.push_str("</h3>");
    h
}

fn company_row(m: &MemberRecord) -> Option<String> {
    if m.company.is_none() && m.company_logo_url.is_none() {
        return None;
    }
    let mut row = String::from(r#"<div class="card-company-row">"#);
    if let Some(logo) = &m.company_logo_url {
        row.push_str(&format!(
            r#"<img class="card-company-logo" src="{}" alt="logo">"#,
            escape(logo)
        ));
    }
    if let Some(company) = &m.company {
        row.push_str(&format!(r#"<div class="card-company">{}</div>"#, escape(company)));
    }
    row.push_str("</div>");
    Some(row)
}

fn phone_link(phone: &Phone) -> String {
    format!(
        r#"<a class="card-phone" href="tel:{}">📞 {}</a>"#,
        escape(&phone.dial),
        escape(&phone.display)
    )
}

fn social_row(links: &SocialLinks) -> Option<String> {
    if links.is_empty() {
        return None;
    }
    let icons: String = links
        .iter()
        .map(|(platform, url)| {
            let label = platform.label();
            format!(
                r#"<a class="card-social" href="{}" target="_blank" title="{label}"><img src="{FAVICON_SERVICE}{}" alt="{label}" width="16" height="16"></a>"#,
                escape(url),
                platform.icon_domain()
            )
        })
        .collect();
    Some(format!(r#"<div class="card-social-row">{icons}</div>"#))
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
