use std::collections::BTreeMap;

/// Which query parameter carried a member's identifier in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    MemberId,
    UserId,
}

impl IdKind {
    /// Listing anchors are tested in this order; the first match per anchor wins.
    pub const PRIORITY: [IdKind; 2] = [IdKind::MemberId, IdKind::UserId];

    pub fn param(self) -> &'static str {
        match self {
            IdKind::MemberId => "encryptedMemberId",
            IdKind::UserId => "encryptedUserId",
        }
    }
}

/// A member reference found in the listing, not yet enriched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMember {
    pub external_id: String,
    pub id_kind: IdKind,
    pub raw_display_name: String,
    pub source_link: String,
}

impl CandidateMember {
    /// `encryptedMemberId=XXXX`, as sent to the detail endpoint and used in detail links.
    pub fn query_pair(&self) -> String {
        format!("{}={}", self.id_kind.param(), self.external_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Facebook,
    LinkedIn,
    Instagram,
    Website,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Website => "Sito web",
        }
    }

    pub fn icon_domain(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook.com",
            Platform::LinkedIn => "linkedin.com",
            Platform::Instagram => "instagram.com",
            Platform::Website => "google.com",
        }
    }
}

/// At most one URL per platform; the first insert for a platform sticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks(BTreeMap<Platform, String>);

impl SocialLinks {
    /// Returns false when the platform was already taken and `url` was discarded.
    pub fn insert_first(&mut self, platform: Platform, url: &str) -> bool {
        if self.0.contains_key(&platform) {
            return false;
        }
        self.0.insert(platform, url.to_string());
        true
    }

    #[cfg(test)]
    pub fn get(&self, platform: Platform) -> Option<&str> {
        self.0.get(&platform).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains_key(&platform)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in platform priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Platform, &str)> {
        self.0.iter().map(|(p, u)| (*p, u.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    /// As shown on the profile, formatting intact.
    pub display: String,
    /// Digits (and a leading `+`) only, for `tel:` links.
    pub dial: String,
}

impl Phone {
    pub fn new(display: &str) -> Self {
        let display = display.trim().to_string();
        let dial = display
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '/')
            .collect();
        Phone { display, dial }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub canonical_name: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: Option<String>,
    pub profession: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub phone: Option<Phone>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub company_logo_url: Option<String>,
    pub social_links: SocialLinks,
    pub detail_url: String,
}
