use std::sync::LazyLock;

use regex::Regex;

// Longer forms first so "Sig.ra" is not read as "Sig" + ".ra".
static HONORIFIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:sig\.ra|dott\.ssa|mrs|mr|ms|dr|prof|sig|dott)\.?\s+").unwrap()
});

/// Remove leading honorifics ("Dr.", "Sig.ra", "Dott.ssa", ...) and collapse whitespace.
/// A title is only stripped when it is a whole leading word followed by whitespace.
pub fn strip_honorific(raw: &str) -> String {
    let mut name = collapse_whitespace(raw);
    while let Some(m) = HONORIFIC_RE.find(&name) {
        name = name[m.end()..].to_string();
    }
    name
}

/// `(first, last)`: first token, then the rest joined with single spaces.
pub fn split_name(raw: &str) -> (String, String) {
    let clean = strip_honorific(raw);
    let mut tokens = clean.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let last = tokens.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Key used to compare a free-text line against a member name.
pub fn comparison_key(raw: &str) -> String {
    strip_honorific(raw).to_lowercase()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_common_titles() {
        assert_eq!(strip_honorific("Dr. Mario Rossi"), "Mario Rossi");
        assert_eq!(strip_honorific("Ms. Anna Bianchi"), "Anna Bianchi");
        assert_eq!(strip_honorific("mrs Jane Doe"), "Jane Doe");
        assert_eq!(strip_honorific("PROF Luigi Verdi"), "Luigi Verdi");
    }

    #[test]
    fn strips_italian_titles() {
        assert_eq!(strip_honorific("Sig.ra Paola Neri"), "Paola Neri");
        assert_eq!(strip_honorific("Sig. Paolo Neri"), "Paolo Neri");
        assert_eq!(strip_honorific("Dott.ssa Giulia Russo"), "Giulia Russo");
        assert_eq!(strip_honorific("Dott Marco Russo"), "Marco Russo");
    }

    #[test]
    fn stacked_titles_are_all_removed() {
        assert_eq!(strip_honorific("Dott. Prof. Marco Russo"), "Marco Russo");
    }

    #[test]
    fn title_prefix_of_real_word_is_kept() {
        assert_eq!(strip_honorific("Drake Smith"), "Drake Smith");
        assert_eq!(strip_honorific("Msafiri Otieno"), "Msafiri Otieno");
        assert_eq!(strip_honorific("Professore Bianchi"), "Professore Bianchi");
        assert_eq!(strip_honorific("Dottie West"), "Dottie West");
    }

    #[test]
    fn lone_title_is_left_alone() {
        assert_eq!(strip_honorific("Dr."), "Dr.");
    }

    #[test]
    fn split_first_and_last() {
        assert_eq!(split_name("Dr. Mario Rossi"), ("Mario".into(), "Rossi".into()));
        assert_eq!(
            split_name("  Anna   Maria  De Luca "),
            ("Anna".into(), "Maria De Luca".into())
        );
        assert_eq!(split_name("Cher"), ("Cher".into(), String::new()));
        assert_eq!(split_name(""), (String::new(), String::new()));
    }

    #[test]
    fn split_is_idempotent() {
        for raw in ["Dr. Mario Rossi", "Sig.ra Anna Maria De Luca", "Cher", "Drake  Smith"] {
            let (first, last) = split_name(raw);
            let rejoined = format!("{} {}", first, last);
            assert_eq!(split_name(&rejoined), (first.clone(), last.clone()), "{raw}");
            assert_eq!(strip_honorific(&strip_honorific(raw)), strip_honorific(raw));
        }
    }

    #[test]
    fn first_name_present_when_name_present() {
        for raw in ["Mr. X", "Sig Y Z", "Prof.   Q"] {
            let canonical = strip_honorific(raw);
            assert!(!canonical.is_empty());
            assert!(!split_name(&canonical).0.is_empty());
        }
    }

    #[test]
    fn comparison_key_ignores_title_and_case() {
        assert_eq!(comparison_key("Dr. MARIO  Rossi"), comparison_key("mario rossi"));
    }
}
