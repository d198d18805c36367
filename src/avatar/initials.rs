//! Initials Module
//!
//! Extracts the initials drawn on an avatar from a display name.

// == Options ==
/// Controls how initials are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialsOptions {
    /// Upper-case every initial
    pub all_caps: bool,
    /// Derive initials from the local part when the name is an email address
    pub allow_email: bool,
    /// Maximum number of initials
    pub limit: usize,
}

impl Default for InitialsOptions {
    fn default() -> Self {
        Self {
            all_caps: false,
            allow_email: true,
            limit: 3,
        }
    }
}

// == Parse Initials ==
/// Returns the initials for `name`.
///
/// Each whitespace-separated word starting with a letter contributes its first
/// letter, up to `limit`. Case is preserved unless `all_caps` is set.
///
/// - A leading email address is replaced by its local part
///   (`"joe@example.com"` -> `"j"`); emails elsewhere are skipped.
/// - A later word of the form `(nick)` short-circuits and returns `nick`
///   (`"John Doe (dj)"` -> `"dj"`). An unclosed parenthesis is skipped.
pub fn parse_initials(name: &str, opts: &InitialsOptions) -> String {
    let mut initials = String::new();
    let mut count = 0;

    for (i, word) in name.split_whitespace().enumerate() {
        if count >= opts.limit {
            break;
        }

        if is_email(word) {
            if i == 0 && opts.allow_email {
                let local = word.split('@').next().unwrap_or_default();
                return parse_initials(local, opts);
            }
            continue;
        }

        let mut chars = word.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() => {
                initials.push(if opts.all_caps { upper(c) } else { c });
                count += 1;
            }
            Some('(') if i > 0 => {
                if let Some(nick) = nickname(chars.as_str()) {
                    return nick.to_string();
                }
            }
            _ => {}
        }
    }

    initials
}

// Single-char uppercase of a lowercase letter; anything else is kept as is.
fn upper(c: char) -> char {
    if !c.is_lowercase() {
        return c;
    }
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

// == Supported Names ==
/// Returns true if a name starting with `first` can be drawn.
///
/// Letters in any script qualify, Han ideographs included.
pub fn is_supported(first: char) -> bool {
    first.is_alphabetic()
}

// Text up to the closing parenthesis, if the word has one.
fn nickname(rest: &str) -> Option<&str> {
    rest.find(')').map(|end| &rest[..end])
}

// Loose address check: one '@', a local part, and a dotted domain.
fn is_email(word: &str) -> bool {
    let Some((local, domain)) = word.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn initials(name: &str) -> String {
        parse_initials(name, &InitialsOptions::default())
    }

    #[test]
    fn test_initials_from_names() {
        let cases = [
            ("John", "J"),
            ("Doe", "D"),
            ("", ""),
            ("John Doe", "JD"),
            ("john doe", "jd"),
            ("joe@example.com", "j"),
            ("John Doe (dj)", "dj"),
        ];

        for (name, expected) in cases {
            assert_eq!(initials(name), expected, "name: {name:?}");
        }
    }

    #[test]
    fn test_initials_limit() {
        assert_eq!(initials("Anna Bella Clara Dora"), "ABC");

        let opts = InitialsOptions {
            limit: 1,
            ..Default::default()
        };
        assert_eq!(parse_initials("Anna Bella", &opts), "A");
    }

    #[test]
    fn test_initials_all_caps() {
        let opts = InitialsOptions {
            all_caps: true,
            ..Default::default()
        };
        assert_eq!(parse_initials("john doe", &opts), "JD");
    }

    #[test]
    fn test_initials_all_caps_keeps_one_char_per_word() {
        let opts = InitialsOptions {
            all_caps: true,
            ..Default::default()
        };
        // 'ß' has no single-char uppercase; titlecase 'ǅ' is not lowercase
        assert_eq!(parse_initials("ßara ǅemal élise", &opts), "ßǅÉ");
        assert_eq!(parse_initials("ßara ǅemal élise", &opts).chars().count(), 3);
    }

    #[test]
    fn test_initials_email_handling() {
        // Email local part is parsed as a name
        assert_eq!(initials("jane.doe@example.org"), "j");
        // Emails after the first word are ignored
        assert_eq!(initials("Jane jane@example.org Doe"), "JD");

        let opts = InitialsOptions {
            allow_email: false,
            ..Default::default()
        };
        assert_eq!(parse_initials("joe@example.com Smith", &opts), "S");
    }

    #[test]
    fn test_initials_skip_non_letters() {
        assert_eq!(initials("John 42 Doe"), "JD");
        assert_eq!(initials("  spaced   out  "), "so");
    }

    #[test]
    fn test_initials_parenthesis() {
        // A leading parenthesis is not a nickname
        assert_eq!(initials("(dj) John"), "J");
        // Unclosed nickname is ignored
        assert_eq!(initials("John (dj"), "J");
        assert_eq!(initials("John (dj)!"), "dj");
    }

    #[test]
    fn test_initials_han() {
        assert_eq!(initials("孔子"), "孔");
        assert!(is_supported('孔'));
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported('J'));
        assert!(is_supported('é'));
        assert!(!is_supported('*'));
        assert!(!is_supported('4'));
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("joe@example.com"));
        assert!(is_email("joe@mail.example.com."));
        assert!(!is_email("joe@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("joe@@example.com"));
        assert!(!is_email("joe"));
    }
}
