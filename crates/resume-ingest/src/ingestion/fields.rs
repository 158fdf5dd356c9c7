//! Pattern rules recovering candidate contact fields from raw text
//!
//! Each field is handled by an independent [`FieldRule`]. The rules are
//! heuristics: names with several capitals in one word ("McDonald"),
//! non-Latin names and international phone formats are not recognised.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::config::ExtractionConfig;
use crate::types::ExtractedFields;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

// North American numbers with optional +1 and area code, or a bare 10-digit run
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+1[\s.-]?)?(?:\(\d{3}\)\s?|\b\d{3}[\s.-])?\b\d{3}[\s.-]\d{4}\b|\b\d{10}\b")
        .expect("valid phone regex")
});

static NAME_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").expect("valid name regex"));

/// A pure text -> value extraction rule for one field
pub trait FieldRule: Send + Sync {
    /// First value in document order, if any
    fn extract(&self, text: &str) -> Option<String>;

    /// Every distinct value in document order
    fn extract_all(&self, text: &str) -> Vec<String> {
        self.extract(text).into_iter().collect()
    }

    /// Label used when the field is missing
    fn label(&self) -> &'static str;
}

/// Collect regex matches in order, dropping repeats
fn distinct_matches(pattern: &Regex, text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in pattern.find_iter(text) {
        let value = m.as_str().trim();
        if !found.iter().any(|f| f == value) {
            found.push(value.to_string());
        }
    }
    found
}

/// `local@domain.tld` with a TLD of two or more letters
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailRule;

impl FieldRule for EmailRule {
    fn extract(&self, text: &str) -> Option<String> {
        EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        distinct_matches(&EMAIL_PATTERN, text)
    }

    fn label(&self) -> &'static str {
        "Email"
    }
}

/// North-American style phone numbers
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneRule;

impl FieldRule for PhoneRule {
    fn extract(&self, text: &str) -> Option<String> {
        PHONE_PATTERN.find(text).map(|m| m.as_str().trim().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        distinct_matches(&PHONE_PATTERN, text)
    }

    fn label(&self) -> &'static str {
        "Contact Number"
    }
}

/// First leading line made only of capitalised words
#[derive(Debug, Clone)]
pub struct NameRule {
    scan_lines: usize,
    min_words: usize,
    max_words: usize,
}

impl Default for NameRule {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl NameRule {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            scan_lines: config.name_scan_lines,
            min_words: config.min_name_words,
            max_words: config.max_name_words,
        }
    }

    fn is_name_line(&self, words: &[&str]) -> bool {
        (self.min_words..=self.max_words).contains(&words.len())
            && words.iter().all(|w| NAME_WORD_PATTERN.is_match(w))
    }
}

impl FieldRule for NameRule {
    fn extract(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.scan_lines)
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .find(|words| self.is_name_line(words))
            .map(|words| words.join(" "))
    }

    fn label(&self) -> &'static str {
        "Full Name"
    }
}

/// Applies one rule per mandatory field
#[derive(Clone)]
pub struct FieldExtractor {
    name: Arc<dyn FieldRule>,
    email: Arc<dyn FieldRule>,
    phone: Arc<dyn FieldRule>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl std::fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("name", &self.name.label())
            .field("email", &self.email.label())
            .field("phone", &self.phone.label())
            .finish()
    }
}

impl FieldExtractor {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            name: Arc::new(NameRule::from_config(config)),
            email: Arc::new(EmailRule),
            phone: Arc::new(PhoneRule),
        }
    }

    pub fn with_name_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.name = Arc::new(rule);
        self
    }

    pub fn with_email_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.email = Arc::new(rule);
        self
    }

    pub fn with_phone_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.phone = Arc::new(rule);
        self
    }

    /// Run every rule over the text
    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            full_name: self.name.extract(text),
            email: self.email.extract(text),
            contact_number: self.phone.extract(text),
            all_emails: self.email.extract_all(text),
            all_phones: self.phone.extract_all(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_resume_text() {
        let text = "John Smith\nEmail: john.smith@example.com\nPhone: 555-123-4567";
        let fields = FieldExtractor::default().extract(text);

        assert_eq!(fields.full_name.as_deref(), Some("John Smith"));
        assert_eq!(fields.email.as_deref(), Some("john.smith@example.com"));
        assert_eq!(fields.contact_number.as_deref(), Some("555-123-4567"));
        assert!(fields.missing_labels().is_empty());
    }

    #[test]
    fn test_email_first_match_wins() {
        let text = "contact: first.last+cv@mail.example.co.uk or backup@other.org";
        assert_eq!(
            EmailRule.extract(text).as_deref(),
            Some("first.last+cv@mail.example.co.uk")
        );
        assert_eq!(
            EmailRule.extract_all(text),
            vec!["first.last+cv@mail.example.co.uk", "backup@other.org"]
        );
        assert_eq!(EmailRule.extract("no address here @ all"), None);
        // A pipe is not a TLD character.
        assert_eq!(EmailRule.extract("x@host.c|m"), None);
    }

    #[test]
    fn test_phone_formats() {
        let cases = [
            ("call (555) 123-4567 today", "(555) 123-4567"),
            ("+1 555.123.4567", "+1 555.123.4567"),
            ("mobile 5551234567", "5551234567"),
            ("desk 555 123 4567", "555 123 4567"),
            ("ext 123-4567", "123-4567"),
        ];
        for (text, expected) in cases {
            assert_eq!(PhoneRule.extract(text).as_deref(), Some(expected), "{}", text);
        }
        assert_eq!(PhoneRule.extract("born 1990, zip 55401"), None);
        assert_eq!(PhoneRule.extract("id 123456789012"), None);
        assert_eq!(PhoneRule.extract("Acme Corp 2019-2024"), None);
    }

    #[test]
    fn test_name_rule_limits() {
        let rule = NameRule::default();
        assert_eq!(rule.extract("\n\n  Mary Ann Lee  \n"), Some("Mary Ann Lee".into()));
        assert_eq!(rule.extract("Cher\nSome Body"), Some("Some Body".into()));
        // Five words is too many, acronyms and initials do not qualify.
        assert_eq!(rule.extract("Anna Maria Luisa Van Berg"), None);
        assert_eq!(rule.extract("JOHN SMITH"), None);
        assert_eq!(rule.extract("J Smith"), None);
        assert_eq!(rule.extract("Jean-Luc Picard"), None);
    }

    #[test]
    fn test_name_only_in_first_five_non_blank_lines() {
        let text = "Resume\n\nobjective\nskills: rust\nexperience\n2019-2024\nLate Name";
        assert_eq!(NameRule::default().extract(text), None);

        let text = "Resume\n\n\n\nobjective\nskills\nexperience\nEarly Name";
        assert_eq!(NameRule::default().extract(text), Some("Early Name".into()));
    }

    #[test]
    fn test_rules_are_swappable() {
        struct FixedName;
        impl FieldRule for FixedName {
            fn extract(&self, _text: &str) -> Option<String> {
                Some("Fixed Name".into())
            }
            fn label(&self) -> &'static str {
                "Full Name"
            }
        }

        let extractor = FieldExtractor::default().with_name_rule(FixedName);
        let fields = extractor.extract("lowercase only, a@b.io, 555-123-4567");
        assert_eq!(fields.full_name.as_deref(), Some("Fixed Name"));
        assert_eq!(fields.email.as_deref(), Some("a@b.io"));
    }
}
