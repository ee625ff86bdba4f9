//! Accessory Extraction
//!
//! Accessories live in a bounded "🎁 Accessories" section of AI quote
//! messages: bullet lines following the header, ending at the first
//! non-bullet line. The "(Inside Label)" suffix normalizes to the plain
//! "Label" table name. When the section yields nothing, the whole text is
//! scanned for a fixed set of common accessory keywords instead.

use regex::Regex;

#[derive(Debug)]
pub(crate) struct AccessoryExtractor {
    header: Regex,
    bullet: Regex,
    keyword: Regex,
}

impl AccessoryExtractor {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            header: Regex::new(r"(?i)^\s*(?:🎁\s*)?accessories\b[^\n]*$")?,
            bullet: Regex::new(r"^\s*[•*-]\s*([^:\n]+?)(?:\s*:.*)?$")?,
            keyword: Regex::new(
                r"(?i)\b(hang\s*tags?|stickers?|b-tape|brand\s+labels?|woven\s+labels?|inside\s+labels?|labels?|hologram|polybags?|tissue\s+paper)\b",
            )?,
        })
    }

    /// Extract the accessory list; empty when the message names none.
    pub(crate) fn extract(&self, text: &str) -> Vec<String> {
        let mut accessories = self.from_section(text);

        if accessories.is_empty() {
            accessories = self.from_keywords(text);
        }

        accessories
    }

    /// Bullet lines inside the bounded accessories section.
    fn from_section(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut in_section = false;

        for line in text.lines() {
            if self.header.is_match(line) {
                in_section = true;
                continue;
            }

            if !in_section {
                continue;
            }

            // The section ends at the first non-bullet line.
            let Some(caps) = self.bullet.captures(line) else {
                break;
            };

            if let Some(name) = caps.get(1) {
                push_unique(&mut found, normalize(name.as_str()));
            }
        }

        found
    }

    /// Whole-text scan for common accessory keywords.
    fn from_keywords(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();

        for matched in self.keyword.find_iter(text) {
            push_unique(&mut found, canonical_keyword(matched.as_str()));
        }

        found
    }
}

/// Normalize one bulleted accessory name.
fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    // "(Inside Label)" marks the plain inside label the table calls "Label".
    if trimmed.to_lowercase().ends_with("(inside label)") {
        return "Label".to_string();
    }

    trimmed.to_string()
}

/// Canonical table name for a scanned keyword.
fn canonical_keyword(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.to_lowercase().trim_end_matches('s') {
        "hang tag" | "hangtag" => "Hang Tag".to_string(),
        "sticker" => "Sticker".to_string(),
        "b-tape" => "B-Tape".to_string(),
        "brand label" => "Brand Label".to_string(),
        "woven label" => "Woven Label".to_string(),
        "inside label" | "label" => "Label".to_string(),
        "hologram" => "Hologram".to_string(),
        "polybag" => "Polybag".to_string(),
        "tissue paper" => "Tissue Paper".to_string(),
        other => crate::quote::patterns::title_case(other),
    }
}

fn push_unique(accessories: &mut Vec<String>, accessory: String) {
    if !accessories.contains(&accessory) {
        accessories.push(accessory);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn section_bullets_are_collected_in_order() -> TestResult {
        let extractor = AccessoryExtractor::new()?;

        let text = "🎁 Accessories:\n- Hang Tag\n- Sticker: $0.10 each\n\nDelivery: included";

        assert_eq!(
            extractor.extract(text),
            vec!["Hang Tag".to_string(), "Sticker".to_string()]
        );

        Ok(())
    }

    #[test]
    fn section_is_bounded_by_first_non_bullet_line() -> TestResult {
        let extractor = AccessoryExtractor::new()?;

        let text = "🎁 Accessories:\n- Hang Tag\nTotal Order: $100\n- Sticker";

        assert_eq!(extractor.extract(text), vec!["Hang Tag".to_string()]);

        Ok(())
    }

    #[test]
    fn inside_label_suffix_normalizes_to_label() -> TestResult {
        let extractor = AccessoryExtractor::new()?;

        let text = "🎁 Accessories:\n- Woven Label (Inside Label)";

        assert_eq!(extractor.extract(text), vec!["Label".to_string()]);

        Ok(())
    }

    #[test]
    fn keyword_scan_covers_sectionless_messages() -> TestResult {
        let extractor = AccessoryExtractor::new()?;

        let text = "each cap ships with a hang tag, stickers and tissue paper";

        assert_eq!(
            extractor.extract(text),
            vec![
                "Hang Tag".to_string(),
                "Sticker".to_string(),
                "Tissue Paper".to_string()
            ]
        );

        Ok(())
    }

    #[test]
    fn plain_header_without_emoji_works() -> TestResult {
        let extractor = AccessoryExtractor::new()?;

        let text = "Accessories included:\n- B-Tape";

        assert_eq!(extractor.extract(text), vec!["B-Tape".to_string()]);

        Ok(())
    }

    #[test]
    fn no_mention_extracts_nothing() -> TestResult {
        let extractor = AccessoryExtractor::new()?;

        assert!(extractor.extract("just caps, nothing extra").is_empty());

        Ok(())
    }
}
