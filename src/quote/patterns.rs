//! Money and Count Patterns
//!
//! The activation gate and labeled sub-cost extraction, plus the small
//! text helpers shared by every extractor.

use regex::Regex;
use rust_decimal::Decimal;

/// Compiled patterns for the quote's monetary figures.
#[derive(Debug)]
pub(crate) struct MoneyPatterns {
    total: Regex,
    pieces: Regex,
    base_cost: Regex,
    customization_cost: Regex,
    delivery_cost: Regex,
}

impl MoneyPatterns {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            total: Regex::new(r"(?i)total\s+order\s*:\s*\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)")?,
            pieces: Regex::new(r"(?i)\b([0-9][0-9,]*)\s*pieces\b")?,
            base_cost: Regex::new(
                r"(?i)\b(?:blank\s+caps?|base\s+(?:product\s+)?cost)[^:\n]*:\s*\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)",
            )?,
            customization_cost: Regex::new(
                r"(?i)\b(?:customization|logos?\s+cost)[^:\n]*:\s*\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)",
            )?,
            delivery_cost: Regex::new(
                r"(?i)\bdelivery[^:\n]*:\s*\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)",
            )?,
        })
    }

    /// The `Total Order: $N` grand total, if present.
    pub(crate) fn total(&self, text: &str) -> Option<Decimal> {
        capture_decimal(&self.total, text)
    }

    /// The `N pieces` count, if present.
    pub(crate) fn pieces(&self, text: &str) -> Option<u32> {
        let caps = self.pieces.captures(text)?;

        caps.get(1)?.as_str().replace(',', "").parse().ok()
    }

    /// The labeled blank-cap/base cost, if present.
    pub(crate) fn base_cost(&self, text: &str) -> Option<Decimal> {
        capture_decimal(&self.base_cost, text)
    }

    /// The labeled customization cost, if present.
    pub(crate) fn customization_cost(&self, text: &str) -> Option<Decimal> {
        capture_decimal(&self.customization_cost, text)
    }

    /// The labeled delivery cost, if present.
    pub(crate) fn delivery_cost(&self, text: &str) -> Option<Decimal> {
        capture_decimal(&self.delivery_cost, text)
    }
}

/// First capture group of the first match, parsed as a decimal amount.
pub(crate) fn capture_decimal(pattern: &Regex, text: &str) -> Option<Decimal> {
    let caps = pattern.captures(text)?;

    caps.get(1)?.as_str().replace(',', "").parse().ok()
}

/// First capture group of the first match, as an owned string.
pub(crate) fn capture_string(pattern: &Regex, text: &str) -> Option<String> {
    let caps = pattern.captures(text)?;

    Some(caps.get(1)?.as_str().trim().to_string())
}

/// Reject captures that bled into pricing text or ran away: anything with
/// a dollar sign, an asterisk, a newline, or excessive length.
pub(crate) fn clean_capture(raw: &str, max_len: usize) -> Option<&str> {
    let trimmed = raw.trim();

    if trimmed.is_empty()
        || trimmed.len() > max_len
        || trimmed.contains('$')
        || trimmed.contains('*')
        || trimmed.contains('\n')
    {
        return None;
    }

    Some(trimmed)
}

/// Uppercase the first letter of each word, lowercasing the rest.
pub(crate) fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();

    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn total_pattern_tolerates_commas_and_spacing() -> TestResult {
        let patterns = MoneyPatterns::new()?;

        assert_eq!(
            patterns.total("Total Order: $2,412.80"),
            Some(Decimal::new(241_280, 2))
        );
        assert_eq!(
            patterns.total("total order:  $ 500"),
            Some(Decimal::from(500))
        );
        assert_eq!(patterns.total("Order total: $500"), None);

        Ok(())
    }

    #[test]
    fn pieces_pattern_reads_counts() -> TestResult {
        let patterns = MoneyPatterns::new()?;

        assert_eq!(patterns.pieces("for 288 pieces"), Some(288));
        assert_eq!(patterns.pieces("1,152 pieces of caps"), Some(1152));
        assert_eq!(patterns.pieces("many pieces"), None);

        Ok(())
    }

    #[test]
    fn labeled_costs_default_to_none_when_absent() -> TestResult {
        let patterns = MoneyPatterns::new()?;

        assert_eq!(patterns.base_cost("no costs here"), None);
        assert_eq!(
            patterns.base_cost("Blank Caps: $921.60"),
            Some(Decimal::new(92_160, 2))
        );
        assert_eq!(
            patterns.customization_cost("Customization (2 logos): $604.80"),
            Some(Decimal::new(60_480, 2))
        );

        Ok(())
    }

    #[test]
    fn clean_capture_rejects_pricing_bleed() {
        assert_eq!(clean_capture("  Chino Twill ", 40), Some("Chino Twill"));
        assert_eq!(clean_capture("Twill: $1.25", 40), None);
        assert_eq!(clean_capture("Twill *premium*", 40), None);
        assert_eq!(clean_capture("a\nb", 40), None);
        assert_eq!(clean_capture("", 40), None);
        assert_eq!(
            clean_capture("an enormously long capture that cannot be a fabric", 40),
            None
        );
    }

    #[test]
    fn title_case_normalizes_each_word() {
        assert_eq!(title_case("chino TWILL"), "Chino Twill");
        assert_eq!(title_case("  royal  "), "Royal");
        assert_eq!(title_case(""), "");
    }
}
