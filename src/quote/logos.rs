//! Logo Extraction
//!
//! Three pattern families, most specific first: `[Size] [Type] [Position]`
//! phrases, `[Position]: [Description]` lines, and `[Type] at [Position]`
//! phrases (folded into the first family's optional connector). Position
//! strings are normalized (whitespace collapsed, "Upper Bill"/"Under
//! Bill" special-cased, everything else title-cased) and duplicate
//! `(position, type)` pairs are suppressed. When nothing matches, a bare
//! mention of "3D Embroidery" or "Leather Patch" assumes Front placement.

use regex::Regex;

use crate::quote::{LogoSpec, patterns::title_case};

/// Logo size assumed when the message states none.
const DEFAULT_SIZE: &str = "Medium";

/// Position assumed for a bare logo-type mention.
const DEFAULT_POSITION: &str = "Front";

const TYPE_WORDS: &str = "3d embroidery|flat embroidery|embroidery|leather patch|rubber patch|woven patch|printed patch|sublimated print|screen print";

const POSITION_WORDS: &str = "front|back|left side|right side|left|right|upper bill|under bill";

#[derive(Debug)]
pub(crate) struct LogoExtractor {
    sized: Regex,
    positioned: Regex,
    size_word: Regex,
    type_word: Regex,
    bare: Regex,
}

impl LogoExtractor {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            sized: Regex::new(&format!(
                r"(?i)\b(?:(small|medium|large)\s+)?({TYPE_WORDS})(?:\s+logo)?(?:\s+(?:on|at)\s+(?:the\s+)?|\s+)({POSITION_WORDS})\b"
            ))?,
            positioned: Regex::new(&format!(
                r"(?im)^\s*(?:[•*-]\s*)?({POSITION_WORDS})\s*:\s*([^\n]+?)\s*$"
            ))?,
            size_word: Regex::new(r"(?i)\b(small|medium|large)\b")?,
            type_word: Regex::new(&format!(r"(?i)\b({TYPE_WORDS})\b"))?,
            bare: Regex::new(r"(?i)\b(3d embroidery|leather patch)\b")?,
        })
    }

    /// Extract every logo mentioned by the message.
    pub(crate) fn extract(&self, text: &str) -> Vec<LogoSpec> {
        let mut logos: Vec<LogoSpec> = Vec::new();

        for caps in self.sized.captures_iter(text) {
            let Some(logo_type) = caps.get(2) else { continue };
            let Some(position) = caps.get(3) else { continue };

            let size = caps
                .get(1)
                .map_or_else(|| DEFAULT_SIZE.to_string(), |m| title_case(m.as_str()));

            push_unique(
                &mut logos,
                LogoSpec {
                    location: normalize_position(position.as_str()),
                    logo_type: canonical_type(logo_type.as_str()),
                    size,
                    mold_charge: None,
                    total_cost: None,
                },
            );
        }

        for caps in self.positioned.captures_iter(text) {
            let (Some(position), Some(payload)) = (caps.get(1), caps.get(2)) else {
                continue;
            };

            let Some(spec) = self.from_description(position.as_str(), payload.as_str()) else {
                continue;
            };

            push_unique(&mut logos, spec);
        }

        if logos.is_empty() {
            if let Some(found) = self.bare.find(text) {
                logos.push(LogoSpec {
                    location: DEFAULT_POSITION.to_string(),
                    logo_type: canonical_type(found.as_str()),
                    size: DEFAULT_SIZE.to_string(),
                    mold_charge: None,
                    total_cost: None,
                });
            }
        }

        logos
    }

    /// Build a spec from a `[Position]: [Description]` payload.
    fn from_description(&self, position: &str, payload: &str) -> Option<LogoSpec> {
        // Payloads carrying pricing text describe a cost line, not a logo.
        if payload.contains('$') {
            return None;
        }

        let logo_type = self
            .type_word
            .find(payload)
            .map_or_else(|| title_case(payload.trim()), |m| canonical_type(m.as_str()));

        if logo_type.is_empty() {
            return None;
        }

        let size = self
            .size_word
            .find(payload)
            .map_or_else(|| DEFAULT_SIZE.to_string(), |m| title_case(m.as_str()));

        Some(LogoSpec {
            location: normalize_position(position),
            logo_type,
            size,
            mold_charge: None,
            total_cost: None,
        })
    }
}

/// Collapse whitespace and normalize a position name.
fn normalize_position(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.to_lowercase().as_str() {
        "upper bill" => "Upper Bill".to_string(),
        "under bill" => "Under Bill".to_string(),
        other => title_case(other),
    }
}

/// Canonical spelling for a logo type.
fn canonical_type(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.eq_ignore_ascii_case("3d embroidery") {
        "3D Embroidery".to_string()
    } else {
        title_case(&collapsed)
    }
}

/// Suppress duplicate `(position, type)` pairs.
fn push_unique(logos: &mut Vec<LogoSpec>, candidate: LogoSpec) {
    let duplicate = logos.iter().any(|existing| {
        existing.location.eq_ignore_ascii_case(&candidate.location)
            && existing.logo_type.eq_ignore_ascii_case(&candidate.logo_type)
    });

    if !duplicate {
        logos.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn size_type_position_phrase_parses() -> TestResult {
        let extractor = LogoExtractor::new()?;

        let logos = extractor.extract("We'll add a Large 3D Embroidery on the Front.");

        assert_eq!(logos.len(), 1);
        let logo = logos.first().ok_or("missing logo")?;
        assert_eq!(logo.location, "Front");
        assert_eq!(logo.logo_type, "3D Embroidery");
        assert_eq!(logo.size, "Large");

        Ok(())
    }

    #[test]
    fn type_at_position_phrase_parses() -> TestResult {
        let extractor = LogoExtractor::new()?;

        let logos = extractor.extract("leather patch at back");

        assert_eq!(logos.len(), 1);
        let logo = logos.first().ok_or("missing logo")?;
        assert_eq!(logo.location, "Back");
        assert_eq!(logo.logo_type, "Leather Patch");
        assert_eq!(logo.size, DEFAULT_SIZE);

        Ok(())
    }

    #[test]
    fn positioned_description_lines_parse() -> TestResult {
        let extractor = LogoExtractor::new()?;

        let logos = extractor.extract("- Front: Large 3D Embroidery\n- Upper Bill: woven patch");

        assert_eq!(logos.len(), 2);
        assert_eq!(
            logos.first().map(|logo| logo.location.clone()).as_deref(),
            Some("Front")
        );
        assert_eq!(
            logos.get(1).map(|logo| logo.location.clone()).as_deref(),
            Some("Upper Bill")
        );
        assert_eq!(
            logos.get(1).map(|logo| logo.logo_type.clone()).as_deref(),
            Some("Woven Patch")
        );

        Ok(())
    }

    #[test]
    fn duplicate_position_type_pairs_are_suppressed() -> TestResult {
        let extractor = LogoExtractor::new()?;

        let logos = extractor.extract(
            "Large 3D Embroidery on Front.\n- Front: Large 3D Embroidery",
        );

        assert_eq!(logos.len(), 1);

        Ok(())
    }

    #[test]
    fn bare_mention_assumes_front() -> TestResult {
        let extractor = LogoExtractor::new()?;

        let logos = extractor.extract("includes 3D Embroidery as discussed");

        assert_eq!(logos.len(), 1);
        let logo = logos.first().ok_or("missing logo")?;
        assert_eq!(logo.location, DEFAULT_POSITION);
        assert_eq!(logo.logo_type, "3D Embroidery");

        Ok(())
    }

    #[test]
    fn pricing_payloads_are_not_logos() -> TestResult {
        let extractor = LogoExtractor::new()?;

        let logos = extractor.extract("- Front: $120.00 subtotal");

        assert!(logos.is_empty());

        Ok(())
    }

    #[test]
    fn no_mention_extracts_nothing() -> TestResult {
        let extractor = LogoExtractor::new()?;

        assert!(extractor.extract("plain caps, no branding").is_empty());

        Ok(())
    }
}
