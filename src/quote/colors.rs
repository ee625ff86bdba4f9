//! Color Extraction
//!
//! Candidates in priority order: the AI-response bullet list
//! (`• Navy: 144 pieces`), an explicit `Color(s):` label, a capitalized
//! `Word/Word` two-tone pair, then a presence scan over common color
//! names. Two-tone combos stay one joined entry; fabric and texture words
//! masquerading as colors are filtered out, and a common-color hit
//! adjacent to "camo"/"mesh"/"fabric" is ignored (it describes material,
//! not color).

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::quote::patterns::{clean_capture, title_case};

/// Default colors when nothing in the message names one.
const DEFAULT_COLOR: &str = "Black";

/// Longest color capture accepted from a labeled line.
const MAX_COLOR_LEN: usize = 60;

/// Material words that disqualify a candidate color token.
static NON_COLOR_TERMS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "fabric", "mesh", "twill", "cotton", "polyester", "acrylic", "suede", "leather", "camo",
        "trim", "canvas", "denim", "corduroy", "laser", "cut",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug)]
pub(crate) struct ColorExtractor {
    bullet: Regex,
    labeled: Regex,
    pair: Regex,
    common: Regex,
}

impl ColorExtractor {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            bullet: Regex::new(
                r"(?m)^\s*[•*-]\s*([A-Za-z][A-Za-z /]*?)\s*:\s*[0-9][0-9,]*\s*pieces\b",
            )?,
            labeled: Regex::new(r"(?im)\bcolors?\s*:\s*([^\n]+?)\s*$")?,
            pair: Regex::new(r"\b([A-Z][a-z]+)\s*/\s*([A-Z][a-z]+)\b")?,
            common: Regex::new(
                r"(?i)\b(?:(camo|mesh|fabric)\s+)?(black|white|navy|royal|red|green|blue|orange|yellow|purple|pink|brown|khaki|charcoal|maroon|gold|olive|grey|gray)\b(?:\s+(camo|mesh|fabric))?",
            )?,
        })
    }

    /// Extract the color list, falling back to `["Black"]`.
    pub(crate) fn extract(&self, text: &str) -> Vec<String> {
        let bullets = self.from_bullets(text);
        if !bullets.is_empty() {
            return bullets;
        }

        if let Some(labeled) = self.from_label(text) {
            return labeled;
        }

        if let Some(pair) = self.from_pair(text) {
            return vec![pair];
        }

        let common = self.from_common_names(text);
        if !common.is_empty() {
            return common;
        }

        vec![DEFAULT_COLOR.to_string()]
    }

    /// AI responses list per-color piece counts as bullets.
    fn from_bullets(&self, text: &str) -> Vec<String> {
        let mut colors = Vec::new();

        for caps in self.bullet.captures_iter(text) {
            let Some(name) = caps.get(1) else { continue };
            let name = name.as_str().trim();

            if is_color_phrase(name) {
                push_unique(&mut colors, title_case_combo(name));
            }
        }

        colors
    }

    /// An explicit `Color(s): …` label.
    fn from_label(&self, text: &str) -> Option<Vec<String>> {
        let caps = self.labeled.captures(text)?;
        let payload = clean_capture(caps.get(1)?.as_str(), MAX_COLOR_LEN)?;
        let payload = payload.trim_end_matches(['.', ',']).trim();

        // A two-tone combo stays one joined entry.
        if payload.contains('/') {
            return Some(vec![title_case_combo(payload)]);
        }

        if payload.contains(',') || payload.contains('&') {
            let colors: Vec<String> = payload
                .split([',', '&'])
                .map(str::trim)
                .filter(|part| !part.is_empty() && is_color_phrase(part))
                .map(title_case)
                .collect();

            if colors.is_empty() {
                return None;
            }

            return Some(colors);
        }

        if is_color_phrase(payload) {
            return Some(vec![title_case(payload)]);
        }

        None
    }

    /// A capitalized `Word/Word` pair anywhere in the text.
    fn from_pair(&self, text: &str) -> Option<String> {
        for caps in self.pair.captures_iter(text) {
            let (Some(left), Some(right)) = (caps.get(1), caps.get(2)) else {
                continue;
            };

            if is_color_phrase(left.as_str()) && is_color_phrase(right.as_str()) {
                return Some(format!("{}/{}", left.as_str(), right.as_str()));
            }
        }

        None
    }

    /// Presence scan over the common color vocabulary.
    fn from_common_names(&self, text: &str) -> Vec<String> {
        let mut colors = Vec::new();

        for caps in self.common.captures_iter(text) {
            // Adjacent material words mean this is "black mesh", not a color.
            if caps.get(1).is_some() || caps.get(3).is_some() {
                continue;
            }

            if let Some(name) = caps.get(2) {
                push_unique(&mut colors, title_case(name.as_str()));
            }
        }

        colors
    }
}

/// Whether every word of the phrase could plausibly be a color.
fn is_color_phrase(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .all(|word| !NON_COLOR_TERMS.contains(word.to_lowercase().as_str()))
}

/// Title-case each side of a possible `A/B` combo, keeping the join.
fn title_case_combo(raw: &str) -> String {
    raw.split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join("/")
}

fn push_unique(colors: &mut Vec<String>, color: String) {
    if !colors.contains(&color) {
        colors.push(color);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bullet_list_wins_over_everything() -> TestResult {
        let extractor = ColorExtractor::new()?;

        let text = "Color: Red\n• Navy: 144 pieces\n• White: 144 pieces";

        assert_eq!(
            extractor.extract(text),
            vec!["Navy".to_string(), "White".to_string()]
        );

        Ok(())
    }

    #[test]
    fn labeled_two_tone_stays_joined() -> TestResult {
        let extractor = ColorExtractor::new()?;

        assert_eq!(
            extractor.extract("Colors: royal/black"),
            vec!["Royal/Black".to_string()]
        );

        Ok(())
    }

    #[test]
    fn labeled_list_splits_and_filters_materials() -> TestResult {
        let extractor = ColorExtractor::new()?;

        assert_eq!(
            extractor.extract("Colors: Navy, Trucker Mesh & White"),
            vec!["Navy".to_string(), "White".to_string()]
        );

        Ok(())
    }

    #[test]
    fn capitalized_pair_is_recognized() -> TestResult {
        let extractor = ColorExtractor::new()?;

        assert_eq!(
            extractor.extract("a sharp Maroon/Gold combination"),
            vec!["Maroon/Gold".to_string()]
        );

        Ok(())
    }

    #[test]
    fn common_names_are_scanned_last() -> TestResult {
        let extractor = ColorExtractor::new()?;

        assert_eq!(
            extractor.extract("something in navy with white accents"),
            vec!["Navy".to_string(), "White".to_string()]
        );

        Ok(())
    }

    #[test]
    fn material_adjacent_hits_are_ignored() -> TestResult {
        let extractor = ColorExtractor::new()?;

        assert_eq!(
            extractor.extract("black mesh panels on a duck camo crown"),
            vec![DEFAULT_COLOR.to_string()]
        );

        Ok(())
    }

    #[test]
    fn falls_back_to_black() -> TestResult {
        let extractor = ColorExtractor::new()?;

        assert_eq!(
            extractor.extract("no colors mentioned here"),
            vec![DEFAULT_COLOR.to_string()]
        );

        Ok(())
    }
}
