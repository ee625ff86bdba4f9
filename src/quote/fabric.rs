//! Fabric Extraction
//!
//! Candidates in priority order: a labeled compound fabric, a known
//! compound pair anywhere in the text, a labeled single fabric, then a
//! bare fabric keyword. Captures that bled into pricing text are rejected
//! rather than repaired. Recognized names normalize to their canonical
//! table spellings so downstream lookups match.

use regex::Regex;

use crate::quote::patterns::{clean_capture, title_case};

/// Longest fabric capture accepted from a labeled line.
const MAX_FABRIC_LEN: usize = 40;

/// Default fabric when nothing in the message names one.
const DEFAULT_FABRIC: &str = "Standard Cotton";

#[derive(Debug)]
pub(crate) struct FabricExtractor {
    labeled: Regex,
    compound: Regex,
    keyword: Regex,
}

impl FabricExtractor {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            labeled: Regex::new(r"(?im)\bfabric(?:\s+type)?\s*:\s*([^\n]+?)\s*$")?,
            compound: Regex::new(
                r"(?i)\b(chino twill|cotton twill|duck camo|polyester|acrylic|cotton|suede|corduroy)\s*/\s*(trucker mesh|air ?mesh|laser ?cut|mesh)\b",
            )?,
            keyword: Regex::new(
                r"(?i)\b(trucker mesh|air ?mesh|chino twill|cotton twill|duck camo|laser ?cut|polyester|acrylic|suede|leather|corduroy|denim|canvas)\b",
            )?,
        })
    }

    /// Extract the fabric selection, falling back to the default.
    pub(crate) fn extract(&self, text: &str) -> String {
        let labeled = self
            .labeled
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|capture| clean_capture(capture.as_str(), MAX_FABRIC_LEN))
            .map(|capture| capture.trim_end_matches(['.', ',']).trim());

        // Compound specs take priority over single names.
        if let Some(labeled) = labeled {
            if labeled.contains('/') {
                return normalize_compound(labeled);
            }
        }

        if let Some(caps) = self.compound.captures(text) {
            if let (Some(left), Some(right)) = (caps.get(1), caps.get(2)) {
                return format!(
                    "{}/{}",
                    normalize_single(left.as_str()),
                    normalize_single(right.as_str())
                );
            }
        }

        if let Some(labeled) = labeled {
            return normalize_single(labeled);
        }

        if let Some(found) = self.keyword.find(text) {
            return normalize_single(found.as_str());
        }

        DEFAULT_FABRIC.to_string()
    }
}

/// Normalize a compound spec to canonical joined form.
fn normalize_compound(raw: &str) -> String {
    raw.split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(normalize_single)
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize one fabric name to its canonical table spelling.
fn normalize_single(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.to_lowercase().as_str() {
        "air mesh" | "airmesh" => "Air Mesh".to_string(),
        "laser cut" | "lasercut" => "Laser Cut".to_string(),
        _ => title_case(&collapsed),
    }
}
