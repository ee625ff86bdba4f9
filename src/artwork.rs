//! Artwork Analysis
//!
//! Post-processing for the vision model's structured artwork output. The
//! model call itself lives outside this crate; what arrives here is its
//! JSON: cap colors, a bill shape, per-position logo assets, per-category
//! accessories, and a confidence score. Post-processing validates every
//! color against the supported vocabulary (logging, never rejecting),
//! normalizes bill-shape synonyms into exactly one of
//! `Flat`/`Slight Curved`/`Curved`, and derives a processing status from
//! the confidence score combined with how many distinct elements were
//! detected. Zero detected elements is an error no matter what
//! confidence the model reports.

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Confidence at or above which a multi-element analysis is a success.
const SUCCESS_CONFIDENCE: f32 = 0.8;

/// Confidence at or above which even a single element is a success.
const HIGH_CONFIDENCE: f32 = 0.9;

/// Colors the storefront can actually produce caps in.
pub const SUPPORTED_COLORS: [&str; 24] = [
    "Black", "White", "Navy", "Royal", "Red", "Green", "Forest Green", "Blue", "Light Blue",
    "Orange", "Yellow", "Purple", "Pink", "Brown", "Khaki", "Charcoal", "Maroon", "Gold", "Olive",
    "Grey", "Cream", "Beige", "Teal", "Burgundy",
];

static SUPPORTED_COLOR_SET: Lazy<FxHashSet<String>> = Lazy::new(|| {
    SUPPORTED_COLORS
        .iter()
        .map(|color| color.to_lowercase())
        .collect()
});

/// The three bill shapes the pricing tables distinguish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillShape {
    /// Flat bill.
    Flat,

    /// Slightly pre-curved bill.
    #[serde(rename = "Slight Curved")]
    SlightCurved,

    /// Fully curved bill.
    #[default]
    Curved,
}

impl BillShape {
    /// Normalize a model-reported bill-shape string into one shape.
    ///
    /// Synonyms collapse ("flat brim" → `Flat`, "semi-curved" →
    /// `SlightCurved`); anything unrecognized defaults to `Curved`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();

        if lowered.contains("slight") || lowered.contains("semi") {
            return BillShape::SlightCurved;
        }

        if lowered.contains("flat") {
            return BillShape::Flat;
        }

        BillShape::Curved
    }
}

impl fmt::Display for BillShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillShape::Flat => write!(f, "Flat"),
            BillShape::SlightCurved => write!(f, "Slight Curved"),
            BillShape::Curved => write!(f, "Curved"),
        }
    }
}

/// Outcome classification of one artwork analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    /// Enough elements detected at sufficient confidence.
    Success,

    /// Something detected, but confidence or coverage is thin.
    Partial,

    /// Nothing usable detected.
    Error,
}

impl ProcessingStatus {
    /// Derive the status from confidence and detected element count.
    #[must_use]
    pub fn derive(confidence: f32, element_count: usize) -> Self {
        if element_count == 0 {
            return ProcessingStatus::Error;
        }

        if (confidence >= SUCCESS_CONFIDENCE && element_count >= 2)
            || confidence >= HIGH_CONFIDENCE
        {
            return ProcessingStatus::Success;
        }

        ProcessingStatus::Partial
    }
}

/// One logo element the model detected on the artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoAsset {
    /// Cap position the asset sits at.
    pub position: String,

    /// Application type the model suggests ("3D Embroidery", …).
    #[serde(rename = "type")]
    pub asset_type: String,

    /// Suggested size, when reported.
    #[serde(default)]
    pub size: Option<String>,

    /// Free-text description of the artwork element.
    #[serde(default)]
    pub description: Option<String>,
}

/// One accessory element the model detected (labels, tags).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryAsset {
    /// Accessory category ("label", "tag").
    pub category: String,

    /// Detected accessory name.
    pub name: String,
}

/// The raw analysis as reported by the vision model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkAnalysis {
    /// Detected cap colors.
    #[serde(default)]
    pub cap_colors: Vec<String>,

    /// Reported bill shape, in the model's own words.
    #[serde(default)]
    pub bill_shape: String,

    /// Detected logo elements.
    #[serde(default)]
    pub assets: Vec<LogoAsset>,

    /// Detected accessory elements.
    #[serde(default)]
    pub accessories: Vec<AccessoryAsset>,

    /// The model's self-reported confidence, 0.0–1.0.
    pub confidence: f32,
}

impl ArtworkAnalysis {
    /// Deserialize the model's raw JSON output.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the payload does not match the
    /// analysis schema.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// A validated, normalized artwork analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedArtwork {
    /// Detected cap colors, unmodified.
    pub cap_colors: Vec<String>,

    /// Colors outside the supported vocabulary (kept, but flagged).
    pub unrecognized_colors: Vec<String>,

    /// The normalized bill shape.
    pub bill_shape: BillShape,

    /// Detected logo elements, unmodified.
    pub assets: Vec<LogoAsset>,

    /// Detected accessory elements, unmodified.
    pub accessories: Vec<AccessoryAsset>,

    /// The model's self-reported confidence, 0.0–1.0.
    pub confidence: f32,

    /// Derived processing status.
    pub status: ProcessingStatus,
}

/// Validate and normalize one artwork analysis.
#[must_use]
pub fn process(analysis: ArtworkAnalysis) -> ProcessedArtwork {
    let unrecognized_colors: Vec<String> = analysis
        .cap_colors
        .iter()
        .filter(|color| !SUPPORTED_COLOR_SET.contains(&color.trim().to_lowercase()))
        .cloned()
        .collect();

    for color in &unrecognized_colors {
        tracing::warn!(%color, "artwork analysis reported an unsupported color");
    }

    let element_count = analysis.assets.len() + analysis.accessories.len();

    ProcessedArtwork {
        unrecognized_colors,
        bill_shape: BillShape::normalize(&analysis.bill_shape),
        status: ProcessingStatus::derive(analysis.confidence, element_count),
        cap_colors: analysis.cap_colors,
        assets: analysis.assets,
        accessories: analysis.accessories,
        confidence: analysis.confidence,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn asset(position: &str) -> LogoAsset {
        LogoAsset {
            position: position.to_string(),
            asset_type: "3D Embroidery".to_string(),
            size: None,
            description: None,
        }
    }

    fn analysis(confidence: f32, assets: Vec<LogoAsset>) -> ArtworkAnalysis {
        ArtworkAnalysis {
            cap_colors: vec!["Navy".to_string()],
            bill_shape: "curved".to_string(),
            assets,
            accessories: Vec::new(),
            confidence,
        }
    }

    #[test]
    fn bill_shape_synonyms_normalize() {
        assert_eq!(BillShape::normalize("flat brim"), BillShape::Flat);
        assert_eq!(BillShape::normalize("Slightly Curved"), BillShape::SlightCurved);
        assert_eq!(BillShape::normalize("semi-curved"), BillShape::SlightCurved);
        assert_eq!(BillShape::normalize("pre-curved"), BillShape::Curved);
        assert_eq!(BillShape::normalize("mystery"), BillShape::Curved);
    }

    #[test]
    fn zero_elements_is_an_error_regardless_of_confidence() {
        assert_eq!(ProcessingStatus::derive(0.99, 0), ProcessingStatus::Error);
        assert_eq!(ProcessingStatus::derive(0.0, 0), ProcessingStatus::Error);
    }

    #[test]
    fn high_confidence_with_elements_is_success() {
        assert_eq!(ProcessingStatus::derive(0.85, 2), ProcessingStatus::Success);
        assert_eq!(ProcessingStatus::derive(0.95, 1), ProcessingStatus::Success);
    }

    #[test]
    fn thin_detections_are_partial() {
        assert_eq!(ProcessingStatus::derive(0.85, 1), ProcessingStatus::Partial);
        assert_eq!(ProcessingStatus::derive(0.4, 3), ProcessingStatus::Partial);
    }

    #[test]
    fn unsupported_colors_are_flagged_not_rejected() {
        let mut input = analysis(0.9, vec![asset("Front")]);
        input.cap_colors = vec!["Navy".to_string(), "Chartreuse".to_string()];

        let processed = process(input);

        assert_eq!(processed.cap_colors.len(), 2, "colors are kept");
        assert_eq!(processed.unrecognized_colors, vec!["Chartreuse".to_string()]);
    }

    #[test]
    fn model_json_deserializes() -> TestResult {
        let raw = r#"{
            "capColors": ["Black", "Red"],
            "billShape": "flat bill",
            "assets": [
                {"position": "Front", "type": "3D Embroidery", "size": "Large"},
                {"position": "Back", "type": "Flat Embroidery"}
            ],
            "accessories": [{"category": "label", "name": "Woven Label"}],
            "confidence": 0.86
        }"#;

        let parsed = ArtworkAnalysis::from_json(raw)?;
        let processed = process(parsed);

        assert_eq!(processed.bill_shape, BillShape::Flat);
        assert_eq!(processed.status, ProcessingStatus::Success);
        assert!(processed.unrecognized_colors.is_empty());

        Ok(())
    }
}
