//! Wardrobe input and recommendation result records

use crate::color::Temperature;
use crate::constants::recommend;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A garment from the user's wardrobe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Garment {
    #[serde(default)]
    pub id: String,
    /// Stored color as `#rrggbb`, compared verbatim
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub garment_type: Option<String>,
}

impl Garment {
    pub fn new(id: impl Into<String>, color_hex: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color_hex: Some(color_hex.into()),
            garment_type: None,
        }
    }

    /// Set the garment type
    pub fn with_type(mut self, garment_type: impl Into<String>) -> Self {
        self.garment_type = Some(garment_type.into());
        self
    }

    /// Stored color, or neutral gray when the garment has none
    pub fn color_or_default(&self) -> &str {
        self.color_hex
            .as_deref()
            .unwrap_or(recommend::DEFAULT_GARMENT_COLOR)
    }
}

/// The item being styled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryItem {
    pub color: String,
    pub temperature: Temperature,
}

/// A wardrobe garment that fits the complementary palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedItem {
    pub garment_id: String,
    pub color_hex: String,
    #[serde(rename = "type")]
    pub garment_type: Option<String>,
    pub match_score: f64,
}

/// Result of an instant match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantMatch {
    pub primary_item: PrimaryItem,
    pub complementary_colors: Vec<String>,
    pub matched_items: Vec<MatchedItem>,
    pub suggested_mood: String,
}

/// A garment as it appears in a weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub id: String,
    #[serde(rename = "type")]
    pub garment_type: Option<String>,
    pub color: String,
}

/// One day of a weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOutfit {
    pub day: String,
    pub primary: OutfitItem,
    pub complements: Vec<OutfitItem>,
    pub styling_note: String,
}

/// Seven outfits starting the day after generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub week_of: NaiveDate,
    pub outfits: Vec<DailyOutfit>,
    pub generated_at: NaiveDateTime,
}

/// A weekly plan, or the reason none could be built
///
/// Serializes either as the plan itself or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeeklyPlanResponse {
    Plan(WeeklyPlan),
    Error { error: String },
}

impl WeeklyPlanResponse {
    /// The plan, if one was built
    pub fn plan(&self) -> Option<&WeeklyPlan> {
        match self {
            WeeklyPlanResponse::Plan(plan) => Some(plan),
            WeeklyPlanResponse::Error { .. } => None,
        }
    }

    /// The error message, if no plan was built
    pub fn error(&self) -> Option<&str> {
        match self {
            WeeklyPlanResponse::Plan(_) => None,
            WeeklyPlanResponse::Error { error } => Some(error),
        }
    }
}
