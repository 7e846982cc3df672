//! Outfit recommendation engine
//!
//! Pairs garments by exact membership in the complementary palette of
//! [`ColorTemperatureModel`]. There is no color-distance tolerance: a
//! garment stored as `#FE6B35` never matches a palette entry `#FF6B35`.
//!
//! The `skin_tone` argument is accepted for interface compatibility and does
//! not influence matching.

use crate::color::ColorTemperatureModel;
use crate::constants::recommend;
use crate::error::Result;
use crate::recommend::garment::{
    DailyOutfit, Garment, InstantMatch, MatchedItem, OutfitItem, PrimaryItem, WeeklyPlan,
    WeeklyPlanResponse,
};
use chrono::{Days, Local, NaiveDateTime};

/// Rule-based outfit recommender
#[derive(Debug, Clone, Default)]
pub struct OutfitRecommender {
    model: ColorTemperatureModel,
}

impl OutfitRecommender {
    /// Recommender over the built-in palettes
    pub fn new() -> Self {
        Self::default()
    }

    /// Recommender over a custom temperature model
    pub fn with_model(model: ColorTemperatureModel) -> Self {
        Self { model }
    }

    /// Suggest wardrobe garments to wear with an item of `item_color`
    ///
    /// A garment without a stored color counts as `#808080`. At most five
    /// matches are returned, in wardrobe order.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidColor` if `item_color` is not a hex color.
    pub fn instant_match(
        &self,
        item_color: &str,
        skin_tone: &str,
        garments: &[Garment],
    ) -> Result<InstantMatch> {
        let temperature = self.model.classify(item_color)?;
        let palette = self.model.palette_for(temperature);
        tracing::debug!(item_color, %temperature, skin_tone, "instant match");

        let matched_items: Vec<MatchedItem> = garments
            .iter()
            .filter(|g| palette.contains(&g.color_or_default()))
            .take(recommend::MAX_INSTANT_MATCHES)
            .map(|g| MatchedItem {
                garment_id: g.id.clone(),
                color_hex: g.color_or_default().to_string(),
                garment_type: g.garment_type.clone(),
                match_score: recommend::MATCH_SCORE,
            })
            .collect();

        Ok(InstantMatch {
            primary_item: PrimaryItem {
                color: item_color.to_string(),
                temperature,
            },
            complementary_colors: palette.iter().map(|c| c.to_string()).collect(),
            matched_items,
            suggested_mood: recommend::SUGGESTED_MOOD.to_string(),
        })
    }

    /// Build a seven-day plan starting tomorrow, local time
    pub fn weekly_plan(&self, garments: &[Garment], skin_tone: &str) -> Result<WeeklyPlanResponse> {
        self.weekly_plan_at(garments, skin_tone, Local::now().naive_local())
    }

    /// Build a seven-day plan as if generated at `now`
    ///
    /// Day `i` wears `garments[i % len]`; its complements are the first two
    /// wardrobe garments whose stored color is in the primary's
    /// complementary palette. Fewer than three garments yields an error
    /// response rather than an `Err`.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidColor` if a primary garment's color is not
    /// a hex color.
    pub fn weekly_plan_at(
        &self,
        garments: &[Garment],
        skin_tone: &str,
        now: NaiveDateTime,
    ) -> Result<WeeklyPlanResponse> {
        if garments.len() < recommend::MIN_WEEKLY_GARMENTS {
            tracing::debug!(garments = garments.len(), "wardrobe too small for weekly plan");
            return Ok(WeeklyPlanResponse::Error {
                error: recommend::NOT_ENOUGH_GARMENTS.to_string(),
            });
        }
        tracing::debug!(garments = garments.len(), skin_tone, "weekly plan");

        let outfits = recommend::WEEK_DAYS
            .iter()
            .zip(garments.iter().cycle())
            .map(|(day, primary)| self.daily_outfit(day, primary, garments))
            .collect::<Result<Vec<_>>>()?;

        let week_of = now.checked_add_days(Days::new(1)).unwrap_or(now).date();
        Ok(WeeklyPlanResponse::Plan(WeeklyPlan {
            week_of,
            outfits,
            generated_at: now,
        }))
    }

    fn daily_outfit(&self, day: &str, primary: &Garment, wardrobe: &[Garment]) -> Result<DailyOutfit> {
        let color = primary.color_or_default();
        let temperature = self.model.classify(color)?;
        let palette = self.model.palette_for(temperature);

        let complements = wardrobe
            .iter()
            .filter_map(|g| {
                let stored = g.color_hex.as_deref()?;
                palette.contains(&stored).then(|| OutfitItem {
                    id: g.id.clone(),
                    garment_type: g.garment_type.clone(),
                    color: stored.to_string(),
                })
            })
            .take(recommend::MAX_DAILY_COMPLEMENTS)
            .collect();

        Ok(DailyOutfit {
            day: day.to_string(),
            primary: OutfitItem {
                id: primary.id.clone(),
                garment_type: primary.garment_type.clone(),
                color: color.to_string(),
            },
            complements,
            styling_note: format!("Harmonious {} palette", temperature),
        })
    }
}
