//! Outfit recommendation module
//!
//! Instant pairings and weekly plans built from a user's wardrobe with the
//! fixed-palette color temperature model.

pub mod engine;
pub mod garment;

pub use engine::OutfitRecommender;
pub use garment::{
    DailyOutfit, Garment, InstantMatch, MatchedItem, OutfitItem, PrimaryItem, WeeklyPlan,
    WeeklyPlanResponse,
};
