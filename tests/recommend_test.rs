//! Integration tests for outfit recommendations
//!
//! Wardrobes are fed in as the JSON the client sends, and results are
//! checked in their serialized form.

use chrono::{NaiveDate, NaiveDateTime};
use garment_scan::{ColorTemperatureModel, Garment, OutfitRecommender, Temperature};
use serde_json::json;

fn wardrobe(value: serde_json::Value) -> Vec<Garment> {
    serde_json::from_value(value).unwrap()
}

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10)
        .and_then(|d| d.and_hms_opt(8, 30, 0))
        .unwrap()
}

// ============================================================================
// Color Temperature
// ============================================================================

#[test]
fn test_white_classifies_by_formula() {
    // warm 255 + 255 = 510, cool 255: the gap is far outside the neutral band
    let model = ColorTemperatureModel::new();
    assert_eq!(model.classify("#ffffff").unwrap(), Temperature::Warm);
    assert_eq!(
        model.complementary("#ffffff").unwrap(),
        vec!["#0066CC", "#0099FF", "#00CCFF"]
    );
}

// ============================================================================
// Instant Match
// ============================================================================

#[test]
fn test_instant_match_is_exact_string() {
    let garments = wardrobe(json!([
        {"id": "exact", "color_hex": "#FF6B35", "garment_type": "top"},
        {"id": "near", "color_hex": "#FE6B35", "garment_type": "top"},
        {"id": "lower", "color_hex": "#ff6b35", "garment_type": "top"}
    ]));

    let result = OutfitRecommender::new()
        .instant_match("#0066CC", "medium", &garments)
        .unwrap();
    let ids: Vec<_> = result.matched_items.iter().map(|m| m.garment_id.as_str()).collect();
    assert_eq!(ids, vec!["exact"]);
}

#[test]
fn test_instant_match_json_shape() {
    let garments = wardrobe(json!([
        {"id": "g1", "color_hex": "#0099FF", "garment_type": "jeans"}
    ]));
    let result = OutfitRecommender::new()
        .instant_match("#FF8C3A", "light", &garments)
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "primary_item": {"color": "#FF8C3A", "temperature": "warm"},
            "complementary_colors": ["#0066CC", "#0099FF", "#00CCFF"],
            "matched_items": [
                {"garment_id": "g1", "color_hex": "#0099FF", "type": "jeans", "match_score": 0.85}
            ],
            "suggested_mood": "Stylish & Coordinated"
        })
    );
}

// ============================================================================
// Weekly Plan
// ============================================================================

#[test]
fn test_weekly_plan_with_two_garments_is_error() {
    let garments = wardrobe(json!([
        {"id": "a", "color_hex": "#FF6B35"},
        {"id": "b", "color_hex": "#0066CC"}
    ]));
    let response = OutfitRecommender::new()
        .weekly_plan_at(&garments, "deep", generated_at())
        .unwrap();

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"error": "Not enough garments for weekly plan"})
    );
}

#[test]
fn test_weekly_plan_with_three_garments_rotates() {
    let garments = wardrobe(json!([
        {"id": "a", "color_hex": "#FF6B35", "garment_type": "top"},
        {"id": "b", "color_hex": "#0066CC", "garment_type": "bottom"},
        {"id": "c", "color_hex": "#A9A9A9", "garment_type": "shoes"}
    ]));
    let response = OutfitRecommender::new()
        .weekly_plan_at(&garments, "deep", generated_at())
        .unwrap();
    let plan = response.plan().unwrap();

    assert_eq!(plan.outfits.len(), 7);
    for (i, outfit) in plan.outfits.iter().enumerate() {
        assert_eq!(outfit.primary.id, garments[i % 3].id);
    }

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["week_of"], "2024-03-11");
    assert_eq!(json["generated_at"], "2024-03-10T08:30:00");
    assert_eq!(json["outfits"][3]["day"], "Thursday");
    assert_eq!(json["outfits"][3]["primary"]["type"], "top");
    assert_eq!(json["outfits"][0]["complements"], json!([
        {"id": "b", "type": "bottom", "color": "#0066CC"}
    ]));
    // #A9A9A9: 169 + 169 vs 169 is warm by the R+G rule
    assert_eq!(json["outfits"][2]["styling_note"], "Harmonious warm palette");
}

#[test]
fn test_weekly_plan_ignores_skin_tone() {
    let garments = wardrobe(json!([
        {"id": "a", "color_hex": "#FF6B35"},
        {"id": "b", "color_hex": "#0066CC"},
        {"id": "c", "color_hex": "#000000"}
    ]));
    let recommender = OutfitRecommender::new();
    let light = recommender.weekly_plan_at(&garments, "light", generated_at()).unwrap();
    let deep = recommender.weekly_plan_at(&garments, "very deep", generated_at()).unwrap();
    assert_eq!(light, deep);
}

#[test]
fn test_weekly_plan_week_starts_tomorrow() {
    let garments = wardrobe(json!([
        {"id": "a", "color_hex": "#FF6B35"},
        {"id": "b", "color_hex": "#0066CC"},
        {"id": "c", "color_hex": "#000000"}
    ]));
    let before = chrono::Local::now().date_naive();
    let response = OutfitRecommender::new().weekly_plan(&garments, "").unwrap();
    let after = chrono::Local::now().date_naive();

    let week_of = response.plan().unwrap().week_of;
    assert!(week_of == before.succ_opt().unwrap() || week_of == after.succ_opt().unwrap());
}
