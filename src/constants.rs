//! Calibration constants and reference tables for garment scanning
//!
//! Compile-time defaults for every stage of the scan pipeline and for the
//! color-temperature model. [`crate::PipelineConfig::default`] is built from
//! these values.

/// Reference coins used for scale calibration
///
/// Indonesian rupiah coins; diameters in millimeters.
pub mod coins {
    /// Rp 500 coin diameter
    pub const RP_500_MM: f64 = 27.0;

    /// Rp 1000 coin diameter
    pub const RP_1000_MM: f64 = 26.0;

    /// Rp 5000 coin diameter
    pub const RP_5000_MM: f64 = 33.0;

    /// Diameter assumed for "generic" and unrecognized denominations
    pub const GENERIC_MM: f64 = 27.0;

    /// Tag for the generic fallback denomination
    pub const GENERIC_TAG: &str = "generic";

    /// Coin pixel diameter assumed when the caller does not provide one
    pub const DEFAULT_DIAMETER_PX: f64 = 100.0;
}

/// Physical scale conversion
pub mod scale {
    /// Pixels per millimeter substituted when no scale was established
    pub const DEFAULT_SCALE_RATIO: f64 = 3.0;

    /// Millimeters per centimeter
    pub const MM_PER_CM: f64 = 10.0;

    /// Decimal digits kept in reported measurements
    pub const MEASUREMENT_DECIMALS: i32 = 2;
}

/// White balance correction
pub mod white_balance {
    /// Intensity the reference patch is mapped to
    pub const TARGET_WHITE: f64 = 255.0;

    /// Added to the sampled mean so a black patch does not divide by zero
    pub const EPSILON: f64 = 1e-5;

    /// Sampling radius used when the caller omits one
    pub const DEFAULT_RADIUS: f64 = 30.0;
}

/// Foreground mask thresholds
pub mod mask {
    /// Alpha strictly above this value is foreground
    pub const ALPHA_THRESHOLD: u8 = 128;

    /// Grayscale strictly above this value is foreground (alpha-less images)
    pub const GRAY_THRESHOLD: u8 = 128;

    /// Mask value marking a foreground pixel
    pub const FOREGROUND: u8 = 255;
}

/// Dominant color clustering
pub mod clustering {
    /// Number of clusters; the single centroid is the dominant color
    pub const CLUSTER_COUNT: i32 = 1;

    /// Termination: maximum iterations
    pub const MAX_ITERATIONS: i32 = 10;

    /// Termination: centroid movement below this stops iteration
    pub const EPSILON: f64 = 1.0;

    /// Random-seed attempts; the most compact result wins
    pub const ATTEMPTS: i32 = 10;

    /// Returned when no foreground pixel remains
    pub const FALLBACK_COLOR: &str = "#808080";
}

/// Output encoding
pub mod encoding {
    /// Default lossy quality
    pub const DEFAULT_QUALITY: i32 = 75;

    /// Lowest accepted quality
    pub const MIN_QUALITY: i32 = 0;

    /// Highest accepted quality
    pub const MAX_QUALITY: i32 = 100;

    /// Format tag reported in scan metadata
    pub const FILE_FORMAT: &str = "webp";

    /// Extension handed to the OpenCV encoder
    pub const FILE_EXTENSION: &str = ".webp";
}

/// Fixed color-temperature palettes
pub mod palettes {
    /// Warm palette
    pub const WARM: [&str; 5] = ["#FF6B35", "#FF8C3A", "#FFA500", "#FFD700", "#FF4500"];

    /// Cool palette
    pub const COOL: [&str; 5] = ["#0066CC", "#0099FF", "#00CCFF", "#6600FF", "#9933FF"];

    /// Neutral palette
    pub const NEUTRAL: [&str; 5] = ["#808080", "#A9A9A9", "#FFFFFF", "#000000", "#D3D3D3"];

    /// Number of palette entries offered as complements
    pub const COMPLEMENT_COUNT: usize = 3;

    /// |(R+G) - B| below this is neutral
    pub const NEUTRAL_BAND: i32 = 30;
}

/// Outfit recommendation
pub mod recommend {
    /// Fixed score attached to every palette match
    pub const MATCH_SCORE: f64 = 0.85;

    /// Maximum matches returned by an instant match
    pub const MAX_INSTANT_MATCHES: usize = 5;

    /// Maximum complements per day in a weekly plan
    pub const MAX_DAILY_COMPLEMENTS: usize = 2;

    /// Garments required before a weekly plan can be built
    pub const MIN_WEEKLY_GARMENTS: usize = 3;

    /// Day labels of a weekly plan, in order
    pub const WEEK_DAYS: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    /// Mood attached to every instant match
    pub const SUGGESTED_MOOD: &str = "Stylish & Coordinated";

    /// Color assumed for a garment without one
    pub const DEFAULT_GARMENT_COLOR: &str = "#808080";

    /// Error text for a wardrobe too small to plan a week
    pub const NOT_ENOUGH_GARMENTS: &str = "Not enough garments for weekly plan";
}

/// Skin tone classification
pub mod skin_tone {
    /// Luminance above this is "Light"
    pub const LIGHT_LUMINANCE: f64 = 180.0;

    /// Luminance above this is "Medium"
    pub const MEDIUM_LUMINANCE: f64 = 130.0;

    /// Luminance above this is "Deep"; anything lower is "Very Deep"
    pub const DEEP_LUMINANCE: f64 = 80.0;

    /// Warm colors recommended for every skin tone
    pub const WARM_RECOMMENDATIONS: [&str; 3] = ["#FF6B35", "#FFD700", "#FF8C3A"];

    /// Cool colors recommended for every skin tone
    pub const COOL_RECOMMENDATIONS: [&str; 3] = ["#0099FF", "#6600FF", "#0066CC"];
}
