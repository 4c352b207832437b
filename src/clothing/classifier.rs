//! Rule table mapping a weather snapshot to a clothing recommendation
//!
//! Rules are evaluated top to bottom and the first matching guard wins. The
//! broader rules further down rely on the narrower ones above having already
//! been excluded, so the order of [`RULES`] is part of the behavior.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::category::{Advisory, ClothingItem, WeatherCategory};
use crate::models::WeatherSnapshot;

use ClothingItem::*;

/// Apparent temperature this far below the measured one counts as wind chill
const WIND_CHILL_THRESHOLD: f64 = 3.0;

/// Result of classifying one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingRecommendation {
    pub category: WeatherCategory,
    /// Items in display order
    pub items: Vec<ClothingItem>,
    pub advisory: Advisory,
}

struct Rule {
    guard: fn(&WeatherSnapshot) -> bool,
    category: WeatherCategory,
    items: &'static [ClothingItem],
}

fn cool(s: &WeatherSnapshot) -> bool {
    (0.0..10.0).contains(&s.temperature_c)
}

fn mild(s: &WeatherSnapshot) -> bool {
    (10.0..15.0).contains(&s.temperature_c)
}

fn warm(s: &WeatherSnapshot) -> bool {
    (15.0..20.0).contains(&s.temperature_c)
}

static RULES: [Rule; 18] = [
    Rule {
        guard: |s| s.temperature_c < -10.0 && s.snowfall_cm > 0.0,
        category: WeatherCategory::ExtremeColdWithSnow,
        items: &[WinterJacket, Hat, Scarf, Gloves, WinterBoots, ThermalUnderwear],
    },
    Rule {
        guard: |s| s.temperature_c < -10.0,
        category: WeatherCategory::ExtremeCold,
        items: &[WinterJacket, Hat, Scarf, Gloves, WarmShoes],
    },
    Rule {
        guard: |s| s.temperature_c < 0.0 && s.snowfall_cm > 2.0,
        category: WeatherCategory::ColdWithHeavySnow,
        items: &[WinterJacket, Hat, Gloves, WinterBoots, Scarf],
    },
    Rule {
        guard: |s| s.temperature_c < 0.0 && s.snowfall_cm > 0.0,
        category: WeatherCategory::ColdWithSnow,
        items: &[WinterJacket, Hat, Gloves, WarmShoes],
    },
    Rule {
        guard: |s| s.temperature_c < 0.0,
        category: WeatherCategory::Cold,
        items: &[WinterJacket, Hat, Scarf, WarmShoes],
    },
    Rule {
        guard: |s| cool(s) && s.rain_mm > 5.0,
        category: WeatherCategory::CoolWithHeavyRain,
        items: &[RainJacket, Umbrella, WaterproofShoes, Sweater],
    },
    Rule {
        guard: |s| cool(s) && s.rain_mm > 0.0,
        category: WeatherCategory::CoolWithRain,
        items: &[Jacket, Umbrella, Sweater],
    },
    Rule {
        guard: |s| cool(s) && s.wind_speed_kmh > 30.0,
        category: WeatherCategory::CoolAndWindy,
        items: &[Windbreaker, Sweater, Scarf],
    },
    // Fog or noticeable wind chill: same category, warmer head and feet.
    Rule {
        guard: |s| cool(s) && (s.is_foggy() || s.wind_chill() >= WIND_CHILL_THRESHOLD),
        category: WeatherCategory::Cool,
        items: &[Jacket, Sweater, LongPants, Hat, WarmShoes],
    },
    Rule {
        guard: cool,
        category: WeatherCategory::Cool,
        items: &[Jacket, Sweater, LongPants],
    },
    Rule {
        guard: |s| mild(s) && s.rain_mm > 0.0,
        category: WeatherCategory::MildWithRain,
        items: &[LightJacket, Umbrella],
    },
    Rule {
        guard: mild,
        category: WeatherCategory::Mild,
        items: &[LightJacket, LongSleeveShirt],
    },
    Rule {
        guard: |s| warm(s) && s.rain_mm > 0.0,
        category: WeatherCategory::WarmWithRain,
        items: &[RainJacket, Umbrella, TShirt],
    },
    Rule {
        guard: warm,
        category: WeatherCategory::Warm,
        items: &[LongSleeveShirt, TShirt],
    },
    // Checked before VeryHot: a 32 °C thunderstorm is a thunderstorm.
    Rule {
        guard: |s| s.temperature_c >= 25.0 && (95..=99).contains(&s.weather_code),
        category: WeatherCategory::HotWithThunderstorm,
        items: &[TShirt, Shorts, WaterproofShoes],
    },
    Rule {
        guard: |s| s.temperature_c >= 25.0 && s.rain_mm > 0.0,
        category: WeatherCategory::HotWithRain,
        items: &[TShirt, Shorts, Umbrella],
    },
    Rule {
        guard: |s| s.temperature_c >= 30.0,
        category: WeatherCategory::VeryHot,
        items: &[TShirt, Shorts, SunHat, Sunglasses],
    },
    Rule {
        guard: |s| (20.0..30.0).contains(&s.temperature_c),
        category: WeatherCategory::Hot,
        items: &[TShirt, Shorts, SunHat, Sandals],
    },
];

const FALLBACK_ITEMS: &[ClothingItem] = &[NormalClothing];

/// Classify a snapshot. Total: inputs matching no rule (NaN temperature) yield `Normal`.
#[must_use]
pub fn classify(snapshot: &WeatherSnapshot) -> ClothingRecommendation {
    let (category, items) = RULES
        .iter()
        .find(|rule| (rule.guard)(snapshot))
        .map_or((WeatherCategory::Normal, FALLBACK_ITEMS), |rule| {
            (rule.category, rule.items)
        });

    trace!(?category, temperature = snapshot.temperature_c, "Classified snapshot");

    ClothingRecommendation {
        category,
        items: items.to_vec(),
        advisory: category.advisory(),
    }
}
