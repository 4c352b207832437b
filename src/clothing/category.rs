//! Closed vocabularies of the clothing recommendation

use serde::{Deserialize, Serialize};

/// Weather condition category a snapshot is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCategory {
    ExtremeColdWithSnow,
    ExtremeCold,
    ColdWithHeavySnow,
    ColdWithSnow,
    Cold,
    CoolWithHeavyRain,
    CoolWithRain,
    CoolAndWindy,
    Cool,
    MildWithRain,
    Mild,
    WarmWithRain,
    Warm,
    HotWithThunderstorm,
    HotWithRain,
    VeryHot,
    Hot,
    Normal,
}

impl WeatherCategory {
    pub const ALL: [WeatherCategory; 18] = [
        Self::ExtremeColdWithSnow,
        Self::ExtremeCold,
        Self::ColdWithHeavySnow,
        Self::ColdWithSnow,
        Self::Cold,
        Self::CoolWithHeavyRain,
        Self::CoolWithRain,
        Self::CoolAndWindy,
        Self::Cool,
        Self::MildWithRain,
        Self::Mild,
        Self::WarmWithRain,
        Self::Warm,
        Self::HotWithThunderstorm,
        Self::HotWithRain,
        Self::VeryHot,
        Self::Hot,
        Self::Normal,
    ];

    /// Symbolic name, used as localization key and fallback text
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::ExtremeColdWithSnow => "ExtremeColdWithSnow",
            Self::ExtremeCold => "ExtremeCold",
            Self::ColdWithHeavySnow => "ColdWithHeavySnow",
            Self::ColdWithSnow => "ColdWithSnow",
            Self::Cold => "Cold",
            Self::CoolWithHeavyRain => "CoolWithHeavyRain",
            Self::CoolWithRain => "CoolWithRain",
            Self::CoolAndWindy => "CoolAndWindy",
            Self::Cool => "Cool",
            Self::MildWithRain => "MildWithRain",
            Self::Mild => "Mild",
            Self::WarmWithRain => "WarmWithRain",
            Self::Warm => "Warm",
            Self::HotWithThunderstorm => "HotWithThunderstorm",
            Self::HotWithRain => "HotWithRain",
            Self::VeryHot => "VeryHot",
            Self::Hot => "Hot",
            Self::Normal => "Normal",
        }
    }

    /// Reverse of [`WeatherCategory::key`]
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }

    /// Advisory shown with this category, one per category
    #[must_use]
    pub fn advisory(self) -> Advisory {
        match self {
            Self::ExtremeColdWithSnow => Advisory::ExtremeColdStayInside,
            Self::ExtremeCold => Advisory::ExtremeColdLayerUp,
            Self::ColdWithHeavySnow => Advisory::SnowWaterproofImportant,
            Self::ColdWithSnow => Advisory::SnowDontForgetGloves,
            Self::Cold => Advisory::ColdWarmJacketNeeded,
            Self::CoolWithHeavyRain => Advisory::HeavyRainWaterproofImportant,
            Self::CoolWithRain => Advisory::RainTakeUmbrella,
            Self::CoolAndWindy => Advisory::WindyWindbreakerProtects,
            Self::Cool => Advisory::CoolButPleasantJacketEnough,
            Self::MildWithRain => Advisory::RainButMildLightJacketEnough,
            Self::Mild => Advisory::PleasantTemperatureLightJacketPerfect,
            Self::WarmWithRain => Advisory::WarmButWetUmbrellaEnough,
            Self::Warm => Advisory::NiceWeatherLightClothingIdeal,
            Self::HotWithThunderstorm => Advisory::ThunderstormStayInside,
            Self::HotWithRain => Advisory::WarmRainLightQuickDry,
            Self::VeryHot => Advisory::VeryHotStayInShadeAndDrink,
            Self::Hot => Advisory::WarmAndSunnySunProtection,
            Self::Normal => Advisory::WeatherIsPleasant,
        }
    }
}

/// Fixed vocabulary of recommended garments and accessories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClothingItem {
    // Winter clothing
    WinterJacket,
    Hat,
    Scarf,
    Gloves,
    WinterBoots,
    ThermalUnderwear,

    // Rain gear
    RainJacket,
    Umbrella,
    WaterproofShoes,

    // Mid-season clothing
    Jacket,
    LightJacket,
    Sweater,
    LongSleeveShirt,
    LongPants,

    // Wind protection
    Windbreaker,

    // Summer clothing
    TShirt,
    Shorts,
    SunHat,
    Sunglasses,
    Sandals,

    // General
    WarmShoes,
    Sneakers,
    NormalClothing,
}

impl ClothingItem {
    pub const ALL: [ClothingItem; 23] = [
        Self::WinterJacket,
        Self::Hat,
        Self::Scarf,
        Self::Gloves,
        Self::WinterBoots,
        Self::ThermalUnderwear,
        Self::RainJacket,
        Self::Umbrella,
        Self::WaterproofShoes,
        Self::Jacket,
        Self::LightJacket,
        Self::Sweater,
        Self::LongSleeveShirt,
        Self::LongPants,
        Self::Windbreaker,
        Self::TShirt,
        Self::Shorts,
        Self::SunHat,
        Self::Sunglasses,
        Self::Sandals,
        Self::WarmShoes,
        Self::Sneakers,
        Self::NormalClothing,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::WinterJacket => "WinterJacket",
            Self::Hat => "Hat",
            Self::Scarf => "Scarf",
            Self::Gloves => "Gloves",
            Self::WinterBoots => "WinterBoots",
            Self::ThermalUnderwear => "ThermalUnderwear",
            Self::RainJacket => "RainJacket",
            Self::Umbrella => "Umbrella",
            Self::WaterproofShoes => "WaterproofShoes",
            Self::Jacket => "Jacket",
            Self::LightJacket => "LightJacket",
            Self::Sweater => "Sweater",
            Self::LongSleeveShirt => "LongSleeveShirt",
            Self::LongPants => "LongPants",
            Self::Windbreaker => "Windbreaker",
            Self::TShirt => "TShirt",
            Self::Shorts => "Shorts",
            Self::SunHat => "SunHat",
            Self::Sunglasses => "Sunglasses",
            Self::Sandals => "Sandals",
            Self::WarmShoes => "WarmShoes",
            Self::Sneakers => "Sneakers",
            Self::NormalClothing => "NormalClothing",
        }
    }

    /// Emoji shown next to the item in the terminal
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::WinterJacket
            | Self::RainJacket
            | Self::Windbreaker
            | Self::Jacket
            | Self::LightJacket => "🧥",
            Self::TShirt | Self::LongSleeveShirt | Self::Sweater | Self::NormalClothing => "👕",
            Self::LongPants => "👖",
            Self::Shorts => "🩳",
            Self::Hat => "🧢",
            Self::SunHat => "👒",
            Self::Scarf => "🧣",
            Self::Gloves => "🧤",
            Self::Sunglasses => "🕶️",
            Self::Umbrella => "☂️",
            Self::WinterBoots | Self::WaterproofShoes => "🥾",
            Self::WarmShoes => "👞",
            Self::Sneakers => "👟",
            Self::Sandals => "🩴",
            Self::ThermalUnderwear => "🩲",
        }
    }
}

/// Short advisory message codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advisory {
    ExtremeColdStayInside,
    ExtremeColdLayerUp,
    SnowWaterproofImportant,
    SnowDontForgetGloves,
    ColdWarmJacketNeeded,
    HeavyRainWaterproofImportant,
    RainTakeUmbrella,
    WindyWindbreakerProtects,
    CoolButPleasantJacketEnough,
    RainButMildLightJacketEnough,
    PleasantTemperatureLightJacketPerfect,
    WarmButWetUmbrellaEnough,
    NiceWeatherLightClothingIdeal,
    ThunderstormStayInside,
    WarmRainLightQuickDry,
    VeryHotStayInShadeAndDrink,
    WarmAndSunnySunProtection,
    WeatherIsPleasant,
}

impl Advisory {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::ExtremeColdStayInside => "ExtremeColdStayInside",
            Self::ExtremeColdLayerUp => "ExtremeColdLayerUp",
            Self::SnowWaterproofImportant => "SnowWaterproofImportant",
            Self::SnowDontForgetGloves => "SnowDontForgetGloves",
            Self::ColdWarmJacketNeeded => "ColdWarmJacketNeeded",
            Self::HeavyRainWaterproofImportant => "HeavyRainWaterproofImportant",
            Self::RainTakeUmbrella => "RainTakeUmbrella",
            Self::WindyWindbreakerProtects => "WindyWindbreakerProtects",
            Self::CoolButPleasantJacketEnough => "CoolButPleasantJacketEnough",
            Self::RainButMildLightJacketEnough => "RainButMildLightJacketEnough",
            Self::PleasantTemperatureLightJacketPerfect => "PleasantTemperatureLightJacketPerfect",
            Self::WarmButWetUmbrellaEnough => "WarmButWetUmbrellaEnough",
            Self::NiceWeatherLightClothingIdeal => "NiceWeatherLightClothingIdeal",
            Self::ThunderstormStayInside => "ThunderstormStayInside",
            Self::WarmRainLightQuickDry => "WarmRainLightQuickDry",
            Self::VeryHotStayInShadeAndDrink => "VeryHotStayInShadeAndDrink",
            Self::WarmAndSunnySunProtection => "WarmAndSunnySunProtection",
            Self::WeatherIsPleasant => "WeatherIsPleasant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_has_a_distinct_advisory() {
        let advisories: HashSet<Advisory> =
            WeatherCategory::ALL.iter().map(|c| c.advisory()).collect();
        assert_eq!(advisories.len(), WeatherCategory::ALL.len());
    }

    #[test]
    fn test_category_key_roundtrip() {
        for category in WeatherCategory::ALL {
            assert_eq!(WeatherCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(WeatherCategory::from_key("Tropical"), None);
        assert_eq!(WeatherCategory::from_key("cool"), None);
    }

    #[test]
    fn test_item_keys_are_unique() {
        let keys: HashSet<&str> = ClothingItem::ALL.iter().map(|i| i.key()).collect();
        assert_eq!(keys.len(), 23);
    }
}
