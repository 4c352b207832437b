//! German and English display strings
//!
//! Enum values are looked up per language. A [`Localizer`] for a language
//! without a table renders every value by its symbolic name.

use serde::{Deserialize, Serialize};

use crate::clothing::{Advisory, ClothingItem, WeatherCategory};

/// Languages with a translation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    German,
    English,
}

impl Language {
    /// Parse an ISO 639-1 code, ignoring case and any region suffix ("en-US")
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "de" => Some(Self::German),
            "en" => Some(Self::English),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::German => "de",
            Self::English => "en",
        }
    }
}

/// Fixed UI strings outside the clothing vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    UnknownLocation,
    MyLocation,
    Greeting,
    Temperature,
    FeelsLike,
    Wind,
    Precipitation,
    Snowfall,
    Humidity,
    Pressure,
    Visibility,
    UvIndex,
    WhatToWear,
    NextHours,
    NextDays,
    Sunrise,
    Sunset,
    NoResults,
}

impl Message {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::UnknownLocation => "UnknownLocation",
            Self::MyLocation => "MyLocation",
            Self::Greeting => "Greeting",
            Self::Temperature => "Temperature",
            Self::FeelsLike => "FeelsLike",
            Self::Wind => "Wind",
            Self::Precipitation => "Precipitation",
            Self::Snowfall => "Snowfall",
            Self::Humidity => "Humidity",
            Self::Pressure => "Pressure",
            Self::Visibility => "Visibility",
            Self::UvIndex => "UvIndex",
            Self::WhatToWear => "WhatToWear",
            Self::NextHours => "NextHours",
            Self::NextDays => "NextDays",
            Self::Sunrise => "Sunrise",
            Self::Sunset => "Sunset",
            Self::NoResults => "NoResults",
        }
    }
}

/// Resolves enum values to display strings for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localizer {
    language: Option<Language>,
}

impl Localizer {
    /// Localizer for a language code; unsupported codes fall back to symbolic names
    #[must_use]
    pub fn new(code: &str) -> Self {
        let language = Language::from_code(code);
        if language.is_none() {
            tracing::debug!("No translations for language '{}', using symbolic names", code);
        }
        Self { language }
    }

    #[must_use]
    pub fn for_language(language: Language) -> Self {
        Self {
            language: Some(language),
        }
    }

    #[must_use]
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Code passed to the APIs' language parameters
    #[must_use]
    pub fn api_language(&self) -> &'static str {
        self.language.unwrap_or(Language::English).code()
    }

    #[must_use]
    pub fn category(&self, category: WeatherCategory) -> &'static str {
        match self.language {
            Some(language) => category_text(language, category),
            None => category.key(),
        }
    }

    #[must_use]
    pub fn item(&self, item: ClothingItem) -> &'static str {
        match self.language {
            Some(language) => item_text(language, item),
            None => item.key(),
        }
    }

    #[must_use]
    pub fn items(&self, items: &[ClothingItem]) -> Vec<&'static str> {
        items.iter().map(|item| self.item(*item)).collect()
    }

    #[must_use]
    pub fn advisory(&self, advisory: Advisory) -> &'static str {
        match self.language {
            Some(language) => advisory_text(language, advisory),
            None => advisory.key(),
        }
    }

    #[must_use]
    pub fn message(&self, message: Message) -> &'static str {
        match self.language {
            Some(language) => message_text(language, message),
            None => message.key(),
        }
    }

    /// Description of a WMO weather code
    #[must_use]
    pub fn weather_code(&self, code: i32) -> &'static str {
        let (key, en, de) = weather_code_entry(code);
        match self.language {
            Some(Language::English) => en,
            Some(Language::German) => de,
            None => key,
        }
    }
}

fn category_text(language: Language, category: WeatherCategory) -> &'static str {
    use WeatherCategory::*;
    match (language, category) {
        (Language::English, ExtremeColdWithSnow) => "Extreme cold with snow",
        (Language::English, ExtremeCold) => "Extreme cold",
        (Language::English, ColdWithHeavySnow) => "Cold with heavy snow",
        (Language::English, ColdWithSnow) => "Cold with snow",
        (Language::English, Cold) => "Cold",
        (Language::English, CoolWithHeavyRain) => "Cool with heavy rain",
        (Language::English, CoolWithRain) => "Cool with rain",
        (Language::English, CoolAndWindy) => "Cool and windy",
        (Language::English, Cool) => "Cool",
        (Language::English, MildWithRain) => "Mild with rain",
        (Language::English, Mild) => "Mild",
        (Language::English, WarmWithRain) => "Warm with rain",
        (Language::English, Warm) => "Warm",
        (Language::English, HotWithThunderstorm) => "Hot with thunderstorms",
        (Language::English, HotWithRain) => "Hot with rain",
        (Language::English, VeryHot) => "Very hot",
        (Language::English, Hot) => "Hot",
        (Language::English, Normal) => "Normal",

        (Language::German, ExtremeColdWithSnow) => "Extreme Kälte mit Schnee",
        (Language::German, ExtremeCold) => "Extreme Kälte",
        (Language::German, ColdWithHeavySnow) => "Kalt mit starkem Schneefall",
        (Language::German, ColdWithSnow) => "Kalt mit Schnee",
        (Language::German, Cold) => "Kalt",
        (Language::German, CoolWithHeavyRain) => "Kühl mit starkem Regen",
        (Language::German, CoolWithRain) => "Kühl mit Regen",
        (Language::German, CoolAndWindy) => "Kühl und windig",
        (Language::German, Cool) => "Kühl",
        (Language::German, MildWithRain) => "Mild mit Regen",
        (Language::German, Mild) => "Mild",
        (Language::German, WarmWithRain) => "Warm mit Regen",
        (Language::German, Warm) => "Warm",
        (Language::German, HotWithThunderstorm) => "Heiß mit Gewitter",
        (Language::German, HotWithRain) => "Heiß mit Regen",
        (Language::German, VeryHot) => "Sehr heiß",
        (Language::German, Hot) => "Heiß",
        (Language::German, Normal) => "Normal",
    }
}

fn item_text(language: Language, item: ClothingItem) -> &'static str {
    use ClothingItem::*;
    match (language, item) {
        (Language::English, WinterJacket) => "Winter jacket",
        (Language::English, Hat) => "Hat",
        (Language::English, Scarf) => "Scarf",
        (Language::English, Gloves) => "Gloves",
        (Language::English, WinterBoots) => "Winter boots",
        (Language::English, ThermalUnderwear) => "Thermal underwear",
        (Language::English, RainJacket) => "Rain jacket",
        (Language::English, Umbrella) => "Umbrella",
        (Language::English, WaterproofShoes) => "Waterproof shoes",
        (Language::English, Jacket) => "Jacket",
        (Language::English, LightJacket) => "Light jacket",
        (Language::English, Sweater) => "Sweater",
        (Language::English, LongSleeveShirt) => "Long-sleeve shirt",
        (Language::English, LongPants) => "Long pants",
        (Language::English, Windbreaker) => "Windbreaker",
        (Language::English, TShirt) => "T-shirt",
        (Language::English, Shorts) => "Shorts",
        (Language::English, SunHat) => "Sun hat",
        (Language::English, Sunglasses) => "Sunglasses",
        (Language::English, Sandals) => "Sandals",
        (Language::English, WarmShoes) => "Warm shoes",
        (Language::English, Sneakers) => "Sneakers",
        (Language::English, NormalClothing) => "Normal clothing",

        (Language::German, WinterJacket) => "Winterjacke",
        (Language::German, Hat) => "Mütze",
        (Language::German, Scarf) => "Schal",
        (Language::German, Gloves) => "Handschuhe",
        (Language::German, WinterBoots) => "Winterstiefel",
        (Language::German, ThermalUnderwear) => "Thermounterwäsche",
        (Language::German, RainJacket) => "Regenjacke",
        (Language::German, Umbrella) => "Regenschirm",
        (Language::German, WaterproofShoes) => "Wasserdichte Schuhe",
        (Language::German, Jacket) => "Jacke",
        (Language::German, LightJacket) => "Leichte Jacke",
        (Language::German, Sweater) => "Pullover",
        (Language::German, LongSleeveShirt) => "Langarmshirt",
        (Language::German, LongPants) => "Lange Hose",
        (Language::German, Windbreaker) => "Windjacke",
        (Language::German, TShirt) => "T-Shirt",
        (Language::German, Shorts) => "Kurze Hose",
        (Language::German, SunHat) => "Sonnenhut",
        (Language::German, Sunglasses) => "Sonnenbrille",
        (Language::German, Sandals) => "Sandalen",
        (Language::German, WarmShoes) => "Warme Schuhe",
        (Language::German, Sneakers) => "Turnschuhe",
        (Language::German, NormalClothing) => "Normale Kleidung",
    }
}

fn advisory_text(language: Language, advisory: Advisory) -> &'static str {
    use Advisory::*;
    match (language, advisory) {
        (Language::English, ExtremeColdStayInside) => "Extremely cold with snow! Better stay inside.",
        (Language::English, ExtremeColdLayerUp) => "Extremely cold! Dress in warm layers.",
        (Language::English, SnowWaterproofImportant) => "Lots of snow! Waterproof clothing is important.",
        (Language::English, SnowDontForgetGloves) => "It's snowing! Don't forget your gloves.",
        (Language::English, ColdWarmJacketNeeded) => "It's cold! You need a warm jacket.",
        (Language::English, HeavyRainWaterproofImportant) => "Heavy rain! Waterproof clothing is important.",
        (Language::English, RainTakeUmbrella) => "It's raining! Take an umbrella.",
        (Language::English, WindyWindbreakerProtects) => "It's windy! A windbreaker protects you.",
        (Language::English, CoolButPleasantJacketEnough) => "Cool but pleasant. A jacket is enough.",
        (Language::English, RainButMildLightJacketEnough) => "Rainy but mild. A light jacket is enough.",
        (Language::English, PleasantTemperatureLightJacketPerfect) => "Pleasant temperature. A light jacket is perfect.",
        (Language::English, WarmButWetUmbrellaEnough) => "Warm but wet. An umbrella is enough.",
        (Language::English, NiceWeatherLightClothingIdeal) => "Nice weather! Light clothing is ideal.",
        (Language::English, ThunderstormStayInside) => "Thunderstorm! Better stay inside.",
        (Language::English, WarmRainLightQuickDry) => "Warm rain. Wear light, quick-drying clothes.",
        (Language::English, VeryHotStayInShadeAndDrink) => "Very hot! Stay in the shade and drink plenty.",
        (Language::English, WarmAndSunnySunProtection) => "Warm and sunny! Don't forget sun protection.",
        (Language::English, WeatherIsPleasant) => "The weather is pleasant.",

        (Language::German, ExtremeColdStayInside) => "Extrem kalt mit Schnee! Bleib lieber drinnen.",
        (Language::German, ExtremeColdLayerUp) => "Extrem kalt! Zieh dich in warmen Schichten an.",
        (Language::German, SnowWaterproofImportant) => "Viel Schnee! Wasserdichte Kleidung ist wichtig.",
        (Language::German, SnowDontForgetGloves) => "Es schneit! Vergiss deine Handschuhe nicht.",
        (Language::German, ColdWarmJacketNeeded) => "Es ist kalt! Du brauchst eine warme Jacke.",
        (Language::German, HeavyRainWaterproofImportant) => "Starker Regen! Wasserdichte Kleidung ist wichtig.",
        (Language::German, RainTakeUmbrella) => "Es regnet! Nimm einen Regenschirm mit.",
        (Language::German, WindyWindbreakerProtects) => "Es ist windig! Eine Windjacke schützt dich.",
        (Language::German, CoolButPleasantJacketEnough) => "Kühl, aber angenehm. Eine Jacke reicht.",
        (Language::German, RainButMildLightJacketEnough) => "Regnerisch, aber mild. Eine leichte Jacke reicht.",
        (Language::German, PleasantTemperatureLightJacketPerfect) => "Angenehme Temperatur. Eine leichte Jacke ist perfekt.",
        (Language::German, WarmButWetUmbrellaEnough) => "Warm, aber nass. Ein Regenschirm reicht.",
        (Language::German, NiceWeatherLightClothingIdeal) => "Schönes Wetter! Leichte Kleidung ist ideal.",
        (Language::German, ThunderstormStayInside) => "Gewitter! Bleib lieber drinnen.",
        (Language::German, WarmRainLightQuickDry) => "Warmer Regen. Trag leichte, schnell trocknende Kleidung.",
        (Language::German, VeryHotStayInShadeAndDrink) => "Sehr heiß! Bleib im Schatten und trink viel.",
        (Language::German, WarmAndSunnySunProtection) => "Warm und sonnig! Vergiss den Sonnenschutz nicht.",
        (Language::German, WeatherIsPleasant) => "Das Wetter ist angenehm.",
    }
}

fn message_text(language: Language, message: Message) -> &'static str {
    use Message::*;
    match (language, message) {
        (Language::English, UnknownLocation) => "Unknown location",
        (Language::English, MyLocation) => "My location",
        (Language::English, Greeting) => "Hello",
        (Language::English, Temperature) => "Temperature",
        (Language::English, FeelsLike) => "Feels like",
        (Language::English, Wind) => "Wind",
        (Language::English, Precipitation) => "Precipitation",
        (Language::English, Snowfall) => "Snowfall",
        (Language::English, Humidity) => "Humidity",
        (Language::English, Pressure) => "Pressure",
        (Language::English, Visibility) => "Visibility",
        (Language::English, UvIndex) => "UV index",
        (Language::English, WhatToWear) => "What to wear",
        (Language::English, NextHours) => "Next hours",
        (Language::English, NextDays) => "Next days",
        (Language::English, Sunrise) => "Sunrise",
        (Language::English, Sunset) => "Sunset",
        (Language::English, NoResults) => "No locations found",

        (Language::German, UnknownLocation) => "Unbekannter Ort",
        (Language::German, MyLocation) => "Mein Standort",
        (Language::German, Greeting) => "Hallo",
        (Language::German, Temperature) => "Temperatur",
        (Language::German, FeelsLike) => "Gefühlt",
        (Language::German, Wind) => "Wind",
        (Language::German, Precipitation) => "Niederschlag",
        (Language::German, Snowfall) => "Schneefall",
        (Language::German, Humidity) => "Luftfeuchtigkeit",
        (Language::German, Pressure) => "Luftdruck",
        (Language::German, Visibility) => "Sicht",
        (Language::German, UvIndex) => "UV-Index",
        (Language::German, WhatToWear) => "Was ziehe ich an?",
        (Language::German, NextHours) => "Nächste Stunden",
        (Language::German, NextDays) => "Nächste Tage",
        (Language::German, Sunrise) => "Sonnenaufgang",
        (Language::German, Sunset) => "Sonnenuntergang",
        (Language::German, NoResults) => "Keine Orte gefunden",
    }
}

/// (symbolic key, English, German) for a WMO weather code
fn weather_code_entry(code: i32) -> (&'static str, &'static str, &'static str) {
    match code {
        0 => ("Clear", "Clear sky", "Klarer Himmel"),
        1 => ("MainlyClear", "Mainly clear", "Überwiegend klar"),
        2 => ("PartlyCloudy", "Partly cloudy", "Teilweise bewölkt"),
        3 => ("Cloudy", "Cloudy", "Bewölkt"),
        45 => ("Fog", "Fog", "Nebel"),
        48 => ("RimeFog", "Depositing rime fog", "Reifnebel"),
        51 => ("LightDrizzle", "Light drizzle", "Leichter Nieselregen"),
        53 => ("ModerateDrizzle", "Moderate drizzle", "Mäßiger Nieselregen"),
        55 => ("HeavyDrizzle", "Heavy drizzle", "Starker Nieselregen"),
        56 => ("LightFreezingDrizzle", "Light freezing drizzle", "Leichter gefrierender Nieselregen"),
        57 => ("HeavyFreezingDrizzle", "Heavy freezing drizzle", "Starker gefrierender Nieselregen"),
        61 => ("LightRain", "Light rain", "Leichter Regen"),
        63 => ("ModerateRain", "Moderate rain", "Mäßiger Regen"),
        65 => ("HeavyRain", "Heavy rain", "Starker Regen"),
        66 => ("LightFreezingRain", "Light freezing rain", "Leichter gefrierender Regen"),
        67 => ("HeavyFreezingRain", "Heavy freezing rain", "Starker gefrierender Regen"),
        71 => ("LightSnowfall", "Light snowfall", "Leichter Schneefall"),
        73 => ("ModerateSnowfall", "Moderate snowfall", "Mäßiger Schneefall"),
        75 => ("HeavySnowfall", "Heavy snowfall", "Starker Schneefall"),
        77 => ("SnowGrains", "Snow grains", "Schneegriesel"),
        80 => ("LightRainShowers", "Light rain showers", "Leichte Regenschauer"),
        81 => ("ModerateRainShowers", "Moderate rain showers", "Mäßige Regenschauer"),
        82 => ("HeavyRainShowers", "Heavy rain showers", "Starke Regenschauer"),
        85 => ("LightSnowShowers", "Light snow showers", "Leichte Schneeschauer"),
        86 => ("HeavySnowShowers", "Heavy snow showers", "Starke Schneeschauer"),
        95 => ("Thunderstorm", "Thunderstorm", "Gewitter"),
        96 => ("ThunderstormLightHail", "Thunderstorm with light hail", "Gewitter mit leichtem Hagel"),
        99 => ("ThunderstormHeavyHail", "Thunderstorm with heavy hail", "Gewitter mit starkem Hagel"),
        _ => ("Unknown", "Unknown", "Unbekannt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("de"), Some(Language::German));
        assert_eq!(Language::from_code("EN"), Some(Language::English));
        assert_eq!(Language::from_code("en-US"), Some(Language::English));
        assert_eq!(Language::from_code("de_AT"), Some(Language::German));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn test_german_strings() {
        let de = Localizer::new("de");
        assert_eq!(de.category(WeatherCategory::CoolAndWindy), "Kühl und windig");
        assert_eq!(de.item(ClothingItem::Umbrella), "Regenschirm");
        assert_eq!(
            de.advisory(Advisory::RainTakeUmbrella),
            "Es regnet! Nimm einen Regenschirm mit."
        );
        assert_eq!(de.weather_code(45), "Nebel");
        assert_eq!(de.message(Message::MyLocation), "Mein Standort");
    }

    #[test]
    fn test_english_strings() {
        let en = Localizer::for_language(Language::English);
        assert_eq!(en.category(WeatherCategory::VeryHot), "Very hot");
        assert_eq!(
            en.items(&[ClothingItem::TShirt, ClothingItem::Shorts]),
            vec!["T-shirt", "Shorts"]
        );
        assert_eq!(en.weather_code(96), "Thunderstorm with light hail");
        assert_eq!(en.weather_code(42), "Unknown");
    }

    #[test]
    fn test_unsupported_language_uses_symbolic_names() {
        let fr = Localizer::new("fr");
        assert_eq!(fr.language(), None);
        assert_eq!(fr.category(WeatherCategory::ColdWithSnow), "ColdWithSnow");
        assert_eq!(fr.item(ClothingItem::LongSleeveShirt), "LongSleeveShirt");
        assert_eq!(fr.advisory(Advisory::WeatherIsPleasant), "WeatherIsPleasant");
        assert_eq!(fr.weather_code(48), "RimeFog");
        assert_eq!(fr.message(Message::UnknownLocation), "UnknownLocation");
        assert_eq!(fr.api_language(), "en");
    }

    #[test]
    fn test_every_value_has_a_translation() {
        for language in [Language::German, Language::English] {
            let localizer = Localizer::for_language(language);
            for category in WeatherCategory::ALL {
                assert!(!localizer.category(category).is_empty());
                assert!(!localizer.advisory(category.advisory()).is_empty());
            }
            for item in ClothingItem::ALL {
                assert!(!localizer.item(item).is_empty());
            }
        }
    }
}
