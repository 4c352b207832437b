//! Avatar image for each weather category

use super::category::WeatherCategory;

/// Image shown when nothing more specific applies
pub const DEFAULT_AVATAR: &str = "images/avatars/default.jpg";

/// Image reference for a weather category
#[must_use]
pub fn select_avatar(category: WeatherCategory) -> &'static str {
    match category {
        // Extreme cold conditions
        WeatherCategory::ExtremeColdWithSnow => "images/avatars/extreme-winter.jpg",
        WeatherCategory::ExtremeCold => "images/avatars/extreme-cold.jpg",

        // Cold with snow
        WeatherCategory::ColdWithHeavySnow => "images/avatars/snow-day.jpg",
        WeatherCategory::ColdWithSnow => "images/avatars/winter-snow.jpg",
        WeatherCategory::Cold => "images/avatars/winter.jpg",

        // Cool conditions
        WeatherCategory::CoolWithHeavyRain => "images/avatars/rainy-cold.jpg",
        WeatherCategory::CoolWithRain => "images/avatars/rainy-cool.jpg",
        WeatherCategory::CoolAndWindy => "images/avatars/windy-cool.jpg",
        WeatherCategory::Cool => "images/avatars/cool.jpg",

        // Mild conditions
        WeatherCategory::MildWithRain => "images/avatars/mild-rainy.jpg",
        WeatherCategory::Mild => "images/avatars/mild.jpg",

        // Warm conditions
        WeatherCategory::WarmWithRain => "images/avatars/warm-rainy.jpg",
        WeatherCategory::Warm => "images/avatars/warm.jpg",

        // Hot conditions
        WeatherCategory::HotWithThunderstorm => "images/avatars/thunderstorm.jpg",
        WeatherCategory::HotWithRain => "images/avatars/hot-rainy.jpg",
        WeatherCategory::VeryHot => "images/avatars/very-hot.jpg",
        WeatherCategory::Hot => "images/avatars/hot.jpg",

        WeatherCategory::Normal => DEFAULT_AVATAR,
    }
}

/// Image reference for a symbolic category name, [`DEFAULT_AVATAR`] if unknown
#[must_use]
pub fn avatar_for_key(key: &str) -> &'static str {
    WeatherCategory::from_key(key).map_or(DEFAULT_AVATAR, select_avatar)
}
