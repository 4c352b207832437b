//! Clothing recommendation module
//!
//! Classifies current weather readings into one of 18 categories, each with a
//! fixed list of clothing items, an advisory and an avatar image. Everything
//! here operates on enum values; localization happens afterwards.

pub mod avatar;
pub mod category;
pub mod classifier;

pub use avatar::{DEFAULT_AVATAR, avatar_for_key, select_avatar};
pub use category::{Advisory, ClothingItem, WeatherCategory};
pub use classifier::{ClothingRecommendation, classify};
