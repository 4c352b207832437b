//! User profile settings

use serde::{Deserialize, Serialize};

use super::Location;

/// Name, language and default location of the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Preferred language ("de", "en")
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location_name: Option<String>,
}

fn default_language() -> String {
    "de".to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Max".to_string(),
            language: default_language(),
            latitude: None,
            longitude: None,
            location_name: None,
        }
    }
}

impl UserProfile {
    /// Both coordinates of the default location are set
    #[must_use]
    pub fn has_default_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    #[must_use]
    pub fn default_location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location::new(
                latitude,
                longitude,
                self.location_name
                    .clone()
                    .unwrap_or_else(|| format!("{latitude:.4}, {longitude:.4}")),
            )),
            _ => None,
        }
    }

    pub fn set_default_location(&mut self, location: &Location) {
        self.latitude = Some(location.latitude);
        self.longitude = Some(location.longitude);
        self.location_name = Some(location.name.clone());
    }
}
