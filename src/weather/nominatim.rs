//! Nominatim (OpenStreetMap) reverse geocoding responses

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct NominatimResponse {
    pub address: Option<NominatimAddress>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NominatimAddress {
    village: Option<String>,
    town: Option<String>,
    city: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl NominatimResponse {
    /// "Place, Region, Country" from the address parts.
    ///
    /// The place is the first of village, town, city and municipality; the
    /// region is county or state and is left out when it repeats the place.
    /// Without any address part the display name is used. A response without
    /// an address block has no name.
    pub fn location_name(&self) -> Option<String> {
        let address = self.address.as_ref()?;

        let mut parts: Vec<&str> = Vec::with_capacity(3);

        let local_name = non_empty(&address.village)
            .or_else(|| non_empty(&address.town))
            .or_else(|| non_empty(&address.city))
            .or_else(|| non_empty(&address.municipality));
        if let Some(local_name) = local_name {
            parts.push(local_name);
        }

        let region = non_empty(&address.county).or_else(|| non_empty(&address.state));
        if let Some(region) = region.filter(|region| Some(*region) != local_name) {
            parts.push(region);
        }

        if let Some(country) = non_empty(&address.country) {
            parts.push(country);
        }

        if parts.is_empty() {
            non_empty(&self.display_name).map(str::to_string)
        } else {
            Some(parts.join(", "))
        }
    }
}
