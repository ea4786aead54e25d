//! High-level locator facade combining geocoding and center search.

use tracing::debug;

use crate::materials::{ANY_MATERIAL, accepts, normalize_material_type};
use crate::model::{CenterSearch, GeocodedLocation, LocatorOutcome, RecyclingCenter};
use crate::plugin::{LocatorPlugin, ProviderMeta};
use crate::ports::PortError;

/// Public entry point for place lookups and recycling center searches.
pub struct RecyclingLocator {
    plugin: LocatorPlugin,
    default_radius_meters: u32,
}

impl RecyclingLocator {
    /// Create a locator bound to the provided plugin.
    #[must_use]
    pub fn new(plugin: LocatorPlugin, default_radius_meters: u32) -> Self {
        Self {
            plugin,
            default_radius_meters,
        }
    }

    /// Metadata of the provider backing this locator.
    #[must_use]
    pub fn provider(&self) -> &ProviderMeta {
        &self.plugin.meta
    }

    /// Radius used by [`Self::locate`] when a place has no bounding box.
    #[must_use]
    pub fn default_radius_meters(&self) -> u32 {
        self.default_radius_meters
    }

    /// Resolve a place name.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::GeocodingFailure`] if the geocoder call fails.
    pub async fn geocode(&self, place: &str) -> Result<Option<GeocodedLocation>, PortError> {
        self.plugin.geocoder.geocode(place).await
    }

    /// Find all recycling centers for a search.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::CenterLookupFailure`] if the provider call fails.
    pub async fn find_nearby(
        &self,
        search: &CenterSearch,
    ) -> Result<Vec<RecyclingCenter>, PortError> {
        self.plugin.finder.find_nearby(search).await
    }

    /// Find centers that accept the given material category.
    ///
    /// Centers without published materials are kept. The `Any` category
    /// disables filtering.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::CenterLookupFailure`] if the provider call fails.
    pub async fn find_by_material(
        &self,
        search: &CenterSearch,
        category: &str,
    ) -> Result<Vec<RecyclingCenter>, PortError> {
        let tag = normalize_material_type(category);
        let centers = self.find_nearby(search).await?;

        if tag == ANY_MATERIAL {
            return Ok(centers);
        }

        let found = centers.len();
        let kept: Vec<RecyclingCenter> = centers
            .into_iter()
            .filter(|center| accepts(center.materials.as_deref(), &tag))
            .collect();

        debug!(%tag, found, kept = kept.len(), "filtered centers by material");
        Ok(kept)
    }

    /// Geocode `place`, then search around it for `category`.
    ///
    /// The place's bounding box is searched when available, otherwise the
    /// default radius around its coordinate.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if either provider call fails.
    pub async fn locate(&self, place: &str, category: &str) -> Result<LocatorOutcome, PortError> {
        let Some(location) = self.geocode(place).await? else {
            debug!(place, "no geocoding match");
            return Ok(LocatorOutcome::NotFound);
        };

        let search = CenterSearch::for_location(&location, self.default_radius_meters);
        let centers = self.find_by_material(&search, category).await?;

        Ok(LocatorOutcome::Found { location, centers })
    }
}
