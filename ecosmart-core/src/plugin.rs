//! Bundle of ports that together implement one data provider.

use std::sync::Arc;

use crate::ports::{CenterPort, GeocodePort};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Metadata describing a provider.
pub struct ProviderMeta {
    /// Short identifier, e.g. `osm`.
    pub id: String,
    /// Human-friendly name including data attribution.
    pub name: String,
}

/// Collection of ports implementing a single provider.
pub struct LocatorPlugin {
    /// Static metadata describing the provider.
    pub meta: ProviderMeta,
    /// Implementation for resolving place names.
    pub geocoder: Arc<dyn GeocodePort>,
    /// Implementation for finding recycling centers.
    pub finder: Arc<dyn CenterPort>,
}
