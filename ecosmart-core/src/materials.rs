//! Mapping between human material categories and OSM `recycling:*` tags.

use std::fmt;
use std::str::FromStr;

/// Tag returned for [`MaterialCategory::Any`]; disables material filtering.
pub const ANY_MATERIAL: &str = "any";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Material categories users can filter recycling centers by.
pub enum MaterialCategory {
    /// No filtering.
    Any,
    /// Plastics.
    Plastic,
    /// Paper.
    Paper,
    /// Glass bottles and jars.
    Glass,
    /// Cardboard.
    Cardboard,
    /// Scrap metal.
    Metal,
    /// Organic / green waste.
    Organic,
    /// Batteries.
    Battery,
    /// Electronic devices.
    Electronics,
    /// Clothes and textiles.
    Textile,
    /// Wood.
    Wood,
}

impl MaterialCategory {
    /// Every category, in the order they are offered to users.
    pub const ALL: [MaterialCategory; 11] = [
        MaterialCategory::Any,
        MaterialCategory::Plastic,
        MaterialCategory::Paper,
        MaterialCategory::Glass,
        MaterialCategory::Cardboard,
        MaterialCategory::Metal,
        MaterialCategory::Organic,
        MaterialCategory::Battery,
        MaterialCategory::Electronics,
        MaterialCategory::Textile,
        MaterialCategory::Wood,
    ];

    /// Human-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MaterialCategory::Any => "Any",
            MaterialCategory::Plastic => "Plastic",
            MaterialCategory::Paper => "Paper",
            MaterialCategory::Glass => "Glass",
            MaterialCategory::Cardboard => "Cardboard",
            MaterialCategory::Metal => "Metal",
            MaterialCategory::Organic => "Organic",
            MaterialCategory::Battery => "Battery",
            MaterialCategory::Electronics => "Electronics",
            MaterialCategory::Textile => "Textile",
            MaterialCategory::Wood => "Wood",
        }
    }

    /// OSM `recycling:<tag>` suffix for this category.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            MaterialCategory::Any => ANY_MATERIAL,
            MaterialCategory::Plastic => "plastic",
            MaterialCategory::Paper => "paper",
            MaterialCategory::Glass => "glass",
            MaterialCategory::Cardboard => "cardboard",
            MaterialCategory::Metal => "scrap_metal",
            MaterialCategory::Organic => "organic",
            MaterialCategory::Battery => "batteries",
            MaterialCategory::Electronics => "electronic",
            MaterialCategory::Textile => "clothes",
            MaterialCategory::Wood => "wood",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown material category: {0}")]
/// Label that does not name a [`MaterialCategory`].
pub struct UnknownCategory(pub String);

impl FromStr for MaterialCategory {
    type Err = UnknownCategory;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        MaterialCategory::ALL
            .into_iter()
            .find(|category| category.label() == label)
            .ok_or_else(|| UnknownCategory(label.to_owned()))
    }
}

/// Turn an OSM tag suffix such as `scrap_metal` into `Scrap Metal`.
#[must_use]
pub fn format_material_name(tag: &str) -> String {
    tag.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a category label to its OSM tag, falling back to the lower-cased label.
#[must_use]
pub fn normalize_material_type(category: &str) -> String {
    category
        .parse::<MaterialCategory>()
        .map_or_else(|_| category.to_lowercase(), |known| known.tag().to_owned())
}

/// Whether a center with the given materials should be kept for `tag`.
///
/// Centers without a materials list are assumed to take common materials.
#[must_use]
pub fn accepts(materials: Option<&[String]>, tag: &str) -> bool {
    let Some(materials) = materials.filter(|list| !list.is_empty()) else {
        return true;
    };

    let token = tag.to_lowercase();
    materials
        .iter()
        .any(|material| material.to_lowercase().contains(&token))
}
