use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_NAME_PROPERTY: &str = "adm1_name";

/// One category filter definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDef {
    /// Property the filter groups by (e.g. `activityName`).
    pub key: String,

    /// `"radio"` or `"checkbox"`; validated when the filter is built.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Add the synthetic "All" entry to radio widgets.
    #[serde(default)]
    pub all: bool,

    /// Label that features without the key group under.
    #[serde(default)]
    pub empty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionDef {
    /// Region property holding the display name.
    #[serde(default = "default_name_property")]
    pub name_property: String,

    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default = "default_true")]
    pub all: bool,
}

impl Default for RegionDef {
    fn default() -> Self {
        Self {
            name_property: DEFAULT_NAME_PROPERTY.to_string(),
            mode: default_mode(),
            all: true,
        }
    }
}

/// Explorer configuration: which filters exist and how they behave.
/// Stored as JSON next to the data files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplorerConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryDef>,

    /// Selectable proximity radii, in km; the first is preselected.
    #[serde(default = "default_distances")]
    pub distances: Vec<f64>,

    #[serde(default)]
    pub region: RegionDef,
}

fn default_name_property() -> String {
    DEFAULT_NAME_PROPERTY.to_string()
}

fn default_mode() -> String {
    "radio".to_string()
}

fn default_true() -> bool {
    true
}

fn default_distances() -> Vec<f64> {
    vec![5.0, 10.0, 30.0, 50.0]
}

fn default_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef {
            key: "activityName".to_string(),
            mode: "radio".to_string(),
            all: true,
            empty: None,
        },
        CategoryDef {
            key: "Referral required".to_string(),
            mode: "radio".to_string(),
            all: false,
            empty: None,
        },
        CategoryDef {
            key: "partnerName".to_string(),
            mode: "checkbox".to_string(),
            all: false,
            empty: None,
        },
    ]
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            distances: default_distances(),
            region: RegionDef::default(),
        }
    }
}

impl ExplorerConfig {
    /// Load from a JSON file, or return defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: ExplorerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
