use serde::{Deserialize, Serialize};

/// A menu category in the source dataset, unique by `name` within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Kind of add-on customization. The store accepts arbitrary extension
/// strings beyond the four well-known kinds, so unknown values round-trip
/// through `Other` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomizationKind {
    Topping,
    Side,
    Size,
    Crust,
    Other(String),
}

impl CustomizationKind {
    pub fn as_str(&self) -> &str {
        match self {
            CustomizationKind::Topping => "topping",
            CustomizationKind::Side => "side",
            CustomizationKind::Size => "size",
            CustomizationKind::Crust => "crust",
            CustomizationKind::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for CustomizationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "topping" => CustomizationKind::Topping,
            "side" => CustomizationKind::Side,
            "size" => CustomizationKind::Size,
            "crust" => CustomizationKind::Crust,
            _ => CustomizationKind::Other(s),
        }
    }
}

impl From<CustomizationKind> for String {
    fn from(kind: CustomizationKind) -> Self {
        kind.as_str().to_string()
    }
}

/// An add-on customization in the source dataset, unique by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    pub name: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
}

impl Customization {
    pub fn new(name: impl Into<String>, price: f64, kind: CustomizationKind) -> Self {
        Self {
            name: name.into(),
            price,
            kind,
        }
    }
}

/// A menu item in the source dataset. `category_name` and every entry in
/// `customizations` are natural-key references resolved during seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub calories: u32,
    pub protein: u32,
    pub category_name: String,
    pub customizations: Vec<String>,
}

/// The complete normalized source dataset for one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub customizations: Vec<Customization>,
    pub menu: Vec<MenuItem>,
}

impl SeedData {
    /// Load a dataset from a JSON file with the same shape as the built-in one.
    pub fn from_json_file(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
        let data = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse dataset file {}", path.display()))?;
        Ok(data)
    }
}
