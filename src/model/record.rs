use crate::model::{Category, Customization, Id, MenuItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape mismatch detected while building a target record, before anything is
/// sent to the store.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{record} is missing a name")]
    MissingName { record: &'static str },

    #[error("{record} '{name}' has invalid price {price}")]
    InvalidPrice {
        record: &'static str,
        name: String,
        price: f64,
    },

    #[error("menu item '{name}' has rating {rating} outside 0.0..=5.0")]
    InvalidRating { name: String, rating: f64 },

    #[error("{record} has an empty '{field}' reference")]
    EmptyReference {
        record: &'static str,
        field: &'static str,
    },

    #[error("failed to serialize {record} payload: {source}")]
    Serialize {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn check_price(record: &'static str, name: &str, price: f64) -> Result<(), RecordError> {
    if !price.is_finite() || price < 0.0 {
        return Err(RecordError::InvalidPrice {
            record,
            name: name.to_string(),
            price,
        });
    }
    Ok(())
}

/// Persisted form of a source [`Category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub description: String,
}

impl CategoryRecord {
    pub fn from_source(cat: &Category) -> Result<Self, RecordError> {
        if cat.name.trim().is_empty() {
            return Err(RecordError::MissingName { record: "category" });
        }
        Ok(Self {
            name: cat.name.clone(),
            description: cat.description.clone(),
        })
    }

    pub fn to_payload(&self) -> Result<Value, RecordError> {
        serde_json::to_value(self).map_err(|source| RecordError::Serialize {
            record: "category",
            source,
        })
    }
}

/// Persisted form of a source [`Customization`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationRecord {
    pub name: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CustomizationRecord {
    pub fn from_source(cus: &Customization) -> Result<Self, RecordError> {
        if cus.name.trim().is_empty() {
            return Err(RecordError::MissingName {
                record: "customization",
            });
        }
        check_price("customization", &cus.name, cus.price)?;
        Ok(Self {
            name: cus.name.clone(),
            price: cus.price,
            kind: cus.kind.as_str().to_string(),
        })
    }

    pub fn to_payload(&self) -> Result<Value, RecordError> {
        serde_json::to_value(self).map_err(|source| RecordError::Serialize {
            record: "customization",
            source,
        })
    }
}

/// Persisted form of a source [`MenuItem`]. The source's `category_name` is
/// rewritten to the generated id of the category document created earlier in
/// the same run, and `image_url` is the materialized URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemRecord {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub calories: u32,
    pub protein: u32,
    pub categories: Id,
}

impl MenuItemRecord {
    pub fn from_source(
        item: &MenuItem,
        category_id: Id,
        image_url: String,
    ) -> Result<Self, RecordError> {
        if item.name.trim().is_empty() {
            return Err(RecordError::MissingName { record: "menu item" });
        }
        check_price("menu item", &item.name, item.price)?;
        if !item.rating.is_finite() || !(0.0..=5.0).contains(&item.rating) {
            return Err(RecordError::InvalidRating {
                name: item.name.clone(),
                rating: item.rating,
            });
        }
        if category_id.is_empty() {
            return Err(RecordError::EmptyReference {
                record: "menu item",
                field: "categories",
            });
        }
        Ok(Self {
            name: item.name.clone(),
            description: item.description.clone(),
            image_url,
            price: item.price,
            rating: item.rating,
            calories: item.calories,
            protein: item.protein,
            categories: category_id,
        })
    }

    pub fn to_payload(&self) -> Result<Value, RecordError> {
        serde_json::to_value(self).map_err(|source| RecordError::Serialize {
            record: "menu item",
            source,
        })
    }
}

/// One edge of the menu↔customization many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCustomizationRecord {
    pub menu: Id,
    pub customizations: Id,
}

impl MenuCustomizationRecord {
    pub fn new(menu_id: Id, customization_id: Id) -> Result<Self, RecordError> {
        if menu_id.is_empty() {
            return Err(RecordError::EmptyReference {
                record: "menu customization link",
                field: "menu",
            });
        }
        if customization_id.is_empty() {
            return Err(RecordError::EmptyReference {
                record: "menu customization link",
                field: "customizations",
            });
        }
        Ok(Self {
            menu: menu_id,
            customizations: customization_id,
        })
    }

    pub fn to_payload(&self) -> Result<Value, RecordError> {
        serde_json::to_value(self).map_err(|source| RecordError::Serialize {
            record: "menu customization link",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CustomizationKind;

    fn sample_item() -> MenuItem {
        MenuItem {
            name: "Margherita".to_string(),
            description: "Tomato, mozzarella, basil".to_string(),
            image_url: "https://cdn.example.com/img/margherita.png".to_string(),
            price: 9.5,
            rating: 4.6,
            calories: 850,
            protein: 32,
            category_name: "Pizza".to_string(),
            customizations: vec!["Extra Cheese".to_string()],
        }
    }

    #[test]
    fn category_record_rejects_blank_name() {
        let err = CategoryRecord::from_source(&Category::new("  ", "whatever")).unwrap_err();
        assert!(matches!(err, RecordError::MissingName { record: "category" }));
    }

    #[test]
    fn customization_record_rejects_negative_price() {
        let cus = Customization::new("Extra Cheese", -1.0, CustomizationKind::Topping);
        let err = CustomizationRecord::from_source(&cus).unwrap_err();
        assert!(matches!(err, RecordError::InvalidPrice { .. }));
    }

    #[test]
    fn customization_record_keeps_extension_kind() {
        let cus = Customization::new("Garlic Dip", 0.8, CustomizationKind::Other("sauce".into()));
        let rec = CustomizationRecord::from_source(&cus).unwrap();
        assert_eq!(rec.kind, "sauce");
        assert_eq!(rec.to_payload().unwrap()["type"], "sauce");
    }

    #[test]
    fn menu_item_record_rewrites_category_reference() {
        let rec = MenuItemRecord::from_source(
            &sample_item(),
            "cat-123".to_string(),
            "https://files.example.com/view/1".to_string(),
        )
        .unwrap();
        assert_eq!(rec.categories, "cat-123");
        let payload = rec.to_payload().unwrap();
        assert_eq!(payload["categories"], "cat-123");
        assert!(payload.get("category_name").is_none());
        assert!(payload.get("customizations").is_none());
    }

    #[test]
    fn menu_item_record_rejects_out_of_range_rating() {
        let mut item = sample_item();
        item.rating = 5.4;
        let err =
            MenuItemRecord::from_source(&item, "cat-123".to_string(), "u".to_string()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidRating { .. }));
    }

    #[test]
    fn link_record_requires_both_ids() {
        assert!(MenuCustomizationRecord::new("".to_string(), "cus-1".to_string()).is_err());
        assert!(MenuCustomizationRecord::new("menu-1".to_string(), "".to_string()).is_err());
        let rec = MenuCustomizationRecord::new("menu-1".to_string(), "cus-1".to_string()).unwrap();
        assert_eq!(rec.to_payload().unwrap()["menu"], "menu-1");
    }
}
