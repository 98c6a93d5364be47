//! Product Model
//!
//! A product is keyed by its barcode. The product row and its nutrition row
//! share that identity and live and die together; category and health-marking
//! links hang off it in junction tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::flag;

/// Product entity (row of `products`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    /// Barcode
    pub id: String,
    pub name: String,
    pub data: Option<String>,
    /// Ingredients
    pub components: Option<String>,
    pub additional_features: Option<String>,
    pub contain: Option<String>,
    pub may_contain: Option<String>,
    pub allergies: Option<String>,
    pub price: Decimal,
    /// 0 = out of stock, 1 = in stock
    pub in_stock: i16,
    pub is_beverage: i16,
    pub is_seeds: i16,
}

/// Nutrition facts, one row per product (row of `nutritional_values`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct NutritionalValues {
    pub id: String,
    pub energy: Option<f64>,
    pub total_fats: Option<f64>,
    pub of_which_f: Option<f64>,
    pub saturated_fatty_acids: Option<f64>,
    pub trans_fatty_acids: Option<f64>,
    pub cholesterol: Option<f64>,
    pub sodium: Option<f64>,
    pub total_carbs: Option<f64>,
    pub of_which_c: Option<f64>,
    pub sugar: Option<f64>,
    pub sugar_teaspoons: Option<f64>,
    pub sugar_alcohols: Option<f64>,
    pub dietary_fibers: Option<f64>,
    pub proteins: Option<f64>,
    pub calcium: Option<f64>,
    pub iron: Option<f64>,
}

/// Nutrition block as the mobile client sends it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionInput {
    pub calories: Option<f64>,
    #[serde(rename = "totalFat")]
    pub total_fat: Option<f64>,
    pub of_which_f: Option<f64>,
    #[serde(rename = "saturatedFat")]
    pub saturated_fat: Option<f64>,
    #[serde(rename = "transFat")]
    pub trans_fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub sodium: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub of_which_c: Option<f64>,
    pub sugars: Option<f64>,
    #[serde(rename = "sugarTeaspoons")]
    pub sugar_teaspoons: Option<f64>,
    #[serde(rename = "sugarAlcohols")]
    pub sugar_alcohols: Option<f64>,
    #[serde(rename = "dietaryFiber")]
    pub dietary_fiber: Option<f64>,
    pub proteins: Option<f64>,
    pub calcium: Option<f64>,
    pub iron: Option<f64>,
}

impl NutritionInput {
    /// Map the client's field names onto the stored columns for `product_id`.
    pub fn into_values(self, product_id: &str) -> NutritionalValues {
        NutritionalValues {
            id: product_id.to_string(),
            energy: self.calories,
            total_fats: self.total_fat,
            of_which_f: self.of_which_f,
            saturated_fatty_acids: self.saturated_fat,
            trans_fatty_acids: self.trans_fat,
            cholesterol: self.cholesterol,
            sodium: self.sodium,
            total_carbs: self.carbohydrates,
            of_which_c: self.of_which_c,
            sugar: self.sugars,
            sugar_teaspoons: self.sugar_teaspoons,
            sugar_alcohols: self.sugar_alcohols,
            dietary_fibers: self.dietary_fiber,
            proteins: self.proteins,
            calcium: self.calcium,
            iron: self.iron,
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCreate {
    pub barcode: String,
    pub name: String,
    pub data: Option<String>,
    pub ingredients: Option<String>,
    pub additional_features: Option<String>,
    pub contains: Option<String>,
    pub may_contain: Option<String>,
    pub allergies: Option<String>,
    pub price: Option<Decimal>,
    #[serde(deserialize_with = "flag")]
    pub in_stock: i16,
    #[serde(deserialize_with = "flag")]
    pub is_drink: i16,
    #[serde(deserialize_with = "flag")]
    pub is_seeds: i16,
    pub nutrition: NutritionInput,
    pub categories: Vec<i64>,
    pub health_symbols: Vec<i64>,
}

impl ProductCreate {
    /// Product row for this payload
    pub fn product(&self) -> Product {
        Product {
            id: self.barcode.clone(),
            name: self.name.clone(),
            data: self.data.clone(),
            components: self.ingredients.clone(),
            additional_features: self.additional_features.clone(),
            contain: self.contains.clone(),
            may_contain: self.may_contain.clone(),
            allergies: self.allergies.clone(),
            price: self.price.unwrap_or_default(),
            in_stock: self.in_stock,
            is_beverage: self.is_drink,
            is_seeds: self.is_seeds,
        }
    }

    /// Nutrition row for this payload
    pub fn nutrition(&self) -> NutritionalValues {
        self.nutrition.clone().into_values(&self.barcode)
    }
}

/// Product with all of its associations resolved to display names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub categories: Vec<String>,
    pub nutritional_values: Option<NutritionalValues>,
    pub health_marking: Vec<String>,
}

/// Listing row for category browsing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub in_stock: i16,
}

/// `PATCH /api/updateStock/{id}` body
///
/// `stock` stays raw JSON so non-numeric values reach the route and get a
/// domain error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockUpdate {
    pub stock: Option<serde_json::Value>,
}

impl StockUpdate {
    /// The stock flag when `stock` is the number 0 or 1 (`1.0` included)
    pub fn flag(&self) -> Option<i16> {
        let value = self.stock.as_ref()?.as_f64()?;
        if value == 0.0 {
            Some(0)
        } else if value == 1.0 {
            Some(1)
        } else {
            None
        }
    }
}

/// `POST /api/updateProductField` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFieldUpdate {
    pub id: String,
    pub field: String,
    pub new_value: serde_json::Value,
}

/// `POST /api/saveProductCategories` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCategoriesReplace {
    pub barcode: String,
    pub categories: Option<Vec<i64>>,
}

/// `POST /api/getProductsByCategory` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductsByCategory {
    pub category_ids: Vec<i64>,
}

/// `GET /api/searchProducts` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSearch {
    pub query: Option<String>,
}

/// `{success, message}` reply of the multi-table product writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub success: bool,
    pub message: String,
}

impl WriteResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_accepts_client_shape() {
        let json = r#"{
            "barcode": "7290000000001",
            "name": "Whole wheat bread",
            "ingredients": "flour, water",
            "mayContain": "sesame",
            "price": 12.9,
            "inStock": true,
            "isDrink": 0,
            "isSeeds": "1",
            "categories": [1, 2],
            "healthSymbols": [3],
            "nutrition": {"calories": 240, "totalFat": 1.5, "of_which_f": 0.2, "sugarTeaspoons": 0.5}
        }"#;
        let p: ProductCreate = serde_json::from_str(json).unwrap();
        assert_eq!(p.barcode, "7290000000001");
        assert_eq!(p.in_stock, 1);
        assert_eq!(p.is_drink, 0);
        assert_eq!(p.is_seeds, 1);
        assert_eq!(p.categories, vec![1, 2]);
        assert_eq!(p.health_symbols, vec![3]);

        let row = p.product();
        assert_eq!(row.components.as_deref(), Some("flour, water"));
        assert_eq!(row.may_contain.as_deref(), Some("sesame"));
        assert_eq!(row.is_beverage, 0);

        let n = p.nutrition();
        assert_eq!(n.id, "7290000000001");
        assert_eq!(n.energy, Some(240.0));
        assert_eq!(n.total_fats, Some(1.5));
        assert_eq!(n.sugar_teaspoons, Some(0.5));
        assert_eq!(n.proteins, None);
    }

    #[test]
    fn details_flatten_product_fields() {
        let details = ProductDetails {
            product: ProductCreate {
                barcode: "B001".into(),
                name: "Pita".into(),
                ..Default::default()
            }
            .product(),
            categories: vec!["Bakery".into()],
            nutritional_values: None,
            health_marking: vec!["Low sugar".into()],
        };
        let v = serde_json::to_value(&details).unwrap();
        assert_eq!(v["id"], "B001");
        assert_eq!(v["categories"][0], "Bakery");
        assert_eq!(v["healthMarking"][0], "Low sugar");
        assert!(v["nutritionalValues"].is_null());
    }
}
