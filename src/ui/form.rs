use serde::Deserialize;

use super::gateway::{ProductFields, ProductRow};

/// Raw text of the product form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
}

impl ProductForm {
    /// Pre-populates the edit form from a table row.
    pub fn from_row(row: &ProductRow) -> Self {
        Self {
            name: row.name.clone(),
            price: row.price.to_string(),
            stock: row.stock.to_string(),
        }
    }

    /// Required-field check, then coercion: price as a float, stock as an integer.
    /// Nothing is sent to the API unless this succeeds. The name is sent as entered.
    pub fn validate(&self) -> Result<ProductFields, String> {
        required("Name", &self.name)?;
        let price = required("Price", &self.price)?;
        let stock = required("Stock", &self.stock)?;

        let price: f64 = price
            .parse()
            .map_err(|_| format!("Price must be a number, got \"{}\"", price))?;
        if !price.is_finite() {
            return Err(format!("Price must be a number, got \"{}\"", self.price.trim()));
        }
        let stock: i32 = stock
            .parse()
            .map_err(|_| format!("Stock must be a whole number, got \"{}\"", stock))?;

        Ok(ProductFields {
            name: self.name.clone(),
            price,
            stock,
        })
    }
}

fn required<'a>(label: &str, value: &'a str) -> Result<&'a str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(trimmed)
    }
}
