//! The UI's view of the API: GraphQL documents executed against the schema,
//! with responses decoded into table rows.

use async_graphql::{Request, Variables};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::api::graphql::InventorySchema;

const PRODUCTS_QUERY: &str = r#"
query Products($page: Int!, $perPage: Int!) {
  products(page: $page, perPage: $perPage) { id name price stock }
}"#;

const ADD_PRODUCT: &str = r#"
mutation AddProduct($name: String!, $price: Float!, $stock: Int!) {
  addProduct(name: $name, price: $price, stock: $stock) { id name price stock }
}"#;

const UPDATE_PRODUCT: &str = r#"
mutation UpdateProduct($id: ID!, $name: String!, $price: Float!, $stock: Int!) {
  updateProduct(id: $id, name: $name, price: $price, stock: $stock) { id name price stock }
}"#;

const REMOVE_PRODUCT: &str = r#"
mutation RemoveProduct($id: ID!) {
  removeProduct(id: $id) { id name price stock }
}"#;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("{0}")]
    Graphql(String),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A product as the listing page sees it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Field values after the form's required and numeric checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

#[derive(Clone)]
pub struct ProductsApi {
    schema: InventorySchema,
}

impl ProductsApi {
    pub fn new(schema: InventorySchema) -> Self {
        Self { schema }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
        field: &str,
    ) -> Result<T, UiError> {
        let request = Request::new(document).variables(Variables::from_json(variables));
        let response = self.schema.execute(request).await;

        if let Some(err) = response.errors.first() {
            warn!(error = %err.message, "GraphQL request failed");
            return Err(UiError::Graphql(err.message.clone()));
        }

        let mut data = response.data.into_json()?;
        let value = data.get_mut(field).map(Value::take).unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    #[instrument(skip(self))]
    pub async fn products(&self, page: u32, per_page: u32) -> Result<Vec<ProductRow>, UiError> {
        debug!("Fetching product page");
        let variables = json!({
            "page": clamp_to_int(page),
            "perPage": clamp_to_int(per_page),
        });
        self.execute(PRODUCTS_QUERY, variables, "products").await
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn add(&self, input: &ProductFields) -> Result<Option<ProductRow>, UiError> {
        let variables = json!({
            "name": input.name,
            "price": input.price,
            "stock": input.stock,
        });
        self.execute(ADD_PRODUCT, variables, "addProduct").await
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn update(&self, id: &str, input: &ProductFields) -> Result<Option<ProductRow>, UiError> {
        let variables = json!({
            "id": id,
            "name": input.name,
            "price": input.price,
            "stock": input.stock,
        });
        self.execute(UPDATE_PRODUCT, variables, "updateProduct").await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<Option<ProductRow>, UiError> {
        self.execute(REMOVE_PRODUCT, json!({ "id": id }), "removeProduct").await
    }
}

/// GraphQL `Int` is 32-bit signed.
fn clamp_to_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
