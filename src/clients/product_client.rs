use tracing::{debug, info, instrument};

use crate::actor_framework::{Page, ResourceClient};
use crate::domain::{Product, ProductCreate, ProductUpdate};
use crate::impl_basic_client;
use crate::product_actor::ProductError;

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, page), fields(page = page.number, per_page = page.per_page))]
    pub async fn list_products(&self, page: Page) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.list(page).await?)
    }

    #[instrument(skip(self, params), fields(product_name = %params.name))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.inner.create(params).await?;
        info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    #[instrument(skip(self, update), fields(product_name = %update.name))]
    pub async fn update_product(&self, id: String, update: ProductUpdate) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }
}
