use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductUpdate};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Update = ProductUpdate;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the actor
    /// * `params` - Name, price and stock as submitted
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
        })
    }

    /// Replaces name, price and stock. The id is left as is.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), String> {
        self.name = update.name;
        self.price = update.price;
        self.stock = update.stock;
        Ok(())
    }
}
