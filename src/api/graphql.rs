//! GraphQL API
//!
//! Query and Mutation resolvers over the product actor.
//!
//! Endpoints:
//! - POST /graphql - Execute GraphQL queries/mutations
//! - GET /graphql - GraphiQL playground

use async_graphql::{
    Context, EmptySubscription, Object, Result as GqlResult, Schema, SimpleObject, ID,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::actor_framework::Page;
use crate::clients::ProductClient;
use crate::domain::{Product, ProductCreate, ProductUpdate};
use crate::product_actor::ProductError;

// ============================================================================
// GRAPHQL TYPES
// ============================================================================

/// GraphQL product object.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Product")]
pub struct GqlProduct {
    pub id: ID,
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

impl From<Product> for GqlProduct {
    fn from(p: Product) -> Self {
        Self {
            id: ID(p.id),
            name: p.name,
            price: p.price,
            stock: i32::try_from(p.stock).unwrap_or(i32::MAX),
        }
    }
}

// ============================================================================
// BOUNDARY CONVERSIONS
// ============================================================================

/// Negative page arguments select nothing rather than erroring.
pub fn page_from_args(page: i32, per_page: i32) -> Page {
    Page::new(
        u32::try_from(page).unwrap_or(0),
        u32::try_from(per_page).unwrap_or(0),
    )
}

fn checked_fields(price: f64, stock: i32) -> Result<(f64, u32), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::InvalidInput(
            "price must be a non-negative number".to_string(),
        ));
    }
    let stock = u32::try_from(stock).map_err(|_| {
        ProductError::InvalidInput("stock must be a non-negative integer".to_string())
    })?;
    Ok((price, stock))
}

fn gql_error(err: ProductError) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string())
}

// ============================================================================
// QUERY ROOT
// ============================================================================

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// One page of products, `perPage` records starting at `(page-1)*perPage`.
    /// Out-of-range pages are empty.
    async fn products(
        &self,
        ctx: &Context<'_>,
        page: i32,
        per_page: i32,
    ) -> GqlResult<Vec<GqlProduct>> {
        let client = ctx.data::<ProductClient>()?;
        let products = client
            .list_products(page_from_args(page, per_page))
            .await
            .map_err(gql_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }
}

// ============================================================================
// MUTATION ROOT
// ============================================================================

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Add a product and return it with its assigned id.
    async fn add_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: f64,
        stock: i32,
    ) -> GqlResult<Option<GqlProduct>> {
        let client = ctx.data::<ProductClient>()?;
        let (price, stock) = checked_fields(price, stock).map_err(gql_error)?;
        let product = client
            .add_product(ProductCreate { name, price, stock })
            .await
            .map_err(gql_error)?;
        Ok(Some(product.into()))
    }

    /// Replace a product's fields. Null if the id is unknown.
    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
        price: f64,
        stock: i32,
    ) -> GqlResult<Option<GqlProduct>> {
        let client = ctx.data::<ProductClient>()?;
        let (price, stock) = checked_fields(price, stock).map_err(gql_error)?;
        let product = client
            .update_product(id.0, ProductUpdate { name, price, stock })
            .await
            .map_err(gql_error)?;
        Ok(product.map(GqlProduct::from))
    }

    /// Remove a product and return it. Null if the id is unknown.
    async fn remove_product(&self, ctx: &Context<'_>, id: ID) -> GqlResult<Option<GqlProduct>> {
        let client = ctx.data::<ProductClient>()?;
        let product = client.remove_product(id.0).await.map_err(gql_error)?;
        Ok(product.map(GqlProduct::from))
    }
}

// ============================================================================
// SCHEMA & HANDLERS
// ============================================================================

/// The GraphQL schema type.
pub type InventorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Create the GraphQL schema.
pub fn create_schema(products: ProductClient) -> InventorySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(products)
        .finish()
}

/// Handler for GraphQL requests.
pub async fn graphql_handler(
    State(schema): State<InventorySchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Handler for GraphiQL playground.
pub async fn graphiql_handler() -> impl IntoResponse {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}
