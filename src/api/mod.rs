//! HTTP surface: the GraphQL endpoint and the product pages on one router.

pub mod graphql;

use axum::{extract::FromRef, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app_system::ServerConfig;
use crate::clients::ProductClient;
use crate::ui;
use crate::ui::gateway::ProductsApi;
use graphql::{create_schema, graphiql_handler, graphql_handler, InventorySchema};

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState {
    pub schema: InventorySchema,
    pub products_api: ProductsApi,
    pub default_per_page: u32,
}

impl AppState {
    pub fn new(products: ProductClient, config: &ServerConfig) -> Self {
        let schema = create_schema(products);
        Self {
            products_api: ProductsApi::new(schema.clone()),
            schema,
            default_per_page: config.default_per_page,
        }
    }
}

impl FromRef<AppState> for InventorySchema {
    fn from_ref(state: &AppState) -> Self {
        state.schema.clone()
    }
}

/// Build the combined router: `/graphql` plus the UI pages.
pub fn create_router(state: AppState) -> Router {
    // No authentication and a single origin-agnostic endpoint.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/graphql", get(graphiql_handler).post(graphql_handler))
        .merge(ui::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
