//! Product listing page.
//!
//! Listing, create form, and edit form are separate GET routes; form submits
//! and deletes are POSTs that redirect back to the listing for the same page
//! on success, or re-render the open form with an error on failure.

pub mod form;
pub mod gateway;
pub mod render;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::api::AppState;
use form::ProductForm;
use gateway::ProductsApi;
use render::{render_listing, FormMode, FormState, ListingView, Notice, Pager};

/// Query parameters accepted by every page route.
///
/// `page` and `per_page` are kept as text so a malformed value still renders
/// the listing instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Unparsable or empty values count as absent; negatives select nothing (0),
/// the same mapping the GraphQL `products` arguments get.
fn lenient_count(raw: Option<&str>) -> Option<u32> {
    let value: i64 = raw?.trim().parse().ok()?;
    Some(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

impl ListParams {
    fn pager(&self, default_per_page: u32) -> Pager {
        Pager {
            page: lenient_count(self.page.as_deref()).unwrap_or(1),
            per_page: lenient_count(self.per_page.as_deref()).unwrap_or(default_per_page),
        }
    }

    fn notice(&self) -> Option<Notice> {
        match (&self.error, &self.notice) {
            (Some(err), _) => Some(Notice::Error(err.clone())),
            (None, Some(msg)) => Some(Notice::Success(msg.clone())),
            (None, None) => None,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/products", post(create_product))
        .route("/products/new", get(new_product_form))
        .route("/products/:id", post(update_product))
        .route("/products/:id/edit", get(edit_product_form))
        .route("/products/:id/delete", post(delete_product))
}

/// Fetches the current page and builds the view. A failed fetch still renders,
/// with an empty table and the failure as the notice.
async fn load_view(
    api: &ProductsApi,
    pager: Pager,
    form: Option<FormState>,
    notice: Option<Notice>,
) -> ListingView {
    match api.products(pager.page, pager.per_page).await {
        Ok(rows) => ListingView { pager, rows, form, notice },
        Err(e) => ListingView {
            pager,
            rows: Vec::new(),
            form,
            notice: Some(Notice::Error(e.to_string())),
        },
    }
}

fn page(status: StatusCode, view: &ListingView) -> Response {
    (status, Html(render_listing(view))).into_response()
}

#[instrument(skip(state))]
async fn index(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let pager = params.pager(state.default_per_page);
    let view = load_view(&state.products_api, pager, None, params.notice()).await;
    page(StatusCode::OK, &view)
}

#[instrument(skip(state))]
async fn new_product_form(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let pager = params.pager(state.default_per_page);
    let form = FormState {
        mode: FormMode::Create,
        values: ProductForm::default(),
    };
    let view = load_view(&state.products_api, pager, Some(form), None).await;
    page(StatusCode::OK, &view)
}

#[instrument(skip(state))]
async fn edit_product_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let pager = params.pager(state.default_per_page);
    let mut view = load_view(&state.products_api, pager, None, None).await;

    match view.rows.iter().find(|row| row.id == id) {
        Some(row) => {
            view.form = Some(FormState {
                values: ProductForm::from_row(row),
                mode: FormMode::Edit { id },
            });
        }
        None if view.notice.is_none() => {
            warn!("Edit requested for a product not on this page");
            view.notice = Some(Notice::Error(format!("Product {} was not found", id)));
        }
        None => {}
    }
    page(StatusCode::OK, &view)
}

/// Re-renders the page with the form still open and the submitted values kept.
async fn reopen_form(state: &AppState, pager: Pager, form: FormState, message: String) -> Response {
    let view = load_view(&state.products_api, pager, Some(form), Some(Notice::Error(message))).await;
    page(StatusCode::UNPROCESSABLE_ENTITY, &view)
}

#[instrument(skip(state, values))]
async fn create_product(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Form(values): Form<ProductForm>,
) -> Response {
    let pager = params.pager(state.default_per_page);
    let form = FormState { mode: FormMode::Create, values };

    let fields = match form.values.validate() {
        Ok(fields) => fields,
        Err(message) => return reopen_form(&state, pager, form, message).await,
    };

    match state.products_api.add(&fields).await {
        Ok(Some(product)) => {
            info!(product_id = %product.id, "Product added from form");
            let notice = Notice::Success(format!("Added {}", product.name));
            Redirect::to(&pager.listing_url(Some(&notice))).into_response()
        }
        Ok(None) => reopen_form(&state, pager, form, "Product was not added".to_string()).await,
        Err(e) => reopen_form(&state, pager, form, e.to_string()).await,
    }
}

#[instrument(skip(state, values))]
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
    Form(values): Form<ProductForm>,
) -> Response {
    let pager = params.pager(state.default_per_page);
    let form = FormState {
        mode: FormMode::Edit { id: id.clone() },
        values,
    };

    let fields = match form.values.validate() {
        Ok(fields) => fields,
        Err(message) => return reopen_form(&state, pager, form, message).await,
    };

    let notice = match state.products_api.update(&id, &fields).await {
        Ok(Some(product)) => {
            info!(product_id = %product.id, "Product updated from form");
            Notice::Success(format!("Updated {}", product.name))
        }
        Ok(None) => Notice::Error(format!("Product {} no longer exists", id)),
        Err(e) => return reopen_form(&state, pager, form, e.to_string()).await,
    };
    Redirect::to(&pager.listing_url(Some(&notice))).into_response()
}

#[instrument(skip(state))]
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let pager = params.pager(state.default_per_page);

    let notice = match state.products_api.remove(&id).await {
        Ok(Some(product)) => {
            info!(product_id = %product.id, "Product removed from listing");
            Notice::Success(format!("Removed {}", product.name))
        }
        Ok(None) => Notice::Error(format!("Product {} was not found", id)),
        Err(e) => Notice::Error(e.to_string()),
    };
    Redirect::to(&pager.listing_url(Some(&notice))).into_response()
}
