//! API routes for zofa-server
//!
//! Every route lives under `/api` except `/health`. Bodies are camelCase JSON.

pub mod bread;
pub mod categories;
pub mod coupons;
pub mod health;
pub mod image;
pub mod live_ws;
pub mod notes;
pub mod notify;
pub mod orders;
pub mod products;
pub mod users;

use axum::Json;
use axum::Router;
use axum::routing::{delete, get, patch, post};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::StoreError;
use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, ServiceError>;

/// Map a unique violation to a domain-specific 409, pass everything else through.
pub(crate) fn conflict_as(
    code: ErrorCode,
    message: impl Into<String>,
) -> impl FnOnce(StoreError) -> ServiceError {
    let message = message.into();
    move |e| match e {
        StoreError::Conflict(_) => AppError::with_message(code, message).into(),
        other => other.into(),
    }
}

/// Trimmed value of a required text field
pub(crate) fn required_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::required(field));
    }
    Ok(trimmed)
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/api/addNewProduct", post(products::add_new_product))
        .route("/api/deleteProduct/{id}", delete(products::delete_product))
        .route(
            "/api/saveProductCategories",
            post(products::save_product_categories),
        )
        .route("/api/updateStock/{id}", patch(products::update_stock))
        .route("/api/getAllProducts", get(products::get_all_products))
        .route(
            "/api/getProductDetails/{id}",
            get(products::get_product_details),
        )
        .route(
            "/api/getProductCategories/{id}",
            get(products::get_product_categories),
        )
        .route(
            "/api/getProductsByCategory",
            post(products::get_products_by_category),
        )
        .route("/api/searchProducts", get(products::search_products))
        .route(
            "/api/updateProductField",
            post(products::update_product_field),
        )
        .route(
            "/api/getAllHealthMarkings",
            get(products::get_all_health_markings),
        )
        .route("/api/addNewCategory", post(categories::add_new_category))
        .route("/api/getAllCategories", get(categories::get_all_categories))
        .route(
            "/api/deleteCategory/{id}",
            delete(categories::delete_category),
        );

    let bread = Router::new()
        .route("/api/addNewBreadType", post(bread::add_new_bread_type))
        .route("/api/showAllBreadTypes", get(bread::show_all_bread_types))
        .route("/api/deleteBreadType/{id}", delete(bread::delete_bread_type))
        .route("/api/addNewBreadOrder", post(bread::add_new_bread_order))
        .route("/api/getAllBreadOrders", get(bread::get_all_bread_orders))
        .route(
            "/api/setBreadOrderStatus",
            post(bread::set_bread_order_status),
        )
        .route("/api/updateBreadPrice/{id}", post(bread::update_bread_price))
        .route(
            "/api/deleteBreadOrder/{id}",
            delete(bread::delete_bread_order),
        );

    let shop = Router::new()
        .route("/api/addNewProductOrder", post(orders::add_new_product_order))
        .route("/api/getAllProductOrders", get(orders::get_all_product_orders))
        .route(
            "/api/deleteProductOrder/{id}",
            delete(orders::delete_product_order),
        )
        .route("/api/addNewCoupon", post(coupons::add_new_coupon))
        .route("/api/getAllCoupons", get(coupons::get_all_coupons))
        .route("/api/deleteCoupon/{id}", delete(coupons::delete_coupon))
        .route("/api/validateCoupon", post(coupons::validate_coupon));

    let people = Router::new()
        .route("/api/addNewUser", post(users::add_new_user))
        .route("/api/deleteUser/{phone_number}", delete(users::delete_user))
        .route("/api/addAdmin", post(users::add_admin))
        .route("/api/getAllAdmins", get(users::get_all_admins))
        .route("/api/deleteAdmin/{phone_number}", delete(users::delete_admin))
        .route("/api/checkAdmin/{phone_number}", get(users::check_admin))
        .route("/api/sendNotification", post(notify::send_notification))
        .route("/api/addNewNote", post(notes::add_new_note))
        .route("/api/getAllNotes", get(notes::get_all_notes))
        .route("/api/deleteNote/{id}", delete(notes::delete_note));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/checkVersion", get(health::check_version))
        .route("/api/live/ws", get(live_ws::handle_live_ws))
        .merge(catalog)
        .merge(bread)
        .merge(shop)
        .merge(people)
        .merge(image::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
