//! Route definitions for the Axis Accounting Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes. The state is threaded into the protected routers so
/// the auth middleware verifies tokens against the configured JWT secret.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .route("/auth/login", post(handlers::login))
        // Public storefront reads and contact form
        .route("/products", get(handlers::list_products))
        .route("/projects", get(handlers::list_projects))
        .route("/settings", get(handlers::get_settings))
        .route("/messages", post(handlers::create_message))
        // Protected routes - inventory materials
        .nest("/materials", material_routes(state.clone()))
        // Protected routes - quotes
        .nest("/quotes", quote_routes(state.clone()))
        // Protected routes - expenses
        .nest("/expenses", expense_routes(state.clone()))
        // Protected routes - reports
        .nest("/reports", report_routes(state.clone()))
        // Protected routes - admin area
        .nest("/admin", admin_routes(state))
}

/// Inventory material routes (protected)
fn material_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route("/import", post(handlers::import_material))
        .route(
            "/:material_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Quote routes (protected)
fn quote_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_quotes).post(handlers::save_quote))
        .route("/cancel-by-ref", post(handlers::cancel_quote_by_ref))
        .route("/delete-group", post(handlers::delete_quote_group))
        .route(
            "/:quote_id",
            get(handlers::get_quote).delete(handlers::delete_quote),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Expense routes (protected)
fn expense_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/:expense_id",
            put(handlers::update_expense).delete(handlers::delete_expense),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Report routes (protected)
fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/monthly", get(handlers::monthly_report))
        .route("/monthly/export", get(handlers::export_monthly_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Admin routes for catalog management, the message inbox, and settings
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/products", post(handlers::create_product))
        .route(
            "/products/:product_id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route("/projects", post(handlers::create_project))
        .route(
            "/projects/:project_id",
            put(handlers::update_project).delete(handlers::delete_project),
        )
        .route("/messages", get(handlers::list_messages))
        .route(
            "/messages/:message_id/read",
            post(handlers::mark_message_read),
        )
        .route(
            "/messages/:message_id",
            axum::routing::delete(handlers::delete_message),
        )
        .route("/settings", put(handlers::update_settings))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
