//! # cropshare_api
//!
//! HTTP layer for CropShare.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use cropshare_core::auth::guard::{AccessGuard, CredentialStore};
use cropshare_core::auth::queries::PgCredentialStore;
use cropshare_core::models::user::Role;

use crate::config::ApiConfig;
use crate::handlers::{admin, auth, home, repo, stock};
use crate::middleware::auth::{require_auth, require_role, RoleGate};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// Per-request authorization checks.
    pub guard: AccessGuard,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// State wired to the PostgreSQL credential store.
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        let store = Arc::new(PgCredentialStore::new(pool.clone()));
        Self::with_store(pool, store, config)
    }

    /// State with an explicit credential store; tests substitute
    /// in-memory fakes here.
    pub fn with_store(
        pool: PgPool,
        store: Arc<dyn CredentialStore>,
        config: ApiConfig,
    ) -> Self {
        let guard = AccessGuard::new(store, config.jwt_secret.clone());
        Self {
            pool,
            guard,
            config,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `cropshare_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    cropshare_core::migrate::migrate(pool).await
}

fn role_gate(state: &AppState, allowed: &'static [Role]) -> RoleGate {
    RoleGate {
        state: state.clone(),
        allowed,
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// Each protected group declares its allowed-role set statically at
/// wiring time; there is no dynamic policy registry.
pub fn router(state: AppState) -> Router {
    // Public routes (no token required)
    let public = Router::new()
        .route("/login", get(auth::show_login).post(auth::handle_login))
        .route(
            "/register",
            get(auth::show_register).post(auth::handle_register),
        )
        .route("/logout", get(auth::logout))
        .route("/refresh-token", get(auth::refresh_token))
        .route("/", get(home::show_home))
        .route("/about", get(home::show_about))
        .route("/messageForm", get(home::show_message_form))
        .route("/submitMessage", post(home::submit_message))
        // Confirmation pages carry no gate of their own; the delete
        // actions they lead to are role-checked.
        .route(
            "/admin/deletePantryConfirmation",
            get(admin::delete_pantry_confirmation),
        )
        .route(
            "/admin/deletePantryManagerConfirmation",
            get(admin::delete_pantry_manager_confirmation),
        )
        .route(
            "/admin/deleteGrowerConfirmation",
            get(admin::delete_grower_confirmation),
        )
        .route(
            "/pantryManager/deletePantryStockItemConfirmation",
            get(stock::delete_confirmation),
        );

    // Any signed-in, non-blocked user
    let authenticated = Router::new()
        .route("/centralRepo", get(repo::load_items))
        .route("/pantriesList", get(home::pantries_list))
        .route("/growersList", get(home::growers_list))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let admin_routes = Router::new()
        .route("/admin", get(admin::show_dashboard))
        .route("/admin/managePantries", get(admin::manage_pantries))
        .route(
            "/admin/managePantriesAndManagers",
            get(admin::manage_pantries_and_managers).post(admin::assign_pantry_to_manager),
        )
        .route(
            "/admin/managePantryManagers",
            get(admin::manage_pantry_managers),
        )
        .route(
            "/admin/createPantry",
            get(admin::show_create_pantry).post(admin::create_pantry),
        )
        .route("/admin/deletePantry", post(admin::delete_pantry))
        .route("/admin/confirmDeletePantry", post(admin::confirm_delete_pantry))
        .route(
            "/admin/createPantryManager",
            get(admin::show_create_pantry_manager).post(admin::create_pantry_manager),
        )
        .route(
            "/admin/deletePantryManager",
            post(admin::delete_pantry_manager),
        )
        .route(
            "/admin/confirmDeletePantryManager",
            post(admin::confirm_delete_pantry_manager),
        )
        .route(
            "/admin/changePantryManagerStatus",
            post(admin::change_pantry_manager_status),
        )
        .route("/admin/manageGrowers", get(admin::manage_growers))
        .route("/admin/deleteGrower", post(admin::delete_grower))
        .route("/admin/confirmDeleteGrower", post(admin::confirm_delete_grower))
        .route("/admin/changeGrowerStatus", post(admin::change_grower_status))
        .route("/admin/messages", get(admin::show_messages))
        .route("/admin/messages/delete/{id}", get(admin::delete_message))
        .layer(axum::middleware::from_fn_with_state(
            role_gate(&state, &[Role::Admin]),
            require_role,
        ));

    let grower_routes = Router::new()
        .route(
            "/addItemToRepo",
            get(repo::show_add_item).post(repo::add_item),
        )
        .layer(axum::middleware::from_fn_with_state(
            role_gate(&state, &[Role::Grower]),
            require_role,
        ));

    let pantry_manager_routes = Router::new()
        .route("/reserveItem/{id}", get(repo::reserve_item))
        .route("/pantryManager", get(stock::load_items))
        .route(
            "/pantryManager/deletePantryStockItem",
            post(stock::delete_item),
        )
        .route(
            "/pantryManager/confirmDeletePantryStockItem",
            post(stock::confirm_delete_item),
        )
        .layer(axum::middleware::from_fn_with_state(
            role_gate(&state, &[Role::PantryManager]),
            require_role,
        ));

    let repo_manager_routes = Router::new()
        .route("/deleteItem/{id}", get(repo::delete_confirmation))
        .route("/deleteItemConfirmed/{id}", get(repo::delete_item))
        .layer(axum::middleware::from_fn_with_state(
            role_gate(&state, &[Role::RepoManager]),
            require_role,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin_routes)
        .merge(grower_routes)
        .merge(pantry_manager_routes)
        .merge(repo_manager_routes)
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not found.") })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
