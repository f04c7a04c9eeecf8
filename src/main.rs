mod config;
mod extractors;
mod middleware;
mod models;
mod routes;
mod store;
mod structs;
mod utils;


use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use middleware::{csrf_middleware::csrf_cookie_middleware, logger_middleware::logger_middleware};
use routes::{
    add_comment_route::add_comment_route,
    category_posts_route::category_posts_route,
    create_post_route::create_post_route,
    delete_comment_route::delete_comment_route,
    delete_post_route::delete_post_route,
    edit_comment_route::edit_comment_route,
    edit_post_route::edit_post_route,
    edit_profile_route::edit_profile_route,
    error_pages::{handle_panic, page_not_found},
    index_route::index_route,
    login_route::login_route,
    logout_route::logout_route,
    post_detail_route::post_detail_route,
    profile_route::profile_route,
    register_route::register_route,
};
use store::{postgres::PgStore, BlogStore};

pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub config: Config,
}

pub fn router(app_state: AppState) -> Router {
    let max_upload_bytes = app_state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index_route))
        .route("/posts/create/", get(create_post_route).post(create_post_route))
        .route("/posts/:post_id/", get(post_detail_route))
        .route("/posts/:post_id/edit/", get(edit_post_route).post(edit_post_route))
        .route("/posts/:post_id/delete/", get(delete_post_route).post(delete_post_route))
        .route("/posts/:post_id/comment/", post(add_comment_route))
        .route(
            "/posts/:post_id/edit_comment/:comment_id/",
            get(edit_comment_route).post(edit_comment_route),
        )
        .route(
            "/posts/:post_id/delete_comment/:comment_id/",
            get(delete_comment_route).post(delete_comment_route),
        )
        .route("/category/:category_slug/", get(category_posts_route))
        .route("/profile/:username/", get(profile_route))
        .route("/edit_profile/", get(edit_profile_route).post(edit_profile_route))
        .route("/auth/registration/", get(register_route).post(register_route))
        .route("/auth/login/", get(login_route).post(login_route))
        .route("/auth/logout/", post(logout_route))
        .fallback(page_not_found)
        .layer(axum_middleware::from_fn(csrf_cookie_middleware))
        .layer(axum_middleware::from_fn(logger_middleware))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(Arc::new(app_state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let bind_addr = config.bind_addr;
    let app_state = AppState {
        store: Arc::new(PgStore::new(pool)),
        config,
    };

    info!("Listening on {bind_addr}");
    axum::Server::bind(&bind_addr)
        .serve(router(app_state).into_make_service())
        .await?;

    Ok(())
}
