pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod relay;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::intake::OrderIntakeService;
use config::TwilioConfig;
use errors::AppError;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Shared per-worker state handed to `build_server`.
#[derive(Clone)]
pub struct AppContext {
    pub intake: Arc<OrderIntakeService>,
    pub twilio: Option<TwilioConfig>,
    pub http: reqwest::Client,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::orders::create_order, handlers::notify::notify_kitchen),
    components(schemas(
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderItemRequest,
        handlers::orders::CreateOrderResponse,
        handlers::orders::OrderSummary,
        handlers::notify::NotifyRequest,
        handlers::notify::NotifyItemRequest,
        handlers::notify::NotifyResponse,
        domain::order::DeliveryType,
    )),
    tags(
        (name = "orders", description = "Order intake"),
        (name = "notify", description = "Kitchen notification relay"),
    )
)]
struct ApiDoc;

/// Malformed bodies get the same structured shape as every other error
/// instead of actix's default plain-text response.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::error!("Invalid JSON body: {err}");
        AppError::BadRequest("Invalid request body".to_string()).into()
    })
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    ctx: AppContext,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(ctx.intake.clone()))
            .app_data(web::Data::new(ctx.twilio.clone()))
            .app_data(web::Data::new(ctx.http.clone()))
            .app_data(json_config())
            .wrap(Logger::default())
            .service(web::scope("/orders").route("", web::post().to(handlers::orders::create_order)))
            .service(web::resource("/notify").route(web::post().to(handlers::notify::notify_kitchen)))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
