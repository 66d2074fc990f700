use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use order_intake::application::intake::OrderIntakeService;
use order_intake::config::{PricingConfig, RateLimitConfig, TwilioConfig};
use order_intake::infrastructure::order_repo::DieselOrderRepository;
use order_intake::{build_server, create_pool, run_migrations, AppContext};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    let twilio = TwilioConfig::from_env();
    if twilio.is_none() {
        log::warn!("Twilio configuration incomplete; /notify will answer with a configuration error");
    }

    let intake = Arc::new(OrderIntakeService::new(
        Arc::new(DieselOrderRepository::new(pool)),
        PricingConfig::from_env(),
        RateLimitConfig::from_env(),
    ));

    let ctx = AppContext {
        intake,
        twilio,
        http: reqwest::Client::new(),
    };

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(ctx, &host, port)?.await
}
