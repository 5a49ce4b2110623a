use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use migration::MigratorTrait;
use mwork_backend::auth::jwks::JwksCache;
use mwork_backend::config::Config;
use mwork_backend::create_pool;
use mwork_backend::events::{DbEventSink, EventSink};
use mwork_backend::handlers;
use mwork_backend::payments::{PayChanguClient, PaymentGateway};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::from_env();

    let db = create_pool(&config.database_url).await;
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    let db_data = web::Data::new(db.clone());

    let jwks_cache = web::Data::new(Arc::new(JwksCache::new(&config.clerk_jwks_url)));

    let gateway: Arc<dyn PaymentGateway> = Arc::new(PayChanguClient::new(
        &config.paychangu_base_url,
        &config.paychangu_api_key,
    ));
    let gateway_data = web::Data::new(gateway);

    // Audit/event sink: fire-and-forget appends to audit_logs.
    let sink: Arc<dyn EventSink> = Arc::new(DbEventSink::new(db));
    let sink_data = web::Data::new(sink);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(jwks_cache.clone())
            .app_data(gateway_data.clone())
            .app_data(sink_data.clone())
            .app_data(config_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
