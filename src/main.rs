use tracing::error;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = edugate::server::run_server().await {
        error!("Gateway failed: {}", err);
        std::process::exit(1);
    }
}
