use actix_web::{web, App, HttpServer};
use reviewbox::{configure, AppState, Config, ServiceError};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> Result<(), ServiceError> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    info!("Starting review service with {} storage", config.storage);

    // Open the store (and mirror) before accepting connections
    let state = web::Data::new(AppState::bootstrap(&config).await?);

    let max_body_bytes = config.max_body_bytes;
    let address = config.bind_address();

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure(max_body_bytes))
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers.get());
    }

    let server = server.bind(&address)?;
    info!("Server is running on http://{}", address);
    server.run().await?;

    info!("Server shut down");
    Ok(())
}
