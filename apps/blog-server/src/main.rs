//! # Folio Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, middleware::from_fn, web};
use clap::{Parser, Subcommand};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[derive(Parser, Debug)]
#[command(name = "blog-server", version, about = "Folio blog API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (the default)
    Serve,
    /// Read a password from stdin and print its Argon2 hash for ADMIN_PASSWORD_HASH
    HashPassword,
}

fn main() -> std::io::Result<()> {
    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => actix_web::rt::System::new().block_on(serve()),
        Command::HashPassword => hash_password(),
    }
}

async fn serve() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Folio blog server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors::default_headers())
            .wrap(from_fn(observability::request_id))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(feature = "auth")]
fn hash_password() -> std::io::Result<()> {
    use folio_core::ports::PasswordService;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);

    let hash = folio_infra::Argon2PasswordService::new()
        .hash(password)
        .map_err(std::io::Error::other)?;

    println!("{hash}");
    Ok(())
}

#[cfg(not(feature = "auth"))]
fn hash_password() -> std::io::Result<()> {
    Err(std::io::Error::other(
        "blog-server was built without the `auth` feature",
    ))
}
