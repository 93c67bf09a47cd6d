mod app_state;
mod config;
mod database;
mod models;
mod routes;
pub mod external;
pub use app_state::{AppState, Backend};
pub use config::Config;

use crate::routes::make_app;
use dotenv::dotenv;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::init();
    let port = config.port;
    let environment = config.environment.clone();
    let app = make_app(config).await?;
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    println!("{}", "=".repeat(50));
    println!("✓ Servidor escuchando en puerto {port}");
    println!("✓ Ambiente: {environment}");
    println!("{}", "=".repeat(50));
    axum::serve(listener, app).await?;
    Ok(())
}
