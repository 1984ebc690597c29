use sea_orm::{Database, DatabaseConnection};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use rust_libaas::api::create_api_router;
use rust_libaas::cart::CartStore;
use rust_libaas::checkout::HandoffConfig;
use rust_libaas::entities::{primary_setup, setup_schema};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to the database");
    setup_schema(&db).await;

    let shared_db = Arc::new(db);

    primary_setup(shared_db.clone()).await;

    let cart_path = PathBuf::from(
        std::env::var("CART_STATE_PATH").unwrap_or_else(|_| "cart.json".to_string()),
    );
    let cart_store = match CartStore::load(cart_path.clone()) {
        Ok(store) => store,
        Err(err) => {
            warn!(error = %err, path = %cart_path.display(), "Starting with an empty cart");
            CartStore::new()
        }
    };
    let cart = Arc::new(tokio::sync::Mutex::new(cart_store));

    let app = create_api_router(shared_db, cart, HandoffConfig::from_env());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Running at {:?}", listener);
    axum::serve(listener, app).await.expect("Server exited");
}
