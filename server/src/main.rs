//! Serves the configured PostgreSQL schema over HTTP.
//!
//! Run from repo root: `cargo run -p arrest-server`

use arrest::actions::example;
use arrest::{app, introspect, load_config, ActionRegistry, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("arrest=info,arrest_server=info")),
        )
        .init();

    let config = load_config()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let catalog = match introspect(&pool, &config.schema).await {
        Ok(catalog) => catalog.with_overrides(&config.table_index)?,
        Err(e) => {
            tracing::error!(error = %e, schema = %config.schema, "schema introspection failed");
            return Err(e.into());
        }
    };
    tracing::info!(schema = %config.schema, tables = catalog.len(), "schema catalog loaded");

    let actions = ActionRegistry::new().register(example::NAME, example::module());
    let bind = config.bind.clone();
    let state = AppState::new(Arc::new(pool), catalog, config, actions);

    let listener = TcpListener::bind(&bind).await?;
    tracing::info!("arrest listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
