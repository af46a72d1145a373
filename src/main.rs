// Entry point and initialization lifecycle.
//
// Everything the dashboard serves is computed here, once, before the
// listener binds: build the compiled-in tables, validate them, derive the
// aggregated commodity table, wire the two panel controllers, then serve.
// Any failure in that sequence aborts the process; per-update errors later
// on are handled panel-locally by the HTTP layer.
mod aggregate;
mod datasets;
mod error;
mod output;
mod panel;
mod server;
mod types;
mod util;

use error::DashboardError;
use server::{AppState, ServerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn build_state() -> Result<AppState, DashboardError> {
    let stage_rows = datasets::stage_dataset();
    let commodity_rows = datasets::commodity_dataset();
    datasets::validate(&stage_rows, &commodity_rows)?;
    let aggregated = aggregate::aggregate(&commodity_rows)?;

    println!(
        "Preparing datasets... ({} stage rows, {} commodity rows, {} aggregated groups)\n",
        util::format_int(stage_rows.len() as i64),
        util::format_int(commodity_rows.len() as i64),
        util::format_int(aggregated.len() as i64)
    );
    println!("Food supply stage table (first rows):");
    output::preview_table_rows(&stage_rows, 3);
    println!("Commodity table (first rows):");
    output::preview_table_rows(&commodity_rows, 3);
    println!("Aggregated commodity table (first rows):");
    output::preview_table_rows(&aggregated, 3);

    AppState::new(&stage_rows, &aggregated)
}

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let state = Arc::new(build_state()?);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!(addr = %config.addr(), "food loss dashboard listening");
    axum::serve(listener, server::router(state)).await?;
    Ok(())
}
