//! Counter-backed alias generator service.
//!
//! Serves `GET /alias`, returning the base-62 encoding of a counter that is
//! incremented atomically in the database. Any number of instances may share
//! one PostgreSQL counter without handing out duplicate aliases.
//!
//! # Environment Variables
//!
//! - `COUNTER_DATABASE_URL` (required): `postgres://...` or `sqlite:...`
//! - `LISTEN`: bind address (default: `0.0.0.0:8081`)

use anyhow::Result;
use shortener::config::CounterServiceConfig;
use shortener::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = CounterServiceConfig::from_env()?;
    config.validate()?;

    server::init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    server::run_alias_service(config).await
}
