use clap::Parser;
use tracing::warn;

use spicyzone::config::{Config, FlatConfig};
use spicyzone::http::{self, ApiContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config: Config = FlatConfig::parse().into();
    if config.auth.uses_default_secret() {
        warn!("default passwords are in use; set USER_PASSWORD and ADMIN_PASSWORD in production");
    }

    http::serve(ApiContext::new(config)).await
}
