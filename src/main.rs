use std::path::PathBuf;

use bus_routes_backend::{app::App, config::Config, telemetry};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "HTTP API for bus routes and stations", long_about = None)]
struct Args {
    /// Path to the YAML config file
    #[arg(short, long, env = "CONFIG_PATH", default_value = "config/local.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .envファイル読み込み
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    // ログ初期化
    telemetry::init(&config.env)?;

    tracing::info!(env = %config.env, "app started");
    tracing::debug!("debug messages are enabled");

    App::new(config).await?.run().await
}
