use clap::Parser;
use statusboard::{config, driver, utils};

/// Personal status dashboard backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log at DEBUG level unless RUST_LOG says otherwise
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = utils::init_tracing(args.debug) {
        eprintln!("Failed to initialize logging: {}", e);
        return;
    }

    let cfg = config::load_or_default(&args.config);
    tracing::info!("Starting statusboard on: {}", cfg.http.listen_addr);

    if let Err(e) = driver::start(cfg).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
