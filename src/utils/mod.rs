use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub mod timefmt;

pub fn init_tracing(debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    // On Windows, disable ANSI colors to avoid garbage characters in console
    #[cfg(target_os = "windows")]
    let use_ansi = false;

    #[cfg(not(target_os = "windows"))]
    let use_ansi = true;

    let default_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(default_level.into())
                    .from_env_lossy(),
            )
            .with_ansi(use_ansi)
            .with_line_number(true)
            .with_file(true)
            .finish(),
    )?;
    tracing::debug!("Debug logging enabled");
    Ok(())
}
