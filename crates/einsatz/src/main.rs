use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use einsatz::config::Config;
use einsatz::session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Diagnostics go to stderr; stdout carries the operator dialogue.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let path = Config::default_path();
    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, path = %path.display(), "configuration could not be loaded");
            println!("Die Konfiguration konnte nicht geladen werden: {e}");
            return Ok(());
        }
    };
    info!(path = %path.display(), "configuration loaded");

    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut stdout = std::io::stdout();

    // Handled errors still exit 0; the operator already saw the message.
    if let Err(e) = session::run(&config, &mut reader, &mut stdout).await {
        error!(error = %e, "session aborted");
        println!("Die Sitzung wurde mit einem Fehler beendet: {e}");
    }

    Ok(())
}
