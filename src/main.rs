use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use flight_scout::adapters::browser::client::ChromiumRender;
use flight_scout::adapters::diagnostics::snapshot::FileSnapshotSink;
use flight_scout::config::load_config;
use flight_scout::domain::query::FlightQuery;
use flight_scout::session::SearchSession;

fn find_config_path() -> PathBuf {
    // Check the working directory, then next to the binary
    let candidates = [
        PathBuf::from("config.yaml"),
        dirs_next().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn dirs_next() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [origin, destination, depart_date, return_date] = args.as_slice() else {
        bail!("usage: flight-scout <ORIGIN> <DEST> <DEPART:YYYY-MM-DD> <RETURN:YYYY-MM-DD>");
    };
    let query = FlightQuery {
        origin: origin.clone(),
        destination: destination.clone(),
        depart_date: depart_date.clone(),
        return_date: return_date.clone(),
    };

    let config = load_config(&find_config_path())?;
    tracing::info!(headless = config.browser.headless, "starting flight-scout");

    let render = Arc::new(
        ChromiumRender::launch(config.browser)
            .await
            .context("failed to launch browser")?,
    );
    let diagnostics = Arc::new(FileSnapshotSink::new(config.search.snapshot_dir.clone()));
    let session = SearchSession::new(Arc::clone(&render) as _, diagnostics, config.search);

    let records = session.search_outbound(&query).await;
    drop(session);
    println!("{}", serde_json::to_string_pretty(&records)?);

    match Arc::try_unwrap(render) {
        Ok(browser) => browser.shutdown().await,
        Err(_) => tracing::warn!("browser still referenced at exit"),
    }

    Ok(())
}
