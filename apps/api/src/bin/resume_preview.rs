//! Fetches one template from a running résumé service and saves the PDF.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_api::preview::{
    DirectorySaver, HttpResumeFetcher, MemoryBlobStore, PreviewSession, PreviewState,
};
use resume_api::templates::TemplateKey;

/// Preview and download a generated résumé PDF
#[derive(Parser)]
#[command(name = "resume-preview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the résumé service
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Template to render (modern, creative, classic); unknown values use modern
    #[arg(short, long, default_value = "modern")]
    template: String,

    /// Person name used for the downloaded file name
    #[arg(short, long, default_value = "Jordan Avery")]
    person: String,

    /// Directory the PDF is saved into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_PKG_NAME").replace('-', "_")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let template = TemplateKey::resolve(Some(&cli.template));
    let fetcher = HttpResumeFetcher::new(cli.base_url.as_str())?;
    let store = Arc::new(MemoryBlobStore::new());
    let mut session = PreviewSession::new(store, cli.person, template);

    info!("Requesting {}", fetcher.resume_url(template));
    session.load(&fetcher).await;

    match session.state() {
        PreviewState::Ready => {
            let path = session.download(&DirectorySaver::new(cli.out_dir))?;
            println!("{}", path.display());
            Ok(())
        }
        PreviewState::Error { message } => bail!("Preview failed: {message}"),
        PreviewState::Idle | PreviewState::Loading => bail!("Preview did not complete"),
    }
}
