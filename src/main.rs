//! Boundary Guard - CLI Entry Point
//!
//! Thin presentation driver over the analysis library: parses arguments,
//! runs one analysis, and prints the resulting session state as JSON.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use boundary_guard::state::AppState;
use boundary_guard::SessionState;
use boundary_guard_core::{Language, Perspective};

#[derive(Debug, Parser)]
#[command(
    name = "boundary-guard",
    version,
    about = "Analyze a message for manipulative communication patterns"
)]
struct Cli {
    /// The message text to analyze
    text: String,

    /// Whether the text was received by you or written by you
    #[arg(long, value_enum, default_value = "received")]
    perspective: PerspectiveArg,

    /// Output language for the verdict (defaults to the configured language)
    #[arg(long, value_enum)]
    language: Option<LanguageArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PerspectiveArg {
    Received,
    Spoken,
}

impl From<PerspectiveArg> for Perspective {
    fn from(arg: PerspectiveArg) -> Self {
        match arg {
            PerspectiveArg::Received => Perspective::Received,
            PerspectiveArg::Spoken => Perspective::SpokenByUser,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LanguageArg {
    En,
    Zh,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Zh => Language::Zh,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BOUNDARY_GUARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("boundary_guard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let app = AppState::new();
    app.initialize().await?;

    let language = match cli.language {
        Some(arg) => arg.into(),
        None => app.get_config().await?.default_language,
    };

    let service = app.analysis().await?;
    let state = service
        .request_analysis(&cli.text, cli.perspective.into(), language)
        .await;

    println!("{}", serde_json::to_string_pretty(&state)?);

    if let SessionState::Result { report, .. } = &state {
        let categories = report
            .categories
            .iter()
            .map(|c| c.label(language))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            risk_score = report.risk_score,
            band = report.band().label(language),
            %categories,
            "analysis complete"
        );
    }

    if matches!(state, SessionState::Failed { .. }) {
        std::process::exit(1);
    }
    Ok(())
}
