use std::time::Duration;

use clap::Parser;
use topic_trivia::{names, services::generation::GenerationConfig, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:5000")]
    address: String,

    /// OpenAI API key. Without it only the fallback questions are served.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Chat model used for question generation.
    #[arg(long, env = "OPENAI_MODEL", default_value = names::DEFAULT_OPENAI_MODEL)]
    openai_model: String,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = names::DEFAULT_OPENAI_BASE_URL)]
    openai_base_url: String,

    /// Seconds to wait for the provider before serving fallback questions.
    #[arg(long, env, default_value_t = names::DEFAULT_GENERATION_TIMEOUT_SECS)]
    generation_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tower_http=info,axum=info,topic_trivia=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let generation = GenerationConfig::new(args.openai_api_key)
        .with_model(args.openai_model)
        .with_base_url(args.openai_base_url)
        .with_timeout(Duration::from_secs(args.generation_timeout_secs));

    if generation.is_configured() {
        tracing::info!("question generation enabled using {}", generation.model);
    } else {
        tracing::warn!("OpenAI API key not configured, using fallback questions");
    }

    let app = topic_trivia::router(AppState::new(generation));

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}
