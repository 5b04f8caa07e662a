use std::sync::Arc;

use clap::Parser;

use calcprep::db::Db;
use calcprep::generate::{ChatBackend, GeneratorPool, TextGenerator};
use calcprep::{names, router, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// libSQL server address
    #[clap(env)]
    url: String,

    /// libSQL authentication token.
    #[clap(env, default_value = "")]
    auth_token: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Primary generator: base URL of an OpenAI-compatible API.
    #[arg(long, env, default_value = "https://api.openai.com/v1")]
    primary_api_base: String,

    #[arg(long, env, default_value = "")]
    primary_api_key: String,

    #[arg(long, env, default_value = "gpt-4o-mini")]
    primary_model: String,

    /// Secondary generator; a different provider keeps the question pool
    /// provenance-diverse.
    #[arg(long, env, default_value = "https://api.groq.com/openai/v1")]
    secondary_api_base: String,

    #[arg(long, env, default_value = "")]
    secondary_api_key: String,

    #[arg(long, env, default_value = "llama-3.3-70b-versatile")]
    secondary_model: String,

    /// Optional specialist model (served from the primary API base). When
    /// set, each enhancement run adds one extra exam-style question from it.
    #[arg(long, env)]
    specialist_model: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,calcprep=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(args.url, args.auth_token).await?;

    let client = reqwest::Client::new();
    let primary: Arc<dyn TextGenerator> = Arc::new(ChatBackend::new(
        args.primary_model.clone(),
        args.primary_api_base.clone(),
        args.primary_api_key.clone(),
        args.primary_model,
        client.clone(),
    ));
    let secondary: Arc<dyn TextGenerator> = Arc::new(ChatBackend::new(
        args.secondary_model.clone(),
        args.secondary_api_base,
        args.secondary_api_key,
        args.secondary_model,
        client.clone(),
    ));
    let specialist: Option<Arc<dyn TextGenerator>> = args.specialist_model.map(|model| {
        Arc::new(ChatBackend::new(
            model.clone(),
            args.primary_api_base,
            args.primary_api_key,
            model,
            client,
        )) as Arc<dyn TextGenerator>
    });

    let generators = GeneratorPool::new(primary, secondary, specialist);
    let state = AppState { db, generators };

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("calcprep {} listening on {}", names::VERSION, args.address);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
