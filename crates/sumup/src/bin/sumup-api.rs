use anyhow::Context;
use clap::Parser;

use sumup::{
    api::router, config::Config, huggingface::HuggingFaceClient,
    tracing::init_tracing_subscriber, yt::transcript::YtTranscriptClient, VideoSummarizerBuilder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let config = Config::parse();
    init_tracing_subscriber()?;

    let transcript_client =
        YtTranscriptClient::new(&config.transcript_lang, config.request_timeout())
            .context("Failed to build transcript client")?;

    //XXX: handles both summarization and grammar correction; hence the clone
    let hf_client = HuggingFaceClient::new(
        &config.api_key,
        config.request_timeout(),
        config.max_retries,
    )
    .context("Failed to build inference client")?
    .with_base_url(&config.inference_base_url);

    let pipeline = VideoSummarizerBuilder::new()
        .transcript_source(transcript_client)
        .summarizer(hf_client.clone())
        .grammar_checker(hf_client)
        .default_check_grammar(config.default_check_grammar)
        .build();

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
