// Entry point when running `cargo run -p web-server` directly; the root CLI
// `serve` subcommand is the usual way in.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = configuration::load_config()?;
    web_server::run_server(config).await
}
