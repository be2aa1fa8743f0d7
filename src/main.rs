use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Fails silently if no .env is present; CI and container deployments
    // pass configuration purely through the real environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    cli::run().await
}
