use tracing_subscriber::EnvFilter;

use rod_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = AppState::from_env()?;
    tracing::debug!(styles = ?state.styles, "loaded configuration");

    lambda_http::run(rod_lambda::app(state))
        .await
        .map_err(|e| eyre::eyre!(e))
}
