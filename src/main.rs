use color_eyre::eyre::Result;
use dotenv::dotenv;
use carehive_api::config::ApiConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Wire the scheduling backend and agency directory
    let state = carehive_api::build_state(&config)?;

    // Start API server
    carehive_api::start_server(config, state).await?;

    Ok(())
}
