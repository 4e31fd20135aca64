use std::sync::Arc;

use log::{error, info};

use heyai::{CompletionClient, RelayConfig};

#[tokio::main]
async fn main()
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = match RelayConfig::from_env()
    {   Ok(c) => c
      , Err(e) => {
          error!("Configuration error: {}", e);
          std::process::exit(1);
        }
    };

    let client = match CompletionClient::new(config.yandex.clone())
    {   Ok(c) => Arc::new(c)
      , Err(e) => {
          error!("Failed to create completion client: {}", e);
          std::process::exit(1);
        }
    };

    info!("Relaying to {}", config.yandex.model_uri());
    heyai::telegram::run(&config.telegram, client).await;
}
