use homework_notifier::{
    build_poller,
    config::{Config, LogSettings},
    logging,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(&LogSettings::from_env()?)?;

    let config = Config::from_env().map_err(|e| {
        tracing::error!(critical = true, "{}", e);
        e
    })?;
    config.check_tokens()?;

    let mut poller = build_poller(&config)?;
    info!("Sending notifications to chat {}", config.credentials.telegram_chat_id);

    poller
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}
