use std::time::Duration;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "kayd={level},telegram_bot={level},engine={level},store={level},health={level}",
            level = settings.app.level
        ))
        .init();

    {
        let health = settings.health;
        tasks.spawn(async move {
            let bind = health
                .as_ref()
                .and_then(|h| h.bind.clone())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            let port = health.as_ref().and_then(|h| h.port).unwrap_or(8000);
            let addr = format!("{bind}:{port}");

            let listener = match tokio::net::TcpListener::bind(&addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind health listener on {addr}: {err}");
                    return;
                }
            };
            if let Err(err) = health::run_with_listener(listener).await {
                tracing::error!("health listener failed: {err}");
            }
        });
    }

    {
        let telegram = settings.telegram;
        let store = settings.store;
        let tiers = settings.tiers;
        tasks.spawn(async move {
            tracing::info!("Found telegram settings...");
            let mut builder = telegram_bot::Bot::builder()
                .token(&telegram.token)
                .store(&store.url);
            if let Some(secs) = store.timeout_secs {
                builder = builder.store_timeout(Duration::from_secs(secs));
            }
            if let Some(ids) = telegram.allowed_users {
                builder = builder.allowed_users(ids);
            }
            if let Some(warn) = telegram.warn_unpersisted {
                builder = builder.warn_unpersisted(warn);
            }
            if let Some(tiers) = tiers {
                builder = builder.tiers(tiers);
            }

            match builder.build() {
                Ok(bot) => bot.run().await,
                Err(err) => tracing::error!("failed to initialize telegram bot: {err}"),
            }
        });
    }

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}
