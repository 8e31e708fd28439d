mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState, ContactState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = fmdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = fmdb_db::PoolConfig::from_app_config(&config);
    let pool = fmdb_db::connect_pool(&config.database_url, pool_config).await?;
    fmdb_db::run_migrations(&pool).await?;

    let mailer = match config.mail_api_url {
        Some(ref url) => Some(Arc::new(fmdb_mailer::MailerClient::new(
            url,
            config.mail_api_token.as_deref(),
            config.mail_request_timeout_secs,
        )?)),
        None => {
            tracing::warn!("FMDB_MAIL_API_URL not set; contact submissions will only be logged");
            None
        }
    };
    let contact = ContactState {
        mailer,
        sender: config.contact_sender.clone(),
        recipient: config.contact_recipient.clone(),
    };

    let auth = AuthState::from_env(matches!(config.env, fmdb_core::Environment::Development))?;
    let app = build_app(AppState { pool, contact }, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "fmdb-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
