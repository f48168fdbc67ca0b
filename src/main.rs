use anyhow::Result;
use codegate_core::application::{
    ports::{
        audit::AuditSink, replay::ReplayGuard, scopes::ScopeAuthority, security::TokenSigner,
        session::SessionValidator, time::Clock,
    },
    services::AuthorityServices,
};
use codegate_core::config::AppConfig;
use codegate_core::infrastructure::{
    audit::TracingAuditSink,
    security::{hmac::HmacTokenSigner, redis_replay_guard::RedisReplayGuard},
    time::SystemClock,
    upstream::{scopes::HttpScopeAuthority, session::HttpSessionValidator},
};
use codegate_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let signer: Arc<dyn TokenSigner> = Arc::new(HmacTokenSigner::new(
        config.code_signing_secret(),
        config.access_signing_secret(),
        config.refresh_signing_secret(),
    ));
    let replay_guard: Arc<dyn ReplayGuard> =
        Arc::new(RedisReplayGuard::from_url(config.redis_url())?);
    let session_validator: Arc<dyn SessionValidator> = Arc::new(HttpSessionValidator::new(
        config.session_validator_url(),
        config.session_validator_api_key().map(ToString::to_string),
        config.upstream_timeout(),
    )?);
    let scope_authority: Arc<dyn ScopeAuthority> = Arc::new(HttpScopeAuthority::new(
        config.scope_authority_url(),
        config.upstream_timeout(),
    )?);
    let audit_sink: Arc<dyn AuditSink> = Arc::new(TracingAuditSink);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(AuthorityServices::new(
        signer,
        replay_guard,
        session_validator,
        scope_authority,
        audit_sink,
        clock,
        config.token_ttls(),
    ));

    let state = HttpState { services };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
