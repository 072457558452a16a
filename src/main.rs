use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use reqwest::Client;
use shorts_uploader::{
    config::Config,
    routes,
    services::{
        oauth::google::{client::GoogleOAuthClient, service::GoogleOAuthService},
        youtube::client::YouTubeClient,
    },
    AppState,
};
use tokio::net::TcpListener;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "tls")]
use axum_server::tls_rustls::RustlsConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(sentry_tracing::layer());

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Error reporting is only active when a DSN is configured.
    let _sentry = std::env::var("SENTRY_DSN")
        .ok()
        .filter(|dsn| !dsn.trim().is_empty())
        .map(|dsn| {
            sentry::init((
                dsn,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    ..Default::default()
                },
            ))
        });

    init_tracing();

    let config = Arc::new(Config::from_env());
    if config.google.client_id.is_none() || config.google.client_secret.is_none() {
        warn!("GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET not set; auth and upload will fail");
    } else if config.google.refresh_token.is_none() {
        warn!("GOOGLE_REFRESH_TOKEN not set; visit /api/auth to obtain one");
    }

    // Stricter limiter for /api/auth/*
    let auth_governor_conf = routes::auth_rate_limit(&config.rate_limit)?;

    let governor_limiter = auth_governor_conf.limiter().clone();
    std::thread::spawn(move || {
        let interval = std::time::Duration::from_secs(60);
        loop {
            std::thread::sleep(interval);
            governor_limiter.retain_recent();
        }
    });

    let http_client = Client::new();
    let google_oauth: Arc<dyn GoogleOAuthService> = Arc::new(GoogleOAuthClient::new(
        http_client.clone(),
        &config.endpoints,
    ));
    let youtube = Arc::new(YouTubeClient::new(
        http_client,
        google_oauth.clone(),
        &config.endpoints.upload_url,
    ));

    let state = AppState {
        config: config.clone(),
        google_oauth,
        youtube,
    };

    let app = routes::router_with(state, |auth| {
        auth.layer(GovernorLayer {
            config: auth_governor_conf,
        })
    })
    .layer(TraceLayer::new_for_http());

    let app = match &config.frontend_origin {
        Some(origin) => app.layer(
            CorsLayer::new()
                .allow_origin(
                    origin
                        .parse::<HeaderValue>()
                        .context("FRONTEND_ORIGIN is not a valid header value")?,
                )
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE]),
        ),
        None => app,
    };

    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    let addr = config.bind_addr;

    #[cfg(feature = "tls")]
    {
        if let (Ok(cert), Ok(key)) = (
            std::env::var("DEV_CERT_LOCATION"),
            std::env::var("DEV_KEY_LOCATION"),
        ) {
            let tls_config = RustlsConfig::from_pem_file(cert, key)
                .await
                .context("failed to load TLS certs")?;

            info!(%addr, "listening with TLS");
            axum_server::bind_rustls(addr, tls_config)
                .serve(make_service)
                .await?;
            return Ok(());
        }
        warn!("tls feature enabled but DEV_CERT_LOCATION / DEV_KEY_LOCATION unset");
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening without TLS");
    axum::serve(listener, make_service).await?;

    Ok(())
}
