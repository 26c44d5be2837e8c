//! `paypal-ipn` - Verifies one IPN body read from stdin.
//!
//! Prints the outcome as JSON on stdout and exits non-zero unless the
//! gateway answered `VERIFIED`. Diagnostics go to stderr.

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use paypal_standard::adapters::{FileIpnLog, ReqwestPostback};
use paypal_standard::application::{VerifyNotificationCommand, VerifyNotificationHandler};
use paypal_standard::config::{AppConfig, LoggingConfig};
use paypal_standard::domain::notification::IpnMessage;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("paypal-ipn: {err}");
            ExitCode::from(2)
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.logging);
    info!("paypal-ipn v{}", env!("CARGO_PKG_VERSION"));

    let postback = ReqwestPostback::new(config.gateway.postback_url(), config.gateway.timeout())?;
    let mut handler = VerifyNotificationHandler::new(Arc::new(postback));
    if let Some(dir) = &config.logging.ipn_log_dir {
        handler = handler.with_log(Arc::new(FileIpnLog::new(dir)?));
    }

    let mut body = Vec::new();
    tokio::io::stdin().read_to_end(&mut body).await?;
    let message = IpnMessage::from_form_body(&body);

    let outcome = handler.handle(VerifyNotificationCommand::new(message)).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(if outcome.is_verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let json_layer = logging
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!logging.json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(filter)
        .init();
}
