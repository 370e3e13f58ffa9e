//! Horario client binary
//!
//! Thin driver around the application context: sign in with credentials
//! from the environment, render the dashboard once, then keep the
//! background refresh loops running until interrupted.

use anyhow::Context as _;
use horario_lib::commands::{dispatch, Action, CommandOutput};
use horario_lib::utils::init_tracing;
use horario_lib::AppContext;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match horario_infra::config::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "falling back to default configuration");
            horario_domain::Config::default()
        }
    };

    let ctx = AppContext::new(config).context("failed to build application context")?;

    let email = std::env::var("HORARIO_EMAIL").ok();
    let password = std::env::var("HORARIO_PASSWORD").ok();
    let (Some(email), Some(password)) = (email, password) else {
        anyhow::bail!("set HORARIO_EMAIL and HORARIO_PASSWORD to sign in");
    };

    let user = ctx
        .login(&email, &password)
        .await
        .context("login failed")?;
    info!(user_id = user.id, role = ?user.role, "signed in");

    match dispatch(&ctx, Action::ShowDashboard).await {
        Ok(CommandOutput::Text(text)) => println!("{text}"),
        Ok(CommandOutput::Silent) => {}
        Err(err) => warn!(error = %err, "dashboard unavailable"),
    }

    info!("polling in background; press Ctrl-C to exit");
    tokio::signal::ctrl_c().await.context("failed to listen for shutdown signal")?;

    ctx.logout().await;
    Ok(())
}
