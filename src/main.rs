use agrisync::Config;
use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,agrisync=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) resolve configuration ────────────────────────────────────
    let config = Config::from_env()?;
    info!(farm = %config.farm, site = %config.site, "configured");

    // ─── 3) sync the monitor snapshot ────────────────────────────────
    agrisync::run(&config).await?;

    info!("all done");
    Ok(())
}
