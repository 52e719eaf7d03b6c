use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::{info, warn};

mod api;
mod config;
mod projection;
mod render;

use api::AppState;
use config::{Command, Config};
use projection::OddsProjection;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    match config.command {
        Command::Project(args) => {
            let req = args.request();
            info!(
                "Projecting {} from minute {} with odd {:.3} (+{} stoppage)",
                args.market, args.minute, args.odd, args.stoppage
            );
            match OddsProjection::compute(req) {
                Ok(proj) => {
                    print!("{}", render::render(&proj, args.format)?);
                }
                Err(e) => {
                    warn!("Projection rejected ({:?}): {}", e.kind(), e);
                    anyhow::bail!(e);
                }
            }
        }
        Command::Serve(args) => {
            let app = api::router(AppState::default());
            let addr: SocketAddr = args.addr.parse()?;
            info!("Projection API listening on http://{}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
