use clap::{Args, Parser, Subcommand};

use crate::projection::{Market, ProjectionRequest, MAX_STOPPAGE};
use crate::render::OutputFormat;

/// In-play odds decay projector
#[derive(Parser, Debug, Clone)]
#[command(name = "odds-decay", version, about)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Project the odd for every remaining minute and print it
    Project(ProjectArgs),
    /// Serve projections over a JSON HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Market being projected (first-half, second-half, full-time)
    #[arg(long, env = "ODDS_MARKET", default_value = "full-time")]
    pub market: Market,

    /// Current odd (decimal)
    #[arg(long, env = "ODDS_ODD", default_value = "2.5")]
    pub odd: f64,

    /// Current match minute
    #[arg(
        long,
        env = "ODDS_MINUTE",
        default_value = "15",
        value_parser = clap::value_parser!(i32).range(0..=90)
    )]
    pub minute: i32,

    /// Stoppage (added) minutes
    #[arg(
        long,
        env = "ODDS_STOPPAGE",
        default_value = "3",
        value_parser = clap::value_parser!(i32).range(0..=MAX_STOPPAGE as i64)
    )]
    pub stoppage: i32,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// API listen address
    #[arg(long, env = "ODDS_SERVE_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,
}

impl ProjectArgs {
    pub fn request(&self) -> ProjectionRequest {
        ProjectionRequest::for_market(self.market, self.odd, self.minute, self.stoppage)
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        // Projection inputs are checked by `project_odds` itself
        if let Command::Serve(args) = &self.command {
            if args.addr.parse::<std::net::SocketAddr>().is_err() {
                anyhow::bail!("serve address '{}' is not a valid socket address", args.addr);
            }
        }
        Ok(())
    }
}
