pub mod market;
pub mod odds;

pub use market::{Market, RegulationLength};
pub use odds::{project_odds, ErrorKind, ProjectionError, ProjectionPoint, MAX_STOPPAGE};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Inputs for one projection, as gathered from the CLI or an API query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRequest {
    pub starting_odd: f64,
    pub current_minute: i32,
    pub stoppage_minutes: i32,
    pub regulation: RegulationLength,
    /// Market the regulation length was resolved from, if any.
    pub market: Option<Market>,
}

impl ProjectionRequest {
    pub fn for_market(
        market: Market,
        starting_odd: f64,
        current_minute: i32,
        stoppage_minutes: i32,
    ) -> Self {
        ProjectionRequest {
            starting_odd,
            current_minute,
            stoppage_minutes,
            regulation: market.regulation(),
            market: Some(market),
        }
    }
}

/// A computed projection together with the inputs that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct OddsProjection {
    pub market: Option<Market>,
    pub starting_odd: f64,
    pub current_minute: i32,
    pub stoppage_minutes: i32,
    pub regulation_minutes: RegulationLength,
    /// Regulation plus stoppage.
    pub total_minutes: i32,
    /// Odd lost per minute; 0.0 when the clock is already on the final minute.
    pub step: f64,
    pub points: Vec<ProjectionPoint>,
    pub computed_at: DateTime<Utc>,
}

impl OddsProjection {
    pub fn compute(req: ProjectionRequest) -> Result<Self, ProjectionError> {
        let points = project_odds(
            req.starting_odd,
            req.current_minute,
            req.stoppage_minutes,
            req.regulation,
        )?;
        let total_minutes = odds::total_minutes(req.regulation, req.stoppage_minutes)?;
        let step = odds::decay_step(req.starting_odd, total_minutes - req.current_minute);

        Ok(OddsProjection {
            market: req.market,
            starting_odd: req.starting_odd,
            current_minute: req.current_minute,
            stoppage_minutes: req.stoppage_minutes,
            regulation_minutes: req.regulation,
            total_minutes,
            step,
            points,
            computed_at: Utc::now(),
        })
    }

    /// First point carrying the highest odd (always the opening minute for a
    /// well-formed projection).
    pub fn highest_odd(&self) -> Option<&ProjectionPoint> {
        self.points.iter().reduce(|best, p| if p.odd > best.odd { p } else { best })
    }
}
