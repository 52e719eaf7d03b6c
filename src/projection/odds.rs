//! Linear in-play odds decay.
//!
//! A live odd on "nothing more happens" drifts toward breakeven (1.0) as the
//! clock runs out. This module projects that drift minute by minute, assuming
//! a straight line from the current odd down to 1.0 at the final whistle
//! (regulation plus stoppage).

use serde::Serialize;
use thiserror::Error;

use super::market::RegulationLength;

/// Smallest starting odd accepted for a projection.
pub const MIN_ODD: f64 = 1.01;

/// Longest stoppage accepted; keeps a projection within 106 points.
pub const MAX_STOPPAGE: i32 = 15;

/// Breakeven odd; every projection converges here at full time.
const FLOOR_ODD: f64 = 1.0;

/// One projected minute of the match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    /// Match-clock minute; runs past the regulation length during stoppage.
    pub minute: i32,
    /// Minutes left until the final whistle, stoppage included.
    pub minutes_remaining: i32,
    /// Projected odd at this minute (never below 1.0).
    pub odd: f64,
}

/// Broad class of a projection failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The current minute lies beyond the end of the match.
    Range,
    /// An input violates its own domain.
    Validation,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error(
        "current minute {current_minute} is past the end of the match ({total_minutes} minutes including stoppage)"
    )]
    InvalidRange {
        current_minute: i32,
        total_minutes: i32,
    },

    #[error("odd {odd} is below the minimum of {min}")]
    OddBelowMinimum { odd: f64, min: f64 },

    #[error("odd must be a finite number, got {0}")]
    NonFiniteOdd(f64),

    #[error("current minute cannot be negative, got {0}")]
    NegativeMinute(i32),

    #[error("stoppage minutes cannot be negative, got {0}")]
    NegativeStoppage(i32),

    #[error("stoppage minutes cannot exceed {max}, got {stoppage}")]
    StoppageTooLong { stoppage: i32, max: i32 },

    #[error("regulation length must be 45 or 90 minutes, got {0}")]
    UnsupportedRegulation(i32),
}

impl ProjectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectionError::InvalidRange { .. } => ErrorKind::Range,
            _ => ErrorKind::Validation,
        }
    }
}

/// Reject inputs outside their domain before any arithmetic happens.
fn validate_inputs(
    starting_odd: f64,
    current_minute: i32,
    stoppage_minutes: i32,
) -> Result<(), ProjectionError> {
    if !starting_odd.is_finite() {
        return Err(ProjectionError::NonFiniteOdd(starting_odd));
    }
    if starting_odd < MIN_ODD {
        return Err(ProjectionError::OddBelowMinimum {
            odd: starting_odd,
            min: MIN_ODD,
        });
    }
    if current_minute < 0 {
        return Err(ProjectionError::NegativeMinute(current_minute));
    }
    if stoppage_minutes < 0 {
        return Err(ProjectionError::NegativeStoppage(stoppage_minutes));
    }
    if stoppage_minutes > MAX_STOPPAGE {
        return Err(ProjectionError::StoppageTooLong {
            stoppage: stoppage_minutes,
            max: MAX_STOPPAGE,
        });
    }
    Ok(())
}

/// Project the odd for every remaining minute of the match.
///
/// The odd falls by `(starting_odd - 1) / remaining` each minute, starting at
/// `current_minute` and reaching exactly 1.0 at `regulation + stoppage`. The
/// result holds `remaining + 1` points, or a single `(current_minute, 1.0)`
/// point when the clock already sits on the final minute.
///
/// # Errors
/// * [`ProjectionError::InvalidRange`] when `current_minute` is past the end
///   of the match.
/// * A validation variant when the odd is non-finite or below [`MIN_ODD`], or
///   either minute count is negative, or stoppage exceeds [`MAX_STOPPAGE`].
pub fn project_odds(
    starting_odd: f64,
    current_minute: i32,
    stoppage_minutes: i32,
    regulation: RegulationLength,
) -> Result<Vec<ProjectionPoint>, ProjectionError> {
    validate_inputs(starting_odd, current_minute, stoppage_minutes)?;

    let total_minutes = total_minutes(regulation, stoppage_minutes)?;
    let remaining = total_minutes - current_minute;

    if remaining < 0 {
        return Err(ProjectionError::InvalidRange {
            current_minute,
            total_minutes,
        });
    }

    if remaining == 0 {
        return Ok(vec![ProjectionPoint {
            minute: current_minute,
            minutes_remaining: 0,
            odd: FLOOR_ODD,
        }]);
    }

    let step = decay_step(starting_odd, remaining);

    let points = (0..=remaining)
        .map(|i| {
            // Pin the last minute so rounding in `step * i` cannot leave it a hair off 1.0
            let odd = if i == remaining {
                FLOOR_ODD
            } else {
                (starting_odd - step * i as f64).max(FLOOR_ODD)
            };
            ProjectionPoint {
                minute: current_minute + i,
                minutes_remaining: remaining - i,
                odd,
            }
        })
        .collect();

    Ok(points)
}

/// Final minute of the match, regulation plus stoppage.
pub fn total_minutes(
    regulation: RegulationLength,
    stoppage_minutes: i32,
) -> Result<i32, ProjectionError> {
    regulation
        .minutes()
        .checked_add(stoppage_minutes)
        .ok_or(ProjectionError::StoppageTooLong {
            stoppage: stoppage_minutes,
            max: MAX_STOPPAGE,
        })
}

/// Per-minute decrement used by [`project_odds`]; 0.0 when no minutes remain.
pub fn decay_step(starting_odd: f64, remaining_minutes: i32) -> f64 {
    if remaining_minutes <= 0 {
        return 0.0;
    }
    (starting_odd - FLOOR_ODD) / remaining_minutes as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_non_increasing(points: &[ProjectionPoint]) {
        for pair in points.windows(2) {
            assert!(
                pair[0].odd >= pair[1].odd,
                "odd rose from {} to {} at minute {}",
                pair[0].odd,
                pair[1].odd,
                pair[1].minute
            );
        }
    }

    #[test]
    fn test_first_half_with_stoppage() {
        let points = project_odds(2.5, 15, 3, RegulationLength::Half).unwrap();
        // 48 - 15 = 33 remaining minutes → 34 points
        assert_eq!(points.len(), 34);
        assert_eq!(points[0].minute, 15);
        assert_eq!(points[0].odd, 2.5);
        let last = points.last().unwrap();
        assert_eq!(last.minute, 48);
        assert_eq!(last.minutes_remaining, 0);
        assert_relative_eq!(last.odd, 1.0, epsilon = 1e-12);
        for pair in points.windows(2) {
            assert!(pair[0].odd > pair[1].odd);
        }
    }

    #[test]
    fn test_full_time_with_stoppage() {
        let points = project_odds(2.5, 15, 3, RegulationLength::Full).unwrap();
        assert_eq!(points.len(), 79);
        assert_eq!((points[0].minute, points[0].odd), (15, 2.5));
        let last = points.last().unwrap();
        assert_eq!(last.minute, 93);
        assert_relative_eq!(last.odd, 1.0, epsilon = 1e-12);
        assert_non_increasing(&points);
    }

    #[test]
    fn test_minute_past_end_is_range_error() {
        let err = project_odds(1.5, 48, 0, RegulationLength::Half).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::InvalidRange {
                current_minute: 48,
                total_minutes: 45
            }
        );
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_minute_on_final_whistle_yields_single_point() {
        let points = project_odds(3.0, 48, 3, RegulationLength::Half).unwrap();
        assert_eq!(
            points,
            vec![ProjectionPoint {
                minute: 48,
                minutes_remaining: 0,
                odd: 1.0
            }]
        );
    }

    #[test]
    fn test_minimum_odd_never_dips_below_one() {
        let points = project_odds(1.01, 0, 0, RegulationLength::Half).unwrap();
        assert_eq!(points.len(), 46);
        assert_eq!(points[0].odd, 1.01);
        assert_relative_eq!(points[45].odd, 1.0, epsilon = 1e-12);
        assert!(points.iter().all(|p| p.odd >= 1.0));
        assert_non_increasing(&points);
    }

    #[test]
    fn test_length_matches_remaining_minutes() {
        for minute in [0, 10, 44, 45, 60, 89] {
            for stoppage in [0, 3, 7, 15] {
                let points = project_odds(4.2, minute, stoppage, RegulationLength::Full).unwrap();
                assert_eq!(points.len() as i32, 90 + stoppage - minute + 1);
                assert_eq!(points[0].odd, 4.2);
                assert_eq!(points.last().unwrap().odd, 1.0);
                assert_non_increasing(&points);
            }
        }
    }

    #[test]
    fn test_minutes_remaining_counts_down() {
        let points = project_odds(2.0, 40, 2, RegulationLength::Half).unwrap();
        let remaining: Vec<i32> = points.iter().map(|p| p.minutes_remaining).collect();
        assert_eq!(remaining, vec![7, 6, 5, 4, 3, 2, 1, 0]);
        let minutes: Vec<i32> = points.iter().map(|p| p.minute).collect();
        assert_eq!(minutes, (40..=47).collect::<Vec<_>>());
    }

    #[test]
    fn test_linear_decrement() {
        // 2.0 over 10 minutes → 0.1 per minute
        let points = project_odds(2.0, 80, 0, RegulationLength::Full).unwrap();
        assert_relative_eq!(points[1].odd, 1.9, epsilon = 1e-12);
        assert_relative_eq!(points[5].odd, 1.5, epsilon = 1e-12);
        assert_relative_eq!(decay_step(2.0, 10), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_odd_below_minimum_rejected() {
        let err = project_odds(1.0, 10, 0, RegulationLength::Full).unwrap_err();
        assert!(matches!(err, ProjectionError::OddBelowMinimum { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(project_odds(0.5, 10, 0, RegulationLength::Full).is_err());
    }

    #[test]
    fn test_non_finite_odd_rejected() {
        assert!(matches!(
            project_odds(f64::NAN, 10, 0, RegulationLength::Full),
            Err(ProjectionError::NonFiniteOdd(_))
        ));
        assert!(matches!(
            project_odds(f64::INFINITY, 10, 0, RegulationLength::Full),
            Err(ProjectionError::NonFiniteOdd(_))
        ));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert_eq!(
            project_odds(2.0, -1, 0, RegulationLength::Full),
            Err(ProjectionError::NegativeMinute(-1))
        );
        assert_eq!(
            project_odds(2.0, 10, -3, RegulationLength::Full),
            Err(ProjectionError::NegativeStoppage(-3))
        );
    }

    #[test]
    fn test_longest_stoppage_accepted() {
        let points = project_odds(2.0, 0, MAX_STOPPAGE, RegulationLength::Full).unwrap();
        assert_eq!(points.len(), 106);
        assert_eq!(points.last().unwrap().minute, 105);
        assert_eq!(points.last().unwrap().odd, 1.0);
    }

    #[test]
    fn test_stoppage_past_limit_rejected() {
        let err = project_odds(2.0, 10, MAX_STOPPAGE + 1, RegulationLength::Full).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::StoppageTooLong {
                stoppage: 16,
                max: MAX_STOPPAGE
            }
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            project_odds(2.0, 10, i32::MAX, RegulationLength::Full),
            Err(ProjectionError::StoppageTooLong { .. })
        ));
    }

    #[test]
    fn test_last_minute_of_stoppage_and_one_past() {
        let points = project_odds(2.0, 105, MAX_STOPPAGE, RegulationLength::Full).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(
            project_odds(2.0, 106, MAX_STOPPAGE, RegulationLength::Full),
            Err(ProjectionError::InvalidRange {
                current_minute: 106,
                total_minutes: 105
            })
        );
        assert!(matches!(
            project_odds(2.0, i32::MAX, 3, RegulationLength::Full),
            Err(ProjectionError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_total_minutes_checks_overflow() {
        assert_eq!(total_minutes(RegulationLength::Half, 3), Ok(48));
        assert!(total_minutes(RegulationLength::Full, i32::MAX).is_err());
    }

    #[test]
    fn test_decay_step_without_remaining_minutes() {
        assert_eq!(decay_step(3.0, 0), 0.0);
        assert_eq!(decay_step(3.0, -4), 0.0);
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = ProjectionError::InvalidRange {
            current_minute: 48,
            total_minutes: 45,
        };
        assert_eq!(
            err.to_string(),
            "current minute 48 is past the end of the match (45 minutes including stoppage)"
        );
    }
}
