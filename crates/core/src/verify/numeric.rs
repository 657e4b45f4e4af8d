use crate::geometry::{angular_difference, normalize_degrees_positive};
use crate::model::{FailureReason, Tolerance};

use super::{EDGE_SLACK, InputError, Verdict};

/// `|submitted - expected| <= band`, after domain checks.
///
/// # Errors
///
/// Returns `InputError` for a non-finite value or one outside `[min, max]`.
pub fn verify_numeric(
    expected: f64,
    tolerance: Tolerance,
    min: Option<f64>,
    max: Option<f64>,
    submitted: f64,
) -> Result<Verdict, InputError> {
    if !submitted.is_finite() {
        return Err(InputError::NotFinite);
    }
    if let Some(min) = min {
        if submitted < min {
            return Err(InputError::BelowMinimum { min });
        }
    }
    if let Some(max) = max {
        if submitted > max {
            return Err(InputError::AboveMaximum { max });
        }
    }

    let within = (submitted - expected).abs() <= tolerance.band(expected) + EDGE_SLACK;
    let verdict = if within {
        Verdict::pass()
    } else if submitted < expected {
        Verdict::fail(FailureReason::TooLow)
    } else {
        Verdict::fail(FailureReason::TooHigh)
    };
    Ok(verdict.with("submitted", submitted))
}

/// Angle entry compared on the circle. The submission is wrapped into
/// [0, 360) first, so `-106` and `254` are the same answer.
///
/// # Errors
///
/// Returns `InputError::NotFinite` for a non-finite angle.
pub fn verify_direction(expected_deg: f64, tolerance_deg: f64, submitted: f64) -> Result<Verdict, InputError> {
    if !submitted.is_finite() {
        return Err(InputError::NotFinite);
    }
    let normalized = normalize_degrees_positive(submitted);
    let off = angular_difference(normalized, expected_deg);
    Ok(Verdict::check(off <= tolerance_deg + EDGE_SLACK, FailureReason::AngleOff)
        .with("submitted_deg", normalized))
}

/// Captured number must lie in `[min, max]`.
///
/// # Errors
///
/// Returns `InputError::NotFinite` if the captured value is not finite.
pub fn verify_captured_range(captured: f64, min: f64, max: f64) -> Result<Verdict, InputError> {
    if !captured.is_finite() {
        return Err(InputError::NotFinite);
    }
    let verdict = if captured < min {
        Verdict::fail(FailureReason::TooLow)
    } else if captured > max {
        Verdict::fail(FailureReason::TooHigh)
    } else {
        Verdict::pass()
    };
    Ok(verdict.with("captured", captured))
}

/// Captured angle must fall strictly inside `sector` and near `expected_deg`.
///
/// Sector bounds are in [0, 360) degrees, e.g. `(180.0, 270.0)` for the third
/// quadrant.
///
/// # Errors
///
/// Returns `InputError::NotFinite` if the captured value is not finite.
pub fn verify_captured_direction(
    captured: f64,
    expected_deg: f64,
    tolerance_deg: f64,
    sector: (f64, f64),
) -> Result<Verdict, InputError> {
    if !captured.is_finite() {
        return Err(InputError::NotFinite);
    }
    let angle = normalize_degrees_positive(captured);
    let verdict = if !(sector.0 < angle && angle < sector.1) {
        Verdict::fail(FailureReason::WrongQuadrant)
    } else {
        Verdict::check(
            angular_difference(angle, expected_deg) <= tolerance_deg + EDGE_SLACK,
            FailureReason::AngleOff,
        )
    };
    Ok(verdict.with("captured_deg", angle))
}
