use crate::geometry::{angular_difference, extract_lines, DrawnLine, Extraction, Segment};
use crate::model::{AngleTarget, Drawing, FailureReason, LengthRatio};

use super::{EDGE_SLACK, InputError, Verdict};

/// Counts usable lines; degenerate strokes do not count.
#[must_use]
pub fn verify_line_count(min: usize, max: Option<usize>, lines: &[Segment]) -> Verdict {
    let extraction = extract_lines(lines);
    let count = extraction.line_count();

    let verdict = if count < min {
        Verdict::fail(FailureReason::TooFewLines)
    } else if max.is_some_and(|max| count > max) {
        Verdict::fail(FailureReason::TooManyLines)
    } else {
        Verdict::pass()
    };
    verdict
        .with("line_count", count)
        .with("ignored_lines", extraction.len() - count)
}

fn line_for_role<'a>(extraction: &'a Extraction, drawing: &Drawing, role: &str) -> Result<&'a DrawnLine, InputError> {
    let index = *drawing
        .roles
        .get(role)
        .ok_or_else(|| InputError::MissingRole(role.to_string()))?;
    match extraction.get(index) {
        Some(Ok(line)) => Ok(line),
        Some(Err(_)) => Err(InputError::DegenerateLine {
            role: role.to_string(),
            index,
        }),
        None => Err(InputError::LineOutOfRange {
            role: role.to_string(),
            index,
            count: extraction.len(),
        }),
    }
}

/// Each labelled line must point within `tolerance_deg` of its target, and
/// the optional length ratio must be within its percentage band.
///
/// Lines are re-measured from the raw drawing on every call.
///
/// # Errors
///
/// Returns `InputError` when a role is unassigned or points at a missing or
/// zero-length line.
pub fn verify_drawing(
    targets: &[AngleTarget],
    tolerance_deg: f64,
    ratio: Option<&LengthRatio>,
    drawing: &Drawing,
) -> Result<Verdict, InputError> {
    let extraction = extract_lines(&drawing.lines);

    let mut measured = Vec::with_capacity(targets.len());
    for target in targets {
        let line = line_for_role(&extraction, drawing, &target.role)?;
        measured.push((target, line));
    }

    let mut diagnostics = Vec::new();
    let mut aligned = true;
    for (target, line) in &measured {
        diagnostics.push((format!("{}_angle_deg", target.role), line.angle_deg));
        if angular_difference(line.angle_deg, target.expected_deg) > tolerance_deg + EDGE_SLACK {
            aligned = false;
        }
    }

    let mut ratio_ok = true;
    if let Some(ratio) = ratio {
        let numerator = line_for_role(&extraction, drawing, &ratio.numerator)?;
        let denominator = line_for_role(&extraction, drawing, &ratio.denominator)?;
        let drawn = numerator.length / denominator.length;
        let error_pct = (drawn - ratio.expected).abs() / ratio.expected * 100.0;
        diagnostics.push(("length_ratio".to_string(), drawn));
        diagnostics.push(("ratio_error_pct".to_string(), error_pct));
        ratio_ok = error_pct <= ratio.tolerance_pct + EDGE_SLACK;
    }

    let verdict = if !aligned {
        Verdict::fail(FailureReason::Misaligned)
    } else if !ratio_ok {
        Verdict::fail(FailureReason::RatioOff)
    } else {
        Verdict::pass()
    };
    Ok(diagnostics
        .into_iter()
        .fold(verdict, |verdict, (key, value)| verdict.with(key, value)))
}
