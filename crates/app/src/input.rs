use std::fmt;
use std::path::Path;

use statics_core::geometry::{GeometryError, Segment, segments_from_canvas_json};
use statics_core::model::{Drawing, Submission, SubcheckKind};

/// A line typed by the learner.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Meta(Meta),
    Answer(Submission),
}

/// Session commands, all prefixed with `:` except `skip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Meta {
    Skip,
    Reset,
    Quit,
    Advance,
    Open,
    Focus(String),
    Help,
}

#[derive(Debug)]
pub enum ParseError {
    UnknownCommand(String),
    NotANumber(String),
    BadSegment(String),
    BadRole(String),
    Canvas(GeometryError),
    File { path: String, source: std::io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(raw) => write!(f, "unknown command: {raw} (try :help)"),
            ParseError::NotANumber(raw) => write!(f, "`{raw}` is not a number"),
            ParseError::BadSegment(raw) => {
                write!(f, "`{raw}` is not a line; use x1,y1,x2,y2")
            }
            ParseError::BadRole(raw) => {
                write!(f, "`{raw}` is not a role assignment; use NAME=line (lines count from 1)")
            }
            ParseError::Canvas(err) => write!(f, "{err}"),
            ParseError::File { path, source } => write!(f, "cannot read {path}: {source}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a meta command, or `None` when the line is an answer.
///
/// # Errors
///
/// Returns `ParseError::UnknownCommand` for an unrecognised `:` command.
pub fn parse_meta(raw: &str) -> Result<Option<Meta>, ParseError> {
    let line = raw.trim();
    if line.eq_ignore_ascii_case("skip") {
        return Ok(Some(Meta::Skip));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(None);
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, rest)| (name, rest.trim()));
    let meta = match name {
        "q" | "quit" => Meta::Quit,
        "reset" => Meta::Reset,
        "advance" | "next" => Meta::Advance,
        "open" => Meta::Open,
        "focus" if !rest.is_empty() => Meta::Focus(rest.to_string()),
        "help" | "h" => Meta::Help,
        _ => return Err(ParseError::UnknownCommand(line.to_string())),
    };
    Ok(Some(meta))
}

/// Parses one input line for a sub-check of `kind`.
///
/// `choices` are the options in the order they were shown; learners may pick
/// by 1-based position or by label.
///
/// # Errors
///
/// Returns `ParseError` when the line cannot be turned into a submission of
/// the shape the sub-check expects.
pub fn parse_line(raw: &str, kind: &SubcheckKind, choices: &[String]) -> Result<Line, ParseError> {
    if let Some(meta) = parse_meta(raw)? {
        return Ok(Line::Meta(meta));
    }
    parse_answer(raw.trim(), kind, choices).map(Line::Answer)
}

fn parse_answer(line: &str, kind: &SubcheckKind, choices: &[String]) -> Result<Submission, ParseError> {
    match kind {
        SubcheckKind::Numeric { .. } | SubcheckKind::Direction { .. } => parse_number(line).map(Submission::Number),
        SubcheckKind::Categorical { .. } => Ok(Submission::Choice(pick(line, choices))),
        SubcheckKind::MultiSelect { .. } | SubcheckKind::Checklist { .. } => {
            Ok(Submission::selection(pick_many(line, choices)))
        }
        SubcheckKind::Keyword { .. } => Ok(Submission::Text(line.to_string())),
        SubcheckKind::Drawing { .. } | SubcheckKind::LineCount { .. } => parse_drawing(line).map(Submission::Drawing),
        SubcheckKind::Acknowledge
        | SubcheckKind::CapturedRange { .. }
        | SubcheckKind::CapturedDirection { .. } => Ok(Submission::Confirm),
    }
}

fn parse_number(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .map_err(|_| ParseError::NotANumber(token.to_string()))
}

fn pick(token: &str, choices: &[String]) -> String {
    token
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| choices.get(i))
        .cloned()
        .unwrap_or_else(|| token.to_string())
}

/// Comma separated picks. Labels may contain commas themselves, so runs of
/// tokens are matched against the labels longest first before a token is
/// taken on its own.
fn pick_many(line: &str, choices: &[String]) -> Vec<String> {
    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
    let labels: Vec<(String, &String)> = choices.iter().map(|c| (squeeze(c), c)).collect();

    let mut picked = Vec::new();
    let mut start = 0;
    while start < tokens.len() {
        if tokens[start].is_empty() {
            start += 1;
            continue;
        }
        let run = (start + 2..=tokens.len()).rev().find_map(|end| {
            let joined = tokens[start..end].join(",");
            labels
                .iter()
                .find(|(key, _)| *key == joined)
                .map(|(_, label)| (end, (*label).clone()))
        });
        match run {
            Some((end, label)) => {
                picked.push(label);
                start = end;
            }
            None => {
                picked.push(pick(tokens[start], choices));
                start += 1;
            }
        }
    }
    picked
}

fn squeeze(label: &str) -> String {
    label.split(',').map(str::trim).collect::<Vec<_>>().join(",")
}

/// `x1,y1,x2,y2; x1,y1,x2,y2 | F1=1, F2=2` or `@canvas.json | F1=1`.
fn parse_drawing(line: &str) -> Result<Drawing, ParseError> {
    let (lines_part, roles_part) = line
        .split_once('|')
        .map_or((line, ""), |(lines, roles)| (lines.trim(), roles.trim()));

    let segments = match lines_part.strip_prefix('@') {
        Some(path) => read_canvas(Path::new(path.trim()))?,
        None => lines_part
            .split(';')
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?,
    };

    let mut drawing = Drawing::new(segments);
    for assignment in roles_part.split(',').map(str::trim).filter(|a| !a.is_empty()) {
        let (role, index) = assignment
            .split_once('=')
            .ok_or_else(|| ParseError::BadRole(assignment.to_string()))?;
        let index = index
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| ParseError::BadRole(assignment.to_string()))?;
        drawing = drawing.with_role(role.trim(), index);
    }
    Ok(drawing)
}

fn parse_segment(chunk: &str) -> Result<Segment, ParseError> {
    let coords = chunk
        .split(',')
        .map(|token| token.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseError::BadSegment(chunk.to_string()))?;
    match coords.as_slice() {
        [x1, y1, x2, y2] => Ok(Segment::from_coords(*x1, *y1, *x2, *y2)),
        _ => Err(ParseError::BadSegment(chunk.to_string())),
    }
}

fn read_canvas(path: &Path) -> Result<Vec<Segment>, ParseError> {
    let json = std::fs::read_to_string(path).map_err(|source| ParseError::File {
        path: path.display().to_string(),
        source,
    })?;
    segments_from_canvas_json(&json).map_err(ParseError::Canvas)
}
