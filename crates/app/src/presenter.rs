use std::io::{self, Write};

use serde_json::json;
use services::{Presenter, SessionProgress, TutorEvent};
use statics_core::model::{ProblemDefinition, Stage, Subcheck};

/// Renders tutor output as text, or as one JSON object per line.
///
/// Write failures are kept and surfaced by `take_error`, since the
/// `Presenter` seam itself cannot fail.
pub struct TerminalPresenter<W: Write> {
    out: W,
    json: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: &serde_json::Value) {
        let result = serde_json::to_writer(&mut self.out, value)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        self.remember(result);
    }

    fn line(&mut self, text: &str) {
        let result = writeln!(self.out, "{text}");
        self.remember(result);
    }

    fn remember(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    pub fn intro(&mut self, problem: &ProblemDefinition) {
        if self.json {
            self.emit(&json!({
                "event": "problem",
                "id": problem.id(),
                "title": problem.title(),
                "statement": problem.statement(),
                "study_seconds": problem.study_seconds(),
            }));
            return;
        }
        self.line(&format!("== {} ==", problem.title()));
        self.line(problem.statement());
        if !problem.vocabulary().is_empty() {
            self.line("");
            self.line("Vocabulary:");
            for term in problem.vocabulary() {
                self.line(&format!("  {}: {}", term.term, term.meaning));
            }
        }
        self.line("");
    }

    pub fn prompt(&mut self, check: &Subcheck, choices: &[String]) {
        if self.json {
            self.emit(&json!({
                "event": "prompt",
                "subcheck": check.id(),
                "prompt": check.prompt(),
                "choices": choices,
                "optional": check.is_optional(),
            }));
            return;
        }
        let tag = if check.is_optional() { " (optional)" } else { "" };
        self.line(&format!("[{}]{tag} {}", check.id(), check.prompt()));
        for (n, choice) in choices.iter().enumerate() {
            self.line(&format!("  {}) {choice}", n + 1));
        }
    }

    pub fn progress(&mut self, progress: &SessionProgress) {
        if self.json {
            self.emit(&json!({
                "event": "progress",
                "stage": progress.stage,
                "stage_index": progress.stage_index,
                "stage_total": progress.stage_total,
                "passed": progress.passed,
                "required": progress.required,
                "complete": progress.is_complete,
            }));
            return;
        }
        self.line(&format!(
            "-- {} (stage {}/{}), {} of {} checks passed",
            progress.stage,
            progress.stage_index + 1,
            progress.stage_total,
            progress.passed,
            progress.required
        ));
    }

    /// Non-event feedback such as a rejected command.
    pub fn notice(&mut self, text: &str) {
        if self.json {
            self.emit(&json!({ "event": "notice", "message": text }));
        } else {
            self.line(&format!("! {text}"));
        }
    }

    pub fn help(&mut self) {
        if self.json {
            return;
        }
        for text in [
            "Answers: numbers, option numbers or labels (comma separated for several),",
            "  free text, or drawings as `x1,y1,x2,y2; ... | F1=1, F2=2` or `@canvas.json | F1=1`.",
            "Commands: skip, :advance, :open, :focus <id>, :reset, :help, :quit",
        ] {
            self.line(text);
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, event: &TutorEvent) {
        if self.json {
            match serde_json::to_value(event) {
                Ok(value) => self.emit(&value),
                Err(err) => self.remember(Err(io::Error::from(err))),
            }
            return;
        }
        match event {
            TutorEvent::StageChanged { stage } => {
                let text = match stage {
                    Stage::NotStarted => "Session reset.".to_string(),
                    Stage::Complete => "All steps complete. Well done!".to_string(),
                    other => format!("== {other} =="),
                };
                self.line(&text);
            }
            TutorEvent::TimeRemaining { seconds } => {
                let text = if *seconds == 0 {
                    "Study time is over.".to_string()
                } else {
                    format!(
                        "Study the problem: {}:{:02} left. Press Enter to check, `skip` to start now.",
                        seconds / 60,
                        seconds % 60
                    )
                };
                self.line(&text);
            }
            TutorEvent::SubcheckResult(result) => {
                if result.passed {
                    self.line("  correct.");
                } else {
                    let hint = result.hint.as_deref().unwrap_or("Not quite.");
                    self.line(&format!("  {hint}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::SubcheckResult;
    use statics_core::model::SubcheckId;
    use statics_core::verify::Diagnostics;

    fn failing() -> TutorEvent {
        TutorEvent::SubcheckResult(SubcheckResult {
            subcheck: SubcheckId::new("compute.ay"),
            passed: false,
            hint_key: Some("too-high".into()),
            hint: Some("Sum moments about B.".into()),
            diagnostics: Diagnostics::new(),
        })
    }

    #[test]
    fn text_mode_shows_hints_and_countdown() {
        let mut presenter = TerminalPresenter::new(Vec::new(), false);
        presenter.present(&TutorEvent::TimeRemaining { seconds: 125 });
        presenter.present(&failing());
        presenter.present(&TutorEvent::StageChanged {
            stage: Stage::Compute(2),
        });

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(text.contains("2:05 left"));
        assert!(text.contains("Sum moments about B."));
        assert!(text.contains("C: compute (part 2)"));
    }

    #[test]
    fn json_mode_writes_one_event_per_line() {
        let mut presenter = TerminalPresenter::new(Vec::new(), true);
        presenter.present(&failing());
        presenter.present(&TutorEvent::StageChanged {
            stage: Stage::SanityCheck,
        });

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        let events: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "subcheck_result");
        assert_eq!(events[0]["hint_key"], "too-high");
        assert_eq!(events[1]["stage"], "sanity_check");
    }
}
