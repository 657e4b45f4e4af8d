mod input;
mod logging;
mod presenter;

use std::fmt;
use std::io::{self, BufRead, Write};

use services::{Clock, ProblemCatalog, Session, TutorError, TutorService};
use statics_core::model::{Stage, Subcheck, TutorSettings, TutorSettingsDraft};
use tracing::debug;

use input::{Line, Meta, parse_line, parse_meta};
use presenter::TerminalPresenter;

const DEFAULT_PROBLEM: &str = "force-triangle";
/// Session draft holding the sub-check picked with `:focus`.
const FOCUS_DRAFT: &str = "focus";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStudySeconds { raw: String },
    Settings(statics_core::Error),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStudySeconds { raw } => {
                write!(f, "invalid --study-seconds value: {raw}")
            }
            ArgsError::Settings(err) => write!(f, "invalid settings: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  statics-tutor list");
    eprintln!("  statics-tutor run [--problem <id>] [--study-seconds <n>] [--no-skip]");
    eprintln!("                    [--shuffle] [--manual-advance] [--json]");
    eprintln!();
    eprintln!("Defaults for run:");
    eprintln!("  --problem {DEFAULT_PROBLEM}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STATICS_PROBLEM, STATICS_STUDY_SECONDS, STATICS_NO_SKIP, STATICS_SHUFFLE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    List,
    Run,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "list" => Some(Self::List),
            "run" => Some(Self::Run),
            _ => None,
        }
    }
}

struct Args {
    problem: String,
    settings: TutorSettings,
    json: bool,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| matches!(value.trim(), "1" | "true" | "yes"))
}

fn parse_seconds(raw: String) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidStudySeconds { raw })
}

impl Args {
    fn parse_run(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut problem = std::env::var("STATICS_PROBLEM")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROBLEM.to_string());
        let mut draft = TutorSettingsDraft::default();
        if let Ok(raw) = std::env::var("STATICS_STUDY_SECONDS") {
            draft.study_seconds = Some(parse_seconds(raw)?);
        }
        draft.allow_timer_skip = !env_flag("STATICS_NO_SKIP");
        draft.shuffle_choices = env_flag("STATICS_SHUFFLE");
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--problem" => problem = require_value(args, "--problem")?,
                "--study-seconds" => {
                    draft.study_seconds = Some(parse_seconds(require_value(args, "--study-seconds")?)?);
                }
                "--no-skip" => draft.allow_timer_skip = false,
                "--shuffle" => draft.shuffle_choices = true,
                "--manual-advance" => draft.auto_advance = false,
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings = draft
            .validate()
            .map_err(|err| ArgsError::Settings(err.into()))?;
        Ok(Self {
            problem,
            settings,
            json,
        })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: run the default problem when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Run,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Run,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let catalog = ProblemCatalog::builtin()?;
    match cmd {
        Command::List => {
            let mut out = io::stdout().lock();
            for problem in catalog.iter() {
                writeln!(out, "{:<18} {}", problem.id(), problem.title())?;
            }
            Ok(())
        }
        Command::Run => {
            let mut iter = argv.into_iter();
            let parsed = Args::parse_run(&mut iter).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;
            let problem = catalog.get(&parsed.problem).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unknown problem `{}` (see `statics-tutor list`)", parsed.problem),
                )
            })?;
            let tutor = TutorService::new(Clock::default_clock(), problem).with_settings(parsed.settings);
            let presenter = TerminalPresenter::new(io::stdout().lock(), parsed.json);
            Tutorial::new(&tutor, presenter).run(io::stdin().lock())
        }
    }
}

/// Interactive loop over stdin for one session.
struct Tutorial<'a, W: Write> {
    tutor: &'a TutorService,
    session: Session,
    presenter: TerminalPresenter<W>,
    /// Options of the current prompt, in the order shown.
    choices: Vec<String>,
}

impl<'a, W: Write> Tutorial<'a, W> {
    fn new(tutor: &'a TutorService, presenter: TerminalPresenter<W>) -> Self {
        Self {
            tutor,
            session: tutor.new_session(),
            presenter,
            choices: Vec::new(),
        }
    }

    fn run(mut self, input: impl BufRead) -> Result<(), Box<dyn std::error::Error>> {
        self.presenter.intro(self.tutor.problem());
        self.presenter.help();
        self.tutor.begin(&mut self.session, &mut self.presenter)?;

        let mut lines = input.lines();
        loop {
            if self.session.is_complete() {
                self.presenter.progress(&self.tutor.progress(&self.session));
                break;
            }
            let current = self.prompt();
            if let Some(err) = self.presenter.take_error() {
                return Err(err.into());
            }

            let Some(line) = lines.next().transpose()? else {
                break;
            };
            if !self.step(&line, current)? {
                break;
            }
        }
        self.presenter.take_error().map_or(Ok(()), |err| Err(err.into()))
    }

    /// Shows the sub-check the next line answers, if any.
    fn prompt(&mut self) -> Option<&'a Subcheck> {
        let current = self.current();
        match current {
            Some(check) => {
                self.choices = self.tutor.choices_for(check);
                self.presenter.prompt(check, &self.choices);
            }
            None => {
                self.choices.clear();
                if self.session.stage() != Stage::StudyTimer {
                    self.presenter
                        .notice("Stage complete. Type :advance to continue.");
                }
            }
        }
        current
    }

    /// Sub-check the next answer goes to. A focus only lasts for the stage it
    /// was set in.
    fn current(&self) -> Option<&'a Subcheck> {
        if let Some(id) = self.session.draft(FOCUS_DRAFT) {
            let open = self.tutor.open_subchecks(&self.session);
            if let Some(check) = open.into_iter().find(|check| check.id().as_str() == id) {
                return Some(check);
            }
        }
        self.tutor.next_subcheck(&self.session)
    }

    /// Handles one input line. Returns `false` to quit.
    fn step(&mut self, line: &str, current: Option<&'a Subcheck>) -> Result<bool, Box<dyn std::error::Error>> {
        let parsed = match current {
            Some(check) if self.session.stage() != Stage::StudyTimer => {
                parse_line(line, check.kind(), &self.choices).map(Some)
            }
            _ => parse_meta(line).map(|meta| meta.map(Line::Meta)),
        };

        let outcome = match parsed {
            Ok(Some(Line::Meta(meta))) => return self.meta(meta),
            Ok(Some(Line::Answer(submission))) => match current {
                Some(check) => self
                    .tutor
                    .submit(&mut self.session, check.id().as_str(), &submission, &mut self.presenter)
                    .map(|_| ()),
                None => Ok(()),
            },
            Ok(None) if self.session.stage() == Stage::StudyTimer => self
                .tutor
                .poll_timer(&mut self.session, &mut self.presenter)
                .map(|_| ()),
            Ok(None) => Ok(()),
            Err(err) => {
                self.presenter.notice(&err.to_string());
                Ok(())
            }
        };
        self.report(outcome);
        Ok(true)
    }

    fn meta(&mut self, meta: Meta) -> Result<bool, Box<dyn std::error::Error>> {
        let outcome = match meta {
            Meta::Quit => return Ok(false),
            Meta::Help => {
                self.presenter.help();
                Ok(())
            }
            Meta::Skip => self
                .tutor
                .skip_timer(&mut self.session, &mut self.presenter)
                .map(|_| ()),
            Meta::Reset => {
                self.tutor.request_reset(&mut self.session, &mut self.presenter);
                self.tutor
                    .begin(&mut self.session, &mut self.presenter)
                    .map(|_| ())
            }
            Meta::Advance => match self.tutor.problem().next_stage(self.session.stage()) {
                Some(next) => self
                    .tutor
                    .request_advance(&mut self.session, next, &mut self.presenter)
                    .map(|_| ()),
                None => Err(TutorError::Completed),
            },
            Meta::Open => {
                let open: Vec<String> = self
                    .tutor
                    .open_subchecks(&self.session)
                    .iter()
                    .map(|check| check.id().to_string())
                    .collect();
                self.presenter.notice(&format!("open: {}", open.join(", ")));
                self.presenter.progress(&self.tutor.progress(&self.session));
                Ok(())
            }
            Meta::Focus(id) => {
                self.session.set_draft(FOCUS_DRAFT, id);
                Ok(())
            }
        };
        self.report(outcome);
        Ok(true)
    }

    fn report(&mut self, outcome: Result<(), TutorError>) {
        if let Err(err) = outcome {
            debug!(error = %err, "action rejected");
            // Invalid input was already shown as a sub-check result.
            if !matches!(err, TutorError::InvalidInput(_)) {
                self.presenter.notice(&err.to_string());
            }
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statics_core::time::fixed_clock;

    fn tutor(id: &str) -> TutorService {
        let catalog = ProblemCatalog::builtin().unwrap();
        let settings = TutorSettingsDraft {
            study_seconds: Some(0),
            ..TutorSettingsDraft::default()
        }
        .validate()
        .unwrap();
        TutorService::new(fixed_clock(), catalog.get(id).unwrap()).with_settings(settings)
    }

    #[test]
    fn scripted_session_runs_to_completion() {
        let tutor = tutor("beam-reactions");
        let script = [
            "1, 2",
            "0,0,100,0; 0,0,0,10; 100,0,100,10; 30,-20,30,0; 110,-20,110,0; 130,-20,130,0",
            "",
            "3",
            "1,2,3",
            "2",
            "6",
            "0",
            "21",
            "",
            "1, 2",
        ]
        .join("\n");

        let presenter = TerminalPresenter::new(Vec::new(), false);
        let mut tutorial = Tutorial::new(&tutor, presenter);
        tutorial.presenter.intro(tutor.problem());
        tutor.begin(&mut tutorial.session, &mut tutorial.presenter).unwrap();
        for line in script.lines() {
            let current = tutorial.prompt();
            assert!(tutorial.step(line, current).unwrap(), "{line}");
        }
        assert!(tutorial.session.is_complete());
    }

    #[test]
    fn quit_and_unknown_commands() {
        let tutor = tutor("moment");
        let presenter = TerminalPresenter::new(Vec::new(), true);
        let mut tutorial = Tutorial::new(&tutor, presenter);
        tutor.begin(&mut tutorial.session, &mut tutorial.presenter).unwrap();

        let current = tutorial.prompt();
        assert!(tutorial.step(":bogus", current).unwrap());
        assert!(!tutorial.step(":quit", current).unwrap());
    }

    #[test]
    fn focus_targets_optional_practice() {
        let tutor = tutor("force-triangle");
        let presenter = TerminalPresenter::new(Vec::new(), false);
        let mut tutorial = Tutorial::new(&tutor, presenter);
        tutor.begin(&mut tutorial.session, &mut tutorial.presenter).unwrap();
        assert_eq!(tutorial.session.stage(), Stage::StudyVocab);

        let current = tutorial.prompt();
        tutorial.step(":focus assign.f1x", current).unwrap();
        // Not open yet, so the required vocabulary check stays current.
        assert_eq!(
            tutorial.current().map(|check| check.id().as_str()),
            Some("study.vocab")
        );
    }

    #[test]
    fn focus_is_dropped_when_the_stage_changes() {
        let tutor = tutor("force-triangle");
        let presenter = TerminalPresenter::new(Vec::new(), false);
        let mut tutorial = Tutorial::new(&tutor, presenter);
        tutor.begin(&mut tutorial.session, &mut tutorial.presenter).unwrap();

        let current = tutorial.prompt();
        tutorial.step(":focus study.vocab", current).unwrap();
        assert_eq!(tutorial.session.draft(FOCUS_DRAFT), Some("study.vocab"));

        let current = tutorial.prompt();
        assert_eq!(current.map(|check| check.id().as_str()), Some("study.vocab"));
        tutorial.step("Equilibrium, Force triangle", current).unwrap();
        assert_eq!(tutorial.session.stage(), Stage::StudyIdentify);
        assert_eq!(tutorial.session.draft(FOCUS_DRAFT), None);
    }
}
