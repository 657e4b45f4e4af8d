use std::sync::Arc;

use chrono::Duration;
use services::{
    Clock, ProblemCatalog, Session, TutorAction, TutorError, TutorEvent, TutorService,
};
use statics_core::geometry::Segment;
use statics_core::model::{Drawing, ProblemDefinition, Stage, Submission, TutorSettingsDraft};
use statics_core::time::{fixed_clock, fixed_now};

fn problem(id: &str) -> Arc<ProblemDefinition> {
    ProblemCatalog::builtin().unwrap().get(id).unwrap()
}

fn pass(tutor: &TutorService, session: &mut Session, id: &str, submission: Submission) {
    let mut events: Vec<TutorEvent> = Vec::new();
    let verdict = tutor.submit(session, id, &submission, &mut events).unwrap();
    assert!(verdict.passed, "{id} failed: {verdict:?}");
}

fn started(tutor: &TutorService) -> Session {
    let mut session = tutor.new_session();
    let mut events: Vec<TutorEvent> = Vec::new();
    tutor.begin(&mut session, &mut events).unwrap();
    tutor.skip_timer(&mut session, &mut events).unwrap();
    session
}

fn lines(count: usize) -> Submission {
    let segments = (0..count)
        .map(|i| Segment::from_coords(0.0, i as f64 * 10.0, 50.0, i as f64 * 10.0))
        .collect();
    Submission::Drawing(Drawing::new(segments))
}

#[test]
fn distributed_load_resultant_and_centroid() {
    let tutor = TutorService::new(fixed_clock(), problem("distributed-load"));
    let mut session = started(&tutor);

    pass(&tutor, &mut session, "study.vocab", Submission::selection(["Distributed load", "Resultant", "Centroid"]));
    pass(&tutor, &mut session, "study.height", Submission::Number(3.0));
    pass(&tutor, &mut session, "study.max_load", Submission::Number(45.0));
    pass(&tutor, &mut session, "study.support_a", Submission::Choice("Both X and Y".into()));
    pass(&tutor, &mut session, "study.support_b", Submission::Choice("X only".into()));
    pass(&tutor, &mut session, "translate.fbd", lines(5));
    pass(&tutor, &mut session, "assign.axes", Submission::Confirm);
    pass(
        &tutor,
        &mut session,
        "assign.components",
        Submission::selection(["Water load, X", "Pin A, X", "Pin A, Y", "Stop B, X"]),
    );
    pass(
        &tutor,
        &mut session,
        "implement.concept",
        Submission::Text("  The AREA of the load at its Centroid ".into()),
    );
    pass(&tutor, &mut session, "implement.pivot", Submission::Choice("Point A".into()));
    assert_eq!(session.stage(), Stage::Compute(1));

    let mut events: Vec<TutorEvent> = Vec::new();
    let verdict = tutor
        .submit(&mut session, "compute.resultant", &Submission::Number(135.0), &mut events)
        .unwrap();
    assert_eq!(verdict.hint_key(), Some("too-high"));

    pass(&tutor, &mut session, "compute.resultant", Submission::Number(67.5));
    pass(&tutor, &mut session, "compute.centroid", Submission::Number(2.0));
    assert_eq!(session.stage(), Stage::Compute(2));

    let err = tutor
        .submit(&mut session, "compute.ax", &Submission::Number(22.5), &mut events)
        .unwrap_err();
    assert!(matches!(err, TutorError::NotReady { .. }));
    pass(&tutor, &mut session, "compute.bx", Submission::Number(45.0));
    pass(&tutor, &mut session, "compute.ax", Submission::Number(22.5));
    assert_eq!(session.stage(), Stage::SanityCheck);
}

#[test]
fn centroid_outside_the_gate_is_invalid_input() {
    let tutor = TutorService::new(fixed_clock(), problem("distributed-load"));
    let mut session = started(&tutor);
    let mut events: Vec<TutorEvent> = Vec::new();
    for (id, submission) in [
        ("study.vocab", Submission::selection(["Distributed load", "Resultant", "Centroid"])),
        ("study.height", Submission::Number(3.0)),
        ("study.max_load", Submission::Number(45.0)),
        ("study.support_a", Submission::Choice("Both X and Y".into())),
        ("study.support_b", Submission::Choice("X only".into())),
        ("translate.fbd", lines(4)),
        ("assign.axes", Submission::Confirm),
        (
            "assign.components",
            Submission::selection(["Water load, X", "Pin A, X", "Pin A, Y", "Stop B, X"]),
        ),
        ("implement.concept", Submission::Text("area and centroid".into())),
        ("implement.pivot", Submission::Choice("Point A".into())),
        ("compute.resultant", Submission::Number(67.5)),
    ] {
        pass(&tutor, &mut session, id, submission);
    }

    let err = tutor
        .submit(&mut session, "compute.centroid", &Submission::Number(4.0), &mut events)
        .unwrap_err();
    assert!(matches!(err, TutorError::InvalidInput(_)));
    assert!(!session.is_passed("compute.centroid"));
    assert_eq!(session.stage(), Stage::Compute(1));
}

#[test]
fn beam_reactions_walkthrough_via_actions() {
    let tutor = TutorService::new(fixed_clock(), problem("beam-reactions"));
    let mut session = tutor.new_session();
    let mut events: Vec<TutorEvent> = Vec::new();

    let submit = |subcheck: &str, submission: Submission| TutorAction::Submit {
        subcheck: subcheck.to_string(),
        submission,
    };
    let actions = vec![
        TutorAction::Begin,
        TutorAction::SkipTimer,
        submit("study.vocab", Submission::selection(["Roller support", "Pin support"])),
        submit("translate.fbd", lines(7)),
        submit("assign.axes", Submission::Confirm),
        submit("implement.unknowns", Submission::Number(3.0)),
        submit(
            "implement.equations",
            Submission::selection(["Sum of Forces in X", "Sum of Forces in Y", "Sum of Moments"]),
        ),
        submit("compute.pivot", Submission::Choice("Point B".into())),
        submit("compute.ay", Submission::Number(6.05)),
        submit("compute.bx", Submission::Number(0.0)),
        submit("compute.by", Submission::Number(21.0)),
        submit("sanity.total", Submission::Confirm),
        submit(
            "sanity.reflection",
            Submission::selection(["Ay + By equals 27 kips", "Bx is zero because no load is horizontal"]),
        ),
    ];
    for action in actions {
        tutor.handle(&mut session, action, &mut events).unwrap();
    }
    assert!(session.is_complete());

    let stages: Vec<Stage> = events
        .iter()
        .filter_map(|event| match event {
            TutorEvent::StageChanged { stage } => Some(*stage),
            _ => None,
        })
        .collect();
    assert!(stages.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(stages.first(), Some(&Stage::StudyTimer));
    assert_eq!(stages.last(), Some(&Stage::Complete));
}

#[test]
fn wrong_pivot_does_not_unlock_ay() {
    let tutor = TutorService::new(fixed_clock(), problem("beam-reactions"));
    let mut session = started(&tutor);
    pass(&tutor, &mut session, "study.vocab", Submission::selection(["Roller support", "Pin support"]));
    pass(&tutor, &mut session, "translate.fbd", lines(6));
    pass(&tutor, &mut session, "assign.axes", Submission::Confirm);
    pass(&tutor, &mut session, "implement.unknowns", Submission::Number(3.0));
    pass(
        &tutor,
        &mut session,
        "implement.equations",
        Submission::selection(["Sum of Forces in X", "Sum of Forces in Y", "Sum of Moments"]),
    );

    let mut events: Vec<TutorEvent> = Vec::new();
    let verdict = tutor
        .submit(&mut session, "compute.pivot", &Submission::Choice("Point A".into()), &mut events)
        .unwrap();
    assert!(!verdict.passed);
    assert!(matches!(
        tutor.submit(&mut session, "compute.ay", &Submission::Number(6.0), &mut events),
        Err(TutorError::NotReady { .. })
    ));
}

#[test]
fn passed_flags_are_sticky_on_resubmission() {
    let tutor = TutorService::new(fixed_clock(), problem("moment"));
    let settings = TutorSettingsDraft {
        auto_advance: false,
        ..TutorSettingsDraft::default()
    }
    .validate()
    .unwrap();
    let tutor = tutor.with_settings(settings);
    let mut session = started(&tutor);
    let mut events: Vec<TutorEvent> = Vec::new();
    tutor
        .request_advance(&mut session, Stage::StudyVocab, &mut events)
        .unwrap();

    pass(&tutor, &mut session, "study.vocab", Submission::selection(["Moment", "Vertical force"]));
    let verdict = tutor
        .submit(&mut session, "study.vocab", &Submission::selection(["Moment"]), &mut events)
        .unwrap();
    assert!(!verdict.passed);
    assert!(session.is_passed("study.vocab"));
    assert_eq!(session.attempts("study.vocab"), 2);
    assert_eq!(session.stage(), Stage::StudyVocab);
}

#[test]
fn reset_returns_to_not_started() {
    let tutor = TutorService::new(fixed_clock(), problem("three-force-body"));
    let mut session = started(&tutor);
    pass(
        &tutor,
        &mut session,
        "study.vocab",
        Submission::selection(["Three-force body", "Concurrency"]),
    );
    assert_eq!(session.stage(), Stage::StudyIdentify);

    let mut events: Vec<TutorEvent> = Vec::new();
    tutor.request_reset(&mut session, &mut events);
    assert_eq!(session.stage(), Stage::NotStarted);
    assert!(!session.is_begun());
    assert!(session.flags().is_empty());
    assert_eq!(session.attempts("study.vocab"), 0);
    assert_eq!(
        events,
        vec![TutorEvent::StageChanged {
            stage: Stage::NotStarted
        }]
    );
    assert_eq!(tutor.progress(&session).passed, 0);
}

#[test]
fn timer_counts_down_with_the_clock() {
    let mut clock = Clock::fixed(fixed_now());
    let tutor = TutorService::new(clock, problem("method-joints"));
    let mut session = tutor.new_session();
    let mut events: Vec<TutorEvent> = Vec::new();
    tutor.begin(&mut session, &mut events).unwrap();

    clock.advance(Duration::seconds(100));
    let tutor = tutor.with_clock(clock);
    assert_eq!(tutor.poll_timer(&mut session, &mut events).unwrap(), 80);
    assert_eq!(session.stage(), Stage::StudyTimer);

    clock.advance(Duration::seconds(80));
    let tutor = tutor.with_clock(clock);
    assert_eq!(tutor.poll_timer(&mut session, &mut events).unwrap(), 0);
    assert_eq!(session.stage(), Stage::StudyVocab);
    assert_eq!(
        events.last(),
        Some(&TutorEvent::StageChanged {
            stage: Stage::StudyVocab
        })
    );
}

#[test]
fn method_sections_records_member_states() {
    let tutor = TutorService::new(fixed_clock(), problem("method-sections"));
    let mut session = started(&tutor);
    pass(
        &tutor,
        &mut session,
        "study.vocab",
        Submission::selection(["Method of sections", "Section cut"]),
    );
    pass(
        &tutor,
        &mut session,
        "study.givens",
        Submission::selection([
            "The truss geometry is symmetric",
            "The method of sections is more efficient than joints here",
            "The total downward load is 20 kN",
        ]),
    );
    pass(
        &tutor,
        &mut session,
        "translate.section",
        Submission::Choice("The right section (nodes H through L)".into()),
    );
    pass(&tutor, &mut session, "translate.fbd", lines(6));
    pass(&tutor, &mut session, "assign.ly", Submission::Number(7.5));
    pass(&tutor, &mut session, "implement.height_h", Submission::Number(5.33));
    pass(&tutor, &mut session, "implement.moment_point", Submission::Choice("Node H".into()));
    pass(&tutor, &mut session, "compute.fgi", Submission::Number(13.1));
    pass(&tutor, &mut session, "compute.fgi_state", Submission::Choice("Tension (T)".into()));
    assert_eq!(session.stage(), Stage::Compute(2));

    let mut events: Vec<TutorEvent> = Vec::new();
    assert!(matches!(
        tutor.submit(&mut session, "compute.ffh_state", &Submission::Choice("Sideways".into()), &mut events),
        Err(TutorError::InvalidInput(_))
    ));
}
