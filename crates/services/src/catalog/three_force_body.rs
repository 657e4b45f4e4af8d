use statics_core::model::{
    FailureReason, ProblemDefinition, ProblemDraft, ProblemError, Stage, StageDefinition, Subcheck,
    SubcheckKind, Tolerance,
};

const TOP_OF_TANK: &str = "At the top of the tank (directly above G)";
const ISOSCELES: &str = "Triangle AGC is isosceles, relating alpha to the base angles";

pub(crate) fn definition() -> Result<ProblemDefinition, ProblemError> {
    ProblemDraft::new("three-force-body", "Raising a tank over an obstruction")
        .statement(
            "A 500 lb cylindrical tank W, 8 ft in diameter, is to be raised over a 2 ft \
             obstruction. The corner of the obstruction at A is rough. A cable pulls \
             horizontally with tension T from the top of the tank. Using the three-force \
             body principle, determine T and the reaction at A.",
        )
        .term(
            "Three-force body",
            "A body in equilibrium under exactly three forces.",
        )
        .term(
            "Concurrency",
            "The lines of action of three non-parallel forces in equilibrium meet at one point.",
        )
        .term("Rough corner", "A contact that can push in any direction, not only normal.")
        .term("Impending motion", "The tank is just about to lift off the ground at B.")
        .stage(
            StageDefinition::new(Stage::StudyVocab, "Vocabulary").check(Subcheck::new(
                "study.vocab",
                "Tick each term you have reviewed.",
                SubcheckKind::checklist(&[
                    ("Three-force body", true),
                    ("Concurrency", true),
                    ("Rough corner", false),
                    ("Impending motion", false),
                ]),
            )),
        )
        .stage(
            StageDefinition::new(Stage::StudyIdentify, "Givens").check(
                Subcheck::new(
                    "study.givens",
                    "Which of these follow from the statement?",
                    SubcheckKind::multi_select(&[
                        ("W = 500 lb", true),
                        ("T acts horizontally", true),
                        ("Corner A is rough", true),
                        ("The ground reaction at B is zero as the tank lifts", true),
                        ("The radius is 4 ft", true),
                    ]),
                )
                .hint_on(
                    FailureReason::MissedCorrect,
                    "Every item is stated or follows directly. What happens at B just as the tank lifts?",
                ),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Translate, "Concurrency and force triangle")
                .check(
                    Subcheck::new(
                        "translate.concurrency",
                        "Where do the lines of action of W, T and RA meet (point C)?",
                        SubcheckKind::categorical(
                            TOP_OF_TANK,
                            &["At the center G", TOP_OF_TANK, "At corner A"],
                        ),
                    )
                    .hint("W acts vertically through G and T acts horizontally at the top. Where do they cross?"),
                )
                .check(
                    Subcheck::new(
                        "translate.triangle",
                        "Draw the closed force triangle of W, T and RA.",
                        SubcheckKind::line_count(3, None),
                    )
                    .after(&["translate.concurrency"])
                    .hint("A triangle needs three sides, one per force."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Assign, "Geometry").check(Subcheck::new(
                "assign.geometry",
                "G is the centre, A the obstruction corner and C the top of the tank. AG and \
                 GC are both radii. Confirm to continue.",
                SubcheckKind::Acknowledge,
            )),
        )
        .stage(
            StageDefinition::new(Stage::Implement, "Angles")
                .check(
                    Subcheck::new(
                        "implement.alpha",
                        "Angle alpha between GA and the vertical through G (degrees).",
                        SubcheckKind::bounded(60.0, Tolerance::Absolute(1.0), 0.0, 90.0),
                    )
                    .hint("Corner A sits 2 ft up; G sits 4 ft up. Use cos(alpha) = (4 - 2) / 4."),
                )
                .check(
                    Subcheck::new(
                        "implement.reasoning",
                        "How does finding alpha help you find theta?",
                        SubcheckKind::categorical(
                            ISOSCELES,
                            &[
                                "They are the same angle (alternate interior)",
                                ISOSCELES,
                                "Triangle AGC is a right triangle",
                            ],
                        ),
                    )
                    .after(&["implement.alpha"])
                    .hint("Look at sides AG and GC. Are they equal? What does that say about the angles?"),
                )
                .check(
                    Subcheck::new(
                        "implement.theta",
                        "Angle theta between RA and the vertical (degrees).",
                        SubcheckKind::bounded(30.0, Tolerance::Absolute(1.0), 0.0, 90.0),
                    )
                    .after(&["implement.reasoning"])
                    .hint("The two base angles of an isosceles triangle share what is left of 180°."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(1), "Tension").check(
                Subcheck::new(
                    "compute.tension",
                    "Tension T (lb).",
                    SubcheckKind::magnitude(289.0, Tolerance::Absolute(2.0)),
                )
                .hint("In the force triangle, T is opposite theta: T = W tan(theta)."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(2), "Reaction at A").check(
                Subcheck::new(
                    "compute.reaction",
                    "Reaction at A, RA (lb).",
                    SubcheckKind::magnitude(577.0, Tolerance::Absolute(5.0)),
                )
                .hint("RA is the hypotenuse of the force triangle.")
                .hint_on(FailureReason::TooLow, "The hypotenuse must be longer than W."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::SanityCheck, "Sanity check")
                .check(
                    Subcheck::new(
                        "sanity.hypotenuse",
                        "Is RA larger than the weight it supports?",
                        SubcheckKind::captured_range("compute.reaction", 500.0, 1000.0),
                    )
                    .hint("RA balances both W and T, so it must exceed each of them."),
                )
                .check(Subcheck::new(
                    "sanity.reflection",
                    "Reflect on your result.",
                    SubcheckKind::checklist(&[
                        ("T is smaller than W", true),
                        ("RA points through point C", true),
                        ("The force triangle closes", true),
                    ]),
                )),
        )
        .validate()
}
