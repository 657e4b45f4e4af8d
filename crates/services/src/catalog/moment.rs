use statics_core::model::{
    FailureReason, ProblemDefinition, ProblemDraft, ProblemError, Stage, StageDefinition, Subcheck,
    SubcheckKind, Tolerance,
};

const CW: &str = "Clockwise (CW)";
const CCW: &str = "Counter-Clockwise (CCW)";

pub(crate) fn definition() -> Result<ProblemDefinition, ProblemError> {
    ProblemDraft::new("moment", "Moment of a vertical force on a lever")
        .statement(
            "A lever OA of length 24 in is pinned at O and makes 60° with the horizontal. \
             A 100 lb force acts vertically downward at A. Find the moment about O, and \
             the horizontal force at A that would produce the same moment.",
        )
        .term("Moment", "Tendency of a force to rotate a body about a point: M = F d.")
        .term(
            "Moment arm",
            "Perpendicular distance from the pivot to the line of action.",
        )
        .term("Line of action", "The infinite line along which a force acts.")
        .term("Pivot", "The point the moment is taken about.")
        .term(
            "Vertical force",
            "Its moment arm is the horizontal distance to the pivot.",
        )
        .term(
            "Horizontal force",
            "Its moment arm is the vertical distance to the pivot.",
        )
        .stage(
            StageDefinition::new(Stage::StudyVocab, "Vocabulary").check(Subcheck::new(
                "study.vocab",
                "Tick each term you have reviewed.",
                SubcheckKind::checklist(&[
                    ("Moment", true),
                    ("Moment arm", false),
                    ("Line of action", false),
                    ("Pivot", false),
                    ("Vertical force", true),
                    ("Horizontal force", false),
                ]),
            )),
        )
        .stage(
            StageDefinition::new(Stage::StudyIdentify, "Givens and target")
                .check(
                    Subcheck::new(
                        "study.givens",
                        "Which of these are given?",
                        SubcheckKind::multi_select(&[
                            ("The force is 100 lb", true),
                            ("The lever is 24 in long", true),
                            ("The lever makes 60° with the horizontal", true),
                            ("The force is vertical, pointing down", true),
                            ("The lever is horizontal", false),
                            ("The force is perpendicular to the lever", false),
                        ]),
                    )
                    .hint_on(
                        FailureReason::PickedIncorrect,
                        "Look at the figure again: how is the lever oriented, and how is the force?",
                    ),
                )
                .check(Subcheck::new(
                    "study.targets",
                    "What are you asked to find?",
                    SubcheckKind::multi_select(&[
                        ("The moment about O", true),
                        ("The equivalent horizontal force at A", true),
                        ("The reaction forces at O", false),
                        ("The angular velocity of the lever", false),
                    ]),
                )),
        )
        .stage(
            StageDefinition::new(Stage::Translate, "Sketch the lever").check(
                Subcheck::new(
                    "translate.lever",
                    "Draw the lever from O to A and label it OA.",
                    SubcheckKind::drawing(&[("OA", 60.0)], 15.0),
                )
                .hint_on(
                    FailureReason::Misaligned,
                    "The lever rises from O at 60° above the horizontal.",
                ),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Assign, "Sign convention").check(
                Subcheck::new(
                    "assign.convention",
                    "Which rotation sense will you call positive?",
                    SubcheckKind::categorical(CCW, &[CCW, CW]),
                )
                .hint("The usual right-hand convention takes the out-of-page direction as positive."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Implement, "Moment arm")
                .check(
                    Subcheck::new(
                        "implement.dx",
                        "Horizontal distance from O to A (in).",
                        SubcheckKind::magnitude(12.0, Tolerance::Absolute(1.0)),
                    )
                    .hint("Project the lever onto the horizontal: L cos(60°)."),
                )
                .check(
                    Subcheck::new(
                        "implement.dy",
                        "Vertical distance from O to A (in).",
                        SubcheckKind::magnitude(20.78, Tolerance::Absolute(1.0)),
                    )
                    .hint("Project the lever onto the vertical."),
                )
                .check(
                    Subcheck::new(
                        "implement.equation",
                        "Which equation gives the moment of the vertical force?",
                        SubcheckKind::categorical(
                            "M = F_v * (Horizontal Distance)",
                            &[
                                "M = F_v * (Horizontal Distance)",
                                "M = F_v * (Vertical Distance)",
                                "M = F_v * L",
                            ],
                        ),
                    )
                    .after(&["implement.dx", "implement.dy"])
                    .hint("The moment arm is perpendicular to the line of action."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(1), "Moment about O")
                .check(
                    Subcheck::new(
                        "compute.moment",
                        "Magnitude of the moment about O (lb·in).",
                        SubcheckKind::magnitude(1200.0, Tolerance::Percent(5.0)),
                    )
                    .hint("Force times the perpendicular distance.")
                    .hint_on(
                        FailureReason::TooHigh,
                        "Did you multiply by the full lever length? Only the perpendicular part counts.",
                    ),
                )
                .check(
                    Subcheck::new(
                        "compute.sense",
                        "Which way does the moment turn the lever?",
                        SubcheckKind::categorical(CW, &[CW, CCW]),
                    )
                    .hint("Picture the force pushing down at A with O fixed."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(2), "Equivalent horizontal force").check(
                Subcheck::new(
                    "compute.horizontal",
                    "Horizontal force at A giving the same moment (lb).",
                    SubcheckKind::magnitude(57.735, Tolerance::Percent(5.0)),
                )
                .hint("Same moment, different arm. Which distance does a horizontal force use?"),
            ),
        )
        .stage(
            StageDefinition::new(Stage::SanityCheck, "Sanity check")
                .check(
                    Subcheck::new(
                        "sanity.arm",
                        "Is your moment below 100 lb times the full 24 in lever?",
                        SubcheckKind::captured_range("compute.moment", 0.0, 2400.0),
                    )
                    .hint("The perpendicular arm can never exceed the lever length."),
                )
                .check(Subcheck::new(
                    "sanity.reflection",
                    "Reflect on your result.",
                    SubcheckKind::checklist(&[
                        ("The moment sense matches my sketch", true),
                        ("A longer arm needs a smaller force for the same moment", true),
                        ("Units are lb·in", true),
                    ]),
                )),
        )
        .validate()
}
