use statics_core::model::{
    FailureReason, ProblemDefinition, ProblemDraft, ProblemError, Stage, StageDefinition, Subcheck,
    SubcheckKind, Tolerance,
};

pub(crate) fn definition() -> Result<ProblemDefinition, ProblemError> {
    ProblemDraft::new("beam-reactions", "Beam on a roller and a pin")
        .statement(
            "A beam is supported by a roller at A and a pin at B, 9 ft to the right of A. \
             Three vertical loads act on it: P = 15 kips at 3 ft from A, 6 kips at 2 ft \
             to the right of B, and another 6 kips at the free end, 4 ft to the right of \
             B. Determine the reactions at A and B.",
        )
        .term("Roller support", "Provides one reaction, perpendicular to the rolling surface.")
        .term("Pin support", "Provides two reactions, one in each direction.")
        .term(
            "Static determinacy",
            "The number of unknown reactions equals the number of equilibrium equations.",
        )
        .term("Moment", "Force times perpendicular distance to the pivot.")
        .stage(
            StageDefinition::new(Stage::StudyVocab, "Vocabulary").check(Subcheck::new(
                "study.vocab",
                "Tick each term you have reviewed.",
                SubcheckKind::checklist(&[
                    ("Roller support", true),
                    ("Pin support", true),
                    ("Static determinacy", false),
                    ("Moment", false),
                ]),
            )),
        )
        .stage(
            StageDefinition::new(Stage::Translate, "Free-body diagram").check(
                Subcheck::new(
                    "translate.fbd",
                    "Draw the free-body diagram: the beam, the three loads and the reactions at A and B.",
                    SubcheckKind::line_count(6, Some(9)),
                )
                .hint("Did you include the beam, all three loads and every reaction?"),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Assign, "Axes").check(Subcheck::new(
                "assign.axes",
                "Take +x to the right, +y up and counter-clockwise moments as positive. \
                 Confirm to continue.",
                SubcheckKind::Acknowledge,
            )),
        )
        .stage(
            StageDefinition::new(Stage::Implement, "Unknowns and equations")
                .check(
                    Subcheck::new(
                        "implement.unknowns",
                        "How many unknown reaction forces are in this problem?",
                        SubcheckKind::bounded(3.0, Tolerance::Absolute(0.0), 0.0, 10.0),
                    )
                    .hint("A roller has one reaction and a pin has two."),
                )
                .check(
                    Subcheck::new(
                        "implement.equations",
                        "Which equations will you need to solve for all unknowns?",
                        SubcheckKind::multi_select(&[
                            ("Sum of Forces in X", true),
                            ("Sum of Forces in Y", true),
                            ("Sum of Moments", true),
                            ("Energy Balance", false),
                        ]),
                    )
                    .hint("How many equilibrium equations does a 2D rigid body give you?"),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(1), "Pivot and Ay")
                .check(
                    Subcheck::new(
                        "compute.pivot",
                        "Which point should you sum moments about to find Ay in one step?",
                        SubcheckKind::categorical("Point B", &["Point A", "Point B"]),
                    )
                    .hint(
                        "You can, but the other reactions stay in the equation. Pick the point \
                         where more unknowns meet.",
                    ),
                )
                .check(
                    Subcheck::new(
                        "compute.ay",
                        "Ay (kips)",
                        SubcheckKind::numeric(6.0, Tolerance::Absolute(0.1)),
                    )
                    .after(&["compute.pivot"])
                    .hint(
                        "About B, the 15 kip load is 6 ft to the left and Ay is 9 ft to the left. \
                         The two 6 kip loads are to the right.",
                    ),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(2), "Reactions at B")
                .check(
                    Subcheck::new(
                        "compute.bx",
                        "Bx (kips)",
                        SubcheckKind::numeric(0.0, Tolerance::Absolute(0.1)),
                    )
                    .hint("Are there any horizontal external forces on the beam?"),
                )
                .check(
                    Subcheck::new(
                        "compute.by",
                        "By (kips)",
                        SubcheckKind::numeric(21.0, Tolerance::Absolute(0.1)),
                    )
                    .hint("The total downward load is 15 + 6 + 6 kips. What must By add to Ay?")
                    .hint_on(FailureReason::TooHigh, "Ay already carries part of the load."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::SanityCheck, "Sanity check")
                .check(
                    Subcheck::new(
                        "sanity.total",
                        "Is By no larger than the total load?",
                        SubcheckKind::captured_range("compute.by", 0.0, 27.0),
                    )
                    .hint("Ay + By must equal the total downward load."),
                )
                .check(Subcheck::new(
                    "sanity.reflection",
                    "Reflect on your result.",
                    SubcheckKind::checklist(&[
                        ("Ay + By equals 27 kips", true),
                        ("Bx is zero because no load is horizontal", true),
                        ("B carries more because the overhang loads sit next to it", false),
                    ]),
                )),
        )
        .validate()
}
