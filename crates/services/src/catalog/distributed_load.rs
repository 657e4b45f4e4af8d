use statics_core::model::{
    FailureReason, ProblemDefinition, ProblemDraft, ProblemError, Stage, StageDefinition, Subcheck,
    SubcheckKind, Tolerance,
};

const SUPPORTS: [&str; 3] = ["X only", "Y only", "Both X and Y"];

pub(crate) fn definition() -> Result<ProblemDefinition, ProblemError> {
    ProblemDraft::new("distributed-load", "Canal gate under water pressure")
        .statement(
            "A 3 m tall canal gate is pinned at A, level with the water surface, and held \
             by a smooth stop at B at the bottom. Water pressure loads the gate linearly \
             from 0 kN/m at the surface to 45 kN/m at the bottom. Find the resultant of \
             the load, where it acts, and the horizontal reactions at A and B.",
        )
        .term("Distributed load", "A force spread over a length, in force per length.")
        .term("Resultant", "The single force equal to the area under the load curve.")
        .term("Centroid", "Where the resultant acts: the centre of the load area.")
        .term("Pin support", "Resists movement in both directions.")
        .term("Roller support", "Resists movement perpendicular to its surface only.")
        .stage(
            StageDefinition::new(Stage::StudyVocab, "Vocabulary").check(Subcheck::new(
                "study.vocab",
                "Tick each term you have reviewed.",
                SubcheckKind::checklist(&[
                    ("Distributed load", true),
                    ("Resultant", true),
                    ("Centroid", true),
                    ("Pin support", false),
                    ("Roller support", false),
                ]),
            )),
        )
        .stage(
            StageDefinition::new(Stage::StudyIdentify, "Givens")
                .check(
                    Subcheck::new(
                        "study.height",
                        "Height of the gate (m).",
                        SubcheckKind::magnitude(3.0, Tolerance::Absolute(0.05)),
                    )
                    .hint("Read the dimension off the figure."),
                )
                .check(
                    Subcheck::new(
                        "study.max_load",
                        "Maximum load intensity (kN/m).",
                        SubcheckKind::magnitude(45.0, Tolerance::Absolute(0.5)),
                    )
                    .hint("Where is the water pressure largest?"),
                )
                .check(
                    Subcheck::new(
                        "study.support_a",
                        "Which reactions can the pin at A provide?",
                        SubcheckKind::categorical("Both X and Y", &SUPPORTS),
                    )
                    .hint("A pin stops translation in every direction."),
                )
                .check(
                    Subcheck::new(
                        "study.support_b",
                        "Which reactions can the stop at B provide?",
                        SubcheckKind::categorical("X only", &SUPPORTS),
                    )
                    .hint("A smooth stop can only push perpendicular to its surface."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Translate, "Free-body diagram").check(
                Subcheck::new(
                    "translate.fbd",
                    "Draw the free-body diagram of the gate: the gate, the load and the reactions.",
                    SubcheckKind::line_count(4, Some(8)),
                )
                .hint_on(
                    FailureReason::TooFewLines,
                    "Every support reaction and the water load need their own arrow.",
                )
                .hint_on(
                    FailureReason::TooManyLines,
                    "Keep the diagram to the gate and the forces acting on it.",
                ),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Assign, "Axes")
                .check(Subcheck::new(
                    "assign.axes",
                    "Take +x pointing downstream and +y up, measured from A. Confirm to continue.",
                    SubcheckKind::Acknowledge,
                ))
                .check(
                    Subcheck::new(
                        "assign.components",
                        "Which force components appear on your diagram?",
                        SubcheckKind::multi_select(&[
                            ("Water load, X", true),
                            ("Pin A, X", true),
                            ("Pin A, Y", true),
                            ("Stop B, X", true),
                            ("Stop B, Y", false),
                        ]),
                    )
                    .after(&["assign.axes"])
                    .hint_on(
                        FailureReason::PickedIncorrect,
                        "What did you decide the stop at B can resist?",
                    ),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Implement, "Plan the solution")
                .check(
                    Subcheck::new(
                        "implement.concept",
                        "How do you replace the distributed load by a single force?",
                        SubcheckKind::keywords(&["area", "centroid"]),
                    )
                    .hint_on(
                        FailureReason::MissingKeyword,
                        "Name both what gives the size of the resultant and where it acts.",
                    ),
                )
                .check(
                    Subcheck::new(
                        "implement.pivot",
                        "About which point will you sum moments first?",
                        SubcheckKind::categorical("Point A", &["Point A", "Point B", "Center of Gate"]),
                    )
                    .hint("Choose the point with the most unknown reactions."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(1), "Resultant")
                .check(
                    Subcheck::new(
                        "compute.resultant",
                        "Magnitude of the resultant FR (kN).",
                        SubcheckKind::magnitude(67.5, Tolerance::Absolute(0.5)),
                    )
                    .hint("Area of the load triangle.")
                    .hint_on(FailureReason::TooHigh, "Triangle, not rectangle: did you forget the 1/2?"),
                )
                .check(
                    Subcheck::new(
                        "compute.centroid",
                        "Location of FR, measured from A at the surface (m).",
                        SubcheckKind::bounded(2.0, Tolerance::Absolute(0.1), 0.0, 3.0),
                    )
                    .hint("A triangle's centroid lies two thirds of the way from its tip.")
                    .hint_on(
                        FailureReason::TooLow,
                        "Measure from the zero-intensity end; the resultant sits toward the heavy end.",
                    ),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(2), "Reactions")
                .check(
                    Subcheck::new(
                        "compute.bx",
                        "Horizontal reaction at B (kN).",
                        SubcheckKind::magnitude(45.0, Tolerance::Absolute(0.5)),
                    )
                    .hint("Sum moments about A."),
                )
                .check(
                    Subcheck::new(
                        "compute.ax",
                        "Horizontal reaction at A (kN).",
                        SubcheckKind::magnitude(22.5, Tolerance::Absolute(0.5)),
                    )
                    .after(&["compute.bx"])
                    .hint("Sum forces in x with the reaction you just found."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::SanityCheck, "Sanity check").check(Subcheck::new(
                "sanity.reflection",
                "Reflect on your result.",
                SubcheckKind::checklist(&[
                    ("Ax + Bx equals the resultant", true),
                    ("The support nearer the resultant carries more", true),
                    ("The resultant acts below the middle of the gate", true),
                ]),
            )),
        )
        .validate()
}
