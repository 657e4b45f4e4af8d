use statics_core::model::{
    FailureReason, ProblemDefinition, ProblemDraft, ProblemError, Stage, StageDefinition, Subcheck,
    SubcheckKind, Tolerance,
};

// F1 = 400 N @ 30°, F2 = 250 N @ 135°; F3 closes the triangle.
const GAMMA_DEG: f64 = 75.0;
const F3_N: f64 = 413.2;
const THETA3_DEG: f64 = 245.76;

pub(crate) fn definition() -> Result<ProblemDefinition, ProblemError> {
    ProblemDraft::new("force-triangle", "Three cables on a smooth ring")
        .statement(
            "A smooth ring is held in equilibrium by three cables. Cable 1 pulls with \
             F1 = 400 N at 30° above the +x axis and cable 2 pulls with F2 = 250 N at \
             135° from +x. Find the magnitude and direction of the force F3 in the \
             third cable.",
        )
        .term("Equilibrium", "The vector sum of all forces on the body is zero.")
        .term(
            "Force triangle",
            "Three forces in equilibrium drawn head-to-tail form a closed triangle.",
        )
        .term("Head-to-tail", "Each vector starts where the previous one ends.")
        .term("Smooth ring", "A ring with no friction; cables meet at one point.")
        .term("Cable", "Can only pull, along its own line.")
        .term("Magnitude", "The size of a force, always non-negative.")
        .term("Direction", "The angle of a force, measured CCW from +x.")
        .stage(
            StageDefinition::new(Stage::StudyVocab, "Vocabulary").check(
                Subcheck::new(
                    "study.vocab",
                    "Tick each term you have reviewed.",
                    SubcheckKind::checklist(&[
                        ("Equilibrium", true),
                        ("Force triangle", true),
                        ("Head-to-tail", false),
                        ("Smooth ring", false),
                        ("Cable", false),
                        ("Magnitude", false),
                        ("Direction", false),
                    ]),
                )
                .hint("Equilibrium and the force triangle carry the whole problem. Review both."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::StudyIdentify, "Givens and target")
                .check(
                    Subcheck::new(
                        "study.givens",
                        "Which of these are given in the problem?",
                        SubcheckKind::multi_select(&[
                            ("F1 = 400 N", true),
                            ("F1 acts 30° above +x", true),
                            ("F2 = 250 N", true),
                            ("F2 acts at 135° from +x", true),
                            ("The system is in equilibrium", true),
                            ("The ring is smooth", true),
                            ("The mass of the ring", false),
                            ("A coefficient of friction", false),
                            ("The moment about O", false),
                            ("A distributed load", false),
                        ]),
                    )
                    .hint("Re-read the statement and pick only what it actually states.")
                    .hint_on(
                        FailureReason::PickedIncorrect,
                        "Something you picked is never mentioned in the statement.",
                    )
                    .hint_on(
                        FailureReason::MissedCorrect,
                        "The statement gives more than the two magnitudes.",
                    ),
                )
                .check(
                    Subcheck::new(
                        "study.targets",
                        "What are you asked to find?",
                        SubcheckKind::multi_select(&[
                            ("The magnitude |F3|", true),
                            ("The direction of F3", true),
                            ("The position of O", false),
                            ("The mass of the ring", false),
                            ("The tension in a fourth cable", false),
                        ]),
                    )
                    .after(&["study.givens"])
                    .hint("A force has two unknowns in the plane. What are they for F3?"),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Translate, "Force triangle").check(
                Subcheck::new(
                    "translate.triangle",
                    "Draw F1, F2 and F3 head-to-tail to scale and label each line.",
                    SubcheckKind::drawing(&[("F1", 30.0), ("F2", 135.0), ("F3", THETA3_DEG)], 12.0)
                        .with_ratio("F1", "F2", 1.6, 20.0),
                )
                .hint("Check each arrow's direction against the statement.")
                .hint_on(
                    FailureReason::Misaligned,
                    "Measure each direction counter-clockwise from +x. F3 must close the triangle.",
                )
                .hint_on(
                    FailureReason::RatioOff,
                    "Scale matters: F1 should be noticeably longer than F2.",
                ),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Assign, "Axes and assumptions")
                .check(Subcheck::new(
                    "assign.axes",
                    "Take +x to the right and +y up, angles CCW from +x. The ring is a \
                     particle and the cables are straight. Confirm to continue.",
                    SubcheckKind::Acknowledge,
                ))
                .check(practice("assign.f1x", "F1x (N)", 346.41))
                .check(practice("assign.f1y", "F1y (N)", 200.0))
                .check(practice("assign.f2x", "F2x (N)", -176.78))
                .check(practice("assign.f2y", "F2y (N)", 176.78)),
        )
        .stage(
            StageDefinition::new(Stage::Implement, "Plan the solution")
                .check(Subcheck::new(
                    "implement.plan",
                    "You will use the law of cosines for |F3| and the law of sines for its \
                     angle. Confirm to continue.",
                    SubcheckKind::Acknowledge,
                ))
                .check(
                    Subcheck::new(
                        "implement.equations",
                        "Before solving, tick what holds for your equations.",
                        SubcheckKind::checklist(&[
                            ("Signs match the chosen axes", true),
                            ("Every force on the ring is included", true),
                            ("The unknowns can be identified", true),
                        ]),
                    )
                    .optional(),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(1), "Interior angle").check(
                Subcheck::new(
                    "compute.gamma",
                    "Interior angle γ between F1 and F2 in the triangle (degrees).",
                    SubcheckKind::bounded(GAMMA_DEG, Tolerance::Absolute(5.0), 0.0, 180.0),
                )
                .hint("Use the directions of F1 and F2 and the head-to-tail geometry.")
                .hint_on(
                    FailureReason::TooHigh,
                    "That is the angle between the lines of action, not the triangle's interior angle.",
                ),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(2), "Magnitude").check(
                Subcheck::new(
                    "compute.f3",
                    "|F3| (N)",
                    SubcheckKind::magnitude(F3_N, Tolerance::Absolute(2.0)),
                )
                .hint("Law of cosines with the two known sides and the angle between them."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(3), "Direction").check(
                Subcheck::new(
                    "compute.theta3",
                    "Direction θ3 of F3, degrees CCW from +x (0-360).",
                    SubcheckKind::direction(THETA3_DEG, 8.0),
                )
                .hint("F3 must cancel the resultant of F1 and F2. Which way does that point?"),
            ),
        )
        .stage(
            StageDefinition::new(Stage::SanityCheck, "Sanity check")
                .check(
                    Subcheck::new(
                        "sanity.quadrant",
                        "Does your θ3 point into the third quadrant?",
                        SubcheckKind::captured_direction("compute.theta3", THETA3_DEG, 20.0, (180.0, 270.0)),
                    )
                    .hint_on(
                        FailureReason::WrongQuadrant,
                        "F1 and F2 both pull up. The balancing force must pull down and left.",
                    ),
                )
                .check(
                    Subcheck::new(
                        "sanity.triangle",
                        "Triangle inequality: |F1 - F2| <= |F3| <= F1 + F2.",
                        SubcheckKind::captured_range("compute.f3", 150.0, 650.0),
                    )
                    .hint("No side of a triangle can exceed the sum of the other two."),
                )
                .check(
                    Subcheck::new(
                        "sanity.ballpark",
                        "Is |F3| in the right ballpark for this force system?",
                        SubcheckKind::captured_range("compute.f3", F3_N * 0.8, F3_N * 1.2),
                    )
                    .hint("Compare with your scaled drawing. Does the length agree?"),
                )
                .check(Subcheck::new(
                    "sanity.reflection",
                    "Reflect on your result.",
                    SubcheckKind::checklist(&[
                        ("F3 points into the expected quadrant", true),
                        ("The triangle closes", true),
                        ("The computed values match the drawing", true),
                        ("I could explain what would happen if the ring accelerated", false),
                    ]),
                )),
        )
        .validate()
}

fn practice(id: &str, prompt: &str, expected: f64) -> Subcheck {
    Subcheck::new(id, prompt, SubcheckKind::numeric(expected, Tolerance::Absolute(1.0)))
        .optional()
        .hint("Project the force onto the axis: magnitude times cos or sin of its angle from +x.")
}
