use statics_core::model::{
    FailureReason, ProblemDefinition, ProblemDraft, ProblemError, Stage, StageDefinition, Subcheck,
    SubcheckKind, Tolerance,
};

const TENSION: &str = "Tension (T)";
const COMPRESSION: &str = "Compression (C)";

pub(crate) fn definition() -> Result<ProblemDefinition, ProblemError> {
    ProblemDraft::new("method-joints", "Method of joints: right-angled truss")
        .statement(
            "A simple truss is supported by a pin at A and a roller at C. A horizontal \
             force of 500 N acts to the right at joint B. Height AB = 2 m and base \
             AC = 2 m. Determine the force in each member (AB, BC, AC) and whether it \
             is in tension or compression.",
        )
        .term("Two-force member", "A member loaded only at its ends; its force acts along it.")
        .term("Joint", "A pin where members meet; each joint is a particle in equilibrium.")
        .term("Tension", "The member pulls on its joints.")
        .term("Compression", "The member pushes on its joints.")
        .stage(
            StageDefinition::new(Stage::StudyVocab, "Vocabulary").check(Subcheck::new(
                "study.vocab",
                "Tick each term you have reviewed.",
                SubcheckKind::checklist(&[
                    ("Two-force member", true),
                    ("Joint", true),
                    ("Tension", false),
                    ("Compression", false),
                ]),
            )),
        )
        .stage(
            StageDefinition::new(Stage::StudyIdentify, "Givens").check(
                Subcheck::new(
                    "study.givens",
                    "Which statements are true?",
                    SubcheckKind::multi_select(&[
                        ("A 500 N force acts horizontally at joint B", true),
                        ("Support A is a roller", false),
                        ("Support C can only provide a vertical reaction", true),
                        ("The height and base of the truss are both 2 m", true),
                    ]),
                )
                .hint_on(FailureReason::PickedIncorrect, "Check which support is the pin."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Translate, "Joint free-body diagram")
                .check(
                    Subcheck::new(
                        "translate.joint",
                        "Which joint should you analyze first to avoid finding the global reactions?",
                        SubcheckKind::categorical("Joint B", &["Joint A", "Joint B", "Joint C"]),
                    )
                    .hint("Look for a joint with a known load and at most two unknown members."),
                )
                .check(
                    Subcheck::new(
                        "translate.fbd",
                        "Draw the free-body diagram of joint B only.",
                        SubcheckKind::line_count(3, Some(5)),
                    )
                    .after(&["translate.joint"])
                    .hint("Joint B has the applied load and two member forces."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Assign, "Sign convention").check(
                Subcheck::new(
                    "assign.assumption",
                    "When drawing an unknown member force on a joint, what is the standard assumption?",
                    SubcheckKind::categorical(
                        "Assume the member is in tension (pointing away from the joint)",
                        &[
                            "Assume the member is in tension (pointing away from the joint)",
                            "Assume the member is in compression (pointing into the joint)",
                            "Guess based on visual inspection",
                        ],
                    ),
                )
                .hint("With a consistent assumption, the sign of the answer tells you T or C."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Implement, "Components and strategy")
                .check(
                    Subcheck::new(
                        "implement.angle",
                        "Interior angle of member BC relative to the horizontal (degrees).",
                        SubcheckKind::bounded(45.0, Tolerance::Absolute(0.1), 0.0, 90.0),
                    )
                    .hint("Rise and run of BC are both 2 m."),
                )
                .check(
                    Subcheck::new(
                        "implement.x_component",
                        "X component of F_BC, assumed in tension at joint B.",
                        SubcheckKind::categorical(
                            "+F_BC * cos(45°)",
                            &["+F_BC * cos(45°)", "-F_BC * cos(45°)", "+F_BC * sin(45°)"],
                        ),
                    )
                    .after(&["implement.angle"])
                    .hint("From B, which way does member BC run horizontally?"),
                )
                .check(
                    Subcheck::new(
                        "implement.y_component",
                        "Y component of F_BC, assumed in tension at joint B.",
                        SubcheckKind::categorical(
                            "-F_BC * sin(45°)",
                            &["+F_BC * sin(45°)", "-F_BC * sin(45°)", "-F_BC * cos(45°)"],
                        ),
                    )
                    .after(&["implement.angle"])
                    .hint("From B, does member BC run up or down?"),
                )
                .check(
                    Subcheck::new(
                        "implement.strategy",
                        "Which equation solves F_BC directly?",
                        SubcheckKind::categorical(
                            "Sum of Forces in X = 0",
                            &["Sum of Forces in X = 0", "Sum of Forces in Y = 0"],
                        ),
                    )
                    .after(&["implement.x_component", "implement.y_component"])
                    .hint("AB is vertical. In which direction does it contribute nothing?"),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(1), "Member BC")
                .check(
                    Subcheck::new(
                        "compute.fbc",
                        "Magnitude of F_BC (N).",
                        SubcheckKind::magnitude(707.1, Tolerance::Absolute(2.0)),
                    )
                    .hint("500 N must be balanced by the x component of F_BC."),
                )
                .check(state("compute.fbc_state", "Is BC in tension or compression?", COMPRESSION)),
        )
        .stage(
            StageDefinition::new(Stage::Compute(2), "Member AB")
                .check(
                    Subcheck::new(
                        "compute.fab",
                        "Magnitude of F_AB (N).",
                        SubcheckKind::magnitude(500.0, Tolerance::Absolute(1.0)),
                    )
                    .hint("Sum forces in y at joint B with F_BC known."),
                )
                .check(state("compute.fab_state", "Is AB in tension or compression?", TENSION)),
        )
        .stage(
            StageDefinition::new(Stage::Compute(3), "Member AC")
                .check(
                    Subcheck::new(
                        "compute.fac",
                        "Magnitude of F_AC (N).",
                        SubcheckKind::magnitude(500.0, Tolerance::Absolute(1.0)),
                    )
                    .hint("Move to joint C, where only AC and the roller reaction remain."),
                )
                .check(state("compute.fac_state", "Is AC in tension or compression?", TENSION)),
        )
        .stage(
            StageDefinition::new(Stage::SanityCheck, "Sanity check")
                .check(
                    Subcheck::new(
                        "sanity.diagonal",
                        "Is the diagonal force at least the horizontal load?",
                        SubcheckKind::captured_range("compute.fbc", 500.0, 1000.0),
                    )
                    .hint("Only part of F_BC acts horizontally, so F_BC must exceed 500 N."),
                )
                .check(Subcheck::new(
                    "sanity.reflection",
                    "Reflect on your result.",
                    SubcheckKind::checklist(&[
                        ("Every joint balances in x and y", true),
                        ("A negative result meant compression", true),
                        ("The 45° diagonal carries 500 * sqrt(2) N", false),
                    ]),
                )),
        )
        .validate()
}

fn state(id: &str, prompt: &str, expected: &str) -> Subcheck {
    Subcheck::new(id, prompt, SubcheckKind::categorical(expected, &[TENSION, COMPRESSION]))
        .hint("A member pushing on its joint is in compression; pulling means tension.")
}
