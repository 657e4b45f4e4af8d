use statics_core::model::{
    FailureReason, ProblemDefinition, ProblemDraft, ProblemError, Stage, StageDefinition, Subcheck,
    SubcheckKind, Tolerance,
};

const TENSION: &str = "Tension (T)";
const COMPRESSION: &str = "Compression (C)";
const RIGHT_SECTION: &str = "The right section (nodes H through L)";

pub(crate) fn definition() -> Result<ProblemDefinition, ProblemError> {
    ProblemDraft::new("method-sections", "Method of sections: Fink roof truss")
        .statement(
            "A Fink roof truss spans 6 panels of 5 m (30 m) with its peak at node F, \
             8 m high. Top loads of 1 kN act at B, D, F, H and J; bottom loads of 5 kN \
             act at C, E and G. Determine the forces in members FH, GH and GI and \
             whether each is in tension or compression.",
        )
        .term("Method of sections", "Cut the truss and balance one whole piece.")
        .term("Section cut", "A cut through at most three members with unknown forces.")
        .term("Moment point", "A point where two unknown lines of action meet.")
        .stage(
            StageDefinition::new(Stage::StudyVocab, "Vocabulary").check(Subcheck::new(
                "study.vocab",
                "Tick each term you have reviewed.",
                SubcheckKind::checklist(&[
                    ("Method of sections", true),
                    ("Section cut", true),
                    ("Moment point", false),
                ]),
            )),
        )
        .stage(
            StageDefinition::new(Stage::StudyIdentify, "Givens").check(
                Subcheck::new(
                    "study.givens",
                    "Which statements are true?",
                    SubcheckKind::multi_select(&[
                        ("The truss is symmetrically loaded", false),
                        ("The truss geometry is symmetric", true),
                        ("The method of sections is more efficient than joints here", true),
                        ("The total downward load is 20 kN", true),
                    ]),
                )
                .hint_on(
                    FailureReason::PickedIncorrect,
                    "Compare the loads at C, E and G with those right of the peak.",
                ),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Translate, "Section free-body diagram")
                .check(
                    Subcheck::new(
                        "translate.section",
                        "Which piece of the cut truss should you analyze?",
                        SubcheckKind::categorical(
                            RIGHT_SECTION,
                            &["The left section (nodes A through G)", RIGHT_SECTION],
                        ),
                    )
                    .hint("Pick the piece with fewer loads on it."),
                )
                .check(
                    Subcheck::new(
                        "translate.fbd",
                        "Draw the free-body diagram of the right section.",
                        SubcheckKind::line_count(4, None),
                    )
                    .after(&["translate.section"])
                    .hint("Include the three cut members, the two 1 kN loads and the reaction at L."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Assign, "Global reaction").check(
                Subcheck::new(
                    "assign.ly",
                    "Vertical reaction at L, Ly (kN).",
                    SubcheckKind::magnitude(7.5, Tolerance::Absolute(0.2)),
                )
                .hint("Sum moments about A for the whole truss."),
            ),
        )
        .stage(
            StageDefinition::new(Stage::Implement, "Geometry and moment point")
                .check(
                    Subcheck::new(
                        "implement.height_h",
                        "Vertical height of node H (m).",
                        SubcheckKind::magnitude(5.333, Tolerance::Absolute(0.1)),
                    )
                    .hint("The top chord falls linearly from 8 m at F to 0 at L."),
                )
                .check(
                    Subcheck::new(
                        "implement.moment_point",
                        "To find F_GI directly, where should you sum moments?",
                        SubcheckKind::categorical("Node H", &["Node G", "Node H", "Node F"]),
                    )
                    .hint("Choose the node where the other two cut members meet."),
                ),
        )
        .stage(
            StageDefinition::new(Stage::Compute(1), "Bottom chord GI")
                .check(
                    Subcheck::new(
                        "compute.fgi",
                        "Magnitude of F_GI (kN).",
                        SubcheckKind::magnitude(13.1, Tolerance::Absolute(0.2)),
                    )
                    .hint("About H, only Ly, the load at J and F_GI have moment arms."),
                )
                .check(state("compute.fgi_state", "Is GI in tension or compression?", TENSION)),
        )
        .stage(
            StageDefinition::new(Stage::Compute(2), "Top chord FH")
                .check(
                    Subcheck::new(
                        "compute.ffh",
                        "Magnitude of F_FH (kN).",
                        SubcheckKind::magnitude(13.8, Tolerance::Absolute(0.2)),
                    )
                    .hint("Sum moments about G, where GH and GI meet."),
                )
                .check(state("compute.ffh_state", "Is FH in tension or compression?", COMPRESSION)),
        )
        .stage(
            StageDefinition::new(Stage::Compute(3), "Web member GH")
                .check(
                    Subcheck::new(
                        "compute.fgh",
                        "Magnitude of F_GH (kN).",
                        SubcheckKind::magnitude(1.37, Tolerance::Absolute(0.1)),
                    )
                    .hint("With F_GI and F_FH known, sum forces in one direction.")
                    .hint_on(FailureReason::TooHigh, "Web members in a roof truss usually carry small forces."),
                )
                .check(state("compute.fgh_state", "Is GH in tension or compression?", COMPRESSION)),
        )
        .stage(
            StageDefinition::new(Stage::SanityCheck, "Sanity check").check(Subcheck::new(
                "sanity.reflection",
                "Reflect on your result.",
                SubcheckKind::checklist(&[
                    ("The top chord is in compression", true),
                    ("The bottom chord is in tension", true),
                    ("The web force is much smaller than the chord forces", true),
                ]),
            )),
        )
        .validate()
}

fn state(id: &str, prompt: &str, expected: &str) -> Subcheck {
    Subcheck::new(id, prompt, SubcheckKind::categorical(expected, &[TENSION, COMPRESSION]))
        .hint("Assume tension; a negative result means compression.")
}
