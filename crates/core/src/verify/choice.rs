use std::collections::BTreeSet;

use crate::model::{ChoiceItem, FailureReason};

use super::{InputError, Verdict};

/// Exact, case-sensitive match against the authored option.
///
/// # Errors
///
/// Returns `InputError::UnknownChoice` when the value is not an option.
pub fn verify_categorical(expected: &str, choices: &[String], submitted: &str) -> Result<Verdict, InputError> {
    if !choices.iter().any(|choice| choice == submitted) {
        return Err(InputError::UnknownChoice(submitted.to_string()));
    }
    Ok(Verdict::check(submitted == expected, FailureReason::Mismatch))
}

fn ensure_known(items: &[ChoiceItem], selected: &BTreeSet<String>) -> Result<(), InputError> {
    match selected
        .iter()
        .find(|label| !items.iter().any(|item| &item.label == *label))
    {
        Some(unknown) => Err(InputError::UnknownChoice(unknown.clone())),
        None => Ok(()),
    }
}

/// All correct items and no incorrect item. Feedback reports counts only.
///
/// # Errors
///
/// Returns `InputError::UnknownChoice` when a label is not an option.
pub fn verify_multi_select(items: &[ChoiceItem], selected: &BTreeSet<String>) -> Result<Verdict, InputError> {
    ensure_known(items, selected)?;

    let total_correct = items.iter().filter(|item| item.correct).count();
    let (correct_picked, incorrect_picked) =
        items
            .iter()
            .filter(|item| selected.contains(&item.label))
            .fold((0usize, 0usize), |(good, bad), item| {
                if item.correct { (good + 1, bad) } else { (good, bad + 1) }
            });

    let verdict = if incorrect_picked > 0 {
        Verdict::fail(FailureReason::PickedIncorrect)
    } else if correct_picked < total_correct {
        Verdict::fail(FailureReason::MissedCorrect)
    } else {
        Verdict::pass()
    };

    Ok(verdict
        .with("correct_picked", correct_picked)
        .with("total_correct", total_correct)
        .with("incorrect_picked", incorrect_picked))
}

/// Every required item ticked; optional items may be ticked or not.
///
/// # Errors
///
/// Returns `InputError::UnknownChoice` when a label is not an option.
pub fn verify_checklist(items: &[ChoiceItem], selected: &BTreeSet<String>) -> Result<Verdict, InputError> {
    ensure_known(items, selected)?;

    let required: Vec<&ChoiceItem> = items.iter().filter(|item| item.correct).collect();
    let ticked = required
        .iter()
        .filter(|item| selected.contains(&item.label))
        .count();

    Ok(Verdict::check(ticked == required.len(), FailureReason::MissingRequired)
        .with("required_ticked", ticked)
        .with("total_required", required.len()))
}

/// Free text must mention every keyword, ignoring case and surrounding space.
///
/// # Errors
///
/// Returns `InputError::EmptyText` for a blank answer.
pub fn verify_keywords(keywords: &[String], submitted: &str) -> Result<Verdict, InputError> {
    let text = submitted.trim().to_lowercase();
    if text.is_empty() {
        return Err(InputError::EmptyText);
    }

    let wanted: Vec<String> = keywords
        .iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect();
    let found = wanted.iter().filter(|kw| text.contains(kw.as_str())).count();

    Ok(Verdict::check(found == wanted.len(), FailureReason::MissingKeyword)
        .with("keywords_found", found)
        .with("keywords_total", wanted.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::DiagnosticValue;
    use proptest::prelude::*;

    fn givens() -> Vec<ChoiceItem> {
        [
            ("F1 = 400 N", true),
            ("F2 = 250 N", true),
            ("θ1 = 30°", true),
            ("θ2 = 135°", true),
            ("F3 = 413 N", false),
            ("Ring mass", false),
        ]
        .into_iter()
        .map(|(label, correct)| ChoiceItem::new(label, correct))
        .collect()
    }

    fn pick(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn categorical_is_case_sensitive() {
        let choices = vec!["Tension".to_string(), "Compression".to_string()];
        assert!(verify_categorical("Compression", &choices, "Compression").unwrap().passed);
        let wrong = verify_categorical("Compression", &choices, "Tension").unwrap();
        assert_eq!(wrong.reason, Some(FailureReason::Mismatch));
        assert_eq!(
            verify_categorical("Compression", &choices, "compression").unwrap_err(),
            InputError::UnknownChoice("compression".into())
        );
    }

    #[test]
    fn multi_select_reports_counts_without_naming_items() {
        let items = givens();
        let verdict =
            verify_multi_select(&items, &pick(&["F1 = 400 N", "F2 = 250 N", "Ring mass"])).unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.reason, Some(FailureReason::PickedIncorrect));
        assert_eq!(verdict.diagnostics["correct_picked"], DiagnosticValue::Count(2));
        assert_eq!(verdict.diagnostics["total_correct"], DiagnosticValue::Count(4));
        assert_eq!(verdict.diagnostics["incorrect_picked"], DiagnosticValue::Count(1));
    }

    #[test]
    fn multi_select_rejects_unknown_labels() {
        assert_eq!(
            verify_multi_select(&givens(), &pick(&["gravity"])).unwrap_err(),
            InputError::UnknownChoice("gravity".into())
        );
    }

    #[test]
    fn checklist_allows_optional_items() {
        let items = vec![
            ChoiceItem::new("I sketched the ring", true),
            ChoiceItem::new("I labelled F3", true),
            ChoiceItem::new("I checked units twice", false),
        ];
        assert!(verify_checklist(&items, &pick(&["I sketched the ring", "I labelled F3"])).unwrap().passed);
        assert!(
            verify_checklist(&items, &pick(&["I sketched the ring", "I labelled F3", "I checked units twice"]))
                .unwrap()
                .passed
        );
        let missing = verify_checklist(&items, &pick(&["I labelled F3"])).unwrap();
        assert_eq!(missing.reason, Some(FailureReason::MissingRequired));
    }

    #[test]
    fn keywords_ignore_case() {
        let keywords = vec!["area".to_string(), "centroid".to_string()];
        assert!(
            verify_keywords(&keywords, "  The AREA of the load acts at its Centroid ")
                .unwrap()
                .passed
        );
        let partial = verify_keywords(&keywords, "area under the curve").unwrap();
        assert_eq!(partial.reason, Some(FailureReason::MissingKeyword));
        assert_eq!(verify_keywords(&keywords, "   ").unwrap_err(), InputError::EmptyText);
    }

    proptest! {
        #[test]
        fn exact_true_set_is_the_only_passing_shape(mask in prop::collection::vec(prop::bool::ANY, 6)) {
            let items = givens();
            let selected: BTreeSet<String> = items
                .iter()
                .zip(&mask)
                .filter(|(_, on)| **on)
                .map(|(item, _)| item.label.clone())
                .collect();
            let exact = items
                .iter()
                .zip(&mask)
                .all(|(item, on)| item.correct == *on);

            let verdict = verify_multi_select(&items, &selected).unwrap();
            prop_assert_eq!(verdict.passed, exact);
        }
    }
}
