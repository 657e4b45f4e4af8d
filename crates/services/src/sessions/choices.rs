use rand::rng;
use rand::seq::SliceRandom;
use rand::Rng;

use statics_core::model::SubcheckKind;

/// Option labels in the order they should be shown.
///
/// Authored order is kept unless `shuffle` is set. Kinds without options
/// yield an empty list.
#[must_use]
pub fn presented_choices(kind: &SubcheckKind, shuffle: bool) -> Vec<String> {
    presented_choices_with(kind, shuffle, &mut rng())
}

pub(crate) fn presented_choices_with<R: Rng + ?Sized>(
    kind: &SubcheckKind,
    shuffle: bool,
    rng: &mut R,
) -> Vec<String> {
    let mut labels: Vec<String> = kind
        .choice_labels()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    if shuffle {
        labels.shuffle(rng);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn kind() -> SubcheckKind {
        SubcheckKind::multi_select(&[
            ("Weight W = 500 lb", true),
            ("Tension T is horizontal", true),
            ("Corner A is smooth", false),
            ("Radius = 4 ft", true),
            ("Reaction at B = 0", true),
        ])
    }

    #[test]
    fn authored_order_without_shuffle() {
        let labels = presented_choices(&kind(), false);
        assert_eq!(labels[0], "Weight W = 500 lb");
        assert_eq!(labels[4], "Reaction at B = 0");
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = presented_choices_with(&kind(), true, &mut rng);
        let mut authored = presented_choices(&kind(), false);
        shuffled.sort();
        authored.sort();
        assert_eq!(shuffled, authored);
    }

    #[test]
    fn non_choice_kinds_have_no_options() {
        assert!(presented_choices(&SubcheckKind::Acknowledge, true).is_empty());
    }
}
