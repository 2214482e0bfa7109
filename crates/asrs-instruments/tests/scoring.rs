use asrs_core::models::answer::{AnswerMap, QuestionId, ResponseValue};
use asrs_instruments::instruments::asrs_v11::{self, AsrsV11};
use asrs_instruments::scoring::ResultSummary;
use asrs_instruments::Instrument;

fn answers(pairs: &[(u8, u8)]) -> AnswerMap {
    pairs
        .iter()
        .map(|(id, value)| {
            (
                QuestionId::try_from(*id).unwrap(),
                ResponseValue::try_from(*value).unwrap(),
            )
        })
        .collect()
}

fn all(value: u8) -> AnswerMap {
    let pairs: Vec<(u8, u8)> = (1..=18).map(|id| (id, value)).collect();
    answers(&pairs)
}

#[test]
fn empty_answers_score_zero_and_negative() {
    let result = asrs_v11::score(&AnswerMap::new());
    assert_eq!(
        result,
        ResultSummary {
            screener_score: 0,
            screener_positive: false,
            inattention_score: 0,
            hyperactivity_score: 0,
            total_score: 0,
            max_score: 72,
            answered_count: 0,
        }
    );
}

#[test]
fn screener_at_thresholds_is_positive() {
    let result = asrs_v11::score(&answers(&[(1, 2), (2, 2), (3, 2), (4, 2), (5, 3), (6, 3)]));
    assert_eq!(result.screener_score, 6);
    assert!(result.screener_positive);
    assert_eq!(result.inattention_score, 8);
    assert_eq!(result.hyperactivity_score, 6);
    assert_eq!(result.total_score, 14);
    assert_eq!(result.answered_count, 6);
}

#[test]
fn all_very_often_reaches_maximum() {
    let result = asrs_v11::score(&all(4));
    assert_eq!(result.total_score, 72);
    assert_eq!(result.total_score, result.max_score);
    assert_eq!(result.screener_score, 6);
    assert!(result.screener_positive);
    assert_eq!(result.answered_count, 18);
}

#[test]
fn screener_just_below_thresholds_scores_zero() {
    let result = asrs_v11::score(&answers(&[(1, 1), (2, 1), (3, 1), (4, 1), (5, 2), (6, 2)]));
    assert_eq!(result.screener_score, 0);
    assert!(!result.screener_positive);
}

#[test]
fn screener_cut_is_four_items() {
    let three = asrs_v11::score(&answers(&[(1, 4), (2, 4), (3, 4)]));
    assert_eq!(three.screener_score, 3);
    assert!(!three.screener_positive);

    let four = asrs_v11::score(&answers(&[(1, 4), (2, 4), (3, 4), (6, 3)]));
    assert_eq!(four.screener_score, 4);
    assert!(four.screener_positive);
}

#[test]
fn non_screener_answers_only_affect_subscales() {
    let result = asrs_v11::score(&answers(&[(7, 4), (12, 3)]));
    assert_eq!(result.screener_score, 0);
    assert_eq!(result.inattention_score, 4);
    assert_eq!(result.hyperactivity_score, 3);
}

#[test]
fn scoring_is_deterministic_and_totals_add_up() {
    let maps = [
        AnswerMap::new(),
        all(0),
        all(2),
        all(4),
        answers(&[(1, 3), (5, 4), (9, 1), (18, 2)]),
    ];
    for map in &maps {
        let first = asrs_v11::score(map);
        assert_eq!(first, asrs_v11::score(map));
        assert_eq!(
            first.total_score,
            first.inattention_score + first.hyperactivity_score
        );
        assert!(first.total_score <= 72);
        assert!(first.screener_score <= 6);
    }
}

#[test]
fn interpretation_follows_screener_flag() {
    let positive = asrs_v11::interpret(&asrs_v11::score(&all(4)));
    assert!(positive.positive);
    assert_eq!(positive.title, "Screener Positive");

    let negative = asrs_v11::interpret(&asrs_v11::score(&AnswerMap::new()));
    assert!(!negative.positive);
    assert_eq!(negative.title, "Screener Negative");
}

#[test]
fn trait_score_matches_free_function() {
    let map = answers(&[(2, 3), (14, 1)]);
    assert_eq!(AsrsV11.score(&map), asrs_v11::score(&map));
}
