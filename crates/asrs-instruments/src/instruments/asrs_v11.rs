use std::collections::BTreeSet;

use asrs_core::models::answer::{AnswerMap, QuestionId, ResponseValue, MAX_RESPONSE, QUESTION_COUNT};

use crate::error::InstrumentError;
use crate::scoring::{
    Category, Interpretation, Question, ResponseOption, ResultSummary, ScreenerItem,
};
use crate::Instrument;

/// ASRS-v1.1: Adult ADHD Self-Report Scale, version 1.1.
/// 18 items rated 0–4. Items 1–6 form the screener (Part A); a screener
/// score of 4 or more is positive. Total 0–72.
pub struct AsrsV11;

pub const ID: &str = "asrs_v11";

/// Screener items at or above threshold needed for a positive screen.
pub const SCREENER_POSITIVE_CUT: u32 = 4;

pub const MAX_SCORE: u32 = QUESTION_COUNT as u32 * MAX_RESPONSE as u32;

const fn id(n: u8) -> QuestionId {
    match QuestionId::new(n) {
        Some(id) => id,
        None => panic!("question id outside the catalog"),
    }
}

const fn value(n: u8) -> ResponseValue {
    match ResponseValue::new(n) {
        Some(v) => v,
        None => panic!("response value outside 0..=4"),
    }
}

const fn question(n: u8, category: Category, text: &'static str) -> Question {
    Question {
        id: id(n),
        text,
        category,
        is_screener: n <= 6,
    }
}

pub static QUESTIONS: [Question; QUESTION_COUNT as usize] = [
    question(1, Category::Inattention, "How often do you have trouble wrapping up the final details of a project, once the challenging parts have been done?"),
    question(2, Category::Inattention, "How often do you have difficulty getting things in order when you have to do a task that requires organization?"),
    question(3, Category::Inattention, "How often do you have problems remembering appointments or obligations?"),
    question(4, Category::Inattention, "When you have a task that requires a lot of thought, how often do you avoid or delay getting started?"),
    question(5, Category::Hyperactivity, "How often do you fidget or squirm with your hands or feet when you have to sit down for a long time?"),
    question(6, Category::Hyperactivity, "How often do you feel overly active and compelled to do things, like you were driven by a motor?"),
    question(7, Category::Inattention, "How often do you make careless mistakes when you have to work on a boring or difficult project?"),
    question(8, Category::Inattention, "How often do you have difficulty keeping your attention when you are doing boring or repetitive work?"),
    question(9, Category::Inattention, "How often do you have difficulty concentrating on what people say to you, even when they are speaking to you directly?"),
    question(10, Category::Inattention, "How often do you misplace or have difficulty finding things at home or at work?"),
    question(11, Category::Inattention, "How often are you distracted by activity or noise around you?"),
    question(12, Category::Hyperactivity, "How often do you leave your seat in meetings or other situations where you are expected to remain seated?"),
    question(13, Category::Hyperactivity, "How often do you feel restless or fidgety?"),
    question(14, Category::Hyperactivity, "How often do you have difficulty unwinding and relaxing when you have time to yourself?"),
    question(15, Category::Hyperactivity, "How often do you find yourself talking too much when you are in social situations?"),
    question(16, Category::Hyperactivity, "When you're in a conversation, how often do you find yourself finishing the sentences of the people you are talking to, before they can finish them themselves?"),
    question(17, Category::Hyperactivity, "How often do you have difficulty waiting your turn in situations when turn taking is required?"),
    question(18, Category::Hyperactivity, "How often do you interrupt others when they are busy?"),
];

pub static RESPONSE_OPTIONS: [ResponseOption; 5] = [
    ResponseOption { value: value(0), label: "Never", accent: "#22c55e" },
    ResponseOption { value: value(1), label: "Rarely", accent: "#3b82f6" },
    ResponseOption { value: value(2), label: "Sometimes", accent: "#eab308" },
    ResponseOption { value: value(3), label: "Often", accent: "#f97316" },
    ResponseOption { value: value(4), label: "Very Often", accent: "#ef4444" },
];

pub static SCREENER: [ScreenerItem; 6] = [
    ScreenerItem { id: id(1), threshold: 2 },
    ScreenerItem { id: id(2), threshold: 2 },
    ScreenerItem { id: id(3), threshold: 2 },
    ScreenerItem { id: id(4), threshold: 2 },
    ScreenerItem { id: id(5), threshold: 3 },
    ScreenerItem { id: id(6), threshold: 3 },
];

pub static INATTENTION_IDS: [QuestionId; 9] =
    [id(1), id(2), id(3), id(4), id(7), id(8), id(9), id(10), id(11)];

pub static HYPERACTIVITY_IDS: [QuestionId; 9] =
    [id(5), id(6), id(12), id(13), id(14), id(15), id(16), id(17), id(18)];

pub const DISCLAIMER: &str = "Important: This assessment is not a substitute for professional diagnosis. \
If you have concerns about ADHD symptoms, please consult with a healthcare provider.";

pub const CITATION: &str = "ASRS-v1.1: Adult ADHD Self-Report Scale (ASRS-v1.1) Screener and Symptoms Checklist. \
The ASRS v1.1 Screener was developed by the World Health Organization (WHO) in collaboration with the \
Workgroup on Adult ADHD. Kessler, R. C., Adler, L., Ames, M., et al. (2005). The World Health Organization \
Adult ADHD Self-Report Scale (ASRS): a short screening scale for use in the general population. \
Psychological Medicine, 35(2), 245-256.";

/// Score any answer map, complete or not. Unanswered items count as 0.
pub fn score(answers: &AnswerMap) -> ResultSummary {
    let screener_score = SCREENER
        .iter()
        .filter(|item| answers.value_or_never(item.id) >= item.threshold)
        .count() as u32;

    let inattention_score = subscale_sum(answers, &INATTENTION_IDS);
    let hyperactivity_score = subscale_sum(answers, &HYPERACTIVITY_IDS);

    ResultSummary {
        screener_score,
        screener_positive: screener_score >= SCREENER_POSITIVE_CUT,
        inattention_score,
        hyperactivity_score,
        total_score: inattention_score + hyperactivity_score,
        max_score: MAX_SCORE,
        answered_count: answers.len() as u32,
    }
}

fn subscale_sum(answers: &AnswerMap, ids: &[QuestionId]) -> u32 {
    ids.iter()
        .map(|id| u32::from(answers.value_or_never(*id)))
        .sum()
}

pub fn interpret(summary: &ResultSummary) -> Interpretation {
    if summary.screener_positive {
        Interpretation {
            positive: true,
            title: "Screener Positive",
            message: "Your responses suggest symptoms consistent with ADHD. This screening tool \
                      indicates you may benefit from a comprehensive evaluation by a qualified \
                      healthcare professional.",
        }
    } else {
        Interpretation {
            positive: false,
            title: "Screener Negative",
            message: "Your responses suggest symptoms are less consistent with ADHD. However, \
                      this is a screening tool and not a diagnostic instrument.",
        }
    }
}

/// Cross-check the static tables against each other. Run once at startup so
/// a data-entry mistake fails loudly instead of skewing scores.
pub fn validate_catalog() -> Result<(), InstrumentError> {
    let fail = |reason: String| InstrumentError::Catalog {
        instrument_id: ID.to_string(),
        reason,
    };

    for (index, q) in QUESTIONS.iter().enumerate() {
        if q.id.index() != index {
            return Err(fail(format!("question {} is listed at position {index}", q.id)));
        }
    }

    let screener_flagged: BTreeSet<QuestionId> =
        QUESTIONS.iter().filter(|q| q.is_screener).map(|q| q.id).collect();
    let screener_scored: BTreeSet<QuestionId> = SCREENER.iter().map(|s| s.id).collect();
    if screener_flagged != screener_scored || screener_scored.len() != SCREENER.len() {
        return Err(fail("screener flags disagree with screener thresholds".to_string()));
    }
    if let Some(item) = SCREENER.iter().find(|s| s.threshold > MAX_RESPONSE) {
        return Err(fail(format!("screener threshold for {} is unreachable", item.id)));
    }

    let inattention: BTreeSet<QuestionId> = INATTENTION_IDS.iter().copied().collect();
    let hyperactivity: BTreeSet<QuestionId> = HYPERACTIVITY_IDS.iter().copied().collect();
    if inattention.len() != INATTENTION_IDS.len() || hyperactivity.len() != HYPERACTIVITY_IDS.len() {
        return Err(fail("subscale id set contains duplicates".to_string()));
    }
    if let Some(shared) = inattention.intersection(&hyperactivity).next() {
        return Err(fail(format!("question {shared} is in both subscales")));
    }
    if inattention.len() + hyperactivity.len() != QUESTIONS.len() {
        return Err(fail("subscales do not cover every question".to_string()));
    }
    for q in &QUESTIONS {
        let expected = if inattention.contains(&q.id) {
            Category::Inattention
        } else {
            Category::Hyperactivity
        };
        if q.category != expected {
            return Err(fail(format!(
                "question {} is tagged {} but scored as {}",
                q.id,
                q.category.label(),
                expected.label()
            )));
        }
    }

    for (expected, option) in RESPONSE_OPTIONS.iter().enumerate() {
        if usize::from(option.value.get()) != expected {
            return Err(fail(format!("response option '{}' is out of order", option.label)));
        }
    }

    Ok(())
}

impl Instrument for AsrsV11 {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "ASRS-v1.1"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn response_options(&self) -> &[ResponseOption] {
        &RESPONSE_OPTIONS
    }

    fn score(&self, answers: &AnswerMap) -> ResultSummary {
        score(answers)
    }

    fn validate_catalog(&self) -> Result<(), InstrumentError> {
        validate_catalog()
    }
}
