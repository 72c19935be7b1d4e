//! Quiz scoring. Pure: the handler fetches questions and submitted answers,
//! this module decides correctness, score, and pass/fail.

use crate::models::quiz::{QuizQuestion, SubmittedAnswer};

/// Fixed pass threshold; not configurable per quiz.
pub const PASS_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub correct: u32,
    pub total: u32,
    pub score: u32,
    pub passed: bool,
}

/// Maps a positional option index to its presentation label (0 -> "A").
pub fn option_label(index: usize) -> String {
    char::from(b'A' + (index as u8 % 26)).to_string()
}

/// Resolves a submitted option label back to its index. Only a leading
/// ASCII uppercase letter counts; anything else is treated as unanswerable
/// and skipped by the scorer.
pub fn label_to_index(label: &str) -> Option<usize> {
    let first = label.chars().next()?;
    if first.is_ascii_uppercase() {
        Some((first as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Scores a submission against the quiz's full question list.
///
/// Answers referencing an unknown question id, or carrying a malformed
/// option label, are silently ignored: not an error, not counted correct.
/// The denominator is always the quiz's full question count, so partial
/// submissions cannot reach 100%.
pub fn score_submission(questions: &[QuizQuestion], answers: &[SubmittedAnswer]) -> ScoreOutcome {
    let total = questions.len() as u32;
    let mut correct = 0u32;

    for answer in answers {
        let Some(question) = questions
            .iter()
            .find(|q| q.id.to_string() == answer.question_id)
        else {
            continue;
        };
        let Some(selected) = label_to_index(&answer.selected_option) else {
            continue;
        };
        if selected == question.answer as usize {
            correct += 1;
        }
    }

    let score = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    };

    ScoreOutcome {
        correct,
        total,
        score,
        passed: score >= PASS_THRESHOLD,
    }
}
