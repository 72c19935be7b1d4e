use std::collections::HashSet;

use learntrack_backend::{
    models::{activity::ActivityType, course::CourseModuleLink, module::ModuleStatus},
    services::progression::{
        check_access, is_course_completed, module_status, next_module, order_modules,
        prerequisite_of, progress_percentage, quiz_derived_progress, AccessDecision,
    },
};
use uuid::Uuid;

fn course_of(n: usize) -> Vec<CourseModuleLink> {
    (0..n)
        .map(|i| CourseModuleLink {
            module_id: Uuid::new_v4(),
            position: i as i32,
            ord: (i as i32) * 10, // non-contiguous order keys
        })
        .collect()
}

#[test]
fn explicit_order_wins_over_list_position() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let links = vec![
        CourseModuleLink {
            module_id: second,
            position: 0,
            ord: 20,
        },
        CourseModuleLink {
            module_id: first,
            position: 1,
            ord: 10,
        },
    ];
    let ordered = order_modules(links);
    assert_eq!(ordered[0].module_id, first);
    assert_eq!(ordered[1].module_id, second);
}

#[test]
fn order_ties_break_by_list_position() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let links = vec![
        CourseModuleLink {
            module_id: a,
            position: 0,
            ord: 5,
        },
        CourseModuleLink {
            module_id: b,
            position: 1,
            ord: 5,
        },
    ];
    let ordered = order_modules(links);
    assert_eq!(ordered[0].module_id, a);
    assert_eq!(ordered[1].module_id, b);
}

#[test]
fn gating_requires_pass_on_immediately_preceding_module() {
    let ordered = course_of(4);
    let target = ordered[2].module_id;

    // passing module 0 is not enough; the gate looks at module 1
    let passed: HashSet<_> = [ordered[0].module_id].into_iter().collect();
    assert_eq!(
        check_access(&ordered, target, &passed, true),
        AccessDecision::PrerequisiteNotMet
    );

    let passed: HashSet<_> = [ordered[1].module_id].into_iter().collect();
    assert_eq!(
        check_access(&ordered, target, &passed, true),
        AccessDecision::Granted
    );
}

#[test]
fn first_module_never_denied_on_prerequisite_grounds() {
    let ordered = course_of(3);
    assert_eq!(prerequisite_of(&ordered, ordered[0].module_id), None);
    assert_eq!(
        check_access(&ordered, ordered[0].module_id, &HashSet::new(), true),
        AccessDecision::Granted
    );
}

#[test]
fn module_outside_course_has_no_prerequisite_but_still_needs_enrollment() {
    let ordered = course_of(2);
    let foreign = Uuid::new_v4();
    assert_eq!(prerequisite_of(&ordered, foreign), None);
    assert_eq!(
        check_access(&ordered, foreign, &HashSet::new(), false),
        AccessDecision::NotEnrolled
    );
    assert_eq!(
        check_access(&ordered, foreign, &HashSet::new(), true),
        AccessDecision::Granted
    );
}

#[test]
fn progress_tracks_k_passes_over_n_modules() {
    for n in 1..=6usize {
        let ordered = course_of(n);
        for k in 0..=n {
            let passed: HashSet<_> = ordered[..k].iter().map(|l| l.module_id).collect();
            let summary = quiz_derived_progress(&ordered, &passed);
            assert_eq!(summary.completed_modules, k);
            assert_eq!(
                summary.progress_percentage,
                ((k as f64 / n as f64) * 100.0).round() as i32
            );
            assert_eq!(summary.is_finished, k == n);
            if k < n {
                assert_eq!(summary.next_module, Some(ordered[k].module_id));
            } else {
                assert_eq!(summary.next_module, None);
            }
        }
    }
}

#[test]
fn next_module_skips_passed_modules_in_order() {
    let ordered = course_of(3);
    // only the middle module is passed: the next unpassed one is the first
    let passed: HashSet<_> = [ordered[1].module_id].into_iter().collect();
    assert_eq!(next_module(&ordered, &passed), Some(ordered[0].module_id));
}

#[test]
fn empty_course_is_zero_percent_and_never_finished() {
    assert_eq!(progress_percentage(0, 0), 0);
    assert!(!is_course_completed(0, 0));
    let summary = quiz_derived_progress(&[], &HashSet::new());
    assert_eq!(summary.progress_percentage, 0);
    assert!(!summary.is_finished);
    assert_eq!(summary.next_module, None);
}

#[test]
fn module_status_reflects_latest_quiz_result() {
    let events = [ActivityType::ModuleStart, ActivityType::ModuleComplete];
    assert_eq!(module_status(&events, Some(true)), ModuleStatus::Completed);
    assert_eq!(
        module_status(&events, Some(false)),
        ModuleStatus::CompletedNotPassed
    );
    assert_eq!(
        module_status(&events, None),
        ModuleStatus::CompletedNotPassed
    );
    assert_eq!(
        module_status(&[ActivityType::View], None),
        ModuleStatus::InProgress
    );
    assert_eq!(module_status(&[], Some(true)), ModuleStatus::NotStarted);
}
