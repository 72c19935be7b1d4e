//! Module ordering, gating, and progress math. Pure functions over data the
//! handlers fetch; all course-order semantics live here.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{
    activity::ActivityType,
    course::CourseModuleLink,
    module::ModuleStatus,
};

/// Sorts a course's module list into its effective order: explicit `ord`
/// ascending, ties broken by original list position.
pub fn order_modules(mut links: Vec<CourseModuleLink>) -> Vec<CourseModuleLink> {
    links.sort_by_key(|link| (link.ord, link.position));
    links
}

/// The module immediately before `module_id` in course order. `None` when
/// the module is first, or when it does not appear in the course at all
/// (in which case no prerequisite can be enforced).
pub fn prerequisite_of(ordered: &[CourseModuleLink], module_id: Uuid) -> Option<Uuid> {
    let index = ordered.iter().position(|link| link.module_id == module_id)?;
    if index == 0 {
        return None;
    }
    Some(ordered[index - 1].module_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    PrerequisiteNotMet,
    NotEnrolled,
}

/// Gating rule for a module fetched in course context. Prerequisite and
/// enrollment checks are independent; either can deny.
pub fn check_access(
    ordered: &[CourseModuleLink],
    module_id: Uuid,
    passed_modules: &HashSet<Uuid>,
    enrolled: bool,
) -> AccessDecision {
    if let Some(prev) = prerequisite_of(ordered, module_id) {
        if !passed_modules.contains(&prev) {
            return AccessDecision::PrerequisiteNotMet;
        }
    }
    if !enrolled {
        return AccessDecision::NotEnrolled;
    }
    AccessDecision::Granted
}

/// round(100 * completed / total); 0 for an empty course.
pub fn progress_percentage(completed: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// A course with no modules is never considered completed.
pub fn is_course_completed(completed: usize, total: usize) -> bool {
    total > 0 && completed == total
}

/// First module in course order lacking a passing quiz result; `None` when
/// every module is passed.
pub fn next_module(ordered: &[CourseModuleLink], passed_modules: &HashSet<Uuid>) -> Option<Uuid> {
    ordered
        .iter()
        .find(|link| !passed_modules.contains(&link.module_id))
        .map(|link| link.module_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Quiz-derived course progress, recomputed from first principles.
pub struct CourseProgressSummary {
    pub total_modules: usize,
    pub completed_modules: usize,
    pub progress_percentage: i32,
    pub is_finished: bool,
    pub next_module: Option<Uuid>,
}

pub fn quiz_derived_progress(
    ordered: &[CourseModuleLink],
    passed_modules: &HashSet<Uuid>,
) -> CourseProgressSummary {
    let total = ordered.len();
    let completed = ordered
        .iter()
        .filter(|link| passed_modules.contains(&link.module_id))
        .count();

    CourseProgressSummary {
        total_modules: total,
        completed_modules: completed,
        progress_percentage: progress_percentage(completed, total),
        is_finished: is_course_completed(completed, total),
        next_module: next_module(ordered, passed_modules),
    }
}

/// Derives a module's status from its event history (newest first is not
/// required) and the most recent quiz result's pass flag.
pub fn module_status(events: &[ActivityType], latest_result_passed: Option<bool>) -> ModuleStatus {
    if events.is_empty() {
        return ModuleStatus::NotStarted;
    }
    let has_completed = events
        .iter()
        .any(|event| *event == ActivityType::ModuleComplete);
    if has_completed {
        if latest_result_passed == Some(true) {
            ModuleStatus::Completed
        } else {
            ModuleStatus::CompletedNotPassed
        }
    } else {
        ModuleStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(module_id: Uuid, position: i32, ord: i32) -> CourseModuleLink {
        CourseModuleLink {
            module_id,
            position,
            ord,
        }
    }

    fn course(n: usize) -> Vec<CourseModuleLink> {
        (0..n)
            .map(|i| link(Uuid::new_v4(), i as i32, i as i32))
            .collect()
    }

    #[test]
    fn ordering_uses_ord_then_position() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        // b has a lower ord than a; a and c tie on ord, a appears earlier.
        let links = vec![link(a, 0, 5), link(b, 1, 2), link(c, 2, 5)];
        let ordered = order_modules(links);
        let ids: Vec<_> = ordered.iter().map(|l| l.module_id).collect();
        assert_eq!(ids, vec![b, a, c]);
    }

    #[test]
    fn first_module_has_no_prerequisite() {
        let ordered = course(3);
        assert_eq!(prerequisite_of(&ordered, ordered[0].module_id), None);
        assert_eq!(
            prerequisite_of(&ordered, ordered[2].module_id),
            Some(ordered[1].module_id)
        );
        assert_eq!(prerequisite_of(&ordered, Uuid::new_v4()), None);
    }

    #[test]
    fn access_denied_without_prior_pass() {
        let ordered = course(3);
        let empty = HashSet::new();
        assert_eq!(
            check_access(&ordered, ordered[1].module_id, &empty, true),
            AccessDecision::PrerequisiteNotMet
        );
        // position 0 is never denied on prerequisite grounds
        assert_eq!(
            check_access(&ordered, ordered[0].module_id, &empty, true),
            AccessDecision::Granted
        );
    }

    #[test]
    fn access_granted_once_prior_module_passed() {
        let ordered = course(3);
        let passed: HashSet<_> = [ordered[0].module_id].into_iter().collect();
        assert_eq!(
            check_access(&ordered, ordered[1].module_id, &passed, true),
            AccessDecision::Granted
        );
    }

    #[test]
    fn enrollment_check_is_independent_of_prerequisites() {
        let ordered = course(2);
        let passed: HashSet<_> = [ordered[0].module_id].into_iter().collect();
        assert_eq!(
            check_access(&ordered, ordered[1].module_id, &passed, false),
            AccessDecision::NotEnrolled
        );
        assert_eq!(
            check_access(&ordered, ordered[0].module_id, &HashSet::new(), false),
            AccessDecision::NotEnrolled
        );
    }

    #[test]
    fn progress_math_rounds_and_flags_completion() {
        assert_eq!(progress_percentage(0, 3), 0);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(3, 3), 100);
        assert_eq!(progress_percentage(0, 0), 0);
        assert!(is_course_completed(3, 3));
        assert!(!is_course_completed(2, 3));
        // empty course is never completed
        assert!(!is_course_completed(0, 0));
    }

    #[test]
    fn quiz_derived_progress_counts_distinct_passes() {
        let ordered = course(4);
        let passed: HashSet<_> = [ordered[0].module_id, ordered[1].module_id]
            .into_iter()
            .collect();
        let summary = quiz_derived_progress(&ordered, &passed);
        assert_eq!(summary.total_modules, 4);
        assert_eq!(summary.completed_modules, 2);
        assert_eq!(summary.progress_percentage, 50);
        assert!(!summary.is_finished);
        assert_eq!(summary.next_module, Some(ordered[2].module_id));
    }

    #[test]
    fn next_module_is_none_when_all_passed() {
        let ordered = course(2);
        let passed: HashSet<_> = ordered.iter().map(|l| l.module_id).collect();
        assert_eq!(next_module(&ordered, &passed), None);
        let summary = quiz_derived_progress(&ordered, &passed);
        assert!(summary.is_finished);
        assert_eq!(summary.progress_percentage, 100);
    }

    #[test]
    fn module_status_follows_events_and_latest_result() {
        use ActivityType::*;
        assert_eq!(module_status(&[], None), ModuleStatus::NotStarted);
        assert_eq!(
            module_status(&[ModuleStart], None),
            ModuleStatus::InProgress
        );
        assert_eq!(
            module_status(&[ModuleStart, ModuleComplete], Some(true)),
            ModuleStatus::Completed
        );
        assert_eq!(
            module_status(&[ModuleStart, ModuleComplete], Some(false)),
            ModuleStatus::CompletedNotPassed
        );
        assert_eq!(
            module_status(&[ModuleComplete], None),
            ModuleStatus::CompletedNotPassed
        );
    }
}
