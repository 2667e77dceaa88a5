//! Task view engine
//!
//! Turns a task snapshot into the ordered list to display:
//! search filter, then status filter, then priority filter, then sort.
//!
//! View options are parsed leniently. An unrecognized sort key keeps the
//! input order and an unrecognized filter keeps every task, so a stale or
//! hand-edited config never breaks listing.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::task::{Priority, Task, TaskStatus};

/// Sort order for the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending due date
    #[default]
    DueDate,
    /// High before Medium before Low
    Priority,
    /// Ascending subject, locale-style collation
    Subject,
    /// Ascending status label
    Status,
    /// Input order
    Unsorted,
}

impl SortKey {
    /// Keys a user can pick, in menu order
    pub const CHOICES: [SortKey; 4] = [
        SortKey::DueDate,
        SortKey::Priority,
        SortKey::Subject,
        SortKey::Status,
    ];

    /// Parses a sort key, falling back to [`SortKey::Unsorted`]
    pub fn parse_lenient(s: &str) -> Self {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "duedate" | "due" => SortKey::DueDate,
            "priority" => SortKey::Priority,
            "subject" => SortKey::Subject,
            "status" => SortKey::Status,
            _ => SortKey::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DueDate => "dueDate",
            SortKey::Priority => "priority",
            SortKey::Subject => "subject",
            SortKey::Status => "status",
            SortKey::Unsorted => "none",
        }
    }

    /// Next key in menu order
    pub fn cycle(&self) -> Self {
        match self {
            SortKey::DueDate => SortKey::Priority,
            SortKey::Priority => SortKey::Subject,
            SortKey::Subject => SortKey::Status,
            SortKey::Status | SortKey::Unsorted => SortKey::DueDate,
        }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
            SortKey::Priority => b.priority.rank().cmp(&a.priority.rank()),
            SortKey::Subject => compare_text(&a.subject, &b.subject),
            SortKey::Status => a.status.label().cmp(b.status.label()),
            SortKey::Unsorted => Ordering::Equal,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale-style collation: base letters first, then accents, then case.
fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Lowercased text with diacritics stripped ("Économie" -> "economie")
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Status filter stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Parses a filter, falling back to [`StatusFilter::All`]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().map(StatusFilter::Only).unwrap_or(StatusFilter::All)
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == *status,
        }
    }

    /// All, then each status in workflow order
    pub fn cycle(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(TaskStatus::Pending),
            StatusFilter::Only(TaskStatus::Pending) => StatusFilter::Only(TaskStatus::InProgress),
            StatusFilter::Only(TaskStatus::InProgress) => StatusFilter::Only(TaskStatus::Completed),
            StatusFilter::Only(TaskStatus::Completed) => StatusFilter::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => f.write_str(status.label()),
        }
    }
}

/// Priority filter stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Parses a filter, falling back to [`PriorityFilter::All`]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().map(PriorityFilter::Only).unwrap_or(PriorityFilter::All)
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == *priority,
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            PriorityFilter::All => PriorityFilter::Only(Priority::High),
            PriorityFilter::Only(Priority::High) => PriorityFilter::Only(Priority::Medium),
            PriorityFilter::Only(Priority::Medium) => PriorityFilter::Only(Priority::Low),
            PriorityFilter::Only(Priority::Low) => PriorityFilter::All,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str("All"),
            PriorityFilter::Only(priority) => f.write_str(priority.label()),
        }
    }
}

/// Query options for [`compute_view`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewConfig {
    /// Case-insensitive text matched against title, subject and notes
    pub search_query: String,
    pub filter_status: StatusFilter,
    pub filter_priority: PriorityFilter,
    pub sort_by: SortKey,
}

impl ViewConfig {
    /// Builds a config from raw option strings, degrading unknown values
    pub fn from_options(search: &str, status: &str, priority: &str, sort_by: &str) -> Self {
        Self {
            search_query: search.to_string(),
            filter_status: StatusFilter::parse_lenient(status),
            filter_priority: PriorityFilter::parse_lenient(priority),
            sort_by: SortKey::parse_lenient(sort_by),
        }
    }

    /// Returns true if any stage narrows the collection
    pub fn is_filtering(&self) -> bool {
        !self.search_query.is_empty()
            || self.filter_status != StatusFilter::All
            || self.filter_priority != PriorityFilter::All
    }

    /// Runs the filter stages on a single task
    pub fn keeps(&self, task: &Task) -> bool {
        let query = self.search_query.to_lowercase();
        self.keeps_with_query(task, &query)
    }

    fn keeps_with_query(&self, task: &Task, query_lower: &str) -> bool {
        (query_lower.is_empty() || task.matches_query(query_lower))
            && self.filter_status.matches(task)
            && self.filter_priority.matches(task)
    }
}

/// Serializable summary of the active view options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewSummary {
    pub search: String,
    pub status: String,
    pub priority: String,
    pub sort_by: String,
}

impl From<&ViewConfig> for ViewSummary {
    fn from(config: &ViewConfig) -> Self {
        Self {
            search: config.search_query.clone(),
            status: config.filter_status.to_string(),
            priority: config.filter_priority.to_string(),
            sort_by: config.sort_by.to_string(),
        }
    }
}

/// Computes the filtered, ordered view of a task snapshot.
///
/// Equal sort keys are ordered by ascending ID. With [`SortKey::Unsorted`]
/// the surviving tasks keep their input order.
pub fn compute_view(tasks: &[Task], config: &ViewConfig) -> Vec<Task> {
    let query = config.search_query.to_lowercase();

    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| config.keeps_with_query(task, &query))
        .cloned()
        .collect();

    if config.sort_by != SortKey::Unsorted {
        view.sort_by(|a, b| config.sort_by.compare(a, b).then_with(|| a.id.cmp(&b.id)));
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskDraft, TaskId};
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn task(id: i64, subject: &str, title: &str, due: &str, priority: Priority, status: TaskStatus) -> Task {
        TaskDraft::new(subject, title, NaiveDate::parse_from_str(due, "%Y-%m-%d").unwrap())
            .with_priority(priority)
            .with_status(status)
            .into_task(TaskId::new(id), Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
            .unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Mathematics", "Chapter 5 exercises", "2025-03-10", Priority::High, TaskStatus::Pending),
            task(2, "history", "Essay draft", "2025-03-01", Priority::Low, TaskStatus::Completed),
            task(3, "Biology", "Lab notes", "2025-03-05", Priority::Medium, TaskStatus::InProgress),
            task(4, "Art", "Sketchbook", "2025-03-05", Priority::High, TaskStatus::Pending),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.id.value()).collect()
    }

    #[test]
    fn search_matches_single_subject() {
        let config = ViewConfig {
            search_query: "math".into(),
            ..Default::default()
        };
        assert_eq!(ids(&compute_view(&sample(), &config)), vec![1]);
    }

    #[test]
    fn search_is_case_insensitive_and_checks_notes() {
        let mut tasks = sample();
        tasks[2].notes = Some("Bring the MICROSCOPE slides".into());

        let config = ViewConfig {
            search_query: "Microscope".into(),
            ..Default::default()
        };
        assert_eq!(ids(&compute_view(&tasks, &config)), vec![3]);
    }

    #[test]
    fn filters_compose() {
        let config = ViewConfig {
            filter_status: StatusFilter::Only(TaskStatus::Pending),
            filter_priority: PriorityFilter::Only(Priority::High),
            ..Default::default()
        };
        assert_eq!(ids(&compute_view(&sample(), &config)), vec![4, 1]);
    }

    #[test]
    fn sort_by_due_date_breaks_ties_by_id() {
        let config = ViewConfig::default();
        assert_eq!(ids(&compute_view(&sample(), &config)), vec![2, 3, 4, 1]);
    }

    #[test]
    fn sort_by_priority_descends() {
        let config = ViewConfig {
            sort_by: SortKey::Priority,
            ..Default::default()
        };
        assert_eq!(ids(&compute_view(&sample(), &config)), vec![1, 4, 3, 2]);
    }

    #[test]
    fn sort_by_subject_ignores_case() {
        let config = ViewConfig {
            sort_by: SortKey::Subject,
            ..Default::default()
        };
        // Art, Biology, history, Mathematics
        assert_eq!(ids(&compute_view(&sample(), &config)), vec![4, 3, 2, 1]);
    }

    #[test]
    fn sort_by_subject_places_accented_letters_with_base_letter() {
        let status = TaskStatus::Pending;
        let tasks = vec![
            task(1, "Zoology", "Field notes", "2025-03-01", Priority::Low, status),
            task(2, "Économie", "Case study", "2025-03-01", Priority::Low, status),
            task(3, "Art", "Sketchbook", "2025-03-01", Priority::Low, status),
            task(4, "economie", "Reading", "2025-03-01", Priority::Low, status),
            task(5, "Economie", "Quiz", "2025-03-01", Priority::Low, status),
        ];
        let config = ViewConfig {
            sort_by: SortKey::Subject,
            ..Default::default()
        };
        let subjects: Vec<_> = compute_view(&tasks, &config)
            .into_iter()
            .map(|t| t.subject)
            .collect();
        // Unaccented before accented, exact text last
        assert_eq!(subjects, vec!["Art", "Economie", "economie", "Économie", "Zoology"]);
    }

    #[test]
    fn sort_by_status_label() {
        let config = ViewConfig {
            sort_by: SortKey::Status,
            ..Default::default()
        };
        // Completed, In Progress, Pending (1 then 4)
        assert_eq!(ids(&compute_view(&sample(), &config)), vec![2, 3, 1, 4]);
    }

    #[test]
    fn unknown_options_degrade_to_no_op() {
        let config = ViewConfig::from_options("", "Archived", "Urgent", "colour");
        assert_eq!(config.filter_status, StatusFilter::All);
        assert_eq!(config.filter_priority, PriorityFilter::All);
        assert_eq!(config.sort_by, SortKey::Unsorted);

        assert_eq!(ids(&compute_view(&sample(), &config)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn from_options_understands_browser_values() {
        let config = ViewConfig::from_options("lab", "In Progress", "Medium", "dueDate");
        assert_eq!(config.filter_status, StatusFilter::Only(TaskStatus::InProgress));
        assert_eq!(config.filter_priority, PriorityFilter::Only(Priority::Medium));
        assert_eq!(config.sort_by, SortKey::DueDate);
        assert!(config.is_filtering());
    }

    #[test]
    fn empty_collection_gives_empty_view() {
        assert!(compute_view(&[], &ViewConfig::default()).is_empty());
    }

    #[test]
    fn cycles_return_to_start() {
        let mut key = SortKey::DueDate;
        for _ in 0..SortKey::CHOICES.len() {
            key = key.cycle();
        }
        assert_eq!(key, SortKey::DueDate);

        assert_eq!(StatusFilter::All.cycle().cycle().cycle().cycle(), StatusFilter::All);
        assert_eq!(PriorityFilter::All.cycle().cycle().cycle().cycle(), PriorityFilter::All);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn arb_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Pending),
            Just(TaskStatus::InProgress),
            Just(TaskStatus::Completed),
        ]
    }

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
    }

    fn arb_sort() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::DueDate),
            Just(SortKey::Priority),
            Just(SortKey::Subject),
            Just(SortKey::Status),
        ]
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(
            ("[A-Za-z]{1,8}", 0u32..60, arb_priority(), arb_status()),
            0..24,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (subject, offset, priority, status))| {
                    let due = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                        + chrono::Days::new(u64::from(offset));
                    let mut t = task(i as i64 + 1, &subject, "Work", "2025-01-01", priority, status);
                    t.due_date = due;
                    t
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn unfiltered_view_is_sorted_permutation(tasks in arb_tasks(), sort_by in arb_sort()) {
            let config = ViewConfig { sort_by, ..Default::default() };
            let view = compute_view(&tasks, &config);

            let mut expected = ids(&tasks);
            let mut actual = ids(&view);
            expected.sort();
            actual.sort();
            prop_assert_eq!(expected, actual);

            for pair in view.windows(2) {
                prop_assert_ne!(sort_by.compare(&pair[0], &pair[1]), Ordering::Greater);
            }
        }

        #[test]
        fn status_filter_keeps_exactly_matching(tasks in arb_tasks(), status in arb_status()) {
            let config = ViewConfig {
                filter_status: StatusFilter::Only(status),
                ..Default::default()
            };
            let view = compute_view(&tasks, &config);

            prop_assert!(view.iter().all(|t| t.status == status));
            prop_assert_eq!(view.len(), tasks.iter().filter(|t| t.status == status).count());
        }

        #[test]
        fn priority_sort_groups_by_rank(tasks in arb_tasks()) {
            let config = ViewConfig { sort_by: SortKey::Priority, ..Default::default() };
            let view = compute_view(&tasks, &config);

            let ranks: Vec<u8> = view.iter().map(|t| t.priority.rank()).collect();
            prop_assert!(ranks.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
