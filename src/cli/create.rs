//! The creation form. Raw user input is validated here, the store trusts whatever it receives.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::{
    storage::tracker_store::TrackerStore,
    utils::{
        clock::Clock,
        time::{default_days_for, month_label},
    },
};

use super::prompt::Prompter;

pub const DEFAULT_TASKS: &str = "Meditation, Reading, Exercise";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Tracker name can't be empty")]
    EmptyLabel,
    #[error("Number of days must be a whole number, got {0:?}")]
    InvalidDays(String),
    #[error("Number of days must be at least 1, got {0}")]
    NonPositiveDays(i64),
    #[error("At least one task is required")]
    EmptyTasks,
}

#[derive(Debug, Parser)]
pub struct CreateCommand {
    #[arg(long, short, help = "Name of the tracker. Defaults to the current month")]
    label: Option<String>,
    #[arg(
        long,
        short,
        help = "Number of days. Defaults to the length of the named month, or 30"
    )]
    days: Option<String>,
    #[arg(
        long,
        short,
        help = "Comma-separated tasks to track, e.g. \"Running, Meditation, Reading\"",
        default_value = DEFAULT_TASKS
    )]
    tasks: String,
    #[arg(long, short, help = "Overwrite an existing tracker without asking")]
    pub yes: bool,
}

/// Validated contents of the creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTracker {
    pub label: String,
    pub days: u32,
    pub tasks: Vec<String>,
}

impl NewTracker {
    pub fn parse(label: &str, days: &str, tasks: &str) -> Result<Self, InputError> {
        if label.is_empty() {
            return Err(InputError::EmptyLabel);
        }
        Ok(Self {
            label: label.to_owned(),
            days: parse_days(days)?,
            tasks: parse_tasks(tasks)?,
        })
    }
}

pub fn parse_days(input: &str) -> Result<u32, InputError> {
    let days = input
        .trim()
        .parse::<i64>()
        .map_err(|_| InputError::InvalidDays(input.to_owned()))?;
    if days < 1 {
        return Err(InputError::NonPositiveDays(days));
    }
    u32::try_from(days).map_err(|_| InputError::InvalidDays(input.to_owned()))
}

/// Splits on commas and trims every name. Names left empty after trimming are kept as columns,
/// only a completely empty input is rejected.
pub fn parse_tasks(input: &str) -> Result<Vec<String>, InputError> {
    if input.is_empty() {
        return Err(InputError::EmptyTasks);
    }
    Ok(input.split(',').map(|t| t.trim().to_owned()).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Replaced,
    /// The user didn't want to overwrite an existing tracker. Nothing changed.
    Kept,
}

/// Fills in defaults, validates the form, confirms overwriting and persists the new tracker.
/// Returns the label of the tracker alongside the outcome.
pub fn create_tracker(
    store: &mut TrackerStore,
    CreateCommand {
        label,
        days,
        tasks,
        yes: _,
    }: CreateCommand,
    clock: &impl Clock,
    prompter: &mut dyn Prompter,
) -> Result<(String, CreateOutcome)> {
    let today = clock.today();
    let label = label.unwrap_or_else(|| month_label(today));
    let days = days.unwrap_or_else(|| default_days_for(&label, today).to_string());

    let form = NewTracker::parse(&label, &days, &tasks)?;

    let exists = store.contains(&form.label);
    if exists
        && !prompter.confirm(&format!(
            "A tracker for {} already exists. Overwrite?",
            form.label
        ))?
    {
        info!("Kept existing tracker {:?}", form.label);
        return Ok((form.label, CreateOutcome::Kept));
    }

    store.create_or_replace(form.label.clone(), form.days, form.tasks);
    store
        .save()
        .with_context(|| format!("Failed to save tracker {}", form.label))?;

    let outcome = if exists {
        CreateOutcome::Replaced
    } else {
        CreateOutcome::Created
    };
    Ok((form.label, outcome))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use clap::Parser;
    use mockall::predicate::eq;
    use tempfile::tempdir;

    use crate::{
        cli::prompt::MockPrompter,
        storage::tracker_store::{TrackerStore, DEFAULT_DATA_FILE},
        utils::clock::MockClock,
    };

    use super::{
        create_tracker, parse_days, parse_tasks, CreateCommand, CreateOutcome, InputError,
        NewTracker,
    };

    fn october_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_today()
            .returning(|| NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        clock
    }

    fn command(args: &[&str]) -> CreateCommand {
        CreateCommand::parse_from(std::iter::once("create").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("31"), Ok(31));
        assert_eq!(parse_days(" 7 "), Ok(7));
        assert_eq!(parse_days("0"), Err(InputError::NonPositiveDays(0)));
        assert_eq!(parse_days("-3"), Err(InputError::NonPositiveDays(-3)));
        assert_eq!(
            parse_days("thirty"),
            Err(InputError::InvalidDays("thirty".into()))
        );
        assert_eq!(parse_days(""), Err(InputError::InvalidDays("".into())));
    }

    #[test]
    fn test_parse_tasks() {
        assert_eq!(
            parse_tasks(" Running ,Meditation,  Reading"),
            Ok(vec!["Running".into(), "Meditation".into(), "Reading".into()])
        );
        assert_eq!(
            parse_tasks("Read,,Read"),
            Ok(vec!["Read".into(), "".into(), "Read".into()])
        );
        assert_eq!(parse_tasks(""), Err(InputError::EmptyTasks));
    }

    #[test]
    fn test_parse_tasks_keeps_blank_names() {
        assert_eq!(parse_tasks("   "), Ok(vec!["".to_string()]));
        assert_eq!(parse_tasks(","), Ok(vec!["".to_string(), "".to_string()]));
    }

    #[test]
    fn test_new_tracker_rejects_empty_label() {
        assert_eq!(NewTracker::parse("", "3", "Read"), Err(InputError::EmptyLabel));
    }

    #[test]
    fn test_new_tracker_accepts_blank_label_and_tasks() {
        assert_eq!(
            NewTracker::parse("  ", "3", "  "),
            Ok(NewTracker {
                label: "  ".into(),
                days: 3,
                tasks: vec!["".into()],
            })
        );
    }

    #[test]
    fn test_defaults_from_clock() -> Result<()> {
        let dir = tempdir()?;
        let mut store = TrackerStore::load(dir.path().join(DEFAULT_DATA_FILE))?;
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();

        let (label, outcome) =
            create_tracker(&mut store, command(&[]), &october_clock(), &mut prompter)?;

        assert_eq!(label, "October");
        assert_eq!(outcome, CreateOutcome::Created);
        let tracker = store.get("October").unwrap();
        assert_eq!(tracker.days, 31);
        assert_eq!(tracker.tasks, vec!["Meditation", "Reading", "Exercise"]);
        assert!(tracker.progress.is_empty());
        Ok(())
    }

    #[test]
    fn test_default_days_for_named_month() -> Result<()> {
        let dir = tempdir()?;
        let mut store = TrackerStore::load(dir.path().join(DEFAULT_DATA_FILE))?;
        let mut prompter = MockPrompter::new();

        create_tracker(
            &mut store,
            command(&["--label", "February"]),
            &october_clock(),
            &mut prompter,
        )?;
        create_tracker(
            &mut store,
            command(&["--label", "Reading club"]),
            &october_clock(),
            &mut prompter,
        )?;

        assert_eq!(store.get("February").map(|t| t.days), Some(28));
        assert_eq!(store.get("Reading club").map(|t| t.days), Some(30));
        Ok(())
    }

    #[test]
    fn test_invalid_input_never_reaches_store() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_DATA_FILE);
        let mut store = TrackerStore::load(&path)?;
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();

        for args in [
            &["--label", "March", "--days", "0"][..],
            &["--label", "March", "--days", "abc"][..],
            &["--label", "March", "--days", "3", "--tasks", ""][..],
            &["--label", "", "--days", "3"][..],
        ] {
            let result = create_tracker(&mut store, command(args), &october_clock(), &mut prompter);
            let error = result.expect_err("input should be rejected");
            assert!(error.downcast_ref::<InputError>().is_some());
        }

        assert!(store.list_labels().is_empty());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_overwrite_confirmed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_DATA_FILE);
        let mut store = TrackerStore::load(&path)?;
        store.create_or_replace("March", 31, vec!["Read".into(), "Run".into()]);
        store.set_progress("March", 2, "Run", true)?;

        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .with(eq("A tracker for March already exists. Overwrite?"))
            .times(1)
            .returning(|_| Ok(true));

        let (_, outcome) = create_tracker(
            &mut store,
            command(&["--label", "March", "--days", "30", "--tasks", "Swim, Write"]),
            &october_clock(),
            &mut prompter,
        )?;

        assert_eq!(outcome, CreateOutcome::Replaced);
        let reloaded = TrackerStore::load(&path)?;
        let march = reloaded.get("March").unwrap();
        assert_eq!(march.days, 30);
        assert_eq!(march.tasks, vec!["Swim", "Write"]);
        assert!(march.progress.is_empty());
        Ok(())
    }

    #[test]
    fn test_overwrite_declined() -> Result<()> {
        let dir = tempdir()?;
        let mut store = TrackerStore::load(dir.path().join(DEFAULT_DATA_FILE))?;
        store.create_or_replace("March", 31, vec!["Read".into()]);
        store.set_progress("March", 2, "Read", true)?;
        let before = store.trackers().clone();

        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().times(1).returning(|_| Ok(false));

        let (_, outcome) = create_tracker(
            &mut store,
            command(&["--label", "March", "--tasks", "Swim"]),
            &october_clock(),
            &mut prompter,
        )?;

        assert_eq!(outcome, CreateOutcome::Kept);
        assert_eq!(store.trackers(), &before);
        Ok(())
    }
}
