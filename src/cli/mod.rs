pub mod create;
pub mod prompt;
pub mod view;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use create::{create_tracker, CreateCommand, CreateOutcome};
use prompt::{AssumeYes, Prompter, TerminalPrompter};
use tracing::{info, level_filters::LevelFilter};

use crate::{
    storage::tracker_store::{TrackerStore, DEFAULT_DATA_FILE},
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Deepwork", version, long_about = None)]
#[command(about = "Track daily tasks over a month", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE, help = "File trackers are stored in")]
    data: PathBuf,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Generate a new tracker")]
    Create {
        #[command(flatten)]
        command: CreateCommand,
    },
    #[command(about = "List existing trackers")]
    List {},
    #[command(about = "Show the day/task grid of a tracker")]
    Show { label: String },
    #[command(about = "Mark a task as done for a day")]
    Check {
        label: String,
        day: u32,
        task: String,
        #[arg(long, help = "Clear the mark instead")]
        undo: bool,
    },
    #[command(about = "Show the completion rate of a tracker")]
    Progress { label: String },
    #[command(about = "Delete a tracker")]
    Delete {
        label: String,
        #[arg(long, short, help = "Delete without asking")]
        yes: bool,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    // Logs are optional, the tracker itself only needs the data file.
    let log_dir = match create_application_default_path() {
        Ok(dir) => Some(dir.join("logs")),
        Err(e) => {
            eprintln!("File logging disabled: {e}");
            None
        }
    };
    enable_logging(CLI_PREFIX, log_dir.as_deref(), logging_level, args.log)?;

    let mut store = TrackerStore::load(&args.data)
        .with_context(|| format!("Can't read trackers from {:?}", args.data))?;

    let stdin = io::stdin();
    let mut prompter = TerminalPrompter::new(stdin.lock(), io::stdout());
    execute(
        args.commands,
        &mut store,
        &DefaultClock,
        &mut prompter,
        &mut io::stdout().lock(),
    )
}

/// Runs a single command against the store. Every change is saved before returning.
fn execute(
    command: Commands,
    store: &mut TrackerStore,
    clock: &impl Clock,
    prompter: &mut dyn Prompter,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Create { command } => {
            let mut assume_yes = AssumeYes;
            let prompter: &mut dyn Prompter = if command.yes {
                &mut assume_yes
            } else {
                prompter
            };
            let (label, outcome) = create_tracker(store, command, clock, prompter)?;
            match outcome {
                CreateOutcome::Kept => writeln!(out, "Kept the existing tracker for {label}")?,
                CreateOutcome::Created | CreateOutcome::Replaced => {
                    show_tracker(store, &label, out)?
                }
            }
        }
        Commands::List {} => {
            writeln!(out, "{}", view::labels_overview(store.list_labels()))?;
        }
        Commands::Show { label } => show_tracker(store, &label, out)?,
        Commands::Check {
            label,
            day,
            task,
            undo,
        } => check_task(store, &label, day, &task, !undo, out)?,
        Commands::Progress { label } => match store.completion_ratio(&label) {
            Some(ratio) => write!(out, "{}", view::completion_report(ratio))?,
            None => not_found(&label, out)?,
        },
        Commands::Delete { label, yes } => {
            if !store.contains(&label) {
                not_found(&label, out)?;
            } else if yes
                || prompter.confirm(&format!(
                    "Are you sure you want to delete the tracker for '{label}'?"
                ))?
            {
                store.delete(&label)?;
                store.save()?;
                writeln!(out, "Tracker for {label} has been deleted.")?;
            }
        }
    }
    writeln!(out, "{}", view::footer(clock.today()))?;
    Ok(())
}

fn show_tracker(store: &TrackerStore, label: &str, out: &mut impl Write) -> Result<()> {
    match store.get(label) {
        Some(tracker) => write!(out, "{}", view::render_tracker(label, tracker))?,
        None => not_found(label, out)?,
    }
    Ok(())
}

/// Equivalent of ticking a checkbox in the grid: only cells the grid shows can be changed, and
/// the change is saved right away.
fn check_task(
    store: &mut TrackerStore,
    label: &str,
    day: u32,
    task: &str,
    completed: bool,
    out: &mut impl Write,
) -> Result<()> {
    let Some(tracker) = store.get(label) else {
        return not_found(label, out);
    };
    if !tracker.has_cell(day, task) {
        bail!(
            "{label} has no cell for day {day} and task {task:?}. Days go from 1 to {} and tasks are {:?}",
            tracker.days,
            tracker.tasks
        );
    }

    store.set_progress(label, day, task, completed)?;
    store.save()?;
    info!("Marked {label:?} day {day} {task:?} as {completed}");

    if let Some(ratio) = store.completion_ratio(label) {
        writeln!(out, "{}", view::progress_line(ratio))?;
    }
    Ok(())
}

fn not_found(label: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "No tracker found for {label}")?;
    Ok(())
}
