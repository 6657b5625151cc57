//! Text rendering of trackers: the day × task grid, the progress line and the completion report.

use ansi_term::{Colour, Style};

use crate::{
    storage::entities::{CompletionRatio, Tracker},
    utils::time::footer_date,
};

const DAY_COLUMN: &str = "Day";
const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";

fn header_style() -> Style {
    Colour::Green.bold()
}

fn checked_style() -> Style {
    Colour::Green.normal()
}

fn progress_style() -> Style {
    Colour::Yellow.bold()
}

fn muted_style() -> Style {
    Colour::Fixed(245).normal()
}

fn centered(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}

/// Renders the header, one row per day and the progress line.
pub fn render_tracker(label: &str, tracker: &Tracker) -> String {
    let day_width = DAY_COLUMN.len().max(tracker.days.to_string().len());
    let widths = tracker
        .tasks
        .iter()
        .map(|task| task.chars().count().max(CHECKED.len()))
        .collect::<Vec<_>>();

    let mut lines = vec![
        header_style().paint(label).to_string(),
        progress_style()
            .paint(progress_line(tracker.completion_ratio()))
            .to_string(),
        String::new(),
    ];

    let mut header = Style::new().bold().paint(format!("{DAY_COLUMN:<day_width$}")).to_string();
    for (task, width) in tracker.tasks.iter().zip(&widths) {
        header.push_str("  ");
        header.push_str(&Style::new().bold().paint(centered(task, *width)).to_string());
    }
    lines.push(header);

    let separator_width = day_width + widths.iter().map(|w| w + 2).sum::<usize>();
    lines.push(muted_style().paint("-".repeat(separator_width)).to_string());

    for day in 1..=tracker.days {
        let mut row = format!("{day:<day_width$}");
        for (task, width) in tracker.tasks.iter().zip(&widths) {
            row.push_str("  ");
            let cell = if tracker.is_completed(day, task) {
                checked_style().paint(centered(CHECKED, *width))
            } else {
                muted_style().paint(centered(UNCHECKED, *width))
            };
            row.push_str(&cell.to_string());
        }
        lines.push(row);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// "Progress: 1/6 (16.7%)"
pub fn progress_line(ratio: CompletionRatio) -> String {
    match ratio.percentage() {
        Some(percentage) => format!(
            "Progress: {}/{} ({percentage})",
            ratio.completed, ratio.total
        ),
        None => "Progress: 0/0 (0%)".to_string(),
    }
}

/// Report shown when the user checks how far along they are.
pub fn completion_report(ratio: CompletionRatio) -> String {
    let message = match ratio.percentage() {
        Some(percentage) => format!(
            "Your completion rate: {percentage}\n({} out of {} tasks completed)",
            ratio.completed, ratio.total
        ),
        None => "No tasks tracked yet.".to_string(),
    };
    format!(
        "{}\nHurrah! You're one step away from becoming\nthe best version of yourself!\n\n{message}\n",
        header_style().paint("Congratulations!")
    )
}

pub fn labels_overview<'a>(labels: impl IntoIterator<Item = &'a str>) -> String {
    let labels = labels.into_iter().collect::<Vec<_>>();
    if labels.is_empty() {
        "No existing trackers found. Create a new one first.".to_string()
    } else {
        format!("Available trackers: {}", labels.join(", "))
    }
}

pub fn footer(today: chrono::NaiveDate) -> String {
    muted_style()
        .paint(format!("Today: {}", footer_date(today)))
        .to_string()
}
