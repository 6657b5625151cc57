use std::{collections::BTreeMap, fmt};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::utils::percentage::Percentage;

/// Completion flags of a single day, keyed by task name.
pub type DayProgress = BTreeMap<String, bool>;

/// Sparse day × task grid. Days are keyed by their number written as a string, which is how they
/// are stored on disk. A missing day or task means the cell was never checked.
pub type ProgressGrid = BTreeMap<String, DayProgress>;

/// Converts a day number into the key used by [ProgressGrid].
pub fn day_key(day: u32) -> String {
    day.to_string()
}

/// One period (usually a month) worth of tasks and their completion state.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Tracker {
    pub days: u32,
    /// Column order of the grid. Duplicates are kept and rendered as separate columns.
    pub tasks: Vec<String>,
    pub progress: ProgressGrid,
}

impl Tracker {
    pub fn new(days: u32, tasks: Vec<String>) -> Self {
        Self {
            days,
            tasks,
            progress: ProgressGrid::new(),
        }
    }

    pub fn is_completed(&self, day: u32, task: &str) -> bool {
        self.progress
            .get(&day_key(day))
            .and_then(|cells| cells.get(task))
            .copied()
            .unwrap_or(false)
    }

    /// Sets a single cell. The day entry is created on first use, nothing checks that the cell is
    /// part of the rendered grid.
    pub fn set(&mut self, day: u32, task: &str, completed: bool) {
        self.progress
            .entry(day_key(day))
            .or_default()
            .insert(task.to_owned(), completed);
    }

    /// True if the grid has a row for `day` and a column named `task`.
    pub fn has_cell(&self, day: u32, task: &str) -> bool {
        (1..=self.days).contains(&day) && self.tasks.iter().any(|t| t == task)
    }

    /// Counts completed cells over the whole `days × tasks` grid. Days that were never touched
    /// still count towards the total.
    pub fn completion_ratio(&self) -> CompletionRatio {
        let mut ratio = CompletionRatio::default();
        for day in 1..=self.days {
            let recorded = self.progress.get(&day_key(day));
            for task in &self.tasks {
                ratio.total += 1;
                if recorded
                    .and_then(|cells| cells.get(task))
                    .copied()
                    .unwrap_or(false)
                {
                    ratio.completed += 1;
                }
            }
        }
        ratio
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct CompletionRatio {
    pub completed: u64,
    pub total: u64,
}

impl CompletionRatio {
    /// Returns [None] for an empty grid.
    pub fn percentage(&self) -> Option<Percentage> {
        Percentage::ratio(self.completed, self.total)
    }
}

/// Trackers keyed by label. Labels keep the order they were first inserted in, both in memory and
/// in the data file.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct TrackerMap {
    entries: Vec<(String, Tracker)>,
}

impl TrackerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|(l, _)| l == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn get(&self, label: &str) -> Option<&Tracker> {
        self.position(label).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut Tracker> {
        self.position(label).map(|i| &mut self.entries[i].1)
    }

    /// Inserts a tracker. An existing tracker with the same label is replaced in place and
    /// returned.
    pub fn insert(&mut self, label: String, tracker: Tracker) -> Option<Tracker> {
        match self.position(&label) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, tracker)),
            None => {
                self.entries.push((label, tracker));
                None
            }
        }
    }

    pub fn remove(&mut self, label: &str) -> Option<Tracker> {
        self.position(label).map(|i| self.entries.remove(i).1)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

impl Serialize for TrackerMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, tracker) in &self.entries {
            map.serialize_entry(label, tracker)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TrackerMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TrackerMapVisitor;

        impl<'de> Visitor<'de> for TrackerMapVisitor {
            type Value = TrackerMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of tracker labels to trackers")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = TrackerMap {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((label, tracker)) = access.next_entry::<String, Tracker>()? {
                    map.insert(label, tracker);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TrackerMapVisitor)
    }
}
