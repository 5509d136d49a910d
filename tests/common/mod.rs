//! In-memory providers shared by the integration tests.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use toggl2clockify::api::{DestinationProvider, DestinationTimeEntry, NewTimeEntry, SourceProvider, SourceTimeEntry};
use toggl2clockify::libs::watermark::WatermarkStore;

pub const START_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

pub fn source_entry(start: &str, duration: Option<i64>) -> SourceTimeEntry {
    SourceTimeEntry {
        start: start.to_string(),
        duration,
    }
}

/// Source provider serving fixed entries per project.
///
/// Entries outside the queried dates are left out; starts it cannot parse
/// are always returned.
#[derive(Default)]
pub struct FakeSource {
    entries: HashMap<u64, Vec<SourceTimeEntry>>,
    failing: HashSet<u64>,
    pub queries: Mutex<Vec<(NaiveDate, NaiveDate, u64)>>,
}

impl FakeSource {
    pub fn with_entries(mut self, project_id: u64, entries: Vec<SourceTimeEntry>) -> Self {
        self.entries.insert(project_id, entries);
        self
    }

    pub fn failing_for(mut self, project_id: u64) -> Self {
        self.failing.insert(project_id);
        self
    }

    pub fn queried_projects(&self) -> Vec<u64> {
        self.queries.lock().unwrap().iter().map(|(_, _, project_id)| *project_id).collect()
    }
}

impl SourceProvider for FakeSource {
    async fn list_time_entries(&self, start: NaiveDate, end: NaiveDate, project_id: u64) -> Result<Vec<SourceTimeEntry>> {
        self.queries.lock().unwrap().push((start, end, project_id));
        if self.failing.contains(&project_id) {
            return Err(anyhow!("source unavailable"));
        }
        let entries = self.entries.get(&project_id).cloned().unwrap_or_default();
        Ok(entries
            .into_iter()
            .filter(|entry| match NaiveDateTime::parse_from_str(&entry.start, START_FORMAT) {
                Ok(started) => started.date() >= start && started.date() < end,
                Err(_) => true,
            })
            .collect())
    }
}

/// Destination provider keeping entries in memory and recording every call.
#[derive(Default)]
pub struct FakeDestination {
    pub entries: Mutex<Vec<DestinationTimeEntry>>,
    pub operations: Mutex<Vec<String>>,
    next_id: Mutex<usize>,
    fail_query: bool,
    fail_delete: HashSet<String>,
    fail_create: HashSet<NaiveDate>,
}

impl FakeDestination {
    pub fn with_existing(self, project_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let id = self.allocate_id();
        self.entries.lock().unwrap().push(DestinationTimeEntry {
            id,
            project_id: Some(project_id.to_string()),
            start,
            end: Some(end),
        });
        self
    }

    pub fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    pub fn failing_delete(mut self, id: &str) -> Self {
        self.fail_delete.insert(id.to_string());
        self
    }

    pub fn failing_create(mut self, day: NaiveDate) -> Self {
        self.fail_create.insert(day);
        self
    }

    /// `(start, end)` of the project's entries, ordered by start.
    pub fn intervals(&self, project_id: &str) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        let mut intervals: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.project_id.as_deref() == Some(project_id))
            .map(|entry| (entry.start, entry.end.unwrap_or(entry.start)))
            .collect();
        intervals.sort();
        intervals
    }

    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }

    fn allocate_id(&self) -> String {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        format!("e{}", next_id)
    }
}

impl DestinationProvider for FakeDestination {
    async fn find_time_entries(&self, project_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<DestinationTimeEntry>> {
        self.operations.lock().unwrap().push(format!("find {}", project_id));
        if self.fail_query {
            return Err(anyhow!("query rejected"));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.project_id.as_deref() == Some(project_id))
            .filter(|entry| entry.start <= end && entry.end.unwrap_or(entry.start) >= start)
            .cloned()
            .collect())
    }

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<DestinationTimeEntry> {
        self.operations.lock().unwrap().push(format!("create {}", entry.start.date()));
        if self.fail_create.contains(&entry.start.date()) {
            return Err(anyhow!("create rejected"));
        }
        let created = DestinationTimeEntry {
            id: self.allocate_id(),
            project_id: Some(entry.project_id.clone()),
            start: entry.start,
            end: Some(entry.end),
        };
        self.entries.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_time_entry(&self, id: &str) -> Result<()> {
        self.operations.lock().unwrap().push(format!("delete {}", id));
        if self.fail_delete.contains(id) {
            return Err(anyhow!("delete rejected"));
        }
        self.entries.lock().unwrap().retain(|entry| entry.id != id);
        Ok(())
    }
}

/// Watermark kept in memory.
#[derive(Default)]
pub struct MemoryWatermark {
    pub value: Mutex<Option<NaiveDateTime>>,
    pub saves: Mutex<usize>,
    fail_load: bool,
    fail_save: bool,
}

impl MemoryWatermark {
    pub fn at(value: NaiveDateTime) -> Self {
        Self {
            value: Mutex::new(Some(value)),
            ..Self::default()
        }
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn current(&self) -> Option<NaiveDateTime> {
        *self.value.lock().unwrap()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl WatermarkStore for MemoryWatermark {
    fn load(&self) -> Result<Option<NaiveDateTime>> {
        if self.fail_load {
            return Err(anyhow!("history unreadable"));
        }
        Ok(self.current())
    }

    fn save(&self, last_execution: NaiveDateTime) -> Result<()> {
        if self.fail_save {
            return Err(anyhow!("history not writable"));
        }
        *self.value.lock().unwrap() = Some(last_execution);
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}
