use crate::billing::{CallRecord, Client, Plan};
use crate::error::Result;
use glob::glob;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Everything a single-client report needs, as exported by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub client: Client,
    pub plan: Plan,
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

/// Loads exported rows from JSON documents and JSONL call dumps
pub struct DataLoader {
    seen_ids: HashSet<String>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            seen_ids: HashSet::new(),
        }
    }

    /// Parse a report input document
    pub fn read_input<R: Read>(reader: R) -> Result<ReportInput> {
        let input: ReportInput = serde_json::from_reader(reader)?;
        Ok(input)
    }

    pub fn read_input_path<P: AsRef<Path>>(path: P) -> Result<ReportInput> {
        let file = fs::File::open(path)?;
        Self::read_input(BufReader::new(file))
    }

    /// Mark calls that arrived with the input document so file loads skip them
    pub fn remember(&mut self, calls: &[CallRecord]) {
        self.seen_ids.extend(calls.iter().map(|c| c.id.clone()));
    }

    /// Load call records from every file matching `pattern`.
    ///
    /// `.jsonl` files hold one record per line; anything else must be a
    /// JSON array. Records whose id was already loaded are skipped, and the
    /// result is sorted by `created_at`.
    pub fn load_calls(&mut self, pattern: &str) -> Result<Vec<CallRecord>> {
        let mut all_calls = Vec::new();

        for path in glob(pattern)?.flatten() {
            let calls = if path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
                self.parse_jsonl_file(&path)?
            } else {
                self.parse_json_file(&path)?
            };
            debug!("Loaded {} calls from {}", calls.len(), path.display());
            all_calls.extend(calls);
        }

        // Sort by timestamp
        all_calls.sort_by_key(|c| c.created_at);

        Ok(all_calls)
    }

    fn parse_json_file(&mut self, path: &Path) -> Result<Vec<CallRecord>> {
        let content = fs::read_to_string(path)?;
        let calls: Vec<CallRecord> = serde_json::from_str(&content)?;
        Ok(calls.into_iter().filter(|c| self.first_sighting(c)).collect())
    }

    /// Malformed lines are logged and skipped, the rest of the file still loads
    fn parse_jsonl_file(&mut self, path: &Path) -> Result<Vec<CallRecord>> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut calls = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match sonic_rs::from_str::<CallRecord>(&line) {
                Ok(call) => {
                    if self.first_sighting(&call) {
                        calls.push(call);
                    }
                }
                Err(e) => warn!("Skipping {}:{}: {}", path.display(), index + 1, e),
            }
        }

        Ok(calls)
    }

    fn first_sighting(&mut self, call: &CallRecord) -> bool {
        // Deduplication check
        if self.seen_ids.contains(&call.id) {
            return false;
        }
        self.seen_ids.insert(call.id.clone());
        true
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}
