//! 执行历史：带版本号的迁移发射记录。
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::net::stack::PersistentStack;

pub type Version = u64;

/// Label recorded in place of a transition identifier when a net is reset
/// without clearing its history.
pub const RESET_LABEL: &str = "reset";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HistoryEntry {
    pub timestamp_ms: u64,
    pub transition: String,
    pub version: Version,
}

impl HistoryEntry {
    pub fn new(timestamp_ms: u64, transition: impl Into<String>, version: Version) -> Self {
        Self {
            timestamp_ms,
            transition: transition.into(),
            version,
        }
    }

    pub fn is_reset(&self) -> bool {
        self.transition == RESET_LABEL
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{} {} @{}",
            self.version, self.transition, self.timestamp_ms
        )
    }
}

pub type History = PersistentStack<HistoryEntry>;

/// Version of the newest entry, 0 for an empty history.
pub fn last_version(history: &History) -> Version {
    history.peek().map_or(0, |entry| entry.version)
}

pub fn now_millis() -> u64 {
    millis_since_epoch(SystemTime::now())
}

/// Saturates at `u64::MAX`; instants before the epoch read as 0.
fn millis_since_epoch(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
