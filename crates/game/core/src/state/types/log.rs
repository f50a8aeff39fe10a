use std::fmt;

use super::common::Side;

/// One line of the append-only match log.
///
/// Entries are stamped with a monotonically increasing sequence number and
/// the turn they were written in, never with wall-clock time, so identical
/// transition sequences produce identical logs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub seq: u64,
    pub turn: u32,
    pub side: Option<Side>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[T{} #{}] {}", self.turn, self.seq, self.message)
    }
}
