// Notice log.
// Timestamped user-facing messages shown in the status bar and kept for review.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// A user-facing message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }
}

/// Bounded log of notices, oldest dropped first.
#[derive(Debug)]
pub struct NoticeLog {
    notices: VecDeque<Notice>,
    capacity: usize,
}

impl NoticeLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            notices: VecDeque::with_capacity(capacity.min(256)),
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, notice: Notice) {
        if self.notices.len() >= self.capacity {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Info, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Warn, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Error, message));
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.back()
    }

    /// Notices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_notice() {
        let mut log = NoticeLog::new(10);
        assert!(log.latest().is_none());

        log.info("Exported 7 participants");
        log.warn("No participants to export");

        let latest = log.latest().unwrap();
        assert_eq!(latest.level, NoticeLevel::Warn);
        assert_eq!(latest.message, "No participants to export");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = NoticeLog::new(2);
        log.info("one");
        log.info("two");
        log.error("three");

        let messages: Vec<&str> = log.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(log.len(), 2);
    }
}
