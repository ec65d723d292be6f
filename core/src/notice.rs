//! Ephemeral, dismissible notices shown in one corner of the page.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoticeId(u64);

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notice-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Insertion-ordered queue of notices, each with its own expiry.
///
/// Removing a notice also drops its expiry, so a dismissed notice can never
/// be "expired" later and removal is idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn add(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> NoticeId {
        let id = NoticeId(self.next_id);
        self.next_id += 1;
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::seconds(5));
        self.notices.push(Notice {
            id,
            title: title.into(),
            message: message.into(),
            severity,
            created_at: now,
            expires_at: now + ttl,
        });
        log::debug!("notice {} added ({})", id, severity.as_str());
        id
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        before != self.notices.len()
    }

    /// Drops every notice whose expiry is at or before `now`.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<NoticeId> {
        let (expired, kept): (Vec<Notice>, Vec<Notice>) = std::mem::take(&mut self.notices)
            .into_iter()
            .partition(|n| n.expires_at <= now);
        self.notices = kept;
        expired.into_iter().map(|n| n.id).collect()
    }

    /// Time until the notice expires, zero if overdue, `None` if it is gone.
    pub fn time_left(&self, id: NoticeId, now: DateTime<Utc>) -> Option<Duration> {
        self.notices
            .iter()
            .find(|n| n.id == id)
            .map(|n| (n.expires_at - now).to_std().unwrap_or(Duration::ZERO))
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(crate::Timings::default().notice_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 26, 10, 0, 0).unwrap()
    }

    fn secs(s: i64) -> chrono::Duration {
        chrono::Duration::seconds(s)
    }

    #[test]
    fn notice_expires_five_seconds_after_creation() {
        let mut board = NoticeBoard::default();
        let id = board.add("Saved", "Your details were saved", Severity::Success, t0());

        assert!(board.expire(t0() + chrono::Duration::milliseconds(4999)).is_empty());
        assert_eq!(board.len(), 1);

        assert_eq!(board.expire(t0() + secs(5)), vec![id]);
        assert!(board.is_empty());
    }

    #[test]
    fn dismissing_early_cancels_expiry_and_is_idempotent() {
        let mut board = NoticeBoard::default();
        let first = board.add("One", "first", Severity::Info, t0());
        let second = board.add("Two", "second", Severity::Info, t0() + secs(3));

        assert!(board.remove(first));
        assert!(!board.remove(first));

        // The first notice's old deadline passes without touching the second.
        assert!(board.expire(t0() + secs(5)).is_empty());
        assert_eq!(board.notices()[0].id, second);
        assert_eq!(board.expire(t0() + secs(8)), vec![second]);
    }

    #[test]
    fn duplicates_are_kept_in_insertion_order() {
        let mut board = NoticeBoard::default();
        let a = board.add("Same", "same", Severity::Error, t0());
        let b = board.add("Same", "same", Severity::Error, t0());
        assert_ne!(a, b);
        let ids: Vec<_> = board.notices().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn time_left_counts_down_and_clamps() {
        let mut board = NoticeBoard::default();
        let id = board.add("Hi", "there", Severity::Info, t0());
        assert_eq!(board.time_left(id, t0() + secs(2)), Some(Duration::from_secs(3)));
        assert_eq!(board.time_left(id, t0() + secs(9)), Some(Duration::ZERO));
        board.remove(id);
        assert_eq!(board.time_left(id, t0()), None);
    }
}
