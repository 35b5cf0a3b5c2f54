//! One-time login codes
//!
//! Codes live only in memory, keyed by normalized email. A code is consumed
//! by the first successful verification.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::infrastructure::crypto::six_digit_code;
use crate::shared::normalize_email;

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: DateTime<Utc>,
}

pub struct OtpStore {
    entries: DashMap<String, OtpEntry>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Generate a new code for `email`, replacing any previous one
    pub fn issue(&self, email: &str) -> String {
        self.issue_at(email, Utc::now())
    }

    fn issue_at(&self, email: &str, now: DateTime<Utc>) -> String {
        let code = six_digit_code();
        self.entries.insert(
            normalize_email(email),
            OtpEntry {
                code: code.clone(),
                expires_at: now + self.ttl,
            },
        );
        code
    }

    pub fn verify(&self, email: &str, code: &str) -> bool {
        self.verify_at(email, code, Utc::now())
    }

    fn verify_at(&self, email: &str, code: &str, now: DateTime<Utc>) -> bool {
        let code = code.trim();
        self.entries
            .remove_if(&normalize_email(email), |_, entry| {
                entry.code == code && now <= entry.expires_at
            })
            .is_some()
    }

    /// Remove expired codes; returns how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at >= now);
        before - self.entries.len()
    }

    pub fn ttl_minutes(&self) -> i64 {
        self.ttl.num_minutes()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_single_use() {
        let store = OtpStore::new(5);
        let code = store.issue(" Tech@IMAS.cd ");
        assert_eq!(code.len(), 6);
        assert!(!store.verify("tech@imas.cd", "000000x"));
        assert!(store.verify("tech@imas.cd", &code));
        assert!(!store.verify("tech@imas.cd", &code));
    }

    #[test]
    fn concurrent_verifications_accept_a_code_once() {
        let store = std::sync::Arc::new(OtpStore::new(5));
        let code = store.issue("race@imas.cd");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let code = code.clone();
                std::thread::spawn(move || store.verify("race@imas.cd", &code))
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(accepted, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn wrong_code_keeps_the_entry() {
        let store = OtpStore::new(5);
        let code = store.issue("a@b.cd");
        assert!(!store.verify("a@b.cd", "not-it"));
        assert_eq!(store.len(), 1);
        assert!(store.verify("a@b.cd", &format!(" {} ", code)));
    }

    #[test]
    fn codes_expire() {
        let store = OtpStore::new(5);
        let issued = Utc::now() - Duration::minutes(6);
        let code = store.issue_at("a@b.cd", issued);
        assert!(!store.verify_at("a@b.cd", &code, Utc::now()));
        assert_eq!(store.purge_expired(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn reissue_replaces_previous_code() {
        let store = OtpStore::new(5);
        let now = Utc::now();
        let first = store.issue_at("a@b.cd", now);
        let second = store.issue_at("a@b.cd", now);
        assert_eq!(store.len(), 1);
        if first != second {
            assert!(!store.verify_at("a@b.cd", &first, now));
        }
        assert!(store.verify_at("a@b.cd", &second, now));
    }
}
