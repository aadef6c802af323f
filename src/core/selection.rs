//! Numbered choices waiting for a user's reply
//!
//! When a lookup returns several matches the bot lists them and remembers the
//! list per user; the user's next message that is just a number picks one.

use dashmap::DashMap;

#[derive(Debug)]
pub struct PendingSelections<T> {
    pending: DashMap<u64, Vec<T>>,
}

impl<T: Clone> PendingSelections<T> {
    pub fn new() -> Self {
        Self {
            pending: DashMap::new(),
        }
    }

    /// Remember `items` for `user_id`, replacing whatever was offered before
    pub fn offer(&self, user_id: u64, items: Vec<T>) {
        if items.is_empty() {
            self.pending.remove(&user_id);
        } else {
            self.pending.insert(user_id, items);
        }
    }

    /// Resolve a reply. Only an all-digit reply within `1..=len` consumes the offer.
    pub fn take(&self, user_id: u64, reply: &str) -> Option<T> {
        let reply = reply.trim();
        if reply.is_empty() || !reply.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let choice: usize = reply.parse().ok()?;

        let item = {
            let items = self.pending.get(&user_id)?;
            if choice == 0 || choice > items.len() {
                return None;
            }
            items[choice - 1].clone()
        };
        self.pending.remove(&user_id);
        Some(item)
    }

    pub fn has_pending(&self, user_id: u64) -> bool {
        self.pending.contains_key(&user_id)
    }
}

impl<T: Clone> Default for PendingSelections<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_valid_choice_clears_offer() {
        let selections = PendingSelections::new();
        selections.offer(1, vec!["a", "b", "c"]);

        assert_eq!(selections.take(1, "2"), Some("b"));
        assert!(!selections.has_pending(1));
        assert_eq!(selections.take(1, "2"), None);
    }

    #[test]
    fn test_out_of_range_and_text_keep_offer() {
        let selections = PendingSelections::new();
        selections.offer(1, vec!["a", "b"]);

        assert_eq!(selections.take(1, "0"), None);
        assert_eq!(selections.take(1, "3"), None);
        assert_eq!(selections.take(1, "two"), None);
        assert_eq!(selections.take(1, "-1"), None);
        assert_eq!(selections.take(1, ""), None);
        assert!(selections.has_pending(1));
        assert_eq!(selections.take(1, " 1 "), Some("a"));
    }

    #[test]
    fn test_offers_are_per_user() {
        let selections = PendingSelections::new();
        selections.offer(1, vec!["a"]);
        selections.offer(2, vec!["x", "y"]);

        assert_eq!(selections.take(3, "1"), None);
        assert_eq!(selections.take(2, "2"), Some("y"));
        assert_eq!(selections.take(1, "1"), Some("a"));
    }

    #[test]
    fn test_new_offer_replaces_previous() {
        let selections = PendingSelections::new();
        selections.offer(1, vec!["old1", "old2"]);
        selections.offer(1, vec!["new"]);

        assert_eq!(selections.take(1, "2"), None);
        assert_eq!(selections.take(1, "1"), Some("new"));
    }

    #[test]
    fn test_empty_offer_clears() {
        let selections: PendingSelections<&str> = PendingSelections::new();
        selections.offer(1, vec!["a"]);
        selections.offer(1, vec![]);
        assert!(!selections.has_pending(1));
    }
}
