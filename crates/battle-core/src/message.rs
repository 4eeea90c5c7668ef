//! Transient battle messages.
//!
//! One banner at a time plus a bounded history for the UI. Auto-hide timing
//! lives in the runtime; the board only enforces the cancellation rule: each
//! `show` bumps a generation counter, and a `hide` carrying a stale
//! generation is ignored, so an old message's hide can never blank a newer
//! message.

use std::collections::VecDeque;

/// Banner text with generation-guarded hiding and a message history.
#[derive(Clone, Debug)]
pub struct MessageBoard {
    banner: Option<String>,
    generation: u64,
    history: VecDeque<String>,
    capacity: usize,
}

impl MessageBoard {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            banner: None,
            generation: 0,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Shows a message and returns its generation, to be passed back by the
    /// hide timer.
    pub fn show(&mut self, text: impl Into<String>) -> u64 {
        let text = text.into();
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(text.clone());

        self.generation += 1;
        self.banner = Some(text);
        self.generation
    }

    /// Hides the banner iff `generation` still matches the one returned by
    /// the latest `show`. Returns whether anything was hidden.
    pub fn hide(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.banner.is_some() {
            self.banner = None;
            true
        } else {
            false
        }
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Most recent messages first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &str> {
        self.history.iter().rev().take(limit).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_hide_clears_banner() {
        let mut board = MessageBoard::new(8);
        let generation = board.show("Hero attacks Dragon for 20 damage");
        assert_eq!(board.banner(), Some("Hero attacks Dragon for 20 damage"));
        assert!(board.hide(generation));
        assert_eq!(board.banner(), None);
    }

    #[test]
    fn stale_hide_is_ignored() {
        let mut board = MessageBoard::new(8);
        let first = board.show("Hero attacks Dragon for 20 damage");
        let second = board.show("Dragon attacks Hero for 3 damage");

        // The first message's timer fires late; the newer banner survives.
        assert!(!board.hide(first));
        assert_eq!(board.banner(), Some("Dragon attacks Hero for 3 damage"));

        assert!(board.hide(second));
        assert_eq!(board.banner(), None);
    }

    #[test]
    fn history_is_bounded() {
        let mut board = MessageBoard::new(2);
        board.show("one");
        board.show("two");
        board.show("three");

        let recent: Vec<&str> = board.recent(10).collect();
        assert_eq!(recent, vec!["three", "two"]);
    }
}
