//! Sorting score.
//!
//! [`ScoreBoard`] is the only place the correct/error counters live. They are
//! read-only from outside: the two `on_*_sort` calls are the sole mutators and
//! each adds exactly one.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBoard {
    correct: u32,
    errors: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one correct sort. Returns the new total.
    pub fn on_correct_sort(&mut self) -> u32 {
        self.correct += 1;
        self.correct
    }

    /// Count one wrong sort. Returns the new total.
    pub fn on_wrong_sort(&mut self) -> u32 {
        self.errors += 1;
        self.errors
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Text shown on the factory scoreboard.
    pub fn display_text(&self) -> String {
        format!("PROCESSED: {}\nERRORS: {}", self.correct, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let s = ScoreBoard::new();
        assert_eq!(s.correct(), 0);
        assert_eq!(s.errors(), 0);
    }

    #[test]
    fn increments_are_independent() {
        let mut s = ScoreBoard::new();
        assert_eq!(s.on_correct_sort(), 1);
        assert_eq!(s.on_correct_sort(), 2);
        assert_eq!(s.on_wrong_sort(), 1);
        assert_eq!(s.correct(), 2);
        assert_eq!(s.errors(), 1);
    }

    #[test]
    fn display_text_format() {
        let mut s = ScoreBoard::new();
        s.on_correct_sort();
        s.on_wrong_sort();
        s.on_wrong_sort();
        assert_eq!(s.display_text(), "PROCESSED: 1\nERRORS: 2");
    }
}
