//! Session history
//!
//! The in-page mirror of the browser history stack: pushing truncates any
//! forward entries, back/forward only move the cursor.

use serde::{Deserialize, Serialize};

use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Back => "back",
            Direction::Forward => "forward",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionHistory {
    entries: Vec<Route>,
    cursor: Option<usize>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: Route) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(route);
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn current(&self) -> Option<&Route> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// The entry one step in `direction`, without moving.
    pub fn peek(&self, direction: Direction) -> Option<&Route> {
        let target = self.target_index(direction)?;
        self.entries.get(target)
    }

    /// Move one step in `direction`, returning the new current entry.
    pub fn step(&mut self, direction: Direction) -> Option<&Route> {
        let target = self.target_index(direction)?;
        self.cursor = Some(target);
        self.entries.get(target)
    }

    pub fn can_go_back(&self) -> bool {
        self.peek(Direction::Back).is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.peek(Direction::Forward).is_some()
    }

    pub fn entries(&self) -> &[Route] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn target_index(&self, direction: Direction) -> Option<usize> {
        let cursor = self.cursor?;
        let target = match direction {
            Direction::Back => cursor.checked_sub(1)?,
            Direction::Forward => cursor + 1,
        };
        (target < self.entries.len()).then_some(target)
    }
}
