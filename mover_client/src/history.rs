//! Command history.
//!
//! The movement simulation may rewind and re-run steps it has already been
//! given commands for. Produced commands are kept here, keyed by simulation
//! time, so a replayed step gets back exactly what it got the first time.

use std::collections::VecDeque;

use mover_shared::command::MoverInputCmd;

/// Bounded history of produced commands, oldest first. Always holds at
/// least the latest step, so replay detection never loses track of it.
#[derive(Debug, Default)]
pub struct CommandHistory {
    history: VecDeque<MoverInputCmd>,
    max: usize,
}

impl CommandHistory {
    pub fn new(max: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max.max(1)),
            max: max.max(1),
        }
    }

    /// Records a command. Times must increase; older entries are evicted.
    pub fn push(&mut self, cmd: MoverInputCmd) {
        self.history.push_back(cmd);
        while self.history.len() > self.max {
            self.history.pop_front();
        }
    }

    pub fn get(&self, sim_time_ms: u64) -> Option<&MoverInputCmd> {
        self.history
            .binary_search_by_key(&sim_time_ms, |c| c.sim_time_ms)
            .ok()
            .map(|idx| &self.history[idx])
    }

    pub fn latest_time(&self) -> Option<u64> {
        self.history.back().map(|c| c.sim_time_ms)
    }

    /// Returns the number of buffered commands.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if no commands are buffered.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(sim_time_ms: u64) -> MoverInputCmd {
        MoverInputCmd {
            sim_time_ms,
            ..Default::default()
        }
    }

    #[test]
    fn evicts_oldest() {
        let mut history = CommandHistory::new(4);
        for t in 0..10 {
            history.push(cmd(t * 16));
        }
        assert_eq!(history.len(), 4);
        assert!(history.get(0).is_none());
        assert!(history.get(5 * 16).is_none());
        assert_eq!(history.get(6 * 16).map(|c| c.sim_time_ms), Some(96));
        assert_eq!(history.latest_time(), Some(9 * 16));
    }

    #[test]
    fn missing_time_between_entries() {
        let mut history = CommandHistory::new(8);
        history.push(cmd(10));
        history.push(cmd(20));
        assert!(history.get(15).is_none());
        assert!(history.get(20).is_some());
    }

    #[test]
    fn zero_capacity_keeps_latest() {
        let mut history = CommandHistory::new(0);
        history.push(cmd(1));
        history.push(cmd(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest_time(), Some(2));
        assert!(history.get(1).is_none());
    }
}
