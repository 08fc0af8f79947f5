//! Bounded undo stack of whole-plan snapshots.

use std::collections::VecDeque;

use crate::plan::ActionPlan;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Largest limit a workspace accepts.
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Most recent snapshots first out; the oldest is dropped once the limit is
/// reached.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<ActionPlan>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of zero disables undo.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn push(&mut self, snapshot: ActionPlan) {
        if self.limit == 0 {
            return;
        }
        while self.snapshots.len() >= self.limit {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<ActionPlan> {
        self.snapshots.pop_back()
    }

    /// Snapshots from oldest to newest.
    pub fn snapshots(&self) -> impl Iterator<Item = &ActionPlan> + '_ {
        self.snapshots.iter()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_snapshot_is_dropped() {
        let mut history = History::with_limit(3);
        let mut plan = ActionPlan::new();
        for i in 0..5 {
            history.push(plan.clone());
            plan = plan.add_action(format!("A{i}")).unwrap().0;
        }

        assert_eq!(history.len(), 3);
        let sizes: Vec<usize> = history.snapshots().map(ActionPlan::len).collect();
        assert_eq!(sizes, vec![2, 3, 4]);
        assert_eq!(history.pop().map(|p| p.len()), Some(4));
    }

    #[test]
    fn test_zero_limit_keeps_nothing() {
        let mut history = History::with_limit(0);
        history.push(ActionPlan::new());
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_huge_limit_allocates_lazily() {
        let mut history = History::with_limit(usize::MAX);
        history.push(ActionPlan::new());
        assert_eq!(history.limit(), usize::MAX);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(History::new().limit(), DEFAULT_HISTORY_LIMIT);
    }
}
