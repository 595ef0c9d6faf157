//! Cancelable timers on a virtual clock.
//!
//! Tasks may be scoped to the stage that armed them. When the stage changes
//! the session calls [`Scheduler::retain_scope`] and every task owned by
//! another stage is dropped, so a timer can never fire into a stage it does
//! not belong to.

use rb_core::{Action, Stage};

/// Identifies a scheduled task.
pub type TaskId = u64;

/// What a task does when it fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Dispatch an action.
    Dispatch(Action),
    /// Roll the boss pressure check.
    BossPressure,
}

/// Whether a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Fire once.
    Once,
    /// Fire every `period` milliseconds.
    Every(u64),
}

/// A pending timer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    /// Handle for cancelation.
    pub id: TaskId,
    /// Virtual time at which the task fires.
    pub due_ms: u64,
    /// The stage that owns the task, if any.
    pub scope: Option<Stage>,
    /// One-shot or interval.
    pub repeat: Repeat,
    /// What to run.
    pub job: Job,
}

/// Ordered set of pending tasks.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    next_id: TaskId,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `job` once at `due_ms`.
    pub fn schedule_once(&mut self, due_ms: u64, scope: Option<Stage>, job: Job) -> TaskId {
        self.push(due_ms, scope, Repeat::Once, job)
    }

    /// Run `job` at `first_due_ms` and then every `period_ms`.
    pub fn schedule_every(
        &mut self,
        first_due_ms: u64,
        period_ms: u64,
        scope: Option<Stage>,
        job: Job,
    ) -> TaskId {
        self.push(first_due_ms, scope, Repeat::Every(period_ms.max(1)), job)
    }

    fn push(&mut self, due_ms: u64, scope: Option<Stage>, repeat: Repeat, job: Job) -> TaskId {
        self.next_id += 1;
        let id = self.next_id;
        self.tasks.push(ScheduledTask {
            id,
            due_ms,
            scope,
            repeat,
            job,
        });
        id
    }

    /// Cancel a task. Returns whether it was pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every task scoped to a stage other than `stage`. Unscoped tasks
    /// survive. Returns how many were dropped.
    pub fn retain_scope(&mut self, stage: Stage) -> usize {
        let before = self.tasks.len();
        self.tasks
            .retain(|t| t.scope.is_none_or(|scope| scope == stage));
        let dropped = before - self.tasks.len();
        if dropped > 0 {
            tracing::debug!(stage = %stage, dropped, "tore down scoped timers");
        }
        dropped
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Whether a task is still pending.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Earliest due time.
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due_ms).min()
    }

    /// Earliest due time among one-shot tasks.
    pub fn next_once_due(&self) -> Option<u64> {
        self.tasks
            .iter()
            .filter(|t| t.repeat == Repeat::Once)
            .map(|t| t.due_ms)
            .min()
    }

    /// Remove and return the earliest task due at or before `now_ms`, ties
    /// broken by creation order. An interval task is re-armed one period
    /// later and a copy of the fired instance is returned.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledTask> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;
        match self.tasks[index].repeat {
            Repeat::Once => Some(self.tasks.remove(index)),
            Repeat::Every(period) => {
                let fired = self.tasks[index].clone();
                self.tasks[index].due_ms += period;
                Some(fired)
            }
        }
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pending tasks in creation order.
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick() -> Job {
        Job::Dispatch(Action::AutoTick)
    }

    #[test]
    fn pops_in_due_then_id_order() {
        let mut s = Scheduler::new();
        let late = s.schedule_once(200, None, tick());
        let first = s.schedule_once(100, None, tick());
        let second = s.schedule_once(100, None, Job::BossPressure);

        assert!(s.pop_due(50).is_none());
        assert_eq!(s.pop_due(300).unwrap().id, first);
        assert_eq!(s.pop_due(300).unwrap().id, second);
        assert_eq!(s.pop_due(300).unwrap().id, late);
        assert!(s.is_empty());
    }

    #[test]
    fn interval_rearms() {
        let mut s = Scheduler::new();
        let id = s.schedule_every(500, 500, None, tick());
        assert_eq!(s.pop_due(500).unwrap().due_ms, 500);
        assert_eq!(s.next_due(), Some(1000));
        assert!(s.pop_due(999).is_none());
        assert_eq!(s.pop_due(1000).unwrap().id, id);
        assert!(s.is_pending(id));
        assert_eq!(s.next_once_due(), None);
    }

    #[test]
    fn cancel_removes() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(10, None, tick());
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.pop_due(100).is_none());
    }

    #[test]
    fn scope_teardown_keeps_owner_and_unscoped() {
        let mut s = Scheduler::new();
        let auto = s.schedule_every(10, 10, Some(Stage::RoutingAuto), tick());
        let boss = s.schedule_every(10, 10, Some(Stage::BossFight), Job::BossPressure);
        let free = s.schedule_once(10, None, tick());

        assert_eq!(s.retain_scope(Stage::BossFight), 1);
        assert!(!s.is_pending(auto));
        assert!(s.is_pending(boss));
        assert!(s.is_pending(free));
    }
}
