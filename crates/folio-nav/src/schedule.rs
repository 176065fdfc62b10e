//! Deferred task scheduling
//!
//! Cancellable tasks over the controller's logical millisecond clock.
//! Handles are retained by their owners and cancelled on teardown, so
//! no timer outlives the controller.

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(u64);

/// What a due task should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Clear the programmatic-scroll flag after the settle window
    ScrollSettle,
    /// Remove the transient theme-transition marker from the body
    ThemeTransitionEnd,
    /// Perform the deferred scroll to the initial URL-fragment section
    InitialHashScroll,
}

#[derive(Debug)]
struct ScheduledTask {
    id: TaskId,
    due_ms: u64,
    kind: TaskKind,
}

/// Logical clock plus pending task queue
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time in milliseconds
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a task to run after `delay_ms`
    pub fn schedule(&mut self, delay_ms: u64, kind: TaskKind) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask { id, due_ms: self.now_ms + delay_ms, kind });
        id
    }

    /// Cancel a pending task; returns whether it was still pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every pending task
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Advance the clock and drain tasks that came due, in due order
    pub fn advance(&mut self, ms: u64) -> Vec<TaskKind> {
        self.now_ms += ms;
        let now = self.now_ms;

        let mut due: Vec<ScheduledTask> = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_ms <= now {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.due_ms, t.id.0));
        due.into_iter().map(|t| t.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, TaskKind::InitialHashScroll);
        scheduler.schedule(1000, TaskKind::ScrollSettle);

        assert!(scheduler.advance(50).is_empty());
        assert_eq!(scheduler.advance(50), vec![TaskKind::InitialHashScroll]);
        assert_eq!(scheduler.advance(900), vec![TaskKind::ScrollSettle]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, TaskKind::ThemeTransitionEnd);
        scheduler.schedule(100, TaskKind::InitialHashScroll);

        assert_eq!(
            scheduler.advance(500),
            vec![TaskKind::InitialHashScroll, TaskKind::ThemeTransitionEnd]
        );
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(100, TaskKind::ScrollSettle);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.advance(200).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, TaskKind::ScrollSettle);
        scheduler.schedule(300, TaskKind::ThemeTransitionEnd);
        scheduler.cancel_all();
        assert_eq!(scheduler.pending(), 0);
    }
}
