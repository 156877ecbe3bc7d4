//! Deferred work keyed to the session generation
//!
//! Tasks are due after a number of ticks. Each task remembers the generation
//! it was scheduled in; a restart bumps the generation, and tasks from an
//! older generation are dropped instead of firing.

/// Work that runs after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Open the name prompt for a finished run
    ShowNamePrompt { score: u32 },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_tick: u64,
    generation: u64,
    task: Deferred,
}

/// Pending deferred tasks
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` ticks have passed after `now`
    pub fn schedule(&mut self, now: u64, delay: u64, generation: u64, task: Deferred) {
        self.tasks.push(Scheduled {
            due_tick: now + delay,
            generation,
            task,
        });
    }

    /// Remove and return every task due at `now` for the current generation.
    /// Stale tasks are discarded whether or not they are due.
    pub fn take_due(&mut self, now: u64, generation: u64) -> Vec<Deferred> {
        let mut due = Vec::new();
        self.tasks.retain(|s| {
            if s.generation != generation {
                log::debug!("Dropping stale {:?} from generation {}", s.task, s.generation);
                return false;
            }
            if s.due_tick <= now {
                due.push(s.task);
                return false;
            }
            true
        });
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
