use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

/// Identifier of one scheduled unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Due {
    NextPaint,
    At(f64),
}

#[derive(Debug, Default)]
struct SchedulerState {
    now_ms: f64,
    next_id: u64,
    pending: BTreeMap<TaskId, Due>,
}

impl SchedulerState {
    fn push(&mut self, due: Due) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.pending.insert(id, due);
        id
    }
}

/// Next-paint and timer queue driven by host `paint` / `tick` events.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerState>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().now_ms
    }

    pub fn pending_len(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Run on the next paint, after layout has settled.
    pub fn request_paint(&self) -> ScheduledTask {
        let id = self.inner.borrow_mut().push(Due::NextPaint);
        tracing::trace!(?id, "paint task scheduled");
        self.guard(id)
    }

    /// Run once `delay_ms` has elapsed from the current time.
    pub fn set_timeout(&self, delay_ms: f64) -> ScheduledTask {
        let mut state = self.inner.borrow_mut();
        let at = state.now_ms + delay_ms.max(0.0);
        let id = state.push(Due::At(at));
        drop(state);
        tracing::trace!(?id, at, "timer scheduled");
        self.guard(id)
    }

    /// Drain every paint task, in scheduling order.
    pub fn paint(&self) -> Vec<TaskId> {
        let mut state = self.inner.borrow_mut();
        let fired: Vec<TaskId> = state
            .pending
            .iter()
            .filter(|(_, due)| **due == Due::NextPaint)
            .map(|(id, _)| *id)
            .collect();
        for id in &fired {
            state.pending.remove(id);
        }
        fired
    }

    /// Move the clock forward and drain due timers, ordered by due time then scheduling order.
    ///
    /// The clock never runs backwards.
    pub fn advance_to(&self, now_ms: f64) -> Vec<TaskId> {
        let mut state = self.inner.borrow_mut();
        if now_ms.is_finite() && now_ms > state.now_ms {
            state.now_ms = now_ms;
        }
        let now = state.now_ms;
        let mut fired: Vec<(f64, TaskId)> = state
            .pending
            .iter()
            .filter_map(|(id, due)| match *due {
                Due::At(at) if at <= now => Some((at, *id)),
                _ => None,
            })
            .collect();
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        for (_, id) in &fired {
            state.pending.remove(id);
        }
        fired.into_iter().map(|(_, id)| id).collect()
    }

    fn guard(&self, id: TaskId) -> ScheduledTask {
        ScheduledTask {
            id,
            queue: Rc::downgrade(&self.inner),
        }
    }
}

/// Handle to scheduled work. Dropping it cancels the work if it has not fired yet.
#[must_use = "dropping a ScheduledTask cancels it"]
#[derive(Debug)]
pub struct ScheduledTask {
    id: TaskId,
    queue: Weak<RefCell<SchedulerState>>,
}

impl ScheduledTask {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|q| q.borrow().pending.contains_key(&self.id))
    }

    /// Whether `fired` contains this task.
    pub fn fired_in(&self, fired: &[TaskId]) -> bool {
        fired.contains(&self.id)
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(q) = self.queue.upgrade()
            && let Ok(mut state) = q.try_borrow_mut()
        {
            state.pending.remove(&self.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
