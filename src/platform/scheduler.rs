//! Virtual-clock task queue standing in for `setTimeout` and
//! `requestIdleCallback`.
//!
//! Nothing runs on its own: callers move the clock with [`Scheduler::advance`]
//! or signal an idle period with [`Scheduler::run_idle`], and get back the
//! tasks that became due, in order.

#[derive(Debug)]
struct Timer<T> {
    due: u64,
    seq: u64,
    task: T,
}

#[derive(Debug)]
struct IdleRequest<T> {
    deadline: Option<u64>,
    seq: u64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    timers: Vec<Timer<T>>,
    idle: Vec<IdleRequest<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { now_ms: 0, next_seq: 0, timers: Vec::new(), idle: Vec::new() }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub fn set_timeout(&mut self, delay_ms: u64, task: T) {
        let seq = self.seq();
        self.timers.push(Timer { due: self.now_ms + delay_ms, seq, task });
    }

    /// Queue `task` for the next idle period, or at the latest after `timeout_ms`
    pub fn request_idle_callback(&mut self, task: T, timeout_ms: Option<u64>) {
        let seq = self.seq();
        let deadline = timeout_ms.map(|t| self.now_ms + t);
        self.idle.push(IdleRequest { deadline, seq, task });
    }

    /// Number of queued timers and idle callbacks
    pub fn pending(&self) -> usize {
        self.timers.len() + self.idle.len()
    }

    /// Move the clock forward and return every task that became due:
    /// timers whose delay elapsed and idle callbacks whose timeout elapsed.
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        let target = self.now_ms + ms;

        let (due_timers, timers): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.due <= target);
        self.timers = timers;

        let (due_idle, idle): (Vec<_>, Vec<_>) = std::mem::take(&mut self.idle)
            .into_iter()
            .partition(|r| r.deadline.map(|d| d <= target).unwrap_or(false));
        self.idle = idle;

        let mut due: Vec<(u64, u64, T)> = due_timers
            .into_iter()
            .map(|t| (t.due, t.seq, t.task))
            .chain(due_idle.into_iter().filter_map(|r| r.deadline.map(|d| (d, r.seq, r.task))))
            .collect();
        due.sort_by_key(|(at, seq, _)| (*at, *seq));

        self.now_ms = target;
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    /// The host went idle: run every pending idle callback in request order
    pub fn run_idle(&mut self) -> Vec<T> {
        let mut idle = std::mem::take(&mut self.idle);
        idle.sort_by_key(|r| r.seq);
        idle.into_iter().map(|r| r.task).collect()
    }
}
