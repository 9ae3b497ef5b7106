use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// Shared stop flag; stopping propagates to every handle split off the same
/// generation run.
#[derive(Clone, Debug, Default)]
pub struct Flag(Arc<RwLock<bool>>);

impl Flag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        *self.0.write().unwrap() = true;
    }

    pub fn is_stopped(&self) -> bool {
        *self.0.read().unwrap()
    }
}

/// Progress of one generation run, aggregated over split children.
#[derive(Clone, Default)]
pub struct ProgressHandle {
    progress: Arc<Mutex<Progress>>,
    children: Arc<Mutex<Vec<ProgressHandle>>>,
    flag: Flag,
}

impl ProgressHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Child handle sharing this handle's stop flag; its counts are folded
    /// into [`ProgressHandle::progress`].
    pub fn split(&self) -> Self {
        let child = ProgressHandle {
            flag: self.flag.clone(),
            ..Self::new()
        };
        self.children.lock().unwrap().push(child.clone());
        child
    }

    pub fn lock(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap()
    }

    pub fn progress(&self) -> Progress {
        let own = *self.lock();
        self.children
            .lock()
            .unwrap()
            .iter()
            .fold(own, |sum, child| sum.combine(&child.progress()))
    }

    pub fn stop(&self) {
        self.flag.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.is_stopped()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    pub done: usize,
    pub from: usize,
    pub is_done: bool,
}

impl Progress {
    pub fn percent(&self) -> f32 {
        self.done as f32 / self.from as f32
    }

    pub fn finish(&mut self) {
        self.done = self.from;
        self.is_done = true;
    }

    pub fn combine(&self, other: &Self) -> Self {
        Self {
            done: self.done + other.done,
            from: self.from + other.from,
            is_done: self.is_done && other.is_done,
        }
    }
}
