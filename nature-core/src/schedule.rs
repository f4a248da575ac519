//! Frame scheduling seam between a scene and its host.

/// Identifies one requested frame tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The host's frame-scheduling primitive.
///
/// A scene requests one tick when it starts and one after every frame it
/// runs. The host answers a request by calling `Scene::frame` once.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for hosts that drive frames themselves (headless runs).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    issued: u64,
    pending: Option<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Number of ticks requested so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.issued);
        self.issued += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_handles_are_sequential() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_eq!(a.raw() + 1, b.raw());
        assert_eq!(scheduler.pending(), Some(b));
        assert_eq!(scheduler.issued(), 2);
    }

    #[test]
    fn test_cancel_only_clears_matching_handle() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        scheduler.cancel_frame(a);
        assert_eq!(scheduler.pending(), Some(b));
        scheduler.cancel_frame(b);
        assert_eq!(scheduler.pending(), None);
    }
}
