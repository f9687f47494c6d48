use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How the host drives frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopMode {
    /// Host frame callbacks (the normal running state).
    AnimationFrame,
    /// Fixed-rate timer fallback when frame callbacks are unavailable.
    FixedRate { interval_ms: i32 },
}

/// Runs a callback once at the host's next opportunity.
pub trait Scheduler {
    fn schedule_next(&self, tick: Box<dyn FnOnce()>);
}

/// Shared stop flag, checked before each iteration and before rescheduling.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Run `frame` once per scheduled iteration until `stop` is raised.
pub fn start_loop<S, F>(scheduler: Rc<S>, stop: StopHandle, frame: F)
where
    S: Scheduler + 'static,
    F: FnMut() + 'static,
{
    let frame: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(frame));
    schedule_iteration(scheduler, stop, frame);
}

fn schedule_iteration<S>(scheduler: Rc<S>, stop: StopHandle, frame: Rc<RefCell<dyn FnMut()>>)
where
    S: Scheduler + 'static,
{
    if stop.is_stopped() {
        return;
    }
    let next = scheduler.clone();
    scheduler.schedule_next(Box::new(move || {
        if stop.is_stopped() {
            log::info!("[loop] stopped");
            return;
        }
        (*frame.borrow_mut())();
        schedule_iteration(next, stop, frame);
    }));
}
