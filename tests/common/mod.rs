// Test doubles shared by the host-side integration tests.
#![allow(dead_code)]

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_web::core::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Resize(u32, u32),
    Clear,
    Fade(f32),
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32 },
    Background(Option<Color>),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.ops.push(Op::Resize(width, height));
    }
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }
    fn fade_trails(&mut self, alpha: f32) {
        self.ops.push(Op::Fade(alpha));
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ops.push(Op::Rect { x, y, w, h, color });
    }
    fn draw_line(&mut self, from: Vec2, to: Vec2, _color: Color, width: f32) {
        self.ops.push(Op::Line { from, to, width });
    }
    fn set_background_color(&mut self, color: Option<Color>) {
        self.ops.push(Op::Background(color));
    }
}

/// Cue emitter whose log stays readable after being boxed into a sim.
#[derive(Clone, Default)]
pub struct RecordingCue {
    pub cues: Rc<RefCell<Vec<ExitCue>>>,
}

impl CueEmitter for RecordingCue {
    fn trigger_cue(&mut self, cue: &ExitCue) {
        self.cues.borrow_mut().push(cue.clone());
    }
}

#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&self, tick: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(tick);
    }
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run everything queued so far; returns how many callbacks ran.
    pub fn run_pending(&self) -> usize {
        let ticks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let n = ticks.len();
        for t in ticks {
            t();
        }
        n
    }
}

pub fn spectrum(level: u8, bins: usize) -> Vec<u8> {
    vec![level; bins]
}
