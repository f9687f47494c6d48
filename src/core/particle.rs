use crate::core::config::{ReactiveTuning, VisualParams};
use crate::core::constants::*;
use crate::core::input::PointerState;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Drawable area in canvas pixels. Particles radiate from its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Bounding-box test, letting a star slide fully off the top/left edge
    /// before it counts as gone.
    #[inline]
    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= -radius && pos.x <= self.width && pos.y >= -radius && pos.y <= self.height
    }
}

/// Per-tick inputs shared by every particle step.
#[derive(Clone, Copy, Debug)]
pub struct StepContext {
    pub pointer: PointerState,
    pub speed_factor: f32,
    /// `None` when audio is absent or audio-reactive mode is off.
    pub intensity_over_time: Option<f32>,
    pub pointer_audio_divisor: f32,
    pub pointer_fallback_multiplier: f32,
    pub accel_audio_divisor: f32,
    pub radius_cap: f32,
}

impl StepContext {
    pub fn new(
        pointer: PointerState,
        speed_factor: f32,
        intensity_over_time: Option<f32>,
        tuning: &ReactiveTuning,
    ) -> Self {
        Self {
            pointer,
            speed_factor,
            intensity_over_time,
            pointer_audio_divisor: tuning.pointer_audio_divisor,
            pointer_fallback_multiplier: tuning.pointer_fallback_multiplier,
            accel_audio_divisor: tuning.accel_audio_divisor,
            radius_cap: tuning.radius_cap,
        }
    }
}

/// One star. `serial` is its slot in the field and its spectrum bin key.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub serial: usize,
    pub angle: f32,
    pub distance: f32,
    pub radius: f32,
    pub position: Vec2,
    pub last_position: Vec2,
    pub velocity_distance: f32,
    pub velocity_angle: f32,
    pub acceleration_distance: f32,
    pub radius_growth: f32,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(
        serial: usize,
        params: &VisualParams,
        viewport: &Viewport,
        rng: &mut R,
    ) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let distance = rng.gen::<f32>() * SPAWN_DISTANCE_JITTER - SPAWN_DISTANCE_JITTER * 0.5
            + viewport.height / SPAWN_DISTANCE_HEIGHT_DIVISOR;
        let velocity_angle = if params.rotation_enabled {
            // tight spawns near the origin would otherwise spin without bound
            SPIRAL_DISTANCE_COEFF / distance.abs().max(1.0) + SPIRAL_BASE
        } else {
            0.0
        };
        let velocity_distance = (rng.gen::<f32>() * SPEED_SPAN + SPEED_MIN) * params.speed_factor;
        let acceleration_distance = rng.gen::<f32>() * ACCEL_SPAN + ACCEL_MIN;
        let radius_growth = rng.gen::<f32>() * velocity_distance / RADIUS_GROWTH_DIVISOR;
        let position = viewport.origin() + distance * Vec2::new(angle.cos(), -angle.sin());
        Self {
            serial,
            angle,
            distance,
            radius: INITIAL_RADIUS,
            position,
            last_position: position,
            velocity_distance,
            velocity_angle,
            acceleration_distance,
            radius_growth,
        }
    }

    /// Advance one tick: free flight when no pointer is pressed, otherwise
    /// steer around the pointer.
    pub fn step(&mut self, ctx: &StepContext) {
        self.last_position = self.position;
        if !ctx.pointer.down {
            let audio_accel = ctx
                .intensity_over_time
                .map(|iot| (1.0 + iot / ctx.accel_audio_divisor).max(0.0))
                .unwrap_or(1.0);
            self.velocity_distance *= self.acceleration_distance * audio_accel;
            self.distance += self.velocity_distance;
            self.angle += self.velocity_angle;
            self.radius = (self.radius + self.radius_growth).min(ctx.radius_cap.max(self.radius));
            self.position +=
                self.velocity_distance * Vec2::new(self.angle.cos(), -self.angle.sin());
        } else {
            self.angle = PI - (ctx.pointer.x - self.position.x).atan2(ctx.pointer.y - self.position.y);
            let multiplier = ctx
                .intensity_over_time
                .map(|iot| iot / ctx.pointer_audio_divisor)
                .unwrap_or(ctx.pointer_fallback_multiplier);
            let step = self.velocity_distance * ctx.speed_factor * multiplier;
            self.position += step * Vec2::new(self.angle.cos(), self.angle.sin());
        }
    }

    /// Multiplicative size boost from a loud spectrum bin, capped.
    pub fn grow(&mut self, factor: f32, cap: f32) {
        if factor > 1.0 && self.radius < cap {
            self.radius = (self.radius * factor).min(cap);
        }
    }

    #[inline]
    pub fn is_outside(&self, viewport: &Viewport) -> bool {
        !viewport.contains(self.position, self.radius)
    }
}
