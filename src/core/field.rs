use crate::core::config::{TrailStyle, VisualParams};
use crate::core::constants::{MIN_STAR_COUNT, TRAIL_FADE_ALPHA, TRAIL_LINE_WIDTH};
use crate::core::cue::{CueEmitter, ExitCue, Side};
use crate::core::particle::{Particle, StepContext, Viewport};
use crate::core::surface::{Color, Surface};
use rand::Rng;

/// Dense, serial-indexed star population.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    target_count: usize,
    exit_count: u64,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Total replacements since the field was created.
    pub fn exit_count(&self) -> u64 {
        self.exit_count
    }

    /// Rebuild the whole population with `count` fresh stars (at least one).
    pub fn resize<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        params: &VisualParams,
        viewport: &Viewport,
        rng: &mut R,
    ) {
        let count = count.max(MIN_STAR_COUNT);
        self.target_count = count;
        self.particles = (0..count)
            .map(|serial| Particle::spawn(serial, params, viewport, rng))
            .collect();
        log::debug!("[field] resized to {} stars", count);
    }

    /// Step every star and respawn those that left the viewport, in place.
    /// Returns how many were replaced.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        ctx: &StepContext,
        params: &VisualParams,
        viewport: &Viewport,
        cues: &mut dyn CueEmitter,
        rng: &mut R,
    ) -> usize {
        let origin = viewport.origin();
        let can_replace = self.particles.len() <= self.target_count;
        let mut replaced = 0;
        for i in 0..self.particles.len() {
            let star = &mut self.particles[i];
            star.step(ctx);
            if !star.is_outside(viewport) || !can_replace {
                continue;
            }
            self.exit_count += 1;
            if params.cues_enabled {
                cues.trigger_cue(&ExitCue {
                    serial: star.serial,
                    side: Side::from_offset(star.position.x - origin.x),
                    strength: star.radius / ctx.radius_cap.max(f32::EPSILON),
                    x_ratio: star.position.x / viewport.width,
                    exit_count: self.exit_count,
                    star_count: params.star_count,
                    speed_factor: params.speed_factor,
                });
            }
            let serial = star.serial;
            self.particles[i] = Particle::spawn(serial, params, viewport, rng);
            replaced += 1;
        }
        replaced
    }

    /// Grow stars whose spectrum bin (`serial mod bins`) is loud relative to
    /// the per-bin share of the running average.
    pub fn react_to_spectrum(
        &mut self,
        spectrum: &[u8],
        running_average: f32,
        threshold_factor: f32,
        growth: f32,
        cap: f32,
    ) {
        if spectrum.is_empty() {
            return;
        }
        let threshold = running_average / spectrum.len() as f32 * threshold_factor;
        for star in &mut self.particles {
            let level = spectrum[star.serial % spectrum.len()] as f32;
            if level > threshold {
                star.grow(growth, cap);
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, trail_mode: bool, style: TrailStyle) {
        if trail_mode {
            surface.fade_trails(TRAIL_FADE_ALPHA);
        } else {
            surface.clear();
        }
        let lines = trail_mode && style == TrailStyle::Lines;
        for star in &self.particles {
            if lines {
                surface.draw_line(star.last_position, star.position, Color::WHITE, TRAIL_LINE_WIDTH);
            } else {
                surface.fill_rect(
                    star.position.x.floor(),
                    star.position.y.floor(),
                    star.radius,
                    star.radius,
                    Color::WHITE,
                );
            }
        }
    }
}
