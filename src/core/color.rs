use crate::core::constants::COLOR_CYCLE_INTERVAL_MS;
use crate::core::particle::Viewport;
use crate::core::surface::{Color, Surface};
use std::time::Duration;

/// Wall-clock time of day, as read from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

/// Seconds sweep the hue, minutes the saturation; lightness peaks around noon.
pub fn time_to_hsl(t: ClockTime) -> Color {
    let h = t.seconds as f32 / 60.0 * 360.0;
    let s = t.minutes as f32 / 60.0 * 100.0;
    let l = (100.0 - (12.0 - (t.hours % 23) as f32).abs() / 12.0 * 70.0) - 20.0;
    Color::Hsl(h, s, l)
}

/// Throttled background color modulation.
#[derive(Clone, Debug, Default)]
pub struct ColorCycle {
    last_update: Option<Duration>,
    applied: bool,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called every frame; repaints at most once per interval. `now` is any
    /// monotonic time since start. Trail mode also flashes the canvas.
    pub fn update(
        &mut self,
        enabled: bool,
        trail_mode: bool,
        clock: ClockTime,
        now: Duration,
        viewport: &Viewport,
        surface: &mut dyn Surface,
    ) {
        if let Some(last) = self.last_update {
            if now.saturating_sub(last) < Duration::from_millis(COLOR_CYCLE_INTERVAL_MS) {
                return;
            }
        }
        self.last_update = Some(now);

        if enabled {
            let color = time_to_hsl(clock);
            if trail_mode {
                surface.fill_rect(0.0, 0.0, viewport.width, viewport.height, color);
            }
            surface.set_background_color(Some(color));
            self.applied = true;
        } else if self.applied {
            surface.set_background_color(None);
            self.applied = false;
        }
    }
}
