pub mod arbiter;
pub mod color;
pub mod config;
pub mod constants;
pub mod cue;
pub mod field;
pub mod input;
pub mod intent;
pub mod particle;
pub mod schedule;
pub mod share;
pub mod signal;
pub mod sim;
pub mod surface;

pub use arbiter::*;
pub use color::*;
pub use config::*;
pub use cue::*;
pub use field::*;
pub use input::*;
pub use intent::*;
pub use particle::*;
pub use schedule::*;
pub use share::*;
pub use signal::*;
pub use sim::*;
pub use surface::*;
