//! Ambient lightbar particle animation.
//!
//! Renders a fixed population of drifting particles over an HTML canvas:
//! - Randomized drift, speed, and lifetime per particle, recycling forever
//! - Parabolic fade so particles appear and disappear smoothly
//! - Seasonal/easter-egg sprite themes picked once per mount
//! - Fixed-rate simulation ticks decoupled from display refresh
//!
//! # Example
//!
//! ```ignore
//! use lightbar::Lightbar;
//!
//! view! { <Lightbar /> }
//! ```

mod component;
mod particle;
mod render;
mod simulation;
pub mod surface;
pub mod theme;

pub use component::Lightbar;
pub use particle::{Particle, ParticleOptions};
pub use simulation::{PARTICLE_COUNT, Simulation};
pub use theme::{Theme, ThemeImage};
