//! Drives the particle population for one mounted lightbar.
//!
//! Owns population creation from the session theme, the tick-pending flag
//! that decouples simulation rate from display refresh, and teardown.

use rand::Rng;
use rand::rngs::SmallRng;

use super::particle::{Particle, ParticleOptions};
use super::render;
use super::surface::{SpriteImage, Surface};
use super::theme::Theme;

/// Fixed population size for a session.
pub const PARTICLE_COUNT: usize = 265;

/// The particle population and per-frame stepping for one mount.
///
/// Simulation ticks are decoupled from render frames: a fixed-rate timer
/// calls [`Simulation::request_tick`], and [`Simulation::frame`] consumes at
/// most one pending tick before rendering. Extra requests between frames
/// collapse into a single tick, capping the simulation rate independently
/// of the display's refresh rate.
pub struct Simulation {
	particles: Vec<Particle>,
	tick_pending: bool,
	running: bool,
	rng: SmallRng,
}

impl Simulation {
	/// Build the population for `theme` on a surface of the given size.
	///
	/// Indices up to the theme's image-particle count are eligible to bear a
	/// sprite; each draws its entry uniformly from the theme's image list.
	/// Fish and shark sprites always swim sideways, theme flag or not.
	pub fn new(theme: &Theme, width: f64, height: f64, mut rng: SmallRng) -> Self {
		let image_count = theme.image_particle_count(PARTICLE_COUNT);
		let mut particles = Vec::with_capacity(PARTICLE_COUNT);

		for i in 0..PARTICLE_COUNT {
			let entry = if theme.images.is_empty() {
				None
			} else {
				Some(&theme.images[rng.gen_range(0..theme.images.len())])
			};

			let eligible = i as f64 <= image_count;
			let horizontal = theme.horizontal_motion
				|| entry.is_some_and(|e| e.src.contains("fishie") || e.src.contains("shark"));

			let options = ParticleOptions {
				image: entry
					.filter(|_| eligible)
					.and_then(|e| SpriteImage::new(e.src)),
				horizontal_motion: horizontal,
				size_range: entry.map(|e| e.size_range),
			};
			particles.push(Particle::new(&mut rng, width, height, options));
		}

		Self {
			particles,
			tick_pending: true,
			running: true,
			rng,
		}
	}

	/// Mark that a simulation tick is due; called by the fixed-rate timer.
	pub fn request_tick(&mut self) {
		if self.running {
			self.tick_pending = true;
		}
	}

	/// One render-loop pass: consume at most one pending tick, then draw
	/// every particle. Does nothing once stopped.
	pub fn frame(&mut self, surface: &mut impl Surface) {
		if !self.running {
			return;
		}

		let (width, height) = (surface.width(), surface.height());
		if self.tick_pending {
			for particle in &mut self.particles {
				particle.update(&mut self.rng, width, height);
			}
			self.tick_pending = false;
		}

		for particle in &self.particles {
			render::draw(particle, surface);
		}
	}

	/// Stop the session; later frames and tick requests are ignored.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Particle population, in creation order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::lightbar::surface::testing::RecordingSurface;
	use crate::components::lightbar::theme::{Theme, ThemeImage};
	use rand::SeedableRng;
	use std::f64::consts::PI;

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(99)
	}

	fn cat_theme() -> Theme {
		Theme {
			name: "cat",
			images: vec![ThemeImage {
				src: "/lightbar-images/cat.png",
				size_range: (30.0, 38.0),
			}],
			image_share: 0.1,
			horizontal_motion: false,
		}
	}

	fn ages(sim: &Simulation) -> Vec<f64> {
		sim.particles().iter().map(|p| p.age).collect()
	}

	#[test]
	fn population_has_fixed_count() {
		let sim = Simulation::new(&Theme::plain(), 800.0, 600.0, rng());
		assert_eq!(sim.particles().len(), PARTICLE_COUNT);
	}

	#[test]
	fn plain_theme_creates_no_image_particles() {
		let sim = Simulation::new(&Theme::plain(), 800.0, 600.0, rng());
		assert!(sim.particles().iter().all(|p| p.image().is_none()));
	}

	#[test]
	fn only_indices_below_threshold_bear_images() {
		let theme = cat_theme();
		let sim = Simulation::new(&theme, 800.0, 600.0, rng());
		let threshold = theme.image_particle_count(PARTICLE_COUNT);

		for (i, particle) in sim.particles().iter().enumerate() {
			if i as f64 <= threshold {
				assert!(particle.image().is_some(), "index {i} below threshold");
			} else {
				assert!(particle.image().is_none(), "index {i} above threshold");
			}
		}
	}

	#[test]
	fn fish_sprites_force_horizontal_motion_for_the_population() {
		let theme = Theme {
			name: "fish",
			images: vec![ThemeImage {
				src: "/lightbar-images/fishie.png",
				size_range: (10.0, 13.0),
			}],
			image_share: 0.085,
			horizontal_motion: true,
		};
		let sim = Simulation::new(&theme, 800.0, 600.0, rng());

		for p in sim.particles() {
			assert!(p.direction == 0.0 || p.direction == PI);
			assert_eq!(p.lifetime, 1950.0);
		}
	}

	#[test]
	fn frame_consumes_at_most_one_pending_tick() {
		let mut sim = Simulation::new(&Theme::plain(), 800.0, 600.0, rng());
		let before = ages(&sim);

		// The initial pending tick advances every particle exactly once.
		let mut surface = RecordingSurface::new(800.0, 600.0);
		sim.frame(&mut surface);
		let after_first = ages(&sim);
		assert_ne!(before, after_first);

		// Several tick requests between frames collapse into one tick.
		sim.request_tick();
		sim.request_tick();
		sim.request_tick();
		let mut surface = RecordingSurface::new(800.0, 600.0);
		sim.frame(&mut surface);
		let after_second = ages(&sim);
		let advanced = after_first
			.iter()
			.zip(&after_second)
			.filter(|(a, b)| a != b)
			.count();
		assert_eq!(advanced, PARTICLE_COUNT);

		// No pending tick: the frame still renders but mutates nothing.
		let mut surface = RecordingSurface::new(800.0, 600.0);
		sim.frame(&mut surface);
		assert_eq!(after_second, ages(&sim));
		assert!(!surface.ops.is_empty());
	}

	#[test]
	fn stopped_simulation_neither_mutates_nor_draws() {
		let mut sim = Simulation::new(&Theme::plain(), 800.0, 600.0, rng());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		sim.frame(&mut surface);

		sim.stop();
		let frozen = ages(&sim);

		// Pending timers may still fire after unmount; they must be inert.
		sim.request_tick();
		let mut surface = RecordingSurface::new(800.0, 600.0);
		sim.frame(&mut surface);

		assert!(surface.ops.is_empty());
		assert_eq!(frozen, ages(&sim));
	}
}
