//! A single drifting lightbar particle.
//!
//! Particles cycle forever: once `age` passes `lifetime` the full kinematic
//! state is redrawn from fresh random draws. The fade curve is zero at both
//! ends of a life, so the respawn is never visible.

use std::f64::consts::PI;

use rand::Rng;

use super::surface::SpriteImage;

/// Simulation ticks per second; lifetimes are expressed in these units.
const TICKS_PER_SECOND: f64 = 65.0;

/// Per-particle configuration, fixed for the whole session.
#[derive(Clone, Debug, Default)]
pub struct ParticleOptions {
	/// Sprite to render instead of the plain dot.
	pub image: Option<SpriteImage>,
	/// Constrain motion to pure left/right drift with a fixed lifetime.
	pub horizontal_motion: bool,
	/// Rendered footprint range; only affects sprite particles.
	pub size_range: Option<(f64, f64)>,
}

/// One independently animated drifting element.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Horizontal position in surface coordinates.
	pub x: f64,
	/// Vertical position in surface coordinates.
	pub y: f64,
	/// Base radius for dot rendering.
	pub radius: f64,
	/// Travel angle in radians; constant until the next reset.
	pub direction: f64,
	/// Distance travelled per tick.
	pub speed: f64,
	/// Ticks before the state is redrawn.
	pub lifetime: f64,
	/// Ticks elapsed since the last reset.
	pub age: f64,
	/// Rendered footprint for sprite particles.
	pub size: f64,
	options: ParticleOptions,
}

impl Particle {
	/// Create a particle with fresh random state, fast-forwarded to a random
	/// point of its lifetime so the population starts desynchronized.
	pub fn new(rng: &mut impl Rng, width: f64, height: f64, options: ParticleOptions) -> Self {
		let mut particle = Self {
			x: 0.0,
			y: 0.0,
			radius: 0.0,
			direction: 0.0,
			speed: 0.0,
			lifetime: 0.0,
			age: 0.0,
			size: 10.0,
			options,
		};
		particle.reset(rng, width, height);
		particle.fast_forward(rng);
		particle
	}

	/// Redraw all kinematic state and restart the particle at age zero,
	/// somewhere inside the bar band at the top of the surface.
	pub fn reset(&mut self, rng: &mut impl Rng, width: f64, _height: f64) {
		self.x = (rng.gen_range(0.0..1.0) * width / 2.0 + width / 4.0).round();
		self.y = rng.gen_range(0.0..1.0) * 100.0 + 5.0;

		self.radius = 1.0 + (rng.gen_range(0.0..1.0_f64) * 0.5).floor();
		self.direction = rng.gen_range(0.0..1.0) * PI / 2.0 + PI / 4.0;
		self.speed = 0.02 + rng.gen_range(0.0..1.0) * 0.085;
		self.lifetime =
			TICKS_PER_SECOND * 3.0 + rng.gen_range(0.0..1.0) * (TICKS_PER_SECOND * 30.0);

		self.size = match self.options.size_range {
			Some((lo, hi)) => rng.gen_range(0.0..1.0) * (hi - lo) + lo,
			None => 10.0,
		};

		if self.options.horizontal_motion {
			self.direction = if rng.gen_bool(0.5) { 0.0 } else { PI };
			self.lifetime = 30.0 * TICKS_PER_SECOND;
		}

		self.age = 0.0;
	}

	/// Jump to a random point of the current lifetime, displacing the
	/// position as if the particle had already travelled that long at its
	/// own speed.
	fn fast_forward(&mut self, rng: &mut impl Rng) {
		self.age = rng.gen_range(0.0..1.0) * self.lifetime;
		let travelled = self.age * self.speed;
		self.x += travelled * self.direction.cos();
		self.y += travelled * self.direction.sin();
	}

	/// Advance one tick; recycles the particle once it outlives `lifetime`.
	pub fn update(&mut self, rng: &mut impl Rng, width: f64, height: f64) {
		self.age += 1.0;
		self.x += self.speed * self.direction.cos();
		self.y += self.speed * self.direction.sin();

		if self.age > self.lifetime {
			self.reset(rng, width, height);
		}
	}

	/// Opacity for the current age: a parabola over normalized age that is
	/// zero at birth and death and peaks at 0.8 mid-life.
	pub fn fade(&self) -> f64 {
		let t = self.age / self.lifetime;
		((t - t * t) * 4.0 * 0.8).max(0.0)
	}

	/// Sprite this particle carries, if it is image-bearing.
	pub fn image(&self) -> Option<&SpriteImage> {
		self.options.image.as_ref()
	}
}
