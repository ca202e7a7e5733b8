//! Draws individual particles onto a [`Surface`].

use std::f64::consts::PI;

use super::particle::Particle;
use super::surface::Surface;

/// Render one particle at its current position and fade.
///
/// Image particles blit their sprite centered on the particle, sized to
/// `size` with the aspect ratio taken from the sprite's natural dimensions.
/// Sprites whose natural dimensions are not yet known (the browser is still
/// loading the asset) are skipped for the frame rather than drawn with a
/// degenerate aspect ratio. Plain particles render as a small white ellipse
/// aligned to their travel direction.
pub fn draw(particle: &Particle, surface: &mut impl Surface) {
	surface.save();
	surface.begin_path();
	surface.set_global_alpha(particle.fade());

	if let Some(sprite) = particle.image() {
		if let Some((natural_w, natural_h)) = sprite.natural_size() {
			surface.translate(particle.x, particle.y);
			let w = particle.size;
			let h = natural_w / natural_h * w;
			if sprite.src().contains("shark") {
				// Sharks mirror to face their travel direction instead of rotating.
				let flip = if particle.direction == PI { 1.0 } else { -1.0 };
				surface.scale(flip, 1.0);
				surface.draw_sprite(sprite, -w / 2.0 * flip, -h / 2.0, w, h);
			} else {
				surface.rotate(particle.direction - PI);
				surface.draw_sprite(sprite, -w / 2.0, h, h, w);
			}
		}
	} else {
		surface.ellipse(
			particle.x,
			particle.y,
			particle.radius,
			particle.radius * 1.5,
			particle.direction,
		);
		surface.set_fill_style("white");
		surface.fill();
	}

	surface.restore();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::lightbar::particle::ParticleOptions;
	use crate::components::lightbar::surface::SpriteImage;
	use crate::components::lightbar::surface::testing::{DrawOp, RecordingSurface};
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	fn particle(options: ParticleOptions) -> Particle {
		let mut rng = SmallRng::seed_from_u64(7);
		Particle::new(&mut rng, 800.0, 600.0, options)
	}

	fn has_sprite_op(surface: &RecordingSurface) -> bool {
		surface
			.ops
			.iter()
			.any(|op| matches!(op, DrawOp::Sprite { .. }))
	}

	#[test]
	fn plain_particle_draws_a_white_ellipse_from_radius() {
		// A size range without an image must not change the dot; the ellipse
		// radii come from the radius draw alone.
		let p = particle(ParticleOptions {
			size_range: Some((10.0, 15.0)),
			..Default::default()
		});
		let mut surface = RecordingSurface::new(800.0, 600.0);
		draw(&p, &mut surface);

		assert!(!has_sprite_op(&surface));
		assert!(surface.ops.contains(&DrawOp::Ellipse {
			x: p.x,
			y: p.y,
			radius_x: 1.0,
			radius_y: 1.5,
			rotation: p.direction,
		}));
		assert!(surface.ops.contains(&DrawOp::FillStyle("white".into())));
		assert!(surface.ops.contains(&DrawOp::Fill));
	}

	#[test]
	fn alpha_is_the_particle_fade() {
		let p = particle(ParticleOptions::default());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		draw(&p, &mut surface);

		assert!(surface.ops.contains(&DrawOp::GlobalAlpha(p.fade())));
	}

	#[test]
	fn unloaded_sprite_draws_nothing_this_frame() {
		let p = particle(ParticleOptions {
			image: Some(SpriteImage::with_natural_size(
				"/lightbar-images/cat.png",
				None,
			)),
			size_range: Some((30.0, 38.0)),
			..Default::default()
		});
		let mut surface = RecordingSurface::new(800.0, 600.0);
		draw(&p, &mut surface);

		assert!(!has_sprite_op(&surface));
		assert!(
			!surface
				.ops
				.iter()
				.any(|op| matches!(op, DrawOp::Ellipse { .. } | DrawOp::Fill))
		);
	}

	#[test]
	fn loaded_sprite_rotates_to_face_direction() {
		let mut p = particle(ParticleOptions {
			image: Some(SpriteImage::with_natural_size(
				"/lightbar-images/fishie.png",
				Some((64.0, 32.0)),
			)),
			size_range: Some((10.0, 13.0)),
			..Default::default()
		});
		p.size = 10.0;
		p.direction = PI / 2.0;
		let mut surface = RecordingSurface::new(800.0, 600.0);
		draw(&p, &mut surface);

		assert!(surface.ops.contains(&DrawOp::Translate(p.x, p.y)));
		assert!(surface.ops.contains(&DrawOp::Rotate(PI / 2.0 - PI)));
		// Aspect from natural dimensions: h = 64/32 * 10 = 20.
		assert!(surface.ops.contains(&DrawOp::Sprite {
			src: "/lightbar-images/fishie.png".into(),
			dx: -5.0,
			dy: 20.0,
			dw: 20.0,
			dh: 10.0,
		}));
	}

	#[test]
	fn shark_mirrors_instead_of_rotating() {
		let sprite = SpriteImage::with_natural_size("/lightbar-images/shark.png", Some((50.0, 50.0)));
		let mut p = particle(ParticleOptions {
			image: Some(sprite),
			size_range: Some((48.0, 56.0)),
			horizontal_motion: true,
			..Default::default()
		});
		p.size = 48.0;

		p.direction = PI;
		let mut surface = RecordingSurface::new(800.0, 600.0);
		draw(&p, &mut surface);
		assert!(surface.ops.contains(&DrawOp::Scale(1.0, 1.0)));
		assert!(surface.ops.contains(&DrawOp::Sprite {
			src: "/lightbar-images/shark.png".into(),
			dx: -24.0,
			dy: -24.0,
			dw: 48.0,
			dh: 48.0,
		}));
		assert!(
			!surface
				.ops
				.iter()
				.any(|op| matches!(op, DrawOp::Rotate(_)))
		);

		p.direction = 0.0;
		let mut surface = RecordingSurface::new(800.0, 600.0);
		draw(&p, &mut surface);
		assert!(surface.ops.contains(&DrawOp::Scale(-1.0, 1.0)));
		assert!(surface.ops.contains(&DrawOp::Sprite {
			src: "/lightbar-images/shark.png".into(),
			dx: 24.0,
			dy: -24.0,
			dw: 48.0,
			dh: 48.0,
		}));
	}
}
