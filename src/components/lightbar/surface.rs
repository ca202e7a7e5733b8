//! Drawing surface abstraction over the canvas 2D context.
//!
//! The simulation and renderer talk to a [`Surface`] rather than to
//! `CanvasRenderingContext2d` directly, which keeps particle drawing
//! testable off the browser. [`CanvasSurface`] is the real implementation;
//! tests use a recording double.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Handle to a themed sprite asset.
///
/// On the web target this wraps an `HtmlImageElement` whose natural
/// dimensions only become available once the browser finishes loading the
/// asset; until then [`SpriteImage::natural_size`] returns `None` and the
/// renderer skips the blit for that frame.
#[derive(Clone, Debug)]
pub struct SpriteImage {
	src: String,
	#[cfg(target_arch = "wasm32")]
	element: web_sys::HtmlImageElement,
	#[cfg(not(target_arch = "wasm32"))]
	natural: Option<(f64, f64)>,
}

impl SpriteImage {
	/// Asset path this sprite was created from.
	pub fn src(&self) -> &str {
		&self.src
	}
}

#[cfg(target_arch = "wasm32")]
impl SpriteImage {
	/// Create a sprite handle for `src` and start the browser load.
	pub fn new(src: &str) -> Option<Self> {
		let element = web_sys::HtmlImageElement::new().ok()?;
		element.set_src(src);
		Some(Self {
			src: src.to_string(),
			element,
		})
	}

	/// Natural pixel dimensions, once the asset has loaded.
	pub fn natural_size(&self) -> Option<(f64, f64)> {
		let (w, h) = (
			self.element.natural_width() as f64,
			self.element.natural_height() as f64,
		);
		(w > 0.0 && h > 0.0).then_some((w, h))
	}

	pub(crate) fn element(&self) -> &web_sys::HtmlImageElement {
		&self.element
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl SpriteImage {
	/// Native stand-in; the asset starts unloaded like a fresh browser image.
	pub fn new(src: &str) -> Option<Self> {
		Some(Self {
			src: src.to_string(),
			natural: None,
		})
	}

	/// Native stand-in with a known load state, for tests.
	pub fn with_natural_size(src: &str, natural: Option<(f64, f64)>) -> Self {
		Self {
			src: src.to_string(),
			natural,
		}
	}

	/// Natural pixel dimensions, once the asset has loaded.
	pub fn natural_size(&self) -> Option<(f64, f64)> {
		self.natural
	}
}

/// The drawable 2D surface the lightbar renders onto.
///
/// A thin slice of the canvas 2D API: dimensions, path fills, transforms,
/// sprite blits, and global alpha.
pub trait Surface {
	/// Surface width in pixels.
	fn width(&self) -> f64;
	/// Surface height in pixels.
	fn height(&self) -> f64;
	/// Push the current transform/alpha state.
	fn save(&mut self);
	/// Pop the transform/alpha state.
	fn restore(&mut self);
	/// Start a new path.
	fn begin_path(&mut self);
	/// Set the opacity applied to subsequent draws.
	fn set_global_alpha(&mut self, alpha: f64);
	/// Translate the coordinate system.
	fn translate(&mut self, x: f64, y: f64);
	/// Rotate the coordinate system (radians).
	fn rotate(&mut self, angle: f64);
	/// Scale the coordinate system; negative factors mirror.
	fn scale(&mut self, x: f64, y: f64);
	/// Blit a sprite into the destination rectangle.
	fn draw_sprite(&mut self, sprite: &SpriteImage, dx: f64, dy: f64, dw: f64, dh: f64);
	/// Add an ellipse to the current path.
	fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, rotation: f64);
	/// Set the fill style for subsequent fills.
	fn set_fill_style(&mut self, style: &str);
	/// Fill the current path.
	fn fill(&mut self);
}

/// [`Surface`] backed by a real canvas 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Wrap a canvas, or `None` when no 2D context is available.
	pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()??
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self {
			canvas: canvas.clone(),
			ctx,
		})
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		self.canvas.width() as f64
	}

	fn height(&self) -> f64 {
		self.canvas.height() as f64
	}

	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = self.ctx.translate(x, y);
	}

	fn rotate(&mut self, angle: f64) {
		let _ = self.ctx.rotate(angle);
	}

	fn scale(&mut self, x: f64, y: f64) {
		let _ = self.ctx.scale(x, y);
	}

	fn draw_sprite(&mut self, sprite: &SpriteImage, dx: f64, dy: f64, dw: f64, dh: f64) {
		#[cfg(target_arch = "wasm32")]
		let _ = self
			.ctx
			.draw_image_with_html_image_element_and_dw_and_dh(sprite.element(), dx, dy, dw, dh);
		#[cfg(not(target_arch = "wasm32"))]
		let _ = (sprite, dx, dy, dw, dh);
	}

	fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, rotation: f64) {
		let _ = self
			.ctx
			.ellipse(x, y, radius_x, radius_y, rotation, 0.0, std::f64::consts::TAU);
	}

	fn set_fill_style(&mut self, style: &str) {
		self.ctx.set_fill_style_str(style);
	}

	fn fill(&mut self) {
		self.ctx.fill();
	}
}
