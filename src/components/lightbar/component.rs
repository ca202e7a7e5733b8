//! Leptos component wrapping the lightbar canvas.
//!
//! On mount the component sizes its canvas, selects the session theme, and
//! starts two schedules: a 120 Hz interval that flags simulation ticks and a
//! `requestAnimationFrame` chain that consumes the flag and renders. Both
//! are cancelled when the component unmounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::simulation::Simulation;
use super::surface::CanvasSurface;
use super::theme;

/// Milliseconds between simulation tick requests (120 Hz).
const TICK_INTERVAL_MS: i32 = 1000 / 120;

/// Renders the ambient lightbar particle animation on a canvas element.
///
/// The canvas re-syncs its pixel size to its on-screen size every frame, so
/// the host page is free to restyle it at any time. All timers and frame
/// callbacks are torn down on unmount; the population and theme live only
/// for the mount.
#[component]
pub fn Lightbar(#[prop(optional, into)] class: String) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let simulation: Rc<RefCell<Option<Simulation>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let tick_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let interval_handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

	let (simulation_init, animate_init, tick_cb_init) =
		(simulation.clone(), animate.clone(), tick_cb.clone());
	let (frame_handle_init, interval_handle_init) =
		(frame_handle.clone(), interval_handle.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window = web_sys::window().unwrap();

		canvas.set_width(canvas.scroll_width() as u32);
		canvas.set_height(canvas.scroll_height() as u32);

		let mut rng = SmallRng::from_entropy();
		let today = js_sys::Date::new_0();
		let theme = theme::select(today.get_month() + 1, today.get_date(), &mut rng);
		info!(
			"lightbar: theme '{}' with {} image(s)",
			theme.name,
			theme.images.len()
		);

		*simulation_init.borrow_mut() = Some(Simulation::new(
			&theme,
			canvas.width() as f64,
			canvas.height() as f64,
			rng,
		));

		let simulation_tick = simulation_init.clone();
		*tick_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut sim) = *simulation_tick.borrow_mut() {
				sim.request_tick();
			}
		}));
		if let Some(ref cb) = *tick_cb_init.borrow() {
			interval_handle_init.set(
				window
					.set_interval_with_callback_and_timeout_and_arguments_0(
						cb.as_ref().unchecked_ref(),
						TICK_INTERVAL_MS,
					)
					.ok(),
			);
		}

		let (simulation_anim, animate_inner) = (simulation_init.clone(), animate_init.clone());
		let (frame_handle_anim, canvas_anim) = (frame_handle_init.clone(), canvas.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Track layout changes before drawing; setting the size also
			// clears the previous frame.
			canvas_anim.set_width(canvas_anim.scroll_width() as u32);
			canvas_anim.set_height(canvas_anim.scroll_height() as u32);

			// A missing 2D context skips the frame but keeps the loop alive.
			if let Some(mut surface) = CanvasSurface::from_canvas(&canvas_anim) {
				if let Some(ref mut sim) = *simulation_anim.borrow_mut() {
					sim.frame(&mut surface);
				}
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				frame_handle_anim.set(
					web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));
		// Run the loop once synchronously so the first frame draws without
		// waiting for the next display refresh; it schedules its successor.
		if let Some(ref cb) = *animate_init.borrow() {
			let f: &js_sys::Function = cb.as_ref().unchecked_ref();
			let _ = f.call0(&JsValue::NULL);
		}
	});

	// Browser handles are not Send; SendWrapper satisfies the cleanup bound
	// while the closure only ever runs on the mounting thread.
	let cleanup = SendWrapper::new(move || {
		let window = web_sys::window().unwrap();
		if let Some(handle) = frame_handle.take() {
			let _ = window.cancel_animation_frame(handle);
		}
		if let Some(handle) = interval_handle.take() {
			window.clear_interval_with_handle(handle);
		}
		if let Some(ref mut sim) = *simulation.borrow_mut() {
			sim.stop();
		}
		animate.borrow_mut().take();
		tick_cb.borrow_mut().take();
	});
	on_cleanup(move || cleanup.take()());

	let class_attr = format!("lightbar-particles {class}").trim_end().to_string();
	view! {
		<canvas
			node_ref=canvas_ref
			class=class_attr
			style="display: block; width: 100%; height: 100%; pointer-events: none;"
		/>
	}
}
