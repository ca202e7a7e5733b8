//! lightbar: ambient drifting-particle animation for a canvas surface.
//!
//! This crate provides a WASM-based decorative component: small glyphs or
//! seasonal sprites drift out of a glowing bar, fading in and out over
//! randomized lifetimes. The sprite set for a session is picked once at
//! mount from calendar- and probability-driven override rules.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

// Pulled in for its "js" feature so rand can seed from browser entropy.
use getrandom as _;

pub mod components;

pub use components::lightbar::{Lightbar, Theme, ThemeImage};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("lightbar: logging initialized");
}

/// Demo application component hosting the lightbar over a dark page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Lightbar" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div
			class="lightbar-host"
			style="position: relative; width: 100%; height: 680px; overflow: hidden; pointer-events: none; background: #0d1117;"
		>
			<Lightbar />
		</div>
	}
}
