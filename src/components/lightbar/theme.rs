//! Seasonal and easter-egg sprite themes.
//!
//! A session's theme is picked once at mount by folding an ordered rule
//! table: every rule is evaluated (calendar window OR probability roll) and
//! the last match wins, so later rules overwrite earlier ones and themes
//! never stack.

use rand::Rng;

/// One candidate sprite with its rendered size range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeImage {
	/// Asset path, served by the host page.
	pub src: &'static str,
	/// Min/max rendered footprint for particles bearing this image.
	pub size_range: (f64, f64),
}

/// The sprite set in effect for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Rule name, for logging.
	pub name: &'static str,
	/// Candidate images; empty means every particle renders as a plain dot.
	pub images: Vec<ThemeImage>,
	/// Fraction of the population eligible to bear an image.
	pub image_share: f64,
	/// Whether the theme itself forces pure left/right drift.
	pub horizontal_motion: bool,
}

impl Theme {
	/// Theme with no sprites at all; the whole population drifts as dots.
	pub fn plain() -> Self {
		Self {
			name: "plain",
			images: Vec::new(),
			image_share: 1.0,
			horizontal_motion: false,
		}
	}

	/// Number of population indices eligible to carry an image.
	pub fn image_particle_count(&self, population: usize) -> f64 {
		population as f64 * self.image_share
	}
}

/// Inclusive day-of-month window within a single month (1-based).
#[derive(Clone, Copy, Debug)]
struct DateWindow {
	month: u32,
	days: (u32, u32),
}

impl DateWindow {
	fn contains(self, month: u32, day: u32) -> bool {
		month == self.month && day >= self.days.0 && day <= self.days.1
	}
}

/// One override rule in the priority table.
struct ThemeRule {
	name: &'static str,
	window: Option<DateWindow>,
	probability: f64,
	images: &'static [ThemeImage],
	image_share: f64,
	horizontal_motion: bool,
}

const fn image(src: &'static str, lo: f64, hi: f64) -> ThemeImage {
	ThemeImage {
		src,
		size_range: (lo, hi),
	}
}

/// Override rules in evaluation order; the last match wins.
const RULES: &[ThemeRule] = &[
	ThemeRule {
		name: "winter-holiday",
		window: Some(DateWindow {
			month: 12,
			days: (24, 26),
		}),
		probability: 0.051,
		images: &[
			image("/lightbar-images/snowflake.svg", 12.0, 20.0),
			image("/lightbar-images/santa.png", 25.0, 35.0),
		],
		image_share: 0.1,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "halloween",
		window: Some(DateWindow {
			month: 10,
			days: (29, 31),
		}),
		probability: 0.05,
		images: &[
			image("/lightbar-images/ghost.png", 20.0, 33.0),
			image("/lightbar-images/pumpkin.png", 25.0, 35.0),
		],
		image_share: 0.0879,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "fish",
		window: None,
		probability: 0.1,
		images: &[
			image("/lightbar-images/fishie.png", 10.0, 13.0),
			image("/lightbar-images/shark.png", 48.0, 56.0),
		],
		image_share: 0.085,
		horizontal_motion: true,
	},
	ThemeRule {
		name: "weed",
		window: Some(DateWindow {
			month: 4,
			days: (20, 20),
		}),
		probability: 0.25,
		images: &[image("/lightbar-images/weed.png", 32.0, 40.0)],
		image_share: 1.0 / 6.25,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "cat",
		window: None,
		probability: 0.2,
		images: &[image("/lightbar-images/cat.png", 30.0, 38.0)],
		image_share: 1.0 / 6.6,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "movie",
		window: None,
		probability: 0.3,
		images: &[
			image("/lightbar-images/camera.png", 24.0, 32.0),
			image("/lightbar-images/popcorn.png", 18.0, 27.0),
		],
		image_share: 1.0 / 7.85,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "chicken",
		window: None,
		probability: 0.06,
		images: &[
			image("/lightbar-images/cock.png", 25.0, 32.0),
			image("/lightbar-images/egg.png", 18.0, 24.0),
			image("/lightbar-images/barn.png", 32.0, 38.0),
		],
		image_share: 1.0 / 9.0,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "money",
		window: None,
		probability: 0.06,
		images: &[
			image("/lightbar-images/money-sack.png", 24.0, 32.0),
			image("/lightbar-images/money.png", 13.0, 23.0),
			image("/lightbar-images/coin.png", 8.0, 20.0),
		],
		image_share: 1.0 / 8.45,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "pirate",
		window: None,
		probability: 0.9,
		images: &[
			image("/lightbar-images/skull.png", 20.0, 28.0),
			image("/lightbar-images/ship.png", 23.0, 27.0),
		],
		image_share: 1.0 / 10.0,
		horizontal_motion: false,
	},
	ThemeRule {
		name: "dev",
		window: None,
		probability: 0.03,
		images: &[
			image("/lightbar-images/ts.png", 20.0, 32.0),
			image("/lightbar-images/git.png", 20.0, 28.0),
		],
		image_share: 1.0 / 9.0,
		horizontal_motion: false,
	},
];

/// Pick the session theme for the given date (1-based month, day-of-month).
///
/// Every rule rolls its probability even when an earlier rule already
/// matched; whichever matching rule comes last in the table is the theme in
/// effect. No rule matching yields [`Theme::plain`].
pub fn select(month: u32, day: u32, rng: &mut impl Rng) -> Theme {
	let mut theme = Theme::plain();

	for rule in RULES {
		let by_date = rule.window.is_some_and(|w| w.contains(month, day));
		let by_roll = rng.gen_bool(rule.probability);
		if by_date || by_roll {
			theme = Theme {
				name: rule.name,
				images: rule.images.to_vec(),
				image_share: rule.image_share,
				horizontal_motion: rule.horizontal_motion,
			};
		}
	}

	theme
}
