//! Runtime settings, shared with components through Leptos context.

use serde::Deserialize;

/// Where the datasets live and how the graph is laid out.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub graph_url: String,
	pub biography_url: String,
	pub layout: LayoutConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			graph_url: "/enhanced_character_network.json".into(),
			biography_url: "/final_comprehensive_character_database.json".into(),
			layout: LayoutConfig::default(),
		}
	}
}

/// Smallest usable scale; zero would collapse the view transform.
const MIN_ZOOM_FLOOR: f64 = 0.01;

/// Force simulation and canvas parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_radius: f64,
	/// Radius of the selected person in the individual view.
	pub focus_radius: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub fallback_width: f64,
	pub fallback_height: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_radius: 8.0,
			focus_radius: 13.0,
			min_zoom: 0.1,
			max_zoom: 4.0,
			fallback_width: 800.0,
			fallback_height: 600.0,
		}
	}
}

impl LayoutConfig {
	/// Zoom bounds in ascending order, floored above zero.
	pub fn zoom_bounds(&self) -> (f64, f64) {
		let lo = self.min_zoom.min(self.max_zoom).max(MIN_ZOOM_FLOOR);
		let hi = self.min_zoom.max(self.max_zoom).max(lo);
		(lo, hi)
	}

	/// Bounds `k` to the zoom range. Inverted bounds from a hand-written
	/// config are treated as swapped.
	pub fn clamp_zoom(&self, k: f64) -> f64 {
		let (lo, hi) = self.zoom_bounds();
		k.max(lo).min(hi)
	}
}
