use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;
use crate::config::LayoutConfig;

/// Extra pick tolerance around a node, in world units.
pub const HIT_SLOP: f64 = 4.0;
/// Pointer travel (screen pixels) that turns a press into a drag.
pub const CLICK_TOLERANCE: f64 = 3.0;
/// Edge dash length, in screen pixels.
pub const DASH: f64 = 8.0;
/// Gap between edge dashes, in screen pixels.
pub const DASH_GAP: f64 = 4.0;
const DASH_CYCLE: f64 = DASH + DASH_GAP;
/// Dash scroll speed, screen pixels per second.
const FLOW_SPEED: f64 = 30.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Hover transition reported to the component's owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverChange {
	Entered(String),
	Left,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Simulation and interaction state for one canvas. Positions live here,
/// keyed by graph index, and never flow back into the network data.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	/// Edge dash phase in screen pixels, kept within one dash cycle.
	pub flow_phase: f64,
	pub layout: LayoutConfig,
	edges: Vec<EdgeInfo>,
}

fn simulation(layout: &LayoutConfig) -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: layout.force_charge,
		force_spring: layout.force_spring,
		force_max: layout.force_max,
		node_speed: layout.node_speed,
		damping_factor: layout.damping_factor,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, layout: LayoutConfig) -> Self {
		let mut state = Self {
			graph: simulation(&layout),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_phase: 0.0,
			layout,
		};
		state.load(data);
		state
	}

	/// Replaces the displayed graph. Nodes that were already on screen keep
	/// their position; new ones start on a ring around the origin.
	pub fn load(&mut self, data: &GraphData) {
		let mut previous = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		self.graph = simulation(&self.layout);
		self.edges.clear();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();

		let mut id_to_idx = HashMap::new();
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y) = previous.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
				((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32)
			});
			let radius = if node.focused {
				self.layout.focus_radius
			} else {
				self.layout.node_radius
			};

			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: if node.focused { 20.0 } else { 10.0 },
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color.clone(),
					radius,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				self.graph.add_edge(src, tgt, EdgeData::default());
				self.edges.push(EdgeInfo {
					source: src,
					target: tgt,
					label: link.label.clone(),
					color: link.color.clone(),
				});
			}
		}
		self.animation_running = true;
	}

	pub fn edges(&self) -> &[EdgeInfo] {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_SLOP {
				found = Some(node.index());
			}
		});
		found
	}

	/// Zooms by `factor` keeping the screen point (`sx`, `sy`) fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = self.layout.clamp_zoom(self.transform.k * factor);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	fn position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	fn place(&mut self, idx: DefaultNodeIdx, to: Option<(f32, f32)>, anchor: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				if let Some((x, y)) = to {
					node.data.x = x;
					node.data.y = y;
				}
				node.data.is_anchor = anchor;
			}
		});
	}

	/// Starts dragging the node under (`x`, `y`), or panning if there is none.
	pub fn press(&mut self, x: f64, y: f64) {
		match self.node_at_position(x, y) {
			Some(idx) => {
				let (node_start_x, node_start_y) = self.position(idx).unwrap_or_default();
				self.drag = DragState {
					active: true,
					moved: false,
					node_idx: Some(idx),
					start_x: x,
					start_y: y,
					node_start_x,
					node_start_y,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: x,
					start_y: y,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Follows the pointer: moves a dragged node, pans, or tracks hover.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<HoverChange> {
		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			self.drag.moved |= dx.hypot(dy) > CLICK_TOLERANCE;
			if self.drag.moved {
				let k = self.transform.k;
				let to = (
					self.drag.node_start_x + (dx / k) as f32,
					self.drag.node_start_y + (dy / k) as f32,
				);
				self.place(idx, Some(to), true);
			}
			return None;
		}

		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}

		let hovered = self.node_at_position(x, y);
		if hovered == self.hover.node {
			return None;
		}
		self.set_hover(hovered);
		Some(match hovered.and_then(|idx| self.node_id(idx)) {
			Some(id) => HoverChange::Entered(id),
			None => HoverChange::Left,
		})
	}

	/// Ends a drag or pan. Returns the node id if the press never moved far
	/// enough to count as a drag.
	pub fn release(&mut self) -> Option<String> {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;
		let idx = drag.node_idx.filter(|_| drag.active)?;
		// Dragged nodes go back to the simulation once released
		self.place(idx, None, false);
		if drag.moved { None } else { self.node_id(idx) }
	}

	/// Pointer left the canvas. Returns whether a hovered node was dropped.
	pub fn leave(&mut self) -> bool {
		let was_hovering = self.hover.node.is_some();
		self.drag.moved = true;
		self.release();
		self.set_hover(None);
		was_hovering
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the old highlight around so it can fade out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_phase = (self.flow_phase + FLOW_SPEED * dt as f64) % DASH_CYCLE;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn data(ids: &[&str], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: ids
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: Some(id.to_string()),
					color: "#6b7280".into(),
					focused: *id == "A",
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t)| GraphLink {
					source: s.to_string(),
					target: t.to_string(),
					label: None,
					color: "#999999".into(),
				})
				.collect(),
		}
	}

	fn on_screen(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let mut pos = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		let (x, y) = pos.unwrap();
		let t = &state.transform;
		(x * t.k + t.x, y * t.k + t.y)
	}

	fn is_anchored(state: &ForceGraphState, id: &str) -> bool {
		let mut anchored = false;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				anchored = node.data.is_anchor;
			}
		});
		anchored
	}

	#[test]
	fn edges_with_missing_endpoints_are_skipped() {
		let state = ForceGraphState::new(
			&data(&["A", "B"], &[("A", "B"), ("A", "Z")]),
			800.0,
			600.0,
			LayoutConfig::default(),
		);
		assert_eq!(state.edges().len(), 1);
		assert_eq!(state.node_count(), 2);
	}

	#[test]
	fn reload_keeps_positions_of_surviving_nodes() {
		let mut state = ForceGraphState::new(
			&data(&["A", "B", "C"], &[("A", "B")]),
			800.0,
			600.0,
			LayoutConfig::default(),
		);
		state.graph.visit_nodes_mut(|node| {
			if node.data.user_data.id == "B" {
				node.data.x = 42.0;
				node.data.y = -7.0;
			}
		});

		state.load(&data(&["B", "D"], &[("B", "D")]));
		let mut b = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == "B" {
				b = Some((node.x(), node.y()));
			}
		});
		assert_eq!(b, Some((42.0, -7.0)));
		assert_eq!(state.node_count(), 2);
	}

	#[test]
	fn picks_node_under_pointer_and_its_neighbours() {
		let mut state = ForceGraphState::new(
			&data(&["A", "B", "C"], &[("A", "B")]),
			800.0,
			600.0,
			LayoutConfig::default(),
		);
		let (sx, sy) = on_screen(&state, "A");
		let idx = state.node_at_position(sx, sy).unwrap();
		assert_eq!(state.node_id(idx).as_deref(), Some("A"));

		state.set_hover(Some(idx));
		assert_eq!(state.hover.neighbors.len(), 1);
		assert!(state.has_active_highlight());
	}

	#[test]
	fn zoom_respects_bounds_and_anchor() {
		let mut state = ForceGraphState::new(&data(&["A"], &[]), 800.0, 600.0, LayoutConfig::default());
		let before = state.screen_to_graph(100.0, 50.0);
		state.zoom_at(100.0, 50.0, 1.1);
		let after = state.screen_to_graph(100.0, 50.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 0.5);
		}
		assert_eq!(state.transform.k, state.layout.min_zoom);
	}

	#[test]
	fn press_without_movement_is_a_click() {
		let mut state = ForceGraphState::new(&data(&["A", "B"], &[]), 800.0, 600.0, LayoutConfig::default());
		let (x, y) = on_screen(&state, "B");
		state.press(x, y);
		assert_eq!(state.pointer_move(x + 1.0, y), None);
		assert_eq!(state.release().as_deref(), Some("B"));
		assert!(!state.drag.active);
	}

	#[test]
	fn drag_moves_node_then_releases_it() {
		let mut state = ForceGraphState::new(&data(&["A", "B"], &[]), 800.0, 600.0, LayoutConfig::default());
		let (x, y) = on_screen(&state, "A");
		state.press(x, y);
		state.pointer_move(x + 40.0, y + 30.0);
		assert!(state.drag.moved);
		assert!(is_anchored(&state, "A"));
		let (nx, ny) = on_screen(&state, "A");
		assert!((nx - (x + 40.0)).abs() < 1e-3 && (ny - (y + 30.0)).abs() < 1e-3);

		assert_eq!(state.release(), None);
		assert!(!is_anchored(&state, "A"));
	}

	#[test]
	fn empty_space_pans_and_reports_hover() {
		let mut state = ForceGraphState::new(&data(&["A"], &[]), 800.0, 600.0, LayoutConfig::default());
		let (x, y) = on_screen(&state, "A");

		assert_eq!(
			state.pointer_move(x, y),
			Some(HoverChange::Entered("A".into()))
		);
		assert_eq!(state.pointer_move(x, y), None);
		assert!(state.leave());
		assert!(state.hover.node.is_none());

		let start = state.transform.x;
		state.press(5.0, 5.0);
		assert!(state.pan.active);
		state.pointer_move(25.0, 5.0);
		assert_eq!(state.transform.x, start + 20.0);
		assert_eq!(state.release(), None);
		assert!(!state.pan.active);
	}

	#[test]
	fn dash_phase_stays_within_one_cycle() {
		let mut state = ForceGraphState::new(&data(&["A"], &[]), 800.0, 600.0, LayoutConfig::default());
		for _ in 0..10_000 {
			state.tick(0.016);
		}
		assert!((0.0..DASH_CYCLE).contains(&state.flow_phase));
	}
}
