//! View-mode state machine driving what the explorer displays.

use log::info;

use super::dataset::{CategoryFilter, NetworkData};
use super::expander;
use super::types::{PersonRecord, Subgraph};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
	#[default]
	Full,
	Individual,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum View {
	#[default]
	Full,
	Individual(PersonRecord),
}

/// What the user has picked: a category for the sidebar list, and either the
/// whole network or one person's neighbourhood.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	view: View,
	category: Option<CategoryFilter>,
}

/// Everything the renderer needs for one frame of selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayGraph {
	pub subgraph: Subgraph,
	/// Individual view; the renderer emphasizes `focus`.
	pub highlighted: bool,
	pub focus: Option<String>,
	pub title: String,
}

/// Sidebar contents for the chosen category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryListing {
	/// Nothing chosen yet.
	Unselected,
	/// A category was chosen but holds no records.
	Empty(CategoryFilter),
	Records(CategoryFilter, Vec<PersonRecord>),
}

impl SelectionState {
	pub fn mode(&self) -> ViewMode {
		match self.view {
			View::Full => ViewMode::Full,
			View::Individual(_) => ViewMode::Individual,
		}
	}

	pub fn selected(&self) -> Option<&PersonRecord> {
		match &self.view {
			View::Full => None,
			View::Individual(record) => Some(record),
		}
	}

	pub fn category(&self) -> Option<CategoryFilter> {
		self.category
	}

	pub fn set_category(&mut self, category: Option<CategoryFilter>) {
		self.category = category;
	}

	/// Focuses on `record`, from either mode.
	pub fn select(&mut self, record: PersonRecord) {
		info!("Selected {:?}", record.display_name());
		self.view = View::Individual(record);
	}

	/// Focuses on the person behind a clicked node. Nodes with no biography
	/// record are ignored; returns whether the selection changed.
	pub fn select_node(&mut self, node_id: &str, data: &NetworkData) -> bool {
		match data.record_for_node(node_id) {
			Some(record) => {
				self.select(record.clone());
				true
			}
			None => false,
		}
	}

	/// Individual mode needs a selected person; without one it stays off.
	pub fn can_show_individual(&self) -> bool {
		self.selected().is_some()
	}

	/// Switches mode. Going to `Full` clears the selection; going to
	/// `Individual` only ever keeps an existing one. Returns whether anything
	/// changed.
	pub fn switch_mode(&mut self, mode: ViewMode) -> bool {
		match (mode, &self.view) {
			(ViewMode::Full, View::Individual(_)) => {
				info!("Showing full network");
				self.view = View::Full;
				true
			}
			_ => false,
		}
	}

	/// Computes the graph for the current mode.
	pub fn display(&self, data: &NetworkData) -> DisplayGraph {
		match &self.view {
			View::Full => DisplayGraph {
				subgraph: expander::whole_graph(data.graph()),
				highlighted: false,
				focus: None,
				title: "Complete Network".to_owned(),
			},
			View::Individual(record) => {
				let expansion = expander::expand_record(record, data.graph());
				DisplayGraph {
					subgraph: expansion.subgraph,
					highlighted: true,
					focus: Some(expansion.seed.id),
					title: format!("{} Network", record.display_name()),
				}
			}
		}
	}

	pub fn listing(&self, data: &NetworkData) -> CategoryListing {
		let Some(filter) = self.category else {
			return CategoryListing::Unselected;
		};
		let records: Vec<PersonRecord> = data.records_in(filter).into_iter().cloned().collect();
		if records.is_empty() {
			CategoryListing::Empty(filter)
		} else {
			CategoryListing::Records(filter, records)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::dataset::Graph;
	use crate::network::types::{Category, Link, Node};

	fn data() -> NetworkData {
		let nodes = ["Meyer Lansky", "Bugsy Siegel", "Frank Costello"]
			.into_iter()
			.map(|id| Node {
				id: id.into(),
				..Node::default()
			})
			.collect();
		let links = vec![
			Link {
				source: "Meyer Lansky".into(),
				target: "Bugsy Siegel".into(),
				relationship: "business_partner".into(),
				description: None,
			},
			Link {
				source: "Bugsy Siegel".into(),
				target: "Frank Costello".into(),
				relationship: "close_associate".into(),
				description: None,
			},
		];
		let records = vec![
			PersonRecord {
				id: "Meyer Lansky".into(),
				name: "Meyer Lansky".into(),
				category: Category::Mob,
				..PersonRecord::default()
			},
			PersonRecord {
				id: "Bugsy Siegel".into(),
				name: "Benjamin Siegel".into(),
				category: Category::Mob,
				..PersonRecord::default()
			},
		];
		NetworkData::new(Graph::new(nodes, links), records)
	}

	#[test]
	fn starts_full_without_selection() {
		let state = SelectionState::default();
		assert_eq!(state.mode(), ViewMode::Full);
		assert!(state.selected().is_none());
		assert!(!state.can_show_individual());
	}

	#[test]
	fn individual_requires_a_selection() {
		let mut state = SelectionState::default();
		assert!(!state.switch_mode(ViewMode::Individual));
		assert_eq!(state.mode(), ViewMode::Full);
	}

	#[test]
	fn select_then_back_to_full_clears() {
		let data = data();
		let mut state = SelectionState::default();
		state.select(data.records()[0].clone());
		assert_eq!(state.mode(), ViewMode::Individual);

		let display = state.display(&data);
		assert!(display.highlighted);
		assert_eq!(display.focus.as_deref(), Some("Meyer Lansky"));
		assert_eq!(display.title, "Meyer Lansky Network");
		assert_eq!(display.subgraph.nodes.len(), 3);

		assert!(!state.switch_mode(ViewMode::Individual));
		assert!(state.switch_mode(ViewMode::Full));
		assert!(state.selected().is_none());
		assert!(!state.display(&data).highlighted);
	}

	#[test]
	fn reselection_goes_straight_to_new_person() {
		let data = data();
		let mut state = SelectionState::default();
		state.select(data.records()[0].clone());
		state.select(data.records()[1].clone());
		assert_eq!(state.mode(), ViewMode::Individual);
		assert_eq!(state.selected().map(|r| r.id.as_str()), Some("Bugsy Siegel"));
		assert_eq!(state.display(&data).focus.as_deref(), Some("Bugsy Siegel"));
	}

	#[test]
	fn clicking_nodes_selects_known_people_only() {
		let data = data();
		let mut state = SelectionState::default();
		assert!(!state.select_node("Frank Costello", &data));
		assert_eq!(state.mode(), ViewMode::Full);
		assert!(state.select_node("Bugsy Siegel", &data));
		assert_eq!(state.selected().map(|r| r.name.as_str()), Some("Benjamin Siegel"));
	}

	#[test]
	fn full_view_shows_whole_graph() {
		let data = data();
		let display = SelectionState::default().display(&data);
		assert_eq!(display.title, "Complete Network");
		assert_eq!(display.subgraph.nodes.len(), 3);
		assert_eq!(display.subgraph.links.len(), 2);
		assert_eq!(display.focus, None);
	}

	#[test]
	fn empty_category_lists_nothing() {
		let data = data();
		let mut state = SelectionState::default();
		assert_eq!(state.listing(&data), CategoryListing::Unselected);

		let politics = CategoryFilter::Only(Category::Politics);
		state.set_category(Some(politics));
		assert_eq!(state.listing(&data), CategoryListing::Empty(politics));
		assert_eq!(state.mode(), ViewMode::Full);

		state.set_category(Some(CategoryFilter::Only(Category::Mob)));
		match state.listing(&data) {
			CategoryListing::Records(_, records) => assert_eq!(records.len(), 2),
			other => panic!("expected records, got {other:?}"),
		}
	}
}
