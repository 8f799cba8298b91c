use crate::network::DisplayGraph;

use super::scale;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	/// Drawn larger; the person an individual view is centred on.
	pub focused: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// A node under the pointer, in canvas pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeHover {
	pub id: String,
	pub x: f64,
	pub y: f64,
}

impl From<&DisplayGraph> for GraphData {
	fn from(display: &DisplayGraph) -> Self {
		let focus = display.focus.as_deref().filter(|_| display.highlighted);
		let nodes = display
			.subgraph
			.nodes
			.iter()
			.map(|n| GraphNode {
				id: n.id.clone(),
				label: Some(n.id.clone()).filter(|l| !l.is_empty()),
				color: scale::node_color(n.node_type).into(),
				focused: focus == Some(n.id.as_str()),
			})
			.collect();
		let links = display
			.subgraph
			.links
			.iter()
			.map(|l| GraphLink {
				source: l.source.clone(),
				target: l.target.clone(),
				label: Some(l.relationship.replace('_', " ")).filter(|r| !r.is_empty()),
				color: scale::relationship_color(&l.relationship).into(),
			})
			.collect();
		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::{Link, Node, NodeType, Subgraph};

	#[test]
	fn focus_only_marked_in_highlighted_view() {
		let subgraph = Subgraph {
			nodes: vec![
				Node {
					id: "A".into(),
					node_type: NodeType::Crime,
					..Node::default()
				},
				Node {
					id: "B".into(),
					..Node::default()
				},
			],
			links: vec![Link {
				source: "A".into(),
				target: "B".into(),
				relationship: "close_associate".into(),
				description: None,
			}],
		};
		let mut display = DisplayGraph {
			subgraph,
			highlighted: true,
			focus: Some("A".into()),
			title: String::new(),
		};
		let data = GraphData::from(&display);
		assert!(data.nodes[0].focused);
		assert!(!data.nodes[1].focused);
		assert_eq!(data.nodes[0].color, scale::node_color(NodeType::Crime));
		assert_eq!(data.links[0].label.as_deref(), Some("close associate"));

		display.highlighted = false;
		assert!(GraphData::from(&display).nodes.iter().all(|n| !n.focused));
	}
}
