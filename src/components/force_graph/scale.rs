//! Fixed colour scales for node types and relationship labels.

use crate::network::NodeType;

pub const UNKNOWN_RELATIONSHIP: &str = "#999999";

const RELATIONSHIPS: &[(&str, &str)] = &[
	("business_partner", "#f97316"),
	("mentor", "#8b5cf6"),
	("underboss", "#dc2626"),
	("boss", "#991b1b"),
	("killed", "#7f1d1d"),
	("successor", "#059669"),
	("close_associate", "#06b6d4"),
	("family", "#ec4899"),
	("social", "#10b981"),
	("investigated", "#3b82f6"),
	("hunted", "#6366f1"),
];

pub fn node_color(node_type: NodeType) -> &'static str {
	match node_type {
		NodeType::Crime => "#ef4444",
		NodeType::Intelligence => "#3b82f6",
		NodeType::Political => "#22c55e",
		NodeType::Other => "#6b7280",
	}
}

pub fn relationship_color(relationship: &str) -> &'static str {
	RELATIONSHIPS
		.iter()
		.find(|(name, _)| *name == relationship)
		.map(|&(_, color)| color)
		.unwrap_or(UNKNOWN_RELATIONSHIP)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_and_unknown_relationships() {
		assert_eq!(relationship_color("boss"), "#991b1b");
		assert_eq!(relationship_color("investigated"), "#3b82f6");
		assert_eq!(relationship_color("rival"), UNKNOWN_RELATIONSHIP);
	}

	#[test]
	fn every_type_has_a_distinct_colour() {
		let mut colors: Vec<_> = NodeType::ALL.into_iter().map(node_color).collect();
		colors.dedup();
		assert_eq!(colors.len(), NodeType::ALL.len());
	}
}
