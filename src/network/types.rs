use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad affiliation of a person in the relationship graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
	#[serde(alias = "mob", alias = "organized_crime")]
	Crime,
	Intelligence,
	#[serde(alias = "politics")]
	Political,
	#[default]
	#[serde(other)]
	Other,
}

impl NodeType {
	pub const ALL: [NodeType; 4] = [
		NodeType::Crime,
		NodeType::Intelligence,
		NodeType::Political,
		NodeType::Other,
	];

	pub fn label(self) -> &'static str {
		match self {
			NodeType::Crime => "Organized Crime",
			NodeType::Intelligence => "Intelligence",
			NodeType::Political => "Political",
			NodeType::Other => "Other",
		}
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// A person in the relationship graph. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
	pub id: String,
	#[serde(rename = "type")]
	pub node_type: NodeType,
	pub role: String,
	pub organization: String,
	pub era: String,
}

/// A typed relationship between two nodes, oriented source → target.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLink")]
pub struct Link {
	pub source: String,
	pub target: String,
	pub relationship: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Wire form of a link. Older graph files carry the label in `type`.
#[derive(Deserialize)]
struct RawLink {
	source: String,
	target: String,
	#[serde(default)]
	relationship: Option<String>,
	#[serde(default, rename = "type")]
	kind: Option<String>,
	#[serde(default)]
	description: Option<String>,
}

impl From<RawLink> for Link {
	fn from(raw: RawLink) -> Self {
		let relationship = raw
			.relationship
			.filter(|r| !r.is_empty())
			.or(raw.kind)
			.unwrap_or_default();
		Self {
			source: raw.source,
			target: raw.target,
			relationship,
			description: raw.description.filter(|d| !d.is_empty()),
		}
	}
}

impl Link {
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// The endpoint opposite `id`. For a self-loop this is `id` itself.
	pub fn other_end(&self, id: &str) -> &str {
		if self.source == id {
			&self.target
		} else {
			&self.source
		}
	}

	pub fn key(&self) -> LinkKey {
		LinkKey::new(&self.source, &self.target, &self.relationship)
	}
}

/// Identity of a link for de-duplication: the unordered endpoint pair plus
/// the relationship label. `A→B ally` and `B→A ally` share a key; `A→B ally`
/// and `A→B rival` do not.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey {
	low: String,
	high: String,
	relationship: String,
}

impl LinkKey {
	pub fn new(a: &str, b: &str, relationship: &str) -> Self {
		let (low, high) = if a <= b { (a, b) } else { (b, a) };
		Self {
			low: low.to_owned(),
			high: high.to_owned(),
			relationship: relationship.to_owned(),
		}
	}
}

/// Category a biography record is filed under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	Mob,
	Intelligence,
	Politics,
	#[default]
	Other,
}

impl Category {
	pub const ALL: [Category; 4] = [
		Category::Mob,
		Category::Intelligence,
		Category::Politics,
		Category::Other,
	];

	/// Key used by the nested biography format (`categories.<key>`).
	pub fn key(self) -> &'static str {
		match self {
			Category::Mob => "mob",
			Category::Intelligence => "intelligence",
			Category::Politics => "politics",
			Category::Other => "other",
		}
	}

	/// Human-readable label, also the `category` value of the flat format.
	pub fn label(self) -> &'static str {
		match self {
			Category::Mob => "Organized Crime",
			Category::Intelligence => "Intelligence & Law Enforcement",
			Category::Politics => "Politics",
			Category::Other => "Other",
		}
	}

	pub fn from_key(key: &str) -> Self {
		Self::ALL
			.into_iter()
			.find(|c| c.key() == key)
			.unwrap_or_default()
	}

	pub fn from_label(label: &str) -> Self {
		Self::ALL
			.into_iter()
			.find(|c| c.label() == label)
			.unwrap_or_default()
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// A biography entry. Correlated with graph nodes by identity matching, not
/// by a shared key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
	pub id: String,
	pub name: String,
	pub birth_name: Option<String>,
	pub nickname: Option<String>,
	pub role: String,
	pub organization: String,
	pub era: String,
	pub photo_path: Option<String>,
	pub wikipedia_summary: Option<String>,
	pub category: Category,
}

impl PersonRecord {
	/// Name to show in lists; falls back to the id for nameless records.
	pub fn display_name(&self) -> &str {
		if self.name.is_empty() { &self.id } else { &self.name }
	}
}

/// A node/link set handed to the renderer. Every link endpoint is present in
/// `nodes`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subgraph {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

impl Subgraph {
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}
