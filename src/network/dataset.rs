//! Input normalization and the in-memory index built once both resources
//! have loaded.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;

use super::error::{LoadError, Resource};
use super::resolver;
use super::types::{Category, Link, Node, PersonRecord};

/// The full relationship graph with an id → position index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
	nodes: Vec<Node>,
	links: Vec<Link>,
	index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct GraphDocument {
	#[serde(default)]
	nodes: Vec<Node>,
	#[serde(default)]
	links: Vec<Link>,
}

impl Graph {
	/// Builds the graph, keeping the first node for any repeated id.
	pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
		let mut index = HashMap::with_capacity(nodes.len());
		let mut kept = Vec::with_capacity(nodes.len());
		for node in nodes {
			if index.contains_key(&node.id) {
				warn!("Duplicate node id {:?} in graph; keeping the first", node.id);
				continue;
			}
			index.insert(node.id.clone(), kept.len());
			kept.push(node);
		}
		Self {
			nodes: kept,
			links,
			index,
		}
	}

	pub fn from_json(json: &str) -> Result<Self, LoadError> {
		let doc: GraphDocument =
			serde_json::from_str(json).map_err(|source| LoadError::Malformed {
				resource: Resource::Graph,
				source,
			})?;
		Ok(Self::new(doc.nodes, doc.links))
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}
}

/// Which slice of the biography store the sidebar lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
	All,
	Only(Category),
}

impl CategoryFilter {
	pub const OPTIONS: [CategoryFilter; 5] = [
		CategoryFilter::All,
		CategoryFilter::Only(Category::Mob),
		CategoryFilter::Only(Category::Intelligence),
		CategoryFilter::Only(Category::Politics),
		CategoryFilter::Only(Category::Other),
	];

	pub fn key(self) -> &'static str {
		match self {
			CategoryFilter::All => "all",
			CategoryFilter::Only(c) => c.key(),
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			CategoryFilter::All => "All Characters",
			CategoryFilter::Only(Category::Mob) => "Organized Crime",
			CategoryFilter::Only(Category::Intelligence) => "Intelligence & Law Enforcement",
			CategoryFilter::Only(Category::Politics) => "Political Figures",
			CategoryFilter::Only(Category::Other) => "Other Figures",
		}
	}

	/// Parses a select-box value. Unknown or empty values mean "no filter
	/// chosen".
	pub fn from_key(key: &str) -> Option<Self> {
		Self::OPTIONS.into_iter().find(|f| f.key() == key)
	}

	pub fn admits(self, record: &PersonRecord) -> bool {
		match self {
			CategoryFilter::All => true,
			CategoryFilter::Only(c) => record.category == c,
		}
	}
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawRecord {
	id: Option<String>,
	name: Option<String>,
	birth_name: Option<String>,
	nickname: Option<String>,
	role: Option<String>,
	organization: Option<String>,
	era: Option<String>,
	photo_path: Option<String>,
	wikipedia_summary: Option<String>,
	category: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

impl RawRecord {
	fn into_record(self, fallback_id: Option<&str>, category: Category) -> PersonRecord {
		let name = present(self.name).unwrap_or_default();
		let id = present(self.id)
			.or_else(|| fallback_id.map(str::to_owned))
			.unwrap_or_else(|| name.clone());
		PersonRecord {
			id,
			name,
			birth_name: present(self.birth_name),
			nickname: present(self.nickname),
			role: self.role.unwrap_or_default(),
			organization: self.organization.unwrap_or_default(),
			era: self.era.unwrap_or_default(),
			photo_path: present(self.photo_path),
			wikipedia_summary: present(self.wikipedia_summary),
			category,
		}
	}

	fn labelled_category(&self) -> Category {
		self.category
			.as_deref()
			.map(Category::from_label)
			.unwrap_or_default()
	}
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawCategory {
	characters: Vec<RawRecord>,
}

/// Biography layouts seen in the wild; all normalize to one flat list.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBiography {
	Nested {
		categories: IndexMap<String, RawCategory>,
	},
	Flat(IndexMap<String, serde_json::Value>),
	List(Vec<RawRecord>),
}

/// Parses any accepted biography layout into records in document order.
pub fn parse_biography(json: &str) -> Result<Vec<PersonRecord>, LoadError> {
	let raw: RawBiography = serde_json::from_str(json).map_err(|source| LoadError::Malformed {
		resource: Resource::Biography,
		source,
	})?;

	let records: Vec<PersonRecord> = match raw {
		RawBiography::Nested { categories } => categories
			.into_iter()
			.flat_map(|(key, group)| {
				let category = Category::from_key(&key);
				group
					.characters
					.into_iter()
					.map(move |r| r.into_record(None, category))
			})
			.collect(),
		RawBiography::Flat(entries) => entries
			.into_iter()
			.filter_map(|(key, value)| match RawRecord::deserialize(value) {
				Ok(raw) => {
					let category = raw.labelled_category();
					Some(raw.into_record(Some(&key), category))
				}
				Err(e) => {
					warn!("Skipping biography entry {key:?}: {e}");
					None
				}
			})
			.collect(),
		RawBiography::List(items) => items
			.into_iter()
			.map(|raw| {
				let category = raw.labelled_category();
				raw.into_record(None, category)
			})
			.collect(),
	};

	debug!("Parsed {} biography records", records.len());
	Ok(records)
}

/// Both datasets, normalized and read-only for the rest of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkData {
	graph: Graph,
	records: Vec<PersonRecord>,
}

impl NetworkData {
	pub fn new(graph: Graph, records: Vec<PersonRecord>) -> Self {
		Self { graph, records }
	}

	pub fn from_json(graph: &str, biography: &str) -> Result<Self, LoadError> {
		Ok(Self::new(Graph::from_json(graph)?, parse_biography(biography)?))
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn records(&self) -> &[PersonRecord] {
		&self.records
	}

	pub fn records_in(&self, filter: CategoryFilter) -> Vec<&PersonRecord> {
		self.records.iter().filter(|r| filter.admits(r)).collect()
	}

	pub fn record(&self, id: &str) -> Option<&PersonRecord> {
		self.records.iter().find(|r| r.id == id)
	}

	/// The biography record behind a clicked graph node, if any.
	pub fn record_for_node(&self, node_id: &str) -> Option<&PersonRecord> {
		resolver::find_record(&self.records, node_id)
	}
}
