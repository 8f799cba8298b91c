//! Reconciles biography records with graph nodes.
//!
//! The two datasets were keyed by hand, so a record's id, name, birth name
//! or nickname may each be what the graph uses. Matching is exact first,
//! then by substring in either direction; the first node in graph order that
//! satisfies a pass wins. The substring pass can confuse people whose names
//! contain one another ("Lee" inside "Lee Harvey"), and nothing here tries to
//! disambiguate that beyond ordering.

use log::debug;

use super::types::{Node, NodeType, PersonRecord};

/// A person's known identifiers, de-duplicated, in preference order
/// id, name, birth name, nickname.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateKeys(Vec<String>);

impl CandidateKeys {
	pub fn of(record: &PersonRecord) -> Self {
		let mut keys = Self::default();
		keys.push(&record.id);
		keys.push(&record.name);
		if let Some(birth_name) = &record.birth_name {
			keys.push(birth_name);
		}
		if let Some(nickname) = &record.nickname {
			keys.push(nickname);
		}
		keys
	}

	/// Adds `key` unless it is blank or already present.
	pub fn push(&mut self, key: &str) {
		if key.is_empty() || self.contains(key) {
			return;
		}
		self.0.push(key.to_owned());
	}

	pub fn contains(&self, id: &str) -> bool {
		self.0.iter().any(|k| k == id)
	}

	/// True if `id` and some key contain one another.
	pub fn overlaps(&self, id: &str) -> bool {
		!id.is_empty() && self.0.iter().any(|k| k.contains(id) || id.contains(k.as_str()))
	}

	pub fn matches(&self, id: &str, pass: MatchPass) -> bool {
		match pass {
			MatchPass::Exact => self.contains(id),
			MatchPass::Fuzzy => self.overlaps(id),
		}
	}

	/// Exact or substring match, whichever holds.
	pub fn matches_either(&self, id: &str) -> bool {
		MatchPass::ORDER.into_iter().any(|pass| self.matches(id, pass))
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

}

/// The two matching passes, strictest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPass {
	Exact,
	Fuzzy,
}

impl MatchPass {
	pub const ORDER: [MatchPass; 2] = [MatchPass::Exact, MatchPass::Fuzzy];
}

/// Outcome of resolving a record against the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
	Found { node: &'a Node, pass: MatchPass },
	/// No node matched; a stand-in built from the record itself.
	Synthetic(Node),
}

impl Resolution<'_> {
	pub fn into_node(self) -> Node {
		match self {
			Resolution::Found { node, .. } => node.clone(),
			Resolution::Synthetic(node) => node,
		}
	}

	pub fn is_synthetic(&self) -> bool {
		matches!(self, Resolution::Synthetic(_))
	}
}

/// Finds the graph node for `record`, or fabricates one.
pub fn resolve<'a>(record: &PersonRecord, nodes: &'a [Node]) -> Resolution<'a> {
	let keys = CandidateKeys::of(record);
	resolve_keys(&keys, nodes).unwrap_or_else(|| {
		debug!(
			"No graph node for {:?}; using a synthetic stand-in",
			record.display_name()
		);
		Resolution::Synthetic(synthetic_node(record))
	})
}

/// Like [`resolve`] but without the fallback.
pub fn resolve_keys<'a>(keys: &CandidateKeys, nodes: &'a [Node]) -> Option<Resolution<'a>> {
	MatchPass::ORDER.into_iter().find_map(|pass| {
		nodes
			.iter()
			.find(|n| keys.matches(&n.id, pass))
			.map(|node| Resolution::Found { node, pass })
	})
}

const CRIME_ORGANIZATIONS: &[&str] = &[
	"Jewish Mob",
	"Russian Mafia",
	"Genovese Crime Family",
	"Gambino Crime Family",
	"Lucchese Crime Family",
	"Chicago Outfit",
	"Murder, Inc.",
];
const INTELLIGENCE_ORGANIZATIONS: &[&str] = &["FBI", "OSS", "CIA", "Office of Naval Intelligence"];
const POLITICAL_ORGANIZATIONS: &[&str] = &["US Senate", "US House of Representatives"];

/// Fixed organization → node type table used for synthetic nodes.
pub fn type_for_organization(organization: &str) -> NodeType {
	let organization = organization.trim();
	if CRIME_ORGANIZATIONS.contains(&organization) {
		NodeType::Crime
	} else if INTELLIGENCE_ORGANIZATIONS.contains(&organization) {
		NodeType::Intelligence
	} else if POLITICAL_ORGANIZATIONS.contains(&organization) {
		NodeType::Political
	} else {
		NodeType::Other
	}
}

fn synthetic_node(record: &PersonRecord) -> Node {
	Node {
		id: record.display_name().to_owned(),
		node_type: type_for_organization(&record.organization),
		role: record.role.clone(),
		organization: record.organization.clone(),
		era: record.era.clone(),
	}
}

/// Finds the biography record behind a graph node id: exact on record id or
/// name, then substring either way on name or id. First record wins.
pub fn find_record<'a>(records: &'a [PersonRecord], node_id: &str) -> Option<&'a PersonRecord> {
	if node_id.is_empty() {
		return None;
	}
	let overlaps = |key: &str| !key.is_empty() && (key.contains(node_id) || node_id.contains(key));
	records
		.iter()
		.find(|r| r.id == node_id || r.name == node_id)
		.or_else(|| {
			records
				.iter()
				.find(|r| overlaps(&r.name) || overlaps(&r.id))
		})
}
