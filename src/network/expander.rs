//! Two-hop neighbourhood around a selected person.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use super::dataset::Graph;
use super::resolver::{self, CandidateKeys};
use super::types::{Link, LinkKey, Node, PersonRecord, Subgraph};

/// A computed neighbourhood plus the node it was grown from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
	pub seed: Node,
	pub subgraph: Subgraph,
	/// The seed was fabricated because no graph node matched the record.
	pub synthetic: bool,
}

#[derive(Default)]
struct Builder {
	nodes: IndexMap<String, Node>,
	seen: HashSet<LinkKey>,
	links: Vec<Link>,
}

impl Builder {
	fn has(&self, id: &str, graph: &Graph) -> bool {
		self.nodes.contains_key(id) || graph.contains(id)
	}

	/// Adds the graph node `id` if absent. Returns true when it was new.
	fn admit(&mut self, id: &str, graph: &Graph) -> bool {
		if self.nodes.contains_key(id) {
			return false;
		}
		match graph.node(id) {
			Some(node) => {
				self.nodes.insert(id.to_owned(), node.clone());
				true
			}
			None => false,
		}
	}

	fn link(&mut self, link: &Link) {
		if self.seen.insert(link.key()) {
			self.links.push(link.clone());
		}
	}

	fn finish(self) -> Subgraph {
		Subgraph {
			nodes: self.nodes.into_values().collect(),
			links: self.links,
		}
	}
}

/// Expands around `record`, resolving it to a graph node first.
pub fn expand_record(record: &PersonRecord, graph: &Graph) -> Expansion {
	let resolution = resolver::resolve(record, graph.nodes());
	let synthetic = resolution.is_synthetic();
	let seed = resolution.into_node();

	let mut keys = CandidateKeys::of(record);
	keys.push(&seed.id);
	let subgraph = expand(&seed, &keys, graph);
	debug!(
		"Expanded {:?}: {} nodes, {} links",
		seed.id,
		subgraph.nodes.len(),
		subgraph.links.len()
	);
	Expansion {
		seed,
		subgraph,
		synthetic,
	}
}

/// Expands around a node already in the graph, identified by its id alone.
pub fn expand_node(seed: &Node, graph: &Graph) -> Subgraph {
	let mut keys = CandidateKeys::default();
	keys.push(&seed.id);
	expand(seed, &keys, graph)
}

/// Computes the seed, its direct relationships, and the relationships of
/// those direct neighbours, stopping there.
///
/// A link is direct when either endpoint matches `keys`, exactly or by
/// substring, judged per endpoint. Second-degree links are those touching a
/// direct neighbour with neither endpoint among `keys`. Links are kept once
/// per unordered pair and relationship, and a link is dropped rather than
/// shown dangling when an endpoint has no node.
pub fn expand(seed: &Node, keys: &CandidateKeys, graph: &Graph) -> Subgraph {
	let mut out = Builder::default();
	out.nodes.insert(seed.id.clone(), seed.clone());

	let mut neighbours = Vec::new();
	for link in graph.links() {
		let from_seed = keys.matches_either(&link.source);
		let to_seed = keys.matches_either(&link.target);
		if !from_seed && !to_seed {
			continue;
		}
		if !out.has(&link.source, graph) || !out.has(&link.target, graph) {
			continue;
		}
		for (id, is_seed) in [(&link.source, from_seed), (&link.target, to_seed)] {
			// Identity-matched endpoints other than the seed itself are
			// aliases: shown, but not expanded further.
			if out.admit(id, graph) && !is_seed {
				neighbours.push(id.clone());
			}
		}
		out.link(link);
	}

	for neighbour in &neighbours {
		for link in graph.links() {
			if !link.touches(neighbour) || keys.contains(&link.source) || keys.contains(&link.target)
			{
				continue;
			}
			let other = link.other_end(neighbour);
			if !out.has(other, graph) {
				continue;
			}
			out.admit(other, graph);
			out.link(link);
		}
	}

	out.finish()
}

/// The whole graph as a displayable subgraph, minus links whose endpoints
/// are missing from the node list.
pub fn whole_graph(graph: &Graph) -> Subgraph {
	let links = graph
		.links()
		.iter()
		.filter(|l| graph.contains(&l.source) && graph.contains(&l.target))
		.cloned()
		.collect();
	Subgraph {
		nodes: graph.nodes().to_vec(),
		links,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> Node {
		Node {
			id: id.into(),
			..Node::default()
		}
	}

	fn link(source: &str, target: &str, relationship: &str) -> Link {
		Link {
			source: source.into(),
			target: target.into(),
			relationship: relationship.into(),
			description: None,
		}
	}

	fn graph(ids: &[&str], links: &[(&str, &str, &str)]) -> Graph {
		Graph::new(
			ids.iter().map(|id| node(id)).collect(),
			links.iter().map(|(s, t, r)| link(s, t, r)).collect(),
		)
	}

	fn ids(subgraph: &Subgraph) -> Vec<&str> {
		subgraph.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn chain_stops_after_two_hops() {
		let g = graph(
			&["A", "B", "C", "D"],
			&[("A", "B", "ally"), ("B", "C", "ally"), ("C", "D", "ally")],
		);
		let sub = expand_node(&node("A"), &g);
		assert_eq!(ids(&sub), ["A", "B", "C"]);
		assert_eq!(sub.links, vec![link("A", "B", "ally"), link("B", "C", "ally")]);
	}

	#[test]
	fn reversed_duplicate_links_collapse() {
		let g = graph(
			&["A", "B", "C"],
			&[
				("A", "B", "ally"),
				("B", "C", "ally"),
				("C", "B", "ally"),
				("B", "C", "ally"),
			],
		);
		let sub = expand_node(&node("A"), &g);
		assert_eq!(sub.links.len(), 2);
	}

	#[test]
	fn distinct_relationships_between_a_pair_survive() {
		let g = graph(
			&["A", "B"],
			&[("A", "B", "business_partner"), ("B", "A", "killed"), ("B", "A", "business_partner")],
		);
		let sub = expand_node(&node("A"), &g);
		let rels: Vec<_> = sub.links.iter().map(|l| l.relationship.as_str()).collect();
		assert_eq!(rels, ["business_partner", "killed"]);
	}

	#[test]
	fn second_degree_skips_links_back_to_seed() {
		let g = graph(
			&["A", "B", "C"],
			&[("A", "B", "boss"), ("B", "C", "mentor"), ("C", "A", "rival")],
		);
		let sub = expand_node(&node("A"), &g);
		assert_eq!(ids(&sub), ["A", "B", "C"]);
		// C reaches A directly, so C is order-1 and B-C appears as a second
		// degree link between two neighbours.
		assert_eq!(sub.links.len(), 3);
	}

	#[test]
	fn isolated_seed_yields_itself() {
		let g = graph(&["A", "B"], &[("B", "B", "alias")]);
		let sub = expand_node(&node("A"), &g);
		assert_eq!(ids(&sub), ["A"]);
		assert!(sub.links.is_empty());
	}

	#[test]
	fn links_to_unknown_nodes_are_dropped() {
		let g = graph(&["A", "B"], &[("A", "Ghost", "ally"), ("A", "B", "ally"), ("B", "Phantom", "ally")]);
		let sub = expand_node(&node("A"), &g);
		assert_eq!(ids(&sub), ["A", "B"]);
		assert_eq!(sub.links, vec![link("A", "B", "ally")]);
	}

	#[test]
	fn record_keys_find_links_by_nickname() {
		let g = graph(
			&["Lucky Luciano", "Meyer Lansky", "Bugsy Siegel"],
			&[
				("Lucky Luciano", "Meyer Lansky", "business_partner"),
				("Meyer Lansky", "Bugsy Siegel", "close_associate"),
			],
		);
		let record = PersonRecord {
			id: "luciano".into(),
			name: "Charles Luciano".into(),
			nickname: Some("Lucky Luciano".into()),
			..PersonRecord::default()
		};
		let expansion = expand_record(&record, &g);
		assert!(!expansion.synthetic);
		assert_eq!(expansion.seed.id, "Lucky Luciano");
		assert_eq!(ids(&expansion.subgraph), ["Lucky Luciano", "Meyer Lansky", "Bugsy Siegel"]);
	}

	#[test]
	fn exact_and_substring_links_both_count() {
		let g = graph(
			&["Charles Luciano", "Lucky Luciano", "Meyer Lansky", "Vito Genovese"],
			&[
				("Charles Luciano", "Meyer Lansky", "business_partner"),
				("Lucky Luciano", "Vito Genovese", "underboss"),
			],
		);
		let record = PersonRecord {
			id: "luciano".into(),
			name: "Charles Luciano".into(),
			nickname: Some("Lucky".into()),
			..PersonRecord::default()
		};
		let expansion = expand_record(&record, &g);
		assert_eq!(expansion.seed.id, "Charles Luciano");
		assert_eq!(
			ids(&expansion.subgraph),
			["Charles Luciano", "Meyer Lansky", "Lucky Luciano", "Vito Genovese"]
		);
		assert_eq!(expansion.subgraph.links.len(), 2);
	}

	#[test]
	fn substring_resolved_seed_anchors_its_links() {
		let g = graph(
			&["Hoover", "Tolson", "Kennedy"],
			&[("Hoover", "Tolson", "close_associate"), ("Tolson", "Kennedy", "investigated")],
		);
		let record = PersonRecord {
			id: "hoover".into(),
			name: "J. Edgar Hoover".into(),
			..PersonRecord::default()
		};
		let expansion = expand_record(&record, &g);
		assert_eq!(expansion.seed.id, "Hoover");
		assert_eq!(ids(&expansion.subgraph), ["Hoover", "Tolson", "Kennedy"]);
	}

	#[test]
	fn synthetic_seed_stands_alone() {
		let g = graph(&["A", "B"], &[("A", "B", "ally")]);
		let record = PersonRecord {
			id: "kefauver".into(),
			name: "Estes Kefauver".into(),
			organization: "US Senate".into(),
			..PersonRecord::default()
		};
		let expansion = expand_record(&record, &g);
		assert!(expansion.synthetic);
		assert_eq!(ids(&expansion.subgraph), ["Estes Kefauver"]);
		assert!(expansion.subgraph.links.is_empty());
	}

	#[test]
	fn whole_graph_drops_dangling_links() {
		let g = graph(&["A", "B"], &[("A", "B", "ally"), ("A", "Z", "ally")]);
		let sub = whole_graph(&g);
		assert_eq!(sub.nodes.len(), 2);
		assert_eq!(sub.links, vec![link("A", "B", "ally")]);
	}
}
