//! Relationship data and the logic that decides what to draw. Nothing in
//! here touches the browser.

pub mod biography;
pub mod dataset;
pub mod error;
pub mod expander;
pub mod resolver;
pub mod selection;
pub mod types;

pub use biography::Biography;
pub use dataset::{CategoryFilter, Graph, NetworkData};
pub use error::{LoadError, Resource};
pub use expander::{Expansion, expand, expand_node, expand_record, whole_graph};
pub use resolver::{CandidateKeys, MatchPass, Resolution, resolve};
pub use selection::{CategoryListing, DisplayGraph, SelectionState, ViewMode};
pub use types::{Category, Link, LinkKey, Node, NodeType, PersonRecord, Subgraph};
