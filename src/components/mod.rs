//! View components: the graph canvas and the panels around it.

pub mod biography;
pub mod force_graph;
pub mod sidebar;
pub mod tooltip;
