use leptos::prelude::*;

use crate::network::Node;

/// Hover card for a node, placed just off the pointer.
#[component]
pub fn NodeTooltip(node: Node, x: f64, y: f64) -> impl IntoView {
	view! {
		<div class="tooltip" style=format!("left: {}px; top: {}px;", x + 10.0, y - 10.0)>
			<strong>{node.id}</strong>
			<div>"Type: " {node.node_type.label()}</div>
			<div>"Role: " {node.role}</div>
			<div>"Organization: " {node.organization}</div>
			<div>"Era: " {node.era}</div>
			<em>"Click for full details"</em>
		</div>
	}
}
