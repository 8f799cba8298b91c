use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::biography::BiographyPanel;
use crate::components::force_graph::{ForceGraphCanvas, GraphData, NodeHover};
use crate::components::sidebar::Sidebar;
use crate::components::tooltip::NodeTooltip;
use crate::config::{AppConfig, LayoutConfig};
use crate::loader;
use crate::network::{NetworkData, SelectionState};

/// Network explorer. Shows a loading screen until both datasets are in.
#[component]
pub fn Explorer() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let network = RwSignal::new(None::<Arc<NetworkData>>);

	let load_config = config.clone();
	spawn_local(async move {
		// Failures are logged by the loader; the page stays in its loading state
		if let Ok(data) = loader::load_network(&load_config).await {
			network.set(Some(Arc::new(data)));
		}
	});

	let layout = config.layout;
	view! {
		<div class="explorer">
			<header class="explorer-header">
				<h1>"Connected world of crime, politics, and intelligence"</h1>
				<p>"Explore the networks revealed in \"The World Beneath\" podcast"</p>
			</header>
			{move || match network.get() {
				Some(data) => view! { <Workspace data layout=layout.clone() /> }.into_any(),
				None => view! { <Loading /> }.into_any(),
			}}
		</div>
	}
}

#[component]
fn Loading() -> impl IntoView {
	view! {
		<div class="loading">
			<div class="spinner"></div>
			<p>"Loading character network..."</p>
		</div>
	}
}

#[component]
fn Workspace(data: Arc<NetworkData>, layout: LayoutConfig) -> impl IntoView {
	let selection = RwSignal::new(SelectionState::default());
	let hover = RwSignal::new(None::<NodeHover>);

	let display_data = data.clone();
	let display = Memo::new(move |_| selection.with(|s| s.display(&display_data)));
	let graph_data = Signal::derive(move || display.with(|d| GraphData::from(d)));

	// A new graph invalidates whatever was under the pointer
	Effect::new(move |_| {
		display.track();
		hover.set(None);
	});

	let click_data = data.clone();
	let on_node_click = Callback::new(move |id: String| {
		selection.maybe_update(|s| s.select_node(&id, &click_data));
	});
	let on_node_hover = Callback::new(move |h: Option<NodeHover>| hover.set(h));

	let tooltip = move || {
		let h = hover.get()?;
		let node = display.with(|d| d.subgraph.node(&h.id).cloned())?;
		Some(view! { <NodeTooltip node x=h.x y=h.y /> })
	};

	view! {
		<div class="workspace">
			<Sidebar data selection />
			<main class="network-panel">
				<h2>{move || display.with(|d| d.title.clone())}</h2>
				<div class="graph-container">
					<ForceGraphCanvas data=graph_data layout on_node_click on_node_hover />
					{tooltip}
				</div>
				{move || {
					selection
						.with(|s| s.selected().cloned())
						.map(|record| view! { <BiographyPanel record /> })
				}}
			</main>
		</div>
	}
}
