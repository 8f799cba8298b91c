use std::sync::Arc;

use leptos::prelude::*;

use crate::components::force_graph::scale;
use crate::network::{
	CategoryFilter, CategoryListing, NetworkData, NodeType, SelectionState, ViewMode,
};

/// Controls on the left of the explorer.
#[component]
pub fn Sidebar(data: Arc<NetworkData>, selection: RwSignal<SelectionState>) -> impl IntoView {
	view! {
		<aside class="sidebar">
			<ViewModeToggle selection />
			<CategoryPicker selection />
			<CharacterList data selection />
			<Legend />
		</aside>
	}
}

#[component]
fn ViewModeToggle(selection: RwSignal<SelectionState>) -> impl IntoView {
	let mode = move || selection.with(|s| s.mode());
	let class_for = move |m: ViewMode| {
		if mode() == m { "mode-button active" } else { "mode-button" }
	};

	view! {
		<section>
			<h3>"View Mode"</h3>
			<button
				class=move || class_for(ViewMode::Full)
				on:click=move |_| {
					selection.maybe_update(|s| s.switch_mode(ViewMode::Full));
				}
			>
				"Full Network"
			</button>
			<button
				class=move || class_for(ViewMode::Individual)
				disabled=move || !selection.with(|s| s.can_show_individual())
				on:click=move |_| {
					selection.maybe_update(|s| s.switch_mode(ViewMode::Individual));
				}
			>
				"Individual Network"
			</button>
		</section>
	}
}

#[component]
fn CategoryPicker(selection: RwSignal<SelectionState>) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		selection.update(|s| s.set_category(CategoryFilter::from_key(&value)));
	};

	view! {
		<section>
			<h3>"Categories"</h3>
			<select
				class="category-select"
				prop:value=move || selection.with(|s| s.category().map(|c| c.key()).unwrap_or(""))
				on:change=on_change
			>
				<option value="">"Select a category..."</option>
				{CategoryFilter::OPTIONS
					.into_iter()
					.map(|f| view! { <option value=f.key()>{f.label()}</option> })
					.collect_view()}
			</select>
		</section>
	}
}

#[component]
fn CharacterList(data: Arc<NetworkData>, selection: RwSignal<SelectionState>) -> impl IntoView {
	move || match selection.with(|s| s.listing(&data)) {
		CategoryListing::Unselected => view! {
			<div class="hint">
				<h3>"Welcome!"</h3>
				<p>"Select a category from the dropdown above to explore characters and their networks."</p>
			</div>
		}
		.into_any(),
		CategoryListing::Empty(_) => view! {
			<div class="hint">
				<h3>"No Characters Found"</h3>
				<p>"No characters found for the selected category."</p>
			</div>
		}
		.into_any(),
		CategoryListing::Records(_, records) => view! {
			<section>
				<h3>{format!("Characters ({})", records.len())}</h3>
				<div class="character-list">
					{records
						.into_iter()
						.map(|record| {
							let id = record.id.clone();
							let name = record.display_name().to_owned();
							let role = record.role.clone();
							let is_selected = move || {
								selection.with(|s| s.selected().is_some_and(|r| r.id == id))
							};
							view! {
								<button
									class=move || if is_selected() { "character active" } else { "character" }
									on:click=move |_| selection.update(|s| s.select(record.clone()))
								>
									<div class="character-name">{name}</div>
									<div class="character-role">{role}</div>
								</button>
							}
						})
						.collect_view()}
				</div>
			</section>
		}
		.into_any(),
	}
}

#[component]
fn Legend() -> impl IntoView {
	view! {
		<section>
			<h3>"Legend"</h3>
			<ul class="legend">
				{NodeType::ALL
					.into_iter()
					.map(|t| {
						view! {
							<li>
								<span
									class="swatch"
									style=format!("background-color: {}", scale::node_color(t))
								></span>
								{t.label()}
							</li>
						}
					})
					.collect_view()}
			</ul>
		</section>
	}
}
