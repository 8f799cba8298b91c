use leptos::prelude::*;

use crate::network::{Biography, PersonRecord};

/// Details of the selected person. Fields the record lacks are not shown.
#[component]
pub fn BiographyPanel(record: PersonRecord) -> impl IntoView {
	let Biography {
		name,
		birth_name,
		facts,
		photo,
		summary,
	} = Biography::of(&record);
	let photo_failed = RwSignal::new(false);
	let alt = name.clone();

	view! {
		<div class="biography">
			{photo.map(|src| {
				view! {
					<Show when=move || !photo_failed.get()>
						<img
							class="portrait"
							src=src.clone()
							alt=alt.clone()
							on:error=move |_| photo_failed.set(true)
						/>
					</Show>
				}
			})}
			<div class="biography-body">
				<h3>{name}</h3>
				{birth_name.map(|b| view! { <p class="birth-name">{format!("Born: {b}")}</p> })}
				<dl class="facts">
					{facts
						.into_iter()
						.map(|(label, value)| {
							view! {
								<div>
									<dt>{format!("{label}:")}</dt>
									<dd>{value}</dd>
								</div>
							}
						})
						.collect_view()}
				</dl>
				{summary.map(|text| {
					view! {
						<div class="summary">
							<h4>"Biography:"</h4>
							<p>{text}</p>
						</div>
					}
				})}
			</div>
		</div>
	}
}
