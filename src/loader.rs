//! Fetches the two datasets from the host page's origin.

use log::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::config::AppConfig;
use crate::network::{Graph, LoadError, NetworkData, Resource, dataset};

/// Id of an optional `<script type="application/json">` element holding an
/// [`AppConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Reads the page-embedded config, if the host page provides one.
pub fn embedded_config() -> Option<AppConfig> {
	let element = web_sys::window()?
		.document()?
		.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let text = element.text_content()?;
	match serde_json::from_str(&text) {
		Ok(config) => {
			info!("Using config from #{CONFIG_ELEMENT_ID}");
			Some(config)
		}
		Err(e) => {
			warn!("Ignoring malformed #{CONFIG_ELEMENT_ID}: {e}");
			None
		}
	}
}

async fn fetch_text(url: &str, resource: Resource) -> Result<String, LoadError> {
	let fetch_err = |e: wasm_bindgen::JsValue| LoadError::Fetch {
		resource,
		message: format!("{e:?}"),
	};

	let opts = RequestInit::new();
	opts.set_method("GET");
	let request = Request::new_with_str_and_init(url, &opts).map_err(fetch_err)?;

	let window = web_sys::window().ok_or_else(|| LoadError::Fetch {
		resource,
		message: "no window".into(),
	})?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(fetch_err)?
		.dyn_into()
		.map_err(fetch_err)?;

	if !response.ok() {
		return Err(LoadError::Status {
			resource,
			status: response.status(),
		});
	}

	let body = JsFuture::from(response.text().map_err(fetch_err)?)
		.await
		.map_err(fetch_err)?;
	let text = body.as_string().unwrap_or_default();
	debug!("Fetched {resource} from {url} ({} bytes)", text.len());
	Ok(text)
}

/// Loads and normalizes both datasets. The two requests run concurrently and
/// both must succeed.
pub async fn load_network(config: &AppConfig) -> Result<NetworkData, LoadError> {
	let (graph, biography) = futures::join!(
		fetch_text(&config.graph_url, Resource::Graph),
		fetch_text(&config.biography_url, Resource::Biography),
	);

	let result = graph.and_then(|g| {
		let graph = Graph::from_json(&g)?;
		let records = dataset::parse_biography(&biography?)?;
		Ok(NetworkData::new(graph, records))
	});

	match &result {
		Ok(data) => info!(
			"Network loaded: {} nodes, {} links, {} biographies",
			data.graph().nodes().len(),
			data.graph().links().len(),
			data.records().len()
		),
		Err(e) => error!("Failed to load network data: {e}"),
	}
	result
}
