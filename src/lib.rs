//! overlay-topology: Interactive force-directed view of an overlay network.
//!
//! This crate provides a WASM-based canvas component that renders hosts, their
//! interfaces and the tunnels between them with physics-based layout,
//! pan/zoom, hover highlighting and click events.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::topology::{
	EdgeId, EdgeKind, GraphError, NodeId, NodeKind, PhysicsConfig, RawEdge, RawNode, Theme,
	TopologyCanvas, TopologyConfig, TopologyEvents, TopologySnapshot,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("overlay-topology: logging initialized");
}

/// Text content of the script element with the given id, if present.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Parse JSON embedded in a script element, logging a parse failure.
fn load_json<T: DeserializeOwned>(id: &str) -> Option<T> {
	let json_text = script_text(id)?;
	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("overlay-topology: failed to parse #{}: {}", id, e);
			None
		}
	}
}

/// Load the snapshot from a script element with id="topology-data".
/// Expected format: JSON with { nodes: [...], edges: [...] }
fn load_snapshot() -> Option<TopologySnapshot> {
	let snapshot = load_json::<TopologySnapshot>("topology-data")?;
	info!(
		"overlay-topology: loaded {} nodes, {} edges",
		snapshot.nodes.len(),
		snapshot.edges.len()
	);
	Some(snapshot)
}

/// Main application component.
/// Loads the snapshot and optional physics overrides from the DOM and renders the view.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let snapshot = load_snapshot().unwrap_or_default();
	let data = Signal::derive(move || snapshot.clone());
	let config = TopologyConfig {
		physics: load_json::<PhysicsConfig>("topology-config").unwrap_or_default(),
		..TopologyConfig::default()
	};

	let (selected, set_selected) = signal(None::<NodeId>);
	let on_node_hovered = move |id: Option<NodeId>| {
		if let Some(id) = id {
			log::debug!("overlay-topology: hovering {}", id);
		}
	};
	let on_node_clicked = move |id: NodeId| set_selected.set(Some(id));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Overlay Topology" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<TopologyCanvas
				data=data
				config=config
				on_node_hovered=on_node_hovered
				on_node_clicked=on_node_clicked
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Overlay Topology"</h1>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				<p class="selection">
					{move || selected.get().map(|id| format!("Selected: {}", id)).unwrap_or_default()}
				</p>
			</div>
		</div>
	}
}
