//! Interactive overlay network topology view.
//!
//! Renders hosts, their interfaces and the tunnels between interfaces as a
//! force-directed graph on an HTML canvas:
//! - Hosts anchor their interfaces through short, stiff spokes; tunnels are
//!   long, loose and curved with particles flowing from source to target
//! - Hovering a node highlights it with its neighbors; hovering a tunnel
//!   highlights it with both endpoints, and everything else is dimmed
//! - Pan, zoom and node dragging, with labels that grow with the zoom
//! - Hover and click events forwarded to the host application
//!
//! The graph core (`model`, `highlight`, `physics`, `interaction`) has no DOM
//! dependency and is usable on its own.
//!
//! # Example
//!
//! ```ignore
//! use overlay_topology::{NodeKind, RawEdge, RawNode, TopologyCanvas, TopologySnapshot};
//!
//! let data = TopologySnapshot {
//!     nodes: vec![
//!         RawNode::new("host-a", NodeKind::Host).with_name("alpha"),
//!         RawNode::new("wg0@a", NodeKind::Interface).with_address("10.0.0.1"),
//!         RawNode::new("wg0@b", NodeKind::Interface).with_address("10.0.0.2"),
//!     ],
//!     edges: vec![
//!         RawEdge::new("a-spoke", "host-a", "wg0@a"),
//!         RawEdge::new("a-b", "wg0@a", "wg0@b"),
//!     ],
//! };
//!
//! view! {
//!     <TopologyCanvas
//!         data=Signal::derive(move || data.clone())
//!         on_node_clicked=move |id| log::info!("clicked {}", id)
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
pub mod curve;
pub mod error;
pub mod highlight;
pub mod interaction;
pub mod model;
mod particles;
pub mod physics;
pub mod render;
pub mod scale;
pub mod simulation;
pub mod state;
pub mod theme;
pub mod types;

pub use component::{TopologyCanvas, TopologyConfig};
pub use error::GraphError;
pub use highlight::{HighlightState, on_edge_hover, on_node_hover};
pub use interaction::{HoverTarget, InteractionCoordinator, Picked, TopologyEvents};
pub use model::{Graph, GraphEdge, GraphNode, build};
pub use physics::{ForceEngine, LinkParams, PhysicsConfig, PhysicsPolicy};
pub use theme::Theme;
pub use types::{EdgeId, EdgeKind, NodeId, NodeKind, RawEdge, RawNode, TopologySnapshot};
