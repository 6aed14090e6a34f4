//! Snapshot data structures delivered by the data layer.

use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Stable node identifier, unique within a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Stable edge (tunnel) identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

macro_rules! string_id {
	($name:ident) => {
		impl $name {
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl From<&str> for $name {
			fn from(s: &str) -> Self {
				Self(s.to_string())
			}
		}

		impl From<String> for $name {
			fn from(s: String) -> Self {
				Self(s)
			}
		}
	};
}

string_id!(NodeId);
string_id!(EdgeId);

/// What a node represents in the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
	/// A machine running the overlay agent. Anchors its interfaces.
	Host,
	/// A tunnel interface on a host.
	Interface,
}

impl NodeKind {
	/// Anchor kinds are hubs that leaf kinds attach to.
	pub fn is_anchor(self) -> bool {
		match self {
			NodeKind::Host => true,
			NodeKind::Interface => false,
		}
	}
}

/// Visual and physical class of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
	/// At least one endpoint is an anchor: host-to-interface attachment.
	Spoke,
	/// Both endpoints are leaves: an interface-to-interface tunnel.
	Peer,
}

impl EdgeKind {
	/// Derive the edge kind from its endpoint kinds.
	pub fn between(a: NodeKind, b: NodeKind) -> Self {
		if a.is_anchor() || b.is_anchor() {
			EdgeKind::Spoke
		} else {
			EdgeKind::Peer
		}
	}
}

/// Display attributes of a node. Unknown fields are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NodeAttrs {
	/// Human-readable name, drawn as the label of anchor nodes.
	#[serde(default)]
	pub name: Option<String>,
	/// Overlay address, drawn under the name.
	#[serde(default)]
	pub address: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Tunnel attributes of an edge.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EdgeAttrs {
	/// CIDR ranges routed through the tunnel.
	#[serde(default, alias = "allowedIps")]
	pub allowed_ips: Vec<String>,
	/// Keepalive interval in seconds.
	#[serde(default, alias = "persistentKeepalive")]
	pub persistent_keepalive: Option<u32>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A node as delivered by the data layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawNode {
	pub id: NodeId,
	pub kind: NodeKind,
	#[serde(flatten)]
	pub attrs: NodeAttrs,
}

impl RawNode {
	pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
		Self {
			id: id.into(),
			kind,
			attrs: NodeAttrs::default(),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.attrs.name = Some(name.into());
		self
	}

	pub fn with_address(mut self, address: impl Into<String>) -> Self {
		self.attrs.address = Some(address.into());
		self
	}
}

/// An edge as delivered by the data layer. Endpoints may reference nodes
/// outside the current snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawEdge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
	/// Explicit kind for an edge between two interfaces. Edges touching a host
	/// are always spokes; otherwise derived from the endpoint kinds when absent.
	#[serde(default)]
	pub kind: Option<EdgeKind>,
	#[serde(flatten)]
	pub attrs: EdgeAttrs,
}

impl RawEdge {
	pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			kind: None,
			attrs: EdgeAttrs::default(),
		}
	}
}

/// Complete point-in-time node/edge list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TopologySnapshot {
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	#[serde(default, alias = "links")]
	pub edges: Vec<RawEdge>,
}
