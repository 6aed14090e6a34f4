//! Leptos component wrapping the topology canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming and hover. An animation loop
//! runs via `requestAnimationFrame`, advancing the simulation and redrawing
//! each frame. A new snapshot on the `data` signal rebuilds the graph in place.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::TopologyEvents;
use super::model::Graph;
use super::physics::PhysicsConfig;
use super::render;
use super::scale::ScaleConfig;
use super::state::TopologyState;
use super::theme::{Paints, Theme};
use super::types::{EdgeId, NodeId, TopologySnapshot};

/// Longest simulated step per frame, in seconds.
const MAX_FRAME_DT: f64 = 0.05;

/// Visual and physical configuration of a [`TopologyCanvas`].
#[derive(Clone, Debug, Default)]
pub struct TopologyConfig {
	pub physics: PhysicsConfig,
	pub scale: ScaleConfig,
	pub theme: Theme,
}

/// Forwards coordinator events to the host's Leptos callbacks.
#[derive(Clone, Copy, Default)]
struct CallbackSink {
	node_hovered: Option<Callback<Option<NodeId>>>,
	link_hovered: Option<Callback<Option<EdgeId>>>,
	node_clicked: Option<Callback<NodeId>>,
}

impl TopologyEvents for CallbackSink {
	fn node_hovered(&self, id: Option<&NodeId>) {
		if let Some(cb) = self.node_hovered {
			cb.run(id.cloned());
		}
	}

	fn link_hovered(&self, id: Option<&EdgeId>) {
		if let Some(cb) = self.link_hovered {
			cb.run(id.cloned());
		}
	}

	fn node_clicked(&self, id: &NodeId) {
		if let Some(cb) = self.node_clicked {
			cb.run(id.clone());
		}
	}
}

/// Bundles view state with the configuration it is drawn with.
struct TopologyContext {
	state: TopologyState,
	paints: Paints,
	events: CallbackSink,
}

fn build_or_log(snapshot: &TopologySnapshot) -> Option<Graph> {
	match snapshot.build() {
		Ok(graph) => Some(graph),
		Err(e) => {
			error!("topology: rejected snapshot: {}", e);
			None
		}
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
		window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
	)
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}

/// Renders an interactive overlay topology on a canvas element.
///
/// Pass snapshots via the reactive `data` signal; each new snapshot replaces
/// the graph while surviving nodes keep their positions. A snapshot that fails
/// to build is logged and the previous graph stays on screen.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn TopologyCanvas(
	#[prop(into)] data: Signal<TopologySnapshot>,
	#[prop(optional)] config: Option<TopologyConfig>,
	#[prop(optional, into)] on_node_hovered: Option<Callback<Option<NodeId>>>,
	#[prop(optional, into)] on_link_hovered: Option<Callback<Option<EdgeId>>>,
	#[prop(optional, into)] on_node_clicked: Option<Callback<NodeId>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();
	let events = CallbackSink {
		node_hovered: on_node_hovered,
		link_hovered: on_link_hovered,
		node_clicked: on_node_clicked,
	};

	let context: Rc<RefCell<Option<TopologyContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let snapshot = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// Already mounted: swap the graph and keep the running loop.
		if let Some(ref mut c) = *context_init.borrow_mut() {
			if let Some(graph) = build_or_log(&snapshot) {
				c.state.replace_snapshot(graph, &c.events);
			}
			return;
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("topology: canvas 2d context unavailable");
			return;
		};

		let graph = build_or_log(&snapshot).unwrap_or_default();
		*context_init.borrow_mut() = Some(TopologyContext {
			state: TopologyState::new(graph, config.physics.clone(), config.scale.clone(), w, h),
			paints: config.theme.paints(),
			events,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame) / 1000.0).clamp(0.0, MAX_FRAME_DT);
			last_frame = now;
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(dt as f32);
				render::render(&c.state, &ctx, &c.paints);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y, &c.events);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up(x, y, &c.events);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave(&c.events);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="topology-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
