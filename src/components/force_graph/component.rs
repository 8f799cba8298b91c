use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{ForceGraphState, HoverChange};
use super::types::{GraphData, NodeHover};
use crate::config::LayoutConfig;

type Shared<T> = Rc<RefCell<Option<T>>>;
type FrameCallback = Closure<dyn FnMut()>;

const FRAME_SECONDS: f32 = 0.016;
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> (f64, f64) {
	let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// The parent's box, or the configured fallback while it has no layout.
fn container_size(canvas: &HtmlCanvasElement, layout: &LayoutConfig) -> (f64, f64) {
	let parent = canvas.parent_element();
	let measured = |f: fn(&web_sys::Element) -> i32, fallback: f64| {
		parent
			.as_ref()
			.map(|p| f(p) as f64)
			.filter(|v| *v > 0.0)
			.unwrap_or(fallback)
	};
	(
		measured(web_sys::Element::client_width, layout.fallback_width),
		measured(web_sys::Element::client_height, layout.fallback_height),
	)
}

/// Re-fits the canvas to its container whenever the window resizes.
fn follow_window(
	window: &Window,
	canvas: HtmlCanvasElement,
	state: Shared<ForceGraphState>,
	layout: LayoutConfig,
	slot: &Shared<FrameCallback>,
) {
	*slot.borrow_mut() = Some(Closure::new(move || {
		let (w, h) = container_size(&canvas, &layout);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(ref mut s) = *state.borrow_mut() {
			s.resize(w, h);
		}
	}));
	if let Some(ref cb) = *slot.borrow() {
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
}

/// Runs one simulation step and one draw per animation frame, forever.
fn run_frames(
	window: &Window,
	ctx: CanvasRenderingContext2d,
	state: Shared<ForceGraphState>,
	slot: &Shared<FrameCallback>,
) {
	let next = slot.clone();
	*slot.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut s) = *state.borrow_mut() {
			if s.animation_running {
				s.tick(FRAME_SECONDS);
			}
			render::render(s, &ctx);
		}
		if let (Some(win), Some(cb)) = (web_sys::window(), next.borrow().as_ref()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(ref cb) = *slot.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] layout: Option<LayoutConfig>,
	/// Called with the node id when a node is clicked (not dragged).
	#[prop(optional)]
	on_node_click: Option<Callback<String>>,
	/// Called when the pointer enters or leaves a node.
	#[prop(optional)]
	on_node_hover: Option<Callback<Option<NodeHover>>>,
) -> impl IntoView {
	let layout = layout.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<ForceGraphState> = Rc::new(RefCell::new(None));
	let frame: Shared<FrameCallback> = Rc::new(RefCell::new(None));
	let on_resize: Shared<FrameCallback> = Rc::new(RefCell::new(None));

	let state_init = state.clone();
	Effect::new(move |_| {
		let graph_data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		// Later selections only swap the graph; the frame loop is already running
		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.load(&graph_data);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let (w, h) = container_size(&canvas, &layout);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph_data, w, h, layout.clone()));

		follow_window(&window, canvas, state_init.clone(), layout.clone(), &on_resize);
		run_frames(&window, ctx, state_init.clone(), &frame);
	});

	// Callbacks run after the state borrow ends so owners may re-render freely
	let report_hover = move |change: HoverChange, x: f64, y: f64| {
		if let Some(cb) = on_node_hover {
			cb.run(match change {
				HoverChange::Entered(id) => Some(NodeHover { id, x, y }),
				HoverChange::Left => None,
			});
		}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = canvas_point(canvas_ref, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = canvas_point(canvas_ref, &ev);
		let change = state_mm
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.pointer_move(x, y));
		if let Some(change) = change {
			report_hover(change, x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		if let (Some(id), Some(cb)) = (clicked, on_node_click) {
			cb.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let left = state_ml.borrow_mut().as_mut().is_some_and(|s| s.leave());
		if left {
			report_hover(HoverChange::Left, 0.0, 0.0);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = canvas_point(canvas_ref, &ev);
		let factor = if ev.delta_y() > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
