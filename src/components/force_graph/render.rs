use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{DASH, DASH_GAP, ForceGraphState, NodeInfo};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#111827");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (2.0 / k.max(0.5), DASH / k, DASH_GAP / k, 8.0 / k);
	let dash_offset = -state.flow_phase / k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let mut geometry = HashMap::new();
	state.graph.visit_nodes(|node| {
		geometry.insert(
			node.index(),
			(node.x() as f64, node.y() as f64, node.data.user_data.radius),
		);
	});

	for edge in state.edges() {
		let (Some(&(x1, y1, r1)), Some(&(x2, y2, r2))) =
			(geometry.get(&edge.source), geometry.get(&edge.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted = state.is_highlighted(edge.source) && state.is_highlighted(edge.target);
		let (alpha, width) = if is_highlighted {
			(0.8 + 0.2 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.8 - 0.6 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&edge.color);
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&edge.color);
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(label) = &edge.label {
			ctx.set_fill_style_str("#cccccc");
			ctx.set_font(&format!("{}px sans-serif", 9.0 / k.max(0.5)));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
			ctx.set_text_align("start");
		}
		ctx.set_global_alpha(1.0);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Filled disc with a white rim and its label to the right.
fn draw_disc(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	(x, y): (f64, f64),
	radius: f64,
	rim: f64,
	font: &str,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&info.color);
	ctx.fill();
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(rim);
	ctx.stroke();

	if let Some(label) = &info.label {
		ctx.set_fill_style_str("#ffffff");
		ctx.set_font(font);
		let _ = ctx.fill_text(label, x + radius + 4.0, y + 4.0);
	}
}

fn draw_glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, t: f64) {
	let outer = radius * 2.4;
	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, outer) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.35 * t));
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, outer, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

/// Dimmed nodes first, then the hovered node and its neighbours on top.
fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("bold {}px sans-serif", 11.0 / k.max(0.5));
	let rim = 2.0 / k.max(0.5);

	state.graph.visit_nodes(|node| {
		if has_highlight && state.is_highlighted(node.index()) {
			return;
		}
		let info = &node.data.user_data;
		ctx.set_global_alpha(1.0 - 0.7 * t);
		let at = (node.x() as f64, node.y() as f64);
		draw_disc(ctx, info, at, info.radius * (1.0 - 0.15 * t), rim, &font);
	});
	ctx.set_global_alpha(1.0);

	if !has_highlight {
		return;
	}
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let mut radius = info.radius;
		if state.is_hovered(idx) {
			radius *= 1.0 + 0.4 * t;
			if t > 0.01 {
				draw_glow(ctx, x, y, radius, t);
			}
		}
		draw_disc(ctx, info, (x, y), radius, rim, &font);
	});
}
