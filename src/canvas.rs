use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, Window};

use crate::dom::show_indicator;
use crate::geometry::{fit_within, surface_size, Segment};
use crate::persistence;
use crate::state::{State, BACKGROUND_COLOR, MAX_SURFACE_HEIGHT, MAX_SURFACE_WIDTH, SURFACE_MARGIN};

pub fn stroke_segment(state: &State, segment: Segment, color: &str, width: f64) {
    let ctx = &state.ctx;
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.begin_path();
    ctx.move_to(segment.from.x, segment.from.y);
    ctx.line_to(segment.to.x, segment.to.y);
    ctx.stroke();
}

pub fn clear_surface(state: &State) {
    state.ctx.set_fill_style_str(BACKGROUND_COLOR);
    state.ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

pub fn snapshot(state: &State) -> Option<String> {
    state.canvas.to_data_url().ok()
}

pub fn persist_surface(state: &State) {
    if let Some(data) = snapshot(state) {
        persistence::save_drawing(&data);
    }
}

/// Resizing the backing buffer clears its pixels and resets context state,
/// so the content is snapshotted first and painted back once re-decoded.
pub fn resize_surface(window: &Window, state: &Rc<RefCell<State>>) {
    let data = {
        let mut state = state.borrow_mut();
        // Nothing worth preserving on the very first sizing pass.
        let data = if state.width > 0.0 && state.height > 0.0 {
            snapshot(&state)
        } else {
            None
        };
        let container_width = state
            .canvas
            .parent_element()
            .map(|parent| f64::from(parent.client_width()))
            .unwrap_or(MAX_SURFACE_WIDTH + SURFACE_MARGIN);
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(MAX_SURFACE_HEIGHT * 2.0);
        let (width, height) = surface_size(container_width, viewport_height);
        web_sys::console::log_1(
            &format!(
                "Resizing surface from {}x{} to {width}x{height}",
                state.width, state.height
            )
            .into(),
        );
        state.canvas.set_width(width);
        state.canvas.set_height(height);
        state.width = f64::from(width);
        state.height = f64::from(height);
        state.ctx.set_line_cap("round");
        state.ctx.set_line_join("round");
        data
    };
    if let Some(data) = data {
        restore_snapshot(state, &data);
    }
}

fn next_ticket(state: &Rc<RefCell<State>>) -> u32 {
    let mut state = state.borrow_mut();
    state.decode_seq = state.decode_seq.wrapping_add(1);
    state.decode_seq
}

/// Paint a serialized snapshot back at the origin. Decode completions race
/// with later resizes and imports; a completion whose ticket is no longer
/// the latest issued is dropped rather than repainting over newer work.
pub fn restore_snapshot(state: &Rc<RefCell<State>>, data: &str) {
    let ticket = next_ticket(state);
    let Ok(image) = HtmlImageElement::new() else {
        return;
    };
    let onload_state = state.clone();
    let onload_image = image.clone();
    let onload = Closure::once_into_js(move || {
        let state = onload_state.borrow();
        if state.decode_seq != ticket {
            if state.debug {
                web_sys::console::warn_1(
                    &format!("Dropping stale snapshot decode (ticket {ticket})").into(),
                );
            }
            return;
        }
        let _ = state
            .ctx
            .draw_image_with_html_image_element(&onload_image, 0.0, 0.0);
    });
    image.set_onload(Some(onload.unchecked_ref()));
    image.set_src(data);
}

/// Composite a decoded import over the surface, letterboxed to preserve
/// aspect, then persist the result.
pub fn paint_imported(window: &Window, state: &Rc<RefCell<State>>, data: &str) {
    let ticket = next_ticket(state);
    let Ok(image) = HtmlImageElement::new() else {
        return;
    };
    let onload_state = state.clone();
    let onload_window = window.clone();
    let onload_image = image.clone();
    let onload = Closure::once_into_js(move || {
        {
            let state = onload_state.borrow();
            if state.decode_seq != ticket {
                if state.debug {
                    web_sys::console::warn_1(
                        &format!("Dropping stale import decode (ticket {ticket})").into(),
                    );
                }
                return;
            }
            let fit = fit_within(
                f64::from(onload_image.natural_width()),
                f64::from(onload_image.natural_height()),
                state.width,
                state.height,
            );
            if fit.width <= 0.0 || fit.height <= 0.0 {
                return;
            }
            let _ = state.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &onload_image,
                fit.x,
                fit.y,
                fit.width,
                fit.height,
            );
            persist_surface(&state);
        }
        show_indicator(&onload_window, &onload_state, "Image imported!");
    });
    image.set_onload(Some(onload.unchecked_ref()));
    image.set_src(data);
}
