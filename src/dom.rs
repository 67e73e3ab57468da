use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlInputElement, HtmlSpanElement, PointerEvent, Window,
};

use crate::geometry::{normalize_point, Point};
use crate::notes;
use crate::state::{State, INDICATOR_MS};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

pub fn update_size_label(input: &HtmlInputElement, value: &HtmlSpanElement) {
    value.set_text_content(Some(&input.value()));
}

pub fn update_counts(char_el: &Element, word_el: &Element, text: &str) {
    char_el.set_text_content(Some(&notes::char_label(text)));
    word_el.set_text_content(Some(&notes::word_label(text)));
}

pub fn confirm(window: &Window, message: &str) -> bool {
    window.confirm_with_message(message).unwrap_or(false)
}

pub fn alert(window: &Window, message: &str) {
    let _ = window.alert_with_message(message);
}

pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    normalize_point(Point {
        x: f64::from(event.client_x()) - rect.left(),
        y: f64::from(event.client_y()) - rect.top(),
    })
}

/// Flash the status indicator for a moment. A fresh message supersedes any
/// pending hide timer so it gets its full display window.
pub fn show_indicator(window: &Window, state: &Rc<RefCell<State>>, message: &str) {
    let mut guard = state.borrow_mut();
    guard.indicator.set_text_content(Some(message));
    guard.indicator.set_class_name("auto-save-indicator show");
    if let Some(handle) = guard.indicator_handle.take() {
        window.clear_timeout_with_handle(handle);
    }
    let hide_state = state.clone();
    let onhide = Closure::<dyn FnMut()>::new(move || {
        let mut state = hide_state.borrow_mut();
        state.indicator_handle = None;
        state.indicator.set_class_name("auto-save-indicator");
    });
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        onhide.as_ref().unchecked_ref(),
        INDICATOR_MS,
    ) {
        Ok(handle) => {
            guard.indicator_handle = Some(handle);
            guard.indicator_onhide = Some(onhide);
        }
        Err(_) => drop(onhide),
    }
}
