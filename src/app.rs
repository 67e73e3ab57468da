use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Element, Event, FileReader, HtmlButtonElement, HtmlCanvasElement,
    HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlSpanElement, HtmlTextAreaElement,
    PointerEvent, ProgressEvent,
};

use crate::actions::{
    begin_drag, drag_to, end_drag, sanitize_color, sanitize_size, select_color, select_tool,
    set_brush_size,
};
use crate::canvas;
use crate::dom::{
    alert, confirm, debug_enabled, event_to_point, get_element, show_indicator, update_counts,
    update_size_label,
};
use crate::notes;
use crate::palette::{palette_action_from_event, render_palette, swatch_index};
use crate::persistence;
use crate::persistence::ToolPrefs;
use crate::state::{
    DragMode, State, Tool, AUTOSAVE_DELAY_MS, DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_SIZE,
    SWATCH_COLORS,
};

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    js_sys::Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn prefs_of(state: &State) -> ToolPrefs {
    ToolPrefs {
        tool: state.tool.value().to_string(),
        size: state.brush_size,
        color: state.brush_color.clone(),
    }
}

fn store_prefs(state: &State) {
    persistence::save_prefs(&prefs_of(state));
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let debug = debug_enabled(&window);
    if debug {
        web_sys::console::log_1(
            &"Inkpad debug enabled. Keep the URL but drop `?debug=1` to quiet logs.".into(),
        );
    }

    let canvas: HtmlCanvasElement = get_element(&document, "drawing-canvas")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    let notes_editor: HtmlTextAreaElement = get_element(&document, "notes-editor")?;
    let tool_select: HtmlSelectElement = get_element(&document, "tool-select")?;
    let size_input: HtmlInputElement = get_element(&document, "brush-size")?;
    let size_value: HtmlSpanElement = get_element(&document, "size-value")?;
    let palette_el: HtmlElement = get_element(&document, "color-palette")?;
    let import_button: HtmlButtonElement = get_element(&document, "import-image")?;
    let image_input: HtmlInputElement = get_element(&document, "image-input")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear-canvas")?;
    let save_button: HtmlButtonElement = get_element(&document, "save-drawing")?;
    let export_button: HtmlButtonElement = get_element(&document, "export-drawing")?;
    let save_notes_button: HtmlButtonElement = get_element(&document, "save-notes")?;
    let clear_notes_button: HtmlButtonElement = get_element(&document, "clear-notes")?;
    let char_count_el: Element = get_element(&document, "char-count")?;
    let word_count_el: Element = get_element(&document, "word-count")?;
    let indicator: HtmlElement = get_element(&document, "auto-save-indicator")?;

    let (tool, brush_size, brush_color) = match persistence::load_prefs() {
        Some(prefs) => (
            Tool::from_value(&prefs.tool).unwrap_or(Tool::Pen),
            sanitize_size(prefs.size),
            sanitize_color(prefs.color),
        ),
        None => (Tool::Pen, DEFAULT_BRUSH_SIZE, DEFAULT_BRUSH_COLOR.to_string()),
    };
    tool_select.set_value(tool.value());
    size_input.set_value(&brush_size.to_string());
    update_size_label(&size_input, &size_value);

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        ctx,
        notes: notes_editor.clone(),
        indicator: indicator.clone(),
        width: 0.0,
        height: 0.0,
        tool,
        brush_size,
        brush_color,
        drag: DragMode::Idle,
        decode_seq: 0,
        autosave: notes::AutosaveTimer::new(),
        autosave_onfire: None,
        indicator_handle: None,
        indicator_onhide: None,
        debug,
    }));

    render_palette(
        &document,
        &palette_el,
        swatch_index(&state.borrow().brush_color),
    );

    canvas::resize_surface(&window, &state);
    if let Some(data) = persistence::load_drawing() {
        canvas::restore_snapshot(&state, &data);
    }
    if let Some(text) = persistence::load_notes() {
        notes_editor.set_value(&text);
    }
    update_counts(&char_count_el, &word_count_el, &notes_editor.value());

    {
        let tool_state = state.clone();
        let tool_select_cb = tool_select.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = tool_state.borrow_mut();
            select_tool(&mut state, &tool_select_cb.value());
            store_prefs(&state);
        });
        tool_select.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let size_state = state.clone();
        let size_input_cb = size_input.clone();
        let size_value_cb = size_value.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = size_state.borrow_mut();
            set_brush_size(
                &mut state,
                size_input_cb.value().parse::<f64>().unwrap_or(f64::NAN),
            );
            update_size_label(&size_input_cb, &size_value_cb);
            store_prefs(&state);
        });
        size_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let palette_state = state.clone();
        let palette_el_cb = palette_el.clone();
        let palette_el_listener = palette_el.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(index) = palette_action_from_event(&event) else {
                return;
            };
            let Some(color) = SWATCH_COLORS.get(index) else {
                return;
            };
            {
                let mut state = palette_state.borrow_mut();
                select_color(&mut state, (*color).to_string());
                store_prefs(&state);
            }
            render_palette(&document_cb, &palette_el_cb, Some(index));
        });
        palette_el_listener
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let image_input_cb = image_input.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            image_input_cb.set_value("");
            image_input_cb.click();
        });
        import_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let import_state = state.clone();
        let image_input_cb = image_input.clone();
        let window_cb = window.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let file = image_input_cb.files().and_then(|list| list.get(0));
            // Reset so the same file can be picked again next time.
            image_input_cb.set_value("");
            let Some(file) = file else {
                return;
            };
            if !persistence::is_supported_image(&file.type_()) {
                alert(
                    &window_cb,
                    "Please select a valid image file (JPG, PNG, GIF, WebP, or BMP)",
                );
                return;
            }
            let Ok(reader) = FileReader::new() else {
                return;
            };
            let onload_state = import_state.clone();
            let onload_window = window_cb.clone();
            let onload_reader = reader.clone();
            let onload = Closure::once_into_js(move |_: ProgressEvent| {
                let Some(data) = onload_reader.result().ok().and_then(|value| value.as_string())
                else {
                    return;
                };
                canvas::paint_imported(&onload_window, &onload_state, &data);
            });
            reader.set_onload(Some(onload.unchecked_ref()));
            let _ = reader.read_as_data_url(&file);
        });
        image_input.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let clear_state = state.clone();
        let window_cb = window.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            if !confirm(&window_cb, "Are you sure you want to clear the canvas?") {
                return;
            }
            let state = clear_state.borrow();
            canvas::clear_surface(&state);
            canvas::persist_surface(&state);
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let save_state = state.clone();
        let window_cb = window.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            {
                let state = save_state.borrow();
                canvas::persist_surface(&state);
            }
            show_indicator(&window_cb, &save_state, "Drawing saved!");
        });
        save_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let export_state = state.clone();
        let window_cb = window.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let data = canvas::snapshot(&export_state.borrow());
            let Some(data) = data else {
                return;
            };
            let name = persistence::export_name("drawing", &persistence::now_slug(), "png");
            persistence::download_data_url(&document_cb, &name, &data);
            show_indicator(&window_cb, &export_state, "Drawing exported!");
        });
        export_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let down_state = state.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 || !event.is_primary() {
                return;
            }
            event.prevent_default();
            let Some(point) = event_to_point(&down_canvas, &event) else {
                return;
            };
            let mut state = down_state.borrow_mut();
            begin_drag(&mut state.drag, point);
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if !event.is_primary() {
                return;
            }
            let Some(point) = event_to_point(&move_canvas, &event) else {
                return;
            };
            let mut guard = move_state.borrow_mut();
            let state = &mut *guard;
            if let Some(segment) = drag_to(&mut state.drag, point) {
                let (color, width) = state.tool.stroke_style(&state.brush_color, state.brush_size);
                canvas::stroke_segment(&*state, segment, color, width);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    for event_name in ["pointerup", "pointerleave"] {
        let up_state = state.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |_| {
            let mut state = up_state.borrow_mut();
            if end_drag(&mut state.drag) {
                canvas::persist_surface(&state);
            }
        });
        canvas.add_event_listener_with_callback(event_name, onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let input_state = state.clone();
        let window_cb = window.clone();
        let notes_cb = notes_editor.clone();
        let char_cb = char_count_el.clone();
        let word_cb = word_count_el.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            update_counts(&char_cb, &word_cb, &notes_cb.value());
            notes::schedule_autosave(&window_cb, &input_state);
        });
        notes_editor.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let save_state = state.clone();
        let window_cb = window.clone();
        let document_cb = document.clone();
        let notes_cb = notes_editor.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let text = notes_cb.value();
            if text.trim().is_empty() {
                alert(
                    &window_cb,
                    "Notes are empty. Please write something before saving.",
                );
                return;
            }
            let name = persistence::export_name("notes", &persistence::now_slug(), "txt");
            persistence::download_data_url(&document_cb, &name, &persistence::text_data_url(&text));
            show_indicator(&window_cb, &save_state, "Notes downloaded!");
        });
        save_notes_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let clear_state = state.clone();
        let window_cb = window.clone();
        let notes_cb = notes_editor.clone();
        let char_cb = char_count_el.clone();
        let word_cb = word_count_el.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            if !confirm(&window_cb, "Are you sure you want to clear all notes?") {
                return;
            }
            {
                let mut state = clear_state.borrow_mut();
                notes::cancel_autosave(&window_cb, &mut state);
            }
            notes_cb.set_value("");
            persistence::save_notes("");
            update_counts(&char_cb, &word_cb, "");
        });
        clear_notes_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let resize_state = state.clone();
        let window_cb = window.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            canvas::resize_surface(&window_cb, &resize_state);
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    {
        let unload_state = state.clone();
        let notes_cb = notes_editor.clone();
        let onunload = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state = unload_state.borrow();
            canvas::persist_surface(&state);
            persistence::save_notes(&notes_cb.value());
            store_prefs(&state);
        });
        window
            .add_event_listener_with_callback("beforeunload", onunload.as_ref().unchecked_ref())?;
        onunload.forget();
    }

    if debug {
        web_sys::console::log_1(
            &format!("Inkpad ready, autosave window {AUTOSAVE_DELAY_MS}ms").into(),
        );
    }

    Ok(())
}
