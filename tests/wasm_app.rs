#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

use inkpad::persistence;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn notes_round_trip_through_the_store() {
    persistence::save_notes("drawing pad notes\nwith two lines");
    assert_eq!(
        persistence::load_notes().as_deref(),
        Some("drawing pad notes\nwith two lines")
    );
}

#[wasm_bindgen_test]
fn drawing_snapshot_round_trips_verbatim() {
    let data = "data:image/png;base64,iVBORw0KGgo=";
    persistence::save_drawing(data);
    assert_eq!(persistence::load_drawing().as_deref(), Some(data));
}

#[wasm_bindgen_test]
fn prefs_round_trip_through_the_store() {
    persistence::save_prefs(&persistence::ToolPrefs {
        tool: "eraser".to_string(),
        size: 9.0,
        color: "#FF6347".to_string(),
    });
    let prefs = persistence::load_prefs().expect("prefs present after save");
    assert_eq!(prefs.tool, "eraser");
    assert_eq!(prefs.size, 9.0);
    assert_eq!(prefs.color, "#FF6347");
}
