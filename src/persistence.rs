use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, Storage};

pub const DRAWING_KEY: &str = "savedDrawing";
pub const NOTES_KEY: &str = "savedNotes";
pub const TOOLS_KEY: &str = "savedTools";

const SUPPORTED_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
];

#[derive(Serialize, Deserialize)]
pub struct ToolPrefs {
    pub tool: String,
    pub size: f64,
    pub color: String,
}

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

fn write_item(key: &str, value: &str) {
    let Some(storage) = local_storage() else {
        web_sys::console::warn_1(&format!("Storage unavailable, dropping {key}").into());
        return;
    };
    if storage.set_item(key, value).is_err() {
        web_sys::console::warn_1(&format!("Storage write failed for {key}").into());
    }
}

fn read_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn save_drawing(data_url: &str) {
    write_item(DRAWING_KEY, data_url);
}

pub fn load_drawing() -> Option<String> {
    read_item(DRAWING_KEY)
}

pub fn save_notes(text: &str) {
    write_item(NOTES_KEY, text);
}

pub fn load_notes() -> Option<String> {
    read_item(NOTES_KEY)
}

pub fn save_prefs(prefs: &ToolPrefs) {
    let Ok(raw) = serde_json::to_string(prefs) else {
        return;
    };
    write_item(TOOLS_KEY, &raw);
}

pub fn load_prefs() -> Option<ToolPrefs> {
    serde_json::from_str(&read_item(TOOLS_KEY)?).ok()
}

pub fn is_supported_image(mime: &str) -> bool {
    SUPPORTED_IMAGE_TYPES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(mime))
}

/// `2026-08-05T12:34:56.789Z` becomes `2026-08-05T12-34-56`: separators
/// flattened to `-`, milliseconds and zone dropped.
pub fn timestamp_slug(iso: &str) -> String {
    let flattened: String = iso
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    let cut = flattened.len().saturating_sub(5);
    flattened[..cut].to_string()
}

pub fn export_name(prefix: &str, slug: &str, extension: &str) -> String {
    format!("{prefix}-{slug}.{extension}")
}

pub fn now_slug() -> String {
    timestamp_slug(&String::from(js_sys::Date::new_0().to_iso_string()))
}

pub fn text_data_url(text: &str) -> String {
    let encoded = js_sys::encode_uri_component(text);
    format!("data:text/plain;charset=utf-8,{encoded}")
}

pub fn download_data_url(document: &Document, file_name: &str, href: &str) {
    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() {
            anchor.set_href(href);
            anchor.set_download(file_name);
            anchor.click();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_flattens_separators_and_drops_the_tail() {
        assert_eq!(
            timestamp_slug("2026-08-05T12:34:56.789Z"),
            "2026-08-05T12-34-56"
        );
    }

    #[test]
    fn slug_tolerates_short_input() {
        assert_eq!(timestamp_slug("abc"), "");
    }

    #[test]
    fn export_names_carry_prefix_slug_and_extension() {
        assert_eq!(
            export_name("drawing", "2026-08-05T12-34-56", "png"),
            "drawing-2026-08-05T12-34-56.png"
        );
        assert_eq!(
            export_name("notes", "2026-08-05T12-34-56", "txt"),
            "notes-2026-08-05T12-34-56.txt"
        );
    }

    #[test]
    fn the_image_allow_list_is_closed() {
        assert!(is_supported_image("image/png"));
        assert!(is_supported_image("image/webp"));
        assert!(is_supported_image("IMAGE/JPEG"));
        assert!(!is_supported_image("image/svg+xml"));
        assert!(!is_supported_image("image/tiff"));
        assert!(!is_supported_image("application/pdf"));
        assert!(!is_supported_image(""));
    }

    #[test]
    fn prefs_round_trip_through_json() {
        let prefs = ToolPrefs {
            tool: "eraser".to_string(),
            size: 12.0,
            color: "#FF00FF".to_string(),
        };
        let raw = serde_json::to_string(&prefs).unwrap();
        let back: ToolPrefs = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.tool, "eraser");
        assert_eq!(back.size, 12.0);
        assert_eq!(back.color, "#FF00FF");
    }
}
