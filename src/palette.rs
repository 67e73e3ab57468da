use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use crate::state::SWATCH_COLORS;

pub fn swatch_index(color: &str) -> Option<usize> {
    SWATCH_COLORS
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(color))
}

pub fn render_palette(document: &Document, palette_el: &HtmlElement, selected: Option<usize>) {
    palette_el.set_inner_html("");
    for (index, color) in SWATCH_COLORS.iter().enumerate() {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-index", &index.to_string());
        let _ = button.set_attribute("aria-label", &format!("Use color {color}"));
        let class_name = if selected == Some(index) {
            "swatch active"
        } else {
            "swatch"
        };
        let _ = button.set_attribute("class", class_name);
        let _ = button.style().set_property("background", color);
        let _ = palette_el.append_child(&button);
    }
}

pub fn palette_action_from_event(event: &Event) -> Option<usize> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(index) = element.get_attribute("data-index") {
            return index.parse::<usize>().ok();
        }
        current = element.parent_element();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DEFAULT_BRUSH_COLOR;

    #[test]
    fn the_default_color_maps_to_the_first_swatch() {
        assert_eq!(swatch_index(DEFAULT_BRUSH_COLOR), Some(0));
    }

    #[test]
    fn lookup_ignores_hex_case() {
        assert_eq!(swatch_index("#ffa500"), Some(8));
        assert_eq!(swatch_index("#FFA500"), Some(8));
    }

    #[test]
    fn colors_off_the_palette_have_no_swatch() {
        assert_eq!(swatch_index("#123456"), None);
        assert_eq!(swatch_index(""), None);
    }
}
