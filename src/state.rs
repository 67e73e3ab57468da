use wasm_bindgen::prelude::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlTextAreaElement};

use crate::geometry::Point;
use crate::notes::AutosaveTimer;

pub const SWATCH_COLORS: [&str; 16] = [
    "#000000", "#FFFFFF", "#FF0000", "#00FF00",
    "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF",
    "#FFA500", "#800080", "#FFC0CB", "#A52A2A",
    "#808080", "#FFD700", "#00CED1", "#FF6347",
];

pub const BACKGROUND_COLOR: &str = "#FFFFFF";
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";
pub const DEFAULT_BRUSH_SIZE: f64 = 3.0;
pub const MIN_BRUSH_SIZE: f64 = 1.0;
pub const MAX_BRUSH_SIZE: f64 = 50.0;

pub const SURFACE_MARGIN: f64 = 40.0;
pub const MAX_SURFACE_WIDTH: f64 = 800.0;
pub const MAX_SURFACE_HEIGHT: f64 = 500.0;
pub const SURFACE_VIEWPORT_RATIO: f64 = 0.5;

pub const AUTOSAVE_DELAY_MS: i32 = 1000;
pub const INDICATOR_MS: i32 = 2000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tool {
    Pen,
    Eraser,
}

impl Tool {
    pub fn from_value(value: &str) -> Option<Tool> {
        match value {
            "pen" => Some(Tool::Pen),
            "eraser" => Some(Tool::Eraser),
            _ => None,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
        }
    }

    /// Resolved segment style: the eraser paints background color at twice
    /// the brush width.
    pub fn stroke_style<'a>(self, brush_color: &'a str, brush_size: f64) -> (&'a str, f64) {
        match self {
            Tool::Pen => (brush_color, brush_size),
            Tool::Eraser => (BACKGROUND_COLOR, brush_size * 2.0),
        }
    }
}

pub enum DragMode {
    Idle,
    Dragging { last: Point },
}

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub notes: HtmlTextAreaElement,
    pub indicator: HtmlElement,
    pub width: f64,
    pub height: f64,
    pub tool: Tool,
    pub brush_size: f64,
    pub brush_color: String,
    pub drag: DragMode,
    pub decode_seq: u32,
    pub autosave: AutosaveTimer,
    pub autosave_onfire: Option<Closure<dyn FnMut()>>,
    pub indicator_handle: Option<i32>,
    pub indicator_onhide: Option<Closure<dyn FnMut()>>,
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_values_round_trip() {
        assert_eq!(Tool::from_value("pen"), Some(Tool::Pen));
        assert_eq!(Tool::from_value("eraser"), Some(Tool::Eraser));
        assert_eq!(Tool::from_value("lasso"), None);
        assert_eq!(Tool::from_value(""), None);
        assert_eq!(Tool::from_value(Tool::Pen.value()), Some(Tool::Pen));
    }

    #[test]
    fn pen_style_uses_brush() {
        let (color, width) = Tool::Pen.stroke_style("#FF0000", 4.0);
        assert_eq!(color, "#FF0000");
        assert_eq!(width, 4.0);
    }

    #[test]
    fn eraser_style_paints_background_double_width() {
        let (color, width) = Tool::Eraser.stroke_style("#FF0000", 4.0);
        assert_eq!(color, BACKGROUND_COLOR);
        assert_eq!(width, 8.0);
    }

    #[test]
    fn default_color_is_first_swatch() {
        assert_eq!(SWATCH_COLORS[0], DEFAULT_BRUSH_COLOR);
        assert_eq!(SWATCH_COLORS.len(), 16);
    }
}
