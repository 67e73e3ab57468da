use crate::geometry::{Point, Segment};
use crate::state::{
    DragMode, State, Tool, DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE,
};

pub fn sanitize_color(mut color: String) -> String {
    if color.is_empty() {
        return DEFAULT_BRUSH_COLOR.to_string();
    }
    if color.len() > 32 {
        color.truncate(32);
    }
    color
}

pub fn sanitize_size(size: f64) -> f64 {
    let size = if size.is_finite() {
        size
    } else {
        DEFAULT_BRUSH_SIZE
    };
    size.max(MIN_BRUSH_SIZE).min(MAX_BRUSH_SIZE)
}

pub fn begin_drag(drag: &mut DragMode, at: Point) {
    *drag = DragMode::Dragging { last: at };
}

/// One pointer sample while dragging yields one segment from the previous
/// anchor; samples while idle yield nothing.
pub fn drag_to(drag: &mut DragMode, to: Point) -> Option<Segment> {
    match drag {
        DragMode::Idle => None,
        DragMode::Dragging { last } => {
            let from = *last;
            *last = to;
            Some(Segment { from, to })
        }
    }
}

/// Returns whether a stroke was actually in progress, so the caller knows
/// to persist the surface.
pub fn end_drag(drag: &mut DragMode) -> bool {
    match std::mem::replace(drag, DragMode::Idle) {
        DragMode::Dragging { .. } => true,
        DragMode::Idle => false,
    }
}

pub fn select_tool(state: &mut State, value: &str) {
    if let Some(tool) = Tool::from_value(value) {
        state.tool = tool;
    }
}

pub fn set_brush_size(state: &mut State, size: f64) {
    state.brush_size = sanitize_size(size);
}

pub fn select_color(state: &mut State, color: String) {
    state.brush_color = sanitize_color(color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut drag = DragMode::Idle;
        assert!(drag_to(&mut drag, point(4.0, 4.0)).is_none());
        assert!(!end_drag(&mut drag));
    }

    #[test]
    fn a_drag_yields_one_segment_per_sample() {
        let samples = [
            point(0.0, 0.0),
            point(1.0, 2.0),
            point(3.0, 3.0),
            point(7.0, 5.0),
        ];
        let mut drag = DragMode::Idle;
        begin_drag(&mut drag, samples[0]);
        let segments: Vec<Segment> = samples[1..]
            .iter()
            .filter_map(|sample| drag_to(&mut drag, *sample))
            .collect();
        assert_eq!(segments.len(), 3);
        for (index, segment) in segments.iter().enumerate() {
            assert_eq!(segment.from, samples[index]);
            assert_eq!(segment.to, samples[index + 1]);
        }
        assert!(end_drag(&mut drag));
        assert!(!end_drag(&mut drag));
    }

    #[test]
    fn ending_a_drag_stops_segment_output() {
        let mut drag = DragMode::Idle;
        begin_drag(&mut drag, point(0.0, 0.0));
        assert!(end_drag(&mut drag));
        assert!(drag_to(&mut drag, point(1.0, 1.0)).is_none());
    }

    #[test]
    fn sizes_clamp_to_the_brush_range() {
        assert_eq!(sanitize_size(0.2), MIN_BRUSH_SIZE);
        assert_eq!(sanitize_size(500.0), MAX_BRUSH_SIZE);
        assert_eq!(sanitize_size(12.0), 12.0);
        assert_eq!(sanitize_size(f64::NAN), DEFAULT_BRUSH_SIZE);
    }

    #[test]
    fn colors_fall_back_and_truncate() {
        assert_eq!(sanitize_color(String::new()), DEFAULT_BRUSH_COLOR);
        assert_eq!(sanitize_color("#123456".to_string()), "#123456");
        let long = "x".repeat(64);
        assert_eq!(sanitize_color(long).len(), 32);
    }
}
