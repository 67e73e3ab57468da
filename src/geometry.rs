use crate::state::{
    MAX_SURFACE_HEIGHT, MAX_SURFACE_WIDTH, SURFACE_MARGIN, SURFACE_VIEWPORT_RATIO,
};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FitRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(point)
}

/// Scale a source rectangle to fit inside a destination rectangle without
/// cropping or distortion, centered on both axes.
pub fn fit_within(src_width: f64, src_height: f64, dst_width: f64, dst_height: f64) -> FitRect {
    if src_width <= 0.0 || src_height <= 0.0 || dst_width <= 0.0 || dst_height <= 0.0 {
        return FitRect {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
    }
    let src_aspect = src_width / src_height;
    let dst_aspect = dst_width / dst_height;
    if src_aspect > dst_aspect {
        let height = dst_width / src_aspect;
        FitRect {
            x: 0.0,
            y: (dst_height - height) / 2.0,
            width: dst_width,
            height,
        }
    } else {
        let width = dst_height * src_aspect;
        FitRect {
            x: (dst_width - width) / 2.0,
            y: 0.0,
            width,
            height: dst_height,
        }
    }
}

/// Surface dimensions for the current container and viewport. Dimensions
/// never go negative even when the container is narrower than the margin.
pub fn surface_size(container_width: f64, viewport_height: f64) -> (u32, u32) {
    let width = (container_width - SURFACE_MARGIN)
        .min(MAX_SURFACE_WIDTH)
        .max(0.0);
    let height = (viewport_height * SURFACE_VIEWPORT_RATIO)
        .min(MAX_SURFACE_HEIGHT)
        .max(0.0);
    (width as u32, height as u32)
}
