//! Percent-space geometry for template elements
//!
//! Every rectangle here lives in canvas percent space. The coordinate system is
//! right-anchored to match right-to-left documents: `x` is the distance from the
//! canvas's right edge to the element's right edge, `y` the distance from the
//! canvas top to the element's top edge. Widths and heights are percentages of
//! the canvas width and height respectively.

use serde::{Deserialize, Serialize};

/// Smallest width or height (in percent) an element may have after any edit
pub const MIN_DIMENSION: f64 = 2.0;

/// A point in canvas percent space (x measured from the right edge)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in right-anchored percent space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Bounding box of two corner points
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Offset of the right edge from the canvas right edge
    pub fn right(&self) -> f64 {
        self.x
    }

    /// Offset of the left edge from the canvas right edge
    pub fn left(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` lies inside the rectangle (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.right()
            && point.x <= self.left()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Width over height; 1.0 for a degenerate rectangle
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Copy of this rectangle with both dimensions raised to [`MIN_DIMENSION`]
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.max(MIN_DIMENSION),
            height: self.height.max(MIN_DIMENSION),
            ..*self
        }
    }
}

/// Whether two rectangles share a strictly positive area.
///
/// Rectangles that only touch along an edge, and degenerate rectangles,
/// never overlap.
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    let overlap_x = a.left().min(b.left()) - a.right().max(b.right());
    let overlap_y = a.bottom().min(b.bottom()) - a.top().max(b.top());
    overlap_x > 0.0 && overlap_y > 0.0
}

/// Scale a rectangle by `factor` keeping its center fixed.
///
/// Width always scales; height scales only when `scale_height` is set
/// (proportional elements such as images). Results are floored at
/// [`MIN_DIMENSION`]. A non-positive or non-finite factor leaves the
/// rectangle unchanged.
pub fn scale_around_center(rect: &Rect, factor: f64, scale_height: bool) -> Rect {
    if !factor.is_finite() || factor <= 0.0 {
        return *rect;
    }

    let width = (rect.width * factor).max(MIN_DIMENSION);
    let height = if scale_height {
        (rect.height * factor).max(MIN_DIMENSION)
    } else {
        rect.height
    };

    Rect {
        x: rect.x - (width - rect.width) / 2.0,
        y: rect.y - (height - rect.height) / 2.0,
        width,
        height,
    }
}

/// One of the eight resize grips drawn around a selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
    ];

    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    /// Where this handle sits on `rect`
    pub fn position_on(self, rect: &Rect) -> Point {
        let x = if self.moves_left() {
            rect.left()
        } else if self.moves_right() {
            rect.right()
        } else {
            rect.x + rect.width / 2.0
        };
        let y = if self.moves_top() {
            rect.top()
        } else if self.moves_bottom() {
            rect.bottom()
        } else {
            rect.y + rect.height / 2.0
        };
        Point::new(x, y)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Resize `rect` by dragging `handle` by (`dx`, `dy`) percent.
///
/// Deltas are in screen direction: positive `dx` is a rightward pointer
/// motion, positive `dy` a downward one. Edges named by the handle move; the
/// opposite edges stay anchored. With `aspect_lock` set to the width/height
/// ratio captured at gesture start, the axis that changed drives the other
/// one. Both dimensions end at or above [`MIN_DIMENSION`]; under a lock the
/// floor is applied without breaking the ratio.
pub fn resize_from_handle(
    rect: &Rect,
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    aspect_lock: Option<f64>,
) -> Rect {
    let mut width = rect.width;
    let mut height = rect.height;

    if handle.moves_top() {
        height -= dy;
    }
    if handle.moves_bottom() {
        height += dy;
    }
    if handle.moves_left() {
        width -= dx;
    }
    if handle.moves_right() {
        width += dx;
    }

    match aspect_lock.filter(|ratio| ratio.is_finite() && *ratio > 0.0) {
        Some(ratio) => {
            if width != rect.width {
                height = width / ratio;
            } else if height != rect.height {
                width = height * ratio;
            }
            if width < MIN_DIMENSION || height < MIN_DIMENSION {
                if ratio >= 1.0 {
                    height = MIN_DIMENSION;
                    width = MIN_DIMENSION * ratio;
                } else {
                    width = MIN_DIMENSION;
                    height = MIN_DIMENSION / ratio;
                }
            }
        }
        None => {
            width = width.max(MIN_DIMENSION);
            height = height.max(MIN_DIMENSION);
        }
    }

    let x = if handle.moves_right() {
        rect.left() - width
    } else {
        rect.x
    };
    let y = if handle.moves_top() {
        rect.bottom() - height
    } else {
        rect.y
    };

    Rect { x, y, width, height }
}

/// A position in client (screen) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert a pixel length to percent of `extent_px`
pub fn px_to_percent(px: f64, extent_px: f64) -> f64 {
    px * 100.0 / extent_px
}

/// Convert a percentage of `extent_px` to pixels
pub fn percent_to_px(percent: f64, extent_px: f64) -> f64 {
    percent * extent_px / 100.0
}

/// Where the design canvas currently sits on screen, in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Canvas of the given size placed at the client origin
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// True when the canvas has no usable area (not laid out yet)
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Map a client pixel position into right-anchored percent space
    pub fn to_percent(&self, point: PixelPoint) -> Point {
        Point::new(
            px_to_percent(self.right() - point.x, self.width),
            px_to_percent(point.y - self.top, self.height),
        )
    }

    /// Map a percent-space point back to client pixels
    pub fn to_client(&self, point: Point) -> PixelPoint {
        PixelPoint::new(
            self.right() - percent_to_px(point.x, self.width),
            self.top + percent_to_px(point.y, self.height),
        )
    }

    /// Pointer delta in pixels as a percent delta, screen direction preserved
    pub fn delta_to_percent(&self, dx_px: f64, dy_px: f64) -> (f64, f64) {
        (
            px_to_percent(dx_px, self.width),
            px_to_percent(dy_px, self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_overlap_requires_positive_area() {
        let a = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect_overlap(&a, &Rect::new(25.0, 25.0, 10.0, 10.0)));
        // touching on the left edge of `a` (x + width == 30)
        assert!(!rect_overlap(&a, &Rect::new(30.0, 10.0, 10.0, 10.0)));
        // touching on the bottom edge
        assert!(!rect_overlap(&a, &Rect::new(10.0, 30.0, 10.0, 10.0)));
        // degenerate marquee inside `a`
        assert!(!rect_overlap(&a, &Rect::new(15.0, 15.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(30.0, 30.0)));
        assert!(!r.contains(Point::new(31.0, 20.0)));
    }

    #[test]
    fn test_scale_text_keeps_height() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        let scaled = scale_around_center(&r, 1.1, false);
        assert!(approx(scaled.width, 22.0));
        assert_eq!(scaled.height, 5.0);
        assert!(approx(scaled.x, 9.0));
        assert_eq!(scaled.y, 10.0);
    }

    #[test]
    fn test_scale_rejects_bad_factor() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(scale_around_center(&r, 0.0, true), r);
        assert_eq!(scale_around_center(&r, f64::NAN, true), r);
    }

    #[test]
    fn test_resize_right_handle_moves_right_edge() {
        // rightward drag of the right edge grows width and lowers the right offset
        let r = Rect::new(10.0, 10.0, 20.0, 10.0);
        let out = resize_from_handle(&r, ResizeHandle::Right, 5.0, 3.0, None);
        assert!(approx(out.width, 25.0));
        assert!(approx(out.x, 5.0));
        assert!(approx(out.left(), r.left()));
        assert_eq!(out.height, 10.0);
        assert_eq!(out.y, 10.0);
    }

    #[test]
    fn test_resize_top_left_handle() {
        let r = Rect::new(10.0, 10.0, 20.0, 10.0);
        let out = resize_from_handle(&r, ResizeHandle::TopLeft, 4.0, 2.0, None);
        assert!(approx(out.width, 16.0));
        assert!(approx(out.height, 8.0));
        assert!(approx(out.y, 12.0));
        assert!(approx(out.bottom(), r.bottom()));
        assert_eq!(out.x, 10.0);
    }

    #[test]
    fn test_resize_clamps_and_keeps_anchor() {
        let r = Rect::new(10.0, 10.0, 20.0, 10.0);
        let out = resize_from_handle(&r, ResizeHandle::Top, 0.0, 50.0, None);
        assert_eq!(out.height, MIN_DIMENSION);
        assert!(approx(out.bottom(), r.bottom()));
    }

    #[test]
    fn test_resize_locked_by_height() {
        let r = Rect::new(10.0, 10.0, 30.0, 10.0);
        let out = resize_from_handle(&r, ResizeHandle::Bottom, 0.0, 5.0, Some(3.0));
        assert!(approx(out.height, 15.0));
        assert!(approx(out.width, 45.0));
    }

    #[test]
    fn test_resize_locked_floor_keeps_ratio() {
        let r = Rect::new(10.0, 10.0, 30.0, 10.0);
        let out = resize_from_handle(&r, ResizeHandle::BottomLeft, 100.0, 0.0, Some(3.0));
        assert!(approx(out.height, MIN_DIMENSION));
        assert!(approx(out.width / out.height, 3.0));
    }

    #[test]
    fn test_handle_positions() {
        let r = Rect::new(10.0, 20.0, 40.0, 10.0);
        assert_eq!(ResizeHandle::TopRight.position_on(&r), Point::new(10.0, 20.0));
        assert_eq!(ResizeHandle::BottomLeft.position_on(&r), Point::new(50.0, 30.0));
        assert_eq!(ResizeHandle::Top.position_on(&r), Point::new(30.0, 20.0));
    }

    #[test]
    fn test_canvas_percent_conversion() {
        let canvas = CanvasBounds::new(100.0, 50.0, 200.0, 400.0);
        let p = canvas.to_percent(PixelPoint::new(280.0, 90.0));
        assert!(approx(p.x, 10.0));
        assert!(approx(p.y, 10.0));
        let back = canvas.to_client(p);
        assert!(approx(back.x, 280.0));
        assert!(approx(back.y, 90.0));
        assert_eq!(canvas.delta_to_percent(20.0, -40.0), (10.0, -10.0));
        assert!(CanvasBounds::default().is_empty());
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-20.0..100.0f64, -20.0..100.0f64, 2.0..80.0f64, 2.0..80.0f64)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn arb_handle() -> impl Strategy<Value = ResizeHandle> {
        prop::sample::select(ResizeHandle::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_resize_respects_floor(
            rect in arb_rect(),
            handle in arb_handle(),
            dx in -200.0..200.0f64,
            dy in -200.0..200.0f64,
            locked in any::<bool>(),
        ) {
            let lock = locked.then(|| rect.aspect_ratio());
            let out = resize_from_handle(&rect, handle, dx, dy, lock);
            prop_assert!(out.width >= MIN_DIMENSION - EPS);
            prop_assert!(out.height >= MIN_DIMENSION - EPS);
        }

        #[test]
        fn prop_locked_resize_keeps_ratio(
            rect in arb_rect(),
            handle in arb_handle(),
            dx in -200.0..200.0f64,
            dy in -200.0..200.0f64,
        ) {
            let ratio = rect.aspect_ratio();
            let out = resize_from_handle(&rect, handle, dx, dy, Some(ratio));
            prop_assert!(((out.width / out.height) - ratio).abs() < 1e-6 * ratio.max(1.0));
        }

        #[test]
        fn prop_zoom_round_trip_keeps_center(
            rect in arb_rect(),
            factor in 0.5..2.0f64,
            scale_height in any::<bool>(),
        ) {
            // stay clear of the floor so the inverse zoom is exact
            prop_assume!(rect.width * factor.min(1.0) > MIN_DIMENSION);
            prop_assume!(rect.height * factor.min(1.0) > MIN_DIMENSION);

            let zoomed = scale_around_center(&rect, factor, scale_height);
            let c0 = rect.center();
            let c1 = zoomed.center();
            prop_assert!((c0.x - c1.x).abs() < 1e-9 && (c0.y - c1.y).abs() < 1e-9);

            let back = scale_around_center(&zoomed, 1.0 / factor, scale_height);
            prop_assert!((back.width - rect.width).abs() < 1e-9);
            prop_assert!((back.height - rect.height).abs() < 1e-9);
        }
    }
}
