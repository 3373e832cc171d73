// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-level helpers: scrolling a target into view and centering a popover.

use kurbo::{Point, Rect, Size, Vec2};

/// Scroll offset that brings `target` into view.
///
/// `target` is in document coordinates. Vertically the target is centered in the
/// viewport. Horizontally the current offset is kept when the target already fits,
/// otherwise the smallest move that reveals its leading edge is used. Both axes are
/// clamped to the scrollable range `0..=content - viewport`.
pub fn centered_scroll(target: Rect, scroll: Vec2, viewport: Size, content: Size) -> Vec2 {
    let max_x = (content.width - viewport.width).max(0.0);
    let max_y = (content.height - viewport.height).max(0.0);

    let y = target.center().y - viewport.height / 2.0;

    let view_x0 = scroll.x;
    let view_x1 = scroll.x + viewport.width;
    let x = if target.x0 >= view_x0 && target.x1 <= view_x1 {
        scroll.x
    } else if target.x0 < view_x0 || target.width() > viewport.width {
        target.x0
    } else {
        target.x1 - viewport.width
    };

    Vec2::new(clamp_axis(x, max_x), clamp_axis(y, max_y))
}

/// Top-left corner, relative to the viewport, of a popover centered in it.
pub fn centered_in_viewport(popover: Size, viewport: Size) -> Point {
    Point::new(
        (viewport.width - popover.width) / 2.0,
        (viewport.height - popover.height) / 2.0,
    )
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);
    const CONTENT: Size = Size::new(800.0, 3000.0);

    #[test]
    fn centers_target_vertically() {
        let target = Rect::from_origin_size((100.0, 1500.0), (50.0, 100.0));
        let scroll = centered_scroll(target, Vec2::ZERO, VIEWPORT, CONTENT);
        assert_eq!(scroll, Vec2::new(0.0, 1550.0 - 300.0));
    }

    #[test]
    fn clamps_to_scrollable_range() {
        let top = Rect::from_origin_size((100.0, 20.0), (50.0, 20.0));
        assert_eq!(centered_scroll(top, Vec2::ZERO, VIEWPORT, CONTENT).y, 0.0);

        let bottom = Rect::from_origin_size((100.0, 2980.0), (50.0, 20.0));
        assert_eq!(
            centered_scroll(bottom, Vec2::ZERO, VIEWPORT, CONTENT).y,
            3000.0 - 600.0
        );
    }

    #[test]
    fn horizontal_scroll_moves_only_when_needed() {
        let content = Size::new(2000.0, 3000.0);
        let visible = Rect::from_origin_size((100.0, 0.0), (50.0, 20.0));
        assert_eq!(
            centered_scroll(visible, Vec2::ZERO, VIEWPORT, content).x,
            0.0
        );

        let right = Rect::from_origin_size((1200.0, 0.0), (100.0, 20.0));
        assert_eq!(
            centered_scroll(right, Vec2::ZERO, VIEWPORT, content).x,
            1300.0 - 800.0
        );

        let left = Rect::from_origin_size((50.0, 0.0), (100.0, 20.0));
        assert_eq!(
            centered_scroll(left, Vec2::new(400.0, 0.0), VIEWPORT, content).x,
            50.0
        );
    }

    #[test]
    fn content_smaller_than_viewport_never_scrolls() {
        let target = Rect::from_origin_size((100.0, 400.0), (50.0, 20.0));
        let small = Size::new(400.0, 300.0);
        assert_eq!(
            centered_scroll(target, Vec2::ZERO, VIEWPORT, small),
            Vec2::ZERO
        );
    }

    #[test]
    fn popover_centers_in_viewport() {
        let origin = centered_in_viewport(Size::new(200.0, 80.0), VIEWPORT);
        assert_eq!(origin, Point::new(300.0, 260.0));
    }
}
