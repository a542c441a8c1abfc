use serde::{Deserialize, Serialize};

use crate::geometry::{Orientation, Rect, ScrollAxes};

/// Tuning for edge auto-scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollConfig {
    /// Width of the proximity band along each viewport edge, in pixels.
    pub edge_band: f32,
    /// Upper bound for the scroll speed, in pixels per second.
    pub max_speed: f32,
    /// Distance from the edge (in pixels) at or below which `max_speed` applies.
    /// Beyond it the speed falls off as `max_speed * falloff / distance`.
    pub falloff: f32,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            edge_band: 48.0,
            max_speed: 900.0,
            falloff: 6.0,
        }
    }
}

/// Requested scroll velocity in pixels per second.
///
/// Negative components scroll toward the start of the content, positive ones
/// toward its end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollVector {
    pub dx: f32,
    pub dy: f32,
}

impl ScrollVector {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Decide how a container should scroll for the floating item's current rect.
///
/// Every container is advised on its own; a floating rect that does not
/// overlap `viewport` yields [`ScrollVector::ZERO`].
pub fn advise(
    floating: Rect,
    viewport: Rect,
    axes: ScrollAxes,
    config: &AutoScrollConfig,
) -> ScrollVector {
    if axes.is_none() || !floating.intersects(&viewport) {
        return ScrollVector::ZERO;
    }

    let mut vector = ScrollVector::ZERO;
    if axes.horizontal {
        vector.dx = axis_speed(floating, viewport, Orientation::Horizontal, config);
    }
    if axes.vertical {
        vector.dy = axis_speed(floating, viewport, Orientation::Vertical, config);
    }
    vector
}

fn axis_speed(
    floating: Rect,
    viewport: Rect,
    axis: Orientation,
    config: &AutoScrollConfig,
) -> f32 {
    // Nothing to reveal along an axis the floating rect already spans.
    if floating.extent(axis) >= viewport.extent(axis) {
        return 0.0;
    }
    let leading = floating.start(axis) - viewport.start(axis);
    let trailing = viewport.end(axis) - floating.end(axis);

    if leading < config.edge_band && leading <= trailing {
        -speed_for(leading, config)
    } else if trailing < config.edge_band {
        speed_for(trailing, config)
    } else {
        0.0
    }
}

fn speed_for(distance: f32, config: &AutoScrollConfig) -> f32 {
    let distance = distance.max(0.0);
    if distance <= config.falloff {
        return config.max_speed;
    }
    (config.max_speed * config.falloff / distance).min(config.max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0., 100., 300., 400.);

    #[test]
    fn middle_of_viewport_does_not_scroll() {
        let floating = Rect::new(0., 250., 300., 50.);
        let v = advise(floating, VIEWPORT, ScrollAxes::VERTICAL, &AutoScrollConfig::default());
        assert!(v.is_zero());
    }

    #[test]
    fn leading_band_scrolls_toward_start() {
        let config = AutoScrollConfig::default();
        let floating = Rect::new(0., 104., 300., 50.);
        let v = advise(floating, VIEWPORT, ScrollAxes::VERTICAL, &config);
        assert_eq!(v.dy, -config.max_speed);
        assert_eq!(v.dx, 0.0);
    }

    #[test]
    fn trailing_band_scrolls_toward_end() {
        let config = AutoScrollConfig::default();
        // 30px left before the bottom edge: 900 * 6 / 30 = 180
        let floating = Rect::new(0., 420., 300., 50.);
        let v = advise(floating, VIEWPORT, ScrollAxes::VERTICAL, &config);
        assert!((v.dy - 180.0).abs() < 1e-3);
    }

    #[test]
    fn speed_grows_as_edge_gets_closer() {
        let config = AutoScrollConfig::default();
        let far = advise(Rect::new(0., 140., 300., 50.), VIEWPORT, ScrollAxes::VERTICAL, &config);
        let near = advise(Rect::new(0., 110., 300., 50.), VIEWPORT, ScrollAxes::VERTICAL, &config);
        assert!(near.dy < far.dy);
        assert!(far.dy < 0.0);
    }

    #[test]
    fn past_the_edge_is_clamped_to_max() {
        let config = AutoScrollConfig::default();
        let v = advise(Rect::new(0., 80., 300., 50.), VIEWPORT, ScrollAxes::VERTICAL, &config);
        assert_eq!(v.dy, -config.max_speed);
    }

    #[test]
    fn no_overlap_or_no_axes_is_zero() {
        let config = AutoScrollConfig::default();
        let outside = Rect::new(400., 104., 50., 50.);
        assert!(advise(outside, VIEWPORT, ScrollAxes::BOTH, &config).is_zero());
        let inside = Rect::new(0., 104., 300., 50.);
        assert!(advise(inside, VIEWPORT, ScrollAxes::NONE, &config).is_zero());
    }

    #[test]
    fn axis_spanned_by_the_floating_rect_is_left_alone() {
        let config = AutoScrollConfig::default();
        // As wide as the viewport and close to its top edge.
        let floating = Rect::new(0., 104., 300., 50.);
        let v = advise(floating, VIEWPORT, ScrollAxes::BOTH, &config);
        assert_eq!(v.dx, 0.0);
        assert!(v.dy < 0.0);
    }

    #[test]
    fn horizontal_axis_only_when_enabled() {
        let config = AutoScrollConfig::default();
        let floating = Rect::new(2., 104., 50., 50.);
        let v = advise(floating, VIEWPORT, ScrollAxes::HORIZONTAL, &config);
        assert_eq!(v.dx, -config.max_speed);
        assert_eq!(v.dy, 0.0);
    }
}
