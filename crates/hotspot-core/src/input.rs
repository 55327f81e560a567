//! Pointer input and the mapping into image space.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event in whatever space the host delivers; mapped into image
/// space by a [`PointerTransform`] before it reaches the state machines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        /// 1 for a single click, 2 for a double click.
        click_count: u8,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    /// Pointer left the image or capture was lost.
    Leave,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            click_count: 1,
        }
    }

    pub fn double_click(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            click_count: 2,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Leave => None,
        }
    }

    /// Same event with its position replaced.
    pub fn with_position(self, position: Point) -> Self {
        match self {
            PointerEvent::Down { click_count, .. } => PointerEvent::Down {
                position,
                click_count,
            },
            PointerEvent::Move { .. } => PointerEvent::Move { position },
            PointerEvent::Up { .. } => PointerEvent::Up { position },
            PointerEvent::Leave => PointerEvent::Leave,
        }
    }
}

/// Displayed size of the bound image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
}

impl ImageBounds {
    /// `None` unless both dimensions are finite and positive.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }

    /// Shift that brings `bounds` back inside the image. A box larger than
    /// the image is pinned to the top-left edge.
    pub fn containment_offset(&self, bounds: Rect) -> Vec2 {
        let axis = |lo: f64, hi: f64, limit: f64| {
            if lo < 0.0 {
                -lo
            } else if hi > limit {
                (limit - hi).max(-lo)
            } else {
                0.0
            }
        };
        Vec2::new(
            axis(bounds.x0, bounds.x1, self.width),
            axis(bounds.y0, bounds.y1, self.height),
        )
    }
}

/// Maps host pointer positions into image space. `None` means the position
/// cannot be mapped (e.g. the image is not laid out yet) and the event is
/// dropped.
pub trait PointerTransform {
    fn to_image_space(&self, position: Point) -> Option<Point>;
}

/// For hosts that already deliver image-relative coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityTransform;

impl PointerTransform for IdentityTransform {
    fn to_image_space(&self, position: Point) -> Option<Point> {
        Some(position)
    }
}

/// Image drawn at `origin` with a uniform `scale` (displayed / host units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    pub origin: Point,
    pub scale: f64,
}

impl ImageFrame {
    pub fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }
}

impl PointerTransform for ImageFrame {
    fn to_image_space(&self, position: Point) -> Option<Point> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return None;
        }
        let local: Vec2 = (position - self.origin) / self.scale;
        Some(local.to_point())
    }
}

impl<F> PointerTransform for F
where
    F: Fn(Point) -> Option<Point>,
{
    fn to_image_space(&self, position: Point) -> Option<Point> {
        self(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_bounds_validation() {
        assert!(ImageBounds::new(640.0, 480.0).is_some());
        assert!(ImageBounds::new(0.0, 480.0).is_none());
        assert!(ImageBounds::new(f64::NAN, 480.0).is_none());
    }

    #[test]
    fn test_containment_offset() {
        let image = ImageBounds::new(100.0, 80.0).unwrap();
        let inside = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(image.containment_offset(inside), Vec2::ZERO);

        let off_top_left = Rect::new(-35.0, -25.0, 15.0, 15.0);
        let shifted = off_top_left + image.containment_offset(off_top_left);
        assert!(image.contains(shifted.origin()));
        assert_eq!(shifted.origin(), Point::new(0.0, 0.0));

        let off_bottom_right = Rect::new(90.0, 70.0, 120.0, 95.0);
        let shifted = off_bottom_right + image.containment_offset(off_bottom_right);
        assert_eq!(shifted, Rect::new(70.0, 55.0, 100.0, 80.0));
        assert!(image.contains(Point::new(shifted.x1, shifted.y1)));

        // Wider than the image: pinned left.
        let wide = Rect::new(20.0, 10.0, 170.0, 20.0);
        assert_eq!(image.containment_offset(wide), Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn test_image_frame_transform() {
        let frame = ImageFrame::new(Point::new(100.0, 50.0), 2.0);
        assert_eq!(frame.to_image_space(Point::new(120.0, 70.0)), Some(Point::new(10.0, 10.0)));
        assert!(ImageFrame::new(Point::ZERO, 0.0).to_image_space(Point::ZERO).is_none());
    }

    #[test]
    fn test_closure_transform() {
        let shift = |p: Point| Some(Point::new(p.x - 5.0, p.y));
        assert_eq!(shift.to_image_space(Point::new(5.0, 1.0)), Some(Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_event_position() {
        let event = PointerEvent::double_click(1.0, 2.0);
        assert_eq!(event.position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(PointerEvent::Leave.position(), None);
        let moved = event.with_position(Point::new(3.0, 4.0));
        assert_eq!(
            moved,
            PointerEvent::Down {
                position: Point::new(3.0, 4.0),
                click_count: 2
            }
        );
    }
}
