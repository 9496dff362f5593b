use crate::math::Vector2;

#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Size {
        Size { width, height }
    }

    #[inline]
    pub fn half(&self) -> Vector2 {
        Vector2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl From<(f32, f32)> for Size {
    #[inline]
    fn from(value: (f32, f32)) -> Size {
        Size::new(value.0, value.1)
    }
}

impl From<Size> for Vector2 {
    #[inline]
    fn from(size: Size) -> Vector2 {
        Vector2::new(size.width, size.height)
    }
}

/// Axis-aligned bounds, stored as the lower-left corner plus a size.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Rect {
    origin: Vector2,
    size: Size,
}

impl Rect {
    #[inline]
    pub fn new(origin: Vector2, size: Size) -> Rect {
        Rect { origin, size }
    }

    /// Bounds of a sprite anchored at its centre.
    #[inline]
    pub fn centered(center: Vector2, size: Size) -> Rect {
        Rect {
            origin: center - size.half(),
            size,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x()
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x() + self.size.width
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y()
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y() + self.size.height
    }

    /// Inclusive overlap test: rects that only share an edge still intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.max_x() < other.min_x()
            || other.max_x() < self.min_x()
            || self.max_y() < other.min_y()
            || other.max_y() < self.min_y())
    }

    #[inline]
    pub fn contains(&self, point: Vector2) -> bool {
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }
}
