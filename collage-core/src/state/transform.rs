//! Canvas-space geometry. Units are canvas pixels, 0,0 is top left, +X right, +Y down.

#[derive(Copy, Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}
impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl std::ops::Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle, extending down-right from its origin.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}
impl Rect {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }
    /// Resize to the given dimensions, keeping the center where it was.
    #[must_use]
    pub fn resized_about_center(&self, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(
                self.origin.x - (width - self.width) / 2.0,
                self.origin.y - (height - self.height) / 2.0,
            ),
            width,
            height,
        }
    }
    /// Whether the point lies inside, counting the top and left edges but not the bottom and right.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.width
            && point.y < self.origin.y + self.height
    }
}
