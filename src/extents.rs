use crate::*;

/// An axis-aligned box in the plane.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extents2 {
    pub origin: Point2,
    pub size: Point2,
}

impl Extents2 {
    pub fn zero() -> Self {
        Self {
            origin: Point2::zero(),
            size: Point2::zero(),
        }
    }

    /// Build from two opposite corners, in any order.
    ///
    /// # Example
    /// ```rust
    /// # use femesh::*;
    /// let e = Extents2::from_min_max([2.0, 0.0], [0.0, 1.0]);
    /// assert_eq!(e.origin, [0.0, 0.0]);
    /// assert_eq!(e.size, [2.0, 1.0]);
    /// ```
    pub fn from_min_max(a: Point2, b: Point2) -> Self {
        let origin = a.min_all(b);
        let size = a.max_all(b).sub(origin);

        Self { origin, size }
    }

    /// The `(x_min, y_min, x_max, y_max)` form of a rectangle.
    pub fn from_rect(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self::from_min_max([x_min, y_min], [x_max, y_max])
    }

    pub fn max(&self) -> Point2 {
        self.origin.add(self.size)
    }

    pub fn area(&self) -> f64 {
        let [w, h] = self.size;
        w * h
    }
}

/// Inclusive on all sides.
impl<P: ToPoint2> Envelops<P> for Extents2 {
    fn envelops(&self, p: P) -> bool {
        let [x, y] = p.to_p2();
        let [x0, y0] = self.origin;
        let [x1, y1] = self.max();
        x0 <= x && x <= x1 && y0 <= y && y <= y1
    }
}

/// An empty iterator produces [`Extents2::zero`].
impl FromIterator<Point2> for Extents2 {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        let mut iter = iter.into_iter();
        let first = match iter.next() {
            Some(p) => p,
            None => return Self::zero(),
        };
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (min.min_all(p), max.max_all(p))
        });
        Self::from_min_max(min, max)
    }
}
