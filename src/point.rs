use std::ops;

/// 2D Point (X,Y).
pub type Point2 = [f64; 2];

pub trait Point: Copy + Sized + IntoIterator<Item = f64> {
    /// Set all the values to this value.
    fn all(v: f64) -> Self;

    /// Set all values to zero.
    fn zero() -> Self {
        Self::all(0.)
    }

    /// Scale point by multiplying all dimensions by `scalar`.
    fn scale(self, scalar: f64) -> Self;

    /// Calculate the magnitude of the vector.
    fn mag(self) -> f64 {
        self.into_iter()
            .zip(self)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            .sqrt()
    }

    /// Return the minimum of each dimension.
    fn min_all(self, b: Self) -> Self {
        self.xfm(b, f64::min)
    }

    /// Return the maximum of each dimension.
    fn max_all(self, b: Self) -> Self {
        self.xfm(b, f64::max)
    }

    /// Perform a transformation on each pair of dimensions.
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self;
}

pub trait Add<Rhs = Self> {
    fn add(self, rhs: Rhs) -> Self;
    fn sub(self, rhs: Rhs) -> Self;
}

impl Point for Point2 {
    fn all(v: f64) -> Self {
        [v; 2]
    }
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self {
        let [ax, ay] = self;
        let [bx, by] = b;
        [f(ax, bx), f(ay, by)]
    }
}

impl Add for Point2 {
    fn add(self, rhs: Self) -> Self {
        self.xfm(rhs, ops::Add::add)
    }

    fn sub(self, rhs: Self) -> Self {
        self.xfm(rhs, ops::Sub::sub)
    }
}

pub trait ToPoint2 {
    fn to_p2(self) -> Point2;
}

impl ToPoint2 for Point2 {
    fn to_p2(self) -> Point2 {
        self
    }
}
impl ToPoint2 for &Point2 {
    fn to_p2(self) -> Point2 {
        *self
    }
}

/// The z component of `a × b`.
pub fn cross(a: Point2, b: Point2) -> f64 {
    let [ax, ay] = a;
    let [bx, by] = b;
    ax * by - ay * bx
}

/// Signed area of the triangle `abc`, positive if counter-clockwise.
pub fn tri_area_signed(a: Point2, b: Point2, c: Point2) -> f64 {
    cross(b.sub(a), c.sub(a)) * 0.5
}

/// Unsigned area of the triangle `abc`.
pub fn tri_area(a: Point2, b: Point2, c: Point2) -> f64 {
    tri_area_signed(a, b, c).abs()
}

/// The arithmetic mean of the points. Returns the origin for an empty iterator.
pub fn mean<I: IntoIterator<Item = Point2>>(points: I) -> Point2 {
    let (sum, n) = points
        .into_iter()
        .fold((Point2::zero(), 0usize), |(s, n), p| (s.add(p), n + 1));
    if n == 0 {
        sum
    } else {
        sum.scale((n as f64).recip())
    }
}

/// Same point, with tolerance.
pub fn same_point(a: Point2, b: Point2) -> bool {
    const T: f64 = 1e-9;
    a.sub(b).into_iter().all(|f| f.abs() < T)
}
