use crate::*;

/// A rectilinear lattice of points, axis aligned.
///
/// Points are stored row-first, so the point at `(x, y)` has index `y * x_count + x`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lattice {
    /// The x coordinate of each column.
    xs: Vec<f64>,
    /// The y coordinate of each row.
    ys: Vec<f64>,
}

impl Lattice {
    /// Create a lattice from the column and row coordinates.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self { xs, ys }
    }

    /// `x_count × y_count` points evenly spread over the extents, inclusive of both ends.
    ///
    /// # Example
    /// ```rust
    /// # use femesh::*;
    /// let l = Lattice::spanning(Extents2::from_rect(0.0, 0.0, 2.0, 1.0), 3, 2);
    /// assert_eq!(l.get_xy(2, 1), [2.0, 1.0]);
    /// assert_eq!(l.get_xy(1, 0), [1.0, 0.0]);
    /// ```
    pub fn spanning(extents: Extents2, x_count: usize, y_count: usize) -> Self {
        let [x0, y0] = extents.origin;
        let [x1, y1] = extents.max();
        Self::new(linspace(x0, x1, x_count), linspace(y0, y1, y_count))
    }

    /// A lattice with `spacing` between points, covering the extents with any remainder split
    /// evenly on both sides.
    ///
    /// Along each axis the points are `min + k * spacing` for every `k` where that value is less
    /// than `max`, then shifted by half the gap left between the last point and `max`.
    pub fn centred(extents: Extents2, spacing: f64) -> Self {
        let [x0, y0] = extents.origin;
        let [x1, y1] = extents.max();
        Self::new(
            centred_range(x0, x1, spacing),
            centred_range(y0, y1, spacing),
        )
    }

    /// The number of points in the x-axis.
    pub fn x_count(&self) -> usize {
        self.xs.len()
    }

    /// The number of points in the y-axis.
    pub fn y_count(&self) -> usize {
        self.ys.len()
    }

    /// Total number of points, `x_count * y_count`.
    pub fn len(&self) -> usize {
        self.x_count() * self.y_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_xy(&self, x: usize, y: usize) -> Point2 {
        [self.xs[x], self.ys[y]]
    }

    pub fn idx(&self, x: usize, y: usize) -> u32 {
        if x >= self.x_count() {
            panic!("x value '{}' is outside lattice bounds", x);
        }
        if y >= self.y_count() {
            panic!("y value '{}' is outside lattice bounds", y);
        }

        (y * self.x_count() + x) as u32
    }

    /// All points, row-first.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point2> + '_ {
        let n = self.len();
        let stride = self.x_count().max(1);
        (0..n).map(move |i| self.get_xy(i % stride, i / stride))
    }

    /// The `(x, y)` location of the lower-left corner of each cell.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let xn = self.x_count().saturating_sub(1);
        let yn = self.y_count().saturating_sub(1);
        (0..xn).flat_map(move |x| (0..yn).map(move |y| (x, y)))
    }

    /// Split each cell along its rising diagonal into two triangles, both counter-clockwise.
    ///
    /// Yields `2 * (x_count - 1) * (y_count - 1)` faces.
    pub fn triangulate(&self) -> Vec<Face> {
        let mut faces = Vec::with_capacity(self.len() * 2);
        for (x, y) in self.cells() {
            let p1 = self.idx(x, y);
            let p2 = self.idx(x + 1, y);
            let p3 = self.idx(x + 1, y + 1);
            let p4 = self.idx(x, y + 1);
            faces.push((p1, p2, p3)); // lower right
            faces.push((p1, p3, p4)); // upper left
        }
        faces
    }
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        stop // exact end point
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

fn centred_range(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    if !(spacing > 0.0) || !(max > min) {
        return vec![min];
    }

    let count = ((max - min) / spacing).ceil() as usize;
    let mut xs = (0..count)
        .map(|k| min + spacing * k as f64)
        .filter(|&x| x < max)
        .collect::<Vec<_>>();
    let shift = (max - xs.last().copied().unwrap_or(min)) * 0.5;
    xs.iter_mut().for_each(|x| *x += shift);
    xs
}
