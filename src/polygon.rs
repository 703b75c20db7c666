use crate::*;

/// A closed outline. The last point joins back to the first.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon2(Vec<Point2>);

impl Polygon2 {
    pub fn new<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: ToPoint2,
    {
        let points = points.into_iter().map(ToPoint2::to_p2).collect::<Vec<_>>();
        if points.len() < 3 {
            Err(Error::InvalidPolygon(
                "polygon requires 3 or more points to be valid",
            ))
        } else if points.iter().flatten().any(|f| !f.is_finite()) {
            Err(Error::InvalidPolygon("polygon points must be finite"))
        } else {
            Ok(Polygon2(points))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pts(&self) -> &[Point2] {
        &self.0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point2> + DoubleEndedIterator + '_ {
        self.0.iter().copied()
    }

    /// The sides of the polygon, including the closing side.
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        segments(&self.0)
    }

    pub fn extents(&self) -> Extents2 {
        self.iter().collect()
    }

    /// Test that no two sides of the polygon cross or touch, other than neighbouring sides at
    /// their shared point.
    ///
    /// # Example
    /// ```rust
    /// # use femesh::*;
    /// let square = Polygon2::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap();
    /// assert!(square.is_simple());
    ///
    /// let bowtie = Polygon2::new([[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
    /// assert!(!bowtie.is_simple());
    /// ```
    pub fn is_simple(&self) -> bool {
        let sides = self.segments().collect::<Vec<_>>();
        let n = sides.len();
        for i in 0..n {
            for j in i + 1..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    // neighbours may only share their common point, test for folding back
                    let (a, b) = sides[i];
                    let (c, d) = sides[j];
                    let (shared, p, q) = if j == i + 1 { (b, a, d) } else { (a, b, c) };
                    if collinear_overlap(shared, p, q) {
                        return false;
                    }
                } else if segments_touch(sides[i], sides[j]) {
                    return false;
                }
            }
        }
        true
    }
}

impl Area for Polygon2 {
    /// 2D plan area.
    ///
    /// # Example
    /// ```rust
    /// use femesh::*;
    /// let p = Polygon2::new([
    ///     [0.0, 0.0],
    ///     [2.0, 0.0],
    ///     [2.0, 3.0],
    ///     [0.0, 3.0]
    /// ]).unwrap();
    ///
    /// assert!((p.area() - 6.0).abs() < 1e-3);
    /// ```
    fn area(&self) -> f64 {
        self.segments().map(|(a, b)| cross(a, b)).sum::<f64>().abs() * 0.5
    }
}

fn segments(ps: &[Point2]) -> impl Iterator<Item = (Point2, Point2)> + '_ {
    ps.iter()
        .copied()
        .zip(ps.iter().copied().cycle().skip(1))
        .take(ps.len())
}

/// Test if a point is on a line.
/// > 0 : p is left of line
/// = 0 : p is on line
/// < 0 : p is right of line
fn on((from, to): (Point2, Point2), p: Point2) -> f64 {
    cross(to.sub(from), p.sub(from))
}

/// `p` lies within the bounding box of segment `s`. Only meaningful if `p` is collinear with `s`.
fn within((a, b): (Point2, Point2), p: Point2) -> bool {
    Extents2::from_min_max(a, b).envelops(p)
}

fn segments_touch(s: (Point2, Point2), t: (Point2, Point2)) -> bool {
    let d1 = on(t, s.0);
    let d2 = on(t, s.1);
    let d3 = on(s, t.0);
    let d4 = on(s, t.1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within(t, s.0))
        || (d2 == 0.0 && within(t, s.1))
        || (d3 == 0.0 && within(s, t.0))
        || (d4 == 0.0 && within(s, t.1))
}

/// Two sides sharing `shared` and running to `p` and `q` fold back over each other.
fn collinear_overlap(shared: Point2, p: Point2, q: Point2) -> bool {
    let u = p.sub(shared);
    let v = q.sub(shared);
    cross(u, v) == 0.0 && u[0] * v[0] + u[1] * v[1] > 0.0
}

/// Test if a point is _inside_ a polygon, represented by a slice of points.
///
/// Uses a winding counting number test.
///
/// # Panics
/// Panics if the number of points is < 3.
pub fn point_inside<P, O>(ps: &[P], point: O) -> bool
where
    O: ToPoint2,
    for<'a> &'a P: ToPoint2,
{
    if ps.len() < 3 {
        panic!("requires at least 3 points to form a polygon");
    }

    let point = point.to_p2();
    let pts = ps.iter().map(ToPoint2::to_p2).collect::<Vec<_>>();

    let mut winding = 0;

    let pointy = point[1];
    for (from, to) in segments(&pts) {
        let fromy = from[1];
        let toy = to[1];
        if fromy <= pointy {
            if toy > pointy && on((from, to), point) > 0.0 {
                winding += 1;
            }
        } else if toy <= pointy && on((from, to), point) < 0.0 {
            winding -= 1;
        }
    }

    winding != 0
}

/// Test if point is _inside_ the polygon.
impl<O: ToPoint2> Envelops<O> for Polygon2 {
    fn envelops(&self, p: O) -> bool {
        point_inside(&self.0, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Polygon2 {
        Polygon2::new([
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ])
        .unwrap()
    }

    #[test]
    fn point_inside_testing() {
        let polygon = Polygon2::new([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]).unwrap();
        assert_eq!(polygon.envelops([0.5, 0.5]), true);
        assert_eq!(polygon.envelops([0.9, 0.9]), true);
        assert_eq!(polygon.envelops([0.9999999, 0.999999]), true);
        assert_eq!(polygon.envelops([0.00001, 0.00001]), true);
        assert_eq!(polygon.envelops([0.3, 0.1]), true);

        assert_eq!(polygon.envelops([-0.3, 0.1]), false);
        assert_eq!(polygon.envelops([0.3, -0.1]), false);
        assert_eq!(polygon.envelops([1.1, -0.1]), false);
        assert_eq!(polygon.envelops([1.1, 0.1]), false);
        assert_eq!(polygon.envelops([0.5, 1.1]), false);
        assert_eq!(polygon.envelops([0.5, -1.1]), false);
        assert_eq!(polygon.envelops([1.5, 1.1]), false);
    }

    #[test]
    fn point_inside_concave() {
        let p = l_shape();
        assert!(p.envelops([0.5, 1.5]));
        assert!(p.envelops([1.5, 0.5]));
        assert!(!p.envelops([1.5, 1.5]));
    }

    #[test]
    fn area_concave() {
        assert!((l_shape().area() - 3.0).abs() < 1e-12);
        // orientation does not matter
        let rev = Polygon2::new(l_shape().iter().rev()).unwrap();
        assert!((rev.area() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn too_few_points() {
        assert!(matches!(
            Polygon2::new([[0.0, 0.0], [1.0, 0.0]]),
            Err(Error::InvalidPolygon(_))
        ));
        assert!(Polygon2::new([[0.0, 0.0], [1.0, f64::NAN], [1.0, 1.0]]).is_err());
    }

    #[test]
    fn simple_polygons() {
        assert!(l_shape().is_simple());

        // touching at a vertex
        let p = Polygon2::new([
            [0.0, 0.0],
            [2.0, 0.0],
            [1.0, 1.0],
            [2.0, 2.0],
            [0.0, 2.0],
            [1.0, 1.0],
        ])
        .unwrap();
        assert!(!p.is_simple());

        // spike folding back on itself
        let p = Polygon2::new([[0.0, 0.0], [2.0, 0.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
        assert!(!p.is_simple());
    }

    #[test]
    fn extents_test() {
        assert_eq!(l_shape().extents(), Extents2::from_rect(0.0, 0.0, 2.0, 2.0));
    }
}
