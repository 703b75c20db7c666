use crate::*;
use rayon::prelude::*;

/// Something which can produce a [`Mesh`].
pub trait Mesher {
    fn mesh(&self) -> Result<Mesh>;
}

/// Creates an approximately uniform mesh of a given outline.
///
/// A square lattice is laid over the outline's bounding box and split into right triangles.
/// Triangles which stray outside the outline are removed. The triangle count and how closely
/// the mesh follows sharp or concave features of the outline are best effort.
#[derive(Clone, Debug, PartialEq)]
pub struct EasyMesher {
    outline: Polygon2,
    approx_triangles: usize,
    dx: f64,
}

impl EasyMesher {
    pub const DEFAULT_TRIANGLES: usize = 100;

    /// The outline must be a simple polygon with some area.
    pub fn new(outline: Polygon2, approx_triangles: usize) -> Result<Self> {
        if approx_triangles == 0 {
            return Err(Error::ApproxTriangles);
        }
        if !outline.is_simple() {
            return Err(Error::NonSimplePolygon);
        }
        let area = outline.area();
        if !(area > 0.0) {
            return Err(Error::EmptyDomain);
        }

        // a lattice of dx spacing over the area gives 2 triangles per dx²
        let dx = (2.0 * area / approx_triangles as f64).sqrt();

        Ok(Self {
            outline,
            approx_triangles,
            dx,
        })
    }

    pub fn outline(&self) -> &Polygon2 {
        &self.outline
    }

    /// The lattice spacing.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Test that the face, half way in from each corner towards its centre, is inside the
    /// outline.
    fn keep(&self, tri: Tri) -> bool {
        let centre = mean(tri);
        tri.into_iter()
            .map(|p| centre.add(p).scale(0.5))
            .all(|p| self.outline.envelops(p))
    }
}

impl Mesher for EasyMesher {
    fn mesh(&self) -> Result<Mesh> {
        let lattice = Lattice::centred(self.outline.extents(), self.dx);
        log::debug!(
            "easy meshing with {}x{} lattice, dx = {}",
            lattice.x_count(),
            lattice.y_count(),
            self.dx
        );

        let points = lattice.points().collect::<Vec<_>>();
        let faces = lattice.triangulate();
        let total = faces.len();

        let faces = faces
            .into_par_iter()
            .filter(|&(a, b, c)| {
                self.keep([
                    points[a as usize],
                    points[b as usize],
                    points[c as usize],
                ])
            })
            .collect::<Vec<_>>();
        log::debug!("removed {} of {} faces", total - faces.len(), total);

        if faces.is_empty() {
            return Err(Error::EmptyMesh);
        }
        if faces.len() * 2 < self.approx_triangles {
            log::warn!(
                "outline produced {} triangles, approximately {} requested",
                faces.len(),
                self.approx_triangles
            );
        }

        let (points, faces) = compact(points, faces);
        Mesh::from_faces(points, faces)
    }
}

/// Creates a structured mesh of a rectangle.
///
/// ```rust
/// # use femesh::*;
/// let mesh = RectMesher::new([[0.0, 0.0], [2.0, 1.0]], (3, 3)).unwrap().mesh().unwrap();
/// assert_eq!(mesh.point_len(), 9);
/// assert_eq!(mesh.face_len(), 8);
/// assert_eq!(mesh.boundary().len(), 8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectMesher {
    extents: Extents2,
    resolution: (usize, usize),
}

impl RectMesher {
    /// `corners` are two opposite corners of the rectangle, `resolution` is the number of
    /// points along the x and y axis.
    pub fn new(corners: [Point2; 2], resolution: (usize, usize)) -> Result<Self> {
        let (nx, ny) = resolution;
        if nx < 2 || ny < 2 {
            return Err(Error::Resolution(nx, ny));
        }
        let [a, b] = corners;
        let extents = Extents2::from_min_max(a, b);
        if !(extents.area() > 0.0) {
            return Err(Error::EmptyDomain);
        }

        Ok(Self {
            extents,
            resolution,
        })
    }

    pub fn extents(&self) -> Extents2 {
        self.extents
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.resolution
    }
}

impl Mesher for RectMesher {
    fn mesh(&self) -> Result<Mesh> {
        let (nx, ny) = self.resolution;
        let lattice = Lattice::spanning(self.extents, nx, ny);
        Mesh::from_faces(lattice.points().collect(), lattice.triangulate())
    }
}

/// Remove points which are not used by any face, renumbering the faces to match.
///
/// The kept points stay in their original order.
///
/// # Panics
/// Panics if a face refers to a point outside `points`.
pub fn compact(points: Vec<Point2>, mut faces: Vec<Face>) -> (Vec<Point2>, Vec<Face>) {
    let len = points.len();
    let mut used = vec![false; len];
    for &(a, b, c) in &faces {
        used[a as usize] = true;
        used[b as usize] = true;
        used[c as usize] = true;
    }

    let mut map = vec![0u32; len];
    let mut kept = Vec::with_capacity(used.iter().filter(|&&x| x).count());
    for (i, p) in points.into_iter().enumerate() {
        if used[i] {
            map[i] = kept.len() as u32;
            kept.push(p);
        }
    }

    for f in faces.iter_mut() {
        *f = (map[f.0 as usize], map[f.1 as usize], map[f.2 as usize]);
    }

    (kept, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle(w: f64, h: f64) -> Polygon2 {
        Polygon2::new([[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]]).unwrap()
    }

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

    fn no_orphans(m: &Mesh) -> bool {
        let mut used = vec![false; m.point_len()];
        for &(a, b, c) in m.faces() {
            used[a as usize] = true;
            used[b as usize] = true;
            used[c as usize] = true;
        }
        used.into_iter().all(|x| x)
    }

    #[test]
    fn rect_mesher_3x3() {
        let m = RectMesher::new([[0.0, 0.0], [2.0, 1.0]], (3, 3))
            .unwrap()
            .mesh()
            .unwrap();
        assert_eq!(m.point_len(), 9);
        assert_eq!(m.face_len(), 8);
        assert_eq!(m.points()[4], [1.0, 0.5]);

        let mut b = m.boundary().iter().map(|e| e.ord()).collect::<Vec<_>>();
        b.sort_unstable();
        assert_eq!(
            b,
            vec![
                Edge(0, 1),
                Edge(0, 3),
                Edge(1, 2),
                Edge(2, 5),
                Edge(3, 6),
                Edge(5, 8),
                Edge(6, 7),
                Edge(7, 8),
            ]
        );
        assert_eq!(m.boundary_idxs(), &[0, 1, 2, 3, 5, 6, 7, 8]);
        assert!((m.total_area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rect_mesher_corner_order() {
        let a = RectMesher::new([[2.0, 1.0], [0.0, 0.0]], (4, 3)).unwrap();
        let b = RectMesher::new([[0.0, 0.0], [2.0, 1.0]], (4, 3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rect_mesher_rejects_degenerate() {
        assert!(matches!(
            RectMesher::new([[0.0, 0.0], [1.0, 1.0]], (1, 5)),
            Err(Error::Resolution(1, 5))
        ));
        assert!(matches!(
            RectMesher::new([[0.0, 0.0], [1.0, 1.0]], (5, 0)),
            Err(Error::Resolution(5, 0))
        ));
        assert!(matches!(
            RectMesher::new([[0.0, 0.0], [1.0, 0.0]], (5, 5)),
            Err(Error::EmptyDomain)
        ));
    }

    #[quickcheck]
    fn rect_mesher_counts(res: SmallResolution) -> bool {
        let SmallResolution(nx, ny) = res;
        let m = RectMesher::new([[0.0, 0.0], [1.0, 2.0]], (nx, ny))
            .unwrap()
            .mesh()
            .unwrap();
        m.point_len() == nx * ny
            && m.face_len() == 2 * (nx - 1) * (ny - 1)
            && m.boundary().len() == 2 * (nx - 1) + 2 * (ny - 1)
            && (m.total_area() - 2.0).abs() < 1e-9
    }

    #[test]
    fn easy_mesher_rectangle() {
        let mesher = EasyMesher::new(rectangle(3.0, 1.0), 500).unwrap();
        assert!((mesher.dx() - (6.0f64 / 500.0).sqrt()).abs() < 1e-12);

        let m = mesher.mesh().unwrap();
        // 28 x 10 lattice, nothing is culled
        assert_eq!(m.point_len(), 280);
        assert_eq!(m.face_len(), 486);
        assert!(no_orphans(&m));
        assert!(m.total_area() < 3.0);

        let e = m.aabb();
        let gap_left = e.origin[0];
        let gap_right = 3.0 - e.max()[0];
        assert!((gap_left - gap_right).abs() < 1e-9);
    }

    #[test]
    fn easy_mesher_concave() {
        let outline = l_shape();
        let mesher = EasyMesher::new(outline.clone(), 300).unwrap();
        let m = mesher.mesh().unwrap();

        assert!(no_orphans(&m));
        assert!(m.total_area() < outline.area());
        assert!(m.total_area() > outline.area() * 0.7);
        assert!(m.tris().all(|t| mesher.keep(t)));
        // nothing in the notch
        assert!(m.tris().all(|t| !Extents2::from_rect(1.0, 1.0, 2.0, 2.0).envelops(mean(t))));

        // a single closed outline
        let outlines = m.outlines();
        assert_eq!(outlines.len(), 1);
        let b = Polygon2::new(outlines[0].iter().map(|&i| m.points()[i as usize])).unwrap();
        assert!((b.area() - m.total_area()).abs() < 1e-9);
    }

    #[test]
    fn easy_mesher_rejections() {
        assert!(matches!(
            EasyMesher::new(rectangle(1.0, 1.0), 0),
            Err(Error::ApproxTriangles)
        ));

        let bowtie = Polygon2::new([[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert!(matches!(
            EasyMesher::new(bowtie, 100),
            Err(Error::NonSimplePolygon)
        ));

        let flat = Polygon2::new([[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]).unwrap();
        assert!(EasyMesher::new(flat, 100).is_err());

        // the lattice is a single point
        let m = EasyMesher::new(rectangle(1.0, 1.0), 1).unwrap();
        assert!(matches!(m.mesh(), Err(Error::EmptyMesh)));
    }

    #[test]
    fn test_compact() {
        let points = vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [3.0, 2.0],
            [5.0, 4.0],
            [6.0, 7.0],
        ];
        let faces = vec![(1, 2, 3), (2, 3, 5)];

        let (points, faces) = compact(points, faces);
        assert_eq!(
            &points,
            &[[1.0, 0.0], [1.0, 1.0], [3.0, 2.0], [6.0, 7.0]]
        );
        assert_eq!(&faces, &[(0, 1, 2), (1, 2, 3)]);
    }
}
