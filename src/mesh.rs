use crate::*;
use rayon::prelude::*;
use std::sync::OnceLock;

/// A triangle, as three indices into the mesh points.
pub type Face = (u32, u32, u32);

/// A triangle represented by its 3 points.
pub type Tri = [Point2; 3];

/// A pair of vertex indices.
///
/// Boundary edges are _directed_, following the orientation of the face they belong to.
/// Mesh edges are _undirected_ and stored [ordered](Edge::ord), smaller index first.
#[derive(PartialEq, Eq, Copy, Clone, Debug, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Edge(pub u32, pub u32);

impl Edge {
    /// The same edge with the smaller index first.
    #[inline(always)]
    pub fn ord(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            Edge(self.1, self.0)
        }
    }

    #[inline(always)]
    pub fn contains(&self, idx: u32) -> bool {
        self.0 == idx || self.1 == idx
    }

    #[inline(always)]
    fn as_u64(&self) -> u64 {
        ((self.0 as u64) << 32) | self.1 as u64
    }
}

impl From<(u32, u32)> for Edge {
    #[inline(always)]
    fn from((a, b): (u32, u32)) -> Self {
        Edge(a, b)
    }
}

#[allow(clippy::derived_hash_with_manual_eq)]
impl std::hash::Hash for Edge {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        hasher.write_u64(self.as_u64())
    }
}

/// The three sides of a face, directed as the face winds.
#[inline(always)]
pub fn face_edges((a, b, c): Face) -> [Edge; 3] {
    [Edge(a, b), Edge(b, c), Edge(c, a)]
}

/// A scalar field over a [`Mesh`], tagged with where its values live.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Field<'a> {
    /// One value per face, constant over the face.
    Faces(&'a [f64]),
    /// One value per vertex, linear over each face.
    Vertices(&'a [f64]),
}

/// The raw arrays a [`Mesh`] is built from.
#[derive(Debug, PartialEq, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MeshInfo {
    pub points: Vec<Point2>,
    pub faces: Vec<Face>,
    pub boundary: Vec<Edge>,
}

/// A triangle mesh in the plane, along with its boundary.
///
/// The mesh is immutable once built. Derived topology (edges, boundary vertices, face areas) is
/// computed on construction. The face neighbour map is computed on first request and kept.
///
/// `PartialEq` compares the points, faces, and boundary _exactly_, including their order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MeshInfo", into = "MeshInfo")]
pub struct Mesh {
    /// Each point's index is its identity.
    points: Vec<Point2>,
    /// Each _triangle_ is a triplet of indices back into `points`. Winding is not guaranteed
    /// to be consistent.
    faces: Vec<Face>,
    /// Directed edges on the perimeter.
    boundary: Vec<Edge>,

    /// Sorted, distinct indices of points on the boundary.
    boundary_idxs: Vec<u32>,
    /// Unsigned area of each face, aligned with `faces`.
    areas: Vec<f64>,
    /// Sorted, distinct, ordered edges of all faces.
    edges: Vec<Edge>,
    /// Neighbouring faces of each face, sorted. Built once, on first use.
    face_neighbors: OnceLock<Vec<Vec<u32>>>,
}

impl Mesh {
    /// Build a mesh, checking that:
    /// - every face and boundary index refers to a point,
    /// - every face has positive area,
    /// - no edge is shared by more than two faces,
    /// - every boundary edge is the edge of exactly one face.
    ///
    /// A mesh without faces is [`Error::EmptyMesh`].
    pub fn new(points: Vec<Point2>, faces: Vec<Face>, boundary: Vec<Edge>) -> Result<Self> {
        if faces.is_empty() {
            return Err(Error::EmptyMesh);
        }

        let len = points.len();
        let check = |index: u32| {
            if (index as usize) < len {
                Ok(())
            } else {
                Err(Error::IndexOutOfRange { index, len })
            }
        };

        for &(a, b, c) in &faces {
            check(a)?;
            check(b)?;
            check(c)?;
        }
        for &Edge(a, b) in &boundary {
            check(a)?;
            check(b)?;
            if a == b {
                return Err(Error::DegenerateBoundary(a, b));
            }
        }

        let areas = faces
            .par_iter()
            .map(|&f| face_tri(&points, f))
            .map(|[a, b, c]| tri_area(a, b, c))
            .collect::<Vec<_>>();
        if let Some((face, &area)) = areas.iter().enumerate().find(|(_, a)| !(**a > 0.0)) {
            return Err(Error::DegenerateFace { face, area });
        }

        let incidence = incidence(&faces);
        if let Some((e, _)) = incidence.iter().find(|(_, fs)| fs.len() > 2) {
            return Err(Error::NonManifoldEdge(e.0, e.1));
        }
        for &e in &boundary {
            if incidence.get(&e.ord()).map(Vec::len) != Some(1) {
                return Err(Error::InteriorBoundaryEdge(e.0, e.1));
            }
        }
        let mut edges = incidence.into_keys().collect::<Vec<_>>();
        edges.sort_unstable();

        let mut boundary_idxs = boundary
            .iter()
            .flat_map(|&Edge(a, b)| [a, b])
            .collect::<Vec<_>>();
        boundary_idxs.sort_unstable();
        boundary_idxs.dedup();

        log::debug!(
            "built mesh with {} points, {} faces, {} edges, {} boundary edges",
            len,
            faces.len(),
            edges.len(),
            boundary.len()
        );

        Ok(Self {
            points,
            faces,
            boundary,
            boundary_idxs,
            areas,
            edges,
            face_neighbors: OnceLock::new(),
        })
    }

    /// Build a mesh, recovering the boundary from the faces with [`boundary_from_faces`].
    pub fn from_faces(points: Vec<Point2>, faces: Vec<Face>) -> Result<Self> {
        let boundary = boundary_from_faces(&faces)?;
        Self::new(points, faces, boundary)
    }

    /// The three arrays the mesh was built from.
    pub fn get_info(&self) -> (&[Point2], &[Face], &[Edge]) {
        (&self.points, &self.faces, &self.boundary)
    }

    pub fn decompose(self) -> MeshInfo {
        let Self {
            points,
            faces,
            boundary,
            ..
        } = self;
        MeshInfo {
            points,
            faces,
            boundary,
        }
    }

    pub fn point_len(&self) -> usize {
        self.points.len()
    }

    pub fn face_len(&self) -> usize {
        self.faces.len()
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn boundary(&self) -> &[Edge] {
        &self.boundary
    }

    pub fn boundary_idxs(&self) -> &[u32] {
        &self.boundary_idxs
    }

    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn tris(&self) -> impl ExactSizeIterator<Item = Tri> + '_ {
        self.faces.iter().map(move |&f| face_tri(&self.points, f))
    }

    pub fn total_area(&self) -> f64 {
        self.areas.iter().sum()
    }

    /// Build a new mesh with each point moved by the matching displacement.
    ///
    /// The faces and boundary are reused, only the geometry changes.
    pub fn get_deformed_mesh(&self, displacement: &[Point2]) -> Result<Mesh> {
        if displacement.len() != self.point_len() {
            return Err(Error::FieldLength {
                expected: self.point_len(),
                found: displacement.len(),
            });
        }

        let points = self
            .points
            .iter()
            .zip(displacement)
            .map(|(p, d)| p.add(*d))
            .collect();
        Mesh::new(points, self.faces.clone(), self.boundary.clone())
    }

    /// The faces sharing a full edge with each face, indexed by face.
    ///
    /// The relation is symmetric and a face is never its own neighbour.
    /// Computed on the first call, later calls return the same map.
    pub fn calculate_face_neighbors(&self) -> &[Vec<u32>] {
        self.face_neighbors.get_or_init(|| {
            let mut map = vec![Vec::new(); self.faces.len()];
            for fs in incidence(&self.faces).into_values() {
                if let &[a, b] = fs.as_slice() {
                    if a != b {
                        map[a as usize].push(b);
                        map[b as usize].push(a);
                    }
                }
            }
            for ns in &mut map {
                ns.sort_unstable();
                ns.dedup();
            }
            map
        })
    }

    /// Edges with _both_ end points in `idxs`.
    ///
    /// With `exclude_corners` only edges running parallel to the x or y axis are returned. This
    /// picks out the straight runs of a rectangular boundary, skipping the diagonals which cut
    /// across its corners.
    pub fn get_edges_in_idxs<I>(&self, idxs: I, exclude_corners: bool) -> Vec<Edge>
    where
        I: IntoIterator<Item = u32>,
    {
        let set = idxs.into_iter().collect::<HashSet<_>>();
        self.edges
            .iter()
            .copied()
            .filter(|Edge(a, b)| set.contains(a) && set.contains(b))
            .filter(|&Edge(a, b)| {
                if !exclude_corners {
                    return true;
                }
                let [x1, y1] = self.points[a as usize];
                let [x2, y2] = self.points[b as usize];
                x1 == x2 || y1 == y2
            })
            .collect()
    }

    /// Boundary points which lie inside `rect` (inclusive).
    pub fn get_boundary_idxs_in_rect(&self, rect: Extents2) -> Vec<u32> {
        self.boundary_idxs
            .iter()
            .copied()
            .filter(|&i| rect.envelops(self.points[i as usize]))
            .collect()
    }

    /// Integrate a field over the mesh.
    ///
    /// Face values are weighted by the face area. Vertex values are treated as linear over each
    /// face, so each face contributes its area times the mean of its three vertex values.
    pub fn calculate_total_value(&self, u: Field) -> Result<f64> {
        let total = match u {
            Field::Faces(u) => {
                self.check_len(u, self.face_len())?;
                self.areas.iter().zip(u).map(|(a, u)| a * u).sum()
            }
            Field::Vertices(u) => {
                self.check_len(u, self.point_len())?;
                self.faces
                    .iter()
                    .zip(&self.areas)
                    .map(|(&(a, b, c), area)| {
                        area * (u[a as usize] + u[b as usize] + u[c as usize]) / 3.0
                    })
                    .sum()
            }
        };
        Ok(total)
    }

    /// [`Mesh::calculate_total_value`] divided by the mesh area.
    pub fn calculate_mean_value(&self, u: Field) -> Result<f64> {
        Ok(self.calculate_total_value(u)? / self.total_area())
    }

    fn check_len(&self, u: &[f64], expected: usize) -> Result<()> {
        if u.len() == expected {
            Ok(())
        } else {
            Err(Error::FieldLength {
                expected,
                found: u.len(),
            })
        }
    }

    /// Returns the boundary joined into loops of point indices.
    ///
    /// Each loop is closed, but the first index is _not_ repeated at the end.
    pub fn outlines(&self) -> Vec<Vec<u32>> {
        outline::get_outlines(self.boundary.clone())
            .into_iter()
            .map(|o| {
                let take = if o.len() > 1 && o.front() == o.back() {
                    o.len() - 1
                } else {
                    o.len()
                };
                o.into_iter().take(take).collect()
            })
            .collect()
    }
}

impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.get_info() == other.get_info()
    }
}

impl TryFrom<MeshInfo> for Mesh {
    type Error = Error;

    fn try_from(info: MeshInfo) -> Result<Self> {
        let MeshInfo {
            points,
            faces,
            boundary,
        } = info;
        Mesh::new(points, faces, boundary)
    }
}

impl From<Mesh> for MeshInfo {
    fn from(mesh: Mesh) -> Self {
        mesh.decompose()
    }
}

impl Area for Mesh {
    /// The summed area of the faces.
    fn area(&self) -> f64 {
        self.total_area()
    }
}

impl Aabb for Mesh {
    fn aabb(&self) -> Extents2 {
        self.points.iter().copied().collect()
    }
}

#[inline(always)]
fn face_tri(points: &[Point2], (a, b, c): Face) -> Tri {
    [
        points[a as usize],
        points[b as usize],
        points[c as usize],
    ]
}

/// Map each (ordered) edge to the faces it belongs to.
fn incidence(faces: &[Face]) -> HashMap<Edge, Vec<u32>> {
    let mut map: HashMap<Edge, Vec<u32>> =
        HashMap::with_capacity_and_hasher(faces.len() * 2, Default::default());
    for (i, &f) in faces.iter().enumerate() {
        for e in face_edges(f) {
            map.entry(e.ord()).or_default().push(i as u32);
        }
    }
    map
}

/// Recover the boundary of a triangulation: the edges which belong to exactly one face.
///
/// Edges keep the direction they have in their face, and are returned in face order.
/// An edge belonging to more than two faces is an error.
///
/// # Example
/// ```rust
/// # use femesh::*;
/// let b = boundary_from_faces(&[(0, 1, 2), (0, 2, 3)]).unwrap();
/// assert_eq!(b, vec![Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(3, 0)]);
/// ```
pub fn boundary_from_faces(faces: &[Face]) -> Result<Vec<Edge>> {
    let incidence = incidence(faces);
    if let Some((e, _)) = incidence.iter().find(|(_, fs)| fs.len() > 2) {
        return Err(Error::NonManifoldEdge(e.0, e.1));
    }

    Ok(faces
        .iter()
        .flat_map(|&f| face_edges(f))
        .filter(|e| incidence.get(&e.ord()).map(Vec::len) == Some(1))
        .collect())
}

mod outline {
    use super::*;
    use std::collections::VecDeque;

    fn join_edges(edges: &mut Vec<Edge>) -> VecDeque<u32> {
        // worst case is O(n²)
        let mut v = VecDeque::with_capacity(edges.len());
        match edges.pop() {
            Some(Edge(a, b)) => {
                v.push_back(a);
                v.push_back(b);
            }
            None => return v,
        }

        // the get algorithm uses swap_remove to linearly search through edges
        let mut get = |pos| {
            // search backwards, since swap_remove swaps in last element
            let i = edges.iter().rposition(|e| e.contains(pos))?;
            let Edge(a, b) = edges.swap_remove(i);
            Some(if a == pos { b } else { a })
        };

        // grow the back until the loop closes or runs out, then try the front
        loop {
            if v.len() > 2 && v.front() == v.back() {
                break;
            }
            let back = match v.back() {
                Some(&x) => x,
                None => break,
            };
            match get(back) {
                Some(x) => v.push_back(x),
                None => break,
            }
        }

        if v.front() != v.back() {
            while let Some(x) = v.front().copied().and_then(&mut get) {
                v.push_front(x);
            }
        }

        v
    }

    pub fn get_outlines(boundary: Vec<Edge>) -> Vec<VecDeque<u32>> {
        let mut edges = boundary;
        edges.reverse(); // pop from the back, so start from the first edge
        let mut v = Vec::new();

        while !edges.is_empty() {
            let shape = join_edges(&mut edges);
            v.push(shape);
        }

        v
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh {
        Mesh::from_faces(
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            vec![(0, 1, 2), (0, 2, 3)],
        )
        .unwrap()
    }

    #[test]
    fn derived_topology() {
        let m = square();
        assert_eq!(m.areas(), &[0.5, 0.5]);
        assert_eq!(
            m.edges(),
            &[Edge(0, 1), Edge(0, 2), Edge(0, 3), Edge(1, 2), Edge(2, 3)]
        );
        assert_eq!(m.boundary_idxs(), &[0, 1, 2, 3]);
        assert_eq!(
            m.boundary(),
            &[Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(3, 0)]
        );
    }

    #[test]
    fn edges_independent_of_order() {
        let a = square();
        let b = Mesh::from_faces(a.points().to_vec(), vec![(3, 2, 0), (2, 1, 0)]).unwrap();
        assert_eq!(a.edges(), b.edges());
        assert_eq!(a.boundary_idxs(), b.boundary_idxs());
    }

    #[test]
    fn rejects_out_of_range() {
        let pts = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        let x = Mesh::new(pts.clone(), vec![(0, 1, 3)], vec![]);
        assert!(matches!(x, Err(Error::IndexOutOfRange { index: 3, len: 3 })));

        let x = Mesh::new(pts, vec![(0, 1, 2)], vec![Edge(0, 7)]);
        assert!(matches!(x, Err(Error::IndexOutOfRange { index: 7, .. })));
    }

    #[test]
    fn rejects_degenerate_faces() {
        let pts = vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 1.0]];
        let x = Mesh::from_faces(pts.clone(), vec![(0, 1, 3), (0, 1, 2)]);
        assert!(matches!(x, Err(Error::DegenerateFace { face: 1, .. })));

        let x = Mesh::new(pts, vec![(0, 1, 3)], vec![Edge(1, 1)]);
        assert!(matches!(x, Err(Error::DegenerateBoundary(1, 1))));
    }

    #[test]
    fn rejects_boundary_off_the_rim() {
        let m = square();
        let (pts, faces, _) = m.get_info();
        let new = |b| Mesh::new(pts.to_vec(), faces.to_vec(), b);

        // the diagonal is shared by both faces
        assert!(matches!(
            new(vec![Edge(0, 1), Edge(0, 2)]),
            Err(Error::InteriorBoundaryEdge(0, 2))
        ));
        // not an edge at all
        assert!(matches!(
            new(vec![Edge(1, 3)]),
            Err(Error::InteriorBoundaryEdge(1, 3))
        ));
        // direction does not matter, and a partial boundary is fine
        assert!(new(vec![Edge(1, 0), Edge(3, 2)]).is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Mesh::new(vec![[0.0, 0.0]], vec![], vec![]),
            Err(Error::EmptyMesh)
        ));
        assert!(matches!(
            Mesh::from_faces(vec![], vec![]),
            Err(Error::EmptyMesh)
        ));
    }

    #[test]
    fn rejects_non_manifold() {
        let pts = vec![[0.0, 0.0], [1.0, 0.0], [0.5, 1.0], [0.5, -1.0], [2.0, 2.0]];
        let faces = vec![(0, 1, 2), (0, 1, 3), (1, 0, 4)];
        assert!(matches!(
            Mesh::from_faces(pts.clone(), faces.clone()),
            Err(Error::NonManifoldEdge(0, 1))
        ));
        assert!(matches!(
            Mesh::new(pts, faces, vec![]),
            Err(Error::NonManifoldEdge(0, 1))
        ));
    }

    #[test]
    fn face_neighbors_test() {
        let m = dummy_mesh();
        let n = m.calculate_face_neighbors();
        assert_eq!(n.len(), m.face_len());
        // first cell: the lower right tri touches its diagonal partner and the cell to the right,
        // the upper left tri touches its partner and the cell above
        assert_eq!(n[0], vec![1, 5]);
        assert_eq!(n[1], vec![0, 2]);
        // memoized
        assert!(std::ptr::eq(n, m.calculate_face_neighbors()));
    }

    #[quickcheck]
    fn face_neighbors_symmetric_irreflexive(res: SmallResolution) -> bool {
        let m = RectMesher::new([[0.0, 0.0], [1.0, 1.0]], (res.0, res.1))
            .and_then(|m| m.mesh())
            .unwrap();
        let n = m.calculate_face_neighbors();
        n.iter().enumerate().all(|(i, ns)| {
            ns.len() <= 3
                && ns.iter().all(|&j| j as usize != i)
                && ns.iter().all(|&j| n[j as usize].contains(&(i as u32)))
        })
    }

    #[quickcheck]
    fn edges_unique_and_complete(res: SmallResolution) -> bool {
        let m = RectMesher::new([[0.0, 0.0], [3.0, 1.0]], (res.0, res.1))
            .and_then(|m| m.mesh())
            .unwrap();
        let edges = m.edges();
        let set = edges.iter().copied().collect::<HashSet<_>>();
        set.len() == edges.len()
            && edges.iter().all(|e| e.0 < e.1)
            && m
                .faces()
                .iter()
                .flat_map(|&f| face_edges(f))
                .all(|e| set.contains(&e.ord()))
    }

    #[quickcheck]
    fn area_matches_outline(res: SmallResolution) -> bool {
        let m = RectMesher::new([[-1.0, 0.5], [2.0, 2.5]], (res.0, res.1))
            .and_then(|m| m.mesh())
            .unwrap();
        let outlines = m.outlines();
        let outline = Polygon2::new(outlines[0].iter().map(|&i| m.points()[i as usize])).unwrap();
        outlines.len() == 1 && (outline.area() - m.total_area()).abs() < 1e-9
    }

    #[test]
    fn deformed_mesh() {
        let m = dummy_mesh();
        let zeros = vec![[0.0, 0.0]; m.point_len()];
        assert_eq!(m.get_deformed_mesh(&zeros).unwrap(), m);

        let shift = vec![[1.0, 2.0]; m.point_len()];
        let d = m.get_deformed_mesh(&shift).unwrap();
        assert_eq!(d.faces(), m.faces());
        assert_eq!(d.boundary(), m.boundary());
        assert_eq!(d.points()[0], [1.0, 2.0]);
        assert!((d.total_area() - m.total_area()).abs() < 1e-12);

        assert!(matches!(
            m.get_deformed_mesh(&shift[1..]),
            Err(Error::FieldLength { .. })
        ));

        // collapsing every point onto one is not a mesh
        let collapse = m.points().iter().map(|p| p.scale(-1.0)).collect::<Vec<_>>();
        assert!(matches!(
            m.get_deformed_mesh(&collapse),
            Err(Error::DegenerateFace { .. })
        ));
    }

    #[test]
    fn info_round_trip() {
        let m = dummy_mesh();
        let (p, f, b) = m.get_info();
        let m2 = Mesh::new(p.to_vec(), f.to_vec(), b.to_vec()).unwrap();
        assert_eq!(m2.get_info(), m.get_info());
        assert_eq!(m2.edges(), m.edges());
        assert_eq!(m2.areas(), m.areas());
    }

    #[test]
    fn serde_round_trip() {
        let m = dummy_mesh();
        let s = serde_json::to_string(&m).unwrap();
        let m2: Mesh = serde_json::from_str(&s).unwrap();
        assert_eq!(m, m2);

        // invalid arrays are rejected on the way in
        let bad = r#"{"points":[[0,0],[1,0],[2,0]],"faces":[[0,1,2]],"boundary":[]}"#;
        assert!(serde_json::from_str::<Mesh>(bad).is_err());
    }

    #[test]
    fn edges_in_idxs() {
        let m = dummy_mesh();
        // the left column of the 5x3 lattice, plus the first cell's right hand points
        let idxs = [0, 1, 5, 6, 10];
        let edges = m.get_edges_in_idxs(idxs, false);
        assert_eq!(
            edges,
            vec![
                Edge(0, 1),
                Edge(0, 5),
                Edge(0, 6),
                Edge(1, 6),
                Edge(5, 6),
                Edge(5, 10)
            ]
        );

        // the cell diagonal is dropped
        let edges = m.get_edges_in_idxs(idxs, true);
        assert_eq!(
            edges,
            vec![Edge(0, 1), Edge(0, 5), Edge(1, 6), Edge(5, 6), Edge(5, 10)]
        );
    }

    #[test]
    fn boundary_idxs_in_rect() {
        let m = dummy_mesh();
        let left = m.get_boundary_idxs_in_rect(Extents2::from_rect(-0.1, -0.1, 0.1, 1.1));
        assert_eq!(left, vec![0, 5, 10]);

        // inclusive of the edges, interior point 6 is not on the boundary
        let x = m.get_boundary_idxs_in_rect(Extents2::from_rect(0.0, 0.0, 0.5, 0.5));
        assert_eq!(x, vec![0, 1, 5]);
    }

    #[test]
    fn total_and_mean_values() {
        let m = dummy_mesh();
        let on_faces = vec![3.0; m.face_len()];
        let on_verts = vec![3.0; m.point_len()];
        let a = m.calculate_total_value(Field::Faces(&on_faces)).unwrap();
        let b = m.calculate_total_value(Field::Vertices(&on_verts)).unwrap();
        assert!((a - 6.0).abs() < 1e-12);
        assert!((a - b).abs() < 1e-12);
        assert!((m.calculate_mean_value(Field::Vertices(&on_verts)).unwrap() - 3.0).abs() < 1e-12);

        // linear field u = x integrates exactly: mean x over [0,2]x[0,1] is 1
        let xs = m.points().iter().map(|p| p[0]).collect::<Vec<_>>();
        let mean = m.calculate_mean_value(Field::Vertices(&xs)).unwrap();
        assert!((mean - 1.0).abs() < 1e-12);

        assert!(matches!(
            m.calculate_total_value(Field::Faces(&on_verts)),
            Err(Error::FieldLength { .. })
        ));
    }

    #[test]
    fn aabb_test() {
        assert_eq!(dummy_mesh().aabb(), Extents2::from_rect(0.0, 0.0, 2.0, 1.0));
    }
}
