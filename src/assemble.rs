//! Finite element assembly over a [`Mesh`](crate::Mesh).
//!
//! Global matrices and vectors are built by evaluating an element _kernel_ on each element (a
//! [`Face`] in the interior or an [`Edge`] on the boundary) and summing the local contributions
//! into the rows and columns of the element's vertices.
//!
//! Each vertex only couples to its neighbours, so global matrices are sparse ([`CsrMatrix`]).
//! The kernels here are for linear (P1) shape functions.
use crate::*;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use rayon::prelude::*;

/// A scalar function of position.
///
/// Kernels are evaluated in parallel so the function must be `Sync`.
pub type ScalarFn<'a> = &'a (dyn Fn(Point2) -> f64 + Sync);

/// The constant function `1`, for assembling without a coefficient.
pub fn one(_: Point2) -> f64 {
    1.0
}

/// An element of the mesh, such as a face or a boundary edge.
pub trait Element: Copy + Send + Sync {
    type Nodes: AsRef<[u32]> + Send;

    /// The vertex indices of the element.
    fn nodes(self) -> Self::Nodes;
}

impl Element for Face {
    type Nodes = [u32; 3];
    fn nodes(self) -> Self::Nodes {
        let (a, b, c) = self;
        [a, b, c]
    }
}

impl Element for Edge {
    type Nodes = [u32; 2];
    fn nodes(self) -> Self::Nodes {
        [self.0, self.1]
    }
}

fn element_points<E: Element>(points: &[Point2], e: E) -> (E::Nodes, Vec<Point2>) {
    let nodes = e.nodes();
    let pts = nodes.as_ref().iter().map(|&i| points[i as usize]).collect();
    (nodes, pts)
}

/// Assemble a global sparse `N × N` matrix, where `N` is the number of points.
///
/// `kernel` receives the element's points and `coefficient`, and returns the local matrix with
/// one row and column per element node. Entries landing on the same position are summed.
pub fn assemble_matrix<E, K>(
    points: &[Point2],
    elements: &[E],
    kernel: K,
    coefficient: ScalarFn,
) -> CsrMatrix<f64>
where
    E: Element,
    K: Fn(&[Point2], ScalarFn) -> DMatrix<f64> + Sync,
{
    let n = points.len();
    let locals = elements
        .par_iter()
        .map(|&e| {
            let (nodes, pts) = element_points(points, e);
            (nodes, kernel(&pts, coefficient))
        })
        .collect::<Vec<_>>();

    let mut coo = CooMatrix::new(n, n);
    for (nodes, local) in locals {
        let nodes = nodes.as_ref();
        for (i, &gi) in nodes.iter().enumerate() {
            for (j, &gj) in nodes.iter().enumerate() {
                coo.push(gi as usize, gj as usize, local[(i, j)]);
            }
        }
    }

    CsrMatrix::from(&coo)
}

/// Assemble a global vector of length `N`, where `N` is the number of points.
///
/// `kernel` receives the element's points and `function`, and returns the local vector with one
/// entry per element node.
pub fn assemble_vector<E, K>(
    points: &[Point2],
    elements: &[E],
    kernel: K,
    function: ScalarFn,
) -> DVector<f64>
where
    E: Element,
    K: Fn(&[Point2], ScalarFn) -> DVector<f64> + Sync,
{
    let locals = elements
        .par_iter()
        .map(|&e| {
            let (nodes, pts) = element_points(points, e);
            (nodes, kernel(&pts, function))
        })
        .collect::<Vec<_>>();

    let mut global = DVector::zeros(points.len());
    for (nodes, local) in locals {
        for (i, &gi) in nodes.as_ref().iter().enumerate() {
            global[gi as usize] += local[i];
        }
    }

    global
}

fn tri(pts: &[Point2]) -> Tri {
    [pts[0], pts[1], pts[2]]
}

fn edge_length(pts: &[Point2]) -> f64 {
    pts[1].sub(pts[0]).mag()
}

/// `∫ c φᵢ φⱼ` over a triangle, with `c` taken at the centroid.
pub fn element_mass_matrix(pts: &[Point2], coefficient: ScalarFn) -> DMatrix<f64> {
    let t = tri(pts);
    let [a, b, c] = t;
    let scale = tri_area(a, b, c) / 12.0 * coefficient(mean(t));
    DMatrix::from_fn(3, 3, |i, j| if i == j { 2.0 } else { 1.0 }) * scale
}

/// `∫ c ∇φᵢ · ∇φⱼ` over a triangle, with `c` taken at the centroid.
///
/// Does not depend on the winding of the triangle.
pub fn element_stiffness_matrix(pts: &[Point2], coefficient: ScalarFn) -> DMatrix<f64> {
    let t = tri(pts);
    let [a, b, c] = t;
    let twice_area = 2.0 * tri_area_signed(a, b, c);

    // the gradient of each shape function is the opposite side rotated a quarter turn
    let grads = [(b, c), (c, a), (a, b)].map(|(p, q)| {
        let [x, y] = q.sub(p);
        [-y / twice_area, x / twice_area]
    });

    let scale = twice_area.abs() * 0.5 * coefficient(mean(t));
    DMatrix::from_fn(3, 3, |i, j| {
        let [gx, gy] = grads[i];
        let [hx, hy] = grads[j];
        (gx * hx + gy * hy) * scale
    })
}

/// `∫ f φᵢ` over a triangle, with `f` sampled at the vertices.
pub fn element_load_vector(pts: &[Point2], function: ScalarFn) -> DVector<f64> {
    let [a, b, c] = tri(pts);
    let area = tri_area(a, b, c);
    DVector::from_iterator(3, [a, b, c].into_iter().map(|p| area / 3.0 * function(p)))
}

/// `∫ w φᵢ φⱼ` along a boundary edge, with `w` taken at the midpoint.
pub fn element_boundary_mass_matrix(pts: &[Point2], coefficient: ScalarFn) -> DMatrix<f64> {
    let scale = edge_length(pts) / 6.0 * coefficient(mean([pts[0], pts[1]]));
    DMatrix::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 1.0 }) * scale
}

/// `∫ g φᵢ` along a boundary edge, with `g` sampled at the end points.
pub fn element_boundary_load_vector(pts: &[Point2], function: ScalarFn) -> DVector<f64> {
    let half = edge_length(pts) * 0.5;
    DVector::from_iterator(2, pts[..2].iter().map(|&p| half * function(p)))
}
