//! Triangular meshes in the plane, and a finite-element heat solver that runs on them.
//!
//! The usual flow is: a [`Mesher`] produces a [`Mesh`], a [`BaseSolver`] assembles the mass and
//! stiffness matrices for it, and a [`HeatSolver`] advances a scalar field through time.
//!
//! ```rust
//! use femesh::*;
//!
//! let mesh = RectMesher::new([[0.0, 0.0], [2.0, 1.0]], (5, 3)).unwrap().mesh().unwrap();
//! let mut solver = HeatSolver::new(mesh, HeatSolverConfig::default()).unwrap();
//!
//! let u0 = vec![1.0; solver.mesh().point_len()];
//! let result = solver.solve(&u0, None, None).unwrap();
//! assert_eq!(result.t_values.len(), 11);
//! ```
use rustc_hash::FxHashMap as HashMap;
use rustc_hash::FxHashSet as HashSet;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod assemble;
mod error;
mod extents;
#[cfg(feature = "io")]
pub mod io;
mod lattice;
mod mesh;
mod mesher;
mod point;
pub mod polygon;
mod solver;

pub use error::*;
pub use extents::*;
pub use lattice::*;
pub use mesh::*;
pub use mesher::*;
pub use point::*;
pub use polygon::*;
pub use solver::*;

pub trait Envelops<O> {
    fn envelops(&self, object: O) -> bool;
}

/// The axis aligned bounding box of an object.
pub trait Aabb {
    fn aabb(&self) -> Extents2;
}

/// Area can be calculated from an object.
///
/// Note that area is contextual from the object.
/// For instance, a [`Polygon2`] would be the area enclosed by the outline, a [`Mesh`] would be the
/// summed area of its faces.
pub trait Area {
    /// Calculate the area of an object.
    fn area(&self) -> f64;
}

/// A 2x1 rectangle, split 4x2, with the boundary recovered from the faces.
#[cfg(test)]
fn dummy_mesh() -> Mesh {
    RectMesher::new([[0.0, 0.0], [2.0, 1.0]], (5, 3))
        .and_then(|m| m.mesh())
        .expect("valid rectangle")
}

/// Rect mesher resolutions which are kept small enough for property tests.
#[cfg(test)]
#[derive(Clone, Debug)]
struct SmallResolution(pub usize, pub usize);

#[cfg(test)]
impl quickcheck::Arbitrary for SmallResolution {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let nx = <usize as quickcheck::Arbitrary>::arbitrary(g) % 9 + 2;
        let ny = <usize as quickcheck::Arbitrary>::arbitrary(g) % 9 + 2;
        Self(nx, ny)
    }
}
