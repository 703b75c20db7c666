use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while building meshes or running solvers.
///
/// Geometry and configuration errors are raised before any work is done; numerical errors stop
/// the computation they occur in.
#[derive(Debug, Error)]
pub enum Error {
    // ###### GEOMETRY ##########################################################
    #[error("vertex index {index} is out of range for {len} points")]
    IndexOutOfRange { index: u32, len: usize },

    #[error("face {face} is degenerate (area {area:e})")]
    DegenerateFace { face: usize, area: f64 },

    #[error("edge ({0}, {1}) is shared by more than two faces")]
    NonManifoldEdge(u32, u32),

    #[error("boundary edge ({0}, {1}) does not join two distinct vertices")]
    DegenerateBoundary(u32, u32),

    #[error("boundary edge ({0}, {1}) is not an edge of exactly one face")]
    InteriorBoundaryEdge(u32, u32),

    #[error("field has {found} values, expecting {expected}")]
    FieldLength { expected: usize, found: usize },

    // ###### CONFIGURATION #####################################################
    #[error("resolution ({0}, {1}) needs at least 2 points along each axis")]
    Resolution(usize, usize),

    #[error("invalid polygon: {0}")]
    InvalidPolygon(&'static str),

    #[error("domain has no area")]
    EmptyDomain,

    #[error("outline polygon intersects itself")]
    NonSimplePolygon,

    #[error("approximate triangle count must be non-zero")]
    ApproxTriangles,

    #[error("mesh has no faces")]
    EmptyMesh,

    #[error("time step must be positive and finite, found {0}")]
    TimeStep(f64),

    #[error("{name} matrix is {rows}x{cols}, expecting {n}x{n}")]
    MatrixShape {
        name: &'static str,
        rows: usize,
        cols: usize,
        n: usize,
    },

    // ###### NUMERICAL #########################################################
    #[error("linear system is singular or gave non-finite values at time step {step}")]
    SingularSystem { step: usize },

    // ###### IO ################################################################
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed data: {0}")]
    Parse(String),
}
