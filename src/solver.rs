use crate::assemble::*;
use crate::*;
use nalgebra::DMatrix;
use nalgebra_sparse::{factorization::CscCholesky, CscMatrix, CsrMatrix};

/// Time stepping settings for the [`HeatSolver`].
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeatSolverConfig {
    /// The time step.
    pub dt: f64,
    /// The number of steps taken by [`HeatSolver::solve`].
    pub num_iterations: usize,
}

impl Default for HeatSolverConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            num_iterations: 10,
        }
    }
}

impl HeatSolverConfig {
    fn validate(self) -> Result<Self> {
        if self.dt > 0.0 && self.dt.is_finite() {
            Ok(self)
        } else {
            Err(Error::TimeStep(self.dt))
        }
    }
}

/// A mesh along with its assembled (sparse) mass and stiffness matrices.
///
/// Assembly is the expensive part of setting up a solver, so the matrices can be built once and
/// handed to several solvers.
#[derive(Clone, Debug)]
pub struct BaseSolver {
    mesh: Mesh,
    mass: CsrMatrix<f64>,
    stiffness: CsrMatrix<f64>,
}

impl BaseSolver {
    /// Assemble the mass matrix `M` and the stiffness matrix `K` (unit diffusivity) of the mesh.
    pub fn new(mesh: Mesh) -> Self {
        let (points, faces) = (mesh.points(), mesh.faces());
        let mass = assemble_matrix(points, faces, element_mass_matrix, &one);
        let stiffness = assemble_matrix(points, faces, element_stiffness_matrix, &one);
        log::debug!("assembled {0}x{0} mass and stiffness matrices", points.len());

        Self {
            mesh,
            mass,
            stiffness,
        }
    }

    /// Use matrices which were computed elsewhere.
    ///
    /// The matrices must have been assembled for _this_ mesh. Only their shape is checked.
    pub fn with_matrices(
        mesh: Mesh,
        mass: CsrMatrix<f64>,
        stiffness: CsrMatrix<f64>,
    ) -> Result<Self> {
        let n = mesh.point_len();
        for (name, m) in [("mass", &mass), ("stiffness", &stiffness)] {
            let (rows, cols) = (m.nrows(), m.ncols());
            if rows != n || cols != n {
                return Err(Error::MatrixShape {
                    name,
                    rows,
                    cols,
                    n,
                });
            }
        }

        Ok(Self {
            mesh,
            mass,
            stiffness,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mass(&self) -> &CsrMatrix<f64> {
        &self.mass
    }

    pub fn stiffness(&self) -> &CsrMatrix<f64> {
        &self.stiffness
    }
}

/// A generalised boundary condition, where the outward flux is `W (g_D - u) + g_N`.
///
/// A large `W` pushes `u` towards `g_D` (Dirichlet-like), `W = 0` leaves a pure flux `g_N`
/// (Neumann).
#[derive(Copy, Clone)]
pub struct RobinBc<'a> {
    /// `W`
    pub coefficient: ScalarFn<'a>,
    /// `g_D`
    pub target: ScalarFn<'a>,
    /// `g_N`
    pub flux: ScalarFn<'a>,
}

/// The recorded time series of a [`HeatSolver::solve`] run.
#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct HeatSolverResult {
    /// Time of each sample, starting at zero.
    pub t_values: Vec<f64>,
    /// Vertex values at each sample, starting with the initial condition.
    pub u_values: Vec<Vec<f64>>,
}

/// Solves the heat equation `u_t = Δu + f` with backward Euler time stepping.
///
/// Without a boundary condition the boundary is insulated (no flux).
#[derive(Clone, Debug)]
pub struct HeatSolver {
    base: BaseSolver,
    config: HeatSolverConfig,
    result: Option<HeatSolverResult>,
}

impl HeatSolver {
    pub fn new(mesh: Mesh, config: HeatSolverConfig) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self::from_parts(BaseSolver::new(mesh), config))
    }

    /// Reuse the matrices already assembled for a mesh.
    pub fn from_base_solver(base: BaseSolver, config: HeatSolverConfig) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self::from_parts(base, config))
    }

    fn from_parts(base: BaseSolver, config: HeatSolverConfig) -> Self {
        Self {
            base,
            config,
            result: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        self.base.mesh()
    }

    pub fn base(&self) -> &BaseSolver {
        &self.base
    }

    pub fn config(&self) -> HeatSolverConfig {
        self.config
    }

    /// The result of the last successful [`HeatSolver::solve`].
    pub fn result(&self) -> Option<&HeatSolverResult> {
        self.result.as_ref()
    }

    /// Advance `u_initial` by `num_iterations` steps of `dt`.
    ///
    /// Each step solves `(M + dt K) u' = M u + dt b`, where `b` is the assembled
    /// `load_function` (zero if not given). A `robin_bc` adds its boundary mass to `K` and its
    /// boundary load to `b`.
    ///
    /// `M + dt K` is symmetric positive definite as long as the Robin coefficient is not negative,
    /// so it is Cholesky factorised once and reused for every step. If the factorisation fails, or
    /// a step produces a non-finite value, the solve fails with [`Error::SingularSystem`] and no
    /// result is kept.
    pub fn solve(
        &mut self,
        u_initial: &[f64],
        robin_bc: Option<RobinBc>,
        load_function: Option<ScalarFn>,
    ) -> Result<&HeatSolverResult> {
        self.result = None;

        let mesh = self.base.mesh();
        let n = mesh.point_len();
        if u_initial.len() != n {
            return Err(Error::FieldLength {
                expected: n,
                found: u_initial.len(),
            });
        }

        let HeatSolverConfig { dt, num_iterations } = self.config;
        let (points, faces) = (mesh.points(), mesh.faces());

        let zero = |_: Point2| 0.0;
        let load: ScalarFn = load_function.unwrap_or(&zero);
        let mut b = assemble_vector(points, faces, element_load_vector, load);
        let mass = &self.base.mass;
        let mut lhs = mass + &(&self.base.stiffness * dt);

        if let Some(RobinBc {
            coefficient,
            target,
            flux,
        }) = robin_bc
        {
            let boundary = mesh.boundary();
            let g = |p: Point2| coefficient(p) * target(p) + flux(p);
            let r = assemble_matrix(points, boundary, element_boundary_mass_matrix, coefficient);
            lhs = &lhs + &(&r * dt);
            b += assemble_vector(points, boundary, element_boundary_load_vector, &g);
        }

        let b = DMatrix::from_column_slice(n, 1, (b * dt).as_slice());

        let mut t_values = Vec::with_capacity(num_iterations + 1);
        let mut u_values = Vec::with_capacity(num_iterations + 1);

        let mut u = DMatrix::from_column_slice(n, 1, u_initial);
        t_values.push(0.0);
        u_values.push(u_initial.to_vec());
        log_progress(mesh, 0.0, u_initial)?;

        if num_iterations > 0 {
            let chol = CscCholesky::factor(&CscMatrix::from(&lhs)).map_err(|e| {
                log::debug!("factorising the step matrix failed: {:?}", e);
                Error::SingularSystem { step: 1 }
            })?;

            for i in 1..=num_iterations {
                let rhs = mass * &u + &b;
                u = chol.solve(&rhs);
                if !u.iter().all(|x| x.is_finite()) {
                    return Err(Error::SingularSystem { step: i });
                }

                let t = dt * i as f64;
                log_progress(mesh, t, u.as_slice())?;
                t_values.push(t);
                u_values.push(u.as_slice().to_vec());
            }
        }

        Ok(&*self.result.insert(HeatSolverResult { t_values, u_values }))
    }
}

fn log_progress(mesh: &Mesh, t: f64, u: &[f64]) -> Result<()> {
    if log::log_enabled!(log::Level::Info) {
        let mean = mesh.calculate_mean_value(Field::Vertices(u))?;
        log::info!("t = {:.3}, mean temp = {:.3}", t, mean);
    }
    Ok(())
}
