use tracing::{debug, trace};

use crate::error::{Phase, Result, SolverError};
use crate::problem::LpProblem;
use crate::solution::{self, Solution};
use crate::tableau::{Tableau, TableauBuilder};

pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Two-phase simplex solver for a single validated [`LpProblem`].
///
/// Every call to [`Solver::solve`] rebuilds the tableau from the stored
/// problem, so repeated solves return the same result.
#[derive(Debug, Clone)]
pub struct Solver {
    problem: LpProblem,
    /// Maximum pivots across both phases before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Solver {
    pub fn new(problem: LpProblem) -> Self {
        Self {
            problem,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn problem(&self) -> &LpProblem {
        &self.problem
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Check the solver settings. Called by [`Solver::solve`] before any
    /// tableau work.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SolverError::InvalidInput(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Solve the LP using the two-phase simplex method
    pub fn solve(&self) -> Result<Solution> {
        self.validate()?;

        let tableau = TableauBuilder::new(&self.problem).build();
        let mut engine = SimplexEngine {
            tableau,
            iterations: 0,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        };

        // Phase 1: find an initial basic feasible solution
        if engine.tableau.has_artificial() {
            engine.phase_one()?;
        }

        // Phase 2: optimize
        engine.tableau.load_objective(self.problem.costs());
        engine.run(Phase::Two)?;

        debug!(iterations = engine.iterations, "found optimum");
        Ok(solution::extract(&engine.tableau, self.problem.sense(), engine.iterations))
    }
}

/// Result of a single step of the pivot loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotOutcome {
    Continue,
    Optimal,
    Unbounded,
    MaxIterationsReached,
}

struct SimplexEngine {
    tableau: Tableau,
    /// Pivots performed so far, shared by both phases
    iterations: usize,
    max_iterations: usize,
    tolerance: f64,
}

impl SimplexEngine {
    fn run(&mut self, phase: Phase) -> Result<()> {
        loop {
            match self.step() {
                PivotOutcome::Continue => {}
                PivotOutcome::Optimal => return Ok(()),
                PivotOutcome::Unbounded => return Err(SolverError::Unbounded { phase }),
                PivotOutcome::MaxIterationsReached => {
                    return Err(SolverError::MaxIterations {
                        limit: self.max_iterations,
                        phase,
                    });
                }
            }
        }
    }

    fn step(&mut self) -> PivotOutcome {
        let Some(col) = self.entering_column() else {
            return PivotOutcome::Optimal;
        };
        if self.iterations >= self.max_iterations {
            return PivotOutcome::MaxIterationsReached;
        }
        let Some((row, ratio)) = self.leaving_row(col) else {
            return PivotOutcome::Unbounded;
        };

        trace!(
            iteration = self.iterations + 1,
            entering = col,
            leaving = self.tableau.basis[row],
            row,
            ratio,
            "pivot"
        );
        self.tableau.pivot(row, col);
        self.iterations += 1;
        PivotOutcome::Continue
    }

    /// Dantzig's rule: the most negative reduced cost, lowest index on ties
    fn entering_column(&self) -> Option<usize> {
        let obj = &self.tableau.data[self.tableau.objective_row()];

        let mut min_val = -self.tolerance;
        let mut min_col = None;
        for (j, &d) in obj[..self.tableau.num_columns()].iter().enumerate() {
            if d < min_val {
                min_val = d;
                min_col = Some(j);
            }
        }

        min_col
    }

    /// Minimum ratio test over strictly positive entries, lowest row on ties
    fn leaving_row(&self, col: usize) -> Option<(usize, f64)> {
        let rhs_col = self.tableau.rhs_col();

        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;
        for (i, row) in self.tableau.data[..self.tableau.num_constraints()].iter().enumerate() {
            let val = row[col];
            if val > self.tolerance {
                let ratio = row[rhs_col] / val;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row.map(|row| (row, min_ratio))
    }

    /// Minimize the sum of artificial variables, then leave the tableau with
    /// a feasible basis and no artificial columns.
    fn phase_one(&mut self) -> Result<()> {
        self.tableau.load_phase_one_objective();
        self.run(Phase::One)?;

        let residual = -self.tableau.rhs(self.tableau.objective_row());
        if residual > self.tolerance {
            debug!(residual, "phase 1 optimum is positive");
            return Err(SolverError::Infeasible { residual });
        }

        self.drive_out_artificials();
        self.tableau.drop_artificial_columns();
        debug!(
            iterations = self.iterations,
            rows = self.tableau.num_constraints(),
            "phase 1 complete"
        );
        Ok(())
    }

    /// Artificial variables left basic at zero level are swapped for any
    /// non-artificial column with a non-zero entry in their row. Rows with no
    /// such column are linearly dependent on the others and are removed.
    fn drive_out_artificials(&mut self) {
        let rhs_col = self.tableau.rhs_col();
        let mut redundant = Vec::new();

        for row in 0..self.tableau.num_constraints() {
            if !self.tableau.is_artificial(self.tableau.basis[row]) {
                continue;
            }

            let replacement = (0..self.tableau.num_columns()).find(|&j| {
                !self.tableau.is_artificial(j) && self.tableau.data[row][j].abs() > self.tolerance
            });

            match replacement {
                Some(col) => {
                    trace!(row, entering = col, "driving artificial out of basis");
                    self.tableau.data[row][rhs_col] = 0.0;
                    self.tableau.pivot(row, col);
                }
                None => redundant.push(row),
            }
        }

        for &row in redundant.iter().rev() {
            debug!(row, "removing redundant constraint row");
            self.tableau.remove_row(row);
        }
    }
}
