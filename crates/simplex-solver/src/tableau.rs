use tracing::debug;

use crate::problem::{LpProblem, Relation};

/// Role of a tableau column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Decision,
    /// +1 in a `<=` row
    Slack,
    /// -1 in a `>=` row
    Surplus,
    /// +1 in a `>=` or `=` row, only present during phase 1
    Artificial,
}

/// Dense simplex tableau.
///
/// Rows `0..m` are constraints and row `m` is the objective row. The last
/// column holds the right-hand side. The objective row stores reduced costs
/// of a minimization problem, so its RHS is the negated objective value.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    pub(crate) data: Vec<Vec<f64>>,
    /// Column currently basic in each constraint row
    pub(crate) basis: Vec<usize>,
    pub(crate) kinds: Vec<ColumnKind>,
    /// `x1..xn` for decision columns and `s1..sk` for slack columns
    pub(crate) labels: Vec<Option<String>>,
}

impl Tableau {
    pub(crate) fn num_constraints(&self) -> usize {
        self.data.len() - 1
    }

    /// Number of variable columns, excluding RHS
    pub(crate) fn num_columns(&self) -> usize {
        self.kinds.len()
    }

    pub(crate) fn objective_row(&self) -> usize {
        self.data.len() - 1
    }

    pub(crate) fn rhs_col(&self) -> usize {
        self.kinds.len()
    }

    pub(crate) fn rhs(&self, row: usize) -> f64 {
        self.data[row][self.rhs_col()]
    }

    pub(crate) fn has_artificial(&self) -> bool {
        self.kinds.contains(&ColumnKind::Artificial)
    }

    pub(crate) fn is_artificial(&self, col: usize) -> bool {
        self.kinds[col] == ColumnKind::Artificial
    }

    /// Scale `row` so the pivot element is 1 and eliminate `col` from every
    /// other row, including the objective row. `col` becomes basic in `row`.
    pub(crate) fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self.data[row][col];
        for v in self.data[row].iter_mut() {
            *v /= pivot_val;
        }
        self.data[row][col] = 1.0;

        for i in 0..self.data.len() {
            if i != row {
                self.eliminate(i, row, col);
            }
        }

        self.basis[row] = col;
    }

    /// Subtract a multiple of `source` from `target` so that `target` has a
    /// zero in `col`. `source` must hold 1 in `col`.
    fn eliminate(&mut self, target: usize, source: usize, col: usize) {
        let factor = self.data[target][col];
        if factor == 0.0 {
            return;
        }
        let (target_row, source_row) = if target < source {
            let (head, tail) = self.data.split_at_mut(source);
            (&mut head[target], &tail[0])
        } else {
            let (head, tail) = self.data.split_at_mut(target);
            (&mut tail[0], &head[source])
        };
        for (t, s) in target_row.iter_mut().zip(source_row.iter()) {
            *t -= factor * s;
        }
        target_row[col] = 0.0;
    }

    /// Replace the objective row with `costs` (one per column, missing
    /// entries are zero) and restore canonical form by eliminating every
    /// basic column from it.
    pub(crate) fn load_objective(&mut self, costs: &[f64]) {
        let obj = self.objective_row();
        let row = &mut self.data[obj];
        row.fill(0.0);
        row[..costs.len()].copy_from_slice(costs);

        for r in 0..self.num_constraints() {
            let basic = self.basis[r];
            self.eliminate(obj, r, basic);
        }
    }

    /// Objective row for phase 1: minimize the sum of artificial variables
    pub(crate) fn load_phase_one_objective(&mut self) {
        let costs: Vec<f64> = self
            .kinds
            .iter()
            .map(|&k| if k == ColumnKind::Artificial { 1.0 } else { 0.0 })
            .collect();
        self.load_objective(&costs);
    }

    /// Remove a constraint row. The row must not be the objective row.
    pub(crate) fn remove_row(&mut self, row: usize) {
        self.data.remove(row);
        self.basis.remove(row);
    }

    /// Drop every artificial column. Artificial columns sit contiguously
    /// between the slack/surplus block and RHS, and none may be basic.
    pub(crate) fn drop_artificial_columns(&mut self) {
        let Some(start) = self.kinds.iter().position(|&k| k == ColumnKind::Artificial) else {
            return;
        };
        let end = self.rhs_col();
        debug_assert!(self.basis.iter().all(|&b| b < start));

        for row in &mut self.data {
            row.drain(start..end);
        }
        self.kinds.truncate(start);
        self.labels.truncate(start);
    }
}

/// Converts an [`LpProblem`] into its initial canonical tableau
pub(crate) struct TableauBuilder<'a> {
    problem: &'a LpProblem,
}

impl<'a> TableauBuilder<'a> {
    pub(crate) fn new(problem: &'a LpProblem) -> Self {
        Self { problem }
    }

    pub(crate) fn build(self) -> Tableau {
        let problem = self.problem;
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();

        // Count slack/surplus and artificial variables needed
        let mut n_slack = 0;
        let mut n_artificial = 0;
        for c in problem.constraints() {
            match c.relation {
                Relation::Le => n_slack += 1,
                Relation::Ge => {
                    n_slack += 1; // surplus
                    n_artificial += 1;
                }
                Relation::Eq => n_artificial += 1,
            }
        }

        let n_cols = n_vars + n_slack + n_artificial;
        let mut kinds = vec![ColumnKind::Decision; n_vars];
        let mut labels: Vec<Option<String>> = (1..=n_vars).map(|j| Some(format!("x{}", j))).collect();
        kinds.resize(n_cols, ColumnKind::Artificial);
        labels.resize(n_cols, None);

        let mut data = vec![vec![0.0; n_cols + 1]; n_constraints + 1];
        let mut basis = vec![0; n_constraints];

        let mut slack_idx = n_vars;
        let mut artificial_idx = n_vars + n_slack;
        let mut slack_label = 0;

        for (i, c) in problem.constraints().iter().enumerate() {
            data[i][..n_vars].copy_from_slice(&c.coefficients);
            data[i][n_cols] = c.rhs;

            match c.relation {
                Relation::Le => {
                    slack_label += 1;
                    data[i][slack_idx] = 1.0;
                    kinds[slack_idx] = ColumnKind::Slack;
                    labels[slack_idx] = Some(format!("s{}", slack_label));
                    basis[i] = slack_idx;
                    slack_idx += 1;
                }
                Relation::Ge => {
                    data[i][slack_idx] = -1.0;
                    kinds[slack_idx] = ColumnKind::Surplus;
                    slack_idx += 1;
                    data[i][artificial_idx] = 1.0;
                    basis[i] = artificial_idx;
                    artificial_idx += 1;
                }
                Relation::Eq => {
                    data[i][artificial_idx] = 1.0;
                    basis[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        // Slack columns carry zero cost, so the real objective row is
        // already canonical when no artificial variable is basic.
        data[n_constraints][..n_vars].copy_from_slice(problem.costs());

        debug!(
            rows = n_constraints,
            decision = n_vars,
            slack = n_slack,
            artificial = n_artificial,
            "built initial tableau"
        );

        Tableau {
            data,
            basis,
            kinds,
            labels,
        }
    }
}
