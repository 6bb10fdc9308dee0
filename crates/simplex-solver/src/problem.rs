use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SolverError};

/// Comparison between a constraint's left-hand side and its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Le => "<=",
            Relation::Ge => ">=",
            Relation::Eq => "=",
        }
    }
}

impl FromStr for Relation {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<=" => Ok(Relation::Le),
            ">=" => Ok(Relation::Ge),
            "=" => Ok(Relation::Eq),
            other => Err(SolverError::InvalidInput(format!(
                "unknown constraint relation '{}', expected one of <=, >=, =",
                other
            ))),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", try_from = "String"))]
pub enum Sense {
    #[default]
    Min,
    Max,
}

impl FromStr for Sense {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(Sense::Min),
            "max" => Ok(Sense::Max),
            _ => Err(SolverError::InvalidInput(format!(
                "unknown objective sense '{}', expected min or max",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Sense {
    type Error = SolverError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Min => f.write_str("min"),
            Sense::Max => f.write_str("max"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Coefficients for each decision variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub relation: Relation,
    /// Right-hand side value, must be non-negative
    pub rhs: f64,
}

impl Constraint {
    pub fn new(coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Self {
        Self {
            coefficients,
            relation,
            rhs,
        }
    }
}

/// A validated linear program over non-negative decision variables.
///
/// The objective is stored in minimization form: for a `Max` problem the
/// coefficients are negated on construction and the sense is kept so the
/// reported objective value can be flipped back.
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    costs: Vec<f64>,
    constraints: Vec<Constraint>,
    sense: Sense,
}

impl LpProblem {
    /// Validate and normalize a problem. Nothing is solved here; malformed
    /// input is rejected before any tableau is built.
    pub fn new(objective: Vec<f64>, constraints: Vec<Constraint>, sense: Sense) -> Result<Self> {
        validate(&objective, &constraints)?;

        let costs = match sense {
            Sense::Min => objective,
            Sense::Max => objective.into_iter().map(|c| -c).collect(),
        };

        Ok(Self {
            costs,
            constraints,
            sense,
        })
    }

    /// Build a problem from parallel sequences: one coefficient row, one
    /// right-hand side and one relation token (`<=`, `>=`, `=`) per constraint.
    pub fn from_rows<S: AsRef<str>>(
        objective: Vec<f64>,
        rows: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        relations: &[S],
        sense: Sense,
    ) -> Result<Self> {
        if rows.len() != rhs.len() || rows.len() != relations.len() {
            return Err(SolverError::InvalidInput(format!(
                "dimensions do not match: {} constraint rows, {} rhs values, {} relations",
                rows.len(),
                rhs.len(),
                relations.len()
            )));
        }

        let constraints = rows
            .into_iter()
            .zip(rhs)
            .zip(relations)
            .map(|((coefficients, rhs), relation)| {
                let token: &str = relation.as_ref();
                Ok(Constraint::new(coefficients, token.parse()?, rhs))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(objective, constraints, sense)
    }

    pub fn num_variables(&self) -> usize {
        self.costs.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Objective coefficients in minimization form
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Objective coefficients as the caller supplied them
    pub fn objective(&self) -> Vec<f64> {
        match self.sense {
            Sense::Min => self.costs.clone(),
            Sense::Max => self.costs.iter().map(|c| -c).collect(),
        }
    }
}

fn validate(objective: &[f64], constraints: &[Constraint]) -> Result<()> {
    let n = objective.len();
    if n == 0 {
        return Err(SolverError::InvalidInput(
            "objective must have at least one coefficient".to_string(),
        ));
    }
    if constraints.is_empty() {
        return Err(SolverError::InvalidInput(
            "at least one constraint is required".to_string(),
        ));
    }
    if let Some(j) = objective.iter().position(|c| !c.is_finite()) {
        return Err(SolverError::InvalidInput(format!(
            "objective coefficient {} is not finite",
            j + 1
        )));
    }

    for (i, c) in constraints.iter().enumerate() {
        let row = i + 1;
        if c.coefficients.len() != n {
            return Err(SolverError::InvalidInput(format!(
                "constraint {} has {} coefficients, expected {}",
                row,
                c.coefficients.len(),
                n
            )));
        }
        if c.coefficients.iter().any(|a| !a.is_finite()) {
            return Err(SolverError::InvalidInput(format!(
                "constraint {} has a non-finite coefficient",
                row
            )));
        }
        if !c.rhs.is_finite() {
            return Err(SolverError::InvalidInput(format!(
                "constraint {} has a non-finite right-hand side",
                row
            )));
        }
        if c.rhs < 0.0 {
            return Err(SolverError::InvalidInput(format!(
                "constraint {} has negative right-hand side {}",
                row, c.rhs
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le(coefficients: Vec<f64>, rhs: f64) -> Constraint {
        Constraint::new(coefficients, Relation::Le, rhs)
    }

    #[test]
    fn test_max_objective_is_negated() {
        let problem = LpProblem::new(vec![3.0, -2.0], vec![le(vec![1.0, 1.0], 4.0)], Sense::Max).unwrap();
        assert_eq!(problem.costs(), &[-3.0, 2.0]);
        assert_eq!(problem.objective(), vec![3.0, -2.0]);
        assert_eq!(problem.sense(), Sense::Max);
    }

    #[test]
    fn test_min_objective_is_kept() {
        let problem = LpProblem::new(vec![3.0, 2.0], vec![le(vec![1.0, 1.0], 4.0)], Sense::Min).unwrap();
        assert_eq!(problem.costs(), &[3.0, 2.0]);
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 1);
    }

    #[test]
    fn test_negative_rhs_rejected() {
        let err = LpProblem::new(vec![1.0], vec![le(vec![1.0], -5.0)], Sense::Max).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(_)));
        assert!(err.to_string().contains("negative right-hand side"));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let err = LpProblem::new(vec![1.0, 2.0], vec![le(vec![1.0], 5.0)], Sense::Min).unwrap_err();
        assert_eq!(
            err,
            SolverError::InvalidInput("constraint 1 has 1 coefficients, expected 2".to_string())
        );
    }

    #[test]
    fn test_empty_problem_rejected() {
        assert!(matches!(
            LpProblem::new(vec![], vec![le(vec![], 1.0)], Sense::Min),
            Err(SolverError::InvalidInput(_))
        ));
        assert!(matches!(
            LpProblem::new(vec![1.0], vec![], Sense::Min),
            Err(SolverError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LpProblem::new(vec![f64::NAN], vec![le(vec![1.0], 1.0)], Sense::Min).is_err());
        assert!(LpProblem::new(vec![1.0], vec![le(vec![f64::INFINITY], 1.0)], Sense::Min).is_err());
        assert!(LpProblem::new(vec![1.0], vec![le(vec![1.0], f64::NAN)], Sense::Min).is_err());
    }

    #[test]
    fn test_from_rows_parses_relations() {
        let problem = LpProblem::from_rows(
            vec![2.0, 3.0],
            vec![vec![0.5, 0.25], vec![1.0, 3.0], vec![1.0, 1.0]],
            vec![4.0, 20.0, 10.0],
            &["<=", ">=", "="],
            Sense::Min,
        )
        .unwrap();

        let relations: Vec<Relation> = problem.constraints().iter().map(|c| c.relation).collect();
        assert_eq!(relations, vec![Relation::Le, Relation::Ge, Relation::Eq]);
    }

    #[test]
    fn test_from_rows_rejects_bad_relation() {
        let err = LpProblem::from_rows(vec![1.0], vec![vec![1.0]], vec![1.0], &["<"], Sense::Min).unwrap_err();
        assert!(err.to_string().contains("unknown constraint relation '<'"));
    }

    #[test]
    fn test_from_rows_rejects_length_mismatch() {
        let err = LpProblem::from_rows(
            vec![1.0],
            vec![vec![1.0], vec![2.0]],
            vec![1.0],
            &["<=", "<="],
            Sense::Min,
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(_)));
    }

    #[test]
    fn test_sense_parsing() {
        assert_eq!("MAX".parse::<Sense>().unwrap(), Sense::Max);
        assert_eq!("min".parse::<Sense>().unwrap(), Sense::Min);
        assert!("maximize".parse::<Sense>().is_err());
        assert_eq!(Sense::default(), Sense::Min);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_sense_deserializes_case_insensitively() {
        let sense: Sense = serde_json::from_str(r#""MAX""#).unwrap();
        assert_eq!(sense, Sense::Max);
        assert_eq!(serde_json::to_string(&Sense::Max).unwrap(), r#""max""#);
        assert!(serde_json::from_str::<Sense>(r#""maximize""#).is_err());
    }

    #[test]
    fn test_relation_display_round_trips_symbol() {
        for relation in [Relation::Le, Relation::Ge, Relation::Eq] {
            assert_eq!(relation.to_string().parse::<Relation>().unwrap(), relation);
        }
    }
}
