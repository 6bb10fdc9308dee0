use std::collections::HashMap;
use std::ops::Index;

use crate::problem::Sense;
use crate::tableau::Tableau;

/// Key under which the optimal objective value is reported
pub const OBJECTIVE_KEY: &str = "objective_value";

/// The optimal point of a solved LP, keyed by variable label.
///
/// Holds every decision variable (`x1..xn`) and every slack variable
/// (`s1..sk`), basic or not, followed by the `objective_value` entry.
/// Surplus and artificial variables are never reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    variables: Vec<(String, f64)>,
    objective_value: f64,
    iterations: usize,
}

impl Solution {
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Number of pivots performed across both phases
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        if key == OBJECTIVE_KEY {
            return Some(self.objective_value);
        }
        self.variables.iter().find(|(label, _)| label == key).map(|&(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Variable labels in column order, then `objective_value`
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .chain(std::iter::once((OBJECTIVE_KEY, self.objective_value)))
    }

    /// Variable entries only, without `objective_value`
    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries including `objective_value`
    pub fn len(&self) -> usize {
        self.variables.len() + 1
    }

    /// Always false: `objective_value` is present in every solution
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        self.iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl Index<&str> for Solution {
    type Output = f64;

    fn index(&self, key: &str) -> &f64 {
        if key == OBJECTIVE_KEY {
            return &self.objective_value;
        }
        self.variables
            .iter()
            .find(|(label, _)| label == key)
            .map(|(_, v)| v)
            .unwrap_or_else(|| panic!("no variable labeled '{}' in solution", key))
    }
}

impl From<Solution> for HashMap<String, f64> {
    fn from(solution: Solution) -> Self {
        solution.to_map()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Solution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// Read an optimal phase 2 tableau into a [`Solution`]. Basic variables take
/// their row's RHS and non-basic variables are zero.
pub(crate) fn extract(tableau: &Tableau, sense: Sense, iterations: usize) -> Solution {
    let mut values = vec![0.0; tableau.num_columns()];
    for (row, &basic) in tableau.basis.iter().enumerate() {
        values[basic] = tableau.rhs(row);
    }

    let variables = tableau
        .labels
        .iter()
        .zip(values)
        .filter_map(|(label, value)| label.as_ref().map(|l| (l.clone(), value)))
        .collect();

    // The objective row RHS holds the negated minimization objective
    let minimized = -tableau.rhs(tableau.objective_row());
    let objective_value = match sense {
        Sense::Min => minimized,
        Sense::Max => -minimized,
    };

    Solution {
        variables,
        objective_value,
        iterations,
    }
}
