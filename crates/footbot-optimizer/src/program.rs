//! A solver-agnostic 0/1 linear program.
//!
//! [`BinaryProgram`] is the narrow interface between squad selection and whatever MILP
//! backend solves it: a list of binary variables, linear constraints over them, and a
//! linear objective that is always **maximized**.
//!
//! ```text
//! maximize    Σ cᵢ·xᵢ + k
//! subject to  Σ aⱼᵢ·xᵢ (≤ | = | ≥) bⱼ    for every constraint j
//!             xᵢ ∈ {0, 1}
//! ```
//!
//! Variables and constraints carry names so that a model can be dumped and inspected
//! when a selection looks wrong; backends are free to ignore them.
//!
//! # Example
//!
//! ```
//! use footbot_optimizer::program::{BinaryProgram, Comparison, LinearExpr, Solution};
//!
//! let mut program = BinaryProgram::new();
//! let x = program.add_var("x");
//! let y = program.add_var("y");
//! program.constrain("pick one", LinearExpr::from_iter([(x, 1.0), (y, 1.0)]), Comparison::Le, 1.0);
//! program.set_objective(LinearExpr::from_iter([(x, 2.0), (y, 3.0)]));
//!
//! let solution = Solution::new(vec![false, true]);
//! assert!(program.is_satisfied_by(&solution));
//! assert_eq!(program.objective_value(&solution), 3.0);
//! ```

use std::fmt;

/// Tolerance used when checking constraints on a concrete assignment.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Handle to a binary variable of a [`BinaryProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Position of the variable in declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// `Σ coefficient·variable + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    pub fn add_constant(&mut self, constant: f64) {
        self.constant += constant;
    }

    #[must_use]
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    #[must_use]
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Value of the expression under `solution`.
    #[must_use]
    pub fn evaluate(&self, solution: &Solution) -> f64 {
        self.terms
            .iter()
            .filter(|(var, _)| solution.value(*var))
            .map(|(_, coefficient)| coefficient)
            .sum::<f64>()
            + self.constant
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<T: IntoIterator<Item = (VarId, f64)>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}

impl Extend<(VarId, f64)> for LinearExpr {
    fn extend<T: IntoIterator<Item = (VarId, f64)>>(&mut self, iter: T) {
        self.terms.extend(iter);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Comparison {
    #[display("<=")]
    Le,
    #[display("==")]
    Eq,
    #[display(">=")]
    Ge,
}

/// `expr (≤ | = | ≥) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub comparison: Comparison,
    pub rhs: f64,
}

impl Constraint {
    #[must_use]
    pub fn is_satisfied_by(&self, solution: &Solution) -> bool {
        let lhs = self.expr.evaluate(solution);
        match self.comparison {
            Comparison::Le => lhs <= self.rhs + FEASIBILITY_TOLERANCE,
            Comparison::Eq => (lhs - self.rhs).abs() <= FEASIBILITY_TOLERANCE,
            Comparison::Ge => lhs >= self.rhs - FEASIBILITY_TOLERANCE,
        }
    }
}

/// A maximization problem over binary variables.
#[derive(Debug, Clone, Default)]
pub struct BinaryProgram {
    var_names: Vec<String>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
}

impl BinaryProgram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_var(&mut self, name: impl Into<String>) -> VarId {
        self.var_names.push(name.into());
        VarId(self.var_names.len() - 1)
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.var_names.len()
    }

    #[must_use]
    pub fn var_name(&self, var: VarId) -> &str {
        &self.var_names[var.0]
    }

    pub fn constrain(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        comparison: Comparison,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr,
            comparison,
            rhs,
        });
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    #[must_use]
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    #[must_use]
    pub fn objective_value(&self, solution: &Solution) -> f64 {
        self.objective.evaluate(solution)
    }

    /// Whether `solution` assigns every variable and meets every constraint.
    #[must_use]
    pub fn is_satisfied_by(&self, solution: &Solution) -> bool {
        solution.len() == self.num_vars()
            && self.constraints.iter().all(|c| c.is_satisfied_by(solution))
    }

    /// Names of the constraints `solution` violates.
    pub fn violations<'a>(&'a self, solution: &'a Solution) -> impl Iterator<Item = &'a str> + 'a {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(solution))
            .map(|c| c.name.as_str())
    }

    fn write_expr(&self, f: &mut fmt::Formatter<'_>, expr: &LinearExpr) -> fmt::Result {
        for (var, coefficient) in expr.terms() {
            write!(f, " {coefficient:+} {}", self.var_name(*var))?;
        }
        if expr.constant() != 0.0 {
            write!(f, " {:+}", expr.constant())?;
        }
        Ok(())
    }
}

impl fmt::Display for BinaryProgram {
    /// LP-like dump, one constraint per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maximize")?;
        self.write_expr(f, &self.objective)?;
        writeln!(f)?;
        writeln!(f, "subject to")?;
        for constraint in &self.constraints {
            write!(f, "  {}:", constraint.name)?;
            self.write_expr(f, &constraint.expr)?;
            writeln!(f, " {} {}", constraint.comparison, constraint.rhs)?;
        }
        writeln!(f, "binary {}", self.var_names.join(" "))
    }
}

/// An assignment of every variable of a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<bool>,
}

impl Solution {
    #[must_use]
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Value of `var`; variables beyond the assignment read as `false`.
    #[must_use]
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.0).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
