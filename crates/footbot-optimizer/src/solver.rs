//! Backends that solve a [`BinaryProgram`].
//!
//! Squad selection only talks to the [`Solver`] trait. [`MicroLpSolver`] is the default
//! backend, a pure-Rust branch-and-bound solver reached through `good_lp`. Any other MILP
//! backend can be plugged in by implementing the trait.
//!
//! Solving is blocking and has no cancellation. [`WithTimeout`] bounds the wait by running
//! the inner solver on a helper thread; when the limit is hit the caller gets
//! [`SolveError::Timeout`] while the helper finishes in the background.

use std::{fmt, sync::mpsc, thread, time::Duration};

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, Variable,
    constraint, variable,
};

use crate::program::{BinaryProgram, Comparison, LinearExpr, Solution};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    #[display("problem is infeasible")]
    Infeasible,
    #[display("problem is unbounded")]
    Unbounded,
    #[display("solver timed out")]
    Timeout,
    #[display("solver failed: {_0}")]
    Failure(#[error(not(source))] String),
}

impl From<ResolutionError> for SolveError {
    fn from(value: ResolutionError) -> Self {
        match value {
            ResolutionError::Infeasible => Self::Infeasible,
            ResolutionError::Unbounded => Self::Unbounded,
            other => Self::Failure(other.to_string()),
        }
    }
}

/// Solves 0/1 linear programs.
pub trait Solver: fmt::Debug + Send + Sync {
    /// Returns an optimal assignment of every variable of `program`.
    fn solve(&self, program: &BinaryProgram) -> Result<Solution, SolveError>;
}

impl<S> Solver for &S
where
    S: Solver + ?Sized,
{
    fn solve(&self, program: &BinaryProgram) -> Result<Solution, SolveError> {
        (**self).solve(program)
    }
}

/// Default backend: `microlp` through `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    expr.terms()
        .iter()
        .map(|&(var, coefficient)| coefficient * vars[var.index()])
        .sum::<Expression>()
        + expr.constant()
}

impl Solver for MicroLpSolver {
    fn solve(&self, program: &BinaryProgram) -> Result<Solution, SolveError> {
        let mut problem = ProblemVariables::new();
        let vars = (0..program.num_vars())
            .map(|_| problem.add(variable().binary()))
            .collect::<Vec<_>>();

        let mut model = problem
            .maximise(to_expression(program.objective(), &vars))
            .using(good_lp::microlp);
        for c in program.constraints() {
            let lhs = to_expression(&c.expr, &vars);
            model = model.with(match c.comparison {
                Comparison::Le => constraint::leq(lhs, c.rhs),
                Comparison::Eq => constraint::eq(lhs, c.rhs),
                Comparison::Ge => constraint::geq(lhs, c.rhs),
            });
        }

        let solution = model.solve()?;
        Ok(Solution::new(
            vars.iter().map(|&var| solution.value(var) > 0.5).collect(),
        ))
    }
}

/// Gives up on the inner solver after `limit`.
#[derive(Debug, Clone)]
pub struct WithTimeout<S> {
    inner: S,
    limit: Duration,
}

impl<S> WithTimeout<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

impl<S> Solver for WithTimeout<S>
where
    S: Solver + Clone + 'static,
{
    fn solve(&self, program: &BinaryProgram) -> Result<Solution, SolveError> {
        let (tx, rx) = mpsc::channel();
        let solver = self.inner.clone();
        let program = program.clone();
        thread::Builder::new()
            .name("footbot-solver".into())
            .spawn(move || {
                // the receiver is gone once the caller timed out
                let _ = tx.send(solver.solve(&program));
            })
            .map_err(|e| SolveError::Failure(e.to_string()))?;
        match rx.recv_timeout(self.limit) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                log::warn!("solver did not finish within {:?}", self.limit);
                Err(SolveError::Timeout)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(SolveError::Failure("solver thread panicked".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::VarId;

    /// max x + y  s.t.  x + y <= 1.5,  x == y
    fn coupled() -> (BinaryProgram, VarId) {
        let mut program = BinaryProgram::new();
        let x = program.add_var("x");
        let y = program.add_var("y");
        program.constrain("cap", LinearExpr::from_iter([(x, 1.0), (y, 1.0)]), Comparison::Le, 1.5);
        program.constrain("tie", LinearExpr::from_iter([(x, 1.0), (y, -1.0)]), Comparison::Eq, 0.0);
        program.set_objective(LinearExpr::from_iter([(x, 1.0), (y, 1.0)]));
        (program, x)
    }

    #[test]
    fn test_microlp_solves_knapsack() {
        let mut program = BinaryProgram::new();
        let items = [(2.0, 3.0), (3.0, 4.0), (4.0, 5.0), (5.0, 6.0)];
        let vars = items
            .iter()
            .enumerate()
            .map(|(i, _)| program.add_var(format!("item{i}")))
            .collect::<Vec<_>>();
        program.constrain(
            "weight",
            vars.iter().zip(&items).map(|(&v, &(w, _))| (v, w)).collect(),
            Comparison::Le,
            5.0,
        );
        program.set_objective(vars.iter().zip(&items).map(|(&v, &(_, p))| (v, p)).collect());

        let solution = MicroLpSolver.solve(&program).unwrap();
        assert!(program.is_satisfied_by(&solution));
        assert_eq!(
            vars.iter().map(|&v| solution.value(v)).collect::<Vec<_>>(),
            [true, true, false, false]
        );
        assert!((program.objective_value(&solution) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_microlp_equality_and_ge() {
        let (mut program, x) = coupled();
        let solution = MicroLpSolver.solve(&program).unwrap();
        assert_eq!(solution, Solution::new(vec![false, false]));

        program.constrain("force", LinearExpr::from_iter([(x, 1.0)]), Comparison::Ge, 1.0);
        assert_eq!(MicroLpSolver.solve(&program), Err(SolveError::Infeasible));
    }

    #[derive(Debug, Clone)]
    struct SlowSolver(Duration);

    impl Solver for SlowSolver {
        fn solve(&self, program: &BinaryProgram) -> Result<Solution, SolveError> {
            thread::sleep(self.0);
            Ok(Solution::new(vec![false; program.num_vars()]))
        }
    }

    #[test]
    fn test_timeout() {
        let (program, _) = coupled();
        let slow = WithTimeout::new(SlowSolver(Duration::from_secs(5)), Duration::from_millis(10));
        assert_eq!(slow.solve(&program), Err(SolveError::Timeout));

        let fast = WithTimeout::new(SlowSolver(Duration::ZERO), Duration::from_secs(5));
        assert_eq!(fast.solve(&program), Ok(Solution::new(vec![false, false])));
    }
}
