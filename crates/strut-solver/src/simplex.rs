//! Incremental simplex solver for linear layout constraints.
//!
//! This is an implementation of the Cassowary linear constraint solving
//! algorithm, as described in "The Cassowary Linear Arithmetic Constraint
//! Solving Algorithm" by Greg J. Badros and Alan Borning, in the incremental
//! formulation popularized by the kiwi solvers.
//!
//! Constraints enter as linear expressions over [`Variable`]s related to
//! zero. Non-required constraints contribute weighted error variables to a
//! single objective row, so stronger constraints dominate weaker ones while
//! required constraints either hold exactly or are rejected.

use std::collections::HashMap;

use strut_core::{Priority, Relation};

/// Tolerance for floating-point comparisons.
const EPSILON: f64 = 1e-8;

fn near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Unique identifier for a solver variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(usize);

/// Symbol kinds used internally in the tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Symbol {
    /// An external variable (the unknowns being solved for)
    External(usize),
    /// A slack variable (for inequality constraints)
    Slack(usize),
    /// An error variable (for non-required constraints)
    Error(usize),
    /// A dummy variable (for required equality constraints)
    Dummy(usize),
}

impl Symbol {
    fn is_external(&self) -> bool {
        matches!(self, Symbol::External(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, Symbol::Error(_))
    }

    fn is_dummy(&self) -> bool {
        matches!(self, Symbol::Dummy(_))
    }

    fn is_pivotable(&self) -> bool {
        matches!(self, Symbol::Slack(_) | Symbol::Error(_))
    }
}

/// A linear expression over variables: constant + Σ(coefficient × variable).
#[derive(Debug, Clone, Default)]
pub struct Expression {
    pub constant: f64,
    terms: HashMap<Variable, f64>,
}

impl Expression {
    /// Create an expression holding only a constant.
    pub fn from_constant(value: f64) -> Self {
        Self {
            constant: value,
            terms: HashMap::new(),
        }
    }

    /// Add `coefficient × variable`, merging with any existing term.
    pub fn add_term(&mut self, variable: Variable, coefficient: f64) {
        let entry = self.terms.entry(variable).or_insert(0.0);
        *entry += coefficient;
        if near_zero(*entry) {
            self.terms.remove(&variable);
        }
    }

    /// Get an iterator over the terms.
    pub fn terms(&self) -> impl Iterator<Item = (&Variable, &f64)> {
        self.terms.iter()
    }
}

/// Constraint strength, encoding the priority ladder as objective weights.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Strength(f64);

impl Strength {
    pub const REQUIRED: Strength = Strength(1_001_001_000.0);
    pub const STRONG: Strength = Strength(1_000_000.0);
    pub const MEDIUM: Strength = Strength(1_000.0);
    pub const WEAK: Strength = Strength(1.0);

    /// Map a descriptor priority onto the strength ladder.
    pub fn from_priority(priority: Priority) -> Self {
        match priority {
            Priority::Required => Self::REQUIRED,
            Priority::High => Self::STRONG,
            Priority::Medium => Self::MEDIUM,
            Priority::Low => Self(250.0),
            Priority::Weak => Self::WEAK,
        }
    }

    /// Check if this strength marks a required constraint.
    pub fn is_required(&self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

/// Errors reported by the tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexError {
    /// A required constraint could not be satisfied.
    Unsatisfiable,
    /// The given constraint id is not in the solver.
    UnknownConstraint,
    /// An internal invariant was violated.
    Internal(&'static str),
}

/// A row in the tableau: constant + Σ(coefficient × symbol).
#[derive(Debug, Clone, Default)]
struct Row {
    constant: f64,
    cells: HashMap<Symbol, f64>,
}

impl Row {
    fn new(constant: f64) -> Self {
        Self {
            constant,
            cells: HashMap::new(),
        }
    }

    /// Add `coefficient × symbol`, merging with any existing cell.
    fn insert(&mut self, symbol: Symbol, coefficient: f64) {
        let entry = self.cells.entry(symbol).or_insert(0.0);
        *entry += coefficient;
        if near_zero(*entry) {
            self.cells.remove(&symbol);
        }
    }

    /// Add `coefficient × row`, cell by cell.
    fn insert_row(&mut self, other: &Row, coefficient: f64) {
        self.constant += other.constant * coefficient;
        for (&symbol, &coeff) in &other.cells {
            self.insert(symbol, coeff * coefficient);
        }
    }

    fn remove(&mut self, symbol: Symbol) {
        self.cells.remove(&symbol);
    }

    fn coefficient(&self, symbol: Symbol) -> f64 {
        self.cells.get(&symbol).copied().unwrap_or(0.0)
    }

    fn reverse_sign(&mut self) {
        self.constant = -self.constant;
        for coeff in self.cells.values_mut() {
            *coeff = -*coeff;
        }
    }

    /// Rearrange the row so that `symbol` becomes its subject.
    ///
    /// The caller guarantees `symbol` has a non-zero cell; rows never store
    /// near-zero coefficients.
    fn solve_for(&mut self, symbol: Symbol) {
        let Some(coeff) = self.cells.remove(&symbol) else {
            return;
        };
        let multiplier = -1.0 / coeff;
        self.constant *= multiplier;
        for c in self.cells.values_mut() {
            *c *= multiplier;
        }
    }

    /// Move a row keyed by `lhs` onto the subject `rhs`.
    fn solve_for_pair(&mut self, lhs: Symbol, rhs: Symbol) {
        self.insert(lhs, -1.0);
        self.solve_for(rhs);
    }

    /// Replace `symbol` with the given substitute row, if present.
    fn substitute(&mut self, symbol: Symbol, row: &Row) {
        if let Some(coeff) = self.cells.remove(&symbol) {
            self.insert_row(row, coeff);
        }
    }
}

/// Book-keeping for one added constraint.
#[derive(Debug, Clone, Copy)]
struct Tag {
    marker: Symbol,
    other: Option<Symbol>,
    strength: Strength,
}

/// The incremental tableau solver.
#[derive(Debug, Default)]
pub struct Solver {
    /// The objective row minimized by the simplex
    objective: Row,
    /// Basic rows, keyed by their subject symbol
    rows: HashMap<Symbol, Row>,
    /// External symbol allocated for each variable
    var_symbols: HashMap<Variable, Symbol>,
    /// Last solved value per variable
    var_values: HashMap<Variable, f64>,
    /// Marker bookkeeping per constraint id
    tags: HashMap<usize, Tag>,
    next_symbol: usize,
    next_variable: usize,
    next_constraint: usize,
}

impl Solver {
    /// Create an empty solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new variable.
    pub fn new_variable(&mut self) -> Variable {
        let variable = Variable(self.next_variable);
        self.next_variable += 1;
        self.var_values.insert(variable, 0.0);
        variable
    }

    /// Add the constraint `expression relation 0` and return its id.
    pub fn add_constraint(
        &mut self,
        expression: &Expression,
        relation: Relation,
        strength: Strength,
    ) -> Result<usize, SimplexError> {
        let (mut row, tag) = self.create_row(expression, relation, strength);

        let mut subject = Self::choose_subject(&row, &tag);
        if subject.is_none() && row.cells.keys().all(|s| s.is_dummy()) {
            if !near_zero(row.constant) {
                return Err(SimplexError::Unsatisfiable);
            }
            subject = Some(tag.marker);
        }

        match subject {
            Some(subject) => {
                row.solve_for(subject);
                self.substitute(subject, &row);
                self.rows.insert(subject, row);
            }
            None => {
                if !self.add_with_artificial_variable(&row)? {
                    return Err(SimplexError::Unsatisfiable);
                }
            }
        }

        let id = self.next_constraint;
        self.next_constraint += 1;
        self.tags.insert(id, tag);

        self.optimize_objective()?;
        Ok(id)
    }

    /// Remove a previously added constraint.
    pub fn remove_constraint(&mut self, id: usize) -> Result<(), SimplexError> {
        let tag = self.tags.remove(&id).ok_or(SimplexError::UnknownConstraint)?;

        self.remove_constraint_effects(&tag);

        if self.rows.remove(&tag.marker).is_none() {
            let (leaving, mut row) = self
                .take_marker_leaving_row(tag.marker)
                .ok_or(SimplexError::Internal("marker row is missing"))?;
            row.solve_for_pair(leaving, tag.marker);
            self.substitute(tag.marker, &row);
        }

        self.optimize_objective()
    }

    /// Check whether a constraint id is still active.
    pub fn has_constraint(&self, id: usize) -> bool {
        self.tags.contains_key(&id)
    }

    /// Refresh the cached variable values from the tableau.
    pub fn update_variables(&mut self) {
        for (&variable, &symbol) in &self.var_symbols {
            let value = match self.rows.get(&symbol) {
                Some(row) => row.constant,
                None => 0.0,
            };
            self.var_values.insert(variable, value);
        }
    }

    /// Get the last solved value of a variable.
    pub fn value_of(&self, variable: Variable) -> f64 {
        self.var_values.get(&variable).copied().unwrap_or(0.0)
    }

    fn new_symbol(&mut self, kind: fn(usize) -> Symbol) -> Symbol {
        let id = self.next_symbol;
        self.next_symbol += 1;
        kind(id)
    }

    fn symbol_for(&mut self, variable: Variable) -> Symbol {
        if let Some(&symbol) = self.var_symbols.get(&variable) {
            return symbol;
        }
        let symbol = self.new_symbol(Symbol::External);
        self.var_symbols.insert(variable, symbol);
        symbol
    }

    /// Build a tableau row for a constraint, substituting basic variables.
    fn create_row(
        &mut self,
        expression: &Expression,
        relation: Relation,
        strength: Strength,
    ) -> (Row, Tag) {
        let mut row = Row::new(expression.constant);

        for (&variable, &coeff) in expression.terms() {
            if near_zero(coeff) {
                continue;
            }
            let symbol = self.symbol_for(variable);
            if let Some(basic) = self.rows.get(&symbol) {
                row.insert_row(basic, coeff);
            } else {
                row.insert(symbol, coeff);
            }
        }

        let tag = match relation {
            Relation::LessOrEqual | Relation::GreaterOrEqual => {
                let coeff = if relation == Relation::LessOrEqual { 1.0 } else { -1.0 };
                let slack = self.new_symbol(Symbol::Slack);
                row.insert(slack, coeff);

                if strength.is_required() {
                    Tag { marker: slack, other: None, strength }
                } else {
                    let error = self.new_symbol(Symbol::Error);
                    row.insert(error, -coeff);
                    self.objective.insert(error, strength.0);
                    Tag { marker: slack, other: Some(error), strength }
                }
            }
            Relation::Equal => {
                if strength.is_required() {
                    let dummy = self.new_symbol(Symbol::Dummy);
                    row.insert(dummy, 1.0);
                    Tag { marker: dummy, other: None, strength }
                } else {
                    let errplus = self.new_symbol(Symbol::Error);
                    let errminus = self.new_symbol(Symbol::Error);
                    row.insert(errplus, -1.0);
                    row.insert(errminus, 1.0);
                    self.objective.insert(errplus, strength.0);
                    self.objective.insert(errminus, strength.0);
                    Tag { marker: errplus, other: Some(errminus), strength }
                }
            }
        };

        if row.constant < 0.0 {
            row.reverse_sign();
        }

        (row, tag)
    }

    /// Choose the symbol the new row will be solved for.
    fn choose_subject(row: &Row, tag: &Tag) -> Option<Symbol> {
        for &symbol in row.cells.keys() {
            if symbol.is_external() {
                return Some(symbol);
            }
        }
        for candidate in [Some(tag.marker), tag.other].into_iter().flatten() {
            if candidate.is_pivotable() && row.coefficient(candidate) < 0.0 {
                return Some(candidate);
            }
        }
        None
    }

    /// Phase-one fallback: introduce an artificial variable for a row that
    /// offers no direct subject, minimize it away, then scrub it from the
    /// tableau. Returns whether the row could be satisfied.
    fn add_with_artificial_variable(&mut self, row: &Row) -> Result<bool, SimplexError> {
        let art = self.new_symbol(Symbol::Slack);
        self.rows.insert(art, row.clone());

        let mut artificial = row.clone();
        self.optimize(&mut artificial)?;
        let success = near_zero(artificial.constant);

        if let Some(mut art_row) = self.rows.remove(&art) {
            if art_row.cells.is_empty() {
                return Ok(success);
            }
            let entering = art_row
                .cells
                .keys()
                .find(|s| s.is_pivotable())
                .copied();
            let Some(entering) = entering else {
                return Ok(false);
            };
            art_row.solve_for_pair(art, entering);
            self.substitute(entering, &art_row);
            self.rows.insert(entering, art_row);
        }

        for r in self.rows.values_mut() {
            r.remove(art);
        }
        self.objective.remove(art);
        Ok(success)
    }

    /// Substitute a symbol throughout the tableau and objective.
    fn substitute(&mut self, symbol: Symbol, row: &Row) {
        for r in self.rows.values_mut() {
            r.substitute(symbol, row);
        }
        self.objective.substitute(symbol, row);
    }

    fn optimize_objective(&mut self) -> Result<(), SimplexError> {
        let mut objective = std::mem::take(&mut self.objective);
        let result = self.optimize(&mut objective);
        self.objective = objective;
        result
    }

    /// Minimize the given objective with the primal simplex.
    fn optimize(&mut self, objective: &mut Row) -> Result<(), SimplexError> {
        loop {
            let Some(entering) = Self::entering_symbol(objective) else {
                return Ok(());
            };
            let Some((leaving, mut row)) = self.take_leaving_row(entering) else {
                return Err(SimplexError::Internal("objective is unbounded"));
            };
            row.solve_for_pair(leaving, entering);
            self.substitute(entering, &row);
            objective.substitute(entering, &row);
            self.rows.insert(entering, row);
        }
    }

    /// Find the most negative non-dummy objective coefficient.
    fn entering_symbol(objective: &Row) -> Option<Symbol> {
        objective
            .cells
            .iter()
            .filter(|(symbol, coeff)| !symbol.is_dummy() && **coeff < -EPSILON)
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&symbol, _)| symbol)
    }

    /// Minimum-ratio test for the leaving row, removing it from the basis.
    fn take_leaving_row(&mut self, entering: Symbol) -> Option<(Symbol, Row)> {
        let mut min_ratio = f64::INFINITY;
        let mut leaving = None;

        for (&symbol, row) in &self.rows {
            if symbol.is_external() {
                continue;
            }
            let coeff = row.coefficient(entering);
            if coeff < -EPSILON {
                let ratio = -row.constant / coeff;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    leaving = Some(symbol);
                }
            }
        }

        let symbol = leaving?;
        let row = self.rows.remove(&symbol)?;
        Some((symbol, row))
    }

    /// Withdraw a removed constraint's error weights from the objective.
    fn remove_constraint_effects(&mut self, tag: &Tag) {
        if tag.marker.is_error() {
            self.remove_marker_effects(tag.marker, tag.strength);
        }
        if let Some(other) = tag.other {
            if other.is_error() {
                self.remove_marker_effects(other, tag.strength);
            }
        }
    }

    fn remove_marker_effects(&mut self, marker: Symbol, strength: Strength) {
        match self.rows.get(&marker) {
            Some(row) => {
                let row = row.clone();
                self.objective.insert_row(&row, -strength.0);
            }
            None => self.objective.insert(marker, -strength.0),
        }
    }

    /// Pick the best row to pivot a non-basic marker out through: prefer
    /// restricted rows where the exit keeps the basis feasible, then any
    /// restricted row, then an external one.
    fn take_marker_leaving_row(&mut self, marker: Symbol) -> Option<(Symbol, Row)> {
        let mut r1 = f64::INFINITY;
        let mut r2 = f64::INFINITY;
        let mut first = None;
        let mut second = None;
        let mut third = None;

        for (&symbol, row) in &self.rows {
            let coeff = row.coefficient(marker);
            if coeff == 0.0 {
                continue;
            }
            if symbol.is_external() {
                third = Some(symbol);
            } else if coeff < 0.0 {
                let ratio = -row.constant / coeff;
                if ratio < r1 {
                    r1 = ratio;
                    first = Some(symbol);
                }
            } else {
                let ratio = row.constant / coeff;
                if ratio < r2 {
                    r2 = ratio;
                    second = Some(symbol);
                }
            }
        }

        let symbol = first.or(second).or(third)?;
        let row = self.rows.remove(&symbol)?;
        Some((symbol, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equality(solver: &mut Solver, variable: Variable, value: f64, strength: Strength) -> usize {
        let mut expr = Expression::from_constant(-value);
        expr.add_term(variable, 1.0);
        solver.add_constraint(&expr, Relation::Equal, strength).unwrap()
    }

    #[test]
    fn test_variables_are_distinct() {
        let mut solver = Solver::new();
        let a = solver.new_variable();
        let b = solver.new_variable();
        assert_ne!(a, b);
    }

    #[test]
    fn test_simple_equality() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        equality(&mut solver, x, 100.0, Strength::REQUIRED);
        solver.update_variables();
        assert!((solver.value_of(x) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_chained_equalities() {
        let mut solver = Solver::new();
        let x = solver.new_variable();
        let y = solver.new_variable();

        equality(&mut solver, x, 100.0, Strength::REQUIRED);

        // y == x + 50
        let mut expr = Expression::from_constant(-50.0);
        expr.add_term(y, 1.0);
        expr.add_term(x, -1.0);
        solver.add_constraint(&expr, Relation::Equal, Strength::REQUIRED).unwrap();

        solver.update_variables();
        assert!((solver.value_of(x) - 100.0).abs() < 0.001);
        assert!((solver.value_of(y) - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_inequality_binds() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        // x >= 50, prefer x == 10
        let mut expr = Expression::from_constant(-50.0);
        expr.add_term(x, 1.0);
        solver
            .add_constraint(&expr, Relation::GreaterOrEqual, Strength::REQUIRED)
            .unwrap();
        equality(&mut solver, x, 10.0, Strength::MEDIUM);

        solver.update_variables();
        assert!((solver.value_of(x) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_slack_inequality_leaves_preference() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        // x <= 200, prefer x == 120
        let mut expr = Expression::from_constant(-200.0);
        expr.add_term(x, 1.0);
        solver
            .add_constraint(&expr, Relation::LessOrEqual, Strength::REQUIRED)
            .unwrap();
        equality(&mut solver, x, 120.0, Strength::MEDIUM);

        solver.update_variables();
        assert!((solver.value_of(x) - 120.0).abs() < 0.001);
    }

    #[test]
    fn test_stronger_preference_wins() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        equality(&mut solver, x, 100.0, Strength::WEAK);
        equality(&mut solver, x, 50.0, Strength::STRONG);

        solver.update_variables();
        assert!((solver.value_of(x) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_conflicting_required_is_rejected() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        equality(&mut solver, x, 100.0, Strength::REQUIRED);

        let mut expr = Expression::from_constant(-50.0);
        expr.add_term(x, 1.0);
        let result = solver.add_constraint(&expr, Relation::Equal, Strength::REQUIRED);
        assert_eq!(result, Err(SimplexError::Unsatisfiable));
    }

    #[test]
    fn test_redundant_required_is_accepted() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        equality(&mut solver, x, 100.0, Strength::REQUIRED);
        equality(&mut solver, x, 100.0, Strength::REQUIRED);

        solver.update_variables();
        assert!((solver.value_of(x) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_remove_restores_earlier_preference() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        equality(&mut solver, x, 100.0, Strength::WEAK);
        let strong = equality(&mut solver, x, 50.0, Strength::STRONG);

        solver.update_variables();
        assert!((solver.value_of(x) - 50.0).abs() < 0.001);

        solver.remove_constraint(strong).unwrap();
        solver.update_variables();
        assert!((solver.value_of(x) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_remove_required_allows_replacement() {
        let mut solver = Solver::new();
        let x = solver.new_variable();

        let pin = equality(&mut solver, x, 100.0, Strength::REQUIRED);
        solver.remove_constraint(pin).unwrap();
        equality(&mut solver, x, 60.0, Strength::REQUIRED);

        solver.update_variables();
        assert!((solver.value_of(x) - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_remove_unknown_constraint() {
        let mut solver = Solver::new();
        assert_eq!(
            solver.remove_constraint(7),
            Err(SimplexError::UnknownConstraint)
        );
    }

    #[test]
    fn test_unconstrained_variable_is_zero() {
        let mut solver = Solver::new();
        let x = solver.new_variable();
        solver.update_variables();
        assert!(solver.value_of(x).abs() < 0.001);
    }
}
