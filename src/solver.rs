/*
* Copyright (C) 2019-2025, Miklos Maroti
*
* This program is free software: you can redistribute it and/or modify
* it under the terms of the GNU General Public License as published by
* the Free Software Foundation, either version 3 of the License, or
* (at your option) any later version.
*
* This program is distributed in the hope that it will be useful,
* but WITHOUT ANY WARRANTY; without even the implied warranty of
* MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
* GNU General Public License for more details.
*
* You should have received a copy of the GNU General Public License
* along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Solver adapter and Tseitin-encoding gate logic (§4.1.2, §4.2, §6).
//!
//! This is the only component that talks to the external CDCL engine
//! (`cadical`). It owns the variable counter, clause count, sticky
//! satisfiability flag, and a small hash-cons cache that turns repeated
//! identical gate applications into cache hits instead of fresh auxiliary
//! variables (§9, "Peephole + Tseitin cache" — a pure optimization,
//! invisible to semantics).

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::Error;
use crate::literal::{lnot, Literal, FALSE, TRUE, UNDEF};

/// Selects which CDCL backend profile a [`Solver`] runs (§4.2, §6). The
/// registered name set is exactly `{"minisat", "minisatsimp"}`, matching the
/// two profiles of the original C++ implementation
/// (`src/solvers/minisat.cpp`: `MiniSat` vs `MiniSatSimp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Plain CDCL: no preprocessing, decision variables are never frozen.
    Minisat,
    /// Simplifying/preprocessing profile: every user-introduced decision
    /// variable is frozen at allocation time, and the database is
    /// eliminated once before the first `solve()`; later solves reuse the
    /// simplified database.
    MinisatSimp,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<BackendKind, Error> {
        match s {
            "minisat" => Ok(BackendKind::Minisat),
            "minisatsimp" => Ok(BackendKind::MinisatSimp),
            other => Err(Error::BackendUnavailable(other.to_string())),
        }
    }
}

impl Default for BackendKind {
    fn default() -> BackendKind {
        BackendKind::MinisatSimp
    }
}

/// Hash-consing key for the gates that allocate an auxiliary variable on a
/// cache miss. Operands are pre-sorted by the caller for the commutative/
/// symmetric gates so that e.g. `and(a, b)` and `and(b, a)` share a cache
/// entry.
#[derive(Hash, Eq, PartialEq, Clone, Copy)]
enum GateKey {
    And(Literal, Literal),
    Xor(Literal, Literal),
    Maj(Literal, Literal, Literal),
    Iff(Literal, Literal, Literal),
}

/// Variable/clause accumulator for an external CDCL engine, plus the
/// Tseitin encoder for the Solver-logic gates (§4.1.2). Owns exactly one
/// `cadical::Solver`; two `Solver`s never share variables (§5).
pub struct Solver {
    inner: cadical::Solver,
    backend: BackendKind,
    num_vars: i32,
    num_clauses: u64,
    solvable: bool,
    preprocessed: bool,
    cache: HashMap<GateKey, Literal>,
}

impl Solver {
    /// Creates a solver bound to the given backend profile. The reserved
    /// TRUE literal (`+1`) is created and asserted as a unit clause.
    pub fn new(backend: BackendKind) -> Solver {
        let mut solver = Solver {
            inner: Self::make_inner(backend),
            backend,
            num_vars: 0,
            num_clauses: 0,
            solvable: true,
            preprocessed: false,
            cache: HashMap::new(),
        };
        solver.seed_true();
        solver
    }

    /// Looks up a backend by its registered name (`"minisat"` or
    /// `"minisatsimp"`). Fails `BackendUnavailable` for any other name.
    pub fn with_backend(name: &str) -> Result<Solver, Error> {
        Ok(Solver::new(name.parse()?))
    }

    fn make_inner(backend: BackendKind) -> cadical::Solver {
        match backend {
            // "plain" disables cadical's internal preprocessing, the
            // closest analogue to vanilla MiniSat's non-simplifying core.
            BackendKind::Minisat => cadical::Solver::with_config("plain")
                .unwrap_or_else(|_| cadical::Solver::new()),
            BackendKind::MinisatSimp => cadical::Solver::new(),
        }
    }

    fn seed_true(&mut self) {
        self.num_vars = 1;
        self.num_clauses = 1;
        self.inner.add_clause([TRUE]);
        log::debug!("solver cleared, backend = {:?}", self.backend);
    }

    /// Resets variable count, clause database and satisfiability flag; the
    /// reserved TRUE literal is re-seeded.
    pub fn clear(&mut self) {
        self.inner = Self::make_inner(self.backend);
        self.solvable = true;
        self.preprocessed = false;
        self.cache.clear();
        self.seed_true();
    }

    /// Allocates a fresh variable. `decision` marks it as one the backend
    /// should branch on (as opposed to an auxiliary Tseitin variable);
    /// under the simplifying profile, decision variables are frozen so
    /// preprocessing never eliminates them. `polarity` is a phase-saving
    /// hint accepted for API parity with the original adapter; the
    /// `cadical` backend manages its own phase heuristics and does not
    /// expose an equivalent knob through this crate's dependency surface.
    pub fn new_var(&mut self, decision: bool, polarity: bool) -> Literal {
        let _ = polarity;
        self.num_vars += 1;
        let var = self.num_vars;
        if decision && self.backend == BackendKind::MinisatSimp {
            self.inner.freeze(var);
        }
        var
    }

    fn fresh_aux(&mut self) -> Literal {
        self.num_vars += 1;
        self.num_vars
    }

    fn raw_clause(&mut self, lits: &[Literal]) {
        self.inner.add_clause(lits.iter().copied());
        self.num_clauses += 1;
    }

    /// Adds a clause. Returns the sticky `solvable` flag: once a `solve()`
    /// call has returned false, it is silently accepted but the flag stays
    /// false until `clear()`.
    pub fn add_clause(&mut self, clause: &[Literal]) -> bool {
        debug_assert!(clause.iter().all(|&l| l != 0));
        self.raw_clause(clause);
        self.solvable
    }

    /// Solves the accumulated clause database. Under the simplifying
    /// profile, the first call runs cadical's own `simplify` preprocessing
    /// pass (elimination, subsumption, etc., bounded to a few rounds) before
    /// `solve`; subsequent calls skip straight to `solve` and reuse whatever
    /// that one-time pass already eliminated.
    pub fn solve(&mut self) -> bool {
        if !self.solvable {
            return false;
        }
        if self.backend == BackendKind::MinisatSimp && !self.preprocessed {
            self.preprocessed = true;
            if let Some(result) = self.inner.simplify(3) {
                self.solvable = result;
                log::debug!(
                    "simplify() decided the instance -> {} ({} vars, {} clauses)",
                    self.solvable,
                    self.num_vars,
                    self.num_clauses
                );
                return self.solvable;
            }
        }
        self.solvable = self.inner.solve().unwrap_or(false);
        log::debug!(
            "solve() -> {} ({} vars, {} clauses)",
            self.solvable,
            self.num_vars,
            self.num_clauses
        );
        self.solvable
    }

    /// The value of `lit` in the last model, or `UNDEF` (`0`) if the
    /// formula is satisfied regardless of `lit`'s value.
    pub fn model_value(&self, lit: Literal) -> Literal {
        debug_assert!(self.solvable);
        match self.inner.value(lit) {
            Some(true) => TRUE,
            Some(false) => FALSE,
            None => UNDEF,
        }
    }

    pub fn is_solvable(&self) -> bool {
        self.solvable
    }

    pub fn variables_count(&self) -> u64 {
        self.num_vars as u64
    }

    pub fn clauses_count(&self) -> u64 {
        self.num_clauses
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    // --- peephole + Tseitin gates (§4.1.2) -------------------------------

    /// `AND`: peephole short-circuits constants, self-identity and
    /// complementary operands; otherwise allocates a non-decision
    /// auxiliary variable and emits the three standard clauses.
    pub fn l_and(&mut self, a: Literal, b: Literal) -> Literal {
        if a == FALSE || b == FALSE {
            return FALSE;
        } else if a == TRUE {
            return b;
        } else if b == TRUE {
            return a;
        } else if a == b {
            return a;
        } else if a == lnot(b) {
            return FALSE;
        }

        let key = GateKey::And(a.min(b), a.max(b));
        if let Some(&c) = self.cache.get(&key) {
            return c;
        }
        let c = self.fresh_aux();
        self.raw_clause(&[a, lnot(c)]);
        self.raw_clause(&[b, lnot(c)]);
        self.raw_clause(&[lnot(a), lnot(b), c]);
        self.cache.insert(key, c);
        c
    }

    /// `OR`, by definition `¬and(¬a, ¬b)`.
    pub fn l_or(&mut self, a: Literal, b: Literal) -> Literal {
        lnot(self.l_and(lnot(a), lnot(b)))
    }

    /// Implication, `¬and(a, ¬b)`.
    pub fn l_leq(&mut self, a: Literal, b: Literal) -> Literal {
        lnot(self.l_and(a, lnot(b)))
    }

    /// `XOR` (the logical sum): peephole short-circuits as for `AND`, plus
    /// the four-clause Tseitin encoding on cache miss.
    pub fn l_xor(&mut self, a: Literal, b: Literal) -> Literal {
        if a == FALSE {
            return b;
        } else if a == TRUE {
            return lnot(b);
        } else if b == FALSE {
            return a;
        } else if b == TRUE {
            return lnot(a);
        } else if a == b {
            return FALSE;
        } else if a == lnot(b) {
            return TRUE;
        }

        let key = GateKey::Xor(a.min(b), a.max(b));
        if let Some(&c) = self.cache.get(&key) {
            return c;
        }
        let c = self.fresh_aux();
        self.raw_clause(&[a, b, lnot(c)]);
        self.raw_clause(&[lnot(a), b, c]);
        self.raw_clause(&[a, lnot(b), c]);
        self.raw_clause(&[lnot(a), lnot(b), lnot(c)]);
        self.cache.insert(key, c);
        c
    }

    /// Equivalence, `xor(a, ¬b)`.
    pub fn l_equ(&mut self, a: Literal, b: Literal) -> Literal {
        self.l_xor(a, lnot(b))
    }

    /// Majority of three literals: short-circuits on any two equal or
    /// complementary operands, or any constant operand (reducing to `or`/
    /// `and` of the remaining two); otherwise a six-clause encoding.
    pub fn l_maj(&mut self, a: Literal, b: Literal, c: Literal) -> Literal {
        if a == b || a == c || b == lnot(c) {
            return a;
        } else if b == c || a == lnot(c) {
            return b;
        } else if a == lnot(b) {
            return c;
        } else if a == FALSE {
            return self.l_and(b, c);
        } else if a == TRUE {
            return self.l_or(b, c);
        } else if b == FALSE {
            return self.l_and(a, c);
        } else if b == TRUE {
            return self.l_or(a, c);
        } else if c == FALSE {
            return self.l_and(a, b);
        } else if c == TRUE {
            return self.l_or(a, b);
        }

        let mut tri = [a, b, c];
        tri.sort_unstable();
        let key = GateKey::Maj(tri[0], tri[1], tri[2]);
        if let Some(&d) = self.cache.get(&key) {
            return d;
        }
        let d = self.fresh_aux();
        self.raw_clause(&[a, b, lnot(d)]);
        self.raw_clause(&[a, c, lnot(d)]);
        self.raw_clause(&[b, c, lnot(d)]);
        self.raw_clause(&[lnot(a), lnot(b), d]);
        self.raw_clause(&[lnot(a), lnot(c), d]);
        self.raw_clause(&[lnot(b), lnot(c), d]);
        self.cache.insert(key, d);
        d
    }

    /// `iff(a, b, c)`: `b` if `a` is true, `c` otherwise (a multiplexer).
    /// `or(and(a,b), and(¬a,c))`, with its own peephole short-circuits and
    /// a four-clause encoding on cache miss.
    pub fn l_iff(&mut self, a: Literal, b: Literal, c: Literal) -> Literal {
        if b == c || a == TRUE {
            return b;
        } else if a == FALSE {
            return c;
        } else if b == lnot(c) {
            return self.l_xor(a, c);
        } else if a == b || b == TRUE {
            return self.l_or(a, c);
        } else if a == lnot(b) || b == FALSE {
            return self.l_and(lnot(a), c);
        } else if a == lnot(c) || c == TRUE {
            return self.l_or(lnot(a), b);
        } else if a == c || c == FALSE {
            return self.l_and(a, b);
        }

        let key = GateKey::Iff(a, b, c);
        if let Some(&d) = self.cache.get(&key) {
            return d;
        }
        let d = self.fresh_aux();
        self.raw_clause(&[lnot(a), lnot(b), d]);
        self.raw_clause(&[lnot(a), b, lnot(d)]);
        self.raw_clause(&[a, lnot(c), d]);
        self.raw_clause(&[a, c, lnot(d)]);
        self.cache.insert(key, d);
        d
    }

    /// `sum = a⊕b⊕c_in`, `c_out = maj(a,b,c_in)`.
    pub fn full_adder(&mut self, a: Literal, b: Literal, c_in: Literal) -> (Literal, Literal) {
        let ab = self.l_xor(a, b);
        let sum = self.l_xor(ab, c_in);
        let c_out = self.l_maj(a, b, c_in);
        (sum, c_out)
    }

    /// Conjunction of `lits`, using the O(n)-clause encoding of §4.1.2
    /// (normalize, then one auxiliary variable) rather than a naive left
    /// fold through `l_and`, to avoid quadratic auxiliary-variable growth.
    pub fn fold_all(&mut self, lits: &[Literal]) -> Literal {
        self.fold_and_or(lits, true)
    }

    /// Disjunction of `lits`, dual of [`Solver::fold_all`].
    pub fn fold_any(&mut self, lits: &[Literal]) -> Literal {
        self.fold_and_or(lits, false)
    }

    fn fold_and_or(&mut self, lits: &[Literal], conjunctive: bool) -> Literal {
        let identity = if conjunctive { TRUE } else { FALSE };
        let absorbing = lnot(identity);

        let mut distinct: Vec<Literal> = Vec::with_capacity(lits.len());
        for &l in lits {
            if l == identity {
                continue;
            }
            if l == absorbing {
                return absorbing;
            }
            if distinct.contains(&lnot(l)) {
                return absorbing;
            }
            if !distinct.contains(&l) {
                distinct.push(l);
            }
        }

        match distinct.len() {
            0 => identity,
            1 => distinct[0],
            _ => {
                let d = self.fresh_aux();
                if conjunctive {
                    // d -> xi for each i, and (x1 & ... & xn) -> d.
                    for &x in &distinct {
                        self.raw_clause(&[lnot(d), x]);
                    }
                    let mut big: Vec<Literal> = distinct.iter().map(|&x| lnot(x)).collect();
                    big.push(d);
                    self.raw_clause(&big);
                } else {
                    // xi -> d for each i, and d -> (x1 | ... | xn).
                    for &x in &distinct {
                        self.raw_clause(&[d, lnot(x)]);
                    }
                    let mut big = distinct.clone();
                    big.push(lnot(d));
                    self.raw_clause(&big);
                }
                d
            }
        }
    }

    /// Logical sum (xor) over `lits`, identity FALSE; a plain left fold
    /// since xor has no absorbing element to normalize against.
    pub fn fold_sum(&mut self, lits: &[Literal]) -> Literal {
        let mut acc = FALSE;
        for &l in lits {
            acc = self.l_xor(acc, l);
        }
        acc
    }

    /// Exactly-one predicate via two running minima (§4.1.2).
    pub fn fold_one(&mut self, lits: &[Literal]) -> Literal {
        let mut min1 = FALSE;
        let mut min2 = FALSE;
        for &l in lits {
            let tmp = self.l_and(min1, l);
            min2 = self.l_or(min2, tmp);
            min1 = self.l_or(min1, l);
        }
        self.l_and(min1, lnot(min2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truth_table2(op: fn(&mut Solver, Literal, Literal) -> Literal, table: [bool; 4]) {
        let lits = [TRUE, FALSE, 2, -2, 3, -3];
        for &a in &lits {
            for &b in &lits {
                let mut solver = Solver::new(BackendKind::Minisat);
                assert_eq!(solver.new_var(true, false), 2);
                assert_eq!(solver.new_var(true, false), 3);
                let c = op(&mut solver, a, b);
                solver.add_clause(&[2]);
                solver.add_clause(&[3]);
                assert!(solver.solve());
                let a = solver.model_value(a) == TRUE;
                let b = solver.model_value(b) == TRUE;
                let c = solver.model_value(c) == TRUE;
                assert_eq!(c, table[2 * (a as usize) + (b as usize)]);
            }
        }
    }

    #[test]
    fn binary_gate_truth_tables() {
        truth_table2(Solver::l_or, [false, true, true, true]);
        truth_table2(Solver::l_and, [false, false, false, true]);
        truth_table2(Solver::l_leq, [true, true, false, true]);
        truth_table2(Solver::l_xor, [false, true, true, false]);
        truth_table2(Solver::l_equ, [true, false, false, true]);
    }

    #[test]
    fn fold_all_any_identities_and_absorbers() {
        let mut s = Solver::new(BackendKind::Minisat);
        assert_eq!(s.fold_all(&[]), TRUE);
        assert_eq!(s.fold_any(&[]), FALSE);
        assert_eq!(s.fold_all(&[TRUE, TRUE]), TRUE);
        assert_eq!(s.fold_all(&[TRUE, FALSE]), FALSE);
        assert_eq!(s.fold_any(&[FALSE, FALSE]), FALSE);
        assert_eq!(s.fold_any(&[FALSE, TRUE]), TRUE);
    }

    #[test]
    fn fold_all_complementary_pair_is_false() {
        let mut s = Solver::new(BackendKind::Minisat);
        let a = s.new_var(true, false);
        assert_eq!(s.fold_all(&[a, lnot(a)]), FALSE);
        assert_eq!(s.fold_any(&[a, lnot(a)]), TRUE);
    }

    #[test]
    fn trivial_unsat_is_sticky() {
        let mut s = Solver::new(BackendKind::Minisat);
        let a = s.new_var(true, false);
        let b = s.new_var(true, false);
        s.add_clause(&[a, b]);
        s.add_clause(&[lnot(a), b]);
        s.add_clause(&[a, lnot(b)]);
        s.add_clause(&[lnot(a), lnot(b)]);
        assert!(!s.solve());
        assert!(s.variables_count() >= 2);
        assert!(s.clauses_count() >= 4);
        // further clauses are accepted silently, solve stays false
        assert!(!s.add_clause(&[a]));
        assert!(!s.solve());
    }

    #[test]
    fn gate_cache_reuses_auxiliary_variables() {
        let mut s = Solver::new(BackendKind::Minisat);
        let a = s.new_var(true, false);
        let b = s.new_var(true, false);
        let c1 = s.l_and(a, b);
        let c2 = s.l_and(b, a);
        assert_eq!(c1, c2);
    }
}
