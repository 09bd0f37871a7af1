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

//! The `Logic` abstraction: a virtual-dispatch-to-tagged-variant gate
//! interface (§9) with two backends — a pure two-valued Boolean evaluator
//! (§4.1.1) and a Solver-backed Tseitin encoder (§4.1.2). Every `Tensor` is
//! bound to exactly one `Logic` instance; gates on tensors from different
//! logics must go through [`Logic::join`] first.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::literal::{is_boolean_literal, lnot, Literal, FALSE, TRUE};
use crate::solver::{BackendKind, Solver};

/// The shared evaluation context a `Tensor` is bound to.
///
/// `Boolean` literals are interpreted directly as `{TRUE, FALSE}` and every
/// gate is a truth-table lookup with no side effects; this is what
/// `constant`-built tensors and ground model extraction use. `Solver`
/// literals are opaque CNF variables interpreted through a shared,
/// reference-counted adapter — single-threaded, not `Send`, matching §5's
/// concurrency model (a deliberate `Rc<RefCell<_>>` rather than the
/// `Arc<Mutex<_>>` a multi-threaded adapter would need, since nothing in
/// this crate's scope crosses a thread boundary).
#[derive(Clone)]
pub enum Logic {
    Boolean,
    Solver(Rc<RefCell<Solver>>),
}

impl Logic {
    /// A fresh Solver-backed logic using the named backend profile.
    pub fn solver(backend_name: &str) -> Result<Logic> {
        let backend: BackendKind = backend_name.parse()?;
        Ok(Logic::Solver(Rc::new(RefCell::new(Solver::new(backend)))))
    }

    pub fn from_backend(backend: BackendKind) -> Logic {
        Logic::Solver(Rc::new(RefCell::new(Solver::new(backend))))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Logic::Boolean)
    }

    /// Combines two logics a binary tensor operation is about to straddle.
    /// Two Boolean logics, or a Boolean logic paired with any Solver logic,
    /// unify to the non-Boolean side (Boolean tensors are ordinary
    /// constants in any logic). Two distinct Solver logics never unify.
    pub fn join(a: &Logic, b: &Logic) -> Result<Logic> {
        match (a, b) {
            (Logic::Boolean, Logic::Boolean) => Ok(Logic::Boolean),
            (Logic::Boolean, other) | (other, Logic::Boolean) => Ok(other.clone()),
            (Logic::Solver(x), Logic::Solver(y)) => {
                if Rc::ptr_eq(x, y) {
                    Ok(a.clone())
                } else {
                    Err(Error::LogicMismatch)
                }
            }
        }
    }

    fn check_boolean(l: Literal) -> Result<Literal> {
        if is_boolean_literal(l) {
            Ok(l)
        } else {
            Err(Error::invalid_literal(l, "not a Boolean-logic literal"))
        }
    }

    /// Allocates a new literal, a decision variable under the Solver logic
    /// or one of `{TRUE, FALSE}` (chosen by `polarity`) under the Boolean
    /// logic, where there is no solver to allocate a genuinely free
    /// variable from.
    pub fn new_lit(&self, decision: bool, polarity: bool) -> Literal {
        match self {
            Logic::Boolean => {
                let _ = decision;
                if polarity {
                    TRUE
                } else {
                    FALSE
                }
            }
            Logic::Solver(s) => s.borrow_mut().new_var(decision, polarity),
        }
    }

    pub fn not(&self, a: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => Ok(lnot(Self::check_boolean(a)?)),
            Logic::Solver(_) => Ok(lnot(a)),
        }
    }

    pub fn and(&self, a: Literal, b: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                Ok(lift_and(Self::check_boolean(a)?, Self::check_boolean(b)?))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().l_and(a, b)),
        }
    }

    pub fn or(&self, a: Literal, b: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                Ok(lift_or(Self::check_boolean(a)?, Self::check_boolean(b)?))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().l_or(a, b)),
        }
    }

    pub fn leq(&self, a: Literal, b: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => Ok(lnot(lift_and(
                Self::check_boolean(a)?,
                lnot(Self::check_boolean(b)?),
            ))),
            Logic::Solver(s) => Ok(s.borrow_mut().l_leq(a, b)),
        }
    }

    pub fn add(&self, a: Literal, b: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                let a = Self::check_boolean(a)?;
                let b = Self::check_boolean(b)?;
                Ok(if a == b { FALSE } else { TRUE })
            }
            Logic::Solver(s) => Ok(s.borrow_mut().l_xor(a, b)),
        }
    }

    pub fn equ(&self, a: Literal, b: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                let a = Self::check_boolean(a)?;
                let b = Self::check_boolean(b)?;
                Ok(if a == b { TRUE } else { FALSE })
            }
            Logic::Solver(s) => Ok(s.borrow_mut().l_equ(a, b)),
        }
    }

    pub fn maj(&self, a: Literal, b: Literal, c: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                let a = Self::check_boolean(a)? == TRUE;
                let b = Self::check_boolean(b)? == TRUE;
                let c = Self::check_boolean(c)? == TRUE;
                Ok(lift_bool((a as u8 + b as u8 + c as u8) >= 2))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().l_maj(a, b, c)),
        }
    }

    pub fn iff(&self, a: Literal, b: Literal, c: Literal) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                let a = Self::check_boolean(a)?;
                Self::check_boolean(b)?;
                Self::check_boolean(c)?;
                Ok(if a == TRUE { b } else { c })
            }
            Logic::Solver(s) => Ok(s.borrow_mut().l_iff(a, b, c)),
        }
    }

    pub fn full_adder(&self, a: Literal, b: Literal, c_in: Literal) -> Result<(Literal, Literal)> {
        match self {
            Logic::Boolean => {
                let sum = self.add(self.add(a, b)?, c_in)?;
                let c_out = self.maj(a, b, c_in)?;
                Ok((sum, c_out))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().full_adder(a, b, c_in)),
        }
    }

    pub fn fold_all(&self, lits: &[Literal]) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                for &l in lits {
                    Self::check_boolean(l)?;
                }
                Ok(lift_bool(lits.iter().all(|&l| l == TRUE)))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().fold_all(lits)),
        }
    }

    pub fn fold_any(&self, lits: &[Literal]) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                for &l in lits {
                    Self::check_boolean(l)?;
                }
                Ok(lift_bool(lits.iter().any(|&l| l == TRUE)))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().fold_any(lits)),
        }
    }

    pub fn fold_sum(&self, lits: &[Literal]) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                let mut acc = false;
                for &l in lits {
                    acc ^= Self::check_boolean(l)? == TRUE;
                }
                Ok(lift_bool(acc))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().fold_sum(lits)),
        }
    }

    pub fn fold_one(&self, lits: &[Literal]) -> Result<Literal> {
        match self {
            Logic::Boolean => {
                let mut count = 0;
                for &l in lits {
                    if Self::check_boolean(l)? == TRUE {
                        count += 1;
                    }
                }
                Ok(lift_bool(count == 1))
            }
            Logic::Solver(s) => Ok(s.borrow_mut().fold_one(lits)),
        }
    }

    /// Adds a blocking/model clause to the backing solver. A no-op under
    /// the Boolean logic (there is no clause database to extend); callers
    /// that enumerate models only ever do so under a Solver logic.
    pub fn add_clause(&self, clause: &[Literal]) -> bool {
        match self {
            Logic::Boolean => true,
            Logic::Solver(s) => s.borrow_mut().add_clause(clause),
        }
    }

    pub fn solve(&self) -> bool {
        match self {
            Logic::Boolean => true,
            Logic::Solver(s) => s.borrow_mut().solve(),
        }
    }

    pub fn model_value(&self, lit: Literal) -> Literal {
        match self {
            Logic::Boolean => lit,
            Logic::Solver(s) => s.borrow().model_value(lit),
        }
    }
}

fn lift_bool(b: bool) -> Literal {
    if b {
        TRUE
    } else {
        FALSE
    }
}

fn lift_and(a: Literal, b: Literal) -> Literal {
    lift_bool(a == TRUE && b == TRUE)
}

fn lift_or(a: Literal, b: Literal) -> Literal {
    lift_bool(a == TRUE || b == TRUE)
}

impl PartialEq for Logic {
    fn eq(&self, other: &Logic) -> bool {
        match (self, other) {
            (Logic::Boolean, Logic::Boolean) => true,
            (Logic::Solver(a), Logic::Solver(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_gates_match_truth_tables() {
        let logic = Logic::Boolean;
        assert_eq!(logic.and(TRUE, FALSE).unwrap(), FALSE);
        assert_eq!(logic.or(TRUE, FALSE).unwrap(), TRUE);
        assert_eq!(logic.add(TRUE, TRUE).unwrap(), FALSE);
        assert_eq!(logic.maj(TRUE, TRUE, FALSE).unwrap(), TRUE);
        assert_eq!(logic.iff(TRUE, TRUE, FALSE).unwrap(), TRUE);
        assert_eq!(logic.iff(FALSE, TRUE, FALSE).unwrap(), FALSE);
    }

    #[test]
    fn boolean_logic_rejects_non_boolean_literal() {
        let logic = Logic::Boolean;
        assert!(logic.and(2, TRUE).is_err());
    }

    #[test]
    fn join_unifies_boolean_into_solver_and_detects_mismatch() {
        let s1 = Logic::solver("minisat").unwrap();
        let s2 = Logic::solver("minisat").unwrap();
        assert!(Logic::join(&Logic::Boolean, &s1).is_ok());
        assert!(Logic::join(&s1, &s1).is_ok());
        assert!(matches!(
            Logic::join(&s1, &s2),
            Err(Error::LogicMismatch)
        ));
    }

    #[test]
    fn solver_logic_allocates_and_evaluates() {
        let logic = Logic::solver("minisat").unwrap();
        let a = logic.new_lit(true, false);
        let b = logic.new_lit(true, false);
        let c = logic.and(a, b).unwrap();
        logic.add_clause(&[a]);
        logic.add_clause(&[b]);
        assert!(logic.solve());
        assert_eq!(logic.model_value(c), TRUE);
    }
}
