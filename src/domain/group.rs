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

//! `AbstractGroup`: identity/inverse/product on top of [`AbstractSet`],
//! plus `test_axioms`, a SAT-backed checker for the five group laws
//! (§4.4.6). `AbstractGroup: AbstractSet` is a proper supertrait
//! relationship, collapsing the original C++ draft's separate
//! `Group::find_cardinality` into the one inherited from `AbstractSet`
//! (see DESIGN.md).

use crate::error::Result;
use crate::literal::TRUE;
use crate::logic::Logic;
use crate::tensor::Tensor;

use super::abstract_set::AbstractSet;

/// One violated group axiom, carrying the counterexample element(s) the
/// solver found (ground, Boolean-logic tensors via `get_solution`).
#[derive(Clone)]
pub struct AxiomFailure {
    pub axiom: &'static str,
    pub witness: Vec<Tensor>,
}

impl AxiomFailure {
    fn new(axiom: &'static str, witness: Vec<Tensor>) -> AxiomFailure {
        AxiomFailure { axiom, witness }
    }
}

pub trait AbstractGroup: AbstractSet {
    /// The identity element, built in the given logic (it has no input
    /// tensor of its own to derive a logic from).
    fn identity(&self, logic: &Logic) -> Result<Tensor>;

    fn inverse(&self, a: &Tensor) -> Result<Tensor>;

    fn product(&self, a: &Tensor, b: &Tensor) -> Result<Tensor>;

    /// Checks the identity-membership axiom directly (no solver needed —
    /// it is a single concrete element), then the remaining five axioms
    /// each via a fresh SAT-backed existential search for a counterexample
    /// (closure under inverse, closure under product, left identity, left
    /// inverse, associativity). Returns one [`AxiomFailure`] per violated
    /// axiom instead of the original's `std::cout` diagnostics, additionally
    /// logging each at `warn` level.
    fn test_axioms(&self) -> Result<Vec<AxiomFailure>> {
        let mut failures = Vec::new();

        {
            let logic = Logic::Boolean;
            let id = self.identity(&logic)?;
            if self.contains(&id)?.get_scalar()? != TRUE {
                let failure = AxiomFailure::new("identity-membership", vec![id]);
                log::warn!("axiom violated: {}", failure.axiom);
                failures.push(failure);
            }
        }

        if let Some(witness) = self.counterexample(1, |this, logic, elems| {
            let inv = this.inverse(&elems[0])?;
            let mem = this.contains(&inv)?;
            let _ = logic;
            mem.not()
        })? {
            let failure = AxiomFailure::new("inverse-closure", witness);
            log::warn!("axiom violated: {}", failure.axiom);
            failures.push(failure);
        }

        if let Some(witness) = self.counterexample(2, |this, logic, elems| {
            let prod = this.product(&elems[0], &elems[1])?;
            let mem = this.contains(&prod)?;
            let _ = logic;
            mem.not()
        })? {
            let failure = AxiomFailure::new("product-closure", witness);
            log::warn!("axiom violated: {}", failure.axiom);
            failures.push(failure);
        }

        if let Some(witness) = self.counterexample(1, |this, logic, elems| {
            let id = this.identity(logic)?;
            let prod = this.product(&id, &elems[0])?;
            let eq = this.equals(&prod, &elems[0])?;
            eq.not()
        })? {
            let failure = AxiomFailure::new("left-identity", witness);
            log::warn!("axiom violated: {}", failure.axiom);
            failures.push(failure);
        }

        if let Some(witness) = self.counterexample(1, |this, logic, elems| {
            let id = this.identity(logic)?;
            let inv = this.inverse(&elems[0])?;
            let prod = this.product(&inv, &elems[0])?;
            let eq = this.equals(&prod, &id)?;
            eq.not()
        })? {
            let failure = AxiomFailure::new("left-inverse", witness);
            log::warn!("axiom violated: {}", failure.axiom);
            failures.push(failure);
        }

        if let Some(witness) = self.counterexample(3, |this, _logic, elems| {
            let left = this.product(&this.product(&elems[0], &elems[1])?, &elems[2])?;
            let right = this.product(&elems[0], &this.product(&elems[1], &elems[2])?)?;
            let eq = this.equals(&left, &right)?;
            eq.not()
        })? {
            let failure = AxiomFailure::new("associativity", witness);
            log::warn!("axiom violated: {}", failure.axiom);
            failures.push(failure);
        }

        Ok(failures)
    }

    /// Runs one SAT-backed search: `arity` fresh elements constrained to
    /// set membership, then `build_violation` asserted as an additional
    /// constraint. A model is a counterexample to the axiom under test;
    /// unsatisfiability means the axiom holds for every tuple of members.
    fn counterexample(
        &self,
        arity: usize,
        build_violation: impl Fn(&Self, &Logic, &[Tensor]) -> Result<Tensor>,
    ) -> Result<Option<Vec<Tensor>>>
    where
        Self: Sized,
    {
        let logic = Logic::solver("minisatsimp")?;
        let mut elems = Vec::with_capacity(arity);
        for _ in 0..arity {
            let e = Tensor::variable(&logic, self.shape(), true, false);
            let membership = self.contains(&e)?;
            logic.add_clause(&[membership.get_scalar()?]);
            elems.push(e);
        }
        let violation = build_violation(self, &logic, &elems)?;
        logic.add_clause(&[violation.get_scalar()?]);
        if logic.solve() {
            Ok(Some(elems.iter().map(Tensor::get_solution).collect()))
        } else {
            Ok(None)
        }
    }
}
