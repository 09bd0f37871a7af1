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

//! `AbstractSet`: a predicate over a fixed element shape, with equality and
//! SAT-backed enumeration built once on top of `contains` (§4.4.6).

use crate::error::Result;
use crate::logic::Logic;
use crate::shape::Shape;
use crate::tensor::Tensor;

/// A set of elements of a fixed [`Shape`], defined by a membership
/// predicate. `equals`, `find_elements` and `find_cardinality` are default
/// methods built only from `shape` and `contains` — any implementor gets
/// enumeration for free.
pub trait AbstractSet {
    /// The shape a single element of this set has.
    fn shape(&self) -> Shape;

    /// A scalar (extent-1) tensor: `TRUE` iff `elem` belongs to this set.
    fn contains(&self, elem: &Tensor) -> Result<Tensor>;

    /// `TRUE` iff `a` and `b` are the same element, computed elementwise
    /// and folded over every axis. Either the direct
    /// `fold_all_selected(all axes)` route or a `reshape`-then-`fold_all`
    /// route are legitimate expressions of the same operation (§3 of
    /// SPEC_FULL.md); this uses the former.
    fn equals(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        let eq = a.equ(b)?;
        let axes: Vec<usize> = (0..self.shape().length()).collect();
        eq.fold_all_selected(&axes)
    }

    /// Enumerates up to `limit` distinct elements of this set via the
    /// enumerate-with-blocking-loop pattern (§9): allocate one free
    /// element, constrain it to satisfy `contains`, then repeatedly solve
    /// and block the model just found until either `limit` is reached or
    /// the formula becomes unsatisfiable.
    fn find_elements(&self, limit: usize) -> Result<Vec<Tensor>> {
        let logic = Logic::solver("minisatsimp")?;
        let elem = Tensor::variable(&logic, self.shape(), true, false);
        let membership = self.contains(&elem)?;
        logic.add_clause(&[membership.get_scalar()?]);

        let mut found = Vec::new();
        while found.len() < limit && logic.solve() {
            found.push(elem.get_solution());
            let mut blocking = Vec::new();
            elem.extend_clause(&mut blocking);
            logic.add_clause(&blocking);
        }
        log::debug!("find_elements found {} element(s)", found.len());
        Ok(found)
    }

    /// The number of distinct elements in this set.
    fn find_cardinality(&self) -> Result<usize> {
        let count = self.find_elements(usize::MAX)?.len();
        log::debug!("find_cardinality = {}", count);
        Ok(count)
    }
}
