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

//! `SymmetricGroup`: permutations of `{0, ..., n-1}` represented as `n`x`n`
//! 0/1 matrices, the group of bijections under composition (§4.4.6).

use crate::error::Result;
use crate::logic::Logic;
use crate::shape::Shape;
use crate::tensor::Tensor;

use super::abstract_set::AbstractSet;
use super::group::AbstractGroup;

/// The symmetric group on `n` points. An element is an `n`x`n` matrix with
/// exactly one `TRUE` in every row and every column.
pub struct SymmetricGroup {
    n: usize,
}

impl SymmetricGroup {
    pub fn new(n: usize) -> SymmetricGroup {
        SymmetricGroup { n }
    }

    /// Parity of the permutation: `TRUE` iff it has an even number of
    /// inversions. Grounded on conjugating the `lessthan` order relation
    /// by the permutation matrix and counting the pairs whose order it
    /// reverses.
    pub fn even(&self, a: &Tensor) -> Result<Tensor> {
        let logic = a.logic().clone();
        let order = Tensor::lessthan(&logic, self.n)?;
        let inverse = self.inverse(a)?;

        // conjugated[i,j] == TRUE iff sigma(i) < sigma(j)
        let conjugated = self.product(a, &self.product(&order, &inverse)?)?;
        let reversed = order.and(&conjugated.not()?)?;
        let inversions = reversed.fold_sum_selected(&[0, 1])?;
        inversions.not()
    }
}

impl AbstractSet for SymmetricGroup {
    fn shape(&self) -> Shape {
        Shape::from_dims(&[self.n, self.n]).expect("n > 0")
    }

    fn contains(&self, elem: &Tensor) -> Result<Tensor> {
        let rows_have_one = elem.fold_one_selected(&[1])?.fold_all_selected(&[0])?;
        let cols_have_one = elem.fold_one_selected(&[0])?.fold_all_selected(&[0])?;
        rows_have_one.and(&cols_have_one)
    }
}

impl AbstractGroup for SymmetricGroup {
    fn identity(&self, logic: &Logic) -> Result<Tensor> {
        Tensor::diagonal(logic, self.n)
    }

    fn inverse(&self, a: &Tensor) -> Result<Tensor> {
        a.polymer(a.shape().clone(), &[1, 0])
    }

    fn product(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        let shape3 = Shape::from_dims(&[self.n, self.n, self.n])?;
        let a3 = a.polymer(shape3.clone(), &[0, 1])?;
        let b3 = b.polymer(shape3, &[1, 2])?;
        a3.and(&b3)?.fold_any_selected(&[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::{FALSE, TRUE};

    fn permutation_matrix(n: usize, sigma: &[usize]) -> Tensor {
        let logic = Logic::Boolean;
        let mut storage = vec![FALSE; n * n];
        for (i, &j) in sigma.iter().enumerate() {
            storage[i + n * j] = TRUE;
        }
        Tensor::from_literals(&logic, Shape::from_dims(&[n, n]).unwrap(), storage).unwrap()
    }

    #[test]
    fn identity_is_a_member_and_is_even() {
        let group = SymmetricGroup::new(4);
        let id = group.identity(&Logic::Boolean).unwrap();
        assert_eq!(group.contains(&id).unwrap().get_scalar().unwrap(), TRUE);
        assert_eq!(group.even(&id).unwrap().get_scalar().unwrap(), TRUE);
    }

    #[test]
    fn transposition_is_odd() {
        let group = SymmetricGroup::new(3);
        let swap01 = permutation_matrix(3, &[1, 0, 2]);
        assert_eq!(group.contains(&swap01).unwrap().get_scalar().unwrap(), TRUE);
        assert_eq!(group.even(&swap01).unwrap().get_scalar().unwrap(), FALSE);
    }

    #[test]
    fn inverse_composed_with_self_is_identity() {
        let group = SymmetricGroup::new(3);
        let sigma = permutation_matrix(3, &[2, 0, 1]);
        let inv = group.inverse(&sigma).unwrap();
        let prod = group.product(&sigma, &inv).unwrap();
        let id = group.identity(&Logic::Boolean).unwrap();
        assert_eq!(group.equals(&prod, &id).unwrap().get_scalar().unwrap(), TRUE);
    }

    #[test]
    fn test_axioms_has_no_failures() {
        let group = SymmetricGroup::new(3);
        let failures = group.test_axioms().unwrap();
        assert!(failures.is_empty());
    }

    #[test]
    fn cardinality_matches_factorial() {
        let group = SymmetricGroup::new(4);
        assert_eq!(group.find_cardinality().unwrap(), 24);
    }
}
