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

//! `AbstractClone`/`Operations`: the functional clone of `arity`-ary
//! operations over a domain of `n` elements (§4.4.6). An operation is
//! represented as a `(n^arity, n)` matrix: row `r` is the one-hot output
//! for the input tuple whose digits (base `n`, axis-0-fastest, matching
//! every other shape in this crate) decode from `r`.

use crate::error::{Error, Result};
use crate::literal::{Literal, FALSE, TRUE};
use crate::logic::Logic;
use crate::shape::Shape;
use crate::tensor::Tensor;

use super::abstract_set::AbstractSet;

/// Shared surface of the functional-clone domain helpers: a domain size,
/// an arity, and the element shape/membership predicate they induce.
pub trait AbstractClone: AbstractSet {
    fn domain_size(&self) -> usize;
    fn arity(&self) -> usize;
}

/// The set of `arity`-ary operations on `{0, ..., n-1}`.
pub struct Operations {
    n: usize,
    arity: usize,
}

impl Operations {
    pub fn new(n: usize, arity: usize) -> Operations {
        Operations { n, arity }
    }

    fn rows(&self) -> usize {
        self.n.pow(self.arity as u32)
    }

    /// The `index`-th projection: `f(x0, ..., x_{arity-1}) = x_index`.
    pub fn projection(&self, logic: &Logic, index: usize) -> Result<Tensor> {
        if index >= self.arity {
            return Err(Error::shape_mismatch("projection index out of range"));
        }
        let rows = self.rows();
        let mut storage = vec![FALSE; rows * self.n];
        let divisor = self.n.pow(index as u32);
        for r in 0..rows {
            let digit = (r / divisor) % self.n;
            storage[r + rows * digit] = TRUE;
        }
        Tensor::from_literals(logic, self.shape(), storage)
    }

    /// Composes the outer operation `g` (an element of `self`, `arity`-ary
    /// on the same domain) with `self.arity()` inner operations `fs`, each
    /// sharing one `m`-ary shape, into `h(x) = g(f0(x), ..., f_{k-1}(x))`.
    ///
    /// The original C++ implementation left `compose` an unfinished stub
    /// that always returned a fixed projection; this computes the
    /// composite directly as a finite contraction over `g`'s input rows,
    /// using the shared logic's `and`/`or` gates (SPEC_FULL.md §3).
    pub fn compose(&self, g: &Tensor, fs: &[Tensor]) -> Result<Tensor> {
        if fs.len() != self.arity {
            return Err(Error::shape_mismatch(
                "compose requires exactly `arity` inner operations",
            ));
        }
        if g.shape() != &self.shape() {
            return Err(Error::shape_mismatch(
                "outer operation does not match this Operations' shape",
            ));
        }
        let inner_shape = fs[0].shape().clone();
        let mut logic = g.logic().clone();
        for f in fs {
            if f.shape() != &inner_shape {
                return Err(Error::shape_mismatch(
                    "compose requires every inner operation to share a shape",
                ));
            }
            logic = Logic::join(&logic, f.logic())?;
        }

        let rows_in = inner_shape.head()?;
        let rows_out = self.rows();
        let mut out = vec![FALSE; rows_in * self.n];

        for r in 0..rows_in {
            for inner_row in 0..rows_out {
                let mut term: Literal = TRUE;
                let mut code = inner_row;
                for f in fs {
                    let yi = code % self.n;
                    code /= self.n;
                    let bit = f.storage()[r + rows_in * yi];
                    term = logic.and(term, bit)?;
                    if term == FALSE {
                        break;
                    }
                }
                if term == FALSE {
                    continue;
                }
                for c in 0..self.n {
                    let gbit = g.storage()[inner_row + rows_out * c];
                    let contrib = logic.and(term, gbit)?;
                    let idx = r + rows_in * c;
                    out[idx] = logic.or(out[idx], contrib)?;
                }
            }
        }

        Tensor::from_literals(&logic, Shape::from_dims(&[rows_in, self.n])?, out)
    }
}

impl AbstractSet for Operations {
    fn shape(&self) -> Shape {
        Shape::from_dims(&[self.rows(), self.n]).expect("n > 0")
    }

    /// Every row has exactly one `TRUE` column (the output axis), and that
    /// must hold for every row (every input tuple), not just some row: a
    /// partial relation that is one-hot on only a subset of its rows is not
    /// a total function, so the input axis is folded with `fold_all`, not
    /// `fold_any` (see DESIGN.md's Open Question on this).
    fn contains(&self, elem: &Tensor) -> Result<Tensor> {
        elem.fold_one_selected(&[1])?.fold_all_selected(&[0])
    }
}

impl AbstractClone for Operations {
    fn domain_size(&self) -> usize {
        self.n
    }

    fn arity(&self) -> usize {
        self.arity
    }
}
