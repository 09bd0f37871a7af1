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

//! Shaped arrays of literals bound to a single [`Logic`] (§4.4). This is
//! the crate's largest component: constructors, shape transformations
//! (`polymer`, `reshape`, `slices`/`stack`), elementwise gates, axis folds,
//! and scalar/model extraction all live here.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::index::{strides_of, Cursor};
use crate::literal::{lnot, Literal, FALSE, TRUE};
use crate::logic::Logic;
use crate::shape::Shape;

/// A shaped, immutable array of literals bound to one [`Logic`] instance.
/// Cheap to clone: storage is reference-counted and never mutated in
/// place, so every transformation below returns a new `Tensor`.
#[derive(Clone)]
pub struct Tensor {
    logic: Logic,
    shape: Shape,
    storage: Rc<[Literal]>,
}

impl Tensor {
    pub fn logic(&self) -> &Logic {
        &self.logic
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn storage(&self) -> &[Literal] {
        &self.storage
    }

    // --- constructors (§4.4.1) -------------------------------------------

    /// A tensor of fresh literals, one per element of `shape`.
    pub fn variable(logic: &Logic, shape: Shape, decision: bool, polarity: bool) -> Tensor {
        let n = shape.extent() as usize;
        let storage: Vec<Literal> = (0..n).map(|_| logic.new_lit(decision, polarity)).collect();
        Tensor {
            logic: logic.clone(),
            shape,
            storage: storage.into(),
        }
    }

    /// A tensor where every element is the constant `TRUE` or `FALSE`.
    pub fn constant(logic: &Logic, shape: Shape, value: bool) -> Tensor {
        Self::constant_lit(logic, shape, if value { TRUE } else { FALSE })
    }

    /// A tensor where every element is the given literal, unchecked beyond
    /// what `from_literals` would check (callers are expected to pass a
    /// literal already meaningful in `logic`).
    pub fn constant_lit(logic: &Logic, shape: Shape, lit: Literal) -> Tensor {
        let n = shape.extent() as usize;
        Tensor {
            logic: logic.clone(),
            shape,
            storage: vec![lit; n].into(),
        }
    }

    /// Wraps an explicit, first-axis-fastest-ordered literal buffer.
    pub fn from_literals(logic: &Logic, shape: Shape, literals: Vec<Literal>) -> Result<Tensor> {
        if literals.len() as u64 != shape.extent() {
            return Err(Error::shape_mismatch(
                "literal buffer length must match the shape's extent",
            ));
        }
        Ok(Tensor {
            logic: logic.clone(),
            shape,
            storage: literals.into(),
        })
    }

    /// The `n`x`n` identity relation: `TRUE` on the diagonal, `FALSE`
    /// elsewhere.
    pub fn diagonal(logic: &Logic, n: usize) -> Result<Tensor> {
        let shape = Shape::from_dims(&[n, n])?;
        let mut storage = vec![FALSE; n * n];
        for i in 0..n {
            storage[i + n * i] = TRUE;
        }
        Ok(Tensor {
            logic: logic.clone(),
            shape,
            storage: storage.into(),
        })
    }

    /// The `n`x`n` strict order relation: `storage[i,j] = TRUE` iff `i < j`.
    /// Used by `SymmetricGroup` to count inversions when determining
    /// permutation parity.
    pub fn lessthan(logic: &Logic, n: usize) -> Result<Tensor> {
        let shape = Shape::from_dims(&[n, n])?;
        let mut storage = vec![FALSE; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                storage[i + n * j] = TRUE;
            }
        }
        Ok(Tensor {
            logic: logic.clone(),
            shape,
            storage: storage.into(),
        })
    }

    // --- shape operations (§4.4.2) ---------------------------------------

    /// The generalized permute/broadcast/diagonal-extraction primitive.
    /// `mapping` has one entry per axis of `self`'s shape, naming which
    /// axis of `new_shape` that source axis's coordinate is driven by.
    /// Two source axes naming the same destination axis extracts their
    /// diagonal (and must agree on extent); a destination axis named by no
    /// source axis is a broadcast axis, read at every coordinate.
    pub fn polymer(&self, new_shape: Shape, mapping: &[usize]) -> Result<Tensor> {
        let old_dims = self.shape.dims();
        if mapping.len() != old_dims.len() {
            return Err(Error::shape_mismatch(
                "polymer mapping length must equal the source tensor's rank",
            ));
        }
        let new_dims = new_shape.dims();
        let old_strides = strides_of(&old_dims);
        let mut new_strides = vec![0u64; new_dims.len()];
        for (old_axis, &new_axis) in mapping.iter().enumerate() {
            if new_axis >= new_dims.len() {
                return Err(Error::shape_mismatch(
                    "polymer mapping references an out-of-range destination axis",
                ));
            }
            if old_dims[old_axis] != new_dims[new_axis] {
                return Err(Error::shape_mismatch(
                    "polymer mapping must align equal-sized axes",
                ));
            }
            new_strides[new_axis] += old_strides[old_axis];
        }

        let mut storage = Vec::with_capacity(new_shape.extent() as usize);
        let mut cursor = Cursor::new(new_dims, new_strides);
        while !cursor.is_done() {
            storage.push(self.storage[cursor.index() as usize]);
            cursor.advance();
        }
        Ok(Tensor {
            logic: self.logic.clone(),
            shape: new_shape,
            storage: storage.into(),
        })
    }

    /// Reinterprets the storage under a new shape of the same extent. The
    /// first-axis-fastest flattening is shared by every shape of a given
    /// extent, so this never copies.
    pub fn reshape(&self, new_shape: Shape) -> Result<Tensor> {
        if new_shape.extent() != self.shape.extent() {
            return Err(Error::shape_mismatch(
                "reshape must preserve the tensor's extent",
            ));
        }
        Ok(Tensor {
            logic: self.logic.clone(),
            shape: new_shape,
            storage: self.storage.clone(),
        })
    }

    /// Splits axis 0 into `head` tensors, each shaped like `self`'s tail.
    pub fn slices(&self) -> Result<Vec<Tensor>> {
        let d0 = self.shape.head()?;
        let tail_shape = self.shape.tail()?;
        let tail_extent = tail_shape.extent() as usize;
        let mut out = Vec::with_capacity(d0);
        for i in 0..d0 {
            let mut buf = Vec::with_capacity(tail_extent);
            for t in 0..tail_extent {
                buf.push(self.storage[i + d0 * t]);
            }
            out.push(Tensor {
                logic: self.logic.clone(),
                shape: tail_shape.clone(),
                storage: buf.into(),
            });
        }
        Ok(out)
    }

    /// Inverse of [`Tensor::slices`]: stacks tensors of identical shape
    /// into one tensor with a new leading axis of extent `tensors.len()`.
    pub fn stack(tensors: &[Tensor]) -> Result<Tensor> {
        let first = tensors
            .first()
            .ok_or_else(|| Error::shape_mismatch("stack requires at least one tensor"))?;
        let tail_shape = first.shape.clone();
        let mut logic = first.logic.clone();
        for t in &tensors[1..] {
            if t.shape != tail_shape {
                return Err(Error::shape_mismatch(
                    "stack requires every tensor to share a shape",
                ));
            }
            logic = Logic::join(&logic, &t.logic)?;
        }

        let d0 = tensors.len();
        let tail_extent = tail_shape.extent() as usize;
        let mut storage = vec![0 as Literal; d0 * tail_extent];
        for (i, t) in tensors.iter().enumerate() {
            for tpos in 0..tail_extent {
                storage[i + d0 * tpos] = t.storage[tpos];
            }
        }
        let shape = Shape::cons(d0, &tail_shape)?;
        Ok(Tensor {
            logic,
            shape,
            storage: storage.into(),
        })
    }

    // --- elementwise operations (§4.4.3) ----------------------------------

    pub fn not(&self) -> Result<Tensor> {
        let storage = self
            .storage
            .iter()
            .map(|&l| self.logic.not(l))
            .collect::<Result<Vec<_>>>()?;
        Ok(Tensor {
            logic: self.logic.clone(),
            shape: self.shape.clone(),
            storage: storage.into(),
        })
    }

    fn zip2(a: &Tensor, b: &Tensor, op: impl Fn(&Logic, Literal, Literal) -> Result<Literal>) -> Result<Tensor> {
        if a.shape != b.shape {
            return Err(Error::shape_mismatch(
                "elementwise operands must share a shape",
            ));
        }
        let logic = Logic::join(&a.logic, &b.logic)?;
        let mut storage = Vec::with_capacity(a.storage.len());
        for i in 0..a.storage.len() {
            storage.push(op(&logic, a.storage[i], b.storage[i])?);
        }
        Ok(Tensor {
            logic,
            shape: a.shape.clone(),
            storage: storage.into(),
        })
    }

    fn zip3(
        a: &Tensor,
        b: &Tensor,
        c: &Tensor,
        op: impl Fn(&Logic, Literal, Literal, Literal) -> Result<Literal>,
    ) -> Result<Tensor> {
        if a.shape != b.shape || a.shape != c.shape {
            return Err(Error::shape_mismatch(
                "elementwise operands must share a shape",
            ));
        }
        let logic = Logic::join(&Logic::join(&a.logic, &b.logic)?, &c.logic)?;
        let mut storage = Vec::with_capacity(a.storage.len());
        for i in 0..a.storage.len() {
            storage.push(op(&logic, a.storage[i], b.storage[i], c.storage[i])?);
        }
        Ok(Tensor {
            logic,
            shape: a.shape.clone(),
            storage: storage.into(),
        })
    }

    pub fn and(&self, other: &Tensor) -> Result<Tensor> {
        Self::zip2(self, other, Logic::and)
    }

    pub fn or(&self, other: &Tensor) -> Result<Tensor> {
        Self::zip2(self, other, Logic::or)
    }

    pub fn leq(&self, other: &Tensor) -> Result<Tensor> {
        Self::zip2(self, other, Logic::leq)
    }

    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        Self::zip2(self, other, Logic::add)
    }

    pub fn equ(&self, other: &Tensor) -> Result<Tensor> {
        Self::zip2(self, other, Logic::equ)
    }

    pub fn maj(a: &Tensor, b: &Tensor, c: &Tensor) -> Result<Tensor> {
        Self::zip3(a, b, c, Logic::maj)
    }

    pub fn iff(a: &Tensor, b: &Tensor, c: &Tensor) -> Result<Tensor> {
        Self::zip3(a, b, c, Logic::iff)
    }

    // --- reductions (§4.4.4) ----------------------------------------------

    fn fold_axis0(&self, fold: impl Fn(&Logic, &[Literal]) -> Result<Literal>) -> Result<Tensor> {
        let d0 = self.shape.head()?;
        let tail_shape = self.shape.tail()?;
        let tail_extent = tail_shape.extent() as usize;
        let mut storage = Vec::with_capacity(tail_extent);
        let mut buf = vec![0 as Literal; d0];
        for t in 0..tail_extent {
            for i in 0..d0 {
                buf[i] = self.storage[i + d0 * t];
            }
            storage.push(fold(&self.logic, &buf)?);
        }
        Ok(Tensor {
            logic: self.logic.clone(),
            shape: tail_shape,
            storage: storage.into(),
        })
    }

    pub fn fold_all(&self) -> Result<Tensor> {
        self.fold_axis0(Logic::fold_all)
    }

    pub fn fold_any(&self) -> Result<Tensor> {
        self.fold_axis0(Logic::fold_any)
    }

    pub fn fold_sum(&self) -> Result<Tensor> {
        self.fold_axis0(Logic::fold_sum)
    }

    pub fn fold_one(&self) -> Result<Tensor> {
        self.fold_axis0(Logic::fold_one)
    }

    /// Folds over an arbitrary subset of axes (not just axis 0), returning
    /// a tensor over the remaining axes in their original relative order.
    /// `Set::equals` uses this with every axis selected as the
    /// `fold_all_selected` alternative to reshaping down to a flat vector
    /// first (§3 of SPEC_FULL.md).
    fn fold_selected(
        &self,
        axes: &[usize],
        fold: impl Fn(&Logic, &[Literal]) -> Result<Literal>,
    ) -> Result<Tensor> {
        let dims = self.shape.dims();
        let rank = dims.len();
        let mut fold_mask = vec![false; rank];
        for &axis in axes {
            if axis >= rank {
                return Err(Error::shape_mismatch("fold axis out of range"));
            }
            fold_mask[axis] = true;
        }
        let strides = strides_of(&dims);

        let kept_axes: Vec<usize> = (0..rank).filter(|&i| !fold_mask[i]).collect();
        let kept_dims: Vec<usize> = kept_axes.iter().map(|&i| dims[i]).collect();
        let kept_strides: Vec<u64> = kept_axes.iter().map(|&i| strides[i]).collect();

        let folded_axes: Vec<usize> = (0..rank).filter(|&i| fold_mask[i]).collect();
        let folded_dims: Vec<usize> = folded_axes.iter().map(|&i| dims[i]).collect();
        let folded_strides: Vec<u64> = folded_axes.iter().map(|&i| strides[i]).collect();
        let folded_extent: usize = folded_dims.iter().product::<usize>().max(1);

        let new_shape = Shape::from_dims(&kept_dims)?;
        let mut out = Vec::with_capacity(new_shape.extent() as usize);
        let mut outer = Cursor::new(kept_dims, kept_strides);
        while !outer.is_done() {
            let base = outer.index();
            let mut buf = Vec::with_capacity(folded_extent);
            let mut inner = Cursor::new(folded_dims.clone(), folded_strides.clone());
            while !inner.is_done() {
                buf.push(self.storage[(base + inner.index()) as usize]);
                inner.advance();
            }
            out.push(fold(&self.logic, &buf)?);
            outer.advance();
        }
        Ok(Tensor {
            logic: self.logic.clone(),
            shape: new_shape,
            storage: out.into(),
        })
    }

    pub fn fold_all_selected(&self, axes: &[usize]) -> Result<Tensor> {
        self.fold_selected(axes, Logic::fold_all)
    }

    pub fn fold_any_selected(&self, axes: &[usize]) -> Result<Tensor> {
        self.fold_selected(axes, Logic::fold_any)
    }

    pub fn fold_sum_selected(&self, axes: &[usize]) -> Result<Tensor> {
        self.fold_selected(axes, Logic::fold_sum)
    }

    pub fn fold_one_selected(&self, axes: &[usize]) -> Result<Tensor> {
        self.fold_selected(axes, Logic::fold_one)
    }

    // --- scalar and model operations (§4.4.5) -----------------------------

    /// The single literal of an extent-1 tensor. Fails `NotScalar` for any
    /// other extent.
    pub fn get_scalar(&self) -> Result<Literal> {
        if self.shape.extent() != 1 {
            return Err(Error::NotScalar(self.shape.clone(), self.shape.extent()));
        }
        Ok(self.storage[0])
    }

    /// Evaluates every element against the last model found by this
    /// tensor's (Solver) logic, returning a Boolean-logic tensor of the
    /// same shape. A no-op relabeling under the Boolean logic.
    pub fn get_solution(&self) -> Tensor {
        let storage: Vec<Literal> = self
            .storage
            .iter()
            .map(|&l| self.logic.model_value(l))
            .collect();
        Tensor {
            logic: Logic::Boolean,
            shape: self.shape.clone(),
            storage: storage.into(),
        }
    }

    /// Appends the blocking-clause term for each element's current model
    /// value to `out`: the literal that would need to flip for this
    /// element to disagree with the model just found. Used by
    /// `find_elements`/`find_cardinality`-style enumeration loops to
    /// forbid repeating an already-seen assignment (§9).
    pub fn extend_clause(&self, out: &mut Vec<Literal>) {
        for &l in self.storage.iter() {
            let term = if self.logic.model_value(l) == TRUE {
                lnot(l)
            } else {
                l
            };
            out.push(term);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::is_boolean_literal;

    fn lit(n: i32) -> Literal {
        n
    }

    #[test]
    fn constant_and_elementwise_gates() {
        let logic = Logic::Boolean;
        let shape = Shape::from_dims(&[2, 2]).unwrap();
        let t = Tensor::constant(&logic, shape.clone(), true);
        let f = Tensor::constant(&logic, shape, false);
        let r = t.and(&f).unwrap();
        assert!(r.storage().iter().all(|&l| l == FALSE));
        let r = t.or(&f).unwrap();
        assert!(r.storage().iter().all(|&l| l == TRUE));
    }

    #[test]
    fn elementwise_requires_matching_shape() {
        let logic = Logic::Boolean;
        let a = Tensor::constant(&logic, Shape::from_dims(&[2]).unwrap(), true);
        let b = Tensor::constant(&logic, Shape::from_dims(&[3]).unwrap(), true);
        assert!(matches!(a.and(&b), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn polymer_transposes_a_matrix() {
        let logic = Logic::Boolean;
        let shape = Shape::from_dims(&[2, 3]).unwrap();
        let literals: Vec<Literal> = (0..6).map(lit).collect();
        let t = Tensor::from_literals(&logic, shape, literals).unwrap();
        let transposed_shape = Shape::from_dims(&[3, 2]).unwrap();
        let transposed = t.polymer(transposed_shape, &[1, 0]).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(
                    t.storage()[i + 2 * j],
                    transposed.storage()[j + 3 * i]
                );
            }
        }
    }

    #[test]
    fn polymer_extracts_the_diagonal() {
        let logic = Logic::Boolean;
        let d = Tensor::diagonal(&logic, 3).unwrap();
        let diag_shape = Shape::from_dims(&[3]).unwrap();
        let diag = d.polymer(diag_shape, &[0, 0]).unwrap();
        assert!(diag.storage().iter().all(|&l| l == TRUE));
    }

    #[test]
    fn polymer_broadcasts_a_vector() {
        let logic = Logic::Boolean;
        let shape = Shape::from_dims(&[2]).unwrap();
        let literals = vec![TRUE, FALSE];
        let t = Tensor::from_literals(&logic, shape, literals).unwrap();
        let broadcast_shape = Shape::from_dims(&[2, 4]).unwrap();
        let broadcast = t.polymer(broadcast_shape, &[0]).unwrap();
        for j in 0..4 {
            assert_eq!(broadcast.storage()[0 + 2 * j], TRUE);
            assert_eq!(broadcast.storage()[1 + 2 * j], FALSE);
        }
    }

    #[test]
    fn reshape_preserves_flattened_order() {
        let logic = Logic::Boolean;
        let shape = Shape::from_dims(&[2, 3]).unwrap();
        let literals: Vec<Literal> = (0..6).map(lit).collect();
        let t = Tensor::from_literals(&logic, shape, literals.clone()).unwrap();
        let flat = t.reshape(Shape::from_dims(&[6]).unwrap()).unwrap();
        assert_eq!(flat.storage(), literals.as_slice());
        assert!(t.reshape(Shape::from_dims(&[4]).unwrap()).is_err());
    }

    #[test]
    fn slices_and_stack_round_trip() {
        let logic = Logic::Boolean;
        let shape = Shape::from_dims(&[3, 2]).unwrap();
        let literals: Vec<Literal> = (0..6).map(lit).collect();
        let t = Tensor::from_literals(&logic, shape, literals).unwrap();
        let slices = t.slices().unwrap();
        assert_eq!(slices.len(), 3);
        let stacked = Tensor::stack(&slices).unwrap();
        assert_eq!(stacked.storage(), t.storage());
        assert_eq!(stacked.shape(), t.shape());
    }

    #[test]
    fn fold_all_any_axis0() {
        let logic = Logic::Boolean;
        let shape = Shape::from_dims(&[2, 2]).unwrap();
        let literals = vec![TRUE, TRUE, TRUE, FALSE];
        let t = Tensor::from_literals(&logic, shape, literals).unwrap();
        let all = t.fold_all().unwrap();
        assert_eq!(all.storage(), &[TRUE, FALSE]);
        let any = t.fold_any().unwrap();
        assert_eq!(any.storage(), &[TRUE, TRUE]);
    }

    #[test]
    fn fold_all_selected_folds_every_axis() {
        let logic = Logic::Boolean;
        let shape = Shape::from_dims(&[2, 2]).unwrap();
        let t = Tensor::constant(&logic, shape, true);
        let folded = t.fold_all_selected(&[0, 1]).unwrap();
        assert_eq!(folded.shape(), &Shape::empty());
        assert_eq!(folded.get_scalar().unwrap(), TRUE);
    }

    #[test]
    fn get_scalar_rejects_non_scalar_tensors() {
        let logic = Logic::Boolean;
        let t = Tensor::constant(&logic, Shape::from_dims(&[2]).unwrap(), true);
        assert!(matches!(t.get_scalar(), Err(Error::NotScalar(_, 2))));
    }

    #[test]
    fn all_literals_are_boolean_under_boolean_logic() {
        let logic = Logic::Boolean;
        let t = Tensor::constant(&logic, Shape::from_dims(&[4]).unwrap(), true);
        assert!(t.storage().iter().all(|&l| is_boolean_literal(l)));
    }
}
