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

//! `BinaryNumAddition`: bit vectors of a fixed width under ripple-carry
//! addition (§4.4.6). Bit 0 is the least significant bit and occupies axis
//! 0, matching the crate's first-axis-fastest convention.

use crate::error::{Error, Result};
use crate::literal::{Literal, FALSE, TRUE};
use crate::logic::Logic;
use crate::shape::Shape;
use crate::tensor::Tensor;

use super::abstract_set::AbstractSet;
use super::group::AbstractGroup;

pub struct BinaryNumAddition {
    bits: usize,
}

impl BinaryNumAddition {
    pub fn new(bits: usize) -> BinaryNumAddition {
        BinaryNumAddition { bits }
    }

    fn add_with_carry(&self, a: &Tensor, b: &Tensor, carry_in: Literal) -> Result<(Tensor, Literal)> {
        if a.shape() != &self.shape() || b.shape() != &self.shape() {
            return Err(Error::shape_mismatch(
                "bit vectors must match this BinaryNumAddition's width",
            ));
        }
        let logic = Logic::join(a.logic(), b.logic())?;
        let mut carry = carry_in;
        let mut sum = Vec::with_capacity(self.bits);
        for i in 0..self.bits {
            let (s, c) = logic.full_adder(a.storage()[i], b.storage()[i], carry)?;
            sum.push(s);
            carry = c;
        }
        Ok((Tensor::from_literals(&logic, self.shape(), sum)?, carry))
    }

    /// `a + 1` if `flag` is true, else `a` unchanged; the final carry-out is
    /// an overflow flag. The conditional is folded into the ripple itself by
    /// gating the initial carry-in with `flag`, rather than branching on it.
    pub fn increment(&self, a: &Tensor, flag: Literal) -> Result<(Tensor, Literal)> {
        let zero = Tensor::constant(a.logic(), self.shape(), false);
        self.add_with_carry(a, &zero, flag)
    }

    /// Hamming weight of `a`, itself a `self.bits`-wide bit vector: a ripple
    /// construction that accumulates one flag-gated `increment` per input
    /// bit, so it works symbolically as well as on ground operands.
    pub fn weight(&self, a: &Tensor) -> Result<Tensor> {
        if a.shape() != &self.shape() {
            return Err(Error::shape_mismatch(
                "element does not match this BinaryNumAddition's width",
            ));
        }
        let mut acc = Tensor::constant(a.logic(), self.shape(), false);
        for &bit in a.storage() {
            acc = self.increment(&acc, bit)?.0;
        }
        Ok(acc)
    }
}

impl AbstractSet for BinaryNumAddition {
    fn shape(&self) -> Shape {
        Shape::from_dims(&[self.bits]).expect("bits > 0")
    }

    /// Every bit vector of the right width belongs to this set; there is
    /// no further constraint.
    fn contains(&self, elem: &Tensor) -> Result<Tensor> {
        if elem.shape() != &self.shape() {
            return Err(Error::shape_mismatch(
                "element does not match this BinaryNumAddition's width",
            ));
        }
        Ok(Tensor::constant(elem.logic(), Shape::empty(), true))
    }
}

impl AbstractGroup for BinaryNumAddition {
    fn identity(&self, logic: &Logic) -> Result<Tensor> {
        Ok(Tensor::constant(logic, self.shape(), false))
    }

    /// Two's complement: bitwise negation, then `+ 1`.
    fn inverse(&self, a: &Tensor) -> Result<Tensor> {
        let flipped = a.not()?;
        let (sum, _overflow) = self.increment(&flipped, TRUE)?;
        Ok(sum)
    }

    fn product(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        let (sum, _carry) = self.add_with_carry(a, b, FALSE)?;
        Ok(sum)
    }
}
