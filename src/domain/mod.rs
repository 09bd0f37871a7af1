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

//! External-collaborator-style consumers of [`crate::tensor::Tensor`] and
//! [`crate::logic::Logic`] (§4.4.6): these are illustrative domain helpers
//! built entirely on top of the public Tensor API, not a separate layer the
//! core algebra depends on.

mod abstract_set;
mod bitvec;
mod clone;
mod group;
mod symmetric_group;

pub use abstract_set::AbstractSet;
pub use bitvec::BinaryNumAddition;
pub use clone::{AbstractClone, Operations};
pub use group::{AbstractGroup, AxiomFailure};
pub use symmetric_group::SymmetricGroup;
