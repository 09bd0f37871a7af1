//! Immutable, structurally shared cons-list shapes (§4.3).

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};

struct Node {
    dim: usize,
    /// Product of this node's `dim` and the tail's extent; cached so
    /// `extent()` is O(1) regardless of rank.
    extent: u64,
    next: Option<Rc<Node>>,
}

/// An ordered sequence of positive dimensions `(d0, ..., d_{r-1})`.
/// Cheap to clone: shares structure with every shape it was built from.
#[derive(Clone)]
pub struct Shape(Option<Rc<Node>>);

impl Shape {
    /// The rank-0 shape, extent 1.
    pub fn empty() -> Shape {
        Shape(None)
    }

    /// Prepends `dim` to `tail`. Fails `InvalidShape` if `dim` is zero or if
    /// the resulting extent overflows.
    pub fn cons(dim: usize, tail: &Shape) -> Result<Shape> {
        if dim == 0 {
            return Err(Error::InvalidShape(
                "dimensions must be positive".to_string(),
            ));
        }
        let tail_extent = tail.extent();
        let extent = tail_extent
            .checked_mul(dim as u64)
            .ok_or_else(|| Error::InvalidShape("extent overflow".to_string()))?;
        Ok(Shape(Some(Rc::new(Node {
            dim,
            extent,
            next: tail.0.clone(),
        }))))
    }

    /// Builds a shape from a flat sequence of dimensions, outermost first.
    pub fn from_dims(dims: &[usize]) -> Result<Shape> {
        let mut shape = Shape::empty();
        for &dim in dims.iter().rev() {
            shape = Shape::cons(dim, &shape)?;
        }
        Ok(shape)
    }

    /// Flattens back to a vector of dimensions, outermost first.
    pub fn dims(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.length());
        let mut node = self.0.clone();
        while let Some(n) = node {
            out.push(n.dim);
            node = n.next.clone();
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn length(&self) -> usize {
        let mut r = 0;
        let mut node = &self.0;
        while let Some(n) = node {
            r += 1;
            node = &n.next;
        }
        r
    }

    /// Product of all dimensions; 1 for the empty shape.
    pub fn extent(&self) -> u64 {
        self.0.as_ref().map_or(1, |n| n.extent)
    }

    pub fn head(&self) -> Result<usize> {
        self.0
            .as_ref()
            .map(|n| n.dim)
            .ok_or_else(|| Error::shape_mismatch("head() of the empty shape"))
    }

    pub fn tail(&self) -> Result<Shape> {
        self.0
            .as_ref()
            .map(|n| Shape(n.next.clone()))
            .ok_or_else(|| Error::shape_mismatch("tail() of the empty shape"))
    }

    /// Drops the leading `k` dimensions.
    pub fn drop(&self, k: usize) -> Result<Shape> {
        let mut node = self.0.clone();
        for _ in 0..k {
            node = node
                .ok_or_else(|| Error::shape_mismatch("drop() past the end of the shape"))?
                .next
                .clone();
        }
        Ok(Shape(node))
    }

    /// True iff `self` agrees with `other` on `self`'s dimensions and has no
    /// greater rank.
    pub fn prefix_of(&self, other: &Shape) -> bool {
        let mut a = &self.0;
        let mut b = &other.0;
        loop {
            match (a, b) {
                (None, _) => return true,
                (Some(_), None) => return false,
                (Some(na), Some(nb)) => {
                    if na.dim != nb.dim {
                        return false;
                    }
                    a = &na.next;
                    b = &nb.next;
                }
            }
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Shape) -> bool {
        let mut a = &self.0;
        let mut b = &other.0;
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(na), Some(nb)) => {
                    if na.dim != nb.dim {
                        return false;
                    }
                    a = &na.next;
                    b = &nb.next;
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Shape {}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let dims = self.dims();
        for (i, d) in dims.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Shape {
        Shape::from_dims(dims).expect("invalid shape literal")
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Shape {
        Shape::from_dims(&dims).expect("invalid shape literal")
    }
}
