//! Stride-aware cursor over strided n-dimensional layouts (§4.3, §9).
//!
//! `polymer` and axis-selected folds both need to walk an output shape while
//! accumulating a linear index into some other storage via per-axis
//! strides, without materializing a coordinate vector on the heap per step.
//! This is a flat mixed-radix odometer: advancing increments the
//! fastest-varying axis (axis 0, per the crate's first-axis-fastest layout)
//! and carries into higher axes on overflow.

/// Per-axis strides for a tensor's own storage, first-axis-fastest:
/// `strides[0] == 1`, `strides[i] == strides[i-1] * dims[i-1]`.
pub fn strides_of(dims: &[usize]) -> Vec<u64> {
    let mut strides = vec![0u64; dims.len()];
    let mut acc: u64 = 1;
    for (i, &d) in dims.iter().enumerate() {
        strides[i] = acc;
        acc *= d as u64;
    }
    strides
}

/// Walks every coordinate of `dims` in first-axis-fastest order, tracking a
/// single accumulated linear index computed from `strides` (which need not
/// be `dims`'s own strides — callers pass whatever source strides a given
/// output axis should accumulate, e.g. the summed strides of every source
/// axis `polymer` mapped onto it).
pub struct Cursor {
    dims: Vec<usize>,
    strides: Vec<u64>,
    coord: Vec<usize>,
    index: u64,
    done: bool,
}

impl Cursor {
    pub fn new(dims: Vec<usize>, strides: Vec<u64>) -> Cursor {
        debug_assert_eq!(dims.len(), strides.len());
        let done = dims.iter().any(|&d| d == 0);
        let rank = dims.len();
        Cursor {
            dims,
            strides,
            coord: vec![0; rank],
            index: 0,
            done,
        }
    }

    /// The linear index for the current coordinate.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Moves to the next coordinate in first-axis-fastest order. Once the
    /// last coordinate has been visited, `is_done()` becomes true and
    /// further calls are no-ops.
    pub fn advance(&mut self) {
        if self.done {
            return;
        }
        for axis in 0..self.dims.len() {
            self.coord[axis] += 1;
            self.index += self.strides[axis];
            if self.coord[axis] < self.dims[axis] {
                return;
            }
            self.index -= self.strides[axis] * self.dims[axis] as u64;
            self.coord[axis] = 0;
        }
        self.done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_are_first_axis_fastest() {
        assert_eq!(strides_of(&[3, 4, 5]), vec![1, 3, 12]);
        assert_eq!(strides_of(&[]), Vec::<u64>::new());
    }

    #[test]
    fn cursor_visits_every_linear_index_once() {
        let dims = vec![2, 3];
        let strides = strides_of(&dims);
        let mut cursor = Cursor::new(dims, strides);
        let mut seen = Vec::new();
        while !cursor.is_done() {
            seen.push(cursor.index());
            cursor.advance();
        }
        seen.sort();
        assert_eq!(seen, (0..6).collect::<Vec<u64>>());
    }

    #[test]
    fn cursor_over_empty_shape_yields_single_step() {
        let mut cursor = Cursor::new(vec![], vec![]);
        assert!(!cursor.is_done());
        assert_eq!(cursor.index(), 0);
        cursor.advance();
        assert!(cursor.is_done());
    }

    #[test]
    fn cursor_with_zero_dimension_is_immediately_done() {
        let cursor = Cursor::new(vec![0, 3], vec![1, 0]);
        assert!(cursor.is_done());
    }
}
