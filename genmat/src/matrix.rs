use std::fmt;

use thiserror::Error;

use crate::codeword::Codeword;

/// Errors reported by [`GeneratorMatrix`] operations
///
/// Every failure is a usage or data-validation error surfaced at the point of
/// violation; nothing is retried or deferred. [`MatrixError::kind`] gives the
/// coarse classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A staging-phase operation was called on a frozen matrix.
    #[error("matrix is already frozen")]
    AlreadyFrozen,
    /// A query or derivation was attempted before the matrix was frozen.
    #[error("matrix has not been frozen")]
    NotFrozen,
    /// Freezing was attempted with no staged rows, or a reduction left none.
    #[error("matrix has no rows")]
    NoRows,
    /// An empty codeword was passed to [`GeneratorMatrix::stage_row`].
    #[error("cannot stage an empty codeword")]
    EmptyRow,
    /// The staged rows do not all share one bit-length.
    #[error("row length mismatch: expected {expected} bits, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    /// A row index was outside `[0, num_rows)`.
    #[error("row index {index} out of range for a matrix with {num_rows} rows")]
    IndexOutOfRange { index: usize, num_rows: usize },
}

/// Coarse classification of a [`MatrixError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation was invoked in the wrong lifecycle phase.
    InvalidState,
    /// The supplied data violates a structural precondition.
    InvalidArgument,
    /// An index fell outside the valid range.
    OutOfRange,
}

impl MatrixError {
    /// Returns the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::AlreadyFrozen | MatrixError::NotFrozen | MatrixError::NoRows => {
                ErrorKind::InvalidState
            }
            MatrixError::EmptyRow | MatrixError::LengthMismatch { .. } => ErrorKind::InvalidArgument,
            MatrixError::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}

#[derive(Clone, Debug)]
enum State {
    /// Rows accumulate here in insertion order until the matrix is frozen.
    Staging(Vec<Codeword>),
    /// Fixed-size row store; row contents stay mutable, the shape does not.
    Frozen {
        length: usize,
        rows: Box<[Codeword]>,
    },
}

/// A generator matrix for a binary linear code
///
/// A `GeneratorMatrix` holds a set of [`Codeword`] rows of identical length
/// and goes through a two-phase lifecycle: rows are staged one at a time with
/// [`stage_row`](Self::stage_row), then [`freeze`](Self::freeze) validates
/// them and fixes the matrix shape for good. Only a frozen matrix can be
/// queried for its dimensions or rows, or reduced to systematic form with
/// [`systematic_form`](Self::systematic_form).
///
/// Rows are always held and handed back as independent copies, so mutating a
/// codeword after staging it, or mutating a row returned by
/// [`row`](Self::row), never changes the matrix. The one deliberate exception
/// is [`row_mut`](Self::row_mut), which exposes a live reference into the row
/// store for in-place content edits.
#[derive(Clone, Debug)]
pub struct GeneratorMatrix {
    state: State,
}

impl GeneratorMatrix {
    /// Creates a new, empty matrix in the staging phase
    pub fn new() -> Self {
        GeneratorMatrix {
            state: State::Staging(Vec::new()),
        }
    }

    /// Appends an independent copy of `row` to the staged rows
    ///
    /// Insertion order is preserved through [`freeze`](Self::freeze).
    ///
    /// # Errors
    ///
    /// [`MatrixError::AlreadyFrozen`] if the matrix is frozen, or
    /// [`MatrixError::EmptyRow`] if `row` has length 0.
    pub fn stage_row(&mut self, row: &Codeword) -> Result<(), MatrixError> {
        let State::Staging(staged) = &mut self.state else {
            return Err(MatrixError::AlreadyFrozen);
        };
        if row.is_empty() {
            return Err(MatrixError::EmptyRow);
        }
        staged.push(row.clone());
        Ok(())
    }

    /// Validates the staged rows and freezes the matrix
    ///
    /// All staged rows must share one bit-length, and there must be at least
    /// one of them. On success the rows move, in insertion order, into a
    /// fixed-size store: no further rows can be added and freezing again is
    /// an error. On failure the matrix is left in the staging phase with its
    /// rows intact, so the caller can correct the input and retry.
    ///
    /// # Errors
    ///
    /// [`MatrixError::AlreadyFrozen`], [`MatrixError::NoRows`], or
    /// [`MatrixError::LengthMismatch`].
    pub fn freeze(&mut self) -> Result<(), MatrixError> {
        let State::Staging(staged) = &mut self.state else {
            return Err(MatrixError::AlreadyFrozen);
        };
        let Some(first) = staged.first() else {
            return Err(MatrixError::NoRows);
        };
        let length = first.len();
        for row in staged.iter() {
            if row.len() != length {
                return Err(MatrixError::LengthMismatch {
                    expected: length,
                    found: row.len(),
                });
            }
        }
        let rows = std::mem::take(staged).into_boxed_slice();
        self.state = State::Frozen { length, rows };
        Ok(())
    }

    /// Returns true once [`freeze`](Self::freeze) has succeeded
    #[inline]
    pub fn is_frozen(&self) -> bool {
        matches!(self.state, State::Frozen { .. })
    }

    fn frozen(&self) -> Result<(usize, &[Codeword]), MatrixError> {
        match &self.state {
            State::Staging(_) => Err(MatrixError::NotFrozen),
            State::Frozen { length, rows } => Ok((*length, &rows[..])),
        }
    }

    /// Returns the common bit-length of the rows
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] if the matrix has not been frozen.
    pub fn length(&self) -> Result<usize, MatrixError> {
        self.frozen().map(|(length, _)| length)
    }

    /// Returns the number of rows
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] if the matrix has not been frozen.
    pub fn num_rows(&self) -> Result<usize, MatrixError> {
        self.frozen().map(|(_, rows)| rows.len())
    }

    /// Returns an independent copy of row `i`
    ///
    /// Mutating the returned codeword does not affect the matrix.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] or [`MatrixError::IndexOutOfRange`].
    pub fn row(&self, i: usize) -> Result<Codeword, MatrixError> {
        let (_, rows) = self.frozen()?;
        rows.get(i).cloned().ok_or(MatrixError::IndexOutOfRange {
            index: i,
            num_rows: rows.len(),
        })
    }

    /// Returns a shared view of all rows in order
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] if the matrix has not been frozen.
    pub fn rows(&self) -> Result<&[Codeword], MatrixError> {
        self.frozen().map(|(_, rows)| rows)
    }

    /// Returns a mutable reference to row `i`
    ///
    /// This is the only way to change a frozen matrix: the reference aliases
    /// the internal row store, and writes through it are visible to every
    /// later read. Only the row's bit content can change; the matrix shape
    /// (row count and length) stays fixed.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] or [`MatrixError::IndexOutOfRange`].
    pub fn row_mut(&mut self, i: usize) -> Result<&mut Codeword, MatrixError> {
        let State::Frozen { rows, .. } = &mut self.state else {
            return Err(MatrixError::NotFrozen);
        };
        let num_rows = rows.len();
        rows.get_mut(i).ok_or(MatrixError::IndexOutOfRange {
            index: i,
            num_rows,
        })
    }

    /// Reduces a working copy of `rows` with Gauss-Jordan elimination over
    /// GF(2) and drops the rows that cancel to zero
    ///
    /// Pivot selection is deterministic: the first row at or below the pivot
    /// cursor with a 1 in the pivot column wins. When the pivot column sits
    /// to the right of the pivot row's ordinal, the two columns are swapped
    /// across all rows so each pivot lands on the diagonal; the resulting
    /// column order is not tracked.
    fn reduce(rows: &[Codeword], length: usize) -> Vec<Codeword> {
        let mut work = rows.to_vec();
        let mut pivot_row = 0;
        let mut pivot_col = 0;

        while pivot_row < work.len() && pivot_col < length {
            let Some(sel) = (pivot_row..work.len()).find(|&r| work[r].bit(pivot_col)) else {
                // column has no usable pivot among the remaining rows
                pivot_col += 1;
                continue;
            };

            if sel != pivot_row {
                work.swap(sel, pivot_row);
            }

            if pivot_col != pivot_row {
                for row in work.iter_mut() {
                    row.swap_bits(pivot_col, pivot_row);
                }
                pivot_col = pivot_row;
            }

            let pivot = work[pivot_row].clone();
            for (r, row) in work.iter_mut().enumerate() {
                if r != pivot_row && row.bit(pivot_row) {
                    row.xor_with(&pivot);
                }
            }

            pivot_row += 1;
            pivot_col += 1;
        }

        work.retain(|row| !row.is_zero());
        work
    }

    /// Returns a new, frozen matrix holding the systematic form of this one
    ///
    /// The result's rows are a maximal linearly independent subset of this
    /// matrix's rows, reduced so that the first `k` columns form a `k`-by-`k`
    /// identity block, where `k` is the GF(2) rank of this matrix. The
    /// receiver is never modified.
    ///
    /// Pivoting may permute columns, so a bit position in the result does not
    /// in general correspond to the same position in the input; no
    /// permutation record is kept.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] if the matrix has not been frozen, or
    /// [`MatrixError::NoRows`] if every row cancels to zero (a rank-0
    /// matrix has no systematic form).
    pub fn systematic_form(&self) -> Result<GeneratorMatrix, MatrixError> {
        let (length, rows) = self.frozen()?;
        let reduced = Self::reduce(rows, length);

        let mut sys = GeneratorMatrix::new();
        for row in &reduced {
            sys.stage_row(row)?;
        }
        sys.freeze()?;
        Ok(sys)
    }

    /// Computes the GF(2) rank of the rows
    ///
    /// Unlike [`systematic_form`](Self::systematic_form) this is defined for
    /// rank-0 matrices, where it returns 0.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] if the matrix has not been frozen.
    pub fn rank(&self) -> Result<usize, MatrixError> {
        let (length, rows) = self.frozen()?;
        Ok(Self::reduce(rows, length).len())
    }

    /// Checks whether the leading columns form an identity block
    ///
    /// Returns true when, for `k = num_rows`, the first `k` columns of the
    /// matrix are the `k`-by-`k` identity. Always false when the matrix has
    /// more rows than columns.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotFrozen`] if the matrix has not been frozen.
    pub fn is_systematic(&self) -> Result<bool, MatrixError> {
        let (length, rows) = self.frozen()?;
        let k = rows.len();
        if k > length {
            return Ok(false);
        }
        for r in 0..k {
            for c in 0..k {
                if rows[r].bit(c) != (r == c) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

impl Default for GeneratorMatrix {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats the matrix one row per line, in either phase
impl fmt::Display for GeneratorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match &self.state {
            State::Staging(staged) => staged.as_slice(),
            State::Frozen { rows, .. } => &rows[..],
        };
        for row in rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
