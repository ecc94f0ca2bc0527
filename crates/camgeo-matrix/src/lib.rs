#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `camgeo-matrix` is the buffer layer of the camgeo project: a lightweight
//! row-major `f64` matrix that either owns its storage or transparently wraps
//! caller-provided storage, mutably or read-only, plus the allocation-free
//! kernel primitives the rest of the project builds its numerics on.
//!
//! # Error handling
//!
//! The crate keeps two failure channels strictly apart:
//!
//! - **Contract violations** — invalid shapes, out-of-bounds indices,
//!   mutation of read-only or uninitialized matrices, resizing a bound view.
//!   These are programmer errors; they panic with a descriptive message and
//!   are never surfaced as recoverable values.
//! - **Numerical degeneracy** — the RQ decomposition reports
//!   input-dependent failure through its `Option` result, the only place the
//!   core distinguishes bad input from a broken invariant.
//! - Persistence returns [`MatrixIoError`] for stream and format problems.
//!
//! # Quick start
//!
//! ```rust
//! use camgeo_matrix::Matrix;
//!
//! // owned storage
//! let mut m = Matrix::zeros(3, 3);
//! m.identity();
//!
//! // borrowed storage of external lifetime
//! let mut buf = [0.0; 9];
//! let mut v = Matrix::view_mut(&mut buf, 3, 3);
//! v.copy_from(&m);
//! drop(v);
//! assert_eq!(buf[4], 1.0);
//! ```

/// Index-tagged scalars and order-preserving sorts.
pub mod indexed;

/// Matrix persistence in the text and binary wire formats.
pub mod io;

/// Kernel primitives over raw buffers.
pub mod linalg;

/// The matrix abstraction and matrix-level free functions.
pub mod matrix;

/// RQ decomposition of 3x3 matrices.
pub mod rq;

pub use crate::indexed::{indexed_from_pairs, sort_ascending, sort_descending, IndexedValue};
pub use crate::io::{
    load_matrix, load_matrix_binary, save_matrix, save_matrix_binary, MatrixIoError,
};
pub use crate::matrix::{
    mat_alpha_ax_plus_beta_y, mat_ax_plus_y, mat_col_copy, mat_mul, mat_mul_chain, mat_row_add,
    Matrix,
};
pub use crate::rq::{rq_givens_decomposition_3, RqDecomposition};
