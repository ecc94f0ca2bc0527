//! Matrix persistence in the text and binary wire formats.
//!
//! Text records are a single line `<name> <nr> <nc> <v0> ... <v_{nr*nc-1}>`
//! with values at 24-digit precision. Binary records are `nr` and `nc` as
//! little-endian `i32` followed by the elements as little-endian `f64` bit
//! patterns, no padding. Loading into a matrix bound to caller storage keeps
//! the binding: the stored element count must equal the bound size.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::matrix::Matrix;

/// An error type for matrix persistence.
#[derive(Debug, Error)]
pub enum MatrixIoError {
    /// Underlying stream failure.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The record on the stream carries a different matrix name.
    #[error("expected matrix record `{expected}`, found `{found}`")]
    NameMismatch {
        /// Name the caller asked for.
        expected: String,
        /// Name found on the stream.
        found: String,
    },

    /// The record is structurally broken (missing or unparsable fields).
    #[error("malformed matrix record: {0}")]
    Malformed(String),

    /// A matrix bound to caller storage cannot take the stored shape.
    #[error("bound view holds {bound} elements but the stored matrix has {stored}")]
    ViewSizeMismatch {
        /// Element count of the bound buffer.
        bound: usize,
        /// Element count recorded on the stream.
        stored: usize,
    },
}

/// Applies a stored shape to the destination matrix.
///
/// Owned matrices reallocate; matrices bound to caller storage only accept
/// the same element count and reinterpret their shape.
fn bind_shape(m: &mut Matrix<'_>, nr: usize, nc: usize) -> Result<(), MatrixIoError> {
    if m.is_view() && nr * nc != m.size() {
        return Err(MatrixIoError::ViewSizeMismatch {
            bound: m.size(),
            stored: nr * nc,
        });
    }
    m.resize(nr, nc);
    Ok(())
}

/// Writes one text record for `m` under `name`.
pub fn write_matrix_text<W: Write>(
    w: &mut W,
    m: &Matrix<'_>,
    name: &str,
) -> Result<(), MatrixIoError> {
    write!(w, "{} {} {}", name, m.rows(), m.cols())?;
    if !m.is_empty() {
        for v in m.as_slice() {
            write!(w, " {v:.24e}")?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Reads one text record named `name` into `m`.
///
/// Loading into a read-only view is a contract violation and panics; every
/// stream or format problem is reported as an error.
pub fn read_matrix_text<R: BufRead>(
    r: &mut R,
    m: &mut Matrix<'_>,
    name: &str,
) -> Result<(), MatrixIoError> {
    assert!(!m.is_read_only(), "cannot load into a read-only matrix view");

    let mut line = String::new();
    r.read_line(&mut line)?;
    let mut tokens = line.split_whitespace();

    let found = tokens
        .next()
        .ok_or_else(|| MatrixIoError::Malformed("empty record".into()))?;
    if found != name {
        return Err(MatrixIoError::NameMismatch {
            expected: name.into(),
            found: found.into(),
        });
    }

    let mut read_dim = |what: &str| -> Result<usize, MatrixIoError> {
        tokens
            .next()
            .ok_or_else(|| MatrixIoError::Malformed(format!("missing {what}")))?
            .parse::<usize>()
            .map_err(|_| MatrixIoError::Malformed(format!("unparsable {what}")))
    };
    let nr = read_dim("row count")?;
    let nc = read_dim("column count")?;

    bind_shape(m, nr, nc)?;
    if nr * nc == 0 {
        return Ok(());
    }

    let data = m.as_mut_slice();
    for (i, dst) in data.iter_mut().enumerate() {
        *dst = tokens
            .next()
            .ok_or_else(|| MatrixIoError::Malformed(format!("missing element {i}")))?
            .parse::<f64>()
            .map_err(|_| MatrixIoError::Malformed(format!("unparsable element {i}")))?;
    }
    Ok(())
}

/// Writes one binary record for `m`.
pub fn write_matrix_binary<W: Write>(w: &mut W, m: &Matrix<'_>) -> Result<(), MatrixIoError> {
    w.write_all(&(m.rows() as i32).to_le_bytes())?;
    w.write_all(&(m.cols() as i32).to_le_bytes())?;
    if !m.is_empty() {
        for v in m.as_slice() {
            w.write_all(&v.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Reads one binary record into `m`.
///
/// Loading into a read-only view is a contract violation and panics; every
/// stream or format problem is reported as an error.
pub fn read_matrix_binary<R: Read>(r: &mut R, m: &mut Matrix<'_>) -> Result<(), MatrixIoError> {
    assert!(!m.is_read_only(), "cannot load into a read-only matrix view");

    let mut dim = [0u8; 4];
    r.read_exact(&mut dim)?;
    let nr = i32::from_le_bytes(dim);
    r.read_exact(&mut dim)?;
    let nc = i32::from_le_bytes(dim);
    if nr < 0 || nc < 0 {
        return Err(MatrixIoError::Malformed(format!(
            "negative shape {nr}x{nc}"
        )));
    }

    bind_shape(m, nr as usize, nc as usize)?;
    if m.is_empty() {
        return Ok(());
    }

    let mut word = [0u8; 8];
    let data = m.as_mut_slice();
    for dst in data.iter_mut() {
        r.read_exact(&mut word)?;
        *dst = f64::from_le_bytes(word);
    }
    Ok(())
}

/// Saves `m` as a text record to `path`.
pub fn save_matrix<P: AsRef<Path>>(
    path: P,
    m: &Matrix<'_>,
    name: &str,
) -> Result<(), MatrixIoError> {
    let mut w = BufWriter::new(File::create(path.as_ref())?);
    write_matrix_text(&mut w, m, name)?;
    w.flush()?;
    debug!(
        "saved {}x{} matrix `{}` to {}",
        m.rows(),
        m.cols(),
        name,
        path.as_ref().display()
    );
    Ok(())
}

/// Loads the text record named `name` from `path` into `m`.
pub fn load_matrix<P: AsRef<Path>>(
    path: P,
    m: &mut Matrix<'_>,
    name: &str,
) -> Result<(), MatrixIoError> {
    let mut r = BufReader::new(File::open(path.as_ref())?);
    read_matrix_text(&mut r, m, name)?;
    debug!(
        "loaded {}x{} matrix `{}` from {}",
        m.rows(),
        m.cols(),
        name,
        path.as_ref().display()
    );
    Ok(())
}

/// Saves `m` as a binary record to `path`.
pub fn save_matrix_binary<P: AsRef<Path>>(path: P, m: &Matrix<'_>) -> Result<(), MatrixIoError> {
    let mut w = BufWriter::new(File::create(path.as_ref())?);
    write_matrix_binary(&mut w, m)?;
    w.flush()?;
    debug!(
        "saved {}x{} matrix to {}",
        m.rows(),
        m.cols(),
        path.as_ref().display()
    );
    Ok(())
}

/// Loads a binary record from `path` into `m`.
pub fn load_matrix_binary<P: AsRef<Path>>(
    path: P,
    m: &mut Matrix<'_>,
) -> Result<(), MatrixIoError> {
    let mut r = BufReader::new(File::open(path.as_ref())?);
    read_matrix_binary(&mut r, m)?;
    debug!(
        "loaded {}x{} matrix from {}",
        m.rows(),
        m.cols(),
        path.as_ref().display()
    );
    Ok(())
}
