//! Plain-text tensor format
//!
//! This module reads and writes sparse tensors in a whitespace-separated
//! coordinate format that any backend can produce or consume.
//!
//! # Format
//!
//! - A header line: `nmodes d_1 d_2 ... d_nmodes`
//! - Data lines: `i_1 i_2 ... i_nmodes value` (1-indexed)
//!
//! Blank lines are skipped. The writer separates fields with tabs and emits
//! entries in the tensor's nonzero-iteration order.
//!
//! # Malformed data
//!
//! A header that cannot be parsed is always an error. A malformed data line
//! (wrong field count, unparsable or out-of-range index, unparsable value)
//! ends the read under [`ReadOptions::lenient`], keeping everything parsed
//! so far, and is a [`SptensorError::Parse`] under [`ReadOptions::strict`].
//!
//! # Examples
//!
//! ```rust
//! use sptensor_core::Tensor;
//! use sptensor_sparse::{io, CooTensor, ReadOptions};
//! use std::io::Cursor;
//!
//! let mut coo = CooTensor::<f64>::new(vec![2, 3]).unwrap();
//! coo.set(&[1, 2], 1.5);
//! coo.set(&[2, 3], -4.0);
//!
//! let mut output = Vec::new();
//! io::write_tensor(&mut output, &coo).unwrap();
//! assert_eq!(String::from_utf8_lossy(&output), "2\t2\t3\n1\t2\t1.5\n2\t3\t-4\n");
//!
//! let back = io::read_coo::<f64>(Cursor::new(output), &ReadOptions::default()).unwrap();
//! assert_eq!(back.get(&[2, 3]), -4.0);
//! ```

use std::io::{BufRead, BufReader, Read, Write};

use sptensor_core::index::{self, Index};
use sptensor_core::{Scalar, SptensorError, SptensorResult, Tensor};

use crate::config::{HashConfig, ReadOptions};
use crate::coo::CooTensor;
use crate::hash::HashTensor;

/// Read a tensor, allocating the destination once the header is known
///
/// `alloc` receives the dimension vector from the header and returns the
/// empty tensor that data lines are `set` into.
///
/// # Errors
///
/// Returns an error if the stream cannot be read, the header is malformed,
/// `alloc` fails, or (strict mode only) a data line is malformed.
pub fn read_tensor<T, D, F>(
    reader: impl Read,
    options: &ReadOptions,
    alloc: F,
) -> SptensorResult<D>
where
    T: Scalar,
    D: Tensor<Value = T>,
    F: FnOnce(Vec<usize>) -> SptensorResult<D>,
{
    let mut lines = BufReader::new(reader).lines().enumerate();

    // Header
    let (header_no, header) = loop {
        match lines.next() {
            Some((n, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break (n + 1, line);
                }
            }
            None => return Err(SptensorError::parse(1, "missing header")),
        }
    };
    let dims = parse_header(&header).map_err(|reason| SptensorError::parse(header_no, reason))?;
    let mut tensor = alloc(dims)?;

    // Data lines
    for (n, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_entry::<T>(&line, tensor.dims()) {
            Ok((idx, value)) => tensor.set(&idx, value),
            Err(reason) if options.strict => return Err(SptensorError::parse(n + 1, reason)),
            Err(reason) => {
                log::warn!("stopped reading tensor at line {}: {}", n + 1, reason);
                break;
            }
        }
    }

    Ok(tensor)
}

/// Read a tensor into a [`CooTensor`]
pub fn read_coo<T: Scalar>(
    reader: impl Read,
    options: &ReadOptions,
) -> SptensorResult<CooTensor<T>> {
    read_tensor(reader, options, CooTensor::new)
}

/// Read a tensor into a [`HashTensor`] built with `config`
pub fn read_hash<T: Scalar>(
    reader: impl Read,
    options: &ReadOptions,
    config: HashConfig,
) -> SptensorResult<HashTensor<T>> {
    read_tensor(reader, options, |dims| HashTensor::with_config(dims, config))
}

/// Write the nonzero entries of any tensor
///
/// # Complexity
///
/// O(nnz) lines plus whatever the backend's nonzero cursor costs.
pub fn write_tensor<S>(writer: &mut impl Write, tensor: &S) -> SptensorResult<()>
where
    S: Tensor + ?Sized,
{
    write!(writer, "{}", tensor.nmodes())?;
    for d in tensor.dims() {
        write!(writer, "\t{}", d)?;
    }
    writeln!(writer)?;

    for (idx, value) in tensor.entries() {
        for i in &idx {
            write!(writer, "{}\t", i)?;
        }
        writeln!(writer, "{}", value)?;
    }
    Ok(())
}

fn parse_header(line: &str) -> Result<Vec<usize>, String> {
    let mut fields = line.split_whitespace();
    let nmodes: usize = fields
        .next()
        .ok_or("empty header")?
        .parse()
        .map_err(|_| "invalid mode count".to_string())?;

    let dims = fields
        .map(|f| f.parse::<usize>().map_err(|_| format!("invalid dimension '{}'", f)))
        .collect::<Result<Vec<_>, _>>()?;
    if dims.len() != nmodes {
        return Err(format!(
            "header declares {} modes but lists {} dimensions",
            nmodes,
            dims.len()
        ));
    }
    index::validate_dims(&dims).map_err(|e| e.to_string())?;
    Ok(dims)
}

fn parse_entry<T: Scalar>(line: &str, dims: &[usize]) -> Result<(Index, T), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != dims.len() + 1 {
        return Err(format!(
            "expected {} fields, found {}",
            dims.len() + 1,
            fields.len()
        ));
    }

    let idx = fields[..dims.len()]
        .iter()
        .map(|f| f.parse::<usize>().map_err(|_| format!("invalid index '{}'", f)))
        .collect::<Result<Index, _>>()?;
    if !index::in_bounds(&idx, dims) {
        return Err(format!("index {:?} outside {:?}", idx.as_slice(), dims));
    }

    let raw = fields[dims.len()];
    let value = raw
        .parse::<T>()
        .map_err(|_| format!("invalid value '{}'", raw))?;
    Ok((idx, value))
}
