//! Human-readable tensor layout
//!
//! [`pretty_print`] writes every addressable cell, zero or not, as a grid:
//! one text row per mode-0 coordinate with mode 1 across the row, and a blank
//! line between consecutive slabs of the higher modes. All cells share one
//! right-aligned field width sized for the largest magnitude.
//!
//! ```
//! use sptensor_core::Tensor;
//! use sptensor_sparse::CooTensor;
//! use sptensor_view::print::pretty_print;
//!
//! let mut coo = CooTensor::<i32>::new(vec![2, 3]).unwrap();
//! coo.set(&[1, 1], 1);
//! coo.set(&[2, 3], 6);
//!
//! let mut out = Vec::new();
//! pretty_print(&mut out, &coo, 0).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "   1   0   0\n   0   0   6\n");
//! ```

use std::io::Write;

use scirs2_core::numeric::ToPrimitive;
use sptensor_core::index::first;
use sptensor_core::{SptensorResult, Tensor};

/// Write `tensor` as a grid with `precision` fractional digits
pub fn pretty_print<W, S>(writer: &mut W, tensor: &S, precision: usize) -> SptensorResult<()>
where
    W: Write + ?Sized,
    S: Tensor + ?Sized,
    S::Value: ToPrimitive,
{
    let width = field_width(tensor, precision);
    let dims = tensor.dims();

    // mode 1 varies fastest, then mode 0, then modes 2 and up
    let mut order: Vec<usize> = (0..dims.len()).collect();
    if order.len() >= 2 {
        order.swap(0, 1);
    }

    let mut idx = first(dims.len());
    loop {
        let value = tensor.get(&idx).to_f64().unwrap_or(f64::NAN);
        write!(writer, "  {:>width$.precision$}", value)?;

        let mut pos = 0;
        while pos < order.len() && idx[order[pos]] == dims[order[pos]] {
            idx[order[pos]] = 1;
            pos += 1;
        }
        let Some(&mode) = order.get(pos) else {
            writeln!(writer)?;
            return Ok(());
        };
        idx[mode] += 1;
        match mode {
            0 => writeln!(writer)?,
            1 => {}
            _ => write!(writer, "\n\n")?,
        }
    }
}

/// Integer digits of the largest magnitude, a sign column when that value
/// is negative, one separating column, and the fractional part
fn field_width<S>(tensor: &S, precision: usize) -> usize
where
    S: Tensor + ?Sized,
    S::Value: ToPrimitive,
{
    let (max_abs, negative) = tensor
        .entries()
        .filter_map(|(_, v)| v.to_f64())
        .fold((0.0f64, false), |(max, neg), v| {
            if v.abs() > max {
                (v.abs(), v < 0.0)
            } else {
                (max, neg)
            }
        });

    let digits = if max_abs < 1.0 {
        1
    } else {
        max_abs.log10().floor() as usize + 1
    };
    let mut width = digits + usize::from(negative) + 1;
    if precision > 0 {
        width += 1 + precision;
    }
    width
}
