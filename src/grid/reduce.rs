//! Summary statistics over grids

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ndarray::ArrayD;
use rayon::prelude::*;

use crate::config;
use crate::error::{Error, Result};
use crate::grid::array::{GridArray, GridData};
use crate::grid::dtype::{GridElement, Scalar};
use crate::macros::dyn_map;

/// Reduction operations on grids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReduceOp {
    Sum,
    Mean,
    Min,
    Max,
    /// Population standard deviation
    Std,
}

impl ReduceOp {
    pub fn name(&self) -> &'static str {
        match self {
            ReduceOp::Sum => "sum",
            ReduceOp::Mean => "mean",
            ReduceOp::Min => "min",
            ReduceOp::Max => "max",
            ReduceOp::Std => "std",
        }
    }
}

/// Contiguous view for rayon scans, when the layout allows it
fn parallel_slice<T: GridElement>(arr: &ArrayD<T>) -> Option<&[T]> {
    if config::get().compute.use_parallel(arr.len()) {
        arr.as_slice_memory_order()
    } else {
        None
    }
}

fn contains_missing<T: GridElement>(arr: &ArrayD<T>) -> bool {
    if !T::DTYPE.is_float() {
        return false;
    }
    match parallel_slice(arr) {
        Some(slice) => slice.par_iter().any(|v| v.is_missing()),
        None => arr.iter().any(|v| v.is_missing()),
    }
}

fn pick<T: GridElement>(a: T, b: T, wanted: Ordering) -> T {
    if b.partial_cmp(&a) == Some(wanted) {
        b
    } else {
        a
    }
}

/// Extreme of the non-missing elements
fn extreme<T: GridElement>(arr: &ArrayD<T>, wanted: Ordering) -> Option<T> {
    match parallel_slice(arr) {
        Some(slice) => slice
            .par_iter()
            .copied()
            .filter(|v| !v.is_missing())
            .reduce_with(|a, b| pick(a, b, wanted)),
        None => arr
            .iter()
            .copied()
            .filter(|v| !v.is_missing())
            .reduce(|a, b| pick(a, b, wanted)),
    }
}

fn sum_of<T: GridElement>(arr: &ArrayD<T>) -> Result<Scalar> {
    if T::DTYPE.is_float() {
        let total: f64 = arr
            .iter()
            .filter(|v| !v.is_missing())
            .map(|v| v.as_f64())
            .sum();
        return Ok(Scalar::Float(total));
    }
    let mut total = 0i64;
    for v in arr.iter() {
        if let Scalar::Int(x) = v.into_scalar() {
            total = total
                .checked_add(x)
                .ok_or_else(|| Error::InvalidValue("integer overflow in grid sum".to_string()))?;
        }
    }
    Ok(Scalar::Int(total))
}

fn moments<T: GridElement>(arr: &ArrayD<T>) -> Option<(f64, f64)> {
    let values: Vec<f64> = arr
        .iter()
        .filter(|v| !v.is_missing())
        .map(|v| v.as_f64())
        .collect();
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    Some((mean, var.sqrt()))
}

fn reduce_array<T: GridElement>(arr: &ArrayD<T>, op: ReduceOp, skip_missing: bool) -> Result<Scalar> {
    if !skip_missing && contains_missing(arr) {
        return Ok(Scalar::MISSING);
    }
    let valid = if skip_missing {
        arr.iter().filter(|v| !v.is_missing()).count()
    } else {
        arr.len()
    };
    if valid == 0 {
        return match op {
            _ if skip_missing => Ok(Scalar::MISSING),
            ReduceOp::Sum => sum_of(arr),
            ReduceOp::Mean | ReduceOp::Std => Ok(Scalar::MISSING),
            ReduceOp::Min | ReduceOp::Max => Err(Error::InvalidValue(format!(
                "{} of an empty grid is undefined",
                op.name()
            ))),
        };
    }

    match op {
        ReduceOp::Sum => sum_of(arr),
        ReduceOp::Mean => Ok(moments(arr).map_or(Scalar::MISSING, |(m, _)| Scalar::Float(m))),
        ReduceOp::Std => Ok(moments(arr).map_or(Scalar::MISSING, |(_, s)| Scalar::Float(s))),
        ReduceOp::Min => Ok(extreme(arr, Ordering::Less).map_or(Scalar::MISSING, T::into_scalar)),
        ReduceOp::Max => {
            Ok(extreme(arr, Ordering::Greater).map_or(Scalar::MISSING, T::into_scalar))
        }
    }
}

impl GridArray {
    /// Reduce over all elements; any missing element makes the result
    /// missing.
    ///
    /// Integer grids give `Scalar::Int` for sum, min and max. Over an empty
    /// grid the sum is zero, mean and std are missing, and min/max fail.
    pub fn reduce(&self, op: ReduceOp) -> Result<Scalar> {
        macro_rules! reduce {
            ($variant:ident, $arr:expr) => {
                reduce_array($arr, op, false)
            };
        }
        dyn_map!(&self.data, GridData, reduce)
    }

    /// Reduce over the non-missing elements; missing when none remain
    pub fn reduce_skip_missing(&self, op: ReduceOp) -> Result<Scalar> {
        macro_rules! reduce {
            ($variant:ident, $arr:expr) => {
                reduce_array($arr, op, true)
            };
        }
        dyn_map!(&self.data, GridData, reduce)
    }

    /// Whether any element is the missing marker
    pub fn has_missing(&self) -> bool {
        macro_rules! has_missing {
            ($variant:ident, $arr:expr) => {
                contains_missing($arr)
            };
        }
        dyn_map!(&self.data, GridData, has_missing)
    }

    /// Row-major values as `f64`, missing elements as NaN
    pub fn values_f64(&self) -> Vec<f64> {
        macro_rules! values {
            ($variant:ident, $arr:expr) => {
                $arr.iter().map(|v| v.as_f64()).collect()
            };
        }
        dyn_map!(&self.data, GridData, values)
    }

    /// Distinct values in ascending order with their occurrence counts.
    ///
    /// The missing marker, if present, is one distinct value placed last.
    pub fn unique_counts(&self) -> (Vec<Scalar>, Vec<usize>) {
        let scalars = self.scalars();

        if !self.dtype().is_float() {
            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for s in &scalars {
                if let Scalar::Int(v) = s {
                    *counts.entry(*v).or_insert(0) += 1;
                }
            }
            return counts.into_iter().map(|(v, n)| (Scalar::Int(v), n)).unzip();
        }

        let mut floats: Vec<f64> = scalars
            .iter()
            .map(Scalar::as_f64)
            .filter(|v| !v.is_nan())
            .collect();
        let missing = scalars.len() - floats.len();
        floats.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut values = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        for v in floats {
            match (values.last(), counts.last_mut()) {
                (Some(&Scalar::Float(last)), Some(n)) if last == v => *n += 1,
                _ => {
                    values.push(Scalar::Float(v));
                    counts.push(1);
                }
            }
        }
        if missing > 0 {
            values.push(Scalar::MISSING);
            counts.push(missing);
        }
        (values, counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn integer_sum_stays_integer() -> Result<()> {
        let grid = GridArray::from(array![[1u8, 2], [3, 250]]);
        assert_eq!(grid.reduce(ReduceOp::Sum)?, Scalar::Int(256));
        assert_eq!(grid.reduce(ReduceOp::Max)?, Scalar::Int(250));
        assert_eq!(grid.reduce(ReduceOp::Mean)?, Scalar::Float(64.0));
        Ok(())
    }

    #[test]
    fn population_std() -> Result<()> {
        let grid = GridArray::from(array![[2.0, 4.0], [4.0, 4.0], [5.0, 5.0], [7.0, 9.0]]);
        assert_eq!(grid.reduce(ReduceOp::Std)?, Scalar::Float(2.0));
        Ok(())
    }

    #[test]
    fn empty_grid_reductions() -> Result<()> {
        let grid = GridArray::from_shape_vec(&[0, 3], Vec::<i32>::new())?;
        assert_eq!(grid.reduce(ReduceOp::Sum)?, Scalar::Int(0));
        assert!(grid.reduce(ReduceOp::Mean)?.is_missing());
        assert!(grid.reduce(ReduceOp::Min).is_err());
        assert!(grid.reduce_skip_missing(ReduceOp::Sum)?.is_missing());
        Ok(())
    }

    #[test]
    fn all_missing_skip_is_missing() -> Result<()> {
        let grid = GridArray::from(array![[f64::NAN, f64::NAN]]);
        for op in [ReduceOp::Sum, ReduceOp::Mean, ReduceOp::Min, ReduceOp::Max, ReduceOp::Std] {
            assert!(grid.reduce_skip_missing(op)?.is_missing());
        }
        Ok(())
    }
}
