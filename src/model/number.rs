//! Numeric output: whole numbers are written as JSON integers (`1`, not `1.0`).

use serde::{Serialize, Serializer};

/// Largest magnitude below which every whole `f64` is an exact integer.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// An `f64` that serializes as an integer when it has no fractional part.
#[derive(Debug, Clone, Copy)]
struct Whole(f64);

impl Serialize for Whole {
    #[allow(clippy::cast_possible_truncation)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < EXACT_INT_LIMIT {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// `serialize_with` for a single number.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Whole(*value).serialize(serializer)
}

/// `serialize_with` for a sequence of numbers.
#[allow(clippy::ptr_arg)]
pub fn serialize_seq<S: Serializer>(values: &Vec<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().copied().map(Whole))
}
