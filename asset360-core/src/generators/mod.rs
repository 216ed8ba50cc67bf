//! Table generators, one module per group of related entities.
//!
//! Each generator is a function of upstream tables, the static catalog and the shared
//! [`GenerationContext`](crate::context::GenerationContext). None of them mutate their
//! inputs.

pub mod asset;
pub mod attributes;
pub mod catalog;
pub mod commercial;
pub mod lims;
pub mod material;
pub mod topology;
pub mod work_order;

/// Rounds to two decimal places, the precision of every stored measurement.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `AI001`-style identifiers used by the per-asset attribute tables.
pub(crate) fn padded_id(prefix: &str, n: usize) -> String {
    format!("{}{:03}", prefix, n)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(85.456), 85.46);
        assert_eq!(round2(12.0), 12.0);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn test_padded_id() {
        assert_eq!(padded_id("AI", 7), "AI007");
        assert_eq!(padded_id("OEE", 1234), "OEE1234");
    }
}
