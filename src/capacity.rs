//! Traffic capacity of a cellular layout.
//!
//! `capacity = (total area / cell area) × (channels / N)`: number of cells
//! covering the service area times the channels each cell gets once the
//! spectrum is split across a cluster of `N` cells.

use std::fmt;

use crate::cluster::ReusePattern;
use crate::error::ToolError;

/// Validated inputs of the capacity window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityInputs {
    /// Service area to cover.
    pub total_area: f64,
    /// Area covered by a single cell, same unit as `total_area`.
    pub cell_area: f64,
    /// Total number of duplex channels available.
    pub channels: u32,
}

impl CapacityInputs {
    /// Parses the three text entries; either all succeed or nothing is returned.
    pub fn from_inputs(
        total_area: &str,
        cell_area: &str,
        channels: &str,
    ) -> Result<Self, ToolError> {
        Ok(Self {
            total_area: parse_area("total area", total_area)?,
            cell_area: parse_area("cell area", cell_area)?,
            channels: channels
                .trim()
                .parse()
                .map_err(|_| ToolError::InvalidNumber {
                    field: "channels",
                    value: channels.trim().to_string(),
                })?,
        })
    }

    /// Capacity for a cluster of `cluster_size` cells.
    ///
    /// Zero divisors are reported instead of producing infinity or NaN.
    pub fn capacity(&self, cluster_size: u32) -> Result<f64, ToolError> {
        if cluster_size == 0 {
            return Err(ToolError::DivisionByZero {
                divisor: "cluster size N",
            });
        }
        if self.cell_area == 0.0 {
            return Err(ToolError::DivisionByZero {
                divisor: "cell area",
            });
        }
        let cells = self.total_area / self.cell_area;
        Ok(cells * (f64::from(self.channels) / f64::from(cluster_size)))
    }
}

fn parse_area(field: &'static str, text: &str) -> Result<f64, ToolError> {
    let text = text.trim();
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ToolError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

/// The figures shown to the student after a capacity calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityReport {
    /// Cluster size `N` the capacity was computed for.
    pub cluster_size: u32,
    /// Co-channel reuse ratio `D / R`.
    pub reuse_ratio: f64,
    /// The inputs as entered.
    pub inputs: CapacityInputs,
    /// Resulting capacity.
    pub capacity: f64,
}

impl CapacityReport {
    /// Computes the report for `pattern`.
    pub fn new(pattern: ReusePattern, inputs: CapacityInputs) -> Result<Self, ToolError> {
        let cluster_size = pattern.cluster_size();
        Ok(Self {
            cluster_size,
            reuse_ratio: pattern.reuse_ratio(),
            capacity: inputs.capacity(cluster_size)?,
            inputs,
        })
    }

    /// The one-line result, two decimals.
    pub fn headline(&self) -> String {
        format!("Capacity: {:.2}", self.capacity)
    }
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "N: {}", self.cluster_size)?;
        writeln!(f, "D/R: {:.2}", self.reuse_ratio)?;
        writeln!(f, "Total area: {}", self.inputs.total_area)?;
        writeln!(f, "Cell area: {}", self.inputs.cell_area)?;
        writeln!(f, "Channels: {}", self.inputs.channels)?;
        write!(f, "{}", self.headline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(total_area: f64, cell_area: f64, channels: u32) -> CapacityInputs {
        CapacityInputs {
            total_area,
            cell_area,
            channels,
        }
    }

    // ── capacity ────────────────────────────────────────────────────

    #[test]
    fn seven_cell_cluster_example() {
        let c = inputs(100.0, 4.0, 21).capacity(7).unwrap();
        assert!((c - 75.0).abs() < 1e-9, "got {c}");
    }

    #[test]
    fn reference_scenario_formats_to_two_decimals() {
        let report =
            CapacityReport::new(ReusePattern::new(2, 1).unwrap(), inputs(100.0, 4.0, 21)).unwrap();
        assert_eq!(report.cluster_size, 7);
        assert_eq!(report.headline(), "Capacity: 75.00");
    }

    #[test]
    fn one_channel_per_cluster_cell() {
        let report =
            CapacityReport::new(ReusePattern::new(2, 1).unwrap(), inputs(100.0, 4.0, 7)).unwrap();
        assert_eq!(report.headline(), "Capacity: 25.00");
    }

    #[test]
    fn fractional_capacity_is_rounded_for_display() {
        let report =
            CapacityReport::new(ReusePattern::new(1, 1).unwrap(), inputs(10.0, 3.0, 1)).unwrap();
        assert_eq!(report.headline(), "Capacity: 1.11");
    }

    #[test]
    fn zero_cluster_size_is_division_by_zero() {
        let err = inputs(100.0, 4.0, 21).capacity(0).unwrap_err();
        assert!(matches!(err, ToolError::DivisionByZero { .. }));
    }

    #[test]
    fn zero_cell_area_is_division_by_zero() {
        let err = inputs(100.0, 0.0, 21).capacity(7).unwrap_err();
        assert_eq!(
            err,
            ToolError::DivisionByZero {
                divisor: "cell area"
            }
        );
    }

    // ── input parsing ───────────────────────────────────────────────

    #[test]
    fn parses_all_three_entries() {
        let parsed = CapacityInputs::from_inputs("100", " 4.5 ", "21").unwrap();
        assert_eq!(parsed, inputs(100.0, 4.5, 21));
    }

    #[test]
    fn rejects_non_numeric_area() {
        let err = CapacityInputs::from_inputs("lots", "4", "21").unwrap_err();
        assert!(matches!(
            err,
            ToolError::InvalidNumber {
                field: "total area",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_finite_area() {
        assert!(CapacityInputs::from_inputs("inf", "4", "21").is_err());
        assert!(CapacityInputs::from_inputs("100", "NaN", "21").is_err());
    }

    #[test]
    fn rejects_fractional_channel_count() {
        let err = CapacityInputs::from_inputs("100", "4", "2.5").unwrap_err();
        assert!(matches!(err, ToolError::InvalidNumber { field: "channels", .. }));
    }

    // ── report ──────────────────────────────────────────────────────

    #[test]
    fn report_lists_every_figure() {
        let report =
            CapacityReport::new(ReusePattern::new(2, 1).unwrap(), inputs(100.0, 4.0, 21)).unwrap();
        let text = report.to_string();
        for line in ["N: 7", "D/R: 4.58", "Total area: 100", "Cell area: 4", "Channels: 21"] {
            assert!(text.contains(line), "missing '{line}' in:\n{text}");
        }
        assert!(text.ends_with("Capacity: 75.00"));
    }
}
