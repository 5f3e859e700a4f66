// src/params.rs - Semantic classification of output-table columns

use crate::output_table::SimulationOutputTable;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Semantic role of a simulator column, used by the presentation layer to
/// group plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Measured forcing fed into the simulator.
    Input,
    /// Mass/energy balance terms the simulator computes.
    Output,
    /// Geometry and surface quantities derived from the balance.
    Derived,
}

/// Display metadata for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMetadata {
    pub kind: ParameterKind,
    pub label: String,
    pub units: String,
}

static PARAMETER_TABLE: Lazy<HashMap<&'static str, (ParameterKind, &'static str, &'static str)>> =
    Lazy::new(|| {
        use ParameterKind::*;
        let mut m = HashMap::new();

        // forcing
        m.insert("Discharge", (Input, "Discharge", "[l/min]"));
        m.insert("T_a", (Input, "Temperature", "[C]"));
        m.insert("RH", (Input, "Humidity", "[%]"));
        m.insert("v_a", (Input, "Wind Speed", "[m/s]"));
        m.insert("p_a", (Input, "Pressure", "[hPa]"));
        m.insert("SW_direct", (Input, "Direct Shortwave", "[W/m2]"));
        m.insert("SW_diffuse", (Input, "Diffuse Shortwave", "[W/m2]"));
        m.insert("LW_in", (Input, "Incoming Longwave", "[W/m2]"));
        m.insert("ppt", (Input, "Precipitation", "[mm]"));

        // balance terms
        m.insert("fountain_froze", (Output, "Frozen Discharge", "[kg]"));
        m.insert("melted", (Output, "Melt", "[kg]"));
        m.insert("sub", (Output, "Sublimation", "[kg]"));
        m.insert("vapour", (Output, "Vapour", "[kg]"));
        m.insert("ppt_froze", (Output, "Frozen Precipitation", "[kg]"));
        m.insert("iceV", (Output, "Ice Volume", "[m3]"));
        m.insert("ice", (Output, "Ice Mass", "[kg]"));
        m.insert("Qs", (Output, "Sensible Heat Flux", "[W/m2]"));
        m.insert("Ql", (Output, "Latent Heat Flux", "[W/m2]"));
        m.insert("Qf", (Output, "Fountain Heat Flux", "[W/m2]"));
        m.insert("Qg", (Output, "Ground Heat Flux", "[W/m2]"));
        m.insert("SW", (Output, "Net Shortwave", "[W/m2]"));
        m.insert("LW", (Output, "Net Longwave", "[W/m2]"));

        // derived geometry and surface state
        m.insert("A_cone", (Derived, "Surface Area", "[m2]"));
        m.insert("r_ice", (Derived, "Ice Radius", "[m]"));
        m.insert("h_ice", (Derived, "Ice Height", "[m]"));
        m.insert("s_cone", (Derived, "Slope", "[-]"));
        m.insert("f_cone", (Derived, "Solar Surface Area Fraction", "[-]"));
        m.insert("T_s", (Derived, "Surface Temperature", "[C]"));
        m.insert("T_bulk", (Derived, "Bulk Temperature", "[C]"));
        m.insert("alb", (Derived, "Albedo", "[-]"));

        m
    });

/// Metadata for a column name. Columns the registry does not know are
/// classified as Derived under their raw name so that new simulator output
/// still renders instead of failing.
pub fn get_parameter_metadata(column: &str) -> ParameterMetadata {
    match PARAMETER_TABLE.get(column) {
        Some(&(kind, label, units)) => ParameterMetadata {
            kind,
            label: label.to_string(),
            units: units.to_string(),
        },
        None => ParameterMetadata {
            kind: ParameterKind::Derived,
            label: column.to_string(),
            units: String::new(),
        },
    }
}

/// One column plus its display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedColumn {
    pub column: String,
    pub label: String,
    pub units: String,
}

/// A table's columns partitioned by semantic kind, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedColumns {
    pub input: Vec<ClassifiedColumn>,
    pub output: Vec<ClassifiedColumn>,
    pub derived: Vec<ClassifiedColumn>,
}

pub fn classify_columns(table: &SimulationOutputTable) -> ClassifiedColumns {
    let mut classified = ClassifiedColumns::default();
    for column in table.column_names() {
        let meta = get_parameter_metadata(column);
        let entry = ClassifiedColumn {
            column: column.clone(),
            label: meta.label,
            units: meta.units,
        };
        match meta.kind {
            ParameterKind::Input => classified.input.push(entry),
            ParameterKind::Output => classified.output.push(entry),
            ParameterKind::Derived => classified.derived.push(entry),
        }
    }
    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_columns_have_registered_metadata() {
        let meta = get_parameter_metadata("fountain_froze");
        assert_eq!(meta.kind, ParameterKind::Output);
        assert_eq!(meta.label, "Frozen Discharge");
        assert_eq!(meta.units, "[kg]");

        let meta = get_parameter_metadata("Discharge");
        assert_eq!(meta.kind, ParameterKind::Input);

        let meta = get_parameter_metadata("f_cone");
        assert_eq!(meta.kind, ParameterKind::Derived);
        assert_eq!(meta.label, "Solar Surface Area Fraction");
    }

    #[test]
    fn test_unknown_column_falls_back_to_derived() {
        let meta = get_parameter_metadata("j_mystery");
        assert_eq!(meta.kind, ParameterKind::Derived);
        assert_eq!(meta.label, "j_mystery");
        assert_eq!(meta.units, "");
    }

    #[test]
    fn test_classify_partitions_in_source_order() {
        let table = SimulationOutputTable::new(vec![
            ("Discharge", vec![0.0]),
            ("T_a", vec![-5.0]),
            ("fountain_froze", vec![2.0]),
            ("iceV", vec![1.0]),
            ("f_cone", vec![0.4]),
        ])
        .unwrap();
        let classified = classify_columns(&table);
        let cols =
            |v: &[ClassifiedColumn]| v.iter().map(|c| c.column.clone()).collect::<Vec<_>>();
        assert_eq!(cols(&classified.input), ["Discharge", "T_a"]);
        assert_eq!(cols(&classified.output), ["fountain_froze", "iceV"]);
        assert_eq!(cols(&classified.derived), ["f_cone"]);
    }
}
