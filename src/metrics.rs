//! Reporting metrics derived from simulator output.
//!
//! The simulator's output table carries per-step masses; the dashboard
//! reports them as per-minute volumetric rates. Means over masses ignore
//! NaN gaps the same way the upstream table tooling does.

use crate::constants::ConstantsSet;
use crate::error::{IcestupaError, Result};
use crate::output_table::SimulationOutputTable;
use crate::results::ResultsSummary;
use serde::{Deserialize, Serialize};

/// Scalar metrics handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    /// Mean freeze rate over fountain-on steps [l/min]; `None` when the
    /// fountain never ran.
    pub mean_freeze_rate: Option<f64>,
    /// Mean melt rate over the whole run [l/min].
    pub mean_melt_rate: f64,
    /// Number of fountain-on steps (elapsed hours at hourly cadence).
    pub fountain_active_duration: usize,
    /// Largest modeled ice volume [m^3].
    pub max_ice_volume: f64,
    /// Water lost to waste/runoff and sublimation, as % of input.
    pub net_water_loss_fraction: f64,
    /// Water-use efficiency [%], where the simulator computed it.
    pub water_use_efficiency: Option<f64>,
}

/// Mean over the values where `keep` holds, skipping NaN gaps.
fn masked_nanmean(values: &[f64], keep: impl Fn(usize) -> bool) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (i, &v) in values.iter().enumerate() {
        if keep(i) && !v.is_nan() {
            sum += v;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Derive the report metrics for one site run.
///
/// Freeze-rate policy: idle steps (no active spraying) are excluded so they
/// do not dilute the average. Freezing continues passively on idle steps,
/// but the fountain freeze rate is defined over fountain-on periods only.
pub fn compute(
    table: &SimulationOutputTable,
    summary: &ResultsSummary,
    constants: &ConstantsSet,
) -> Result<ReportMetrics> {
    if table.is_empty() {
        return Err(IcestupaError::EmptyTable);
    }

    let discharge = table.column("Discharge")?;
    let fountain_froze = table.column("fountain_froze")?;
    let melted = table.column("melted")?;
    let ice_volume = table.column("iceV")?;

    let minutes_per_step = constants.dt / 60.0;
    let fountain_on = |i: usize| discharge[i] != 0.0;

    let mean_freeze_rate =
        masked_nanmean(fountain_froze, fountain_on).map(|mean| mean / minutes_per_step);
    let mean_melt_rate = masked_nanmean(melted, |_| true)
        .map(|mean| mean / minutes_per_step)
        .unwrap_or(f64::NAN);
    let fountain_active_duration = (0..table.len()).filter(|&i| fountain_on(i)).count();
    let max_ice_volume = ice_volume
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let net_water_loss_fraction =
        (summary.waste_mass()? + summary.sublimated_mass()?) / summary.input_mass()? * 100.0;

    Ok(ReportMetrics {
        mean_freeze_rate,
        mean_melt_rate,
        fountain_active_duration,
        max_ice_volume,
        net_water_loss_fraction,
        water_use_efficiency: summary.wue,
    })
}
