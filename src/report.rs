// src/report.rs - Console rendering of the per-site summary tables

use crate::error::Result;
use crate::metrics::ReportMetrics;
use crate::results::ResultsSummary;
use crate::site::SiteProfile;
use colored::Colorize;

const KG_PER_TON: f64 = 1000.0;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

/// Fountain estimation table, one `label | value` row per line.
pub fn fountain_table(metrics: &ReportMetrics, summary: &ResultsSummary) -> Result<String> {
    let rows = [
        ("Spray Radius", format!("{:.1} m", summary.spray_radius()?)),
        (
            "Water sprayed",
            format!("{:.0} m3", summary.water_sprayed()? / KG_PER_TON),
        ),
        (
            "Mean discharge rate",
            format!("{:.0} l/min", summary.mean_discharge()?),
        ),
        (
            "Mean freeze rate",
            format!("{} l/min", fmt_opt(metrics.mean_freeze_rate, 1)),
        ),
        (
            "Mean melt rate",
            format!("{:.1} l/min", metrics.mean_melt_rate),
        ),
        (
            "Runtime",
            format!("{} hours", metrics.fountain_active_duration),
        ),
    ];
    Ok(render_rows("Fountain", &rows))
}

/// Icestupa estimation table.
pub fn icestupa_table(
    metrics: &ReportMetrics,
    summary: &ResultsSummary,
    profile: &SiteProfile,
) -> Result<String> {
    let mut rows = vec![
        (
            "Max Ice Volume",
            format!("{:.0} m3", metrics.max_ice_volume),
        ),
        (
            "Meltwater released",
            format!("{:.0} tons", summary.meltwater_released()? / KG_PER_TON),
        ),
        (
            "Vapour loss",
            format!("{:.0} tons", summary.sublimated_mass()? / KG_PER_TON),
        ),
        (
            "Net Water loss",
            format!("{:.0} percent", metrics.net_water_loss_fraction),
        ),
        (
            "Melt-out date",
            profile.expiry_date.format("%b %d").to_string(),
        ),
    ];
    if let Some(wue) = metrics.water_use_efficiency {
        rows.push(("Water-use efficiency", format!("{:.0} percent", wue)));
    }
    Ok(render_rows("Icestupa", &rows))
}

fn render_rows(header: &str, rows: &[(&str, String)]) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} | Estimation |\n", header));
    out.push_str("| --- | --- |\n");
    for (label, value) in rows {
        out.push_str(&format!("| {} | {} |\n", label, value));
    }
    out
}

/// Dump both summary tables for a site run to the console.
pub fn print_site_report(
    metrics: &ReportMetrics,
    summary: &ResultsSummary,
    profile: &SiteProfile,
) -> Result<()> {
    println!(
        "\n=== {} ({}) ===\n",
        profile.name.bold(),
        profile.spray.as_str()
    );
    println!("{}", fountain_table(metrics, summary)?.cyan());
    println!("{}", icestupa_table(metrics, summary, profile)?.cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{SiteId, SprayMode};

    fn sample_metrics() -> ReportMetrics {
        ReportMetrics {
            mean_freeze_rate: Some(4.2),
            mean_melt_rate: 1.3,
            fountain_active_duration: 1530,
            max_ice_volume: 430.0,
            net_water_loss_fraction: 64.0,
            water_use_efficiency: None,
        }
    }

    fn sample_summary() -> ResultsSummary {
        ResultsSummary {
            r_f: Some(4.3),
            m_f: Some(474474.0),
            d_f: Some(7.5),
            m_water: Some(50000.0),
            m_sub: Some(2000.0),
            m_input: Some(60000.0),
            m_waste: Some(1500.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_fountain_table_rows() {
        let rendered = fountain_table(&sample_metrics(), &sample_summary()).unwrap();
        assert!(rendered.contains("| Spray Radius | 4.3 m |"));
        assert!(rendered.contains("| Water sprayed | 474 m3 |"));
        assert!(rendered.contains("| Mean freeze rate | 4.2 l/min |"));
        assert!(rendered.contains("| Runtime | 1530 hours |"));
    }

    #[test]
    fn test_fountain_table_without_freeze_rate() {
        let metrics = ReportMetrics {
            mean_freeze_rate: None,
            ..sample_metrics()
        };
        let rendered = fountain_table(&metrics, &sample_summary()).unwrap();
        assert!(rendered.contains("| Mean freeze rate | n/a l/min |"));
    }

    #[test]
    fn test_icestupa_table_rows() {
        let profile = SiteId::Guttannen21.profile(SprayMode::Manual).unwrap();
        let rendered =
            icestupa_table(&sample_metrics(), &sample_summary(), &profile).unwrap();
        assert!(rendered.contains("| Max Ice Volume | 430 m3 |"));
        assert!(rendered.contains("| Meltwater released | 50 tons |"));
        assert!(rendered.contains("| Net Water loss | 64 percent |"));
        assert!(rendered.contains("| Melt-out date | May 10 |"));
        assert!(!rendered.contains("Water-use efficiency"));
    }

    #[test]
    fn test_icestupa_table_includes_wue_when_computed() {
        let metrics = ReportMetrics {
            water_use_efficiency: Some(24.7),
            ..sample_metrics()
        };
        let profile = SiteId::Gangles21.profile(SprayMode::Manual).unwrap();
        let rendered = icestupa_table(&metrics, &sample_summary(), &profile).unwrap();
        assert!(rendered.contains("| Water-use efficiency | 25 percent |"));
    }

    #[test]
    fn test_missing_summary_key_propagates() {
        let summary = ResultsSummary::default();
        assert!(fountain_table(&sample_metrics(), &summary).is_err());
    }
}
