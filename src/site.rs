// src/site.rs - Per-site deployment profiles and site-key resolution

use crate::constants::{ConstantOverrides, ConstantsSet};
use crate::error::{IcestupaError, Result};
use crate::fountain::{breakpoint, FountainSchedule};
use crate::storage::StorageLayout;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The deployments this crate knows about. Adding a site means adding a
/// variant here plus its literal table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteId {
    Guttannen20,
    Guttannen21,
    Guttannen22,
    Gangles21,
}

/// Spray control mode. Guttannen 2022 ran both a manually operated and an
/// automated fountain; every other site was manual only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SprayMode {
    #[default]
    Manual,
    Automated,
}

impl SprayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprayMode::Manual => "man",
            SprayMode::Automated => "auto",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "man" => Some(SprayMode::Manual),
            "auto" => Some(SprayMode::Automated),
            _ => None,
        }
    }
}

/// Display-name aliases accepted wherever a canonical site code is.
static DISPLAY_NAMES: Lazy<HashMap<&'static str, SiteId>> = Lazy::new(|| {
    use SiteId::*;
    let mut m = HashMap::new();
    m.insert("Guttannen 2020", Guttannen20);
    m.insert("Guttannen 2021", Guttannen21);
    m.insert("Guttannen 2022", Guttannen22);
    m.insert("Gangles 2021", Gangles21);
    m
});

impl SiteId {
    pub fn code(&self) -> &'static str {
        match self {
            SiteId::Guttannen20 => "guttannen20",
            SiteId::Guttannen21 => "guttannen21",
            SiteId::Guttannen22 => "guttannen22",
            SiteId::Gangles21 => "gangles21",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SiteId::Guttannen20 => "Guttannen 2020",
            SiteId::Guttannen21 => "Guttannen 2021",
            SiteId::Guttannen22 => "Guttannen 2022",
            SiteId::Gangles21 => "Gangles 2021",
        }
    }

    /// Accepts either the canonical short code or the human display name.
    pub fn parse(key: &str) -> Option<SiteId> {
        match key {
            "guttannen20" => Some(SiteId::Guttannen20),
            "guttannen21" => Some(SiteId::Guttannen21),
            "guttannen22" => Some(SiteId::Guttannen22),
            "gangles21" => Some(SiteId::Gangles21),
            _ => DISPLAY_NAMES.get(key).copied(),
        }
    }

    pub fn all() -> [SiteId; 4] {
        [
            SiteId::Guttannen20,
            SiteId::Guttannen21,
            SiteId::Guttannen22,
            SiteId::Gangles21,
        ]
    }

    /// The only constants a site may narrow: calibrated surface layer
    /// thickness, and total cloud cover where a site pins it.
    pub fn constant_overrides(&self) -> ConstantOverrides {
        match self {
            SiteId::Guttannen20 | SiteId::Guttannen21 | SiteId::Guttannen22 => {
                ConstantOverrides { dx: 45e-3, tcc: None }
            }
            SiteId::Gangles21 => ConstantOverrides { dx: 65e-3, tcc: Some(0.0) },
        }
    }
}

/// Fully resolved configuration of one deployment.
///
/// Immutable once built; rebuilt from the literal tables on every
/// resolution rather than persisted anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub name: String,
    pub spray: SprayMode,
    pub start_date: NaiveDateTime,
    /// Modeled melt-out / end date.
    pub expiry_date: NaiveDateTime,
    /// Last instant the fountain schedule is consulted for a positive height.
    pub fountain_off_date: NaiveDateTime,
    pub altitude: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Calibrated surface layer thickness [m].
    pub dx: f64,
    /// Mean fountain discharge [l/min], where measured.
    pub mean_discharge: Option<f64>,
    /// Ice height at model start [m], where the site did not start bare.
    pub initial_ice_height: Option<f64>,
    /// Total cloud cover override, only for sites that pin it.
    pub tcc: Option<f64>,
    pub fountain: FountainSchedule,
}

impl SiteProfile {
    /// Check the temporal invariants the rest of the crate relies on.
    fn validate(self) -> Result<SiteProfile> {
        if !(self.start_date < self.fountain_off_date
            && self.fountain_off_date <= self.expiry_date)
        {
            return Err(IcestupaError::Malformed {
                what: "site profile",
                details: format!(
                    "{}: expected start < fountain off <= expiry, got {} / {} / {}",
                    self.name, self.start_date, self.fountain_off_date, self.expiry_date
                ),
            });
        }
        if self.fountain.start_time() != self.start_date {
            return Err(IcestupaError::Malformed {
                what: "site profile",
                details: format!(
                    "{}: first fountain breakpoint {} != start date {}",
                    self.name,
                    self.fountain.start_time(),
                    self.start_date
                ),
            });
        }
        Ok(self)
    }
}

fn date(y: i32, mo: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .expect("literal site date")
        .and_hms_opt(h, min, 0)
        .expect("literal site time")
}

impl SiteId {
    /// Build this site's profile from its literal table.
    ///
    /// Spray mode only matters for Guttannen 2022; the other deployments
    /// had a single manually run fountain and ignore it.
    pub fn profile(&self, spray: SprayMode) -> Result<SiteProfile> {
        let profile = match (self, spray) {
            (SiteId::Guttannen20, _) => {
                let start = date(2020, 1, 3, 16, 0);
                SiteProfile {
                    name: self.code().to_string(),
                    spray: SprayMode::Manual,
                    start_date: start,
                    expiry_date: date(2020, 4, 6, 12, 0),
                    // camera shows shutoff on the morning of 8 Mar
                    fountain_off_date: date(2020, 3, 8, 9, 0),
                    altitude: 1047.6,
                    latitude: 46.65549,
                    longitude: 8.29149,
                    dx: 45e-3,
                    mean_discharge: Some(7.5),
                    initial_ice_height: None,
                    tcc: None,
                    fountain: FountainSchedule::build(vec![
                        breakpoint(start, 2.5),
                        breakpoint(date(2020, 1, 24, 12, 0), 3.5),
                        // pole lowered after partial collapse
                        breakpoint(date(2020, 2, 5, 19, 0), 2.5),
                    ])?,
                }
            }
            (SiteId::Guttannen21, _) => {
                let start = date(2020, 11, 22, 15, 0);
                SiteProfile {
                    name: self.code().to_string(),
                    spray: SprayMode::Manual,
                    start_date: start,
                    expiry_date: date(2021, 5, 10, 1, 0),
                    fountain_off_date: date(2021, 2, 20, 10, 0),
                    altitude: 1047.6,
                    latitude: 46.65549,
                    longitude: 8.29149,
                    dx: 45e-3,
                    mean_discharge: Some(7.5),
                    initial_ice_height: None,
                    tcc: None,
                    fountain: FountainSchedule::build(vec![
                        breakpoint(start, 2.68),
                        breakpoint(date(2020, 12, 30, 16, 0), 3.75),
                        breakpoint(date(2021, 1, 7, 16, 0), 4.68),
                        breakpoint(date(2021, 1, 11, 16, 0), 5.68),
                    ])?,
                }
            }
            (SiteId::Guttannen22, SprayMode::Manual) => {
                let start = date(2021, 12, 8, 14, 0);
                SiteProfile {
                    name: self.code().to_string(),
                    spray: SprayMode::Manual,
                    start_date: start,
                    expiry_date: date(2022, 1, 27, 0, 0),
                    fountain_off_date: date(2022, 1, 27, 0, 0),
                    altitude: 1047.6,
                    latitude: 46.65549,
                    longitude: 8.29149,
                    dx: 45e-3,
                    mean_discharge: None,
                    initial_ice_height: Some(0.13),
                    tcc: None,
                    fountain: FountainSchedule::build(vec![
                        breakpoint(start, 3.7),
                        breakpoint(date(2021, 12, 23, 16, 0), 4.7),
                        breakpoint(date(2022, 2, 12, 16, 0), 5.7),
                    ])?,
                }
            }
            (SiteId::Guttannen22, SprayMode::Automated) => {
                let start = date(2021, 12, 3, 8, 0);
                SiteProfile {
                    name: self.code().to_string(),
                    spray: SprayMode::Automated,
                    start_date: start,
                    expiry_date: date(2022, 1, 27, 0, 0),
                    fountain_off_date: date(2022, 1, 27, 0, 0),
                    altitude: 1047.6,
                    latitude: 46.65549,
                    longitude: 8.29149,
                    dx: 45e-3,
                    mean_discharge: None,
                    initial_ice_height: Some(0.13),
                    tcc: None,
                    fountain: FountainSchedule::build(vec![
                        breakpoint(start, 3.0),
                        breakpoint(date(2021, 12, 23, 16, 0), 4.0),
                    ])?,
                }
            }
            (SiteId::Gangles21, _) => {
                let start = date(2021, 1, 18, 0, 0);
                SiteProfile {
                    name: self.code().to_string(),
                    spray: SprayMode::Manual,
                    start_date: start,
                    expiry_date: date(2021, 6, 20, 0, 0),
                    fountain_off_date: date(2021, 3, 10, 18, 0),
                    altitude: 4009.0,
                    latitude: 34.216638,
                    longitude: 77.606949,
                    dx: 65e-3,
                    // minimum discharge of the supply line
                    mean_discharge: Some(60.0),
                    initial_ice_height: None,
                    tcc: Some(0.0),
                    fountain: FountainSchedule::build(vec![
                        breakpoint(start, 5.0),
                        breakpoint(date(2021, 1, 22, 16, 0), 9.0),
                    ])?,
                }
            }
        };
        profile.validate()
    }
}

/// Resolve a site key (code or display name) and optional spray mode into
/// the configuration triple the simulator and presentation layer consume.
///
/// Pure function of its inputs: no I/O, no caching.
pub fn resolve(
    site_key: &str,
    spray: Option<SprayMode>,
) -> Result<(ConstantsSet, SiteProfile, StorageLayout)> {
    let site = SiteId::parse(site_key)
        .ok_or_else(|| IcestupaError::UnknownSite(site_key.to_string()))?;
    let spray = spray.unwrap_or_default();
    let profile = site.profile(spray)?;
    let constants = ConstantsSet::for_site(site);
    let layout = StorageLayout::for_name(&profile.name);
    log::debug!(
        "resolved site '{}' as {} ({})",
        site_key,
        profile.name,
        profile.spray.as_str()
    );
    Ok((constants, profile, layout))
}

/// String-keyed variant of [`resolve`] for callers that carry the spray
/// mode as configuration text.
pub fn resolve_keys(
    site_key: &str,
    spray: Option<&str>,
) -> Result<(ConstantsSet, SiteProfile, StorageLayout)> {
    let spray = match spray {
        None => None,
        Some(s) => Some(SprayMode::from_str(s).ok_or_else(|| {
            IcestupaError::UnknownSprayMode {
                site: site_key.to_string(),
                mode: s.to_string(),
            }
        })?),
    };
    resolve(site_key, spray)
}
