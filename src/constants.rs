// src/constants.rs - Physical and model constants shared across all sites

use crate::error::{IcestupaError, Result};
use crate::site::SiteId;
use serde::{Deserialize, Serialize};

// Model timing
pub const MODEL_TIME_STEP_S: f64 = 60.0 * 60.0; // Model time step [s]
pub const AWS_HEIGHT_M: f64 = 2.0; // Automatic weather station height [m]

// Physical constants
pub const VAN_KARMAN: f64 = 0.4;
pub const STEFAN_BOLTZMANN_W_M2_K4: f64 = 5.67e-8;
pub const STANDARD_PRESSURE_HPA: f64 = 1013.0;
pub const SNOW_DENSITY_KG_M3: f64 = 300.0;
pub const WATER_DENSITY_KG_M3: f64 = 1000.0;
pub const ICE_DENSITY_KG_M3: f64 = 917.0;
pub const AIR_DENSITY_KG_M3: f64 = 1.29; // at mean sea level
pub const SPECIFIC_HEAT_WATER_J_PER_KG_K: f64 = 4186.0;
pub const SPECIFIC_HEAT_ICE_J_PER_KG_K: f64 = 2097.0;
pub const SPECIFIC_HEAT_AIR_J_PER_KG_K: f64 = 1010.0;
pub const LATENT_HEAT_FUSION_J_PER_KG: f64 = 3.34e5;
pub const LATENT_HEAT_VAPORIZATION_J_PER_KG: f64 = 2.5e6;
pub const LATENT_HEAT_SUBLIMATION_J_PER_KG: f64 = 2.848e6;
pub const ICE_THERMAL_CONDUCTIVITY_W_M_K: f64 = 2.123; // Waite et al. 2006
pub const GRAVITY_M_S2: f64 = 9.81;

// Surface / weather parameters
pub const ICE_EMISSIVITY: f64 = 0.97;
pub const ROUGHNESS_LENGTH_M: f64 = 0.003; // ice momentum and scalar roughness
pub const ICE_ALBEDO: f64 = 0.25;
pub const FRESH_SNOW_ALBEDO: f64 = 0.85;
pub const LIQUID_PRECIP_TEMP_C: f64 = 1.0; // rain/snow threshold
pub const ALBEDO_DECAY_DAYS: f64 = 16.0;

// Fountain parameters
pub const FOUNTAIN_WATER_TEMP_C: f64 = 1.5;

// Surface layer thickness used when a site carries no calibrated value.
pub const DEFAULT_SURFACE_LAYER_THICKNESS_M: f64 = 50e-3;

/// The full constant table handed to the simulator for one site.
///
/// Identical across sites except for the two fields the per-site tables are
/// allowed to override: `dx` (calibrated surface layer thickness) and, for
/// gangles21 only, `tcc` (total cloud cover).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantsSet {
    pub dt: f64,
    pub h_aws: f64,
    pub van_karman: f64,
    pub sigma: f64,
    pub p0: f64,
    pub rho_s: f64,
    pub rho_w: f64,
    pub rho_i: f64,
    pub rho_a: f64,
    pub c_w: f64,
    pub c_i: f64,
    pub c_a: f64,
    pub l_f: f64,
    pub l_v: f64,
    pub l_s: f64,
    pub k_i: f64,
    pub g: f64,
    pub ie: f64,
    pub z: f64,
    pub a_i: f64,
    pub a_s: f64,
    pub t_ppt: f64,
    pub a_decay: f64,
    pub t_f: f64,
    /// Surface layer thickness [m], calibrated per site.
    pub dx: f64,
    /// Total cloud cover override, only set where a site pins it.
    pub tcc: Option<f64>,
}

impl Default for ConstantsSet {
    fn default() -> Self {
        ConstantsSet {
            dt: MODEL_TIME_STEP_S,
            h_aws: AWS_HEIGHT_M,
            van_karman: VAN_KARMAN,
            sigma: STEFAN_BOLTZMANN_W_M2_K4,
            p0: STANDARD_PRESSURE_HPA,
            rho_s: SNOW_DENSITY_KG_M3,
            rho_w: WATER_DENSITY_KG_M3,
            rho_i: ICE_DENSITY_KG_M3,
            rho_a: AIR_DENSITY_KG_M3,
            c_w: SPECIFIC_HEAT_WATER_J_PER_KG_K,
            c_i: SPECIFIC_HEAT_ICE_J_PER_KG_K,
            c_a: SPECIFIC_HEAT_AIR_J_PER_KG_K,
            l_f: LATENT_HEAT_FUSION_J_PER_KG,
            l_v: LATENT_HEAT_VAPORIZATION_J_PER_KG,
            l_s: LATENT_HEAT_SUBLIMATION_J_PER_KG,
            k_i: ICE_THERMAL_CONDUCTIVITY_W_M_K,
            g: GRAVITY_M_S2,
            ie: ICE_EMISSIVITY,
            z: ROUGHNESS_LENGTH_M,
            a_i: ICE_ALBEDO,
            a_s: FRESH_SNOW_ALBEDO,
            t_ppt: LIQUID_PRECIP_TEMP_C,
            a_decay: ALBEDO_DECAY_DAYS,
            t_f: FOUNTAIN_WATER_TEMP_C,
            dx: DEFAULT_SURFACE_LAYER_THICKNESS_M,
            tcc: None,
        }
    }
}

impl ConstantsSet {
    /// Global constant table with the site's calibrated overrides applied.
    pub fn for_site(site: SiteId) -> ConstantsSet {
        let overrides = site.constant_overrides();
        ConstantsSet {
            dx: overrides.dx,
            tcc: overrides.tcc,
            ..ConstantsSet::default()
        }
    }

    /// Same lookup from an unvalidated site key (code or display name).
    pub fn for_site_key(site_key: &str) -> Result<ConstantsSet> {
        let site = SiteId::parse(site_key)
            .ok_or_else(|| IcestupaError::UnknownSite(site_key.to_string()))?;
        Ok(Self::for_site(site))
    }
}

/// The closed set of per-site constant overrides. Site tables can narrow
/// exactly these fields and nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantOverrides {
    pub dx: f64,
    pub tcc: Option<f64>,
}
