use anyhow::{bail, Result};

use crate::state::ZoneSet;

// Threshold table driving the decision engine. Loaded once by the
// configuration collaborator and treated as read-only per cycle.
#[derive(Copy, Clone, Debug)]
pub struct CoreConfig {
    // Ambient below this selects the heating branch
    pub heating_season_ceiling_f: f32,

    // Ambient above this selects the cooling branch; the band between
    // ceiling and floor is the off deadband
    pub cooling_season_floor_f: f32,

    // Minimum ambient at which the heat pump is allowed to run
    pub heat_pump_min_ambient_f: f32,

    // Below this ambient the heat pump must never run
    pub heat_pump_critical_low_f: f32,

    // Tank delta-T hysteresis for the boiler takeover
    pub delta_t_heating_off_f: f32,
    pub delta_t_heating_on_f: f32,

    // Tank delta-T hysteresis for the cooling call
    pub delta_t_cooling_off_f: f32,
    pub delta_t_cooling_on_f: f32,

    // Outlet must stay this far above the dew point while cooling
    pub dew_point_buffer_f: f32,

    // Outlet below this calls for heat
    pub heating_min_outlet_f: f32,

    // Inlet range within which cooling is allowed
    pub cooling_inlet_min_f: f32,
    pub cooling_inlet_max_f: f32,

    // DHW tank hard limit; at or above it the solar pump stops and the
    // relief valve opens
    pub dhw_overheat_f: f32,

    // Collector-over-tank hysteresis for the solar pump
    pub solar_on_delta_f: f32,
    pub solar_off_delta_f: f32,

    // Minimum boiler runtime after a delta-T takeover
    pub boiler_min_dwell_ms: u64,

    // Installed circulator zones
    pub zones: ZoneSet,
}

impl CoreConfig {
    // Rejects a misordered table before it can reach the engine.
    pub fn validate(&self) -> Result<()> {
        if self.heating_season_ceiling_f > self.cooling_season_floor_f {
            bail!(
                "heating season ceiling {} is above cooling season floor {}",
                self.heating_season_ceiling_f,
                self.cooling_season_floor_f
            );
        }
        if self.delta_t_heating_on_f < self.delta_t_heating_off_f {
            bail!(
                "heating delta-T on threshold {} is below off threshold {}",
                self.delta_t_heating_on_f,
                self.delta_t_heating_off_f
            );
        }
        if self.delta_t_cooling_on_f < self.delta_t_cooling_off_f {
            bail!(
                "cooling delta-T on threshold {} is below off threshold {}",
                self.delta_t_cooling_on_f,
                self.delta_t_cooling_off_f
            );
        }
        if self.solar_on_delta_f < self.solar_off_delta_f {
            bail!(
                "solar on delta {} is below off delta {}",
                self.solar_on_delta_f,
                self.solar_off_delta_f
            );
        }
        if self.cooling_inlet_min_f > self.cooling_inlet_max_f {
            bail!(
                "cooling inlet range is empty: {} > {}",
                self.cooling_inlet_min_f,
                self.cooling_inlet_max_f
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> CoreConfig {
        CoreConfig {
            heating_season_ceiling_f: 60.0,
            cooling_season_floor_f: 70.0,
            heat_pump_min_ambient_f: 20.0,
            heat_pump_critical_low_f: -4.0,
            delta_t_heating_off_f: 10.0,
            delta_t_heating_on_f: 25.0,
            delta_t_cooling_off_f: 4.0,
            delta_t_cooling_on_f: 10.0,
            dew_point_buffer_f: 2.0,
            heating_min_outlet_f: 100.0,
            cooling_inlet_min_f: 45.0,
            cooling_inlet_max_f: 65.0,
            dhw_overheat_f: 180.0,
            solar_on_delta_f: 15.0,
            solar_off_delta_f: 5.0,
            boiler_min_dwell_ms: 600_000,
            zones: ZoneSet::new(0b11),
        }
    }

    #[test]
    fn test_sane_table_is_accepted() {
        assert!(thresholds().validate().is_ok());
    }

    #[test]
    fn test_equal_season_bounds_are_accepted() {
        let mut config = thresholds();
        config.heating_season_ceiling_f = 65.0;
        config.cooling_season_floor_f = 65.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_season_bounds_are_rejected() {
        let mut config = thresholds();
        config.heating_season_ceiling_f = 72.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_heating_hysteresis_is_rejected() {
        let mut config = thresholds();
        config.delta_t_heating_on_f = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_cooling_hysteresis_is_rejected() {
        let mut config = thresholds();
        config.delta_t_cooling_off_f = 12.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_solar_hysteresis_is_rejected() {
        let mut config = thresholds();
        config.solar_off_delta_f = 20.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_cooling_inlet_range_is_rejected() {
        let mut config = thresholds();
        config.cooling_inlet_min_f = 66.0;
        assert!(config.validate().is_err());
    }
}
