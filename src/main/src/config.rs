use core::time::Duration;

use anyhow::Result;

use control::{CoreConfig, ZoneSet};

#[toml_cfg::toml_config]
pub struct TomlConfig {
    #[default(2)]
    cycle_interval_seconds: u64,
    #[default(60.0)]
    heating_season_ceiling_f: f32,
    #[default(70.0)]
    cooling_season_floor_f: f32,
    #[default(20.0)]
    heat_pump_min_ambient_f: f32,
    #[default(-4.0)]
    heat_pump_critical_low_f: f32,
    #[default(10.0)]
    delta_t_heating_off_f: f32,
    #[default(25.0)]
    delta_t_heating_on_f: f32,
    #[default(4.0)]
    delta_t_cooling_off_f: f32,
    #[default(10.0)]
    delta_t_cooling_on_f: f32,
    #[default(2.0)]
    dew_point_buffer_f: f32,
    #[default(100.0)]
    heating_min_outlet_f: f32,
    #[default(45.0)]
    cooling_inlet_min_f: f32,
    #[default(65.0)]
    cooling_inlet_max_f: f32,
    #[default(180.0)]
    dhw_overheat_f: f32,
    #[default(15.0)]
    solar_on_delta_f: f32,
    #[default(5.0)]
    solar_off_delta_f: f32,
    #[default(600)]
    boiler_min_dwell_seconds: u64,
    #[default(3)]
    zone_mask: u8,
    // Simulated-plant inputs until real acquisition hardware is attached
    #[default(42.0)]
    sim_ambient_f: f32,
    #[default(50.0)]
    sim_humidity_pct: f32,
}

pub struct Config {
    pub cycle_interval: Duration,
    pub thresholds: CoreConfig,
    pub sim_ambient_f: f32,
    pub sim_humidity_pct: f32,
}

impl Config {
    pub fn read() -> Result<Self> {
        let config = Config::from(TOML_CONFIG);
        config.thresholds.validate()?;
        Ok(config)
    }
}

impl From<TomlConfig> for Config {
    fn from(config: TomlConfig) -> Self {
        Config {
            cycle_interval: Duration::from_secs(config.cycle_interval_seconds),
            thresholds: CoreConfig {
                heating_season_ceiling_f: config.heating_season_ceiling_f,
                cooling_season_floor_f: config.cooling_season_floor_f,
                heat_pump_min_ambient_f: config.heat_pump_min_ambient_f,
                heat_pump_critical_low_f: config.heat_pump_critical_low_f,
                delta_t_heating_off_f: config.delta_t_heating_off_f,
                delta_t_heating_on_f: config.delta_t_heating_on_f,
                delta_t_cooling_off_f: config.delta_t_cooling_off_f,
                delta_t_cooling_on_f: config.delta_t_cooling_on_f,
                dew_point_buffer_f: config.dew_point_buffer_f,
                heating_min_outlet_f: config.heating_min_outlet_f,
                cooling_inlet_min_f: config.cooling_inlet_min_f,
                cooling_inlet_max_f: config.cooling_inlet_max_f,
                dhw_overheat_f: config.dhw_overheat_f,
                solar_on_delta_f: config.solar_on_delta_f,
                solar_off_delta_f: config.solar_off_delta_f,
                boiler_min_dwell_ms: config.boiler_min_dwell_seconds * 1_000,
                zones: ZoneSet::new(config.zone_mask),
            },
            sim_ambient_f: config.sim_ambient_f,
            sim_humidity_pct: config.sim_humidity_pct,
        }
    }
}
