#![no_std]

mod config;
mod dewpoint;
mod engine;
mod state;
mod telemetry;

pub use config::CoreConfig;
pub use dewpoint::dew_point_f;
pub use engine::decide;
pub use state::{ActuatorState, ControlState, Decision, HeatPumpCall, ManualMode, Mode, ZoneSet};
pub use telemetry::{Telemetry, Temperature, DISCONNECTED};

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

    fn readings(ambient: f32, inlet: f32, outlet: f32) -> Telemetry {
        Telemetry {
            ambient: Temperature::new(ambient),
            tank_inlet: Temperature::new(inlet),
            tank_outlet: Temperature::new(outlet),
            dhw_tank: Temperature::new(120.0),
            solar_collector: Temperature::new(125.0),
            humidity_pct: 50.0,
            dew_point: Temperature::new(55.0),
            sensor_fault: false,
            heat_pump_fault: false,
            defrost_signal: false,
        }
    }

    // Deep winter, heat pump locked out by the critical low: the boiler
    // alone has to bring the outlet up.
    #[test]
    fn test_extreme_cold_runs_the_boiler() {
        let config = thresholds();
        let telemetry = readings(-10.0, 80.0, 75.0);

        let decision = decide(&config, &telemetry, &ControlState::new(), 0, None);
        assert_eq!(decision.state.mode, Mode::BoilerHeating);
        assert!(decision.outputs.boiler_on);
        assert_eq!(decision.outputs.heat_pump_call, HeatPumpCall::None);
    }

    // Mild winter day, heat pump would be allowed, but the tank spread is
    // too wide for it: the takeover rule hands the load to the boiler.
    #[test]
    fn test_wide_tank_spread_triggers_the_takeover() {
        let config = thresholds();
        let telemetry = readings(30.0, 70.0, 100.0);

        let decision = decide(&config, &telemetry, &ControlState::new(), 5_000, None);
        assert_eq!(decision.state.mode, Mode::BoilerHeating);
        assert!(decision.outputs.boiler_on);
        assert_eq!(decision.outputs.heat_pump_call, HeatPumpCall::None);
        assert_eq!(decision.state.boiler_takeover_since_ms, Some(5_000));
    }

    // Hot day, chilled-water loop healthy and the outlet safely above the
    // dew point: the heat pump cools.
    #[test]
    fn test_summer_cooling_call() {
        let config = thresholds();
        let mut telemetry = readings(85.0, 60.0, 75.0);
        telemetry.dew_point = Temperature::new(dew_point_f(85.0, 50.0));

        let decision = decide(&config, &telemetry, &ControlState::new(), 0, None);
        assert_eq!(decision.state.mode, Mode::HeatPumpCooling);
        assert_eq!(decision.outputs.heat_pump_call, HeatPumpCall::Cool);
    }

    // Scorching day but the loop water is already too warm to send through
    // the heat pump: everything stays off.
    #[test]
    fn test_overly_warm_inlet_blocks_cooling() {
        let config = thresholds();
        let telemetry = readings(105.0, 70.0, 80.0);

        let decision = decide(&config, &telemetry, &ControlState::new(), 0, None);
        assert_eq!(decision.state.mode, Mode::Off);
        assert_eq!(decision.outputs.heat_pump_call, HeatPumpCall::None);
    }
}
