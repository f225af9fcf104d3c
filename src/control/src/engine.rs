use crate::config::CoreConfig;
use crate::state::{
    ActuatorState, ControlState, Decision, HeatPumpCall, ManualMode, Mode, ZoneSet,
};
use crate::telemetry::Telemetry;

// One control cycle: readings + thresholds + previous state in, next mode
// and complete output state back. Pure apart from the caller-supplied
// monotonic clock; never panics, any unusable reading goes down the fault
// path instead.
pub fn decide(
    config: &CoreConfig,
    telemetry: &Telemetry,
    previous: &ControlState,
    now_ms: u64,
    forced: Option<ManualMode>,
) -> Decision {
    // Fault wins over everything, including a manual override.
    if telemetry.has_fault() {
        let mut outputs = ActuatorState::all_off();
        // Thermal relief stays armed as long as the DHW probe itself reads.
        outputs.overheat_valve_open = dhw_overheated(config, telemetry);
        return Decision {
            state: ControlState {
                mode: Mode::Error,
                boiler_takeover_since_ms: None,
                solar_pump_on: false,
            },
            outputs,
        };
    }

    // The solar loop is orthogonal to space conditioning and runs in every
    // non-fault mode.
    let (solar_pump_on, overheat_valve_open) =
        solar_overlay(config, telemetry, previous.solar_pump_on);

    let (mode, heat_pump_call, boiler_on, circulators, boiler_takeover_since_ms) =
        if let Some(forced) = forced {
            let (mode, call) = match forced {
                ManualMode::Heating => (Mode::HeatPumpHeating, HeatPumpCall::Heat),
                ManualMode::Cooling => (Mode::HeatPumpCooling, HeatPumpCall::Cool),
                ManualMode::Off => (Mode::Off, HeatPumpCall::None),
            };
            let circulators = match mode {
                Mode::Off => ZoneSet::EMPTY,
                _ => config.zones,
            };
            (mode, call, false, circulators, None)
        } else if telemetry.defrost_signal {
            (Mode::Defrost, HeatPumpCall::None, false, ZoneSet::EMPTY, None)
        } else {
            let ambient = f32::from(telemetry.ambient);
            if ambient < config.heating_season_ceiling_f {
                let (mode, call, boiler_on, takeover) =
                    heating_branch(config, telemetry, previous, now_ms);
                (mode, call, boiler_on, config.zones, takeover)
            } else if ambient > config.cooling_season_floor_f {
                let (mode, call) = cooling_branch(config, telemetry, previous);
                (mode, call, false, config.zones, None)
            } else {
                // Deadband between the season thresholds
                (Mode::Off, HeatPumpCall::None, false, ZoneSet::EMPTY, None)
            }
        };

    Decision {
        state: ControlState {
            mode,
            boiler_takeover_since_ms,
            solar_pump_on,
        },
        outputs: ActuatorState {
            heat_pump_call,
            boiler_on,
            circulators,
            solar_pump_on,
            overheat_valve_open,
        },
    }
}

fn tank_delta_t(telemetry: &Telemetry) -> f32 {
    let outlet = f32::from(telemetry.tank_outlet);
    let inlet = f32::from(telemetry.tank_inlet);
    if outlet >= inlet {
        outlet - inlet
    } else {
        inlet - outlet
    }
}

fn heating_branch(
    config: &CoreConfig,
    telemetry: &Telemetry,
    previous: &ControlState,
    now_ms: u64,
) -> (Mode, HeatPumpCall, bool, Option<u64>) {
    let delta_t = tank_delta_t(telemetry);
    let outlet = f32::from(telemetry.tank_outlet);

    let locked = match previous.boiler_takeover_since_ms {
        Some(since) => now_ms.saturating_sub(since) < config.boiler_min_dwell_ms,
        None => false,
    };

    // Boiler takeover: the heat pump cannot close a delta-T this large.
    // While the dwell lock is running the boiler keeps the load no matter
    // what delta-T does; a trigger arriving unlocked restarts the clock.
    if delta_t >= config.delta_t_heating_on_f || locked {
        let since = if locked {
            previous.boiler_takeover_since_ms
        } else {
            Some(now_ms)
        };
        return (Mode::BoilerHeating, HeatPumpCall::None, true, since);
    }

    let ambient = f32::from(telemetry.ambient);
    let eligible = ambient > config.heat_pump_critical_low_f
        && ambient >= config.heat_pump_min_ambient_f;

    if eligible {
        if outlet < config.heating_min_outlet_f {
            (Mode::HeatPumpHeating, HeatPumpCall::Heat, false, None)
        } else if delta_t <= config.delta_t_heating_off_f {
            (Mode::Off, HeatPumpCall::None, false, None)
        } else if previous.mode == Mode::HeatPumpHeating {
            // Inside the hysteresis band: keep the running call
            (Mode::HeatPumpHeating, HeatPumpCall::Heat, false, None)
        } else {
            (Mode::Off, HeatPumpCall::None, false, None)
        }
    } else if outlet < config.heating_min_outlet_f {
        // Too cold outside for the heat pump; the boiler carries the load
        (Mode::BoilerHeating, HeatPumpCall::None, true, None)
    } else {
        (Mode::Off, HeatPumpCall::None, false, None)
    }
}

fn cooling_branch(
    config: &CoreConfig,
    telemetry: &Telemetry,
    previous: &ControlState,
) -> (Mode, HeatPumpCall) {
    let delta_t = tank_delta_t(telemetry);
    let outlet = f32::from(telemetry.tank_outlet);
    let inlet = f32::from(telemetry.tank_inlet);

    let inlet_in_range =
        inlet >= config.cooling_inlet_min_f && inlet <= config.cooling_inlet_max_f;
    // Condensation safety: without a usable dew point the gate fails closed.
    let above_dew_point = telemetry.dew_point.is_connected()
        && outlet >= f32::from(telemetry.dew_point) + config.dew_point_buffer_f;
    let eligible = inlet_in_range && above_dew_point;

    if eligible && delta_t >= config.delta_t_cooling_on_f {
        (Mode::HeatPumpCooling, HeatPumpCall::Cool)
    } else if !eligible || delta_t <= config.delta_t_cooling_off_f {
        (Mode::Off, HeatPumpCall::None)
    } else if previous.mode == Mode::HeatPumpCooling {
        // Inside the hysteresis band: keep the running call
        (Mode::HeatPumpCooling, HeatPumpCall::Cool)
    } else {
        (Mode::Off, HeatPumpCall::None)
    }
}

fn dhw_overheated(config: &CoreConfig, telemetry: &Telemetry) -> bool {
    telemetry.dhw_tank.is_connected()
        && f32::from(telemetry.dhw_tank) >= config.dhw_overheat_f
}

fn solar_overlay(config: &CoreConfig, telemetry: &Telemetry, was_on: bool) -> (bool, bool) {
    let overheated = dhw_overheated(config, telemetry);

    if overheated || !telemetry.dhw_tank.is_connected() || !telemetry.solar_collector.is_connected()
    {
        return (false, overheated);
    }

    let delta = f32::from(telemetry.solar_collector) - f32::from(telemetry.dhw_tank);
    let pump_on = if delta >= config.solar_on_delta_f {
        true
    } else if delta <= config.solar_off_delta_f {
        false
    } else {
        was_on
    };

    (pump_on, overheated)
}
