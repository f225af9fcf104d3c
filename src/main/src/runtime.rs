use anyhow::Result;
use log::*;

use control::{decide, ControlState, CoreConfig, ManualMode, Mode};

use crate::actuators::ActuatorBank;
use crate::hmi::{Command, Snapshot};
use crate::sensors::TelemetrySource;
use crate::status::{StatusIndicator, StatusLight};

// One controller instance owns the whole cycle: read, decide, apply,
// indicate, report. The engine state and the manual override live here and
// nowhere else.
pub struct Controller<S, A, I> {
    thresholds: CoreConfig,
    state: ControlState,
    forced: Option<ManualMode>,
    source: S,
    actuators: A,
    indicator: I,
}

impl<S, A, I> Controller<S, A, I>
where
    S: TelemetrySource,
    A: ActuatorBank,
    I: StatusIndicator,
{
    pub fn new(thresholds: CoreConfig, source: S, actuators: A, indicator: I) -> Self {
        Self {
            thresholds,
            state: ControlState::new(),
            forced: None,
            source,
            actuators,
            indicator,
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn thresholds(&self) -> &CoreConfig {
        &self.thresholds
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::ForceHeating => {
                info!("Manual override: heating");
                self.forced = Some(ManualMode::Heating);
            }
            Command::ForceCooling => {
                info!("Manual override: cooling");
                self.forced = Some(ManualMode::Cooling);
            }
            Command::ForceOff => {
                info!("Manual override: off");
                self.forced = Some(ManualMode::Off);
            }
            Command::Release => {
                info!("Manual override released");
                self.forced = None;
            }
            Command::ClearError => {
                info!("Control state reset by operator");
                self.state = ControlState::new();
            }
            Command::SetThreshold { name, value } => self.set_threshold(&name, value),
        }
    }

    fn set_threshold(&mut self, name: &str, value: f32) {
        let mut updated = self.thresholds;
        let field = match name {
            "heating_season_ceiling_f" => &mut updated.heating_season_ceiling_f,
            "cooling_season_floor_f" => &mut updated.cooling_season_floor_f,
            "heat_pump_min_ambient_f" => &mut updated.heat_pump_min_ambient_f,
            "heat_pump_critical_low_f" => &mut updated.heat_pump_critical_low_f,
            "delta_t_heating_off_f" => &mut updated.delta_t_heating_off_f,
            "delta_t_heating_on_f" => &mut updated.delta_t_heating_on_f,
            "delta_t_cooling_off_f" => &mut updated.delta_t_cooling_off_f,
            "delta_t_cooling_on_f" => &mut updated.delta_t_cooling_on_f,
            "dew_point_buffer_f" => &mut updated.dew_point_buffer_f,
            "heating_min_outlet_f" => &mut updated.heating_min_outlet_f,
            "cooling_inlet_min_f" => &mut updated.cooling_inlet_min_f,
            "cooling_inlet_max_f" => &mut updated.cooling_inlet_max_f,
            "dhw_overheat_f" => &mut updated.dhw_overheat_f,
            "solar_on_delta_f" => &mut updated.solar_on_delta_f,
            "solar_off_delta_f" => &mut updated.solar_off_delta_f,
            _ => {
                warn!("Ignoring unknown threshold {:?}", name);
                return;
            }
        };
        *field = value;

        match updated.validate() {
            Ok(()) => {
                info!("Threshold {} set to {}", name, value);
                self.thresholds = updated;
            }
            Err(err) => warn!("Rejecting threshold update {}={}: {}", name, value, err),
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> Result<Snapshot> {
        let telemetry = self.source.read()?;
        let decision = decide(&self.thresholds, &telemetry, &self.state, now_ms, self.forced);

        if decision.state.mode != self.state.mode {
            info!("Mode {:?} -> {:?}", self.state.mode, decision.state.mode);
        }

        self.actuators.apply(&decision.outputs)?;
        let light = StatusLight::for_cycle(decision.state.mode, decision.outputs.overheat_valve_open);
        self.indicator.show(light.into());

        let snapshot = Snapshot::new(&telemetry, &decision, self.forced.is_some());
        self.state = decision.state;
        Ok(snapshot)
    }
}
