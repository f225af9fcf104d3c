use serde::{Deserialize, Serialize};

// Temperature in degrees Fahrenheit
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Serialize, Deserialize)]
pub struct Temperature(pub f32);

// Reported by the acquisition layer when a probe is absent or shorted
pub const DISCONNECTED: Temperature = Temperature(-999.0);

impl Temperature {
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn is_connected(&self) -> bool {
        self.0.is_finite() && self.0 > -900.0
    }
}

impl From<Temperature> for f32 {
    fn from(value: Temperature) -> f32 {
        value.0
    }
}

// One immutable reading set per control cycle
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Telemetry {
    pub ambient: Temperature,
    pub tank_inlet: Temperature,
    pub tank_outlet: Temperature,
    pub dhw_tank: Temperature,
    pub solar_collector: Temperature,
    pub humidity_pct: f32,
    pub dew_point: Temperature,
    pub sensor_fault: bool,
    pub heat_pump_fault: bool,
    pub defrost_signal: bool,
}

impl Telemetry {
    // Ambient, tank inlet and tank outlet must all be readable for any
    // space-conditioning decision to be trustworthy.
    pub fn critical_sensors_ok(&self) -> bool {
        self.ambient.is_connected()
            && self.tank_inlet.is_connected()
            && self.tank_outlet.is_connected()
    }

    pub fn has_fault(&self) -> bool {
        self.sensor_fault || self.heat_pump_fault || !self.critical_sensors_ok()
    }
}
