use serde::{Deserialize, Serialize};

// Circulator zones as a bitmask; bit n is zone n.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneSet(pub u8);

impl ZoneSet {
    pub const EMPTY: ZoneSet = ZoneSet(0);

    pub fn new(mask: u8) -> Self {
        Self(mask)
    }

    pub fn contains(&self, zone: u8) -> bool {
        zone < 8 && self.0 & (1 << zone) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Mode {
    Off,
    HeatPumpHeating,
    HeatPumpCooling,
    BoilerHeating,
    Defrost,
    Error,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum HeatPumpCall {
    None,
    Heat,
    Cool,
}

// HMI-commanded override; replaces automatic season selection while held.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ManualMode {
    Heating,
    Cooling,
    Off,
}

// Cross-cycle memory, owned exclusively by the engine.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ControlState {
    pub mode: Mode,
    pub boiler_takeover_since_ms: Option<u64>,
    pub solar_pump_on: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Off,
            boiler_takeover_since_ms: None,
            solar_pump_on: false,
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

// Complete desired output state, recomputed from scratch every cycle.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct ActuatorState {
    pub heat_pump_call: HeatPumpCall,
    pub boiler_on: bool,
    pub circulators: ZoneSet,
    pub solar_pump_on: bool,
    pub overheat_valve_open: bool,
}

impl ActuatorState {
    pub fn all_off() -> Self {
        Self {
            heat_pump_call: HeatPumpCall::None,
            boiler_on: false,
            circulators: ZoneSet::EMPTY,
            solar_pump_on: false,
            overheat_valve_open: false,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Decision {
    pub state: ControlState,
    pub outputs: ActuatorState,
}
