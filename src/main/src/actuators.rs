use anyhow::Result;
use log::*;

use control::{ActuatorState, HeatPumpCall};

// Output seam. `apply` receives the complete desired state every cycle and
// must be idempotent; re-applying an unchanged state is a no-op.
pub trait ActuatorBank {
    fn apply(&mut self, desired: &ActuatorState) -> Result<()>;
}

const ZONE_COUNT: usize = 8;

#[derive(Debug)]
struct Relay {
    label: &'static str,
    on: bool,
}

impl Relay {
    fn new(label: &'static str) -> Self {
        Self { label, on: false }
    }

    fn set(&mut self, desired: bool) {
        match (desired, self.on) {
            (true, false) => {
                info!("Turning on {}", self.label);
                self.on = true;
            }
            (false, true) => {
                info!("Turning off {}", self.label);
                self.on = false;
            }
            _ => {}
        }
    }
}

// Relay outputs for the whole installation. The heat pump call is wired as
// two relays, one per call direction, matching the terminal strip.
pub struct RelayBank {
    heat_call: Relay,
    cool_call: Relay,
    boiler: Relay,
    zones: [Relay; ZONE_COUNT],
    solar_pump: Relay,
    overheat_valve: Relay,
}

impl RelayBank {
    pub fn new() -> Self {
        const ZONE_LABELS: [&str; ZONE_COUNT] = [
            "zone 0 circulator",
            "zone 1 circulator",
            "zone 2 circulator",
            "zone 3 circulator",
            "zone 4 circulator",
            "zone 5 circulator",
            "zone 6 circulator",
            "zone 7 circulator",
        ];
        Self {
            heat_call: Relay::new("heat pump heat call"),
            cool_call: Relay::new("heat pump cool call"),
            boiler: Relay::new("boiler enable"),
            zones: ZONE_LABELS.map(Relay::new),
            solar_pump: Relay::new("solar pump"),
            overheat_valve: Relay::new("overheat relief valve"),
        }
    }

    pub fn is_boiler_on(&self) -> bool {
        self.boiler.on
    }

    pub fn heat_pump_call(&self) -> HeatPumpCall {
        match (self.heat_call.on, self.cool_call.on) {
            (true, _) => HeatPumpCall::Heat,
            (_, true) => HeatPumpCall::Cool,
            _ => HeatPumpCall::None,
        }
    }

    pub fn zone_on(&self, zone: u8) -> bool {
        self.zones
            .get(usize::from(zone))
            .map(|relay| relay.on)
            .unwrap_or(false)
    }

    pub fn is_solar_pump_on(&self) -> bool {
        self.solar_pump.on
    }

    pub fn is_overheat_valve_open(&self) -> bool {
        self.overheat_valve.on
    }
}

impl Default for RelayBank {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorBank for RelayBank {
    fn apply(&mut self, desired: &ActuatorState) -> Result<()> {
        self.heat_call.set(desired.heat_pump_call == HeatPumpCall::Heat);
        self.cool_call.set(desired.heat_pump_call == HeatPumpCall::Cool);
        self.boiler.set(desired.boiler_on);
        for (zone, relay) in self.zones.iter_mut().enumerate() {
            relay.set(desired.circulators.contains(zone as u8));
        }
        self.solar_pump.set(desired.solar_pump_on);
        self.overheat_valve.set(desired.overheat_valve_open);
        Ok(())
    }
}
