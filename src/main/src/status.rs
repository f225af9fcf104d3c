use log::*;
use rgb::RGB8;

use control::Mode;

// Front-panel status light. Overheat outranks everything except a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLight {
    Idle,
    Heating,
    Cooling,
    BoilerRunning,
    Defrosting,
    Overheat,
    Fault,
}

impl StatusLight {
    pub fn for_cycle(mode: Mode, dhw_overheat: bool) -> StatusLight {
        match (mode, dhw_overheat) {
            (Mode::Error, _) => StatusLight::Fault,
            (_, true) => StatusLight::Overheat,
            (Mode::Off, false) => StatusLight::Idle,
            (Mode::HeatPumpHeating, false) => StatusLight::Heating,
            (Mode::HeatPumpCooling, false) => StatusLight::Cooling,
            (Mode::BoilerHeating, false) => StatusLight::BoilerRunning,
            (Mode::Defrost, false) => StatusLight::Defrosting,
        }
    }
}

impl From<StatusLight> for RGB8 {
    fn from(status: StatusLight) -> RGB8 {
        match status {
            StatusLight::Idle => RGB8::new(0, 10, 0),
            StatusLight::Heating => RGB8::new(10, 3, 0),
            StatusLight::Cooling => RGB8::new(0, 3, 10),
            StatusLight::BoilerRunning => RGB8::new(10, 0, 0),
            StatusLight::Defrosting => RGB8::new(0, 10, 10),
            StatusLight::Overheat => RGB8::new(10, 0, 10),
            StatusLight::Fault => RGB8::new(10, 10, 0),
        }
    }
}

pub trait StatusIndicator {
    fn show(&mut self, colour: RGB8);
}

// Stands in for the front-panel LED when running without hardware.
pub struct LogIndicator {
    last: Option<RGB8>,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for LogIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusIndicator for LogIndicator {
    fn show(&mut self, colour: RGB8) {
        if self.last != Some(colour) {
            debug!("Status LED #{:02x}{:02x}{:02x}", colour.r, colour.g, colour.b);
            self.last = Some(colour);
        }
    }
}
