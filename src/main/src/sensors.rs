use anyhow::Result;
use log::*;
use rand::rngs::ThreadRng;
use rand::Rng;

use control::{dew_point_f, Telemetry, Temperature};

// Acquisition seam. A real implementation reports a probe it cannot read
// as `control::DISCONNECTED` and raises `sensor_fault` for anything the
// board flags itself.
pub trait TelemetrySource {
    fn read(&mut self) -> Result<Telemetry>;
}

// Software-in-the-loop stand-in for the acquisition board: a slowly
// wandering plant with measurement noise on every probe.
pub struct SimulatedPlant {
    rng: ThreadRng,
    ambient_f: f32,
    tank_inlet_f: f32,
    tank_outlet_f: f32,
    dhw_tank_f: f32,
    solar_collector_f: f32,
    humidity_pct: f32,
}

impl SimulatedPlant {
    pub fn new(ambient_f: f32, humidity_pct: f32) -> Self {
        Self {
            rng: rand::thread_rng(),
            ambient_f,
            tank_inlet_f: 90.0,
            tank_outlet_f: 95.0,
            dhw_tank_f: 120.0,
            solar_collector_f: 130.0,
            humidity_pct,
        }
    }

    fn wander(&mut self, value: f32, step: f32, min: f32, max: f32) -> f32 {
        (value + self.rng.gen_range(-step..=step)).clamp(min, max)
    }
}

impl TelemetrySource for SimulatedPlant {
    fn read(&mut self) -> Result<Telemetry> {
        let ambient = self.wander(self.ambient_f, 0.2, -30.0, 110.0);
        self.ambient_f = ambient;
        let inlet = self.wander(self.tank_inlet_f, 0.5, 40.0, 140.0);
        self.tank_inlet_f = inlet;
        let outlet = self.wander(self.tank_outlet_f, 0.5, 40.0, 150.0);
        self.tank_outlet_f = outlet;
        let dhw = self.wander(self.dhw_tank_f, 0.4, 50.0, 200.0);
        self.dhw_tank_f = dhw;
        let collector = self.wander(self.solar_collector_f, 1.5, 20.0, 250.0);
        self.solar_collector_f = collector;
        let humidity = self.wander(self.humidity_pct, 0.5, 5.0, 100.0);
        self.humidity_pct = humidity;

        let telemetry = Telemetry {
            ambient: Temperature::new(ambient),
            tank_inlet: Temperature::new(inlet),
            tank_outlet: Temperature::new(outlet),
            dhw_tank: Temperature::new(dhw),
            solar_collector: Temperature::new(collector),
            humidity_pct: humidity,
            dew_point: Temperature::new(dew_point_f(ambient, humidity)),
            sensor_fault: false,
            heat_pump_fault: false,
            defrost_signal: false,
        };
        debug!("Simulated readings {:?}", telemetry);

        Ok(telemetry)
    }
}
