use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::Result;
use log::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use control::{Decision, HeatPumpCall, Mode, Telemetry};

// Flat per-cycle status for the touchscreen, framed as one JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub mode: Mode,
    pub ambient_f: f32,
    pub tank_inlet_f: f32,
    pub tank_outlet_f: f32,
    pub dhw_tank_f: f32,
    pub solar_collector_f: f32,
    pub humidity_pct: f32,
    pub dew_point_f: f32,
    pub heat_pump_call: HeatPumpCall,
    pub boiler_on: bool,
    pub solar_pump_on: bool,
    pub dhw_overheat: bool,
    pub manual_override: bool,
}

impl Snapshot {
    pub fn new(telemetry: &Telemetry, decision: &Decision, manual_override: bool) -> Self {
        Snapshot {
            at: OffsetDateTime::now_utc(),
            mode: decision.state.mode,
            ambient_f: telemetry.ambient.into(),
            tank_inlet_f: telemetry.tank_inlet.into(),
            tank_outlet_f: telemetry.tank_outlet.into(),
            dhw_tank_f: telemetry.dhw_tank.into(),
            solar_collector_f: telemetry.solar_collector.into(),
            humidity_pct: telemetry.humidity_pct,
            dew_point_f: telemetry.dew_point.into(),
            heat_pump_call: decision.outputs.heat_pump_call,
            boiler_on: decision.outputs.boiler_on,
            solar_pump_on: decision.outputs.solar_pump_on,
            dhw_overheat: decision.outputs.overheat_valve_open,
            manual_override,
        }
    }
}

pub fn write_snapshot(writer: &mut impl Write, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}

// Manual-override and configuration commands from the touchscreen, one
// JSON object per line, e.g. {"command":"force_heating"} or
// {"command":"set_threshold","name":"dhw_overheat_f","value":175.0}
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    ForceHeating,
    ForceCooling,
    ForceOff,
    Release,
    ClearError,
    SetThreshold { name: String, value: f32 },
}

// Reads commands off the HMI channel on its own thread; the control loop
// polls the receiver between cycles and never blocks on input.
pub fn spawn_command_reader<R>(reader: R) -> Receiver<Command>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Command>(line) {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(err) => warn!("Ignoring malformed command {:?}: {}", line, err),
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    use control::{ActuatorState, ControlState, Temperature, ZoneSet};

    #[test]
    fn test_command_vocabulary_parses() {
        let cases = [
            (r#"{"command":"force_heating"}"#, Command::ForceHeating),
            (r#"{"command":"force_cooling"}"#, Command::ForceCooling),
            (r#"{"command":"force_off"}"#, Command::ForceOff),
            (r#"{"command":"release"}"#, Command::Release),
            (r#"{"command":"clear_error"}"#, Command::ClearError),
            (
                r#"{"command":"set_threshold","name":"dhw_overheat_f","value":175.0}"#,
                Command::SetThreshold {
                    name: "dhw_overheat_f".into(),
                    value: 175.0,
                },
            ),
        ];
        for (line, expected) in cases {
            let parsed: Command = serde_json::from_str(line).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_malformed_command_is_an_error() {
        assert!(serde_json::from_str::<Command>(r#"{"command":"explode"}"#).is_err());
        assert!(serde_json::from_str::<Command>("not json").is_err());
    }

    #[test]
    fn test_reader_skips_garbage_and_delivers_commands() {
        let input = Cursor::new(
            "\n{\"command\":\"force_cooling\"}\ngarbage\n{\"command\":\"release\"}\n",
        );
        let rx = spawn_command_reader(input);
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first, Command::ForceCooling);
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second, Command::Release);
        // Channel closes once the input is exhausted
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_snapshot_frames_as_a_json_line() {
        let telemetry = Telemetry {
            ambient: Temperature::new(30.0),
            tank_inlet: Temperature::new(90.0),
            tank_outlet: Temperature::new(95.0),
            dhw_tank: Temperature::new(120.0),
            solar_collector: Temperature::new(125.0),
            humidity_pct: 50.0,
            dew_point: Temperature::new(12.0),
            sensor_fault: false,
            heat_pump_fault: false,
            defrost_signal: false,
        };
        let decision = Decision {
            state: ControlState {
                mode: Mode::HeatPumpHeating,
                boiler_takeover_since_ms: None,
                solar_pump_on: false,
            },
            outputs: ActuatorState {
                heat_pump_call: HeatPumpCall::Heat,
                boiler_on: false,
                circulators: ZoneSet::new(0b11),
                solar_pump_on: false,
                overheat_valve_open: false,
            },
        };
        let snapshot = Snapshot::new(&telemetry, &decision, false);

        let mut framed = Vec::new();
        write_snapshot(&mut framed, &snapshot).unwrap();
        let line = String::from_utf8(framed).unwrap();
        assert!(line.ends_with('\n'));
        assert!(line.contains("\"mode\":\"HeatPumpHeating\""));
        assert!(line.contains("\"heat_pump_call\":\"Heat\""));
        assert!(line.contains("\"ambient_f\":30.0"));
        assert!(line.contains("\"manual_override\":false"));
    }
}
