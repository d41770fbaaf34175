//! 3D-printer telemetry tree and its live-update reducer.
//!
//! Live updates arrive on the event stream as
//! `{"type":"state_changed","entity_id":..,"state":..,"attributes":{..}}`.
//! Each entity is routed to a branch of the tree by its domain
//! (`sensor`, `light`, `fan`, `button`, `number`) and the suffix of its
//! object id. Applying the same event twice leaves the tree unchanged.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback poll while the event stream is quiet.
pub const PRINTER_POLL_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub name: String,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub firmware: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: Option<f64>,
    pub target: Option<f64>,
    pub max: Option<f64>,
}

impl Temperature {
    /// Heating progress toward target in `0.0..=100.0`.
    pub fn percent_of_target(&self) -> Option<f64> {
        match (self.current, self.target) {
            (Some(c), Some(t)) if t > 0.0 => Some((c / t * 100.0).clamp(0.0, 100.0)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub nozzle: Temperature,
    pub bed: Temperature,
    pub chamber: Temperature,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintStatus {
    pub state: Option<String>,
    pub stage: Option<String>,
    pub progress: Option<f64>,
    pub remaining_minutes: Option<u32>,
    pub file_name: Option<String>,
}

impl PrintStatus {
    pub fn is_printing(&self) -> bool {
        matches!(self.state.as_deref(), Some("running" | "printing"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilamentSlot {
    pub index: u8,
    pub material: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub remaining_percent: Option<f64>,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layers {
    pub working: Option<u32>,
    pub total: Option<u32>,
    pub material_used: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub entity_id: String,
    pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub light: Option<Control>,
    pub fans: BTreeMap<String, Control>,
    pub buttons: BTreeMap<String, Control>,
    pub numbers: BTreeMap<String, Control>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterTelemetry {
    pub device: DeviceIdentity,
    pub temperatures: Temperatures,
    pub status: PrintStatus,
    pub filament: Vec<FilamentSlot>,
    pub position: Position,
    pub layers: Layers,
    pub controls: Controls,
}

/// Event-stream message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    StateChanged {
        entity_id: String,
        state: String,
        #[serde(default)]
        attributes: Value,
    },
    #[serde(other)]
    Unknown,
}

fn number(state: &str) -> Option<f64> {
    state.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn text(state: &str) -> Option<String> {
    match state {
        "" | "unknown" | "unavailable" => None,
        s => Some(s.to_string()),
    }
}

fn attr_str(attributes: &Value, key: &str) -> Option<String> {
    attributes.get(key).and_then(Value::as_str).map(str::to_string)
}

fn attr_f64(attributes: &Value, key: &str) -> Option<f64> {
    attributes.get(key).and_then(Value::as_f64)
}

/// `3` from `..._tray_3`.
fn tray_index(object_id: &str) -> Option<u8> {
    let (_, n) = object_id.rsplit_once("_tray_")?;
    n.parse().ok()
}

impl PrinterTelemetry {
    pub fn new(device: DeviceIdentity) -> Self {
        Self {
            device,
            ..Self::default()
        }
    }

    /// Build a tree from a full snapshot of entity states.
    pub fn from_snapshot<'a>(
        device: DeviceIdentity,
        events: impl IntoIterator<Item = &'a StreamEvent>,
    ) -> Self {
        let mut telemetry = Self::new(device);
        for event in events {
            telemetry.apply(event);
        }
        telemetry
    }

    /// Patch the tree. Returns whether anything changed.
    pub fn apply(&mut self, event: &StreamEvent) -> bool {
        let StreamEvent::StateChanged {
            entity_id,
            state,
            attributes,
        } = event
        else {
            return false;
        };
        let Some((domain, object_id)) = entity_id.split_once('.') else {
            return false;
        };

        let before = self.clone();
        match domain {
            "light" => {
                self.controls.light = Some(Control {
                    entity_id: entity_id.clone(),
                    state: state.clone(),
                })
            }
            "fan" => {
                self.controls.fans.insert(
                    object_id.to_string(),
                    Control {
                        entity_id: entity_id.clone(),
                        state: state.clone(),
                    },
                );
            }
            "button" => {
                self.controls.buttons.insert(
                    object_id.to_string(),
                    Control {
                        entity_id: entity_id.clone(),
                        state: state.clone(),
                    },
                );
            }
            "number" => {
                self.controls.numbers.insert(
                    object_id.to_string(),
                    Control {
                        entity_id: entity_id.clone(),
                        state: state.clone(),
                    },
                );
            }
            "sensor" | "binary_sensor" => self.apply_sensor(object_id, state, attributes),
            _ => {}
        }
        *self != before
    }

    fn apply_sensor(&mut self, object_id: &str, state: &str, attributes: &Value) {
        if let Some(index) = tray_index(object_id) {
            self.apply_tray(index, state, attributes);
            return;
        }

        let temps = &mut self.temperatures;
        let value = number(state);
        match object_id {
            id if id.ends_with("_nozzle_target_temperature") => temps.nozzle.target = value,
            id if id.ends_with("_nozzle_temperature") => {
                temps.nozzle.current = value;
                if let Some(max) = attr_f64(attributes, "max") {
                    temps.nozzle.max = Some(max);
                }
            }
            id if id.ends_with("_bed_target_temperature")
                || id.ends_with("_target_bed_temperature") =>
            {
                temps.bed.target = value
            }
            id if id.ends_with("_bed_temperature") => {
                temps.bed.current = value;
                if let Some(max) = attr_f64(attributes, "max") {
                    temps.bed.max = Some(max);
                }
            }
            id if id.ends_with("_chamber_target_temperature") => temps.chamber.target = value,
            id if id.ends_with("_chamber_temperature") => temps.chamber.current = value,
            id if id.ends_with("_print_status") => self.status.state = text(state),
            id if id.ends_with("_current_stage") => self.status.stage = text(state),
            id if id.ends_with("_print_progress") => self.status.progress = value,
            id if id.ends_with("_remaining_time") => {
                self.status.remaining_minutes = value.map(|v| v.max(0.0).round() as u32)
            }
            id if id.ends_with("_task_name") || id.ends_with("_gcode_filename") => {
                self.status.file_name = text(state)
            }
            id if id.ends_with("_current_layer") => {
                self.layers.working = value.map(|v| v.max(0.0) as u32)
            }
            id if id.ends_with("_total_layer_count") => {
                self.layers.total = value.map(|v| v.max(0.0) as u32)
            }
            id if id.ends_with("_print_weight") || id.ends_with("_material_used") => {
                self.layers.material_used = value
            }
            id if id.ends_with("_position_x") => self.position.x = value,
            id if id.ends_with("_position_y") => self.position.y = value,
            id if id.ends_with("_position_z") => self.position.z = value,
            id if id.ends_with("_firmware_version") => self.device.firmware = text(state),
            _ => tracing::trace!("Unrouted printer entity {}", object_id),
        }
    }

    fn apply_tray(&mut self, index: u8, state: &str, attributes: &Value) {
        let slot = match self.filament.iter().position(|s| s.index == index) {
            Some(pos) => &mut self.filament[pos],
            None => {
                self.filament.push(FilamentSlot {
                    index,
                    ..FilamentSlot::default()
                });
                self.filament.sort_by_key(|s| s.index);
                let pos = self
                    .filament
                    .iter()
                    .position(|s| s.index == index)
                    .unwrap_or_default();
                &mut self.filament[pos]
            }
        };
        slot.material = text(state);
        slot.name = attr_str(attributes, "name");
        slot.color = attr_str(attributes, "color");
        slot.remaining_percent = attr_f64(attributes, "remain");
        slot.active = attributes
            .get("active")
            .and_then(Value::as_bool)
            .unwrap_or(false);
    }

    /// Layer progress as `working / total`, when both are known.
    pub fn layer_label(&self) -> Option<String> {
        match (self.layers.working, self.layers.total) {
            (Some(w), Some(t)) => Some(format!("{} / {}", w, t)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn changed(entity_id: &str, state: &str, attributes: Value) -> StreamEvent {
        StreamEvent::StateChanged {
            entity_id: entity_id.to_string(),
            state: state.to_string(),
            attributes,
        }
    }

    fn seeded() -> PrinterTelemetry {
        PrinterTelemetry::new(DeviceIdentity {
            name: "X1C".into(),
            ..DeviceIdentity::default()
        })
    }

    #[test]
    fn test_parse_stream_message() {
        let msg = r#"{"type":"state_changed","entity_id":"sensor.x1c_bed_temperature","state":"55.2","attributes":{"unit_of_measurement":"°C"}}"#;
        let event: StreamEvent = serde_json::from_str(msg).unwrap();
        assert!(matches!(event, StreamEvent::StateChanged { .. }));

        let other: StreamEvent = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(other, StreamEvent::Unknown);
    }

    #[test]
    fn test_temperatures_route_by_suffix() {
        let mut t = seeded();
        t.apply(&changed("sensor.x1c_nozzle_temperature", "219.5", json!({"max": 300})));
        t.apply(&changed("sensor.x1c_nozzle_target_temperature", "220", json!({})));
        t.apply(&changed("sensor.x1c_bed_temperature", "54", json!({})));
        t.apply(&changed("sensor.x1c_target_bed_temperature", "55", json!({})));

        assert_eq!(t.temperatures.nozzle.current, Some(219.5));
        assert_eq!(t.temperatures.nozzle.target, Some(220.0));
        assert_eq!(t.temperatures.nozzle.max, Some(300.0));
        assert_eq!(t.temperatures.bed.target, Some(55.0));
        assert_eq!(t.temperatures.chamber, Temperature::default());
    }

    #[test]
    fn test_patch_is_idempotent() {
        let mut t = seeded();
        let event = changed("sensor.x1c_current_layer", "42", json!({}));
        assert!(t.apply(&event));
        let snapshot = t.clone();
        assert!(!t.apply(&event));
        assert_eq!(t, snapshot);
    }

    #[test]
    fn test_filament_slots() {
        let mut t = seeded();
        t.apply(&changed(
            "sensor.x1c_ams_1_tray_2",
            "PLA",
            json!({"name": "Bambu PLA Basic", "color": "#FF6A13", "remain": 80, "active": true}),
        ));
        t.apply(&changed("sensor.x1c_ams_1_tray_1", "PETG", json!({})));

        let indices: Vec<_> = t.filament.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(t.filament[1].color.as_deref(), Some("#FF6A13"));
        assert!(t.filament[1].active);
        assert_eq!(t.filament[1].remaining_percent, Some(80.0));
    }

    #[test]
    fn test_controls_by_domain() {
        let mut t = seeded();
        t.apply(&changed("light.x1c_chamber_light", "on", json!({})));
        t.apply(&changed("fan.x1c_aux_fan", "off", json!({})));
        t.apply(&changed("button.x1c_pause", "unknown", json!({})));

        assert_eq!(t.controls.light.as_ref().map(|c| c.state.as_str()), Some("on"));
        assert!(t.controls.fans.contains_key("x1c_aux_fan"));
        assert!(t.controls.buttons.contains_key("x1c_pause"));
    }

    #[test]
    fn test_unavailable_clears_value() {
        let mut t = seeded();
        t.apply(&changed("sensor.x1c_print_status", "running", json!({})));
        assert!(t.status.is_printing());
        t.apply(&changed("sensor.x1c_print_status", "unavailable", json!({})));
        assert_eq!(t.status.state, None);
    }

    #[test]
    fn test_unrelated_events_change_nothing() {
        let mut t = seeded();
        assert!(!t.apply(&StreamEvent::Unknown));
        assert!(!t.apply(&changed("sensor.kitchen_humidity", "40", json!({}))));
        assert!(!t.apply(&changed("malformed", "1", json!({}))));
    }

    #[test]
    fn test_snapshot_and_layer_label() {
        let events = vec![
            changed("sensor.x1c_current_layer", "12", json!({})),
            changed("sensor.x1c_total_layer_count", "300", json!({})),
        ];
        let t = PrinterTelemetry::from_snapshot(DeviceIdentity::default(), &events);
        assert_eq!(t.layer_label().as_deref(), Some("12 / 300"));
    }
}
