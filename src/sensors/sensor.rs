use serde_json::{Map, Number, Value};

pub trait Sensor {
    /// Route of the JSON polling endpoint, `None` when the page is rendered server side.
    fn json_route(&self) -> Option<&'static str>;

    /// Period of the main loop driven sampling. `None` samples once per page request.
    fn sample_period_ms(&self) -> Option<u64>;

    /// Folds one raw ADC code into the sensor and returns the updated physical value.
    fn ingest(&mut self, raw: u16) -> f32;

    /// Fields of the JSON endpoint. Sensors without one add nothing.
    fn add_json_value(&self, _map: &mut Map<String, Value>, _now_ms: u64) {}

    fn render_page(&self) -> String;
    fn pretty_print(&self) -> String;
}

/// JSON number written with exactly `decimals` digits after the point, `7.000` stays `7.000`.
///
/// Non finite values become `null`.
pub fn fixed_decimals(value: f32, decimals: usize) -> Value {
    // Adding +0 turns a -0 into +0 so it is not printed as "-0.000".
    format!("{:.*}", decimals, value + 0.0)
        .parse::<Number>()
        .map_or(Value::Null, Value::Number)
}
