use serde_json::{Map, Value};

use crate::{adc_helper::AnalogSource, sensor_state::SensorState, sensors::Sensor};

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const INDEX_ROUTE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn html(body: String) -> Self {
        Self {
            content_type: CONTENT_TYPE_HTML,
            body,
        }
    }

    pub fn json(body: String) -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }
}

/// Routes the server has to register for this sensor.
pub fn routes<S: Sensor>(sensor: &S) -> Vec<&'static str> {
    let mut routes = vec![INDEX_ROUTE];
    routes.extend(sensor.json_route());
    routes
}

pub fn json_body<S: Sensor>(sensor: &S, now_ms: u64) -> String {
    let mut map = Map::new();
    sensor.add_json_value(&mut map, now_ms);
    Value::Object(map).to_string()
}

/// Answers a GET request, `None` when the path is not served by this sensor.
pub fn respond<S: Sensor, A: AnalogSource>(
    state: &mut SensorState<S, A>,
    uri: &str,
    now_ms: u64,
) -> Option<HttpResponse> {
    let path = uri.split('?').next().unwrap_or(uri);

    if path == INDEX_ROUTE {
        if state.samples_on_request() {
            state.sample();
        }
        return Some(HttpResponse::html(state.sensor().render_page()));
    }

    if state.sensor().json_route() == Some(path) {
        return Some(HttpResponse::json(json_body(state.sensor(), now_ms)));
    }

    None
}
