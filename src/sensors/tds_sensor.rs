use serde_json::{json, Map, Value};

use super::sensor::{fixed_decimals, Sensor};
use crate::{adc_helper::raw_to_voltage, smoothing::SmoothingWindow, template};

pub const SMOOTHING_SAMPLES: usize = 8;
pub const SAMPLE_PERIOD_MS: u64 = 400;

const REFERENCE_TEMPERATURE_C: f32 = 25.0;
const TEMPERATURE_COEFFICIENT: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdsCalibration {
    pub vref: f32,
    /// `[a3, a2, a1]` of `a3*v^3 + a2*v^2 + a1*v`.
    pub coefficients: [f32; 3],
    pub calibration_factor: f32,
    /// Water temperature used to compensate the conductivity reading.
    pub temperature_c: f32,
}

impl Default for TdsCalibration {
    fn default() -> Self {
        Self {
            vref: 3.3,
            coefficients: [133.42, -255.86, 857.39],
            calibration_factor: 0.5,
            temperature_c: REFERENCE_TEMPERATURE_C,
        }
    }
}

impl TdsCalibration {
    /// Dissolved solids in ppm for a probe voltage, never negative.
    pub fn tds(&self, voltage: f32) -> f32 {
        let compensation =
            1.0 + TEMPERATURE_COEFFICIENT * (self.temperature_c - REFERENCE_TEMPERATURE_C);
        let v = voltage / compensation;
        let [a3, a2, a1] = self.coefficients;

        ((a3 * v * v * v + a2 * v * v + a1 * v) * self.calibration_factor).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TdsReading {
    pub tds: f32,
    pub voltage: f32,
    /// Last code returned by the ADC, before smoothing.
    pub raw: u16,
}

pub struct TdsSensor {
    calibration: TdsCalibration,
    window: SmoothingWindow<SMOOTHING_SAMPLES>,
    reading: TdsReading,
}

impl TdsSensor {
    pub fn new(calibration: TdsCalibration) -> Self {
        Self {
            calibration,
            window: SmoothingWindow::new(),
            reading: TdsReading::default(),
        }
    }

}

impl Default for TdsSensor {
    fn default() -> Self {
        Self::new(TdsCalibration::default())
    }
}

impl Sensor for TdsSensor {
    fn json_route(&self) -> Option<&'static str> {
        Some("/tds")
    }

    fn sample_period_ms(&self) -> Option<u64> {
        Some(SAMPLE_PERIOD_MS)
    }

    fn ingest(&mut self, raw: u16) -> f32 {
        self.window.push(raw);

        let voltage = raw_to_voltage(self.window.average(), self.calibration.vref);
        self.reading = TdsReading {
            tds: self.calibration.tds(voltage),
            voltage,
            raw,
        };
        self.reading.tds
    }

    fn add_json_value(&self, map: &mut Map<String, Value>, now_ms: u64) {
        map.insert("tds".to_string(), fixed_decimals(self.reading.tds, 2));
        map.insert("voltage".to_string(), fixed_decimals(self.reading.voltage, 3));
        map.insert("raw".to_string(), json!(self.reading.raw));
        map.insert("time".to_string(), json!(now_ms));
    }

    fn render_page(&self) -> String {
        template::tds_page()
    }

    fn pretty_print(&self) -> String {
        format!(
            "TDS: {:.2} ppm ({:.3} V, raw value: {})",
            self.reading.tds, self.reading.voltage, self.reading.raw
        )
    }
}
