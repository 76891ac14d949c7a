use serde_json::{Map, Value};

use super::sensor::{fixed_decimals, Sensor};
use crate::{adc_helper::raw_to_voltage, smoothing::SmoothingWindow, template};

pub const SMOOTHING_SAMPLES: usize = 8;
pub const SAMPLE_PERIOD_MS: u64 = 5;

pub const PH_MIN: f32 = 0.0;
pub const PH_MAX: f32 = 14.0;
pub const PH_NEUTRAL: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhCalibration {
    pub vref: f32,
    /// Probe output at pH 7.
    pub neutral_voltage: f32,
    /// Volts per pH unit, positive when the output drops as pH rises.
    pub slope_voltage_per_ph: f32,
}

impl Default for PhCalibration {
    fn default() -> Self {
        Self {
            vref: 3.3,
            neutral_voltage: 2.5,
            slope_voltage_per_ph: 0.18,
        }
    }
}

impl PhCalibration {
    pub fn ph(&self, voltage: f32) -> f32 {
        (PH_NEUTRAL + (self.neutral_voltage - voltage) / self.slope_voltage_per_ph)
            .clamp(PH_MIN, PH_MAX)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhReading {
    pub ph: f32,
    pub voltage: f32,
}

/// pH probe fed one code at a time from the main loop.
///
/// Each code lands in the smoothing window and the reading is recomputed
/// from the window average, so a request only ever reads the cached value.
pub struct PhSensor {
    calibration: PhCalibration,
    window: SmoothingWindow<SMOOTHING_SAMPLES>,
    reading: PhReading,
}

impl PhSensor {
    pub fn new(calibration: PhCalibration) -> Self {
        Self {
            calibration,
            window: SmoothingWindow::new(),
            reading: PhReading::default(),
        }
    }

}

impl Default for PhSensor {
    fn default() -> Self {
        Self::new(PhCalibration::default())
    }
}

impl Sensor for PhSensor {
    fn json_route(&self) -> Option<&'static str> {
        Some("/ph")
    }

    fn sample_period_ms(&self) -> Option<u64> {
        Some(SAMPLE_PERIOD_MS)
    }

    fn ingest(&mut self, raw: u16) -> f32 {
        self.window.push(raw);

        let voltage = raw_to_voltage(self.window.average(), self.calibration.vref);
        self.reading = PhReading {
            ph: self.calibration.ph(voltage),
            voltage,
        };
        self.reading.ph
    }

    fn add_json_value(&self, map: &mut Map<String, Value>, _now_ms: u64) {
        map.insert("pH".to_string(), fixed_decimals(self.reading.ph, 3));
        map.insert("voltage".to_string(), fixed_decimals(self.reading.voltage, 4));
    }

    fn render_page(&self) -> String {
        template::ph_page()
    }

    fn pretty_print(&self) -> String {
        format!(
            "pH: {:.3} ({:.4} V, {} samples)",
            self.reading.ph,
            self.reading.voltage,
            self.window.len()
        )
    }
}
