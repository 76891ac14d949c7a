use super::sensor::Sensor;
use crate::template;

pub const DRY_VALUE: u16 = 3900;
pub const WET_VALUE: u16 = 1600;
pub const ALERT_THRESHOLD_PERCENT: f32 = 30.0;

/// Raw endpoints of a capacitive probe. Higher codes mean drier soil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistureCalibration {
    pub dry_value: u16,
    pub wet_value: u16,
}

impl Default for MoistureCalibration {
    fn default() -> Self {
        Self {
            dry_value: DRY_VALUE,
            wet_value: WET_VALUE,
        }
    }
}

impl MoistureCalibration {
    /// Linear remap of `[dry, wet]` onto `[0, 100]`, clamped.
    pub fn percent(&self, raw: u16) -> f32 {
        let span = self.dry_value as f32 - self.wet_value as f32;
        if span == 0.0 {
            return 0.0;
        }

        // Measured from the dry end so a dry reading is +0, never -0.
        ((self.dry_value as f32 - raw as f32) * 100.0 / span).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoistureStatus {
    Optimal,
    TooDry,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoistureReading {
    pub raw: u16,
    pub percent: f32,
}

impl MoistureReading {
    /// The percentage as shown to the user. The alert is decided on this value too.
    pub fn whole_percent(&self) -> u32 {
        self.percent.round() as u32
    }
}

pub struct MoistureSensor {
    calibration: MoistureCalibration,
    alert_threshold: f32,
    reading: MoistureReading,
}

impl MoistureSensor {
    pub fn new(calibration: MoistureCalibration, alert_threshold: f32) -> Self {
        Self {
            calibration,
            alert_threshold,
            reading: MoistureReading::default(),
        }
    }

    pub fn status(&self) -> MoistureStatus {
        if (self.reading.whole_percent() as f32) < self.alert_threshold {
            MoistureStatus::TooDry
        } else {
            MoistureStatus::Optimal
        }
    }
}

impl Default for MoistureSensor {
    fn default() -> Self {
        Self::new(MoistureCalibration::default(), ALERT_THRESHOLD_PERCENT)
    }
}

impl Sensor for MoistureSensor {
    fn json_route(&self) -> Option<&'static str> {
        None
    }

    fn sample_period_ms(&self) -> Option<u64> {
        None
    }

    fn ingest(&mut self, raw: u16) -> f32 {
        self.reading = MoistureReading {
            raw,
            percent: self.calibration.percent(raw),
        };
        self.reading.percent
    }

    fn render_page(&self) -> String {
        template::moisture_page(&self.reading, self.status(), self.alert_threshold)
    }

    fn pretty_print(&self) -> String {
        format!(
            "Moisture level: {}% (raw value: {})",
            self.reading.whole_percent(),
            self.reading.raw
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn calibration_endpoints() {
        let cal = MoistureCalibration::default();

        assert_relative_eq!(cal.percent(DRY_VALUE), 0.0);
        assert_relative_eq!(cal.percent(WET_VALUE), 100.0);
        assert_relative_eq!(cal.percent(2750), 50.0);
    }

    #[test]
    fn dry_end_is_positive_zero() {
        let cal = MoistureCalibration::default();

        assert!(!cal.percent(DRY_VALUE).is_sign_negative());
        assert!(!cal.percent(4095).is_sign_negative());
        assert_eq!(format!("{:.0}", cal.percent(DRY_VALUE)), "0");
    }

    #[test]
    fn clamps_outside_calibration() {
        let cal = MoistureCalibration::default();

        assert_relative_eq!(cal.percent(4095), 0.0);
        assert_relative_eq!(cal.percent(0), 100.0);
        assert_relative_eq!(cal.percent(1000), 100.0);
    }

    #[test]
    fn never_increases_with_raw() {
        let cal = MoistureCalibration::default();
        let mut previous = cal.percent(0);

        for raw in (0..=4095u16).step_by(15) {
            let percent = cal.percent(raw);
            assert!(percent <= previous, "raw {raw}: {percent} > {previous}");
            assert!((0.0..=100.0).contains(&percent));
            previous = percent;
        }
    }

    #[test]
    fn degenerate_calibration_reads_zero() {
        let cal = MoistureCalibration {
            dry_value: 2000,
            wet_value: 2000,
        };

        assert_relative_eq!(cal.percent(1500), 0.0);
    }

    #[test]
    fn status_follows_threshold() {
        let mut sensor = MoistureSensor::default();

        sensor.ingest(DRY_VALUE);
        assert_eq!(sensor.status(), MoistureStatus::TooDry);

        sensor.ingest(WET_VALUE);
        assert_eq!(sensor.status(), MoistureStatus::Optimal);

        // 30% exactly is not an alert.
        let raw = DRY_VALUE - 690;
        assert_relative_eq!(sensor.ingest(raw), 30.0);
        assert_eq!(sensor.status(), MoistureStatus::Optimal);
    }

    #[test]
    fn status_agrees_with_displayed_percent() {
        let mut sensor = MoistureSensor::default();

        // 29.6% is shown as 30%, so no alert.
        sensor.ingest(3219);
        assert_eq!(sensor.reading.whole_percent(), 30);
        assert_eq!(sensor.status(), MoistureStatus::Optimal);

        // 29.48% is shown as 29%.
        sensor.ingest(3222);
        assert_eq!(sensor.reading.whole_percent(), 29);
        assert_eq!(sensor.status(), MoistureStatus::TooDry);
    }

    #[test]
    fn pretty_print_shows_rounded_percent() {
        let mut sensor = MoistureSensor::default();
        sensor.ingest(2750);

        assert_eq!(sensor.pretty_print(), "Moisture level: 50% (raw value: 2750)");

        sensor.ingest(DRY_VALUE);
        assert_eq!(sensor.pretty_print(), "Moisture level: 0% (raw value: 3900)");
    }
}
