use log::trace;

use crate::{adc_helper::AnalogSource, interval::Interval, sensors::Sensor};

/// Everything the sampler and the request handler share: the sensor with its
/// smoothing buffer and latest reading, the analog input feeding it, and the
/// sampling schedule.
pub struct SensorState<S, A> {
    sensor: S,
    source: A,
    schedule: Option<Interval>,
    samples_taken: u64,
}

impl<S: Sensor, A: AnalogSource> SensorState<S, A> {
    pub fn new(sensor: S, source: A) -> Self {
        let schedule = sensor.sample_period_ms().map(Interval::new);

        Self {
            sensor,
            source,
            schedule,
            samples_taken: 0,
        }
    }

    /// Reads the ADC once and returns the updated physical value.
    pub fn sample(&mut self) -> f32 {
        let raw = self.source.read_raw();
        let value = self.sensor.ingest(raw);
        self.samples_taken += 1;

        trace!("raw {raw} -> {value}");
        value
    }

    /// Main loop hook. Samples when the sensor's period has elapsed and
    /// returns whether it did.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let due = self
            .schedule
            .as_mut()
            .is_some_and(|interval| interval.due(now_ms));

        if due {
            self.sample();
        }

        due
    }

    /// Sensors without a period are read when their page is requested.
    pub fn samples_on_request(&self) -> bool {
        self.schedule.is_none()
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn samples_taken(&self) -> u64 {
        self.samples_taken
    }
}
