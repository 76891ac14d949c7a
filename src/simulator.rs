//! Desktop stand-in for the board: the three sensors are fed by simulated
//! probes and driven by the same schedule and handlers as the firmware.

use std::f32::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::info;
use rand::Rng;

use crate::adc_helper::{voltage_to_raw, AnalogSource, ADC_MAX};
use crate::http_handler;
use crate::interval::{millis_since, Interval};
use crate::sensor_state::SensorState;
use crate::sensors::{MoistureSensor, PhSensor, Sensor, TdsSensor};

const REPORT_PERIOD_MS: u64 = 1000;

/// Slow sine around a center code with uniform noise on top.
pub struct SimulatedProbe {
    center: f32,
    amplitude: f32,
    period_ms: f32,
    noise: f32,
    start: Instant,
}

impl SimulatedProbe {
    pub fn new(center: f32, amplitude: f32, period_ms: u64, noise: f32) -> Self {
        Self {
            center,
            amplitude,
            period_ms: period_ms as f32,
            noise,
            start: Instant::now(),
        }
    }
}

impl AnalogSource for SimulatedProbe {
    fn read_raw(&mut self) -> u16 {
        let phase = millis_since(self.start) as f32 / self.period_ms * TAU;
        let jitter = if self.noise > 0.0 {
            rand::thread_rng().gen_range(-self.noise..=self.noise)
        } else {
            0.0
        };

        (self.center + self.amplitude * phase.sin() + jitter).clamp(0.0, ADC_MAX as f32) as u16
    }
}

/// Runs for `duration` or forever when `None`.
pub fn run(duration: Option<Duration>) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let boot = Instant::now();

    let mut moisture = SensorState::new(
        MoistureSensor::default(),
        SimulatedProbe::new(2750.0, 900.0, 60_000, 40.0),
    );
    let mut ph = SensorState::new(
        PhSensor::default(),
        SimulatedProbe::new(voltage_to_raw(2.5, 3.3), 250.0, 20_000, 60.0),
    );
    let mut tds = SensorState::new(
        TdsSensor::default(),
        SimulatedProbe::new(voltage_to_raw(1.0, 3.3), 400.0, 30_000, 25.0),
    );

    let mut report = Interval::new(REPORT_PERIOD_MS);
    info!("Simulating moisture, pH and TDS probes");

    loop {
        let now_ms = millis_since(boot);
        if duration.is_some_and(|d| boot.elapsed() >= d) {
            info!("Simulation done after {now_ms} ms");
            return Ok(());
        }

        ph.tick(now_ms);
        tds.tick(now_ms);

        if report.due(now_ms) {
            http_handler::respond(&mut moisture, http_handler::INDEX_ROUTE, now_ms)
                .context("moisture page not served")?;
            info!("{}", moisture.sensor().pretty_print());

            log_json(&mut ph, now_ms)?;
            log_json(&mut tds, now_ms)?;
        }

        thread::sleep(Duration::from_millis(1));
    }
}

fn log_json<S: Sensor, A: AnalogSource>(
    state: &mut SensorState<S, A>,
    now_ms: u64,
) -> anyhow::Result<()> {
    let route = state
        .sensor()
        .json_route()
        .context("sensor has no JSON route")?;
    let response =
        http_handler::respond(state, route, now_ms).context("JSON route not served")?;

    info!("GET {route} -> {}", response.body);
    Ok(())
}
