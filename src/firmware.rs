use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use anyhow::anyhow;
use esp_idf_svc::hal::{adc::oneshot::AdcDriver, delay::FreeRtos, peripherals::Peripherals};
use esp_idf_svc::http::{self, server::EspHttpServer, Method};
use esp_idf_svc::io::Write;
use log::{error, info};
use mutually_exclusive_features::exactly_one_of;

use crate::adc_helper::{AnalogSource, EspAnalogSource};
use crate::configuration::{HTTP_PORT, HTTP_STACK_SIZE, MAIN_LOOP_DELAY_MS, STATUS_LOG_PERIOD_MS};
use crate::http_handler;
use crate::interval::{millis_since, Interval};
use crate::sensor_state::SensorState;
use crate::sensors::Sensor;
use crate::wifi_helper::{self, ReconnectWatchdog};

exactly_one_of!("moisture-sensor", "ph-sensor", "tds-sensor");

type SharedState<S, A> = Arc<Mutex<SensorState<S, A>>>;

pub fn run() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let boot = Instant::now();
    let peripherals = Peripherals::take()?;
    let adc = AdcDriver::new(peripherals.adc1)?;

    #[cfg(feature = "moisture-sensor")]
    let (sensor, pin) = (
        crate::sensors::MoistureSensor::default(),
        peripherals.pins.gpio2,
    );

    #[cfg(feature = "ph-sensor")]
    let (sensor, pin) = (crate::sensors::PhSensor::default(), peripherals.pins.gpio3);

    #[cfg(feature = "tds-sensor")]
    let (sensor, pin) = (crate::sensors::TdsSensor::default(), peripherals.pins.gpio4);

    let source = EspAnalogSource::new(adc, pin)?;
    let state = Arc::new(Mutex::new(SensorState::new(sensor, source)));

    let mut wifi = wifi_helper::create_wifi(peripherals.modem)?;
    if let Err(e) = wifi_helper::connect_wifi(&mut wifi) {
        error!("Wifi unavailable, serving anyway until it comes back: {e}");
    }

    let _server = start_server(&state, boot)?;
    let mut watchdog = ReconnectWatchdog::new(millis_since(boot));
    let mut status_log = Interval::new(STATUS_LOG_PERIOD_MS);

    loop {
        let now_ms = millis_since(boot);

        {
            let mut state = lock(&state)?;
            state.tick(now_ms);

            if status_log.due(now_ms) {
                info!("{}", state.sensor().pretty_print());
            }
        }

        watchdog.check(&mut wifi, now_ms);
        FreeRtos::delay_ms(MAIN_LOOP_DELAY_MS);
    }
}

fn start_server<S, A>(
    state: &SharedState<S, A>,
    boot: Instant,
) -> anyhow::Result<EspHttpServer<'static>>
where
    S: Sensor + Send + 'static,
    A: AnalogSource + Send + 'static,
{
    let mut server = EspHttpServer::new(&http::server::Configuration {
        stack_size: HTTP_STACK_SIZE,
        http_port: HTTP_PORT,
        ..Default::default()
    })?;

    let routes = http_handler::routes(lock(state)?.sensor());

    for route in routes {
        let state = Arc::clone(state);

        server.fn_handler::<anyhow::Error, _>(route, Method::Get, move |req| {
            let uri = req.uri().to_string();
            let response = http_handler::respond(&mut lock(&state)?, &uri, millis_since(boot))
                .ok_or_else(|| anyhow!("No handler for {uri}"))?;

            req.into_response(200, Some("OK"), &[("Content-Type", response.content_type)])?
                .write_all(response.body.as_bytes())?;
            Ok(())
        })?;

        info!("Route GET {route} registered");
    }

    Ok(server)
}

fn lock<T>(state: &Mutex<T>) -> anyhow::Result<MutexGuard<'_, T>> {
    state
        .lock()
        .map_err(|_| anyhow!("Sensor state lock poisoned"))
}
