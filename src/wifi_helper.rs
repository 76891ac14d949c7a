use std::net::Ipv4Addr;

use anyhow::anyhow;
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::{modem::Modem, peripheral::Peripheral},
    nvs::EspDefaultNvsPartition,
    wifi::{BlockingWifi, EspWifi},
};
use log::{info, warn};

use crate::{configuration, interval::Interval};

pub fn create_wifi<'a>(
    modem: impl Peripheral<P = Modem> + 'a,
) -> anyhow::Result<BlockingWifi<EspWifi<'a>>> {
    let wifi_configuration = Configuration::Client(ClientConfiguration {
        ssid: configuration::wifi_ssid()
            .try_into()
            .map_err(|_| anyhow!("SSID does not fit the driver buffer"))?,
        bssid: None,
        auth_method: AuthMethod::WPA2Personal,
        password: configuration::wifi_passphrase()
            .try_into()
            .map_err(|_| anyhow!("Passphrase does not fit the driver buffer"))?,
        channel: None,
        ..Default::default()
    });

    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sys_loop.clone(), Some(nvs))?, sys_loop)?;
    wifi.set_configuration(&wifi_configuration)?;

    Ok(wifi)
}

/// Blocks until the station is up or every attempt failed.
pub fn connect_wifi(wifi: &mut BlockingWifi<EspWifi>) -> anyhow::Result<Ipv4Addr> {
    let mut last_error = None;

    for i in 1..=configuration::WIFI_CONNECT_ATTEMPTS {
        info!("Wifi connection attempt #{i}");

        match try_connect(wifi) {
            Ok(ip) => return Ok(ip),
            Err(e) => {
                warn!("Wifi attempt #{i} failed: {e}");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow!("No wifi connection attempt made")))
}

fn try_connect(wifi: &mut BlockingWifi<EspWifi>) -> anyhow::Result<Ipv4Addr> {
    let _ = wifi.disconnect();

    if !wifi.is_started()? {
        wifi.start()?;
        info!("Wifi started");
    }

    wifi.connect()?;
    info!("Wifi connected");

    wifi.wait_netif_up()?;
    info!("Wifi netif up");

    let ip = wifi.wifi().sta_netif().get_ip_info()?.ip;
    info!("Listening on http://{ip}:{}/", configuration::HTTP_PORT);

    Ok(ip)
}

/// Re-associates the station from the main loop once per period while it is down.
pub struct ReconnectWatchdog {
    interval: Interval,
}

impl ReconnectWatchdog {
    pub fn new(now_ms: u64) -> Self {
        let mut interval = Interval::new(configuration::WIFI_RECONNECT_PERIOD_MS);
        // The boot sequence just tried, wait a full period first.
        interval.due(now_ms);

        Self { interval }
    }

    pub fn check(&mut self, wifi: &mut BlockingWifi<EspWifi>, now_ms: u64) {
        if !self.interval.due(now_ms) || wifi.is_connected().unwrap_or(false) {
            return;
        }

        warn!("Wifi down, trying to reconnect");
        if let Err(e) = try_connect(wifi) {
            warn!("Wifi reconnect failed: {e}");
        }
    }
}
