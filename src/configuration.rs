//! Build time settings. Credentials come from the `WIFI_SSID` and `WIFI_PASS`
//! environment variables of the build, everything else is a constant.

const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};

const WIFI_PASS: &str = match option_env!("WIFI_PASS") {
    Some(pass) => pass,
    None => "",
};

pub const MAX_SSID_LEN: usize = 32;
pub const MAX_PASSPHRASE_LEN: usize = 63;

pub const HTTP_PORT: u16 = 80;
pub const HTTP_STACK_SIZE: usize = 10240;

pub const WIFI_CONNECT_ATTEMPTS: u32 = 5;
pub const WIFI_RECONNECT_PERIOD_MS: u64 = 30_000;

/// One tick with `CONFIG_FREERTOS_HZ=1000` from `sdkconfig.defaults`.
pub const MAIN_LOOP_DELAY_MS: u32 = 1;
pub const STATUS_LOG_PERIOD_MS: u64 = 10_000;

pub fn wifi_ssid() -> &'static str {
    trunc_string(WIFI_SSID, MAX_SSID_LEN)
}

pub fn wifi_passphrase() -> &'static str {
    trunc_string(WIFI_PASS, MAX_PASSPHRASE_LEN)
}

/// The WiFi driver buffers are sized in bytes, cut on the last char boundary that fits.
fn trunc_string(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }

    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunc_keeps_short_strings() {
        assert_eq!(trunc_string("garden", MAX_SSID_LEN), "garden");
        assert_eq!(trunc_string("", MAX_SSID_LEN), "");
    }

    #[test]
    fn trunc_stops_on_char_boundary() {
        let ssid = "é".repeat(40);
        assert_eq!(trunc_string(&ssid, MAX_SSID_LEN), "é".repeat(16));

        let odd = format!("a{}", "é".repeat(40));
        assert_eq!(trunc_string(&odd, MAX_SSID_LEN).len(), MAX_SSID_LEN - 1);
    }

    #[test]
    fn loop_delay_is_a_whole_tick_below_the_ph_period() {
        let sdkconfig = include_str!("../sdkconfig.defaults");
        let hz: u32 = sdkconfig
            .lines()
            .find_map(|line| line.strip_prefix("CONFIG_FREERTOS_HZ="))
            .and_then(|hz| hz.trim().parse().ok())
            .unwrap();

        let tick_ms = 1000 / hz;
        assert!(tick_ms >= 1);
        assert_eq!(MAIN_LOOP_DELAY_MS % tick_ms, 0);
        assert!((MAIN_LOOP_DELAY_MS as u64) < crate::sensors::ph_sensor::SAMPLE_PERIOD_MS);
    }

    #[test]
    fn credentials_fit_driver_limits() {
        assert!(wifi_ssid().len() <= MAX_SSID_LEN);
        assert!(wifi_passphrase().len() <= MAX_PASSPHRASE_LEN);
    }
}
