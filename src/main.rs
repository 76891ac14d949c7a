#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    esp_wifi_analog_sensor::firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    // Optional run time in seconds, forever otherwise.
    let duration = std::env::args()
        .nth(1)
        .map(|secs| secs.parse::<u64>().context("duration must be whole seconds"))
        .transpose()?
        .map(std::time::Duration::from_secs);

    esp_wifi_analog_sensor::simulator::run(duration)
}
