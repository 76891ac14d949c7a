use crate::sensors::{moisture_sensor::MoistureReading, MoistureStatus};

const MOISTURE_HTML: &str = include_str!("html/moisture.html");
const PH_HTML: &str = include_str!("html/ph.html");
const TDS_HTML: &str = include_str!("html/tds.html");

pub const MOISTURE_REFRESH_SECONDS: u32 = 5;

pub const MSG_OPTIMAL: &str = "Moisture level is optimal.";
pub const MSG_TOO_DRY: &str = "Soil is too dry, time to water!";

pub fn moisture_page(reading: &MoistureReading, status: MoistureStatus, threshold: f32) -> String {
    let (status_class, status_msg) = match status {
        MoistureStatus::Optimal => ("ok", MSG_OPTIMAL),
        MoistureStatus::TooDry => ("alert", MSG_TOO_DRY),
    };

    let mut template = MOISTURE_HTML.to_string();

    template = template.replace("{REFRESH}", &MOISTURE_REFRESH_SECONDS.to_string());
    template = template.replace("{MOISTURE}", &reading.whole_percent().to_string());
    template = template.replace("{RAW}", &reading.raw.to_string());
    template = template.replace("{THRESHOLD}", &format!("{:.0}", threshold));
    template = template.replace("{STATUS_CLASS}", status_class);
    template = template.replace("{STATUS_MSG}", status_msg);

    template
}

pub fn ph_page() -> String {
    PH_HTML.to_string()
}

pub fn tds_page() -> String {
    TDS_HTML.to_string()
}
