pub mod adc_helper;
pub mod configuration;
pub mod http_handler;
pub mod interval;
pub mod sensor_state;
pub mod sensors;
pub mod smoothing;
pub mod template;

#[cfg(target_os = "espidf")]
pub mod firmware;
#[cfg(target_os = "espidf")]
pub mod wifi_helper;

#[cfg(not(target_os = "espidf"))]
pub mod simulator;
