pub mod moisture_sensor;
pub mod ph_sensor;
pub mod sensor;
pub mod tds_sensor;

pub use moisture_sensor::{MoistureCalibration, MoistureSensor, MoistureStatus};
pub use ph_sensor::{PhCalibration, PhSensor};
pub use sensor::Sensor;
pub use tds_sensor::{TdsCalibration, TdsSensor};
