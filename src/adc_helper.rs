/// Highest code returned by the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Anything able to hand out a raw ADC code on demand.
pub trait AnalogSource {
    fn read_raw(&mut self) -> u16;
}

impl<F: FnMut() -> u16> AnalogSource for F {
    fn read_raw(&mut self) -> u16 {
        self()
    }
}

/// Converts a (possibly averaged) raw code into volts for the given reference voltage.
pub fn raw_to_voltage(raw: f32, vref: f32) -> f32 {
    raw / ADC_MAX as f32 * vref
}

/// Inverse of [`raw_to_voltage`], used to reason about calibration points.
pub fn voltage_to_raw(voltage: f32, vref: f32) -> f32 {
    voltage / vref * ADC_MAX as f32
}

#[cfg(target_os = "espidf")]
pub use esp::EspAnalogSource;

#[cfg(target_os = "espidf")]
mod esp {
    use std::borrow::Borrow;

    use esp_idf_svc::hal::{
        adc::{
            attenuation,
            oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver},
            Adc,
        },
        gpio::ADCPin,
    };

    use super::AnalogSource;

    pub struct EspAnalogSource<'a, ADC, APin, M>
    where
        ADC: Adc + 'a,
        APin: ADCPin<Adc = ADC>,
        M: Borrow<AdcDriver<'a, ADC>>,
    {
        channel: AdcChannelDriver<'a, APin, M>,
    }

    impl<'a, ADC, APin, M> EspAnalogSource<'a, ADC, APin, M>
    where
        ADC: Adc + 'a,
        APin: ADCPin<Adc = ADC>,
        M: Borrow<AdcDriver<'a, ADC>>,
    {
        pub fn new(adc_driver: M, pin_adc: APin) -> anyhow::Result<Self> {
            Ok(Self {
                channel: AdcChannelDriver::new(
                    adc_driver,
                    pin_adc,
                    // Raw codes are wanted, the eFuse calibration would return millivolts.
                    &AdcChannelConfig {
                        attenuation: attenuation::DB_11,
                        calibration: false,
                        ..Default::default()
                    },
                )?,
            })
        }
    }

    impl<'a, ADC, APin, M> AnalogSource for EspAnalogSource<'a, ADC, APin, M>
    where
        ADC: Adc + 'a,
        APin: ADCPin<Adc = ADC>,
        M: Borrow<AdcDriver<'a, ADC>>,
    {
        fn read_raw(&mut self) -> u16 {
            self.channel.read_raw().unwrap_or(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn full_scale_is_vref() {
        assert_relative_eq!(raw_to_voltage(ADC_MAX as f32, 3.3), 3.3);
        assert_relative_eq!(raw_to_voltage(0.0, 3.3), 0.0);
    }

    #[test]
    fn voltage_and_raw_are_inverse() {
        let raw = voltage_to_raw(2.5, 3.3);
        assert_relative_eq!(raw_to_voltage(raw, 3.3), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn closures_are_sources() {
        let mut codes = [10u16, 20, 30].into_iter();
        let mut source = move || codes.next().unwrap_or(0);

        assert_eq!(source.read_raw(), 10);
        assert_eq!(source.read_raw(), 20);
        assert_eq!(source.read_raw(), 30);
        assert_eq!(source.read_raw(), 0);
    }
}
