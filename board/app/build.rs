use std::{
    env, fs,
    path::{Path, PathBuf},
};

use math::Resolution;
use thermal_regulator::config::RegulatorConfig;

mod external {
    use std::ops::Not;

    use serde_derive::{Deserialize, Serialize};

    fn get_string_value(s: String) -> Option<String> {
        s.is_empty().not().then_some(s)
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct PinConfig {
        pin: String,
    }

    impl PinConfig {
        pub fn get_pin(&self) -> Option<String> {
            get_string_value(self.pin.clone())
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct PeripheralConfig {
        peripheral: String,
    }

    impl PeripheralConfig {
        pub fn get_peripheral(&self) -> Option<String> {
            get_string_value(self.peripheral.clone())
        }
    }

    /* ADC */
    // [adc]
    // peripheral = "ADC1"
    // resolution = 10
    //
    // [adc.input]
    // pin = "PA3"
    //
    // [adc.dma]
    // peripheral = "DMA1_CH2"
    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct AdcConfig {
        peripheral: String,
        resolution: u8,
        input: PinConfig,
        dma: PeripheralConfig,
    }

    impl AdcConfig {
        pub fn get_peripheral(&self) -> Option<String> {
            get_string_value(self.peripheral.clone())
        }

        pub fn get_resolution(&self) -> u8 {
            self.resolution
        }

        pub fn get_input(&self) -> PinConfig {
            self.input.clone()
        }

        pub fn get_dma(&self) -> PeripheralConfig {
            self.dma.clone()
        }
    }

    /* PWM */
    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct PwmConfig {
        frequency: u64,
        timer: String,
    }

    impl PwmConfig {
        pub fn get_frequency(&self) -> u64 {
            self.frequency
        }

        pub fn get_timer(&self) -> Option<String> {
            get_string_value(self.timer.clone())
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct PwmOutputConfig {
        channel: u8,
    }

    impl PwmOutputConfig {
        pub fn get_channel(&self) -> u8 {
            self.channel
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct FanConfig {
        pwm: PwmOutputConfig,
        output: PinConfig,
    }

    impl FanConfig {
        pub fn get_pwm(&self) -> PwmOutputConfig {
            self.pwm.clone()
        }

        pub fn get_output(&self) -> PinConfig {
            self.output.clone()
        }
    }

    /* UART */
    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct UartPartConfig {
        pin: String,
        dma: PeripheralConfig,
    }

    impl UartPartConfig {
        pub fn get_pin(&self) -> Option<String> {
            get_string_value(self.pin.clone())
        }

        pub fn get_dma(&self) -> PeripheralConfig {
            self.dma.clone()
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct UartConfig {
        peripheral: String,
        baudrate: u64,
        rx: UartPartConfig,
        tx: UartPartConfig,
    }

    impl UartConfig {
        pub fn get_peripheral(&self) -> Option<String> {
            get_string_value(self.peripheral.clone())
        }

        pub fn get_baudrate(&self) -> u64 {
            self.baudrate
        }

        pub fn get_tx(&self) -> UartPartConfig {
            self.tx.clone()
        }

        pub fn get_rx(&self) -> UartPartConfig {
            self.rx.clone()
        }
    }

    /* regulator */
    // [regulator]
    // gain = 5
    // setpoint = 40
    // sample_rate = 2
    // scale = 330
    #[derive(Default, Debug, Serialize, Deserialize, Clone, Copy)]
    pub struct RegulatorOptionsConfig {
        gain: i32,
        setpoint: i32,
        sample_rate: u64,
        scale: i64,
    }

    impl RegulatorOptionsConfig {
        pub fn get_gain(&self) -> i32 {
            self.gain
        }

        pub fn get_setpoint(&self) -> i32 {
            self.setpoint
        }

        pub fn get_sample_rate(&self) -> u64 {
            self.sample_rate
        }

        pub fn get_scale(&self) -> i64 {
            self.scale
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct MyConfig {
        pub adc: AdcConfig,
        pub pwm: PwmConfig,
        pub fan: FanConfig,
        pub uart: UartConfig,
        pub regulator: RegulatorOptionsConfig,
    }
}

fn resolution_from_bits(bits: u8) -> Option<(Resolution, &'static str)> {
    match bits {
        16 => Some((Resolution::BITS16, "BITS16")),
        14 => Some((Resolution::BITS14, "BITS14")),
        12 => Some((Resolution::BITS12, "BITS12")),
        10 => Some((Resolution::BITS10, "BITS10")),
        8 => Some((Resolution::BITS8, "BITS8")),
        _ => None,
    }
}

/// Peripherals taken out of `embassy_stm32::Peripherals`, in declaration
/// order. Each one gets a type alias named `alias`.
#[derive(Default)]
struct Bindings {
    entries: Vec<(&'static str, String)>,
}

impl Bindings {
    /// Registers a peripheral and returns the expression moving it out of `p`.
    fn bind(&mut self, alias: &'static str, peripheral: Option<String>, what: &str) -> String {
        let peripheral = peripheral.unwrap_or_else(|| panic!("{} is missing", what));
        let expr = format!("p.{}", peripheral);
        self.entries.push((alias, peripheral));
        expr
    }

    fn aliases(&self) -> String {
        self.entries
            .iter()
            .map(|(alias, peripheral)| format!("pub type {} = {};\n", alias, peripheral))
            .collect()
    }

    fn generics(&self) -> String {
        self.entries
            .iter()
            .map(|(alias, _)| format!("    {},\n", alias))
            .collect()
    }
}

fn main() {
    println!("cargo::rerun-if-changed=config/config.toml");
    let path = Path::new("config/config.toml");
    let conf = confy::load_path::<external::MyConfig>(path).expect("Error reading config file");
    let mut bindings = Bindings::default();

    // the binding order must match the generics of `DeviceConfig`
    let adc = conf.adc.clone();
    let adc_peripheral = bindings.bind("AdcPeripheral", adc.get_peripheral(), "ADC peripheral");
    let adc_input = bindings.bind("AdcInputPin", adc.get_input().get_pin(), "ADC input pin");
    let adc_dma = bindings.bind("AdcDma", adc.get_dma().get_peripheral(), "ADC DMA peripheral");
    let (adc_resolution, adc_resolution_name) = resolution_from_bits(adc.get_resolution())
        .expect("ADC resolution must be one of 8, 10, 12, 14, 16");

    let pwm_timer = bindings.bind("PwmTimer", conf.pwm.get_timer(), "PWM timer peripheral");
    let pwm_frequency = conf.pwm.get_frequency();
    if pwm_frequency == 0 || pwm_frequency > u64::from(u32::MAX) {
        panic!("PWM frequency must be between 1 and {} Hz", u32::MAX);
    }

    let fan_channel = conf.fan.get_pwm().get_channel();
    let fan_output = bindings.bind("FanOutputPin", conf.fan.get_output().get_pin(), "Fan output pin");
    if !(1..=4).contains(&fan_channel) {
        panic!("Fan PWM channel must be between 1 and 4");
    }

    let uart = conf.uart.clone();
    let uart_peripheral = bindings.bind("UartPeripheral", uart.get_peripheral(), "UART peripheral");
    let uart_rx_pin = bindings.bind("UartRxPin", uart.get_rx().get_pin(), "UART RX pin");
    let uart_rx_dma = bindings.bind("UartRxDma", uart.get_rx().get_dma().get_peripheral(), "UART RX DMA");
    let uart_tx_pin = bindings.bind("UartTxPin", uart.get_tx().get_pin(), "UART TX pin");
    let uart_tx_dma = bindings.bind("UartTxDma", uart.get_tx().get_dma().get_peripheral(), "UART TX DMA");
    if uart.get_baudrate() == 0 || uart.get_baudrate() > u64::from(u32::MAX) {
        panic!("UART baudrate must be between 1 and {}", u32::MAX);
    }

    let regulator = conf.regulator;
    if regulator.get_sample_rate() == 0 {
        panic!("Regulator sample rate must be positive");
    }
    if let Err(e) = RegulatorConfig::new(regulator.get_gain(), regulator.get_scale(), adc_resolution) {
        panic!("Invalid regulator configuration: {}", e);
    }

    // only the configured channel gets a pin, the other slots stay empty
    let pwm_slots: String = (1..=4u8)
        .map(|channel| {
            if channel == fan_channel {
                format!("        Some(PwmPin::new_ch{}(output, OutputType::PushPull)),\n", channel)
            } else {
                String::from("        None,\n")
            }
        })
        .collect();

    let mut string = String::from(
        "
use embassy_stm32::Peripherals;
use embassy_stm32::peripherals::*;
use embassy_stm32::gpio::OutputType;
use embassy_stm32::time::hz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use crate::config::*;

",
    );
    string += &bindings.aliases();
    string += &format!(
        "
pub const REGULATOR_GAIN: i32 = {};
pub const REGULATOR_SETPOINT: i32 = {};
pub const REGULATOR_SAMPLE_RATE_HZ: u64 = {};
pub const REGULATOR_SCALE: i64 = {};
",
        regulator.get_gain(),
        regulator.get_setpoint(),
        regulator.get_sample_rate(),
        regulator.get_scale(),
    );
    string += &format!(
        "
pub fn peripherals_init(p: Peripherals) -> DeviceConfig<
{}>{{
    DeviceConfig{{
        adc: AdcConfig{{
            peripheral: {adc_peripheral},
            input: {adc_input},
            dma: {adc_dma},
            resolution: math::Resolution::{adc_resolution_name},
        }},
        pwm: PwmConfig{{
            frequency: {pwm_frequency},
            timer: {pwm_timer},
        }},
        fan: FanConfig{{
            options: FanOptionsConfig{{
                pwm: common::PwmOutputConfig{{
                    channel: {fan_channel}
                }}
            }},
            output: {fan_output},
        }},
        uart: UartConfig{{
            peripheral: {uart_peripheral},
            baudrate: {uart_baudrate},
            rx: UartPartConfig{{
                pin: {uart_rx_pin},
                dma: {uart_rx_dma}
            }},
            tx: UartPartConfig{{
                pin: {uart_tx_pin},
                dma: {uart_tx_dma}
            }}
        }},
    }}
}}

pub fn pwm_init(timer: PwmTimer, output: FanOutputPin, frequency: u64) -> SimplePwm<'static, PwmTimer> {{
    SimplePwm::new(
        timer,
{pwm_slots}        hz(frequency as u32),
        CountingMode::EdgeAlignedUp,
    )
}}
",
        bindings.generics(),
        uart_baudrate = uart.get_baudrate(),
    );

    let out_dir = &PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is not set"));
    let out_file = out_dir.join("ext.rs").to_string_lossy().to_string();
    fs::write(&out_file, string.as_str()).expect("Cannot write generated peripherals file");
}
