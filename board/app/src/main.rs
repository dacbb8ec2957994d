#![no_std]
#![no_main]

use app::config::FanOptionsConfig;
use app::ext::{
    peripherals_init, pwm_init, AdcDma, AdcInputPin, AdcPeripheral, PwmTimer, UartPeripheral,
    REGULATOR_GAIN, REGULATOR_SAMPLE_RATE_HZ, REGULATOR_SCALE, REGULATOR_SETPOINT,
};
use app::timer_channel;
use app::{AdcWrapper, ResolutionWrapper, SimplePwmWrapper, TelemetrySignal};
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel, SampleTime};
use embassy_stm32::bind_interrupts;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, Uart, UartRx, UartTx};
use embassy_stm32::Config;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker, Timer};
use fan::FanController;
use math::Resolution;
use static_cell::ConstStaticCell;
use thermal_regulator::{
    config::RegulatorConfig,
    regulator::Regulator,
    sensor::{DmaBufType, Sensor},
    setpoint::Setpoint,
    wire::decode_setpoint,
};

use {defmt_rtt as _, panic_probe as _};

#[cfg(feature = "defmt-log")]
use defmt::{error, info};

const MAX_MESSAGE_LEN: usize = 64;

const INPUT_LABEL: &'_ str = "INPUT";
const OUTPUT_LABEL: &'_ str = "OUTPUT";
const REGULATOR_LABEL: &'_ str = "REGULATOR";

static SETPOINT: Setpoint = Setpoint::new(REGULATOR_SETPOINT);
static TELEMETRY: Signal<ThreadModeRawMutex, u8> = Signal::new();

#[link_section = ".ram_d3"]
static UART_RX_DMA_BUF: ConstStaticCell<[u8; MAX_MESSAGE_LEN]> = ConstStaticCell::new([0u8; MAX_MESSAGE_LEN]);
#[link_section = ".ram_d3"]
static UART_TX_DMA_BUF: ConstStaticCell<[u8; 1]> = ConstStaticCell::new([0u8; 1]);
#[link_section = ".ram_d3"]
static ADC_DMA_BUF: ConstStaticCell<DmaBufType> = ConstStaticCell::new([0u16; 1]);

bind_interrupts!(struct Irqs {
    UART4 => usart::InterruptHandler<UartPeripheral>;
});

/// Every received byte is a new setpoint. Only the last one of a burst matters.
#[embassy_executor::task]
async fn input_handler(mut rx: UartRx<'static, Async>) {
    let tmp = UART_RX_DMA_BUF.take();

    #[cfg(feature = "defmt-log")]
    info!("[{}] Starting input handler loop", INPUT_LABEL);

    loop {
        match rx.read_until_idle(tmp).await {
            Ok(n) => {
                for b in &tmp[0..n] {
                    SETPOINT.set_goal(decode_setpoint(*b));
                }
                #[cfg(feature = "defmt-log")]
                if n > 0 {
                    info!("[{}] Setpoint: {}", INPUT_LABEL, SETPOINT.get_goal());
                }
            }
            Err(_e) => {
                #[cfg(feature = "defmt-log")]
                error!("[{}] Cannot read from UART: {}", INPUT_LABEL, _e);
            }
        }
    }
}

#[embassy_executor::task]
async fn output_handler(mut tx: UartTx<'static, Async>) {
    let tmp = UART_TX_DMA_BUF.take();

    loop {
        tmp[0] = TELEMETRY.wait().await;
        if tx.write(&tmp[..]).await.is_err() {
            #[cfg(feature = "defmt-log")]
            error!("[{}] Cannot write to UART", OUTPUT_LABEL);
        }
    }
}

#[embassy_executor::task]
async fn regulator_handler(
    mut adc: AdcWrapper<'static, AdcPeripheral, AdcDma>,
    mut pwm: SimplePwmWrapper<'static, PwmTimer>,
    input: AdcInputPin,
    resolution: Resolution,
    fan_options: FanOptionsConfig,
) {
    let readings = ADC_DMA_BUF.take();
    let sensor: Sensor<'_, AdcWrapper<'static, AdcPeripheral, AdcDma>> = Sensor::new(input.degrade_adc(), readings);

    let channel = timer_channel!(fan_options.pwm.channel).expect("Invalid timer channel");
    let fan = FanController::new(channel);

    let config =
        RegulatorConfig::new(REGULATOR_GAIN, REGULATOR_SCALE, resolution).expect("Invalid regulator configuration");
    let mut regulator = Regulator::new(sensor, fan, &SETPOINT, config);
    let mut telemetry = TelemetrySignal::new(&TELEMETRY);

    regulator.start(&mut pwm);

    let mut ticker = Ticker::every(Duration::from_hz(REGULATOR_SAMPLE_RATE_HZ));
    loop {
        ticker.next().await;
        if let Some(_cycle) = regulator.update(&mut adc, &mut pwm, &mut telemetry).await {
            #[cfg(feature = "defmt-log")]
            info!(
                "[{}] Temperature: {}\tTarget: {}\tDuty cycle: {}%",
                REGULATOR_LABEL, _cycle.temperature, _cycle.target, _cycle.duty
            );
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut config = Config::default();

    // ADC kernel clock from PLL2_P, as in the embassy stm32h7 ADC examples
    {
        use embassy_stm32::rcc::*;
        config.rcc.hsi = Some(HSIPrescaler::DIV1);
        config.rcc.csi = true;
        config.rcc.pll1 = Some(Pll {
            source: PllSource::HSI,
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL50,
            divp: Some(PllDiv::DIV2),
            divq: Some(PllDiv::DIV8),
            divr: None,
        });
        config.rcc.pll2 = Some(Pll {
            source: PllSource::HSI,
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL50,
            divp: Some(PllDiv::DIV8), // 100mhz
            divq: None,
            divr: None,
        });
        config.rcc.sys = Sysclk::PLL1_P; // 400 Mhz
        config.rcc.ahb_pre = AHBPrescaler::DIV2; // 200 Mhz
        config.rcc.apb1_pre = APBPrescaler::DIV2; // 100 Mhz
        config.rcc.apb2_pre = APBPrescaler::DIV2; // 100 Mhz
        config.rcc.apb3_pre = APBPrescaler::DIV2; // 100 Mhz
        config.rcc.apb4_pre = APBPrescaler::DIV2; // 100 Mhz
        config.rcc.voltage_scale = VoltageScale::Scale1;
        config.rcc.mux.adcsel = mux::Adcsel::PLL2_P;
    }
    let p = embassy_stm32::init(config);

    let device_config = peripherals_init(p);

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = device_config.uart.baudrate as u32;

    let uart = Uart::new(
        device_config.uart.peripheral,
        device_config.uart.rx.pin,
        device_config.uart.tx.pin,
        Irqs,
        device_config.uart.tx.dma,
        device_config.uart.rx.dma,
        uart_config,
    )
    .expect("UART configuration not valid");

    let (tx, rx) = uart.split();

    let pwm = pwm_init(
        device_config.pwm.timer,
        device_config.fan.output,
        device_config.pwm.frequency,
    );
    let pwm = SimplePwmWrapper::new(pwm);

    let resolution = device_config.adc.resolution;
    let adc = Adc::new(device_config.adc.peripheral);
    let adc = AdcWrapper::new(
        adc,
        device_config.adc.dma,
        ResolutionWrapper::from(resolution),
        SampleTime::CYCLES32_5,
    );

    spawner.spawn(input_handler(rx)).unwrap();

    spawner.spawn(output_handler(tx)).unwrap();

    spawner
        .spawn(regulator_handler(
            adc,
            pwm,
            device_config.adc.input,
            resolution,
            device_config.fan.options,
        ))
        .unwrap();

    loop {
        #[cfg(feature = "defmt-log")]
        info!("[MAIN LOOP] alive");
        Timer::after(Duration::from_secs(5)).await;
    }
}
