pub type FanOptionsConfig = fan::FanConfig;

pub struct UartPartConfig<P, D> {
    pub pin: P,
    pub dma: D,
}

pub struct UartConfig<P, RXP, RXD, TXP, TXD> {
    pub peripheral: P,
    pub baudrate: u64,
    pub rx: UartPartConfig<RXP, RXD>,
    pub tx: UartPartConfig<TXP, TXD>,
}

pub struct AdcConfig<P, I, D> {
    pub peripheral: P,
    pub input: I,
    pub dma: D,
    pub resolution: math::Resolution,
}

pub struct PwmConfig<T> {
    pub frequency: u64,
    pub timer: T,
}

pub struct FanConfig<O> {
    pub options: FanOptionsConfig,
    pub output: O,
}

pub struct DeviceConfig<ADCP, ADCI, ADCD, PWMT, FANO, UP, RXP, RXD, TXP, TXD> {
    pub adc: AdcConfig<ADCP, ADCI, ADCD>,
    pub pwm: PwmConfig<PWMT>,
    pub fan: FanConfig<FANO>,
    pub uart: UartConfig<UP, RXP, RXD, TXP, TXD>,
}
