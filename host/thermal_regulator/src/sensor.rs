use common::AdcBase;

pub type DmaBufType = [u16; 1];

pub struct Sensor<'a, A: AdcBase> {
    pin: A::PinType,
    readings: &'a mut DmaBufType,
}

impl<'a, A: AdcBase> Sensor<'a, A> {
    pub fn new(pin: A::PinType, readings: &'a mut DmaBufType) -> Self {
        Self { pin, readings }
    }

    /// Runs one conversion and returns the raw count.
    pub async fn read_raw(&mut self, adc: &mut A) -> u16 {
        adc.read(&mut self.pin, &mut self.readings[..]).await;
        self.readings[0]
    }
}
