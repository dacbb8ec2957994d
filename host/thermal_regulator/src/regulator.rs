use common::{AdcBase, PwmBase, TelemetryBase};
#[cfg(feature = "defmt-log")]
use defmt::{debug, info};
use fan::FanController;
use math::conversion::to_temperature;

use crate::{
    averager::{SampleAverager, WINDOW_CAPACITY},
    config::RegulatorConfig,
    controller::FeedbackController,
    duty::DutyCycleMapper,
    event::RegulatorEvent,
    sensor::Sensor,
    setpoint::Setpoint,
    wire::decode_setpoint,
};

/// Outcome of one completed control cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct ControlCycle {
    pub filtered: u16,
    pub temperature: i32,
    pub target: i64,
    pub duty: u8,
    pub ticks: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum RegulatorAction {
    Idle,
    /// the host has to run a conversion and feed back `SampleReady`
    StartConversion,
    CycleCompleted(ControlCycle),
}

pub struct Regulator<'a, A: AdcBase, C: Copy + Clone> {
    sensor: Sensor<'a, A>,
    fan: FanController<C>,
    averager: SampleAverager<WINDOW_CAPACITY>,
    controller: FeedbackController,
    mapper: DutyCycleMapper,
    setpoint: &'a Setpoint,
    config: RegulatorConfig,
    conversion_pending: bool,
}

impl<'a, A: AdcBase, C: Copy + Clone> Regulator<'a, A, C> {
    pub fn new(sensor: Sensor<'a, A>, fan: FanController<C>, setpoint: &'a Setpoint, config: RegulatorConfig) -> Self {
        Self {
            sensor,
            fan,
            averager: SampleAverager::new(),
            controller: FeedbackController::new(config.get_gain()),
            mapper: DutyCycleMapper::new(),
            setpoint,
            config,
            conversion_pending: false,
        }
    }

    /// Enables the fan and drives it as if the setpoint were the target.
    pub fn start<P: PwmBase<Channel = C>>(&mut self, pwm: &mut P) -> u8 {
        self.fan.enable(pwm);
        let duty = self.mapper.map_to_duty(i64::from(self.setpoint.get_goal()));
        let _ticks = self.fan.set_duty(duty, pwm);
        #[cfg(feature = "defmt-log")]
        info!("[REGULATOR] started, setpoint {} duty {}% ({} ticks)", self.setpoint.get_goal(), duty, _ticks);
        duty
    }

    /// Arms a conversion. Returns false, and defers the tick, while the
    /// previous conversion has not delivered its sample yet.
    pub fn on_tick(&mut self) -> bool {
        if self.conversion_pending {
            #[cfg(feature = "defmt-log")]
            debug!("[REGULATOR] conversion pending, tick deferred");
            return false;
        }
        self.conversion_pending = true;
        true
    }

    pub fn on_sample<P: PwmBase<Channel = C>, T: TelemetryBase>(
        &mut self,
        raw: u16,
        pwm: &mut P,
        telemetry: &mut T,
    ) -> Option<ControlCycle> {
        self.conversion_pending = false;
        let filtered = self.averager.add_sample(raw)?;

        let temperature = to_temperature(filtered, self.config.get_scale(), self.config.get_resolution());
        let target = self.controller.compute_target(temperature, self.setpoint.get_goal());
        let duty = self.mapper.map_to_duty(target);
        let ticks = self.fan.set_duty(duty, pwm);
        telemetry.publish(temperature);

        let cycle = ControlCycle {
            filtered,
            temperature,
            target,
            duty,
            ticks,
        };
        #[cfg(feature = "defmt-log")]
        info!("[REGULATOR] {}", cycle);
        Some(cycle)
    }

    pub fn on_setpoint(&self, byte: u8) {
        let goal = decode_setpoint(byte);
        self.setpoint.set_goal(goal);
        #[cfg(feature = "defmt-log")]
        debug!("[REGULATOR] new setpoint {}", goal);
    }

    /// One sampling interval: tick, conversion and sample handling.
    pub async fn update<P: PwmBase<Channel = C>, T: TelemetryBase>(
        &mut self,
        adc: &mut A,
        pwm: &mut P,
        telemetry: &mut T,
    ) -> Option<ControlCycle> {
        if !self.on_tick() {
            return None;
        }
        let raw = self.sensor.read_raw(adc).await;
        self.on_sample(raw, pwm, telemetry)
    }

    pub fn dispatch<P: PwmBase<Channel = C>, T: TelemetryBase>(
        &mut self,
        event: RegulatorEvent,
        pwm: &mut P,
        telemetry: &mut T,
    ) -> RegulatorAction {
        match event {
            RegulatorEvent::Tick => {
                if self.on_tick() {
                    RegulatorAction::StartConversion
                } else {
                    RegulatorAction::Idle
                }
            }
            RegulatorEvent::SampleReady(raw) => match self.on_sample(raw, pwm, telemetry) {
                Some(cycle) => RegulatorAction::CycleCompleted(cycle),
                None => RegulatorAction::Idle,
            },
            RegulatorEvent::SetpointReceived(byte) => {
                self.on_setpoint(byte);
                RegulatorAction::Idle
            }
        }
    }

    pub fn is_conversion_pending(&self) -> bool {
        self.conversion_pending
    }

    pub fn get_fill_count(&self) -> usize {
        self.averager.fill_count()
    }

    pub fn get_duty(&self) -> u8 {
        self.fan.get_duty()
    }
}
