//! Simulated hardware for host tests
//!
//! - [`SimTime`] is a shared microsecond counter. [`SimClock`] advances it by
//!   one tick per read so busy-wait loops make progress; [`SimDelay`]
//!   advances it by the requested delay.
//! - [`SimLine`] plays back a DHT waveform once the host ends its start
//!   pulse.
//! - [`SimSeesaw`] models the seesaw GPIO registers behind an [`I2cBus`],
//!   logging every transaction.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use gaus_hal::{FlexPin, I2cBus, InputPin, MonotonicClock, OutputPin, Pull};

use crate::expander::registers::{
    GpioReg, Module, StatusReg, TimerReg, HW_ID_CODE, SW_RESET_VALUE,
};

/// Shared simulated time in microseconds
#[derive(Clone)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn new(start_us: u64) -> Self {
        Self(Rc::new(Cell::new(start_us)))
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

/// Clock that ticks one microsecond per read
pub struct SimClock(SimTime);

impl SimClock {
    pub fn new(time: &SimTime) -> Self {
        Self(time.clone())
    }
}

impl MonotonicClock for SimClock {
    fn now_micros(&self) -> u64 {
        let now = self.0.now();
        self.0.advance(1);
        now
    }
}

/// Delay that advances simulated time
pub struct SimDelay(SimTime);

impl SimDelay {
    pub fn new(time: &SimTime) -> Self {
        Self(time.clone())
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance((ns as u64).div_ceil(1_000));
    }
}

/// Delay that only records what was asked of it
#[derive(Default)]
pub struct RecordingDelay {
    pub calls_ns: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_ns.push(ns);
    }
}

/// DHT waveform for a full transmission of `bytes`, as (level, µs) segments
///
/// Starts at the moment the host releases the line after its start pulse.
pub fn transmission(bytes: [u8; 5]) -> Vec<(bool, u32)> {
    // Pull-up rise, then the sensor acknowledgment
    let mut waveform = vec![(true, 20), (false, 80), (true, 80)];
    for byte in bytes {
        for bit in (0..8).rev() {
            let one = byte & (1 << bit) != 0;
            waveform.push((false, 50));
            waveform.push((true, if one { 70 } else { 26 }));
        }
    }
    // Closing sync pulse before the sensor lets go
    waveform.push((false, 50));
    waveform
}

/// Simulated single-wire data line with a pull-up
pub struct SimLine {
    time: SimTime,
    waveform: Vec<(bool, u32)>,
    output: bool,
    driven_high: bool,
    pull: Pull,
    low_since: Option<u64>,
    released_at: Option<u64>,
    last_low_us: u64,
    start_signals: u32,
}

impl SimLine {
    pub fn new(time: &SimTime, waveform: Vec<(bool, u32)>) -> Self {
        Self {
            time: time.clone(),
            waveform,
            output: false,
            driven_high: true,
            pull: Pull::None,
            low_since: None,
            released_at: None,
            last_low_us: 0,
            start_signals: 0,
        }
    }

    /// Replace what the sensor sends after the next start pulse
    pub fn set_waveform(&mut self, waveform: Vec<(bool, u32)>) {
        self.waveform = waveform;
    }

    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Number of start pulses the host has sent
    pub fn start_signals(&self) -> u32 {
        self.start_signals
    }

    /// Length of the most recent start pulse
    pub fn last_low_us(&self) -> u64 {
        self.last_low_us
    }

    fn sensor_level(&self) -> bool {
        let Some(released_at) = self.released_at else {
            return true;
        };
        let mut offset = self.time.now() - released_at;
        for &(level, duration) in &self.waveform {
            if offset < duration as u64 {
                return level;
            }
            offset -= duration as u64;
        }
        // Sensor idle, pull-up holds the line
        true
    }
}

impl OutputPin for SimLine {
    fn set_high(&mut self) {
        self.driven_high = true;
        self.low_since = None;
    }

    fn set_low(&mut self) {
        self.driven_high = false;
        if self.output {
            self.low_since = Some(self.time.now());
        }
    }
}

impl InputPin for SimLine {
    fn is_high(&self) -> bool {
        if self.output {
            self.driven_high
        } else {
            self.sensor_level()
        }
    }
}

impl FlexPin for SimLine {
    fn set_as_input(&mut self, pull: Pull) {
        self.pull = pull;
        if !self.output {
            return;
        }
        self.output = false;
        if let Some(since) = self.low_since.take() {
            let now = self.time.now();
            self.last_low_us = now - since;
            self.start_signals += 1;
            self.released_at = Some(now);
        }
    }

    fn set_as_output(&mut self) {
        self.output = true;
    }
}

/// One logged bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Write(Vec<u8>),
    Read(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// Seesaw register model behind an I2C bus
///
/// Output levels are looped back to the bulk register, so written masks can
/// be read back. Pins listed in `held_low` read low regardless (pressed
/// buttons).
pub struct SimSeesaw {
    pub address: u8,
    pub hw_id: u8,
    pub version: u32,
    pub ops: Rc<RefCell<Vec<BusOp>>>,
    /// Index of the transaction that fails with a NACK
    pub fail_at: Option<usize>,
    pub direction: u64,
    pub pull_enable: u64,
    pub level: u64,
    pub held_low: u64,
    pub backlight: Option<(u8, u16)>,
    pub backlight_freq: Option<(u8, u16)>,
    pending: Option<(u8, u8)>,
}

impl SimSeesaw {
    pub fn new() -> Self {
        Self {
            address: 0x5E,
            hw_id: HW_ID_CODE,
            version: 0x1234_0F5E,
            ops: Rc::new(RefCell::new(Vec::new())),
            fail_at: None,
            direction: 0,
            pull_enable: 0,
            level: 0,
            held_low: 0,
            backlight: None,
            backlight_freq: None,
            pending: None,
        }
    }

    /// Handle shared with the driver-owned bus for inspecting the log
    pub fn log(&self) -> Rc<RefCell<Vec<BusOp>>> {
        self.ops.clone()
    }

    /// Logged writes only, in order
    pub fn writes(log: &Rc<RefCell<Vec<BusOp>>>) -> Vec<Vec<u8>> {
        log.borrow()
            .iter()
            .filter_map(|op| match op {
                BusOp::Write(bytes) => Some(bytes.clone()),
                BusOp::Read(_) => None,
            })
            .collect()
    }

    fn record(&mut self, op: BusOp) -> Result<(), MockBusError> {
        let mut ops = self.ops.borrow_mut();
        let index = ops.len();
        ops.push(op);
        if self.fail_at == Some(index) {
            return Err(MockBusError);
        }
        Ok(())
    }

    fn mask_from(payload: &[u8]) -> u64 {
        let mut bytes = [0u8; 8];
        let len = payload.len().min(8);
        bytes[..len].copy_from_slice(&payload[..len]);
        let a = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64;
        let b = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as u64;
        (b << 32) | a
    }

    fn apply_write(&mut self, module: u8, function: u8, payload: &[u8]) {
        if module == Module::Status as u8 && function == StatusReg::SwReset as u8 {
            if payload == [SW_RESET_VALUE] {
                self.direction = 0;
                self.pull_enable = 0;
                self.level = 0;
            }
            return;
        }
        if module == Module::Timer as u8 && payload.len() == 3 {
            let value = Some((payload[0], u16::from_be_bytes([payload[1], payload[2]])));
            if function == TimerReg::Pwm as u8 {
                self.backlight = value;
            } else if function == TimerReg::Freq as u8 {
                self.backlight_freq = value;
            }
            return;
        }
        if module != Module::Gpio as u8 {
            return;
        }
        let mask = Self::mask_from(payload);
        match function {
            f if f == GpioReg::DirSetBulk as u8 => self.direction |= mask,
            f if f == GpioReg::DirClrBulk as u8 => self.direction &= !mask,
            f if f == GpioReg::BulkSet as u8 => self.level |= mask,
            f if f == GpioReg::BulkClr as u8 => self.level &= !mask,
            f if f == GpioReg::BulkToggle as u8 => self.level ^= mask,
            f if f == GpioReg::PullEnSet as u8 => self.pull_enable |= mask,
            f if f == GpioReg::PullEnClr as u8 => self.pull_enable &= !mask,
            _ => {}
        }
    }

    fn register_bytes(&self, module: u8, function: u8) -> Vec<u8> {
        if module == Module::Status as u8 && function == StatusReg::HwId as u8 {
            return vec![self.hw_id];
        }
        if module == Module::Status as u8 && function == StatusReg::Version as u8 {
            return self.version.to_be_bytes().to_vec();
        }
        if module == Module::Gpio as u8 && function == GpioReg::Bulk as u8 {
            let levels = self.level & !self.held_low;
            let mut out = (levels as u32).to_be_bytes().to_vec();
            out.extend_from_slice(&((levels >> 32) as u32).to_be_bytes());
            return out;
        }
        Vec::new()
    }
}

impl I2cBus for SimSeesaw {
    type Error = MockBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.record(BusOp::Write(data.to_vec()))?;
        if address != self.address || data.len() < 2 {
            return Err(MockBusError);
        }
        if data.len() == 2 {
            self.pending = Some((data[0], data[1]));
        } else {
            self.pending = None;
            self.apply_write(data[0], data[1], &data[2..]);
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.record(BusOp::Read(buf.len()))?;
        if address != self.address {
            return Err(MockBusError);
        }
        let Some((module, function)) = self.pending.take() else {
            return Err(MockBusError);
        };
        let bytes = self.register_bytes(module, function);
        for (i, b) in buf.iter_mut().enumerate() {
            *b = bytes.get(i).copied().unwrap_or(0);
        }
        Ok(())
    }
}
