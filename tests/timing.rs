//! Check the driver waits for each conversion before reading the result.
//!
//! The bus and delay share an event log so the order of writes, delays and reads
//! can be checked together.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use icp10125::{ICP10125, MeasurementMode, crc8};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Write(Vec<u8>),
    DelayNs(u32),
    Read(usize),
}

type Log = Rc<RefCell<Vec<Event>>>;

/// I2C bus that replays canned responses and logs each operation.
struct LoggingBus {
    log: Log,
    responses: VecDeque<Vec<u8>>,
}

impl ErrorType for LoggingBus {
    type Error = ErrorKind;
}

impl I2c for LoggingBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.log.borrow_mut().push(Event::Write(bytes.to_vec())),
                Operation::Read(buffer) => {
                    let response = self.responses.pop_front().ok_or(ErrorKind::Other)?;
                    buffer.copy_from_slice(&response);
                    self.log.borrow_mut().push(Event::Read(buffer.len()));
                }
            }
        }
        Ok(())
    }
}

struct LoggingDelay {
    log: Log,
}

impl DelayNs for LoggingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }
}

fn chunk(word: u16) -> Vec<u8> {
    let [msb, lsb] = word.to_be_bytes();
    vec![msb, lsb, crc8(&[msb, lsb])]
}

/// A calibrated driver with `frames` queued after the initialisation responses.
///
/// The log is cleared once the driver is created.
fn calibrated_sensor(frames: &[Vec<u8>]) -> (ICP10125<LoggingBus, LoggingDelay>, Log) {
    let log = Log::default();
    let mut responses = VecDeque::from([chunk(0x0148)]);
    responses.extend([0x1234, 0x2345, 0x1A2B, 0x0D0C].map(chunk));
    responses.extend(frames.iter().cloned());
    let bus = LoggingBus {
        log: log.clone(),
        responses,
    };
    let delay = LoggingDelay { log: log.clone() };
    let sensor = ICP10125::new(bus, delay).unwrap();
    log.borrow_mut().clear();
    (sensor, log)
}

/// Total time waited between the last write and the following read.
fn wait_before_read(events: &[Event]) -> u64 {
    let write = events
        .iter()
        .rposition(|e| matches!(e, Event::Write(_)))
        .unwrap();
    let read = events
        .iter()
        .position(|e| matches!(e, Event::Read(_)))
        .unwrap();
    assert!(write < read, "read before write: {events:?}");
    events[write..read]
        .iter()
        .map(|e| match e {
            Event::DelayNs(ns) => u64::from(*ns),
            _ => 0,
        })
        .sum()
}

#[test]
fn initialisation_does_not_wait() {
    let log = Log::default();
    let mut responses = VecDeque::from([chunk(0x0148)]);
    responses.extend([1, 2, 3, 4].map(chunk));
    let bus = LoggingBus {
        log: log.clone(),
        responses,
    };
    let delay = LoggingDelay { log: log.clone() };
    ICP10125::new(bus, delay).unwrap();
    let events = log.borrow();
    assert!(!events.iter().any(|e| matches!(e, Event::DelayNs(_))));
    // ID write and read, pointer move, then a write and read per OTP word.
    assert_eq!(events.len(), 2 + 1 + 4 * 2);
}

#[test]
fn each_mode_waits_for_conversion() {
    let expected = [
        (MeasurementMode::Normal, [0x68, 0x25], 7_000_000),
        (MeasurementMode::LowPower, [0x60, 0x9C], 2_000_000),
        (MeasurementMode::LowNoise, [0x70, 0xDF], 24_000_000),
        (MeasurementMode::UltraLowNoise, [0x78, 0x66], 95_000_000),
    ];
    for (mode, opcode, wait_ns) in expected {
        let frame: Vec<u8> = [0x6A3C, 0x5E81, 0x9A00].into_iter().flat_map(chunk).collect();
        let (mut sensor, log) = calibrated_sensor(&[frame]);

        sensor.measure(mode).unwrap();
        let events = log.borrow();
        assert_eq!(events.first(), Some(&Event::Write(opcode.to_vec())));
        assert_eq!(events.last(), Some(&Event::Read(9)));
        assert!(wait_before_read(&events) >= wait_ns, "{mode:?}: {events:?}");
    }
}

#[test]
fn reset_waits_for_settling() {
    let (mut sensor, log) = calibrated_sensor(&[]);
    sensor.reset().unwrap();
    assert_eq!(
        *log.borrow(),
        [Event::Write(vec![0x80, 0x5D]), Event::DelayNs(100_000)]
    );
}
