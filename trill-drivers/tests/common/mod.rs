//! Scripted bus and delay for driver tests

#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use trill_hal::I2cBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// How the bus answers the next write
#[derive(Debug, Clone, Copy)]
pub enum WriteReply {
    Full,
    Partial(usize),
    Fail,
}

/// How the bus answers the next read
#[derive(Debug, Clone)]
pub enum ReadReply {
    Data(Vec<u8>),
    Fail,
}

/// Records every transfer; unscripted writes succeed, unscripted reads fail
#[derive(Debug, Default)]
pub struct MockBus {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: Vec<(u8, usize)>,
    write_replies: VecDeque<WriteReply>,
    read_replies: VecDeque<ReadReply>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_write(&mut self, reply: WriteReply) -> &mut Self {
        self.write_replies.push_back(reply);
        self
    }

    pub fn on_read(&mut self, bytes: &[u8]) -> &mut Self {
        self.read_replies.push_back(ReadReply::Data(bytes.to_vec()));
        self
    }

    pub fn on_read_fail(&mut self) -> &mut Self {
        self.read_replies.push_back(ReadReply::Fail);
        self
    }

    /// Script a successful identify: stale frame, then the identity
    pub fn identity(&mut self, device_code: u8, firmware: u8) -> &mut Self {
        self.on_read(&[0, 0, 0, 0])
            .on_read(&[0xFE, device_code, firmware, 0])
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.writes.iter().map(|(_, bytes)| bytes.clone()).collect()
    }
}

impl I2cBus for MockBus {
    type Error = MockError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, MockError> {
        self.writes.push((address, data.to_vec()));
        match self.write_replies.pop_front().unwrap_or(WriteReply::Full) {
            WriteReply::Full => Ok(data.len()),
            WriteReply::Partial(n) => Ok(n.min(data.len())),
            WriteReply::Fail => Err(MockError),
        }
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, MockError> {
        self.reads.push((address, buf.len()));
        match self.read_replies.pop_front() {
            Some(ReadReply::Data(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Some(ReadReply::Fail) | None => Err(MockError),
        }
    }
}

/// Records requested delays in microseconds
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub delays_us: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_us.push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_us.push(us);
    }
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{actual} is not close to {expected}"
    );
}
