use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};

/// One write seen on the fake bus.
#[derive(Debug, Clone, PartialEq)]
pub struct FakePacket {
    pub addr: u8,
    pub bytes: Vec<u8>,
}

/// Scripted I2C port. Reads are answered from `available_packets` in order;
/// a read whose scripted packet is missing or of the wrong length fails.
/// Writes are recorded and fail when `write_errors` has a pending entry.
#[derive(Default)]
pub struct FakeI2cPort {
    pub available_packets: VecDeque<Vec<u8>>,
    pub sent_packets: Vec<FakePacket>,
    pub write_errors: VecDeque<Option<ErrorKind>>,
    pub reads: usize,
    /// Empty writes return `Ok` without touching the bus, as embassy-rp does.
    pub drop_empty_writes: bool,
    /// No device answers: every transfer that reaches the bus is NACKed.
    pub absent: bool,
}

impl FakeI2cPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a packet to be received later
    pub fn add_available_packet(&mut self, bytes: &[u8]) {
        self.available_packets.push_back(bytes.to_vec());
    }

    /// The next write succeeds.
    pub fn ack_next_write(&mut self) {
        self.write_errors.push_back(None);
    }

    /// The next write is not acknowledged by the device.
    pub fn nack_next_write(&mut self) {
        self.write_errors
            .push_back(Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)));
    }

    pub fn fail_next_write(&mut self, kind: ErrorKind) {
        self.write_errors.push_back(Some(kind));
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent_packets.iter().map(|p| p.bytes.clone()).collect()
    }

    pub fn traffic(&self) -> usize {
        self.sent_packets.len() + self.reads
    }
}

#[derive(Debug)]
pub struct FakeI2cError(pub ErrorKind);

impl embedded_hal_async::i2c::Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

impl ErrorType for FakeI2cPort {
    type Error = FakeI2cError;
}

impl I2c for FakeI2cPort {
    async fn read(&mut self, _address: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.reads += 1;
        if self.absent {
            return Err(FakeI2cError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)));
        }
        match self.available_packets.pop_front() {
            Some(packet) if packet.len() == buffer.len() => {
                buffer.copy_from_slice(&packet);
                Ok(())
            }
            _ => Err(FakeI2cError(ErrorKind::Other)),
        }
    }

    async fn write(&mut self, address: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() && self.drop_empty_writes {
            return Ok(());
        }
        self.sent_packets.push(FakePacket {
            addr: address,
            bytes: bytes.to_vec(),
        });
        if self.absent {
            return Err(FakeI2cError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)));
        }
        match self.write_errors.pop_front().flatten() {
            Some(kind) => Err(FakeI2cError(kind)),
            None => Ok(()),
        }
    }

    async fn write_read(
        &mut self,
        address: SevenBitAddress,
        send_buf: &[u8],
        recv_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write(address, send_buf).await?;
        self.read(address, recv_buf).await?;
        Ok(())
    }

    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations {
            match operation {
                Operation::Read(buffer) => self.read(address, buffer).await?,
                Operation::Write(bytes) => self.write(address, bytes).await?,
            }
        }
        Ok(())
    }
}
