//! We use this mocking module in unit tests to emulate the sensor's serial port.

/// Our mock type used to emulate a serial port.
pub struct MockSerial {
    /// Buffer to store data written to the mock serial port
    write_buffer: heapless::Vec<u8, 256>,
    /// Buffer containing pre-configured response data to be read
    read_buffer: heapless::Vec<u8, 512>,
    /// Current position in the read buffer
    read_position: usize,
    /// Number of times flush() succeeded
    flushes: usize,
    /// Flag to simulate write errors
    should_error_on_write: bool,
    /// Flag to simulate read errors
    should_error_on_read: bool,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MockSerialError {
    /// No more data before the read timeout, also returned once the read buffer is exhausted
    #[error("Simulated read timeout")]
    Timeout,
    /// Simulated buffer overflow
    #[error("Simulated buffer overflow")]
    BufferOverflow,
    /// Generic simulated error for testing
    #[error("Simulated serial error")]
    SimulatedError,
}

impl embedded_io::Error for MockSerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            MockSerialError::Timeout => embedded_io::ErrorKind::TimedOut,
            MockSerialError::BufferOverflow => embedded_io::ErrorKind::OutOfMemory,
            MockSerialError::SimulatedError => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = MockSerialError;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.should_error_on_write {
            return Err(MockSerialError::SimulatedError);
        }

        self.write_buffer
            .extend_from_slice(buf)
            .map_err(|_| MockSerialError::BufferOverflow)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.should_error_on_write {
            return Err(MockSerialError::SimulatedError);
        }
        self.flushes += 1;
        Ok(())
    }
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.should_error_on_read {
            return Err(MockSerialError::SimulatedError);
        }

        if self.read_position >= self.read_buffer.len() {
            return Err(MockSerialError::Timeout);
        }

        let available_bytes = self.read_buffer.len() - self.read_position;
        let bytes_to_read = core::cmp::min(buf.len(), available_bytes);

        buf[..bytes_to_read].copy_from_slice(
            &self.read_buffer[self.read_position..self.read_position + bytes_to_read],
        );

        self.read_position += bytes_to_read;
        Ok(bytes_to_read)
    }
}

impl MockSerial {
    /// Create a new MockSerial instance with empty buffers
    pub fn new() -> Self {
        Self {
            write_buffer: heapless::Vec::new(),
            read_buffer: heapless::Vec::new(),
            read_position: 0,
            flushes: 0,
            should_error_on_write: false,
            should_error_on_read: false,
        }
    }

    /// Set the data that will be returned when read() is called
    pub fn set_read_data(&mut self, data: &[u8]) -> Result<(), MockSerialError> {
        self.read_buffer.clear();
        self.read_position = 0;
        self.push_read_data(data)
    }

    /// Queue more data behind whatever is still unread
    pub fn push_read_data(&mut self, data: &[u8]) -> Result<(), MockSerialError> {
        self.read_buffer
            .extend_from_slice(data)
            .map_err(|_| MockSerialError::BufferOverflow)
    }

    /// Bytes queued but not read yet
    pub fn unread(&self) -> &[u8] {
        &self.read_buffer[self.read_position..]
    }

    /// Get a reference to the data that was written to this mock serial port
    pub fn written_data(&self) -> &[u8] {
        &self.write_buffer
    }

    /// Clear the write buffer
    pub fn clear_written_data(&mut self) {
        self.write_buffer.clear();
    }

    /// How many times the port was flushed
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Configure whether write operations should fail with an error
    pub fn set_write_error(&mut self, should_error: bool) {
        self.should_error_on_write = should_error;
    }

    /// Configure whether read operations should fail with an error
    pub fn set_read_error(&mut self, should_error: bool) {
        self.should_error_on_read = should_error;
    }
}

/// Delay which only records how long it was asked to wait.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Every requested delay, in nanoseconds
    pub waits_ns: heapless::Vec<u32, 16>,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns
            .push(ns)
            .expect("MockDelay records at most 16 delays");
    }
}

impl MockDelay {
    /// Total time waited, in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.waits_ns.iter().map(|&ns| ns as u64).sum::<u64>() / 1_000_000
    }
}

/// Build a well formed response with a correct checksum.
pub fn response_frame(address: u8, command: u8, payload: &[u8]) -> heapless::Vec<u8, 64> {
    let mut frame: heapless::Vec<u8, 64> = heapless::Vec::new();
    frame.push(address).unwrap();
    frame.push(command).unwrap();
    frame.push(payload.len() as u8).unwrap();
    frame.extend_from_slice(payload).unwrap();
    let checksum = crate::crc::to_wire(crate::crc::compute(&frame));
    frame.extend_from_slice(&checksum).unwrap();
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;
    use embedded_io::{Error, Read, Write};

    #[test]
    fn test_new_mock_serial() {
        let mock = MockSerial::new();
        assert_eq!(mock.written_data().len(), 0);
        assert_eq!(mock.read_position, 0);
        assert!(!mock.should_error_on_write);
        assert!(!mock.should_error_on_read);
    }

    #[test]
    fn test_write_data() {
        let mut mock = MockSerial::new();
        let request = [0x15, 0x04, 0x13, 0x8A, 0x00, 0x01, 0x17, 0xB0];

        let result = mock.write(&request);
        assert_eq!(result, Ok(request.len()));
        assert_eq!(mock.written_data(), &request);
    }

    #[test]
    fn test_write_buffer_overflow() {
        let mut mock = MockSerial::new();
        let large_data = [0u8; 300];

        let result = mock.write(&large_data);
        assert_eq!(result, Err(MockSerialError::BufferOverflow));
    }

    #[test]
    fn test_flush_is_counted() {
        let mut mock = MockSerial::new();
        assert!(mock.flush().is_ok());
        assert!(mock.flush().is_ok());
        assert_eq!(mock.flush_count(), 2);
    }

    #[test]
    fn test_read_multiple_calls() {
        let mut mock = MockSerial::new();
        mock.set_read_data(&[0x15, 0x04, 0x02, 0x02, 0x58]).unwrap();

        let mut header = [0u8; 3];
        let mut payload = [0u8; 2];
        assert_eq!(mock.read(&mut header), Ok(3));
        assert_eq!(mock.read(&mut payload), Ok(2));
        assert_eq!(header, [0x15, 0x04, 0x02]);
        assert_eq!(payload, [0x02, 0x58]);
    }

    #[test]
    fn test_read_timeout_after_data_exhausted() {
        let mut mock = MockSerial::new();
        mock.set_read_data(b"Hi").unwrap();

        let mut buffer = [0u8; 10];
        assert_eq!(mock.read(&mut buffer), Ok(2));

        let err = mock.read(&mut buffer).unwrap_err();
        assert_eq!(err, MockSerialError::Timeout);
        assert_eq!(err.kind(), embedded_io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_push_read_data_queues_behind() {
        let mut mock = MockSerial::new();
        mock.set_read_data(&[1, 2]).unwrap();
        mock.push_read_data(&[3]).unwrap();

        let mut buffer = [0u8; 1];
        mock.read(&mut buffer).unwrap();
        assert_eq!(mock.unread(), &[2, 3]);
    }

    #[test]
    fn test_set_read_data_clears_previous() {
        let mut mock = MockSerial::new();
        mock.set_read_data(b"first").unwrap();
        mock.set_read_data(b"second").unwrap();
        assert_eq!(mock.unread(), b"second");
    }

    #[test]
    fn test_error_simulation() {
        let mut mock = MockSerial::new();
        mock.set_write_error(true);
        assert_eq!(mock.write(b"test"), Err(MockSerialError::SimulatedError));
        assert_eq!(mock.flush(), Err(MockSerialError::SimulatedError));
        assert!(mock.written_data().is_empty());

        mock.set_write_error(false);
        mock.write(b"test").unwrap();
        mock.clear_written_data();
        assert!(mock.written_data().is_empty());

        mock.set_read_data(b"data").unwrap();
        mock.set_read_error(true);
        let mut buffer = [0u8; 4];
        assert_eq!(mock.read(&mut buffer), Err(MockSerialError::SimulatedError));
        mock.set_read_error(false);
        assert_eq!(mock.read(&mut buffer), Ok(4));
    }

    #[test]
    fn test_response_frame() {
        assert_eq!(
            response_frame(0x15, 0x04, &[0x02, 0x58]).as_slice(),
            &[0x15, 0x04, 0x02, 0x02, 0x58, 0x89, 0xA9]
        );
    }

    #[test]
    fn test_error_is_a_core_error() {
        fn kind_of<E: embedded_io::Error + core::error::Error>(err: &E) -> embedded_io::ErrorKind {
            err.kind()
        }
        assert_eq!(
            kind_of(&MockSerialError::BufferOverflow),
            embedded_io::ErrorKind::OutOfMemory
        );
    }

    #[test]
    fn test_mock_delay_records() {
        let mut delay = MockDelay::default();
        delay.delay_ms(100);
        delay.delay_ms(50);
        assert_eq!(delay.total_ms(), 150);
    }
}
