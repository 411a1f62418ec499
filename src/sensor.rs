use embedded_hal::delay::DelayNs;

use crate::{
    config::{Config, READ_INPUT_REGISTERS, SLAVE_ADDRESS},
    diagnostics::Diagnostics,
    error::{Error, Result},
    frame::{self, Request},
    register::{Register, StatusFlags},
};

/// You can create a T67xx using any interface which implements [embedded_io::Read] & [embedded_io::Write].
///
/// Every read is a complete, independent transaction: request out, wait, response in, checksum
/// checked, value decoded. Nothing is carried over between calls.
///
/// The link is half duplex without transaction ids. Don't share one sensor between threads without
/// wrapping it in a mutex; there is no locking in here.
pub struct T67xx<S, D, G = ()>
where
    S: embedded_io::Read + embedded_io::Write,
    D: DelayNs,
    G: Diagnostics,
{
    interface: S,
    delay: D,
    config: Config,
    diagnostics: G,
}

impl<S, D> T67xx<S, D>
where
    S: embedded_io::Read + embedded_io::Write,
    D: DelayNs,
{
    /// Create a new T67xx with the default response delay and no diagnostics.
    ///
    /// The interface must already be configured for 19200 baud, 8 data bits, even parity and
    /// 1 stop bit, with a finite read timeout.
    pub fn new(interface: S, delay: D) -> Self {
        Self::with_config(interface, delay, Config::default(), ())
    }
}

impl<S, D, G> T67xx<S, D, G>
where
    S: embedded_io::Read + embedded_io::Write,
    D: DelayNs,
    G: Diagnostics,
{
    /// Create a new T67xx with an explicit response delay and diagnostics sink.
    pub fn with_config(interface: S, delay: D, config: Config, diagnostics: G) -> Self {
        Self {
            interface,
            delay,
            config,
            diagnostics,
        }
    }

    /// Return the raw status bit flags.
    ///
    /// See [Self::read_status_flags] for the decoded version.
    pub fn read_status(&mut self) -> Result<u16, S::Error> {
        self.read_register(Register::Status)
    }

    /// Return the status register decoded into its named flags.
    pub fn read_status_flags(&mut self) -> Result<StatusFlags, S::Error> {
        let raw = self.read_status()?;
        Ok(StatusFlags::from(raw))
    }

    /// Return the measured CO2 concentration in ppm.
    pub fn read_co2(&mut self) -> Result<u16, S::Error> {
        self.read_register(Register::GasPpm)
    }

    /// Read a single input register from the sensor.
    pub fn read_register(&mut self, register: Register) -> Result<u16, S::Error> {
        let request = Request::new(
            SLAVE_ADDRESS,
            READ_INPUT_REGISTERS,
            register.address(),
            register.count(),
        );
        self.send(&request)?;

        // No "ready" signal from the sensor, give it time to fill its output buffer.
        self.delay.delay_ms(self.config.response_delay.to_millis());

        let header = frame::read_header(&mut self.interface)?;
        let body = frame::read_body(&mut self.interface, header.payload_len())?;
        self.diagnostics.response_received(&header.to_bytes(), &body);

        let diagnostics = &mut self.diagnostics;
        let payload = frame::validate(&header, &body).inspect_err(|err| {
            diagnostics.checksum_mismatch(err);
        })?;

        if header.address != SLAVE_ADDRESS {
            return Err(Error::UnexpectedResponse {
                address: header.address,
                command: header.command,
            });
        }
        if header.is_exception() {
            return Err(Error::Exception(header.length));
        }
        if header.command != READ_INPUT_REGISTERS {
            return Err(Error::UnexpectedResponse {
                address: header.address,
                command: header.command,
            });
        }

        let value = frame::decode_u16(payload).ok_or(Error::PayloadTooShort(payload.len()))?;
        self.diagnostics.value_decoded(register, value);
        Ok(value)
    }

    /// The configuration this sensor was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the serial interface and delay.
    pub fn release(self) -> (S, D) {
        (self.interface, self.delay)
    }

    fn send(&mut self, request: &Request) -> Result<(), S::Error> {
        self.interface
            .write_all(request.as_bytes())
            .map_err(Error::SerialError)?;
        self.interface.flush().map_err(Error::SerialError)?;
        self.diagnostics.request_sent(request.as_bytes());
        Ok(())
    }
}
