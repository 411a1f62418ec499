use std::{env, process, thread, time::Duration};

use inquire::Select;
use serialport::SerialPort;
use t67xx::{
    LogDiagnostics, T67xx,
    config::{BAUD_RATE, Config},
};

// The sensor answers well within this, a read that takes longer means it's not there.
const SERIAL_TIMEOUT_MS: u64 = 500;
const SAMPLE_COUNT: usize = 5;
const SAMPLE_INTERVAL_MS: u64 = 2000;

pub struct PortWrapper(Box<dyn SerialPort>);

#[derive(Debug)]
pub struct IoError(std::io::Error);

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self.0.kind() {
            std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::NotConnected => embedded_io::ErrorKind::NotConnected,
            std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
            std::io::ErrorKind::InvalidInput => embedded_io::ErrorKind::InvalidInput,
            std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
            std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
            std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
            std::io::ErrorKind::Unsupported => embedded_io::ErrorKind::Unsupported,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for PortWrapper {
    type Error = IoError;
}

impl embedded_io::Read for PortWrapper {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(&mut self.0, buf).map_err(IoError)
    }
}

impl embedded_io::Write for PortWrapper {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(IoError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(IoError)
    }
}

/// Blocking delay backed by the OS scheduler.
pub struct StdDelay;

impl embedded_hal::delay::DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}

fn main() {
    env_logger::init();

    // Get serial port from command line arg or interactive selection
    let port_name = env::args().nth(1).unwrap_or_else(|| {
        let ports = serialport::available_ports().expect("Failed to enumerate serial ports");

        if ports.is_empty() {
            eprintln!("No serial ports found!");
            process::exit(1);
        }

        let port_names: Vec<String> = ports.iter().map(|p| p.port_name.clone()).collect();

        Select::new("Select a serial port:", port_names)
            .prompt()
            .expect("Failed to select port")
    });

    println!("Using port: {}", port_name);

    // 19200 8E1
    let port = match serialport::new(&port_name, BAUD_RATE)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::Even)
        .stop_bits(serialport::StopBits::One)
        .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
        .open()
    {
        Ok(port) => port,
        Err(err) => {
            eprintln!("Failed to open {}: {}", port_name, err);
            process::exit(1);
        }
    };

    let mut sensor = T67xx::with_config(
        PortWrapper(port),
        StdDelay,
        Config::default(),
        LogDiagnostics,
    );

    match sensor.read_status_flags() {
        Ok(flags) => {
            println!("Status: 0x{:04X}", flags.raw());
            println!("{:#?}", flags);
            if flags.warmup_mode() {
                println!("Sensor is warming up, readings may be off.");
            }
        }
        Err(err) => eprintln!("Failed to read status: {}", err),
    }

    for _ in 0..SAMPLE_COUNT {
        match sensor.read_co2() {
            Ok(ppm) => println!("CO2: {} ppm", ppm),
            Err(err) => eprintln!("Failed to read CO2: {}", err),
        }
        thread::sleep(Duration::from_millis(SAMPLE_INTERVAL_MS));
    }
}
