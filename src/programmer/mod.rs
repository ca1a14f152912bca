//! Bit-banged EEPROM/flash programmer on a PC parallel port.
//!
//! The data lines carry both address and payload bytes. Two external 8-bit
//! latches hold the address; each is loaded on the rising edge of its
//! (inverted) enable line:
//! - AUTOFD: low address latch enable
//! - INIT: high address latch enable
//! - STROBE: writes the data lines to the device at the latched address
//! - SELECT: program enable, held for the whole session
//!
//! Every operation presents a byte on the data lines, moves the control
//! register into an "open" state and then back to `LineState::Idle`.

mod progress;

use std::fmt;
use std::io;

use failure::Fail;

use crate::image::Image;
use crate::parport::{
	LineState,
	ParallelPort,
};

pub use self::progress::{
	ConsoleProgress,
	NoProgress,
	Progress,
};

/// Addresses per progress report
const PROGRESS_INTERVAL: usize = 1024;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Step {
	ClearData,
	Enable,
	LatchHigh,
	LatchLow,
	Strobe,
	Disable,
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			Step::ClearData => "clearing data lines",
			Step::Enable => "program enable",
			Step::LatchHigh => "latching high address byte",
			Step::LatchLow => "latching low address byte",
			Step::Strobe => "data strobe",
			Step::Disable => "program disable",
		};
		f.write_str(name)
	}
}

/// A register write failed; the transfer was aborted.
#[derive(Debug, Fail)]
#[fail(display = "{} failed at address 0x{:04x}: {}", step, address, cause)]
pub struct TransferError {
	pub step: Step,
	pub address: u16,
	#[cause]
	pub cause: io::Error,
}

pub struct Programmer<P: ParallelPort> {
	port: P,
	// high address byte currently held by the external latch, if known
	latched_high: Option<u8>,
}

impl<P: ParallelPort> Programmer<P> {
	pub fn new(port: P) -> Self {
		Programmer {
			port,
			latched_high: None,
		}
	}

	pub fn port(&self) -> &P {
		&self.port
	}

	pub fn into_port(self) -> P {
		self.port
	}

	fn set_lines(&mut self, state: LineState) -> io::Result<()> {
		self.port.write_control(state.bits())
	}

	/// Present `data` and cycle the control lines through `open` and back
	/// to idle.
	fn pulse(&mut self, data: u8, open: LineState) -> io::Result<()> {
		let res = (|| {
			self.port.write_data(data)?;
			self.set_lines(open)?;
			self.set_lines(LineState::Idle)
		})();
		if res.is_err() {
			// the latches may hold anything now
			self.latched_high = None;
		}
		res
	}

	/// Enter programming mode. The session leaves it again when it is
	/// disabled or dropped.
	pub fn enable(&mut self) -> io::Result<Session<P>> {
		self.latched_high = None;
		self.set_lines(LineState::Idle)?;
		Ok(Session {
			programmer: self,
			active: true,
		})
	}

	/// Program the whole address space, repeating `image` as needed.
	pub fn write_image<G: Progress>(&mut self, image: &Image, mut progress: G) -> Result<(), TransferError> {
		let fail = |step: Step, address: u16| move |cause: io::Error| TransferError { step, address, cause };

		self.port.write_data(0).map_err(fail(Step::ClearData, 0))?;

		let mut session = self.enable().map_err(fail(Step::Enable, 0))?;

		for address in 0..=0xffffu16 {
			if address as usize % PROGRESS_INTERVAL == 0 {
				progress.kilobytes_written(address as usize / 1024);
			}

			let high = (address >> 8) as u8;
			let low = address as u8;

			if low == 0 || session.latched_high() != Some(high) {
				session.latch_high(high).map_err(fail(Step::LatchHigh, address))?;
			}
			session.latch_low(low).map_err(fail(Step::LatchLow, address))?;
			session.strobe(image.byte_at(address)).map_err(fail(Step::Strobe, address))?;
		}

		session.disable().map_err(fail(Step::Disable, 0xffff))?;
		progress.complete();

		Ok(())
	}
}

/// Programming mode is active while this exists.
pub struct Session<'a, P: ParallelPort> {
	programmer: &'a mut Programmer<P>,
	active: bool,
}

impl<'a, P: ParallelPort> Session<'a, P> {
	pub fn latched_high(&self) -> Option<u8> {
		self.programmer.latched_high
	}

	pub fn latch_low(&mut self, address_low: u8) -> io::Result<()> {
		self.programmer.pulse(address_low, LineState::LatchLowOpen)
	}

	pub fn latch_high(&mut self, address_high: u8) -> io::Result<()> {
		self.programmer.pulse(address_high, LineState::LatchHighOpen)?;
		self.programmer.latched_high = Some(address_high);
		Ok(())
	}

	pub fn strobe(&mut self, data: u8) -> io::Result<()> {
		self.programmer.pulse(data, LineState::StrobeAsserted)
	}

	/// Leave programming mode.
	pub fn disable(mut self) -> io::Result<()> {
		self.active = false;
		self.programmer.set_lines(LineState::Disabled)
	}
}

impl<'a, P: ParallelPort> Drop for Session<'a, P> {
	fn drop(&mut self) {
		if self.active {
			warn!("Leaving programming mode early");
			if let Err(e) = self.programmer.set_lines(LineState::Disabled) {
				error!("Couldn't disable programming mode: {}", e);
			}
		}
	}
}
