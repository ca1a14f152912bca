mod control;
mod linux;
mod port_spec;

pub use self::control::{
	ControlLines,
	LineState,
};

pub use self::port_spec::{
	DEFAULT_PORT,
	PortSpec,
};

// OS-specific. for now linux only.
pub use self::linux::{
	DirectPort,
	Ppdev,
	open_direct,
	open_ppdev,
};

use std::io;

/// Write access to the registers of a parallel port.
///
/// Writes go straight to the hardware register; there is no buffering.
pub trait ParallelPort {
	fn write_data(&mut self, data: u8) -> io::Result<()>;
	fn write_control(&mut self, control: u8) -> io::Result<()>;
}

impl<'a, P: ?Sized + ParallelPort> ParallelPort for &'a mut P {
	fn write_data(&mut self, data: u8) -> io::Result<()> {
		P::write_data(*self, data)
	}
	fn write_control(&mut self, control: u8) -> io::Result<()> {
		P::write_control(*self, control)
	}
}

impl<P: ?Sized + ParallelPort> ParallelPort for Box<P> {
	fn write_data(&mut self, data: u8) -> io::Result<()> {
		P::write_data(self, data)
	}
	fn write_control(&mut self, control: u8) -> io::Result<()> {
		P::write_control(self, control)
	}
}

/// Open the port; it is released when the returned handle is dropped.
pub fn open_port(spec: &PortSpec) -> crate::AResult<Box<dyn ParallelPort>> {
	with_context!(("couldn't open parallel port {}", spec), {
		let port: Box<dyn ParallelPort> = match spec {
			PortSpec::Device(path) => Box::new(open_ppdev(path)?),
			PortSpec::Physical(base) => Box::new(open_direct(*base)?),
		};
		debug!("Opened parallel port {}", spec);
		Ok(port)
	})
}
