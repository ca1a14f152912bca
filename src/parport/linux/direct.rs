use std::io;

use crate::parport::ParallelPort;

const DATA_REGISTER: u16 = 0;
const CONTROL_REGISTER: u16 = 2;
const REGISTER_COUNT: u16 = 3;

/// Parallel port driven through raw I/O port access (needs CAP_SYS_RAWIO).
#[derive(Debug)]
pub struct DirectPort {
	base: u16,
}

impl DirectPort {
	pub fn base(&self) -> u16 {
		self.base
	}
}

impl Drop for DirectPort {
	fn drop(&mut self) {
		if let Err(e) = sys::set_permission(self.base, false) {
			warn!("Couldn't drop I/O permission for port 0x{:03x}: {}", self.base, e);
		}
	}
}

impl ParallelPort for DirectPort {
	fn write_data(&mut self, data: u8) -> io::Result<()> {
		unsafe { sys::outb(self.base + DATA_REGISTER, data) };
		Ok(())
	}

	fn write_control(&mut self, control: u8) -> io::Result<()> {
		unsafe { sys::outb(self.base + CONTROL_REGISTER, control) };
		Ok(())
	}
}

pub fn open_direct(base: u16) -> io::Result<DirectPort> {
	if base.checked_add(REGISTER_COUNT).is_none() {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, "port address out of range"));
	}
	sys::set_permission(base, true)?;
	Ok(DirectPort { base })
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod sys {
	use std::arch::asm;
	use std::io;

	use libc::{
		c_int,
		c_ulong,
		ioperm,
	};

	pub fn set_permission(base: u16, enable: bool) -> io::Result<()> {
		let res = unsafe {
			ioperm(base as c_ulong, super::REGISTER_COUNT as c_ulong, enable as c_int)
		};
		if -1 == res {
			return Err(io::Error::last_os_error());
		}
		Ok(())
	}

	/// Safety: the calling thread needs I/O permission for `port`.
	#[inline]
	pub unsafe fn outb(port: u16, value: u8) {
		asm!(
			"out dx, al",
			in("dx") port,
			in("al") value,
			options(nomem, nostack, preserves_flags)
		);
	}
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
mod sys {
	use std::io;

	pub fn set_permission(_base: u16, _enable: bool) -> io::Result<()> {
		Err(io::Error::new(io::ErrorKind::Other, "direct port I/O is only supported on x86"))
	}

	pub unsafe fn outb(_port: u16, _value: u8) {
		unreachable!("no DirectPort without I/O permission");
	}
}
