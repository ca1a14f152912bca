use std::fs;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{
	Path,
	PathBuf,
};

use libc::{
	c_int,
	c_ulong,
	c_void,
	ioctl,
};

use crate::parport::ParallelPort;

// <linux/ppdev.h>; type 'p'
const PP_IOCTL: c_ulong = b'p' as c_ulong;

const fn pp_io(nr: c_ulong) -> c_ulong {
	PP_IOCTL << 8 | nr
}

const fn pp_iow_u8(nr: c_ulong) -> c_ulong {
	// _IOC_WRITE, size 1
	1 << 30 | 1 << 16 | PP_IOCTL << 8 | nr
}

const PPWCONTROL: c_ulong = pp_iow_u8(0x84);
const PPWDATA: c_ulong = pp_iow_u8(0x86);
const PPCLAIM: c_ulong = pp_io(0x8b);
const PPRELEASE: c_ulong = pp_io(0x8c);

/// Parallel port claimed through the kernel's ppdev driver.
#[derive(Debug)]
pub struct Ppdev {
	file: fs::File,
	path: PathBuf,
}

impl Ppdev {
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn ioctl(&self, request: c_ulong, arg: *mut c_void) -> io::Result<()> {
		let res: c_int = unsafe { ioctl(self.file.as_raw_fd(), request as _, arg) };
		if -1 == res {
			return Err(io::Error::last_os_error());
		}
		Ok(())
	}

	fn write_register(&mut self, request: c_ulong, mut value: u8) -> io::Result<()> {
		self.ioctl(request, &mut value as *mut u8 as *mut c_void)
	}
}

impl Drop for Ppdev {
	fn drop(&mut self) {
		if let Err(e) = self.ioctl(PPRELEASE, std::ptr::null_mut()) {
			warn!("Couldn't release parallel port {}: {}", self.path.display(), e);
		}
	}
}

impl ParallelPort for Ppdev {
	fn write_data(&mut self, data: u8) -> io::Result<()> {
		self.write_register(PPWDATA, data)
	}

	fn write_control(&mut self, control: u8) -> io::Result<()> {
		self.write_register(PPWCONTROL, control)
	}
}

pub fn open_ppdev(path: &Path) -> io::Result<Ppdev> {
	let file = fs::OpenOptions::new()
		.read(true)
		.write(true)
		.open(path)?;

	let res: c_int = unsafe { ioctl(file.as_raw_fd(), PPCLAIM as _) };
	if -1 == res {
		return Err(io::Error::last_os_error());
	}

	Ok(Ppdev {
		file,
		path: path.to_owned(),
	})
}
