use std::fmt;
use std::path::PathBuf;
use std::str;

pub const DEFAULT_PORT: &str = "/dev/parport0";

/// Either a ppdev character device or the I/O base address of a port.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum PortSpec {
	Device(PathBuf),
	Physical(u16),
}

impl Default for PortSpec {
	fn default() -> Self {
		PortSpec::Device(DEFAULT_PORT.into())
	}
}

impl fmt::Display for PortSpec {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			PortSpec::Device(path) => write!(f, "{}", path.display()),
			PortSpec::Physical(base) => write!(f, "0x{:03x}", base),
		}
	}
}

impl str::FromStr for PortSpec {
	type Err = ::failure::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ensure!(!s.is_empty(), "empty parallel port name");

		match crate::parse_c_ulong(s) {
			Ok(base) => {
				ensure!(base > 0 && base <= 0xffff - 2, "invalid parallel port address: {}", s);
				Ok(PortSpec::Physical(base as u16))
			},
			Err(_) => Ok(PortSpec::Device(s.into())),
		}
	}
}
