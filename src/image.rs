use std::fmt;
use std::fs;
use std::io::{
	self,
	Read,
};
use std::path::Path;
use std::str;

/// Number of addressable locations on the target device
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Erased EEPROM/flash cells read as all ones
pub const ERASED: u8 = 0xff;

/// Values up to this are taken as kilobytes
const KILOBYTE_LIMIT: u64 = 64;

/// Payload size: a power of two, at most the full address space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct MemorySize(usize);

impl MemorySize {
	pub fn new(bytes: usize) -> crate::AResult<Self> {
		ensure!(bytes.is_power_of_two(), "memory size {} is not a power of 2", bytes);
		ensure!(bytes <= ADDRESS_SPACE, "memory size {} exceeds {} bytes", bytes, ADDRESS_SPACE);
		Ok(MemorySize(bytes))
	}

	pub fn bytes(self) -> usize {
		self.0
	}
}

impl Default for MemorySize {
	fn default() -> Self {
		MemorySize(ADDRESS_SPACE)
	}
}

impl fmt::Display for MemorySize {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.0 >= 1024 {
			write!(f, "{} kB", self.0 / 1024)
		} else {
			write!(f, "{} bytes", self.0)
		}
	}
}

/// Parses the command line notation: bytes, or kilobytes for values up to 64.
impl str::FromStr for MemorySize {
	type Err = ::failure::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		with_context!(("Invalid size '{}'", s), {
			let value = crate::parse_c_ulong(s)?;
			ensure!(value <= ADDRESS_SPACE as u64, "larger than {}", ADDRESS_SPACE);
			ensure!(value.is_power_of_two(), "not a power of 2");
			let bytes = if value <= KILOBYTE_LIMIT { value * 1024 } else { value };
			MemorySize::new(bytes as usize)
		})
	}
}

/// Contents to program, exactly one `MemorySize` long.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
	data: Vec<u8>,
}

impl Image {
	/// Reads at most `size` bytes; a short input is padded with `ERASED`.
	pub fn read_from<R: Read>(reader: R, size: MemorySize) -> io::Result<Self> {
		let mut data = Vec::with_capacity(size.bytes());
		let mut reader = reader.take(size.bytes() as u64);
		let len = reader.read_to_end(&mut data)?;
		if len < size.bytes() {
			debug!("Padding {} bytes of input to {}", len, size);
		}
		data.resize(size.bytes(), ERASED);

		let mut rest = [0u8];
		if reader.into_inner().read(&mut rest)? != 0 {
			warn!("Input larger than {}, ignoring the remainder", size);
		}

		Ok(Image { data })
	}

	pub fn load(path: &Path, size: MemorySize) -> crate::AResult<Self> {
		with_context!(("{}", path.display()), {
			let file = fs::File::open(path)?;
			Ok(Image::read_from(file, size)?)
		})
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	/// Byte for a device address; smaller images repeat across the device.
	pub fn byte_at(&self, address: u16) -> u8 {
		self.data[address as usize % self.data.len()]
	}
}

impl fmt::Debug for Image {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Image")
			.field("len", &self.data.len())
			.finish()
	}
}
