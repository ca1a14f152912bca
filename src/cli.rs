use std::ffi::OsString;
use std::path::PathBuf;

use clap::{
	App,
	ArgMatches,
};

use crate::image::MemorySize;
use crate::parport::PortSpec;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Options {
	pub port: PortSpec,
	pub size: MemorySize,
	pub file: PathBuf,
}

pub fn app() -> App<'static, 'static> {
	clap_app!(@app (app_from_crate!())
		(after_help: "File format is binary.")
		(@arg port: -p --port +takes_value
			"select either parport (e.g. /dev/parport0) or physical port (e.g. 0x378), default is /dev/parport0")
		(@arg size: -s --size +takes_value
			"memory size in bytes or kilobytes, must be power of 2, default is 65536")
		(@arg FILENAME: +required "binary image to write")
	)
}

fn get_param<T>(matches: &ArgMatches, name: &str, default: T) -> crate::AResult<T>
where
	T: std::str::FromStr<Err = failure::Error>,
{
	match matches.value_of(name) {
		Some(p) => p.parse::<T>(),
		None => Ok(default),
	}
}

impl Options {
	pub fn from_matches(matches: &ArgMatches) -> crate::AResult<Self> {
		let size = get_param(matches, "size", MemorySize::default())?;
		let port = get_param(matches, "port", PortSpec::default())?;
		let file = match matches.value_of_os("FILENAME") {
			Some(f) => PathBuf::from(f),
			None => bail!("missing parameter FILENAME"),
		};

		Ok(Options {
			port,
			size,
			file,
		})
	}

	/// Like `from_matches`, but reports `--help` and usage errors as errors
	/// instead of exiting.
	pub fn from_args<I, T>(args: I) -> crate::AResult<Self>
	where
		I: IntoIterator<Item = T>,
		T: Into<OsString> + Clone,
	{
		let matches = app().get_matches_from_safe(args)?;
		Self::from_matches(&matches)
	}
}

#[cfg(test)]
mod test {
	use std::path::PathBuf;

	use super::Options;
	use crate::image::MemorySize;
	use crate::parport::PortSpec;

	#[test]
	fn defaults() {
		let options = Options::from_args(vec!["lpt-eeprom-flash", "image.bin"]).unwrap();
		assert_eq!(options, Options {
			port: PortSpec::Device("/dev/parport0".into()),
			size: MemorySize::new(65536).unwrap(),
			file: PathBuf::from("image.bin"),
		});
	}

	#[test]
	fn short_and_long_options() {
		let options = Options::from_args(vec!["lpt-eeprom-flash", "-p", "0x378", "-s", "32", "rom.bin"]).unwrap();
		assert_eq!(options.port, PortSpec::Physical(0x378));
		assert_eq!(options.size.bytes(), 32 * 1024);

		let options = Options::from_args(vec!["lpt-eeprom-flash", "--port=/dev/parport1", "--size", "8192", "rom.bin"]).unwrap();
		assert_eq!(options.port, PortSpec::Device("/dev/parport1".into()));
		assert_eq!(options.size.bytes(), 8192);
	}

	#[test]
	fn invalid_size_rejected() {
		let e = Options::from_args(vec!["lpt-eeprom-flash", "-s", "100", "rom.bin"]).unwrap_err();
		assert!(e.to_string().starts_with("Invalid size '100'"), "{}", e);
		assert!(Options::from_args(vec!["lpt-eeprom-flash", "-s", "131072", "rom.bin"]).is_err());
	}

	#[test]
	fn missing_filename() {
		assert!(Options::from_args(vec!["lpt-eeprom-flash"]).is_err());
		assert!(Options::from_args(vec!["lpt-eeprom-flash", "-s", "64"]).is_err());
	}
}
