#[macro_use]
extern crate log;

extern crate lpt_eeprom_flash;
use lpt_eeprom_flash::*;

use std::process::exit;

use lpt_eeprom_flash::cli::Options;
use lpt_eeprom_flash::image::Image;
use lpt_eeprom_flash::programmer::{
	ConsoleProgress,
	Programmer,
};

fn main_app(matches: &clap::ArgMatches) -> AResult<()> {
	let options = Options::from_matches(matches)?;

	info!("{}", options.file.display());
	let image = Image::load(&options.file, options.size)?;
	debug!("Loaded {} bytes for a {} device", image.len(), options.size);

	let port = parport::open_port(&options.port)?;
	let mut programmer = Programmer::new(port);
	programmer.write_image(&image, ConsoleProgress::new())?;

	Ok(())
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let matches = cli::app().get_matches();
	if let Err(e) = main_app(&matches) {
		error!("Error: {}", e);
		exit(1);
	}
}
