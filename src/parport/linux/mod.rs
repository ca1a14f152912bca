mod direct;
mod ppdev;

pub use self::direct::{
	DirectPort,
	open_direct,
};

pub use self::ppdev::{
	Ppdev,
	open_ppdev,
};
