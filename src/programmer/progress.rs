use std::io::{
	self,
	Write,
};

/// Receives coarse progress of a transfer; never influences the protocol.
pub trait Progress {
	fn kilobytes_written(&mut self, kilobytes: usize);

	fn complete(&mut self) {
	}
}

impl<'a, P: ?Sized + Progress> Progress for &'a mut P {
	fn kilobytes_written(&mut self, kilobytes: usize) {
		P::kilobytes_written(*self, kilobytes)
	}

	fn complete(&mut self) {
		P::complete(*self)
	}
}

pub struct NoProgress;

impl Progress for NoProgress {
	fn kilobytes_written(&mut self, _kilobytes: usize) {
	}
}

/// Rewrites a single status line on stdout.
pub struct ConsoleProgress {
	stdout: io::Stdout,
}

impl ConsoleProgress {
	pub fn new() -> Self {
		ConsoleProgress {
			stdout: io::stdout(),
		}
	}
}

impl Default for ConsoleProgress {
	fn default() -> Self {
		Self::new()
	}
}

impl Progress for ConsoleProgress {
	fn kilobytes_written(&mut self, kilobytes: usize) {
		let mut out = self.stdout.lock();
		// progress output is best effort
		let _ = write!(out, "\rWriting {} kB...", kilobytes);
		let _ = out.flush();
	}

	fn complete(&mut self) {
		let _ = writeln!(self.stdout.lock(), "\nWrite complete");
	}
}
