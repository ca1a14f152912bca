use std::fmt;

// PC parallel port control register bits
const CONTROL_STROBE: u8 = 0x01;
const CONTROL_AUTOFD: u8 = 0x02;
const CONTROL_INIT:   u8 = 0x04;
const CONTROL_SELECT: u8 = 0x08;

/// Logical programmer lines as wired to the control register.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlLines(pub u8);

impl ControlLines {
	pub const NONE: ControlLines = ControlLines(0);
	/// clocks the byte on the data lines into the target device
	pub const DATA_STROBE: ControlLines = ControlLines(CONTROL_STROBE);
	/// low address latch enable (inverted)
	pub const ADDR_LOW_INV: ControlLines = ControlLines(CONTROL_AUTOFD);
	/// high address latch enable (inverted)
	pub const ADDR_HIGH_INV: ControlLines = ControlLines(CONTROL_INIT);
	/// program enable, held for the whole session
	pub const PROGRAM: ControlLines = ControlLines(CONTROL_SELECT);

	pub fn bits(self) -> u8 {
		self.0
	}

	pub fn contains(self, other: ControlLines) -> bool {
		self.0 & other.0 == other.0
	}
}

impl std::ops::BitOr for ControlLines {
	type Output = ControlLines;

	fn bitor(self, rhs: ControlLines) -> ControlLines {
		ControlLines(self.0 | rhs.0)
	}
}

impl fmt::Debug for ControlLines {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("ControlLines")
			.field("program", &self.contains(Self::PROGRAM))
			.field("addr_low_inv", &self.contains(Self::ADDR_LOW_INV))
			.field("addr_high_inv", &self.contains(Self::ADDR_HIGH_INV))
			.field("data_strobe", &self.contains(Self::DATA_STROBE))
			.finish()
	}
}

/// Every control register state the programming protocol passes through.
///
/// Closing a latch and deasserting the data strobe both return to `Idle`;
/// the rising edge on the latch enable (or the falling edge on the strobe)
/// is what the external hardware reacts to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum LineState {
	/// program enable dropped, both latches closed
	Disabled,
	/// programming, both latches closed, strobe released
	Idle,
	LatchLowOpen,
	LatchHighOpen,
	StrobeAsserted,
}

impl LineState {
	pub const ALL: [LineState; 5] = [
		LineState::Disabled,
		LineState::Idle,
		LineState::LatchLowOpen,
		LineState::LatchHighOpen,
		LineState::StrobeAsserted,
	];

	pub fn lines(self) -> ControlLines {
		use self::ControlLines as L;

		match self {
			LineState::Disabled => L::ADDR_LOW_INV | L::ADDR_HIGH_INV,
			LineState::Idle => L::PROGRAM | L::ADDR_LOW_INV | L::ADDR_HIGH_INV,
			LineState::LatchLowOpen => L::PROGRAM | L::ADDR_HIGH_INV,
			LineState::LatchHighOpen => L::PROGRAM | L::ADDR_LOW_INV,
			LineState::StrobeAsserted => L::PROGRAM | L::ADDR_LOW_INV | L::ADDR_HIGH_INV | L::DATA_STROBE,
		}
	}

	/// Control register value for this state
	pub fn bits(self) -> u8 {
		self.lines().bits()
	}

	/// Reverse mapping, mostly useful to decode recorded register writes.
	pub fn from_bits(bits: u8) -> Option<LineState> {
		LineState::ALL.iter().cloned().find(|s| s.bits() == bits)
	}
}

#[cfg(test)]
mod test {
	use super::{
		ControlLines,
		LineState,
	};

	#[test]
	fn register_encoding() {
		assert_eq!(LineState::Disabled.bits(), 0x06);
		assert_eq!(LineState::Idle.bits(), 0x0e);
		assert_eq!(LineState::LatchLowOpen.bits(), 0x0c);
		assert_eq!(LineState::LatchHighOpen.bits(), 0x0a);
		assert_eq!(LineState::StrobeAsserted.bits(), 0x0f);
	}

	#[test]
	fn states_are_distinct() {
		for a in LineState::ALL.iter() {
			assert_eq!(LineState::from_bits(a.bits()), Some(*a));
			for b in LineState::ALL.iter() {
				if a != b {
					assert_ne!(a.bits(), b.bits(), "{:?} and {:?} share an encoding", a, b);
				}
			}
		}
		assert_eq!(LineState::from_bits(0x00), None);
	}

	#[test]
	fn program_held_while_enabled() {
		for s in LineState::ALL.iter() {
			let lines = s.lines();
			assert_eq!(lines.contains(ControlLines::PROGRAM), *s != LineState::Disabled, "{:?}", s);
			// at most one latch open, never together with the strobe
			let low_open = !lines.contains(ControlLines::ADDR_LOW_INV);
			let high_open = !lines.contains(ControlLines::ADDR_HIGH_INV);
			assert!(!(low_open && high_open), "{:?}", s);
			if lines.contains(ControlLines::DATA_STROBE) {
				assert!(!low_open && !high_open, "{:?}", s);
			}
		}
	}
}
