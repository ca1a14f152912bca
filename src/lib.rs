#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

macro_rules! with_context {
	(( $fmt:tt $($t:tt)* ), $e:expr) => {{
		use failure::Error;

		match (|| { $e })() {
			Ok(v) => Ok(v),
			Err(e) => {
				let e: Error = e;
				let msg = format!(concat!($fmt, ": {}") $($t)*, e);
				Err(Error::from(e.context(msg)))
			}
		}
	}};

	($msg:expr, $e:expr) => {
		with_context!(("{}", $msg), $e)
	};
}

pub type AResult<T> = Result<T, failure::Error>;

pub mod cli;
pub mod image;
pub mod parport;
pub mod programmer;

/// Parse an unsigned integer the way C's `strtoul(s, &end, 0)` does when
/// the whole string must be consumed: `0x` prefix for hex, leading `0` for
/// octal, decimal otherwise.
pub(crate) fn parse_c_ulong(s: &str) -> AResult<u64> {
	let (digits, radix) = if s.starts_with("0x") || s.starts_with("0X") {
		(&s[2..], 16)
	} else if s.len() > 1 && s.starts_with('0') {
		(&s[1..], 8)
	} else {
		(s, 10)
	};

	// from_str_radix would accept a sign
	ensure!(!digits.is_empty() && digits.bytes().all(|c| c.is_ascii_hexdigit()), "not a number: {:?}", s);
	Ok(u64::from_str_radix(digits, radix)?)
}

#[cfg(test)]
mod test {
	use super::parse_c_ulong;

	#[test]
	fn c_number_syntax() {
		assert_eq!(parse_c_ulong("0").unwrap(), 0);
		assert_eq!(parse_c_ulong("1024").unwrap(), 1024);
		assert_eq!(parse_c_ulong("0x378").unwrap(), 0x378);
		assert_eq!(parse_c_ulong("0X3bc").unwrap(), 0x3bc);
		assert_eq!(parse_c_ulong("010").unwrap(), 8);
		assert!(parse_c_ulong("").is_err());
		assert!(parse_c_ulong("0x").is_err());
		assert!(parse_c_ulong("+12").is_err());
		assert!(parse_c_ulong("12k").is_err());
		assert!(parse_c_ulong("09").is_err());
		assert!(parse_c_ulong("1a").is_err());
	}
}
