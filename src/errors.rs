use crate::{Capability, PageId};

/// Everything that can go wrong while mapping controller input.
///
/// None of these are fatal. The event entry points on [`crate::Session`] swallow them (after
/// logging) because the hardware has no error channel besides its LEDs; only the construction
/// APIs hand them to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
	/// The connected host lacks an attribute the page or slot edits
	UnsupportedCapability { capability: Capability },
	/// A grid coordinate, slot or recurrence bit outside its valid bounds
	OutOfRangeIndex {
		// What kind of index this was, e.g. "slot" or "grid row"
		what: &'static str,
		index: usize,
		bound: usize,
	},
	/// The addressed step, parameter, track or scene has no backing data
	NonexistentTarget,
	UnknownPage(PageId),
	DuplicatePage(PageId),
	InvalidConfig(String),
}

impl MappingError {
	pub(crate) fn out_of_range(what: &'static str, index: usize, bound: usize) -> Self {
		Self::OutOfRangeIndex { what, index, bound }
	}
}

impl std::fmt::Display for MappingError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnsupportedCapability { capability } => {
				write!(f, "host doesn't support {:?}", capability)
			}
			Self::OutOfRangeIndex { what, index, bound } => {
				write!(f, "{} index {} out of range (must be < {})", what, index, bound)
			}
			Self::NonexistentTarget => f.write_str("addressed target doesn't exist"),
			Self::UnknownPage(id) => write!(f, "no page registered as {:?}", id),
			Self::DuplicatePage(id) => write!(f, "page {:?} registered twice", id),
			Self::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
		}
	}
}

impl std::error::Error for MappingError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_names_the_offending_index() {
		let e = MappingError::out_of_range("slot", 9, 8);
		assert_eq!(e.to_string(), "slot index 9 out of range (must be < 8)");
	}

	#[test]
	fn display_unknown_page() {
		let e = MappingError::UnknownPage(PageId("Mixer"));
		assert_eq!(e.to_string(), "no page registered as PageId(\"Mixer\")");
	}
}
