use crate::CapabilityQuery;

/// A host feature that pages and slots can depend on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
	Chance,
	Occurrence,
	Recurrence,
	Repeats,
	VelocitySpread,
	ReleaseVelocity,
	Timbre,
	Pressure,
	/// Host-specific attribute not covered by the named variants
	Other(u16),
}

/// The capabilities of the connected host, resolved once when the host attaches.
///
/// Pages don't store whether they are available; they ask this set on every selection attempt,
/// so a host that attaches after the pages were registered still gates correctly. Until a host
/// is attached, nothing is supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
	supported: Vec<Capability>,
}

impl CapabilitySet {
	pub fn none() -> Self {
		Self::default()
	}

	pub fn from_supported(supported: impl IntoIterator<Item = Capability>) -> Self {
		let mut set = Self::none();
		for capability in supported {
			set.insert(capability);
		}
		set
	}

	/// Asks `host` about every capability in `wanted`
	pub fn query(host: &impl CapabilityQuery, wanted: impl IntoIterator<Item = Capability>) -> Self {
		Self::from_supported(wanted.into_iter().filter(|&c| host.supports(c)))
	}

	pub fn insert(&mut self, capability: Capability) {
		if !self.supported.contains(&capability) {
			self.supported.push(capability);
		}
	}

	pub fn supports(&self, capability: Capability) -> bool {
		self.supported.contains(&capability)
	}

	pub fn supports_all<'a>(&self, required: impl IntoIterator<Item = &'a Capability>) -> bool {
		required.into_iter().all(|&c| self.supports(c))
	}

	/// The first capability in `required` this set lacks
	pub fn first_missing<'a>(&self, required: impl IntoIterator<Item = &'a Capability>) -> Option<Capability> {
		required.into_iter().copied().find(|&c| !self.supports(c))
	}
}
