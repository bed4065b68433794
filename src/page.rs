use crate::{Capability, ParameterId, SLOT_COUNT};

/// Names a page. Pages are looked up by this id, so it must be unique per dispatcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PageId(pub &'static str);

/// What the eight knobs and slot buttons of a page operate on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PageKind {
	/// Each slot drives the parameter bound to it
	Parameters,
	/// The slots edit the recurrence of the step being edited
	Recurrence,
}

/// One slot of a page: either a parameter, or an explicit placeholder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SlotBinding {
	Parameter {
		id: ParameterId,
		label: &'static str,
		/// Only every Nth encoder tick is applied. Use this for enumerations and other
		/// parameters coarser than the encoder.
		throttle: Option<u32>,
		/// The slot acts as empty unless the host supports this
		requires: Option<Capability>,
	},
	Empty,
}

impl SlotBinding {
	pub fn parameter(id: ParameterId, label: &'static str) -> Self {
		Self::Parameter { id, label, throttle: None, requires: None }
	}

	/// Sets the throttle rate. No-op on empty slots.
	pub fn throttled(mut self, rate: u32) -> Self {
		if let Self::Parameter { throttle, .. } = &mut self {
			*throttle = Some(rate);
		}
		self
	}

	/// Gates the slot on a capability. No-op on empty slots.
	pub fn requiring(mut self, capability: Capability) -> Self {
		if let Self::Parameter { requires, .. } = &mut self {
			*requires = Some(capability);
		}
		self
	}

	pub fn parameter_id(&self) -> Option<ParameterId> {
		match *self {
			Self::Parameter { id, .. } => Some(id),
			Self::Empty => None,
		}
	}

	pub fn label(&self) -> &'static str {
		match *self {
			Self::Parameter { label, .. } => label,
			Self::Empty => "",
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}
}

impl Default for SlotBinding {
	fn default() -> Self { Self::Empty }
}

/// Slot labels for the plain and the shifted layer, declared side by side so that the shift
/// modifier is a table lookup rather than a branch at every call site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
	pub normal: [&'static str; SLOT_COUNT],
	pub shifted: [&'static str; SLOT_COUNT],
}

impl LabelTable {
	pub fn select(&self, shifted: bool) -> &[&'static str; SLOT_COUNT] {
		if shifted { &self.shifted } else { &self.normal }
	}
}

/// A named set of eight bindings, activated as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
	id: PageId,
	kind: PageKind,
	/// Index of the page-select button that activates this page
	selector: Option<u8>,
	requires: Vec<Capability>,
	slots: [SlotBinding; SLOT_COUNT],
	labels: LabelTable,
}

impl Page {
	/// A parameter page. The shifted labels default to "Reset" for every bound slot, because
	/// that is what delete plus touch does.
	pub fn new(id: PageId, slots: [SlotBinding; SLOT_COUNT]) -> Self {
		let mut labels = LabelTable::default();
		for (i, slot) in slots.iter().enumerate() {
			labels.normal[i] = slot.label();
			labels.shifted[i] = if slot.is_empty() { "" } else { "Reset" };
		}

		Self { id, kind: PageKind::Parameters, selector: None, requires: Vec::new(), slots, labels }
	}

	/// The recurrence editor page. Slot 0's knob sets the length; the slot buttons edit the mask.
	pub fn recurrence(id: PageId) -> Self {
		let mut page = Self::new(id, [SlotBinding::Empty; SLOT_COUNT]);
		page.kind = PageKind::Recurrence;
		page.requires.push(Capability::Recurrence);
		page.labels.normal[0] = "Length";
		page
	}

	pub fn with_selector(mut self, index: u8) -> Self {
		self.selector = Some(index);
		self
	}

	pub fn requiring(mut self, capability: Capability) -> Self {
		if !self.requires.contains(&capability) {
			self.requires.push(capability);
		}
		self
	}

	pub fn with_labels(mut self, labels: LabelTable) -> Self {
		self.labels = labels;
		self
	}

	pub fn id(&self) -> PageId { self.id }
	pub fn kind(&self) -> PageKind { self.kind }
	pub fn selector(&self) -> Option<u8> { self.selector }
	pub fn requires(&self) -> &[Capability] { &self.requires }
	pub fn slots(&self) -> &[SlotBinding; SLOT_COUNT] { &self.slots }
	pub fn labels(&self) -> &LabelTable { &self.labels }

	pub fn slot(&self, index: usize) -> Option<&SlotBinding> {
		self.slots.get(index)
	}

	/// Every capability the page or any of its slots depends on
	pub fn referenced_capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
		let slot_capabilities = self.slots.iter().filter_map(|slot| match *slot {
			SlotBinding::Parameter { requires, .. } => requires,
			SlotBinding::Empty => None,
		});
		self.requires.iter().copied().chain(slot_capabilities)
	}
}
