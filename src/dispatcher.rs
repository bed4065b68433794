use crate::encoder::{relative_delta, KnobThrottle, PhysicalControl, TouchOutcome, SLOT_COUNT};
use crate::{
	ButtonEvent, CapabilitySet, ColorId, MappingError, Page, PageId, PageKind, Parameter,
	ParameterHost, ParameterId, SlotBinding,
};

/// Routes the eight knobs, their touch sensors and the page-select buttons to whichever page is
/// active.
///
/// There is always exactly one active page. Activating a page rebinds all eight controls at once,
/// and the resulting bindings depend only on the page that was activated. Throttle counters start
/// from zero again on every activation.
///
/// Capability gating is evaluated against the [`CapabilitySet`] passed into each call, never
/// remembered from registration time.
#[derive(Debug, Clone)]
pub struct PageDispatcher {
	pages: Vec<Page>,
	active: usize,
	controls: [PhysicalControl; SLOT_COUNT],
	throttles: [KnobThrottle; SLOT_COUNT],
	held_selector: Option<u8>,
}

impl PageDispatcher {
	/// Creates a dispatcher with `initial` registered and active
	pub fn new(initial: Page) -> Self {
		let mut controls = [PhysicalControl::default(); SLOT_COUNT];
		for (i, control) in controls.iter_mut().enumerate() {
			*control = PhysicalControl::new(i as u8);
		}

		let mut dispatcher = Self {
			pages: vec![initial],
			active: 0,
			controls,
			throttles: [KnobThrottle::new(1); SLOT_COUNT],
			held_selector: None,
		};
		dispatcher.bind(0);
		dispatcher
	}

	pub fn register_page(&mut self, page: Page) -> Result<(), MappingError> {
		if self.page(page.id()).is_some() {
			return Err(MappingError::DuplicatePage(page.id()));
		}
		self.pages.push(page);
		Ok(())
	}

	pub fn pages(&self) -> &[Page] { &self.pages }

	pub fn page(&self, id: PageId) -> Option<&Page> {
		self.pages.iter().find(|page| page.id() == id)
	}

	pub fn active_page(&self) -> &Page {
		&self.pages[self.active]
	}

	/// The bindings of the eight slots, as determined by the active page
	pub fn bindings(&self) -> &[SlotBinding; SLOT_COUNT] {
		self.active_page().slots()
	}

	pub fn control(&self, index: usize) -> Option<&PhysicalControl> {
		self.controls.get(index)
	}

	/// Whether every capability the page needs is in `capabilities`
	pub fn is_available(page: &Page, capabilities: &CapabilitySet) -> bool {
		capabilities.supports_all(page.requires())
	}

	/// Switches to the page `id`. Unsupported pages are refused and the active page stays.
	pub fn activate_page(&mut self, id: PageId, capabilities: &CapabilitySet) -> Result<(), MappingError> {
		let index = self.pages.iter()
				.position(|page| page.id() == id)
				.ok_or(MappingError::UnknownPage(id))?;

		if let Some(capability) = capabilities.first_missing(self.pages[index].requires()) {
			return Err(MappingError::UnsupportedCapability { capability });
		}

		self.bind(index);
		log::info!("activated page {:?}", id);
		Ok(())
	}

	fn bind(&mut self, index: usize) {
		self.active = index;
		for (throttle, slot) in self.throttles.iter_mut().zip(self.pages[index].slots()) {
			*throttle = match *slot {
				SlotBinding::Parameter { throttle: Some(rate), .. } => KnobThrottle::new(rate),
				_ => KnobThrottle::new(1),
			};
		}
	}

	/// Resolves the parameter behind a slot of the active page
	fn bound_parameter(&self, index: usize, capabilities: &CapabilitySet)
			-> Result<(ParameterId, Option<u32>), MappingError> {

		let slot = self.active_page().slot(index)
				.ok_or_else(|| MappingError::out_of_range("slot", index, SLOT_COUNT))?;

		match *slot {
			SlotBinding::Empty => Err(MappingError::NonexistentTarget),
			SlotBinding::Parameter { requires: Some(capability), .. } if !capabilities.supports(capability) => {
				Err(MappingError::UnsupportedCapability { capability })
			}
			SlotBinding::Parameter { id, throttle, .. } => Ok((id, throttle)),
		}
	}

	/// Applies a relative encoder tick to the parameter bound to knob `index`
	pub fn on_knob(&mut self,
		host: &mut impl ParameterHost,
		capabilities: &CapabilitySet,
		index: usize,
		raw: u8,
	) -> Result<(), MappingError> {

		if self.active_page().kind() != PageKind::Parameters {
			return Ok(());
		}

		let (id, throttle) = self.bound_parameter(index, capabilities)?;
		self.controls[index].record_tick(raw);

		let delta = relative_delta(raw);
		if delta == 0 {
			return Ok(());
		}

		let parameter = existing(host.parameter_mut(id))?;
		let range = parameter.range();

		let value = if throttle.is_some() {
			if !self.throttles[index].increase_knob_movement() {
				log::trace!("knob {}: throttled tick", index);
				return Ok(());
			}
			range.clamp(parameter.value() + delta.signum())
		} else {
			range.clamp(parameter.value() + delta)
		};

		log::trace!("knob {}: delta {} -> {}", index, delta, value);
		parameter.set_value(value);
		Ok(())
	}

	/// Tracks a touch edge on knob `index` and forwards it to the bound parameter, if any.
	///
	/// The returned outcome is meaningful even for empty slots: releasing an empty slot still
	/// asks the transport to stop automation writing if that policy is on.
	pub fn on_knob_touch(&mut self,
		host: &mut impl ParameterHost,
		capabilities: &CapabilitySet,
		index: usize,
		touched: bool,
		delete_held: bool,
		stop_automation: bool,
	) -> Result<TouchOutcome, MappingError> {

		let control = self.controls.get_mut(index)
				.ok_or_else(|| MappingError::out_of_range("knob", index, SLOT_COUNT))?;
		let outcome = control.set_touched(touched, delete_held, stop_automation);

		let id = match self.bound_parameter(index, capabilities) {
			Ok((id, _)) => id,
			Err(e) => {
				log::debug!("touch on knob {} not forwarded: {}", index, e);
				return Ok(outcome);
			}
		};

		if let Ok(parameter) = existing(host.parameter_mut(id)) {
			match outcome {
				TouchOutcome::Touch => parameter.touch_value(true),
				TouchOutcome::Reset => parameter.reset_value(),
				TouchOutcome::Release | TouchOutcome::ReleaseAndStopAutomation => parameter.touch_value(false),
				TouchOutcome::Unchanged => {}
			}
		}
		Ok(outcome)
	}

	/// Resets the parameter bound to slot `index` to its default
	pub fn reset_slot(&self,
		host: &mut impl ParameterHost,
		capabilities: &CapabilitySet,
		index: usize,
	) -> Result<(), MappingError> {
		let (id, _) = self.bound_parameter(index, capabilities)?;
		existing(host.parameter_mut(id))?.reset_value();
		Ok(())
	}

	fn page_for_selector(&self, index: u8) -> Option<&Page> {
		self.pages.iter().find(|page| page.selector() == Some(index))
	}

	/// Handles a page-select button. DOWN arms the press-and-hold overlay of the page, UP
	/// activates it. Returns the id of the page that became active; releasing the selector of the
	/// page that already is active only ends its overlay.
	pub fn on_button(&mut self,
		capabilities: &CapabilitySet,
		index: u8,
		event: ButtonEvent,
	) -> Result<Option<PageId>, MappingError> {

		let id = match self.page_for_selector(index) {
			Some(page) => page.id(),
			None => {
				log::trace!("no page on selector {}", index);
				return Ok(None);
			}
		};

		match event {
			ButtonEvent::Down => {
				self.held_selector = Some(index);
				Ok(None)
			}
			ButtonEvent::Up => {
				self.release_selector(index);
				if id == self.active_page().id() {
					return Ok(None);
				}
				self.activate_page(id, capabilities)?;
				Ok(Some(id))
			}
		}
	}

	/// Forgets that selector `index` is held, without activating anything. Used for releases
	/// whose press was handled elsewhere.
	pub fn release_selector(&mut self, index: u8) {
		if self.held_selector == Some(index) {
			self.held_selector = None;
		}
	}

	/// The page-select button currently held down, if any
	pub fn held_selector(&self) -> Option<u8> {
		self.held_selector
	}

	/// Whether the selector of the active page is being held, which shows the page's overlay
	pub fn is_overlay_held(&self) -> bool {
		self.held_selector.is_some() && self.held_selector == self.active_page().selector()
	}

	/// Color of page-select button `index`
	pub fn selector_color(&self, capabilities: &CapabilitySet, index: u8) -> ColorId {
		match self.page_for_selector(index) {
			Some(page) if page.id() == self.active_page().id() => ColorId::Highlight,
			Some(page) if !Self::is_available(page, capabilities) => ColorId::Off,
			_ => ColorId::Normal,
		}
	}

	/// Color of the slot button below knob `index` on a parameter page
	pub fn slot_color(&self, host: &impl ParameterHost, capabilities: &CapabilitySet, index: usize) -> ColorId {
		match self.bound_parameter(index, capabilities) {
			Ok((id, _)) if existing_ref(host.parameter(id)).is_some() => ColorId::Normal,
			_ => ColorId::Off,
		}
	}

	/// The parameter behind slot `index`, if it is bound, supported and exists
	pub fn parameter<'h>(&self, host: &'h impl ParameterHost, capabilities: &CapabilitySet, index: usize)
			-> Option<&'h dyn Parameter> {
		let (id, _) = self.bound_parameter(index, capabilities).ok()?;
		existing_ref(host.parameter(id))
	}
}

fn existing(parameter: Option<&mut dyn Parameter>) -> Result<&mut dyn Parameter, MappingError> {
	match parameter {
		Some(p) if p.exists() => Ok(p),
		_ => Err(MappingError::NonexistentTarget),
	}
}

fn existing_ref(parameter: Option<&dyn Parameter>) -> Option<&dyn Parameter> {
	parameter.filter(|p| p.exists())
}
