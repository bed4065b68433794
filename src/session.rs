use crate::encoder::{TouchOutcome, SLOT_COUNT};
use crate::recurrence::RecurrenceCell;
use crate::render::{PageRenderer, PageView, SlotView};
use crate::util::Array2d;
use crate::{
	ButtonEvent, ButtonRow, Capability, CapabilityQuery, CapabilitySet, ColorId, ControlEvent, ControllerConfig,
	GridWindow, Host, MappingError, Modifier, Page, PageDispatcher, PageId, PageKind, ParameterHost,
	RecurrenceEditor, RowMode, SessionCoord, SessionView, StepPosition, StepStore,
};

/// Requests for the host that come out of handling an event. Drain them with
/// [`Session::take_signals`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Signal {
	/// A knob was let go while "stop automation on release" is on
	StopAutomationWrite,
	PageActivated(PageId),
}

/// What a page-select button does while shift is held
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftAction {
	None,
	ToggleFlip,
	ToggleUpperHalf,
	ToggleLowerHalf,
	ToggleBirdsEye,
}

impl ShiftAction {
	pub fn label(self) -> &'static str {
		match self {
			Self::None => "",
			Self::ToggleFlip => "Flip",
			Self::ToggleUpperHalf => "Upper",
			Self::ToggleLowerHalf => "Lower",
			Self::ToggleBirdsEye => "Overview",
		}
	}
}

pub const DEFAULT_SHIFT_ACTIONS: [ShiftAction; SLOT_COUNT] = [
	ShiftAction::ToggleFlip,
	ShiftAction::ToggleUpperHalf,
	ShiftAction::ToggleLowerHalf,
	ShiftAction::ToggleBirdsEye,
	ShiftAction::None,
	ShiftAction::None,
	ShiftAction::None,
	ShiftAction::None,
];

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
struct Modifiers {
	shift: bool,
	delete: bool,
}

/// All state of one controller attached to one host.
///
/// Every handler takes the host explicitly, and nothing is shared between sessions, so several
/// controllers (or several tests) can run side by side. A session is not thread safe: the host
/// must deliver hardware events one at a time.
///
/// The event entry points never fail. Anything that can't be done (an unsupported page, an
/// empty slot, a pad outside the grid) is logged at debug level and dropped.
#[derive(Debug, Clone)]
pub struct Session {
	config: ControllerConfig,
	capabilities: CapabilitySet,
	// referenced by some page but not asked about yet
	unqueried: Vec<Capability>,
	dispatcher: PageDispatcher,
	recurrence: RecurrenceEditor,
	grid: GridWindow,
	shift_actions: [ShiftAction; SLOT_COUNT],
	modifiers: Modifiers,
	// the selector whose press went to the shift action table
	shifted_selector: Option<u8>,
	signals: Vec<Signal>,
}

impl Session {
	/// Creates a session with the given pages. The first page starts out active.
	pub fn new(config: ControllerConfig, pages: Vec<Page>) -> Result<Self, MappingError> {
		config.validate()?;

		let mut pages = pages.into_iter();
		let first = pages.next()
				.ok_or_else(|| MappingError::InvalidConfig("at least one page is needed".to_string()))?;
		let mut dispatcher = PageDispatcher::new(first);
		for page in pages {
			dispatcher.register_page(page)?;
		}

		let mut session = Self {
			recurrence: RecurrenceEditor::new(config.scroll_rate),
			grid: GridWindow::new(config.grid_rows, config.grid_cols),
			config,
			capabilities: CapabilitySet::none(),
			unqueried: Vec::new(),
			dispatcher,
			shift_actions: DEFAULT_SHIFT_ACTIONS,
			modifiers: Modifiers::default(),
			shifted_selector: None,
			signals: Vec::new(),
		};
		session.forget_capabilities();
		Ok(session)
	}

	pub fn with_shift_actions(mut self, actions: [ShiftAction; SLOT_COUNT]) -> Self {
		self.shift_actions = actions;
		self
	}

	/// Connects the session to a host: resolves the capabilities every registered page refers
	/// to and takes over the bank page sizes. Call again whenever the host reconnects.
	pub fn attach_host(&mut self, host: &(impl CapabilityQuery + SessionView)) {
		self.forget_capabilities();
		self.resolve_capabilities(host);
		self.grid.sync_page_sizes(host);
		log::info!("host attached, capabilities: {:?}", self.capabilities);
	}

	/// Picks up bank page size changes and the capabilities of pages registered since the last
	/// event
	pub fn refresh(&mut self, host: &(impl CapabilityQuery + SessionView)) {
		self.resolve_capabilities(host);
		self.grid.sync_page_sizes(host);
	}

	/// Adds a page. Its capabilities are asked about with the next event that brings the host
	/// along.
	pub fn register_page(&mut self, page: Page) -> Result<(), MappingError> {
		for capability in page.referenced_capabilities() {
			if !self.capabilities.supports(capability) && !self.unqueried.contains(&capability) {
				self.unqueried.push(capability);
			}
		}
		self.dispatcher.register_page(page)
	}

	fn forget_capabilities(&mut self) {
		self.capabilities = CapabilitySet::none();
		self.unqueried.clear();
		for capability in self.dispatcher.pages().iter().flat_map(|page| page.referenced_capabilities()) {
			if !self.unqueried.contains(&capability) {
				self.unqueried.push(capability);
			}
		}
	}

	fn resolve_capabilities(&mut self, host: &impl CapabilityQuery) {
		for capability in self.unqueried.drain(..) {
			if host.supports(capability) {
				self.capabilities.insert(capability);
			} else {
				log::debug!("host doesn't support {:?}", capability);
			}
		}
	}

	pub fn config(&self) -> &ControllerConfig { &self.config }
	pub fn capabilities(&self) -> &CapabilitySet { &self.capabilities }
	pub fn dispatcher(&self) -> &PageDispatcher { &self.dispatcher }
	pub fn grid(&self) -> &GridWindow { &self.grid }
	pub fn recurrence(&self) -> &RecurrenceEditor { &self.recurrence }
	pub fn is_shift_held(&self) -> bool { self.modifiers.shift }
	pub fn is_delete_held(&self) -> bool { self.modifiers.delete }

	/// Whether the slot row shows the recurrence presets instead of the mask
	pub fn is_palette_shown(&self) -> bool {
		self.dispatcher.is_overlay_held() || self.modifiers.shift
	}

	pub fn active_page(&self) -> PageId {
		self.dispatcher.active_page().id()
	}

	/// Switches pages. Returns false, leaving the active page alone, if the page is unknown or
	/// the host doesn't support it.
	pub fn activate_page(&mut self, host: &impl CapabilityQuery, id: PageId) -> bool {
		self.resolve_capabilities(host);
		match self.dispatcher.activate_page(id, &self.capabilities) {
			Ok(()) => {
				self.signals.push(Signal::PageActivated(id));
				true
			}
			Err(e) => {
				log::debug!("not activating {:?}: {}", id, e);
				false
			}
		}
	}

	pub fn cell(&self, row: usize, col: usize) -> Option<SessionCoord> {
		self.grid.cell(row, col)
	}

	pub fn set_flipped(&mut self, flipped: bool) {
		self.grid.set_flipped(flipped);
	}

	pub fn set_row_mode(&mut self, row_mode: RowMode) {
		self.grid.set_row_mode(row_mode);
	}

	pub fn set_birds_eye(&mut self, birds_eye: bool) {
		self.grid.set_birds_eye(birds_eye);
	}

	/// Follows the step the host's step editor has selected
	pub fn edit_step(&mut self, step: Option<StepPosition>) {
		self.recurrence.edit_step(step);
	}

	pub fn take_signals(&mut self) -> Vec<Signal> {
		std::mem::take(&mut self.signals)
	}

	/// Decodes a raw short message according to the configured input map
	pub fn decode(&self, data: &[u8]) -> Option<ControlEvent> {
		self.config.input.decode(data, self.config.grid_rows, self.config.grid_cols)
	}

	pub fn handle<H: Host>(&mut self, host: &mut H, event: ControlEvent) {
		match event {
			ControlEvent::Knob { index, raw } => self.on_knob(host, index, raw),
			ControlEvent::KnobTouch { index, touched } => self.on_knob_touch(host, index, touched),
			ControlEvent::Button { row, index, event } => self.on_button(host, row, index, event),
			ControlEvent::Pad { row, col, event } => self.on_pad(host, row, col, event),
		}
	}

	pub fn on_knob<H: ParameterHost + StepStore + CapabilityQuery>(&mut self, host: &mut H, index: u8, raw: u8) {
		self.resolve_capabilities(&*host);
		let index = index as usize;
		let result = match self.dispatcher.active_page().kind() {
			PageKind::Parameters => self.dispatcher.on_knob(host, &self.capabilities, index, raw),
			PageKind::Recurrence => self.recurrence.on_knob(host, index, raw),
		};
		ok_or_return!(result);
	}

	pub fn on_knob_touch<H: ParameterHost + CapabilityQuery>(&mut self, host: &mut H, index: u8, touched: bool) {
		self.resolve_capabilities(&*host);
		let outcome = ok_or_return!(self.dispatcher.on_knob_touch(
			host,
			&self.capabilities,
			index as usize,
			touched,
			self.modifiers.delete,
			self.config.stop_automation_on_release,
		));

		if outcome == TouchOutcome::ReleaseAndStopAutomation {
			self.signals.push(Signal::StopAutomationWrite);
		}
	}

	pub fn on_button<H: Host>(&mut self, host: &mut H, row: ButtonRow, index: u8, event: ButtonEvent) {
		self.resolve_capabilities(&*host);
		match row {
			ButtonRow::PageSelect => self.on_selector(index, event),
			ButtonRow::Slot => {
				if event == ButtonEvent::Down {
					ok_or_return!(self.on_slot_button(host, index as usize));
				}
			}
			ButtonRow::Modifier => self.on_modifier(host, index, event),
		}
	}

	/// A press that starts with shift held belongs to the shift action table until its release,
	/// whatever happens to shift in between.
	fn on_selector(&mut self, index: u8, event: ButtonEvent) {
		match event {
			ButtonEvent::Down if self.modifiers.shift => {
				self.shifted_selector = Some(index);
				self.apply_shift_action(index);
			}
			ButtonEvent::Up if self.shifted_selector == Some(index) => {
				self.shifted_selector = None;
				self.dispatcher.release_selector(index);
			}
			_ => {
				let activated = ok_or_return!(self.dispatcher.on_button(&self.capabilities, index, event));
				if let Some(id) = activated {
					self.signals.push(Signal::PageActivated(id));
				}
			}
		}
	}

	fn apply_shift_action(&mut self, index: u8) {
		let action = match self.shift_actions.get(index as usize) {
			Some(&action) => action,
			None => return,
		};

		match action {
			ShiftAction::None => {}
			ShiftAction::ToggleFlip => self.grid.set_flipped(!self.grid.flipped()),
			ShiftAction::ToggleUpperHalf => self.grid.toggle_upper(),
			ShiftAction::ToggleLowerHalf => self.grid.toggle_lower(),
			ShiftAction::ToggleBirdsEye => self.grid.set_birds_eye(!self.grid.is_birds_eye()),
		}
		log::debug!("shift action {:?}", action);
	}

	fn on_slot_button<H: ParameterHost + StepStore>(&mut self, host: &mut H, index: usize) -> Result<(), MappingError> {
		match self.dispatcher.active_page().kind() {
			PageKind::Recurrence => {
				let palette = self.is_palette_shown();
				self.recurrence.on_slot_button(host, index, palette)
			}
			PageKind::Parameters if self.modifiers.delete => {
				self.dispatcher.reset_slot(host, &self.capabilities, index)
			}
			PageKind::Parameters => Ok(()),
		}
	}

	fn on_modifier<H: SessionView>(&mut self, host: &mut H, index: u8, event: ButtonEvent) {
		let pressed = event == ButtonEvent::Down;
		match Modifier::from_index(index) {
			Some(Modifier::Shift) => self.modifiers.shift = pressed,
			Some(Modifier::Delete) => self.modifiers.delete = pressed,
			Some(Modifier::Arrow(direction)) => {
				if pressed {
					ok_or_return!(self.grid.scroll(host, direction));
				}
			}
			None => log::debug!("no modifier at index {}", index),
		}
	}

	pub fn on_pad<H: SessionView>(&mut self, host: &mut H, row: u8, col: u8, event: ButtonEvent) {
		if event != ButtonEvent::Down {
			return;
		}
		self.grid.sync_page_sizes(&*host);
		ok_or_return!(self.grid.press(host, row as usize, col as usize));
	}

	pub fn button_color_id<H: Host>(&self, host: &H, row: ButtonRow, index: u8) -> ColorId {
		match row {
			ButtonRow::PageSelect if self.modifiers.shift => {
				let action = self.shift_actions.get(index as usize).copied().unwrap_or(ShiftAction::None);
				self.shift_action_color(action)
			}
			ButtonRow::PageSelect => self.dispatcher.selector_color(&self.capabilities, index),
			ButtonRow::Slot => match self.dispatcher.active_page().kind() {
				PageKind::Recurrence => self.recurrence_cells(host)
						.get(index as usize)
						.map_or(ColorId::Off, |cell| cell.color()),
				PageKind::Parameters => self.dispatcher.slot_color(host, &self.capabilities, index as usize),
			},
			ButtonRow::Modifier => match Modifier::from_index(index) {
				Some(Modifier::Shift) => held_color(self.modifiers.shift),
				Some(Modifier::Delete) => held_color(self.modifiers.delete),
				Some(Modifier::Arrow(direction)) if self.grid.can_scroll(host, direction) => ColorId::Normal,
				_ => ColorId::Off,
			},
		}
	}

	fn shift_action_color(&self, action: ShiftAction) -> ColorId {
		let active = match action {
			ShiftAction::None => return ColorId::Off,
			ShiftAction::ToggleFlip => self.grid.flipped(),
			ShiftAction::ToggleUpperHalf => self.grid.row_mode() == RowMode::Upper,
			ShiftAction::ToggleLowerHalf => self.grid.row_mode() == RowMode::Lower,
			ShiftAction::ToggleBirdsEye => self.grid.is_birds_eye(),
		};
		held_color(active)
	}

	fn recurrence_cells(&self, host: &impl StepStore) -> [RecurrenceCell; SLOT_COUNT] {
		self.recurrence.cells(host, self.is_palette_shown())
	}

	pub fn cell_color_id<H: SessionView>(&self, host: &H, row: usize, col: usize) -> ColorId {
		self.grid.cell_color(host, row, col)
	}

	/// Colors of the whole pad grid for one refresh tick
	pub fn render_grid<H: SessionView>(&self, host: &H) -> Array2d<ColorId> {
		let mut colors = Array2d::new(self.grid.cols(), self.grid.rows());
		for row in 0..self.grid.rows() {
			for col in 0..self.grid.cols() {
				colors.set(col, row, self.cell_color_id(host, row, col));
			}
		}
		colors
	}

	/// What the display should show for the active page
	pub fn page_view<H: ParameterHost + StepStore>(&self, host: &H) -> PageView {
		let page = self.dispatcher.active_page();
		let labels = page.labels().select(self.modifiers.shift);
		let mut view = PageView { title: page.id().0, ..PageView::default() };

		match page.kind() {
			PageKind::Parameters => {
				for (i, slot) in view.slots.iter_mut().enumerate() {
					*slot = SlotView {
						label: labels[i],
						touched: self.dispatcher.control(i).map_or(false, |c| c.is_touched()),
						color: self.dispatcher.slot_color(host, &self.capabilities, i),
						..SlotView::default()
					};
					let parameter = some_or_continue!(self.dispatcher.parameter(host, &self.capabilities, i));
					slot.value = Some(parameter.display_value());
					slot.normalized = Some(parameter.range().normalize(parameter.value()));
				}
			}
			PageKind::Recurrence => {
				for (slot, cell) in view.slots.iter_mut().zip(self.recurrence_cells(host).iter()) {
					slot.label = cell.label();
					slot.color = cell.color();
				}
				if let Some(recurrence) = self.recurrence.recurrence(host) {
					view.slots[0].value = Some(format!("{} {}", labels[0], recurrence.length()));
				}
			}
		}
		view
	}

	pub fn render<H, R>(&self, host: &H, renderer: &mut R) -> Result<(), R::Error>
			where H: ParameterHost + StepStore, R: PageRenderer {
		renderer.render(&self.page_view(host))
	}
}

fn held_color(held: bool) -> ColorId {
	if held { ColorId::Highlight } else { ColorId::Normal }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mock::{MockHost, MockParameter};
	use crate::{Capability, ParameterId, SlotBinding, StepInfo, ValueRange};

	const VOLUME: ParameterId = ParameterId(10);

	fn pages() -> Vec<Page> {
		let mut main = [SlotBinding::Empty; SLOT_COUNT];
		main[0] = SlotBinding::parameter(VOLUME, "Volume");
		vec![
			Page::new(PageId("Main"), main).with_selector(0),
			Page::recurrence(PageId("Recurrence")).with_selector(1),
		]
	}

	fn setup() -> (Session, MockHost) {
		let mut host = MockHost::new();
		host.add_parameter(VOLUME, MockParameter::new(ValueRange::MIDI, 100));
		host.support(Capability::Recurrence);
		let mut session = Session::new(ControllerConfig::default(), pages()).unwrap();
		session.attach_host(&host);
		(session, host)
	}

	#[test]
	fn needs_a_page() {
		assert!(Session::new(ControllerConfig::default(), Vec::new()).is_err());
	}

	#[test]
	fn gating_waits_for_host() {
		let mut session = Session::new(ControllerConfig::default(), pages()).unwrap();
		let mut host = MockHost::new();
		assert!(!session.activate_page(&host, PageId("Recurrence")));
		assert_eq!(session.active_page(), PageId("Main"));

		// asked once per attach
		host.support(Capability::Recurrence);
		assert!(!session.activate_page(&host, PageId("Recurrence")));
		session.attach_host(&host);
		assert!(session.activate_page(&host, PageId("Recurrence")));
		assert_eq!(session.take_signals(), vec![Signal::PageActivated(PageId("Recurrence"))]);
		assert!(session.take_signals().is_empty());
	}

	#[test]
	fn page_registered_after_attach_is_selectable() {
		let (mut session, mut host) = setup();
		session.register_page(Page::recurrence(PageId("Steps")).with_selector(2)).unwrap();
		assert!(session.activate_page(&host, PageId("Steps")));

		session.on_button(&mut host, ButtonRow::PageSelect, 0, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::PageSelect, 0, ButtonEvent::Up);
		assert_eq!(session.active_page(), PageId("Main"));

		session.register_page(Page::recurrence(PageId("More steps")).with_selector(3)).unwrap();
		session.on_button(&mut host, ButtonRow::PageSelect, 3, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::PageSelect, 3, ButtonEvent::Up);
		assert_eq!(session.active_page(), PageId("More steps"));
	}

	#[test]
	fn late_page_still_needs_host_support() {
		let mut host = MockHost::new();
		let mut session = Session::new(ControllerConfig::default(), pages()[..1].to_vec()).unwrap();
		session.attach_host(&host);
		session.register_page(Page::recurrence(PageId("Recurrence")).with_selector(1)).unwrap();
		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Up);
		assert_eq!(session.active_page(), PageId("Main"));
		assert!(!session.capabilities().supports(Capability::Recurrence));
	}

	#[test]
	fn shifted_press_keeps_its_table_after_shift_is_let_go() {
		let (mut session, mut host) = setup();
		session.on_button(&mut host, ButtonRow::Modifier, 0, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::Modifier, 0, ButtonEvent::Up);
		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Up);

		assert_eq!(session.grid().row_mode(), RowMode::Upper);
		assert_eq!(session.active_page(), PageId("Main"));
		assert!(session.take_signals().is_empty());
		assert_eq!(session.dispatcher().held_selector(), None);
	}

	#[test]
	fn selector_let_go_under_shift_ends_the_palette() {
		let (mut session, mut host) = setup();
		let step = StepPosition { channel: 0, x: 0, y: 64 };
		host.add_step(step, StepInfo { recurrence_length: 4, recurrence_mask: 0b0001, is_recurrence_enabled: true });
		session.edit_step(Some(step));
		assert!(session.activate_page(&host, PageId("Recurrence")));

		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::Modifier, 0, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Up);
		session.on_button(&mut host, ButtonRow::Modifier, 0, ButtonEvent::Up);
		assert!(!session.is_palette_shown());

		// a plain slot press edits the mask again
		session.on_button(&mut host, ButtonRow::Slot, 2, ButtonEvent::Down);
		assert_eq!(host.step(step).unwrap().recurrence_mask, 0b0101);
		assert_eq!(session.active_page(), PageId("Recurrence"));
	}

	#[test]
	fn stop_automation_on_release() {
		let mut host = MockHost::new();
		let config = ControllerConfig { stop_automation_on_release: true, ..ControllerConfig::default() };
		let mut session = Session::new(config, pages()).unwrap();
		session.on_knob_touch(&mut host, 0, true);
		assert!(session.take_signals().is_empty());
		session.on_knob_touch(&mut host, 0, false);
		assert_eq!(session.take_signals(), vec![Signal::StopAutomationWrite]);
	}

	#[test]
	fn delete_and_slot_button_resets() {
		let (mut session, mut host) = setup();
		session.on_knob(&mut host, 0, 5);
		assert_eq!(host.value_of(VOLUME), Some(105));
		session.on_button(&mut host, ButtonRow::Modifier, 1, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::Slot, 0, ButtonEvent::Down);
		assert_eq!(host.value_of(VOLUME), Some(100));
	}

	#[test]
	fn shift_switches_page_select_row_to_grid_actions() {
		let (mut session, mut host) = setup();
		session.on_button(&mut host, ButtonRow::Modifier, 0, ButtonEvent::Down);
		assert_eq!(session.button_color_id(&host, ButtonRow::PageSelect, 0), ColorId::Normal);

		session.on_button(&mut host, ButtonRow::PageSelect, 0, ButtonEvent::Down);
		assert!(session.grid().flipped());
		assert_eq!(session.button_color_id(&host, ButtonRow::PageSelect, 0), ColorId::Highlight);
		assert_eq!(session.active_page(), PageId("Main"));

		session.on_button(&mut host, ButtonRow::Modifier, 0, ButtonEvent::Up);
		assert_eq!(session.button_color_id(&host, ButtonRow::PageSelect, 0), ColorId::Highlight);
		assert_eq!(session.button_color_id(&host, ButtonRow::PageSelect, 1), ColorId::Normal);
	}

	#[test]
	fn shifted_labels_come_from_the_second_table() {
		let (mut session, mut host) = setup();
		assert_eq!(session.page_view(&host).slots[0].label, "Volume");
		session.on_button(&mut host, ButtonRow::Modifier, 0, ButtonEvent::Down);
		assert_eq!(session.page_view(&host).slots[0].label, "Reset");
	}

	#[test]
	fn page_view_shows_values() {
		let (session, host) = setup();
		let view = session.page_view(&host);
		assert_eq!(view.title, "Main");
		assert_eq!(view.slots[0].value.as_deref(), Some("100"));
		assert_eq!(view.slots[1].value, None);
		assert_eq!(view.slots[1].color, ColorId::Off);
	}

	#[test]
	fn recurrence_page_view() {
		let (mut session, mut host) = setup();
		let step = StepPosition { channel: 0, x: 2, y: 60 };
		host.add_step(step, StepInfo { recurrence_length: 3, recurrence_mask: 0b001, is_recurrence_enabled: true });
		session.edit_step(Some(step));
		assert!(session.activate_page(&host, PageId("Recurrence")));

		let view = session.page_view(&host);
		let labels: Vec<&str> = view.slots.iter().map(|s| s.label).collect();
		assert_eq!(labels, vec!["On", "Off", "Off", "-", "-", "-", "-", "-"]);
		assert_eq!(view.slots[0].value.as_deref(), Some("Length 3"));

		// holding the page's own selector shows the palette
		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Down);
		assert!(session.is_palette_shown());
		assert_eq!(session.page_view(&host).slots[3].label, "!Last");
		session.on_button(&mut host, ButtonRow::Slot, 3, ButtonEvent::Down);
		session.on_button(&mut host, ButtonRow::PageSelect, 1, ButtonEvent::Up);
		assert_eq!(host.step(step).unwrap().recurrence_mask, 0b011);
		assert_eq!(session.active_page(), PageId("Recurrence"));
	}

	#[test]
	fn render_grid_covers_every_pad() {
		let (session, host) = setup();
		let colors = session.render_grid(&host);
		assert_eq!((colors.width(), colors.height()), (8, 8));
		assert!(colors.rows().all(|row| row.iter().all(|&c| c == ColorId::Off)));
	}
}
