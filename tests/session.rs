//! Drives whole sessions through decoded short messages, the way a controller would.

use launchmap::mock::{MockHost, MockParameter};
use launchmap::prelude::*;
use launchmap::{
	ButtonRow, Capability, ColorId, ControllerConfig, Page, PageId, ParameterId, SessionCoord,
	Session, Signal, SlotBinding, SlotState, StepInfo, StepPosition, TextRenderer, ValueRange,
	SLOT_COUNT,
};

const VOLUME: ParameterId = ParameterId(1);
const CHANCE: ParameterId = ParameterId(2);
const STEP: StepPosition = StepPosition { channel: 0, x: 4, y: 36 };

// default input map
const KNOB_0: u8 = 0x15;
const SELECTOR_0: u8 = 0x68;
const SLOT_0: u8 = 0x70;
const SHIFT: u8 = 0x60;
const RIGHT: u8 = 0x65;
const PAD_0: u8 = 0x24;

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn pages() -> Vec<Page> {
	let mut mixer = [SlotBinding::Empty; SLOT_COUNT];
	mixer[0] = SlotBinding::parameter(VOLUME, "Volume");
	mixer[1] = SlotBinding::parameter(CHANCE, "Chance").requiring(Capability::Chance);
	vec![
		Page::new(PageId("Mixer"), mixer).with_selector(0),
		Page::recurrence(PageId("Recurrence")).with_selector(1),
	]
}

fn host(track_count: usize, scene_count: usize) -> MockHost {
	let mut host = MockHost::with_banks(track_count, 8, scene_count, 8);
	host.add_parameter(VOLUME, MockParameter::new(ValueRange::MIDI, 64));
	host.add_parameter(CHANCE, MockParameter::new(ValueRange::MIDI, 127));
	host.add_step(STEP, StepInfo { recurrence_length: 4, recurrence_mask: 0b0101, is_recurrence_enabled: false });
	host.support(Capability::Recurrence);
	host
}

fn session(config: ControllerConfig, host: &MockHost) -> Session {
	let mut session = Session::new(config, pages()).unwrap();
	session.attach_host(host);
	session.edit_step(Some(STEP));
	session
}

fn send(session: &mut Session, host: &mut MockHost, data: [u8; 3]) {
	let event = session.decode(&data).unwrap_or_else(|| panic!("{:02x?} didn't decode", data));
	session.handle(host, event);
}

fn press(session: &mut Session, host: &mut MockHost, cc: u8) {
	send(session, host, [0xB0, cc, 127]);
	send(session, host, [0xB0, cc, 0]);
}

#[test]
fn knob_ticks_move_the_bound_parameter() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig::default(), &host);

	send(&mut session, &mut host, [0xB0, KNOB_0, 3]);
	assert_eq!(host.value_of(VOLUME), Some(67));
	send(&mut session, &mut host, [0xB0, KNOB_0, 126]);
	assert_eq!(host.value_of(VOLUME), Some(65));
	send(&mut session, &mut host, [0xB0, KNOB_0, 64]);
	assert_eq!(host.value_of(VOLUME), Some(65));
}

#[test]
fn unsupported_slot_is_left_alone() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig::default(), &host);

	send(&mut session, &mut host, [0xB0, KNOB_0 + 1, 127]);
	assert_eq!(host.value_of(CHANCE), Some(127));
	assert_eq!(session.button_color_id(&host, ButtonRow::Slot, 1), ColorId::Off);
	assert_eq!(session.button_color_id(&host, ButtonRow::Slot, 0), ColorId::Normal);
}

#[test]
fn unsupported_page_cannot_be_selected() {
	init();
	let mut host = MockHost::new();
	let mut session = session(ControllerConfig::default(), &host);

	press(&mut session, &mut host, SELECTOR_0 + 1);
	assert_eq!(session.active_page(), PageId("Mixer"));
	assert!(session.take_signals().is_empty());
	assert_eq!(session.button_color_id(&host, ButtonRow::PageSelect, 1), ColorId::Off);
}

#[test]
fn release_stops_automation_when_configured() {
	init();
	let mut host = host(8, 8);
	let config = ControllerConfig { stop_automation_on_release: true, ..ControllerConfig::default() };
	let mut session = session(config, &host);

	send(&mut session, &mut host, [0x90, 0, 127]);
	assert_eq!(host.parameter_state(VOLUME).map(|p| p.is_touched()), Some(true));
	send(&mut session, &mut host, [0x80, 0, 0]);
	assert_eq!(host.parameter_state(VOLUME).map(|p| p.is_touched()), Some(false));
	assert_eq!(session.take_signals(), vec![Signal::StopAutomationWrite]);
}

#[test]
fn recurrence_toggle_then_last_preset() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig::default(), &host);

	press(&mut session, &mut host, SELECTOR_0 + 1);
	assert_eq!(session.active_page(), PageId("Recurrence"));
	assert_eq!(session.take_signals(), vec![Signal::PageActivated(PageId("Recurrence"))]);

	send(&mut session, &mut host, [0xB0, SLOT_0 + 1, 127]);
	let step = host.step(STEP).unwrap();
	assert_eq!(step.recurrence_mask, 0b0111);
	assert!(step.is_recurrence_enabled);

	// holding the active page's selector turns the slot row into the preset palette
	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 1, 127]);
	assert_eq!(session.button_color_id(&host, ButtonRow::Slot, 6), ColorId::Off);
	send(&mut session, &mut host, [0xB0, SLOT_0 + 2, 127]);
	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 1, 0]);
	assert_eq!(host.step(STEP).unwrap().recurrence_mask, 0b1000);
	assert_eq!(session.active_page(), PageId("Recurrence"));
}

#[test]
fn recurrence_length_knob_is_throttled() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig { scroll_rate: 2, ..ControllerConfig::default() }, &host);
	assert!(session.activate_page(&host, PageId("Recurrence")));

	for _ in 0..6 {
		send(&mut session, &mut host, [0xB0, KNOB_0, 1]);
	}
	assert_eq!(host.step(STEP).unwrap().recurrence_length, 7);
	for _ in 0..20 {
		send(&mut session, &mut host, [0xB0, KNOB_0, 127]);
	}
	assert_eq!(host.step(STEP).unwrap().recurrence_length, 1);
}

#[test]
fn page_added_while_attached_answers_its_selector() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig::default(), &host);
	session.register_page(Page::recurrence(PageId("Steps")).with_selector(2)).unwrap();

	assert_eq!(session.button_color_id(&host, ButtonRow::PageSelect, 2), ColorId::Off);
	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 2, 127]);
	assert_eq!(session.button_color_id(&host, ButtonRow::PageSelect, 2), ColorId::Normal);
	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 2, 0]);
	assert_eq!(session.active_page(), PageId("Steps"));
	assert_eq!(session.take_signals(), vec![Signal::PageActivated(PageId("Steps"))]);
}

#[test]
fn shift_let_go_before_the_selector() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig::default(), &host);

	send(&mut session, &mut host, [0xB0, SHIFT, 127]);
	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 3, 127]);
	send(&mut session, &mut host, [0xB0, SHIFT, 0]);
	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 3, 0]);
	assert!(session.grid().is_birds_eye());
	assert_eq!(session.active_page(), PageId("Mixer"));

	// the next unshifted press is a plain page switch again
	press(&mut session, &mut host, SELECTOR_0 + 1);
	assert_eq!(session.active_page(), PageId("Recurrence"));
	assert!(session.grid().is_birds_eye());
}

#[test]
fn selector_let_go_while_shift_is_held() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig::default(), &host);
	press(&mut session, &mut host, SELECTOR_0 + 1);

	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 1, 127]);
	send(&mut session, &mut host, [0xB0, SHIFT, 127]);
	send(&mut session, &mut host, [0xB0, SELECTOR_0 + 1, 0]);
	send(&mut session, &mut host, [0xB0, SHIFT, 0]);
	assert!(!session.is_palette_shown());

	send(&mut session, &mut host, [0xB0, SLOT_0 + 1, 127]);
	assert_eq!(host.step(STEP).unwrap().recurrence_mask, 0b0111);
}

#[test]
fn upper_and_lower_halves_through_shift() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig::default(), &host);

	send(&mut session, &mut host, [0xB0, SHIFT, 127]);
	press(&mut session, &mut host, SELECTOR_0 + 1);
	assert_eq!(session.grid().visible_rows(), 4);
	assert_eq!(session.cell(0, 0), Some(SessionCoord { track: 0, scene: 0 }));
	assert_eq!(session.cell(3, 7), Some(SessionCoord { track: 7, scene: 3 }));
	assert_eq!(session.cell(4, 0), None);

	// lower while upper is active goes back to all, not straight to lower
	press(&mut session, &mut host, SELECTOR_0 + 2);
	assert_eq!(session.grid().visible_rows(), 8);
	press(&mut session, &mut host, SELECTOR_0 + 2);
	assert_eq!(session.cell(0, 0), Some(SessionCoord { track: 0, scene: 4 }));
	assert_eq!(session.cell(3, 7), Some(SessionCoord { track: 7, scene: 7 }));
	send(&mut session, &mut host, [0xB0, SHIFT, 0]);

	assert_eq!(session.active_page(), PageId("Mixer"));
}

#[test]
fn pads_launch_relative_to_the_bank() {
	init();
	let mut host = host(12, 8);
	host.set_slot_state(9, 0, SlotState::Playing);
	let mut session = session(ControllerConfig::default(), &host);

	send(&mut session, &mut host, [0x90, PAD_0, 127]);
	send(&mut session, &mut host, [0x90, PAD_0, 0]);
	assert_eq!(host.launched(), &[(0, 0)]);

	assert_eq!(session.button_color_id(&host, ButtonRow::Modifier, 5), ColorId::Normal);
	press(&mut session, &mut host, RIGHT);
	assert_eq!(host.track_bank().scroll_position(), 8);
	assert_eq!(session.button_color_id(&host, ButtonRow::Modifier, 5), ColorId::Off);
	assert_eq!(session.cell_color_id(&host, 0, 1), ColorId::Playing);

	send(&mut session, &mut host, [0x90, PAD_0 + 1, 127]);
	assert_eq!(host.launched(), &[(0, 0), (9, 0)]);

	// tracks 12 to 15 don't exist
	send(&mut session, &mut host, [0x90, PAD_0 + 7, 127]);
	assert_eq!(host.launched().len(), 2);
}

#[test]
fn birds_eye_jumps_to_a_bank_page() {
	init();
	let mut host = host(16, 8);
	let mut session = session(ControllerConfig::default(), &host);

	send(&mut session, &mut host, [0xB0, SHIFT, 127]);
	press(&mut session, &mut host, SELECTOR_0 + 3);
	send(&mut session, &mut host, [0xB0, SHIFT, 0]);
	assert!(session.grid().is_birds_eye());
	assert_eq!(session.cell(0, 0), None);

	let colors = session.render_grid(&host);
	assert_eq!(colors.get(0, 0), Some(ColorId::Highlight));
	assert_eq!(colors.get(1, 0), Some(ColorId::Normal));
	assert_eq!(colors.get(2, 0), Some(ColorId::Off));

	send(&mut session, &mut host, [0x90, PAD_0 + 1, 127]);
	assert_eq!(host.track_bank().scroll_position(), 8);
	assert!(host.launched().is_empty());
	assert_eq!(session.render_grid(&host).get(1, 0), Some(ColorId::Highlight));
}

#[test]
fn sessions_are_independent() {
	init();
	let mut first_host = host(8, 8);
	let mut second_host = host(8, 8);
	let mut first = session(ControllerConfig::default(), &first_host);
	let mut second = session(ControllerConfig::default(), &second_host);

	send(&mut first, &mut first_host, [0xB0, SHIFT, 127]);
	send(&mut second, &mut second_host, [0xB0, KNOB_0, 1]);
	assert_eq!(second_host.value_of(VOLUME), Some(65));
	assert_eq!(first_host.value_of(VOLUME), Some(64));
	assert!(first.is_shift_held());
	assert!(!second.is_shift_held());
}

#[test]
fn text_display_follows_the_page() {
	init();
	let mut host = host(8, 8);
	let mut session = session(ControllerConfig { label_width: 7, ..ControllerConfig::default() }, &host);
	let mut renderer = TextRenderer::new(session.config().label_width);

	session.render(&host, &mut renderer).unwrap();
	assert_eq!(renderer.title(), "Mixer");
	assert!(renderer.lines()[0].starts_with("Volume Chance "));
	assert!(renderer.lines()[1].starts_with("64     "));

	press(&mut session, &mut host, SELECTOR_0 + 1);
	session.render(&host, &mut renderer).unwrap();
	assert_eq!(renderer.title(), "Recurrence");
	assert!(renderer.lines()[0].starts_with("On     Off    On     Off    -"));
}
