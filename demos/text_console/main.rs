//! Drives a session against an in-memory host from the terminal.
//!
//! Type short messages as hex bytes, one per line (e.g. `b0 15 01` turns the first knob one tick
//! clockwise, `90 24 7f` presses the top left pad). After each message the display and the pad
//! grid are printed. Run with `RUST_LOG=debug` to see what gets ignored and why.

use std::io::BufRead as _;

use launchmap::mock::{MockHost, MockParameter};
use launchmap::{
    Capability, ColorId, ControllerConfig, Page, PageId, ParameterId, Session, SlotBinding,
    SlotState, StepInfo, StepPosition, TextRenderer, ValueRange, SLOT_COUNT,
};

const VOLUME: ParameterId = ParameterId(1);
const PAN: ParameterId = ParameterId(2);
const MODE: ParameterId = ParameterId(3);
const CHANCE: ParameterId = ParameterId(4);

fn pages() -> Vec<Page> {
    let mut mixer = [SlotBinding::Empty; SLOT_COUNT];
    mixer[0] = SlotBinding::parameter(VOLUME, "Volume");
    mixer[1] = SlotBinding::parameter(PAN, "Pan");
    mixer[2] = SlotBinding::parameter(MODE, "Mode").throttled(8);
    mixer[3] = SlotBinding::parameter(CHANCE, "Chance").requiring(Capability::Chance);

    vec![
        Page::new(PageId("Mixer"), mixer).with_selector(0),
        Page::recurrence(PageId("Recurrence")).with_selector(1),
    ]
}

fn host() -> MockHost {
    let mut host = MockHost::with_banks(12, 8, 16, 8);
    host.add_parameter(VOLUME, MockParameter::new(ValueRange::MIDI, 100));
    host.add_parameter(PAN, MockParameter::new(ValueRange::new(-64, 64), 0));
    host.add_parameter(MODE, MockParameter::new(ValueRange::new(0, 4), 0));
    host.add_parameter(CHANCE, MockParameter::new(ValueRange::MIDI, 127));
    host.support(Capability::Recurrence);
    host.add_step(
        StepPosition { channel: 0, x: 0, y: 60 },
        StepInfo { recurrence_length: 4, recurrence_mask: 0b0101, is_recurrence_enabled: true },
    );
    host.set_slot_state(0, 0, SlotState::Playing);
    host.set_slot_state(1, 0, SlotState::HasContent);
    host.set_slot_state(2, 3, SlotState::Queued);
    host
}

fn parse_hex(line: &str) -> Option<Vec<u8>> {
    line.split_whitespace()
        .map(|byte| u8::from_str_radix(byte, 16).ok())
        .collect()
}

fn color_char(color: ColorId) -> char {
    match color {
        ColorId::Off => '.',
        ColorId::Normal => 'o',
        ColorId::Highlight => 'O',
        ColorId::Playing => '>',
        ColorId::Queued => '~',
        ColorId::Recording => '*',
    }
}

fn print_state(session: &mut Session, host: &MockHost, renderer: &mut TextRenderer) -> Result<(), Box<dyn std::error::Error>> {
    session.render(host, renderer)?;
    println!("[{}]", renderer.title());
    for line in renderer.lines() {
        println!("{}", line);
    }

    for row in session.render_grid(host).rows() {
        let row: String = row.iter().map(|&color| color_char(color)).collect();
        println!("  {}", row);
    }

    for signal in session.take_signals() {
        println!("signal: {:?}", signal);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ControllerConfig { stop_automation_on_release: true, ..ControllerConfig::default() };
    let mut renderer = config.text_renderer().ok_or("this demo only draws character-cell displays")?;
    let mut session = Session::new(config, pages())?;
    let mut host = host();
    session.attach_host(&host);
    session.edit_step(Some(StepPosition { channel: 0, x: 0, y: 60 }));

    print_state(&mut session, &host, &mut renderer)?;
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let data = match parse_hex(&line) {
            Some(data) => data,
            None => {
                eprintln!("not hex: {:?}", line);
                continue;
            }
        };

        if let Some(event) = session.decode(&data) {
            session.handle(&mut host, event);
        }
        print_state(&mut session, &host, &mut renderer)?;
    }

    Ok(())
}
