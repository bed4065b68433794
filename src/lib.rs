/*!
Maps a control surface with eight endless encoders, a row of buttons under them, a row of
page-select buttons and a pad grid onto a music host: its parameters, its step sequencer and its
clip launcher.

The crate knows nothing about MIDI ports or about any particular host. You feed it decoded
hardware events and a value implementing the host traits ([`ParameterHost`], [`StepStore`],
[`SessionView`], [`CapabilityQuery`]), and you read back the colors and display contents it wants
to show.

# Pages

The eight knobs show one [`Page`] at a time. A page either binds each knob to a host parameter, or
is the recurrence editor for the step currently selected in the host's step editor. Pages may
require host capabilities; a page whose requirements aren't met simply can't be selected.

```
use launchmap::{ButtonEvent, ButtonRow, Page, PageId, ParameterId, Session, SlotBinding, SLOT_COUNT};
use launchmap::mock::{MockHost, MockParameter};

let mut slots = [SlotBinding::Empty; SLOT_COUNT];
slots[0] = SlotBinding::parameter(ParameterId(1), "Volume");
let pages = vec![Page::new(PageId("Mixer"), slots).with_selector(0)];

let mut host = MockHost::new();
host.add_parameter(ParameterId(1), MockParameter::new(launchmap::ValueRange::MIDI, 64));

let mut session = Session::new(Default::default(), pages)?;
session.attach_host(&host);

// one tick clockwise
session.on_knob(&mut host, 0, 1);
assert_eq!(host.value_of(ParameterId(1)), Some(65));
# Ok::<(), launchmap::MappingError>(())
```

# Session grid

The pad grid is a window onto the host's tracks and scenes. It can be transposed ("flipped"),
restricted to the upper or lower half of the bank page, or zoomed out to a birds-eye view where
each pad stands for a whole bank page. See [`GridWindow`].

# Displays

[`Session::page_view`] describes what the display should show; a [`PageRenderer`] turns that into
pixels or characters. [`TextRenderer`] is always available, `GraphicRenderer` draws onto any
`embedded-graphics` target when the `embedded-graphics` feature is enabled.
*/

#[macro_use]
pub mod util;

mod errors;
pub use errors::*;

mod color;
pub use color::*;

mod host;
pub use host::*;

mod capabilities;
pub use capabilities::*;

pub mod encoder;
pub use encoder::{KnobThrottle, PhysicalControl, TouchOutcome, DEFAULT_SCROLL_RATE, SLOT_COUNT};

mod page;
pub use page::*;

mod dispatcher;
pub use dispatcher::*;

pub mod recurrence;
pub use recurrence::{Preset, Recurrence, RecurrenceCell, RecurrenceEditor, MAX_RECURRENCE_LENGTH};

pub mod grid;
pub use grid::{BankPageCoord, Direction, GridWindow, RowMode, SessionCoord};

mod input;
pub use input::*;

mod config;
pub use config::*;

pub mod render;
pub use render::{PageRenderer, PageView, SlotView, TextRenderer};

mod session;
pub use session::*;

pub mod mock;

pub mod prelude {
	pub use crate::host::{Bank, CapabilityQuery, Host, Parameter, ParameterHost, SessionView, StepStore};
	pub use crate::render::PageRenderer;
}
