// Title transition phases. Each phase is applied to the display, then the next
// one is due after the returned delay.

use crate::model::{TitleEntry, TitleStyle};
use crate::platform::Element;

pub const FLICKER_CLASS: &str = "glitch-flicker-out";
pub const GLITCH_CLASS: &str = "glitch-effect";
pub const DATA_TEXT_ATTR: &str = "data-text";

/// Flicker-out before the text swap.
pub const FLICKER_OUT_MS: u32 = 50;
/// Delay between the swap and the glitch marker.
pub const GLITCH_DELAY_MS: u32 = 10;
/// Glitch marker is cleared this long after the swap (CSS animation is 400ms).
pub const GLITCH_CLEAR_MS: u32 = 450;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlitchPhase {
    #[default]
    Idle,
    FlickeringOut,
    TextSwapped,
    Glitching,
}

impl GlitchPhase {
    /// Following phase and the delay before it starts.
    pub fn next(self) -> Option<(u32, GlitchPhase)> {
        match self {
            GlitchPhase::Idle => None,
            GlitchPhase::FlickeringOut => Some((FLICKER_OUT_MS, GlitchPhase::TextSwapped)),
            GlitchPhase::TextSwapped => Some((GLITCH_DELAY_MS, GlitchPhase::Glitching)),
            GlitchPhase::Glitching => Some((
                GLITCH_CLEAR_MS - GLITCH_DELAY_MS,
                GlitchPhase::Idle,
            )),
        }
    }

    pub fn apply(self, display: &dyn Element, entry: &TitleEntry) {
        match self {
            GlitchPhase::FlickeringOut => {
                display.add_class(FLICKER_CLASS);
                display.remove_class(GLITCH_CLASS);
            }
            GlitchPhase::TextSwapped => {
                for style in TitleStyle::ALL {
                    display.remove_class(style.class());
                }
                display.remove_class(FLICKER_CLASS);
                display.set_text(&entry.text);
                display.set_attribute(DATA_TEXT_ATTR, &entry.text);
                display.add_class(entry.style.class());
            }
            GlitchPhase::Glitching => display.add_class(GLITCH_CLASS),
            GlitchPhase::Idle => display.remove_class(GLITCH_CLASS),
        }
    }
}
