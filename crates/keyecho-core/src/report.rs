//! Key and modifier reporting to the text log.
//!
//! Line formats:
//!
//! ```text
//! Press:- Scancode: 0x1E, Name: a, Unicode: a (0x0061)
//! Modifers: LSHIFT SHIFT
//! ```

use crate::error::DemoError;
use crate::event::{KeyEvent, Modifiers};
use crate::render::Renderer;
use crate::surface::Surface;
use std::io::Write;

/// Modifier labels in the order they are tested.
const MODIFIER_LABELS: [(Modifiers, &str); 11] = [
    (Modifiers::NUM, "NUMLOCK"),
    (Modifiers::CAPS, "CAPSLOCK"),
    (Modifiers::LCTRL, "LCTRL"),
    (Modifiers::RCTRL, "RCTRL"),
    (Modifiers::RSHIFT, "RSHIFT"),
    (Modifiers::LSHIFT, "LSHIFT"),
    (Modifiers::RALT, "RALT"),
    (Modifiers::LALT, "LALT"),
    (Modifiers::CTRL, "CTRL"),
    (Modifiers::SHIFT, "SHIFT"),
    (Modifiers::ALT, "ALT"),
];

/// Repaint the surface, then log the key event and its modifiers.
///
/// Every key event, press or release, forces a full redraw before anything
/// is written.
pub fn report_key<S, W>(
    renderer: &mut Renderer,
    surface: &mut S,
    out: &mut W,
    key: &KeyEvent,
) -> Result<(), DemoError>
where
    S: Surface + ?Sized,
    W: Write + ?Sized,
{
    renderer.repaint(surface)?;
    write_key_line(out, key)?;
    report_modifiers(out, key.modifiers)?;
    Ok(())
}

/// Write the `Press:-`/`Release:-` line for one key event.
pub fn write_key_line<W: Write + ?Sized>(out: &mut W, key: &KeyEvent) -> std::io::Result<()> {
    let direction = if key.is_press() { "Press" } else { "Release" };
    write!(
        out,
        "{direction}:- Scancode: 0x{:02X}, Name: {}",
        key.scancode, key.sym
    )?;

    if key.is_press() {
        write!(out, ", Unicode: ")?;
        match printable(key.unicode) {
            Some(c) => write!(out, "{c} (0x{:04X})", key.unicode)?,
            None => write!(out, "? (0x{:04X})", key.unicode)?,
        }
    }
    writeln!(out)
}

/// ASCII code points in `[1, 0x80)` print as themselves.
fn printable(code_point: u32) -> Option<char> {
    match code_point {
        1..0x80 => char::from_u32(code_point),
        _ => None,
    }
}

/// Write the `Modifers:` line.
///
/// Combined flags are tested independently of their left/right parts, so a
/// single left-control press logs both `LCTRL` and `CTRL`.
pub fn report_modifiers<W: Write + ?Sized>(out: &mut W, mods: Modifiers) -> std::io::Result<()> {
    write!(out, "Modifers: ")?;

    if mods.is_empty() {
        return writeln!(out, "None");
    }

    for (flag, label) in MODIFIER_LABELS {
        if mods.intersects(flag) {
            write!(out, "{label} ")?;
        }
    }
    writeln!(out)
}
