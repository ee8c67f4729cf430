//! Best-effort global pointer position, per platform.
//!
//! The popup is anchored at the pointer when the platform can report it;
//! the coordinator falls back to the virtual-screen center otherwise.

use quickmenu_engine::Point;

/// Current pointer position in virtual-screen coordinates, if readable.
#[cfg(target_os = "macos")]
pub fn position() -> Option<Point> {
    use core_graphics::{
        event::CGEvent,
        event_source::{CGEventSource, CGEventSourceStateID},
    };

    let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).ok()?;
    let event = CGEvent::new(source).ok()?;
    let location = event.location();
    Some(Point {
        x: location.x,
        y: location.y,
    })
}

/// Current pointer position in virtual-screen coordinates, if readable.
#[cfg(target_os = "windows")]
pub fn position() -> Option<Point> {
    use windows_sys::Win32::{Foundation::POINT, UI::WindowsAndMessaging::GetCursorPos};

    let mut point = POINT { x: 0, y: 0 };
    // SAFETY: GetCursorPos writes into the provided POINT.
    let ok = unsafe { GetCursorPos(&mut point) };
    (ok != 0).then(|| Point {
        x: f64::from(point.x),
        y: f64::from(point.y),
    })
}

/// Current pointer position in virtual-screen coordinates, if readable.
#[cfg(target_os = "linux")]
pub fn position() -> Option<Point> {
    use gtk::gdk::prelude::*;

    let display = gtk::gdk::Display::default()?;
    let seat = display.default_seat()?;
    let pointer = seat.pointer()?;
    let (_screen, x, y) = pointer.position();
    Some(Point {
        x: f64::from(x),
        y: f64::from(y),
    })
}

/// Current pointer position; unsupported on this platform.
#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
pub fn position() -> Option<Point> {
    None
}
