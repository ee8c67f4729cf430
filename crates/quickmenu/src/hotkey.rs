//! Hotkey spec parsing and the background listener thread.
//!
//! The listener is the only code in the app that runs off the UI thread. It
//! never touches UI-owned state: it reads the cycle flag and posts user
//! events through the event-loop proxy, nothing more.

use std::thread;

use global_hotkey::{
    GlobalHotKeyEvent, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use quickmenu_engine::CycleFlag;
use tao::event_loop::EventLoopProxy;
use tracing::{debug, trace, warn};

use crate::app::AppEvent;

/// The temporary Escape binding used as a redundant dismissal path while a
/// popup cycle is open.
pub fn escape_hook() -> HotKey {
    HotKey::new(None, Code::Escape)
}

/// Forward global hotkey presses onto the UI-owning thread.
///
/// Signals that arrive while a cycle is already in flight are dropped, not
/// queued: only one popup may be open at a time. The Escape hook is only
/// forwarded while a cycle is active, since its registration is transient.
pub fn spawn_listener(
    proxy: EventLoopProxy<AppEvent>,
    main_id: u32,
    flag: CycleFlag,
) -> thread::JoinHandle<()> {
    let escape_id = escape_hook().id();
    thread::spawn(move || {
        let receiver = GlobalHotKeyEvent::receiver();
        loop {
            let event = match receiver.recv() {
                Ok(event) => event,
                Err(_) => break,
            };
            if event.state != HotKeyState::Pressed {
                continue;
            }
            trace!(id = event.id, "global hotkey event");
            if event.id == main_id {
                if flag.is_active() {
                    debug!("hotkey pressed while a popup cycle is active, ignored");
                } else if proxy.send_event(AppEvent::HotkeyPressed).is_err() {
                    break;
                }
            } else if event.id == escape_id
                && flag.is_active()
                && proxy.send_event(AppEvent::EscapeHook).is_err()
            {
                break;
            }
        }
        warn!("global hotkey listener stopped");
    })
}

/// Parse a `+`-separated hotkey spec such as `ctrl+alt+space`.
pub fn parse_hotkey(spec: &str) -> Result<HotKey, String> {
    let mut mods = Modifiers::empty();
    let mut code: Option<Code> = None;
    for token in spec.split('+') {
        let token = token.trim().to_ascii_lowercase();
        match token.as_str() {
            "" => return Err("empty token".into()),
            "ctrl" | "control" => mods |= Modifiers::CONTROL,
            "alt" | "opt" | "option" => mods |= Modifiers::ALT,
            "shift" => mods |= Modifiers::SHIFT,
            "cmd" | "command" | "super" | "win" | "meta" => mods |= Modifiers::META,
            key => {
                if code.is_some() {
                    return Err(format!("more than one key in \"{}\"", spec));
                }
                code = Some(parse_key(key)?);
            }
        }
    }
    match code {
        Some(code) => Ok(HotKey::new(
            (!mods.is_empty()).then_some(mods),
            code,
        )),
        None => Err("missing a non-modifier key".into()),
    }
}

/// Map one lowercased key token to a UI-Events key code.
fn parse_key(token: &str) -> Result<Code, String> {
    let code = match token {
        "space" => Code::Space,
        "esc" | "escape" => Code::Escape,
        "enter" | "return" | "ret" => Code::Enter,
        "tab" => Code::Tab,
        "backspace" => Code::Backspace,
        "delete" | "del" => Code::Delete,
        "insert" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "pgup" | "pageup" => Code::PageUp,
        "pgdn" | "pagedown" => Code::PageDown,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        other => return Err(format!("unknown key \"{}\"", other)),
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_default_hotkey() {
        let hk = parse_hotkey("ctrl+alt+space").unwrap();
        assert_eq!(
            hk,
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::ALT), Code::Space)
        );
    }

    #[test]
    fn parses_modifier_synonyms() {
        assert_eq!(
            parse_hotkey("cmd+shift+k").unwrap(),
            HotKey::new(Some(Modifiers::META | Modifiers::SHIFT), Code::KeyK)
        );
        assert_eq!(
            parse_hotkey("win+1").unwrap(),
            HotKey::new(Some(Modifiers::META), Code::Digit1)
        );
        assert_eq!(
            parse_hotkey("opt+f5").unwrap(),
            HotKey::new(Some(Modifiers::ALT), Code::F5)
        );
    }

    #[test]
    fn bare_keys_have_no_modifiers() {
        assert_eq!(parse_hotkey("f9").unwrap(), HotKey::new(None, Code::F9));
    }

    #[test]
    fn specs_are_case_and_space_insensitive() {
        assert_eq!(
            parse_hotkey("Ctrl + Alt + Space").unwrap(),
            parse_hotkey("ctrl+alt+space").unwrap()
        );
    }

    #[test]
    fn rejects_modifier_only_specs() {
        assert!(parse_hotkey("ctrl+alt").is_err());
    }

    #[test]
    fn rejects_two_keys() {
        assert!(parse_hotkey("a+b").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_hotkey("ctrl+bogus").is_err());
        assert!(parse_hotkey("").is_err());
    }

    #[test]
    fn escape_hook_is_a_bare_escape() {
        assert_eq!(escape_hook(), HotKey::new(None, Code::Escape));
    }
}
