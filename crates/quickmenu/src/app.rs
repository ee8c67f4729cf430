//! Event-loop wiring for the launcher.
//!
//! The tao event loop is the UI-owning thread: it exclusively owns the
//! overlay window and every native menu object. Background threads (the
//! global hotkey listener) never touch that state; their signals arrive
//! here as user events and are turned into coordinator calls.

use std::{path::PathBuf, process};

use global_hotkey::GlobalHotKeyManager;
use quickmenu_engine::{Coordinator, Executor};
use tao::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    keyboard::KeyCode,
};
use tracing::{debug, info};

use crate::{
    hotkey,
    shell::TaoShell,
    system::{DialogNotifier, FileConfigSource, RealSystem},
};

/// Events marshaled from background threads onto the UI-owning thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The primary global hotkey fired: begin a popup cycle.
    HotkeyPressed,
    /// The temporary global Escape hook fired during an open cycle.
    EscapeHook,
}

/// Run the launcher until the process exits.
pub fn run(config_override: Option<PathBuf>) -> ! {
    let config_path = config::resolve_config_path(config_override.as_deref());

    // Only the hotkey is read at startup; the tree is validated per popup
    // cycle so document edits are picked up without a restart.
    let hotkey_spec = match config::load_hotkey(&config_path) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("{}", err.pretty());
            process::exit(1);
        }
    };
    let main_hotkey = match hotkey::parse_hotkey(&hotkey_spec) {
        Ok(hk) => hk,
        Err(err) => {
            eprintln!("Invalid hotkey \"{}\": {}", hotkey_spec, err);
            process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();

    let manager = match GlobalHotKeyManager::new() {
        Ok(manager) => manager,
        Err(err) => {
            eprintln!("Failed to start the hotkey listener: {}", err);
            process::exit(1);
        }
    };
    if let Err(err) = manager.register(main_hotkey) {
        eprintln!("Failed to register hotkey \"{}\": {}", hotkey_spec, err);
        process::exit(1);
    }

    let shell = match TaoShell::new(&event_loop, manager) {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("Failed to create the capture surface: {}", err);
            process::exit(1);
        }
    };
    let overlay_id = shell.overlay_id();

    let mut coordinator = Coordinator::new(
        shell,
        DialogNotifier,
        Executor::new(RealSystem),
        FileConfigSource::new(config_path.clone()),
    );

    let _listener = hotkey::spawn_listener(
        event_loop.create_proxy(),
        main_hotkey.id(),
        coordinator.cycle_flag(),
    );

    println!(
        "Hotkey: {} - config: {}",
        hotkey_spec,
        config_path.display()
    );
    info!(hotkey = %hotkey_spec, config = %config_path.display(), "quickmenu running");

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::UserEvent(AppEvent::HotkeyPressed) => coordinator.trigger(),
            Event::UserEvent(AppEvent::EscapeHook) => {
                debug!("global escape hook fired");
                coordinator.request_unpost();
            }
            Event::WindowEvent {
                window_id, event, ..
            } if window_id == overlay_id => match event {
                // Any pointer-button press on the capture surface dismisses.
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    ..
                } => {
                    debug!("pointer press on capture surface");
                    coordinator.request_unpost();
                }
                WindowEvent::KeyboardInput { event: key, .. }
                    if key.physical_key == KeyCode::Escape
                        && key.state == ElementState::Pressed =>
                {
                    debug!("escape on capture surface");
                    coordinator.request_unpost();
                }
                WindowEvent::CloseRequested => coordinator.request_unpost(),
                _ => {}
            },
            _ => {}
        }
    });
}
