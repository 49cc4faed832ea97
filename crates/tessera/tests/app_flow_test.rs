//! # App Flow Integration Test
//!
//! A config-driven app fed from another thread, ticked to completion.

use std::thread;

use tessera::{App, AppConfig, Scene};
use tessera_ui::input::EventKind;
use tessera_ui::widget::{Button, Column, Text};
use tessera_ui::{Color, CommandRecorder, Event, Key, MouseButton, RenderCommand};

const CONFIG: &str = r#"
title = "flow"
width = 400
height = 300
current_theme = "light"

[themes.light.colors]
text = [0.0, 0.0, 0.0, 1.0]
"#;

fn build() -> App {
    let config = AppConfig::from_toml_str(CONFIG).unwrap();
    let mut app = App::new(config).unwrap();

    let scene = app.scene_mut();
    let column = scene.tree.create(Column::new().gap(8.0));
    let title = scene.tree.create(Text::new("Inventory"));
    scene.tree.set_size(title, 200.0, 20.0);
    let button = scene.tree.create(Button::new("Craft").on_click(|tree, id| tree.set_state(id, "clicked", true)));
    scene.tree.set_size(button, 100.0, 30.0);
    scene.tree.add_child(column, title).unwrap();
    scene.tree.add_child(column, button).unwrap();
    app.set_root(column).unwrap();
    app
}

#[test]
fn test_theme_from_config_is_shared() {
    let app = build();
    let root = app.root().unwrap();
    let context = app.scene().tree.context(root).unwrap();
    assert_eq!(context.read().current_theme_name(), "light");
    assert_eq!(context.read().theme_color("text"), Color::BLACK);
}

#[test]
fn test_events_from_another_thread() {
    let mut app = build();
    let mut recorder = CommandRecorder::new();
    app.tick(&mut recorder).unwrap();

    let root = app.root().unwrap();
    let button = app.scene().tree.children(root)[1];
    // Column at (0,0) with gap 8: title 0..20, button 28..58.
    assert_eq!(app.scene().tree.bounds(button).map(|r| r.y), Some(28.0));

    let keys = std::rc::Rc::new(std::cell::Cell::new(0));
    let seen = std::rc::Rc::clone(&keys);
    app.router_mut()
        .register_callback(EventKind::KeyDown, move |_, _, _: &mut Scene| seen.set(seen.get() + 1));

    let sender = app.event_sender();
    let producer = thread::spawn(move || {
        let press = [
            Event::MouseMove { x: 10.0, y: 40.0 },
            Event::MouseDown {
                x: 10.0,
                y: 40.0,
                button: MouseButton::Left,
            },
            Event::MouseUp {
                x: 10.0,
                y: 40.0,
                button: MouseButton::Left,
            },
            Event::KeyDown {
                key: Key::Character('a'),
                text: Some('a'),
            },
        ];
        for event in press {
            assert!(sender.send_blocking(event));
        }
    });
    producer.join().unwrap();

    let stats = app.tick(&mut recorder).unwrap();
    assert_eq!(stats.events_routed, 4);
    assert_eq!(keys.get(), 1);

    let tree = &app.scene().tree;
    assert!(tree.node(button).unwrap().state_flag("clicked"));
    assert!(tree.node(button).unwrap().state_flag("hovered"));
    assert!(!tree.node(button).unwrap().state_flag("pressed"));
    assert_eq!(app.scene().dispatcher.focused(), Some(button));
}

#[test]
fn test_run_until_quit() {
    let mut app = build();
    let mut recorder = CommandRecorder::new();
    app.event_sender().send(Event::Quit);

    app.run(&mut recorder, Some(100)).unwrap();
    assert!(!app.is_running());
    assert_eq!(app.stats().frames_recorded, 1);

    let clears = recorder
        .commands()
        .iter()
        .filter(|c| matches!(c, RenderCommand::Clear { .. }))
        .count();
    assert_eq!(clears, 1);
    assert!(recorder
        .commands()
        .iter()
        .any(|c| matches!(c, RenderCommand::Text { text, .. } if text == "Inventory")));
}
