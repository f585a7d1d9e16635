use fltk::{
    app,
    button::Button,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    menu::{Choice, MenuFlag},
    misc::InputChoice,
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::{Controller, Severity, Status};
use crate::resolutions::AspectFamily;
use crate::settings::Settings;
use crate::windows::Win32WindowSystem;

pub const WIN_WIDTH: i32 = 420;
pub const WIN_HEIGHT: i32 = 250;

const BACKGROUND: (u8, u8, u8) = (0x2c, 0x3e, 0x50);
const REFRESH_BLUE: (u8, u8, u8) = (0x29, 0x80, 0xb9);
const APPLY_GREEN: (u8, u8, u8) = (0x00, 0xbc, 0x8c);

type SharedController = Rc<RefCell<Controller<Win32WindowSystem>>>;

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb(r, g, b)
}

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Escapes characters FLTK menus treat specially so window titles show
/// up literally.
///
/// A leading `_` marks a divider even when backslash-escaped, so it is
/// pushed off the front with a zero-width space instead.
pub fn menu_escape(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 3);
    if label.starts_with('_') {
        out.push(ZERO_WIDTH_SPACE);
    }
    for c in label.chars() {
        match c {
            '\\' | '/' => {
                out.push('\\');
                out.push(c);
            }
            '&' => out.push_str("&&"),
            _ => out.push(c),
        }
    }
    out
}

fn status_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::White,
        Severity::Success => Color::from_rgb(0x2e, 0xcc, 0x71),
        Severity::Warning => Color::from_rgb(0xf3, 0x9c, 0x12),
        Severity::Error => Color::from_rgb(0xe7, 0x4c, 0x3c),
    }
}

fn show_status(frame: &mut Frame, status: &Status) {
    frame.set_label_color(status_color(status.severity));
    frame.set_label(&status.text);
    frame.redraw_label();
    if let Some(mut parent) = frame.parent() {
        parent.redraw();
    }
}

fn fill_app_choice(choice: &mut Choice, labels: &[String]) {
    choice.clear();
    for label in labels {
        choice.add(&menu_escape(label), fltk::enums::Shortcut::None, MenuFlag::Normal, |_| {});
    }
    if !labels.is_empty() {
        choice.set_value(0);
    }
    choice.redraw();
}

fn fill_resolution_choice(input: &mut InputChoice, catalog: &[AspectFamily]) {
    for family in catalog {
        for res in &family.resolutions {
            input.add(&format!("{}/{}", menu_escape(&family.name), res));
        }
    }
}

fn styled_button(x: i32, y: i32, w: i32, h: i32, label: &str, color: Color) -> Button {
    let mut button = Button::new(x, y, w, h, None).with_label(label);
    button.set_label_font(Font::HelveticaBold);
    button.set_label_size(12);
    button.set_label_color(Color::White);
    button.set_frame(FrameType::UpBox);
    button.set_color(color);
    button
}

pub fn run(settings: &Settings, catalog: &[AspectFamily]) -> Result<(), fltk::prelude::FltkError> {
    let app = app::App::default().with_scheme(app::Scheme::Gtk);

    let controller: SharedController = Rc::new(RefCell::new(Controller::new(Win32WindowSystem)));
    let initial = controller.borrow_mut().refresh();

    let mut win = Window::new(100, 100, WIN_WIDTH, WIN_HEIGHT, "Border Terminator");
    win.set_color(rgb(BACKGROUND));

    let mut header = Frame::new(20, 10, WIN_WIDTH - 40, 20, "Select an Application:");
    header.set_label_font(Font::HelveticaBold);
    header.set_label_size(12);
    header.set_label_color(Color::White);
    header.set_frame(FrameType::NoBox);

    let mut app_choice = Choice::new(20, 32, WIN_WIDTH - 40, 25, None);
    app_choice.set_color(Color::White);
    app_choice.set_text_size(12);
    fill_app_choice(&mut app_choice, &controller.borrow().labels());

    let mut res_label = Frame::new(20, 64, 90, 25, "Resolution:");
    res_label.set_label_size(12);
    res_label.set_label_color(Color::White);
    res_label.set_align(Align::Left | Align::Inside);

    let mut res_input = InputChoice::new(110, 64, WIN_WIDTH - 130, 25, None);
    res_input.set_color(Color::White);
    res_input.set_text_size(12);
    fill_resolution_choice(&mut res_input, catalog);
    res_input.set_value(&settings.default_resolution);

    let mut refresh_button = styled_button(20, 100, 120, 30, "Refresh List", rgb(REFRESH_BLUE));
    let mut apply_button = styled_button(
        150,
        100,
        WIN_WIDTH - 170,
        30,
        "Apply Borderless Mode",
        rgb(APPLY_GREEN),
    );

    let mut status = Frame::new(10, 145, WIN_WIDTH - 20, WIN_HEIGHT - 155, None);
    status.set_label_size(12);
    status.set_align(Align::Center | Align::Inside | Align::Wrap);
    show_status(&mut status, &initial);

    win.end();
    win.show();

    {
        let controller = controller.clone();
        let mut app_choice = app_choice.clone();
        let mut status = status.clone();
        refresh_button.set_callback(move |_| {
            let result = controller.borrow_mut().refresh();
            fill_app_choice(&mut app_choice, &controller.borrow().labels());
            show_status(&mut status, &result);
        });
    }

    {
        let controller = controller.clone();
        let mut status = status.clone();
        apply_button.set_callback(move |_| {
            let labels = controller.borrow().labels();
            let selection = usize::try_from(app_choice.value())
                .ok()
                .and_then(|i| labels.get(i))
                .map(String::as_str);
            let resolution = res_input.value().unwrap_or_default();

            let result = controller.borrow().apply(selection, &resolution);
            show_status(&mut status, &result);
        });
    }

    app.run()
}
