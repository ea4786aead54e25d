use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `locator.locate`(...) with the typed location and selected material
    Search,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcut
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Search => match key.code {
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.location_input.push(character);
                }
            }
            Backspace => {
                app.location_input.pop();
            }
            Enter => {
                action = Action::Search;
            }
            Tab => app.next_material(),
            BackTab => app.previous_material(),
            Down | Right => {
                if !app.centers.is_empty() {
                    app.screen = Screen::Results;
                }
            }
            Esc => {
                action = Action::Quit;
            }
            _ => {}
        },

        Screen::Results => match key.code {
            Up | Char('k') => {
                if app.center_list_index > 0 {
                    app.center_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.center_list_index + 1 < app.centers.len() {
                    app.center_list_index += 1;
                }
            }
            Enter | Right | Char(' ') => app.open_selected_center(),
            Left | Esc | Char('/') => {
                app.screen = Screen::Search;
            }
            Char('q') => {
                action = Action::Quit;
            }
            _ => {}
        },

        Screen::CenterDetail => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::Results;
            }
            Char('q') => {
                action = Action::Quit;
            }
            _ => {}
        },
    }
    action
}
