//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Views of the application
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AppView {
    #[default]
    Home,
    Drafts,
    /// Reading a single post
    Post,
    Login,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // View navigation
    ShowHome,
    ShowDrafts,
    ShowLogin,
    Back,
    Logout,

    // Feed list
    SelectNext,
    SelectPrev,
    OpenPost,
    NextPage,
    PrevPage,
    CycleSort,
    Refresh,

    // Home filters
    NextCategory,
    PrevCategory,
    AllCategories,
    NextTag,
    PrevTag,
    ToggleTag,

    // Post view
    ScrollUp,
    ScrollDown,

    // Login / signup form
    FormChar(char),
    FormBackspace,
    NextField,
    ToggleAuthMode,
    Submit,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, view: AppView, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('n') if view == AppView::Login => return Some(UiEvent::ToggleAuthMode),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match view {
        AppView::Home => handle_feed_keys(key, true),
        AppView::Drafts => handle_feed_keys(key, false),
        AppView::Post => handle_post_keys(key),
        AppView::Login => handle_login_keys(key),
    }
}

/// Keys shared by the home and drafts lists
fn handle_feed_keys(key: KeyEvent, filters: bool) -> Option<UiEvent> {
    let common = match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('1') => Some(UiEvent::ShowHome),
        KeyCode::Char('2') => Some(UiEvent::ShowDrafts),
        KeyCode::Char('l') => Some(UiEvent::ShowLogin),
        KeyCode::Char('x') => Some(UiEvent::Logout),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Enter => Some(UiEvent::OpenPost),
        KeyCode::Right | KeyCode::Char('n') => Some(UiEvent::NextPage),
        KeyCode::Left | KeyCode::Char('p') => Some(UiEvent::PrevPage),
        KeyCode::Char('s') => Some(UiEvent::CycleSort),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        _ => None,
    };
    if common.is_some() || !filters {
        return common;
    }

    match key.code {
        KeyCode::Tab => Some(UiEvent::NextCategory),
        KeyCode::BackTab => Some(UiEvent::PrevCategory),
        KeyCode::Char('a') => Some(UiEvent::AllCategories),
        KeyCode::Char(']') => Some(UiEvent::NextTag),
        KeyCode::Char('[') => Some(UiEvent::PrevTag),
        KeyCode::Char(' ') | KeyCode::Char('t') => Some(UiEvent::ToggleTag),
        _ => None,
    }
}

fn handle_post_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(UiEvent::Back),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
        _ => None,
    }
}

/// The login form is always in editing mode
fn handle_login_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => Some(UiEvent::NextField),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Backspace => Some(UiEvent::FormBackspace),
        KeyCode::Char(c) => Some(UiEvent::FormChar(c)),
        _ => None,
    }
}
