//! Terminal form state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use passbook_core::{Clipboard, Controller, FormField, Notice};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

const SEARCH_MAX_LEN: usize = 200;
const FIELD_MAX_LEN: usize = 256;
const READY: &str = "Ready";

/// Which part of the screen receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    Search,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Field(FormField::Password) => Focus::Search,
            Focus::Field(field) => Focus::Field(field.next()),
            Focus::Search => Focus::List,
            Focus::List => Focus::Field(FormField::Id),
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Field(FormField::Id) => Focus::List,
            Focus::Field(field) => Focus::Field(field.previous()),
            Focus::Search => Focus::Field(FormField::Password),
            Focus::List => Focus::Search,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Waiting for y/n before deleting this id
    ConfirmDelete(i64),
}

pub struct App<C> {
    pub(super) controller: Controller<C>,
    pub(super) focus: Focus,
    pub(super) mode: AppMode,
    pub(super) search_input: String,
    pub(super) list_state: ListState,
    pub(super) toast: Option<(Notice, Instant)>,
    pub(super) status: String,
    status_reset_at: Option<Instant>,
    notice_duration: Duration,
    status_reset: Duration,
    should_quit: bool,
}

impl<C: Clipboard> App<C> {
    pub fn new(
        controller: Controller<C>,
        notice_duration: Duration,
        status_reset: Duration,
    ) -> Self {
        let mut app = Self {
            controller,
            focus: Focus::Field(FormField::Website),
            mode: AppMode::Normal,
            search_input: String::new(),
            list_state: ListState::default(),
            toast: None,
            status: READY.to_string(),
            status_reset_at: None,
            notice_duration,
            status_reset,
            should_quit: false,
        };
        app.sync_selection();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Expire the toast and reset the status bar once their time is up
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|(_, until)| now >= *until) {
            self.toast = None;
        }
        if self.status_reset_at.is_some_and(|at| now >= at) {
            self.status = READY.to_string();
            self.status_reset_at = None;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if let AppMode::ConfirmDelete(id) = self.mode {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.mode = AppMode::Normal;
                    let notice = self.controller.confirm_delete(id);
                    self.after_list_change();
                    self.notify(notice, now);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = AppMode::Normal;
                }
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_shortcut(key.code, now);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            _ => match self.focus {
                Focus::List => self.handle_list_key(key.code),
                Focus::Search => self.handle_search_key(key.code, now),
                Focus::Field(field) => self.handle_field_key(field, key.code),
            },
        }
    }

    fn handle_shortcut(&mut self, code: KeyCode, now: Instant) {
        let notice = match code {
            KeyCode::Char('q') | KeyCode::Char('c') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('s') => {
                let notice = self.controller.save();
                self.after_list_change();
                notice
            }
            KeyCode::Char('u') => {
                let notice = self.controller.update();
                self.after_list_change();
                notice
            }
            KeyCode::Char('d') => match self.controller.begin_delete() {
                Ok(id) => {
                    self.mode = AppMode::ConfirmDelete(id);
                    return;
                }
                Err(notice) => notice,
            },
            KeyCode::Char('y') => self.controller.copy_password(),
            KeyCode::Char('g') => self.controller.generate_password(),
            KeyCode::Char('f') => {
                self.focus = Focus::Search;
                return;
            }
            KeyCode::Char('r') => {
                self.search_input.clear();
                let notice = self.controller.show_all();
                self.after_list_change();
                notice
            }
            KeyCode::Char('n') => {
                self.controller.clear_form();
                self.focus = Focus::Field(FormField::Website);
                return;
            }
            _ => return,
        };
        self.notify(notice, now);
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::Enter => {
                if let Some(index) = self.list_state.selected() {
                    self.controller.select(index);
                    self.focus = Focus::Field(FormField::Website);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Enter => {
                let notice = self.controller.search(&self.search_input);
                if !notice.is_error() {
                    self.list_state.select(None);
                    self.sync_selection();
                }
                self.notify(notice, now);
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() && self.search_input.chars().count() < SEARCH_MAX_LEN {
                    self.search_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_field_key(&mut self, field: FormField, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Backspace => {
                self.controller.form_mut().field_mut(field).pop();
            }
            KeyCode::Char(c) => {
                let value = self.controller.form_mut().field_mut(field);
                if !c.is_control() && value.chars().count() < FIELD_MAX_LEN {
                    value.push(c);
                }
            }
            _ => {}
        }
    }

    /// Move the list highlight and load the highlighted record into the form
    fn move_selection(&mut self, delta: i64) {
        let len = self.controller.records().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(current) => (current as i64 + delta).clamp(0, len as i64 - 1) as usize,
            None => 0,
        };
        self.list_state.select(Some(next));
        self.controller.select(next);
    }

    fn after_list_change(&mut self) {
        if self.controller.search_term().is_none() {
            self.search_input.clear();
        }
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        let len = self.controller.records().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(index) if index >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    fn notify(&mut self, notice: Notice, now: Instant) {
        self.status = format!("{}: {}", notice.title(), notice.message);
        self.status_reset_at = Some(now + self.status_reset);
        self.toast = Some((notice, now + self.notice_duration));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passbook_core::{
        CredentialStore, NoticeLevel, PasswordGeneratorConfig, Result, TableName,
    };

    #[derive(Default)]
    struct MemoryClipboard(Option<String>);

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.0 = Some(text.to_string());
            Ok(())
        }
    }

    fn app() -> App<MemoryClipboard> {
        let store = CredentialStore::in_memory(TableName::default()).unwrap();
        let controller = Controller::new(
            store,
            MemoryClipboard::default(),
            PasswordGeneratorConfig::default(),
        )
        .unwrap();
        App::new(
            controller,
            Duration::from_millis(1_500),
            Duration::from_millis(3_000),
        )
    }

    fn press(app: &mut App<MemoryClipboard>, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    fn ctrl(app: &mut App<MemoryClipboard>, c: char, now: Instant) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), now);
    }

    fn type_text(app: &mut App<MemoryClipboard>, text: &str, now: Instant) {
        for c in text.chars() {
            press(app, KeyCode::Char(c), now);
        }
    }

    fn add_record(app: &mut App<MemoryClipboard>, website: &str, now: Instant) {
        app.focus = Focus::Field(FormField::Website);
        type_text(app, website, now);
        press(app, KeyCode::Tab, now);
        type_text(app, "alice", now);
        press(app, KeyCode::Tab, now);
        type_text(app, "Passw0rd!", now);
        ctrl(app, 's', now);
    }

    #[test]
    fn test_typing_and_saving() {
        let now = Instant::now();
        let mut app = app();
        add_record(&mut app, "github.com", now);

        assert_eq!(app.controller.records().len(), 1);
        assert_eq!(app.controller.records()[0].website, "github.com");
        assert_eq!(app.status, "Success: Record saved successfully");
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_notice_expires() {
        let now = Instant::now();
        let mut app = app();
        ctrl(&mut app, 's', now);
        assert_eq!(app.toast.as_ref().map(|(n, _)| n.level), Some(NoticeLevel::Error));

        app.tick(now + Duration::from_millis(1_600));
        assert!(app.toast.is_none());
        assert_ne!(app.status, READY);

        app.tick(now + Duration::from_millis(3_100));
        assert_eq!(app.status, READY);
    }

    #[test]
    fn test_list_navigation_fills_form() {
        let now = Instant::now();
        let mut app = app();
        add_record(&mut app, "a.com", now);
        add_record(&mut app, "b.com", now);

        app.focus = Focus::List;
        press(&mut app, KeyCode::Down, now);
        assert_eq!(app.controller.form().website, "a.com");
        press(&mut app, KeyCode::Down, now);
        assert_eq!(app.controller.form().website, "b.com");
        press(&mut app, KeyCode::Down, now);
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let now = Instant::now();
        let mut app = app();
        add_record(&mut app, "github.com", now);
        app.focus = Focus::List;
        press(&mut app, KeyCode::Down, now);

        ctrl(&mut app, 'd', now);
        assert!(matches!(app.mode, AppMode::ConfirmDelete(_)));
        press(&mut app, KeyCode::Char('n'), now);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.controller.records().len(), 1);

        ctrl(&mut app, 'd', now);
        press(&mut app, KeyCode::Char('y'), now);
        assert!(app.controller.records().is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_delete_without_selection_does_not_prompt() {
        let now = Instant::now();
        let mut app = app();
        ctrl(&mut app, 'd', now);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.status, "Error: Please select a record to delete");
    }

    #[test]
    fn test_search_box() {
        let now = Instant::now();
        let mut app = app();
        add_record(&mut app, "github.com", now);
        add_record(&mut app, "bank.example", now);

        ctrl(&mut app, 'f', now);
        assert_eq!(app.focus, Focus::Search);
        type_text(&mut app, "git", now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.controller.records().len(), 1);

        ctrl(&mut app, 'r', now);
        assert_eq!(app.controller.records().len(), 2);
        assert!(app.search_input.is_empty());
    }

    #[test]
    fn test_generate_and_copy() {
        let now = Instant::now();
        let mut app = app();
        ctrl(&mut app, 'g', now);
        let generated = app.controller.form().password.clone();
        assert_eq!(generated.len(), 16);

        ctrl(&mut app, 'y', now);
        assert_eq!(app.controller.clipboard().0.as_deref(), Some(generated.as_str()));
    }

    #[test]
    fn test_focus_cycle() {
        let mut focus = Focus::Field(FormField::Id);
        for _ in 0..6 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Field(FormField::Id));
        assert_eq!(Focus::Field(FormField::Id).previous(), Focus::List);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Esc, Instant::now());
        assert!(app.should_quit());
    }
}
