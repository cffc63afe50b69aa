use chrono::NaiveDate;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::config::AppConfig;
use crate::reports::{EMPTY_REPORT_MESSAGE, SELECT_REPORT_MESSAGE};
use crate::state::{NavEvent, NavigationState, Page, Report, View};

use super::forms::{Form, FormInput};
use super::helpers::{key_hints, report_table, scroll_offset};
use super::screens::{
    DataEntryScreen, EntryTab, Notice, ReportScreen, ScreenAction, SettingsScreen,
    BAAL_SUNDAY_NOTE, TAB_OPTIONS,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Sidebar width, wide enough for "Centre Listing Report" plus indent.
const SIDEBAR_WIDTH: u16 = 28;

/// Which pane receives keystrokes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Content,
}

/// One row of the sidebar menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SidebarItem {
    Page(Page),
    Report(Report),
}

impl SidebarItem {
    fn event(self) -> NavEvent {
        match self {
            SidebarItem::Page(page) => NavEvent::SelectPage(page),
            SidebarItem::Report(report) => NavEvent::SelectReport(report),
        }
    }
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Success,
    Warning,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Success => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
        }
    }
}

impl From<Notice> for StatusMessage {
    fn from(notice: Notice) -> Self {
        match notice {
            Notice::Success(text) => Self {
                text,
                kind: StatusKind::Success,
            },
            Notice::Warning(text) => Self {
                text,
                kind: StatusKind::Warning,
            },
        }
    }
}

/// Session state: navigation flags plus the per-page form state.
pub struct App {
    nav: NavigationState,
    focus: Focus,
    sidebar_cursor: usize,
    data_entry: DataEntryScreen,
    average_sangat: ReportScreen,
    centre_listing: ReportScreen,
    settings: SettingsScreen,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: &AppConfig, today: NaiveDate) -> Self {
        Self {
            nav: NavigationState::new(),
            focus: Focus::Sidebar,
            sidebar_cursor: 0,
            data_entry: DataEntryScreen::new(today),
            average_sangat: ReportScreen::new(Report::AverageSangat, config.report_years()),
            centre_listing: ReportScreen::new(Report::CentreListing, config.report_years()),
            settings: SettingsScreen::new(),
            status: None,
        }
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Text of the footer message, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Process one key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(code),
            Focus::Content => {
                self.handle_content_key(code);
                false
            }
        }
    }

    fn sidebar_items(&self) -> Vec<SidebarItem> {
        let mut items = Vec::with_capacity(Page::ALL.len() + Report::ALL.len());
        for page in Page::ALL {
            items.push(SidebarItem::Page(page));
            if page == Page::Reports && self.nav.current_page() == Page::Reports {
                items.extend(Report::ALL.into_iter().map(SidebarItem::Report));
            }
        }
        items
    }

    fn handle_sidebar_key(&mut self, code: KeyCode) -> bool {
        let items = self.sidebar_items();
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.sidebar_cursor = (self.sidebar_cursor + 1).min(items.len().saturating_sub(1));
            }
            KeyCode::Enter => {
                if let Some(item) = items.get(self.sidebar_cursor).copied() {
                    self.dispatch(item.event());
                    self.sidebar_cursor = self
                        .sidebar_items()
                        .iter()
                        .position(|candidate| *candidate == item)
                        .unwrap_or_default();
                }
            }
            KeyCode::Right | KeyCode::Tab => {
                if self.content_accepts_focus() {
                    self.focus = Focus::Content;
                }
            }
            _ => {}
        }
        false
    }

    fn content_accepts_focus(&self) -> bool {
        match self.nav.view() {
            View::DataEntryForm => self.data_entry.form.has_focusable(),
            View::AverageSangatReport => self.average_sangat.form.has_focusable(),
            View::CentreListingReport => self.centre_listing.form.has_focusable(),
            View::SettingsForm => self.settings.form.has_focusable(),
            View::SelectReportPlaceholder => false,
        }
    }

    fn handle_content_key(&mut self, code: KeyCode) {
        let input = match code {
            KeyCode::Esc => {
                self.focus = Focus::Sidebar;
                return;
            }
            KeyCode::Down | KeyCode::Tab => FormInput::Next,
            KeyCode::Up | KeyCode::BackTab => FormInput::Previous,
            KeyCode::Right => FormInput::Increase,
            KeyCode::Left => FormInput::Decrease,
            KeyCode::Enter => FormInput::Activate,
            KeyCode::Backspace => FormInput::Backspace,
            KeyCode::Char(ch) => FormInput::Char(ch),
            _ => return,
        };

        let action = match self.nav.view() {
            View::DataEntryForm => self.data_entry.handle(input),
            View::AverageSangatReport => self.average_sangat.handle(input),
            View::CentreListingReport => self.centre_listing.handle(input),
            View::SettingsForm => self.settings.handle(input),
            View::SelectReportPlaceholder => {
                self.focus = Focus::Sidebar;
                None
            }
        };

        match action {
            Some(ScreenAction::Notice(notice)) => self.status = Some(notice.into()),
            Some(ScreenAction::Nav(event)) => self.dispatch(event),
            None => {}
        }
    }

    /// Feed a navigation event to the state controller and bring the screens
    /// in line with the result.
    fn dispatch(&mut self, event: NavEvent) {
        let before = self.nav.view();
        self.nav.apply(event);
        let after = self.nav.view();
        log::info!("{event:?}: {before:?} -> {after:?}");

        let visible = self.nav.filters_visible();
        self.average_sangat.set_filters_visible(visible);
        self.centre_listing.set_filters_visible(visible);

        if before != after {
            self.average_sangat.reset();
            self.clear_status();
        }
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (body_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body_area);
        self.draw_sidebar(frame, columns[0]);

        let content_area = columns[1];
        match self.nav.view() {
            View::DataEntryForm => self.draw_data_entry(frame, content_area),
            View::AverageSangatReport => {
                self.draw_report(frame, content_area, &self.average_sangat)
            }
            View::CentreListingReport => {
                self.draw_report(frame, content_area, &self.centre_listing)
            }
            View::SelectReportPlaceholder => self.draw_report_placeholder(frame, content_area),
            View::SettingsForm => self.draw_settings(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_sidebar(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .sidebar_items()
            .into_iter()
            .map(|item| {
                let (label, active) = match item {
                    SidebarItem::Page(page) => {
                        (page.title().to_string(), self.nav.current_page() == page)
                    }
                    SidebarItem::Report(report) => (
                        format!("  {}", report.title()),
                        self.nav.current_report() == Some(report),
                    ),
                };
                let style = if active {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(label, style)))
            })
            .collect();

        let border_style = if self.focus == Focus::Sidebar {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Navigation")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if self.focus == Focus::Sidebar {
            state.select(Some(self.sidebar_cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn content_block(&self, title: &str) -> Block<'static> {
        let border_style = if self.focus == Focus::Content {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style)
    }

    fn draw_form<K: Copy + PartialEq>(&self, frame: &mut Frame, area: Rect, form: &Form<K>) {
        let (lines, focused_line) = form.build_lines(self.focus == Focus::Content);
        let offset = scroll_offset(focused_line, area.height);
        let paragraph = Paragraph::new(lines).scroll((offset, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_data_entry(&self, frame: &mut Frame, area: Rect) {
        let block = self.content_block("Data Entry");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tab = self.data_entry.active_tab();
        let note_height = if tab == EntryTab::Baal { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(note_height),
                Constraint::Min(0),
            ])
            .split(inner);

        let selected = match tab {
            EntryTab::Main => 0,
            EntryTab::Baal => 1,
        };
        let tabs = Tabs::new(TAB_OPTIONS.to_vec())
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(tabs, chunks[0]);

        if tab == EntryTab::Baal {
            let note = Paragraph::new(Span::styled(
                BAAL_SUNDAY_NOTE,
                Style::default().fg(Color::LightBlue),
            ));
            frame.render_widget(note, chunks[1]);
        }

        self.draw_form(frame, chunks[2], &self.data_entry.form);
    }

    fn draw_report(&self, frame: &mut Frame, area: Rect, screen: &ReportScreen) {
        let block = self.content_block(screen.report.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let form_lines = screen.form.visible_fields().count() as u16 + 4;
        let form_height = if self.nav.filters_visible() {
            Constraint::Percentage(60)
        } else {
            Constraint::Length(form_lines)
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([form_height, Constraint::Min(0)])
            .split(inner);

        self.draw_form(frame, chunks[0], &screen.form);

        let table_block = Block::default().borders(Borders::TOP).title("Results");
        if screen.table.is_empty() {
            let message = Paragraph::new(EMPTY_REPORT_MESSAGE)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(table_block);
            frame.render_widget(message, chunks[1]);
        } else {
            frame.render_widget(report_table(&screen.table).block(table_block), chunks[1]);
        }
    }

    fn draw_report_placeholder(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(SELECT_REPORT_MESSAGE)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(self.content_block(Page::Reports.title()));
        frame.render_widget(paragraph, area);
    }

    fn draw_settings(&self, frame: &mut Frame, area: Rect) {
        let block = self.content_block(Page::Settings.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.draw_form(frame, inner, &self.settings.form);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match self.focus {
            Focus::Sidebar => key_hints(&[
                ("↑↓", "Navigate"),
                ("Enter", "Open"),
                ("→/Tab", "Edit Page"),
                ("q", "Quit"),
            ]),
            Focus::Content
                if self.nav.view() == View::DataEntryForm && self.data_entry.is_cancelling() =>
            {
                key_hints(&[
                    ("Type", "Reason"),
                    ("Enter", "Confirm Cancellation"),
                    ("Esc", "Sidebar"),
                ])
            }
            Focus::Content => key_hints(&[
                ("↑↓/Tab", "Field"),
                ("←→", "Change"),
                ("Space", "Toggle"),
                ("Enter", "Press"),
                ("Esc", "Sidebar"),
            ]),
        }
    }
}
