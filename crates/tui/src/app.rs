use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use catscroll_core::{Action, CatView, Dispatch, Variant, ViewController};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::block_font;

const TICK_RATE: Duration = Duration::from_millis(250);
const WINDOW_WIDTH: u16 = 90;
const WINDOW_HEIGHT: u16 = 25;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
        }
    }
}

impl Theme {
    /// Foreground for record labels, following the alive/dead tint when present.
    fn record_fg(&self, view: &CatView) -> Color {
        view.tint()
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(self.primary_fg)
    }
}

/// Focusable widgets in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Previous,
    Next,
    Kill,
    Name,
    Colour,
    Add,
}

impl Control {
    fn order(variant: Variant) -> &'static [Control] {
        const RICH: [Control; 6] = [
            Control::Previous,
            Control::Next,
            Control::Kill,
            Control::Name,
            Control::Colour,
            Control::Add,
        ];
        const SIMPLE: [Control; 4] = [
            Control::Previous,
            Control::Next,
            Control::Name,
            Control::Add,
        ];
        match variant {
            Variant::Rich => &RICH,
            Variant::Simple => &SIMPLE,
        }
    }

    fn is_text_input(self) -> bool {
        matches!(self, Control::Name | Control::Colour)
    }
}

/// Single-line editable field with a caret measured in characters.
#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.len() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len);
        self.cursor = next as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.len();
    }

    fn insert(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn value(&self) -> &str {
        &self.value
    }

    /// Slice of the value that fits in `width` columns, scrolled to keep the
    /// caret visible, and the caret column inside that slice.
    fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let start = (self.cursor + 1).saturating_sub(width);
        let shown = self.value.chars().skip(start).take(width).collect();
        (shown, self.cursor - start)
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal window around a [`ViewController`].
pub struct CatScrollerApp {
    controller: ViewController,
    theme: Theme,
    title: String,
    focus: Control,
    name: TextInput,
    colour: TextInput,
    should_quit: bool,
}

impl CatScrollerApp {
    pub fn new(controller: ViewController, title: impl Into<String>) -> Self {
        let mut app = Self {
            controller,
            theme: Theme::default(),
            title: title.into(),
            focus: Control::Previous,
            name: TextInput::default(),
            colour: TextInput::default(),
            should_quit: false,
        };
        app.ensure_focus_enabled();
        app
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);
        info!(variant = ?self.controller.variant(), "Window opened");

        let outcome = self.event_loop(&mut terminal, &mut event_rx).await;
        restore_terminal(&mut terminal)?;
        info!(cats = self.controller.store().len(), "Window closed");
        outcome
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                self.handle_input(event);
                true
            }
            Some(AppEvent::Tick) => true,
            None => false,
        }
    }

    fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Key(_) => {}
            Event::Resize(_, _) => {}
            Event::Mouse(_) => {}
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.cycle_focus(1);
                return;
            }
            KeyCode::BackTab => {
                self.cycle_focus(-1);
                return;
            }
            _ => {}
        }

        if self.focus.is_text_input() {
            self.handle_text_key(key);
        } else {
            self.handle_button_key(key);
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.activate(self.focus);
            return;
        }
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left => input.move_cursor(-1),
            KeyCode::Right => input.move_cursor(1),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    input.insert(ch);
                }
            }
            _ => {}
        }
    }

    fn handle_button_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focus),
            KeyCode::Left | KeyCode::Char('h') => self.activate(Control::Previous),
            KeyCode::Right | KeyCode::Char('l') => self.activate(Control::Next),
            KeyCode::Char('x') if self.controller.variant().has_vitality() => {
                self.activate(Control::Kill)
            }
            KeyCode::Char('a') => self.focus = Control::Name,
            _ => {}
        }
    }

    /// Fire `control` the way a click would; disabled controls do nothing.
    fn activate(&mut self, control: Control) {
        if !self.is_enabled(control) {
            return;
        }
        let action = match control {
            Control::Previous => Action::Previous,
            Control::Next => Action::Next,
            Control::Kill => Action::Kill,
            Control::Name | Control::Colour | Control::Add => self.submission(),
        };
        self.apply(action);
    }

    fn submission(&self) -> Action {
        let colour = self
            .controller
            .variant()
            .has_colour()
            .then(|| self.colour.value().to_string());
        Action::Add {
            name: self.name.value().to_string(),
            colour,
        }
    }

    fn apply(&mut self, action: Action) {
        let outcome = self.controller.dispatch(action);
        debug!(?outcome, "Applied action");
        match outcome {
            Dispatch::Added => {
                self.clear_inputs();
                self.focus = Control::Name;
            }
            Dispatch::Rendered if self.controller.view().clear_inputs => self.clear_inputs(),
            Dispatch::Rendered | Dispatch::Ignored => {}
        }
        self.ensure_focus_enabled();
    }

    fn clear_inputs(&mut self) {
        self.name.clear();
        self.colour.clear();
    }

    fn is_enabled(&self, control: Control) -> bool {
        let view = self.controller.view();
        match control {
            Control::Previous => view.previous_enabled,
            Control::Next => view.next_enabled,
            Control::Kill => view.kill_enabled,
            Control::Name | Control::Add => true,
            Control::Colour => self.controller.variant().has_colour(),
        }
    }

    fn cycle_focus(&mut self, delta: isize) {
        let order = Control::order(self.controller.variant());
        let len = order.len() as isize;
        let start = order
            .iter()
            .position(|control| *control == self.focus)
            .unwrap_or(0) as isize;
        for step in 1..=len {
            let candidate = order[(start + delta * step).rem_euclid(len) as usize];
            if self.is_enabled(candidate) {
                self.focus = candidate;
                return;
            }
        }
    }

    fn ensure_focus_enabled(&mut self) {
        if !self.is_enabled(self.focus) {
            self.cycle_focus(1);
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Control::Name => Some(&mut self.name),
            Control::Colour => Some(&mut self.colour),
            _ => None,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = centered_rect(WINDOW_WIDTH, WINDOW_HEIGHT, frame.size());
        frame.render_widget(Clear, area);
        let window = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = window.inner(area);
        frame.render_widget(window, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(block_font::FONT_HEIGHT as u16 + 2),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let view = self.controller.view();
        self.render_record_row(frame, rows[1], view);
        self.render_button_row(frame, rows[3], view);
        self.render_form_row(frame, rows[5]);
        self.render_hint(frame, rows[7]);
    }

    fn render_record_row(&self, frame: &mut Frame, area: Rect, view: &CatView) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(16),
                Constraint::Length(2),
                Constraint::Length(30),
                Constraint::Length(2),
                Constraint::Length(22),
                Constraint::Length(2),
                Constraint::Length(8),
                Constraint::Min(0),
            ])
            .split(area);

        let fg = self.theme.record_fg(view);
        let label_style = Style::default().fg(fg).add_modifier(Modifier::BOLD);

        let number_block = Block::default().borders(Borders::ALL).title("#");
        let digits = block_font::render_digits(&view.position)
            .filter(|_| {
                block_font::width_for(view.position.len())
                    <= columns[1].width.saturating_sub(2) as usize
            });
        let number_lines: Vec<Line> = match digits {
            Some(rows) => rows
                .into_iter()
                .map(|row| Line::from(Span::styled(row, label_style)))
                .collect(),
            None => padded_lines(&view.position, label_style),
        };
        frame.render_widget(
            Paragraph::new(number_lines)
                .block(number_block)
                .alignment(Alignment::Center),
            columns[1],
        );

        let name = fit_label(&view.name, label_width(columns[3]));
        frame.render_widget(
            Paragraph::new(padded_lines(&name, label_style))
                .block(Block::default().borders(Borders::ALL).title("Name")),
            columns[3],
        );

        if let Some(colour) = &view.colour {
            let colour = fit_label(colour, label_width(columns[5]));
            frame.render_widget(
                Paragraph::new(padded_lines(&colour, label_style))
                    .block(Block::default().borders(Borders::ALL).title("Colour")),
                columns[5],
            );
        }

        if let Some(vitality) = view.vitality {
            frame.render_widget(
                Paragraph::new(padded_lines(vitality.glyph(), label_style))
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center),
                columns[7],
            );
        }
    }

    fn render_button_row(&self, frame: &mut Frame, area: Rect, view: &CatView) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(24),
                Constraint::Length(4),
                Constraint::Length(24),
                Constraint::Length(4),
                Constraint::Length(24),
                Constraint::Min(0),
            ])
            .split(area);

        self.render_button(frame, columns[1], "◀", Control::Previous, view.previous_enabled);
        self.render_button(frame, columns[3], "▶", Control::Next, view.next_enabled);
        if self.controller.variant().has_vitality() {
            self.render_button(frame, columns[5], "Dead", Control::Kill, view.kill_enabled);
        }
    }

    fn render_form_row(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(30),
                Constraint::Length(4),
                Constraint::Length(30),
                Constraint::Length(4),
                Constraint::Length(10),
                Constraint::Min(0),
            ])
            .split(area);

        self.render_input(frame, columns[1], "Name", Control::Name, &self.name);
        if self.controller.variant().has_colour() {
            self.render_input(frame, columns[3], "Colour", Control::Colour, &self.colour);
        }
        self.render_button(frame, columns[5], "+", Control::Add, true);
    }

    fn render_button(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        control: Control,
        enabled: bool,
    ) {
        let focused = enabled && self.focus == control;
        let (text_style, border_style) = if !enabled {
            let dim = Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM);
            (dim, dim)
        } else if focused {
            (
                Style::default()
                    .fg(self.theme.selection_fg)
                    .bg(self.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(self.theme.accent),
            )
        } else {
            (
                Style::default().fg(self.theme.primary_fg),
                Style::default().fg(self.theme.primary_fg),
            )
        };

        let button = Paragraph::new(Line::from(Span::styled(label.to_string(), text_style)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .alignment(Alignment::Center);
        frame.render_widget(button, area);
    }

    fn render_input(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        control: Control,
        input: &TextInput,
    ) {
        let focused = self.focus == control;
        let border_style = if focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let (shown, caret) = input.visible(area.width.saturating_sub(2) as usize);
        let field = Paragraph::new(Line::from(shown)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        );
        frame.render_widget(field, area);

        if focused && area.width > 2 && area.height > 2 {
            let cursor_x =
                (area.x + 1 + caret as u16).min(area.x + area.width.saturating_sub(2));
            frame.set_cursor(cursor_x, area.y + 1);
        }
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect) {
        let key = Style::default().add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled(" Tab", key),
            Span::raw(" focus  "),
            Span::styled("Enter", key),
            Span::raw(" activate  "),
            Span::styled("←/→", key),
            Span::raw(" browse  "),
            Span::styled("a", key),
            Span::raw(" name  "),
        ];
        if self.controller.variant().has_vitality() {
            spans.push(Span::styled("x", key));
            spans.push(Span::raw(" kill  "));
        }
        spans.push(Span::styled("Esc", key));
        spans.push(Span::raw(" quit"));
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().fg(self.theme.muted)),
            area,
        );
    }
}

/// Columns available to a label inside a bordered box, after the leading pad.
fn label_width(area: Rect) -> usize {
    area.width.saturating_sub(3) as usize
}

/// Cut `text` to `width` columns, marking the cut with an ellipsis.
fn fit_label(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut fitted: String = text.chars().take(width.saturating_sub(1)).collect();
    fitted.push('…');
    fitted
}

/// Centre `text` vertically inside a bordered label of block-font height.
fn padded_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    let above = block_font::FONT_HEIGHT / 2;
    let mut lines = vec![Line::from(""); above];
    lines.push(Line::from(Span::styled(format!(" {text}"), style)));
    lines
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
