use std::collections::HashMap;

use ratatui::backend::TestBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::{Frame, Terminal};

use crate::config::ThemeConfig;
use crate::format::progress_status_text;
use crate::surface::{LineStyle, RenderCommand};

/// One displayed job row. The name is carried only so later commands can
/// find the row again; it is never drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub name: String,
    pub text: String,
    pub style: LineStyle,
}

/// The render side's own copy of everything it draws. Built purely by
/// folding `RenderCommand`s; it never touches the live registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModel {
    rows: Vec<JobRow>,
    index: HashMap<String, usize>,
    pub percent: u8,
    pub permanent_status: String,
    pub transient_status: String,
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardModel {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
            percent: 0,
            permanent_status: progress_status_text(0),
            transient_status: String::new(),
        }
    }

    pub fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::JobLine { name, text, style } => {
                if let Some(&slot) = self.index.get(&name) {
                    self.rows[slot].text = text;
                    self.rows[slot].style = style;
                } else {
                    self.index.insert(name.clone(), self.rows.len());
                    self.rows.push(JobRow { name, text, style });
                }
            }
            RenderCommand::OverallProgress(percent) => self.percent = percent,
            RenderCommand::PermanentStatus(text) => self.permanent_status = text,
            RenderCommand::TransientStatus(text) => self.transient_status = text,
        }
    }

    pub fn rows(&self) -> &[JobRow] {
        &self.rows
    }
}

/// Scroll state for the job list. Up stops at the top; down stops once the
/// last row is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
}

impl Viewport {
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, rows: usize, visible: usize) {
        self.offset = (self.offset + 1).min(max_offset(rows, visible));
    }

    pub fn jump_top(&mut self) {
        self.offset = 0;
    }

    pub fn jump_bottom(&mut self, rows: usize, visible: usize) {
        self.offset = max_offset(rows, visible);
    }
}

fn max_offset(rows: usize, visible: usize) -> usize {
    rows.saturating_sub(visible.max(1))
}

/// Resolved row colors. Built from a validated `ThemeConfig`; unknown
/// names fall back to white rather than failing mid-draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub normal: Color,
    pub active: Color,
    pub done: Color,
    pub failed: Color,
    pub skipped: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            normal: color_by_name(&config.normal).unwrap_or(Color::White),
            active: color_by_name(&config.active).unwrap_or(Color::Cyan),
            done: color_by_name(&config.done).unwrap_or(Color::Green),
            failed: color_by_name(&config.failed).unwrap_or(Color::Red),
            skipped: color_by_name(&config.skipped).unwrap_or(Color::DarkGray),
        }
    }

    pub fn style_for(&self, style: LineStyle) -> Style {
        let color = match style {
            LineStyle::Normal => self.normal,
            LineStyle::Active => self.active,
            LineStyle::Done => self.done,
            LineStyle::Failed => self.failed,
            LineStyle::Skipped => self.skipped,
        };
        Style::default().fg(color)
    }
}

pub fn color_by_name(name: &str) -> Option<Color> {
    match name.trim().to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" => Some(Color::Gray),
        "darkgray" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Rows the bordered job list can show at the given terminal height:
/// gauge (3) + list borders (2) + status bar (1).
pub fn visible_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(6))
}

pub fn draw_board(frame: &mut Frame, model: &BoardModel, viewport: Viewport, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(theme.done))
        .percent(u16::from(model.percent));
    frame.render_widget(gauge, chunks[0]);

    let items = model
        .rows()
        .iter()
        .skip(viewport.offset)
        .map(|row| {
            ListItem::new(Line::from(Span::styled(
                row.text.clone(),
                theme.style_for(row.style),
            )))
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Jobs")),
        chunks[1],
    );

    let status = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(20)])
        .split(chunks[2]);
    frame.render_widget(Paragraph::new(model.transient_status.clone()), status[0]);
    frame.render_widget(
        Paragraph::new(model.permanent_status.clone()).alignment(Alignment::Right),
        status[1],
    );
}

/// Render one frame to a plain string through a `TestBackend`. Test
/// harness for asserting on frame contents without a real terminal.
pub fn render_frame(model: &BoardModel, viewport: Viewport, width: u16, height: u16) -> String {
    let theme = Theme::default();
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal
        .draw(|frame| draw_board(frame, model, viewport, &theme))
        .expect("draw");

    let mut out = String::new();
    let buffer = terminal.backend().buffer().clone();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}
