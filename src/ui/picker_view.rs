use crate::calc::{DayDescriptor, add_months, build_month, grid_column};
use crate::select::{GestureMode, HoldTimer, SelectionModel};
use crate::ui::locale::{DAY_POSITIONS, Locale};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use std::collections::BTreeSet;
use std::io::Stdout;
use std::time::{Duration as StdDuration, Instant};

// Month grid geometry: 7 columns of "nn " cells under a title and a
// day-name header, up to 6 week rows.
const MONTH_WIDTH: u16 = 21;
const MONTH_HEIGHT: u16 = 8;
const GAP_WIDTH: u16 = 3;
const ROW_GAP: u16 = 1;
const MONTHS_PER_ROW: usize = 3;

// Drag preview colors
const PRESELECT_BG: Color = Color::Cyan;
const DELETING_BG: Color = Color::Red;

/// One rendered month: identity plus its day descriptors.
struct MonthGrid {
    year: i32,
    month: u32,
    days: Vec<DayDescriptor>,
}

/// What a screen coordinate resolves to. Past day cells are absent on
/// purpose: they carry no date and take no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitTarget {
    Day { date: NaiveDate, position: u32 },
    Header { position: u32 },
}

pub struct App {
    months: Vec<MonthGrid>,
    model: SelectionModel,
    hold: HoldTimer,
    /// Press target awaiting either hold maturation or a quick release.
    pressed: Option<NaiveDate>,
    locale: Locale,
    /// Mirrored input-field value, refreshed after every mutation.
    input_value: String,
    /// Screen rectangles of interactive cells, rebuilt on every draw.
    hit_map: Vec<(Rect, HitTarget)>,
}

impl App {
    pub fn new(
        number_of_months: u32,
        hold_threshold: StdDuration,
        locale: Locale,
        initial: BTreeSet<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let first_of_month = today.with_day(1).unwrap();
        let months = (0..number_of_months)
            .map(|i| {
                let month_date = add_months(first_of_month, i as i32);
                MonthGrid {
                    year: month_date.year(),
                    month: month_date.month(),
                    days: build_month(month_date.year(), month_date.month(), today),
                }
            })
            .collect();
        let model = SelectionModel::new(initial);
        let input_value = model.input_value();
        App {
            months,
            model,
            hold: HoldTimer::new(hold_threshold),
            pressed: None,
            locale,
            input_value,
            hit_map: Vec::new(),
        }
    }

    /// The sink string: sorted selection joined with commas.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    fn sync_input(&mut self) {
        self.input_value = self.model.input_value();
    }

    // ── Event handling ────────────────────────────────────────────────────────

    /// Matures a held press into a drag gesture once the threshold elapses.
    pub fn tick(&mut self, now: Instant) {
        if self.hold.fires(now) {
            if let Some(date) = self.pressed {
                self.model.begin_gesture(date);
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.hit_at(mouse.column, mouse.row) {
                    Some(HitTarget::Day { date, .. }) => {
                        self.pressed = Some(date);
                        self.hold.arm(now);
                    }
                    Some(HitTarget::Header { position }) => {
                        let column = self.column_dates(position);
                        self.model.toggle_all(&column);
                        self.sync_input();
                    }
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.model.gesture_in_progress() {
                    if let Some(date) = self.date_at(mouse.column, mouse.row) {
                        self.model.update_preview(date);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let release = self.date_at(mouse.column, mouse.row);
                if self.model.gesture_in_progress() {
                    // A release outside any interactive cell aborts without
                    // touching the selection.
                    match release {
                        Some(date) => self.model.end_gesture(date),
                        None => self.model.cancel_gesture(),
                    }
                    self.sync_input();
                } else if self.pressed.is_some() && release == self.pressed {
                    // The hold never matured, so this press is a plain click.
                    if let Some(date) = release {
                        self.model.toggle_date(date);
                        self.sync_input();
                    }
                }
                self.pressed = None;
                self.hold.disarm();
            }
            _ => {}
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Esc => {
                self.abort_gesture();
                false
            }
            KeyCode::Char('q') => true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => true,
            _ => false,
        }
    }

    /// The terminal lost focus mid-interaction: treat it like the pointer
    /// leaving the widget.
    pub fn handle_focus_lost(&mut self) {
        self.abort_gesture();
    }

    fn abort_gesture(&mut self) {
        self.model.cancel_gesture();
        self.pressed = None;
        self.hold.disarm();
    }

    // ── Hit map ───────────────────────────────────────────────────────────────

    fn hit_at(&self, x: u16, y: u16) -> Option<HitTarget> {
        let pos = Position::new(x, y);
        self.hit_map
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, target)| *target)
    }

    fn date_at(&self, x: u16, y: u16) -> Option<NaiveDate> {
        match self.hit_at(x, y) {
            Some(HitTarget::Day { date, .. }) => Some(date),
            _ => None,
        }
    }

    /// All interactive dates in the given weekday column, in render order.
    /// Consults the hit map, so only cells that are actually on screen
    /// participate in a column toggle.
    fn column_dates(&self, position: u32) -> Vec<NaiveDate> {
        self.hit_map
            .iter()
            .filter_map(|(_, target)| match target {
                HitTarget::Day {
                    date,
                    position: cell_position,
                } if *cell_position == position => Some(*date),
                _ => None,
            })
            .collect()
    }

    /// Screen rectangle of each month, three per row, unclipped.
    fn month_rects(&self, area: Rect) -> Vec<Rect> {
        (0..self.months.len())
            .map(|i| {
                let row = (i / MONTHS_PER_ROW) as u16;
                let col = (i % MONTHS_PER_ROW) as u16;
                Rect::new(
                    area.x + col * (MONTH_WIDTH + GAP_WIDTH),
                    area.y + row * (MONTH_HEIGHT + ROW_GAP),
                    MONTH_WIDTH,
                    MONTH_HEIGHT,
                )
            })
            .collect()
    }

    fn month_rows(&self) -> u16 {
        self.months.len().div_ceil(MONTHS_PER_ROW) as u16
    }

    /// Rebuilds the cell rectangles for the current layout. Cells that fall
    /// outside `area` (too-small terminal) are dropped rather than clipped.
    fn rebuild_hit_map(&mut self, area: Rect) {
        let rects = self.month_rects(area);
        self.hit_map.clear();
        for (grid, rect) in self.months.iter().zip(&rects) {
            for (col, position) in DAY_POSITIONS.iter().enumerate() {
                let cell = Rect::new(rect.x + col as u16 * 3, rect.y + 1, 2, 1);
                push_if_visible(&mut self.hit_map, area, cell, HitTarget::Header {
                    position: *position,
                });
            }
            let start_col = grid_column(grid.days[0].weekday_position);
            for day in &grid.days {
                if day.is_past {
                    continue;
                }
                let (row, col) = cell_slot(start_col, day.date.day());
                let cell = Rect::new(rect.x + col * 3, rect.y + 2 + row, 2, 1);
                push_if_visible(&mut self.hit_map, area, cell, HitTarget::Day {
                    date: day.date,
                    position: day.weekday_position,
                });
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.area();
        let calendar_height = self.month_rows() * (MONTH_HEIGHT + ROW_GAP);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(calendar_height),
                Constraint::Length(3), // input field
                Constraint::Min(4),    // help table
            ])
            .split(size);

        self.rebuild_hit_map(chunks[0]);
        self.render_months(f, chunks[0]);
        self.render_input(f, chunks[1]);
        self.render_help(f, chunks[2]);
    }

    fn render_months(&self, f: &mut Frame, area: Rect) {
        for (grid, rect) in self.months.iter().zip(self.month_rects(area)) {
            let rect = rect.intersection(area);
            if rect.width == 0 || rect.height == 0 {
                continue;
            }

            let title = format!("{} {}", self.locale.month_name(grid.month), grid.year);
            let header: String = self
                .locale
                .day_names_short
                .iter()
                .map(|name| format!("{:<3}", name))
                .collect();

            let mut lines: Vec<Line> = vec![
                Line::from(Span::styled(
                    format!("{:^21}", title),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )),
                Line::from(header),
            ];

            let start_col = grid_column(grid.days[0].weekday_position);
            let mut spans: Vec<Span> = Vec::new();
            if start_col > 0 {
                spans.push(Span::raw("   ".repeat(start_col as usize)));
            }
            for day in &grid.days {
                let (_, col) = cell_slot(start_col, day.date.day());
                let style = day_cell_style(
                    self.model.is_selected(day.date),
                    self.model.preview_mode_for(day.date),
                    day.is_today,
                    day.is_past,
                );
                spans.push(Span::styled(format!("{:2}", day.date.day()), style));
                spans.push(Span::raw(" "));
                if col == 6 {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                }
            }
            if !spans.is_empty() {
                lines.push(Line::from(spans));
            }

            let widget = Paragraph::new(lines).block(Block::default().borders(Borders::NONE));
            f.render_widget(widget, rect);
        }
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let field = Paragraph::new(self.input_value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Selected dates ({}) ", self.model.len())),
        );
        f.render_widget(field, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let rows = vec![
            Row::new(vec!["Click day", "Toggle one date", "Click day name", "Toggle column"]),
            Row::new(vec!["Hold + drag", "Select a range", "  from selected", "Delete a range"]),
            Row::new(vec!["Esc", "Cancel drag", "q / Ctrl+C", "Quit"]),
        ];
        let table = Table::new(
            rows,
            [
                Constraint::Length(16),
                Constraint::Length(18),
                Constraint::Length(16),
                Constraint::Length(18),
            ],
        )
        .block(Block::default().borders(Borders::NONE))
        .column_spacing(1);
        f.render_widget(table, area);
    }
}

// ── Grid helpers ──────────────────────────────────────────────────────────────

/// Monday-first (week row, column) slot of a day within its month grid.
fn cell_slot(start_col: u16, day_of_month: u32) -> (u16, u16) {
    let index = start_col + day_of_month as u16 - 1;
    (index / 7, index % 7)
}

fn push_if_visible(map: &mut Vec<(Rect, HitTarget)>, area: Rect, cell: Rect, target: HitTarget) {
    if cell.right() <= area.right() && cell.bottom() <= area.bottom() {
        map.push((cell, target));
    }
}

/// Style for one day cell. The live drag preview wins over everything so
/// the range being chosen is always visible.
pub(crate) fn day_cell_style(
    is_selected: bool,
    preview: Option<GestureMode>,
    is_today: bool,
    is_past: bool,
) -> Style {
    match preview {
        Some(GestureMode::Select) => {
            return Style::default()
                .fg(Color::Black)
                .bg(PRESELECT_BG)
                .add_modifier(Modifier::BOLD);
        }
        Some(GestureMode::Delete) => {
            return Style::default()
                .fg(Color::Black)
                .bg(DELETING_BG)
                .add_modifier(Modifier::BOLD);
        }
        None => {}
    }
    if is_selected {
        let mut style = Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD);
        if is_today {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if is_past {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        app.tick(Instant::now());
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                CEvent::FocusLost => app.handle_focus_lost(),
                _ => {}
            }
        }
    }
    Ok(())
}
