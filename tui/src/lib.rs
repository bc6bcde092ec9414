//! TUI rendering for the churn form using ratatui.

mod input;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, slider_track, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use churn_engine::{App, Focus, Outcome, StatusKind};
use churn_types::{FieldDomain, FieldId, FieldValue, Section, Widget};

pub const TITLE: &str = "Telecom Customer Churn Prediction";
pub const PREDICT_LABEL: &str = "Predict Churn Probability";

const INTRO: &str = "This application predicts the likelihood of a customer churning based on \
specific features such as usage, service plans, and account history. Fill in the required \
fields to analyze churn probability.";
const SIDEBAR_CAPTION: &str = "Use the sliders and inputs below to define customer details:";
const EXPLANATION: &str = "The result shown above reflects the likelihood of the customer \
leaving the service based on the current data. Use this information to take proactive steps \
and reduce churn rates.";
const KEY_HINTS: &str =
    "↑↓/Tab move  ←→ adjust (Shift: ×10)  0-9 edit  Enter commit  p predict  r reset  t theme  q quit";
const KEY_HINTS_ASCII: &str =
    "Up/Down/Tab move  Left/Right adjust (Shift: x10)  0-9 edit  Enter commit  p predict  r reset  t theme  q quit";

/// Rows per field: label line + control line.
const FIELD_HEIGHT: u16 = 2;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(app.theme().colors());
    let glyphs = glyphs(options);

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg).fg(palette.text_primary));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Intro
            Constraint::Min(10),   // Form
            Constraint::Length(1), // Field help
            Constraint::Length(3), // Predict button
            Constraint::Length(2), // Result
            Constraint::Length(3), // Explanation
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title(frame, chunks[0], &palette);
    draw_paragraph(frame, chunks[1], INTRO, Style::default().fg(palette.text_primary));
    draw_form(frame, app, chunks[2], &palette, &glyphs);
    draw_help(frame, app, chunks[3], &palette, &glyphs);
    draw_predict_button(frame, app, chunks[4], &palette, &glyphs);
    draw_result(frame, app, chunks[5], &palette);
    draw_explanation(frame, chunks[6], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[7], &palette);
}

fn draw_title(frame: &mut Frame, area: Rect, palette: &Palette) {
    let title = Paragraph::new(Line::from(Span::styled(TITLE, styles::title(palette))))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.accent)),
        );
    frame.render_widget(title, area);
}

fn draw_paragraph(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    draw_sidebar(frame, app, columns[0], palette, glyphs);

    let account_rows = section_rows(Section::AccountInformation);
    let plan_rows = section_rows(Section::PlanAndService);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(account_rows * FIELD_HEIGHT + 2),
            Constraint::Length(plan_rows * FIELD_HEIGHT + 2),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    draw_section_grid(frame, app, right[0], Section::AccountInformation, palette, glyphs);
    draw_section_grid(frame, app, right[1], Section::PlanAndService, palette, glyphs);
}

/// Rows needed when a section's fields are split across two columns.
fn section_rows(section: Section) -> u16 {
    let count = section.fields().count() as u16;
    count.div_ceil(2)
}

fn section_block<'a>(section: Section, app: &App, palette: &Palette) -> Block<'a> {
    let focused = app
        .focus()
        .field()
        .is_some_and(|field| field.section() == section);
    Block::default()
        .title(Span::styled(
            format!(" {} ", section.title()),
            styles::section_header(palette),
        ))
        .borders(Borders::ALL)
        .border_style(styles::border(palette, focused))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(palette.bg_panel))
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = section_block(Section::CallDetails, app, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines = vec![Line::from(Span::styled(SIDEBAR_CAPTION, styles::muted(palette)))];
    for field in Section::CallDetails.fields() {
        lines.extend(field_lines(app, field, width, palette, glyphs));
    }
    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

fn draw_section_grid(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    section: Section,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = section_block(section, app, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let fields: Vec<FieldId> = section.fields().collect();
    let (left, right) = fields.split_at(fields.len().div_ceil(2));
    for (column, column_fields) in [(halves[0], left), (halves[1], right)] {
        let width = column.width.saturating_sub(1) as usize;
        let lines: Vec<Line> = column_fields
            .iter()
            .flat_map(|&field| field_lines(app, field, width, palette, glyphs))
            .collect();
        frame.render_widget(Paragraph::new(lines), column);
    }
}

fn field_lines<'a>(
    app: &App,
    field: FieldId,
    width: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) -> [Line<'a>; 2] {
    let focused = app.focus() == Focus::Field(field);
    let spec = field.spec();

    let marker = if focused { glyphs.focus } else { " " };
    let label = Line::from(vec![
        Span::styled(format!("{marker} "), styles::label(palette, focused)),
        Span::styled(spec.label, styles::label(palette, focused)),
    ]);

    let mut control = vec![Span::raw("  ")];
    let draft = app.form().draft().filter(|d| d.field() == field);
    match (spec.widget, draft) {
        (Widget::Slider | Widget::NumberInput, Some(draft)) => {
            control.push(Span::styled(
                format!(" {}{} ", draft.text(), glyphs.cursor),
                styles::input(palette, focused),
            ));
        }
        (Widget::Slider, None) => {
            control.extend(slider_spans(app, field, width, palette, glyphs));
        }
        (Widget::NumberInput, None) => {
            control.push(Span::styled(
                format!(" {} ", app.value(field)),
                styles::input(palette, focused),
            ));
        }
        (Widget::Select, _) => {
            control.push(Span::styled(
                format!(
                    " {} {} {} ",
                    glyphs.select_prev,
                    app.value(field),
                    glyphs.select_next
                ),
                styles::input(palette, focused),
            ));
        }
    }
    // The message itself goes in the help line; columns are too narrow for it.
    if app.field_error(field).is_some() {
        control.push(Span::styled(
            format!(" {}", glyphs.warning),
            styles::error(palette),
        ));
    }

    [label, Line::from(control)]
}

fn slider_spans<'a>(
    app: &App,
    field: FieldId,
    width: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Span<'a>> {
    let (fraction, value_text) = match (field.domain(), app.value(field)) {
        (FieldDomain::Integer(bounds), FieldValue::Integer(v)) => {
            let max = bounds.max.unwrap_or(bounds.min.max(v));
            (ratio(v as f64, bounds.min as f64, max as f64), v.to_string())
        }
        (FieldDomain::Float(bounds), FieldValue::Float(v)) => {
            let max = bounds.max.unwrap_or(bounds.min.max(v));
            (ratio(v, bounds.min, max), format!("{v:.2}"))
        }
        (_, value) => (0.0, value.to_string()),
    };

    // "  " indent + " value" suffix
    let track_width = width.saturating_sub(4 + value_text.len()).max(3);
    let (filled, thumb, empty) = slider_track(fraction, track_width, glyphs);
    vec![
        Span::styled(filled, Style::default().fg(palette.accent)),
        Span::styled(
            thumb,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(empty, Style::default().fg(palette.border)),
        Span::styled(format!(" {value_text}"), Style::default().fg(palette.text_primary)),
    ]
}

fn ratio(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    (value - min) / (max - min)
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let error = app.focus().field().and_then(|field| app.field_error(field));
    let line = match (app.focus(), error) {
        (_, Some(message)) => Line::from(Span::styled(
            format!("{} {message}", glyphs.warning),
            styles::error(palette),
        )),
        (Focus::Field(field), None) => {
            let spec = field.spec();
            match spec.help {
                Some(help) => Line::from(vec![
                    Span::styled(format!("{} ", glyphs.focus), styles::muted(palette)),
                    Span::styled(help, styles::muted(palette)),
                ]),
                None => Line::from(Span::styled(range_hint(field), styles::muted(palette))),
            }
        }
        (Focus::Predict, None) => Line::from(Span::styled(
            "Press Enter to estimate the churn probability",
            styles::muted(palette),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn range_hint(field: FieldId) -> String {
    match field.domain() {
        FieldDomain::Integer(b) => match b.max {
            Some(max) => format!("Whole number from {} to {max}", b.min),
            None => format!("Whole number, at least {}", b.min),
        },
        FieldDomain::Float(b) => match b.max {
            Some(max) => format!("Amount from {:.2} to {max:.2}", b.min),
            None => format!("Amount, at least {:.2}", b.min),
        },
        FieldDomain::Choice(kind) => format!("One of: {}", kind.options().join(", ")),
    }
}

fn draw_predict_button(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let focused = app.focus() == Focus::Predict;
    let label = if focused {
        format!(" {} {PREDICT_LABEL} ", glyphs.focus)
    } else {
        format!(" {PREDICT_LABEL} ")
    };
    let width = (label.chars().count() as u16 + 2).min(area.width);
    let button_area = Rect {
        x: area.x,
        y: area.y,
        width,
        height: area.height,
    };
    let button = Paragraph::new(Line::from(Span::styled(
        label,
        styles::button(palette, focused),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border(palette, focused)),
    );
    frame.render_widget(button, button_area);
}

fn draw_result(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let lines = match app.outcome() {
        Some(Outcome::Scored(prediction)) => {
            let mut lines = vec![Line::from(Span::styled(
                prediction.message(),
                styles::result(palette),
            ))];
            if app.is_outcome_stale() {
                lines.push(Line::from(Span::styled(
                    "Inputs changed since this prediction; press p to update.",
                    styles::muted(palette),
                )));
            }
            lines
        }
        Some(Outcome::Failed { message }) => vec![Line::from(Span::styled(
            message.clone(),
            styles::error(palette),
        ))],
        None => vec![],
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_explanation(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    let rule = glyphs.rule.repeat(rows[0].width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(rule, Style::default().fg(palette.border))),
        rows[0],
    );
    draw_paragraph(frame, rows[1], EXPLANATION, styles::muted(palette));
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let left = match app.status() {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Info => Style::default().fg(palette.text_primary),
                StatusKind::Error => styles::error(palette),
            };
            Span::styled(status.text.clone(), style)
        }
        None => {
            let hints = if app.ui_options().ascii_only {
                KEY_HINTS_ASCII
            } else {
                KEY_HINTS
            };
            Span::styled(hints, styles::muted(palette))
        }
    };

    let right = format!("{} | {} ", app.model_summary(), app.theme().preset);
    let right_width = (right.chars().count() as u16).min(area.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(right, styles::muted(palette))).alignment(Alignment::Right),
        chunks[1],
    );
}
