use crate::App;
use crate::html::fragment_lines;
use cerebrova_core::SubmitState;
use cerebrova_core::neural::NeuralNetwork;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Wrap,
        canvas::{Canvas, Circle, Line as Segment},
    },
};

const PROMPT: &str = "image> ";

const INSTRUCTIONS: [&str; 6] = [
    "1. Type the path of a brain MRI scan (JPG, JPEG or PNG) and press Enter.",
    "2. Check the preview, then press Ctrl+S to analyze it.",
    "3. Wait a few seconds while the scan is processed.",
    "4. Read the result and the confidence score.",
    "5. Open the report link to download a PDF summary.",
    "Press F2 to learn more about the tumor types.",
];

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();

    if let Some(network) = app.page().network() {
        render_network(f, network, area);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(7), // Upload panel
            Constraint::Min(8),    // Result panel
            Constraint::Length(1), // Horizontal rule
            Constraint::Length(1), // Input
            Constraint::Length(1), // Hints
        ])
        .split(centered_column(area, 90));

    render_title(f, chunks[0]);
    render_upload(f, app, chunks[1]);
    render_result(f, app, chunks[2]);

    let rule = Paragraph::new("─".repeat(chunks[3].width as usize))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(rule, chunks[3]);

    render_input(f, app, chunks[4]);
    render_hints(f, chunks[5]);

    let bindings = app.page().bindings();
    if bindings.sidebar.active {
        render_sidebar(f, area);
    }
    if bindings.tumor_modal.active {
        render_modal(f, app, area);
    }
}

fn render_network(f: &mut Frame, network: &NeuralNetwork, area: Rect) {
    let viewport = network.viewport();
    // Canvas y grows upwards; page y grows downwards
    let flip = |y: f64| viewport.height - y;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, viewport.width])
        .y_bounds([0.0, viewport.height])
        .paint(|ctx| {
            for connection in network.connections() {
                let color = if connection.thickness >= 1.0 {
                    Color::Rgb(40, 70, 110)
                } else {
                    Color::Rgb(30, 50, 80)
                };
                ctx.draw(&Segment {
                    x1: connection.x1,
                    y1: flip(connection.y1),
                    x2: connection.x2,
                    y2: flip(connection.y2),
                    color,
                });
            }
            for node in network.nodes() {
                let (x, y) = node.center();
                ctx.draw(&Circle {
                    x,
                    y: flip(y),
                    radius: node.size / 2.0,
                    color: Color::Rgb(60, 110, 170),
                });
            }
        });
    f.render_widget(canvas, area);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "CEREBROVA",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Brain tumor detection from MRI scans",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_upload(f: &mut Frame, app: &App, area: Rect) {
    let bindings = app.page().bindings();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Upload ")
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![
        Line::from(Span::styled(
            bindings.file_input_label.text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            bindings.file_input_label.hint.clone().unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if bindings.preview_container.active
        && let Some(upload) = app.page().selected_file()
    {
        lines.push(Line::from(vec![
            Span::raw("Preview: "),
            Span::styled(
                format!("{} ({}, {} bytes)", upload.file_name, upload.mime, upload.size()),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    let submit_style = if bindings.submit_btn.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    };
    lines.push(Line::from(Span::styled(
        format!(" {} ", bindings.submit_btn.text),
        submit_style,
    )));

    if let Some(notice) = app.notice() {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let bindings = app.page().bindings();
    if !bindings.result_box.active {
        return;
    }

    let border = match app.page().state() {
        SubmitState::Error => Color::Red,
        SubmitState::Submitting => Color::Yellow,
        _ => Color::Green,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Detection Result ")
        .border_style(Style::default().fg(border));

    let mut lines = vec![
        Line::from(bindings.detection_result_text.text.clone()),
        Line::from(""),
    ];

    if !bindings.confidence_value.text.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("Confidence: "),
            Span::styled(
                format!("{}%", bindings.confidence_value.text),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    if let Some(src) = &bindings.detection_image.src {
        lines.push(Line::from(vec![
            Span::raw("Image:      "),
            Span::styled(src.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    if bindings.download_report_btn.active
        && let Some(href) = &bindings.download_report_btn.href
    {
        lines.push(Line::from(vec![
            Span::raw("Report:     "),
            Span::styled(
                href.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(format!("{}{}", PROMPT, app.input()))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, area);
    f.render_widget(input, area);

    let typed = app.cursor_column().min(u16::MAX as usize) as u16;
    f.set_cursor_position((area.x + PROMPT.len() as u16 + typed, area.y));
}

fn render_hints(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Black).bg(Color::Gray);
    let hints = Line::from(vec![
        Span::styled(" Enter ", key),
        Span::raw(" Select  "),
        Span::styled(" Ctrl+S ", key),
        Span::raw(" Analyze  "),
        Span::styled(" Ctrl+X ", key),
        Span::raw(" Clear  "),
        Span::styled(" F1 ", key),
        Span::raw(" Instructions  "),
        Span::styled(" F2 ", key),
        Span::raw(" Tumor types  "),
        Span::styled(" Esc ", key),
        Span::raw(" Close/Quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(Style::default().bg(Color::Black).fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn render_sidebar(f: &mut Frame, area: Rect) {
    let width = area.width.min(48);
    let sidebar = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: area.height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" How to use ")
        .border_style(Style::default().fg(Color::Cyan));
    let lines: Vec<Line> = INSTRUCTIONS
        .iter()
        .flat_map(|step| [Line::from(*step), Line::from("")])
        .collect();

    f.render_widget(Clear, sidebar);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        sidebar,
    );
}

fn render_modal(f: &mut Frame, app: &App, area: Rect) {
    let modal = centered_rect(area, 70, 70);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Brain Tumor Types ")
        .border_style(Style::default().fg(Color::Magenta));

    let lines: Vec<Line> = match &app.page().bindings().tumor_descriptions_container.html {
        Some(html) => fragment_lines(html)
            .into_iter()
            .map(|line| {
                if line.heading {
                    Line::from(Span::styled(
                        line.text,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(line.text)
                }
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    f.render_widget(Clear, modal);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        modal,
    );
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
