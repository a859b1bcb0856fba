use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{
    App, DeployPhase, InputFocus, ServiceHealth, Step, ThemeEditor, ThemeMode, STEP_LABELS,
    SUGGESTIONS,
};
use crate::page::PageSource;
use crate::theme::{parse_hex, ThemeOption};

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(3), // footer
        ])
        .split(area);

    draw_header(frame, app, outer[0]);
    draw_footer(frame, app, outer[2]);

    let body = outer[1].inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    match app.step {
        Step::Input | Step::Theme | Step::Preview => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(body);
            draw_step_indicator(frame, app, rows[0]);
            match app.step {
                Step::Input => draw_input(frame, app, rows[1]),
                Step::Theme => match app.theme_mode {
                    ThemeMode::Browse => draw_theme_browse(frame, app, rows[1]),
                    ThemeMode::Editing => draw_theme_editor(frame, app, rows[1]),
                },
                _ => draw_preview(frame, app, rows[1]),
            }
        }
        Step::Deploy => draw_deploy(frame, app, body),
        Step::History => draw_history(frame, app, body),
    }
}

// ── Header ──────────────────────────────────────────────────────────────

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let health = match &app.service_health {
        ServiceHealth::Unknown => Span::styled(
            "service: checking...",
            Style::default().fg(Color::DarkGray),
        ),
        ServiceHealth::Online { version } => Span::styled(
            format!("service: online v{version}"),
            Style::default().fg(Color::Green),
        ),
        ServiceHealth::Offline => {
            Span::styled("service: offline", Style::default().fg(Color::Red))
        }
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "page",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "craft",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  ·  Landing page generator  ·  "),
        health,
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

// ── Step indicator ──────────────────────────────────────────────────────

fn draw_step_indicator(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.step.indicator_index().unwrap_or(0);

    let mut spans = Vec::new();
    for (i, label) in STEP_LABELS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if i < current {
            ("✓", Style::default().fg(Color::Green))
        } else if i == current {
            (
                "●",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{marker} {label}"), style));
    }

    let indicator = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(indicator, area);
}

// ── Step 1: project info ────────────────────────────────────────────────

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let column = centered_column(area, 64);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // name field
            Constraint::Length(1), // name error
            Constraint::Length(6), // description field
            Constraint::Length(1), // description error
            Constraint::Min(5),    // suggestions
        ])
        .split(column);

    let name_focused = app.form.focus == InputFocus::Name;
    let name = Paragraph::new(field_text(&app.form.project_name, name_focused)).block(
        field_block(" Project Name ", name_focused, app.form.name_error.is_some()),
    );
    frame.render_widget(name, rows[0]);
    frame.render_widget(error_line(app.form.name_error), rows[1]);

    let desc_focused = app.form.focus == InputFocus::Description;
    let description = Paragraph::new(field_text(&app.form.project_description, desc_focused))
        .wrap(Wrap { trim: false })
        .block(field_block(
            " Project Description ",
            desc_focused,
            app.form.description_error.is_some(),
        ));
    frame.render_widget(description, rows[2]);
    frame.render_widget(error_line(app.form.description_error), rows[3]);

    let mut lines = Vec::new();
    for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
        let focused = app.form.focus == InputFocus::Suggestion(i);
        let (prefix, style) = if focused {
            (
                "> ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(Span::styled(
            format!("{prefix}{suggestion}"),
            style,
        )));
    }
    let suggestions = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Need inspiration? "),
    );
    frame.render_widget(suggestions, rows[4]);
}

// ── Step 2: theme ───────────────────────────────────────────────────────

fn draw_theme_browse(frame: &mut Frame, app: &App, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);

    let mut items: Vec<ListItem> = app
        .themes
        .iter()
        .map(|theme| {
            let mut swatches = vec![Span::raw("  ")];
            for color in theme.colors.all().into_iter().take(3) {
                swatches.push(swatch(color));
                swatches.push(Span::raw(" "));
            }
            ListItem::new(vec![
                Line::from(Span::styled(
                    theme.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(swatches),
            ])
        })
        .collect();
    items.push(ListItem::new(vec![
        Line::from(Span::styled(
            "Design your own",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  pick all five colors",
            Style::default().fg(Color::DarkGray),
        )),
    ]));

    let mut state = ListState::default();
    state.select(Some(app.theme_selected));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Themes "),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, panes[0], &mut state);

    let detail = if let Some(theme) = app.themes.get(app.theme_selected) {
        theme_detail(theme)
    } else {
        vec![
            Line::from("Author a palette of your own."),
            Line::from(""),
            Line::from(Span::styled(
                "Pick the five colors the generated page is styled with.",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };
    let title = app
        .themes
        .get(app.theme_selected)
        .map(|t| format!(" {} ", t.name))
        .unwrap_or_else(|| " Custom ".to_string());
    let panel = Paragraph::new(detail).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    );
    frame.render_widget(panel, panes[1]);
}

fn theme_detail(theme: &ThemeOption) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(theme.description.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Preview: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(theme.preview.as_str(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];
    for (label, color) in crate::theme::ThemeColors::LABELS
        .iter()
        .zip(theme.colors.all())
    {
        lines.push(Line::from(vec![
            Span::raw(format!("{label:<12}")),
            swatch(color),
            Span::raw(format!(" {color}")),
        ]));
    }
    lines
}

fn draw_theme_editor(frame: &mut Frame, app: &App, area: Rect) {
    let column = centered_column(area, 50);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); ThemeEditor::FIELD_COUNT])
        .split(column);

    let labels = [
        " Theme Name ",
        " Primary ",
        " Secondary ",
        " Accent ",
        " Text ",
        " Background ",
    ];
    for (i, label) in labels.iter().enumerate() {
        let focused = app.editor.focus == i;
        let value = app.editor.field_value(i);
        let mut spans = vec![Span::raw(field_text(value, focused))];
        // Color fields get a live swatch once the hex parses.
        if i > 0 && parse_hex(value).is_some() {
            spans.push(Span::raw("  "));
            spans.push(swatch(value));
        }
        let field =
            Paragraph::new(Line::from(spans)).block(field_block(label, focused, false));
        frame.render_widget(field, rows[i]);
    }
}

// ── Step 3: preview ─────────────────────────────────────────────────────

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(44)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    if app.generation_pending {
        lines.push(Line::from(Span::styled(
            "Generating preview...",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Asking the service to render your page.",
            Style::default().fg(Color::DarkGray),
        )));
    } else if let Some(page) = &app.generated_page {
        let badge = match page.source {
            PageSource::Remote => Span::styled(
                "rendered by the live service",
                Style::default().fg(Color::Green),
            ),
            PageSource::Fallback => Span::styled(
                "built-in template (service unreachable)",
                Style::default().fg(Color::Yellow),
            ),
        };
        lines.push(Line::from(badge));
        if let Some(path) = &app.saved_preview_path {
            lines.push(Line::from(Span::styled(
                format!("saved to {}", path.display()),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(""));
        for html_line in page.html.lines().take(area.height.saturating_sub(6) as usize) {
            lines.push(Line::from(Span::styled(
                html_line.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Preview unavailable",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(
            "The page could not be generated ahead of time.",
        ));
        lines.push(Line::from(
            "Deploying still works; the service renders the page on upload.",
        ));
    }
    let document = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Document "),
    );
    frame.render_widget(document, panes[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Min(7)])
        .split(panes[1]);

    let mut details = Vec::new();
    if let Some(project) = &app.project {
        details.push(detail_line("Project", &project.project_name));
        if let Some(theme) = &app.selected_theme {
            details.push(detail_line("Theme", &theme.name));
        }
        details.push(detail_line("Description", &project.project_description));
    }
    let details = Paragraph::new(details).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Page Details "),
    );
    frame.render_widget(details, side[0]);

    let mut seo = Vec::new();
    if let Some(page) = &app.generated_page {
        seo.push(detail_line("Title", &page.meta_tags.title));
        seo.push(detail_line("Description", &page.meta_tags.description));
        seo.push(detail_line("Keywords", &page.meta_tags.keywords));
        if let Some(id) = &page.analytics_id {
            seo.push(detail_line("Analytics", id));
        }
    } else {
        seo.push(Line::from(Span::styled(
            "Available once the page is generated.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let seo = Paragraph::new(seo).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" SEO Metadata "),
    );
    frame.render_widget(seo, side[1]);
}

// ── Step 4: deploy ──────────────────────────────────────────────────────

fn draw_deploy(frame: &mut Frame, app: &App, area: Rect) {
    let column = centered_column(area, 64);
    let Some(phase) = &app.deploy_phase else {
        return;
    };

    match phase {
        DeployPhase::Success { url, admin_url } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Deployment Complete!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Your landing page is live:"),
                Line::from(Span::styled(
                    url.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
            ];
            if let Some(admin) = admin_url {
                lines.push(Line::from(""));
                lines.push(Line::from(format!("Manage the site: {admin}")));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Included: responsive layout, SEO meta tags, analytics-ready markup.",
                Style::default().fg(Color::DarkGray),
            )));
            let panel = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(rounded_block(" Deployed "));
            frame.render_widget(panel, column);
        }
        DeployPhase::Failed { message } => {
            let lines = vec![
                Line::from(Span::styled(
                    "Deployment Failed",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(message.clone()),
            ];
            let panel = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(rounded_block(" Deploy "));
            frame.render_widget(panel, column);
        }
        phase => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2),
                    Constraint::Length(3),
                    Constraint::Length(2),
                ])
                .split(column);

            let title = Paragraph::new(Line::from(Span::styled(
                "Deploying your landing page",
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(title, rows[0]);

            let progress = phase.progress();
            let gauge = Gauge::default()
                .block(rounded_block(" Progress "))
                .gauge_style(Style::default().fg(Color::Yellow))
                .percent(progress)
                .label(format!("{progress}%"));
            frame.render_widget(gauge, rows[1]);

            let label = Paragraph::new(Line::from(phase.label()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(label, rows[2]);
        }
    }
}

// ── History ─────────────────────────────────────────────────────────────

fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    if app.store.is_empty() {
        let column = centered_column(area, 56);
        let lines = vec![
            Line::from(Span::styled(
                "No deployments yet",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Deploy your first landing page and it will show up here."),
        ];
        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(rounded_block(" Deployment History "));
        frame.render_widget(panel, column);
        return;
    }

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = app
        .store
        .list()
        .iter()
        .map(|record| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    record.project_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {} · {}", record.deployed_at_local(), record.theme_name),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.history_selected.min(app.store.len() - 1)));

    let list = List::new(items)
        .block(rounded_block(&format!(
            " Deployments ({}) ",
            app.store.len()
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, panes[0], &mut state);

    let mut lines = Vec::new();
    if app.confirm_clear {
        lines.push(Line::from(Span::styled(
            "Clear all history? (y/n)",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    if let Some(record) = app.store.list().get(app.history_selected) {
        lines.push(detail_line("Project", &record.project_name));
        lines.push(detail_line("Deployed", &record.deployed_at_local()));
        lines.push(detail_line("Theme", &record.theme_name));
        lines.push(detail_line("URL", &record.url));
        if let Some(admin) = &record.admin_url {
            lines.push(detail_line("Admin", admin));
        }
        lines.push(detail_line("Site id", &record.site_id));
        lines.push(detail_line("Deploy id", &record.deploy_id));
        lines.push(Line::from(""));
        lines.push(detail_line("Description", &record.project_description));
    }
    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(rounded_block(" Details "));
    frame.render_widget(detail, panes[1]);
}

// ── Footer ──────────────────────────────────────────────────────────────

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.step {
        Step::Input => &[
            ("Tab", "next field"),
            ("Enter", "continue"),
            ("F2", "history"),
            ("Esc", "quit"),
        ],
        Step::Theme => match app.theme_mode {
            ThemeMode::Browse => &[
                ("↑↓", "choose"),
                ("Enter", "select"),
                ("F2", "history"),
                ("Esc", "back"),
            ],
            ThemeMode::Editing => &[
                ("Tab", "next field"),
                ("Enter", "use theme"),
                ("Esc", "cancel"),
            ],
        },
        Step::Preview => &[
            ("Enter", "deploy"),
            ("s", "save html"),
            ("F2", "history"),
            ("Esc", "back"),
        ],
        Step::Deploy => match app.deploy_phase {
            Some(DeployPhase::Success { .. }) => {
                &[("n", "new page"), ("h", "history"), ("Esc", "back")]
            }
            Some(DeployPhase::Failed { .. }) => &[("Esc", "back"), ("r", "start over")],
            _ => &[("Esc", "back")],
        },
        Step::History => {
            if app.confirm_clear {
                &[("y", "clear all"), ("n", "cancel")]
            } else {
                &[
                    ("↑↓", "select"),
                    ("d", "delete"),
                    ("c", "clear all"),
                    ("n", "new page"),
                    ("Esc", "back"),
                ]
            }
        }
    };

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!("{action}   ")));
    }

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(footer, area);
}

// ── Shared helpers ──────────────────────────────────────────────────────

fn centered_column(area: Rect, width: u16) -> Rect {
    if area.width <= width {
        return area;
    }
    let side = (area.width - width) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(side),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area)[1]
}

fn rounded_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title.to_string())
}

fn field_block(title: &str, focused: bool, errored: bool) -> Block<'static> {
    let border = if errored {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(title.to_string())
}

fn field_text(value: &str, focused: bool) -> String {
    if focused {
        format!("{value}▌")
    } else {
        value.to_string()
    }
}

fn error_line(error: Option<&'static str>) -> Paragraph<'static> {
    Paragraph::new(error.unwrap_or_default()).style(Style::default().fg(Color::Red))
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

/// Colored block for a CSS hex color; falls back to a neutral marker when
/// the value doesn't parse.
fn swatch(color: &str) -> Span<'static> {
    match parse_hex(color) {
        Some((r, g, b)) => Span::styled("██", Style::default().fg(Color::Rgb(r, g, b))),
        None => Span::styled("░░", Style::default().fg(Color::DarkGray)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError};
    use crate::app::UiMsg;
    use crate::history::{HistoryStore, NewDeployment};
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let (tx, _rx) = mpsc::channel();
        let store = HistoryStore::load(dir.path().join("history.json"));
        let app = App::new(ApiClient::new("http://127.0.0.1:9"), store, tx);
        (app, dir)
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    fn submit_project(app: &mut App) {
        app.form.project_name = "TechFlow".to_string();
        app.form.project_description = "A tool. For teams.".to_string();
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn input_step_renders_form_and_suggestions() {
        let (app, _dir) = test_app();
        let screen = render(&app);
        assert!(screen.contains("Project Name"));
        assert!(screen.contains("Project Description"));
        assert!(screen.contains("Need inspiration?"));
        assert!(screen.contains("Project Info"));
    }

    #[test]
    fn input_step_shows_validation_errors() {
        let (mut app, _dir) = test_app();
        app.form.project_name = "TechFlow".to_string();
        app.form.project_description = "only one sentence".to_string();
        app.handle_key(KeyCode::Enter);
        let screen = render(&app);
        assert!(screen.contains("Please provide at least two sentences"));
    }

    #[test]
    fn theme_step_lists_catalog_and_custom_row() {
        let (mut app, _dir) = test_app();
        submit_project(&mut app);
        let screen = render(&app);
        assert!(screen.contains("Tech Startup"));
        assert!(screen.contains("Portfolio"));
        assert!(screen.contains("Event"));
        assert!(screen.contains("Design your own"));
    }

    #[test]
    fn degraded_preview_renders_without_a_page() {
        let (mut app, _dir) = test_app();
        submit_project(&mut app);
        app.handle_key(KeyCode::Enter);
        assert!(render(&app).contains("Generating preview"));

        // Generation is over but produced nothing: the degraded view.
        app.generation_pending = false;
        let screen = render(&app);
        assert!(screen.contains("Preview unavailable"));
        assert!(screen.contains("Deploying still works"));
    }

    #[test]
    fn deploy_failure_screen_shows_the_message() {
        let (mut app, _dir) = test_app();
        submit_project(&mut app);
        app.handle_key(KeyCode::Enter);
        app.generation_pending = false;
        app.handle_key(KeyCode::Enter);
        app.apply_message(UiMsg::DeployFinished {
            seq: 1,
            result: Err(ApiError::Service(
                "Maximum 10 deployments per hour allowed".to_string(),
            )),
        });
        let screen = render(&app);
        assert!(screen.contains("Deployment Failed"));
        assert!(screen.contains("Maximum 10 deployments per hour"));
    }

    #[test]
    fn deploy_progress_screen_shows_stage_label() {
        let (mut app, _dir) = test_app();
        submit_project(&mut app);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        let screen = render(&app);
        assert!(screen.contains("Deploying your landing page"));
        assert!(screen.contains("Preparing deployment files..."));
    }

    #[test]
    fn history_renders_empty_and_populated_states() {
        let (mut app, _dir) = test_app();
        app.handle_key(KeyCode::F(2));
        assert!(render(&app).contains("No deployments yet"));

        app.store.add(NewDeployment {
            project_name: "TechFlow".to_string(),
            project_description: "A tool. For teams.".to_string(),
            theme_name: "Tech Startup".to_string(),
            url: "https://techflow.example.app".to_string(),
            admin_url: None,
            deployed_at: "2026-08-07T12:00:00+00:00".to_string(),
            site_id: "site-1".to_string(),
            deploy_id: "deploy-1".to_string(),
        });
        let screen = render(&app);
        assert!(screen.contains("Deployments (1)"));
        assert!(screen.contains("TechFlow"));
        assert!(screen.contains("https://techflow.example.app"));
    }
}
