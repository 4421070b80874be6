//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the track rows and the persistent player bar using
//! `ratatui`. All glyphs are derived from the app model; nothing here owns
//! state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::download::DownloadManager;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "play/pause selected track".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next track".to_string());
    // H/L is filled dynamically from config.
    map.insert("r".to_string(), "loop track".to_string());
    map.insert("d".to_string(), "download track".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_step_percent: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "h/l", "H/L", "enter", "space/p", "gg/G", "r", "d", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}%", seek_step_percent))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// One track row: inline glyph, display number, title, download indicator.
fn row_text(app: &App, downloads: &DownloadManager, i: usize) -> String {
    let track = &app.tracks[i];
    let mut text = format!("{} {}  {}", app.inline_glyph(i), track.number, track.title);
    if downloads.is_disabled(i) {
        text.push_str(&format!("  ⤓ {}%", downloads.progress_percent(i)));
    }
    text
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    downloads: &DownloadManager,
    elapsed: Duration,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" fermata ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Track rows
    {
        // Keep the selected row visible by windowing the list to the area height.
        let total = app.tracks.len();
        let list_height = chunks[1].height.saturating_sub(2) as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = (start..end)
            .map(|i| ListItem::new(row_text(app, downloads, i)))
            .collect();

        let title = match &app.current_dir {
            Some(dir) => format!(" tracks: {} ", dir),
            None => " tracks ".to_string(),
        };
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    // Player bar: hidden (placeholder text) until the first track loads.
    {
        let bar_block = Block::default()
            .borders(Borders::ALL)
            .title(" player ")
            .padding(Padding {
                left: 1,
                right: 1,
                top: 0,
                bottom: 0,
            });
        let inner = bar_block.inner(chunks[2]);
        frame.render_widget(bar_block, chunks[2]);

        if !app.bar_visible {
            let placeholder = Paragraph::new("nothing loaded, press Enter on a track")
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(placeholder, inner);
        } else if let Some(track) = app.current_track() {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(inner);

            let now_line = Line::from(vec![
                Span::styled(
                    app.transport_glyph(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}  {}", track.number, track.title)),
            ]);
            frame.render_widget(Paragraph::new(now_line), rows[0]);

            let loop_style = if app.state.looping {
                Style::default()
            } else {
                // The dimmed affordance is the only loop feedback.
                Style::default().add_modifier(Modifier::DIM)
            };
            let time_text = match track.duration {
                Some(total) => format!("{} / {}", format_mmss(elapsed), format_mmss(total)),
                None => format_mmss(elapsed),
            };
            let detail_line = Line::from(vec![
                Span::raw(format!("art: {}", track.artwork_label().unwrap_or("-"))),
                Span::raw("   "),
                Span::styled("⟳ loop", loop_style),
                Span::raw("   "),
                Span::raw(time_text),
            ]);
            frame.render_widget(Paragraph::new(detail_line), rows[1]);

            let gauge = Gauge::default()
                .ratio((app.seek_percent / 100.0).clamp(0.0, 1.0))
                .label(format!("{:.0}%", app.seek_percent));
            frame.render_widget(gauge, rows[2]);
        }
    }

    // Controls footer
    let footer_text = controls_text(controls_settings.seek_step_percent);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
