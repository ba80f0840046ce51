//! Custom widgets for the vocabulary TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Widget, Wrap},
};

use super::theme::{icons, Theme};
use crate::models::{ReviewOutcome, ReviewState, WordEntry};
use crate::progress::ProgressStats;

// ══════════════════════════════════════════════════════════════════════════
// Stats Bar Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct StatsBar<'a> {
    stats: &'a ProgressStats,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(stats: &'a ProgressStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

        let muted = Style::default().fg(self.theme.colors.text_muted);
        let cells = [
            Line::from(vec![
                Span::styled(format!("{} ", icons::DOT), self.theme.stats_due()),
                Span::styled("Due: ", muted),
                Span::styled(self.stats.due.to_string(), self.theme.stats_due()),
            ]),
            Line::from(vec![
                Span::styled(format!("{} ", icons::DOT), self.theme.level(4)),
                Span::styled("Learned: ", muted),
                Span::styled(
                    format!("{} ({}%)", self.stats.learned, self.stats.rate),
                    self.theme.level(4),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total: ", muted),
                Span::styled(
                    self.stats.total.to_string(),
                    Style::default().fg(self.theme.colors.text_dim),
                ),
            ]),
        ];

        for (line, chunk) in cells.into_iter().zip(chunks.iter()) {
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(*chunk, buf);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Word Card Widget
// ══════════════════════════════════════════════════════════════════════════

/// A word with its reading, and the meaning once revealed.
pub struct WordCard<'a> {
    entry: &'a WordEntry,
    show_kanji: bool,
    revealed: bool,
    label: &'a str,
    theme: &'a Theme,
}

impl<'a> WordCard<'a> {
    pub fn new(entry: &'a WordEntry, show_kanji: bool, theme: &'a Theme) -> Self {
        Self {
            entry,
            show_kanji,
            revealed: true,
            label: "WORD",
            theme,
        }
    }

    pub fn revealed(mut self, revealed: bool) -> Self {
        self.revealed = revealed;
        self
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let entry: &'a WordEntry = self.entry;
        let mut lines = vec![Line::from(Span::styled(
            entry.title(self.show_kanji),
            self.theme.card_front(),
        ))];
        if let Some(pos) = &entry.part_of_speech {
            lines.push(Line::from(Span::styled(pos.as_str(), self.theme.subtitle())));
        }

        if self.revealed {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                entry.translation.as_str(),
                self.theme.card_back(),
            )));
            if let Some(example) = &entry.example {
                lines.push(Line::from(Span::styled(
                    example.as_str(),
                    Style::default().fg(self.theme.colors.text),
                )));
            }
            if let Some(related) = &entry.related {
                lines.push(Line::from(Span::styled(
                    format!("→ {}", related),
                    Style::default().fg(self.theme.colors.text_dim),
                )));
            }
        }
        lines
    }
}

impl Widget for WordCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.revealed {
            self.theme.colors.success
        } else {
            self.theme.colors.accent
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.label, self.theme.card_front()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines();
        let width = inner.width.saturating_sub(4).max(1) as usize;
        let content_height: u16 = lines
            .iter()
            .map(|line| {
                let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                textwrap::wrap(&text, width).len().max(1) as u16
            })
            .sum();

        // Center vertically
        let vertical_padding = inner.height.saturating_sub(content_height) / 2;
        let content_area = Rect {
            x: inner.x + 2,
            y: inner.y + vertical_padding,
            width: inner.width.saturating_sub(4),
            height: inner.height.saturating_sub(vertical_padding),
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(content_area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Review State Badge
// ══════════════════════════════════════════════════════════════════════════

/// Level, next due day and review count for a word.
pub fn review_badge<'a>(state: Option<&ReviewState>, theme: &Theme) -> Line<'a> {
    match state {
        None => Line::from(Span::styled("not reviewed yet", theme.subtitle())),
        Some(state) => Line::from(vec![
            Span::styled(format!("L{}", state.level), theme.level(state.level)),
            Span::styled(
                format!("  next: {}", state.due.format("%Y-%m-%d")),
                Style::default().fg(theme.colors.text_muted),
            ),
            Span::styled(
                format!("  reviews: {}", state.history.len()),
                Style::default().fg(theme.colors.text_dim),
            ),
        ]),
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Outcome Buttons Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct OutcomeButtons<'a> {
    intervals: &'a [(ReviewOutcome, String)],
    theme: &'a Theme,
}

impl<'a> OutcomeButtons<'a> {
    pub fn new(intervals: &'a [(ReviewOutcome, String)], theme: &'a Theme) -> Self {
        Self { intervals, theme }
    }
}

impl Widget for OutcomeButtons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

        for (i, ((outcome, interval), chunk)) in self.intervals.iter().zip(chunks.iter()).enumerate() {
            let color = outcome.color_for_theme(self.theme);

            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));
            let inner = button.inner(*chunk);
            button.render(*chunk, buf);

            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("{} ", i + 1),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(outcome.name(), Style::default().fg(color)),
                ]),
                Line::from(Span::styled(
                    interval.as_str(),
                    Style::default().fg(self.theme.colors.text_muted),
                )),
            ];

            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Choice List Widget
// ══════════════════════════════════════════════════════════════════════════

/// Numbered translation options. Once answered, the right one turns green
/// and a wrong pick turns red.
pub struct ChoiceList<'a> {
    options: Vec<&'a str>,
    correct: usize,
    picked: Option<usize>,
    theme: &'a Theme,
}

impl<'a> ChoiceList<'a> {
    pub fn new(options: Vec<&'a str>, correct: usize, picked: Option<usize>, theme: &'a Theme) -> Self {
        Self { options, correct, picked, theme }
    }
}

impl Widget for ChoiceList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let constraints = vec![Constraint::Length(3); self.options.len()];
        let rows = Layout::vertical(constraints).split(area);

        for (i, (option, row)) in self.options.iter().zip(rows.iter()).enumerate() {
            let (color, mark) = match self.picked {
                Some(_) if i == self.correct => (self.theme.colors.success, icons::CHECK),
                Some(p) if p == i => (self.theme.colors.error, icons::CROSS),
                _ => (self.theme.colors.text_muted, " "),
            };

            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), self.theme.key_highlight()),
                Span::styled(*option, Style::default().fg(self.theme.colors.text)),
                Span::styled(format!(" {}", mark), Style::default().fg(color)),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            )
            .render(*row, buf);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Level Breakdown Widget
// ══════════════════════════════════════════════════════════════════════════

/// One bar per mastery level, scaled to the largest bucket.
pub struct LevelBreakdown<'a> {
    levels: &'a [usize],
    theme: &'a Theme,
}

impl<'a> LevelBreakdown<'a> {
    pub fn new(levels: &'a [usize], theme: &'a Theme) -> Self {
        Self { levels, theme }
    }
}

impl Widget for LevelBreakdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let max = self.levels.iter().copied().max().unwrap_or(0).max(1);
        let bar_width = area.width.saturating_sub(14) as usize;

        let lines: Vec<Line> = self
            .levels
            .iter()
            .enumerate()
            .map(|(level, &count)| {
                let filled = count * bar_width / max;
                Line::from(vec![
                    Span::styled(format!("L{} ", level), self.theme.level(level as u8)),
                    Span::styled("█".repeat(filled), self.theme.level(level as u8)),
                    Span::styled(
                        format!(" {}", count),
                        Style::default().fg(self.theme.colors.text_muted),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = Span::styled(" │ ", Style::default().fg(self.theme.colors.text_dim));
        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(separator.clone());
            }
            spans.push(Span::styled(*key, self.theme.key_highlight()));
            spans.push(Span::styled(format!(" {}", desc), self.theme.key_hint()));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
