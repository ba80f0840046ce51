//! Main application state and logic.

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::ThreadRng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};
use tracing::info;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use super::widgets::{review_badge, ChoiceList, KeyHints, LevelBreakdown, OutcomeButtons, StatsBar, WordCard};
use crate::config::Config;
use crate::models::{ReviewOutcome, WordEntry};
use crate::progress::{self, ProgressStats};
use crate::quiz::{Flashcards, MultipleChoice, QuizMode, Typing, TypingStatus};
use crate::scheduler;
use crate::session;
use crate::storage::{self, DataDir};
use crate::store::ReviewStateStore;
use crate::vocabulary;

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Dictionary,
    Practice,
    Progress,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Dictionary, Tab::Practice, Tab::Progress];

    fn title(&self) -> &'static str {
        match self {
            Tab::Dictionary => "Dictionary",
            Tab::Practice => "Practice",
            Tab::Progress => "Progress",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// What a path typed into the prompt will be used for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptPurpose {
    LoadVocabulary,
    ImportProgress,
}

pub struct PathPrompt {
    pub purpose: PromptPurpose,
    pub input: String,
}

/// The quiz engine running the current session.
pub enum Engine {
    Flashcard(Flashcards),
    Choice(MultipleChoice),
    Typing(Typing),
}

pub struct App {
    pub tab: Tab,
    pub running: bool,

    // Config and theme
    pub config: Config,
    config_path: PathBuf,
    pub theme: Theme,

    // Storage
    pub data_dir: DataDir,
    pub store: ReviewStateStore,
    pub vocabulary: Vec<WordEntry>,
    rng: ThreadRng,

    // Dictionary state
    pub query: String,
    pub searching: bool,
    pub pos_filter: Option<String>,
    pub word_list_state: ListState,

    // Practice state
    pub session: Vec<WordEntry>,
    pub engine: Engine,
    pub answer_input: String,

    // Progress state
    pub reset_pending: bool,

    pub prompt: Option<PathPrompt>,

    // Status message (shown temporarily)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(data_dir: DataDir, store: ReviewStateStore, config: Config) -> Self {
        let vocabulary = data_dir.load_vocabulary();
        let theme = Theme::from_name(&config.theme);
        let engine = Engine::Flashcard(Flashcards::new(Vec::new()));

        let mut app = Self {
            tab: Tab::Dictionary,
            running: true,
            config,
            config_path: Config::default_path(),
            theme,
            data_dir,
            store,
            vocabulary,
            rng: rand::rng(),
            query: String::new(),
            searching: false,
            pos_filter: None,
            word_list_state: ListState::default(),
            session: Vec::new(),
            engine,
            answer_input: String::new(),
            reset_pending: false,
            prompt: None,
            status_message: None,
        };
        app.reset_word_selection();
        app.new_session();
        app
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            self.set_status(format!("Could not save settings: {}", e));
        }
    }

    pub fn cycle_theme(&mut self) {
        let new_theme_name = self.theme.name.next();
        self.theme = Theme::new(new_theme_name);
        self.config.theme = new_theme_name.as_str().to_string();
        self.save_config();
    }

    pub fn toggle_kanji(&mut self) {
        self.config.show_kanji = !self.config.show_kanji;
        self.save_config();
    }

    pub fn stats(&self) -> ProgressStats {
        progress::summarize(&self.vocabulary, self.store.states(), scheduler::today())
    }

    // ── Dictionary ───────────────────────────────────────────────────────

    pub fn filtered_words(&self) -> Vec<&WordEntry> {
        vocabulary::filter(&self.vocabulary, &self.query, self.pos_filter.as_deref())
    }

    fn reset_word_selection(&mut self) {
        let any = !self.filtered_words().is_empty();
        self.word_list_state = ListState::default().with_selected(any.then_some(0));
    }

    fn move_word_selection(&mut self, down: bool) {
        let len = self.filtered_words().len();
        if len == 0 {
            return;
        }
        let i = self.word_list_state.selected().unwrap_or(0);
        let new_i = match (down, i) {
            (true, i) if i + 1 >= len => 0,
            (true, i) => i + 1,
            (false, 0) => len - 1,
            (false, i) => i - 1,
        };
        self.word_list_state.select(Some(new_i));
    }

    pub fn cycle_pos_filter(&mut self) {
        let all = vocabulary::parts_of_speech(&self.vocabulary);
        self.pos_filter = match &self.pos_filter {
            None => all.first().cloned(),
            Some(current) => all
                .iter()
                .position(|p| p == current)
                .and_then(|i| all.get(i + 1))
                .cloned(),
        };
        self.reset_word_selection();
    }

    pub fn load_vocabulary(&mut self, path: &std::path::Path) {
        match self.data_dir.import_vocabulary(path) {
            Ok(entries) => {
                let count = entries.len();
                self.vocabulary = entries;
                self.pos_filter = None;
                self.reset_word_selection();
                match self.store.seed(&self.vocabulary, scheduler::today()) {
                    Ok(_) => self.set_status(format!("Loaded {} words", count)),
                    Err(e) => self.set_status(format!("Loaded {} words, but saving progress failed: {}", count, e)),
                }
                self.new_session();
            }
            Err(e) => {
                self.set_status(format!("Import failed: {:#}", e));
            }
        }
    }

    // ── Practice ─────────────────────────────────────────────────────────

    /// Draw a fresh session from today's due words (or everything).
    pub fn new_session(&mut self) {
        let due = scheduler::due_entries(&self.vocabulary, self.store.states(), scheduler::today());
        self.session = session::build_session(&due, &self.vocabulary, self.config.session_size, &mut self.rng);
        info!(size = self.session.len(), due = due.len(), "new practice session");
        self.restart_engine();
    }

    fn restart_engine(&mut self) {
        let items = self.session.clone();
        self.engine = match self.config.quiz_mode {
            QuizMode::Flashcard => Engine::Flashcard(Flashcards::new(items)),
            QuizMode::MultipleChoice => Engine::Choice(MultipleChoice::new(items, &mut self.rng)),
            QuizMode::Typing => Engine::Typing(Typing::new(items)),
        };
        self.answer_input.clear();
    }

    pub fn cycle_quiz_mode(&mut self) {
        self.config.quiz_mode = self.config.quiz_mode.next();
        self.save_config();
        self.restart_engine();
    }

    pub fn cycle_session_size(&mut self) {
        self.config.session_size = session::next_session_size(self.config.session_size);
        self.save_config();
        self.new_session();
    }

    pub fn grade_card(&mut self, outcome: ReviewOutcome) {
        let Engine::Flashcard(cards) = &mut self.engine else {
            return;
        };
        if let Err(e) = cards.grade(outcome, &mut self.store, scheduler::today()) {
            self.set_status(format!("Progress not saved: {}", e));
        }
    }

    // ── Progress ─────────────────────────────────────────────────────────

    pub fn export_progress(&mut self) {
        let path = DataDir::default_export_path(scheduler::today());
        match storage::export_progress(self.store.states(), &path) {
            Ok(count) => {
                self.set_status(format!("Exported {} words to {}", count, path.display()));
            }
            Err(e) => {
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    pub fn import_progress(&mut self, path: &std::path::Path) {
        let states = match storage::import_progress(path) {
            Ok(states) => states,
            Err(e) => {
                self.set_status(format!("Import failed: {}", e));
                return;
            }
        };

        let count = states.len();
        match self.store.replace(states) {
            Ok(()) => self.set_status(format!("Imported progress for {} words", count)),
            Err(e) => self.set_status(format!("Imported, but saving failed: {}", e)),
        }
        self.new_session();
    }

    pub fn reset_progress(&mut self) {
        match self.store.reset() {
            Ok(()) => self.set_status("Progress cleared".to_string()),
            Err(e) => self.set_status(format!("Reset failed: {}", e)),
        }
        self.reset_pending = false;
        self.new_session();
    }

    /// Verb for the open path prompt's Enter key.
    fn prompt_action(&self) -> Option<&'static str> {
        self.prompt.as_ref().map(|prompt| match prompt.purpose {
            PromptPurpose::LoadVocabulary => "load",
            PromptPurpose::ImportProgress => "import",
        })
    }

    fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let path = PathBuf::from(prompt.input.trim());
        if path.as_os_str().is_empty() {
            return;
        }
        match prompt.purpose {
            PromptPurpose::LoadVocabulary => self.load_vocabulary(&path),
            PromptPurpose::ImportProgress => self.import_progress(&path),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_keys(key.code);
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.tab = self.tab.next();
                self.searching = false;
                self.reset_pending = false;
                return;
            }
            KeyCode::BackTab if self.tab == Tab::Practice => {
                self.cycle_quiz_mode();
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Dictionary => self.handle_dictionary_keys(key.code),
            Tab::Practice => self.handle_practice_keys(key.code),
            Tab::Progress => self.handle_progress_keys(key.code),
        }
    }

    fn handle_prompt_keys(&mut self, key: KeyCode) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(c) => prompt.input.push(c),
            _ => {}
        }
    }

    fn handle_dictionary_keys(&mut self, key: KeyCode) {
        if self.searching {
            match key {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                KeyCode::Up => self.move_word_selection(false),
                KeyCode::Down => self.move_word_selection(true),
                KeyCode::Backspace => {
                    self.query.pop();
                    self.reset_word_selection();
                }
                KeyCode::Char(c) => {
                    self.query.push(c);
                    self.reset_word_selection();
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Char('p') => self.cycle_pos_filter(),
            KeyCode::Char('v') => self.toggle_kanji(),
            KeyCode::Char('o') => {
                self.prompt = Some(PathPrompt {
                    purpose: PromptPurpose::LoadVocabulary,
                    input: String::new(),
                });
            }
            KeyCode::Esc => {
                self.query.clear();
                self.pos_filter = None;
                self.reset_word_selection();
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_word_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_word_selection(true),
            _ => {}
        }
    }

    fn handle_practice_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::F(2) => return self.cycle_session_size(),
            KeyCode::F(5) => return self.new_session(),
            _ => {}
        }

        match &mut self.engine {
            Engine::Flashcard(cards) => match key {
                KeyCode::Char(' ') => cards.reveal(),
                KeyCode::Char(c @ ('1' | '2')) => {
                    if let Some(outcome) = ReviewOutcome::from_key(c) {
                        self.grade_card(outcome);
                    }
                }
                KeyCode::Char('v') => self.toggle_kanji(),
                KeyCode::Char('t') => self.cycle_theme(),
                KeyCode::Char('q') => self.running = false,
                _ => {}
            },
            Engine::Choice(quiz) => match key {
                KeyCode::Char(c @ '1'..='9') => {
                    let slot = c as usize - '1' as usize;
                    quiz.pick(slot);
                }
                KeyCode::Right | KeyCode::Char('n') => quiz.next(&mut self.rng),
                KeyCode::Left | KeyCode::Char('p') => quiz.previous(&mut self.rng),
                KeyCode::Char('v') => self.toggle_kanji(),
                KeyCode::Char('t') => self.cycle_theme(),
                KeyCode::Char('q') => self.running = false,
                _ => {}
            },
            Engine::Typing(quiz) => match key {
                KeyCode::Enter => {
                    quiz.submit(&self.answer_input);
                }
                KeyCode::Down => {
                    quiz.next();
                    self.answer_input.clear();
                }
                KeyCode::Esc => self.answer_input.clear(),
                KeyCode::Backspace => {
                    self.answer_input.pop();
                }
                KeyCode::Char(c) => self.answer_input.push(c),
                _ => {}
            },
        }
    }

    fn handle_progress_keys(&mut self, key: KeyCode) {
        if key != KeyCode::Char('r') {
            self.reset_pending = false;
        }
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('x') => self.export_progress(),
            KeyCode::Char('i') => {
                self.prompt = Some(PathPrompt {
                    purpose: PromptPurpose::ImportProgress,
                    input: String::new(),
                });
            }
            KeyCode::Char('r') => {
                if self.reset_pending {
                    self.reset_progress();
                } else {
                    self.reset_pending = true;
                }
            }
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg_dark)),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Length(3),   // Header + tabs
            Constraint::Min(10),     // Tab content
            Constraint::Length(1),   // Status
            Constraint::Length(2),   // Hints
        ])
        .split(area);

        self.render_header(frame, chunks[0]);
        match self.tab {
            Tab::Dictionary => self.render_dictionary(frame, chunks[1]),
            Tab::Practice => self.render_practice(frame, chunks[1]),
            Tab::Progress => self.render_progress(frame, chunks[1]),
        }
        self.render_status(frame, chunks[2]);
        self.render_hints(frame, chunks[3]);

        if self.prompt.is_some() {
            self.render_prompt(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(self.theme.subtitle())
            .highlight_style(self.theme.highlight().add_modifier(Modifier::REVERSED))
            .divider(Span::styled("│", Style::default().fg(self.theme.colors.text_dim)))
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(self.theme.colors.text_dim))
                    .title(Span::styled(" Vocabulary SRS ", self.theme.title())),
            );
        frame.render_widget(tabs, area);
    }

    fn render_dictionary(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3),   // Search
            Constraint::Min(5),      // List + detail
        ])
        .split(area);

        let search_row = Layout::horizontal([
            Constraint::Percentage(70),
            Constraint::Percentage(30),
        ])
        .split(chunks[0]);

        let search_style = self.theme.input(self.searching);
        let search = Paragraph::new(self.query.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(search_style)
                .title(" Search: reading / kanji / meaning / example ")
                .title_style(search_style),
        );
        frame.render_widget(search, search_row[0]);
        if self.searching {
            set_input_cursor(frame, search_row[0], &self.query);
        }

        let filter_label = self.pos_filter.as_deref().unwrap_or("all");
        let filter = Paragraph::new(Line::from(vec![
            Span::styled(filter_label, self.theme.highlight()),
            Span::styled(
                if self.config.show_kanji { "  kanji on" } else { "  kanji off" },
                self.theme.subtitle(),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.colors.text_dim))
                .title(" Part of speech ")
                .title_style(self.theme.subtitle()),
        );
        frame.render_widget(filter, search_row[1]);

        let main_chunks = Layout::horizontal([
            Constraint::Percentage(40),  // Word list
            Constraint::Percentage(60),  // Word details
        ])
        .split(chunks[1]);

        let filtered = vocabulary::filter(&self.vocabulary, &self.query, self.pos_filter.as_deref());
        let items: Vec<ListItem> = filtered
            .iter()
            .map(|entry| {
                let level = self.store.get(&entry.identity()).map(|s| s.level);
                let badge = match level {
                    Some(l) => Span::styled(format!(" L{}", l), self.theme.level(l)),
                    None => Span::styled(" new", Style::default().fg(self.theme.colors.text_dim)),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.title(self.config.show_kanji),
                        Style::default().fg(self.theme.colors.text),
                    ),
                    badge,
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.primary))
                    .title(format!(" Words {}/{} ", filtered.len(), self.vocabulary.len()))
                    .title_style(self.theme.highlight()),
            )
            .highlight_style(self.theme.selected())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, main_chunks[0], &mut self.word_list_state);

        let selected = self
            .word_list_state
            .selected()
            .and_then(|i| filtered.get(i))
            .copied();
        match selected {
            Some(entry) => {
                let detail = Layout::vertical([
                    Constraint::Min(6),
                    Constraint::Length(1),
                ])
                .split(main_chunks[1]);
                frame.render_widget(WordCard::new(entry, self.config.show_kanji, &self.theme), detail[0]);
                frame.render_widget(
                    Paragraph::new(review_badge(self.store.get(&entry.identity()), &self.theme))
                        .alignment(Alignment::Center),
                    detail[1],
                );
            }
            None => {
                let empty = Paragraph::new("No matching words")
                    .alignment(Alignment::Center)
                    .style(self.theme.subtitle());
                frame.render_widget(empty, main_chunks[1]);
            }
        }
    }

    fn render_practice(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1),   // Session info
            Constraint::Length(1),   // Stats
            Constraint::Length(1),   // Progress gauge
            Constraint::Length(1),   // Spacing
            Constraint::Min(8),      // Quiz
        ])
        .split(area);

        let due = scheduler::due_entries(&self.vocabulary, self.store.states(), scheduler::today()).len();
        let info = Paragraph::new(Line::from(vec![
            Span::styled(self.config.quiz_mode.display_name(), self.theme.highlight()),
            Span::styled(
                format!(
                    "   due {} / all {}   session size {}",
                    due,
                    self.vocabulary.len(),
                    self.config.session_size
                ),
                self.theme.subtitle(),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(info, chunks[0]);

        let stats = self.stats();
        frame.render_widget(StatsBar::new(&stats, &self.theme), chunks[1]);

        let (index, len) = match &self.engine {
            Engine::Flashcard(cards) => (cards.index(), cards.len()),
            Engine::Choice(quiz) => (quiz.index(), quiz.len()),
            Engine::Typing(quiz) => (quiz.index(), quiz.len()),
        };
        let gauge_area = centered_rect(60, 100, chunks[2]);
        let ratio = if len == 0 { 0.0 } else { index as f64 / len as f64 };
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(self.theme.colors.primary).bg(self.theme.colors.bg_highlight))
                .ratio(ratio.clamp(0.0, 1.0))
                .label(format!("{}/{}", (index + 1).min(len), len)),
            gauge_area,
        );

        let quiz_area = centered_rect(80, 100, chunks[4]);
        if len == 0 {
            let empty = Paragraph::new("Nothing to practice. Load a word list with o on the Dictionary tab.")
                .alignment(Alignment::Center)
                .style(self.theme.subtitle());
            frame.render_widget(empty, quiz_area);
            return;
        }

        match &self.engine {
            Engine::Flashcard(cards) => self.render_flashcard(frame, quiz_area, cards),
            Engine::Choice(quiz) => self.render_choice(frame, quiz_area, quiz),
            Engine::Typing(quiz) => self.render_typing(frame, quiz_area, quiz),
        }
    }

    fn render_flashcard(&self, frame: &mut Frame, area: Rect, cards: &Flashcards) {
        let Some(entry) = cards.current() else {
            return;
        };
        let chunks = Layout::vertical([
            Constraint::Min(6),      // Card
            Constraint::Length(1),   // Spacing
            Constraint::Length(4),   // Buttons
        ])
        .split(area);

        let label = if cards.is_revealed() { "ANSWER" } else { "QUESTION" };
        frame.render_widget(
            WordCard::new(entry, self.config.show_kanji, &self.theme)
                .revealed(cards.is_revealed())
                .label(label),
            chunks[0],
        );

        let preview = scheduler::preview(self.store.get(&entry.identity()), scheduler::today());
        frame.render_widget(
            OutcomeButtons::new(&preview, &self.theme),
            centered_rect(70, 100, chunks[2]),
        );
    }

    fn render_choice(&self, frame: &mut Frame, area: Rect, quiz: &MultipleChoice) {
        let Some(entry) = quiz.current() else {
            return;
        };
        let options: Vec<&str> = quiz.options().map(|e| e.translation.as_str()).collect();
        let chunks = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(options.len() as u16 * 3),
        ])
        .split(area);

        frame.render_widget(
            WordCard::new(entry, self.config.show_kanji, &self.theme)
                .revealed(false)
                .label("CHOOSE THE MEANING"),
            chunks[0],
        );
        frame.render_widget(
            ChoiceList::new(options, quiz.choices().correct, quiz.picked(), &self.theme),
            chunks[2],
        );
    }

    fn render_typing(&self, frame: &mut Frame, area: Rect, quiz: &Typing) {
        let Some(entry) = quiz.current() else {
            return;
        };
        let chunks = Layout::vertical([
            Constraint::Length(6),   // Word
            Constraint::Length(1),   // Spacing
            Constraint::Length(3),   // Input
            Constraint::Length(1),   // Spacing
            Constraint::Length(2),   // Result
        ])
        .split(area);

        frame.render_widget(
            WordCard::new(entry, self.config.show_kanji, &self.theme)
                .revealed(false)
                .label("TYPE THE MEANING"),
            chunks[0],
        );

        let input_style = self.theme.input(true);
        let input = Paragraph::new(self.answer_input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(input_style)
                .title(" Meaning ")
                .title_style(input_style),
        );
        frame.render_widget(input, chunks[2]);
        set_input_cursor(frame, chunks[2], &self.answer_input);

        let result = match quiz.status() {
            TypingStatus::Idle => Line::from(""),
            TypingStatus::Right => Line::from(Span::styled(
                "✓ Correct!",
                Style::default().fg(self.theme.colors.success).add_modifier(Modifier::BOLD),
            )),
            TypingStatus::Wrong => Line::from(vec![
                Span::styled("✗ Answer: ", Style::default().fg(self.theme.colors.error)),
                Span::styled(entry.translation.as_str(), self.theme.card_back()),
            ]),
        };
        frame.render_widget(Paragraph::new(result).alignment(Alignment::Center), chunks[4]);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let stats = self.stats();
        let content_area = centered_rect(70, 100, area);
        let chunks = Layout::vertical([
            Constraint::Length(7),   // Overview
            Constraint::Length(1),   // Gauge
            Constraint::Length(1),   // Spacing
            Constraint::Length(7),   // Levels
            Constraint::Length(1),   // Spacing
            Constraint::Min(4),      // Data
        ])
        .split(content_area);

        let muted = Style::default().fg(self.theme.colors.text_muted);
        let value = Style::default().fg(self.theme.colors.primary).add_modifier(Modifier::BOLD);
        let overview_lines = vec![
            Line::from(vec![
                Span::styled("Learned (L≥1): ", muted),
                Span::styled(format!("{}/{}", stats.learned, stats.total), value),
            ]),
            Line::from(vec![
                Span::styled("Due today: ", muted),
                Span::styled(stats.due.to_string(), self.theme.stats_due()),
            ]),
            Line::from(vec![
                Span::styled("Total reviews: ", muted),
                Span::styled(stats.reviews.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Daily streak: ", muted),
                Span::styled(
                    format!("{} day{}", stats.daily_streak, if stats.daily_streak == 1 { "" } else { "s" }),
                    Style::default().fg(if stats.daily_streak > 0 {
                        self.theme.colors.success
                    } else {
                        self.theme.colors.text_dim
                    }),
                ),
            ]),
        ];
        let overview = Paragraph::new(overview_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.colors.primary))
                .title(" Overview ")
                .title_style(self.theme.highlight()),
        );
        frame.render_widget(overview, chunks[0]);

        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(self.theme.colors.success).bg(self.theme.colors.bg_highlight))
                .percent(stats.rate.min(100) as u16)
                .label(format!("{}%", stats.rate)),
            chunks[1],
        );

        let levels_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.accent))
            .title(" Words by level ")
            .title_style(Style::default().fg(self.theme.colors.accent));
        let levels_inner = levels_block.inner(chunks[3]);
        frame.render_widget(levels_block, chunks[3]);
        frame.render_widget(LevelBreakdown::new(&stats.levels, &self.theme), levels_inner);

        let data_lines = vec![
            Line::from(vec![
                Span::styled("Vocabulary: ", muted),
                Span::styled(
                    self.data_dir.vocabulary_path().display().to_string(),
                    Style::default().fg(self.theme.colors.text_dim),
                ),
            ]),
            Line::from(vec![
                Span::styled("Progress: ", muted),
                Span::styled(
                    self.data_dir.progress_path().display().to_string(),
                    Style::default().fg(self.theme.colors.text_dim),
                ),
                Span::styled(
                    if self.store.is_empty() { "  (nothing reviewed yet)" } else { "" },
                    muted,
                ),
            ]),
        ];
        let data = Paragraph::new(data_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.colors.text_dim))
                .title(" Data & backup ")
                .title_style(self.theme.subtitle()),
        );
        frame.render_widget(data, chunks[5]);
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let Some(prompt) = &self.prompt else {
            return;
        };
        let title = match prompt.purpose {
            PromptPurpose::LoadVocabulary => " Load word list (JSON array) ",
            PromptPurpose::ImportProgress => " Import progress file ",
        };

        let popup = centered_rect(60, 20, area);
        let popup = Rect {
            height: 3,
            y: popup.y + popup.height.saturating_sub(3) / 2,
            ..popup
        };
        frame.render_widget(Clear, popup);
        let style = self.theme.input(true);
        let input = Paragraph::new(prompt.input.as_str())
            .style(Style::default().bg(self.theme.colors.bg_dark))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style)
                    .title(title)
                    .title_style(style),
            );
        frame.render_widget(input, popup);
        set_input_cursor(frame, popup, &prompt.input);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let message = if self.reset_pending {
            Some(("Press r again to clear all progress".to_string(), self.theme.colors.warning))
        } else {
            // Show status message if recent (within 5 seconds)
            self.status_message
                .as_ref()
                .filter(|(_, time)| time.elapsed().as_secs() < 5)
                .map(|(msg, _)| (msg.clone(), self.theme.colors.success))
        };

        if let Some((msg, color)) = message {
            let status = Paragraph::new(msg)
                .alignment(Alignment::Center)
                .style(Style::default().fg(color));
            frame.render_widget(status, area);
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let theme_hint = format!("[{}]", self.theme.name.display_name());
        let hints: Vec<(&str, &str)> = if let Some(action) = self.prompt_action() {
            vec![("Enter", action), ("Esc", "cancel")]
        } else {
            match (self.tab, &self.engine) {
                (Tab::Dictionary, _) if self.searching => {
                    vec![("type", "search"), ("↑/↓", "nav"), ("Enter", "done")]
                }
                (Tab::Dictionary, _) => vec![
                    ("Tab", "next"),
                    ("j/k", "nav"),
                    ("/", "search"),
                    ("p", "part of speech"),
                    ("v", "kanji"),
                    ("o", "open list"),
                    ("t", theme_hint.as_str()),
                    ("q", "quit"),
                ],
                (Tab::Practice, Engine::Flashcard(_)) => vec![
                    ("Space", "reveal"),
                    ("1", "don't know"),
                    ("2", "know"),
                    ("S-Tab", "mode"),
                    ("F2", "size"),
                    ("F5", "new session"),
                    ("q", "quit"),
                ],
                (Tab::Practice, Engine::Choice(_)) => vec![
                    ("1-4", "pick"),
                    ("→", "next"),
                    ("←", "redo previous"),
                    ("S-Tab", "mode"),
                    ("F2", "size"),
                    ("F5", "new session"),
                    ("q", "quit"),
                ],
                (Tab::Practice, Engine::Typing(_)) => vec![
                    ("Enter", "check"),
                    ("↓", "next"),
                    ("S-Tab", "mode"),
                    ("F2", "size"),
                    ("F5", "new session"),
                    ("Ctrl-C", "quit"),
                ],
                (Tab::Progress, _) => vec![
                    ("Tab", "next"),
                    ("x", "export"),
                    ("i", "import"),
                    ("r", "reset"),
                    ("t", theme_hint.as_str()),
                    ("q", "quit"),
                ],
            }
        };
        frame.render_widget(KeyHints::new(&hints, &self.theme), area);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Put the terminal cursor after `text` inside a bordered single-line input.
/// Wide (CJK) characters take two cells.
fn set_input_cursor(frame: &mut Frame, area: Rect, text: &str) {
    let inner_width = area.width.saturating_sub(2);
    let col = (text.width() as u16).min(inner_width.saturating_sub(1));
    frame.set_cursor_position((area.x + 1 + col, area.y + 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::store::tests::MemoryBackend;

    fn app() -> (tempfile::TempDir, App) {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = DataDir::new(tmp.path().to_path_buf()).unwrap();
        let store = ReviewStateStore::open(Box::new(MemoryBackend::default()));
        let mut app = App::new(data_dir, store, Config::default());
        app.config_path = tmp.path().join("config.toml");
        (tmp, app)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn starts_with_sample_and_full_session() {
        let (_tmp, app) = app();
        assert_eq!(app.vocabulary.len(), 5);
        assert_eq!(app.session.len(), 5);
        assert_eq!(app.word_list_state.selected(), Some(0));
    }

    #[test]
    fn search_narrows_word_list() {
        let (_tmp, mut app) = app();
        press(&mut app, KeyCode::Char('/'));
        for c in "酒".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        let words: Vec<&str> = app.filtered_words().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["いざかや"]);
        assert!(!app.searching);
    }

    #[test]
    fn flashcard_grading_updates_store() {
        let (_tmp, mut app) = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Practice);

        let first = app.session[0].identity();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('2'));

        let state = app.store.get(&first).unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(app.stats().learned, 1);
        // the session is not reshuffled by grading
        assert_eq!(app.session[0].identity(), first);
    }

    #[test]
    fn typing_mode_leaves_store_alone() {
        let (_tmp, mut app) = app();
        app.config.quiz_mode = QuizMode::Typing;
        app.restart_engine();
        app.tab = Tab::Practice;

        let answer = app.session[0].translation.clone();
        for c in answer.chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        let Engine::Typing(quiz) = &app.engine else {
            panic!("expected typing engine");
        };
        assert_eq!(quiz.status(), TypingStatus::Right);
        assert!(app.store.is_empty());
    }

    #[test]
    fn reset_needs_a_second_press() {
        let (_tmp, mut app) = app();
        app.grade_card(ReviewOutcome::Pass);
        app.tab = Tab::Progress;

        press(&mut app, KeyCode::Char('r'));
        assert!(app.reset_pending);
        assert_eq!(app.store.len(), 1);

        press(&mut app, KeyCode::Char('r'));
        assert!(!app.reset_pending);
        assert!(app.store.is_empty());
    }

    #[test]
    fn bad_vocabulary_file_keeps_current_list() {
        let (tmp, mut app) = app();
        let bad = tmp.path().join("bad.json");
        std::fs::write(&bad, "{}").unwrap();

        app.load_vocabulary(&bad);
        assert_eq!(app.vocabulary.len(), 5);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.starts_with("Import failed"));
    }

    fn load_words(app: &mut App, dir: &std::path::Path, n: usize) {
        let records: Vec<String> = (0..n)
            .map(|i| format!(r#"{{"word": "w{}", "translation": "t{}"}}"#, i, i))
            .collect();
        let list = dir.join("words.json");
        std::fs::write(&list, format!("[{}]", records.join(","))).unwrap();
        app.load_vocabulary(&list);
    }

    fn session_order(app: &App) -> Vec<String> {
        app.session.iter().map(|e| e.word.clone()).collect()
    }

    #[test]
    fn size_key_rebuilds_session_and_saves_config() {
        let (tmp, mut app) = app();
        load_words(&mut app, tmp.path(), 40);
        app.tab = Tab::Practice;
        assert_eq!(app.session.len(), 20);

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.config.session_size, 30);
        assert_eq!(app.session.len(), 30);

        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.session.len(), 10);
        assert_eq!(Config::load_from(&tmp.path().join("config.toml")).unwrap().session_size, 10);
    }

    #[test]
    fn new_session_key_reshuffles_and_restarts() {
        let (tmp, mut app) = app();
        load_words(&mut app, tmp.path(), 12);
        app.tab = Tab::Practice;

        press(&mut app, KeyCode::Char('2'));
        let Engine::Flashcard(cards) = &app.engine else {
            panic!("expected flashcard engine");
        };
        assert_eq!(cards.index(), 1);

        press(&mut app, KeyCode::F(5));
        let Engine::Flashcard(cards) = &app.engine else {
            panic!("expected flashcard engine");
        };
        assert_eq!(cards.index(), 0);
        // the graded word is no longer due
        assert_eq!(app.session.len(), 11);

        let before = session_order(&app);
        let mut reshuffled = false;
        for _ in 0..20 {
            press(&mut app, KeyCode::F(5));
            let order = session_order(&app);
            reshuffled |= order != before;
            let mut sorted = order;
            sorted.sort();
            let mut expected = before.clone();
            expected.sort();
            assert_eq!(sorted, expected);
        }
        assert!(reshuffled);
    }

    #[test]
    fn prompt_hint_names_its_action() {
        let (_tmp, mut app) = app();
        app.tab = Tab::Progress;
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.prompt.as_ref().map(|p| p.purpose), Some(PromptPurpose::ImportProgress));
        assert_eq!(app.prompt_action(), Some("import"));

        press(&mut app, KeyCode::Esc);
        app.tab = Tab::Dictionary;
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.prompt_action(), Some("load"));
    }

    #[test]
    fn loading_vocabulary_seeds_state() {
        let (tmp, mut app) = app();
        let list = tmp.path().join("list.json");
        std::fs::write(&list, r#"[{"kana": "あける", "cn": "打开"}, {"kana": "あさい", "cn": "浅"}]"#).unwrap();

        app.load_vocabulary(&list);
        assert_eq!(app.vocabulary.len(), 2);
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.session.len(), 2);
    }
}
