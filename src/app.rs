use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::api::{self, ApiClient, ApiError, DeployResponse, Health};
use crate::history::{HistoryStore, NewDeployment};
use crate::page::{self, GeneratedPage};
use crate::theme::{ThemeColors, ThemeOption};

/// One wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Input,
    Theme,
    Preview,
    Deploy,
    History,
}

/// Indicator labels, in order. `Step::indicator_index` maps into this.
pub const STEP_LABELS: [&str; 4] = ["Project Info", "Choose Theme", "Preview", "Deploy"];

impl Step {
    /// Position in the step indicator. History sits outside the main flow.
    pub fn indicator_index(self) -> Option<usize> {
        match self {
            Step::Input => Some(0),
            Step::Theme => Some(1),
            Step::Preview => Some(2),
            Step::Deploy => Some(3),
            Step::History => None,
        }
    }

    /// Where "back" lands from each step.
    pub fn back(self) -> Step {
        match self {
            Step::Input => Step::Input,
            Step::Theme => Step::Input,
            Step::Preview => Step::Theme,
            Step::Deploy => Step::Preview,
            Step::History => Step::Input,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_name: String,
    pub project_description: String,
}

pub const SUGGESTIONS: &[&str] = &[
    "TechFlow - A revolutionary project management platform that streamlines team collaboration. Built for modern teams who need efficiency and clarity.",
    "ArtSpace - A creative portfolio platform for artists and designers. Showcase your work and connect with potential clients effortlessly.",
    "EventHub - The ultimate event planning and management solution. Create memorable experiences with our comprehensive planning tools.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Name,
    Description,
    Suggestion(usize),
}

impl InputFocus {
    fn next(self) -> InputFocus {
        match self {
            InputFocus::Name => InputFocus::Description,
            InputFocus::Description => InputFocus::Suggestion(0),
            InputFocus::Suggestion(i) if i + 1 < SUGGESTIONS.len() => InputFocus::Suggestion(i + 1),
            InputFocus::Suggestion(_) => InputFocus::Name,
        }
    }

    fn prev(self) -> InputFocus {
        match self {
            InputFocus::Name => InputFocus::Suggestion(SUGGESTIONS.len() - 1),
            InputFocus::Description => InputFocus::Name,
            InputFocus::Suggestion(0) => InputFocus::Description,
            InputFocus::Suggestion(i) => InputFocus::Suggestion(i - 1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputForm {
    pub project_name: String,
    pub project_description: String,
    pub focus: InputFocus,
    pub name_error: Option<&'static str>,
    pub description_error: Option<&'static str>,
}

impl Default for InputForm {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_description: String::new(),
            focus: InputFocus::Name,
            name_error: None,
            description_error: None,
        }
    }
}

impl InputForm {
    /// Inline validation. Failing fields get a message; values are kept.
    pub fn validate(&mut self) -> bool {
        self.name_error = if self.project_name.trim().is_empty() {
            Some("Project name is required")
        } else {
            None
        };

        let description = self.project_description.trim();
        self.description_error = if description.is_empty() {
            Some("Project description is required")
        } else if description.split('.').count() < 2 {
            Some("Please provide at least two sentences")
        } else {
            None
        };

        self.name_error.is_none() && self.description_error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Browse,
    Editing,
}

/// The custom-theme form: a name plus the five palette colors.
#[derive(Debug, Clone)]
pub struct ThemeEditor {
    pub name: String,
    pub colors: ThemeColors,
    pub focus: usize,
}

impl ThemeEditor {
    pub const FIELD_COUNT: usize = 6;

    pub fn seeded_from(base: &ThemeOption) -> Self {
        Self {
            name: String::new(),
            colors: base.colors.clone(),
            focus: 0,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.colors.primary,
            2 => &mut self.colors.secondary,
            3 => &mut self.colors.accent,
            4 => &mut self.colors.text,
            _ => &mut self.colors.background,
        }
    }

    pub fn field_value(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.colors.primary,
            2 => &self.colors.secondary,
            3 => &self.colors.accent,
            4 => &self.colors.text,
            _ => &self.colors.background,
        }
    }
}

/// Cosmetic staged labels shown while a deploy spins up. The real request
/// goes out only after the last stage.
pub const DEPLOY_STAGES: &[&str] = &[
    "Preparing deployment files...",
    "Creating HTML content...",
    "Generating unique site name...",
    "Creating the site...",
    "Uploading files...",
    "Finalizing deployment...",
];

const STAGE_DURATION: Duration = Duration::from_millis(800);
const FINALIZE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPhase {
    /// Walking through the cosmetic stage labels.
    Staging { stage: usize },
    /// The real request is in flight.
    Requesting,
    /// Success response received; brief beat before the summary screen.
    Finalizing {
        url: String,
        admin_url: Option<String>,
    },
    Success {
        url: String,
        admin_url: Option<String>,
    },
    Failed { message: String },
}

impl DeployPhase {
    pub fn progress(&self) -> u16 {
        match self {
            DeployPhase::Staging { stage } => (((stage + 1) * 80) / DEPLOY_STAGES.len()) as u16,
            DeployPhase::Requesting => 90,
            DeployPhase::Finalizing { .. } | DeployPhase::Success { .. } => 100,
            DeployPhase::Failed { .. } => 0,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DeployPhase::Staging { stage } => {
                DEPLOY_STAGES.get(*stage).copied().unwrap_or_default()
            }
            DeployPhase::Requesting => "Deploying your landing page...",
            DeployPhase::Finalizing { .. } => "Deployment successful!",
            DeployPhase::Success { .. } | DeployPhase::Failed { .. } => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    Unknown,
    Online { version: String },
    Offline,
}

/// Results reported back by worker threads. Each generation/deploy spawn is
/// stamped with a sequence number so replies that arrive after the user has
/// moved on are dropped instead of applied.
#[derive(Debug)]
pub enum UiMsg {
    PageGenerated {
        seq: u64,
        page: GeneratedPage,
    },
    DeployFinished {
        seq: u64,
        result: Result<DeployResponse, ApiError>,
    },
    HealthChecked {
        result: Result<Health, ApiError>,
    },
}

pub struct App {
    pub step: Step,
    pub should_quit: bool,

    // Step 1: project info
    pub form: InputForm,

    // Step 2: theme selection (one extra row for "design your own")
    pub themes: Vec<ThemeOption>,
    pub theme_selected: usize,
    pub theme_mode: ThemeMode,
    pub editor: ThemeEditor,

    // Wizard-owned selections, cleared on restart
    pub project: Option<ProjectInfo>,
    pub selected_theme: Option<ThemeOption>,
    pub generated_page: Option<GeneratedPage>,
    pub generation_pending: bool,
    pub saved_preview_path: Option<PathBuf>,

    // Step 4: deploy
    pub deploy_phase: Option<DeployPhase>,
    phase_since: Instant,
    deploy_seq: u64,
    page_seq: u64,

    // History view
    pub history_selected: usize,
    pub confirm_clear: bool,

    pub service_health: ServiceHealth,

    pub api: ApiClient,
    pub store: HistoryStore,
    tx: Sender<UiMsg>,
}

impl App {
    pub fn new(api: ApiClient, store: HistoryStore, tx: Sender<UiMsg>) -> Self {
        let themes = ThemeOption::catalog();
        let editor = ThemeEditor::seeded_from(&themes[0]);
        Self {
            step: Step::Input,
            should_quit: false,
            form: InputForm::default(),
            themes,
            theme_selected: 0,
            theme_mode: ThemeMode::Browse,
            editor,
            project: None,
            selected_theme: None,
            generated_page: None,
            generation_pending: false,
            saved_preview_path: None,
            deploy_phase: None,
            phase_since: Instant::now(),
            deploy_seq: 0,
            page_seq: 0,
            history_selected: 0,
            confirm_clear: false,
            service_health: ServiceHealth::Unknown,
            api,
            store,
            tx,
        }
    }

    /// Fire-and-forget liveness probe feeding the header chip.
    pub fn probe_health(&self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = api.health();
            let _ = tx.send(UiMsg::HealthChecked { result });
        });
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.step {
            Step::Input => self.handle_input(key),
            Step::Theme => self.handle_theme(key),
            Step::Preview => self.handle_preview(key),
            Step::Deploy => self.handle_deploy(key),
            Step::History => self.handle_history(key),
        }
    }

    /// Advance timer-driven state: the cosmetic deploy stages and the brief
    /// success beat. The real request result always wins over the timer.
    pub fn on_tick(&mut self) {
        let Some(phase) = self.deploy_phase.clone() else {
            return;
        };
        match phase {
            DeployPhase::Staging { stage } => {
                if self.phase_since.elapsed() >= STAGE_DURATION {
                    let next = stage + 1;
                    if next < DEPLOY_STAGES.len() {
                        self.deploy_phase = Some(DeployPhase::Staging { stage: next });
                        self.phase_since = Instant::now();
                    } else {
                        self.deploy_phase = Some(DeployPhase::Requesting);
                        self.phase_since = Instant::now();
                        self.spawn_deploy();
                    }
                }
            }
            DeployPhase::Finalizing { url, admin_url } => {
                if self.phase_since.elapsed() >= FINALIZE_DELAY {
                    self.deploy_phase = Some(DeployPhase::Success { url, admin_url });
                }
            }
            _ => {}
        }
    }

    /// Apply a worker reply. Stale sequence numbers, and replies for steps
    /// the user has already left, are discarded.
    pub fn apply_message(&mut self, msg: UiMsg) {
        match msg {
            UiMsg::PageGenerated { seq, page } => {
                if seq != self.page_seq {
                    return;
                }
                self.generation_pending = false;
                if self.step == Step::Preview {
                    self.generated_page = Some(page);
                }
            }
            UiMsg::DeployFinished { seq, result } => {
                if seq != self.deploy_seq || self.step != Step::Deploy {
                    return;
                }
                match result {
                    Ok(resp) => {
                        let Some(project) = self.project.clone() else {
                            return;
                        };
                        let theme_name = self
                            .selected_theme
                            .as_ref()
                            .map(|t| t.name.clone())
                            .unwrap_or_default();
                        self.store.add(NewDeployment {
                            project_name: project.project_name,
                            project_description: project.project_description,
                            theme_name,
                            url: resp.url.clone(),
                            admin_url: resp.admin_url.clone(),
                            deployed_at: resp.deployed_at,
                            site_id: resp.site_id,
                            deploy_id: resp.deploy_id,
                        });
                        self.deploy_phase = Some(DeployPhase::Finalizing {
                            url: resp.url,
                            admin_url: resp.admin_url,
                        });
                        self.phase_since = Instant::now();
                    }
                    Err(err) => {
                        tracing::error!("deployment failed: {err}");
                        self.deploy_phase = Some(DeployPhase::Failed {
                            message: err.to_string(),
                        });
                    }
                }
            }
            UiMsg::HealthChecked { result } => {
                self.service_health = match result {
                    Ok(health) => ServiceHealth::Online {
                        version: health.version,
                    },
                    Err(err) => {
                        tracing::warn!("service health check failed: {err}");
                        ServiceHealth::Offline
                    }
                };
            }
        }
    }

    // ── Step 1: project info ─────────────────────────────────────────────

    fn handle_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::F(2) => self.view_history(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.form.focus = self.form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus = self.form.focus.prev(),
            KeyCode::Enter => match self.form.focus {
                InputFocus::Suggestion(i) => self.apply_suggestion(i),
                _ => self.submit_input(),
            },
            KeyCode::Char(c) => match self.form.focus {
                InputFocus::Name => self.form.project_name.push(c),
                InputFocus::Description => self.form.project_description.push(c),
                InputFocus::Suggestion(_) => {}
            },
            KeyCode::Backspace => {
                match self.form.focus {
                    InputFocus::Name => self.form.project_name.pop(),
                    InputFocus::Description => self.form.project_description.pop(),
                    InputFocus::Suggestion(_) => None,
                };
            }
            _ => {}
        }
    }

    fn apply_suggestion(&mut self, index: usize) {
        let Some(&suggestion) = SUGGESTIONS.get(index) else {
            return;
        };
        let (name, description) = suggestion.split_once(" - ").unwrap_or((suggestion, ""));
        self.form.project_name = name.to_string();
        self.form.project_description = description.to_string();
        self.form.name_error = None;
        self.form.description_error = None;
        self.form.focus = InputFocus::Name;
    }

    fn submit_input(&mut self) {
        if !self.form.validate() {
            return;
        }
        self.project = Some(ProjectInfo {
            project_name: self.form.project_name.trim().to_string(),
            project_description: self.form.project_description.trim().to_string(),
        });
        self.theme_mode = ThemeMode::Browse;
        self.step = Step::Theme;
    }

    // ── Step 2: theme ────────────────────────────────────────────────────

    fn handle_theme(&mut self, key: KeyCode) {
        match self.theme_mode {
            ThemeMode::Browse => self.handle_theme_browse(key),
            ThemeMode::Editing => self.handle_theme_editor(key),
        }
    }

    fn handle_theme_browse(&mut self, key: KeyCode) {
        // One row per preset plus the "design your own" row at the bottom.
        let rows = self.themes.len() + 1;
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.theme_selected > 0 {
                    self.theme_selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.theme_selected < rows - 1 {
                    self.theme_selected += 1;
                }
            }
            KeyCode::Enter => {
                if self.theme_selected < self.themes.len() {
                    let theme = self.themes[self.theme_selected].clone();
                    self.select_theme(theme);
                } else {
                    self.theme_mode = ThemeMode::Editing;
                }
            }
            KeyCode::F(2) => self.view_history(),
            KeyCode::Esc => self.step = self.step.back(),
            _ => {}
        }
    }

    fn handle_theme_editor(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.editor.focus = (self.editor.focus + 1) % ThemeEditor::FIELD_COUNT;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.editor.focus =
                    (self.editor.focus + ThemeEditor::FIELD_COUNT - 1) % ThemeEditor::FIELD_COUNT;
            }
            KeyCode::Char(c) => self.editor.field_mut().push(c),
            KeyCode::Backspace => {
                self.editor.field_mut().pop();
            }
            KeyCode::Enter => {
                let theme = ThemeOption::custom(&self.editor.name, self.editor.colors.clone());
                self.select_theme(theme);
            }
            KeyCode::Esc => self.theme_mode = ThemeMode::Browse,
            _ => {}
        }
    }

    /// Lock in a theme and kick off page generation in the background. The
    /// wizard moves to the preview step immediately; generation failure can
    /// only ever downgrade the preview, never block it.
    fn select_theme(&mut self, theme: ThemeOption) {
        let Some(project) = self.project.clone() else {
            return;
        };
        self.selected_theme = Some(theme.clone());
        self.generated_page = None;
        self.saved_preview_path = None;
        self.page_seq += 1;
        self.generation_pending = true;

        let seq = self.page_seq;
        let api = self.api.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let page = page::generate(
                &api,
                &project.project_name,
                &project.project_description,
                &theme,
            );
            let _ = tx.send(UiMsg::PageGenerated { seq, page });
        });

        self.theme_mode = ThemeMode::Browse;
        self.step = Step::Preview;
    }

    // ── Step 3: preview ──────────────────────────────────────────────────

    fn handle_preview(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.start_deploy(),
            KeyCode::Char('s') => self.save_preview(),
            KeyCode::F(2) => self.view_history(),
            KeyCode::Esc => self.step = self.step.back(),
            _ => {}
        }
    }

    /// Write the generated document next to the history file so it can be
    /// opened in a browser.
    fn save_preview(&mut self) {
        let Some(page) = &self.generated_page else {
            return;
        };
        let path = preview_path();
        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| fs::write(&path, &page.html));
        match result {
            Ok(()) => self.saved_preview_path = Some(path),
            Err(err) => tracing::warn!("failed to write preview to {}: {err}", path.display()),
        }
    }

    // ── Step 4: deploy ───────────────────────────────────────────────────

    /// Begin the deployment sequence. Runs exactly once per entry into the
    /// deploy step; the sequence number isolates this attempt from any
    /// earlier one that may still be settling.
    fn start_deploy(&mut self) {
        self.deploy_seq += 1;
        self.deploy_phase = Some(DeployPhase::Staging { stage: 0 });
        self.phase_since = Instant::now();
        self.step = Step::Deploy;
    }

    fn spawn_deploy(&mut self) {
        let Some(project) = self.project.clone() else {
            return;
        };
        let theme_name = self.selected_theme.as_ref().map(|t| t.name.clone());
        let seq = self.deploy_seq;
        let api = self.api.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let description =
                api::deploy_description(&project.project_name, &project.project_description);
            let result = api.deploy(&project.project_name, &description, theme_name.as_deref());
            let _ = tx.send(UiMsg::DeployFinished { seq, result });
        });
    }

    fn handle_deploy(&mut self, key: KeyCode) {
        match self.deploy_phase.clone() {
            Some(DeployPhase::Success { .. }) => match key {
                KeyCode::Char('n') | KeyCode::Enter => self.restart(),
                KeyCode::Char('h') => self.view_history(),
                KeyCode::Esc => self.leave_deploy(),
                _ => {}
            },
            Some(DeployPhase::Failed { .. }) => match key {
                KeyCode::Esc | KeyCode::Char('b') => self.leave_deploy(),
                KeyCode::Char('r') => self.restart(),
                _ => {}
            },
            // Still in flight; leaving only abandons the attempt's effect on
            // the UI, the response itself is discarded on arrival.
            _ => {
                if key == KeyCode::Esc {
                    self.leave_deploy();
                }
            }
        }
    }

    fn leave_deploy(&mut self) {
        self.deploy_phase = None;
        self.step = Step::Deploy.back();
    }

    /// Reset to a pristine input step. All wizard selections are dropped.
    pub fn restart(&mut self) {
        self.form = InputForm::default();
        self.project = None;
        self.selected_theme = None;
        self.generated_page = None;
        self.generation_pending = false;
        self.saved_preview_path = None;
        self.deploy_phase = None;
        self.theme_selected = 0;
        self.theme_mode = ThemeMode::Browse;
        self.editor = ThemeEditor::seeded_from(&self.themes[0]);
        self.history_selected = 0;
        self.confirm_clear = false;
        self.step = Step::Input;
    }

    // ── History ──────────────────────────────────────────────────────────

    fn view_history(&mut self) {
        self.history_selected = 0;
        self.confirm_clear = false;
        self.step = Step::History;
    }

    fn handle_history(&mut self, key: KeyCode) {
        if self.confirm_clear {
            match key {
                KeyCode::Char('y') => {
                    self.store.clear();
                    self.history_selected = 0;
                    self.confirm_clear = false;
                }
                KeyCode::Char('n') | KeyCode::Esc => self.confirm_clear = false,
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.history_selected > 0 {
                    self.history_selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.store.is_empty() && self.history_selected < self.store.len() - 1 {
                    self.history_selected += 1;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(record) = self.store.list().get(self.history_selected) {
                    let id = record.id.clone();
                    self.store.remove(&id);
                    if self.history_selected > 0 && self.history_selected >= self.store.len() {
                        self.history_selected = self.store.len() - 1;
                    }
                }
            }
            KeyCode::Char('c') => {
                if !self.store.is_empty() {
                    self.confirm_clear = true;
                }
            }
            KeyCode::Char('n') => self.restart(),
            KeyCode::Esc => self.step = self.step.back(),
            _ => {}
        }
    }
}

fn preview_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagecraft")
        .join("preview.html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSource;
    use std::sync::mpsc::{self, Receiver};
    use tempfile::TempDir;

    // Nothing listens on this port, so preview/deploy fail fast.
    const DEAD_URL: &str = "http://127.0.0.1:9";

    fn test_app() -> (App, Receiver<UiMsg>, TempDir) {
        let dir = TempDir::new().unwrap();
        let (tx, rx) = mpsc::channel();
        let store = HistoryStore::load(dir.path().join("history.json"));
        let app = App::new(ApiClient::new(DEAD_URL), store, tx);
        (app, rx, dir)
    }

    fn submit_project(app: &mut App, name: &str, description: &str) {
        app.form.project_name = name.to_string();
        app.form.project_description = description.to_string();
        app.form.focus = InputFocus::Name;
        app.handle_key(KeyCode::Enter);
    }

    fn sample_deployment(name: &str) -> NewDeployment {
        NewDeployment {
            project_name: name.to_string(),
            project_description: "One. Two.".to_string(),
            theme_name: "Event".to_string(),
            url: format!("https://{}.example.app", name.to_lowercase()),
            admin_url: None,
            deployed_at: "2026-08-07T12:00:00+00:00".to_string(),
            site_id: "s".to_string(),
            deploy_id: "d".to_string(),
        }
    }

    #[test]
    fn back_table_matches_the_step_order() {
        assert_eq!(Step::Theme.back(), Step::Input);
        assert_eq!(Step::Preview.back(), Step::Theme);
        assert_eq!(Step::Deploy.back(), Step::Preview);
        assert_eq!(Step::History.back(), Step::Input);
    }

    #[test]
    fn indicator_covers_the_main_flow_only() {
        assert_eq!(Step::Input.indicator_index(), Some(0));
        assert_eq!(Step::Deploy.indicator_index(), Some(3));
        assert_eq!(Step::History.indicator_index(), None);
    }

    #[test]
    fn validation_rejects_single_sentence_and_keeps_values() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "Just one sentence without a period");
        assert_eq!(app.step, Step::Input);
        assert!(app.project.is_none());
        assert_eq!(
            app.form.description_error,
            Some("Please provide at least two sentences")
        );
        assert_eq!(app.form.project_name, "TechFlow");
        assert_eq!(
            app.form.project_description,
            "Just one sentence without a period"
        );
    }

    #[test]
    fn validation_rejects_missing_name() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "   ", "A tool. For teams.");
        assert_eq!(app.step, Step::Input);
        assert_eq!(app.form.name_error, Some("Project name is required"));
    }

    #[test]
    fn degenerate_two_period_description_is_accepted() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "a..");
        assert_eq!(app.step, Step::Theme);
    }

    #[test]
    fn valid_input_advances_to_theme() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, " TechFlow ", " A tool. For teams. ");
        assert_eq!(app.step, Step::Theme);
        let project = app.project.as_ref().unwrap();
        assert_eq!(project.project_name, "TechFlow");
        assert_eq!(project.project_description, "A tool. For teams.");
    }

    #[test]
    fn suggestion_fills_both_fields() {
        let (mut app, _rx, _dir) = test_app();
        app.form.focus = InputFocus::Suggestion(0);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.form.project_name, "TechFlow");
        assert!(app.form.project_description.starts_with("A revolutionary"));
        assert_eq!(app.form.focus, InputFocus::Name);
    }

    #[test]
    fn selecting_a_theme_moves_to_preview_before_generation_lands() {
        let (mut app, rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        app.handle_key(KeyCode::Enter); // pick "Tech Startup"

        // The preview step is entered immediately, page still pending.
        assert_eq!(app.step, Step::Preview);
        assert!(app.generated_page.is_none());
        assert!(app.generation_pending);

        // The dead endpoint forces the fallback template.
        let msg = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        app.apply_message(msg);
        assert!(!app.generation_pending);
        let page = app.generated_page.as_ref().unwrap();
        assert_eq!(page.source, PageSource::Fallback);
        assert_eq!(page.meta_tags.title, "TechFlow - Professional Landing Page");
    }

    #[test]
    fn stale_generation_reply_is_discarded() {
        let (mut app, rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        app.handle_key(KeyCode::Enter); // first selection
        let first = rx.recv_timeout(Duration::from_secs(10)).unwrap();

        app.handle_key(KeyCode::Esc); // back to theme
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter); // second selection, new sequence
        let second = rx.recv_timeout(Duration::from_secs(10)).unwrap();

        app.apply_message(first);
        assert!(app.generated_page.is_none(), "stale reply must not apply");
        app.apply_message(second);
        let page = app.generated_page.as_ref().unwrap();
        assert_eq!(app.selected_theme.as_ref().unwrap().name, "Portfolio");
        assert_eq!(page.source, PageSource::Fallback);
    }

    #[test]
    fn generation_reply_after_leaving_preview_is_dropped() {
        let (mut app, rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        app.handle_key(KeyCode::Enter);
        let msg = rx.recv_timeout(Duration::from_secs(10)).unwrap();

        app.handle_key(KeyCode::Esc); // back to theme before the reply lands
        app.apply_message(msg);
        assert!(app.generated_page.is_none());
        assert!(!app.generation_pending);
    }

    #[test]
    fn custom_theme_editor_produces_a_custom_selection() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        // Move to the "design your own" row.
        for _ in 0..app.themes.len() {
            app.handle_key(KeyCode::Down);
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.theme_mode, ThemeMode::Editing);

        for c in "Midnight".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.step, Step::Preview);
        let theme = app.selected_theme.as_ref().unwrap();
        assert!(theme.is_custom);
        assert_eq!(theme.id, "custom");
        assert_eq!(theme.name, "Midnight");
    }

    #[test]
    fn deploy_walks_stages_then_issues_the_request() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        app.handle_key(KeyCode::Enter); // theme
        app.handle_key(KeyCode::Enter); // preview -> deploy
        assert_eq!(app.step, Step::Deploy);
        assert_eq!(app.deploy_phase, Some(DeployPhase::Staging { stage: 0 }));

        // Not enough elapsed time: the stage holds.
        app.on_tick();
        assert_eq!(app.deploy_phase, Some(DeployPhase::Staging { stage: 0 }));

        // Force each stage boundary.
        for expected in 1..DEPLOY_STAGES.len() {
            app.phase_since = Instant::now() - STAGE_DURATION;
            app.on_tick();
            assert_eq!(
                app.deploy_phase,
                Some(DeployPhase::Staging { stage: expected })
            );
        }
        app.phase_since = Instant::now() - STAGE_DURATION;
        app.on_tick();
        assert_eq!(app.deploy_phase, Some(DeployPhase::Requesting));
    }

    #[test]
    fn staged_progress_percentages() {
        assert_eq!(DeployPhase::Staging { stage: 0 }.progress(), 13);
        assert_eq!(
            DeployPhase::Staging {
                stage: DEPLOY_STAGES.len() - 1
            }
            .progress(),
            80
        );
        assert_eq!(DeployPhase::Requesting.progress(), 90);
        assert_eq!(
            DeployPhase::Success {
                url: String::new(),
                admin_url: None
            }
            .progress(),
            100
        );
    }

    #[test]
    fn deploy_failure_shows_the_service_message_and_restart_clears() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);

        app.apply_message(UiMsg::DeployFinished {
            seq: app.deploy_seq,
            result: Err(ApiError::Service(
                "Maximum 10 deployments per hour allowed".to_string(),
            )),
        });
        match app.deploy_phase.as_ref().unwrap() {
            DeployPhase::Failed { message } => {
                assert_eq!(message, "Maximum 10 deployments per hour allowed");
            }
            other => panic!("expected failure, got {other:?}"),
        }

        app.handle_key(KeyCode::Char('r')); // start over
        assert_eq!(app.step, Step::Input);
        assert!(app.project.is_none());
        assert!(app.selected_theme.is_none());
        assert!(app.generated_page.is_none());
        assert!(app.form.project_name.is_empty());
    }

    #[test]
    fn deploy_success_records_history_after_the_finalize_beat() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);

        app.apply_message(UiMsg::DeployFinished {
            seq: app.deploy_seq,
            result: Ok(DeployResponse {
                success: true,
                site_id: "site-9".to_string(),
                deploy_id: "deploy-9".to_string(),
                url: "https://techflow.example.app".to_string(),
                admin_url: Some("https://admin.example.app".to_string()),
                title: "TechFlow".to_string(),
                description: "A tool. For teams.".to_string(),
                deployed_at: "2026-08-07T12:00:00+00:00".to_string(),
            }),
        });

        assert_eq!(app.store.len(), 1);
        let record = &app.store.list()[0];
        assert_eq!(record.project_name, "TechFlow");
        assert_eq!(record.theme_name, "Tech Startup");
        assert_eq!(record.url, "https://techflow.example.app");
        assert!(matches!(
            app.deploy_phase,
            Some(DeployPhase::Finalizing { .. })
        ));

        app.phase_since = Instant::now() - FINALIZE_DELAY;
        app.on_tick();
        assert!(matches!(app.deploy_phase, Some(DeployPhase::Success { .. })));
    }

    #[test]
    fn stale_deploy_reply_is_discarded_after_leaving_the_step() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        let seq = app.deploy_seq;

        app.handle_key(KeyCode::Esc); // back to preview mid-flight
        assert_eq!(app.step, Step::Preview);

        app.apply_message(UiMsg::DeployFinished {
            seq,
            result: Err(ApiError::Service("too late".to_string())),
        });
        assert!(app.deploy_phase.is_none());
        assert!(app.store.is_empty());
    }

    #[test]
    fn history_is_reachable_and_returns_to_input() {
        let (mut app, _rx, _dir) = test_app();
        submit_project(&mut app, "TechFlow", "A tool. For teams.");
        assert_eq!(app.step, Step::Theme);
        app.handle_key(KeyCode::F(2));
        assert_eq!(app.step, Step::History);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.step, Step::Input);
        // The form survives the detour.
        assert_eq!(app.form.project_name, "TechFlow");
    }

    #[test]
    fn history_delete_and_clear_confirmation() {
        let (mut app, _rx, _dir) = test_app();
        app.store.add(sample_deployment("Alpha"));
        app.store.add(sample_deployment("Bravo"));
        app.handle_key(KeyCode::F(2));

        app.handle_key(KeyCode::Char('d')); // delete "Bravo", the newest
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.list()[0].project_name, "Alpha");

        app.handle_key(KeyCode::Char('c'));
        assert!(app.confirm_clear);
        app.handle_key(KeyCode::Char('n')); // cancel
        assert!(!app.confirm_clear);
        assert_eq!(app.store.len(), 1);

        app.handle_key(KeyCode::Char('c'));
        app.handle_key(KeyCode::Char('y'));
        assert!(app.store.is_empty());
    }
}
