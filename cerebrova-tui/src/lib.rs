pub mod html;
mod view;

use anyhow::{Context, Result};
use cerebrova_client::PredictClient;
use cerebrova_client::upload::is_accepted;
use cerebrova_core::page::{Completion, Page, PageEvent, Task, run_task};
use cerebrova_core::{Config, Document, ElementId, Viewport};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use url::Url;

/// Logical size of the animated background; the canvas scales it to the terminal.
pub const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

pub struct App {
    page: Page,
    input: String,
    cursor_position: usize,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            input: String::new(),
            cursor_position: 0,
            notice: None,
            should_quit: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor offset within the input, in characters.
    pub fn cursor_column(&self) -> usize {
        self.input[..self.cursor_position].chars().count()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance the background by one frame.
    pub fn tick(&mut self) {
        self.page.handle(PageEvent::Frame);
    }

    pub fn resolve(&mut self, completion: Completion) -> bool {
        self.page.resolve(completion)
    }

    /// Map a key press onto the page, returning any work it started.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Task> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('s') if ctrl => self.page.handle(PageEvent::Click(ElementId::SubmitBtn)),
            KeyCode::Char('x') if ctrl => {
                self.input.clear();
                self.cursor_position = 0;
                self.notice = None;
                self.page.handle(PageEvent::FileSelected(None))
            }
            KeyCode::F(1) => self.page.handle(PageEvent::Click(ElementId::InstructionsBtn)),
            KeyCode::Char('?') if self.input.is_empty() => {
                self.page.handle(PageEvent::Click(ElementId::InstructionsBtn))
            }
            KeyCode::F(2) => self.page.handle(PageEvent::Click(ElementId::LearnMoreBtn)),
            KeyCode::Esc => {
                let modal_open = self.page.bindings().tumor_modal.active;
                let sidebar_open = self.page.bindings().sidebar.active;
                if modal_open {
                    self.page.handle(PageEvent::Click(ElementId::CloseModal))
                } else if sidebar_open {
                    self.page.handle(PageEvent::Click(ElementId::CloseBtn))
                } else {
                    self.should_quit = true;
                    None
                }
            }
            KeyCode::Enter => self.select_input(),
            KeyCode::Char(c) if !ctrl => {
                self.input.insert(self.cursor_position, c);
                self.cursor_position += c.len_utf8();
                None
            }
            KeyCode::Backspace => {
                if let Some(c) = self.input[..self.cursor_position].chars().next_back() {
                    self.cursor_position -= c.len_utf8();
                    self.input.remove(self.cursor_position);
                }
                None
            }
            KeyCode::Left => {
                if let Some(c) = self.input[..self.cursor_position].chars().next_back() {
                    self.cursor_position -= c.len_utf8();
                }
                None
            }
            KeyCode::Right => {
                if let Some(c) = self.input[self.cursor_position..].chars().next() {
                    self.cursor_position += c.len_utf8();
                }
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.len();
                None
            }
            _ => None,
        }
    }

    fn select_input(&mut self) -> Option<Task> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return None;
        }

        let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
        if !is_accepted(&path) {
            self.notice = Some(format!(
                "Unsupported file type: {} (use JPG, JPEG or PNG)",
                path.display()
            ));
            return None;
        }

        self.notice = None;
        self.input.clear();
        self.cursor_position = 0;
        self.page.handle(PageEvent::FileSelected(Some(path)))
    }
}

/// Run the interactive page until the user quits, first showing any result
/// carried in `page_url`.
///
/// Blocks the calling thread; requests run on `runtime` and report back over
/// a channel drained once per frame.
pub fn run(config: &Config, runtime: Handle, page_url: Option<&Url>) -> Result<()> {
    let client = PredictClient::with_timeout(&config.server_url, config.timeout_secs)?;
    let report_endpoint = client.endpoint(cerebrova_client::client::REPORT_PATH)?;
    let mut page = Page::new(
        Document::standard(),
        report_endpoint,
        VIEWPORT,
        &mut rand::thread_rng(),
    )
    .context("Failed to bind page elements")?;

    if let Some(url) = page_url {
        page.restore_from_query(url);
    }

    run_page(App::new(page), client, config, runtime)
}

fn run_page(mut app: App, client: PredictClient, config: &Config, runtime: Handle) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let frame_interval = Duration::from_millis(config.frame_interval_ms);

    let result = run_app(&mut terminal, &mut app, &client, &runtime, tx, rx, frame_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn spawn_task(
    runtime: &Handle,
    client: &PredictClient,
    tx: &mpsc::UnboundedSender<Completion>,
    task: Task,
) {
    let client = client.clone();
    let tx = tx.clone();
    runtime.spawn(async move {
        let completion = run_task(task, &client).await;
        // The receiver is gone once the UI has exited
        let _ = tx.send(completion);
    });
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &PredictClient,
    runtime: &Handle,
    tx: mpsc::UnboundedSender<Completion>,
    mut rx: mpsc::UnboundedReceiver<Completion>,
    frame_interval: Duration,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        while let Ok(completion) = rx.try_recv() {
            app.resolve(completion);
        }

        terminal.draw(|f| view::ui(f, app))?;

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && let Some(task) = app.handle_key(key)
        {
            spawn_task(runtime, client, &tx, task);
        }

        if last_frame.elapsed() >= frame_interval {
            app.tick();
            last_frame = Instant::now();
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
