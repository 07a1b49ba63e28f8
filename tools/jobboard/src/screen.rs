use std::io::Stdout;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::config::BoardConfig;
use crate::errors::JobBoardError;
use crate::hotkeys::{action_for_key, HotkeyAction};
use crate::surface::{RenderCommand, Surface};
use crate::tui::{draw_board, visible_rows, BoardModel, Theme, Viewport};

type ScreenTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Production surface: owns the real terminal and a dedicated render
/// thread. The thread drains the command channel into its own
/// `BoardModel`, handles scroll/quit keys, and redraws on a tick; callers
/// never wait on it.
pub struct Screen {
    sender: mpsc::UnboundedSender<RenderCommand>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Screen {
    /// Takes over the terminal (raw mode + alternate screen) and starts
    /// the render thread. Failure here is fatal to the caller; there is
    /// no degraded mode.
    pub fn spawn(config: &BoardConfig) -> Result<Self, JobBoardError> {
        enable_raw_mode().map_err(|e| JobBoardError::Terminal(e.to_string()))?;
        let mut stdout = std::io::stdout();
        if let Err(error) = stdout.execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(JobBoardError::Terminal(error.to_string()));
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(error) => {
                let _ = std::io::stdout().execute(LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(JobBoardError::Terminal(error.to_string()));
            }
        };

        let (sender, receiver) = mpsc::unbounded_channel();
        let tick = Duration::from_millis(config.screen.tick_rate_ms.max(1));
        let theme = Theme::from_config(&config.theme);
        let handle = std::thread::spawn(move || render_loop(terminal, receiver, tick, theme));
        Ok(Self {
            sender,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Blocks until the render thread exits (the quit key). Safe to call
    /// once; later calls return immediately.
    pub fn wait(&self) {
        let handle = self.handle.lock().expect("screen handle lock").take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl Surface for Screen {
    fn apply(&self, command: RenderCommand) {
        // Fire-and-forget: once the render thread has quit, updates are
        // silently dropped.
        let _ = self.sender.send(command);
    }
}

/// Applies one hotkey to the viewport. Returns true when the loop should
/// exit.
pub fn apply_action(
    action: HotkeyAction,
    viewport: &mut Viewport,
    rows: usize,
    visible: usize,
) -> bool {
    match action {
        HotkeyAction::ScrollUp => viewport.scroll_up(),
        HotkeyAction::ScrollDown => viewport.scroll_down(rows, visible),
        HotkeyAction::JumpTop => viewport.jump_top(),
        HotkeyAction::JumpBottom => viewport.jump_bottom(rows, visible),
        HotkeyAction::Quit => return true,
    }
    false
}

fn render_loop(
    mut terminal: ScreenTerminal,
    mut receiver: mpsc::UnboundedReceiver<RenderCommand>,
    tick: Duration,
    theme: Theme,
) {
    let mut model = BoardModel::new();
    let mut viewport = Viewport::default();

    'render: loop {
        while let Ok(command) = receiver.try_recv() {
            model.apply(command);
        }
        let _ = terminal.draw(|frame| draw_board(frame, &model, viewport, &theme));

        let deadline = Instant::now() + tick;
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()).filter(|d| !d.is_zero()) {
            match event::poll(remaining) {
                Ok(true) => {}
                Ok(false) => break,
                Err(_) => break 'render,
            }
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(action) = action_for_key(key.code) else {
                continue;
            };
            let visible = terminal
                .size()
                .map(|size| visible_rows(size.height))
                .unwrap_or(1);
            if apply_action(action, &mut viewport, model.rows().len(), visible) {
                break 'render;
            }
        }
    }

    restore_terminal(&mut terminal);
}

fn restore_terminal(terminal: &mut ScreenTerminal) {
    let _ = disable_raw_mode();
    let _ = terminal.backend_mut().execute(LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}
