//! Entry Loop
//!
//! [`TerminalApp`] is a thin surface around the core state machine:
//! - Converts crossterm events into core [`Event`]s
//! - Carries out the [`Effect`] each event returns
//! - Feeds command completions back in as they arrive
//! - Redraws after every event
//!
//! # Design Philosophy
//!
//! All decisions live in [`worktree_core::App`]. This loop never inspects
//! a mode or a worktree; if behaviour needs to change, it changes in the
//! core where it can be tested without a terminal.

use std::sync::Arc;

use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use worktree_core::{App, Config, Dispatcher, Effect, Event, Message, Repository};

use crate::input;
use crate::render;
use crate::theme::Theme;

/// Completions buffered between redraws
const MESSAGE_CAPACITY: usize = 64;

/// Terminal front end: state machine, dispatcher and palette
pub struct TerminalApp {
    state: App,
    theme: Theme,
    repo: Arc<dyn Repository>,
    dispatcher: Dispatcher,
    messages: mpsc::Receiver<Message>,
    running: bool,
}

impl TerminalApp {
    /// Wire `repo` to a fresh state machine
    pub fn new(config: Config, repo: Arc<dyn Repository>) -> Self {
        let (dispatcher, messages) = Dispatcher::channel(Arc::clone(&repo), MESSAGE_CAPACITY);
        Self {
            state: App::new(config),
            theme: Theme::default(),
            repo,
            dispatcher,
            messages,
            running: true,
        }
    }

    /// Core state (for tests and the exit path)
    pub fn state(&self) -> &App {
        &self.state
    }

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let size = terminal.size()?;
        self.handle(Event::Resize {
            width: size.width,
            height: size.height,
        })
        .await;
        let start = self.state.start();
        self.apply(Some(start)).await;

        let mut events = EventStream::new();
        self.draw(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal input first so keys never queue behind completions
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(key) = input::translate(key) {
                            self.handle(key.into()).await;
                        }
                    }
                    Some(Ok(TermEvent::Resize(width, height))) => {
                        self.handle(Event::Resize { width, height }).await;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        info!("Terminal event stream closed");
                        self.running = false;
                    }
                },

                Some(message) = self.messages.recv() => {
                    self.handle(message.into()).await;
                }
            }

            if self.running {
                self.draw(terminal)?;
            }
        }

        Ok(())
    }

    /// Apply one event and carry out its effect
    pub async fn handle(&mut self, event: Event) {
        let effect = self.state.handle(event);
        self.apply(effect).await;
    }

    /// Wait for the next completion and apply it; false once the channel closed
    pub async fn process_next_message(&mut self) -> bool {
        match self.messages.recv().await {
            Some(message) => {
                self.handle(message.into()).await;
                true
            }
            None => false,
        }
    }

    async fn apply(&mut self, effect: Option<Effect>) {
        match effect {
            None => {}
            Some(Effect::Dispatch(command)) => {
                self.dispatcher.dispatch(command);
            }
            Some(Effect::Quit) => {
                debug!("Quit requested");
                self.running = false;
            }
            Some(Effect::ChangeDirectory(path)) => {
                info!(path = %path.display(), "Exiting into worktree");
                if let Err(e) = self.repo.record_change_directory_target(&path).await {
                    warn!(error = %e, "Could not record change-directory target");
                }
                self.running = false;
            }
        }
    }

    /// Render the current state
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| render::render(frame, &self.state, &self.theme))?;
        Ok(())
    }
}
