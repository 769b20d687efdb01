//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses.
///
/// Owns the only copy of `AppState`, so UI events and fetch completions are
/// applied one at a time in arrival order.
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Mount the home view
        let commands = self.state.startup();
        self.send_all(commands);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let commands = self.state.handle_response(response);
                    self.send_all(commands);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send_all(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        // Any key clears the previous notice
        if !matches!(event, UiEvent::ToggleHelp | UiEvent::CloseHelp) {
            self.state.notice = None;
        }

        let command = match event {
            // View navigation
            UiEvent::ShowHome => self.state.show_home(),
            UiEvent::ShowDrafts => self.state.show_drafts(),
            UiEvent::ShowLogin => {
                self.state.show_login();
                None
            }
            UiEvent::Back => self.state.back(),
            UiEvent::Logout => self.state.logout(),

            // Feed list
            UiEvent::SelectNext => {
                self.state.select_next();
                None
            }
            UiEvent::SelectPrev => {
                self.state.select_prev();
                None
            }
            UiEvent::OpenPost => self.state.open_post(),
            UiEvent::NextPage => self.state.next_page(),
            UiEvent::PrevPage => self.state.prev_page(),
            UiEvent::CycleSort => self.state.cycle_sort(),
            UiEvent::Refresh => {
                let commands = self.state.refresh();
                self.send_all(commands);
                None
            }

            // Home filters
            UiEvent::NextCategory => self.state.next_category(),
            UiEvent::PrevCategory => self.state.prev_category(),
            UiEvent::AllCategories => self.state.all_categories(),
            UiEvent::NextTag => {
                self.state.next_tag();
                None
            }
            UiEvent::PrevTag => {
                self.state.prev_tag();
                None
            }
            UiEvent::ToggleTag => self.state.toggle_tag(),

            // Post view
            UiEvent::ScrollUp => {
                self.state.scroll_up();
                None
            }
            UiEvent::ScrollDown => {
                self.state.scroll_down();
                None
            }

            // Login form
            UiEvent::FormChar(c) => {
                self.state.form_char(c);
                None
            }
            UiEvent::FormBackspace => {
                self.state.form_backspace();
                None
            }
            UiEvent::NextField => {
                self.state.next_field();
                None
            }
            UiEvent::ToggleAuthMode => {
                self.state.toggle_auth_mode();
                None
            }
            UiEvent::Submit => self.state.submit(),

            // Popups
            UiEvent::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
                None
            }
            UiEvent::CloseHelp => {
                self.state.show_help = false;
                None
            }

            // System
            UiEvent::Quit => return true,
        };

        if let Some(cmd) = command {
            let _ = self.network_tx.send(cmd);
        }
        false
    }
}
