//! BlogSphere TUI - Actor-based terminal blog reader
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async API requests

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use blogsphere_tui::app::state::{AuthMode, FormField};
use blogsphere_tui::app::{AppActor, AppState};
use blogsphere_tui::auth::SessionToken;
use blogsphere_tui::config::Config;
use blogsphere_tui::constants::APP_NAME;
use blogsphere_tui::feed::{FeedKind, FeedState};
use blogsphere_tui::messages::ui_events::{key_to_ui_event, AppView};
use blogsphere_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use blogsphere_tui::network::{BlogClient, NetworkActor};
use blogsphere_tui::storage::FileTokenStore;
use blogsphere_tui::ui::{
    create_excerpt, format_date, html_to_text, pagination_line, render_tabs, status_color,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(base_url = %config.base_url, page_size = config.page_size, "Starting");

    let session = SessionToken::new(Box::new(FileTokenStore::new()));
    let client = BlogClient::new(&config, session.clone());
    let state = AppState::new(session, config.page_size);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.view, current_state.show_help)
                {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Nav bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_nav_bar(f, state, main_chunks[0]);

    match state.view {
        AppView::Home => draw_home(f, state, main_chunks[1]),
        AppView::Drafts => draw_drafts(f, state, main_chunks[1]),
        AppView::Post => draw_post(f, state, main_chunks[1]),
        AppView::Login => draw_login(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn nav_tab(label: &str, active: bool, color: Color) -> Span<'static> {
    if active {
        Span::styled(
            label.to_string(),
            Style::default().fg(Color::Black).bg(color).bold(),
        )
    } else {
        Span::styled(label.to_string(), Style::default().fg(Color::Gray))
    }
}

fn draw_nav_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let feed_view = match state.view {
        AppView::Post => state.post.return_to,
        view => view,
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        nav_tab(" 1:Home ", feed_view == AppView::Home, Color::Cyan),
    ];
    if state.auth.has_token {
        spans.push(Span::raw(" "));
        spans.push(nav_tab(" 2:Drafts ", feed_view == AppView::Drafts, Color::Magenta));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let account = match state.auth.user_name() {
        Some(name) => Line::from(vec![
            Span::styled(name.to_string(), Style::default().fg(Color::Green).bold()),
            Span::styled("  x:Log out ", Style::default().fg(Color::DarkGray)),
        ]),
        None if state.auth.has_token => {
            Line::from(Span::styled("x:Log out ", Style::default().fg(Color::DarkGray)))
        }
        None => Line::from(Span::styled("l:Log in ", Style::default().fg(Color::DarkGray))),
    };
    f.render_widget(Paragraph::new(account.right_aligned()), area);
}

fn draw_home(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header: title, sort, categories, tags
            Constraint::Min(3),    // Posts
        ])
        .split(area);

    let header = feed_header_block(&state.home);
    let inner = header.inner(chunks[0]);
    f.render_widget(header, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category tabs
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Tag chips
        ])
        .split(inner);

    draw_category_tabs(f, state, rows[0]);
    draw_tag_chips(f, state, rows[2]);

    draw_post_list(f, &state.home, chunks[1], "No posts found.");
}

fn draw_drafts(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    f.render_widget(feed_header_block(&state.drafts), chunks[0]);
    draw_post_list(
        f,
        &state.drafts,
        chunks[1],
        "You don't have any draft posts yet.",
    );
}

/// Feed title with the sort control on the right
fn feed_header_block(feed: &FeedState) -> Block<'static> {
    let borders = match feed.kind {
        FeedKind::Home => Borders::ALL,
        FeedKind::Drafts => Borders::TOP,
    };
    Block::default()
        .borders(borders)
        .title(Span::styled(
            format!(" {} ", feed.kind.title()),
            Style::default().bold(),
        ))
        .title(
            Line::from(Span::styled(
                format!(" Sort by: {} (s) ", feed.query.sort.label()),
                Style::default().fg(Color::Yellow),
            ))
            .right_aligned(),
        )
}

fn draw_category_tabs(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut titles = vec![String::from("All Posts")];
    titles.extend(state.categories.iter().map(|c| match c.post_count {
        Some(count) => format!("{} ({})", c.name, count),
        None => c.name.clone(),
    }));

    let selected = state
        .home
        .query
        .category
        .as_deref()
        .and_then(|id| state.categories.iter().position(|c| c.id == id))
        .map(|i| i + 1)
        .unwrap_or(0);

    f.render_widget(render_tabs(titles, selected), area);
}

fn draw_tag_chips(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(err) = &state.taxonomy_error {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            area,
        );
        return;
    }

    let selected_tag = state.home.query.tag.as_deref();
    let mut spans = Vec::new();
    for (i, tag) in state.tags.iter().enumerate() {
        let label = match tag.post_count {
            Some(count) => format!(" {} ({}) ", tag.name, count),
            None => format!(" {} ", tag.name),
        };
        let mut style = if selected_tag == Some(tag.id.as_str()) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        };
        if i == state.tag_cursor {
            style = style.underlined().bold();
        }
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_post_list(f: &mut Frame, feed: &FeedState, area: Rect, empty_message: &str) {
    let show_pagination = feed.total_pages > 1 && feed.items.is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if feed.error.is_some() { 1 } else { 0 }),
            Constraint::Min(1),
            Constraint::Length(if show_pagination { 1 } else { 0 }),
        ])
        .split(area);

    if let Some(err) = &feed.error {
        f.render_widget(
            Paragraph::new(format!(" {}  (r:retry)", err)).style(Style::default().fg(Color::Red)),
            chunks[0],
        );
    }

    let block = Block::default().borders(Borders::ALL);

    if feed.loading && feed.items.is_none() {
        let loading = Paragraph::new("Loading posts...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(loading, chunks[1]);
        return;
    }

    let posts = feed.posts();
    if posts.is_empty() {
        if feed.error.is_none() {
            let empty = Paragraph::new(empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, chunks[1]);
        }
        return;
    }

    let items: Vec<ListItem> = posts
        .iter()
        .map(|post| {
            let mut meta = vec![
                Span::styled(
                    format_date(&post.created_at),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
            ];
            if let Some(minutes) = post.reading_time {
                meta.push(Span::styled(
                    format!("{} min read  ", minutes),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            meta.push(Span::styled(
                format!("[{}]", post.category.name),
                Style::default().fg(Color::Cyan),
            ));
            for tag in &post.tags {
                meta.push(Span::styled(
                    format!(" #{}", tag.name),
                    Style::default().fg(Color::Yellow),
                ));
            }
            if let Some(status) = post.status.filter(|_| feed.kind == FeedKind::Drafts) {
                meta.push(Span::styled(
                    format!("  {}", status.as_str()),
                    Style::default().fg(status_color(Some(status))),
                ));
            }

            ListItem::new(vec![
                Line::from(Span::styled(post.title.clone(), Style::default().bold())),
                Line::from(Span::styled(
                    format!("by {}", post.author_name()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(create_excerpt(&post.content)),
                Line::from(meta),
                Line::raw(""),
            ])
        })
        .collect();

    let title = if feed.loading { " Posts [...] " } else { " Posts " };
    let list = List::new(items)
        .block(block.title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(feed.selected));
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    if show_pagination {
        f.render_widget(
            Paragraph::new(pagination_line(feed.query.page, feed.total_pages)),
            chunks[2],
        );
    }
}

fn draw_post(f: &mut Frame, state: &RenderState, area: Rect) {
    let view = &state.post;
    let Some(post) = &view.post else {
        let loading = Paragraph::new("Loading post...")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(vec![
            Span::styled(
                format!("by {}", post.author_name()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(format_date(&post.created_at), Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", post.category.name),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{}", t.name)).collect();
        lines.push(Line::from(Span::styled(
            tags.join(" "),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(err) = &view.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::raw(""));
    lines.extend(html_to_text(&post.content).lines().map(|l| Line::from(l.to_string())));

    let title = if view.loading { " Post [...] " } else { " Post " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(" Esc:back  ↑/↓:scroll ").right_aligned());

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    f.render_widget(body, area);
}

fn draw_login(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 60, area);

    let (title, toggle_hint) = match state.login_mode {
        AuthMode::Login => (" Log In ", "Ctrl+N: create an account instead"),
        AuthMode::Signup => (" Sign Up ", "Ctrl+N: log in with an existing account"),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    let inner = block.inner(popup_area);
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let mut constraints = Vec::new();
    if state.login_mode == AuthMode::Signup {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Length(3), // Email
        Constraint::Length(3), // Password
        Constraint::Length(1), // Error
        Constraint::Min(0),    // Hints
    ]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let masked = "*".repeat(state.login_password_len);
    let mut fields = Vec::new();
    if state.login_mode == AuthMode::Signup {
        fields.push((FormField::Name, "Name", state.login_name.as_str()));
    }
    fields.push((FormField::Email, "Email", state.login_email.as_str()));
    fields.push((FormField::Password, "Password", masked.as_str()));

    for (row, (field, label, value)) in fields.iter().enumerate() {
        let focused = state.login_field == *field;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(*value).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", label)),
        );
        f.render_widget(input, rows[row]);

        if focused && !state.login_submitting {
            let area = rows[row];
            let max_x = area.x + area.width.saturating_sub(2);
            let cursor_x = (area.x + value.chars().count() as u16 + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, area.y + 1));
        }
    }

    let error_row = fields.len();
    if let Some(err) = &state.login_error {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            rows[error_row],
        );
    } else if state.login_submitting {
        f.render_widget(
            Paragraph::new("Signing in...").style(Style::default().fg(Color::DarkGray)),
            rows[error_row],
        );
    }

    let hints = Paragraph::new(format!(
        "\nEnter: submit  Tab: next field  Esc: back\n{}",
        toggle_hint
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, rows[error_row + 1]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(notice) = &state.notice {
        let bar = Paragraph::new(format!(" {} ", notice)).style(Style::default().fg(Color::Yellow));
        f.render_widget(bar, area);
        return;
    }

    let status = match state.view {
        AppView::Home | AppView::Drafts if state.feed().loading => " Loading... ",
        AppView::Home => {
            " ↑/↓:select | Enter:open | ←/→:page | Tab:category | [/]:tag Space:toggle | s:sort | ?:help | q:quit "
        }
        AppView::Drafts => " ↑/↓:select | Enter:open | ←/→:page | s:sort | r:refresh | ?:help | q:quit ",
        AppView::Post => " Esc:back | ↑/↓:scroll | q:quit ",
        AppView::Login => " Enter:submit | Tab:next field | Ctrl+N:switch mode | Esc:back ",
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 BLOG SPHERE - Keyboard Shortcuts

 VIEWS
   1                  Home feed
   2                  My drafts (requires login)
   l / x              Log in / Log out

 FEED
   ↑ / ↓  (k / j)     Select post
   Enter              Open post
   ← / →  (p / n)     Previous / next page
   s                  Cycle sort order
   r                  Refresh

 FILTERS (home)
   Tab / Shift+Tab    Next / previous category
   a                  All categories
   [ / ]              Move tag cursor
   Space / t          Toggle tag filter

 POST
   Esc / b            Back to list
   ↑ / ↓              Scroll

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
