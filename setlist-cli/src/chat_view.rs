use anyhow::Result;
use crossterm::event::{self, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use setlist::adapter::{ChatMessage, EventKind, InboundEvent, MemoryTransport, WorkoutBot};
use setlist::session::{ChatId, UserId};

const HELP: &str = "s: start | j/k: message | h/l: button | enter: press | r: resume | q: quit";

struct ChatView {
    selected: usize,
    choice: usize,
    status_message: String,
}

impl ChatView {
    fn new() -> Self {
        Self {
            selected: 0,
            choice: 0,
            status_message: HELP.to_string(),
        }
    }

    fn scroll_down(&mut self, messages: &[ChatMessage]) {
        if !messages.is_empty() && self.selected < messages.len() - 1 {
            self.selected += 1;
            self.choice = 0;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.choice = 0;
        }
    }

    fn next_choice(&mut self, messages: &[ChatMessage]) {
        if let Some(message) = messages.get(self.selected) {
            if self.choice + 1 < message.choices.len() {
                self.choice += 1;
            }
        }
    }

    fn prev_choice(&mut self) {
        if self.choice > 0 {
            self.choice -= 1;
        }
    }

    /// Jump to the newest message with buttons, or the newest message.
    fn follow(&mut self, messages: &[ChatMessage]) {
        self.selected = messages
            .iter()
            .rposition(|m| !m.choices.is_empty())
            .unwrap_or_else(|| messages.len().saturating_sub(1));
        self.choice = 0;
    }

    fn clamp(&mut self, messages: &[ChatMessage]) {
        if self.selected >= messages.len() {
            self.selected = messages.len().saturating_sub(1);
        }
        let choices = messages.get(self.selected).map_or(0, |m| m.choices.len());
        if self.choice >= choices {
            self.choice = choices.saturating_sub(1);
        }
    }
}

async fn session_header(bot: &WorkoutBot<MemoryTransport>, user: UserId) -> String {
    match bot.engine().store().get(user).await {
        Some(session) => {
            let position = match session.current_exercise() {
                Some(exercise) => format!(
                    "exercise {}/{}: {}",
                    session.cursor() + 1,
                    session.working_template().len(),
                    exercise.name
                ),
                None => "awaiting completion".to_string(),
            };
            format!(
                "Setlist - {} - started {} - {}",
                session.day().label(),
                session.started_at().format("%H:%M UTC"),
                position
            )
        }
        None => "Setlist - no active workout (press 's')".to_string(),
    }
}

pub async fn run(
    mut terminal: DefaultTerminal,
    bot: &WorkoutBot<MemoryTransport>,
    user: UserId,
    chat: ChatId,
) -> Result<()> {
    let mut view = ChatView::new();

    loop {
        let messages = bot.transport().messages().await;
        view.clamp(&messages);
        let header_text = session_header(bot, user).await;

        terminal.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

            let header = Paragraph::new(header_text.as_str())
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            if messages.is_empty() {
                let empty_msg = Paragraph::new("No messages yet.\nPress 's' to start a workout!")
                    .style(Style::default().fg(Color::Gray))
                    .block(Block::default().borders(Borders::ALL).title("Chat"));
                frame.render_widget(empty_msg, chunks[1]);
            } else {
                let items: Vec<ListItem> = messages
                    .iter()
                    .enumerate()
                    .map(|(idx, message)| {
                        let edited = if message.edited { " (edited)" } else { "" };
                        let content = format!("{}{}", message.text, edited);
                        let style = if idx == view.selected {
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default()
                        };
                        ListItem::new(content).style(style)
                    })
                    .collect();

                let list = List::new(items).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Chat ({} messages)", messages.len())),
                );

                let mut list_state = ListState::default();
                list_state.select(Some(view.selected));
                frame.render_stateful_widget(list, chunks[1], &mut list_state);
            }

            let buttons: Vec<Span> = messages
                .get(view.selected)
                .map(|m| m.choices.as_slice())
                .unwrap_or_default()
                .iter()
                .enumerate()
                .flat_map(|(idx, choice)| {
                    let style = if idx == view.choice {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::Yellow)
                    };
                    [Span::styled(format!("[{}]", choice.label), style), Span::raw(" ")]
                })
                .collect();
            let buttons = Paragraph::new(Line::from(buttons))
                .block(Block::default().borders(Borders::ALL).title("Buttons"));
            frame.render_widget(buttons, chunks[2]);

            let footer = Paragraph::new(view.status_message.as_str())
                .style(Style::default().fg(Color::White))
                .block(Block::default().borders(Borders::ALL).title("Status"));
            frame.render_widget(footer, chunks[3]);
        })?;

        if let event::Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let outcome = match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                KeyCode::Char('j') | KeyCode::Down => {
                    view.scroll_down(&messages);
                    continue;
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    view.scroll_up();
                    continue;
                }
                KeyCode::Char('l') | KeyCode::Right => {
                    view.next_choice(&messages);
                    continue;
                }
                KeyCode::Char('h') | KeyCode::Left => {
                    view.prev_choice();
                    continue;
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    bot.handle(InboundEvent::new(user, chat, EventKind::StartWorkout))
                        .await
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    bot.handle(InboundEvent::new(user, chat, EventKind::Resume))
                        .await
                }
                KeyCode::Enter => {
                    let pressed = messages
                        .get(view.selected)
                        .and_then(|m| m.choices.get(view.choice).map(|c| (m.id, c.clone())));
                    match pressed {
                        Some((id, choice)) => {
                            view.status_message = format!("Pressed {}", choice.label);
                            bot.handle_callback(user, chat, id, &choice.data).await
                        }
                        None => {
                            view.status_message = "That message has no buttons".to_string();
                            continue;
                        }
                    }
                }
                _ => continue,
            };

            match outcome {
                Ok(()) => {
                    let messages = bot.transport().messages().await;
                    view.follow(&messages);
                }
                Err(e) => {
                    view.status_message = format!("Error: {:#}", e);
                }
            }
        }
    }
}
