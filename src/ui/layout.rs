use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub tab_bar: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

pub struct MessagesLayout {
    pub contact_list: Rect,
    pub thread_header: Rect,
    pub message_area: Rect,
    pub input_box: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // View tabs
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        tab_bar: chunks[0],
        content: chunks[1],
        status_bar: chunks[2],
    }
}

pub fn compute_messages_layout(content: Rect) -> MessagesLayout {
    // Horizontal: contacts | gap | thread
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(32), // Contact list
            Constraint::Min(30),    // Thread
        ])
        .split(content);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Thread header
            Constraint::Min(5),    // Messages
            Constraint::Length(3), // Composer
        ])
        .split(h_chunks[1]);

    MessagesLayout {
        contact_list: h_chunks[0],
        thread_header: right_chunks[0],
        message_area: right_chunks[1],
        input_box: right_chunks[2],
    }
}
