use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub focus_border: Style,
    pub blurred_border: Style,
    pub selection: Style,
    pub text: Style,
    pub text_secondary: Style,

    // Specific components
    pub pseudo_entry: Style,
    pub set_folder_count: Style,
    pub folder_title: Style,
    pub folder_ghosted: Style,
    pub child_count: Style,
    pub toggled_marker: Style,
    pub invalid_input: Style,
    pub footer: Style,
    pub popup_border: Style,
    pub popup_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            blurred_border: Style::default().fg(Color::Cyan),
            selection: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::White),
            text_secondary: Style::default().fg(Color::Gray),

            pseudo_entry: Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
            set_folder_count: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            folder_title: Style::default().fg(Color::White),
            folder_ghosted: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            child_count: Style::default().fg(Color::Green),
            toggled_marker: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            invalid_input: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            popup_border: Style::default().fg(Color::Magenta).bg(Color::Black),
            popup_text: Style::default().fg(Color::White),
        }
    }
}
