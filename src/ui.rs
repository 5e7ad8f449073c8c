use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::bookmarks::BookmarkStore;
use crate::models::{App, FocusArea, ROW_RANDOM_ALL};
use crate::sets::validate_draft;
use crate::theme::Theme;

/// Renders the two-pane view: sets on the left, folder browser on the right.
pub fn render(f: &mut Frame, app: &App, store: &BookmarkStore, theme: &Theme) {
    let area = f.area();
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30), // sets pane
            Constraint::Min(1),     // folder browser
        ])
        .split(vertical_chunks[0]);

    render_sets_pane(f, app, theme, columns[0]);
    render_folder_pane(f, app, store, theme, columns[1]);
    render_footer(f, app, theme, vertical_chunks[1]);

    if app.focus == FocusArea::NameInput {
        render_name_popup(f, app, theme);
    }
}

fn render_sets_pane(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut items = Vec::new();
    items.push(ListItem::new(vec![
        Line::from(Span::styled("Random-All", theme.pseudo_entry)),
        Line::from(Span::styled("any bookmark, any folder", theme.set_folder_count)),
    ]));
    items.push(ListItem::new(Line::from(Span::styled(
        "────────────",
        theme.set_folder_count,
    ))));
    for (name, ids) in &app.sets {
        items.push(ListItem::new(vec![
            Line::from(Span::styled(name.clone(), theme.text)),
            Line::from(Span::styled(
                format!("{} folder{}", ids.len(), if ids.len() == 1 { "" } else { "s" }),
                theme.set_folder_count,
            )),
        ]));
    }
    items.push(ListItem::new(Line::from(Span::styled(
        "Create New",
        theme.pseudo_entry,
    ))));

    // one extra display row for the divider below Random-All
    let display_index = if app.selected_set == ROW_RANDOM_ALL {
        0
    } else {
        app.selected_set + 1
    };
    let mut state = ListState::default();
    state.select(Some(display_index));

    let block = Block::default().title("Sets [1]").borders(Borders::ALL).style(
        if app.focus == FocusArea::Sets {
            theme.focus_border
        } else {
            theme.blurred_border
        },
    );
    let list = List::new(items)
        .highlight_style(theme.selection)
        .highlight_symbol("→");
    f.render_stateful_widget(list.block(block), area, &mut state);
}

fn render_folder_pane(f: &mut Frame, app: &App, store: &BookmarkStore, theme: &Theme, area: Rect) {
    let block_style = if app.focus == FocusArea::Folders {
        theme.focus_border
    } else {
        theme.blurred_border
    };

    let Some(draft) = &app.draft else {
        let placeholder = Paragraph::new(
            "Enter on a set opens a random bookmark from it.\n\
             Enter on Random-All picks across all bookmarks.\n\
             Create New or 'e' opens the folder browser.",
        )
        .block(Block::default().title("Folders [2]").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(theme.set_folder_count);
        f.render_widget(placeholder, area);
        return;
    };

    let current_title = app
        .cursor
        .as_ref()
        .and_then(|c| store.subtree(&c.current))
        .map(|node| node.title().to_string())
        .unwrap_or_default();
    let title = format!("Folders – {} [{} selected]", current_title, draft.ids.len());

    let items: Vec<ListItem> = app
        .folders
        .iter()
        .map(|row| {
            let star = if draft.ids.contains(&row.id) { "*" } else { " " };
            let title_style = if row.end_of_path {
                theme.folder_ghosted
            } else {
                theme.folder_title
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{star} "), theme.toggled_marker),
                Span::styled(row.title.clone(), title_style),
                Span::styled(
                    format!("  {} / {}", row.folder_count, row.bookmark_count),
                    theme.child_count,
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if !app.folders.is_empty() {
        state.select(Some(app.selected_folder.min(app.folders.len() - 1)));
    }
    let list = List::new(items)
        .highlight_style(theme.selection)
        .highlight_symbol("→")
        .block(Block::default().title(title).borders(Borders::ALL).style(block_style));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_footer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let up_enabled = app
        .cursor
        .as_ref()
        .is_some_and(|c| c.parent.is_some());
    let help = match app.focus {
        FocusArea::Sets => Line::from(Span::styled(
            "↑/↓ or j/k Navigate | Enter Open random | e Edit | d Delete | y Copy last URL | q Quit",
            theme.footer,
        )),
        FocusArea::Folders | FocusArea::NameInput => {
            let up_style = if up_enabled { theme.footer } else { theme.folder_ghosted };
            Line::from(vec![
                Span::styled("↑/↓ Navigate | Enter/→ Drill in | ", theme.footer),
                Span::styled("←/u Up", up_style),
                Span::styled(" | Space Toggle folder | s Save | Esc Cancel", theme.footer),
            ])
        }
    };
    let status = Line::from(Span::styled(
        app.status.clone().unwrap_or_default(),
        theme.text_secondary,
    ));
    let footer = Paragraph::new(vec![status, help])
        .block(Block::default().borders(Borders::ALL))
        .style(theme.footer);
    f.render_widget(footer, area);
}

fn render_name_popup(f: &mut Frame, app: &App, theme: &Theme) {
    let Some(draft) = &app.draft else { return };
    let mut candidate = draft.clone();
    candidate.name = app.name_input.clone();
    let problem = validate_draft(&candidate, &app.sets);

    let popup_area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, popup_area);

    let verdict = match problem {
        Some(p) => Line::from(Span::styled(
            format!("cannot save: {}", p.label()),
            theme.invalid_input,
        )),
        None => Line::from(Span::styled("Enter saves the set", theme.text_secondary)),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("Name: ", theme.text_secondary),
            Span::styled(format!("{}_", app.name_input), theme.popup_text),
        ]),
        verdict,
    ];
    let block = Block::default()
        .title("Save set")
        .borders(Borders::ALL)
        .style(theme.popup_border);
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left)
        .style(theme.popup_text);
    f.render_widget(para, popup_area);
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r)[1];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical)[1]
}
