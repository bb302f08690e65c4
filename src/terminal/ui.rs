use std::io;

use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::terminal::view::{ComposeView, DetailView, Header, ListView, Main, Screen};

const COMPOSE_BUTTON: &str = " [+] new ";

/// Something a `Screen` can be drawn onto.
pub trait RenderTarget {
    fn render(&mut self, screen: &Screen) -> io::Result<()>;

    /// Full drawable area, used to map mouse positions back onto the screen.
    fn area(&self) -> io::Result<Rect>;
}

impl<B: Backend> RenderTarget for Terminal<B> {
    fn render(&mut self, screen: &Screen) -> io::Result<()> {
        self.draw(|f| draw(f, screen))?;
        Ok(())
    }

    fn area(&self) -> io::Result<Rect> {
        let size = self.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }
}

struct Regions {
    logo: Rect,
    filter: Rect,
    main: Rect,
    footer: Rect,
}

fn regions(area: Rect) -> Regions {
    let [top, main, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    let [logo, filter] =
        Layout::horizontal([Constraint::Length(14), Constraint::Min(0)]).areas(top);
    Regions {
        logo,
        filter,
        main,
        footer,
    }
}

/// Clickable parts of a drawn screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Logo,
    Compose,
    Back,
    /// Position in the visible (filtered) list.
    Row(usize),
}

/// What sits under (`column`, `row`) when `screen` is drawn into `area`.
pub fn hit_test(area: Rect, screen: &Screen, column: u16, row: u16) -> Option<Hit> {
    let r = regions(area);
    if inside(r.logo, column, row) {
        return Some(Hit::Logo);
    }
    if !inside(r.main, column, row) {
        return None;
    }
    let inner = r.main.inner(Margin::new(1, 1));

    match &screen.main {
        Main::List(view) => {
            let button = COMPOSE_BUTTON.len() as u16;
            if row == r.main.y
                && column + 1 < r.main.right()
                && column + 1 + button >= r.main.right()
            {
                return Some(Hit::Compose);
            }
            if !inside(inner, column, row) {
                return None;
            }
            // a fresh ListState scrolls just enough to keep the highlight visible
            let first = view
                .highlighted
                .map(|h| (h + 1).saturating_sub(inner.height as usize))
                .unwrap_or(0);
            let idx = first + (row - inner.y) as usize;
            (idx < view.rows.len()).then_some(Hit::Row(idx))
        }
        Main::Detail(view) => {
            (view.scroll == 0 && row == inner.y && inside(inner, column, row))
                .then_some(Hit::Back)
        }
        Main::Compose(_) => None,
    }
}

fn inside(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.right() && row >= r.y && row < r.bottom()
}

pub fn draw(f: &mut Frame, screen: &Screen) {
    let r = regions(f.area());

    draw_header(f, r.logo, r.filter, &screen.header);

    match &screen.main {
        Main::List(l) => draw_list(f, r.main, l),
        Main::Detail(d) => draw_detail(f, r.main, d),
        Main::Compose(c) => draw_compose(f, r.main, c),
    }

    f.render_widget(Paragraph::new(hints(screen)), r.footer);
}

fn draw_header(f: &mut Frame, logo: Rect, filter: Rect, header: &Header) {
    let brand = Paragraph::new(Line::from(Span::styled(
        header.brand,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(brand, logo);

    let border = if header.editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let mut text = header.filter_input.clone();
    if header.editing {
        text.push('▏');
    }
    let input = Paragraph::new(text).block(
        Block::default()
            .title(" Filter (/) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, filter);
}

fn draw_list(f: &mut Frame, area: Rect, view: &ListView) {
    let block = Block::default()
        .title(format!(" {} ", view.title))
        .title(Line::from(COMPOSE_BUTTON).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if view.rows.is_empty() {
        let msg = view.notice.clone().unwrap_or_default();
        let p = Paragraph::new(Span::styled(msg, Style::default().fg(Color::Gray)))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|r| {
            let (icon, weight) = if r.read {
                ("○", Style::default().fg(Color::DarkGray))
            } else {
                ("●", Style::default().add_modifier(Modifier::BOLD))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(Color::Cyan)),
                Span::styled(format!("[{}] ", r.avatar), Style::default().fg(Color::Magenta)),
                Span::styled(format!("{:<20} ", r.from), weight),
                Span::styled(r.header.clone(), weight),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));

    let mut list_state = ListState::default().with_selected(view.highlighted);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_detail(f: &mut Frame, area: Rect, view: &DetailView) {
    let block = Block::default()
        .title(format!(" {} ", view.from))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![
        Line::from(Span::styled(
            "< BACK (b)",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(vec![
            Span::styled("From: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{} <{}>", view.from, view.email_address)),
        ]),
        Line::from(vec![
            Span::styled("Avatar: ", Style::default().fg(Color::Gray)),
            Span::raw(view.avatar.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            view.header.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(view.content.lines().map(|l| Line::from(l.to_string())));

    let p = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    f.render_widget(p, area);
}

fn draw_compose(f: &mut Frame, area: Rect, view: &ComposeView) {
    let p = Paragraph::new(Line::from(Span::styled(
        view.heading,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(p, area);
}

fn hints(screen: &Screen) -> Line<'static> {
    let keys: &[(&'static str, &'static str)] = if screen.header.editing {
        &[("Enter", " apply  "), ("Esc", " cancel")]
    } else {
        match screen.main {
            Main::List(_) => &[
                ("j/k", " move  "),
                ("Enter/click", " open  "),
                ("/", " filter  "),
                ("+", " new  "),
                ("q", " quit"),
            ],
            Main::Detail(_) => &[
                ("b", " back  "),
                ("j/k", " scroll  "),
                ("h", " inbox  "),
                ("q", " quit"),
            ],
            Main::Compose(_) => &[("b", " back  "), ("q", " quit")],
        }
    };

    Line::from(
        keys.iter()
            .flat_map(|(k, label)| {
                [
                    Span::styled(*k, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(*label),
                ]
            })
            .collect::<Vec<_>>(),
    )
}
