use crossterm::event::KeyCode;
use rand::seq::SliceRandom;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::avatar::avatar_label;
use super::editor::{EditorAction, Submission, TransactionEditor};
use crate::fmt::{date_short, rupees, rupees_compact};
use crate::models::{Transaction, TxnType, User};
use crate::reports::{self, CategoryShare, MonthTotal, Totals};
use crate::state::AppState;
use crate::tui::{
    chart_color, signed_money_span, wrap_text, AMOUNT_NEG_STYLE, AMOUNT_POS_STYLE, FOOTER_STYLE,
    HEADER_STYLE, STATUS_STYLE,
};

const GREETINGS: &[&str] = &[
    "Let's see where the money went.",
    "Every rupee counts.",
    "Ready to balance the books?",
    "Chai first, then the numbers.",
    "Small savings add up.",
    "Another day, another receipt.",
    "Your wallet says hello.",
    "Good to see you again.",
    "Let's keep that balance green.",
];

const EMPTY_TABLE_TEXT: &str = "No transactions yet. Add your first transaction!";

pub enum DashboardAction {
    Continue,
    Logout,
    Quit,
}

pub struct Dashboard {
    greeting: String,
    selected: usize,
    table_state: TableState,
    editor: Option<TransactionEditor>,
    status_message: Option<String>,
}

impl Dashboard {
    pub fn new(user: Option<&User>) -> Self {
        Self {
            greeting: greeting_for(user),
            selected: 0,
            table_state: TableState::default(),
            editor: None,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, code: KeyCode, state: &mut AppState) -> DashboardAction {
        if let Some(editor) = self.editor.as_mut() {
            match editor.handle_key(code) {
                EditorAction::Continue => {}
                EditorAction::Cancel => self.editor = None,
                EditorAction::Submit(sub) => {
                    self.editor = None;
                    self.apply(sub, state);
                }
            }
            return DashboardAction::Continue;
        }

        self.status_message = None;
        let count = state.store.len();
        match code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = count.saturating_sub(1),
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.editor = Some(TransactionEditor::new());
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(txn) = state.store.list().get(self.selected) {
                    self.editor = Some(TransactionEditor::for_edit(txn));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(state),
            KeyCode::Char('l') => return DashboardAction::Logout,
            KeyCode::Char('q') | KeyCode::Esc => return DashboardAction::Quit,
            _ => {}
        }
        DashboardAction::Continue
    }

    fn apply(&mut self, sub: Submission, state: &mut AppState) {
        match sub.editing {
            Some(id) => {
                state.store.update(&id, sub.input);
                self.status_message = Some("Transaction updated successfully!".to_string());
            }
            None => {
                state.store.add(sub.input);
                self.selected = 0;
                self.status_message = Some("Transaction added successfully!".to_string());
            }
        }
    }

    fn delete_selected(&mut self, state: &mut AppState) {
        let id = state.store.list().get(self.selected).map(|t| t.id.clone());
        if let Some(id) = id {
            state.store.remove(&id);
            self.selected = self.selected.min(state.store.len().saturating_sub(1));
            self.status_message = Some("Transaction deleted successfully!".to_string());
        }
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    pub fn draw(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        // Derived views are rebuilt from the current snapshot on every frame.
        let txns = state.store.list();
        let totals = reports::totals(&txns);
        let shares = reports::category_shares(&txns);
        let months = reports::by_month(&txns);

        let [header_area, sep1, cards_area, sep2, charts_area, sep3, table_title_area, table_area, hints_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        self.draw_header(frame, header_area, state.session.user());

        let sep_line = "━".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(border_style);
        frame.render_widget(sep_widget.clone(), sep1);
        frame.render_widget(sep_widget.clone(), sep2);
        frame.render_widget(sep_widget, sep3);

        draw_cards(frame, cards_area, &totals);

        let [chart_left, chart_right] = Layout::horizontal([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .areas(charts_area);
        draw_category_breakdown(frame, chart_left, &shares);
        draw_monthly_chart(frame, chart_right, &months);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" Transactions ({})", txns.len()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("   a=Add Transaction", FOOTER_STYLE),
            ])),
            table_title_area,
        );
        self.draw_table(frame, table_area, &txns);

        if let Some(msg) = &self.status_message {
            frame.render_widget(
                Paragraph::new(format!(" {msg}")).style(STATUS_STYLE),
                hints_area,
            );
        } else {
            frame.render_widget(
                Paragraph::new(
                    " \u{2191}/\u{2193}=select  a=add  e=edit  d=delete  l=logout  q=quit",
                )
                .style(FOOTER_STYLE),
                hints_area,
            );
        }

        if let Some(editor) = &self.editor {
            editor.draw(frame, area);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, user: Option<&User>) {
        let [top, bottom] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let (badge, name, email, avatar) = match user {
            Some(u) => (
                u.initial(),
                u.name.as_str(),
                u.email.as_str(),
                u.avatar.as_deref().map(avatar_label),
            ),
            None => (String::new(), "", "", None),
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" [{badge}] "),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(name.to_string(), HEADER_STYLE),
                Span::raw("  "),
                Span::styled(self.greeting.clone(), FOOTER_STYLE),
            ])),
            top,
        );

        let mut details = vec![Span::styled(format!("      {email}"), FOOTER_STYLE)];
        if let Some(label) = avatar {
            details.push(Span::styled(format!("   avatar: {label}"), FOOTER_STYLE));
        }
        frame.render_widget(Paragraph::new(Line::from(details)), bottom);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect, txns: &[Transaction]) {
        if txns.is_empty() {
            let [_, msg_area, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);
            frame.render_widget(
                Paragraph::new(EMPTY_TABLE_TEXT)
                    .style(FOOTER_STYLE)
                    .alignment(Alignment::Center),
                msg_area,
            );
            return;
        }

        let fixed_cols: u16 = 13 + 16 + 25 + 8;
        let spacing: u16 = 4;
        let title_width = (area.width.saturating_sub(fixed_cols + spacing) as usize).max(10);

        let rows: Vec<Row> = txns
            .iter()
            .map(|t| {
                let (title, lines) = wrap_text(&t.title, title_width);
                let type_style = match t.txn_type {
                    TxnType::Income => AMOUNT_POS_STYLE,
                    TxnType::Expense => AMOUNT_NEG_STYLE,
                };
                Row::new(vec![
                    Cell::from(date_short(t.date)),
                    Cell::from(title),
                    Cell::from(signed_money_span(t.signed_amount())),
                    Cell::from(t.category.label()),
                    Cell::from(Span::styled(t.txn_type.label(), type_style)),
                ])
                .height(lines)
            })
            .collect();

        let widths = [
            Constraint::Length(13),
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Length(25),
            Constraint::Length(8),
        ];

        self.selected = self.selected.min(txns.len() - 1);
        self.table_state.select(Some(self.selected));
        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["Date", "Title", "Amount", "Category", "Type"])
                    .style(HEADER_STYLE)
                    .bottom_margin(1),
            )
            .column_spacing(1)
            .row_highlight_style(crate::tui::SELECTED_STYLE);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

fn greeting_for(user: Option<&User>) -> String {
    let mut rng = rand::thread_rng();
    let line = GREETINGS.choose(&mut rng).unwrap_or(&"Hello.");
    let first_name = user
        .and_then(|u| u.name.split_whitespace().next())
        .unwrap_or("");
    if first_name.is_empty() {
        line.to_string()
    } else {
        format!("Hello, {first_name}. {line}")
    }
}

fn draw_cards(frame: &mut Frame, area: Rect, totals: &Totals) {
    let [balance_area, income_area, expense_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(area);

    let balance = totals.balance();
    let balance_style = if balance < 0.0 {
        AMOUNT_NEG_STYLE
    } else {
        Style::default()
    };
    let cards = [
        ("Balance Left", rupees(balance), balance_style, balance_area),
        ("Total Income", rupees(totals.total_income), AMOUNT_POS_STYLE, income_area),
        ("Total Expenses", rupees(totals.total_expense), AMOUNT_NEG_STYLE, expense_area),
    ];
    for (title, value, style, card_area) in cards {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(format!(" {title}"), FOOTER_STYLE)),
                Line::from(Span::styled(
                    format!(" {value}"),
                    style.add_modifier(Modifier::BOLD),
                )),
            ]),
            card_area,
        );
    }
}

/// Category breakdown as labelled horizontal bars, one colour per slice.
fn draw_category_breakdown(frame: &mut Frame, area: Rect, shares: &[CategoryShare]) {
    let mut lines = vec![Line::from(Span::styled(
        " Expenses by Category",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if shares.is_empty() {
        lines.push(Line::from(Span::styled(" No expenses yet.", FOOTER_STYLE)));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let name_width = shares
        .iter()
        .map(|s| s.category.label().len())
        .max()
        .unwrap_or(10);
    let value_width = shares
        .iter()
        .map(|s| rupees(s.value).chars().count())
        .max()
        .unwrap_or(8);
    // marker + name + pct + value + gaps
    let bar_space = (area.width as usize).saturating_sub(3 + name_width + 6 + value_width + 4);

    for (i, share) in shares.iter().enumerate() {
        let color = chart_color(i);
        let bar_len = ((share.pct / 100.0) * bar_space as f64).round() as usize;
        lines.push(Line::from(vec![
            Span::styled(" \u{25a0} ", Style::default().fg(color)),
            Span::raw(format!(
                "{:<width$} ",
                share.category.label(),
                width = name_width
            )),
            Span::styled(
                format!("{:<width$}", "\u{2588}".repeat(bar_len), width = bar_space),
                Style::default().fg(color),
            ),
            Span::raw(format!(" {:>3.0}% ", share.pct)),
            Span::styled(
                format!("{:>width$}", rupees(share.value), width = value_width),
                FOOTER_STYLE,
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Grouped income/expense bars per month with a small y-axis.
fn draw_monthly_chart(frame: &mut Frame, area: Rect, months: &[MonthTotal]) {
    let income_style = AMOUNT_POS_STYLE;
    let expense_style = AMOUNT_NEG_STYLE;

    let title = Line::from(vec![
        Span::styled(
            "Monthly Income vs Expenses  ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("\u{25a0} Income ", income_style),
        Span::styled("\u{25a0} Expense", expense_style),
    ]);

    if months.is_empty() {
        frame.render_widget(
            Paragraph::new(vec![title, Line::from(Span::styled("No data yet.", FOOTER_STYLE))]),
            area,
        );
        return;
    }

    let max_val = months
        .iter()
        .flat_map(|m| [m.income, m.expense])
        .fold(0.0_f64, f64::max);
    let (top_tick, mid_tick) = y_axis_ticks(max_val);
    let top_label = rupees_compact(top_tick);
    let mid_label = rupees_compact(mid_tick);
    let y_label_width =
        top_label.chars().count().max(mid_label.chars().count()) as u16 + 1;

    let [y_axis_area, bar_area] = Layout::horizontal([
        Constraint::Length(y_label_width),
        Constraint::Fill(1),
    ])
    .areas(area);

    // Y-axis labels: top tick near top, mid tick at middle
    let inner_height = bar_area.height.saturating_sub(2); // title + month labels
    let mid_row = inner_height / 2;
    let mut y_lines: Vec<Line> = vec![Line::from("")];
    for row in 0..inner_height {
        let label = if row == 0 {
            Some(&top_label)
        } else if row == mid_row {
            Some(&mid_label)
        } else {
            None
        };
        y_lines.push(match label {
            Some(l) => Line::from(Span::styled(
                format!("{:>width$}", l, width = y_label_width as usize),
                FOOTER_STYLE,
            )),
            None => Line::from(""),
        });
    }
    frame.render_widget(Paragraph::new(y_lines), y_axis_area);

    let mut chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::NONE))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .max(top_tick.round() as u64);
    for m in months {
        let bars = [
            Bar::default()
                .value(m.income.round() as u64)
                .text_value(rupees_compact(m.income))
                .style(income_style),
            Bar::default()
                .value(m.expense.round() as u64)
                .text_value(rupees_compact(m.expense))
                .style(expense_style),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(m.month.clone()))
                .bars(&bars),
        );
    }
    frame.render_widget(chart, bar_area);
}

/// Pick round y-axis tick values (top and mid) given a max data value.
fn y_axis_ticks(max_val: f64) -> (f64, f64) {
    let steps = [
        100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 25000.0, 50000.0, 100000.0,
        250000.0, 500000.0, 1000000.0, 2500000.0, 5000000.0, 10000000.0,
    ];
    let top = steps
        .iter()
        .copied()
        .find(|&s| s >= max_val)
        .unwrap_or(max_val);
    (top, top / 2.0)
}
