use chrono::{Local, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::error::{FinboardError, Result};
use crate::fmt::{date_long, plain_amount};
use crate::models::{Category, Transaction, TransactionInput, TxnType};
use crate::tui::{draw_button, draw_field, draw_row, TextField, ERROR_STYLE, FOOTER_STYLE};

const FIELD_TITLE: usize = 0;
const FIELD_AMOUNT: usize = 1;
const FIELD_CATEGORY: usize = 2;
const FIELD_TYPE: usize = 3;
const FIELD_DATE: usize = 4;
const FIELD_BUTTON: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub enum EditorAction {
    Continue,
    Cancel,
    Submit(Submission),
}

/// A validated form: `editing` is the id being changed, `None` for a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub editing: Option<String>,
    pub input: TransactionInput,
}

/// Parse a typed amount. Accepts an optional ₹ sign and thousands commas;
/// the result must be a positive finite number.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(FinboardError::InvalidAmount(raw.trim().to_string())),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| FinboardError::InvalidDate(raw.trim().to_string()))
}

/// The add/edit transaction dialog.
pub struct TransactionEditor {
    editing: Option<String>,
    title: TextField,
    amount: TextField,
    category: Category,
    txn_type: TxnType,
    date: TextField,
    active_field: usize,
    error: Option<String>,
}

impl TransactionEditor {
    /// Blank draft: first category, expense, today.
    pub fn new() -> Self {
        Self {
            editing: None,
            title: TextField::new(),
            amount: TextField::new(),
            category: Category::default(),
            txn_type: TxnType::default(),
            date: TextField::with_value(&Local::now().date_naive().format(DATE_FORMAT).to_string()),
            active_field: FIELD_TITLE,
            error: None,
        }
    }

    /// Draft pre-filled from an existing record.
    pub fn for_edit(txn: &Transaction) -> Self {
        Self {
            editing: Some(txn.id.clone()),
            title: TextField::with_value(&txn.title),
            amount: TextField::with_value(&plain_amount(txn.amount)),
            category: txn.category,
            txn_type: txn.txn_type,
            date: TextField::with_value(&txn.date.format(DATE_FORMAT).to_string()),
            active_field: FIELD_TITLE,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Submit stays disabled until both title and amount hold something.
    pub fn can_submit(&self) -> bool {
        !self.title.is_blank() && !self.amount.is_blank()
    }

    fn validate(&self) -> Result<TransactionInput> {
        let amount = parse_amount(self.amount.value())?;
        let date = parse_date(self.date.value())?;
        Ok(TransactionInput {
            title: self.title.value().trim().to_string(),
            amount,
            category: self.category,
            txn_type: self.txn_type,
            date: Some(date),
        })
    }

    fn try_submit(&mut self) -> EditorAction {
        if !self.can_submit() {
            self.error = Some("Title and amount are required.".to_string());
            return EditorAction::Continue;
        }
        match self.validate() {
            Ok(input) => EditorAction::Submit(Submission {
                editing: self.editing.clone(),
                input,
            }),
            Err(e) => {
                self.error = Some(e.to_string());
                EditorAction::Continue
            }
        }
    }

    fn active_text_mut(&mut self) -> Option<&mut TextField> {
        match self.active_field {
            FIELD_TITLE => Some(&mut self.title),
            FIELD_AMOUNT => Some(&mut self.amount),
            FIELD_DATE => Some(&mut self.date),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> EditorAction {
        match code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.active_field = (self.active_field + 1).min(FIELD_BUTTON);
                return EditorAction::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active_field = self.active_field.saturating_sub(1);
                return EditorAction::Continue;
            }
            KeyCode::Enter => {
                if self.active_field == FIELD_BUTTON {
                    return self.try_submit();
                }
                self.active_field += 1;
                return EditorAction::Continue;
            }
            _ => {}
        }

        self.error = None;
        match self.active_field {
            FIELD_CATEGORY => match code {
                KeyCode::Right | KeyCode::Char(' ') => self.category = self.category.next(),
                KeyCode::Left => self.category = self.category.prev(),
                _ => {}
            },
            FIELD_TYPE => match code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    self.txn_type = self.txn_type.toggle()
                }
                KeyCode::Char('i') => self.txn_type = TxnType::Income,
                KeyCode::Char('e') => self.txn_type = TxnType::Expense,
                _ => {}
            },
            FIELD_BUTTON => {}
            _ => {
                if let Some(field) = self.active_text_mut() {
                    field.handle_key(code);
                }
            }
        }
        EditorAction::Continue
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let width = 60u16.min(area.width.saturating_sub(2));
        let height = 13u16.min(area.height);
        let dialog = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let title = if self.is_editing() {
            " Edit Transaction "
        } else {
            " Add Transaction "
        };
        let block = Block::default()
            .title(title)
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .borders(Borders::ALL);
        let inner = block.inner(dialog);
        frame.render_widget(Clear, dialog);
        frame.render_widget(block, dialog);

        let [title_row, amount_row, cat_row, type_row, date_row, _gap, button_row, error_row, hints_row] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        draw_field(frame, title_row, "Title", &self.title, self.active_field == FIELD_TITLE);
        draw_field(frame, amount_row, "Amount (₹)", &self.amount, self.active_field == FIELD_AMOUNT);
        draw_row(
            frame,
            cat_row,
            "Category",
            &format!("\u{25c2} {} \u{25b8}", self.category),
            self.active_field == FIELD_CATEGORY,
        );
        let type_label = match self.txn_type {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
        };
        draw_row(
            frame,
            type_row,
            "Type",
            &format!("\u{25c2} {type_label} \u{25b8}"),
            self.active_field == FIELD_TYPE,
        );
        let date_hint = match parse_date(self.date.value()) {
            Ok(d) if self.active_field != FIELD_DATE => date_long(d),
            _ => self.date.display(self.active_field == FIELD_DATE),
        };
        draw_row(frame, date_row, "Date", &date_hint, self.active_field == FIELD_DATE);

        let button = if self.is_editing() {
            "Update Transaction"
        } else {
            "Add Transaction"
        };
        draw_button(
            frame,
            button_row,
            button,
            self.active_field == FIELD_BUTTON,
            self.can_submit(),
        );

        if let Some(msg) = &self.error {
            frame.render_widget(Paragraph::new(Span::styled(msg.as_str(), ERROR_STYLE)), error_row);
        }

        frame.render_widget(
            Paragraph::new("Tab/\u{2191}\u{2193}=field  \u{2190}\u{2192}=change  Enter=next/submit  Esc=cancel")
                .style(FOOTER_STYLE),
            hints_row,
        );
    }
}

impl Default for TransactionEditor {
    fn default() -> Self {
        Self::new()
    }
}
