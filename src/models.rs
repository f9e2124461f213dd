use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::FinboardError;

/// The fixed set of transaction categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDrinks,
    Shopping,
    Housing,
    Transportation,
    Entertainment,
    Healthcare,
    SalaryAndWages,
    DebtRepayments,
    StockMarketInvestments,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::FoodAndDrinks,
        Category::Shopping,
        Category::Housing,
        Category::Transportation,
        Category::Entertainment,
        Category::Healthcare,
        Category::SalaryAndWages,
        Category::DebtRepayments,
        Category::StockMarketInvestments,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::FoodAndDrinks => "Food & Drinks",
            Category::Shopping => "Shopping",
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::SalaryAndWages => "Salary & Wages",
            Category::DebtRepayments => "Debt Repayments",
            Category::StockMarketInvestments => "Stock Market Investments",
            Category::Other => "Other",
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next category in display order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FinboardError::UnknownCategory(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TxnType {
    Income,
    #[default]
    Expense,
}

impl TxnType {
    pub fn label(self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            TxnType::Income => TxnType::Expense,
            TxnType::Expense => TxnType::Income,
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TxnType {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            other => Err(FinboardError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub txn_type: TxnType,
}

impl Transaction {
    /// Amount with the sign implied by the type: negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.txn_type {
            TxnType::Income => self.amount,
            TxnType::Expense => -self.amount,
        }
    }
}

/// Field set accepted by add and update. `date: None` means today.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub txn_type: TxnType,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl User {
    /// First character of the name, used where no avatar image can be shown.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}
