use crate::models::{Category, Transaction, TxnType};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
}

impl Totals {
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

pub fn totals(txns: &[Transaction]) -> Totals {
    let mut out = Totals::default();
    for t in txns {
        match t.txn_type {
            TxnType::Income => out.total_income += t.amount,
            TxnType::Expense => out.total_expense += t.amount,
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Expenses by category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub value: f64,
}

/// Expense sums per category in `Category::ALL` order. Categories with
/// nothing spent are left out.
pub fn by_category(txns: &[Transaction]) -> Vec<CategoryTotal> {
    Category::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            value: txns
                .iter()
                .filter(|t| t.category == category && t.txn_type == TxnType::Expense)
                .map(|t| t.amount)
                .sum(),
        })
        .filter(|c| c.value > 0.0)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub value: f64,
    pub pct: f64,
}

/// `by_category` rows with each row's percentage of total expense.
pub fn category_shares(txns: &[Transaction]) -> Vec<CategoryShare> {
    let rows = by_category(txns);
    let total: f64 = rows.iter().map(|r| r.value).sum();
    rows.into_iter()
        .map(|r| CategoryShare {
            category: r.category,
            value: r.value,
            pct: if total > 0.0 { r.value / total * 100.0 } else { 0.0 },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Income vs expense by month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    /// Short month name, e.g. "Jan". Different years share a label.
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// One row per month label, ordered by first appearance while scanning
/// `txns` in the order given (store order, newest first), not by calendar.
pub fn by_month(txns: &[Transaction]) -> Vec<MonthTotal> {
    let mut months: Vec<MonthTotal> = Vec::new();
    for t in txns {
        let label = t.date.format("%b").to_string();
        let idx = match months.iter().position(|m| m.month == label) {
            Some(i) => i,
            None => {
                months.push(MonthTotal {
                    month: label,
                    income: 0.0,
                    expense: 0.0,
                });
                months.len() - 1
            }
        };
        match t.txn_type {
            TxnType::Income => months[idx].income += t.amount,
            TxnType::Expense => months[idx].expense += t.amount,
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(title: &str, amount: f64, category: Category, txn_type: TxnType, y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            id: title.to_lowercase(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            title: title.to_string(),
            amount,
            category,
            txn_type,
        }
    }

    /// Newest first, as the store would hand them out.
    fn coffee_and_paycheck() -> Vec<Transaction> {
        vec![
            txn("Paycheck", 1000.0, Category::SalaryAndWages, TxnType::Income, 2025, 1, 10),
            txn("Coffee", 4.50, Category::FoodAndDrinks, TxnType::Expense, 2025, 1, 5),
        ]
    }

    #[test]
    fn test_empty_input_yields_zeros() {
        let t = totals(&[]);
        assert_eq!(t.total_income, 0.0);
        assert_eq!(t.total_expense, 0.0);
        assert_eq!(t.balance(), 0.0);
        assert!(by_category(&[]).is_empty());
        assert!(by_month(&[]).is_empty());
        assert!(category_shares(&[]).is_empty());
    }

    #[test]
    fn test_coffee_and_paycheck_scenario() {
        let txns = coffee_and_paycheck();

        let t = totals(&txns);
        assert_eq!(t.total_income, 1000.0);
        assert_eq!(t.total_expense, 4.50);
        assert_eq!(t.balance(), 995.50);

        assert_eq!(
            by_category(&txns),
            vec![CategoryTotal {
                category: Category::FoodAndDrinks,
                value: 4.50
            }]
        );

        assert_eq!(
            by_month(&txns),
            vec![MonthTotal {
                month: "Jan".into(),
                income: 1000.0,
                expense: 4.50
            }]
        );
    }

    #[test]
    fn test_by_category_follows_enumeration_order_and_skips_income() {
        let txns = vec![
            txn("Rent", 500.0, Category::Housing, TxnType::Expense, 2025, 2, 1),
            txn("Lunch", 12.0, Category::FoodAndDrinks, TxnType::Expense, 2025, 2, 2),
            txn("Dinner", 8.0, Category::FoodAndDrinks, TxnType::Expense, 2025, 2, 3),
            txn("Salary", 3000.0, Category::SalaryAndWages, TxnType::Income, 2025, 2, 4),
            txn("Refund", 20.0, Category::Shopping, TxnType::Income, 2025, 2, 5),
        ];
        let rows = by_category(&txns);
        let cats: Vec<Category> = rows.iter().map(|r| r.category).collect();
        assert_eq!(cats, vec![Category::FoodAndDrinks, Category::Housing]);
        assert_eq!(rows[0].value, 20.0);
        assert!(rows.iter().all(|r| r.value != 0.0));
    }

    #[test]
    fn test_by_month_uses_first_seen_order() {
        // Store order: a March record was added after a January one.
        let txns = vec![
            txn("Mar", 10.0, Category::Other, TxnType::Expense, 2025, 3, 1),
            txn("Jan", 20.0, Category::Other, TxnType::Income, 2025, 1, 1),
            txn("Mar2", 5.0, Category::Other, TxnType::Income, 2025, 3, 15),
            txn("Feb", 1.0, Category::Other, TxnType::Expense, 2025, 2, 1),
        ];
        let months = by_month(&txns);
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["Mar", "Jan", "Feb"]);
        assert_eq!(months[0].income, 5.0);
        assert_eq!(months[0].expense, 10.0);
        assert_eq!(months[1].income, 20.0);
    }

    #[test]
    fn test_by_month_merges_same_month_across_years() {
        let txns = vec![
            txn("a", 1.0, Category::Other, TxnType::Expense, 2025, 1, 1),
            txn("b", 2.0, Category::Other, TxnType::Expense, 2024, 1, 1),
        ];
        let months = by_month(&txns);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].expense, 3.0);
    }

    #[test]
    fn test_category_shares_sum_to_hundred() {
        let txns = vec![
            txn("a", 25.0, Category::Shopping, TxnType::Expense, 2025, 1, 1),
            txn("b", 75.0, Category::Transportation, TxnType::Expense, 2025, 1, 2),
        ];
        let shares = category_shares(&txns);
        assert_eq!(shares[0].pct, 25.0);
        assert_eq!(shares[1].pct, 75.0);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let txns = vec![
            txn("a", 10.0, Category::Other, TxnType::Income, 2025, 1, 1),
            txn("b", 40.0, Category::Other, TxnType::Expense, 2025, 1, 2),
        ];
        assert_eq!(totals(&txns).balance(), -30.0);
    }
}
