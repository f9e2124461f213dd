use chrono::{Datelike, Local, Months, NaiveDate};

use super::app::{run, App};
use crate::error::Result;
use crate::models::{Category, TransactionInput, TxnType};
use crate::settings::Settings;
use crate::state::AppState;

const DEMO_EMAIL: &str = "demo@finboard.app";
const DEMO_NAME: &str = "Demo User";
const DEMO_MONTHS: u32 = 6;

struct DemoTxn {
    day: u32,
    title: &'static str,
    amount: f64,
    category: Category,
    txn_type: TxnType,
}

const fn expense(day: u32, title: &'static str, amount: f64, category: Category) -> DemoTxn {
    DemoTxn {
        day,
        title,
        amount,
        category,
        txn_type: TxnType::Expense,
    }
}

/// Booked every month.
const RECURRING: &[DemoTxn] = &[
    DemoTxn {
        day: 1,
        title: "Salary",
        amount: 85000.0,
        category: Category::SalaryAndWages,
        txn_type: TxnType::Income,
    },
    expense(3, "Rent", 22000.0, Category::Housing),
    expense(5, "Car loan EMI", 9500.0, Category::DebtRepayments),
    expense(7, "SIP - Index fund", 10000.0, Category::StockMarketInvestments),
    expense(10, "Electricity bill", 1850.0, Category::Housing),
    expense(15, "Metro card recharge", 1200.0, Category::Transportation),
];

/// Extras; each month takes three of these, rotating through the pool.
const ROTATING: &[DemoTxn] = &[
    expense(8, "Groceries - BigBasket", 4320.5, Category::FoodAndDrinks),
    expense(12, "Dinner at Toit", 2780.0, Category::FoodAndDrinks),
    expense(14, "Movie tickets", 960.0, Category::Entertainment),
    expense(18, "New running shoes", 5499.0, Category::Shopping),
    expense(20, "Pharmacy", 745.25, Category::Healthcare),
    expense(22, "Cab to airport", 1150.0, Category::Transportation),
    expense(24, "Swiggy order", 612.0, Category::FoodAndDrinks),
    expense(26, "OTT subscription", 649.0, Category::Entertainment),
    expense(27, "Gift for Amma", 3200.0, Category::Other),
];

/// Clamp a day to the last valid day of the given year/month.
fn clamp_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

/// Sample transactions for the last `DEMO_MONTHS` months, oldest first.
fn generate_transactions(today: NaiveDate) -> Vec<TransactionInput> {
    let mut txns = Vec::new();

    for i in 0..DEMO_MONTHS {
        let months_ago = DEMO_MONTHS - 1 - i;
        let Some(target) = today.checked_sub_months(Months::new(months_ago)) else {
            continue;
        };
        let idx = i as usize;

        let mut month: Vec<&DemoTxn> = RECURRING.iter().collect();
        for j in 0..3usize {
            month.push(&ROTATING[(idx * 3 + j) % ROTATING.len()]);
        }
        month.sort_by_key(|t| t.day);

        for t in month {
            let Some(date) = clamp_day(target.year(), target.month(), t.day) else {
                continue;
            };
            // Nothing dated after today in the current month
            if date > today {
                continue;
            }
            // Small deterministic variation on the food bills
            let amount = if t.category == Category::FoodAndDrinks {
                let vary = 1.0 + ((idx % 5) as f64 - 2.0) * 0.04;
                (t.amount * vary * 100.0).round() / 100.0
            } else {
                t.amount
            };
            txns.push(TransactionInput {
                title: t.title.to_string(),
                amount,
                category: t.category,
                txn_type: t.txn_type,
                date: Some(date),
            });
        }
    }

    txns
}

/// A signed-in demo user with a few months of history.
pub fn demo_state(avatar: Option<&str>) -> AppState {
    let mut state = AppState::new();
    state.session.register(DEMO_EMAIL, "", DEMO_NAME);
    if let Some(avatar) = avatar {
        state.session.set_avatar(avatar);
    }
    // Added oldest first so the newest ends up on top.
    for input in generate_transactions(Local::now().date_naive()) {
        state.store.add(input);
    }
    tracing::info!(count = state.store.len(), "demo data loaded");
    state
}

pub fn run_demo(settings: &Settings) -> Result<()> {
    let avatars = settings.avatar_options();
    let state = demo_state(avatars.first().map(String::as_str));
    run(App::new(state, avatars))
}
