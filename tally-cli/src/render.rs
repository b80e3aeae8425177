//! Plain-text rendering of the transaction list and the analytics summary.

use chrono::{Datelike, NaiveDate};

use tally_core::{breakdown, AnalyticsSummary, Category, PeriodFilter, Transaction};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

pub fn period_label(period: &PeriodFilter) -> String {
    match period.month {
        Some(month) => format!("{} {}", month_name(month), period.year),
        None => period.year.to_string(),
    }
}

fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

pub fn print_transactions(transactions: &[Transaction], categories: &[Category]) {
    if transactions.is_empty() {
        println!("No transactions found. Add your first transaction!");
        return;
    }

    println!("Transactions ({})\n", transactions.len());
    println!(
        "{:>4}  {:<10}  {:<7}  {:<32}  {:<18}  {:>12}",
        "#", "Date", "Type", "Description", "Category", "Amount"
    );
    for (i, t) in transactions.iter().enumerate() {
        println!(
            "{:>4}  {:<10}  {:<7}  {:<32}  {:<18}  {:>12}",
            i + 1,
            format_date(t.date),
            t.kind.to_string(),
            t.description,
            t.category_name(categories),
            format!("₹{:.2}", t.amount),
        );
    }
}

pub fn print_analytics(summary: &AnalyticsSummary, period: &PeriodFilter) {
    let label = period_label(period);
    let total_income = summary.income;
    let total_expenses = summary.total_expenses();
    let net_savings = summary.net_savings();
    let savings_rate = summary.savings_rate();

    println!("Summary - {label}\n");
    println!("  Total Income:   ₹{total_income:.2}");
    println!("  Total Expenses: ₹{total_expenses:.2}");
    println!(
        "  Net Savings:    ₹{net_savings:.2} ({})",
        if net_savings >= 0.0 { "Surplus" } else { "Deficit" }
    );
    println!(
        "  Savings Rate:   {savings_rate}% ({})",
        match savings_rate {
            r if r >= 20 => "Excellent!",
            r if r >= 10 => "Good rate",
            _ => "Needs improvement",
        }
    );

    println!("\nExpense Distribution - {label}\n");
    for entry in breakdown::collapse(&summary.expenses) {
        println!(
            "  {:<16} {:>5.1}%  ₹{:.2}",
            entry.name, entry.value, entry.amount
        );
    }
    println!("\n  Total Expenses: ₹{total_expenses:.2}");
}

pub fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories available.");
        return;
    }
    for c in categories {
        println!("{:<18} {:<7}  {}", c.name, c.kind.to_string(), c.id);
    }
}
