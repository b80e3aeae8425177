use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally_api::ApiClient;
use tally_core::{
    categories_for, AnalyticsStore, Category, Gateway, PeriodFilter, Tracker, TransactionDraft,
    TransactionFilter, TransactionType,
};

mod auth;
mod config;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Personal finance tracking client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config file to ~/.tally/config.toml
    Init,

    /// Log in and store the session credential
    Login {
        email: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        username: String,
        email: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
        /// Optional profile image to upload
        #[arg(long)]
        profile_image: Option<PathBuf>,
    },

    /// Clear the stored session
    Logout,

    /// Show the stored user profile
    Whoami,

    /// List categories
    Categories {
        /// Only income or expense categories
        #[arg(long = "type")]
        kind: Option<TransactionType>,
    },

    /// Transaction operations
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },

    /// Aggregated analytics for a period
    Analytics {
        /// Calendar year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12; omit for the whole year
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum TxCommand {
    /// List transactions, optionally filtered
    List {
        #[arg(long = "type")]
        kind: Option<TransactionType>,
        /// Category name or id
        #[arg(long)]
        category: Option<String>,
        /// Range start (YYYY-MM-DD); only sent together with --to
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Range end (YYYY-MM-DD); only sent together with --from
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Record a new transaction
    Add {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "type")]
        kind: TransactionType,
        /// Category name or id; must match the transaction type
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: f64,
    },

    /// Replace a transaction's fields
    Edit {
        id: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "type")]
        kind: TransactionType,
        /// Category name or id; must match the transaction type
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: f64,
    },

    /// Delete a transaction
    Rm { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            config::init_config()?;
        }

        Command::Login { email, password } => {
            let client = build_client()?;
            auth::login(&client, &email, password).await?;
        }

        Command::Register {
            username,
            email,
            password,
            profile_image,
        } => {
            let client = build_client()?;
            auth::register(&client, username, email, password, profile_image).await?;
        }

        Command::Logout => {
            auth::logout()?;
        }

        Command::Whoami => {
            auth::whoami()?;
        }

        Command::Categories { kind } => {
            let client = build_client()?;
            let categories = client.list_categories(kind).await?;
            render::print_categories(&categories);
        }

        Command::Tx { command } => {
            run_tx(command).await?;
        }

        Command::Analytics { year, month } => {
            let client = build_client()?;
            let mut period = PeriodFilter::default();
            if let Some(year) = year {
                period = period.with_year(year);
            }
            period = period.with_month(month);

            let mut analytics = AnalyticsStore::new();
            analytics.set_filter(period.clone());
            let summary = analytics.fetch(&client, None).await?;
            render::print_analytics(summary, &period);
        }
    }

    Ok(())
}

async fn run_tx(command: TxCommand) -> Result<()> {
    let client = build_client()?;
    let mut tracker = Tracker::new();
    tracker.bootstrap(&client).await?;

    match command {
        TxCommand::List {
            kind,
            category,
            from,
            to,
        } => {
            let category = category.map(|c| resolve_any_category(tracker.categories(), &c));
            let filter = TransactionFilter::default()
                .with_kind(kind)
                .with_category(category)
                .with_range(from, to);
            // Unchanged (empty) filters are a no-op; bootstrap already
            // fetched the unfiltered list.
            tracker.set_filter(&client, filter).await?;
            render::print_transactions(tracker.transactions.items(), tracker.categories());
        }

        TxCommand::Add {
            date,
            kind,
            category,
            description,
            amount,
        } => {
            let category = resolve_typed_category(tracker.categories(), kind, &category)?;
            let draft = TransactionDraft {
                date,
                kind,
                description,
                category,
                amount,
            };
            draft.validate()?;
            tracker.add(&client, &draft).await?;
            println!("Transaction created successfully\n");
            print_refreshed(&tracker);
        }

        TxCommand::Edit {
            id,
            date,
            kind,
            category,
            description,
            amount,
        } => {
            let category = resolve_typed_category(tracker.categories(), kind, &category)?;
            let draft = TransactionDraft {
                date,
                kind,
                description,
                category,
                amount,
            };
            draft.validate()?;
            tracker.edit(&client, &id, &draft).await?;
            println!("Transaction updated successfully\n");
            print_refreshed(&tracker);
        }

        TxCommand::Rm { id } => {
            tracker.remove(&client, &id).await?;
            println!("Transaction deleted successfully\n");
            print_refreshed(&tracker);
        }
    }

    Ok(())
}

/// After a mutation the tracker has refetched both stores; show what the
/// server now reports.
fn print_refreshed(tracker: &Tracker) {
    render::print_transactions(tracker.transactions.items(), tracker.categories());
    if let Some(summary) = tracker.analytics.summary() {
        println!();
        render::print_analytics(summary, tracker.analytics.filter());
    }
}

/// Resolve a category argument for a typed transaction: the chosen category
/// must belong to the transaction's type.
fn resolve_typed_category(
    categories: &[Category],
    kind: TransactionType,
    wanted: &str,
) -> Result<String> {
    let valid = categories_for(categories, kind);
    if let Some(c) = valid
        .iter()
        .find(|c| c.id == wanted || c.name.eq_ignore_ascii_case(wanted))
    {
        return Ok(c.id.clone());
    }
    let names: Vec<&str> = valid.iter().map(|c| c.name.as_str()).collect();
    bail!(
        "'{}' is not a valid {} category (choose from: {})",
        wanted,
        kind,
        names.join(", ")
    )
}

/// Resolve a list-filter category by name when possible; otherwise pass the
/// value through as an id for the server to interpret.
fn resolve_any_category(categories: &[Category], wanted: &str) -> String {
    categories
        .iter()
        .find(|c| c.id == wanted || c.name.eq_ignore_ascii_case(wanted))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| wanted.to_string())
}

fn build_client() -> Result<ApiClient> {
    let cfg = config::load_config()?;
    let stored = session::load_session()?;
    tracing::debug!(
        base_url = %cfg.api.base_url,
        authenticated = stored.token.is_some(),
        "api client ready"
    );
    Ok(ApiClient::new(cfg.api.base_url, stored.token))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}
