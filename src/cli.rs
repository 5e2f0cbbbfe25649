//! Command-line front end over the tracker.

use std::{env, fs, process, sync::Arc};

use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::errors::{Result, TrackerError};
use crate::export;
use crate::ledger::category::{Category, CategoryDraft, CategoryIcon, CategoryKind, COLOR_PALETTE};
use crate::ledger::date::{format_day_month_year, month_bounds, parse_day_month_year, year_bounds};
use crate::ledger::transaction::{TransactionDraft, TransactionKind};
use crate::storage::{AutosaveWorker, JsonStorage, StorageBackend};
use crate::tracker::Tracker;

pub fn run_cli() -> Result<()> {
    let mut args = env::args().skip(1);
    let command = match args.next() {
        Some(command) => command,
        None => {
            print_usage();
            process::exit(1);
        }
    };
    if command == "help" {
        print_usage();
        return Ok(());
    }

    let storage: Arc<dyn StorageBackend> = Arc::new(JsonStorage::new_default());
    let mut tracker = Tracker::load(storage.as_ref());
    let worker = AutosaveWorker::spawn(Arc::clone(&storage));
    tracker.subscribe(worker.subscriber());

    let config = match ConfigManager::new().load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to load configuration, using defaults: {err}");
            Config::default()
        }
    };
    let today = Local::now().date_naive();

    let result = match command.as_str() {
        "add" => cmd_add(&mut tracker, today),
        "list" => cmd_list(&tracker, &config),
        "totals" => cmd_totals(&tracker, &config, today),
        "budget" => cmd_budget(&tracker, &config, today),
        "breakdown" => cmd_breakdown(&tracker, &config, today, args.next()),
        "categories" => cmd_categories(&tracker),
        "category-add" => cmd_category_add(&mut tracker),
        "category-delete" => cmd_category_delete(&mut tracker),
        "category-reset" => cmd_category_reset(&mut tracker),
        "limit" => cmd_limit(&mut tracker, args.next()),
        "export" => cmd_export(&tracker, args.next()),
        "clear" => cmd_clear(&mut tracker, args.next()),
        _ => {
            print_usage();
            Err(TrackerError::InvalidInput(format!(
                "unknown command `{command}`"
            )))
        }
    };

    // Make sure the last committed snapshot hits disk before exiting.
    worker.shutdown();
    result
}

fn cmd_add(tracker: &mut Tracker, today: NaiveDate) -> Result<()> {
    let theme = ColorfulTheme::default();

    let kind_labels = ["Expense", "Income"];
    let kind_index = Select::with_theme(&theme)
        .with_prompt("Entry type")
        .items(&kind_labels)
        .default(0)
        .interact()
        .map_err(prompt_failed)?;
    let kind = if kind_index == 0 {
        TransactionKind::Expense
    } else {
        TransactionKind::Income
    };

    let eligible: Vec<&Category> = tracker
        .categories()
        .iter()
        .filter(|category| match kind {
            TransactionKind::Expense => category.kind != CategoryKind::Income,
            TransactionKind::Income => category.kind != CategoryKind::Expense,
        })
        .collect();
    if eligible.is_empty() {
        return Err(TrackerError::InvalidInput(
            "no categories available for this entry type".into(),
        ));
    }
    let labels: Vec<&str> = eligible
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    let category_index = Select::with_theme(&theme)
        .with_prompt("Category")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_failed)?;
    let category_id = eligible[category_index].id;

    let title: String = Input::with_theme(&theme)
        .with_prompt("Title (blank for default)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_failed)?;

    let amount = Input::<f64>::with_theme(&theme)
        .with_prompt("Amount")
        .validate_with(|value: &f64| -> std::result::Result<(), &str> {
            if *value > 0.0 {
                Ok(())
            } else {
                Err("Amount must be greater than 0")
            }
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let date_input: String = Input::with_theme(&theme)
        .with_prompt("Date (dd/mm/yyyy)")
        .with_initial_text(format_day_month_year(today))
        .interact_text()
        .map_err(prompt_failed)?;
    let date = parse_day_month_year(&date_input)?;

    let months = Input::<u32>::with_theme(&theme)
        .with_prompt("Months (1 for a one-off entry)")
        .with_initial_text("1")
        .validate_with(|value: &u32| -> std::result::Result<(), &str> {
            if *value == 0 {
                Err("Value must be at least 1")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let signed = match kind {
        TransactionKind::Expense => -amount.abs(),
        TransactionKind::Income => amount.abs(),
    };
    let draft = TransactionDraft::new(title, signed, category_id, date, kind);
    if months > 1 {
        let ids = tracker.add_recurring_transaction(draft, months)?;
        println!("Recorded {} entries.", ids.len());
    } else {
        tracker.add_transaction(draft)?;
        println!("Entry recorded.");
    }
    Ok(())
}

fn cmd_list(tracker: &Tracker, config: &Config) -> Result<()> {
    if tracker.transactions().is_empty() {
        println!("No transactions recorded yet.");
        return Ok(());
    }
    for txn in tracker.transactions() {
        let category = tracker
            .ledger()
            .category(txn.category_id)
            .map(|category| category.name.as_str())
            .unwrap_or("(missing category)");
        let amount = format_amount(txn.amount, &config.currency_symbol);
        let amount = if txn.amount < 0.0 {
            amount.red()
        } else {
            amount.green()
        };
        println!(
            "{}  {:<24} {:<16} {}",
            format_day_month_year(txn.date).dimmed(),
            txn.title,
            category,
            amount
        );
    }
    Ok(())
}

fn cmd_totals(tracker: &Tracker, config: &Config, today: NaiveDate) -> Result<()> {
    let totals = tracker.totals(today);
    let symbol = &config.currency_symbol;
    println!("Income:   {}", format!("{}{:.2}", symbol, totals.income).green());
    println!("Expenses: {}", format!("{}{:.2}", symbol, totals.expenses).red());
    println!("Savings:  {}", format!("{}{:.2}", symbol, totals.savings).cyan());
    println!("Balance:  {}", format_amount(totals.balance, symbol).bold());
    Ok(())
}

fn cmd_budget(tracker: &Tracker, config: &Config, today: NaiveDate) -> Result<()> {
    let status = tracker.monthly_budget_status(today)?;
    let symbol = &config.currency_symbol;
    let line = format!(
        "{} {}{:.2} of {}{:.2} ({:.0}%)",
        progress_bar(status.progress),
        symbol,
        status.spent,
        symbol,
        status.limit,
        status.spent / status.limit * 100.0
    );
    if status.exceeded {
        println!("{}", line.red());
        println!("Monthly budget exceeded.");
    } else {
        println!("{line}");
    }
    Ok(())
}

fn cmd_breakdown(
    tracker: &Tracker,
    config: &Config,
    today: NaiveDate,
    scope: Option<String>,
) -> Result<()> {
    let (start, end) = match scope.as_deref() {
        None | Some("month") => month_bounds(today),
        Some("year") => year_bounds(today),
        Some(other) => {
            return Err(TrackerError::InvalidInput(format!(
                "unknown breakdown scope `{other}`, expected `month` or `year`"
            )))
        }
    };
    let breakdown = tracker.category_breakdown(start, end)?;
    if breakdown.entries.is_empty() && breakdown.savings == 0.0 {
        println!(
            "No spending between {} and {}.",
            format_day_month_year(start),
            format_day_month_year(end)
        );
        return Ok(());
    }
    let symbol = &config.currency_symbol;
    for entry in &breakdown.entries {
        println!("{:<20} {}", entry.name, format!("{}{:.2}", symbol, entry.total).red());
    }
    if breakdown.savings > 0.0 {
        println!("{:<20} {}", "Savings", format!("{}{:.2}", symbol, breakdown.savings).cyan());
    }
    Ok(())
}

fn cmd_categories(tracker: &Tracker) -> Result<()> {
    for category in tracker.categories() {
        let marker = if category.is_protected() { "*" } else { " " };
        println!(
            "{} {:<16} {:<14} {:<8} {}",
            marker,
            category.name,
            category.icon.name(),
            category.kind,
            category.color.dimmed()
        );
    }
    println!();
    println!("{}", "* protected".dimmed());
    Ok(())
}

fn cmd_category_add(tracker: &mut Tracker) -> Result<()> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Category name")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("Name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let kinds = [
        CategoryKind::Expense,
        CategoryKind::Income,
        CategoryKind::Both,
    ];
    let kind_labels = ["Expense", "Income", "Both"];
    let kind_index = Select::with_theme(&theme)
        .with_prompt("Category type")
        .items(&kind_labels)
        .default(0)
        .interact()
        .map_err(prompt_failed)?;

    let icon_labels: Vec<&str> = CategoryIcon::ALL.iter().map(|icon| icon.name()).collect();
    let icon_index = Select::with_theme(&theme)
        .with_prompt("Icon")
        .items(&icon_labels)
        .default(0)
        .interact()
        .map_err(prompt_failed)?;

    let color_index = Select::with_theme(&theme)
        .with_prompt("Color")
        .items(&COLOR_PALETTE)
        .default(0)
        .interact()
        .map_err(prompt_failed)?;

    let draft = CategoryDraft::new(
        name,
        CategoryIcon::ALL[icon_index],
        COLOR_PALETTE[color_index],
        kinds[kind_index],
    );
    let id = tracker.add_category(draft)?;
    println!("Category added ({id}).");
    Ok(())
}

fn cmd_category_delete(tracker: &mut Tracker) -> Result<()> {
    let deletable: Vec<(String, Uuid)> = tracker
        .categories()
        .iter()
        .filter(|category| !category.is_protected())
        .map(|category| (category.name.clone(), category.id))
        .collect();
    if deletable.is_empty() {
        println!("Only protected categories remain.");
        return Ok(());
    }
    let labels: Vec<&str> = deletable.iter().map(|(name, _)| name.as_str()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Delete which category?")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_failed)?;
    tracker.delete_category(deletable[index].1)?;
    println!("Category deleted; its entries now count under Other.");
    Ok(())
}

fn cmd_category_reset(tracker: &mut Tracker) -> Result<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Replace all categories with the defaults?")
        .default(false)
        .interact()
        .map_err(prompt_failed)?;
    if confirmed {
        tracker.reset_categories_to_default();
        println!("Default categories restored.");
    }
    Ok(())
}

fn cmd_limit(tracker: &mut Tracker, arg: Option<String>) -> Result<()> {
    let raw = arg.ok_or_else(|| {
        TrackerError::InvalidInput("limit needs an amount, e.g. `limit 1000`".into())
    })?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TrackerError::InvalidInput(format!("`{raw}` is not a number")))?;
    tracker.set_monthly_limit(value)?;
    println!("Monthly limit set to {value:.2}.");
    Ok(())
}

fn cmd_export(tracker: &Tracker, arg: Option<String>) -> Result<()> {
    let path = arg.ok_or_else(|| {
        TrackerError::InvalidInput("export needs a target file, e.g. `export history.csv`".into())
    })?;
    let data = export::csv_string(tracker.transactions())?;
    fs::write(&path, data)?;
    println!(
        "Exported {} transactions to {}.",
        tracker.transactions().len(),
        path
    );
    Ok(())
}

fn cmd_clear(tracker: &mut Tracker, flag: Option<String>) -> Result<()> {
    let confirmed = if flag.as_deref() == Some("--yes") {
        true
    } else {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete every transaction and restore default categories?")
            .default(false)
            .interact()
            .map_err(prompt_failed)?
    };
    if confirmed {
        tracker.clear_all_data();
        println!("All data cleared.");
    }
    Ok(())
}

fn prompt_failed(err: dialoguer::Error) -> TrackerError {
    TrackerError::InvalidInput(format!("prompt aborted: {err}"))
}

fn format_amount(value: f64, symbol: &str) -> String {
    if value < 0.0 {
        format!("-{}{:.2}", symbol, value.abs())
    } else {
        format!("{}{:.2}", symbol, value)
    }
}

fn progress_bar(progress: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((progress * WIDTH as f64).round() as usize).min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

fn print_usage() {
    eprintln!(
        "Usage: expense_core_cli <command>\n\
         Commands:\n  \
         add                 record an expense or income interactively\n  \
         list                show the transaction history\n  \
         totals              income, expenses, savings, and balance\n  \
         budget              monthly spending against the limit\n  \
         breakdown [scope]   per-category spending (`month` or `year`)\n  \
         categories          list categories\n  \
         category-add        create a category interactively\n  \
         category-delete     delete a category\n  \
         category-reset      restore the default categories\n  \
         limit <amount>      set the monthly spending limit\n  \
         export <file.csv>   export the history as CSV\n  \
         clear [--yes]       delete all data\n  \
         help                show this message"
    );
}
