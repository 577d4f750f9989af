use anyhow::Result;
use std::path::Path;

use crate::containers::BillsList;
use crate::models::{Session, UserType};
use crate::store::BillsStore;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], store: &mut dyn BillsStore, session_path: &Path) -> Result<()> {
    match args[1].as_str() {
        "login" => cli_login(&args[2..], session_path),
        "logout" => cli_logout(session_path),
        "bills" | "b" => cli_bills(store),
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("billtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("BillTUI — expense report tracker");
    println!();
    println!("Usage: billtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI (requires login)");
    println!("  login <email>                 Sign in as an employee");
    println!("    --admin                     Sign in as an admin instead");
    println!("  logout                        Sign out");
    println!("  bills                         List submitted expense reports");
    println!("  export [path]                 Export expense reports to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_login(args: &[String], session_path: &Path) -> Result<()> {
    let email = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: billtui login <email> [--admin]"))?;

    let user_type = if args.iter().any(|a| a == "--admin") {
        UserType::Admin
    } else {
        UserType::Employee
    };

    let session = Session::new(user_type, email.clone());
    session.save(session_path)?;
    tracing::info!(%email, ?user_type, "session opened");
    println!("Connecté: {email} ({user_type})");
    Ok(())
}

fn cli_logout(session_path: &Path) -> Result<()> {
    Session::clear(session_path)?;
    println!("Déconnecté");
    Ok(())
}

fn cli_bills(store: &mut dyn BillsStore) -> Result<()> {
    let rows = BillsList::new(Some(&*store)).get_bills()?;
    if rows.is_empty() {
        println!("Aucune note de frais");
        return Ok(());
    }

    println!(
        "{:<24} {:<28} {:<12} {:>14} Statut",
        "Type", "Nom", "Date", "Montant"
    );
    println!("{}", "─".repeat(92));
    for row in &rows {
        println!(
            "{:<24} {:<28} {:<12} {:>14} {}",
            row.expense_type,
            row.name,
            row.date,
            format_amount(row.amount),
            row.status,
        );
    }
    Ok(())
}

fn cli_export(args: &[String], store: &mut dyn BillsStore) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/billtui-export.csv")
        });

    let bills = store.list()?;
    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record([
        "email", "type", "name", "amount", "date", "vat", "pct", "commentary", "file_name",
        "status",
    ])?;
    for bill in &bills {
        writer.write_record([
            bill.email.clone(),
            bill.expense_type.clone(),
            bill.name.clone(),
            bill.amount.to_string(),
            bill.date.clone(),
            bill.vat.map(|v| v.to_string()).unwrap_or_default(),
            bill.pct.to_string(),
            bill.commentary.clone(),
            bill.file_name.clone(),
            bill.status.as_str().to_string(),
        ])?;
    }
    writer.flush()?;

    if bills.is_empty() {
        println!("Aucune note de frais à exporter");
    } else {
        println!("Exporté {} notes de frais vers {output_path}", bills.len());
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
