mod common;

use std::path::Path;

use anyhow::Result;
use budgetbook::Budget;
use budgetbook::io::{
    BudgetSnapshot, Exporter, JournalError, JournalFormat, ReplayError, Replayer, load_journal,
};
use common::{FOOD_RECEIPT, SAMPLE_CSV_JOURNAL, SAMPLE_JSON_JOURNAL, write_journal};

#[test]
fn test_replay_json_journal() -> Result<()> {
    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_json(SAMPLE_JSON_JOURNAL.as_bytes())?;

    assert_eq!(result.applied, 6);
    assert!(result.is_clean());
    assert_eq!(budget.receipt("Food")?, FOOD_RECEIPT);
    assert_eq!(budget.category("Clothing")?.balance(), 5000);
    Ok(())
}

#[test]
fn test_replay_csv_journal() -> Result<()> {
    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_csv(SAMPLE_CSV_JOURNAL.as_bytes())?;

    assert_eq!(result.applied, 5);
    assert!(result.is_clean(), "{:?}", result.errors);
    assert_eq!(budget.receipt("Food")?, FOOD_RECEIPT);

    let names: Vec<&str> = budget.categories().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Food", "Clothing"]);
    Ok(())
}

#[test]
fn test_rejected_entries_are_reported_and_skipped() -> Result<()> {
    let journal = r#"[
        {"op": "deposit", "category": "Food", "amount": "100"},
        {"op": "withdraw", "category": "Food", "amount": "150"},
        {"op": "transfer", "category": "Food", "to": "Auto", "amount": "10"},
        {"op": "create", "category": "Food"},
        {"op": "deposit", "category": "Food", "amount": "-5"},
        {"op": "withdraw", "category": "Food", "amount": "99.99", "description": "groceries"}
    ]"#;

    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_json(journal.as_bytes())?;

    assert_eq!(result.applied, 2);
    let entries: Vec<usize> = result.errors.iter().map(|e| e.entry).collect();
    assert_eq!(entries, vec![2, 3, 4, 5]);
    assert_eq!(
        result.errors[0],
        ReplayError {
            entry: 2,
            error: "Insufficient funds in category Food: balance 10000, required 15000".into(),
        }
    );
    assert_eq!(result.errors[1].error, "Category not found: Auto");
    assert_eq!(result.errors[2].error, "Category already exists: Food");
    assert!(result.errors[3].error.starts_with("Invalid amount"));

    assert_eq!(budget.category("Food")?.balance(), 1);
    assert_eq!(budget.category("Food")?.ledger().len(), 2);
    Ok(())
}

#[test]
fn test_csv_row_errors_do_not_stop_replay() -> Result<()> {
    let journal = "op,category,amount,description,to
deposit,Food,20,,
refund,Food,5,,
transfer,Food,5,,
withdraw,Food,5,snacks,
";
    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_csv(journal.as_bytes())?;

    assert_eq!(result.applied, 2);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].entry, 2);
    assert!(result.errors[0].error.contains("refund"));
    assert_eq!(result.errors[1].error, "Missing transfer destination");
    assert_eq!(budget.category("Food")?.balance(), 1500);
    Ok(())
}

#[test]
fn test_csv_malformed_row_is_reported() -> Result<()> {
    let journal = "op,category,amount,description,to
deposit,Food,20,,
deposit,Food
";
    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_csv(journal.as_bytes())?;

    assert_eq!(result.applied, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].error.starts_with("CSV parse error"));
    Ok(())
}

#[test]
fn test_malformed_json_fails_whole_journal() {
    let mut budget = Budget::new();
    let err = Replayer::new(&mut budget)
        .replay_json(r#"[{"op": "explode"}]"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, JournalError::Json(_)));
    assert!(budget.categories().is_empty());
}

#[test]
fn test_load_journal_infers_format() -> Result<()> {
    let (json_path, _json_dir) = write_journal("budget.json", SAMPLE_JSON_JOURNAL)?;
    let (csv_path, _csv_dir) = write_journal("budget.csv", SAMPLE_CSV_JOURNAL)?;

    let (from_json, _) = load_journal(&json_path, None)?;
    let (from_csv, _) = load_journal(&csv_path, None)?;

    assert_eq!(from_json.receipt("Food")?, from_csv.receipt("Food")?);
    Ok(())
}

#[test]
fn test_load_journal_format_override() -> Result<()> {
    let (path, _dir) = write_journal("budget.txt", SAMPLE_CSV_JOURNAL)?;

    assert!(matches!(
        load_journal(&path, None),
        Err(JournalError::UnknownFormat(_))
    ));

    let (budget, result) = load_journal(&path, Some(JournalFormat::Csv))?;
    assert!(result.is_clean());
    assert_eq!(budget.categories().len(), 2);
    Ok(())
}

#[test]
fn test_load_missing_journal() {
    let err = load_journal(Path::new("/nonexistent/budget.json"), None).unwrap_err();
    assert!(matches!(err, JournalError::Io(_)));
}

#[test]
fn test_export_ledger_csv() -> Result<()> {
    let mut budget = Budget::new();
    Replayer::new(&mut budget).replay_json(SAMPLE_JSON_JOURNAL.as_bytes())?;

    let mut buffer = Vec::new();
    let count = Exporter::new(&budget).export_ledger_csv(&mut buffer)?;
    let csv = String::from_utf8(buffer)?;

    assert_eq!(count, 5);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "category,entry,amount_cents,description");
    assert_eq!(lines[1], "Food,1,100000,initial deposit");
    assert_eq!(lines[2], "Food,2,-1015,groceries");
    assert_eq!(lines[4], "Food,4,-5000,Transfer to Clothing");
    assert_eq!(lines[5], "Clothing,1,5000,Transfer from Food");
    Ok(())
}

#[test]
fn test_export_full_json() -> Result<()> {
    let mut budget = Budget::new();
    Replayer::new(&mut budget).replay_json(SAMPLE_JSON_JOURNAL.as_bytes())?;

    let mut buffer = Vec::new();
    Exporter::new(&budget).export_full_json(&mut buffer)?;
    let snapshot: BudgetSnapshot = serde_json::from_slice(&buffer)?;

    assert_eq!(snapshot.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(snapshot.categories.len(), 2);
    assert_eq!(snapshot.categories[0].name, "Food");
    assert_eq!(snapshot.categories[0].balance, 92396);
    assert_eq!(snapshot.categories[0].ledger.len(), 4);
    assert_eq!(snapshot.categories[1].balance, 5000);
    Ok(())
}

#[test]
fn test_non_ascii_amount_is_a_rejected_entry() -> Result<()> {
    let journal = r#"[
        {"op": "deposit", "category": "Food", "amount": "1.€"},
        {"op": "deposit", "category": "Food", "amount": "1.5é"},
        {"op": "deposit", "category": "Food", "amount": "2.50"}
    ]"#;
    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_json(journal.as_bytes())?;

    assert_eq!(result.applied, 1);
    let entries: Vec<usize> = result.errors.iter().map(|e| e.entry).collect();
    assert_eq!(entries, vec![1, 2]);
    assert!(result.errors[0].error.starts_with("Invalid amount '1.€'"));
    assert_eq!(budget.category("Food")?.balance(), 250);
    Ok(())
}

#[test]
fn test_deposit_overflowing_balance_is_rejected() -> Result<()> {
    let journal = r#"[
        {"op": "deposit", "category": "Food", "amount": "90000000000000000"},
        {"op": "deposit", "category": "Food", "amount": "90000000000000000"}
    ]"#;
    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_json(journal.as_bytes())?;

    assert_eq!(result.applied, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].entry, 2);
    assert!(result.errors[0].error.contains("overflow"));

    assert_eq!(budget.receipt("Food")?.lines().count(), 3);
    budget.spend_chart(&[])?;
    Ok(())
}

#[test]
fn test_rejected_amount_leaves_no_category_behind() -> Result<()> {
    let journal = r#"[
        {"op": "deposit", "category": "Ghost", "amount": "-5"},
        {"op": "withdraw", "category": "Ghost", "amount": "0"}
    ]"#;
    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_json(journal.as_bytes())?;

    assert_eq!(result.applied, 0);
    assert_eq!(
        result.errors[0].error,
        "Invalid amount: -5.00 (must be positive)"
    );
    assert!(budget.categories().is_empty());
    Ok(())
}
