// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use budgetbook::Category;
use tempfile::TempDir;

/// Write `contents` to a journal file inside a fresh temporary directory.
pub fn write_journal(file_name: &str, contents: &str) -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(file_name);
    fs::write(&path, contents)?;
    Ok((path, temp_dir))
}

/// The Food/Clothing/Auto fixture used by the receipt and chart examples.
pub fn sample_categories() -> (Category, Category, Category) {
    let mut food = Category::new("Food");
    let mut clothing = Category::new("Clothing");
    let mut auto = Category::new("Auto");

    food.deposit(100000, Some("initial deposit"));
    food.withdraw(1015, Some("groceries"));
    food.withdraw(1589, Some("restaurant and more food for dessert"));
    food.transfer(5000, &mut clothing);

    clothing.withdraw(2000, Some("shirts"));
    auto.deposit(10000, Some("initial deposit"));
    auto.withdraw(1500, Some("fuel"));

    (food, clothing, auto)
}

pub const SAMPLE_JSON_JOURNAL: &str = r#"[
    {"op": "create", "category": "Food"},
    {"op": "create", "category": "Clothing"},
    {"op": "deposit", "category": "Food", "amount": "1000", "description": "initial deposit"},
    {"op": "withdraw", "category": "Food", "amount": "10.15", "description": "groceries"},
    {"op": "withdraw", "category": "Food", "amount": "15.89", "description": "restaurant and more food for dessert"},
    {"op": "transfer", "category": "Food", "to": "Clothing", "amount": "50.00"}
]"#;

pub const SAMPLE_CSV_JOURNAL: &str = "op,category,amount,description,to
deposit,Food,1000,initial deposit,
withdraw,Food,10.15,groceries,
withdraw,Food,15.89,restaurant and more food for dessert,
create,Clothing,,,
transfer,Food,50,,Clothing
";

pub const FOOD_RECEIPT: &str = "*************Food*************
initial deposit        1000.00
groceries               -10.15
restaurant and more foo -15.89
Transfer to Clothing    -50.00
Total: 923.96";
