use super::Category;
use super::text::rjust;

const TITLE: &str = "Percentage spent by category";

/// Share of total withdrawals spent by each category, in percent, rounded
/// down to a multiple of 10. Withdrawals include outgoing transfers.
///
/// When no category has any withdrawal every share is 0.
pub fn spend_percentages(categories: &[Category]) -> Vec<u32> {
    let costs: Vec<i128> = categories.iter().map(Category::spent).collect();
    let total: i128 = costs.iter().sum();

    if total == 0 {
        tracing::debug!(
            categories = categories.len(),
            "no withdrawals recorded, every share is 0"
        );
        return vec![0; categories.len()];
    }

    costs
        .iter()
        .map(|cost| {
            // Both sides are non-positive, so the quotient is in 0..=100
            let percent = (cost * 100 / total) as u32;
            percent - percent % 10
        })
        .collect()
}

/// Render the bar chart of spending proportions.
///
/// ```
/// use budgetbook::{Category, create_spend_chart};
///
/// let mut food = Category::new("Food");
/// food.deposit(1000, None);
/// food.withdraw(1000, None);
///
/// let chart = create_spend_chart(&[food]);
/// assert!(chart.starts_with("Percentage spent by category\n100| o "));
/// ```
pub fn create_spend_chart(categories: &[Category]) -> String {
    let percents = spend_percentages(categories);
    let mut chart = String::new();

    chart.push_str(TITLE);
    chart.push('\n');

    for y in (0..=100u32).rev().step_by(10) {
        chart.push_str(&rjust(&y.to_string(), 3));
        chart.push('|');
        for &percent in &percents {
            chart.push_str(if percent >= y { " o " } else { "   " });
        }
        chart.push_str(" \n");
    }

    chart.push_str("    ");
    chart.push_str(&"---".repeat(categories.len()));
    chart.push_str("-\n");

    let names: Vec<Vec<char>> = categories.iter().map(|c| c.name().chars().collect()).collect();
    let max_len = names.iter().map(Vec::len).max().unwrap_or(0);
    for x in 0..max_len {
        chart.push_str("    ");
        for name in &names {
            match name.get(x) {
                Some(ch) => {
                    chart.push(' ');
                    chart.push(*ch);
                    chart.push(' ');
                }
                None => chart.push_str("   "),
            }
        }
        chart.push_str(" \n");
    }

    chart.pop();
    chart
}
