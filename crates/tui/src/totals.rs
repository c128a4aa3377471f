//! Aggregation helpers for expense listings.
//!
//! Everything here works on the already fetched listing of a group, so the
//! screens can summarize without another round trip.

use std::collections::HashMap;

use api_types::expense::{ExpenseRow, ExpenseView};
use store::Money;
use uuid::Uuid;

/// Sum of the whole listing. An empty listing totals zero.
#[must_use]
pub fn total_amount(expenses: &[ExpenseView]) -> Money {
    Money::new(expenses.iter().map(|expense| expense.amount_cents).sum())
}

/// Sum of the plain rows embedded in a group overview.
#[must_use]
pub fn row_total(expenses: &[ExpenseRow]) -> Money {
    Money::new(expenses.iter().map(|expense| expense.amount_cents).sum())
}

/// Payers in order of first appearance. A missing payer embed still counts,
/// under the "Desconhecido" placeholder.
#[must_use]
pub fn unique_payers(expenses: &[ExpenseView]) -> Vec<(Uuid, String)> {
    let mut payers: Vec<(Uuid, String)> = Vec::new();
    for expense in expenses {
        if payers.iter().any(|(id, _)| *id == expense.user_id) {
            continue;
        }
        let name = expense
            .payer
            .as_ref()
            .map_or_else(|| "Desconhecido".to_string(), |payer| payer.name.clone());
        payers.push((expense.user_id, name));
    }

    payers
}

/// Per payer totals, in order of first appearance.
#[must_use]
pub fn per_payer_totals(expenses: &[ExpenseView]) -> Vec<(String, Money)> {
    let mut sums: HashMap<Uuid, i64> = HashMap::new();
    for expense in expenses {
        *sums.entry(expense.user_id).or_insert(0) += expense.amount_cents;
    }

    unique_payers(expenses)
        .into_iter()
        .map(|(id, name)| (name, Money::new(sums.get(&id).copied().unwrap_or(0))))
        .collect()
}

#[cfg(test)]
mod tests {
    use api_types::expense::PayerRef;
    use chrono::DateTime;

    use super::*;

    fn expense(name: &str, amount_cents: i64, payer_id: u128, payer: Option<&str>) -> ExpenseView {
        let at = DateTime::parse_from_rfc3339("2026-03-01T12:00:00-03:00").unwrap();
        ExpenseView {
            id: Uuid::from_u128(amount_cents as u128),
            group_id: Uuid::from_u128(99),
            user_id: Uuid::from_u128(payer_id),
            payment_method_id: Uuid::from_u128(77),
            name: name.to_string(),
            amount_cents,
            created_at: at,
            updated_at: at,
            payer: payer.map(|payer| PayerRef {
                id: Uuid::from_u128(payer_id),
                name: payer.to_string(),
            }),
            payment_method: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn single_dinner_totals_itself() {
        let listing = vec![expense("Jantar", 5000, 1, Some("Ana"))];

        assert_eq!(total_amount(&listing), Money::new(5000));
        assert_eq!(total_amount(&listing).to_string(), "R$ 50,00");
        assert_eq!(
            unique_payers(&listing),
            vec![(Uuid::from_u128(1), "Ana".to_string())]
        );
        assert_eq!(
            per_payer_totals(&listing),
            vec![("Ana".to_string(), Money::new(5000))]
        );
    }

    #[test]
    fn totals_sum_the_whole_listing() {
        let listing = vec![
            expense("Jantar", 5000, 1, Some("Ana")),
            expense("Mercado", 3000, 2, Some("Bruno")),
            expense("Uber", 2000, 1, Some("Ana")),
        ];

        assert_eq!(total_amount(&listing), Money::new(10000));
        assert_eq!(total_amount(&listing).to_string(), "R$ 100,00");
    }

    #[test]
    fn per_payer_totals_follow_first_appearance() {
        let listing = vec![
            expense("Jantar", 5000, 1, Some("Ana")),
            expense("Mercado", 3000, 2, Some("Bruno")),
            expense("Uber", 2000, 1, Some("Ana")),
        ];

        assert_eq!(
            per_payer_totals(&listing),
            vec![
                ("Ana".to_string(), Money::new(7000)),
                ("Bruno".to_string(), Money::new(3000)),
            ]
        );
    }

    #[test]
    fn empty_listing_totals_zero() {
        assert_eq!(total_amount(&[]), Money::ZERO);
        assert!(unique_payers(&[]).is_empty());
        assert!(per_payer_totals(&[]).is_empty());
        assert_eq!(row_total(&[]), Money::ZERO);
    }

    #[test]
    fn overview_rows_sum_like_the_listing() {
        let rows: Vec<ExpenseRow> = [
            expense("Jantar", 5000, 1, None),
            expense("Uber", 2000, 1, None),
        ]
        .into_iter()
        .map(|expense| ExpenseRow {
            id: expense.id,
            group_id: expense.group_id,
            user_id: expense.user_id,
            payment_method_id: expense.payment_method_id,
            name: expense.name,
            amount_cents: expense.amount_cents,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        })
        .collect();

        assert_eq!(row_total(&rows), Money::new(7000));
    }

    #[test]
    fn missing_payer_counts_as_unknown() {
        let listing = vec![
            expense("Jantar", 5000, 1, None),
            expense("Uber", 2000, 1, None),
        ];

        assert_eq!(
            per_payer_totals(&listing),
            vec![("Desconhecido".to_string(), Money::new(7000))]
        );
    }
}
