use std::cmp::Ordering;

use serde::Deserialize;

use crate::storage::models::CatalogItem;

/// How an item without a price ranks when picking the item to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPricePolicy {
    /// Priceless items rank after every priced item, so one is kept only
    /// when the whole group is priceless.
    #[default]
    Last,
    /// Priceless items count as free and rank first.
    Zero,
}

impl MissingPricePolicy {
    pub fn compare(&self, a: Option<f64>, b: Option<f64>) -> Ordering {
        match self {
            MissingPricePolicy::Last => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            MissingPricePolicy::Zero => a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0)),
        }
    }
}

/// Which item of a group survives and which ones may go.
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionDecision<'a> {
    pub keep: &'a CatalogItem,
    pub deletable: Vec<&'a CatalogItem>,
}

/// Pick the cheapest item of a group to keep.
///
/// The sort is stable, so among equal prices the item listed first wins.
/// Returns `None` for an empty slice.
pub fn resolve_keep(items: &[CatalogItem], policy: MissingPricePolicy) -> Option<RetentionDecision<'_>> {
    let mut ranked: Vec<&CatalogItem> = items.iter().collect();
    ranked.sort_by(|a, b| policy.compare(a.price, b.price));

    let mut ranked = ranked.into_iter();
    let keep = ranked.next()?;
    Some(RetentionDecision {
        keep,
        deletable: ranked.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: Option<f64>) -> CatalogItem {
        CatalogItem::new(id, "Shirt", price)
    }

    #[test]
    fn test_keeps_lowest_price() {
        let items = vec![item(1, Some(10.0)), item(2, Some(5.0)), item(3, Some(7.5))];
        let decision = resolve_keep(&items, MissingPricePolicy::Last).unwrap();
        assert_eq!(decision.keep.id, 2);
        let deletable: Vec<i64> = decision.deletable.iter().map(|i| i.id).collect();
        assert_eq!(deletable, vec![3, 1]);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let items = vec![item(7, Some(5.0)), item(3, Some(5.0)), item(9, Some(5.0))];
        let decision = resolve_keep(&items, MissingPricePolicy::Last).unwrap();
        assert_eq!(decision.keep.id, 7);
        let deletable: Vec<i64> = decision.deletable.iter().map(|i| i.id).collect();
        assert_eq!(deletable, vec![3, 9]);
    }

    #[test]
    fn test_missing_price_last() {
        let items = vec![item(1, None), item(2, Some(99.0))];
        let decision = resolve_keep(&items, MissingPricePolicy::Last).unwrap();
        assert_eq!(decision.keep.id, 2);

        let all_missing = vec![item(4, None), item(5, None)];
        let decision = resolve_keep(&all_missing, MissingPricePolicy::Last).unwrap();
        assert_eq!(decision.keep.id, 4);
    }

    #[test]
    fn test_missing_price_zero() {
        let items = vec![item(1, Some(0.5)), item(2, None)];
        let decision = resolve_keep(&items, MissingPricePolicy::Zero).unwrap();
        assert_eq!(decision.keep.id, 2);

        // Explicit zero ties with missing; first seen wins.
        let items = vec![item(1, Some(0.0)), item(2, None)];
        let decision = resolve_keep(&items, MissingPricePolicy::Zero).unwrap();
        assert_eq!(decision.keep.id, 1);
    }

    #[test]
    fn test_empty_group() {
        assert!(resolve_keep(&[], MissingPricePolicy::Last).is_none());
    }
}
