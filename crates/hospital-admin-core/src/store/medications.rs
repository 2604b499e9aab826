//! Pharmacy inventory collection.

use serde::{Deserialize, Serialize};

use super::{RecordStore, StoreRecord, Stored};
use crate::models::{Medication, StockStatus};

impl StoreRecord for Medication {
    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str(), self.supplier.as_str()]
    }
}

/// Counts shown on the pharmacy overview cards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockSummary {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl RecordStore<Medication> {
    /// Count medications per stock status.
    pub fn status_summary(&self) -> StockSummary {
        self.iter().fold(StockSummary::default(), |mut acc, stored| {
            acc.total += 1;
            match stored.record.status {
                StockStatus::InStock => acc.in_stock += 1,
                StockStatus::LowStock => acc.low_stock += 1,
                StockStatus::OutOfStock => acc.out_of_stock += 1,
            }
            acc
        })
    }

    /// Medications currently carrying the given status.
    pub fn with_status(&self, status: StockStatus) -> Vec<&Stored<Medication>> {
        self.filter(|med| med.status == status)
    }

    /// Distinct categories, sorted, for the category filter.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .iter()
            .map(|s| s.record.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str, category: &str, stock: u32) -> Medication {
        Medication {
            name: name.into(),
            category: category.into(),
            stock,
            price: "$1.00".into(),
            supplier: "MedSupply Inc.".into(),
            status: StockStatus::from_stock(stock.into(), StockStatus::DEFAULT_LOW_STOCK_THRESHOLD),
        }
    }

    fn sample_store() -> RecordStore<Medication> {
        let mut store = RecordStore::new();
        store.insert(med("Amoxicillin", "Antibiotics", 250)).unwrap();
        store.insert(med("Azithromycin", "Antibiotics", 20)).unwrap();
        store.insert(med("Insulin Glargine", "Endocrine", 0)).unwrap();
        store.insert(med("Atorvastatin", "Cardiovascular", 51)).unwrap();
        store
    }

    #[test]
    fn test_status_summary() {
        let summary = sample_store().status_summary();
        assert_eq!(
            summary,
            StockSummary {
                total: 4,
                in_stock: 2,
                low_stock: 1,
                out_of_stock: 1,
            }
        );
    }

    #[test]
    fn test_with_status() {
        let store = sample_store();
        let out: Vec<_> = store
            .with_status(StockStatus::OutOfStock)
            .into_iter()
            .map(|s| s.record.name.as_str())
            .collect();
        assert_eq!(out, vec!["Insulin Glargine"]);
    }

    #[test]
    fn test_search_matches_category_and_supplier() {
        let store = sample_store();
        assert_eq!(store.search("antibio").len(), 2);
        assert_eq!(store.search("medsupply").len(), 4);
    }

    #[test]
    fn test_categories_sorted_distinct() {
        let store = sample_store();
        assert_eq!(
            store.categories(),
            vec!["Antibiotics", "Cardiovascular", "Endocrine"]
        );
    }
}
