//! Pharmacy medication form.
//!
//! Handles:
//! - Stock status derivation (out of stock / low stock / in stock)
//! - Price normalization (leading currency symbol, never doubled)
//! - Stock parsing (negative entries clamp to zero)

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EntityForm, FormError, FormResult};
use crate::config::AdminConfig;
use crate::models::{Medication, StockStatus};

/// Editable fields of a medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MedicationField {
    Name,
    Category,
    Stock,
    Price,
    Supplier,
}

impl MedicationField {
    pub const ALL: [MedicationField; 5] = [
        MedicationField::Name,
        MedicationField::Category,
        MedicationField::Stock,
        MedicationField::Price,
        MedicationField::Supplier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MedicationField::Name => "name",
            MedicationField::Category => "category",
            MedicationField::Stock => "stock",
            MedicationField::Price => "price",
            MedicationField::Supplier => "supplier",
        }
    }
}

impl FromStr for MedicationField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// In-progress medication fields, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationDraft {
    pub name: String,
    pub category: String,
    /// Raw stock input; parsed on finalize
    pub stock: String,
    /// Raw price input; normalized on finalize
    pub price: String,
    pub supplier: String,
}

impl Default for MedicationDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            stock: "0".into(),
            price: String::new(),
            supplier: String::new(),
        }
    }
}

impl From<&Medication> for MedicationDraft {
    fn from(med: &Medication) -> Self {
        Self {
            name: med.name.clone(),
            category: med.category.clone(),
            stock: med.stock.to_string(),
            price: med.price.clone(),
            supplier: med.supplier.clone(),
        }
    }
}

/// Controller for the add/edit medication form.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationForm {
    low_stock_threshold: u32,
    currency_symbol: String,
}

impl Default for MedicationForm {
    fn default() -> Self {
        Self::new(StockStatus::DEFAULT_LOW_STOCK_THRESHOLD, "$")
    }
}

impl MedicationForm {
    pub fn new(low_stock_threshold: u32, currency_symbol: impl Into<String>) -> Self {
        Self {
            low_stock_threshold,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.low_stock_threshold, config.currency_symbol.clone())
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    /// Normalize a price with this form's currency symbol.
    pub fn normalize_price(&self, price: &str) -> String {
        normalize_price(price, &self.currency_symbol)
    }
}

impl EntityForm for MedicationForm {
    type Record = Medication;
    type Draft = MedicationDraft;
    type Field = MedicationField;

    fn initialize(&self, seed: Option<&Medication>) -> MedicationDraft {
        seed.map(MedicationDraft::from).unwrap_or_default()
    }

    fn set_field(
        &self,
        draft: &MedicationDraft,
        field: MedicationField,
        value: &str,
    ) -> FormResult<MedicationDraft> {
        let mut next = draft.clone();
        let slot = match field {
            MedicationField::Name => &mut next.name,
            MedicationField::Category => &mut next.category,
            MedicationField::Stock => &mut next.stock,
            MedicationField::Price => &mut next.price,
            MedicationField::Supplier => &mut next.supplier,
        };
        *slot = value.to_string();
        Ok(next)
    }

    fn finalize(&self, draft: &MedicationDraft) -> FormResult<Medication> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingField("name"));
        }

        let count = parse_stock(&draft.stock)?;
        let status = StockStatus::from_stock(count, self.low_stock_threshold);
        let stock =
            u32::try_from(count.max(0)).map_err(|_| FormError::InvalidStock(draft.stock.clone()))?;

        let record = Medication {
            name: name.to_string(),
            category: draft.category.clone(),
            stock,
            price: self.normalize_price(&draft.price),
            supplier: draft.supplier.clone(),
            status,
        };

        tracing::debug!(
            name = %record.name,
            stock = record.stock,
            status = %record.status,
            "finalized medication"
        );
        Ok(record)
    }
}

/// Prefix a price with the currency symbol unless it already carries it.
///
/// Surrounding whitespace is dropped. Applying this twice gives the same
/// result as applying it once.
pub fn normalize_price(price: &str, currency_symbol: &str) -> String {
    let trimmed = price.trim();
    if trimmed.starts_with(currency_symbol) {
        trimmed.to_string()
    } else {
        format!("{}{}", currency_symbol, trimmed)
    }
}

/// Parse a stock entry. An empty entry counts as zero.
pub fn parse_stock(value: &str) -> FormResult<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| FormError::InvalidStock(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalize_stock(stock: &str) -> Medication {
        let form = MedicationForm::default();
        let draft = MedicationDraft {
            name: "Test Drug".into(),
            stock: stock.into(),
            ..Default::default()
        };
        form.finalize(&draft).unwrap()
    }

    #[test]
    fn test_initialize_empty() {
        let form = MedicationForm::default();
        let draft = form.initialize(None);

        assert_eq!(draft.name, "");
        assert_eq!(draft.stock, "0");
        assert_eq!(draft.price, "");
    }

    #[test]
    fn test_initialize_from_seed() {
        let form = MedicationForm::default();
        let seed = Medication {
            name: "Lisinopril".into(),
            category: "Cardiovascular".into(),
            stock: 35,
            price: "$8.75".into(),
            supplier: "HealthDist".into(),
            status: StockStatus::LowStock,
        };
        let draft = form.initialize(Some(&seed));

        assert_eq!(draft.name, "Lisinopril");
        assert_eq!(draft.stock, "35");
        assert_eq!(draft.price, "$8.75");
    }

    #[test]
    fn test_set_field_replaces_one_field() {
        let form = MedicationForm::default();
        let draft = form.initialize(None);
        let next = form
            .set_field(&draft, MedicationField::Supplier, "MedSupply")
            .unwrap();

        assert_eq!(next.supplier, "MedSupply");
        assert_eq!(next.name, draft.name);
        assert_eq!(next.stock, draft.stock);
        // The input draft is untouched
        assert_eq!(draft.supplier, "");
    }

    #[test]
    fn test_stock_status_scenarios() {
        assert_eq!(finalize_stock("0").status, StockStatus::OutOfStock);
        assert_eq!(finalize_stock("50").status, StockStatus::LowStock);
        assert_eq!(finalize_stock("51").status, StockStatus::InStock);
    }

    #[test]
    fn test_negative_stock_clamps_to_zero() {
        let med = finalize_stock("-5");
        assert_eq!(med.stock, 0);
        assert_eq!(med.status, StockStatus::OutOfStock);
    }

    #[test]
    fn test_empty_stock_is_zero() {
        let med = finalize_stock("");
        assert_eq!(med.stock, 0);
        assert_eq!(med.status, StockStatus::OutOfStock);
    }

    #[test]
    fn test_invalid_stock_rejected() {
        let form = MedicationForm::default();
        let draft = MedicationDraft {
            name: "Test".into(),
            stock: "lots".into(),
            ..Default::default()
        };
        assert_eq!(
            form.finalize(&draft),
            Err(FormError::InvalidStock("lots".into()))
        );
    }

    #[test]
    fn test_price_normalization() {
        assert_eq!(normalize_price("19.99", "$"), "$19.99");
        assert_eq!(normalize_price("$19.99", "$"), "$19.99");
        assert_eq!(normalize_price("  7.5 ", "$"), "$7.5");
        assert_eq!(normalize_price("12,00", "€"), "€12,00");
    }

    #[test]
    fn test_finalize_normalizes_price() {
        let form = MedicationForm::default();
        let draft = MedicationDraft {
            name: "Metformin".into(),
            stock: "200".into(),
            price: "19.99".into(),
            ..Default::default()
        };
        assert_eq!(form.finalize(&draft).unwrap().price, "$19.99");
    }

    #[test]
    fn test_name_required() {
        let form = MedicationForm::default();
        let draft = MedicationDraft {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(form.finalize(&draft), Err(FormError::MissingField("name")));
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("stock".parse::<MedicationField>(), Ok(MedicationField::Stock));
        assert_eq!(
            "colour".parse::<MedicationField>(),
            Err(FormError::UnknownField("colour".into()))
        );
    }

    #[test]
    fn test_custom_threshold_form() {
        let form = MedicationForm::new(10, "$");
        let draft = MedicationDraft {
            name: "Test".into(),
            stock: "11".into(),
            ..Default::default()
        };
        assert_eq!(form.finalize(&draft).unwrap().status, StockStatus::InStock);
    }
}
