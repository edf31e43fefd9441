use super::{GeneralParameters, HitParameters, HitType};
use crate::types::Parameters;

use serde::{Deserialize, Serialize};

/// E-commerce transaction. Items are sent as separate [`ItemTracking`] hits
/// with the same transaction id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionTracking {
    pub general: GeneralParameters,
    pub transaction_id: String,
    pub affiliation: Option<String>,
    pub revenue: Option<f64>,
    pub shipping: Option<f64>,
    pub tax: Option<f64>,
    /// ISO 4217 code (`cu`).
    pub currency_code: Option<String>,
}

impl TransactionTracking {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            ..Default::default()
        }
    }

    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }
}

impl HitParameters for TransactionTracking {
    fn hit_type(&self) -> HitType {
        HitType::Transaction
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        params.insert("ti", self.transaction_id.as_str());
        params.insert_opt("ta", self.affiliation.as_deref());
        params.insert_opt("tr", self.revenue);
        params.insert_opt("ts", self.shipping);
        params.insert_opt("tt", self.tax);
        params.insert_opt("cu", self.currency_code.as_deref());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTracking {
    pub general: GeneralParameters,
    pub transaction_id: String,
    pub name: String,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    /// SKU (`ic`).
    pub code: Option<String>,
    pub category: Option<String>,
    pub currency_code: Option<String>,
}

impl ItemTracking {
    pub fn new(transaction_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64, quantity: i64) -> Self {
        self.price = Some(price);
        self.quantity = Some(quantity);
        self
    }
}

impl HitParameters for ItemTracking {
    fn hit_type(&self) -> HitType {
        HitType::Item
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        params.insert("ti", self.transaction_id.as_str());
        params.insert("in", self.name.as_str());
        params.insert_opt("ip", self.price);
        params.insert_opt("iq", self.quantity);
        params.insert_opt("ic", self.code.as_deref());
        params.insert_opt("iv", self.category.as_deref());
        params.insert_opt("cu", self.currency_code.as_deref());
    }
}
