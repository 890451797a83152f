use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::PaymentMethod;

/// engine configuration: ledger labels, schedule defaults, matching tolerance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// revenue category for deposit payments
    pub deposit_category: String,
    /// revenue category for rent installments
    pub installment_category: String,
    /// method stamped on freshly generated obligations (editable later)
    pub default_method: PaymentMethod,
    /// fixed spacing between installments, independent of calendar months
    pub installment_interval_days: i64,
    /// amount tolerance when matching legacy ledger rows without a payment link
    pub revenue_match_tolerance: Money,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            deposit_category: "Cauções".to_string(),
            installment_category: "Mensalidades".to_string(),
            default_method: PaymentMethod::BankTransfer,
            installment_interval_days: 30,
            revenue_match_tolerance: Money::CENT,
        }
    }
}

impl BillingConfig {
    /// category label for an obligation kind
    pub fn category_for(&self, kind: crate::types::PaymentKind) -> &str {
        match kind {
            crate::types::PaymentKind::Deposit => &self.deposit_category,
            _ => &self.installment_category,
        }
    }
}
