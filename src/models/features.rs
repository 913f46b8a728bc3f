//! Applicant feature record forwarded to every scorer.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Raw application data, named after the source dataset columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ApplicantFeatures {
    pub sk_id_curr: i64,
    pub amt_income_total: f64,
    pub amt_credit: f64,
    pub amt_annuity: f64,
    pub amt_goods_price: f64,
    /// Age in days, negative (days before application)
    pub days_birth: i64,
    /// Days before application that current employment started, non-positive
    pub days_employed: i64,
    pub code_gender: String,
    pub name_income_type: String,
    pub organization_type: String,
    pub ext_source_1: f64,
    pub ext_source_2: f64,
    pub ext_source_3: f64,
}

impl ApplicantFeatures {
    /// Reject malformed records before any scorer is called.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sk_id_curr <= 0 {
            return Err(invalid(format!(
                "SK_ID_CURR must be positive, got {}",
                self.sk_id_curr
            )));
        }

        let amounts = [
            ("AMT_INCOME_TOTAL", self.amt_income_total),
            ("AMT_CREDIT", self.amt_credit),
            ("AMT_ANNUITY", self.amt_annuity),
            ("AMT_GOODS_PRICE", self.amt_goods_price),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{} must be a positive amount, got {}", name, value)));
            }
        }

        if self.days_birth >= 0 {
            return Err(invalid(format!(
                "DAYS_BIRTH must be negative, got {}",
                self.days_birth
            )));
        }
        if self.days_employed > 0 {
            return Err(invalid(format!(
                "DAYS_EMPLOYED must not be positive, got {}",
                self.days_employed
            )));
        }

        let ext_sources = [
            ("EXT_SOURCE_1", self.ext_source_1),
            ("EXT_SOURCE_2", self.ext_source_2),
            ("EXT_SOURCE_3", self.ext_source_3),
        ];
        for (name, value) in ext_sources {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{} must be within [0, 1], got {}", name, value)));
            }
        }

        let categoricals = [
            ("CODE_GENDER", &self.code_gender),
            ("NAME_INCOME_TYPE", &self.name_income_type),
            ("ORGANIZATION_TYPE", &self.organization_type),
        ];
        for (name, value) in categoricals {
            if value.trim().is_empty() {
                return Err(invalid(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidFeatureInput(reason)
}
