//! Fee request model.
//!
//! This module defines the inputs to a single fee calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::INTERNATIONAL_SURCHARGE;
use crate::error::{EngineError, EngineResult};

/// The inputs to one fee calculation.
///
/// # Example
///
/// ```
/// use fee_engine::models::FeeRequest;
/// use rust_decimal::Decimal;
///
/// let request = FeeRequest::new(true, "electronics", Decimal::from(200))
///     .with_shipping(Decimal::from(10));
/// assert_eq!(request.gross(), Decimal::from(210));
/// assert!(!request.international);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRequest {
    /// Whether the seller holds a store subscription.
    pub store: bool,
    /// The marketplace category key (unknown keys price as `"most"`).
    pub category: String,
    /// The item price charged to the buyer.
    pub price: Decimal,
    /// The shipping charged to the buyer.
    #[serde(default)]
    pub shipping: Decimal,
    /// Whether the buyer is outside the seller's country.
    #[serde(default)]
    pub international: bool,
}

impl FeeRequest {
    /// Creates a domestic request with no shipping charge.
    pub fn new(store: bool, category: impl Into<String>, price: Decimal) -> Self {
        Self {
            store,
            category: category.into(),
            price,
            shipping: Decimal::ZERO,
            international: false,
        }
    }

    /// Sets the shipping charged to the buyer.
    pub fn with_shipping(mut self, shipping: Decimal) -> Self {
        self.shipping = shipping;
        self
    }

    /// Marks the sale as international (or domestic).
    pub fn with_international(mut self, international: bool) -> Self {
        self.international = international;
        self
    }

    /// Returns the amount fees are charged on: price plus shipping.
    ///
    /// # Panics
    ///
    /// Panics if the sum overflows `Decimal`; [`validate`](Self::validate)
    /// rejects such requests.
    pub fn gross(&self) -> Decimal {
        self.price + self.shipping
    }

    /// Rejects negative price or shipping, and amounts too large to price.
    ///
    /// The calculator itself does not call this: negative amounts flow
    /// through the arithmetic unchanged. Front ends that take user input
    /// validate first.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [("price", self.price), ("shipping", self.shipping)] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        // Fees never exceed the gross plus the surcharge on it.
        let fits = self
            .price
            .checked_add(self.shipping)
            .and_then(|gross| gross.checked_mul(Decimal::ONE + INTERNATIONAL_SURCHARGE))
            .is_some();
        if !fits {
            return Err(EngineError::AmountOutOfRange {
                price: self.price.to_string(),
                shipping: self.shipping.to_string(),
            });
        }

        Ok(())
    }
}
