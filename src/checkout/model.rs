//! 结账流程的领域值类型与标记负载.
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub street_no: String,
    pub country: String,
    pub phone: Option<String>,
    pub apt_no: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    /// Digits after the decimal point; amounts are stored in minor units.
    pub decimal_shift_places: u32,
}

impl Currency {
    pub fn euro() -> Self {
        Self {
            code: "EUR".into(),
            symbol: "€".into(),
            decimal_shift_places: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PriceAdjustment {
    Amount { code: String, minor_units: i64 },
    Percentage { code: String, percent: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price {
    pub currency: Currency,
    pub minor_units: i64,
    pub includes_vat: bool,
    pub adjustments: Vec<PriceAdjustment>,
}

impl Price {
    pub fn new(currency: Currency, minor_units: i64) -> Self {
        Self {
            currency,
            minor_units,
            includes_vat: true,
            adjustments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasketLine {
    pub line_no: u32,
    pub item: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Price,
}

impl BasketLine {
    pub fn line_sum(&self) -> i64 {
        self.unit_price.minor_units * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Basket {
    pub user_id: String,
    pub lines: Vec<BasketLine>,
}

impl Basket {
    pub fn total_minor_units(&self) -> i64 {
        self.lines.iter().map(BasketLine::line_sum).sum()
    }

    /// Total in the currency of the first line, or `fallback` for an empty
    /// basket.
    pub fn total(&self, fallback: &Currency) -> Price {
        let currency = self
            .lines
            .first()
            .map_or(fallback, |line| &line.unit_price.currency);
        Price::new(currency.clone(), self.total_minor_units())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub user_id: String,
    pub order_id: String,
    pub total: Price,
}

/// Payload of every marker in the checkout net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckoutToken {
    Basket(Basket),
    Address(Address),
    PaymentMethod(PaymentMethod),
    OrderConfirmation(OrderConfirmation),
}

impl CheckoutToken {
    pub fn as_basket(&self) -> Option<&Basket> {
        match self {
            Self::Basket(basket) => Some(basket),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(address) => Some(address),
            _ => None,
        }
    }

    pub fn as_payment_method(&self) -> Option<&PaymentMethod> {
        match self {
            Self::PaymentMethod(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_order_confirmation(&self) -> Option<&OrderConfirmation> {
        match self {
            Self::OrderConfirmation(confirmation) => Some(confirmation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basket_total_sums_lines() {
        let line = |line_no: u32, quantity: u32, cents: i64| BasketLine {
            line_no,
            item: format!("sku-{line_no}"),
            description: String::new(),
            quantity,
            unit_price: Price::new(Currency::euro(), cents),
        };
        let basket = Basket {
            user_id: "u-1".into(),
            lines: vec![line(1, 2, 450), line(2, 1, 1999)],
        };
        assert_eq!(basket.total_minor_units(), 2899);
    }

    #[test]
    fn token_narrowing() {
        let token = CheckoutToken::PaymentMethod(PaymentMethod {
            name: "card".into(),
        });
        assert!(token.as_basket().is_none());
        assert_eq!(token.as_payment_method().map(|m| m.name.as_str()), Some("card"));
    }
}
