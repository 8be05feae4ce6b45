//! 结账各阶段库所及其类型化只读视图.
use std::fmt;

use crate::checkout::model::{
    Address, Basket, CheckoutToken, OrderConfirmation, PaymentMethod,
};
use crate::net::{Marker, Place, Places};

pub type CheckoutMarker = Marker<CheckoutToken>;
pub type CheckoutPlace = Place<CheckoutToken>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Basket and delivery address collected.
    Step1,
    /// Payment method chosen.
    Step2,
    Confirmed,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Step1, Stage::Step2, Stage::Confirmed];

    pub const fn place_id(self) -> &'static str {
        match self {
            Stage::Step1 => "OrderStep1Place",
            Stage::Step2 => "OrderStep2Place",
            Stage::Confirmed => "OrderConfirmedPlace",
        }
    }

    pub fn empty_place(self) -> CheckoutPlace {
        Place::new(self.place_id())
    }

    pub fn view(self, places: &Places<CheckoutToken>) -> Option<StageView<'_>> {
        places.get(self.place_id()).map(|place| StageView { stage: self, place })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.place_id())
    }
}

/// Typed accessors over the generic marker mapping of one stage place.
#[derive(Debug, Clone, Copy)]
pub struct StageView<'a> {
    stage: Stage,
    place: &'a CheckoutPlace,
}

impl<'a> StageView<'a> {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn place(&self) -> &'a CheckoutPlace {
        self.place
    }

    fn find<T>(
        &self,
        narrow: impl Fn(&CheckoutToken) -> Option<&T>,
    ) -> Option<(&'a CheckoutMarker, &'a T)> {
        self.place
            .markings()
            .values()
            .find_map(|marker| narrow(marker.value()).map(|value| (marker, value)))
    }

    pub fn basket(&self) -> Option<(&'a CheckoutMarker, &'a Basket)> {
        self.find(CheckoutToken::as_basket)
    }

    pub fn address(&self) -> Option<(&'a CheckoutMarker, &'a Address)> {
        self.find(CheckoutToken::as_address)
    }

    pub fn payment_method(&self) -> Option<(&'a CheckoutMarker, &'a PaymentMethod)> {
        self.find(CheckoutToken::as_payment_method)
    }

    pub fn confirmation(&self) -> Option<(&'a CheckoutMarker, &'a OrderConfirmation)> {
        self.find(CheckoutToken::as_order_confirmation)
    }
}

pub fn basket_marker(identifier: impl Into<String>, basket: Basket) -> CheckoutMarker {
    Marker::new(identifier, CheckoutToken::Basket(basket))
}

pub fn address_marker(identifier: impl Into<String>, address: Address) -> CheckoutMarker {
    Marker::new(identifier, CheckoutToken::Address(address))
}

pub fn payment_method_marker(
    identifier: impl Into<String>,
    method: PaymentMethod,
) -> CheckoutMarker {
    Marker::new(identifier, CheckoutToken::PaymentMethod(method))
}

pub fn confirmation_marker(
    identifier: impl Into<String>,
    confirmation: OrderConfirmation,
) -> CheckoutMarker {
    Marker::new(identifier, CheckoutToken::OrderConfirmation(confirmation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{index_markers, index_places};

    #[test]
    fn view_finds_markers_by_kind() {
        let step1 = Stage::Step1.empty_place().with_added_markings(index_markers([
            basket_marker("basket-1", Basket::default()),
            payment_method_marker("pm-1", PaymentMethod { name: "card".into() }),
        ]));
        let places = index_places([step1, Stage::Step2.empty_place()]);

        let view = Stage::Step1.view(&places).expect("step 1 present");
        assert_eq!(view.basket().map(|(marker, _)| marker.identifier()), Some("basket-1"));
        assert_eq!(view.payment_method().map(|(_, pm)| pm.name.as_str()), Some("card"));
        assert!(view.address().is_none());
        assert!(view.confirmation().is_none());
        assert!(Stage::Confirmed.view(&places).is_none());
    }
}
