//! 结账迁移：阶段之间搬运标记并生成订单确认.
use crate::checkout::model::{CheckoutToken, Currency, OrderConfirmation};
use crate::checkout::places::{Stage, confirmation_marker};
use crate::net::{Executor, Outcome, Places, index_markers};

/// Computed value of the checkout net: human readable notes, one per firing.
pub type Notes = Vec<String>;

pub const TO_PAYMENT: &str = "step1_to_step2";
pub const TO_CONFIRMED: &str = "step2_to_confirmed";

/// Moves basket and address from step 1 into step 2.
#[derive(Debug, Clone)]
pub struct ToPayment {
    pub narrate: bool,
}

impl Executor<CheckoutToken, Notes> for ToPayment {
    fn execute(
        &self,
        places: Places<CheckoutToken>,
        computed: Notes,
    ) -> Outcome<CheckoutToken, Notes> {
        let (Some(step1), Some(step2)) = (Stage::Step1.view(&places), Stage::Step2.view(&places))
        else {
            return Outcome::unchanged(places, computed);
        };
        let (Some((basket, _)), Some((address, _))) = (step1.basket(), step1.address()) else {
            return Outcome::unchanged(places, computed);
        };

        let drained = step1
            .place()
            .without_markers([basket.identifier(), address.identifier()]);
        let filled = step2
            .place()
            .with_added_markings(index_markers([basket.clone(), address.clone()]));

        let mut next = places.clone();
        next.insert(Stage::Step1.place_id().to_owned(), drained);
        next.insert(Stage::Step2.place_id().to_owned(), filled);

        let mut computed = computed;
        if self.narrate {
            computed.push(format!(
                "Transitioned from {} to {}, using and creating 2 markers each.",
                Stage::Step1,
                Stage::Step2
            ));
        }
        Outcome::new(next, computed, 2, 2)
    }
}

/// Turns a paid-for step 2 into a confirmed order.
#[derive(Debug, Clone)]
pub struct ToConfirmed {
    pub narrate: bool,
    pub currency: Currency,
}

impl Executor<CheckoutToken, Notes> for ToConfirmed {
    fn execute(
        &self,
        places: Places<CheckoutToken>,
        computed: Notes,
    ) -> Outcome<CheckoutToken, Notes> {
        let (Some(step2), Some(confirmed)) =
            (Stage::Step2.view(&places), Stage::Confirmed.view(&places))
        else {
            return Outcome::unchanged(places, computed);
        };
        let (Some((basket_marker, basket)), Some((address, _)), Some((payment, _))) =
            (step2.basket(), step2.address(), step2.payment_method())
        else {
            return Outcome::unchanged(places, computed);
        };

        let order_id = format!("order-{}", basket_marker.identifier());
        let confirmation = confirmation_marker(
            format!("confirmation-{}", basket_marker.identifier()),
            OrderConfirmation {
                user_id: basket.user_id.clone(),
                order_id: order_id.clone(),
                total: basket.total(&self.currency),
            },
        );

        let moved = [
            basket_marker.identifier(),
            address.identifier(),
            payment.identifier(),
        ];
        let drained = step2.place().without_markers(moved);
        let filled = confirmed.place().with_added_markings(index_markers([
            basket_marker.clone(),
            address.clone(),
            payment.clone(),
            confirmation,
        ]));

        let mut next = places.clone();
        next.insert(Stage::Step2.place_id().to_owned(), drained);
        next.insert(Stage::Confirmed.place_id().to_owned(), filled);

        let mut computed = computed;
        if self.narrate {
            computed.push(format!(
                "Confirmed {order_id} from {}, using 3 markers and creating 4.",
                Stage::Step2
            ));
        }
        Outcome::new(next, computed, 3, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::model::{Address, Basket, PaymentMethod};
    use crate::checkout::places::{
        CheckoutMarker, address_marker, basket_marker, payment_method_marker,
    };
    use crate::net::index_places;

    fn address() -> Address {
        Address {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            street: "St James's Square".into(),
            street_no: "12".into(),
            country: "GB".into(),
            phone: None,
            apt_no: None,
        }
    }

    fn stages() -> Places<CheckoutToken> {
        index_places(Stage::ALL.map(Stage::empty_place))
    }

    fn with_markers(
        places: &Places<CheckoutToken>,
        stage: Stage,
        markers: Vec<CheckoutMarker>,
    ) -> Places<CheckoutToken> {
        let mut next = places.clone();
        let place = next[stage.place_id()].with_added_markings(index_markers(markers));
        next.insert(stage.place_id().to_owned(), place);
        next
    }

    #[test]
    fn to_payment_moves_basket_and_address() {
        let places = with_markers(
            &stages(),
            Stage::Step1,
            vec![
                basket_marker("b", Basket::default()),
                address_marker("a", address()),
            ],
        );

        let outcome = ToPayment { narrate: true }.execute(places, Notes::new());
        assert_eq!((outcome.consumed, outcome.created), (2, 2));
        assert!(outcome.places[Stage::Step1.place_id()].is_empty());
        let step2 = &outcome.places[Stage::Step2.place_id()];
        assert!(step2.contains("b") && step2.contains("a"));
        assert_eq!(outcome.computed.len(), 1);
    }

    #[test]
    fn to_payment_leaves_unrelated_markers_in_step1() {
        let places = with_markers(
            &stages(),
            Stage::Step1,
            vec![
                basket_marker("b", Basket::default()),
                address_marker("a", address()),
                payment_method_marker("p", PaymentMethod { name: "card".into() }),
            ],
        );
        let before: usize = places.values().map(|place| place.len()).sum();

        let outcome = ToPayment { narrate: false }.execute(places, Notes::new());
        let after: usize = outcome.places.values().map(|place| place.len()).sum();

        assert_eq!((outcome.consumed, outcome.created), (2, 2));
        assert_eq!(before - outcome.consumed + outcome.created, after);
        let step1 = &outcome.places[Stage::Step1.place_id()];
        assert_eq!(step1.len(), 1);
        assert!(step1.contains("p"));
        let step2 = &outcome.places[Stage::Step2.place_id()];
        assert!(step2.contains("b") && step2.contains("a") && !step2.contains("p"));
    }

    #[test]
    fn to_payment_waits_for_address() {
        let places = with_markers(
            &stages(),
            Stage::Step1,
            vec![basket_marker("b", Basket::default())],
        );

        let outcome = ToPayment { narrate: true }.execute(places, Notes::new());
        assert!(!outcome.changed());
        assert!(outcome.computed.is_empty());
        assert!(outcome.places[Stage::Step1.place_id()].contains("b"));
    }

    #[test]
    fn to_confirmed_creates_confirmation() {
        let basket = Basket {
            user_id: "user-7".into(),
            lines: Vec::new(),
        };
        let places = with_markers(
            &stages(),
            Stage::Step2,
            vec![
                basket_marker("b", basket),
                address_marker("a", address()),
                payment_method_marker("p", PaymentMethod { name: "invoice".into() }),
            ],
        );

        let outcome = ToConfirmed {
            narrate: false,
            currency: Currency::euro(),
        }
        .execute(places, Notes::new());

        assert_eq!((outcome.consumed, outcome.created), (3, 4));
        assert!(outcome.places[Stage::Step2.place_id()].is_empty());
        assert!(outcome.computed.is_empty());
        let view = Stage::Confirmed.view(&outcome.places).expect("confirmed place");
        let (marker, confirmation) = view.confirmation().expect("confirmation marker");
        assert_eq!(marker.identifier(), "confirmation-b");
        assert_eq!(confirmation.order_id, "order-b");
        assert_eq!(confirmation.user_id, "user-7");
        assert_eq!(confirmation.total.currency.code, "EUR");
    }

    #[test]
    fn to_confirmed_needs_payment_method() {
        let places = with_markers(
            &stages(),
            Stage::Step2,
            vec![
                basket_marker("b", Basket::default()),
                address_marker("a", address()),
            ],
        );

        let outcome = ToConfirmed {
            narrate: true,
            currency: Currency::euro(),
        }
        .execute(places, Notes::new());
        assert!(!outcome.changed());
        assert_eq!(outcome.places[Stage::Step2.place_id()].len(), 2);
    }
}
