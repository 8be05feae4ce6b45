//! 示例领域：以 Petri 网建模的三阶段结账流程。
//!
//! ```text
//! OrderStep1Place --step1_to_step2--> OrderStep2Place --step2_to_confirmed--> OrderConfirmedPlace
//! ```

pub mod model;
pub mod places;
pub mod transitions;

use crate::config::CheckoutConfig;
use crate::net::{Net, Transition, index_places, index_transitions};
use model::CheckoutToken;
use places::Stage;
use transitions::{Notes, TO_CONFIRMED, TO_PAYMENT, ToConfirmed, ToPayment};

pub type CheckoutNet = Net<CheckoutToken, Notes>;

/// Builds an empty checkout net with its two transitions.
pub fn checkout_net(config: &CheckoutConfig) -> CheckoutNet {
    let to_payment = Transition::new(
        TO_PAYMENT,
        config.priorities.to_payment,
        ToPayment {
            narrate: config.narrate,
        },
    );
    let to_confirmed = Transition::new(
        TO_CONFIRMED,
        config.priorities.to_confirmed,
        ToConfirmed {
            narrate: config.narrate,
            currency: config.currency(),
        },
    );
    Net::new(config.net_name.clone(), Notes::new())
        .with_places(index_places(Stage::ALL.map(Stage::empty_place)))
        .with_transitions(index_transitions([to_payment, to_confirmed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::model::{Address, Basket, PaymentMethod};
    use crate::checkout::places::{address_marker, basket_marker, payment_method_marker};
    use crate::net::{MarkingsByPlace, index_markers};

    fn seeded(config: &CheckoutConfig) -> CheckoutNet {
        let address = Address {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            street: "Main St".into(),
            street_no: "1".into(),
            country: "US".into(),
            phone: Some("555-0100".into()),
            apt_no: None,
        };
        checkout_net(config)
            .with_markings_by_place_id(MarkingsByPlace::from([(
                Stage::Step1.place_id().to_owned(),
                index_markers([
                    basket_marker("basket", Basket::default()),
                    address_marker("address", address),
                ]),
            )]))
            .with_added_markings_by_place_id(MarkingsByPlace::from([(
                Stage::Step2.place_id().to_owned(),
                index_markers([payment_method_marker(
                    "payment",
                    PaymentMethod { name: "card".into() },
                )]),
            )]))
    }

    fn history_ids(net: &CheckoutNet) -> Vec<String> {
        net.history()
            .to_vec_chronological()
            .into_iter()
            .map(|entry| entry.transition)
            .collect()
    }

    #[test]
    fn default_priorities_confirm_in_one_round() {
        let config = CheckoutConfig::default();
        let fired = seeded(&config).execute_transitions_by_priority();

        assert_eq!(history_ids(&fired), vec![TO_PAYMENT, TO_CONFIRMED]);
        assert_eq!(fired.last_version(), 2);
        assert_eq!(fired.computed_value().len(), 2);
        let confirmed = Stage::Confirmed.view(fired.places()).expect("confirmed");
        assert!(confirmed.confirmation().is_some());
        assert!(fired.places()[Stage::Step1.place_id()].is_empty());
        assert!(fired.places()[Stage::Step2.place_id()].is_empty());
    }

    #[test]
    fn inverted_priorities_need_a_second_round() {
        let mut config = CheckoutConfig::default();
        config.priorities.to_payment = 0;
        config.priorities.to_confirmed = 10;
        let net = seeded(&config);

        let first = net.execute_transitions_by_priority();
        assert_eq!(history_ids(&first), vec![TO_PAYMENT]);

        let settled = net.fire_until_stable(config.max_rounds).expect("settles");
        assert_eq!(settled.rounds, 3);
        assert_eq!(history_ids(&settled.net), vec![TO_PAYMENT, TO_CONFIRMED]);
    }

    #[test]
    fn quiet_config_keeps_notes_empty() {
        let config = CheckoutConfig {
            narrate: false,
            ..CheckoutConfig::default()
        };
        let fired = seeded(&config).execute_transitions_by_priority();
        assert!(fired.computed_value().is_empty());
        assert_eq!(fired.last_version(), 2);
    }

    #[test]
    fn reset_keeps_transitions_and_records_reset() {
        let fired = seeded(&CheckoutConfig::default()).execute_transitions_by_priority();
        let reset = fired.with_reset_markings(false);

        assert!(reset.places().values().all(|place| place.is_empty()));
        assert!(reset.computed_value().is_empty());
        assert_eq!(reset.transitions().len(), 2);
        assert_eq!(history_ids(&reset), vec![TO_PAYMENT, TO_CONFIRMED, "reset"]);
        assert_eq!(reset.last_version(), 3);
    }
}
