use std::fs;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use pnflow::checkout::model::{
    Address, Basket, BasketLine, CheckoutToken, OrderConfirmation, PaymentMethod, Price,
};
use pnflow::checkout::places::{Stage, address_marker, basket_marker, payment_method_marker};
use pnflow::checkout::{CheckoutNet, checkout_net};
use pnflow::config::CheckoutConfig;
use pnflow::net::{HistoryEntry, MarkingsByPlace, index_markers};
use pnflow::options::Options;

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    net: &'a str,
    rounds: usize,
    version: u64,
    history: Vec<HistoryEntry>,
    notes: &'a [String],
    confirmations: Vec<&'a OrderConfirmation>,
}

fn demo_order(config: &CheckoutConfig) -> MarkingsByPlace<CheckoutToken> {
    let currency = config.currency();
    let basket = Basket {
        user_id: "demo-user".into(),
        lines: vec![
            BasketLine {
                line_no: 1,
                item: "PN-001".into(),
                description: "Place/transition primer".into(),
                quantity: 2,
                unit_price: Price::new(currency.clone(), 1250),
            },
            BasketLine {
                line_no: 2,
                item: "PN-002".into(),
                description: "Token stickers".into(),
                quantity: 5,
                unit_price: Price::new(currency, 199),
            },
        ],
    };
    let address = Address {
        first_name: "Carl Adam".into(),
        last_name: "Petri".into(),
        street: "Schlossstrasse".into(),
        street_no: "1".into(),
        country: "DE".into(),
        phone: None,
        apt_no: None,
    };

    MarkingsByPlace::from([
        (
            Stage::Step1.place_id().to_owned(),
            index_markers([
                basket_marker("basket-1", basket),
                address_marker("address-1", address),
            ]),
        ),
        (
            Stage::Step2.place_id().to_owned(),
            index_markers([payment_method_marker(
                "payment-1",
                PaymentMethod {
                    name: "invoice".into(),
                },
            )]),
        ),
    ])
}

fn print_history(net: &CheckoutNet) {
    for entry in net.history().to_vec_chronological() {
        println!("  {entry}");
    }
}

fn write_report(options: &Options, net: &CheckoutNet, rounds: usize) -> Result<()> {
    let Some(path) = options.output.as_ref() else {
        return Ok(());
    };
    let confirmations: Vec<&OrderConfirmation> = Stage::Confirmed
        .view(net.places())
        .map(|view| {
            view.place()
                .markings()
                .values()
                .filter_map(|marker| marker.value().as_order_confirmation())
                .collect()
        })
        .unwrap_or_default();
    let report = RunReport {
        net: net.identifier(),
        rounds,
        version: net.last_version(),
        history: net.history().to_vec_chronological(),
        notes: net.computed_value(),
        confirmations,
    };
    let content = serde_json::to_string_pretty(&report)?;
    fs::write(path, content).with_context(|| format!("Failed to write report: {:?}", path))?;
    info!("run report written to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    if std::env::var("PNFLOW_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("PNFLOW_LOG")
            .write_style("PNFLOW_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let options = Options::parse_from_args(&args).map_err(|e| anyhow::anyhow!("{e}"))?;
    debug!("pn-checkout options: {:?}", options);

    let mut config = CheckoutConfig::load_from_file(&options.config)?;
    if let Some(max_rounds) = options.max_rounds {
        config.max_rounds = max_rounds;
    }
    if options.keep_history {
        config.reset_history = false;
    }
    debug!("pn-checkout config: {:?}", config);

    let net = checkout_net(&config).with_added_markings_by_place_id(demo_order(&config));
    info!(
        "net {} seeded with {} markers",
        net.identifier(),
        net.places().values().map(|place| place.len()).sum::<usize>()
    );

    let settled = net.fire_until_stable(config.max_rounds)?;
    println!("settled after {} rounds", settled.rounds);
    print!("{}", settled.net);
    println!("history:");
    print_history(&settled.net);
    for note in settled.net.computed_value() {
        println!("  note: {note}");
    }

    write_report(&options, &settled.net, settled.rounds)?;

    let reset = settled.net.with_reset_markings(config.reset_history);
    println!("after reset:");
    print!("{reset}");
    print_history(&reset);
    Ok(())
}
