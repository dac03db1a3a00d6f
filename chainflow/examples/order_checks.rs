//! A small order-validation chain: straight checks, an exclusive
//! conditional group, a retry-style loop, and a short-circuiting failure.
//!
//! Run with `cargo run --example order_checks`.

use chainflow::prelude::*;
use tracing::Level;

#[derive(Debug)]
struct Order {
    customer: String,
    items: u32,
    total_cents: i64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let order = Order {
        customer: "Tom".to_string(),
        items: 3,
        total_cents: 12_50,
    };

    let mut flow = FlowBuilder::<Order, Verdict>::new("order-checks")
        .on_begin(|label, order: &Order| {
            tracing::info!(node = %label, customer = %order.customer, "starting");
        })
        .step("non-empty", |o| {
            if o.items == 0 {
                Some(Verdict::fail(400, "order has no items"))
            } else {
                Some(Verdict::ok())
            }
        })
        .when(
            "large-order",
            |o: &Order| o.total_cents >= 100_00,
            vec![action(|o: &Order| {
                tracing::info!(total = o.total_cents, "applying bulk discount");
                Some(Verdict::ok())
            })],
        )?
        .otherwise(
            "small-order",
            vec![action(|_: &Order| {
                tracing::info!("no discount");
                Some(Verdict::ok())
            })],
        )?
        .repeat(
            "notify",
            3,
            vec![action(|o: &Order| {
                tracing::info!(customer = %o.customer, "sending notification attempt");
                Some(Verdict::ok())
            })],
        )?
        .step("charge", |o| {
            if o.total_cents < 20_00 {
                Some(Verdict::fail(402, "below card minimum"))
            } else {
                Some(Verdict::ok())
            }
        })
        .step("ship", |_| {
            tracing::info!("shipping");
            Some(Verdict::ok())
        })
        .with_end_hook(tracing_end_hook::<Order, Verdict>(Level::DEBUG))?
        .build()?;

    let outcome = flow.run(&order, Verdict::ok())?;
    println!("final outcome: {outcome}");

    Ok(())
}
