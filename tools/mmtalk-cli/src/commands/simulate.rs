//! Replay an intent script against a detail session.

use std::path::Path;

use anyhow::{Context as _, Result};
use mmtalk_commerce::cart::{CartStore, SelectionPricing};
use mmtalk_commerce::checkout::OrderCandidate;
use mmtalk_commerce::sheet::{DetailSession, Intent};
use serde::{Deserialize, Serialize};

use super::SimulateArgs;
use crate::context::Context;

/// TOML form of a script: a list of `[[intent]]` tables.
#[derive(Deserialize)]
struct TomlScript {
    #[serde(default)]
    intent: Vec<Intent>,
}

/// Parse a script, JSON when the path ends in `.json`, TOML otherwise.
pub fn parse_script(path: &Path, content: &str) -> Result<Vec<Intent>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(content).context("Failed to parse JSON intent script")
    } else {
        let script: TomlScript =
            toml::from_str(content).context("Failed to parse TOML intent script")?;
        Ok(script.intent)
    }
}

#[derive(Debug, Serialize)]
struct Step {
    intent: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    refused: Option<String>,
    lines: usize,
    total: String,
}

#[derive(Serialize)]
struct SimulationReport {
    product_no: i64,
    schema: &'static str,
    steps: Vec<Step>,
    selection: SelectionPricing,
    can_confirm: bool,
    orders: Vec<OrderCandidate>,
    cart: CartStore,
}

/// Apply every intent in order. A refused intent is recorded and the
/// replay continues.
fn replay(
    session: &mut DetailSession,
    intents: Vec<Intent>,
    cart: &mut CartStore,
) -> (Vec<Step>, Vec<OrderCandidate>) {
    let mut steps = Vec::with_capacity(intents.len());
    let mut orders = Vec::new();

    for intent in intents {
        let name = intent.name();
        let refused = match session.dispatch(intent, &mut *cart) {
            Ok(Some(order)) => {
                orders.push(order);
                None
            }
            Ok(None) => None,
            Err(err) => Some(err.to_string()),
        };
        steps.push(Step {
            intent: name,
            refused,
            lines: session.selection().len(),
            total: session.total().display(),
        });
    }

    (steps, orders)
}

/// Run the simulate command.
pub async fn run(args: SimulateArgs, ctx: &Context) -> Result<()> {
    let script_path = ctx.resolve_path(&args.script);
    let content = std::fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read script: {}", script_path.display()))?;
    let intents = parse_script(&script_path, &content)?;
    ctx.output
        .debug(&format!("Loaded {} intents from {}", intents.len(), script_path.display()));

    let (client, product_no) = ctx.catalog_for_product(&args.source)?;
    let mut session = client
        .load_session(product_no, ctx.config.sheet.clone())
        .await
        .with_context(|| format!("Failed to load product {}", product_no))?;

    let mut cart = CartStore::for_sheet(&ctx.config.sheet);
    let (steps, orders) = replay(&mut session, intents, &mut cart);

    let report = SimulationReport {
        product_no: product_no.get(),
        schema: session.schema_state().as_str(),
        steps,
        selection: session.pricing(),
        can_confirm: session.can_confirm(),
        orders,
        cart,
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("{} (#{})", session.product().name, report.product_no));
    ctx.output.kv("schema", report.schema);

    ctx.output.info("");
    ctx.output.info("Steps");
    let total_steps = report.steps.len();
    for (i, step) in report.steps.iter().enumerate() {
        let detail = match &step.refused {
            Some(reason) => format!("{} (refused: {})", step.intent, reason),
            None => format!("{} -> {} lines, {}", step.intent, step.lines, step.total),
        };
        ctx.output.step(i + 1, total_steps, &detail);
    }

    ctx.output.info("");
    ctx.output.info("Selection");
    if report.selection.is_empty() {
        ctx.output.list_item("(empty)");
    }
    for line in &report.selection.lines {
        ctx.output.table_row(
            &[
                &line.display_name,
                &format!("x{}", line.quantity),
                &line.total.display(),
            ],
            &[32, 6, 12],
        );
    }
    ctx.output.kv("total", &report.selection.footer());
    ctx.output.kv("can confirm", &report.can_confirm.to_string());

    if !report.orders.is_empty() {
        ctx.output.success(&format!("{} order(s) confirmed", report.orders.len()));
    }

    ctx.output.info("");
    ctx.output.info("Cart");
    if report.cart.is_empty() {
        ctx.output.list_item("(empty)");
    }
    for item in report.cart.items() {
        ctx.output.table_row(
            &[
                &item.option_name,
                &format!("x{}", item.quantity),
                &item.line_total().display(),
            ],
            &[32, 6, 12],
        );
    }

    Ok(())
}
