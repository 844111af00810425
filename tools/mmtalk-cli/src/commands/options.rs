//! Show the selectors a product's option schema produces.

use anyhow::{Context as _, Result};
use mmtalk_commerce::catalog::{ChoiceItem, OptionSchema};
use mmtalk_commerce::sheet::{DetailSession, SchemaState, SelectorGate};
use serde::Serialize;

use super::OptionsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct OptionsReport<'a> {
    product_no: i64,
    product_name: &'a str,
    headline: String,
    schema: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unavailable_reason: Option<&'a str>,
    first_label: Option<&'a str>,
    second_label: Option<&'a str>,
    first_choices: Vec<ChoiceItem>,
    second_choices: Vec<ChoiceItem>,
    second_gate: SelectorGate,
}

/// Run the options command.
pub async fn run(args: OptionsArgs, ctx: &Context) -> Result<()> {
    let (client, product_no) = ctx.catalog_for_product(&args.source)?;
    let session = client
        .load_session(product_no, ctx.config.sheet.clone())
        .await
        .with_context(|| format!("Failed to load product {}", product_no))?;

    let report = build_report(&session, args.first.as_deref());

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("{} (#{})", report.product_name, report.product_no));
    ctx.output.kv("price", &report.headline);
    ctx.output.kv("schema", report.kind.unwrap_or(report.schema));

    if let Some(reason) = report.unavailable_reason {
        ctx.output.warn(&format!("Options unavailable: {}", reason));
        return Ok(());
    }

    ctx.output.info("");
    ctx.output.info(report.first_label.unwrap_or("Options"));
    for choice in &report.first_choices {
        ctx.output.choice(choice);
    }

    if report.second_gate != SelectorGate::Hidden {
        ctx.output.info("");
        ctx.output.info(report.second_label.unwrap_or("Options"));
        if let SelectorGate::Disabled { prompt } = &report.second_gate {
            ctx.output.kv("gated", prompt);
        }
        for choice in &report.second_choices {
            ctx.output.choice(choice);
        }
    }

    Ok(())
}

fn build_report<'a>(session: &'a DetailSession, first: Option<&str>) -> OptionsReport<'a> {
    let schema = session.schema();
    let product = session.product();

    // Only nested second choices depend on the first-level value.
    let second_choices = match (schema, first) {
        (Some(schema), Some(first)) if schema.is_nested() => {
            schema.second_level_choices(Some(first))
        }
        _ => session.second_choices(),
    };
    let second_gate = if second_choices.is_empty() {
        SelectorGate::Hidden
    } else if session.is_second_gated() {
        SelectorGate::Disabled {
            prompt: session.config().required_prompt.clone(),
        }
    } else {
        SelectorGate::Enabled
    };

    OptionsReport {
        product_no: product.product_no.get(),
        product_name: &product.name,
        headline: session.header_pricing().headline(),
        schema: session.schema_state().as_str(),
        kind: schema.map(|schema| schema.kind().as_str()),
        unavailable_reason: match session.schema_state() {
            SchemaState::Unavailable(reason) => Some(reason.as_str()),
            _ => None,
        },
        first_label: schema.and_then(OptionSchema::first_label),
        second_label: schema.and_then(OptionSchema::second_label),
        first_choices: session.first_choices(),
        second_choices,
        second_gate,
    }
}
