//! End-to-end option sheet behavior over catalog-shaped payloads.

use mmtalk_commerce::prelude::*;
use serde_json::json;

fn product(name: &str) -> ProductSummary {
    ProductSummary::new(
        ProductNo::new(5001),
        name,
        ProductPricing::new(Money::won(34000), Money::won(6800)),
    )
}

fn schema(value: serde_json::Value) -> OptionSchema {
    let raw: RawOptionSchema = serde_json::from_value(value).unwrap();
    OptionSchema::from_raw(raw, Currency::KRW).unwrap()
}

fn nested_schema() -> OptionSchema {
    schema(json!({
        "type": "COMBINATION",
        "labels": ["사이즈", "색상"],
        "flatOptions": [],
        "multiLevelOptions": [
            {
                "value": "S",
                "isRequiredOption": false,
                "children": [
                    {"optionNo": 1, "value": "Red", "addPrice": 0, "buyPrice": 30000},
                    {"optionNo": 2, "value": "Blue", "addPrice": 1000, "buyPrice": 31000}
                ]
            },
            {
                "value": "M",
                "isRequiredOption": false,
                "children": [
                    {"optionNo": 3, "value": "Green", "addPrice": 0, "buyPrice": 30000},
                    {"optionNo": 4, "value": "Red", "addPrice": 500, "buyPrice": 30500}
                ]
            },
            {"value": "L", "isRequiredOption": false, "children": null}
        ]
    }))
}

fn required_schema() -> OptionSchema {
    schema(json!({
        "type": "REQUIRED",
        "labels": ["필수", "선택"],
        "multiLevelOptions": [
            {
                "value": "본품",
                "isRequiredOption": true,
                "children": [
                    {"optionNo": 11, "value": "Basic", "addPrice": 0, "buyPrice": 20000},
                    {"optionNo": 12, "value": "Pro", "addPrice": 5000, "buyPrice": 25000}
                ]
            },
            {
                "value": "추가",
                "isRequiredOption": false,
                "children": [
                    {"optionNo": 21, "value": "Case", "addPrice": 3000, "buyPrice": 3000},
                    {"optionNo": 22, "value": "Strap", "addPrice": -500, "buyPrice": 1500}
                ]
            }
        ]
    }))
}

fn flat_schema() -> OptionSchema {
    schema(json!({
        "type": "COMBINATION",
        "labels": ["색상"],
        "flatOptions": [
            {"optionNo": 31, "value": "Ivory", "addPrice": 0, "buyPrice": 12000},
            {"optionNo": 32, "value": "Black", "addPrice": 2000, "buyPrice": 14000}
        ],
        "multiLevelOptions": []
    }))
}

fn values(choices: &[ChoiceItem]) -> Vec<&str> {
    choices.iter().map(|c| c.value.as_str()).collect()
}

fn recomputed_total(session: &DetailSession) -> Money {
    session.lines().iter().fold(Money::zero(Currency::KRW), |acc, line| {
        acc + Money::won(line.unit_price.amount * line.quantity)
    })
}

#[test]
fn nested_combination_scenario() {
    let mut session =
        DetailSession::with_schema(product("Linen Shirt"), nested_schema(), SheetConfig::default());
    let mut cart = CartStore::default();
    session.dispatch(Intent::OpenSheet, &mut cart).unwrap();

    session
        .dispatch(Intent::PickFirst { value: "S".into() }, &mut cart)
        .unwrap();
    assert_eq!(values(&session.second_choices()), vec!["Red", "Blue"]);

    session
        .dispatch(Intent::PickSecond { value: "Blue".into() }, &mut cart)
        .unwrap();
    let lines = session.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].option_no, OptionNo::new(2));
    assert_eq!(lines[0].add_price, Money::won(1000));
    assert_eq!(lines[0].display_name, "S / Blue (+1,000원)");
    assert_eq!(lines[0].quantity, 1);

    session
        .dispatch(Intent::PickFirst { value: "S".into() }, &mut cart)
        .unwrap();
    session
        .dispatch(Intent::PickSecond { value: "Blue".into() }, &mut cart)
        .unwrap();
    let lines = session.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(session.total(), Money::won(62000));
}

#[test]
fn default_schema_scenario() {
    let default = schema(json!({
        "type": "DEFAULT",
        "labels": [],
        "flatOptions": [{"optionNo": 900, "value": "", "addPrice": 0, "buyPrice": 34000}],
        "multiLevelOptions": []
    }));
    let mut session =
        DetailSession::with_schema(product("Canvas Tote"), default, SheetConfig::default());
    let mut cart = CartStore::default();

    assert!(session.first_choices().is_empty());
    assert!(session.second_choices().is_empty());

    session.dispatch(Intent::OpenSheet, &mut cart).unwrap();
    assert_eq!(session.lines().len(), 1);
    assert_eq!(session.lines()[0].quantity, 1);
    assert_eq!(session.total(), Money::won(34000));

    session
        .dispatch(Intent::RemoveLine { option_no: OptionNo::new(900) }, &mut cart)
        .unwrap();
    assert_eq!(session.lines().len(), 1);
    assert_eq!(session.total(), Money::won(34000));
}

#[test]
fn merge_invariant_for_every_leaf() {
    for schema in [nested_schema(), required_schema(), flat_schema()] {
        let leaves: Vec<OptionLeaf> = schema.leaves().into_iter().cloned().collect();
        for leaf in leaves {
            let mut list = SelectionList::new(Currency::KRW);
            list.add_or_merge(&leaf, &leaf.value, None);
            list.add_or_merge(&leaf, &leaf.value, None);

            let matching: Vec<&SelectionLine> =
                list.lines().filter(|l| l.option_no == leaf.option_no).collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].quantity, 2);
        }
    }
}

#[test]
fn quantity_floor_holds() {
    let mut session =
        DetailSession::with_schema(product("Linen Shirt"), flat_schema(), SheetConfig::default());
    session.pick_first("Ivory");
    session.pick_first("Black");
    session.change_quantity(OptionNo::new(32), 4);

    for line in session.lines().iter().map(|l| l.option_no).collect::<Vec<_>>() {
        session.change_quantity(line, -1000);
    }
    assert!(session.lines().iter().all(|l| l.quantity == 1));
    assert_eq!(session.lines().len(), 2);
}

#[test]
fn total_tracks_every_mutation() {
    let mut session =
        DetailSession::with_schema(product("Speaker"), required_schema(), SheetConfig::default());
    let mut cart = CartStore::default();
    let steps = vec![
        Intent::PickFirst { value: "Basic".into() },
        Intent::PickSecond { value: "Case".into() },
        Intent::PickFirst { value: "Basic".into() },
        Intent::PickSecond { value: "Strap".into() },
        Intent::ChangeQuantity { option_no: OptionNo::new(21), delta: 3 },
        Intent::ChangeQuantity { option_no: OptionNo::new(11), delta: -5 },
        Intent::RemoveLine { option_no: OptionNo::new(22) },
        Intent::PickFirst { value: "Pro".into() },
    ];

    for step in steps {
        session.dispatch(step, &mut cart).unwrap();
        assert_eq!(session.total(), recomputed_total(&session));
        assert_eq!(session.pricing().total, session.total());
    }
    assert_eq!(session.total(), Money::won(20000 + 3000 * 4 + 25000));
}

#[test]
fn nested_second_choices_follow_pending_first() {
    let mut session =
        DetailSession::with_schema(product("Linen Shirt"), nested_schema(), SheetConfig::default());

    assert_eq!(values(&session.second_choices()), vec!["Red", "Blue", "Green"]);
    assert_eq!(values(&session.first_choices()), vec!["S", "M", "L"]);

    session.pick_first("M");
    assert_eq!(values(&session.second_choices()), vec!["Green", "Red"]);

    session.close_sheet();
    session.pick_first("L");
    assert!(session.second_choices().is_empty());
    assert_eq!(session.second_selector_gate(), SelectorGate::Hidden);
}

#[test]
fn resolver_is_deterministic() {
    let schema = nested_schema();
    for (first, second) in [("S", "Red"), ("S", "Blue"), ("M", "Green"), ("M", "Red")] {
        let a = schema.resolve(first, Some(second)).unwrap().option_no;
        let b = schema.resolve(first, Some(second)).unwrap().option_no;
        assert_eq!(a, b);
    }
}

#[test]
fn required_gate_tracks_required_lines() {
    let schema = required_schema();
    let required = schema.required_option_nos();
    let mut session =
        DetailSession::with_schema(product("Speaker"), schema, SheetConfig::default());

    let gated_matches = |session: &DetailSession| {
        let has_required = session.lines().iter().any(|l| required.contains(&l.option_no));
        session.is_second_gated() == !has_required
    };

    assert!(session.is_second_gated());
    assert!(gated_matches(&session));

    session.pick_first("Pro");
    assert!(gated_matches(&session));
    session.pick_second("Strap");
    assert!(gated_matches(&session));
    assert_eq!(session.lines()[1].display_name, "Strap (-500원)");

    session.remove_line(OptionNo::new(12));
    assert!(gated_matches(&session));
    assert!(session.is_second_gated());
    assert!(!session.can_confirm());
}

#[test]
fn sheet_reopen_preserves_selection() {
    let mut session =
        DetailSession::with_schema(product("Linen Shirt"), flat_schema(), SheetConfig::default());
    let mut cart = CartStore::default();

    session.dispatch(Intent::OpenSheet, &mut cart).unwrap();
    session
        .dispatch(Intent::PickFirst { value: "Black".into() }, &mut cart)
        .unwrap();
    session
        .dispatch(Intent::DragRelease { offset: 150.0, velocity: 0.0 }, &mut cart)
        .unwrap();
    assert_eq!(session.sheet_state(), SheetState::Closed);

    session.dispatch(Intent::OpenSheet, &mut cart).unwrap();
    assert_eq!(session.lines().len(), 1);
    assert_eq!(session.lines()[0].display_name, "Black (+2,000원)");

    session.dispatch(Intent::TapOverlay, &mut cart).unwrap();
    assert!(!session.sheet_state().is_open());
}

#[test]
fn confirm_moves_selection_into_cart() {
    let mut session =
        DetailSession::with_schema(product("Linen Shirt"), nested_schema(), SheetConfig::default());
    let mut cart = CartStore::default();

    session.dispatch(Intent::OpenSheet, &mut cart).unwrap();
    session.pick_first("S");
    session.pick_second("Red");
    session.pick_first("M");
    session.pick_second("Red");
    session.change_quantity(OptionNo::new(4), 1);

    let order = session.dispatch(Intent::Confirm, &mut cart).unwrap().unwrap();
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.total, Money::won(30000 + 30500 * 2));

    assert_eq!(cart.total_count(), 3);
    assert_eq!(cart.total_price().unwrap(), order.total);
    assert_eq!(cart.get(OptionNo::new(4)).unwrap().option_name, "M / Red (+500원)");
    assert!(session.lines().is_empty());
    assert!(!session.sheet_state().is_open());
}

#[test]
fn unavailable_schema_is_inert() {
    let mut session = DetailSession::new(product("Linen Shirt"), SheetConfig::default());
    session.mark_unavailable("catalog timed out");
    let mut cart = CartStore::default();

    session.dispatch(Intent::OpenSheet, &mut cart).unwrap();
    session
        .dispatch(Intent::PickFirst { value: "S".into() }, &mut cart)
        .unwrap();
    assert!(session.first_choices().is_empty());
    assert!(session.lines().is_empty());
    assert!(session.dispatch(Intent::Confirm, &mut cart).is_err());
    assert!(cart.is_empty());
}

#[test]
fn header_pricing_shows_discount() {
    let session = DetailSession::new(product("Linen Shirt"), SheetConfig::default());
    assert_eq!(session.header_pricing().discount_percent(), Some(20));
    assert_eq!(session.header_pricing().headline(), "20% 27,200원 (34,000원)");
}

#[test]
fn raised_ceiling_confirms_into_matching_cart() {
    let config = SheetConfig {
        max_quantity_per_line: 20000,
        ..SheetConfig::default()
    };
    let mut cart = CartStore::for_sheet(&config);
    let mut session = DetailSession::with_schema(product("Canvas Bag"), flat_schema(), config);

    session.open_sheet();
    assert!(session.pick_first("Ivory"));
    assert_eq!(session.change_quantity(OptionNo::new(31), 14999), Some(15000));
    assert!(session.can_confirm());

    let order = session.confirm(&mut cart).unwrap();
    assert_eq!(order.total, Money::won(180_000_000));
    assert_eq!(cart.get(OptionNo::new(31)).unwrap().quantity, 15000);
}
