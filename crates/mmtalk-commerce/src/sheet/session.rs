//! Product detail session: the option sheet driven by shopper intents.
//!
//! A session owns one product's schema snapshot, the shopper's selection
//! lines, the pending selector picks and the sheet state. Every change
//! arrives as an [`Intent`] or as a fresh schema snapshot; derived values
//! (choices, gating, totals) are recomputed from that state on each read.

use crate::cart::{SelectionLine, SelectionList, SelectionPricing};
use crate::catalog::{
    ChoiceItem, OptionSchema, ProductPricing, ProductSummary, RawOptionSchema, SelectorSlot,
};
use crate::checkout::{OrderCandidate, OrderSink};
use crate::config::SheetConfig;
use crate::error::CommerceError;
use crate::ids::OptionNo;
use crate::money::Money;
use crate::sheet::state::{DragRelease, SheetState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Whether the option schema can be used yet.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaState {
    /// Still being fetched; selectors show placeholders only.
    Loading,
    Ready(OptionSchema),
    /// Fetch or normalization failed; selectors stay empty.
    Unavailable(String),
}

impl SchemaState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaState::Loading => "loading",
            SchemaState::Ready(_) => "ready",
            SchemaState::Unavailable(_) => "unavailable",
        }
    }
}

/// How the second selector should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum SelectorGate {
    /// No second-level choices to show.
    Hidden,
    /// Visible but not interactive until a required option is chosen.
    Disabled { prompt: String },
    Enabled,
}

/// A discrete shopper action against the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    OpenSheet,
    CloseSheet,
    TapOverlay,
    DragRelease { offset: f64, velocity: f64 },
    ToggleFirstSelector,
    ToggleSecondSelector,
    PickFirst { value: String },
    PickSecond { value: String },
    ChangeQuantity { option_no: OptionNo, delta: i64 },
    RemoveLine { option_no: OptionNo },
    Confirm,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::OpenSheet => "open_sheet",
            Intent::CloseSheet => "close_sheet",
            Intent::TapOverlay => "tap_overlay",
            Intent::DragRelease { .. } => "drag_release",
            Intent::ToggleFirstSelector => "toggle_first_selector",
            Intent::ToggleSecondSelector => "toggle_second_selector",
            Intent::PickFirst { .. } => "pick_first",
            Intent::PickSecond { .. } => "pick_second",
            Intent::ChangeQuantity { .. } => "change_quantity",
            Intent::RemoveLine { .. } => "remove_line",
            Intent::Confirm => "confirm",
        }
    }
}

enum Lookup<'a> {
    /// A single-selector pick resolved within its own slot.
    Slot(SelectorSlot, &'a str),
    /// A two-level pick.
    Pair(&'a str, &'a str),
}

/// State of one product detail view.
#[derive(Debug, Clone)]
pub struct DetailSession {
    product: ProductSummary,
    schema: SchemaState,
    selection: SelectionList,
    pending_first: Option<String>,
    pending_second: Option<String>,
    sheet: SheetState,
    config: SheetConfig,
}

impl DetailSession {
    /// Start a session whose option schema is still loading.
    pub fn new(product: ProductSummary, config: SheetConfig) -> Self {
        let selection =
            SelectionList::new(config.currency).with_max_quantity(config.max_quantity_per_line);
        Self {
            product,
            schema: SchemaState::Loading,
            selection,
            pending_first: None,
            pending_second: None,
            sheet: SheetState::Closed,
            config,
        }
    }

    /// Start a session with its schema already loaded.
    pub fn with_schema(product: ProductSummary, schema: OptionSchema, config: SheetConfig) -> Self {
        let mut session = Self::new(product, config);
        session.load_schema(schema);
        session
    }

    // ---- schema arrival ----

    /// Install a fresh schema snapshot.
    ///
    /// Pending picks are reset; selection lines survive. A schema priced in
    /// a currency other than the configured one is rejected and the schema
    /// is marked unavailable.
    pub fn load_schema(&mut self, schema: OptionSchema) {
        let currency = self.config.currency;
        let foreign = schema
            .leaves()
            .iter()
            .flat_map(|leaf| [leaf.buy_price.currency, leaf.add_price.currency])
            .find(|c| *c != currency);
        if let Some(got) = foreign {
            let err = CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: got.code().to_string(),
            };
            self.mark_unavailable(err.to_string());
            return;
        }

        info!(
            product_no = %self.product.product_no,
            kind = %schema.kind(),
            "option schema loaded"
        );
        self.schema = SchemaState::Ready(schema);
        self.reset_pending();
        self.ensure_default_line();
    }

    /// Normalize and install a raw schema, or mark the schema unavailable.
    pub fn load_raw_schema(&mut self, raw: RawOptionSchema) {
        match OptionSchema::from_raw(raw, self.config.currency) {
            Ok(schema) => self.load_schema(schema),
            Err(err) => self.mark_unavailable(err.to_string()),
        }
    }

    /// Record that no schema can be shown for this product.
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(product_no = %self.product.product_no, reason = %reason, "option schema unavailable");
        self.schema = SchemaState::Unavailable(reason);
        self.reset_pending();
    }

    // ---- intents ----

    /// Apply an intent. Only [`Intent::Confirm`] produces an order.
    pub fn dispatch(
        &mut self,
        intent: Intent,
        sink: &mut dyn OrderSink,
    ) -> Result<Option<OrderCandidate>, CommerceError> {
        debug!(intent = intent.name(), "dispatch");
        match intent {
            Intent::OpenSheet => self.open_sheet(),
            Intent::CloseSheet | Intent::TapOverlay => self.close_sheet(),
            Intent::DragRelease { offset, velocity } => {
                self.release_drag(DragRelease { offset, velocity });
            }
            Intent::ToggleFirstSelector => self.toggle_first_selector(),
            Intent::ToggleSecondSelector => self.toggle_second_selector(),
            Intent::PickFirst { value } => {
                self.pick_first(&value);
            }
            Intent::PickSecond { value } => {
                self.pick_second(&value);
            }
            Intent::ChangeQuantity { option_no, delta } => {
                self.change_quantity(option_no, delta);
            }
            Intent::RemoveLine { option_no } => {
                self.remove_line(option_no);
            }
            Intent::Confirm => return self.confirm(sink).map(Some),
        }
        Ok(None)
    }

    pub fn open_sheet(&mut self) {
        self.sheet.open();
        self.ensure_default_line();
    }

    /// Close the sheet. Selection lines are kept for the next open.
    pub fn close_sheet(&mut self) {
        self.sheet.close();
    }

    /// Apply the drag-to-dismiss rule. Returns whether the sheet closed.
    pub fn release_drag(&mut self, release: DragRelease) -> bool {
        if !self.sheet.is_open() || !self.config.dismiss.should_dismiss(release) {
            return false;
        }
        self.sheet.close();
        true
    }

    pub fn toggle_first_selector(&mut self) {
        self.sheet.toggle_first();
    }

    /// Toggle the second selector unless it is hidden or gated.
    pub fn toggle_second_selector(&mut self) {
        if self.second_selector_gate() != SelectorGate::Enabled {
            debug!("second selector toggle ignored");
            return;
        }
        self.sheet.toggle_second();
    }

    /// Pick a first-level value. Returns whether a line was added or merged.
    pub fn pick_first(&mut self, value: &str) -> bool {
        self.sheet.collapse_selectors();
        let Some(schema) = self.schema() else {
            debug!(value, "pick ignored without schema");
            return false;
        };
        if schema.is_default() {
            return false;
        }

        let nested = schema.is_nested();
        self.pending_first = Some(value.to_string());
        if !nested {
            return self.try_add(Lookup::Slot(SelectorSlot::First, value));
        }
        match self.pending_second.clone() {
            Some(second) => self.try_add(Lookup::Pair(value, &second)),
            None => false,
        }
    }

    /// Pick a second-level value. Returns whether a line was added or merged.
    pub fn pick_second(&mut self, value: &str) -> bool {
        self.sheet.collapse_selectors();
        let Some(schema) = self.schema() else {
            debug!(value, "pick ignored without schema");
            return false;
        };
        let nested = schema.is_nested();
        if !nested && !matches!(schema, OptionSchema::RequiredOptional { .. }) {
            debug!(value, "schema has no second selector");
            return false;
        }
        if self.is_second_gated() {
            debug!(value, "pick ignored while required option is missing");
            return false;
        }

        self.pending_second = Some(value.to_string());
        if !nested {
            return self.try_add(Lookup::Slot(SelectorSlot::Second, value));
        }
        match self.pending_first.clone() {
            Some(first) => self.try_add(Lookup::Pair(&first, value)),
            None => false,
        }
    }

    /// Adjust a line's quantity. Returns the new quantity if the line exists.
    pub fn change_quantity(&mut self, option_no: OptionNo, delta: i64) -> Option<i64> {
        let quantity = self.selection.change_quantity(option_no, delta);
        if quantity.is_none() {
            debug!(option_no = %option_no, "quantity change for missing line");
        }
        quantity
    }

    /// Remove a line. Returns whether it was removed.
    ///
    /// Always `false` while a `DEFAULT` schema is active.
    pub fn remove_line(&mut self, option_no: OptionNo) -> bool {
        if !self.lines_removable() {
            debug!(option_no = %option_no, "removal ignored on default option");
            return false;
        }
        self.selection.remove(option_no)
    }

    /// Hand the selection to `sink`, then clear it and close the sheet.
    pub fn confirm(&mut self, sink: &mut dyn OrderSink) -> Result<OrderCandidate, CommerceError> {
        if let Some(reason) = self.confirm_blocker() {
            return Err(CommerceError::ConfirmNotAllowed(reason.to_string()));
        }

        let order = OrderCandidate::from_selection(self.product.product_no, &self.selection)?;
        sink.accept(&order, &self.product)?;
        info!(
            product_no = %order.product_no,
            lines = order.lines.len(),
            total = %order.total,
            "purchase confirmed"
        );

        self.selection.clear();
        self.reset_pending();
        self.sheet.close();
        Ok(order)
    }

    // ---- view ----

    pub fn product(&self) -> &ProductSummary {
        &self.product
    }

    pub fn header_pricing(&self) -> &ProductPricing {
        &self.product.pricing
    }

    pub fn schema_state(&self) -> &SchemaState {
        &self.schema
    }

    pub fn schema(&self) -> Option<&OptionSchema> {
        match &self.schema {
            SchemaState::Ready(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn sheet_state(&self) -> SheetState {
        self.sheet
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn pending_first(&self) -> Option<&str> {
        self.pending_first.as_deref()
    }

    pub fn pending_second(&self) -> Option<&str> {
        self.pending_second.as_deref()
    }

    /// First selector menu; empty until a schema is ready.
    pub fn first_choices(&self) -> Vec<ChoiceItem> {
        self.schema()
            .map(OptionSchema::first_level_choices)
            .unwrap_or_default()
    }

    /// Second selector menu, conditioned on the pending first pick.
    pub fn second_choices(&self) -> Vec<ChoiceItem> {
        self.schema()
            .map(|schema| schema.second_level_choices(self.pending_first.as_deref()))
            .unwrap_or_default()
    }

    /// First selector text: the pending pick, else the schema label.
    pub fn first_placeholder(&self) -> Option<&str> {
        self.pending_first
            .as_deref()
            .or_else(|| self.schema().and_then(OptionSchema::first_label))
    }

    /// Second selector text; the gate prompt replaces it while disabled.
    pub fn second_placeholder(&self) -> Option<&str> {
        match self.second_selector_gate() {
            SelectorGate::Hidden => None,
            SelectorGate::Disabled { .. } => Some(self.config.required_prompt.as_str()),
            SelectorGate::Enabled => self
                .pending_second
                .as_deref()
                .or_else(|| self.schema().and_then(OptionSchema::second_label)),
        }
    }

    /// Whether the optional selector is blocked on a required pick.
    ///
    /// True for a required/optional schema exactly when no selection line
    /// buys a required-group option.
    pub fn is_second_gated(&self) -> bool {
        match self.schema() {
            Some(schema @ OptionSchema::RequiredOptional { .. }) => !self
                .selection
                .contains_any(schema.required_option_nos().iter()),
            _ => false,
        }
    }

    pub fn second_selector_gate(&self) -> SelectorGate {
        if self.second_choices().is_empty() {
            return SelectorGate::Hidden;
        }
        if self.is_second_gated() {
            return SelectorGate::Disabled {
                prompt: self.config.required_prompt.clone(),
            };
        }
        SelectorGate::Enabled
    }

    pub fn selection(&self) -> &SelectionList {
        &self.selection
    }

    /// Selection lines in display order.
    pub fn lines(&self) -> Vec<&SelectionLine> {
        self.selection.lines().collect()
    }

    pub fn pricing(&self) -> SelectionPricing {
        self.selection.pricing()
    }

    pub fn total(&self) -> Money {
        self.selection.total()
    }

    /// Whether line removal controls should be shown.
    pub fn lines_removable(&self) -> bool {
        !self.schema().is_some_and(OptionSchema::is_default)
    }

    pub fn can_confirm(&self) -> bool {
        self.confirm_blocker().is_none()
    }

    fn confirm_blocker(&self) -> Option<&'static str> {
        let Some(schema) = self.schema() else {
            return Some("option schema is not available");
        };
        if self.selection.is_empty() {
            return Some("no option selected");
        }
        match schema {
            OptionSchema::RequiredOptional { .. } if self.is_second_gated() => {
                Some("a required option must be selected")
            }
            _ if schema.is_nested() && self.pending_first.is_some() => {
                Some("option pick is incomplete")
            }
            _ => None,
        }
    }

    // ---- internals ----

    fn try_add(&mut self, lookup: Lookup<'_>) -> bool {
        let SchemaState::Ready(schema) = &self.schema else {
            return false;
        };
        let resolved = match lookup {
            Lookup::Slot(slot, value) => schema.resolve_in(slot, value).map(|leaf| (leaf, value, None)),
            Lookup::Pair(first, second) => schema
                .resolve(first, Some(second))
                .map(|leaf| (leaf, first, Some(second))),
        };

        match resolved {
            Ok((leaf, first, second)) => {
                let quantity = self.selection.add_or_merge(leaf, first, second);
                debug!(option_no = %leaf.option_no, quantity, "option selected");
                self.reset_pending();
                true
            }
            Err(err) => {
                debug!(error = %err, "pick dropped");
                false
            }
        }
    }

    fn ensure_default_line(&mut self) {
        if !self.sheet.is_open() || !self.selection.is_empty() {
            return;
        }
        if let SchemaState::Ready(OptionSchema::Default { leaf }) = &self.schema {
            self.selection.add_fixed(leaf, &self.product.name);
            debug!(option_no = %leaf.option_no, "default option added");
        }
    }

    fn reset_pending(&mut self) {
        self.pending_first = None;
        self.pending_second = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::raw::{RawOptionLeaf, RawOptionNode};
    use crate::checkout::RecordingSink;
    use crate::ids::ProductNo;
    use crate::sheet::state::SelectorState;

    fn product() -> ProductSummary {
        ProductSummary::new(
            ProductNo::new(100),
            "Linen Shirt",
            ProductPricing::new(Money::won(34000), Money::won(6800)),
        )
    }

    fn leaf(option_no: i64, value: &str, add_price: i64) -> RawOptionLeaf {
        RawOptionLeaf {
            option_no,
            value: value.to_string(),
            add_price,
            buy_price: 30000 + add_price,
            ..Default::default()
        }
    }

    fn node(value: &str, required: bool, children: Vec<RawOptionLeaf>) -> RawOptionNode {
        RawOptionNode {
            value: value.to_string(),
            is_required_option: required,
            children,
            ..Default::default()
        }
    }

    fn raw(option_type: &str, flat: Vec<RawOptionLeaf>, nodes: Vec<RawOptionNode>) -> RawOptionSchema {
        RawOptionSchema {
            option_type: option_type.to_string(),
            labels: vec!["사이즈".to_string(), "색상".to_string()],
            flat_options: flat,
            multi_level_options: nodes,
        }
    }

    fn session(raw: RawOptionSchema) -> DetailSession {
        let mut session = DetailSession::new(product(), SheetConfig::default());
        session.load_raw_schema(raw);
        session
    }

    fn nested() -> DetailSession {
        session(raw(
            "COMBINATION",
            vec![],
            vec![
                node("S", false, vec![leaf(1, "Red", 0), leaf(2, "Blue", 1000)]),
                node("M", false, vec![leaf(3, "Red", 0)]),
            ],
        ))
    }

    fn required() -> DetailSession {
        session(raw(
            "REQUIRED",
            vec![],
            vec![
                node("본품", true, vec![leaf(11, "Basic", 0)]),
                node("추가", false, vec![leaf(21, "Case", 3000)]),
            ],
        ))
    }

    #[test]
    fn test_loading_session_has_no_choices() {
        let session = DetailSession::new(product(), SheetConfig::default());
        assert_eq!(session.schema_state(), &SchemaState::Loading);
        assert!(session.first_choices().is_empty());
        assert_eq!(session.second_selector_gate(), SelectorGate::Hidden);
        assert!(!session.can_confirm());
    }

    #[test]
    fn test_unknown_type_marks_unavailable() {
        let mut session = session(raw("BUNDLE", vec![], vec![]));
        assert!(matches!(session.schema_state(), SchemaState::Unavailable(_)));
        assert!(!session.pick_first("S"));
        assert!(session.first_choices().is_empty());
    }

    #[test]
    fn test_nested_pick_order_either_way() {
        let mut session = nested();
        assert!(!session.pick_second("Blue"));
        assert_eq!(session.pending_second(), Some("Blue"));
        assert!(session.pick_first("S"));

        let lines = session.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].display_name, "S / Blue (+1,000원)");
        assert_eq!(session.pending_first(), None);
        assert_eq!(session.pending_second(), None);
    }

    #[test]
    fn test_stale_second_keeps_pending() {
        let mut session = nested();
        session.pick_second("Blue");
        assert!(!session.pick_first("M"));
        assert_eq!(session.pending_first(), Some("M"));
        assert_eq!(session.pending_second(), Some("Blue"));
        assert!(session.lines().is_empty());
        assert!(!session.can_confirm());

        assert!(session.pick_second("Red"));
        assert_eq!(session.lines()[0].option_no, OptionNo::new(3));
    }

    #[test]
    fn test_dangling_first_blocks_confirm() {
        let mut session = nested();
        session.pick_first("S");
        session.pick_second("Red");
        assert!(session.can_confirm());

        session.pick_first("M");
        assert!(!session.can_confirm());
    }

    #[test]
    fn test_required_gate() {
        let mut session = required();
        assert_eq!(
            session.second_selector_gate(),
            SelectorGate::Disabled {
                prompt: crate::config::DEFAULT_REQUIRED_PROMPT.to_string()
            }
        );
        assert_eq!(session.second_placeholder(), Some(crate::config::DEFAULT_REQUIRED_PROMPT));
        assert!(!session.pick_second("Case"));
        assert!(session.lines().is_empty());

        assert!(session.pick_first("Basic"));
        assert_eq!(session.second_selector_gate(), SelectorGate::Enabled);
        assert_eq!(session.second_placeholder(), Some("색상"));
        assert!(session.pick_second("Case"));

        let names: Vec<&str> = session.lines().iter().map(|l| l.display_name.as_str()).collect();
        assert_eq!(names, vec!["Basic", "Case (+3,000원)"]);
        assert!(session.can_confirm());

        session.remove_line(OptionNo::new(11));
        assert!(session.is_second_gated());
        assert!(!session.can_confirm());
    }

    #[test]
    fn test_toggle_second_respects_gate() {
        let mut session = required();
        session.open_sheet();
        session.toggle_second_selector();
        assert_eq!(session.sheet_state(), SheetState::Open(SelectorState::Idle));

        session.toggle_first_selector();
        assert_eq!(session.sheet_state(), SheetState::Open(SelectorState::FirstOpen));
        session.pick_first("Basic");
        assert_eq!(session.sheet_state(), SheetState::Open(SelectorState::Idle));

        session.toggle_second_selector();
        assert_eq!(session.sheet_state(), SheetState::Open(SelectorState::SecondOpen));
    }

    #[test]
    fn test_default_auto_add_on_open() {
        let mut session = session(raw("DEFAULT", vec![leaf(9, "", 0)], vec![]));
        assert!(session.lines().is_empty());
        session.open_sheet();

        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.lines()[0].display_name, "Linen Shirt");
        assert!(!session.lines_removable());
        assert!(!session.remove_line(OptionNo::new(9)));
        assert!(session.can_confirm());
    }

    #[test]
    fn test_default_added_when_schema_arrives_open() {
        let mut session = DetailSession::new(product(), SheetConfig::default());
        session.open_sheet();
        assert!(session.lines().is_empty());
        session.load_raw_schema(raw("DEFAULT", vec![leaf(9, "", 0)], vec![]));
        assert_eq!(session.lines().len(), 1);
    }

    #[test]
    fn test_removal_follows_reloaded_variant() {
        let mut session = session(raw("DEFAULT", vec![leaf(9, "", 0)], vec![]));
        session.open_sheet();
        assert!(!session.lines_removable());

        session.load_raw_schema(raw("COMBINATION", vec![leaf(1, "Red", 0)], vec![]));
        assert!(session.lines_removable());
        assert!(session.pick_first("Red"));
        assert!(session.remove_line(OptionNo::new(1)));
        assert!(session.remove_line(OptionNo::new(9)));
        assert!(session.lines().is_empty());

        session.pick_first("Red");
        session.load_raw_schema(raw("DEFAULT", vec![leaf(9, "", 0)], vec![]));
        assert!(!session.lines_removable());
        assert!(!session.remove_line(OptionNo::new(1)));
        assert_eq!(session.lines().len(), 1);
    }

    #[test]
    fn test_schema_in_other_currency_is_unavailable() {
        let schema = OptionSchema::from_raw(
            raw("COMBINATION", vec![leaf(1, "Red", 0)], vec![]),
            crate::money::Currency::USD,
        )
        .unwrap();
        let mut session = DetailSession::with_schema(product(), schema, SheetConfig::default());

        match session.schema_state() {
            SchemaState::Unavailable(reason) => assert!(reason.contains("USD")),
            other => panic!("unexpected schema state: {other:?}"),
        }
        assert!(!session.pick_first("Red"));
        assert_eq!(session.total(), Money::won(0));
    }

    #[test]
    fn test_schema_reload_keeps_lines() {
        let mut session = nested();
        session.pick_first("S");
        session.pick_second("Red");
        session.pick_first("M");

        let schema = session.schema().cloned().unwrap();
        session.load_schema(schema);
        assert_eq!(session.pending_first(), None);
        assert_eq!(session.lines().len(), 1);
    }

    #[test]
    fn test_drag_release_threshold() {
        let mut session = nested();
        session.open_sheet();
        assert!(!session.release_drag(DragRelease { offset: 40.0, velocity: 120.0 }));
        assert!(session.sheet_state().is_open());
        assert!(session.release_drag(DragRelease { offset: 40.0, velocity: 800.0 }));
        assert!(!session.sheet_state().is_open());
    }

    #[test]
    fn test_confirm_hands_off_and_clears() {
        let mut session = nested();
        let mut sink = RecordingSink::default();
        session.dispatch(Intent::OpenSheet, &mut sink).unwrap();
        session
            .dispatch(Intent::PickFirst { value: "S".into() }, &mut sink)
            .unwrap();
        session
            .dispatch(Intent::PickSecond { value: "Blue".into() }, &mut sink)
            .unwrap();

        let order = session.dispatch(Intent::Confirm, &mut sink).unwrap().unwrap();
        assert_eq!(order.total, Money::won(31000));
        assert_eq!(sink.orders.len(), 1);
        assert!(session.lines().is_empty());
        assert!(!session.sheet_state().is_open());
    }

    #[test]
    fn test_confirm_refused_when_empty() {
        let mut session = nested();
        let mut sink = RecordingSink::default();
        let err = session.dispatch(Intent::Confirm, &mut sink).unwrap_err();
        assert!(matches!(err, CommerceError::ConfirmNotAllowed(_)));
        assert!(sink.orders.is_empty());
    }

    #[test]
    fn test_intent_serde_shape() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent": "change_quantity", "option_no": 2, "delta": -1}"#)
                .unwrap();
        assert_eq!(
            intent,
            Intent::ChangeQuantity {
                option_no: OptionNo::new(2),
                delta: -1
            }
        );
        let json = serde_json::to_value(Intent::PickFirst { value: "S".into() }).unwrap();
        assert_eq!(json["intent"], "pick_first");
    }
}
