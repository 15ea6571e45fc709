//! Editable landing-page content.
//!
//! Landing-page copy is stored in the `site_content` table as one JSON
//! document per `(section, content_key)` pair. The set of pairs is closed:
//! [`ContentSlot`] names every one of them, and [`SlotContent`] gives each a
//! concrete shape.
//!
//! Reads are lenient. A missing, malformed, or legacy document never fails a
//! render; the editor seeds a default skeleton and the public site falls
//! back to its built-in copy. Strict checks happen only when an admin saves
//! ([`SlotContent::validate`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of feature cards on the landing page.
pub const FEATURE_SLOTS: usize = 6;

/// Number of pricing plans on the landing page.
pub const PRICING_PLANS: usize = 3;

/// Errors raised at the content write boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The `(section, content_key)` pair is not one of the known slots.
    #[error("unknown content slot: {0}")]
    UnknownSlot(String),
    /// A fixed-size list has the wrong number of entries.
    #[error("{slot} requires exactly {expected} items, got {actual}")]
    WrongItemCount {
        slot: ContentSlot,
        expected: usize,
        actual: usize,
    },
    /// A list that must not be empty is empty.
    #[error("{slot} requires at least {min} item(s)")]
    TooFewItems { slot: ContentSlot, min: usize },
    /// The editor form could not be decoded.
    #[error("invalid editor form: {0}")]
    InvalidForm(String),
}

// =============================================================================
// Slots
// =============================================================================

/// One editable block of landing-page copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSlot {
    #[default]
    Hero,
    Features,
    Testimonials,
    Pricing,
}

impl ContentSlot {
    /// Every slot, in editor tab order.
    pub const ALL: [Self; 4] = [Self::Hero, Self::Features, Self::Testimonials, Self::Pricing];

    /// Value of the `section` column.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Features => "features",
            Self::Testimonials => "testimonials",
            Self::Pricing => "pricing",
        }
    }

    /// Value of the `content_key` column.
    #[must_use]
    pub const fn content_key(self) -> &'static str {
        match self {
            Self::Hero => "main",
            Self::Features | Self::Testimonials => "list",
            Self::Pricing => "plans",
        }
    }

    /// Editor tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Features => "Features",
            Self::Testimonials => "Testimonials",
            Self::Pricing => "Pricing",
        }
    }

    /// Look a slot up by its stored `(section, content_key)` pair.
    #[must_use]
    pub fn from_keys(section: &str, content_key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.section() == section && slot.content_key() == content_key)
    }

    /// Look a slot up by its section name (the editor's `tab` parameter).
    #[must_use]
    pub fn from_section(section: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.section() == section)
    }
}

impl std::str::FromStr for ContentSlot {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_section(s).ok_or_else(|| ContentError::UnknownSlot(s.to_owned()))
    }
}

impl fmt::Display for ContentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.section(), self.content_key())
    }
}

// =============================================================================
// Document shapes
// =============================================================================

/// `hero/main`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// One entry of `features/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
    /// Icon name, e.g. `Smartphone` or `Zap`.
    pub icon: String,
}

/// One entry of `testimonials/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialItem {
    pub name: String,
    /// Job title.
    pub title: String,
    pub company: String,
    pub review: String,
    /// Avatar image URL; empty means "render initials".
    pub avatar: String,
}

impl TestimonialItem {
    /// Up to two uppercase initials from the reviewer's name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// One entry of `pricing/plans`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPlan {
    pub name: String,
    pub description: String,
    #[serde(rename = "monthlyPrice", deserialize_with = "string_or_number")]
    pub monthly_price: String,
    #[serde(rename = "yearlyPrice", deserialize_with = "string_or_number")]
    pub yearly_price: String,
    /// Newline-separated feature list.
    pub features: String,
    pub popular: bool,
}

impl PricingPlan {
    fn seed(name: &str, monthly: &str, yearly: &str, popular: bool) -> Self {
        Self {
            name: name.to_owned(),
            monthly_price: monthly.to_owned(),
            yearly_price: yearly.to_owned(),
            popular,
            ..Self::default()
        }
    }

    /// Non-blank lines of the feature list.
    pub fn feature_lines(&self) -> impl Iterator<Item = &str> {
        self.features
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// Prices were typed as free text; older rows sometimes hold JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[derive(Deserialize)]
struct Items<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Serialize)]
struct ItemsRef<'a, T> {
    items: &'a [T],
}

// =============================================================================
// SlotContent
// =============================================================================

/// A typed content document for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    Hero(HeroContent),
    Features(Vec<FeatureItem>),
    Testimonials(Vec<TestimonialItem>),
    Pricing(Vec<PricingPlan>),
}

impl SlotContent {
    /// The skeleton an editor shows when nothing is stored yet.
    #[must_use]
    pub fn seed(slot: ContentSlot) -> Self {
        match slot {
            ContentSlot::Hero => Self::Hero(HeroContent::default()),
            ContentSlot::Features => Self::Features(vec![FeatureItem::default(); FEATURE_SLOTS]),
            ContentSlot::Testimonials => Self::Testimonials(vec![TestimonialItem::default()]),
            ContentSlot::Pricing => Self::Pricing(vec![
                PricingPlan::seed("Basic", "9", "90", false),
                PricingPlan::seed("Pro", "29", "290", true),
                PricingPlan::seed("Enterprise", "99", "990", false),
            ]),
        }
    }

    /// Decode a stored document, returning `None` when it is absent, not the
    /// expected shape, or (for lists) has no items.
    #[must_use]
    pub fn decode(slot: ContentSlot, value: Option<&Value>) -> Option<Self> {
        let value = value.filter(|v| v.is_object())?;
        let content = match slot {
            ContentSlot::Hero => Self::Hero(HeroContent::deserialize(value).ok()?),
            ContentSlot::Features => Self::Features(non_empty_items(value)?),
            ContentSlot::Testimonials => Self::Testimonials(non_empty_items(value)?),
            ContentSlot::Pricing => Self::Pricing(non_empty_items(value)?),
        };
        Some(content)
    }

    /// Editor view of a stored document: the decoded value, or the seed
    /// skeleton when decoding yields nothing.
    ///
    /// Fixed-length lists are brought to their schema length, so a row
    /// stored with too few or too many items still opens as a savable form.
    #[must_use]
    pub fn for_editor(slot: ContentSlot, value: Option<&Value>) -> Self {
        let mut content = Self::decode(slot, value).unwrap_or_else(|| Self::seed(slot));
        content.fit_fixed_lists();
        content
    }

    fn fit_fixed_lists(&mut self) {
        match self {
            Self::Features(items) => items.resize_with(FEATURE_SLOTS, FeatureItem::default),
            Self::Pricing(plans) => {
                plans.truncate(PRICING_PLANS);
                if let Self::Pricing(seed) = Self::seed(ContentSlot::Pricing) {
                    let missing = seed.into_iter().skip(plans.len());
                    plans.extend(missing);
                }
            }
            Self::Hero(_) | Self::Testimonials(_) => {}
        }
    }

    /// The slot this document belongs to.
    #[must_use]
    pub const fn slot(&self) -> ContentSlot {
        match self {
            Self::Hero(_) => ContentSlot::Hero,
            Self::Features(_) => ContentSlot::Features,
            Self::Testimonials(_) => ContentSlot::Testimonials,
            Self::Pricing(_) => ContentSlot::Pricing,
        }
    }

    /// Whole-document JSON written to `content_value`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let encoded = match self {
            Self::Hero(hero) => serde_json::to_value(hero),
            Self::Features(items) => serde_json::to_value(ItemsRef { items }),
            Self::Testimonials(items) => serde_json::to_value(ItemsRef { items }),
            Self::Pricing(items) => serde_json::to_value(ItemsRef { items }),
        };
        // Plain structs of strings and bools always encode.
        encoded.unwrap_or(Value::Null)
    }

    /// Check the document against its slot's schema before it is written.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] when a list has the wrong number of items.
    pub fn validate(&self) -> Result<(), ContentError> {
        let slot = self.slot();
        match self {
            Self::Hero(_) => Ok(()),
            Self::Features(items) => exact_len(slot, items.len(), FEATURE_SLOTS),
            Self::Pricing(items) => exact_len(slot, items.len(), PRICING_PLANS),
            Self::Testimonials(items) if items.is_empty() => {
                Err(ContentError::TooFewItems { slot, min: 1 })
            }
            Self::Testimonials(_) => Ok(()),
        }
    }

    /// Append a blank testimonial. No-op for other slots.
    pub fn add_testimonial(&mut self) {
        if let Self::Testimonials(items) = self {
            items.push(TestimonialItem::default());
        }
    }

    /// Remove the testimonial at `index`, refusing to remove the only one.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_testimonial(&mut self, index: usize) -> bool {
        match self {
            Self::Testimonials(items) if items.len() > 1 && index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Build a document from the submitted editor form.
    ///
    /// Hero fields are posted under their JSON names (`title`, `imageUrl`).
    /// List entries are posted as `items.{index}.{field}`; a pricing plan's
    /// `popular` checkbox is present only when checked.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidForm`] for a malformed item index.
    pub fn from_form(slot: ContentSlot, pairs: &[(String, String)]) -> Result<Self, ContentError> {
        match slot {
            ContentSlot::Hero => {
                let mut hero = HeroContent::default();
                for (name, value) in pairs {
                    match name.as_str() {
                        "title" => hero.title.clone_from(value),
                        "subtitle" => hero.subtitle.clone_from(value),
                        "cta" => hero.cta.clone_from(value),
                        "imageUrl" => hero.image_url.clone_from(value),
                        _ => {}
                    }
                }
                Ok(Self::Hero(hero))
            }
            ContentSlot::Features => {
                let items = collect_items(pairs, |item: &mut FeatureItem, field, value| {
                    match field {
                        "title" => item.title = value,
                        "description" => item.description = value,
                        "icon" => item.icon = value,
                        _ => {}
                    }
                })?;
                Ok(Self::Features(items))
            }
            ContentSlot::Testimonials => {
                let items = collect_items(pairs, |item: &mut TestimonialItem, field, value| {
                    match field {
                        "name" => item.name = value,
                        "title" => item.title = value,
                        "company" => item.company = value,
                        "review" => item.review = value,
                        "avatar" => item.avatar = value,
                        _ => {}
                    }
                })?;
                Ok(Self::Testimonials(items))
            }
            ContentSlot::Pricing => {
                let items = collect_items(pairs, |item: &mut PricingPlan, field, value| {
                    match field {
                        "name" => item.name = value,
                        "description" => item.description = value,
                        "monthlyPrice" => item.monthly_price = value,
                        "yearlyPrice" => item.yearly_price = value,
                        "features" => item.features = value,
                        "popular" => item.popular = true,
                        _ => {}
                    }
                })?;
                Ok(Self::Pricing(items))
            }
        }
    }
}

fn non_empty_items<T: for<'de> Deserialize<'de>>(value: &Value) -> Option<Vec<T>> {
    let Items { items } = Items::<T>::deserialize(value).ok()?;
    (!items.is_empty()).then_some(items)
}

fn exact_len(slot: ContentSlot, actual: usize, expected: usize) -> Result<(), ContentError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ContentError::WrongItemCount {
            slot,
            expected,
            actual,
        })
    }
}

/// Group `items.{index}.{field}` pairs into items ordered by index.
fn collect_items<T, F>(pairs: &[(String, String)], mut set: F) -> Result<Vec<T>, ContentError>
where
    T: Default,
    F: FnMut(&mut T, &str, String),
{
    let mut items: BTreeMap<usize, T> = BTreeMap::new();
    for (name, value) in pairs {
        let Some(rest) = name.strip_prefix("items.") else {
            continue;
        };
        let (index, field) = rest
            .split_once('.')
            .ok_or_else(|| ContentError::InvalidForm(name.clone()))?;
        let index: usize = index
            .parse()
            .map_err(|_| ContentError::InvalidForm(name.clone()))?;
        set(items.entry(index).or_default(), field, value.clone());
    }
    Ok(items.into_values().collect())
}

// =============================================================================
// Stored rows
// =============================================================================

/// A row of the `site_content` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRow {
    pub section: String,
    pub content_key: String,
    #[serde(default)]
    pub content_value: Value,
}

impl ContentRow {
    /// Row for an upsert of `content`.
    #[must_use]
    pub fn from_content(content: &SlotContent) -> Self {
        let slot = content.slot();
        Self {
            section: slot.section().to_owned(),
            content_key: slot.content_key().to_owned(),
            content_value: content.to_value(),
        }
    }
}

/// Every stored document, looked up by slot.
///
/// Rows with unknown `(section, content_key)` pairs are kept out of the
/// lookup but do not cause an error.
#[derive(Debug, Clone, Default)]
pub struct ContentSet {
    documents: BTreeMap<(String, String), Value>,
}

impl ContentSet {
    /// Stored document for `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: ContentSlot) -> Option<&Value> {
        self.documents
            .get(&(slot.section().to_owned(), slot.content_key().to_owned()))
    }

    /// Editor view of `slot` (decoded, or seeded).
    #[must_use]
    pub fn editor(&self, slot: ContentSlot) -> SlotContent {
        SlotContent::for_editor(slot, self.get(slot))
    }

    /// Number of stored documents that map to a known slot.
    #[must_use]
    pub fn known_len(&self) -> usize {
        ContentSlot::ALL
            .iter()
            .filter(|slot| self.get(**slot).is_some())
            .count()
    }
}

impl FromIterator<ContentRow> for ContentSet {
    fn from_iter<I: IntoIterator<Item = ContentRow>>(rows: I) -> Self {
        Self {
            documents: rows
                .into_iter()
                .map(|row| ((row.section, row.content_key), row.content_value))
                .collect(),
        }
    }
}

// =============================================================================
// Editor actions
// =============================================================================

/// What an editor form submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Persist the document.
    Save,
    /// Append a blank testimonial and redisplay.
    AddItem,
    /// Remove the testimonial at the index and redisplay.
    RemoveItem(usize),
}

impl std::str::FromStr for EditorAction {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "save" => Ok(Self::Save),
            "add" => Ok(Self::AddItem),
            other => other
                .strip_prefix("remove:")
                .and_then(|index| index.parse().ok())
                .map(Self::RemoveItem)
                .ok_or_else(|| ContentError::InvalidForm(format!("action={other}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_slot_keys() {
        assert_eq!(
            ContentSlot::from_keys("pricing", "plans"),
            Some(ContentSlot::Pricing)
        );
        assert_eq!(ContentSlot::from_keys("pricing", "list"), None);
        assert_eq!(ContentSlot::Features.to_string(), "features/list");
        assert_eq!(
            ContentSlot::from_section("testimonials"),
            Some(ContentSlot::Testimonials)
        );
    }

    #[test]
    fn test_empty_features_seed_six_blank_slots() {
        let content = SlotContent::for_editor(ContentSlot::Features, Some(&json!({})));
        let SlotContent::Features(items) = content else {
            panic!("expected features");
        };
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|item| *item == FeatureItem::default()));
    }

    #[test]
    fn test_empty_pricing_seeds_three_named_plans() {
        let SlotContent::Pricing(plans) = SlotContent::for_editor(ContentSlot::Pricing, None) else {
            panic!("expected pricing");
        };
        let summary: Vec<_> = plans
            .iter()
            .map(|p| {
                (
                    p.name.as_str(),
                    p.monthly_price.as_str(),
                    p.yearly_price.as_str(),
                    p.popular,
                )
            })
            .collect();
        assert_eq!(
            summary,
            [
                ("Basic", "9", "90", false),
                ("Pro", "29", "290", true),
                ("Enterprise", "99", "990", false),
            ]
        );
    }

    #[test]
    fn test_missing_items_field_seeds_one_testimonial() {
        let value = json!({ "other": 1 });
        let content = SlotContent::for_editor(ContentSlot::Testimonials, Some(&value));
        assert_eq!(
            content,
            SlotContent::Testimonials(vec![TestimonialItem::default()])
        );
    }

    #[test]
    fn test_malformed_document_is_treated_as_missing() {
        let value = json!({ "items": "not a list" });
        assert_eq!(SlotContent::decode(ContentSlot::Features, Some(&value)), None);
        assert_eq!(
            SlotContent::decode(ContentSlot::Hero, Some(&json!([1, 2]))),
            None
        );
    }

    #[test]
    fn test_hero_decodes_partial_document() {
        let value = json!({ "title": "Hello", "imageUrl": "https://cdn.example.com/a.png" });
        let SlotContent::Hero(hero) = SlotContent::for_editor(ContentSlot::Hero, Some(&value)) else {
            panic!("expected hero");
        };
        assert_eq!(hero.title, "Hello");
        assert_eq!(hero.subtitle, "");
        assert_eq!(hero.image_url, "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_numeric_prices_from_older_rows() {
        let value = json!({ "items": [{ "name": "Solo", "monthlyPrice": 5, "yearlyPrice": 50.5 }] });
        let SlotContent::Pricing(plans) = SlotContent::for_editor(ContentSlot::Pricing, Some(&value)) else {
            panic!("expected pricing");
        };
        assert_eq!(plans[0].monthly_price, "5");
        assert_eq!(plans[0].yearly_price, "50.5");
    }

    #[test]
    fn test_short_features_row_opens_as_six_savable_slots() {
        let value = json!({ "items": [
            { "title": "Fast" },
            { "title": "Safe" },
            { "title": "Simple" },
            { "title": "Cheap" }
        ] });
        let content = SlotContent::for_editor(ContentSlot::Features, Some(&value));
        let SlotContent::Features(items) = &content else {
            panic!("expected features");
        };
        assert_eq!(items.len(), 6);
        assert_eq!(items[3].title, "Cheap");
        assert_eq!(items[5], FeatureItem::default());
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_long_features_row_is_cut_to_six() {
        let value = json!({ "items": vec![json!({ "title": "x" }); 8] });
        let content = SlotContent::for_editor(ContentSlot::Features, Some(&value));
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_single_plan_row_is_completed_from_seed_plans() {
        let value = json!({ "items": [{ "name": "Solo", "monthlyPrice": "5" }] });
        let content = SlotContent::for_editor(ContentSlot::Pricing, Some(&value));
        let SlotContent::Pricing(plans) = &content else {
            panic!("expected pricing");
        };
        let names: Vec<_> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Solo", "Pro", "Enterprise"]);
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_to_value_uses_camel_case_names() {
        let content = SlotContent::seed(ContentSlot::Pricing);
        let value = content.to_value();
        assert_eq!(value["items"][1]["monthlyPrice"], "29");
        assert_eq!(value["items"][1]["popular"], true);

        let hero = SlotContent::Hero(HeroContent {
            image_url: "x".into(),
            ..HeroContent::default()
        });
        assert_eq!(hero.to_value()["imageUrl"], "x");
    }

    #[test]
    fn test_validate_fixed_sizes() {
        assert!(SlotContent::seed(ContentSlot::Features).validate().is_ok());
        assert!(SlotContent::seed(ContentSlot::Pricing).validate().is_ok());

        let err = SlotContent::Features(vec![FeatureItem::default(); 5])
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ContentError::WrongItemCount {
                slot: ContentSlot::Features,
                expected: 6,
                actual: 5
            }
        );

        assert!(SlotContent::Pricing(Vec::new()).validate().is_err());
        assert_eq!(
            SlotContent::Testimonials(Vec::new()).validate(),
            Err(ContentError::TooFewItems {
                slot: ContentSlot::Testimonials,
                min: 1
            })
        );
    }

    #[test]
    fn test_cannot_remove_only_testimonial() {
        let mut content = SlotContent::seed(ContentSlot::Testimonials);
        assert!(!content.remove_testimonial(0));

        content.add_testimonial();
        assert!(content.remove_testimonial(1));
        assert!(!content.remove_testimonial(0));
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut content = SlotContent::seed(ContentSlot::Testimonials);
        content.add_testimonial();
        assert!(!content.remove_testimonial(7));
    }

    #[test]
    fn test_from_form_orders_items_by_index() {
        let form = pairs(&[
            ("items.1.name", "Sarah"),
            ("items.0.name", "Alex"),
            ("items.0.company", "TechFlow"),
            ("action", "save"),
        ]);
        let SlotContent::Testimonials(items) =
            SlotContent::from_form(ContentSlot::Testimonials, &form).unwrap()
        else {
            panic!("expected testimonials");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Alex");
        assert_eq!(items[0].company, "TechFlow");
        assert_eq!(items[1].name, "Sarah");
    }

    #[test]
    fn test_from_form_popular_checkbox() {
        let form = pairs(&[
            ("items.0.name", "Basic"),
            ("items.1.name", "Pro"),
            ("items.1.popular", "on"),
        ]);
        let SlotContent::Pricing(plans) = SlotContent::from_form(ContentSlot::Pricing, &form).unwrap()
        else {
            panic!("expected pricing");
        };
        assert!(!plans[0].popular);
        assert!(plans[1].popular);
    }

    #[test]
    fn test_from_form_rejects_bad_index() {
        let form = pairs(&[("items.x.title", "oops")]);
        assert!(matches!(
            SlotContent::from_form(ContentSlot::Features, &form),
            Err(ContentError::InvalidForm(_))
        ));
    }

    #[test]
    fn test_from_form_hero() {
        let form = pairs(&[
            ("title", "Craft"),
            ("subtitle", "Fast"),
            ("cta", "Go"),
            ("imageUrl", "https://example.com/bg.jpg"),
        ]);
        let content = SlotContent::from_form(ContentSlot::Hero, &form).unwrap();
        assert_eq!(
            content.to_value(),
            json!({
                "title": "Craft",
                "subtitle": "Fast",
                "cta": "Go",
                "imageUrl": "https://example.com/bg.jpg"
            })
        );
    }

    #[test]
    fn test_content_set_lookup_ignores_unknown_rows() {
        let set: ContentSet = vec![
            ContentRow {
                section: "hero".into(),
                content_key: "main".into(),
                content_value: json!({ "title": "Stored" }),
            },
            ContentRow {
                section: "legacy".into(),
                content_key: "banner".into(),
                content_value: json!({}),
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(set.known_len(), 1);
        assert_eq!(set.get(ContentSlot::Hero), Some(&json!({ "title": "Stored" })));
        assert_eq!(set.editor(ContentSlot::Features), SlotContent::seed(ContentSlot::Features));
    }

    #[test]
    fn test_row_from_content() {
        let row = ContentRow::from_content(&SlotContent::seed(ContentSlot::Features));
        assert_eq!(row.section, "features");
        assert_eq!(row.content_key, "list");
        assert_eq!(row.content_value["items"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_editor_action_parse() {
        assert_eq!("save".parse::<EditorAction>().unwrap(), EditorAction::Save);
        assert_eq!("add".parse::<EditorAction>().unwrap(), EditorAction::AddItem);
        assert_eq!(
            "remove:2".parse::<EditorAction>().unwrap(),
            EditorAction::RemoveItem(2)
        );
        assert!("remove:".parse::<EditorAction>().is_err());
        assert!("delete".parse::<EditorAction>().is_err());
    }

    #[test]
    fn test_initials_and_feature_lines() {
        let item = TestimonialItem {
            name: "alex johnson".into(),
            ..TestimonialItem::default()
        };
        assert_eq!(item.initials(), "AJ");

        let plan = PricingPlan {
            features: "Up to 3 projects\n\n  Basic analytics \n".into(),
            ..PricingPlan::default()
        };
        assert_eq!(
            plan.feature_lines().collect::<Vec<_>>(),
            ["Up to 3 projects", "Basic analytics"]
        );
    }
}
