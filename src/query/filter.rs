// src/query/filter.rs
//! Filter specifications: what to match, before it becomes query grammar.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparator used when a filter value is a plain scalar.
pub const EQUALS_OPERATOR: &str = "_eq";

/// The condition on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `{ "_gt": 100, "_lte": 400 }`: every operator applies (logical AND)
    Operators(IndexMap<String, Value>),
    /// A bare scalar, compared with `_eq`
    Equals(Value),
}

impl FilterValue {
    /// The `(operator, value)` pairs this condition expands to, in order.
    pub fn comparisons(&self) -> Vec<(&str, &Value)> {
        match self {
            Self::Equals(value) => vec![(EQUALS_OPERATOR, value)],
            Self::Operators(ops) => ops.iter().map(|(op, v)| (op.as_str(), v)).collect(),
        }
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(ops) => Self::Operators(ops.into_iter().collect()),
            scalar => Self::Equals(scalar),
        }
    }
}

/// Field → condition, kept in declaration order so the same spec always
/// serializes to the same query string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec(IndexMap<String, FilterValue>);

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `field = value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0
            .insert(field.into(), FilterValue::Equals(value.into()));
        self
    }

    /// Adds `field <operator> value`. An existing equality on the same field
    /// is kept as an `_eq` entry alongside the new operator.
    pub fn op(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let condition = self
            .0
            .entry(field.into())
            .or_insert_with(|| FilterValue::Operators(IndexMap::new()));
        if let FilterValue::Equals(existing) = condition {
            let existing = existing.take();
            *condition =
                FilterValue::Operators(IndexMap::from([(EQUALS_OPERATOR.to_string(), existing)]));
        }
        if let FilterValue::Operators(ops) = condition {
            ops.insert(operator.into(), value.into());
        }
        self
    }

    /// Builds a spec from a JSON object such as `{"status":"published","price":{"_gt":100}}`.
    pub fn from_json(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        Some(Self(
            fields
                .iter()
                .map(|(field, condition)| (field.clone(), FilterValue::from(condition.clone())))
                .collect(),
        ))
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// Layers `self` (the caller's filter) over `base`: base fields keep
    /// their position, fields named by the caller replace them, and new
    /// caller fields follow in their own order.
    pub fn merged_over(&self, base: &FilterSpec) -> FilterSpec {
        let mut merged = base.0.clone();
        for (field, condition) in &self.0 {
            merged.insert(field.clone(), condition.clone());
        }
        FilterSpec(merged)
    }
}

/// Relation → filter on the related collection's fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeepFilterSpec(IndexMap<String, FilterSpec>);

impl DeepFilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relation(mut self, relation: impl Into<String>, filter: FilterSpec) -> Self {
        self.0.insert(relation.into(), filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterSpec)> {
        self.0.iter()
    }

    /// Relations named here replace same-named relations of `base`.
    pub fn merged_over(&self, base: &DeepFilterSpec) -> DeepFilterSpec {
        let mut merged = base.0.clone();
        for (relation, filter) in &self.0 {
            merged.insert(relation.clone(), filter.clone());
        }
        DeepFilterSpec(merged)
    }
}
