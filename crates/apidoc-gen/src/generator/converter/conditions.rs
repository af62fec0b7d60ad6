//! Conditional Rule Grouper: branch conditions and their canonical keys.

use http::Method;
use indexmap::IndexMap;
use itertools::Itertools;

use super::{
  hashing,
  rules::{self, RuleToken},
};
use crate::input::{ConditionRecord, FieldRules, ValidationRules};

pub(crate) const DEFAULT_GROUP_KEY: &str = "default";

/// Runtime condition selecting one validation branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Condition {
  HttpMethod(Method),
  UserCheck(String),
  RequestField { check: String, field: String },
  ElseBranch,
  Custom(Option<String>),
}

impl Condition {
  pub(crate) fn from_record(record: &ConditionRecord) -> Self {
    match record {
      ConditionRecord::HttpMethod { method } => Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map(Self::HttpMethod)
        .unwrap_or_else(|_| Self::Custom(Some(method.clone()))),
      ConditionRecord::UserCheck { name } => Self::UserCheck(name.clone()),
      ConditionRecord::RequestField { check, field } => Self::RequestField {
        check: check.clone(),
        field: field.clone(),
      },
      ConditionRecord::Else => Self::ElseBranch,
      ConditionRecord::Custom { expression } => Self::Custom(expression.clone()),
    }
  }

  /// Canonical key used for group identity and the discriminator mapping.
  pub(crate) fn key(&self) -> String {
    match self {
      Self::HttpMethod(method) => method.as_str().to_ascii_lowercase(),
      Self::UserCheck(name) => format!("user_{}", name.to_ascii_lowercase()),
      Self::RequestField { check, field } => format!("request_{check}_{field}"),
      Self::ElseBranch => "else".to_string(),
      Self::Custom(Some(expression)) => hashing::short_hash(expression),
      Self::Custom(None) => "unknown".to_string(),
    }
  }

  /// Human-readable text for branch descriptions.
  pub(crate) fn describe(&self) -> String {
    match self {
      Self::HttpMethod(method) => format!("HTTP method is {method}"),
      Self::UserCheck(name) => format!("user {name}()"),
      Self::RequestField { check, field } => format!("request {check} '{field}'"),
      Self::ElseBranch => "Otherwise".to_string(),
      Self::Custom(Some(expression)) => expression.clone(),
      Self::Custom(None) => "unknown".to_string(),
    }
  }
}

/// Key for a whole condition set: order-insensitive, deterministic.
pub(crate) fn group_key(conditions: &[Condition]) -> String {
  if conditions.is_empty() {
    return DEFAULT_GROUP_KEY.to_string();
  }
  conditions.iter().map(Condition::key).sorted().dedup().join("_")
}

pub(crate) fn describe_group(conditions: &[Condition]) -> String {
  if conditions.is_empty() {
    return "Default validation rules".to_string();
  }
  conditions.iter().map(Condition::describe).join(" AND ")
}

/// The fields and rule overrides active under one exact condition set.
#[derive(Debug, Clone)]
pub(crate) struct ConditionGroup {
  pub key: String,
  pub conditions: Vec<Condition>,
  pub fields: IndexMap<String, Vec<RuleToken>>,
}

pub(crate) fn has_conditional_rules(rules: &ValidationRules) -> bool {
  rules
    .values()
    .any(|field_rules| matches!(field_rules, FieldRules::Branched(_)))
}

/// Groups per-field branch entries by canonical condition-group key.
///
/// Branches with identical keys merge across fields. Fields that never
/// declare conditional rules are constant: they appear in every group.
pub(crate) fn group_branches(validation: &ValidationRules) -> Vec<ConditionGroup> {
  let mut groups: IndexMap<String, ConditionGroup> = IndexMap::new();

  for (field, field_rules) in validation {
    let FieldRules::Branched(branches) = field_rules else {
      continue;
    };
    for branch in branches {
      let conditions = branch.conditions.iter().map(Condition::from_record).collect::<Vec<_>>();
      let key = group_key(&conditions);
      let group = groups.entry(key.clone()).or_insert_with(|| ConditionGroup {
        key,
        conditions,
        fields: IndexMap::new(),
      });
      group.fields.insert(field.clone(), rules::tokens_from_list(&branch.rules));
    }
  }

  if groups.is_empty() {
    groups.insert(
      DEFAULT_GROUP_KEY.to_string(),
      ConditionGroup {
        key: DEFAULT_GROUP_KEY.to_string(),
        conditions: Vec::new(),
        fields: IndexMap::new(),
      },
    );
  }

  for (field, field_rules) in validation {
    let FieldRules::Flat(list) = field_rules else {
      continue;
    };
    let tokens = rules::tokens_from_list(list);
    for group in groups.values_mut() {
      group.fields.insert(field.clone(), tokens.clone());
    }
  }

  groups.into_values().collect()
}
