//! Request-body resolution for one operation.

use super::{branches, conditions, parameters, rules};
use crate::{
  generator::schema::SchemaNode,
  input::{ControllerAnalysis, FieldRules, ValidationRules},
};

/// The request-body schema an operation ends up with, if any.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ResolvedBody {
  None,
  Json(SchemaNode),
  Multipart(SchemaNode),
}

/// Resolves the operation's request body from its validation source.
///
/// Form-request validation takes precedence over inline rules. Conditional
/// rules route through the grouper and composer; a flat rule set with any
/// file field becomes a multipart body.
pub(crate) fn resolve(analysis: &ControllerAnalysis) -> ResolvedBody {
  let validation: Option<&ValidationRules> = analysis
    .form_request
    .as_ref()
    .map(|form_request| &form_request.rules)
    .or(analysis.inline_rules.as_ref());

  let Some(validation) = validation else {
    return ResolvedBody::None;
  };
  if validation.is_empty() {
    return ResolvedBody::None;
  }

  if conditions::has_conditional_rules(validation) {
    let groups = conditions::group_branches(validation);
    return ResolvedBody::Json(branches::compose(&groups));
  }

  let descriptors = validation
    .iter()
    .filter_map(|(field, field_rules)| match field_rules {
      FieldRules::Flat(list) => Some(rules::descriptor_from_rules(field, &rules::tokens_from_list(list))),
      FieldRules::Branched(_) => None,
    })
    .collect::<Vec<_>>();

  let schema = parameters::build_object(&descriptors);
  if parameters::needs_multipart(&descriptors) {
    ResolvedBody::Multipart(schema)
  } else {
    ResolvedBody::Json(schema)
  }
}
