//! Conditional Schema Composer: grouped branches to a discriminated union.

use super::{
  CONDITION_DISCRIMINATOR,
  conditions::{Condition, ConditionGroup, describe_group},
  parameters, rules,
};
use crate::generator::schema::{Discriminator, OneOfNode, SchemaNode};

/// Builds the request schema for a set of condition groups.
///
/// A single group (or none) collapses to a plain object; no branching is
/// emitted for one condition. Two or more distinct groups become a `oneOf`
/// with a `_condition` discriminator mapping each group key to its branch.
pub(crate) fn compose(groups: &[ConditionGroup]) -> SchemaNode {
  match groups {
    [] => SchemaNode::empty_object(),
    [single] => branch_object(single),
    _ => {
      let branches = groups.iter().map(annotated_branch_object).collect::<Vec<_>>();
      let mapping = groups
        .iter()
        .enumerate()
        .map(|(index, group)| (group.key.clone(), format!("#/oneOf/{index}")))
        .collect();

      SchemaNode::OneOf(OneOfNode {
        branches,
        discriminator: Discriminator {
          property_name: CONDITION_DISCRIMINATOR.to_string(),
          mapping,
        },
      })
    }
  }
}

fn branch_object(group: &ConditionGroup) -> SchemaNode {
  let descriptors = group
    .fields
    .iter()
    .map(|(name, tokens)| rules::descriptor_from_rules(name, tokens))
    .collect::<Vec<_>>();
  parameters::build_object(&descriptors)
}

fn annotated_branch_object(group: &ConditionGroup) -> SchemaNode {
  let mut node = branch_object(group).with_description(describe_group(&group.conditions));

  if let [Condition::HttpMethod(method)] = group.conditions.as_slice()
    && let SchemaNode::Object(object) = &mut node
  {
    object.title = Some(format!("{method} Request"));
  }

  node
}
