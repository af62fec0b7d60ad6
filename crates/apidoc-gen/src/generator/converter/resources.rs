//! Resource/Transformer Schema Builder.
//!
//! Converts resource-analysis property maps into object schemas and wraps
//! collections in the envelope the route's pagination style calls for.

use indexmap::IndexMap;

use crate::{
  generator::schema::{ArrayNode, Constraints, ObjectNode, PrimitiveKind, PrimitiveNode, SchemaNode},
  input::{IncludeRecord, PaginationKind, ResourceAnalysis, ResourceProperty},
};

/// Builds the item schema for one resource/transformer.
///
/// Includes are merged as additional properties with their availability
/// noted in the description. A pre-built custom example passes through
/// unmodified instead of being derived from the schema.
pub(crate) fn build_resource_schema(analysis: &ResourceAnalysis) -> SchemaNode {
  let mut properties: IndexMap<String, SchemaNode> = analysis
    .properties
    .iter()
    .map(|(name, property)| (name.clone(), property_schema(property)))
    .collect();

  for include in &analysis.includes {
    properties.insert(include.name.clone(), include_schema(include));
  }

  SchemaNode::Object(ObjectNode {
    properties,
    required: Vec::new(),
    title: None,
    description: None,
    example: analysis.custom_example.clone(),
  })
}

fn property_schema(property: &ResourceProperty) -> SchemaNode {
  match property.kind.as_deref() {
    Some("array") => SchemaNode::Array(ArrayNode {
      items: Box::new(
        property
          .items
          .as_deref()
          .map(property_schema)
          .unwrap_or_else(SchemaNode::string),
      ),
      description: property.description.clone(),
      min_items: None,
      max_items: None,
      example: property.example.clone(),
    }),
    Some("object") => nested_object(property),
    None if !property.properties.is_empty() => nested_object(property),
    kind => SchemaNode::Primitive(PrimitiveNode {
      kind: kind.map(PrimitiveKind::parse).unwrap_or_default(),
      constraints: Constraints {
        format: property.format.clone(),
        nullable: property.nullable,
        example: property.example.clone(),
        description: property.description.clone(),
        ..Constraints::default()
      },
    }),
  }
}

fn nested_object(property: &ResourceProperty) -> SchemaNode {
  let properties = property
    .properties
    .iter()
    .map(|(name, nested)| (name.clone(), property_schema(nested)))
    .collect();
  SchemaNode::Object(ObjectNode {
    properties,
    required: Vec::new(),
    title: None,
    description: property.description.clone(),
    example: property.example.clone(),
  })
}

fn include_schema(include: &IncludeRecord) -> SchemaNode {
  let node = include
    .property
    .as_ref()
    .map(property_schema)
    .unwrap_or_else(SchemaNode::empty_object);

  let availability = if include.default_active {
    "Included by default"
  } else {
    "Optional include; returned when requested"
  };
  let description = match existing_description(&node) {
    Some(text) => format!("{text}. {availability}"),
    None => availability.to_string(),
  };
  node.with_description(description)
}

fn existing_description(node: &SchemaNode) -> Option<String> {
  match node {
    SchemaNode::Object(object) => object.description.clone(),
    SchemaNode::Array(array) => array.description.clone(),
    SchemaNode::Primitive(primitive) => primitive.constraints.description.clone(),
    SchemaNode::OneOf(_) | SchemaNode::Ref(_) => None,
  }
}

/// Wraps an item schema for a collection-returning operation.
pub(crate) fn wrap_collection(item: SchemaNode, pagination: Option<PaginationKind>) -> SchemaNode {
  match pagination {
    None => SchemaNode::array(item),
    Some(PaginationKind::ApiResource) => api_resource_envelope(item),
    Some(PaginationKind::LengthAware) => length_aware_envelope(item),
    Some(PaginationKind::Simple) => simple_envelope(item),
    Some(PaginationKind::Cursor) => cursor_envelope(item),
  }
}

fn api_resource_envelope(item: SchemaNode) -> SchemaNode {
  let links = SchemaNode::object(
    IndexMap::from([
      ("first".to_string(), uri(true)),
      ("last".to_string(), uri(true)),
      ("prev".to_string(), uri(true)),
      ("next".to_string(), uri(true)),
    ]),
    Vec::new(),
  );

  let pagination = SchemaNode::object(
    IndexMap::from([
      ("total".to_string(), integer()),
      ("count".to_string(), integer()),
      ("per_page".to_string(), integer()),
      ("current_page".to_string(), integer()),
      ("total_pages".to_string(), integer()),
    ]),
    Vec::new(),
  );
  let meta = SchemaNode::object(IndexMap::from([("pagination".to_string(), pagination)]), Vec::new());

  SchemaNode::object(
    IndexMap::from([
      ("data".to_string(), SchemaNode::array(item)),
      ("links".to_string(), links),
      ("meta".to_string(), meta),
    ]),
    Vec::new(),
  )
}

fn length_aware_envelope(item: SchemaNode) -> SchemaNode {
  SchemaNode::object(
    IndexMap::from([
      ("current_page".to_string(), integer()),
      ("data".to_string(), SchemaNode::array(item)),
      ("first_page_url".to_string(), uri(false)),
      ("from".to_string(), nullable_integer()),
      ("last_page".to_string(), integer()),
      ("last_page_url".to_string(), uri(false)),
      ("next_page_url".to_string(), uri(true)),
      ("path".to_string(), uri(false)),
      ("per_page".to_string(), integer()),
      ("prev_page_url".to_string(), uri(true)),
      ("to".to_string(), nullable_integer()),
      ("total".to_string(), integer()),
    ]),
    Vec::new(),
  )
}

fn simple_envelope(item: SchemaNode) -> SchemaNode {
  SchemaNode::object(
    IndexMap::from([
      ("current_page".to_string(), integer()),
      ("data".to_string(), SchemaNode::array(item)),
      ("first_page_url".to_string(), uri(false)),
      ("from".to_string(), nullable_integer()),
      ("next_page_url".to_string(), uri(true)),
      ("path".to_string(), uri(false)),
      ("per_page".to_string(), integer()),
      ("prev_page_url".to_string(), uri(true)),
      ("to".to_string(), nullable_integer()),
    ]),
    Vec::new(),
  )
}

fn cursor_envelope(item: SchemaNode) -> SchemaNode {
  SchemaNode::object(
    IndexMap::from([
      ("data".to_string(), SchemaNode::array(item)),
      ("path".to_string(), uri(false)),
      ("per_page".to_string(), integer()),
      ("next_cursor".to_string(), nullable_string()),
      ("next_page_url".to_string(), uri(true)),
      ("prev_cursor".to_string(), nullable_string()),
      ("prev_page_url".to_string(), uri(true)),
    ]),
    Vec::new(),
  )
}

fn integer() -> SchemaNode {
  SchemaNode::primitive(PrimitiveKind::Integer)
}

fn nullable_integer() -> SchemaNode {
  SchemaNode::Primitive(PrimitiveNode {
    kind: PrimitiveKind::Integer,
    constraints: Constraints {
      nullable: true,
      ..Constraints::default()
    },
  })
}

fn nullable_string() -> SchemaNode {
  SchemaNode::Primitive(PrimitiveNode {
    kind: PrimitiveKind::String,
    constraints: Constraints {
      nullable: true,
      ..Constraints::default()
    },
  })
}

fn uri(nullable: bool) -> SchemaNode {
  SchemaNode::Primitive(PrimitiveNode {
    kind: PrimitiveKind::String,
    constraints: Constraints {
      format: Some("uri".to_string()),
      nullable,
      ..Constraints::default()
    },
  })
}
