//! Security resolution: route middleware to scheme requirements.

use indexmap::IndexMap;

use crate::{
  generator::{
    document::{SecurityRequirement, SecuritySchemeObject},
    metrics::{GenerationStats, GenerationWarning},
  },
  input::{AuthAnalysis, RouteRecord},
};

/// Per-route security decision.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedSecurity {
  /// Explicit operation-level requirement, when middleware names a scheme.
  pub requirement: Option<Vec<SecurityRequirement>>,
  /// True only when the route's own middleware demands authentication;
  /// drives the 401 response.
  pub auth_required: bool,
}

/// Matches route middleware against the auth analysis.
///
/// A middleware entry matches either verbatim (`auth:sanctum`) or by its
/// identifier before the first `:` (`auth`). The first match wins.
pub(crate) fn resolve_route_security(
  route: &RouteRecord,
  auth: &AuthAnalysis,
  stats: &mut GenerationStats,
) -> ResolvedSecurity {
  for middleware in &route.middleware {
    let identifier = middleware.split(':').next().unwrap_or(middleware);
    let Some(scheme) = auth
      .middleware_map
      .get(middleware)
      .or_else(|| auth.middleware_map.get(identifier))
    else {
      continue;
    };

    if !auth.schemes.contains_key(scheme) {
      stats.record_warning(GenerationWarning::UnknownSecurityScheme {
        uri: route.uri.clone(),
        scheme: scheme.clone(),
      });
    }

    return ResolvedSecurity {
      requirement: Some(vec![IndexMap::from([(scheme.clone(), Vec::new())])]),
      auth_required: true,
    };
  }

  ResolvedSecurity::default()
}

/// Document-level security: the global default scheme, when one is declared
/// as required. Per-route requirements override it per the OpenAPI rules.
pub(crate) fn global_security(auth: &AuthAnalysis) -> Option<Vec<SecurityRequirement>> {
  let scheme = auth.default_scheme.as_ref()?;
  auth
    .default_required
    .then(|| vec![IndexMap::from([(scheme.clone(), Vec::new())])])
}

pub(crate) fn scheme_objects(auth: &AuthAnalysis) -> IndexMap<String, SecuritySchemeObject> {
  auth
    .schemes
    .iter()
    .map(|(name, record)| (name.clone(), SecuritySchemeObject::from(record)))
    .collect()
}
