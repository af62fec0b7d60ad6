//! End-to-end assembly over the public API.

use apidoc_gen::{ApiDescription, DocumentAssembler, GenerationWarning, GeneratorConfig};
use serde_json::json;

fn blog_description() -> ApiDescription {
  ApiDescription::from_json(json!({
    "info": {
      "title": "Blog API",
      "version": "2.0.0",
      "description": "Demo blog backend"
    },
    "servers": [
      { "url": "https://api.example.com", "description": "Production" }
    ],
    "auth": {
      "schemes": {
        "sanctum": { "schemeType": "http", "scheme": "bearer" }
      },
      "middlewareMap": { "auth": "sanctum" }
    },
    "resources": {
      "App\\Http\\Resources\\PostResource": {
        "properties": {
          "id": { "kind": "integer" },
          "title": { "kind": "string" },
          "published_at": { "kind": "string", "format": "date-time", "nullable": true }
        }
      },
      "App\\Http\\Resources\\UserResource": {
        "properties": {
          "id": { "kind": "integer" },
          "name": { "kind": "string" }
        }
      }
    },
    "routes": [
      {
        "uri": "posts",
        "methods": ["GET"],
        "controller": "App\\Http\\Controllers\\PostController",
        "analysis": {
          "operationId": "list_posts",
          "resource": "App\\Http\\Resources\\PostResource",
          "returnsCollection": true,
          "pagination": "length_aware",
          "queryParameters": [
            { "name": "page", "kind": "integer", "default": 1 }
          ]
        }
      },
      {
        "uri": "posts",
        "methods": ["POST"],
        "controller": "App\\Http\\Controllers\\PostController",
        "middleware": ["auth"],
        "analysis": {
          "successStatus": 201,
          "formRequest": {
            "name": "App\\Http\\Requests\\StorePostRequest",
            "rules": {
              "title": "required|string|max:255",
              "body": "required|string"
            }
          },
          "resource": "App\\Http\\Resources\\PostResource",
          "responseLinks": [
            {
              "status": 201,
              "name": "GetCreatedPost",
              "operationId": "get_post",
              "parameters": { "id": "$response.body#/id" }
            }
          ]
        }
      },
      {
        "uri": "posts/{post}",
        "methods": ["GET"],
        "controller": "App\\Http\\Controllers\\PostController",
        "pathParameters": [
          { "name": "post", "kind": "integer", "description": "Post id" }
        ],
        "analysis": {
          "operationId": "get_post",
          "resource": "App\\Http\\Resources\\PostResource"
        }
      },
      {
        "uri": "users/{user}/avatar",
        "methods": ["POST"],
        "controller": "App\\Http\\Controllers\\AvatarController",
        "middleware": ["auth"],
        "analysis": {
          "inlineRules": {
            "avatar": "required|image|mimes:jpg,png|max:2048"
          },
          "resource": "App\\Http\\Resources\\UserResource"
        }
      },
      {
        "uri": "users/{user}",
        "methods": ["GET"],
        "controller": "App\\Http\\Controllers\\UserController",
        "analysis": {
          "resource": "App\\Http\\Resources\\UserResource"
        }
      }
    ]
  }))
  .expect("valid description")
}

#[test]
fn test_full_document_assembly() {
  let assembler = DocumentAssembler::new(blog_description(), GeneratorConfig::default());
  let (document, stats) = assembler.generate().expect("generation succeeds");

  assert_eq!(document["openapi"], "3.0.3");
  assert_eq!(document["info"]["title"], "Blog API");
  assert_eq!(document["servers"][0]["url"], "https://api.example.com");
  assert!(document.get("webhooks").is_none(), "baseline documents carry no webhooks key");

  assert_eq!(stats.routes_processed, 5);
  assert_eq!(stats.operations_built, 5);
  assert!(stats.warnings.is_empty(), "unexpected warnings: {:?}", stats.warnings);
}

#[test]
fn test_paths_and_operations() {
  let assembler = DocumentAssembler::new(blog_description(), GeneratorConfig::default());
  let (document, _) = assembler.generate().expect("generation succeeds");

  let list = &document["paths"]["/posts"]["get"];
  assert_eq!(list["operationId"], "list_posts");
  assert_eq!(list["tags"], json!(["Post"]));
  assert_eq!(list["parameters"][0]["name"], "page");
  assert_eq!(list["parameters"][0]["in"], "query");

  // Collection wrapped in the length-aware envelope around the shared component.
  let envelope = &list["responses"]["200"]["content"]["application/json"]["schema"];
  assert_eq!(
    envelope["properties"]["data"]["items"]["$ref"],
    "#/components/schemas/PostResource",
  );

  let create = &document["paths"]["/posts"]["post"];
  assert_eq!(create["requestBody"]["content"]["application/json"]["schema"]["required"], json!(["title", "body"]));
  assert_eq!(create["responses"]["201"]["links"]["GetCreatedPost"]["operationId"], "get_post");
  assert_eq!(create["responses"]["422"]["description"], "Validation error");
  assert_eq!(create["responses"]["401"]["description"], "Unauthenticated");
  assert_eq!(create["security"], json!([{ "sanctum": [] }]));

  let show = &document["paths"]["/posts/{post}"]["get"];
  assert_eq!(show["parameters"][0]["in"], "path");
  assert_eq!(show["parameters"][0]["required"], true);
  assert_eq!(show["parameters"][0]["schema"]["type"], "integer");
}

#[test]
fn test_shared_resource_registers_once() {
  let assembler = DocumentAssembler::new(blog_description(), GeneratorConfig::default());
  let (document, stats) = assembler.generate().expect("generation succeeds");

  let schemas = document["components"]["schemas"].as_object().expect("schemas");
  assert_eq!(schemas.len(), 2, "one component per distinct resource");
  assert!(schemas.contains_key("PostResource"));
  assert!(schemas.contains_key("UserResource"));
  assert_eq!(stats.schemas_registered, 2);
}

#[test]
fn test_undeclared_template_parameter_is_synthesized() {
  let assembler = DocumentAssembler::new(blog_description(), GeneratorConfig::default());
  let (document, _) = assembler.generate().expect("generation succeeds");

  let upload = &document["paths"]["/users/{user}/avatar"]["post"];
  assert_eq!(upload["parameters"][0]["name"], "user");
  assert_eq!(upload["parameters"][0]["schema"]["type"], "string");
  assert!(
    upload["requestBody"]["content"]["multipart/form-data"].is_object(),
    "file rules must switch the body to multipart"
  );
}

#[test]
fn test_security_schemes_in_components() {
  let assembler = DocumentAssembler::new(blog_description(), GeneratorConfig::default());
  let (document, _) = assembler.generate().expect("generation succeeds");

  assert_eq!(
    document["components"]["securitySchemes"]["sanctum"],
    json!({ "type": "http", "scheme": "bearer" }),
  );
  assert!(
    document["paths"]["/users/{user}"]["get"].get("security").is_none(),
    "public routes carry no operation-level security"
  );
}

#[test]
fn test_three_one_target_rewrites_document() {
  let config = GeneratorConfig::builder().target_version("3.1.0").build();
  let assembler = DocumentAssembler::new(blog_description(), config);
  let (document, _) = assembler.generate().expect("generation succeeds");

  assert_eq!(document["openapi"], "3.1.0");
  assert_eq!(document["webhooks"], json!({}));
  assert_eq!(
    document["components"]["schemas"]["PostResource"]["properties"]["published_at"]["type"],
    json!(["string", "null"]),
  );
}

#[test]
fn test_unrecognized_target_version_keeps_baseline() {
  let config = GeneratorConfig::builder().target_version("3.1").build();
  let assembler = DocumentAssembler::new(blog_description(), config);
  let (document, _) = assembler.generate().expect("generation succeeds");
  assert_eq!(document["openapi"], "3.0.3");
}

#[test]
fn test_empty_description_yields_empty_document() {
  let description = ApiDescription::from_json(json!({
    "info": { "title": "Empty", "version": "0.1.0" }
  }))
  .expect("valid description");

  let assembler = DocumentAssembler::new(description, GeneratorConfig::default());
  let (document, stats) = assembler.generate().expect("generation succeeds");

  assert_eq!(document["paths"], json!({}));
  assert!(document.get("tags").is_none());
  assert_eq!(stats.routes_processed, 0);
  assert_eq!(stats.operations_built, 0);
}

#[test]
fn test_unsupported_method_is_skipped_with_warning() {
  let description = ApiDescription::from_json(json!({
    "info": { "title": "API", "version": "1.0.0" },
    "routes": [
      { "uri": "ping", "methods": ["OPTIONS", "GET"], "analysis": {} }
    ]
  }))
  .expect("valid description");

  let assembler = DocumentAssembler::new(description, GeneratorConfig::default());
  let (document, stats) = assembler.generate().expect("generation succeeds");

  assert!(document["paths"]["/ping"]["get"].is_object());
  assert!(document["paths"]["/ping"].get("options").is_none());
  assert!(matches!(
    stats.warnings.as_slice(),
    [GenerationWarning::UnsupportedHttpMethod { .. }],
  ));
}

#[test]
fn test_missing_resource_reports_broken_reference() {
  let description = ApiDescription::from_json(json!({
    "info": { "title": "API", "version": "1.0.0" },
    "routes": [
      {
        "uri": "ghosts",
        "methods": ["GET"],
        "analysis": { "resource": "App\\Http\\Resources\\GhostResource" }
      }
    ]
  }))
  .expect("valid description");

  let assembler = DocumentAssembler::new(description, GeneratorConfig::default());
  let (_, stats) = assembler.generate().expect("generation succeeds");

  assert!(stats.warnings.iter().any(|warning| matches!(
    warning,
    GenerationWarning::BrokenSchemaReferences { names } if names.contains("GhostResource")
  )));
}

#[test]
fn test_derived_operation_id() {
  let description = ApiDescription::from_json(json!({
    "info": { "title": "API", "version": "1.0.0" },
    "routes": [
      { "uri": "api/v1/posts/{post}/comments", "methods": ["GET"], "analysis": {} }
    ]
  }))
  .expect("valid description");

  let assembler = DocumentAssembler::new(description, GeneratorConfig::default());
  let (document, _) = assembler.generate().expect("generation succeeds");

  assert_eq!(
    document["paths"]["/api/v1/posts/{post}/comments"]["get"]["operationId"],
    "get_api_v1_posts_post_comments",
  );
}

#[test]
fn test_boundary_error_carries_json_path() {
  let error = ApiDescription::from_json(json!({
    "info": { "title": "API", "version": "1.0.0" },
    "routes": [{ "uri": "x", "methods": ["GET"], "analysis": { "successStatus": "created" } }]
  }))
  .expect_err("non-numeric status must fail at the boundary");

  assert!(error.to_string().contains("successStatus"), "unexpected error: {error}");
}
