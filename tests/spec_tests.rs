#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use http::Method;
use mockbird::{load_spec, MockConfig, MockService};
use std::io::Write;

const YAML_SPEC: &str = r#"openapi: 3.1.0
info:
  title: Test API
  version: "1.0.0"
components:
  schemas:
    Item:
      type: object
      required: [id, name]
      properties:
        id: { type: string, format: uuid }
        name: { type: string }
paths:
  /items:
    get:
      operationId: list_items
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Item'
    post:
      operationId: create_item
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Item'
      responses:
        "201":
          description: Created
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Item'
  /items/{itemId}:
    get:
      operationId: get_item
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Item'
    delete:
      operationId: delete_item
      responses:
        "204":
          description: Deleted
"#;

fn write_temp_spec(ext: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{ext}"))
        .tempfile()
        .unwrap();
    file.write_all(YAML_SPEC.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_spec_yaml_lists_routes() {
    let file = write_temp_spec("yaml");
    let (_, operations) = load_spec(file.path()).unwrap();
    assert_eq!(operations.len(), 4);
    let ids: Vec<_> = operations
        .iter()
        .filter_map(|op| op.operation_id.as_deref())
        .collect();
    assert_eq!(
        ids,
        vec!["list_items", "create_item", "get_item", "delete_item"]
    );
}

#[test]
fn test_load_spec_missing_file_errors() {
    assert!(load_spec("/nonexistent/openapi.yaml").is_err());
}

#[test]
fn test_service_route_listing() {
    let _guard = common::init_tracing();
    let file = write_temp_spec("yml");
    let service = MockService::from_file(file.path(), MockConfig::default()).unwrap();
    assert_eq!(service.route_count(), 4);
    let routes = service.routes();
    assert_eq!(routes[0].method, "GET");
    assert_eq!(routes[0].path, "/items");
    assert_eq!(routes[3].path, "/items/{itemId}");
    assert!(service.handler(&Method::DELETE, "/items/{itemId}").is_some());
}

#[test]
fn test_request_schema_and_required_flag_extracted() {
    let file = write_temp_spec("yaml");
    let (_, operations) = load_spec(file.path()).unwrap();
    let post = operations
        .iter()
        .find(|op| op.method == Method::POST)
        .unwrap();
    assert!(post.request_body_required);
    assert_eq!(
        post.request_schema.as_ref().unwrap()["$ref"],
        "#/components/schemas/Item"
    );
}
