//! Integration tests for the resource graph.
//!
//! Tests cover:
//! - Response classification through `QueryBuilder::get`
//! - `Relation::get` re-fetching on every call
//! - Lazy, cached relationship loading
//! - Change-driven `delete` and `update_relationships`
//! - Whole-resource `update` and `create`
//! - Collection traversal with `get_all` and `ResourceSet::fetch_all`

use jsonapi_client::{
    ApiUrl, ClientConfig, Document, QueryBuilder, RelationshipValue, Resource, ResourceError,
    ResourceIdentifier, RestClient, StaticToken,
};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RestClient {
    let config = ClientConfig::builder()
        .api_url(ApiUrl::new(server.uri()).unwrap())
        .auth(StaticToken::new("test-token").unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

// ============================================================================
// Response classification
// ============================================================================

#[tokio::test]
async fn test_get_single_resource_with_attributes() {
    let server = MockServer::start().await;
    let attributes = json!({"title": "Hello", "views": 10, "tags": ["a", "b"]});

    Mock::given(method("GET"))
        .and(path("/articles/1"))
        .respond_with(ok_json(json!({
            "data": {"type": "articles", "id": "1", "attributes": attributes}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let document = QueryBuilder::new("/articles/")
        .id("1")
        .get(&client_for(&server))
        .await
        .unwrap();

    let article = document.into_resource().unwrap();
    assert_eq!(article.resource_type(), "articles");
    assert_eq!(article.id(), Some("1"));
    assert_eq!(Value::Object(article.attributes().clone()), attributes);
}

#[tokio::test]
async fn test_get_identifier_only_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/1/relationships/author"))
        .respond_with(ok_json(json!({"data": {"type": "people", "id": "9"}})))
        .mount(&server)
        .await;

    let document = QueryBuilder::new("articles/1/relationships/author")
        .get(&client_for(&server))
        .await
        .unwrap();

    assert!(matches!(document, Document::Identifier(_)));
}

#[tokio::test]
async fn test_get_collection_keeps_order_and_cursor() {
    let server = MockServer::start().await;
    let next = format!("{}/articles/page-2", server.uri());

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ok_json(json!({
            "data": [
                {"type": "articles", "id": "2", "attributes": {"title": "B"}},
                {"type": "articles", "id": "1", "attributes": {"title": "A"}}
            ],
            "links": {"next": next}
        })))
        .mount(&server)
        .await;

    let set = QueryBuilder::new("articles")
        .get(&client_for(&server))
        .await
        .unwrap()
        .into_set()
        .unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set[0].id(), Some("2"));
    assert_eq!(set[1].id(), Some("1"));
    assert_eq!(set.next_link(), Some(next.as_str()));
}

#[tokio::test]
async fn test_missing_data_is_an_error_not_an_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ok_json(json!({"meta": {"total": 0}})))
        .mount(&server)
        .await;

    let error = QueryBuilder::new("articles")
        .get(&client_for(&server))
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::Http(_)));
}

// ============================================================================
// Relations and relationships
// ============================================================================

#[tokio::test]
async fn test_relation_get_refetches_every_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/1/comments"))
        .respond_with(ok_json(json!({
            "data": [{"type": "comments", "id": "5", "attributes": {"body": "First!"}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let article = ResourceIdentifier::new("articles", "1");
    let comments = article.related("comments");

    let first = comments.get(&client).await.unwrap();
    let second = comments.get(&client).await.unwrap();

    assert_eq!(first.as_set().map(|s| s.len()), Some(1));
    assert_eq!(second.as_set().map(|s| s.len()), Some(1));
    assert!(article.changed_relationships().is_empty());
}

#[tokio::test]
async fn test_relationship_is_fetched_once_and_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/1/relationships/tags"))
        .respond_with(ok_json(json!({
            "data": [{"type": "tags", "id": "1"}, {"type": "tags", "id": "2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut article = ResourceIdentifier::new("articles", "1");

    let tags = article.relationship(&client, "tags").await.unwrap();
    assert!(tags.is_fetched());
    assert_eq!(
        tags.linkage(),
        json!([{"type": "tags", "id": "1"}, {"type": "tags", "id": "2"}])
    );

    let again = article.relationship(&client, "tags").await.unwrap();
    assert_eq!(again.identifiers().len(), 2);
    assert!(article.changed_relationships().is_empty());
}

#[tokio::test]
async fn test_empty_to_one_relationship_is_unset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/1/relationships/author"))
        .respond_with(ok_json(json!({"data": null})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut article = ResourceIdentifier::new("articles", "1");

    let author = article.relationship(&client, "author").await.unwrap();
    assert!(author.value().is_unset());
    assert_eq!(author.linkage(), Value::Null);
}

#[tokio::test]
async fn test_locally_set_relationship_is_not_fetched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ok_json(json!({"data": null})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut article = ResourceIdentifier::new("articles", "1");
    article.set_relationship("author", ResourceIdentifier::new("people", "3"));

    let author = article.relationship(&client, "author").await.unwrap();
    assert!(!author.is_fetched());
    assert!(matches!(author.value(), RelationshipValue::Single(_)));
}

#[tokio::test]
async fn test_relationship_on_unsaved_identifier_needs_id() {
    let server = MockServer::start().await;
    let mut draft = ResourceIdentifier::unsaved("articles");

    let error = draft
        .relationship(&client_for(&server), "author")
        .await
        .unwrap_err();
    assert!(matches!(error, ResourceError::MissingId { .. }));
}

// ============================================================================
// Change-driven writes
// ============================================================================

#[tokio::test]
async fn test_delete_without_changes_deletes_resource() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut article = ResourceIdentifier::new("articles", "1");
    assert!(article.delete(&client_for(&server)).await.unwrap());
}

#[tokio::test]
async fn test_delete_with_two_changed_relationships() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/articles/1/relationships/tags"))
        .and(body_json(json!({
            "data": [{"type": "tags", "id": "4"}, {"type": "tags", "id": "5"}]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/articles/1/relationships/author"))
        .and(body_json(json!({"data": {"type": "people", "id": "9"}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut article = ResourceIdentifier::new("articles", "1");
    article
        .set_relationship(
            "tags",
            vec![
                ResourceIdentifier::new("tags", "4"),
                ResourceIdentifier::new("tags", "5"),
            ],
        )
        .set_relationship("author", ResourceIdentifier::new("people", "9"));

    assert!(article.delete(&client_for(&server)).await.unwrap());
    assert!(article.changed_relationships().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.path().ends_with("/tags"));
    assert!(requests[1].url.path().ends_with("/author"));
}

#[tokio::test]
async fn test_delete_aborts_on_first_failure() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/articles/1/relationships/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{"detail": "boom"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/articles/1/relationships/author"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut article = ResourceIdentifier::new("articles", "1");
    article
        .set_relationship("tags", vec![ResourceIdentifier::new("tags", "4")])
        .set_relationship("author", ResourceIdentifier::new("people", "9"));

    let error = article.delete(&client_for(&server)).await.unwrap_err();
    assert_eq!(error.api_error().map(|e| e.status), Some(500));
    assert_eq!(error.api_error().map(|e| e.message()), Some("boom".to_string()));

    // Nothing is forgotten after a failure.
    assert_eq!(article.changed_relationships().len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_unsaved_identifier_needs_id() {
    let server = MockServer::start().await;
    let mut draft = ResourceIdentifier::unsaved("articles");

    let error = draft.delete(&client_for(&server)).await.unwrap_err();
    assert!(matches!(
        error,
        ResourceError::MissingId { operation: "delete", .. }
    ));
}

#[tokio::test]
async fn test_update_relationships_patches_each_change() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/articles/1/relationships/author"))
        .and(body_json(json!({"data": {"type": "people", "id": "2"}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut article = ResourceIdentifier::new("articles", "1");

    assert!(!article.update_relationships(&client).await.unwrap());

    article.set_relationship("author", ResourceIdentifier::new("people", "2"));
    assert!(article.update_relationships(&client).await.unwrap());
    assert!(article.changed_relationships().is_empty());
}

#[tokio::test]
async fn test_update_sends_attributes_and_changed_relationships() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/1"))
        .respond_with(ok_json(json!({
            "data": {"type": "articles", "id": "1", "attributes": {"title": "Old"}}
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/articles/1"))
        .and(body_json(json!({"data": {
            "type": "articles",
            "id": "1",
            "attributes": {"title": "New"},
            "relationships": {"author": {"data": {"type": "people", "id": "9"}}}
        }})))
        .respond_with(ok_json(json!({
            "data": {"type": "articles", "id": "1", "attributes": {"title": "New"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut article = QueryBuilder::new("articles")
        .id("1")
        .get(&client)
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    article
        .set_attribute("title", "New")
        .set_relationship("author", ResourceIdentifier::new("people", "9"));

    let updated = article.update(&client).await.unwrap().unwrap();
    assert_eq!(
        updated.as_resource().and_then(|r| r.attribute("title")),
        Some(&json!("New"))
    );
    assert!(article.changed_relationships().is_empty());
}

#[tokio::test]
async fn test_create_posts_to_resource_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(body_json(json!({"data": {
            "type": "articles",
            "attributes": {"title": "Draft"}
        }})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"type": "articles", "id": "77", "attributes": {"title": "Draft"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut attributes = Map::new();
    attributes.insert("title".to_string(), json!("Draft"));
    let mut draft = Resource::new(ResourceIdentifier::unsaved("articles"), attributes);

    let created = draft.create(&client_for(&server)).await.unwrap().unwrap();
    assert_eq!(created.identifier().and_then(|i| i.id()), Some("77"));
}

// ============================================================================
// Collection traversal
// ============================================================================

#[tokio::test]
async fn test_get_all_and_fetch_all_walk_every_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ok_json(json!({
            "data": [{"type": "articles", "id": "1", "attributes": {}}],
            "links": {"next": format!("{base}/articles/page-2")}
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles/page-2"))
        .respond_with(ok_json(json!({
            "data": [{"type": "articles", "id": "2"}],
            "links": {"next": null}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let all = QueryBuilder::new("articles").get_all(&client).await.unwrap();
    let ids: Vec<_> = all.iter().filter_map(|r| r.id()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(all.next_link().is_none());

    let first_page = QueryBuilder::new("articles")
        .get(&client)
        .await
        .unwrap()
        .into_set()
        .unwrap();
    assert_eq!(first_page.len(), 1);

    let everything = first_page.fetch_all(&client).await.unwrap();
    assert_eq!(everything.len(), 2);
    assert!(!everything.has_next());
}

#[tokio::test]
async fn test_fetch_all_resolves_root_relative_link_under_base_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/articles"))
        .respond_with(ok_json(json!({
            "data": [{"type": "articles", "id": "1", "attributes": {}}],
            "links": {"next": "/v1/articles/page-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/articles/page-2"))
        .respond_with(ok_json(json!({
            "data": [{"type": "articles", "id": "2", "attributes": {}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .api_url(ApiUrl::new(format!("{}/v1", server.uri())).unwrap())
        .auth(StaticToken::new("test-token").unwrap())
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();

    let first_page = QueryBuilder::new("articles")
        .get(&client)
        .await
        .unwrap()
        .into_set()
        .unwrap();
    let everything = first_page.fetch_all(&client).await.unwrap();

    let ids: Vec<_> = everything.iter().filter_map(|r| r.id()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}
