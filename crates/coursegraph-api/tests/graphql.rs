//! End-to-end GraphQL documents against the in-process schema.

use std::{fs, path::Path, sync::Arc};

use coursegraph_api::{CourseSchema, build_schema};
use coursegraph_core::Config;
use coursegraph_store::{Catalog, ContentIndex, ContentStore};
use serde_json::{Value, json};
use tempfile::TempDir;

fn schema_in(dir: &Path) -> CourseSchema {
    let store = ContentStore::new(dir, ContentIndex::new());
    build_schema(Catalog::new(Arc::new(store)))
}

async fn run(schema: &CourseSchema, document: &str) -> Value {
    let response = schema.execute(document).await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors for {document}: {:?}",
        response.errors
    );
    response.data.into_json().expect("data as json")
}

async fn run_err(schema: &CourseSchema, document: &str) -> String {
    let response = schema.execute(document).await;
    assert!(!response.errors.is_empty(), "expected an error for {document}");
    response.errors[0].message.clone()
}

async fn seeded() -> (TempDir, CourseSchema) {
    let dir = tempfile::tempdir().expect("temp dir");
    let schema = schema_in(dir.path());

    run(
        &schema,
        r#"mutation { saveCourse(input: { title: "New Testament" }) { id } }"#,
    )
    .await;
    for (order, title) in ["Unit A", "Unit B"].iter().enumerate() {
        run(
            &schema,
            &format!(
                r#"mutation {{ saveUnit(input: {{ title: "{title}", courseId: "new-testament", unitOrder: {order} }}) {{ id }} }}"#
            ),
        )
        .await;
    }

    (dir, schema)
}

async fn unit_page_ids(schema: &CourseSchema, unit_index: usize) -> Vec<String> {
    let data = run(
        schema,
        r#"{ course(id: "new-testament") { units { id pages { id } } } }"#,
    )
    .await;
    data["course"]["units"][unit_index]["pages"]
        .as_array()
        .expect("pages array")
        .iter()
        .map(|p| p["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_save_course_from_title() {
    let dir = tempfile::tempdir().expect("temp dir");
    let schema = schema_in(dir.path());

    let data = run(
        &schema,
        r#"mutation { saveCourse(input: { title: "New Testament" }) { id title units { id } } }"#,
    )
    .await;
    assert_eq!(
        data["saveCourse"],
        json!({ "id": "new-testament", "title": "New Testament", "units": [] })
    );

    let data = run(&schema, "{ listCourses }").await;
    assert_eq!(data["listCourses"], json!(["new-testament"]));
    assert!(dir.path().join("content/new-testament/course.yaml").is_file());
}

#[tokio::test]
async fn test_save_page_then_read_it_back() {
    let (_dir, schema) = seeded().await;

    run(
        &schema,
        r#"mutation {
            savePage(input: {
                title: "Intro", content: "Hello", pageOrder: 0,
                unitId: "unit-a", courseId: "new-testament"
            }) { id }
        }"#,
    )
    .await;

    let data = run(&schema, r#"{ page(id: "intro") { id title content } }"#).await;
    assert_eq!(
        data["page"],
        json!({ "id": "intro", "title": "Intro", "content": "Hello" })
    );
    assert_eq!(unit_page_ids(&schema, 0).await, vec!["intro"]);
}

#[tokio::test]
async fn test_save_page_moves_instead_of_duplicating() {
    let (_dir, schema) = seeded().await;

    for title in ["One", "Two", "Three"] {
        run(
            &schema,
            &format!(
                r#"mutation {{ savePage(input: {{ title: "{title}", content: "x" }}, courseId: "new-testament", unitId: "unit-a") {{ id }} }}"#
            ),
        )
        .await;
    }
    assert_eq!(unit_page_ids(&schema, 0).await, vec!["three", "two", "one"]);

    run(
        &schema,
        r#"mutation { savePage(input: { id: "one", title: "One", pageOrder: 0 }, courseId: "new-testament", unitId: "unit-a") { id } }"#,
    )
    .await;
    assert_eq!(unit_page_ids(&schema, 0).await, vec!["one", "three", "two"]);
}

#[tokio::test]
async fn test_arguments_override_input_ids() {
    let (_dir, schema) = seeded().await;

    run(
        &schema,
        r#"mutation {
            savePage(
                input: { title: "Intro", content: "Hello", unitId: "unit-a", courseId: "new-testament" },
                unitId: "unit-b"
            ) { id }
        }"#,
    )
    .await;

    assert!(unit_page_ids(&schema, 0).await.is_empty());
    assert_eq!(unit_page_ids(&schema, 1).await, vec!["intro"]);
}

#[tokio::test]
async fn test_delete_page_from_every_unit() {
    let (_dir, schema) = seeded().await;

    for unit in ["unit-a", "unit-b"] {
        run(
            &schema,
            &format!(
                r#"mutation {{ savePage(input: {{ id: "shared", title: "Shared", content: "x" }}, courseId: "new-testament", unitId: "{unit}") {{ id }} }}"#
            ),
        )
        .await;
    }
    assert_eq!(unit_page_ids(&schema, 0).await, vec!["shared"]);
    assert_eq!(unit_page_ids(&schema, 1).await, vec!["shared"]);

    let data = run(
        &schema,
        r#"mutation { deletePage(pageId: "shared", courseId: "new-testament") }"#,
    )
    .await;
    assert_eq!(data["deletePage"], json!(true));
    assert!(unit_page_ids(&schema, 0).await.is_empty());
    assert!(unit_page_ids(&schema, 1).await.is_empty());

    let data = run(&schema, r#"{ page(id: "shared") { id } }"#).await;
    assert_eq!(data["page"], Value::Null);
}

#[tokio::test]
async fn test_save_unit_reorders_and_delete_unit() {
    let (_dir, schema) = seeded().await;

    let data = run(
        &schema,
        r#"mutation { saveUnit(input: { id: "unit-b", title: "Unit B", courseId: "new-testament", unitOrder: 0 }) { id } }"#,
    )
    .await;
    assert_eq!(data["saveUnit"]["id"], json!("unit-b"));

    let data = run(&schema, r#"{ listUnits(courseId: "new-testament") }"#).await;
    assert_eq!(data["listUnits"], json!(["unit-b", "unit-a"]));

    let data = run(
        &schema,
        r#"mutation { deleteUnit(unitId: "unit-b", courseId: "new-testament") }"#,
    )
    .await;
    assert_eq!(data["deleteUnit"], json!(true));

    let data = run(
        &schema,
        r#"mutation { deleteUnit(unitId: "unit-b", courseId: "new-testament") }"#,
    )
    .await;
    assert_eq!(data["deleteUnit"], json!(false));

    run(
        &schema,
        r#"mutation { deleteUnit(unitId: "unit-a", courseId: "new-testament") }"#,
    )
    .await;
    let data = run(&schema, r#"{ listUnits(courseId: "new-testament") }"#).await;
    assert_eq!(data["listUnits"], json!([]));
}

#[tokio::test]
async fn test_partial_course_update_keeps_fields() {
    let dir = tempfile::tempdir().expect("temp dir");
    let schema = schema_in(dir.path());

    run(
        &schema,
        r#"mutation { saveCourse(input: { id: "nt", title: "NT", version: "1", subtitle: "Sub", author: "Luke" }) { id } }"#,
    )
    .await;
    let data = run(
        &schema,
        r#"mutation { saveCourse(input: { id: "nt", title: "New Testament" }) { title version subtitle author } }"#,
    )
    .await;

    assert_eq!(
        data["saveCourse"],
        json!({ "title": "New Testament", "version": "1", "subtitle": "Sub", "author": "Luke" })
    );
}

#[tokio::test]
async fn test_bulk_course_save_with_pages() {
    let dir = tempfile::tempdir().expect("temp dir");
    let schema = schema_in(dir.path());

    let data = run(
        &schema,
        r#"mutation {
            saveCourse(input: {
                id: "nt",
                units: [
                    { title: "Gospels", pages: [
                        { title: "Matthew", content: "Book one", pageOrder: 0 },
                        { title: "Missing content" }
                    ] },
                    { id: "letters", title: "Letters" }
                ]
            }) { units { id pages { id content } } }
        }"#,
    )
    .await;

    assert_eq!(
        data["saveCourse"]["units"],
        json!([
            { "id": "gospels", "pages": [{ "id": "matthew", "content": "Book one" }] },
            { "id": "letters", "pages": [] }
        ])
    );
}

#[tokio::test]
async fn test_missing_course_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let schema = schema_in(dir.path());

    let message = run_err(
        &schema,
        r#"mutation { saveUnit(input: { title: "Unit A", courseId: "ghost" }) { id } }"#,
    )
    .await;
    assert_eq!(message, "`ghost` not found");

    let data = run(&schema, r#"{ course(id: "ghost") { id } listUnits(courseId: "ghost") }"#).await;
    assert_eq!(data["course"], Value::Null);
    assert_eq!(data["listUnits"], Value::Null);
}

#[tokio::test]
async fn test_path_like_ids_are_rejected() {
    let (dir, schema) = seeded().await;

    let message = run_err(
        &schema,
        r#"mutation { saveCourse(input: { id: "../escape", title: "Escape" }) { id } }"#,
    )
    .await;
    assert!(message.starts_with(r#"invalid id "../escape""#), "{message}");
    assert!(!dir.path().join("escape").exists());

    run_err(
        &schema,
        r#"mutation { savePage(input: { id: "../../x", title: "X", content: "x" }, courseId: "new-testament", unitId: "unit-a") { id } }"#,
    )
    .await;
    assert!(unit_page_ids(&schema, 0).await.is_empty());
}

#[tokio::test]
async fn test_page_id_colliding_with_course() {
    let (_dir, schema) = seeded().await;

    run_err(
        &schema,
        r#"mutation { savePage(input: { title: "New Testament", content: "x" }, courseId: "new-testament", unitId: "unit-a") { id } }"#,
    )
    .await;
    assert!(unit_page_ids(&schema, 0).await.is_empty());
}

#[tokio::test]
async fn test_open_scans_existing_tree() {
    let dir = tempfile::tempdir().expect("temp dir");
    let course_dir = dir.path().join("content/nt");
    fs::create_dir_all(course_dir.join("pages")).expect("dirs");
    fs::write(
        course_dir.join("course.yaml"),
        "---\nid: nt\ntype: course\ntitle: New Testament\nversion: 2\nunits:\n  - id: gospels\n    title: Gospels\n    type: unit\n    pages:\n      - matthew\n---\n",
    )
    .expect("course");
    fs::write(
        course_dir.join("pages/matthew.mdx"),
        "---\nid: matthew\ntype: page\ntitle: Matthew\n---\n\nThe book of Matthew.\n",
    )
    .expect("page");
    fs::write(course_dir.join("pages/notes.mdx"), "no front-matter here\n").expect("notes");

    let mut config = Config::default();
    config.content.root = dir.path().to_path_buf();
    let store = ContentStore::open(&config).await.expect("open");
    let schema = build_schema(Catalog::new(Arc::new(store)));

    let data = run(
        &schema,
        r#"{ listCourses course(id: "nt") { version units { id pages { id title content } } } }"#,
    )
    .await;

    assert_eq!(data["listCourses"], json!(["nt"]));
    assert_eq!(data["course"]["version"], json!("2"));
    assert_eq!(
        data["course"]["units"],
        json!([{
            "id": "gospels",
            "pages": [{ "id": "matthew", "title": "Matthew", "content": "The book of Matthew." }]
        }])
    );
}
