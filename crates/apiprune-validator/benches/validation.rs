//! Document validation benchmarks.
//!
//! Run with: cargo bench -p apiprune-validator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Map, Value};

use apiprune_validator::{compile_document_schema, validate_document, DocumentSchema};

/// Create a document with `path_count` paths, each returning its own schema.
fn create_document(path_count: usize) -> Value {
    let mut paths = Map::new();
    let mut schemas = Map::new();

    for i in 0..path_count {
        paths.insert(
            format!("/items{i}/{{id}}"),
            json!({
                "get": {
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": { "application/json": {
                                "schema": { "$ref": format!("#/components/schemas/Item{i}") }
                            } }
                        },
                        "default": { "$ref": "#/components/responses/Error" }
                    }
                }
            }),
        );
        schemas.insert(
            format!("Item{i}"),
            json!({ "type": "object", "properties": { "id": { "type": "string" } } }),
        );
    }

    json!({
        "openapi": "3.0.3",
        "info": { "title": "Bench API", "version": "1.0.0" },
        "paths": paths,
        "components": {
            "schemas": schemas,
            "responses": { "Error": { "description": "failure" } }
        }
    })
}

fn bench_schema_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_compilation");

    for schema in DocumentSchema::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(schema),
            &schema,
            |b, schema| b.iter(|| compile_document_schema(black_box(*schema))),
        );
    }

    group.finish();
}

fn bench_document_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_validation");

    for size in [10, 100, 500] {
        let document = create_document(size);
        group.bench_with_input(BenchmarkId::new("paths", size), &document, |b, doc| {
            b.iter(|| validate_document(black_box(doc)))
        });
    }

    group.finish();
}

fn bench_invalid_document(c: &mut Criterion) {
    let mut document = create_document(100);
    document["info"] = json!({ "version": "1.0.0" });

    c.bench_function("invalid_document", |b| {
        b.iter(|| validate_document(black_box(&document)))
    });
}

criterion_group!(
    benches,
    bench_schema_compilation,
    bench_document_validation,
    bench_invalid_document,
);
criterion_main!(benches);
