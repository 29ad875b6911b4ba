//! Tests for query graph construction, compilation and rendering

use std::sync::Arc;

use super::*;
use crate::error::GraphError;
use crate::meta::{ModelDescriptor, ModelKind, SubjectType};
use crate::ordering::{OrderKey, Ordering};
use crate::query_set::{Directive, QuerySet, QuerySetAdapter};

fn order() -> SubjectType {
    Arc::new(
        ModelDescriptor::new("Order")
            .fields(["id", "total", "placed_at"])
            .foreign_key("customer", "Customer")
            .has_many("items", "LineItem"),
    )
}

fn customer() -> SubjectType {
    Arc::new(
        ModelDescriptor::new("Customer")
            .fields(["id", "name"])
            .foreign_key("region", "Region")
            .has_many("orders", "Order"),
    )
}

fn region() -> SubjectType {
    Arc::new(
        ModelDescriptor::new("Region")
            .fields(["id", "code"])
            .has_many("stores", "Store"),
    )
}

fn line_item() -> SubjectType {
    Arc::new(ModelDescriptor::new("LineItem").fields(["id", "sku", "qty"]))
}

fn items_graph() -> QueryGraph {
    QueryGraph::builder(line_item())
        .fields(["sku", "qty"])
        .order(false)
        .build()
        .unwrap()
}

#[test]
fn test_fields_are_kept_in_order() {
    let graph = QueryGraph::builder(order())
        .fields(["total", "id", "placed_at"])
        .build()
        .unwrap();

    assert_eq!(graph.field_names(), &["total", "id", "placed_at"]);
    assert!(graph.select_related().is_empty());
    assert!(graph.prefetch().is_empty());
    assert_eq!(graph.ordering(), &Ordering::Default);
    assert_eq!(graph.model_name(), "Order");
}

#[test]
fn test_pk_requires_ordering_off() {
    let err = QueryGraph::builder(order()).field("pk").build().unwrap_err();
    assert_eq!(
        err,
        GraphError::OrderingConflict {
            model: "Order".to_string()
        }
    );

    let err = QueryGraph::builder(order())
        .field("pk")
        .order("-total")
        .build()
        .unwrap_err();
    assert!(matches!(err, GraphError::OrderingConflict { .. }));

    let graph = QueryGraph::builder(order()).field("pk").order(false).build().unwrap();
    assert_eq!(graph.field_names(), &["pk"]);
    assert_eq!(graph.ordering(), &Ordering::Unordered);
}

#[test]
fn test_unknown_fields_are_all_reported() {
    let err = QueryGraph::builder(order())
        .fields(["id", "colour", "total", "size", "colour"])
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        GraphError::UnknownFieldName {
            model: "Order".to_string(),
            names: vec!["colour".to_string(), "size".to_string()],
        }
    );
    assert_eq!(err.to_string(), "Invalid field names for Order: colour, size");
}

#[test]
fn test_name_collision_reports_exactly_the_overlap() {
    let region_graph = QueryGraph::builder(region()).field("code").build().unwrap();
    let name_graph = QueryGraph::builder(region()).field("id").build().unwrap();

    let err = QueryGraph::builder(customer())
        .fields(["id", "region", "name"])
        .relation("region", region_graph)
        .relation("name", name_graph)
        .build()
        .unwrap_err();

    assert_eq!(err.names(), &["region", "name"]);
    assert!(matches!(err, GraphError::NameCollision { .. }));
}

#[test]
fn test_foreign_key_is_joined_and_collection_is_prefetched() {
    let customer_graph = QueryGraph::builder(customer()).field("name").build().unwrap();
    let items = Arc::new(items_graph());

    let graph = QueryGraph::builder(order())
        .fields(["id", "total"])
        .relation("customer", customer_graph)
        .relation("items", Arc::clone(&items))
        .build()
        .unwrap();

    assert_eq!(graph.select_related(), &["customer"]);
    assert_eq!(graph.field_names(), &["id", "total", "customer__name"]);
    assert!(Arc::ptr_eq(graph.prefetch_graph("items").unwrap(), &items));
}

#[test]
fn test_nested_joins_flatten_transitively() {
    let region_graph = QueryGraph::builder(region()).field("code").build().unwrap();
    let customer_graph = QueryGraph::builder(customer())
        .field("name")
        .relation("region", region_graph)
        .build()
        .unwrap();
    let graph = QueryGraph::builder(order())
        .field("id")
        .relation("customer", customer_graph)
        .build()
        .unwrap();

    assert_eq!(graph.select_related(), &["customer", "customer__region"]);
    assert_eq!(
        graph.field_names(),
        &["id", "customer__name", "customer__region__code"]
    );
}

#[test]
fn test_prefetches_are_rekeyed_through_joins() {
    let stores = Arc::new(
        QueryGraph::builder(Arc::new(ModelDescriptor::new("Store").field("city")))
            .field("city")
            .build()
            .unwrap(),
    );
    let region_graph = QueryGraph::builder(region())
        .field("code")
        .relation("stores", Arc::clone(&stores))
        .build()
        .unwrap();
    let orders = Arc::new(QueryGraph::builder(order()).field("total").build().unwrap());
    let customer_graph = QueryGraph::builder(customer())
        .field("name")
        .relation("region", region_graph)
        .relation("orders", Arc::clone(&orders))
        .build()
        .unwrap();

    assert_eq!(
        customer_graph.prefetch().keys().collect::<Vec<_>>(),
        vec!["orders", "region__stores"]
    );

    let graph = QueryGraph::builder(order())
        .field("id")
        .relation("customer", customer_graph)
        .relation("items", items_graph())
        .build()
        .unwrap();

    assert_eq!(
        graph.prefetch().keys().collect::<Vec<_>>(),
        vec!["items", "customer__orders", "customer__region__stores"]
    );
    assert!(Arc::ptr_eq(graph.prefetch_graph("customer__orders").unwrap(), &orders));
    assert!(Arc::ptr_eq(
        graph.prefetch_graph("customer__region__stores").unwrap(),
        &stores
    ));
}

#[test]
fn test_duplicate_flattened_prefetch_path_is_rejected() {
    let orders = QueryGraph::builder(order()).field("total").build().unwrap();
    let customer_graph = QueryGraph::builder(customer())
        .field("name")
        .relation("orders", orders.clone())
        .build()
        .unwrap();

    let err = QueryGraph::builder(order())
        .field("id")
        .relation("customer__orders", orders)
        .relation("customer", customer_graph)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        GraphError::DuplicatePrefetchPath {
            model: "Order".to_string(),
            path: "customer__orders".to_string(),
        }
    );
}

#[test]
fn test_redefined_relation_keeps_first_position() {
    let first = QueryGraph::builder(line_item()).field("sku").build().unwrap();
    let graph = QueryGraph::builder(order())
        .field("id")
        .relation("items", first)
        .relation("customer", QueryGraph::builder(customer()).field("name").build().unwrap())
        .relation("items", items_graph())
        .build()
        .unwrap();

    assert_eq!(graph.prefetch().keys().collect::<Vec<_>>(), vec!["items"]);
    assert_eq!(graph.prefetch_graph("items").unwrap().field_names(), &["sku", "qty"]);
}

#[test]
fn test_new_matches_builder() {
    let built = QueryGraph::builder(order())
        .fields(["id", "total"])
        .order(["-total", "id"])
        .relation("items", items_graph())
        .build()
        .unwrap();
    let direct = QueryGraph::new(
        order(),
        ["id", "total"],
        vec!["-total", "id"],
        [("items", items_graph())],
    )
    .unwrap();

    assert_eq!(built, direct);
    assert_eq!(
        direct.ordering().explicit_keys(),
        Some(&[OrderKey::new("-total"), OrderKey::new("id")][..])
    );
}

#[test]
fn test_describe_renders_nested_graph() {
    let region_graph = QueryGraph::builder(region()).field("code").build().unwrap();
    let customer_graph = QueryGraph::builder(customer())
        .field("name")
        .relation("region", region_graph)
        .build()
        .unwrap();
    let graph = QueryGraph::builder(order())
        .fields(["id", "total"])
        .order("-total")
        .relation("customer", customer_graph)
        .relation("items", items_graph())
        .build()
        .unwrap();

    let expected = "Order\n  joins: customer, customer__region\n  fields: id, total, customer__name, customer__region__code\n  order by: -total\n  eager-loaded:\n    items: LineItem\n      fields: sku, qty";

    assert_eq!(graph.describe(), expected);
    assert_eq!(graph.describe(), graph.describe());
    assert_eq!(graph.to_string(), expected);
}

#[test]
fn test_describe_minimal_graph() {
    let graph = QueryGraph::builder(line_item()).build().unwrap();
    assert_eq!(graph.describe(), "LineItem\n  fields: ");
}

#[test]
fn test_compile_order_with_items() {
    let graph = QueryGraph::builder(order())
        .fields(["id", "total"])
        .relation("items", items_graph())
        .build()
        .unwrap();

    let query = graph.compile(&QuerySetAdapter::new(), None).unwrap();

    assert_eq!(query.model(), "Order");
    assert!(query.joins().is_empty());
    assert_eq!(query.selected_fields(), Some(&["id".to_string(), "total".to_string()][..]));
    assert_eq!(query.effective_ordering(), Ordering::Default);
    assert_eq!(query.directive_names(), vec!["only", "prefetch_related"]);

    let items = query.prefetch("items").unwrap();
    assert_eq!(items.model(), "LineItem");
    assert_eq!(items.selected_fields(), Some(&["sku".to_string(), "qty".to_string()][..]));
    assert_eq!(items.directives().last(), Some(&Directive::ClearOrdering));
}

#[test]
fn test_compile_directive_order() {
    let customer_graph = QueryGraph::builder(customer()).field("name").build().unwrap();
    let graph = QueryGraph::builder(order())
        .field("total")
        .order(["-total"])
        .relation("customer", customer_graph)
        .relation("items", items_graph())
        .build()
        .unwrap();

    let query = graph.compile_default(&QuerySetAdapter::new()).unwrap();

    assert_eq!(
        query.directive_names(),
        vec!["select_related", "only", "order_by", "prefetch_related"]
    );
    assert_eq!(
        query.to_string(),
        "Order.select_related(customer).only(total, customer__name).order_by(-total).prefetch_related(items)"
    );
}

#[test]
fn test_compile_starts_from_seed() {
    let graph = QueryGraph::builder(order()).field("id").order(false).build().unwrap();
    let seed = QuerySet::new("Order").order_by(["placed_at"]);

    let query = graph.compile(&QuerySetAdapter::new(), Some(seed)).unwrap();

    assert_eq!(query.directive_names(), vec!["order_by", "only", "clear_ordering"]);
    assert_eq!(query.effective_ordering(), Ordering::Unordered);
}

#[test]
fn test_compile_skips_field_restriction_for_polymorphic_models() {
    let asset: SubjectType = Arc::new(
        ModelDescriptor::new("Asset")
            .with_kind(ModelKind::Polymorphic)
            .fields(["id", "label"]),
    );
    let graph = QueryGraph::builder(asset).field("label").build().unwrap();

    let query = graph.compile(&QuerySetAdapter::new(), None).unwrap();

    assert!(query.directives().is_empty());
    assert_eq!(query.selected_fields(), None);
}

#[test]
fn test_compile_is_deterministic_for_equal_graphs() {
    let build = || {
        QueryGraph::builder(order())
            .fields(["id", "total"])
            .order("-placed_at")
            .relation("customer", QueryGraph::builder(customer()).field("name").build().unwrap())
            .relation("items", items_graph())
            .build()
            .unwrap()
    };
    let (a, b) = (build(), build());
    assert_eq!(a, b);

    let adapter = QuerySetAdapter::new();
    let seed = QuerySet::new("Order");
    assert_eq!(
        a.compile(&adapter, Some(seed.clone())).unwrap(),
        b.compile(&adapter, Some(seed)).unwrap()
    );
}

#[test]
fn test_graphs_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryGraph>();

    let graph = Arc::new(items_graph());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = Arc::clone(&graph);
            std::thread::spawn(move || graph.describe())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), graph.describe());
    }
}
