use crate::{ingest, Error, ResponseFormat, Value};

#[test]
fn format_names_parse() {
    assert_eq!(ResponseFormat::Json, "json".parse::<ResponseFormat>().unwrap());
    assert!(matches!(
        "xml".parse::<ResponseFormat>(),
        Err(Error::Ingestion(_))
    ));
}

#[test]
fn empty_payload_is_an_ingestion_error() {
    assert!(matches!(
        ingest(b"", ResponseFormat::Json),
        Err(Error::Ingestion(_))
    ));
}

#[test]
fn unparseable_payload_is_an_ingestion_error() {
    assert!(matches!(
        ingest(b"{not json", ResponseFormat::Json),
        Err(Error::Ingestion(_))
    ));
}

#[test]
fn json_decodes_into_the_tree_shape() {
    let tree = ingest(
        br#"{"status":"ok","count":3,"rate":1.5,"flag":true,"gone":null,"items":["a"]}"#,
        ResponseFormat::Json,
    )
    .unwrap();

    let Value::Map(entries) = &tree else {
        panic!("expected a map root");
    };
    assert_eq!(6, entries.len());
    assert_eq!(Some(&Value::Number(3.0)), tree.get_child("count"));
    assert_eq!(Some(&Value::Number(1.5)), tree.get_child("rate"));
    assert_eq!(Some(&Value::Boolean(true)), tree.get_child("flag"));
    assert_eq!(Some(&Value::Null), tree.get_child("gone"));
    assert_eq!(
        Some(&Value::Array(vec![Value::String("a".to_owned())])),
        tree.get_child("items")
    );
}

#[test]
fn ingestion_preserves_source_key_order() {
    let tree = ingest(br#"{"zeta":1,"alpha":2,"mid":3}"#, ResponseFormat::Json).unwrap();

    let keys: Vec<String> = tree.entries().into_iter().map(|(k, _)| k).collect();
    assert_eq!(vec!["zeta", "alpha", "mid"], keys);
}

#[test]
fn scalar_and_array_roots_are_accepted() {
    assert_eq!(
        Value::Number(42.0),
        ingest(b"42", ResponseFormat::Json).unwrap()
    );
    assert_eq!(
        Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]),
        ingest(b"[1,2]", ResponseFormat::Json).unwrap()
    );
}
