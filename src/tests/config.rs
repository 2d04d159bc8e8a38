use super::util::json_to_value;
use crate::{ConfigStore, Value};

fn store() -> ConfigStore {
    ConfigStore::new(json_to_value(
        r#"{"base_url":"http://api.example.org","ssh":{"user":"deploy","key":null},"ports":[80,443]}"#,
    ))
}

#[test]
fn lookup_walks_nested_keys() {
    let config = store();

    assert_eq!(
        Some(&Value::String("http://api.example.org".to_owned())),
        config.lookup("base_url")
    );
    assert_eq!(
        Some(&Value::String("deploy".to_owned())),
        config.lookup("ssh/user")
    );
    assert_eq!(Some(&Value::Null), config.lookup("ssh/key"));
    assert_eq!(Some(&Value::Number(443.0)), config.lookup("ports/1"));
}

#[test]
fn missing_segments_yield_none() {
    let config = store();

    assert_eq!(None, config.lookup("missing"));
    assert_eq!(None, config.lookup("ssh/host"));
    assert_eq!(None, config.lookup("base_url/deeper"));
    assert_eq!(None, ConfigStore::empty().lookup("anything"));
}

#[test]
fn lookup_matches_keys_exactly_not_as_regex() {
    let config = ConfigStore::new(json_to_value(r#"{"users":1,"use(r|rs)":2}"#));

    assert_eq!(Some(&Value::Number(2.0)), config.lookup("use(r|rs)"));
    assert_eq!(Some(&Value::Number(1.0)), config.lookup("users"));
    assert_eq!(None, config.lookup("use.*"));
}
