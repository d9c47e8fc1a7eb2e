use super::*;
use crate::{config::KeyConfig, test_fixtures::PERSON_MODEL};

fn person_keys() -> KeySpace {
    KeySpace::new(&PERSON_MODEL, KeyConfig::default())
}

#[test]
fn encode_value_escapes_delimiters() {
    assert_eq!(encode_value("NYC"), "NYC");
    assert_eq!(encode_value("New York"), "New%20York");
    assert_eq!(encode_value("a:b+c#d~e"), "a%3Ab%2Bc%23d%7Ee");
    assert_eq!(encode_value("1.5_x-y"), "1.5_x-y");
    assert_eq!(encode_value("é"), "%C3%A9");
}

#[test]
fn base_keys_follow_default_layout() {
    let keys = person_keys();

    assert_eq!(keys.all().as_str(), "Person:all");
    assert_eq!(keys.value("city", "NYC").as_str(), "Person:city:NYC");
    assert_eq!(keys.sorted("age").as_str(), "Person:age");
    assert_eq!(keys.hash("7").as_str(), "Person:7");
    assert_eq!(keys.sort_pattern("age"), "Person:*->age");
}

#[test]
fn intersection_key_is_independent_of_input_order() {
    let keys = person_keys();
    let city = keys.value("city", "NYC");
    let active = keys.value("active", "1");

    let a = keys.intersection(&[city.clone(), active.clone()]);
    let b = keys.intersection(&[active.clone(), city.clone(), active]);

    assert_eq!(a, b);
    assert_eq!(
        a.as_str(),
        "~Person:all+Person:active:1+Person:city:NYC"
    );
}

#[test]
fn ordered_keys_append_term() {
    let keys = person_keys();
    let source = keys.all().clone();

    assert_eq!(keys.ordered(&source, "age").as_str(), "Person:all#age");
    assert_eq!(keys.ordered(&source, "-age").as_str(), "Person:all#-age");
    assert_eq!(keys.unordered(&source).as_str(), "Person:all#");
}

#[test]
fn custom_config_changes_every_derived_key() {
    let config = KeyConfig::from_toml(
        r#"
        separator = "/"
        all_suffix = "ids"
        composite_prefix = "&"
        composite_join = ","
        order_marker = "@"
        "#,
    )
    .expect("config should parse");
    let keys = KeySpace::new(&PERSON_MODEL, config);

    assert_eq!(keys.all().as_str(), "Person/ids");
    let inter = keys.intersection(&[keys.value("city", "LA")]);
    assert_eq!(inter.as_str(), "&Person/ids,Person/city/LA");
    assert_eq!(keys.ordered(&inter, "age").as_str(), "&Person/ids,Person/city/LA@age");
    assert_eq!(keys.sort_pattern("age"), "Person/*->age");
}
