use picker::{pick_decoded_with_json_config, pick_with_json_config, ErrorKind, Response};
use serde::Deserialize;
use serde_json::{json, Value};

const NESTED: &[u8] = br#"
{
    "foo": 1,
    "bar": 2,
    "test": "Hello, world!",
    "baz": 123.1,
    "array": [
        {"foo": 1, "size" : 1, "test" : { "id" : 1 }},
        {"bar": 2, "size" : 2, "test" : { "id" : 2 }},
        {"baz": 3, "size" : 3, "test" : { "id" : 3 }}
    ],
    "subobj": {
        "foo": 10,
        "subarray": [1,2,3],
        "subsubobj": {
            "bar": 2,
            "baz": 3,
            "array": ["hello", "world"]
        }
    },
    "bool": true
}
"#;

fn single(path: &str, tag: &str) -> String {
    format!(r#"{{"properties": [{{"path": "{}", "type": "{}"}}]}}"#, path, tag)
}

fn as_value(response: &Response) -> Value {
    serde_json::from_str(&response.to_json()).unwrap()
}

#[test]
fn test_first_level_integers() {
    let input = br#"{ "id" : 1, "age" : 14, "path" : "john" }"#;
    let config = r#"{
        "properties" : [
            {"path" : "id", "type" : "i" },
            {"path" : "age", "type" : "i"}
        ]
    }"#;

    let response = pick_with_json_config(input, config).unwrap();
    assert_eq!(as_value(&response), json!({"id": 1, "age": 14}));
}

#[test]
fn test_first_level_scalars() {
    let input = br#"{ "id" : 1, "age" : 14, "name" : "john", "height" : 12.8, "isAdmin" : true }"#;

    let cases = [
        ("height", "f", json!({"height": 12.8})),
        ("isAdmin", "b", json!({"isAdmin": true})),
        ("name", "s", json!({"name": "john"})),
    ];

    for (path, tag, expected) in cases {
        let response = pick_with_json_config(input, &single(path, tag)).unwrap();
        assert_eq!(as_value(&response), expected, "path {}", path);
    }
}

#[test]
fn test_alias_takes_precedence() {
    let input = br#"{ "height" : 12.8 }"#;
    let config = r#"{"properties": [{"path": "height", "type": "f", "alias": "h"}]}"#;

    let response = pick_with_json_config(input, config).unwrap();
    assert_eq!(as_value(&response), json!({"h": 12.8}));
}

#[test]
fn test_first_level_object() {
    let input = br#"{ "id" : 1, "address" : {"country" : "india", "pin" : 600041 } }"#;

    let response = pick_with_json_config(input, &single("address", "o")).unwrap();
    assert_eq!(
        as_value(&response),
        json!({"address": {"country": "india", "pin": 600041}})
    );
}

#[test]
fn test_first_level_scalar_arrays() {
    let input = br#"{
        "marks" : [1,2,3],
        "heights" : [1.2,2.4,3.4],
        "tags" : ["fair", "asian", "tall"],
        "hits" : [false, true, true, false]
    }"#;

    let cases = [
        ("marks", "[i]", json!({"marks": [1, 2, 3]})),
        ("heights", "[f]", json!({"heights": [1.2, 2.4, 3.4]})),
        ("tags", "[s]", json!({"tags": ["fair", "asian", "tall"]})),
        ("hits", "[b]", json!({"hits": [false, true, true, false]})),
    ];

    for (path, tag, expected) in cases {
        let response = pick_with_json_config(input, &single(path, tag)).unwrap();
        assert_eq!(as_value(&response), expected, "path {}", path);
    }
}

#[test]
fn test_first_level_array_of_objects() {
    let input = br#"{
        "url" : "http://foo.com",
        "properties" : [
            {"path" : "id", "type" : "i" },
            {"path" : "age", "type" : "i"}
        ]
    }"#;

    let response = pick_with_json_config(input, &single("properties", "[o]")).unwrap();
    assert_eq!(
        as_value(&response),
        json!({"properties": [{"path": "id", "type": "i"}, {"path": "age", "type": "i"}]})
    );
}

#[test]
fn test_nested_values() {
    let cases = [
        ("subobj/subsubobj/bar", "i", json!({"bar": 2})),
        ("subobj/foo", "i", json!({"foo": 10})),
        ("subobj/subsubobj/array", "[s]", json!({"array": ["hello", "world"]})),
    ];

    for (path, tag, expected) in cases {
        let response = pick_with_json_config(NESTED, &single(path, tag)).unwrap();
        assert_eq!(as_value(&response), expected, "path {}", path);
    }
}

#[test]
fn test_values_from_object_array() {
    let response = pick_with_json_config(NESTED, &single("array/size", "[]o")).unwrap();
    assert_eq!(as_value(&response), json!({"size": [1, 2, 3]}));
}

#[test]
fn test_object_property_from_object_array() {
    let response = pick_with_json_config(NESTED, &single("array/test/id", "[]op")).unwrap();
    assert_eq!(as_value(&response), json!({"id": [1, 2, 3]}));
}

#[test]
fn test_object_property_skips_elements_without_it() {
    let input = br#"{"array":[{"foo":1,"test":{"id":1}},{"bar":2},{"baz":3,"test":{"id":3}}]}"#;

    let response = pick_with_json_config(input, &single("array/test/id", "[]op")).unwrap();
    assert_eq!(as_value(&response), json!({"id": [1, 3]}));
}

#[test]
fn test_pick_from_root_array_of_objects() {
    let input = br#"[{"id" : 1}, {"id" : 2}, {"id" : 3}]"#;

    let response = pick_with_json_config(input, &single("./id", "[]op")).unwrap();
    assert_eq!(as_value(&response), json!({"id": [1, 2, 3]}));
}

#[test]
fn test_missing_path_fails_without_response() {
    let err = pick_with_json_config(br#"{"id": 1}"#, &single("missing", "i")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathNotFound);
    assert_eq!(err.property_name(), Some("missing"));
}

#[test]
fn test_error_is_wrapped_with_alias() {
    let config = r#"{"properties": [
        {"path": "foo", "type": "i"},
        {"path": "test", "type": "i", "alias": "greeting"}
    ]}"#;

    let err = pick_with_json_config(NESTED, config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.property_name(), Some("greeting"));
    assert!(err.to_string().contains("'greeting'"));
}

#[test]
fn test_short_slice_path_is_invalid() {
    let err = pick_with_json_config(NESTED, &single("array/id", "[]op")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSliceKey);
}

#[test]
fn test_strict_slice_policy_fails() {
    let input = br#"{"array":[{"size":1},{"other":2}]}"#;
    let config = r#"{
        "properties": [{"path": "array/size", "type": "[]o"}],
        "missing_slice_field": "fail"
    }"#;

    let err = pick_with_json_config(input, config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathNotFound);
}

#[test]
fn test_pick_with_deserialization() {
    let input = br#"[{"id" : 1}, {"id" : 2}, {"id" : 3}]"#;

    let actual: Vec<i32> =
        pick_decoded_with_json_config(input, &single("./id", "[]op"), Some("id")).unwrap();
    assert_eq!(actual, vec![1, 2, 3]);
}

#[test]
fn test_whole_response_deserialization() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        id: u32,
        name: String,
        marks: Vec<u8>,
    }

    let input = br#"{"id": 7, "profile": {"name": "john"}, "marks": [1, 2, 3]}"#;
    let config = r#"{"properties": [
        {"path": "id", "type": "i"},
        {"path": "profile/name", "type": "s"},
        {"path": "marks", "type": "[i]"}
    ]}"#;

    let person: Person = pick_decoded_with_json_config(input, config, None).unwrap();
    assert_eq!(
        person,
        Person {
            id: 7,
            name: "john".to_string(),
            marks: vec![1, 2, 3],
        }
    );
}

#[test]
fn test_deserialization_of_unknown_name() {
    let err = pick_decoded_with_json_config::<Vec<i32>>(
        br#"[{"id": 1}]"#,
        &single("./id", "[]op"),
        Some("ids"),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PropertyNotFound);
}
