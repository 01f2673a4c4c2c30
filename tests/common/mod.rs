#![allow(dead_code)]

use chrono::{DateTime, NaiveDateTime};
use proptest::prelude::*;
use serde_json::Value as JsonValue;

pub fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (-2_000_000_000_i64..4_000_000_000_i64, 0_u32..1_000_000_000_u32).prop_map(|(secs, nanos)| {
        DateTime::from_timestamp(secs, nanos)
            .expect("in range")
            .naive_utc()
    })
}

pub fn finite_f64() -> impl Strategy<Value = f64> {
    proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL | proptest::num::f64::ZERO
}

pub fn json_value() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(JsonValue::from),
        finite_f64().prop_map(JsonValue::from),
        ".*".prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            proptest::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|fields| JsonValue::Object(fields.into_iter().collect())),
        ]
    })
}
