use std::str::FromStr;

use rust_data_columns::column::{DecimalColumn, DoubleColumn};
use rust_data_columns::domain::{ColumnType, DecimalType};
use rust_data_columns::types::CellInput;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn obs() -> DecimalColumn {
    let values: Vec<CellInput> = vec![
        1200.into(),
        CellInput::Missing,
        3456.into(),
        12.1.into(),
        3456.4.into(),
        985.into(),
        1211.9.into(),
        CellInput::Missing,
        12.1.into(),
    ];
    DecimalColumn::create("values", values).unwrap()
}

fn decimals(values: &[Option<&str>]) -> Vec<Option<BigDecimal>> {
    values.iter().map(|v| v.map(dec)).collect()
}

#[test]
fn get_string_renders_missing_as_empty() {
    let obs = obs();
    assert_eq!(obs.get_string(3).unwrap(), "12.1");
    assert_eq!(obs.get_string(1).unwrap(), "");
}

#[test]
fn size_counts_missing_rows() {
    assert_eq!(obs().size(), 9);
}

#[test]
fn copy_and_set_missing() {
    let obs = obs();
    let mut copy = obs.copy();
    copy.set_missing(0).unwrap();
    assert_eq!(copy.get(0).unwrap(), DecimalType::missing_value_indicator());
    assert_eq!(obs.get(0).unwrap(), Some(dec("1200")));
}

#[test]
fn copy_and_set_with_predicate() {
    let mut copy = obs().copy();
    let replacement = DoubleColumn::from_values(
        "replacement",
        vec![1200.0, 2.0, 3456.0, 12.1, 3456.4, 985.0, 1211.9, 8.0, 12.1],
    );
    copy.set_if(|v| v.is_none(), &replacement).unwrap();
    assert_eq!(copy.get(1).unwrap(), Some(dec("2.0")));
    assert_eq!(copy.get(7).unwrap(), Some(dec("8.0")));
    // Doubles keep at least one fraction digit on their way into the decimal domain.
    assert_eq!(copy.get_string(1).unwrap(), "2.0");
    assert_eq!(copy.get_string(7).unwrap(), "8.0");
    assert_eq!(copy.count_missing(), 0);
}

#[test]
fn copy_and_set_with_string() {
    let mut copy = obs().copy();
    copy.set_parsed(3, "-23.8", &DecimalType::default_parser())
        .unwrap();
    assert_eq!(copy.get(3).unwrap(), Some(dec("-23.8")));
}

#[test]
fn set_with_malformed_string_leaves_row_unchanged() {
    let mut copy = obs().copy();
    let err = copy
        .set_parsed(3, "-23.8.1", &DecimalType::default_parser())
        .unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(copy.get(3).unwrap(), Some(dec("12.1")));
}

#[test]
fn set_from_column() {
    let mut copy = obs().copy();
    let another = DecimalColumn::from_values("another", vec![Some(BigDecimal::from(111)), Some(dec("3.14"))]);
    copy.set_from(5, &another, 1).unwrap();
    assert_eq!(copy.get(5).unwrap(), Some(dec("3.14")));
    assert!(copy.set_from(5, &another, 2).unwrap_err().is_index_error());
}

#[test]
fn select_greater_than() {
    let obs = obs();
    let selected = obs.select(&obs.is_greater_than(1000.0).unwrap()).unwrap();
    assert_eq!(selected.size(), 4);
}

#[test]
fn is_not_in() {
    let obs = obs();
    let excluded = obs
        .is_not_in([BigDecimal::from(1200), dec("12.1")])
        .unwrap();
    assert_eq!(excluded.size(), 6, "all not 1200 or 12.1");
    let excluded = obs.is_not_in([None::<BigDecimal>]).unwrap();
    assert_eq!(excluded.size(), 7, "all not missing");
}

#[test]
fn is_in() {
    let obs = obs();
    let included = obs.is_in([BigDecimal::from(1200), dec("12.1")]).unwrap();
    assert_eq!(included.size(), 3, "contains 1200 and 12.1");
    let included = obs.is_in([None::<BigDecimal>]).unwrap();
    assert_eq!(included.size(), 2, "number of missing");
}

#[test]
fn subset_of_rows() {
    let subset = obs().subset(&[0, 1, 6]).unwrap();
    assert_eq!(subset.size(), 3, "subset of row 0,1,6");
    assert_eq!(subset.values(), &decimals(&[Some("1200"), None, Some("1211.9")]));
}

#[test]
fn unique_values() {
    assert_eq!(obs().unique().size(), 7, "unique values");
    assert_eq!(obs().count_unique(), 7);
}

#[test]
fn top() {
    assert_eq!(
        obs().top(3).as_domain_value_array(),
        decimals(&[Some("3456.4"), Some("3456"), Some("1211.9")])
    );
}

#[test]
fn bottom() {
    assert_eq!(
        obs().bottom(3).as_object_array(),
        vec![Some(dec("12.1")), Some(dec("12.1")), Some(dec("985"))]
    );
}

#[test]
fn lag() {
    let previous = obs().lag(1);
    assert_eq!(
        previous.as_domain_value_array(),
        decimals(&[
            None,
            Some("1200"),
            None,
            Some("3456"),
            Some("12.1"),
            Some("3456.4"),
            Some("985"),
            Some("1211.9"),
            None
        ]),
        "lag 1"
    );
}

#[test]
fn lead() {
    let next = obs().lead(1);
    assert_eq!(next.get(0).unwrap(), None);
    assert_eq!(next.get(1).unwrap(), Some(dec("3456")));
    assert_eq!(next.get(8).unwrap(), None);
}

#[test]
fn get_double() {
    assert_eq!(obs().get_double(4).unwrap(), 3456.4, "getDouble");
}

#[test]
fn remove_missing() {
    assert_eq!(
        obs().remove_missing().as_domain_value_array(),
        decimals(&[
            Some("1200"),
            Some("3456"),
            Some("12.1"),
            Some("3456.4"),
            Some("985"),
            Some("1211.9"),
            Some("12.1")
        ]),
        "remove missing"
    );
}

#[test]
fn append_decimal() {
    let mut appended = obs().copy();
    appended.append(dec("123.333")).unwrap();
    assert_eq!(appended.get(9).unwrap(), Some(dec("123.333")), "append decimal");
}

#[test]
fn append_float() {
    let mut appended = obs().copy();
    appended.append(123.333_f32).unwrap();
    let v = appended.get(9).unwrap().unwrap();
    assert_eq!(v.to_f32().unwrap(), 123.333_f32, "append float");
}

#[test]
fn append_double() {
    let mut appended = obs().copy();
    appended.append(123.333_f64).unwrap();
    assert_eq!(appended.get_double(9).unwrap(), 123.333_f64, "append double");
}

#[test]
fn append_int() {
    let mut appended = obs().copy();
    appended.append(1231_i32).unwrap();
    assert_eq!(appended.get(9).unwrap().unwrap().to_i32(), Some(1231), "append int");
}

#[test]
fn append_long() {
    let mut appended = obs().copy();
    appended.append(1_231_123_411_234_511_234_i64).unwrap();
    assert_eq!(
        appended.get(9).unwrap().unwrap().to_i64(),
        Some(1_231_123_411_234_511_234),
        "append long"
    );
}

#[test]
fn append_wide_integer() {
    let mut appended = obs().copy();
    appended.append(1_231_123_411_234_511_234_i128).unwrap();
    assert_eq!(
        appended.get(9).unwrap(),
        Some(BigDecimal::from(1_231_123_411_234_511_234_i64)),
        "append wide integer"
    );
}

#[test]
fn append_string() {
    let mut appended = obs().copy();
    appended.append("123.333444666777888999").unwrap();
    assert_eq!(
        appended.get(9).unwrap(),
        Some(dec("123.333444666777888999")),
        "append string"
    );
}

#[test]
fn append_string_beyond_28_digits_keeps_every_digit() {
    let text = "12345678901234567890.123456789012";
    let mut appended = obs().copy();
    appended.append(text).unwrap();
    let stored = appended.get(9).unwrap().unwrap();
    let (digits, scale) = stored.as_bigint_and_exponent();
    assert_eq!(digits, BigInt::from_str("12345678901234567890123456789012").unwrap());
    assert_eq!(scale, 12);
}

#[test]
fn append_scientific_string_with_large_scale() {
    let mut appended = obs().copy();
    appended.append("1e-40").unwrap();
    assert_eq!(appended.get(9).unwrap(), Some(dec("0.0000000000000000000000000000000000000001")));
}

#[test]
fn append_integers_beyond_28_digits() {
    let huge = BigInt::from(10).pow(29);
    let mut appended = obs().copy();
    appended.append(100_000_000_000_000_000_000_000_000_000_i128).unwrap();
    appended.append(&huge).unwrap();
    appended.append(BigInt::from(10).pow(60)).unwrap();
    assert_eq!(appended.get(9).unwrap(), Some(BigDecimal::new(huge.clone(), 0)));
    assert_eq!(appended.get(10).unwrap(), Some(BigDecimal::new(huge, 0)));
    assert_eq!(
        appended.get(11).unwrap(),
        Some(dec(&format!("1{}", "0".repeat(60))))
    );
}

#[test]
fn append_tiny_double_is_not_rounded_to_zero() {
    let mut appended = obs().copy();
    appended.append(1e-30_f64).unwrap();
    assert!(!appended.is_missing(9).unwrap());
    let stored = appended.get(9).unwrap().unwrap();
    assert!(!stored.is_zero());
    assert_eq!(stored, dec("1e-30"));
    assert_eq!(appended.get_double(9).unwrap(), 1e-30);
}

#[test]
fn append_malformed_string_fails_and_keeps_size() {
    let mut appended = obs().copy();
    let err = appended.append("12..5").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(appended.size(), 9);
}

#[test]
fn append_missing() {
    let mut appended = obs().copy();
    appended.append_missing().append_missing();
    assert_eq!(appended.size(), 11);
    assert!(appended.is_missing(10).unwrap());
}

#[test]
fn append_value_from_column() {
    let mut appended = obs().copy();
    let source = obs();
    appended.append_from(&source, 4).unwrap();
    assert_eq!(appended.get(9).unwrap(), Some(dec("3456.4")));
}

#[test]
fn append_column() {
    let mut appended = obs().copy();
    appended.append_column(&obs()).unwrap();
    assert_eq!(appended.size(), 18);
    assert_eq!(appended.count_missing(), 4);
}

#[test]
fn iterates_in_row_order() {
    let obs = obs();
    let collected: Vec<_> = obs.iter().collect();
    assert_eq!(collected, obs.as_domain_value_array());
    assert_eq!((&obs).into_iter().filter(|v| v.is_none()).count(), 2);
}

#[test]
fn sort_ascending_and_descending() {
    let mut sorted = obs().copy();
    sorted.sort_ascending();
    assert_eq!(sorted.get(0).unwrap(), None);
    assert_eq!(sorted.get(2).unwrap(), Some(dec("12.1")));
    assert_eq!(sorted.get(8).unwrap(), Some(dec("3456.4")));
    sorted.sort_descending();
    assert_eq!(sorted.get(0).unwrap(), Some(dec("3456.4")));
    assert_eq!(sorted.get(8).unwrap(), None);
}

#[test]
fn fill_missing() {
    let filled = obs().fill_missing(0).unwrap();
    assert_eq!(filled.count_missing(), 0);
    assert_eq!(filled.get(1).unwrap(), Some(BigDecimal::zero()));
}

#[test]
fn equality() {
    assert_eq!(obs(), obs());
    let mut other = obs();
    other.set(0, 1).unwrap();
    assert_ne!(obs(), other);
}

#[test]
fn conversions() {
    let longs = obs()
        .remove_missing()
        .filter(|v| v.as_ref().is_some_and(BigDecimal::is_integer));
    let longs = longs.as_long_column().unwrap();
    assert_eq!(longs.values(), &[1200, 3456, 985]);
    let doubles = obs().as_double_column().unwrap();
    assert_eq!(doubles.get(3).unwrap(), 12.1);
    assert!(doubles.is_missing(1).unwrap());
}
