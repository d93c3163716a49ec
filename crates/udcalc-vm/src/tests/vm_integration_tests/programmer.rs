use super::helpers::execute_int;
use udcalc_types::{ErrorKind, Value};

fn int(result: Result<Value, String>) -> i64 {
    match result {
        Ok(Value::Integer(i)) => i,
        other => panic!("expected an integer, got {:?}", other),
    }
}

#[test]
fn test_integer_arithmetic() {
    assert_eq!(int(execute_int("2 + 3 * 4")), 14);
    assert_eq!(int(execute_int("7 / 2")), 3);
    assert_eq!(int(execute_int("-7 / 2")), -3);
    assert_eq!(int(execute_int("3 ^ 4")), 81);
}

#[test]
fn test_integer_division_by_zero() {
    assert_eq!(
        execute_int("5 / 0").unwrap(),
        Value::Error(ErrorKind::DivideByZero)
    );
    assert_eq!(
        execute_int("0 ^ -1").unwrap(),
        Value::Error(ErrorKind::DivideByZero)
    );
}

#[test]
fn test_arithmetic_wraps() {
    assert_eq!(int(execute_int("9223372036854775807 + 1")), i64::MIN);
    assert_eq!(int(execute_int("2 ^ 63")), i64::MIN);
    assert_eq!(int(execute_int("2 ^ 64")), 0);
    assert_eq!(int(execute_int("(-9223372036854775807 - 1) / -1")), i64::MIN);
    assert_eq!(int(execute_int("-(-9223372036854775807 - 1)")), i64::MIN);
}

#[test]
fn test_negative_exponent_truncates() {
    assert_eq!(int(execute_int("2 ^ -1")), 0);
    assert_eq!(int(execute_int("1 ^ -5")), 1);
    assert_eq!(int(execute_int("(-1) ^ -3")), -1);
}

#[test]
fn test_bitwise() {
    assert_eq!(int(execute_int("12 & 10")), 8);
    assert_eq!(int(execute_int("12 | 3")), 15);
    assert_eq!(int(execute_int("12 xor 10")), 6);
    assert_eq!(int(execute_int("~0")), -1);
    assert_eq!(int(execute_int("~255 & 4095")), 3840);
}

#[test]
fn test_shifts_are_logical() {
    assert_eq!(int(execute_int("1 << 4")), 16);
    assert_eq!(int(execute_int("-1 >> 60")), 15);
    assert_eq!(int(execute_int("1 << 63")), i64::MIN);
}

#[test]
fn test_shift_out_of_range_overflows() {
    assert_eq!(execute_int("1 << 64").unwrap(), Value::Error(ErrorKind::Overflow));
    assert_eq!(execute_int("1 >> -1").unwrap(), Value::Error(ErrorKind::Overflow));
}

#[test]
fn test_rotate_and_flip() {
    assert_eq!(int(execute_int("rol(1)")), 2);
    assert_eq!(int(execute_int("ror(1)")), i64::MIN);
    assert_eq!(int(execute_int("rol(-9223372036854775807 - 1)")), 1);
    assert_eq!(int(execute_int("flipb(255)")), 0xFF00_0000_0000_0000_u64 as i64);
    assert_eq!(int(execute_int("flipw(1)")), 1 << 48);
    assert_eq!(int(execute_int("flipw(flipw(12345))")), 12345);
}
