use strata_core::prelude::*;

fn frame(columns: Vec<Column>) -> DataFrame {
    DataFrame::new(columns).unwrap()
}

#[test]
fn construction_rejects_ragged_and_duplicate_columns() {
    let err = DataFrame::new(vec![
        Column::new("a", vec![Some(1i64), Some(2)]),
        Column::new("b", vec![Some(1i64)]),
    ])
    .unwrap_err();
    assert!(matches!(err, StrataError::ShapeMismatch(_)));

    let err = DataFrame::new(vec![
        Column::new("a", vec![Some(1i64)]),
        Column::new("a", vec![Some(2i64)]),
    ])
    .unwrap_err();
    assert!(matches!(err, StrataError::Duplicate(_)));
}

#[test]
fn any_all_fold_numeric_columns_through_a_boolean_cast() {
    // {"a": [0, 1, 2], "b": [3, 4, 5]}
    let df = frame(vec![
        Column::new("a", vec![Some(0i64), Some(1), Some(2)]),
        Column::new("b", vec![Some(3i64), Some(4), Some(5)]),
    ]);
    assert_eq!(
        df.reduce_axis_none(ReductionOp::Any).unwrap().value(),
        &AnyValue::Boolean(true)
    );
    // Column "a" contains a zero, so all is false.
    assert_eq!(
        df.reduce_axis_none(ReductionOp::All).unwrap().value(),
        &AnyValue::Boolean(false)
    );

    let df = frame(vec![
        Column::new("a", vec![Some(1u32), Some(2), Some(3)]),
        Column::new("b", vec![Some(true), Some(true), Some(true)]),
    ]);
    assert_eq!(
        df.reduce_axis_none(ReductionOp::All).unwrap().value(),
        &AnyValue::Boolean(true)
    );
}

#[test]
fn any_all_over_an_empty_frame_yield_their_identities() {
    let df = DataFrame::empty();
    let any = df.reduce_axis_none(ReductionOp::Any).unwrap();
    assert_eq!(any.value(), &AnyValue::Boolean(false));
    let all = df.reduce_axis_none(ReductionOp::All).unwrap();
    assert_eq!(all.value(), &AnyValue::Boolean(true));
}

#[test]
fn any_all_over_all_null_columns_yield_their_identities() {
    let df = frame(vec![
        Column::new("a", vec![None::<bool>; 3]),
        Column::new("b", vec![None::<i64>; 3]),
    ]);
    assert_eq!(
        df.reduce_axis_none(ReductionOp::Any).unwrap().value(),
        &AnyValue::Boolean(false)
    );
    assert_eq!(
        df.reduce_axis_none(ReductionOp::All).unwrap().value(),
        &AnyValue::Boolean(true)
    );
}

#[test]
fn any_all_reject_columns_without_a_boolean_reading() {
    let df = frame(vec![Column::new("s", vec![Some("x")])]);
    let err = df.reduce_axis_none(ReductionOp::Any).unwrap_err();
    assert!(matches!(err, StrataError::InvalidOperation { .. }));
}

#[test]
fn whole_frame_sum_combines_per_column_results() {
    let df = frame(vec![
        Column::new("a", vec![Some(1i8), Some(2), None]),
        Column::new("b", vec![Some(10i64), Some(20), Some(30)]),
    ]);
    let out = df.reduce_axis_none(ReductionOp::Sum).unwrap();
    assert_eq!(out.value(), &AnyValue::Int64(63));

    // Any float column promotes the combined result to Float64.
    let df = frame(vec![
        Column::new("a", vec![Some(1i32), Some(2)]),
        Column::new("b", vec![Some(0.5f64), Some(0.25)]),
    ]);
    let out = df.reduce_axis_none(ReductionOp::Sum).unwrap();
    assert_eq!(out.value(), &AnyValue::Float64(3.75));

    // All-unsigned frames stay unsigned.
    let df = frame(vec![
        Column::new("a", vec![Some(u64::MAX)]),
        Column::new("b", vec![Some(1u8)]),
    ]);
    let out = df.reduce_axis_none(ReductionOp::Sum).unwrap();
    assert_eq!(out.value(), &AnyValue::UInt64(0)); // wraps like the kernels do
}

#[test]
fn whole_frame_extrema_span_all_columns() {
    let df = frame(vec![
        Column::new("a", vec![Some(5i64), Some(-3)]),
        Column::new("b", vec![Some(42i16), None]),
    ]);
    assert_eq!(
        df.reduce_axis_none(ReductionOp::Min).unwrap().value(),
        &AnyValue::Int64(-3)
    );
    assert_eq!(
        df.reduce_axis_none(ReductionOp::Max).unwrap().value(),
        &AnyValue::Int64(42)
    );
}

#[test]
fn zero_column_frames_reduce_to_operation_identities() {
    let df = DataFrame::empty();
    assert_eq!(
        df.reduce_axis_none(ReductionOp::Sum).unwrap().value(),
        &AnyValue::Int64(0)
    );
    assert_eq!(
        df.reduce_axis_none(ReductionOp::Product).unwrap().value(),
        &AnyValue::Int64(1)
    );
    assert_eq!(
        df.reduce_axis_none(ReductionOp::SumOfSquares).unwrap().value(),
        &AnyValue::Int64(0)
    );
    assert!(df.reduce_axis_none(ReductionOp::Min).unwrap().is_null());
}

#[test]
fn all_null_columns_reduce_to_a_null_scalar() {
    let df = frame(vec![
        Column::new("a", vec![None::<i64>; 2]),
        Column::new("b", vec![None::<i32>; 2]),
    ]);
    let out = df.reduce_axis_none(ReductionOp::Sum).unwrap();
    assert!(out.is_null());
    assert_eq!(out.dtype(), &DataType::Int64);
}

#[test]
fn string_frames_concatenate_in_column_order() {
    let df = frame(vec![
        Column::new("a", vec![Some("Hello"), None]),
        Column::new("b", vec![Some("World"), Some("!")]),
    ]);
    let out = df.reduce_axis_none(ReductionOp::Sum).unwrap();
    assert_eq!(out.value(), &AnyValue::String("HelloWorld!".into()));

    let mixed = frame(vec![
        Column::new("a", vec![Some("x")]),
        Column::new("b", vec![Some(1i64)]),
    ]);
    let err = mixed.reduce_axis_none(ReductionOp::Sum).unwrap_err();
    assert!(matches!(err, StrataError::ComputeError(_)));
}

#[test]
fn decimal_frames_combine_only_at_equal_scales() {
    let df = frame(vec![
        Column::new_decimal("a", vec![Some(150), Some(50)], 9, 2, DecimalSize::Size32).unwrap(),
        Column::new_decimal("b", vec![Some(25), None], 18, 2, DecimalSize::Size64).unwrap(),
    ]);
    let out = df.reduce_axis_none(ReductionOp::Sum).unwrap();
    assert_eq!(out.value(), &AnyValue::Decimal(225, 2));

    let df = frame(vec![
        Column::new_decimal("a", vec![Some(1)], 9, 2, DecimalSize::Size32).unwrap(),
        Column::new_decimal("b", vec![Some(1)], 9, 3, DecimalSize::Size32).unwrap(),
    ]);
    let err = df.reduce_axis_none(ReductionOp::Sum).unwrap_err();
    assert!(matches!(err, StrataError::ComputeError(_)));
}

#[test]
fn temporal_frames_support_extrema_when_units_agree() {
    let df = frame(vec![
        Column::new_datetime("a", vec![Some(100), Some(200)], TimeUnit::Milliseconds),
        Column::new_datetime("b", vec![Some(-7), None], TimeUnit::Milliseconds),
    ]);
    let out = df.reduce_axis_none(ReductionOp::Min).unwrap();
    assert_eq!(out.value(), &AnyValue::Datetime(-7, TimeUnit::Milliseconds));

    let df = frame(vec![
        Column::new_duration("a", vec![Some(1)], TimeUnit::Milliseconds),
        Column::new_duration("b", vec![Some(2)], TimeUnit::Nanoseconds),
    ]);
    let err = df.reduce_axis_none(ReductionOp::Min).unwrap_err();
    assert!(matches!(err, StrataError::ComputeError(_)));
}
