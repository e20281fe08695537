#![cfg(test)]

//! Test assertions to check generated SQL statements and their parameters.

/// Assert that the given parameters match the expected ones.
///
/// # Usage:
/// ```no_run
/// assert_params!(actual_params, expected_param1, expected_param2, ...);
/// ```
macro_rules! assert_params {
    ($actual_params:expr) => {
        assert!($actual_params.is_empty(), "Extra actual parameters");
    };
    ($actual_params:expr, $($expected_param:expr), +) => {
        let expected: Vec<Box<dyn $crate::sql::SQLParam>> = vec![$(Box::new($expected_param)), +];
        assert_eq!($actual_params.len(), expected.len(), "Parameter count mismatch");
        for (actual, expected) in $actual_params.iter().zip(expected.into_iter()) {
            assert!(
                $crate::sql::SQLParam::eq(actual.as_ref(), expected.as_ref()),
                "Parameter mismatch: {:?} != {:?}",
                actual,
                expected
            );
        }
    };
}

/// Assert that the output of [`ExpressionBuilder::to_sql`](crate::ExpressionBuilder::to_sql)
/// matches the expected statement and parameters.
macro_rules! assert_binding {
    ($actual:expr, $expected_stmt:expr) => {
        let (actual_stmt, actual_params) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        assert_params!(actual_params);
    };
    ($actual:expr, $expected_stmt:expr, $($rest:expr), *) => {
        let (actual_stmt, actual_params) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        assert_params!(actual_params, $($rest), *);
    };
}
