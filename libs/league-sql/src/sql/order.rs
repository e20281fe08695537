// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, column::Column};

#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum Ordering {
    Asc,
}

#[derive(Debug, PartialEq, Clone)]
pub struct OrderByElement(pub Column, pub Ordering);

#[derive(Debug, PartialEq, Clone)]
pub struct OrderBy(pub Vec<OrderByElement>);

impl ExpressionBuilder for OrderByElement {
    fn build(&self, builder: &mut SQLBuilder) {
        self.0.build(builder);
        match self.1 {
            Ordering::Asc => builder.push_str(" ASC"),
        }
    }
}

impl ExpressionBuilder for OrderBy {
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("ORDER BY ");
        builder.push_elems(&self.0, ", ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple() {
        let order_by = OrderBy(vec![
            OrderByElement(Column::physical("team", "id"), Ordering::Asc),
            OrderByElement(Column::physical("t1", "id"), Ordering::Asc),
        ]);

        assert_binding!(
            order_by.to_sql(),
            r#"ORDER BY "team"."id" ASC, "t1"."id" ASC"#
        );
    }
}
