// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_model::primitive_type::PrimitiveType;
use core_resolver::validation::field::ValidatedField;
use league_model::{
    subsystem::LeagueSubsystem,
    types::{Cardinality, EntityFieldKind, EntityType},
};
use league_sql::{
    AliasedColumn, Column, ConcretePredicate, LeftJoin, OrderBy, OrderByElement, Ordering,
    PhysicalColumnType, Select, Table,
};
use tracing::instrument;

use crate::league_execution_error::LeagueExecutionError;

/// The shape of one entity in the result, with the row positions holding its values.
#[derive(Debug)]
pub(crate) struct EntitySelection<'a> {
    pub entity_type: &'a EntityType,
    /// Position of the unique key in each row
    pub key_index: usize,
    pub fields: Vec<SelectedField<'a>>,
}

#[derive(Debug)]
pub(crate) enum SelectedField<'a> {
    Column {
        output_name: String,
        index: usize,
        graphql_type: PrimitiveType,
    },
    Typename {
        output_name: String,
    },
    Relation {
        output_name: String,
        cardinality: Cardinality,
        selection: EntitySelection<'a>,
    },
}

struct Join {
    table_name: String,
    alias: String,
    predicate: ConcretePredicate,
}

/// A selection set flattened into a single `SELECT` with one `LEFT JOIN` per relation.
///
/// The root table is aliased by its table name and each relation occurrence by `t<n>`, numbered
/// in planning order, so the same relation selected under two aliases is joined twice. Every
/// column is selected as `<alias>__<column>`.
pub(crate) struct SelectionPlan<'a> {
    pub root: EntitySelection<'a>,
    root_alias: String,
    columns: Vec<AliasedColumn>,
    result_types: Vec<PhysicalColumnType>,
    joins: Vec<Join>,
    keys: Vec<Column>,
}

impl<'a> SelectionPlan<'a> {
    #[instrument(name = "SelectionPlan::new", skip_all, fields(entity = %entity_type.name))]
    pub fn new(
        entity_type: &'a EntityType,
        fields: &[ValidatedField],
        subsystem: &'a LeagueSubsystem,
    ) -> Result<Self, LeagueExecutionError> {
        let mut builder = PlanBuilder {
            subsystem,
            columns: vec![],
            result_types: vec![],
            joins: vec![],
            keys: vec![],
        };

        let root_alias = entity_type.table_name.clone();
        let root = builder.plan_entity(entity_type, &root_alias, fields)?;

        Ok(SelectionPlan {
            root,
            root_alias,
            columns: builder.columns,
            result_types: builder.result_types,
            joins: builder.joins,
            keys: builder.keys,
        })
    }

    /// The alias under which the root table must be known to the statement
    pub fn root_alias(&self) -> &str {
        &self.root_alias
    }

    /// How to decode each column of a result row
    pub fn result_types(&self) -> Vec<PhysicalColumnType> {
        self.result_types.clone()
    }

    /// Build the statement reading from `root_table` (which must be known as [`Self::root_alias`]).
    pub fn select(&self, root_table: Table, predicate: ConcretePredicate) -> Select {
        let table = self.joins.iter().fold(root_table, |table, join| {
            Table::Join(LeftJoin::new(
                table,
                Table::physical(&join.table_name, Some(join.alias.clone())),
                join.predicate.clone(),
            ))
        });

        let order_by = OrderBy(
            self.keys
                .iter()
                .map(|key| OrderByElement(key.clone(), Ordering::Asc))
                .collect(),
        );

        Select {
            table,
            columns: self.columns.clone(),
            predicate,
            order_by: Some(order_by),
        }
    }
}

struct PlanBuilder<'a> {
    subsystem: &'a LeagueSubsystem,
    columns: Vec<AliasedColumn>,
    result_types: Vec<PhysicalColumnType>,
    joins: Vec<Join>,
    keys: Vec<Column>,
}

impl<'a> PlanBuilder<'a> {
    fn plan_entity(
        &mut self,
        entity_type: &'a EntityType,
        alias: &str,
        fields: &[ValidatedField],
    ) -> Result<EntitySelection<'a>, LeagueExecutionError> {
        let key_index = self.add_column(
            alias,
            &entity_type.unique_key,
            entity_type.unique_key_type,
        );
        self.keys
            .push(Column::physical(alias, &entity_type.unique_key));

        let fields = fields
            .iter()
            .map(|field| self.plan_field(entity_type, alias, field))
            .collect::<Result<_, _>>()?;

        Ok(EntitySelection {
            entity_type,
            key_index,
            fields,
        })
    }

    fn plan_field(
        &mut self,
        entity_type: &'a EntityType,
        alias: &str,
        field: &ValidatedField,
    ) -> Result<SelectedField<'a>, LeagueExecutionError> {
        let output_name = field.output_name();

        if field.name.as_str() == "__typename" {
            return Ok(SelectedField::Typename { output_name });
        }

        let entity_field = entity_type.field(field.name.as_str()).ok_or_else(|| {
            LeagueExecutionError::Validation(field.name.to_string(), entity_type.name.clone())
        })?;

        match &entity_field.kind {
            EntityFieldKind::Column(column) => Ok(SelectedField::Column {
                index: self.add_column(alias, &column.column_name, column.column_type),
                output_name,
                graphql_type: column.graphql_type,
            }),
            EntityFieldKind::Relation(relation) => {
                let target_type = self
                    .subsystem
                    .get_entity_type(&relation.target_type)
                    .ok_or_else(|| {
                        LeagueExecutionError::UnknownType(relation.target_type.clone())
                    })?;

                let child_alias = format!("t{}", self.joins.len() + 1);

                self.joins.push(Join {
                    table_name: target_type.table_name.clone(),
                    alias: child_alias.clone(),
                    predicate: (relation.join)(alias, &child_alias, &field.arguments),
                });

                let selection = self.plan_entity(target_type, &child_alias, &field.subfields)?;

                Ok(SelectedField::Relation {
                    output_name,
                    cardinality: relation.cardinality,
                    selection,
                })
            }
        }
    }

    /// Select `"<alias>"."<column>" AS "<alias>__<column>"` once, returning its row position.
    fn add_column(
        &mut self,
        alias: &str,
        column_name: &str,
        column_type: PhysicalColumnType,
    ) -> usize {
        let column_alias = format!("{alias}__{column_name}");

        if let Some(index) = self
            .columns
            .iter()
            .position(|column| column.alias.as_deref() == Some(column_alias.as_str()))
        {
            return index;
        }

        self.columns.push(AliasedColumn::new(
            Column::physical(alias, column_name),
            column_alias,
        ));
        self.result_types.push(column_type);
        self.columns.len() - 1
    }
}
