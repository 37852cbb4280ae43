//! SQL construction styles for generated access methods
//!
//! Both styles return method bodies for identical signatures; the model
//! generator owns the signatures and only asks the style for the bodies.
//! Every body line is indented for a method inside the companion object.

use crate::config::GeneratorTemplate;

use super::context::{ScalaColumn, TableContext};

/// Fetch call for single-row reads
pub const FETCH_SINGLE: &str = ".single.apply()";

/// SQL construction for each generated access method
pub trait QueryTemplate {
    /// `find(key...)`: `fetch` is [`FETCH_SINGLE`]
    fn find_by_key(&self, ctx: &TableContext<'_>, fetch: &str) -> String;

    fn find_all(&self, ctx: &TableContext<'_>, fetch: &str) -> String;

    fn count_all(&self, ctx: &TableContext<'_>) -> String;

    /// `findBy(where)` / `findAllBy(where)`, depending on `fetch`
    fn find_by_where(&self, ctx: &TableContext<'_>, fetch: &str) -> String;

    fn count_by_where(&self, ctx: &TableContext<'_>) -> String;

    /// Insert of the `create` parameters; binds `generatedKey` when `returns_key`
    fn insert(&self, ctx: &TableContext<'_>, returns_key: bool) -> String;

    /// Batch insert of `entities`, applied to collection `apply_type`
    fn batch_insert(&self, ctx: &TableContext<'_>, apply_type: &str) -> String;

    /// Update of every updatable column of `entity`, keyed on the key columns
    fn update(&self, ctx: &TableContext<'_>) -> String;

    /// Delete of `entity`, keyed on the key columns
    fn delete(&self, ctx: &TableContext<'_>) -> String;
}

/// Get the style selected by the configuration
pub fn query_template(template: GeneratorTemplate) -> &'static dyn QueryTemplate {
    match template {
        GeneratorTemplate::Interpolation => &Interpolation,
        GeneratorTemplate::QueryDsl => &QueryDsl,
    }
}

/// Value expression for a column, wired through an explicit binder for `Any`
/// columns since generic values cannot be bound implicitly
pub fn bind_value(col: &ScalaColumn<'_>, expr: &str) -> String {
    if !col.is_any() {
        return expr.to_string();
    }
    let value = if col.is_not_null() {
        expr.to_string()
    } else {
        format!("{}.orNull", expr)
    };
    format!(
        "ParameterBinder({}, (ps, i) => ps.setObject(i, {}))",
        expr, value
    )
}

/// The parameter named after the field
pub fn param_value(col: &ScalaColumn<'_>) -> String {
    col.field_name.clone()
}

/// The field read from `entity`
pub fn entity_value(col: &ScalaColumn<'_>) -> String {
    format!("entity.{}", col.field_name)
}

/// `eq(e.id, id).and.eq(e.name, name)`
pub fn dsl_predicate(
    prefix: &str,
    columns: &[&ScalaColumn<'_>],
    value: fn(&ScalaColumn<'_>) -> String,
) -> String {
    columns
        .iter()
        .map(|c| {
            format!(
                "eq({}.{}, {})",
                prefix,
                c.field_name,
                bind_value(c, &value(c))
            )
        })
        .collect::<Vec<_>>()
        .join(".and.")
}

/// `${sqls.eq(e.id, id)} and ${sqls.eq(e.name, name)}`
///
/// `sqls.eq` renders `None` as `is null`, matching the query DSL.
pub fn interpolated_predicate(
    prefix: &str,
    columns: &[&ScalaColumn<'_>],
    value: fn(&ScalaColumn<'_>) -> String,
) -> String {
    columns
        .iter()
        .map(|c| {
            interp(&format!(
                "sqls.eq({}.{}, {})",
                prefix,
                c.field_name,
                bind_value(c, &value(c))
            ))
        })
        .collect::<Vec<_>>()
        .join(" and ")
}

/// `column.name -> name` pairs, one per line
pub fn named_values(
    columns: &[&ScalaColumn<'_>],
    value: fn(&ScalaColumn<'_>) -> String,
    indent: &str,
) -> String {
    columns
        .iter()
        .map(|c| {
            format!(
                "{}column.{} -> {}",
                indent,
                c.field_name,
                bind_value(c, &value(c))
            )
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

/// `${column.a} = ${entity.a}` assignments, one per line
pub fn set_clause(
    columns: &[&ScalaColumn<'_>],
    value: fn(&ScalaColumn<'_>) -> String,
    indent: &str,
) -> String {
    columns
        .iter()
        .map(|c| {
            format!(
                "{}{} = {}",
                indent,
                interp(&format!("column.{}", c.field_name)),
                interp(&bind_value(c, &value(c)))
            )
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

/// One line per column produced by `item`, separated by commas
pub fn column_lines(
    columns: &[&ScalaColumn<'_>],
    indent: &str,
    item: impl Fn(&ScalaColumn<'_>) -> String,
) -> String {
    columns
        .iter()
        .map(|c| format!("{}{}", indent, item(c)))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// `${expr}`
fn interp(expr: &str) -> String {
    format!("${{{}}}", expr)
}

/// Table name as written in plain SQL strings, schema-qualified when known
fn qualified_table_name(ctx: &TableContext<'_>) -> String {
    match ctx.table.schema.as_deref().filter(|s| !s.is_empty()) {
        Some(schema) => format!("{}.{}", schema, ctx.table.name),
        None => ctx.table.name.clone(),
    }
}

/// Builds SQL through ScalikeJDBC's query DSL
pub struct QueryDsl;

impl QueryTemplate for QueryDsl {
    fn find_by_key(&self, ctx: &TableContext<'_>, fetch: &str) -> String {
        let keys = ctx.key_columns();
        format!(
            "    withSQL {{\n      select.from({class} as {v}).where.{pred}\n    }}.map({class}({v}.resultName)){fetch}\n",
            class = ctx.class_name,
            v = ctx.syntax_var,
            pred = dsl_predicate(&ctx.syntax_var, &keys, param_value),
            fetch = fetch,
        )
    }

    fn find_all(&self, ctx: &TableContext<'_>, fetch: &str) -> String {
        format!(
            "    withSQL(select.from({class} as {v})).map({class}({v}.resultName)){fetch}\n",
            class = ctx.class_name,
            v = ctx.syntax_var,
            fetch = fetch,
        )
    }

    fn count_all(&self, ctx: &TableContext<'_>) -> String {
        format!(
            "    withSQL(select(sqls.count).from({class} as {v})).map(rs => rs.long(1)).single.apply().get\n",
            class = ctx.class_name,
            v = ctx.syntax_var,
        )
    }

    fn find_by_where(&self, ctx: &TableContext<'_>, fetch: &str) -> String {
        format!(
            "    withSQL {{\n      select.from({class} as {v}).where.append(where)\n    }}.map({class}({v}.resultName)){fetch}\n",
            class = ctx.class_name,
            v = ctx.syntax_var,
            fetch = fetch,
        )
    }

    fn count_by_where(&self, ctx: &TableContext<'_>) -> String {
        format!(
            "    withSQL {{\n      select(sqls.count).from({class} as {v}).where.append(where)\n    }}.map(_.long(1)).single.apply().get\n",
            class = ctx.class_name,
            v = ctx.syntax_var,
        )
    }

    fn insert(&self, ctx: &TableContext<'_>, returns_key: bool) -> String {
        let columns = ctx.insertable_columns();
        let (assign, execute) = if returns_key {
            ("val generatedKey = ", ".updateAndReturnGeneratedKey.apply()")
        } else {
            ("", ".update.apply()")
        };
        let statement = if columns.is_empty() {
            format!("insert.into({}).append(sqls\"default values\")", ctx.class_name)
        } else {
            format!(
                "insert.into({}).namedValues(\n{}\n      )",
                ctx.class_name,
                named_values(&columns, param_value, "        ")
            )
        };
        format!(
            "    {assign}withSQL {{\n      {statement}\n    }}{execute}\n",
            assign = assign,
            statement = statement,
            execute = execute,
        )
    }

    fn batch_insert(&self, ctx: &TableContext<'_>, apply_type: &str) -> String {
        let columns = ctx.insertable_columns();
        let mut code = String::new();
        if columns.is_empty() {
            code.push_str("    val params: collection.Seq[Seq[Any]] = entities.map(_ => Seq.empty[Any])\n");
            code.push_str(&format!(
                "    withSQL {{\n      insert.into({}).append(sqls\"default values\")\n    }}",
                ctx.class_name
            ));
        } else {
            code.push_str("    val params: collection.Seq[Seq[Any]] = entities.map(entity =>\n");
            code.push_str("      Seq(\n");
            code.push_str(&column_lines(&columns, "        ", |c| {
                bind_value(c, &entity_value(c))
            }));
            code.push_str("))\n");
            code.push_str(&format!(
                "    withSQL {{\n      insert.into({}).namedValues(\n",
                ctx.class_name
            ));
            code.push_str(&column_lines(&columns, "        ", |c| {
                format!("column.{} -> sqls.?", c.field_name)
            }));
            code.push_str("\n      )\n    }");
        }
        code.push_str(&format!(
            ".batch(params.toSeq: _*).apply[{}]()\n",
            apply_type
        ));
        code
    }

    fn update(&self, ctx: &TableContext<'_>) -> String {
        let updatable = ctx.updatable_columns();
        let keys = ctx.key_columns();
        format!(
            "    withSQL {{\n      update({class}).set(\n{set}\n      ).where.{pred}\n    }}.update.apply()\n",
            class = ctx.class_name,
            set = named_values(&updatable, entity_value, "        "),
            pred = dsl_predicate("column", &keys, entity_value),
        )
    }

    fn delete(&self, ctx: &TableContext<'_>) -> String {
        let keys = ctx.key_columns();
        format!(
            "    withSQL {{ delete.from({class}).where.{pred} }}.update.apply()\n",
            class = ctx.class_name,
            pred = dsl_predicate("column", &keys, entity_value),
        )
    }
}

/// Builds SQL with string interpolation (`sql"""..."""`)
pub struct Interpolation;

impl QueryTemplate for Interpolation {
    fn find_by_key(&self, ctx: &TableContext<'_>, fetch: &str) -> String {
        let keys = ctx.key_columns();
        format!(
            "    sql\"\"\"select {result} from {from} where {pred}\"\"\"\n      .map({class}({v}.resultName)){fetch}\n",
            result = interp(&format!("{}.result.*", ctx.syntax_var)),
            from = interp(&format!("{} as {}", ctx.class_name, ctx.syntax_var)),
            pred = interpolated_predicate(&ctx.syntax_var, &keys, param_value),
            class = ctx.class_name,
            v = ctx.syntax_var,
            fetch = fetch,
        )
    }

    fn find_all(&self, ctx: &TableContext<'_>, fetch: &str) -> String {
        format!(
            "    sql\"\"\"select {result} from {from}\"\"\".map({class}({v}.resultName)){fetch}\n",
            result = interp(&format!("{}.result.*", ctx.syntax_var)),
            from = interp(&format!("{} as {}", ctx.class_name, ctx.syntax_var)),
            class = ctx.class_name,
            v = ctx.syntax_var,
            fetch = fetch,
        )
    }

    fn count_all(&self, ctx: &TableContext<'_>) -> String {
        format!(
            "    sql\"\"\"select count(1) from {table}\"\"\".map(rs => rs.long(1)).single.apply().get\n",
            table = interp(&format!("{}.table", ctx.class_name)),
        )
    }

    fn find_by_where(&self, ctx: &TableContext<'_>, fetch: &str) -> String {
        format!(
            "    sql\"\"\"select {result} from {from} where {where_}\"\"\"\n      .map({class}({v}.resultName)){fetch}\n",
            result = interp(&format!("{}.result.*", ctx.syntax_var)),
            from = interp(&format!("{} as {}", ctx.class_name, ctx.syntax_var)),
            where_ = interp("where"),
            class = ctx.class_name,
            v = ctx.syntax_var,
            fetch = fetch,
        )
    }

    fn count_by_where(&self, ctx: &TableContext<'_>) -> String {
        format!(
            "    sql\"\"\"select count(1) from {from} where {where_}\"\"\".map(_.long(1)).single.apply().get\n",
            from = interp(&format!("{} as {}", ctx.class_name, ctx.syntax_var)),
            where_ = interp("where"),
        )
    }

    fn insert(&self, ctx: &TableContext<'_>, returns_key: bool) -> String {
        let columns = ctx.insertable_columns();
        let (assign, execute) = if returns_key {
            ("val generatedKey = ", ".updateAndReturnGeneratedKey.apply()")
        } else {
            ("", ".update.apply()")
        };
        let table = interp(&format!("{}.table", ctx.class_name));
        if columns.is_empty() {
            return format!(
                "    {assign}sql\"\"\"insert into {table} default values\"\"\"{execute}\n",
                assign = assign,
                table = table,
                execute = execute,
            );
        }
        format!(
            "    {assign}sql\"\"\"\n      insert into {table} (\n{names}\n      ) values (\n{values}\n      )\n      \"\"\"{execute}\n",
            assign = assign,
            table = table,
            names = column_lines(&columns, "        ", |c| interp(&format!(
                "column.{}",
                c.field_name
            ))),
            values = column_lines(&columns, "        ", |c| interp(&bind_value(
                c,
                &param_value(c)
            ))),
            execute = execute,
        )
    }

    fn batch_insert(&self, ctx: &TableContext<'_>, apply_type: &str) -> String {
        let columns = ctx.insertable_columns();
        let table = qualified_table_name(ctx);
        let mut code = String::new();
        if columns.is_empty() {
            code.push_str(
                "    val params: collection.Seq[Seq[(String, Any)]] = entities.map(_ => Seq.empty[(String, Any)])\n",
            );
            code.push_str(&format!(
                "    SQL(\"\"\"insert into {} default values\"\"\")",
                table
            ));
        } else {
            code.push_str(
                "    val params: collection.Seq[Seq[(String, Any)]] = entities.map(entity =>\n",
            );
            code.push_str("      Seq(\n");
            code.push_str(&column_lines(&columns, "        ", |c| {
                format!(
                    "\"{}\" -> {}",
                    c.plain_name(),
                    bind_value(c, &entity_value(c))
                )
            }));
            code.push_str("))\n");
            code.push_str(&format!("    SQL(\"\"\"insert into {}(\n", table));
            code.push_str(&column_lines(&columns, "      ", |c| c.column.name.clone()));
            code.push_str("\n    ) values (\n");
            code.push_str(&column_lines(&columns, "      ", |c| {
                format!("{{{}}}", c.plain_name())
            }));
            code.push_str("\n    )\"\"\")");
        }
        code.push_str(&format!(
            ".batchByName(params.toSeq: _*).apply[{}]()\n",
            apply_type
        ));
        code
    }

    fn update(&self, ctx: &TableContext<'_>) -> String {
        let updatable = ctx.updatable_columns();
        let keys = ctx.key_columns();
        format!(
            "    sql\"\"\"\n      update\n        {table}\n      set\n{set}\n      where\n        {pred}\n      \"\"\".update.apply()\n",
            table = interp(&format!("{}.table", ctx.class_name)),
            set = set_clause(&updatable, entity_value, "        "),
            pred = interpolated_predicate("column", &keys, entity_value),
        )
    }

    fn delete(&self, ctx: &TableContext<'_>) -> String {
        let keys = ctx.key_columns();
        format!(
            "    sql\"\"\"delete from {table} where {pred}\"\"\".update.apply()\n",
            table = interp(&format!("{}.table", ctx.class_name)),
            pred = interpolated_predicate("column", &keys, entity_value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::metadata::{jdbc_types, Column, Table};

    fn make_table(primary_key: &[&str]) -> Table {
        Table::new(
            "emp",
            None,
            vec![
                Column::new("id", jdbc_types::BIGINT).not_null().auto_increment(),
                Column::new("name", jdbc_types::VARCHAR).size(30).not_null(),
                Column::new("payload", jdbc_types::OTHER),
            ],
            primary_key,
        )
    }

    #[test]
    fn test_bind_value_for_any() {
        let table = make_table(&["id"]);
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        assert_eq!(bind_value(&ctx.columns[1], "name"), "name");
        assert_eq!(
            bind_value(&ctx.columns[2], "payload"),
            "ParameterBinder(payload, (ps, i) => ps.setObject(i, payload.orNull))"
        );
    }

    #[test]
    fn test_dsl_predicate() {
        let table = make_table(&[]);
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        let keys = ctx.key_columns();
        let pred = dsl_predicate("e", &keys[..2], param_value);
        assert_eq!(pred, "eq(e.id, id).and.eq(e.name, name)");
    }

    #[test]
    fn test_interpolated_predicate() {
        let table = make_table(&["id"]);
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        let keys = ctx.key_columns();
        assert_eq!(
            interpolated_predicate("column", &keys, entity_value),
            "${sqls.eq(column.id, entity.id)}"
        );
    }

    #[test]
    fn test_named_values_and_set_clause() {
        let table = make_table(&["id"]);
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        let insertable = ctx.insertable_columns();
        assert_eq!(
            named_values(&insertable[..1], param_value, "  "),
            "  column.name -> name"
        );
        assert_eq!(
            set_clause(&insertable[..1], entity_value, ""),
            "${column.name} = ${entity.name}"
        );
    }

    #[test]
    fn test_styles_differ_only_in_bodies() {
        let table = make_table(&["id"]);
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);

        let dsl = query_template(GeneratorTemplate::QueryDsl).find_by_key(&ctx, FETCH_SINGLE);
        assert!(dsl.contains("select.from(Emp as e).where.eq(e.id, id)"));

        let interpolated =
            query_template(GeneratorTemplate::Interpolation).find_by_key(&ctx, FETCH_SINGLE);
        assert!(interpolated.contains("sql\"\"\"select ${e.result.*} from ${Emp as e} where ${sqls.eq(e.id, id)}\"\"\""));
        assert!(interpolated.contains(".map(Emp(e.resultName)).single.apply()"));
    }

    #[test]
    fn test_insert_binds_any_in_both_styles() {
        let table = make_table(&["id"]);
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);

        let dsl = QueryDsl.insert(&ctx, true);
        assert!(dsl.contains("val generatedKey = withSQL {"));
        assert!(dsl.contains("column.payload -> ParameterBinder(payload"));
        assert!(dsl.contains(".updateAndReturnGeneratedKey.apply()"));

        let interpolated = Interpolation.insert(&ctx, false);
        assert!(interpolated.contains("${ParameterBinder(payload"));
        assert!(interpolated.ends_with(".update.apply()\n"));
    }

    #[test]
    fn test_batch_insert_interpolation_uses_named_placeholders() {
        let table = make_table(&["id"]);
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        let code = Interpolation.batch_insert(&ctx, "List");
        assert!(code.contains("\"name\" -> entity.name"));
        assert!(code.contains("{name}"));
        assert!(!code.contains("{id}"));
        assert!(code.contains(".batchByName(params.toSeq: _*).apply[List]()"));
    }

    #[test]
    fn test_nullable_fallback_key_matches_null_in_both_styles() {
        let table = Table::new(
            "memo",
            None,
            vec![
                Column::new("body", jdbc_types::VARCHAR).size(100),
                Column::new("title", jdbc_types::VARCHAR).size(50).not_null(),
            ],
            &[],
        );
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);

        let dsl = QueryDsl.delete(&ctx);
        assert!(dsl.contains(
            ".where.eq(column.body, entity.body).and.eq(column.title, entity.title)"
        ));

        let delete = Interpolation.delete(&ctx);
        assert!(delete.contains(
            "where ${sqls.eq(column.body, entity.body)} and ${sqls.eq(column.title, entity.title)}"
        ));
        assert!(!delete.contains("${column.body} = "));

        let find = Interpolation.find_by_key(&ctx, FETCH_SINGLE);
        assert!(find.contains("where ${sqls.eq(m.body, body)} and ${sqls.eq(m.title, title)}"));

        let update = Interpolation.update(&ctx);
        assert!(update.contains("${sqls.eq(column.body, entity.body)}"));
    }

    #[test]
    fn test_batch_insert_binds_any_in_both_styles() {
        let table = Table::new(
            "doc",
            None,
            vec![
                Column::new("id", jdbc_types::BIGINT).not_null(),
                Column::new("body", jdbc_types::OTHER),
            ],
            &["id"],
        );
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        let binder = "ParameterBinder(entity.body, (ps, i) => ps.setObject(i, entity.body.orNull))";

        let dsl = QueryDsl.batch_insert(&ctx, "List");
        assert!(dsl.contains(&format!("        {}", binder)));
        assert!(dsl.contains("        entity.id,\n"));

        let interpolated = Interpolation.batch_insert(&ctx, "List");
        assert!(interpolated.contains(&format!("\"body\" -> {}", binder)));
        assert!(interpolated.contains("\"id\" -> entity.id"));
    }

    #[test]
    fn test_empty_insert_uses_default_values() {
        let table = Table::new(
            "seq",
            None,
            vec![Column::new("id", jdbc_types::BIGINT).not_null().auto_increment()],
            &["id"],
        );
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        assert!(QueryDsl.insert(&ctx, true).contains("default values"));
        assert!(Interpolation.insert(&ctx, true).contains("default values"));
    }
}
