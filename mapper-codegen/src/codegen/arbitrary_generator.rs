//! Arbitrary generator - ScalaCheck generators for a model

use tracing::debug;

use super::context::{ScalaColumn, TableContext};
use super::model_generator::package_clause;
use super::naming;

/// Largest tuple a single generator group may yield
pub const MAX_GROUP_ARITY: usize = 22;

/// Generate the `<Class>Arbitrary` trait source for a table
pub fn generate_arbitrary(ctx: &TableContext<'_>) -> String {
    let groups: Vec<&[ScalaColumn<'_>]> = ctx.columns.chunks(MAX_GROUP_ARITY).collect();
    debug!(
        "Generating arbitrary {}Arbitrary ({} columns, {} groups)",
        ctx.class_name,
        ctx.columns.len(),
        groups.len()
    );

    let mut code = package_clause(&ctx.config.package_name);
    code.push_str("import org.scalacheck.{Arbitrary, Gen}\n");
    for import in ctx.type_imports() {
        code.push_str(&import);
        code.push('\n');
    }
    code.push_str(&format!("\ntrait {}Arbitrary {{\n\n", ctx.class_name));

    for col in &ctx.columns {
        code.push_str(&format!(
            "  val {}: Gen[{}] = {}\n\n",
            gen_name(col),
            col.type_string(),
            column_gen(col)
        ));
    }

    code.push_str(&format!(
        "  implicit val {}: Arbitrary[{}] = Arbitrary {{\n    for {{\n",
        arbitrary_name(&ctx.class_name),
        ctx.class_name
    ));
    let mut offset = 0;
    for (index, group) in groups.iter().enumerate() {
        code.push_str(&group_binding(index, offset, group));
        offset += group.len();
    }
    code.push_str(&format!(
        "    }} yield {}(\n{})\n  }}\n\n}}\n",
        ctx.class_name,
        record_fields(&groups)
    ));
    code
}

/// `<field>Gen`
fn gen_name(col: &ScalaColumn<'_>) -> String {
    format!("{}Gen", col.plain_name())
}

/// `empArbitrary` for `Emp`
fn arbitrary_name(class_name: &str) -> String {
    format!(
        "{}Arbitrary",
        naming::unquote(&naming::to_value_name(class_name))
    )
}

fn column_gen(col: &ScalaColumn<'_>) -> String {
    if !col.field_type.is_string() {
        return format!("Arbitrary.arbitrary[{}]", col.type_string());
    }
    let string_gen = if col.column.size > 0 {
        format!(
            "Gen.choose(0, {}).flatMap(n => Gen.listOfN(n, Gen.alphaNumChar).map(_.mkString))",
            col.column.size
        )
    } else {
        "Gen.alphaNumStr".to_string()
    };
    if col.field_type.is_optional() {
        format!("Gen.option({})", string_gen)
    } else {
        string_gen
    }
}

/// One `g<index> <- ...` binding yielding a tuple over the group's generators
fn group_binding(index: usize, offset: usize, group: &[ScalaColumn<'_>]) -> String {
    let values: Vec<String> = (offset..offset + group.len())
        .map(|i| format!("c{}", i))
        .collect();
    let mut code = format!("      g{} <- for {{\n", index);
    for (value, col) in values.iter().zip(group) {
        code.push_str(&format!("        {} <- {}\n", value, gen_name(col)));
    }
    let tuple = if values.len() == 1 {
        format!("Tuple1({})", values[0])
    } else {
        format!("({})", values.join(", "))
    };
    code.push_str(&format!("      }} yield {}\n", tuple));
    code
}

/// Named constructor arguments read from the group tuples, in column order
fn record_fields(groups: &[&[ScalaColumn<'_>]]) -> String {
    groups
        .iter()
        .enumerate()
        .flat_map(|(index, group)| {
            group.iter().enumerate().map(move |(position, col)| {
                format!("      {} = g{}._{}", col.field_name, index, position + 1)
            })
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::metadata::{jdbc_types, Column, Table};

    fn wide_table(count: usize) -> Table {
        let columns = (0..count)
            .map(|i| Column::new(format!("col_{}", i), jdbc_types::INTEGER).not_null())
            .collect();
        Table::new("wide", None, columns, &["col_0"])
    }

    #[test]
    fn test_string_generators() {
        let table = Table::new(
            "emp",
            None,
            vec![
                Column::new("name", jdbc_types::VARCHAR).size(30).not_null(),
                Column::new("bio", jdbc_types::VARCHAR).size(200),
                Column::new("memo", jdbc_types::LONGVARCHAR).not_null(),
                Column::new("id", jdbc_types::BIGINT).not_null(),
            ],
            &["id"],
        );
        let config = GeneratorConfig::default();
        let code = generate_arbitrary(&TableContext::new(&table, &config));
        assert!(code.contains(
            "val nameGen: Gen[String] = Gen.choose(0, 30).flatMap(n => Gen.listOfN(n, Gen.alphaNumChar).map(_.mkString))"
        ));
        assert!(code.contains("val bioGen: Gen[Option[String]] = Gen.option(Gen.choose(0, 200)"));
        assert!(code.contains("val memoGen: Gen[String] = Gen.alphaNumStr"));
        assert!(code.contains("val idGen: Gen[Long] = Arbitrary.arbitrary[Long]"));
        assert!(code.contains("implicit val empArbitrary: Arbitrary[Emp]"));
    }

    #[test]
    fn test_small_table_uses_one_group() {
        let table = wide_table(1);
        let config = GeneratorConfig::default();
        let code = generate_arbitrary(&TableContext::new(&table, &config));
        assert!(code.contains("} yield Tuple1(c0)"));
        assert!(code.contains("col0 = g0._1"));
        assert!(!code.contains("g1 <-"));
    }

    #[test]
    fn test_wide_table_is_chunked() {
        for count in [22, 23, 44, 45, 67] {
            let table = wide_table(count);
            let config = GeneratorConfig::default();
            let code = generate_arbitrary(&TableContext::new(&table, &config));
            let groups = code.matches(" <- for {").count();
            assert_eq!(groups, count.div_ceil(MAX_GROUP_ARITY), "{} columns", count);

            // every column assigned once, in order
            let assigned: Vec<usize> = code
                .lines()
                .filter_map(|l| l.trim().strip_prefix("col"))
                .filter_map(|l| l.split(' ').next())
                .filter_map(|n| n.parse().ok())
                .collect();
            assert_eq!(assigned, (0..count).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_group_positions() {
        let table = wide_table(23);
        let config = GeneratorConfig::default();
        let code = generate_arbitrary(&TableContext::new(&table, &config));
        assert!(code.contains("col21 = g0._22"));
        assert!(code.contains("col22 = g1._1"));
    }
}
