//! Model generator - the case class and its `SQLSyntaxSupport` companion

use heck::ToSnakeCase;
use tracing::debug;

use crate::config::ReturnCollectionType;

use super::context::{ScalaColumn, TableContext};
use super::template::{query_template, QueryTemplate, FETCH_SINGLE};
use super::type_resolver::ScalaType;

/// Generate the complete model source for a table
pub fn generate_model(ctx: &TableContext<'_>) -> String {
    debug!(
        "Generating model {} ({} template)",
        ctx.class_name, ctx.config.template
    );
    let mut code = String::new();

    code.push_str(&package_clause(&ctx.config.package_name));
    code.push_str(&imports(ctx).join("\n"));
    code.push_str("\n\n");
    code.push_str(&record_declaration(ctx));

    if !ctx.config.case_class_only {
        code.push_str("\n\n");
        code.push_str(&companion_object(ctx, query_template(ctx.config.template)));
    }
    code
}

/// `package a.b\n\n`, or nothing for the root package
pub(crate) fn package_clause(package_name: &str) -> String {
    if package_name.is_empty() {
        String::new()
    } else {
        format!("package {}\n\n", package_name)
    }
}

fn imports(ctx: &TableContext<'_>) -> Vec<String> {
    let mut imports = vec!["import scalikejdbc._".to_string()];
    imports.extend(ctx.type_imports());
    if ctx.config.return_collection_type == ReturnCollectionType::Factory {
        imports.push("import scala.collection.Factory".to_string());
    }
    imports
}

/// ` extends A with B`, or nothing
fn extends_clause(first: Option<&str>, with: &[String]) -> String {
    let mut parts: Vec<&str> = first.into_iter().collect();
    parts.extend(with.iter().map(String::as_str));
    if parts.is_empty() {
        String::new()
    } else {
        format!(" extends {}", parts.join(" with "))
    }
}

/// Constructor / parameter declaration, nullable columns defaulted to `None`
fn param_declaration(col: &ScalaColumn<'_>) -> String {
    if col.field_type.is_optional() {
        format!("{}: {} = None", col.field_name, col.type_string())
    } else {
        format!("{}: {}", col.field_name, col.type_string())
    }
}

fn param_list(columns: &[&ScalaColumn<'_>], indent: &str) -> String {
    if columns.is_empty() {
        return "()".to_string();
    }
    let params = columns
        .iter()
        .map(|c| format!("{}{}", indent, param_declaration(c)))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("(\n{})", params)
}

fn record_declaration(ctx: &TableContext<'_>) -> String {
    let class = &ctx.class_name;
    let columns: Vec<&ScalaColumn<'_>> = ctx.columns.iter().collect();
    let mut code = format!(
        "case class {}{}{}",
        class,
        param_list(&columns, "  "),
        extends_clause(None, &ctx.config.base_types)
    );

    if ctx.config.case_class_only {
        code.push('\n');
        return code;
    }

    let session = ctx
        .session_params(None)
        .replace("autoSession", &format!("{}.autoSession", class));
    code.push_str(" {\n\n");
    code.push_str(&format!(
        "  def save(){session}: {class} = {class}.save(this)(session)\n\n",
        session = session,
        class = class
    ));
    code.push_str(&format!(
        "  def destroy(){session}: Int = {class}.destroy(this)(session)\n\n",
        session = session,
        class = class
    ));
    code.push_str("}\n");
    code
}

fn companion_object(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    let class = &ctx.class_name;
    let support = format!("SQLSyntaxSupport[{}]", class);
    let mut code = format!(
        "object {}{} {{\n\n",
        class,
        extends_clause(Some(support.as_str()), &ctx.config.companion_base_types)
    );

    if let Some(schema) = ctx.table.schema.as_deref().filter(|s| !s.is_empty()) {
        code.push_str(&format!("  override val schemaName = Some(\"{}\")\n\n", schema));
    }
    code.push_str(&format!("  override val tableName = \"{}\"\n\n", ctx.table.name));
    code.push_str(&format!(
        "  override val columns = Seq({})\n\n",
        ctx.columns
            .iter()
            .map(|c| format!("\"{}\"", c.column.name))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    if let Some(converters) = name_converters(ctx) {
        code.push_str(&converters);
    }

    code.push_str(&extractors(ctx));
    code.push_str(&format!(
        "  val {} = {}.syntax(\"{}\")\n\n",
        ctx.syntax_var, class, ctx.syntax_name
    ));
    code.push_str("  override val autoSession = AutoSession\n\n");

    let methods = [
        find_method(ctx, template),
        find_all_method(ctx, template),
        count_all_method(ctx, template),
        find_by_method(ctx, template),
        find_all_by_method(ctx, template),
        count_by_method(ctx, template),
        create_method(ctx, template),
        batch_insert_method(ctx, template),
        save_method(ctx, template),
        destroy_method(ctx, template),
    ];
    code.push_str(&methods.join("\n"));
    code.push_str("\n}\n");
    code
}

/// Field to column mappings that the default camelCase-to-snake_case
/// conversion would get wrong
fn name_converters(ctx: &TableContext<'_>) -> Option<String> {
    let entries: Vec<String> = ctx
        .columns
        .iter()
        .filter(|c| c.plain_name().to_snake_case() != c.column.name.to_lowercase())
        .map(|c| format!("\"{}\" -> \"{}\"", c.plain_name(), c.column.name))
        .collect();
    if entries.is_empty() {
        return None;
    }
    Some(format!(
        "  override val nameConverters: Map[String, String] = Map({})\n\n",
        entries.join(", ")
    ))
}

fn extractors(ctx: &TableContext<'_>) -> String {
    let class = &ctx.class_name;
    let mut code = format!(
        "  def apply(sp: SyntaxProvider[{class}])(rs: WrappedResultSet): {class} = apply(sp.resultName)(rs)\n",
        class = class
    );
    if ctx.config.auto_construct {
        code.push_str(&format!(
            "  def apply(rn: ResultName[{class}])(rs: WrappedResultSet): {class} = autoConstruct(rs, rn)\n\n",
            class = class
        ));
        return code;
    }

    let fields = ctx
        .columns
        .iter()
        .map(|c| format!("    {} = {}", c.field_name, read_column(c)))
        .collect::<Vec<_>>()
        .join(",\n");
    code.push_str(&format!(
        "  def apply(rn: ResultName[{class}])(rs: WrappedResultSet): {class} = new {class}(\n{fields}\n  )\n\n",
        class = class,
        fields = fields
    ));
    code
}

fn read_column(col: &ScalaColumn<'_>) -> String {
    match (col.is_any(), col.is_not_null()) {
        (true, true) => format!("rs.any(rn.{})", col.field_name),
        (true, false) => format!("rs.anyOpt(rn.{})", col.field_name),
        _ => format!("rs.get(rn.{})", col.field_name),
    }
}

/// `(implicit session: ..., factory: ...)` for a method returning `element`s
fn multi_row_session(ctx: &TableContext<'_>, element: &str) -> String {
    ctx.session_params(ctx.config.return_collection_type.implicit_param(element))
}

fn method(signature: String, body: String) -> String {
    format!("  {} = {{\n{}  }}\n", signature, body)
}

fn find_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    let keys = ctx.key_columns();
    let params = keys
        .iter()
        .map(|c| format!("{}: {}", c.field_name, c.type_string()))
        .collect::<Vec<_>>()
        .join(", ");
    method(
        format!(
            "def find({}){}: Option[{}]",
            params,
            ctx.session_params(None),
            ctx.class_name
        ),
        template.find_by_key(ctx, FETCH_SINGLE),
    )
}

fn find_all_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    let coll = ctx.config.return_collection_type;
    method(
        format!(
            "def findAll{}(){}: {}",
            coll.type_params(),
            multi_row_session(ctx, &ctx.class_name),
            coll.result_type(&ctx.class_name)
        ),
        template.find_all(ctx, coll.fetch()),
    )
}

fn count_all_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    method(
        format!("def countAll(){}: Long", ctx.session_params(None)),
        template.count_all(ctx),
    )
}

fn find_by_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    method(
        format!(
            "def findBy(where: SQLSyntax){}: Option[{}]",
            ctx.session_params(None),
            ctx.class_name
        ),
        template.find_by_where(ctx, FETCH_SINGLE),
    )
}

fn find_all_by_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    let coll = ctx.config.return_collection_type;
    method(
        format!(
            "def findAllBy{}(where: SQLSyntax){}: {}",
            coll.type_params(),
            multi_row_session(ctx, &ctx.class_name),
            coll.result_type(&ctx.class_name)
        ),
        template.find_by_where(ctx, coll.fetch()),
    )
}

fn count_by_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    method(
        format!("def countBy(where: SQLSyntax){}: Long", ctx.session_params(None)),
        template.count_by_where(ctx),
    )
}

/// Expression converting the `Long` generated key to the column's type
fn coerce_generated_key(col: &ScalaColumn<'_>) -> String {
    let value = match &col.raw_type {
        ScalaType::Int => "generatedKey.toInt".to_string(),
        ScalaType::Short => "generatedKey.toShort".to_string(),
        ScalaType::Byte => "generatedKey.toByte".to_string(),
        ScalaType::BigDecimal => "BigDecimal(generatedKey)".to_string(),
        ScalaType::String => "generatedKey.toString".to_string(),
        _ => "generatedKey".to_string(),
    };
    if col.is_not_null() {
        value
    } else {
        format!("Some({})", value)
    }
}

fn create_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    let insertable = ctx.insertable_columns();
    let key_column = ctx.generated_key_column();

    let mut body = template.insert(ctx, key_column.is_some());
    let assignments = ctx
        .columns
        .iter()
        .map(|c| {
            let value = if insertable.iter().any(|i| i.column.name == c.column.name) {
                c.field_name.clone()
            } else if key_column.is_some_and(|k| k.column.name == c.column.name) {
                coerce_generated_key(c)
            } else if c.field_type.is_optional() {
                "None".to_string()
            } else {
                c.default_value.clone()
            };
            format!("      {} = {}", c.field_name, value)
        })
        .collect::<Vec<_>>()
        .join(",\n");
    body.push_str(&format!("\n    {}(\n{})\n", ctx.class_name, assignments));

    method(
        format!(
            "def create{}{}: {}",
            param_list(&insertable, "    "),
            ctx.session_params(None),
            ctx.class_name
        ),
        body,
    )
}

fn batch_insert_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    let coll = ctx.config.return_collection_type;
    method(
        format!(
            "def batchInsert{}(entities: collection.Seq[{}]){}: {}",
            coll.type_params(),
            ctx.class_name,
            multi_row_session(ctx, "Int"),
            coll.result_type("Int")
        ),
        template.batch_insert(ctx, coll.batch_apply()),
    )
}

fn save_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    let mut body = if ctx.updatable_columns().is_empty() {
        String::new()
    } else {
        template.update(ctx)
    };
    body.push_str("    entity\n");
    method(
        format!(
            "def save(entity: {class}){session}: {class}",
            class = ctx.class_name,
            session = ctx.session_params(None)
        ),
        body,
    )
}

fn destroy_method(ctx: &TableContext<'_>, template: &dyn QueryTemplate) -> String {
    method(
        format!(
            "def destroy(entity: {}){}: Int",
            ctx.class_name,
            ctx.session_params(None)
        ),
        template.delete(ctx),
    )
}
