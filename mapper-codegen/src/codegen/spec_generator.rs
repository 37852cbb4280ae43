//! Spec generator - test classes exercising a generated model

use tracing::{debug, warn};

use crate::config::{GeneratorTemplate, ReturnCollectionType};

use super::context::TableContext;
use super::model_generator::package_clause;

/// Supported test frameworks, keyed by their configuration identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestTemplate {
    ScalaTestFlatSpec,
    Specs2Unit,
    Specs2Acceptance,
}

impl TestTemplate {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ScalaTestFlatSpec" => Some(Self::ScalaTestFlatSpec),
            "specs2unit" => Some(Self::Specs2Unit),
            "specs2acceptance" => Some(Self::Specs2Acceptance),
            _ => None,
        }
    }

    fn body(&self) -> &'static str {
        match self {
            Self::ScalaTestFlatSpec => SCALATEST_FLAT_SPEC,
            Self::Specs2Unit => SPECS2_UNIT,
            Self::Specs2Acceptance => SPECS2_ACCEPTANCE,
        }
    }
}

/// Name of the generated spec class
pub fn spec_class_name(ctx: &TableContext<'_>) -> String {
    if ctx.config.abstract_spec {
        format!("Abstract{}Spec", ctx.class_name)
    } else {
        format!("{}Spec", ctx.class_name)
    }
}

/// Generate the spec source, or `None` when the configured test template is unknown
pub fn generate_spec(ctx: &TableContext<'_>) -> Option<String> {
    let Some(template) = TestTemplate::from_name(&ctx.config.test_template) else {
        warn!(
            "Unsupported test template {:?}, skipping spec for {}",
            ctx.config.test_template, ctx.class_name
        );
        return None;
    };
    debug!("Generating spec {} ({:?})", spec_class_name(ctx), template);

    let package = package_clause(&ctx.config.package_name);
    let replacements = [
        ("%package%", package.trim_end().to_string()),
        ("%imports%", ctx.type_imports().join("\n")),
        ("%specClassName%", spec_class_name(ctx)),
        ("%classModifier%", class_modifier(ctx).to_string()),
        ("%baseTypes%", base_types(ctx)),
        ("%className%", ctx.class_name.clone()),
        ("%syntaxObject%", syntax_object(ctx)),
        ("%collectionTypeArg%", collection_type_arg(ctx).to_string()),
        ("%primaryKeys%", primary_keys(ctx)),
        ("%whereExample%", where_example(ctx)),
        ("%createFields%", create_fields(ctx)),
    ];

    let code = replacements
        .iter()
        .fold(template.body().to_string(), |code, (placeholder, value)| {
            code.replace(placeholder, value)
        });
    Some(code.trim_start().to_string())
}

fn class_modifier(ctx: &TableContext<'_>) -> &'static str {
    if ctx.config.abstract_spec {
        "abstract "
    } else {
        ""
    }
}

fn base_types(ctx: &TableContext<'_>) -> String {
    ctx.config
        .spec_base_types
        .iter()
        .map(|t| format!(" with {}", t))
        .collect()
}

fn syntax_object(ctx: &TableContext<'_>) -> String {
    format!(
        "val {} = {}.syntax(\"{}\")",
        ctx.syntax_var, ctx.class_name, ctx.syntax_name
    )
}

/// Multi-row reads need the collection spelled out when the caller picks it
fn collection_type_arg(ctx: &TableContext<'_>) -> &'static str {
    match ctx.config.return_collection_type {
        ReturnCollectionType::Factory => "[List]",
        _ => "",
    }
}

/// Sample key values, in key order
pub fn primary_keys(ctx: &TableContext<'_>) -> String {
    ctx.key_columns()
        .iter()
        .map(|c| c.sample_value.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Equality predicate on the first key column
pub fn where_example(ctx: &TableContext<'_>) -> String {
    let keys = ctx.key_columns();
    let Some(col) = keys.first() else {
        return "sqls.empty".to_string();
    };
    let column = format!("{}.{}", ctx.syntax_var, col.field_name);
    match ctx.config.template {
        GeneratorTemplate::QueryDsl => format!("sqls.eq({}, {})", column, col.sample_value),
        GeneratorTemplate::Interpolation => {
            format!("sqls\"${{{}}} = ${{{}}}\"", column, col.sample_value)
        }
    }
}

/// Named arguments for every required `create` parameter
pub fn create_fields(ctx: &TableContext<'_>) -> String {
    ctx.insertable_columns()
        .iter()
        .filter(|c| c.is_not_null())
        .map(|c| format!("{} = {}", c.field_name, c.default_value))
        .collect::<Vec<_>>()
        .join(", ")
}

const SCALATEST_FLAT_SPEC: &str = r#"
%package%

import org.scalatest.flatspec.FixtureAnyFlatSpec
import org.scalatest.matchers.should.Matchers
import scalikejdbc.scalatest.AutoRollback
import scalikejdbc._
%imports%

%classModifier%class %specClassName% extends FixtureAnyFlatSpec with Matchers with AutoRollback%baseTypes% {
  %syntaxObject%

  behavior of "%className%"

  it should "find by primary keys" in { implicit session =>
    val maybeFound = %className%.find(%primaryKeys%)
    maybeFound.isDefined should be(true)
  }
  it should "find by where clauses" in { implicit session =>
    val maybeFound = %className%.findBy(%whereExample%)
    maybeFound.isDefined should be(true)
  }
  it should "find all records" in { implicit session =>
    val allResults = %className%.findAll%collectionTypeArg%()
    allResults.size should be > 0
  }
  it should "count all records" in { implicit session =>
    val count = %className%.countAll()
    count should be > 0L
  }
  it should "find all by where clauses" in { implicit session =>
    val results = %className%.findAllBy%collectionTypeArg%(%whereExample%)
    results.size should be > 0
  }
  it should "count by where clauses" in { implicit session =>
    val count = %className%.countBy(%whereExample%)
    count should be > 0L
  }
  it should "create new record" in { implicit session =>
    val created = %className%.create(%createFields%)
    created should not be (null)
  }
  it should "save a record" in { implicit session =>
    val entity = %className%.findAll%collectionTypeArg%().head
    val modified = entity
    val updated = %className%.save(modified)
    updated should equal(modified)
  }
  it should "destroy a record" in { implicit session =>
    val entity = %className%.findAll%collectionTypeArg%().head
    val deleted = %className%.destroy(entity)
    deleted should be(1)
    val shouldBeNone = %className%.find(%primaryKeys%)
    shouldBeNone.isDefined should be(false)
  }
  it should "perform batch insert" in { implicit session =>
    val entities = %className%.findAll%collectionTypeArg%()
    entities.foreach(entity => %className%.destroy(entity))
    val batchInserted = %className%.batchInsert%collectionTypeArg%(entities)
    batchInserted.size should be > 0
  }
}
"#;

const SPECS2_UNIT: &str = r#"
%package%

import scalikejdbc.specs2.mutable.AutoRollback
import org.specs2.mutable._
import scalikejdbc._
%imports%

%classModifier%class %specClassName% extends Specification%baseTypes% {

  "%className%" should {

    %syntaxObject%

    "find by primary keys" in new AutoRollback {
      val maybeFound = %className%.find(%primaryKeys%)
      maybeFound.isDefined must beTrue
    }
    "find by where clauses" in new AutoRollback {
      val maybeFound = %className%.findBy(%whereExample%)
      maybeFound.isDefined must beTrue
    }
    "find all records" in new AutoRollback {
      val allResults = %className%.findAll%collectionTypeArg%()
      allResults.size must be_>(0)
    }
    "count all records" in new AutoRollback {
      val count = %className%.countAll()
      count must be_>(0L)
    }
    "find all by where clauses" in new AutoRollback {
      val results = %className%.findAllBy%collectionTypeArg%(%whereExample%)
      results.size must be_>(0)
    }
    "count by where clauses" in new AutoRollback {
      val count = %className%.countBy(%whereExample%)
      count must be_>(0L)
    }
    "create new record" in new AutoRollback {
      val created = %className%.create(%createFields%)
      created must not(beNull)
    }
    "save a record" in new AutoRollback {
      val entity = %className%.findAll%collectionTypeArg%().head
      val modified = entity
      val updated = %className%.save(modified)
      updated must_== modified
    }
    "destroy a record" in new AutoRollback {
      val entity = %className%.findAll%collectionTypeArg%().head
      val deleted = %className%.destroy(entity) == 1
      deleted must beTrue
      val shouldBeNone = %className%.find(%primaryKeys%)
      shouldBeNone.isDefined must beFalse
    }
    "perform batch insert" in new AutoRollback {
      val entities = %className%.findAll%collectionTypeArg%()
      entities.foreach(entity => %className%.destroy(entity))
      val batchInserted = %className%.batchInsert%collectionTypeArg%(entities)
      batchInserted.size must be_>(0)
    }
  }

}
"#;

const SPECS2_ACCEPTANCE: &str = r#"
%package%

import scalikejdbc.specs2.AutoRollback
import org.specs2._
import scalikejdbc._
%imports%

%classModifier%class %specClassName% extends Specification%baseTypes% {

  def is = s2"""

  The '%className%' model should
    find by primary keys         ${autoRollback().findByPrimaryKeys}
    find by where clauses        ${autoRollback().findByWhereClauses}
    find all records             ${autoRollback().findAll}
    count all records            ${autoRollback().countAll}
    find all by where clauses    ${autoRollback().findAllBy}
    count by where clauses       ${autoRollback().countBy}
    create new record            ${autoRollback().create}
    save a record                ${autoRollback().save}
    destroy a record             ${autoRollback().destroy}
    perform batch insert         ${autoRollback().batchInsert}
  """

  case class autoRollback() extends AutoRollback {
    %syntaxObject%

    def findByPrimaryKeys = this {
      val maybeFound = %className%.find(%primaryKeys%)
      maybeFound.isDefined should beTrue
    }
    def findByWhereClauses = this {
      val maybeFound = %className%.findBy(%whereExample%)
      maybeFound.isDefined should beTrue
    }
    def findAll = this {
      val allResults = %className%.findAll%collectionTypeArg%()
      allResults.size should be_>(0)
    }
    def countAll = this {
      val count = %className%.countAll()
      count should be_>(0L)
    }
    def findAllBy = this {
      val results = %className%.findAllBy%collectionTypeArg%(%whereExample%)
      results.size should be_>(0)
    }
    def countBy = this {
      val count = %className%.countBy(%whereExample%)
      count should be_>(0L)
    }
    def create = this {
      val created = %className%.create(%createFields%)
      created should not(beNull)
    }
    def save = this {
      val entity = %className%.findAll%collectionTypeArg%().head
      val modified = entity
      val updated = %className%.save(modified)
      updated should_== modified
    }
    def destroy = this {
      val entity = %className%.findAll%collectionTypeArg%().head
      %className%.destroy(entity)
      val shouldBeNone = %className%.find(%primaryKeys%)
      shouldBeNone.isDefined should beFalse
    }
    def batchInsert = this {
      val entities = %className%.findAll%collectionTypeArg%()
      entities.foreach(entity => %className%.destroy(entity))
      val batchInserted = %className%.batchInsert%collectionTypeArg%(entities)
      batchInserted.size should be_>(0)
    }
  }

}
"#;
