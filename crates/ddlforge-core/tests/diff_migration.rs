//! Comparing desired metadata against introspected schemas and planning
//! the migration between them.

use ddlforge_core::diff::{ColumnChange, LiveColumn, LiveEnum, LiveIndex, LiveTable};
use ddlforge_core::{
    diff_schema, migration_sql, DatabaseSchema, Dialect, EmbeddedField, EmbeddedMode,
    GeneratedSchema, GlobalEnum, Introspect, MigrationOptions, SchemaField, SchemaMetadata,
    TableDirective,
};

/// Catalog snapshot stored as JSON, standing in for a database driver.
struct Snapshot(&'static str);

impl Introspect for Snapshot {
    type Error = serde_json::Error;

    fn introspect_schema(&self) -> Result<DatabaseSchema, Self::Error> {
        serde_json::from_str(self.0)
    }
}

fn metadata() -> SchemaMetadata {
    let mut author = EmbeddedField::new("Post", "Author", EmbeddedMode::Relation);
    author.field = Some("user_id".into());
    author.reference = Some("users(id)".into());

    SchemaMetadata {
        fields: vec![
            SchemaField::new("User", "id", "INTEGER").primary().auto_increment(),
            SchemaField::new("User", "email", "VARCHAR(255)").not_null().unique(),
            SchemaField::new("User", "active", "BOOLEAN")
                .not_null()
                .default_value("true"),
            SchemaField::new("User", "bio", "TEXT"),
            SchemaField::new("User", "role", "role").default_value("member"),
            SchemaField::new("Post", "id", "BIGINT").primary().auto_increment(),
            SchemaField::new("Post", "title", "VARCHAR(200)").not_null(),
        ],
        tables: vec![
            TableDirective::new("User", "users"),
            TableDirective::new("Post", "posts"),
        ],
        enums: vec![GlobalEnum::new("role", &["member", "admin"])],
        embedded: vec![author],
        ..SchemaMetadata::default()
    }
}

fn generated() -> GeneratedSchema {
    GeneratedSchema::from_metadata(&metadata())
}

const POSTGRES_CATALOG: &str = r#"{
  "tables": [
    {"name": "users", "columns": [
      {"name": "id", "type": "integer", "nullable": false, "primary": true,
       "default": "nextval('users_id_seq'::regclass)"},
      {"name": "email", "type": "character varying", "nullable": false, "unique": true},
      {"name": "active", "type": "boolean", "nullable": false, "default": "true"},
      {"name": "bio", "type": "text", "nullable": true, "default": "NULL::text"},
      {"name": "role", "type": "USER-DEFINED", "udt_name": "role", "nullable": true,
       "default": "'member'::role"}
    ]},
    {"name": "posts", "columns": [
      {"name": "id", "type": "bigint", "nullable": false, "primary": true,
       "default": "nextval('posts_id_seq'::regclass)"},
      {"name": "title", "type": "character varying", "nullable": false},
      {"name": "user_id", "type": "integer", "nullable": false}
    ]}
  ],
  "indexes": [
    {"name": "users_pkey", "table": "users", "columns": ["id"], "primary": true, "unique": true},
    {"name": "users_email_key", "table": "users", "columns": ["email"], "unique": true},
    {"name": "posts_pkey", "table": "posts", "columns": ["id"], "primary": true, "unique": true}
  ],
  "enums": [
    {"name": "role", "values": ["member", "admin"]}
  ]
}"#;

const MYSQL_CATALOG: &str = r#"{
  "tables": [
    {"name": "users", "columns": [
      {"name": "id", "type": "int", "nullable": false, "primary": true, "auto_increment": true},
      {"name": "email", "type": "varchar(255)", "nullable": false, "unique": true},
      {"name": "active", "type": "tinyint(1)", "nullable": false, "default": "1"},
      {"name": "bio", "type": "text", "nullable": true},
      {"name": "role", "type": "enum('member','admin')", "nullable": true, "default": "member"}
    ]},
    {"name": "posts", "columns": [
      {"name": "id", "type": "bigint", "nullable": false, "primary": true, "auto_increment": true},
      {"name": "title", "type": "varchar(200)", "nullable": false},
      {"name": "user_id", "type": "int", "nullable": false}
    ]}
  ],
  "indexes": [
    {"name": "PRIMARY", "table": "users", "columns": ["id"], "primary": true, "unique": true},
    {"name": "email", "table": "users", "columns": ["email"], "unique": true},
    {"name": "PRIMARY", "table": "posts", "columns": ["id"], "primary": true, "unique": true}
  ]
}"#;

fn postgres_live() -> DatabaseSchema {
    Snapshot(POSTGRES_CATALOG).introspect_schema().unwrap()
}

fn mysql_live() -> DatabaseSchema {
    Snapshot(MYSQL_CATALOG).introspect_schema().unwrap()
}

fn table_mut<'a>(schema: &'a mut DatabaseSchema, name: &str) -> &'a mut LiveTable {
    schema.tables.iter_mut().find(|t| t.name == name).unwrap()
}

fn no_destructive_statements(sql: &[String]) {
    for statement in sql {
        let upper = statement.to_ascii_uppercase();
        for forbidden in ["DROP TABLE", "DROP TYPE", "DROP COLUMN"] {
            assert!(!upper.contains(forbidden), "{statement}");
        }
    }
}

// =============================================================================
// In-sync schemas
// =============================================================================

#[test]
fn test_postgres_catalog_in_sync() {
    let diff = diff_schema(&generated(), &postgres_live(), Dialect::Postgres);
    assert!(!diff.has_changes(), "{diff}");
    assert_eq!(diff.to_string(), "schema is up to date\n");

    let sql = migration_sql(&diff, &generated(), Dialect::Postgres, MigrationOptions::default())
        .unwrap();
    assert!(sql.is_empty());
}

#[test]
fn test_mysql_catalog_in_sync() {
    let diff = diff_schema(&generated(), &mysql_live(), Dialect::Mysql);
    assert!(!diff.has_changes(), "{diff}");
}

#[test]
fn test_mariadb_reads_mysql_catalog() {
    let diff = diff_schema(&generated(), &mysql_live(), Dialect::Mariadb);
    assert!(!diff.has_changes(), "{diff}");
}

// =============================================================================
// Defaults
// =============================================================================

fn set_default(live: &mut DatabaseSchema, table: &str, column: &str, value: Option<&str>) {
    let column = table_mut(live, table)
        .columns
        .iter_mut()
        .find(|c| c.name == column)
        .unwrap();
    column.default = value.map(str::to_string);
}

#[test]
fn test_true_and_one_are_the_same_boolean_default() {
    let mut live = mysql_live();
    set_default(&mut live, "users", "active", Some("b'1'"));
    assert!(!diff_schema(&generated(), &live, Dialect::Mysql).has_changes());

    set_default(&mut live, "users", "active", Some("0"));
    let diff = diff_schema(&generated(), &live, Dialect::Mysql);
    assert_eq!(
        diff.tables_modified[0].columns_modified[0].changes,
        [ColumnChange::Default {
            generated: "true".into(),
            live: "false".into(),
        }]
    );
}

#[test]
fn test_null_default_matches_missing_default() {
    let mut live = postgres_live();
    for reported in [None, Some("NULL"), Some("null"), Some("NULL::text")] {
        set_default(&mut live, "users", "bio", reported);
        let diff = diff_schema(&generated(), &live, Dialect::Postgres);
        assert!(!diff.has_changes(), "{reported:?}: {diff}");
    }
}

#[test]
fn test_sequence_defaults_are_ignored() {
    let mut live = postgres_live();
    set_default(&mut live, "users", "id", Some("nextval('some_other_seq'::regclass)"));
    assert!(!diff_schema(&generated(), &live, Dialect::Postgres).has_changes());
}

// =============================================================================
// Drift
// =============================================================================

fn drifted_postgres() -> DatabaseSchema {
    let mut live = postgres_live();
    live.tables.retain(|t| t.name != "posts");
    live.indexes.retain(|i| i.table != "posts");

    let users = table_mut(&mut live, "users");
    users.columns.retain(|c| c.name != "bio");
    users.columns.push(LiveColumn::new("legacy_flag", "boolean"));
    if let Some(email) = users.columns.iter_mut().find(|c| c.name == "email") {
        email.nullable = true;
    }

    live.tables.push(LiveTable {
        name: "audit_log".into(),
        columns: vec![LiveColumn::new("at", "timestamp")],
    });
    live.indexes.push(LiveIndex {
        name: "idx_audit_log_at".into(),
        table: "audit_log".into(),
        columns: vec!["at".into()],
        primary: false,
        unique: false,
    });
    live.indexes.push(LiveIndex {
        name: "idx_users_legacy".into(),
        table: "users".into(),
        columns: vec!["legacy_flag".into()],
        primary: false,
        unique: false,
    });

    live.enums = vec![
        LiveEnum {
            name: "role".into(),
            values: vec!["member".into()],
        },
        LiveEnum {
            name: "old_kind".into(),
            values: vec!["a".into()],
        },
    ];
    live
}

#[test]
fn test_drift_is_reported() {
    let diff = diff_schema(&generated(), &drifted_postgres(), Dialect::Postgres);

    assert_eq!(diff.tables_added, ["posts"]);
    assert_eq!(diff.tables_removed, ["audit_log"]);
    assert_eq!(diff.enums_removed, ["old_kind"]);
    assert_eq!(diff.enums_modified[0].values_added, ["admin"]);

    let users = &diff.tables_modified[0];
    assert_eq!(users.table, "users");
    assert_eq!(users.columns_added, ["bio"]);
    assert_eq!(users.columns_removed, ["legacy_flag"]);
    assert_eq!(users.columns_modified[0].column, "email");

    let removed: Vec<&str> = diff.indexes_removed.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(removed, ["idx_users_legacy"]);

    let json = serde_json::to_value(&diff).unwrap();
    assert_eq!(json["tables_removed"], serde_json::json!(["audit_log"]));
    assert_eq!(
        json["tables_modified"][0]["columns_modified"][0]["changes"][0]["attribute"],
        "nullable"
    );
}

#[test]
fn test_postgres_migration_order() {
    let generated = generated();
    let diff = diff_schema(&generated, &drifted_postgres(), Dialect::Postgres);
    let sql = migration_sql(&diff, &generated, Dialect::Postgres, MigrationOptions::default())
        .unwrap();

    assert_eq!(sql[0], "ALTER TYPE role ADD VALUE 'admin';");
    assert!(sql[1].starts_with("-- POSTGRES TABLE: posts --\nCREATE TABLE posts ("), "{}", sql[1]);
    assert!(sql[1].contains("id BIGSERIAL PRIMARY KEY NOT NULL"), "{}", sql[1]);
    assert!(sql[1].contains("REFERENCES users(id)"), "{}", sql[1]);
    assert_eq!(sql[2], "-- TODO: add column users.bio TEXT");
    assert_eq!(sql[3], "-- TODO: modify column users.email (nullable true -> false)");
    assert_eq!(
        sql[4],
        "-- WARNING: column users.legacy_flag is no longer declared; remove it manually after migrating its data"
    );
    assert_eq!(sql[5], "DROP INDEX IF EXISTS idx_users_legacy;");
    assert_eq!(
        sql[6],
        "-- WARNING: table audit_log is no longer declared; remove it manually after migrating its data"
    );
    assert_eq!(
        sql[7],
        "-- WARNING: enum type old_kind is no longer declared; remove it manually once unused"
    );
    assert_eq!(sql.len(), 8);
    no_destructive_statements(&sql);
}

#[test]
fn test_mysql_migration_with_column_statements() {
    let mut live = mysql_live();
    let users = table_mut(&mut live, "users");
    users.columns.retain(|c| c.name != "bio");
    if let Some(email) = users.columns.iter_mut().find(|c| c.name == "email") {
        email.nullable = true;
    }
    live.tables.push(LiveTable {
        name: "sessions".into(),
        columns: vec![LiveColumn::new("token", "varchar(64)")],
    });

    let generated = generated();
    let diff = diff_schema(&generated, &live, Dialect::Mysql);
    let sql = migration_sql(&diff, &generated, Dialect::Mysql, MigrationOptions::emit_statements())
        .unwrap();

    assert_eq!(sql[0], "ALTER TABLE users ADD COLUMN bio TEXT;");
    assert_eq!(sql[1], "ALTER TABLE users MODIFY COLUMN email VARCHAR(255) NOT NULL;");
    assert!(sql[2].starts_with("-- WARNING: table sessions"), "{}", sql[2]);
    assert_eq!(sql.len(), 3);
    no_destructive_statements(&sql);
}

#[test]
fn test_mysql_modify_primary_column_keeps_existing_key() {
    let mut live = mysql_live();
    if let Some(id) = table_mut(&mut live, "posts").columns.iter_mut().find(|c| c.name == "id") {
        id.data_type = "varchar(10)".into();
        id.auto_increment = false;
    }

    let generated = generated();
    let diff = diff_schema(&generated, &live, Dialect::Mysql);
    let sql = migration_sql(&diff, &generated, Dialect::Mysql, MigrationOptions::emit_statements())
        .unwrap();

    assert_eq!(sql, ["ALTER TABLE posts MODIFY COLUMN id BIGINT NOT NULL AUTO_INCREMENT;"]);
}

#[test]
fn test_mysql_inline_enum_missing_value() {
    for dialect in [Dialect::Mysql, Dialect::Mariadb] {
        let mut live = mysql_live();
        if let Some(role) = table_mut(&mut live, "users")
            .columns
            .iter_mut()
            .find(|c| c.name == "role")
        {
            role.data_type = "enum('member')".into();
        }

        let generated = generated();
        let diff = diff_schema(&generated, &live, dialect);
        assert!(diff.has_changes(), "{dialect}");
        assert!(diff.tables_modified.is_empty(), "{dialect}: {diff:?}");
        assert!(diff.to_string().contains("~ enum role: + 'admin'"), "{diff}");

        let sql = migration_sql(&diff, &generated, dialect, MigrationOptions::default()).unwrap();
        assert_eq!(
            sql,
            ["-- TODO: add value 'admin' to enum role by redefining the columns that use it"]
        );
    }
}
