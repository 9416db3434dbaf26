use gristmill_flow::{ScriptLang, TsRuntime};

use crate::error::AssignError;

/// Resolve the on-disk base path and extension for an extracted script.
///
/// The base excludes the extension so that the companion lock file can
/// reuse it with `lock` appended. Deterministic: the same inputs always
/// produce the same pair.
pub fn assign_path(
  id: &str,
  language: &ScriptLang,
  default_ts: TsRuntime,
) -> Result<(String, String), AssignError> {
  let ext = extension(language, default_ts)?;
  Ok((format!("{id}."), ext.to_string()))
}

/// Extension table for extracted scripts.
///
/// TypeScript files only carry a runtime-qualified suffix when their
/// language differs from the workspace default runtime.
fn extension(language: &ScriptLang, default_ts: TsRuntime) -> Result<&'static str, AssignError> {
  let ext = match language {
    ScriptLang::Python3 => "py",
    ScriptLang::Bun if default_ts == TsRuntime::Bun => "ts",
    ScriptLang::Deno if default_ts == TsRuntime::Deno => "ts",
    ScriptLang::Bunnative => "ts",
    ScriptLang::Bun => "bun.ts",
    ScriptLang::Deno => "deno.ts",
    ScriptLang::Nativets => "native.ts",
    ScriptLang::Go => "go",
    ScriptLang::Bash => "sh",
    ScriptLang::Powershell => "ps1",
    ScriptLang::Postgresql => "pg.sql",
    ScriptLang::Mysql => "my.sql",
    ScriptLang::Bigquery => "bq.sql",
    ScriptLang::Oracledb => "odb.sql",
    ScriptLang::Snowflake => "sf.sql",
    ScriptLang::Mssql => "ms.sql",
    ScriptLang::Graphql => "gql",
    ScriptLang::Php => "php",
    ScriptLang::Rust => "rs",
    ScriptLang::Csharp => "cs",
    ScriptLang::Nu => "nu",
    ScriptLang::Ansible => "playbook.yml",
    ScriptLang::Java => "java",
    ScriptLang::Duckdb => "duckdb.sql",
    ScriptLang::Other(lang) => {
      return Err(AssignError::UnsupportedLanguage(lang.clone()));
    }
  };
  Ok(ext)
}
