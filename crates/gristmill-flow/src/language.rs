use std::fmt;

use serde::{Deserialize, Serialize};

/// Script languages understood by the platform.
///
/// Serialized as lowercase strings. Languages this build does not know are
/// carried through verbatim as [`ScriptLang::Other`] so that flow documents
/// survive a round trip; they are rejected only when a path has to be
/// assigned for extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScriptLang {
  Python3,
  Bun,
  Bunnative,
  Deno,
  Nativets,
  Go,
  Bash,
  Powershell,
  Postgresql,
  Mysql,
  Bigquery,
  Oracledb,
  Snowflake,
  Mssql,
  Graphql,
  Php,
  Rust,
  Csharp,
  Nu,
  Ansible,
  Java,
  Duckdb,
  Other(String),
}

impl ScriptLang {
  pub fn as_str(&self) -> &str {
    match self {
      ScriptLang::Python3 => "python3",
      ScriptLang::Bun => "bun",
      ScriptLang::Bunnative => "bunnative",
      ScriptLang::Deno => "deno",
      ScriptLang::Nativets => "nativets",
      ScriptLang::Go => "go",
      ScriptLang::Bash => "bash",
      ScriptLang::Powershell => "powershell",
      ScriptLang::Postgresql => "postgresql",
      ScriptLang::Mysql => "mysql",
      ScriptLang::Bigquery => "bigquery",
      ScriptLang::Oracledb => "oracledb",
      ScriptLang::Snowflake => "snowflake",
      ScriptLang::Mssql => "mssql",
      ScriptLang::Graphql => "graphql",
      ScriptLang::Php => "php",
      ScriptLang::Rust => "rust",
      ScriptLang::Csharp => "csharp",
      ScriptLang::Nu => "nu",
      ScriptLang::Ansible => "ansible",
      ScriptLang::Java => "java",
      ScriptLang::Duckdb => "duckdb",
      ScriptLang::Other(lang) => lang,
    }
  }
}

impl fmt::Display for ScriptLang {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<String> for ScriptLang {
  fn from(s: String) -> Self {
    match s.as_str() {
      "python3" => ScriptLang::Python3,
      "bun" => ScriptLang::Bun,
      "bunnative" => ScriptLang::Bunnative,
      "deno" => ScriptLang::Deno,
      "nativets" => ScriptLang::Nativets,
      "go" => ScriptLang::Go,
      "bash" => ScriptLang::Bash,
      "powershell" => ScriptLang::Powershell,
      "postgresql" => ScriptLang::Postgresql,
      "mysql" => ScriptLang::Mysql,
      "bigquery" => ScriptLang::Bigquery,
      "oracledb" => ScriptLang::Oracledb,
      "snowflake" => ScriptLang::Snowflake,
      "mssql" => ScriptLang::Mssql,
      "graphql" => ScriptLang::Graphql,
      "php" => ScriptLang::Php,
      "rust" => ScriptLang::Rust,
      "csharp" => ScriptLang::Csharp,
      "nu" => ScriptLang::Nu,
      "ansible" => ScriptLang::Ansible,
      "java" => ScriptLang::Java,
      "duckdb" => ScriptLang::Duckdb,
      _ => ScriptLang::Other(s),
    }
  }
}

impl From<ScriptLang> for String {
  fn from(lang: ScriptLang) -> Self {
    lang.as_str().to_string()
  }
}

/// The TypeScript runtime a workspace treats as its default.
///
/// Extracted TypeScript files use a plain `.ts` suffix when their language
/// matches this runtime and a runtime-qualified one otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TsRuntime {
  #[default]
  Bun,
  Deno,
}

impl TsRuntime {
  pub fn as_str(&self) -> &'static str {
    match self {
      TsRuntime::Bun => "bun",
      TsRuntime::Deno => "deno",
    }
  }
}

impl fmt::Display for TsRuntime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
