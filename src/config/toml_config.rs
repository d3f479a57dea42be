use crate::core::scorers::DEFAULT_SCORERS_LIMIT;
use crate::core::zones::ZoneRules;
use crate::core::ConfigProvider;
use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const OUTPUT_FORMATS: [&str; 3] = ["csv", "json", "text"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub league: LeagueSection,
    pub data: DataConfig,
    pub output: OutputConfig,
    pub scorers: Option<ScorersConfig>,
    pub zones: Option<ZoneRules>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSection {
    pub name: String,
    pub season: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorersConfig {
    pub limit: Option<usize>,
}

fn default_formats() -> Vec<String> {
    vec!["csv".to_string(), "json".to_string()]
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            league: LeagueSection {
                name: "League".to_string(),
                season: None,
            },
            data: DataConfig {
                path: "./data/league.json".to_string(),
            },
            output: OutputConfig {
                path: "./output".to_string(),
                formats: default_formats(),
            },
            scorers: None,
            zones: None,
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"))
}

impl LeagueConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeagueError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LeagueError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEAGUE_DATA})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("league.name", &self.league.name)?;
        validation::validate_path("data.path", &self.data.path)?;
        validation::validate_file_extension("data.path", &self.data.path, &["json"])?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_one_of("output.formats", &self.output.formats, &OUTPUT_FORMATS)?;

        if let Some(limit) = self.scorers.as_ref().and_then(|s| s.limit) {
            validation::validate_positive_number("scorers.limit", limit, 1)?;
        }

        if let Some(zones) = &self.zones {
            zones.validate()?;
        }

        Ok(())
    }
}

impl ConfigProvider for LeagueConfig {
    fn league_name(&self) -> &str {
        &self.league.name
    }

    fn data_path(&self) -> &str {
        &self.data.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn scorers_limit(&self) -> usize {
        self.scorers
            .as_ref()
            .and_then(|s| s.limit)
            .unwrap_or(DEFAULT_SCORERS_LIMIT)
    }

    fn zone_rules(&self) -> ZoneRules {
        self.zones.unwrap_or_default()
    }
}

impl Validate for LeagueConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
