use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Champion,
    Medal,
    Continental,
    MidTable,
    Relegation,
}

impl Zone {
    /// Single-character marker used by the text table.
    pub fn marker(&self) -> &'static str {
        match self {
            Zone::Champion => "*",
            Zone::Medal => "+",
            Zone::Continental => "c",
            Zone::MidTable => " ",
            Zone::Relegation => "v",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRules {
    #[serde(default = "default_medal_spots")]
    pub medal_spots: usize,
    #[serde(default = "default_continental_spots")]
    pub continental_spots: usize,
    #[serde(default = "default_relegation_spots")]
    pub relegation_spots: usize,
}

fn default_medal_spots() -> usize {
    3
}

fn default_continental_spots() -> usize {
    4
}

fn default_relegation_spots() -> usize {
    2
}

impl Default for ZoneRules {
    fn default() -> Self {
        Self {
            medal_spots: default_medal_spots(),
            continental_spots: default_continental_spots(),
            relegation_spots: default_relegation_spots(),
        }
    }
}

impl ZoneRules {
    fn upper_band(&self) -> usize {
        self.medal_spots.max(self.continental_spots).max(1)
    }

    /// Band for a 1-based `rank` in a table of `table_len` rows.
    pub fn classify(&self, rank: usize, table_len: usize) -> Result<Zone> {
        if rank == 0 || rank > table_len {
            return Err(LeagueError::validation(format!(
                "rank {} is outside a table of {} teams",
                rank, table_len
            )));
        }

        if rank == 1 {
            return Ok(Zone::Champion);
        }

        let relegation_start = table_len.saturating_sub(self.relegation_spots);
        if self.relegation_spots > 0 && rank > relegation_start && rank > self.upper_band() {
            return Ok(Zone::Relegation);
        }

        if rank <= self.medal_spots {
            Ok(Zone::Medal)
        } else if rank <= self.continental_spots {
            Ok(Zone::Continental)
        } else {
            Ok(Zone::MidTable)
        }
    }

    /// Zones for a whole table, in table order.
    pub fn zones_for(&self, table_len: usize) -> Vec<Zone> {
        (1..=table_len)
            .filter_map(|rank| self.classify(rank, table_len).ok())
            .collect()
    }
}

impl Validate for ZoneRules {
    fn validate(&self) -> Result<()> {
        if self.medal_spots > self.continental_spots && self.continental_spots > 0 {
            return Err(LeagueError::InvalidConfigValueError {
                field: "zones.medal_spots".to_string(),
                value: self.medal_spots.to_string(),
                reason: format!(
                    "cannot exceed zones.continental_spots ({})",
                    self.continental_spots
                ),
            });
        }
        Ok(())
    }
}
