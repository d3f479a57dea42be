use crate::utils::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Spectator,
    Coach,
    Referee,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    ManageTeams,
    ManagePlayers,
    ManageMatches,
    ManageEvents,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub manage_teams: bool,
    pub manage_players: bool,
    pub manage_matches: bool,
    pub manage_events: bool,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Spectator, Role::Coach, Role::Referee, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Spectator => "spectator",
            Role::Coach => "coach",
            Role::Referee => "referee",
            Role::Admin => "admin",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Role::Spectator => Capabilities::default(),
            Role::Coach => Capabilities {
                manage_teams: true,
                manage_players: true,
                ..Capabilities::default()
            },
            Role::Referee => Capabilities {
                manage_events: true,
                ..Capabilities::default()
            },
            Role::Admin => Capabilities {
                manage_teams: true,
                manage_players: true,
                manage_matches: true,
                manage_events: true,
            },
        }
    }

    /// Unknown or missing roles from the auth provider read as spectator.
    pub fn from_str_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown role '{}', falling back to spectator", value);
            Role::Spectator
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LeagueError::validation(format!("unknown role '{}'", s)))
    }
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageTeams => "manage-teams",
            Capability::ManagePlayers => "manage-players",
            Capability::ManageMatches => "manage-matches",
            Capability::ManageEvents => "manage-events",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "manage-teams" => Ok(Capability::ManageTeams),
            "manage-players" => Ok(Capability::ManagePlayers),
            "manage-matches" => Ok(Capability::ManageMatches),
            "manage-events" => Ok(Capability::ManageEvents),
            other => Err(LeagueError::validation(format!(
                "unknown capability '{}'",
                other
            ))),
        }
    }
}

impl Capabilities {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageTeams => self.manage_teams,
            Capability::ManagePlayers => self.manage_players,
            Capability::ManageMatches => self.manage_matches,
            Capability::ManageEvents => self.manage_events,
        }
    }
}

/// Signed-in user and role, handed explicitly to whatever needs to check
/// permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    pub role: Role,
}

impl Session {
    pub fn new(user: impl Into<String>, role: Role) -> Self {
        Self {
            user: user.into(),
            role,
        }
    }

    pub fn anonymous() -> Self {
        Self::new("anonymous", Role::Spectator)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().allows(capability)
    }

    pub fn authorize(&self, capability: Capability) -> Result<()> {
        if self.can(capability) {
            return Ok(());
        }
        tracing::debug!(
            "Denied {} for user {} ({})",
            capability,
            self.user,
            self.role
        );
        Err(LeagueError::PermissionDenied {
            role: self.role.to_string(),
            capability: capability.to_string(),
        })
    }
}
