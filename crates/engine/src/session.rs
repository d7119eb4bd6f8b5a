//! Dashboard accounts and per-viewer scoping.
//!
//! Accounts live in the layout config and matching is exact and
//! case-sensitive, both for credentials at login and for operator names
//! at scoping time. A session is a plain value handed to whatever
//! derives tables; there is no ambient logged-in state anywhere in the
//! engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::UserConfig;
use crate::model::{CountTable, MetricPoint, RankingEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees every row of every table.
    Admin,
    /// Sees only rows whose operator cell equals their display name.
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

/// An authenticated viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

impl Session {
    /// True when this viewer may see rows attributed to `operator`.
    pub fn can_view(&self, operator: &str) -> bool {
        self.role == Role::Admin || self.display_name == operator
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn scope_ranking(&self, entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
        if self.is_admin() {
            return entries;
        }
        entries.into_iter().filter(|e| self.can_view(&e.name)).collect()
    }

    pub fn scope_series(&self, points: Vec<MetricPoint>) -> Vec<MetricPoint> {
        if self.is_admin() {
            return points;
        }
        points
            .into_iter()
            .filter(|p| self.can_view(&p.operator))
            .collect()
    }

    pub fn scope_counts(&self, table: CountTable) -> CountTable {
        if self.is_admin() {
            return table;
        }
        CountTable {
            scale_max: table.scale_max,
            samples: table
                .samples
                .into_iter()
                .filter(|s| self.can_view(&s.operator))
                .collect(),
        }
    }
}

/// Look up a user by exact username and password. `None` on any
/// mismatch; callers never learn which of the two was wrong.
pub fn authenticate(
    users: &BTreeMap<String, UserConfig>,
    username: &str,
    password: &str,
) -> Option<Session> {
    let user = users.get(username)?;
    if user.password != password {
        return None;
    }
    Some(Session {
        username: username.to_string(),
        display_name: user.display_name.clone(),
        role: user.role,
    })
}
