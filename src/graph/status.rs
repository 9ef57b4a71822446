//! Health classification from condition lists

use crate::models::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message reported when there is no resource to classify
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Health of a resource as derived from its conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthState {
    Ok,
    NotReady,
    NotSynced,
    Unhealthy,
    NotFound,
}

/// Unsatisfied condition types, highest priority first
const PRIORITY: [(&str, HealthState); 4] = [
    ("Found", HealthState::NotFound),
    ("Healthy", HealthState::Unhealthy),
    ("Synced", HealthState::NotSynced),
    ("Ready", HealthState::NotReady),
];

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Ok => "Ok",
            HealthState::NotReady => "NotReady",
            HealthState::NotSynced => "NotSynced",
            HealthState::Unhealthy => "Unhealthy",
            HealthState::NotFound => "NotFound",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, HealthState::Ok)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a resource's health
///
/// A missing resource is `NotFound` with [`NOT_SPECIFIED`] as message. A
/// resource without conditions is `Ok`. Otherwise the unsatisfied condition
/// (status other than "True") with the highest priority wins and its
/// `reason` becomes the message. When a type appears more than once the
/// last unsatisfied entry provides the reason.
pub fn classify<S>(resource: Option<&Resource<S>>) -> (HealthState, String) {
    let Some(resource) = resource else {
        return (HealthState::NotFound, NOT_SPECIFIED.to_string());
    };

    tracing::debug!(
        "Classifying {}/{}",
        resource.kind,
        resource.name().unwrap_or("<unnamed>")
    );

    for (type_, state) in PRIORITY {
        let problem = resource
            .conditions()
            .iter()
            .rev()
            .find(|c| c.type_ == type_ && !c.is_satisfied());
        if let Some(condition) = problem {
            return (state, condition.reason.clone());
        }
    }

    (HealthState::Ok, String::new())
}
