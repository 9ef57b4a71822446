//! Plain-text tables for the list commands

use crate::graph::{HealthState, classify};
use crate::models::{
    Claim, CompositeResource, Composition, K8sEvent, ManagedResource, Provider, Resource, Xrd,
};
use crate::util::age_since;
use chrono::{DateTime, Utc};

/// Condition types shown for claims, composite and managed resources
pub const READY_SYNCED: &[&str] = &["Ready", "Synced"];
/// Condition types shown for providers
pub const PROVIDER_CONDITIONS: &[&str] = &["Installed", "Healthy"];
/// Condition types shown for XRDs
pub const XRD_CONDITIONS: &[&str] = &["Established", "Offered"];

const COLUMN_GAP: usize = 3;

/// Status chips for the given condition types
///
/// Types the resource does not report are left out; a resource reporting
/// none of them renders as `-`.
pub fn conditions_summary<S>(resource: &Resource<S>, types: &[&str], icons: bool) -> String {
    let chips: Vec<String> = types
        .iter()
        .filter_map(|type_| resource.condition(type_))
        .map(|c| {
            if icons {
                let icon = match c.status.as_str() {
                    "True" => "✓",
                    "False" => "✗",
                    _ => "?",
                };
                format!("{}{}", icon, c.type_)
            } else {
                format!("{}={}", c.type_, c.status)
            }
        })
        .collect();

    if chips.is_empty() {
        "-".to_string()
    } else {
        chips.join(" ")
    }
}

/// Left-aligned columns sized to their widest cell
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        let last = cells.len().saturating_sub(1);
        let mut out = String::new();
        for (i, cell) in cells.into_iter().enumerate() {
            out.push_str(cell);
            if i < last {
                let pad = widths[i] - cell.chars().count() + COLUMN_GAP;
                out.extend(std::iter::repeat_n(' ', pad));
            }
        }
        out.push('\n');
        out
    };

    let mut out = line(headers.to_vec());
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

fn name_of<S>(resource: &Resource<S>) -> String {
    resource.name().unwrap_or("-").to_string()
}

fn age_of<S>(resource: &Resource<S>, now: DateTime<Utc>) -> String {
    age_since(resource.creation_timestamp().as_deref(), now)
}

pub const PROVIDER_HEADERS: &[&str] = &["NAME", "PACKAGE", "STATUS", "AGE"];

pub fn provider_rows(items: &[Provider], now: DateTime<Utc>, icons: bool) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|p| {
            vec![
                name_of(p),
                p.spec.package.clone(),
                conditions_summary(p, PROVIDER_CONDITIONS, icons),
                age_of(p, now),
            ]
        })
        .collect()
}

pub const CLAIM_HEADERS: &[&str] = &["NAME", "NAMESPACE", "KIND", "STATUS", "AGE"];

pub fn claim_rows(items: &[Claim], now: DateTime<Utc>, icons: bool) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|c| {
            vec![
                name_of(c),
                c.namespace().unwrap_or("-").to_string(),
                c.kind.clone(),
                conditions_summary(c, READY_SYNCED, icons),
                age_of(c, now),
            ]
        })
        .collect()
}

pub const MANAGED_HEADERS: &[&str] = &["NAME", "KIND", "GROUP", "STATUS", "AGE"];

pub fn managed_rows(items: &[ManagedResource], now: DateTime<Utc>, icons: bool) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|m| {
            vec![
                name_of(m),
                m.kind.clone(),
                m.group_version().0.to_string(),
                conditions_summary(m, READY_SYNCED, icons),
                age_of(m, now),
            ]
        })
        .collect()
}

pub const COMPOSITE_HEADERS: &[&str] = &["NAME", "KIND", "COMPOSITION", "STATUS", "AGE"];

pub fn composite_rows(
    items: &[CompositeResource],
    now: DateTime<Utc>,
    icons: bool,
) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|x| {
            let composition = x
                .spec
                .composition_ref
                .as_ref()
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "-".to_string());
            vec![
                name_of(x),
                x.kind.clone(),
                composition,
                conditions_summary(x, READY_SYNCED, icons),
                age_of(x, now),
            ]
        })
        .collect()
}

pub const COMPOSITION_HEADERS: &[&str] = &["NAME", "COMPOSITE TYPE", "AGE"];

pub fn composition_rows(items: &[Composition], now: DateTime<Utc>) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|c| {
            let type_ref = &c.spec.composite_type_ref;
            vec![
                name_of(c),
                format!("{} ({})", type_ref.kind, type_ref.api_version),
                age_of(c, now),
            ]
        })
        .collect()
}

pub const XRD_HEADERS: &[&str] = &["NAME", "GROUP", "KIND", "CLAIM KIND", "STATUS", "AGE"];

pub fn xrd_rows(items: &[Xrd], now: DateTime<Utc>, icons: bool) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|x| {
            let claim_kind = x
                .spec
                .claim_names
                .as_ref()
                .map(|n| n.kind.clone())
                .unwrap_or_else(|| "-".to_string());
            vec![
                name_of(x),
                x.spec.group.clone(),
                x.spec.names.kind.clone(),
                claim_kind,
                conditions_summary(x, XRD_CONDITIONS, icons),
                age_of(x, now),
            ]
        })
        .collect()
}

pub const EVENT_HEADERS: &[&str] = &["TYPE", "REASON", "COUNT", "LAST SEEN", "MESSAGE"];

pub fn event_rows(items: &[K8sEvent], now: DateTime<Utc>) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|e| {
            let seen = e.last_timestamp.as_deref().or(e.first_timestamp.as_deref());
            vec![
                e.type_.clone(),
                e.reason.clone(),
                e.count.to_string(),
                age_since(seen, now),
                e.message.clone(),
            ]
        })
        .collect()
}

/// Number of items whose classified health is not `Ok`
pub fn count_unhealthy<S>(items: &[Resource<S>]) -> usize {
    items
        .iter()
        .filter(|r| classify(Some(*r)).0 != HealthState::Ok)
        .count()
}
