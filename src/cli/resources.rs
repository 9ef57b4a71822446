//! Handlers for the commands that query the backend

use super::output::{self, render_table};
use crate::api::{self, ApiClient, ApiResult};
use crate::graph::{self, LayoutConfig, OutputFormat, Route};
use crate::models::{ItemList, split_api_version};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Subcommand, ValueEnum};

/// Collection endpoints of the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Providers,
    Claims,
    Managed,
    Composite,
    Compositions,
    Xrds,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Providers => "providers",
            ListKind::Claims => "claims",
            ListKind::Managed => "managed resources",
            ListKind::Composite => "composite resources",
            ListKind::Compositions => "compositions",
            ListKind::Xrds => "XRDs",
        }
    }
}

/// Resource whose relationship graph should be shown
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum GraphTarget {
    /// A claim (namespaced)
    Claim {
        /// API version, e.g. "example.com/v1"
        api_version: String,
        kind: String,
        namespace: String,
        name: String,
    },
    /// A composite resource
    Composite {
        api_version: String,
        kind: String,
        name: String,
    },
    /// A managed resource
    Managed {
        api_version: String,
        kind: String,
        name: String,
        /// Namespace of a namespaced managed resource
        #[arg(long, short = 'n')]
        namespace: Option<String>,
    },
    /// A detail path as produced by node navigation, e.g. "/claims/example.com/v1/Database/default/my-db"
    Path { path: String },
}

impl GraphTarget {
    pub fn to_route(&self) -> Result<Route> {
        let route = match self {
            GraphTarget::Claim {
                api_version,
                kind,
                namespace,
                name,
            } => {
                let (group, version) = split_api_version(api_version);
                Route::Claim {
                    group: group.to_string(),
                    version: version.to_string(),
                    kind: kind.clone(),
                    namespace: namespace.clone(),
                    name: name.clone(),
                }
            }
            GraphTarget::Composite {
                api_version,
                kind,
                name,
            } => {
                let (group, version) = split_api_version(api_version);
                Route::Composite {
                    group: group.to_string(),
                    version: version.to_string(),
                    kind: kind.clone(),
                    name: name.clone(),
                }
            }
            GraphTarget::Managed {
                api_version,
                kind,
                name,
                namespace,
            } => {
                let (group, version) = split_api_version(api_version);
                Route::Managed {
                    group: group.to_string(),
                    version: version.to_string(),
                    kind: kind.clone(),
                    namespace: namespace.clone(),
                    name: name.clone(),
                }
            }
            GraphTarget::Path { path } => Route::parse(path)
                .with_context(|| format!("Not a claim, composite or managed path: {}", path))?,
        };
        Ok(route)
    }
}

fn print_items(kind: ListKind, headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("No {} found", kind.as_str());
    } else {
        print!("{}", render_table(headers, &rows));
    }
}

/// `komoplane <list kind>`
pub async fn print_list(client: &dyn ApiClient, kind: ListKind, icons: bool) -> Result<()> {
    let now = Utc::now();
    let context = || format!("Failed to list {}", kind.as_str());
    match kind {
        ListKind::Providers => {
            let list = client.list_providers().await.with_context(context)?;
            let rows = output::provider_rows(&list.items, now, icons);
            print_items(kind, output::PROVIDER_HEADERS, rows);
        }
        ListKind::Claims => {
            let list = client.list_claims().await.with_context(context)?;
            let rows = output::claim_rows(&list.items, now, icons);
            print_items(kind, output::CLAIM_HEADERS, rows);
        }
        ListKind::Managed => {
            let list = client.list_managed().await.with_context(context)?;
            let rows = output::managed_rows(&list.items, now, icons);
            print_items(kind, output::MANAGED_HEADERS, rows);
        }
        ListKind::Composite => {
            let list = client.list_composite().await.with_context(context)?;
            let rows = output::composite_rows(&list.items, now, icons);
            print_items(kind, output::COMPOSITE_HEADERS, rows);
        }
        ListKind::Compositions => {
            let list = client.list_compositions().await.with_context(context)?;
            let rows = output::composition_rows(&list.items, now);
            print_items(kind, output::COMPOSITION_HEADERS, rows);
        }
        ListKind::Xrds => {
            let list = client.list_xrds().await.with_context(context)?;
            let rows = output::xrd_rows(&list.items, now, icons);
            print_items(kind, output::XRD_HEADERS, rows);
        }
    }
    Ok(())
}

/// `komoplane provider <name>`: one provider and its configs
pub async fn print_provider(client: &dyn ApiClient, name: &str, icons: bool) -> Result<()> {
    let now = Utc::now();
    let (provider, configs) =
        futures::join!(client.get_provider(name), client.get_provider_configs(name));
    let provider = provider.with_context(|| format!("Failed to fetch provider {}", name))?;

    print!(
        "{}",
        render_table(
            output::PROVIDER_HEADERS,
            &output::provider_rows(std::slice::from_ref(&provider), now, icons)
        )
    );

    // Configs are optional detail; report and carry on
    match configs {
        Ok(configs) => {
            println!();
            let rows: Vec<Vec<String>> = configs
                .items
                .iter()
                .map(|c| {
                    vec![
                        c.name().unwrap_or("-").to_string(),
                        c.kind.clone(),
                        crate::util::age_since(c.creation_timestamp().as_deref(), now),
                    ]
                })
                .collect();
            if rows.is_empty() {
                println!("No provider configs found");
            } else {
                print!("{}", render_table(&["CONFIG", "KIND", "AGE"], &rows));
            }
        }
        Err(e) => {
            tracing::warn!("Failed to fetch configs of provider {}: {}", name, e);
            eprintln!("Failed to fetch provider configs: {}", e);
        }
    }
    Ok(())
}

/// `komoplane events [namespace] <name>`
pub async fn print_events(
    client: &dyn ApiClient,
    namespace: Option<&str>,
    name: &str,
) -> Result<()> {
    let events = match namespace {
        Some(ns) => client.get_namespaced_events(ns, name).await,
        None => client.get_events(name).await,
    }
    .with_context(|| format!("Failed to fetch events for {}", name))?;

    if events.items.is_empty() {
        println!("No events found");
    } else {
        let rows = output::event_rows(&events.items, Utc::now());
        print!("{}", render_table(output::EVENT_HEADERS, &rows));
    }
    Ok(())
}

/// One line of the home summary
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub kind: ListKind,
    /// `(total, unhealthy)`, or the fetch error
    pub counts: Result<(usize, usize), String>,
}

fn summarize<S>(kind: ListKind, list: ApiResult<ItemList<crate::models::Resource<S>>>) -> SummaryLine {
    SummaryLine {
        kind,
        counts: list
            .map(|l| (l.items.len(), output::count_unhealthy(&l.items)))
            .map_err(|e| e.to_string()),
    }
}

/// Fetch every collection concurrently and count totals and unhealthy items
pub async fn collect_summary(client: &dyn ApiClient) -> Vec<SummaryLine> {
    let (providers, claims, managed, composite, compositions, xrds) = futures::join!(
        client.list_providers(),
        client.list_claims(),
        client.list_managed(),
        client.list_composite(),
        client.list_compositions(),
        client.list_xrds(),
    );

    vec![
        summarize(ListKind::Providers, providers),
        summarize(ListKind::Claims, claims),
        summarize(ListKind::Managed, managed),
        summarize(ListKind::Composite, composite),
        summarize(ListKind::Compositions, compositions),
        summarize(ListKind::Xrds, xrds),
    ]
}

pub fn render_summary(lines: &[SummaryLine]) -> String {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| match &line.counts {
            Ok((total, unhealthy)) => vec![
                line.kind.as_str().to_string(),
                total.to_string(),
                unhealthy.to_string(),
            ],
            Err(e) => vec![
                line.kind.as_str().to_string(),
                "-".to_string(),
                format!("error: {}", e),
            ],
        })
        .collect();
    render_table(&["KIND", "TOTAL", "UNHEALTHY"], &rows)
}

/// `komoplane summary`
pub async fn print_summary(client: &dyn ApiClient) -> Result<()> {
    let lines = collect_summary(client).await;
    print!("{}", render_summary(&lines));
    Ok(())
}

/// `komoplane status`
pub async fn print_status(client: &dyn ApiClient) -> Result<()> {
    let status = client
        .get_status()
        .await
        .context("Failed to fetch backend status")?;

    println!("Backend version:      {}", status.cur_ver);
    println!("Crossplane installed: {}", status.crossplane_installed);
    println!("Cluster mode:         {}", status.cluster_mode);
    if status.upgrade_available() {
        println!(
            "A newer komoplane is available: {} (running {})",
            status.latest_ver, status.cur_ver
        );
    }
    Ok(())
}

/// Fetch, build, lay out and render the graph around `route`
pub async fn render_graph(
    client: &dyn ApiClient,
    route: &Route,
    layout: &LayoutConfig,
    format: OutputFormat,
) -> Result<String> {
    let focal = api::fetch_focal(client, route)
        .await
        .with_context(|| format!("Failed to fetch {}", route))?;
    let mut graph = graph::build_graph(&focal);
    graph::layout(&mut graph, layout);
    graph::export::render(&graph, format, layout.direction)
}
