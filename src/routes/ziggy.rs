//! Ziggy-compatible route export.

use std::collections::BTreeMap;

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// One named route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiggyRoute {
    pub uri: String,
    pub methods: Vec<String>,
    pub domain: Option<String>,
}

/// Named routes known to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    routes: BTreeMap<String, ZiggyRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `method` on `uri`.
    ///
    /// Registering an existing name again adds the method to it.
    pub fn add(mut self, name: impl Into<String>, method: Method, uri: impl Into<String>) -> Self {
        let method = method.as_str().to_string();
        let uri = uri.into();
        self.routes
            .entry(name.into())
            .and_modify(|route| {
                if !route.methods.contains(&method) {
                    route.methods.push(method.clone());
                }
            })
            .or_insert_with(|| ZiggyRoute {
                uri,
                methods: vec![method],
                domain: None,
            });
        self
    }

    pub fn get(&self, name: &str) -> Option<&ZiggyRoute> {
        self.routes.get(name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// The object a `Ziggy` client expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ziggy {
    pub domain: String,
    pub port: Option<u16>,
    pub protocol: String,
    pub url: String,
    pub group: String,
    pub routes: BTreeMap<String, ZiggyRoute>,
}

impl Ziggy {
    /// Build the export for a page served at `scheme://host`.
    pub fn new(table: &RouteTable, scheme: &str, host: &str) -> Self {
        let protocol = if scheme.is_empty() { "http" } else { scheme };

        let (domain, port) = match host.rsplit_once(':') {
            Some((domain, port)) => (domain.to_string(), port.parse::<u16>().ok().filter(|p| *p > 0)),
            None => (host.to_string(), None),
        };

        let mut url = format!("{}://{}", protocol, domain);
        if let Some(port) = port {
            url.push_str(&format!(":{}", port));
        }

        Self {
            domain,
            port,
            protocol: protocol.to_string(),
            url,
            group: String::new(),
            routes: table.routes.clone(),
        }
    }
}
