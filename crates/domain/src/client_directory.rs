use ipnetwork::IpNetwork;
use rustc_hash::FxHashMap;
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSource {
    /// Configured by the user; wins over discovered names.
    Persistent,
    /// Discovered by the server (rDNS, ARP, hosts file).
    Auto,
}

/// A named client and the identifiers it answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub name: String,
    /// IP addresses, CIDR subnets or other opaque ids (e.g. MAC).
    pub ids: Vec<String>,
    pub source: ClientSource,
}

impl ClientRecord {
    pub fn persistent(name: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ids,
            source: ClientSource::Persistent,
        }
    }

    pub fn auto(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ids: vec![ip.into()],
            source: ClientSource::Auto,
        }
    }
}

/// Resolves the client address of a log row to a display name.
///
/// Exact ids are checked first, then the most specific subnet. Persistent
/// clients shadow auto-discovered ones for the same id.
#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    by_id: FxHashMap<String, Arc<str>>,
    subnets: Vec<(IpNetwork, Arc<str>)>,
}

impl ClientDirectory {
    pub fn build(records: &[ClientRecord]) -> Self {
        let mut directory = Self::default();

        let ordered = records
            .iter()
            .filter(|r| r.source == ClientSource::Persistent)
            .chain(records.iter().filter(|r| r.source == ClientSource::Auto));

        for record in ordered {
            if record.name.is_empty() {
                continue;
            }
            let name: Arc<str> = Arc::from(record.name.as_str());
            for id in &record.ids {
                directory.insert(id.trim(), &name);
            }
        }

        directory
    }

    fn insert(&mut self, id: &str, name: &Arc<str>) {
        if id.contains('/') {
            if let Ok(network) = id.parse::<IpNetwork>() {
                if !self.subnets.iter().any(|(n, _)| *n == network) {
                    self.subnets.push((network, Arc::clone(name)));
                }
                return;
            }
        }
        self.by_id
            .entry(id.to_ascii_lowercase())
            .or_insert_with(|| Arc::clone(name));
    }

    pub fn name_of(&self, client: &str) -> Option<&str> {
        if let Some(name) = self.by_id.get(&client.to_ascii_lowercase()) {
            return Some(name.as_ref());
        }

        let ip: IpAddr = client.parse().ok()?;
        self.subnets
            .iter()
            .filter(|(network, _)| network.contains(ip))
            .max_by_key(|(network, _)| network.prefix())
            .map(|(_, name)| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_id.len() + self.subnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.subnets.is_empty()
    }
}
