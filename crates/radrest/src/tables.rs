/// Names of the RADIUS tables the store adapters query.
///
/// Deployments frequently rename these (per-tenant prefixes, legacy schemas),
/// so every adapter interpolates names from this struct instead of hardcoding
/// them. Values must be trusted identifiers from configuration, never request
/// input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub radcheck: String,
    pub radreply: String,
    pub radgroupcheck: String,
    pub radgroupreply: String,
    pub radusergroup: String,
    pub nas: String,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            radcheck: "radcheck".into(),
            radreply: "radreply".into(),
            radgroupcheck: "radgroupcheck".into(),
            radgroupreply: "radgroupreply".into(),
            radusergroup: "radusergroup".into(),
            nas: "nas".into(),
        }
    }
}
