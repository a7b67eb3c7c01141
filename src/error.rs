use crate::record::Record;

/// Invalid configuration, detected before any record is classified.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config defines no groups")]
    NoGroups,

    #[error("{section}[{index}] must be a mapping with exactly one key, found {keys} keys")]
    MalformedEntry {
        section: &'static str,
        index: usize,
        keys: usize,
    },

    #[error("{section} declares '{name}' more than once")]
    DuplicateRule { section: &'static str, name: String },

    #[error("{section} rule '{name}' has an empty pattern list")]
    EmptyPatterns { section: &'static str, name: String },

    #[error("{section} rule '{name}' has an invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        section: &'static str,
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("subdivided_group '{name}' is not one of the declared groups ({known})")]
    UnknownDesignatedGroup { name: String, known: String },

    #[error(
        "group_order must list every group exactly once (missing: [{missing}], unknown: [{unknown}], repeated: [{repeated}])"
    )]
    OrderNotPermutation {
        missing: String,
        unknown: String,
        repeated: String,
    },
}

/// Pipeline failure. Every variant is fatal: no document is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "{} record(s) matched no {scope} rule; extend the configuration to cover: {}",
        records.len(),
        list_records(records)
    )]
    Unclassified {
        scope: String,
        records: Vec<Record>,
    },

    #[error(
        "subgroups of '{group}' account for {found} record(s) but the group holds {expected}"
    )]
    AmbiguousStructure {
        group: String,
        expected: usize,
        found: usize,
    },
}

fn list_records(records: &[Record]) -> String {
    records
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclassified_message_names_every_record() {
        let err = Error::Unclassified {
            scope: "group".to_string(),
            records: vec![Record::new("Zed", "Janitor"), Record::new("Ann", "Poet")],
        };
        assert_eq!(
            err.to_string(),
            "2 record(s) matched no group rule; extend the configuration to cover: Zed (Janitor), Ann (Poet)"
        );
    }
}
