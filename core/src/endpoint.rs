//! Geoclient v1 resources.
//!
//! Each resource is requested as `{name}.{format}` relative to the base URL,
//! e.g. `address.json?houseNumber=314&street=west 100 st&borough=manhattan`.

use std::fmt;

use crate::format::Format;

/// A Geoclient v1 resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Address,
    AddressPoint,
    Bbl,
    Bin,
    Blockface,
    Intersection,
    Place,
    Search,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::Address,
        Endpoint::AddressPoint,
        Endpoint::Bbl,
        Endpoint::Bin,
        Endpoint::Blockface,
        Endpoint::Intersection,
        Endpoint::Place,
        Endpoint::Search,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Address => "address",
            Endpoint::AddressPoint => "addresspoint",
            Endpoint::Bbl => "bbl",
            Endpoint::Bin => "bin",
            Endpoint::Blockface => "blockface",
            Endpoint::Intersection => "intersection",
            Endpoint::Place => "place",
            Endpoint::Search => "search",
        }
    }

    /// Path relative to the base URL, e.g. `bbl.xml`.
    pub fn path(self, format: Format) -> String {
        format!("{}.{}", self.name(), format.as_str())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_uses_format_extension() {
        assert_eq!(Endpoint::Address.path(Format::Json), "address.json");
        assert_eq!(Endpoint::AddressPoint.path(Format::Xml), "addresspoint.xml");
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Endpoint::ALL.iter().map(|e| e.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Endpoint::ALL.len());
    }
}
