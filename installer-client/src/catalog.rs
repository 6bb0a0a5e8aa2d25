//! Static tables the scraper draws from.

use crate::domain::City;

pub const CITIES: [City; 10] = [
    City { name: "San Francisco", state: "CA", zip: "94105", utility: "PG&E" },
    City { name: "Los Angeles", state: "CA", zip: "90001", utility: "LADWP" },
    City { name: "New York", state: "NY", zip: "10001", utility: "ConEd" },
    City { name: "Miami", state: "FL", zip: "33101", utility: "FPL" },
    City { name: "Austin", state: "TX", zip: "78701", utility: "Austin Energy" },
    City { name: "Seattle", state: "WA", zip: "98101", utility: "Seattle City Light" },
    City { name: "Denver", state: "CO", zip: "80201", utility: "Xcel Energy" },
    City { name: "Phoenix", state: "AZ", zip: "85001", utility: "APS" },
    City { name: "Boston", state: "MA", zip: "02108", utility: "Eversource" },
    City { name: "Chicago", state: "IL", zip: "60601", utility: "ComEd" },
];

pub const BUSINESS_PREFIXES: [&str; 8] =
    ["Green", "Volt", "Rapid", "Eco", "Power", "Smart", "Elite", "Pro"];

pub const BUSINESS_SUFFIXES: [&str; 6] =
    ["Electric", "Chargers", "Solutions", "Installers", "Tech", "Energy"];

/// Every scraped installer advertises the same service bundle.
pub const SERVICES: &str = "EV Charger, Panel Upgrade";
