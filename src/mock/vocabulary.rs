//! Word lists the mock organization is drawn from.

pub const ACCOUNT_NAMES: &[&str] = &[
    "Software Component",
    "Shared Services",
    "Networking",
    "Security",
    "Data Analytics",
    "Machine Learning",
    "DevOps Pipeline",
    "Cloud Management",
    "User Services",
    "Storage Management",
    "CI/CD Runners",
    "Data Storage",
];

pub const EMAIL_DOMAINS: &[&str] = &["nowherecompany.com", "examplecorp.com", "mockorganization.org"];

pub const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Alice", "Bob", "Charlie", "Eve", "Mike", "Anna", "Paul", "Sarah",
];

pub const LAST_NAMES: &[&str] = &[
    "Doe", "Smith", "Johnson", "Williams", "Brown", "Davis", "Taylor", "Anderson", "White", "Moore",
];

pub const ENVIRONMENTS: &[&str] = &["dev", "prod", "test"];

pub const PROJECTS: &[&str] = &["ProjectX", "ProjectY", "ProjectZ", "ProjectAlpha"];

pub const DEPARTMENTS: &[&str] = &["IT", "Finance", "HR", "R&D"];

pub const REGIONS: &[&str] = &["us-east-1", "eu-west-1", "ap-south-1"];

/// Prefix of every mock account id; the suffix is the 1-based index, zero-padded.
pub const ACCOUNT_ID_PREFIX: &str = "1234567890";
